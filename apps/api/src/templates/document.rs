//! Typed layout tree produced by every template renderer.
//!
//! A `Document` is what the preview endpoint returns as JSON and what the
//! export pipeline lays out and draws. It carries no pixel positions for
//! text; those are computed in `export::layout`.

use serde::Serialize;

use crate::models::cv::{Accent, Language};
use crate::parsing::BulletBlock;

/// A4 width at 96 dpi.
pub const PAGE_WIDTH: f32 = 794.0;

/// A4 height at 96 dpi. Content taller than this grows the page.
pub const MIN_PAGE_HEIGHT: f32 = 1123.0;

// ────────────────────────────────────────────────────────────────────────────
// Colours
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const INK: Color = Color::rgb(30, 30, 30);
    pub const MUTED: Color = Color::rgb(107, 114, 128);
    pub const SIDEBAR_GREY: Color = Color::rgb(241, 242, 244);
    pub const STAR: Color = Color::rgb(255, 255, 255);

    /// Components in 0.0..=1.0 for PDF colour operators.
    pub fn to_unit(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

/// Colours derived from the selected accent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub primary: Color,
    pub primary_dark: Color,
    /// Light tint used behind cards and tags.
    pub soft: Color,
    /// The other flag colour; used for icons and the second stripe.
    pub contrast: Color,
}

const BLUE: Color = Color::rgb(31, 78, 140);
const BLUE_DARK: Color = Color::rgb(22, 58, 107);
const BLUE_SOFT: Color = Color::rgb(232, 239, 248);
const RED: Color = Color::rgb(178, 34, 52);
const RED_DARK: Color = Color::rgb(138, 26, 40);
const RED_SOFT: Color = Color::rgb(248, 233, 235);
const GREEN: Color = Color::rgb(46, 125, 50);
const GREEN_DARK: Color = Color::rgb(27, 94, 32);
const GREEN_SOFT: Color = Color::rgb(232, 245, 233);
const GOLD: Color = Color::rgb(254, 221, 0);

impl Palette {
    pub fn for_accent(accent: Accent) -> Self {
        match accent {
            Accent::Blue => Palette {
                primary: BLUE,
                primary_dark: BLUE_DARK,
                soft: BLUE_SOFT,
                contrast: RED,
            },
            Accent::Red => Palette {
                primary: RED,
                primary_dark: RED_DARK,
                soft: RED_SOFT,
                contrast: BLUE,
            },
            Accent::Green => Palette {
                primary: GREEN,
                primary_dark: GREEN_DARK,
                soft: GREEN_SOFT,
                contrast: GOLD,
            },
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Header
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum HeaderStyle {
    /// Dark text on the page background.
    Plain,
    /// Flat primary-colour band, white text.
    Solid,
    /// Two-tone band standing in for a background picture, white text.
    Banner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum HeaderPlacement {
    /// Spans the page above both columns.
    FullWidth,
    /// Sits at the top of the main column, beside a full-height sidebar.
    MainColumn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ContactKind {
    Phone,
    Email,
    Location,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactLine {
    pub kind: ContactKind,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PhotoShape {
    Square,
    Circle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PhotoPosition {
    /// Top of the sidebar.
    Sidebar,
    /// Left of the name inside the header.
    HeaderLeft,
    /// Right edge of the header.
    HeaderRight,
}

/// Where the photo goes. The image itself stays in the CV data; `filled` only
/// says whether there is one, otherwise a "Photo" placeholder is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoSlot {
    pub shape: PhotoShape,
    pub position: PhotoPosition,
    pub size: f32,
    pub filled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub style: HeaderStyle,
    pub placement: HeaderPlacement,
    pub name: String,
    /// Empty when the template lists contacts in the sidebar instead.
    pub contacts: Vec<ContactLine>,
    pub contacts_inline: bool,
    pub visa_tag: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Body
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageLine {
    pub name: String,
    pub level: String,
}

impl From<&Language> for LanguageLine {
    fn from(l: &Language) -> Self {
        Self {
            name: l.name.clone(),
            level: l.level.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Block {
    Paragraph {
        text: String,
    },
    /// Placeholder shown while the user has not filled a field yet.
    Muted {
        text: String,
    },
    Bullets {
        items: Vec<String>,
    },
    BulletGroups {
        groups: Vec<BulletBlock>,
    },
    Languages {
        entries: Vec<LanguageLine>,
        separator: &'static str,
        bold_names: bool,
    },
    Contact {
        lines: Vec<ContactLine>,
    },
    /// One work experience: role line, date range, then its description.
    Entry {
        role: String,
        dates: String,
        body: Vec<Block>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionStyle {
    /// Uppercase title with an accent rule below.
    Ruled,
    /// Title and content on a tinted card.
    Card,
    /// Title only, no decoration.
    Bare,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub title: String,
    pub style: SectionStyle,
    pub blocks: Vec<Block>,
}

impl Section {
    pub fn new(title: &str, style: SectionStyle, blocks: Vec<Block>) -> Self {
        Self {
            title: title.to_string(),
            style,
            blocks,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub width: f32,
    pub fill: Option<Color>,
    pub text: Color,
    pub title: Color,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Decoration {
    /// Full-height vertical band at the left edge.
    Stripe { x: f32, width: f32, color: Color },
    /// Scatter of small stars in a rectangle, top-left anchored.
    StarField {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub template_id: &'static str,
    pub accent: Accent,
    pub palette: Palette,
    pub header: Header,
    pub photo: PhotoSlot,
    /// Left column; always present in the five built-in layouts.
    pub sidebar: Column,
    pub main: Column,
    pub decorations: Vec<Decoration>,
}

impl Document {
    /// All text of the document in reading order. Used by tests and logging.
    pub fn plain_text(&self) -> String {
        let mut out = Vec::new();
        out.push(self.header.name.clone());
        out.extend(self.header.contacts.iter().map(|c| c.text.clone()));
        if let Some(tag) = &self.header.visa_tag {
            out.push(tag.clone());
        }
        for section in self.sidebar.sections.iter().chain(&self.main.sections) {
            out.push(section.title.clone());
            for block in &section.blocks {
                collect_block_text(block, &mut out);
            }
        }
        out.join("\n")
    }
}

fn collect_block_text(block: &Block, out: &mut Vec<String>) {
    match block {
        Block::Paragraph { text } | Block::Muted { text } => out.push(text.clone()),
        Block::Bullets { items } => out.extend(items.iter().cloned()),
        Block::BulletGroups { groups } => {
            for g in groups {
                if !g.title.is_empty() {
                    out.push(g.title.clone());
                }
                out.extend(g.bullets.iter().cloned());
            }
        }
        Block::Languages {
            entries, separator, ..
        } => out.extend(
            entries
                .iter()
                .map(|e| format!("{}{}{}", e.name, separator, e.level)),
        ),
        Block::Contact { lines } => out.extend(lines.iter().map(|l| l.text.clone())),
        Block::Entry { role, dates, body } => {
            out.push(role.clone());
            if !dates.is_empty() {
                out.push(dates.clone());
            }
            for b in body {
                collect_block_text(b, out);
            }
        }
    }
}
