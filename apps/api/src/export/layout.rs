//! Positions a [`Document`] on a single page.
//!
//! Coordinates are top-down page units (1 unit = 1 CSS px at 96 dpi). The
//! page is `PAGE_WIDTH` wide and grows past `MIN_PAGE_HEIGHT` when the
//! longer column needs it. The PDF writer flips y when drawing.

use crate::templates::document::{
    Block, Color, Column, ContactLine, Decoration, Document, Header, HeaderPlacement,
    HeaderStyle, Palette, PhotoPosition, PhotoShape, PhotoSlot, Section, SectionStyle,
    MIN_PAGE_HEIGHT, PAGE_WIDTH,
};

use super::metrics::Font;

const PAD: f32 = 28.0;
const LINE: f32 = 1.45;
const NAME_SIZE: f32 = 26.0;
const CONTACT_SIZE: f32 = 10.5;
const TITLE_SIZE: f32 = 12.5;
const BODY_SIZE: f32 = 10.5;
const ROLE_SIZE: f32 = 11.5;
const DATE_SIZE: f32 = 9.5;
const TAG_SIZE: f32 = 10.0;
const BULLET_INDENT: f32 = 12.0;
const CARD_PAD: f32 = 10.0;
const SECTION_GAP: f32 = 18.0;
const BLOCK_GAP: f32 = 6.0;
const ENTRY_GAP: f32 = 12.0;
const ICON_RADIUS: f32 = 2.5;
const STAR_SPACING: f32 = 14.0;

/// One drawing operation. `y` of `Text` is the baseline.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Color,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width: f32,
        color: Color,
    },
    Circle {
        cx: f32,
        cy: f32,
        r: f32,
        color: Color,
    },
    Star {
        cx: f32,
        cy: f32,
        r: f32,
        color: Color,
    },
    Text {
        x: f32,
        y: f32,
        size: f32,
        font: Font,
        color: Color,
        text: String,
    },
    /// The user's photo, drawn from the CV data by the writer.
    Photo {
        x: f32,
        y: f32,
        size: f32,
        circle: bool,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub width: f32,
    pub height: f32,
    /// Back to front.
    pub items: Vec<Item>,
}

impl PageLayout {
    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }

    #[cfg(test)]
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.items.iter().filter_map(|i| match i {
            Item::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Three paint layers so that fills computed late still end up behind text.
#[derive(Default)]
struct Canvas {
    base: Vec<Item>,
    cards: Vec<Item>,
    content: Vec<Item>,
}

impl Canvas {
    fn text(&mut self, x: f32, y: f32, size: f32, font: Font, color: Color, text: &str) {
        self.content.push(Item::Text {
            x,
            y,
            size,
            font,
            color,
            text: text.to_string(),
        });
    }
}

fn baseline(top: f32, size: f32) -> f32 {
    top + size * 1.05
}

fn muted_on(text: Color) -> Color {
    if text == Color::WHITE {
        Color::rgb(214, 222, 235)
    } else {
        Color::MUTED
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Column flow
// ────────────────────────────────────────────────────────────────────────────

struct Flow<'c> {
    canvas: &'c mut Canvas,
    x: f32,
    width: f32,
    y: f32,
    text: Color,
    title: Color,
    palette: Palette,
}

impl<'c> Flow<'c> {
    fn new(canvas: &'c mut Canvas, x: f32, width: f32, y: f32, column: &Column, palette: Palette) -> Self {
        Self {
            canvas,
            x,
            width,
            y,
            text: column.text,
            title: column.title,
            palette,
        }
    }

    /// Wraps `text` at the column width minus `indent` and draws it.
    fn wrapped(&mut self, text: &str, font: Font, size: f32, color: Color, indent: f32) {
        for raw_line in text.split('\n') {
            let lines = font.metrics().wrap(raw_line, size, self.width - indent);
            if lines.is_empty() {
                self.y += size * 0.6;
                continue;
            }
            for line in lines {
                self.canvas
                    .text(self.x + indent, baseline(self.y, size), size, font, color, &line);
                self.y += size * LINE;
            }
        }
    }

    fn bullets(&mut self, items: &[String]) {
        for item in items {
            let marker_y = baseline(self.y, BODY_SIZE);
            self.canvas
                .text(self.x + 2.0, marker_y, BODY_SIZE, Font::Helvetica, self.text, "•");
            self.wrapped(item, Font::Helvetica, BODY_SIZE, self.text, BULLET_INDENT);
        }
    }

    fn contact_line(&mut self, line: &ContactLine) {
        self.canvas.content.push(Item::Circle {
            cx: self.x + ICON_RADIUS + 1.0,
            cy: self.y + BODY_SIZE * 0.7,
            r: ICON_RADIUS,
            color: self.palette.contrast,
        });
        self.wrapped(&line.text, Font::Helvetica, BODY_SIZE, self.text, BULLET_INDENT);
    }

    fn block(&mut self, block: &Block) {
        match block {
            Block::Paragraph { text } => {
                self.wrapped(text, Font::Helvetica, BODY_SIZE, self.text, 0.0)
            }
            Block::Muted { text } => {
                self.wrapped(text, Font::Helvetica, BODY_SIZE, muted_on(self.text), 0.0)
            }
            Block::Bullets { items } => self.bullets(items),
            Block::BulletGroups { groups } => {
                for group in groups {
                    if !group.title.is_empty() {
                        self.wrapped(&group.title, Font::HelveticaBold, BODY_SIZE, self.text, 0.0);
                    }
                    self.bullets(&group.bullets);
                    self.y += BLOCK_GAP / 2.0;
                }
            }
            Block::Languages {
                entries,
                separator,
                bold_names,
            } => {
                for entry in entries {
                    let rest = format!("{separator}{}", entry.level);
                    let name_w = Font::HelveticaBold.metrics().measure(&entry.name, BODY_SIZE);
                    let rest_w = Font::Helvetica.metrics().measure(&rest, BODY_SIZE);
                    if *bold_names && name_w + rest_w <= self.width {
                        let y = baseline(self.y, BODY_SIZE);
                        self.canvas
                            .text(self.x, y, BODY_SIZE, Font::HelveticaBold, self.text, &entry.name);
                        self.canvas
                            .text(self.x + name_w, y, BODY_SIZE, Font::Helvetica, self.text, &rest);
                        self.y += BODY_SIZE * LINE;
                    } else {
                        let line = format!("{}{rest}", entry.name);
                        self.wrapped(&line, Font::Helvetica, BODY_SIZE, self.text, 0.0);
                    }
                }
            }
            Block::Contact { lines } => {
                for line in lines {
                    self.contact_line(line);
                }
            }
            Block::Entry { role, dates, body } => {
                let bold = Font::HelveticaBold.metrics();
                let dates_w = Font::Helvetica.metrics().measure(dates, DATE_SIZE);
                let role_fits = bold.measure(role, ROLE_SIZE) + dates_w + 12.0 <= self.width;
                if !dates.is_empty() && role_fits {
                    let y = baseline(self.y, ROLE_SIZE);
                    self.canvas
                        .text(self.x, y, ROLE_SIZE, Font::HelveticaBold, self.text, role);
                    self.canvas.text(
                        self.x + self.width - dates_w,
                        y,
                        DATE_SIZE,
                        Font::Helvetica,
                        muted_on(self.text),
                        dates,
                    );
                    self.y += ROLE_SIZE * LINE;
                } else {
                    self.wrapped(role, Font::HelveticaBold, ROLE_SIZE, self.text, 0.0);
                    if !dates.is_empty() {
                        self.wrapped(dates, Font::Helvetica, DATE_SIZE, muted_on(self.text), 0.0);
                    }
                }
                self.y += 2.0;
                for b in body {
                    self.block(b);
                }
                self.y += ENTRY_GAP - BLOCK_GAP;
            }
        }
        self.y += BLOCK_GAP;
    }

    fn section(&mut self, section: &Section) {
        let top = self.y;
        if section.style == SectionStyle::Card {
            self.y += CARD_PAD;
        }

        self.wrapped(&section.title, Font::HelveticaBold, TITLE_SIZE, self.title, 0.0);
        match section.style {
            SectionStyle::Ruled => {
                let y = self.y + 1.0;
                self.canvas.content.push(Item::Line {
                    x1: self.x,
                    y1: y,
                    x2: self.x + self.width,
                    y2: y,
                    width: 1.2,
                    color: self.title,
                });
                self.y += 8.0;
            }
            SectionStyle::Card | SectionStyle::Bare => self.y += 4.0,
        }

        for block in &section.blocks {
            self.block(block);
        }

        if section.style == SectionStyle::Card {
            self.y += CARD_PAD - BLOCK_GAP;
            self.canvas.cards.push(Item::Rect {
                x: self.x - CARD_PAD,
                y: top,
                w: self.width + 2.0 * CARD_PAD,
                h: self.y - top,
                color: self.palette.soft,
            });
        }
        self.y += SECTION_GAP;
    }

    fn sections(&mut self, sections: &[Section]) {
        for s in sections {
            self.section(s);
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Header
// ────────────────────────────────────────────────────────────────────────────

fn photo_items(canvas: &mut Canvas, slot: &PhotoSlot, x: f32, y: f32, palette: &Palette) {
    let circle = slot.shape == PhotoShape::Circle;
    if slot.filled {
        canvas.content.push(Item::Photo {
            x,
            y,
            size: slot.size,
            circle,
        });
        return;
    }

    let placeholder = Color::rgb(226, 230, 236);
    if circle {
        canvas.content.push(Item::Circle {
            cx: x + slot.size / 2.0,
            cy: y + slot.size / 2.0,
            r: slot.size / 2.0,
            color: placeholder,
        });
    } else {
        canvas.content.push(Item::Rect {
            x,
            y,
            w: slot.size,
            h: slot.size,
            color: placeholder,
        });
    }
    let label_w = Font::Helvetica.metrics().measure("Photo", BODY_SIZE);
    canvas.text(
        x + (slot.size - label_w) / 2.0,
        y + slot.size / 2.0 + BODY_SIZE * 0.35,
        BODY_SIZE,
        Font::Helvetica,
        palette.primary_dark,
        "Photo",
    );
}

/// Draws name, contacts and visa tag from `top` inside `[x, x + width]`.
/// Returns the y below the last line.
fn header_text(
    canvas: &mut Canvas,
    header: &Header,
    palette: &Palette,
    x: f32,
    width: f32,
    top: f32,
) -> f32 {
    let on_band = header.style != HeaderStyle::Plain;
    let name_color = if on_band { Color::WHITE } else { palette.primary_dark };
    let text_color = if on_band { Color::WHITE } else { Color::INK };
    let mut y = top;

    for line in Font::HelveticaBold.metrics().wrap(&header.name, NAME_SIZE, width) {
        canvas.text(x, baseline(y, NAME_SIZE), NAME_SIZE, Font::HelveticaBold, name_color, &line);
        y += NAME_SIZE * 1.2;
    }
    y += 6.0;

    let regular = Font::Helvetica.metrics();
    let mut cursor = x;
    for (i, contact) in header.contacts.iter().enumerate() {
        let text_w = regular.measure(&contact.text, CONTACT_SIZE);
        let item_w = 2.0 * ICON_RADIUS + 6.0 + text_w;
        let new_line = !header.contacts_inline || (i > 0 && cursor + item_w > x + width);
        if i > 0 && new_line {
            y += CONTACT_SIZE * LINE;
            cursor = x;
        }
        canvas.content.push(Item::Circle {
            cx: cursor + ICON_RADIUS,
            cy: y + CONTACT_SIZE * 0.7,
            r: ICON_RADIUS,
            color: palette.contrast,
        });
        // Overlong contacts on a narrow header still wrap.
        let text_x = cursor + 2.0 * ICON_RADIUS + 6.0;
        let lines = regular.wrap(&contact.text, CONTACT_SIZE, x + width - text_x);
        let count = lines.len();
        for (j, line) in lines.into_iter().enumerate() {
            canvas.text(text_x, baseline(y, CONTACT_SIZE), CONTACT_SIZE, Font::Helvetica, text_color, &line);
            if j + 1 < count {
                y += CONTACT_SIZE * LINE;
            }
        }
        cursor = text_x + text_w + 18.0;
    }
    if !header.contacts.is_empty() {
        y += CONTACT_SIZE * LINE;
    }

    if let Some(tag) = &header.visa_tag {
        y += 6.0;
        let tag_w = Font::HelveticaBold.metrics().measure(tag, TAG_SIZE) + 16.0;
        let tag_h = TAG_SIZE + 10.0;
        canvas.content.push(Item::Rect {
            x,
            y,
            w: tag_w,
            h: tag_h,
            color: palette.soft,
        });
        canvas.text(x + 8.0, y + 5.0 + TAG_SIZE * 0.85, TAG_SIZE, Font::HelveticaBold, palette.primary, tag);
        y += tag_h;
    }
    y
}

// ────────────────────────────────────────────────────────────────────────────
// Page
// ────────────────────────────────────────────────────────────────────────────

fn left_inset(decorations: &[Decoration]) -> f32 {
    decorations
        .iter()
        .filter_map(|d| match d {
            Decoration::Stripe { x, width, .. } => Some(x + width),
            _ => None,
        })
        .fold(0.0, f32::max)
}

fn star_items(x: f32, y: f32, width: f32, height: f32, color: Color) -> Vec<Item> {
    let cols = (width / STAR_SPACING).floor().max(1.0) as usize;
    let rows = (height / STAR_SPACING).floor().max(1.0) as usize;
    let mut items = Vec::with_capacity(cols * rows);
    for row in 0..rows {
        for col in 0..cols {
            // Every other row shifts half a cell.
            let shift = if row % 2 == 1 { STAR_SPACING / 4.0 } else { -STAR_SPACING / 4.0 };
            items.push(Item::Star {
                cx: x + STAR_SPACING * (col as f32 + 0.5) + shift,
                cy: y + STAR_SPACING * (row as f32 + 0.5),
                r: 3.2,
                color,
            });
        }
    }
    items
}

/// Lays out `doc` on one page.
pub fn layout_document(doc: &Document) -> PageLayout {
    let mut canvas = Canvas::default();
    let palette = doc.palette;
    let inset = left_inset(&doc.decorations);
    let side_x = if inset > 0.0 { inset + 16.0 } else { PAD };
    let side_w = doc.sidebar.width - side_x - PAD / 2.0;
    let main_x = doc.sidebar.width + PAD / 2.0;
    let main_w = doc.main.width - PAD * 1.5;

    let (body_top, header_band, mut side_y, mut main_y) = match doc.header.placement {
        HeaderPlacement::FullWidth => {
            let mut text_x = inset.max(0.0) + PAD;
            let mut text_right = PAGE_WIDTH - PAD;
            let photo_y = PAD;
            match doc.photo.position {
                PhotoPosition::HeaderLeft => {
                    photo_items(&mut canvas, &doc.photo, text_x, photo_y, &palette);
                    text_x += doc.photo.size + 22.0;
                }
                PhotoPosition::HeaderRight => {
                    let px = PAGE_WIDTH - PAD - doc.photo.size;
                    photo_items(&mut canvas, &doc.photo, px, photo_y, &palette);
                    text_right = px - 22.0;
                }
                PhotoPosition::Sidebar => {}
            }

            let text_h = header_text(
                &mut canvas,
                &doc.header,
                &palette,
                text_x,
                text_right - text_x,
                PAD + 8.0,
            );
            let photo_bottom = if doc.photo.position == PhotoPosition::Sidebar {
                0.0
            } else {
                photo_y + doc.photo.size
            };
            let bottom = text_h.max(photo_bottom) + PAD;

            let mut side_start = bottom + PAD;
            if doc.photo.position == PhotoPosition::Sidebar {
                photo_items(&mut canvas, &doc.photo, side_x, side_start, &palette);
                side_start += doc.photo.size + 24.0;
            }
            (bottom, Some(bottom), side_start, bottom + PAD)
        }
        HeaderPlacement::MainColumn => {
            let mut side_start = PAD;
            if doc.photo.position == PhotoPosition::Sidebar {
                let px = (doc.sidebar.width - doc.photo.size) / 2.0;
                photo_items(&mut canvas, &doc.photo, px, PAD, &palette);
                side_start += doc.photo.size + 24.0;
            }
            let header_bottom = header_text(&mut canvas, &doc.header, &palette, main_x, main_w, PAD + 8.0);
            (0.0, None, side_start, header_bottom + SECTION_GAP)
        }
    };

    {
        let mut side = Flow::new(&mut canvas, side_x, side_w, side_y, &doc.sidebar, palette);
        side.sections(&doc.sidebar.sections);
        side_y = side.y;
    }
    {
        let mut main = Flow::new(&mut canvas, main_x, main_w, main_y, &doc.main, palette);
        main.sections(&doc.main.sections);
        main_y = main.y;
    }

    let height = MIN_PAGE_HEIGHT.max(side_y.max(main_y) + PAD).ceil();

    if let Some(fill) = doc.sidebar.fill {
        canvas.base.push(Item::Rect {
            x: 0.0,
            y: body_top,
            w: doc.sidebar.width,
            h: height - body_top,
            color: fill,
        });
    }
    if let Some(fill) = doc.main.fill {
        canvas.base.push(Item::Rect {
            x: doc.sidebar.width,
            y: body_top,
            w: doc.main.width,
            h: height - body_top,
            color: fill,
        });
    }
    if let Some(band) = header_band {
        match doc.header.style {
            HeaderStyle::Solid => canvas.base.push(Item::Rect {
                x: 0.0,
                y: 0.0,
                w: PAGE_WIDTH,
                h: band,
                color: palette.primary,
            }),
            HeaderStyle::Banner => {
                canvas.base.push(Item::Rect {
                    x: 0.0,
                    y: 0.0,
                    w: PAGE_WIDTH,
                    h: band,
                    color: palette.primary_dark,
                });
                canvas.base.push(Item::Rect {
                    x: PAGE_WIDTH * 0.62,
                    y: 0.0,
                    w: PAGE_WIDTH * 0.38,
                    h: band,
                    color: palette.primary,
                });
                canvas.base.push(Item::Rect {
                    x: 0.0,
                    y: band - 6.0,
                    w: PAGE_WIDTH,
                    h: 6.0,
                    color: palette.contrast,
                });
            }
            HeaderStyle::Plain => {}
        }
    }
    for deco in &doc.decorations {
        match deco {
            Decoration::Stripe { x, width, color } => canvas.base.push(Item::Rect {
                x: *x,
                y: 0.0,
                w: *width,
                h: height,
                color: *color,
            }),
            Decoration::StarField {
                x,
                y,
                width,
                height: field_h,
                color,
            } => canvas.base.extend(star_items(*x, *y, *width, *field_h, *color)),
        }
    }

    let mut items = canvas.base;
    items.extend(canvas.cards);
    items.extend(canvas.content);

    PageLayout {
        width: PAGE_WIDTH,
        height,
        items,
    }
}
