//! Writes a [`PageLayout`] into a single-page PDF with `pdf-writer`.
//!
//! The MediaBox equals the laid-out size, one unit per CSS pixel. Text uses
//! the standard Helvetica fonts in WinAnsi encoding so no font is embedded;
//! the photo, when present, is the only embedded resource (one JPEG).

use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect, Ref, Str};

use crate::templates::document::Color;

use super::layout::{Item, PageLayout};
use super::metrics::Font;
use super::photo::JpegImage;

const CATALOG_ID: Ref = Ref::new(1);
const PAGE_TREE_ID: Ref = Ref::new(2);
const PAGE_ID: Ref = Ref::new(3);
const FONT_REGULAR_ID: Ref = Ref::new(4);
const FONT_BOLD_ID: Ref = Ref::new(5);
const CONTENT_ID: Ref = Ref::new(6);
const PHOTO_ID: Ref = Ref::new(7);

const PHOTO_NAME: Name<'static> = Name(b"Im1");

/// Bezier control distance for a quarter circle.
const KAPPA: f32 = 0.552_284_8;

/// Maps text to WinAnsiEncoding bytes. Characters outside the code page
/// become `?`.
pub fn encode_winansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '€' => 0x80,
            '‚' => 0x82,
            '„' => 0x84,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '\u{a0}'..='\u{ff}' => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}

/// Converts a top-down y into PDF user space.
struct Page {
    height: f32,
}

impl Page {
    fn y(&self, top_down: f32) -> f32 {
        self.height - top_down
    }
}

fn fill(content: &mut Content, color: Color) {
    let [r, g, b] = color.to_unit();
    content.set_fill_rgb(r, g, b);
}

fn circle_path(content: &mut Content, cx: f32, cy: f32, r: f32) {
    let k = r * KAPPA;
    content.move_to(cx + r, cy);
    content.cubic_to(cx + r, cy + k, cx + k, cy + r, cx, cy + r);
    content.cubic_to(cx - k, cy + r, cx - r, cy + k, cx - r, cy);
    content.cubic_to(cx - r, cy - k, cx - k, cy - r, cx, cy - r);
    content.cubic_to(cx + k, cy - r, cx + r, cy - k, cx + r, cy);
    content.close_path();
}

fn star_path(content: &mut Content, cx: f32, cy: f32, r: f32) {
    let inner = r * 0.4;
    for i in 0..10 {
        let radius = if i % 2 == 0 { r } else { inner };
        let angle = std::f32::consts::FRAC_PI_2 + i as f32 * std::f32::consts::PI / 5.0;
        let (x, y) = (cx + radius * angle.cos(), cy + radius * angle.sin());
        if i == 0 {
            content.move_to(x, y);
        } else {
            content.line_to(x, y);
        }
    }
    content.close_path();
}

fn draw_photo(content: &mut Content, page: &Page, x: f32, y: f32, size: f32, circle: bool) {
    let bottom = page.y(y + size);
    content.save_state();
    if circle {
        circle_path(content, x + size / 2.0, bottom + size / 2.0, size / 2.0);
    } else {
        content.rect(x, bottom, size, size);
    }
    content.clip_nonzero();
    content.end_path();
    content.transform([size, 0.0, 0.0, size, x, bottom]);
    content.x_object(PHOTO_NAME);
    content.restore_state();
}

fn draw_missing_photo(content: &mut Content, page: &Page, x: f32, y: f32, size: f32, circle: bool) {
    fill(content, Color::rgb(226, 230, 236));
    let bottom = page.y(y + size);
    if circle {
        circle_path(content, x + size / 2.0, bottom + size / 2.0, size / 2.0);
    } else {
        content.rect(x, bottom, size, size);
    }
    content.fill_nonzero();
}

fn draw_items(layout: &PageLayout, photo: Option<&JpegImage>) -> Vec<u8> {
    let page = Page {
        height: layout.height,
    };
    let mut content = Content::new();

    // White page background.
    fill(&mut content, Color::WHITE);
    content.rect(0.0, 0.0, layout.width, layout.height);
    content.fill_nonzero();

    for item in &layout.items {
        match item {
            Item::Rect { x, y, w, h, color } => {
                fill(&mut content, *color);
                content.rect(*x, page.y(y + h), *w, *h);
                content.fill_nonzero();
            }
            Item::Line {
                x1,
                y1,
                x2,
                y2,
                width,
                color,
            } => {
                let [r, g, b] = color.to_unit();
                content.set_stroke_rgb(r, g, b);
                content.set_line_width(*width);
                content.move_to(*x1, page.y(*y1));
                content.line_to(*x2, page.y(*y2));
                content.stroke();
            }
            Item::Circle { cx, cy, r, color } => {
                fill(&mut content, *color);
                circle_path(&mut content, *cx, page.y(*cy), *r);
                content.fill_nonzero();
            }
            Item::Star { cx, cy, r, color } => {
                fill(&mut content, *color);
                star_path(&mut content, *cx, page.y(*cy), *r);
                content.fill_nonzero();
            }
            Item::Text {
                x,
                y,
                size,
                font,
                color,
                text,
            } => {
                fill(&mut content, *color);
                content.begin_text();
                content.set_font(Name(font.resource_name()), *size);
                content.next_line(*x, page.y(*y));
                content.show(Str(&encode_winansi(text)));
                content.end_text();
            }
            Item::Photo { x, y, size, circle } => match photo {
                Some(_) => draw_photo(&mut content, &page, *x, *y, *size, *circle),
                None => draw_missing_photo(&mut content, &page, *x, *y, *size, *circle),
            },
        }
    }

    content.finish()
}

/// Serialises `layout` (and the photo, if any) into PDF bytes.
pub fn write_pdf(layout: &PageLayout, photo: Option<&JpegImage>) -> Vec<u8> {
    let mut pdf = Pdf::new();

    pdf.catalog(CATALOG_ID).pages(PAGE_TREE_ID);
    pdf.pages(PAGE_TREE_ID).kids([PAGE_ID]).count(1);

    let mut page = pdf.page(PAGE_ID);
    page.media_box(Rect::new(0.0, 0.0, layout.width, layout.height));
    page.parent(PAGE_TREE_ID);
    page.contents(CONTENT_ID);
    let mut resources = page.resources();
    {
        let mut fonts = resources.fonts();
        fonts.pair(Name(Font::Helvetica.resource_name()), FONT_REGULAR_ID);
        fonts.pair(Name(Font::HelveticaBold.resource_name()), FONT_BOLD_ID);
        fonts.finish();
    }
    if photo.is_some() {
        resources.x_objects().pair(PHOTO_NAME, PHOTO_ID);
    }
    resources.finish();
    page.finish();

    for (id, font) in [
        (FONT_REGULAR_ID, Font::Helvetica),
        (FONT_BOLD_ID, Font::HelveticaBold),
    ] {
        pdf.type1_font(id)
            .base_font(Name(font.base_font()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    if let Some(jpeg) = photo {
        let mut image = pdf.image_xobject(PHOTO_ID, &jpeg.data);
        image.filter(Filter::DctDecode);
        image.width(jpeg.width as i32);
        image.height(jpeg.height as i32);
        image.color_space().device_rgb();
        image.bits_per_component(8);
        image.finish();
    }

    let stream = draw_items(layout, photo);
    pdf.stream(CONTENT_ID, &stream);

    pdf.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_layout(height: f32) -> PageLayout {
        PageLayout {
            width: 794.0,
            height,
            items: vec![
                Item::Rect {
                    x: 0.0,
                    y: 0.0,
                    w: 260.0,
                    h: height,
                    color: Color::rgb(31, 78, 140),
                },
                Item::Text {
                    x: 30.0,
                    y: 40.0,
                    size: 12.0,
                    font: Font::HelveticaBold,
                    color: Color::INK,
                    text: "Maria — H2-A".to_string(),
                },
                Item::Photo {
                    x: 40.0,
                    y: 40.0,
                    size: 100.0,
                    circle: true,
                },
            ],
        }
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_encode_winansi() {
        assert_eq!(encode_winansi("Abc"), b"Abc".to_vec());
        assert_eq!(encode_winansi("•—–"), vec![0x95, 0x97, 0x96]);
        assert_eq!(encode_winansi("ção"), vec![0xe7, 0xe3, b'o']);
        assert_eq!(encode_winansi("日"), vec![b'?']);
    }

    #[test]
    fn test_pdf_structure_without_photo() {
        let bytes = write_pdf(&sample_layout(1123.0), None);
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(contains(&bytes, b"/MediaBox [0 0 794 1123]"));
        assert!(contains(&bytes, b"/BaseFont /Helvetica-Bold"));
        assert!(contains(&bytes, b"/WinAnsiEncoding"));
        assert!(!contains(&bytes, b"/DCTDecode"));
    }

    #[test]
    fn test_pdf_embeds_one_jpeg() {
        let jpeg = JpegImage {
            data: vec![0xff, 0xd8, 0xff, 0xd9],
            width: 2,
            height: 2,
        };
        let bytes = write_pdf(&sample_layout(1500.0), Some(&jpeg));
        assert!(contains(&bytes, b"/MediaBox [0 0 794 1500]"));
        assert!(contains(&bytes, b"/DCTDecode"));
        assert!(contains(&bytes, b"/Im1"));
    }
}
