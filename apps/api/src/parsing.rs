//! Free-text helpers shared by every template renderer.
//!
//! Work-experience descriptions are typed as free text. Depending on template
//! and visa type they are drawn as flat bullets (`parse_bullets`), titled
//! bullet groups (`parse_bullet_blocks`) or a plain paragraph. Every caller
//! goes through these two functions so the tie-breaks stay identical.

use serde::{Deserialize, Serialize};

/// Characters accepted as a leading bullet marker.
const BULLET_MARKERS: [char; 3] = ['•', '-', '*'];

const INLINE_BULLET: char = '•';

/// A titled group of bullets. `title` is empty for content that precedes the
/// first heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulletBlock {
    pub title: String,
    pub bullets: Vec<String>,
}

/// Trimmed copy of a possibly blank field.
pub fn safe_text(value: &str) -> &str {
    value.trim()
}

fn starts_with_marker(line: &str) -> bool {
    line.starts_with(BULLET_MARKERS)
}

/// Strips one leading marker plus any whitespace after it, then trims.
fn strip_marker(line: &str) -> &str {
    match line.strip_prefix(BULLET_MARKERS) {
        Some(rest) => rest.trim(),
        None => line.trim(),
    }
}

/// Trimmed, non-empty lines of `text`.
fn non_empty_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect()
}

/// Turns a free-text block into a flat list of bullet strings.
///
/// One bullet per line, leading marker stripped, empty lines dropped. When
/// at most one line survives and the raw text contains `•`, the bullets were
/// typed inline on one line ("Did X • Did Y"), so the raw text is split on
/// `•` instead.
pub fn parse_bullets(text: &str) -> Vec<String> {
    let raw = safe_text(text);
    if raw.is_empty() {
        return Vec::new();
    }

    let lines: Vec<String> = non_empty_lines(raw)
        .into_iter()
        .map(strip_marker)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect();

    if lines.len() <= 1 && raw.contains(INLINE_BULLET) {
        return raw
            .split(INLINE_BULLET)
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect();
    }

    lines
}

/// A heading ends with `:` (trailing whitespace allowed) and is not itself a
/// bullet line.
fn heading_title(line: &str) -> Option<&str> {
    if starts_with_marker(line) {
        return None;
    }
    line.trim_end()
        .strip_suffix(':')
        .map(str::trim)
}

/// Groups a free-text block into titled bullet blocks using colon-terminated
/// heading lines as delimiters.
///
/// Blocks with neither a title nor bullets are never emitted. A heading with
/// no bullets under it is still emitted (it has a title).
pub fn parse_bullet_blocks(text: &str) -> Vec<BulletBlock> {
    let mut blocks = Vec::new();
    let mut current = BulletBlock {
        title: String::new(),
        bullets: Vec::new(),
    };

    fn flush(current: &mut BulletBlock, blocks: &mut Vec<BulletBlock>) {
        let done = std::mem::replace(
            current,
            BulletBlock {
                title: String::new(),
                bullets: Vec::new(),
            },
        );
        if !done.title.is_empty() || !done.bullets.is_empty() {
            blocks.push(done);
        }
    }

    for line in non_empty_lines(text) {
        if let Some(title) = heading_title(line) {
            flush(&mut current, &mut blocks);
            current.title = title.to_string();
            continue;
        }

        let bullet = strip_marker(line);
        if !bullet.is_empty() {
            current.bullets.push(bullet.to_string());
        }
    }
    flush(&mut current, &mut blocks);

    blocks
}

/// "start — end", with "Present" for a current job. A lone side renders
/// alone; both empty renders nothing.
pub fn format_date_range(start: &str, end: &str, is_current: bool) -> String {
    let s = safe_text(start);
    let e = if is_current { "Present" } else { safe_text(end) };
    match (s.is_empty(), e.is_empty()) {
        (true, true) => String::new(),
        (false, true) => s.to_string(),
        (true, false) => e.to_string(),
        (false, false) => format!("{s} — {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_bullets_empty_input() {
        assert!(parse_bullets("").is_empty());
        assert!(parse_bullets("   \n  \n").is_empty());
    }

    #[test]
    fn test_parse_bullets_strips_markers() {
        let text = "• Harvested apples\n- Loaded trucks\n* Cleaned barns\nPlain line";
        assert_eq!(
            parse_bullets(text),
            strings(&["Harvested apples", "Loaded trucks", "Cleaned barns", "Plain line"])
        );
    }

    #[test]
    fn test_parse_bullets_strips_only_one_marker() {
        assert_eq!(parse_bullets("- - nested"), strings(&["- nested"]));
    }

    #[test]
    fn test_parse_bullets_drops_marker_only_lines() {
        assert_eq!(parse_bullets("-\n* \nReal"), strings(&["Real"]));
    }

    #[test]
    fn test_parse_bullets_inline_bullets_on_one_line() {
        assert_eq!(
            parse_bullets("Did X • Did Y • Did Z"),
            strings(&["Did X", "Did Y", "Did Z"])
        );
    }

    #[test]
    fn test_parse_bullets_inline_split_uses_raw_text() {
        // Leading marker survives on the first fragment when re-splitting raw text.
        assert_eq!(parse_bullets("-a • b"), strings(&["-a", "b"]));
    }

    #[test]
    fn test_parse_bullets_multi_line_keeps_inner_bullet_char() {
        assert_eq!(
            parse_bullets("Fed cattle • goats\nFixed fences"),
            strings(&["Fed cattle • goats", "Fixed fences"])
        );
    }

    #[test]
    fn test_parse_bullets_never_yields_empty_strings() {
        let inputs = [
            "",
            "•",
            "• • •",
            "-\n*\n•",
            "a\n\n\nb",
            "  • x •  • y ",
            "*",
            "\n\n- \n",
        ];
        for input in inputs {
            let out = parse_bullets(input);
            assert!(
                out.iter().all(|b| !b.is_empty()),
                "empty bullet for input {input:?}: {out:?}"
            );
        }
    }

    #[test]
    fn test_parse_bullets_is_idempotent_on_own_output() {
        let inputs = [
            "• Harvested apples\n- Loaded trucks",
            "Did X • Did Y • Did Z",
            "single line",
            "a • b\nc",
            "-a • b",
            "* one\n\n* two\n  * three  ",
        ];
        for input in inputs {
            let first = parse_bullets(input);
            let again = parse_bullets(&format!("• {}", first.join("\n")));
            assert_eq!(first, again, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_parse_bullet_blocks_headings() {
        let blocks = parse_bullet_blocks("Duties:\n- a\n- b\nOther:\n- c");
        assert_eq!(
            blocks,
            vec![
                BulletBlock {
                    title: "Duties".to_string(),
                    bullets: strings(&["a", "b"]),
                },
                BulletBlock {
                    title: "Other".to_string(),
                    bullets: strings(&["c"]),
                },
            ]
        );
    }

    #[test]
    fn test_parse_bullet_blocks_leading_untitled_block() {
        let blocks = parse_bullet_blocks("• first\nSafety:\n• second");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].title, "");
        assert_eq!(blocks[0].bullets, strings(&["first"]));
        assert_eq!(blocks[1].title, "Safety");
    }

    #[test]
    fn test_parse_bullet_blocks_bullet_ending_in_colon_is_not_heading() {
        let blocks = parse_bullet_blocks("- Tools used:\n- shovel");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].title, "");
        assert_eq!(blocks[0].bullets, strings(&["Tools used:", "shovel"]));
    }

    #[test]
    fn test_parse_bullet_blocks_heading_with_trailing_space_and_no_bullets() {
        let blocks = parse_bullet_blocks("Equipment:   \nNotes:\n- kept logs");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].title, "Equipment");
        assert!(blocks[0].bullets.is_empty());
        assert_eq!(blocks[1].bullets, strings(&["kept logs"]));
    }

    #[test]
    fn test_parse_bullet_blocks_empty_input() {
        assert!(parse_bullet_blocks("").is_empty());
        assert!(parse_bullet_blocks("\n  \n•\n").is_empty());
    }

    #[test]
    fn test_format_date_range_variants() {
        assert_eq!(format_date_range("01/2023", "10/2024", false), "01/2023 — 10/2024");
        assert_eq!(format_date_range("01/2023", "10/2024", true), "01/2023 — Present");
        assert_eq!(format_date_range("01/2023", "", false), "01/2023");
        assert_eq!(format_date_range("", "10/2024", false), "10/2024");
        assert_eq!(format_date_range(" ", "  ", false), "");
        assert_eq!(format_date_range("", "", true), "Present");
    }
}
