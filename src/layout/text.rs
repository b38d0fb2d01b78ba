//! Text measurement and line wrapping with the standard Helvetica metrics.

use crate::model::Font;
use unicode_normalization::UnicodeNormalization;

/// Line height as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f32 = 1.35;

/// Advance widths (1/1000 em) of Helvetica for ASCII 32..=126.
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0..9
    278, 278, 584, 584, 584, 556, 1015, // :..@
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A..M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N..Z
    278, 278, 278, 469, 556, 333, // [..`
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a..m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n..z
    334, 260, 334, 584, // {..~
];

/// Advance widths (1/1000 em) of Helvetica-Bold for ASCII 32..=126.
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0..9
    333, 333, 584, 584, 584, 611, 975, // :..@
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // A..M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N..Z
    333, 278, 333, 584, 556, 333, // [..`
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // a..m
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // n..z
    389, 280, 389, 584, // {..~
];

const DEFAULT_WIDTH: u16 = 556;

fn ascii_width(font: Font, c: char) -> Option<u16> {
    let code = c as u32;
    if !(32..=126).contains(&code) {
        return None;
    }
    let table = match font {
        Font::Regular => &HELVETICA,
        Font::Bold => &HELVETICA_BOLD,
    };
    Some(table[(code - 32) as usize])
}

/// Advance width of a single character in 1/1000 em.
pub fn char_width(font: Font, c: char) -> u16 {
    if let Some(w) = ascii_width(font, c) {
        return w;
    }
    let bold = font == Font::Bold;
    match c {
        '\u{00A0}' => 278,
        '\u{2022}' => 350,
        '\u{2013}' => 556,
        '\u{2014}' | '\u{2026}' | '\u{2030}' => 1000,
        '\u{2018}' | '\u{2019}' | '\u{201A}' => {
            if bold {
                278
            } else {
                222
            }
        }
        '\u{201C}' | '\u{201D}' | '\u{201E}' => {
            if bold {
                500
            } else {
                333
            }
        }
        '\u{00B0}' => 400,
        '\u{00AA}' => 370,
        '\u{00BA}' => 365,
        '\u{00B7}' => 278,
        '\u{20AC}' => 556,
        '\u{00C6}' => 1000,
        '\u{00E6}' => 889,
        '\u{00DF}' => 611,
        _ => {
            // Accented letters measure as their base letter.
            c.nfd()
                .next()
                .and_then(|base| ascii_width(font, base))
                .unwrap_or(DEFAULT_WIDTH)
        }
    }
}

/// Width of `text` in points.
pub fn text_width(text: &str, font: Font, size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| char_width(font, c) as u32).sum();
    units as f32 * size / 1000.0
}

/// Height of one line of text at `size`.
pub fn line_height(size: f32) -> f32 {
    size * LINE_HEIGHT_FACTOR
}

/// Greedy word wrap to `max_width` points.
///
/// Whitespace runs collapse to a single space. Words wider than the line are
/// broken between characters. Empty input yields no lines.
pub fn wrap_text(text: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
    let space = text_width(" ", font, size);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0;

    for word in text.split_whitespace() {
        let word_width = text_width(word, font, size);

        if word_width > max_width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0.0;
            }
            let mut parts = split_long_word(word, font, size, max_width);
            if let Some(last) = parts.pop() {
                lines.extend(parts);
                current_width = text_width(&last, font, size);
                current = last;
            }
            continue;
        }

        if current.is_empty() {
            current.push_str(word);
            current_width = word_width;
        } else if current_width + space + word_width <= max_width {
            current.push(' ');
            current.push_str(word);
            current_width += space + word_width;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
            current_width = word_width;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn split_long_word(word: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0;
    for c in word.chars() {
        let w = char_width(font, c) as f32 * size / 1000.0;
        if !current.is_empty() && current_width + w > max_width {
            parts.push(std::mem::take(&mut current));
            current_width = 0.0;
        }
        current.push(c);
        current_width += w;
    }
    if !current.is_empty() {
        parts.push(current);
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_widths() {
        assert_eq!(char_width(Font::Regular, 'A'), 667);
        assert_eq!(char_width(Font::Bold, 'A'), 722);
        assert_eq!(char_width(Font::Regular, 'i'), 222);
        assert_eq!(char_width(Font::Regular, '~'), 584);
        assert_eq!(char_width(Font::Bold, '~'), 584);
    }

    #[test]
    fn test_accented_letters_use_base_width() {
        assert_eq!(char_width(Font::Regular, 'é'), char_width(Font::Regular, 'e'));
        assert_eq!(char_width(Font::Bold, 'Ç'), char_width(Font::Bold, 'C'));
        assert_eq!(char_width(Font::Regular, '•'), 350);
    }

    #[test]
    fn test_text_width_scales_with_size() {
        let w10 = text_width("Acme", Font::Regular, 10.0);
        let w20 = text_width("Acme", Font::Regular, 20.0);
        assert!((w20 - 2.0 * w10).abs() < 0.001);
        assert_eq!(text_width("", Font::Bold, 12.0), 0.0);
    }

    #[test]
    fn test_wrap_respects_width() {
        let text = "Planejamento estratégico com metas claras e medidas de direção semanais";
        let lines = wrap_text(text, Font::Regular, 10.0, 120.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, Font::Regular, 10.0) <= 120.0 + 0.01, "{line}");
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn test_wrap_breaks_long_words() {
        let word = "a".repeat(200);
        let lines = wrap_text(&word, Font::Regular, 10.0, 100.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
    }

    #[test]
    fn test_wrap_empty() {
        assert!(wrap_text("   ", Font::Regular, 10.0, 100.0).is_empty());
        assert_eq!(wrap_text("  Acme  ", Font::Regular, 10.0, 100.0), vec!["Acme"]);
    }
}
