//! Text normalization before measurement and encoding.
//!
//! Caller-supplied strings may carry decomposed accents, control characters,
//! zero-width marks and stray line breaks. The standard PDF fonts only cover
//! WinAnsi, so every string drawn goes through [`TextNormalizer`] first and
//! through [`encode_win_ansi`] when written.

use crate::error::{Error, Result};
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Byte written for characters outside WinAnsi.
pub const REPLACEMENT: u8 = b'?';

/// Normalizes text for layout.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    invisible: Regex,
    whitespace: Regex,
    bullet_map: Vec<(char, char)>,
}

impl TextNormalizer {
    /// Create a normalizer.
    pub fn new() -> Result<Self> {
        Ok(Self {
            invisible: Regex::new(r"[\u{200B}-\u{200D}\u{2060}\u{FEFF}\u{00AD}]")
                .map_err(|e| Error::Render(e.to_string()))?,
            whitespace: Regex::new(r"\s+").map_err(|e| Error::Render(e.to_string()))?,
            bullet_map: vec![
                ('●', '•'),
                ('○', '•'),
                ('▪', '•'),
                ('■', '•'),
                ('◦', '•'),
                ('‣', '•'),
            ],
        })
    }

    /// NFC-compose, strip control and invisible characters, collapse
    /// whitespace runs and trim.
    pub fn normalize(&self, text: &str) -> String {
        let composed: String = text
            .nfc()
            .map(|c| {
                self.bullet_map
                    .iter()
                    .find(|(from, _)| *from == c)
                    .map(|(_, to)| *to)
                    .unwrap_or(c)
            })
            .filter(|c| !c.is_control() || c.is_whitespace())
            .collect();
        let visible = self.invisible.replace_all(&composed, "");
        self.whitespace.replace_all(&visible, " ").trim().to_string()
    }

    /// Normalize and replace characters the standard fonts cannot draw.
    pub fn normalize_drawable(&self, text: &str) -> String {
        self.normalize(text)
            .chars()
            .map(|c| if win_ansi_byte(c).is_some() { c } else { '?' })
            .collect()
    }
}

/// WinAnsi (CP1252) code for a character, if it has one.
pub fn win_ansi_byte(c: char) -> Option<u8> {
    let code = c as u32;
    match code {
        0x20..=0x7E => Some(code as u8),
        0xA0..=0xFF => Some(code as u8),
        _ => match c {
            '€' => Some(0x80),
            '‚' => Some(0x82),
            'ƒ' => Some(0x83),
            '„' => Some(0x84),
            '…' => Some(0x85),
            '†' => Some(0x86),
            '‡' => Some(0x87),
            'ˆ' => Some(0x88),
            '‰' => Some(0x89),
            'Š' => Some(0x8A),
            '‹' => Some(0x8B),
            'Œ' => Some(0x8C),
            'Ž' => Some(0x8E),
            '‘' => Some(0x91),
            '’' => Some(0x92),
            '“' => Some(0x93),
            '”' => Some(0x94),
            '•' => Some(0x95),
            '–' => Some(0x96),
            '—' => Some(0x97),
            '˜' => Some(0x98),
            '™' => Some(0x99),
            'š' => Some(0x9A),
            '›' => Some(0x9B),
            'œ' => Some(0x9C),
            'ž' => Some(0x9E),
            'Ÿ' => Some(0x9F),
            _ => None,
        },
    }
}

/// Encode text as WinAnsi bytes; unrepresentable characters become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.nfc()
        .map(|c| win_ansi_byte(c).unwrap_or(REPLACEMENT))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nfc_composition() {
        let normalizer = TextNormalizer::new().unwrap();
        // "a" followed by a combining tilde
        let decomposed = "Miss\u{0061}\u{0303}o";
        assert_eq!(normalizer.normalize(decomposed), "Missão");
    }

    #[test]
    fn test_whitespace_and_controls() {
        let normalizer = TextNormalizer::new().unwrap();
        assert_eq!(
            normalizer.normalize("  Grow\t\trevenue\n\nfast\u{0007} "),
            "Grow revenue fast"
        );
        assert_eq!(normalizer.normalize("zero\u{200B}width"), "zerowidth");
    }

    #[test]
    fn test_bullets_standardized() {
        let normalizer = TextNormalizer::new().unwrap();
        assert_eq!(normalizer.normalize("● item"), "• item");
    }

    #[test]
    fn test_win_ansi_encoding() {
        assert_eq!(encode_win_ansi("Ação"), vec![b'A', 0xE7, 0xE3, b'o']);
        assert_eq!(encode_win_ansi("• – —"), vec![0x95, b' ', 0x96, b' ', 0x97]);
        assert_eq!(encode_win_ansi("€5"), vec![0x80, b'5']);
        assert_eq!(encode_win_ansi("漢"), vec![REPLACEMENT]);
    }

    #[test]
    fn test_normalize_drawable() {
        let normalizer = TextNormalizer::new().unwrap();
        assert_eq!(normalizer.normalize_drawable("Meta 漢字 ok"), "Meta ?? ok");
    }
}
