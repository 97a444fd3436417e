//! Pattern compilation

use ahash::AHashMap;
use tracing::warn;

use crate::error::{FuseError, Result};

/// Longest pattern the engine can hold in one bitmask word
pub const MAX_PATTERN_LEN: usize = u64::BITS as usize;

/// A query compiled for the Bitap engine. Immutable once built and safe to
/// share across threads.
#[derive(Debug, Clone)]
pub struct Pattern {
    text: String,
    chars: Vec<char>,
    mask: u64,
    alphabet: AHashMap<char, u64>,
}

impl Pattern {
    /// Compile `text`, returning `None` for an empty pattern or one longer than
    /// [`MAX_PATTERN_LEN`].
    pub fn compile(text: &str, is_case_sensitive: bool) -> Option<Self> {
        match Self::try_compile(text, is_case_sensitive) {
            Ok(pattern) => pattern,
            Err(err) => {
                warn!(error = %err, "Rejecting search pattern");
                None
            }
        }
    }

    /// Like [`Pattern::compile`], but reports an over-long pattern as an error.
    pub fn try_compile(text: &str, is_case_sensitive: bool) -> Result<Option<Self>> {
        let chars = if is_case_sensitive {
            text.chars().collect::<Vec<_>>()
        } else {
            fold_case(text)
        };

        let len = chars.len();
        if len == 0 {
            return Ok(None);
        }
        if len > MAX_PATTERN_LEN {
            return Err(FuseError::PatternTooLong {
                len,
                max: MAX_PATTERN_LEN,
            });
        }

        // Position i owns bit (len - 1 - i): the top bit marks a completed match.
        let mut alphabet: AHashMap<char, u64> = AHashMap::with_capacity(len);
        for (i, &c) in chars.iter().enumerate() {
            *alphabet.entry(c).or_insert(0) |= 1u64 << (len - i - 1);
        }

        Ok(Some(Self {
            text: chars.iter().collect(),
            chars,
            mask: 1u64 << (len - 1),
            alphabet,
        }))
    }

    /// Normalized pattern text (case-folded unless case sensitive)
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Length in code points
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Bit set in the engine state when the whole pattern has matched
    pub fn mask(&self) -> u64 {
        self.mask
    }

    /// Position bitmask for `c`; 0 when `c` does not occur in the pattern
    #[inline]
    pub fn char_mask(&self, c: char) -> u64 {
        self.alphabet.get(&c).copied().unwrap_or(0)
    }
}

/// Lowercase each code point whose lowercase form is a single code point.
///
/// Indices into the folded sequence stay aligned with the input.
pub(crate) fn fold_case(text: &str) -> Vec<char> {
    text.chars().map(fold_char).collect()
}

#[inline]
pub(crate) fn fold_char(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_pattern() {
        assert!(Pattern::compile("", false).is_none());
        assert!(Pattern::compile("", true).is_none());
    }

    #[test]
    fn test_mask_and_len() {
        let pattern = Pattern::compile("code", false).unwrap();
        assert_eq!(pattern.len(), 4);
        assert_eq!(pattern.mask(), 0b1000);
    }

    #[test]
    fn test_alphabet_positions() {
        let pattern = Pattern::compile("abca", true).unwrap();
        assert_eq!(pattern.char_mask('a'), 0b1001);
        assert_eq!(pattern.char_mask('b'), 0b0100);
        assert_eq!(pattern.char_mask('c'), 0b0010);
        assert_eq!(pattern.char_mask('z'), 0);
    }

    #[test]
    fn test_case_folding() {
        let pattern = Pattern::compile("DaVinci", false).unwrap();
        assert_eq!(pattern.text(), "davinci");

        let pattern = Pattern::compile("DaVinci", true).unwrap();
        assert_eq!(pattern.text(), "DaVinci");
        assert_eq!(pattern.char_mask('d'), 0);
    }

    #[test]
    fn test_unicode_len_in_code_points() {
        let pattern = Pattern::compile("поні", false).unwrap();
        assert_eq!(pattern.len(), 4);
    }

    #[test]
    fn test_max_length_accepted() {
        let text = "a".repeat(MAX_PATTERN_LEN);
        let pattern = Pattern::compile(&text, false).unwrap();
        assert_eq!(pattern.mask(), 1u64 << 63);
    }

    #[test]
    fn test_too_long_rejected() {
        let text = "a".repeat(MAX_PATTERN_LEN + 1);
        assert!(Pattern::compile(&text, false).is_none());
        assert_eq!(
            Pattern::try_compile(&text, false).unwrap_err(),
            FuseError::PatternTooLong {
                len: MAX_PATTERN_LEN + 1,
                max: MAX_PATTERN_LEN,
            }
        );
    }

    #[test]
    fn test_fold_keeps_alignment() {
        // 'İ' lowercases to two code points; it is kept as-is
        let folded = fold_case("İstanbul");
        assert_eq!(folded.len(), "İstanbul".chars().count());
        assert_eq!(folded[1], 's');
    }
}
