//! Sliding-window q-gram tokenization.

use crate::error::{Error, Result};

/// Boundary marker wrapped around padded tokens.
pub const PADDING_CHAR: char = '_';

/// Split `text` into all contiguous substrings of `q` characters.
///
/// With `padding`, the text is wrapped with one [`PADDING_CHAR`] on each
/// side first, so word boundaries contribute their own grams:
/// `qgrams("Tom", 2, true)` is `["_T", "To", "om", "m_"]`.
///
/// `q < 1` is an invalid argument; `q` longer than the (padded) text
/// yields an empty list, which is not an error.
pub fn qgrams(text: &str, q: usize, padding: bool) -> Result<Vec<String>> {
    if q < 1 {
        return Err(Error::InvalidQGramSize(q));
    }

    let chars: Vec<char> = if padding {
        std::iter::once(PADDING_CHAR)
            .chain(text.chars())
            .chain(std::iter::once(PADDING_CHAR))
            .collect()
    } else {
        text.chars().collect()
    };

    if q > chars.len() {
        return Ok(Vec::new());
    }

    Ok(chars.windows(q).map(|w| w.iter().collect()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded() {
        assert_eq!(qgrams("Tom", 2, true).unwrap(), vec!["_T", "To", "om", "m_"]);
    }

    #[test]
    fn test_unpadded() {
        assert_eq!(qgrams("Tom", 2, false).unwrap(), vec!["To", "om"]);
    }

    #[test]
    fn test_too_long_q_is_empty() {
        assert!(qgrams("x", 5, false).unwrap().is_empty());
        // Padding widens the window: "x" padded is 3 chars.
        assert_eq!(qgrams("x", 3, true).unwrap(), vec!["_x_"]);
    }

    #[test]
    fn test_zero_q_rejected() {
        assert!(matches!(qgrams("Tom", 0, false), Err(Error::InvalidQGramSize(0))));
    }

    #[test]
    fn test_unicode_chars_not_bytes() {
        assert_eq!(qgrams("éva", 2, false).unwrap(), vec!["év", "va"]);
    }
}
