//! Accumulates the four hexadecimal digits of a `\u` escape.
//!
//! [`UnicodeEscapeBuffer`] folds digits into a UTF-16 code unit as they are
//! read. Pairing surrogates into a `char` is the lexer's job, because a high
//! surrogate is only valid when a second `\u` escape follows it.

use crate::error::SyntaxError;

#[derive(Debug, Default)]
pub(crate) struct UnicodeEscapeBuffer {
    acc: u32,
    len: u8,
}

impl UnicodeEscapeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn hex_val(c: char) -> Option<u32> {
        c.to_digit(16)
    }

    /// Feeds one hex digit.
    ///
    /// Returns `Ok(Some(unit))` after the fourth digit and resets itself,
    /// `Ok(None)` while digits are still missing.
    pub fn feed(&mut self, c: char) -> Result<Option<u16>, SyntaxError> {
        let d = Self::hex_val(c).ok_or(SyntaxError::InvalidUnicodeEscapeChar(c))?;

        self.acc = (self.acc << 4) | d;
        self.len += 1;

        if self.len < 4 {
            return Ok(None);
        }

        let unit = self.acc;
        self.acc = 0;
        self.len = 0;
        #[allow(clippy::cast_possible_truncation)]
        Ok(Some(unit as u16))
    }
}

/// Combines a surrogate pair into a scalar value.
pub(crate) fn combine_surrogates(high: u16, low: u16) -> Result<char, SyntaxError> {
    if !(0xDC00..=0xDFFF).contains(&low) {
        return Err(SyntaxError::InvalidUnicodeEscapeSequence(u32::from(low)));
    }
    let code = 0x10000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
    char::from_u32(code).ok_or(SyntaxError::InvalidUnicodeEscapeSequence(code))
}

pub(crate) fn is_high_surrogate(unit: u16) -> bool {
    (0xD800..=0xDBFF).contains(&unit)
}
