//! # Lexical Scanners
//!
//! Character-level scanning for identifiers, keywords, numbers, quoted
//! strings, and escape sequences. These are the terminal productions of the
//! grammar; they commit as soon as the first character matches.

use super::Parser;
use crate::error::ParseError;
use hcl_ast::validate::{is_identifier_continue, is_identifier_start};
use hcl_ast::{Identifier, NumberLiteral, StringLiteral};

impl<'a> Parser<'a> {
    // =========================================================================
    // IDENTIFIERS & KEYWORDS
    // =========================================================================

    /// Scan an identifier.
    ///
    /// ## Grammar
    ///
    /// ```text
    /// identifier = id_start id_continue*
    /// id_start   = letter | "_" | non-ascii
    /// id_continue = id_start | digit | "-"
    /// ```
    pub(crate) fn scan_identifier(&mut self) -> Result<Identifier, ParseError> {
        let start = self.cursor.position();
        match self.cursor.peek() {
            Some(c) if is_identifier_start(c) => {
                self.cursor.advance();
            }
            _ => return Err(self.fail("identifier")),
        }
        self.cursor.advance_while(is_identifier_continue);
        let text = &self.source[start.byte..self.cursor.position().byte];
        Ok(Identifier::new(text))
    }

    /// Whether the input starts with `keyword` on an identifier boundary.
    pub(crate) fn peek_keyword(&self, keyword: &str) -> bool {
        if !self.cursor.starts_with(keyword) {
            return false;
        }
        match self.cursor.rest()[keyword.len()..].chars().next() {
            Some(c) => !is_identifier_continue(c),
            None => true,
        }
    }

    /// Consume `keyword` if it is next on an identifier boundary.
    pub(crate) fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.peek_keyword(keyword) {
            self.cursor.eat(keyword);
            true
        } else {
            false
        }
    }

    // =========================================================================
    // NUMBERS
    // =========================================================================

    /// Scan a number literal: digits with optional fraction and exponent.
    ///
    /// The leading sign is never part of the literal; `-3` parses as a unary
    /// operator around `3`.
    pub(crate) fn scan_number(&mut self) -> Result<NumberLiteral, ParseError> {
        let start = self.cursor.position();
        if !self.cursor.peek().map_or(false, |c| c.is_ascii_digit()) {
            return Err(self.fail("number"));
        }
        self.cursor.advance_while(|c| c.is_ascii_digit());

        if self.cursor.peek() == Some('.')
            && self.cursor.peek_second().map_or(false, |c| c.is_ascii_digit())
        {
            self.cursor.advance();
            self.cursor.advance_while(|c| c.is_ascii_digit());
        }

        if matches!(self.cursor.peek(), Some('e' | 'E')) {
            self.cursor.advance();
            if matches!(self.cursor.peek(), Some('+' | '-')) {
                self.cursor.advance();
            }
            if !self.cursor.peek().map_or(false, |c| c.is_ascii_digit()) {
                return Err(self.fail("exponent digits"));
            }
            self.cursor.advance_while(|c| c.is_ascii_digit());
        }

        let text = &self.source[start.byte..self.cursor.position().byte];
        match text.parse::<f64>() {
            Ok(value) => Ok(NumberLiteral { value }),
            Err(_) => Err(self.fail_at(start, "number")),
        }
    }

    /// Scan an unsigned integer, for the legacy `.0` index form.
    pub(crate) fn scan_integer(&mut self) -> Result<NumberLiteral, ParseError> {
        let start = self.cursor.position();
        if !self.cursor.peek().map_or(false, |c| c.is_ascii_digit()) {
            return Err(self.fail("digits"));
        }
        self.cursor.advance_while(|c| c.is_ascii_digit());
        let text = &self.source[start.byte..self.cursor.position().byte];
        match text.parse::<f64>() {
            Ok(value) => Ok(NumberLiteral { value }),
            Err(_) => Err(self.fail_at(start, "digits")),
        }
    }

    // =========================================================================
    // STRINGS & ESCAPES
    // =========================================================================

    /// Scan a plain quoted string, as used for block labels.
    ///
    /// Backslash escapes are decoded; interpolation sequences are taken
    /// literally. A raw newline ends the line before the closing quote and is
    /// an error.
    pub(crate) fn scan_string_literal(&mut self) -> Result<StringLiteral, ParseError> {
        if !self.cursor.eat_char('"') {
            return Err(self.fail("string"));
        }
        let mut value = String::new();
        loop {
            match self.cursor.peek() {
                None | Some('\n') => return Err(self.fail("closing '\"'")),
                Some('"') => {
                    self.cursor.advance();
                    return Ok(StringLiteral::new(value));
                }
                Some('\\') => {
                    self.cursor.advance();
                    value.push(self.scan_escape()?);
                }
                Some(c) => {
                    value.push(c);
                    self.cursor.advance();
                }
            }
        }
    }

    /// Decode one escape sequence; the backslash is already consumed.
    ///
    /// Recognized: `\n \r \t \" \\ \uXXXX \UXXXXXXXX`. A `\u` high surrogate
    /// must be followed by a `\u` low surrogate and the pair decodes to one
    /// character.
    pub(crate) fn scan_escape(&mut self) -> Result<char, ParseError> {
        let position = self.cursor.position();
        let c = match self.cursor.advance() {
            Some(c) => c,
            None => return Err(self.fail("escape sequence")),
        };
        match c {
            'n' => Ok('\n'),
            'r' => Ok('\r'),
            't' => Ok('\t'),
            '"' => Ok('"'),
            '\\' => Ok('\\'),
            'u' => self.scan_unicode_escape(4),
            'U' => self.scan_unicode_escape(8),
            _ => Err(self.fail_at(position, "valid escape sequence")),
        }
    }

    fn scan_unicode_escape(&mut self, digits: usize) -> Result<char, ParseError> {
        let position = self.cursor.position();
        let value = self.scan_hex_digits(digits)?;

        // High surrogates pair with a following \u low surrogate.
        let value = if digits == 4 && (0xD800..=0xDBFF).contains(&value) {
            if !self.cursor.eat("\\u") {
                return Err(self.fail("low surrogate escape"));
            }
            let low = self.scan_hex_digits(4)?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(self.fail("low surrogate escape"));
            }
            0x10000 + ((value - 0xD800) << 10) + (low - 0xDC00)
        } else {
            value
        };

        char::from_u32(value).ok_or_else(|| self.fail_at(position, "unicode scalar value"))
    }

    fn scan_hex_digits(&mut self, count: usize) -> Result<u32, ParseError> {
        let mut value = 0u32;
        for _ in 0..count {
            let digit = match self.cursor.peek().and_then(|c| c.to_digit(16)) {
                Some(digit) => digit,
                None => return Err(self.fail("hexadecimal digit")),
            };
            value = value * 16 + digit;
            self.cursor.advance();
        }
        Ok(value)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn parser(input: &str) -> Parser<'_> {
        Parser::new(input)
    }

    #[test]
    fn test_scan_identifier_with_hyphens() {
        let mut p = parser("load-balancer_2 rest");
        let ident = p.scan_identifier().unwrap();
        assert_eq!(ident.value, "load-balancer_2");
    }

    #[test]
    fn test_scan_identifier_rejects_digit_start() {
        let mut p = parser("9lives");
        assert!(p.scan_identifier().is_err());
    }

    #[test]
    fn test_peek_keyword_boundary() {
        let p = parser("format");
        assert!(!p.peek_keyword("for"));
        let p = parser("for i");
        assert!(p.peek_keyword("for"));
    }

    #[test]
    fn test_scan_number_fraction_and_exponent() {
        let mut p = parser("1.5e-3");
        let number = p.scan_number().unwrap();
        assert_eq!(number.value, 1.5e-3);
    }

    #[test]
    fn test_scan_number_stops_before_dot_access() {
        let mut p = parser("1.x");
        let number = p.scan_number().unwrap();
        assert_eq!(number.value, 1.0);
    }

    #[test]
    fn test_scan_number_requires_exponent_digits() {
        let mut p = parser("1e+");
        assert!(p.scan_number().is_err());
    }

    #[test]
    fn test_scan_string_literal_escapes() {
        let mut p = parser(r#""a\"b\n\t\\""#);
        let string = p.scan_string_literal().unwrap();
        assert_eq!(string.value, "a\"b\n\t\\");
    }

    #[test]
    fn test_scan_string_unicode_escapes() {
        let mut p = parser(r#""é \U0001F600""#);
        let string = p.scan_string_literal().unwrap();
        assert_eq!(string.value, "é 😀");
    }

    #[test]
    fn test_scan_string_surrogate_pair() {
        let mut p = parser(r#""\uD83D\uDE00""#);
        let string = p.scan_string_literal().unwrap();
        assert_eq!(string.value, "😀");
    }

    #[test]
    fn test_scan_string_invalid_escape() {
        let mut p = parser(r#""\q""#);
        assert!(p.scan_string_literal().is_err());
    }

    #[test]
    fn test_scan_string_unterminated() {
        let mut p = parser("\"abc");
        let error = p.scan_string_literal().unwrap_err();
        assert!(error.expected.iter().any(|e| e.contains("closing")));
    }
}
