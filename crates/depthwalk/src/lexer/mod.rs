//! Strict JSON tokenizer.
//!
//! [`JsonLexer`] turns a complete JSON text into the [`Token`] stream the
//! unmarshaller consumes. It validates the grammar as it goes with a
//! parse-state machine and a stack of open containers, so the cursor never
//! sees structurally impossible sequences from this source: a field name
//! always precedes an object member's value, every close matches its open.
//!
//! Empty input (or input made of whitespace only) is an empty stream, not an
//! error.
//!
//! # Examples
//!
//! ```rust
//! use depthwalk::{JsonLexer, Token, TokenSource};
//!
//! let mut lexer = JsonLexer::new(r#"{"readOnly": true}"#);
//! let mut tokens = Vec::new();
//! while let Some(token) = lexer.next_token().unwrap() {
//!     tokens.push(token);
//! }
//! assert_eq!(
//!     tokens,
//!     vec![
//!         Token::StartObject,
//!         Token::field("readOnly"),
//!         Token::boolean(true),
//!         Token::EndObject,
//!     ]
//! );
//! ```

mod escape_buffer;
mod literal_buffer;

use escape_buffer::{UnicodeEscapeBuffer, combine_surrogates, is_high_surrogate};
use literal_buffer::{ExpectedLiteralBuffer, Step};

use crate::{
    error::{DecodeError, SyntaxError},
    options::LexerOptions,
    source::TokenSource,
    token::{Scalar, Token},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// A peeked character from the input.
enum PeekedChar {
    Char(char),
    EndOfInput,
}

use PeekedChar::{Char, EndOfInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    Start,
    BeforePropertyName,
    AfterPropertyName,
    BeforePropertyValue,
    BeforeArrayValue,
    AfterPropertyValue,
    AfterArrayValue,
    End,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Object,
    Array,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberState {
    Sign,
    Zero,
    DecimalInteger,
    DecimalPoint,
    DecimalFraction,
    DecimalExponent,
    DecimalExponentSign,
    DecimalExponentInteger,
}

/// Pull-based tokenizer over a JSON text.
#[derive(Debug)]
pub struct JsonLexer<'src> {
    src: &'src str,
    /// Byte offset of the next unread character.
    pos: usize,
    line: usize,
    column: usize,
    parse_state: ParseState,
    stack: Vec<Container>,
    /// Set right after `{` or `[`, where an immediate close is legal.
    allow_close: bool,
    allow_unicode_whitespace: bool,
}

impl<'src> JsonLexer<'src> {
    /// Creates a lexer with default options.
    #[must_use]
    pub fn new(src: &'src str) -> Self {
        Self::with_options(src, LexerOptions::default())
    }

    /// Creates a lexer with explicit options.
    #[must_use]
    pub fn with_options(src: &'src str, options: LexerOptions) -> Self {
        Self {
            src,
            pos: 0,
            line: 1,
            column: 1,
            parse_state: ParseState::Start,
            stack: Vec::new(),
            allow_close: false,
            allow_unicode_whitespace: options.allow_unicode_whitespace,
        }
    }

    /// 1-based `(line, column)` of the next unread character.
    #[must_use]
    pub fn position(&self) -> (usize, usize) {
        (self.line, self.column)
    }

    fn peek_char(&self) -> PeekedChar {
        match self.src[self.pos..].chars().next() {
            Some(c) => Char(c),
            None => EndOfInput,
        }
    }

    fn advance_char(&mut self) -> Option<char> {
        let ch = self.src[self.pos..].chars().next()?;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while let Char(c) = self.peek_char() {
            let skip = matches!(c, ' ' | '\n' | '\r' | '\t')
                || (self.allow_unicode_whitespace && c.is_whitespace());
            if !skip {
                break;
            }
            self.advance_char();
        }
    }

    fn lex(&mut self) -> Result<Option<Token>, DecodeError> {
        use ParseState::{
            AfterArrayValue, AfterPropertyName, AfterPropertyValue, BeforeArrayValue,
            BeforePropertyName, BeforePropertyValue, End, Error, Start,
        };

        loop {
            self.skip_whitespace();
            let next = self.peek_char();
            match self.parse_state {
                Error => return Ok(None),
                Start => {
                    if next == EndOfInput {
                        self.parse_state = End;
                        return Ok(None);
                    }
                    return self.lex_value(next).map(Some);
                }
                BeforePropertyName => match next {
                    Char('"') => {
                        self.advance_char();
                        let name = self.lex_string()?;
                        self.parse_state = AfterPropertyName;
                        return Ok(Some(Token::FieldName(name)));
                    }
                    Char('}') if self.allow_close => {
                        self.advance_char();
                        return Ok(Some(self.pop()));
                    }
                    c => return Err(self.invalid_char(c)),
                },
                AfterPropertyName => match next {
                    Char(':') => {
                        self.advance_char();
                        self.parse_state = BeforePropertyValue;
                    }
                    c => return Err(self.invalid_char(c)),
                },
                BeforePropertyValue => return self.lex_value(next).map(Some),
                BeforeArrayValue => match next {
                    Char(']') if self.allow_close => {
                        self.advance_char();
                        return Ok(Some(self.pop()));
                    }
                    c => return self.lex_value(c).map(Some),
                },
                AfterPropertyValue => match next {
                    Char(',') => {
                        self.advance_char();
                        self.allow_close = false;
                        self.parse_state = BeforePropertyName;
                    }
                    Char('}') => {
                        self.advance_char();
                        return Ok(Some(self.pop()));
                    }
                    c => return Err(self.invalid_char(c)),
                },
                AfterArrayValue => match next {
                    Char(',') => {
                        self.advance_char();
                        self.allow_close = false;
                        self.parse_state = BeforeArrayValue;
                    }
                    Char(']') => {
                        self.advance_char();
                        return Ok(Some(self.pop()));
                    }
                    c => return Err(self.invalid_char(c)),
                },
                End => match next {
                    EndOfInput => return Ok(None),
                    c => return Err(self.invalid_char(c)),
                },
            }
        }
    }

    fn lex_value(&mut self, next: PeekedChar) -> Result<Token, DecodeError> {
        let token = match next {
            Char('{') => {
                self.advance_char();
                self.stack.push(Container::Object);
                self.allow_close = true;
                self.parse_state = ParseState::BeforePropertyName;
                return Ok(Token::StartObject);
            }
            Char('[') => {
                self.advance_char();
                self.stack.push(Container::Array);
                self.allow_close = true;
                self.parse_state = ParseState::BeforeArrayValue;
                return Ok(Token::StartArray);
            }
            Char('"') => {
                self.advance_char();
                Token::Value(Scalar::String(self.lex_string()?))
            }
            Char(c @ ('n' | 't' | 'f')) => {
                self.advance_char();
                self.lex_literal(c)?
            }
            Char(c) if c == '-' || c.is_ascii_digit() => {
                Token::Value(Scalar::Number(self.lex_number()?.to_owned()))
            }
            c => return Err(self.invalid_char(c)),
        };
        self.after_value();
        Ok(token)
    }

    fn after_value(&mut self) {
        self.parse_state = match self.stack.last() {
            Some(Container::Object) => ParseState::AfterPropertyValue,
            Some(Container::Array) => ParseState::AfterArrayValue,
            None => ParseState::End,
        };
    }

    fn pop(&mut self) -> Token {
        let token = match self.stack.pop() {
            Some(Container::Array) => Token::EndArray,
            _ => Token::EndObject,
        };
        self.allow_close = false;
        self.after_value();
        token
    }

    fn lex_literal(&mut self, first: char) -> Result<Token, DecodeError> {
        let mut expected = ExpectedLiteralBuffer::new(first);
        loop {
            let next = self.peek_char();
            let Char(c) = next else {
                return Err(self.invalid_char(next));
            };
            match expected.step(c) {
                Step::NeedMore => {
                    self.advance_char();
                }
                Step::Done(token) => {
                    self.advance_char();
                    return Ok(token);
                }
                Step::Reject => return Err(self.invalid_char(next)),
            }
        }
    }

    /// Validates a number and returns its lexeme.
    fn lex_number(&mut self) -> Result<&'src str, DecodeError> {
        use NumberState::{
            DecimalExponent, DecimalExponentInteger, DecimalExponentSign, DecimalFraction,
            DecimalInteger, DecimalPoint, Sign, Zero,
        };

        let start = self.pos;
        let mut state = match self.advance_char() {
            Some('-') => Sign,
            Some('0') => Zero,
            _ => DecimalInteger,
        };

        loop {
            let next = self.peek_char();
            let c = match next {
                Char(c) => Some(c),
                EndOfInput => None,
            };
            state = match (state, c) {
                (Sign, Some('0')) => Zero,
                (DecimalExponent, Some('+' | '-')) => DecimalExponentSign,
                (Sign | DecimalPoint | DecimalExponent | DecimalExponentSign, Some(d))
                    if d.is_ascii_digit() =>
                {
                    match state {
                        Sign => DecimalInteger,
                        DecimalPoint => DecimalFraction,
                        _ => DecimalExponentInteger,
                    }
                }
                (Sign | DecimalPoint | DecimalExponent | DecimalExponentSign, _) => {
                    return Err(self.invalid_char(next));
                }
                (Zero | DecimalInteger, Some('.')) => DecimalPoint,
                (Zero | DecimalInteger | DecimalFraction, Some('e' | 'E')) => DecimalExponent,
                (DecimalInteger, Some(d)) if d.is_ascii_digit() => DecimalInteger,
                (DecimalFraction, Some(d)) if d.is_ascii_digit() => DecimalFraction,
                (DecimalExponentInteger, Some(d)) if d.is_ascii_digit() => DecimalExponentInteger,
                (Zero | DecimalInteger | DecimalFraction | DecimalExponentInteger, _) => {
                    return Ok(&self.src[start..self.pos]);
                }
            };
            self.advance_char();
        }
    }

    /// Reads string content after the opening quote, through the closing one.
    fn lex_string(&mut self) -> Result<String, DecodeError> {
        let mut out = String::new();
        loop {
            let next = self.peek_char();
            match next {
                Char('"') => {
                    self.advance_char();
                    return Ok(out);
                }
                Char('\\') => {
                    self.advance_char();
                    let ch = self.lex_escape()?;
                    out.push(ch);
                }
                Char(c) if u32::from(c) < 0x20 => return Err(self.invalid_char(next)),
                Char(c) => {
                    self.advance_char();
                    out.push(c);
                }
                EndOfInput => return Err(self.invalid_char(next)),
            }
        }
    }

    fn lex_escape(&mut self) -> Result<char, DecodeError> {
        let next = self.peek_char();
        let ch = match next {
            Char('"') => '"',
            Char('\\') => '\\',
            Char('/') => '/',
            Char('b') => '\u{0008}',
            Char('f') => '\u{000C}',
            Char('n') => '\n',
            Char('r') => '\r',
            Char('t') => '\t',
            Char('u') => {
                self.advance_char();
                let unit = self.lex_unicode_unit()?;
                if !is_high_surrogate(unit) {
                    return char::from_u32(u32::from(unit)).ok_or_else(|| {
                        self.syntax_error(SyntaxError::InvalidUnicodeEscapeSequence(
                            u32::from(unit),
                        ))
                    });
                }
                if self.peek_char() != Char('\\') {
                    return Err(self.syntax_error(SyntaxError::InvalidUnicodeEscapeSequence(
                        u32::from(unit),
                    )));
                }
                self.advance_char();
                if self.peek_char() != Char('u') {
                    return Err(self.invalid_char(self.peek_char()));
                }
                self.advance_char();
                let low = self.lex_unicode_unit()?;
                return combine_surrogates(unit, low).map_err(|e| self.syntax_error(e));
            }
            c => return Err(self.invalid_char(c)),
        };
        self.advance_char();
        Ok(ch)
    }

    fn lex_unicode_unit(&mut self) -> Result<u16, DecodeError> {
        let mut buffer = UnicodeEscapeBuffer::new();
        loop {
            let next = self.peek_char();
            let Char(c) = next else {
                return Err(self.invalid_char(next));
            };
            let fed = buffer.feed(c).map_err(|e| self.syntax_error(e))?;
            self.advance_char();
            if let Some(unit) = fed {
                return Ok(unit);
            }
        }
    }

    // ---------------------------------------------------------------------------------------------
    // Errors
    // ---------------------------------------------------------------------------------------------

    fn invalid_char(&self, c: PeekedChar) -> DecodeError {
        match c {
            EndOfInput => self.syntax_error(SyntaxError::UnexpectedEndOfInput),
            Char(c) => self.syntax_error(SyntaxError::InvalidCharacter(format_char(c))),
        }
    }

    fn syntax_error(&self, source: SyntaxError) -> DecodeError {
        DecodeError::Syntax {
            source,
            line: self.line,
            column: self.column,
        }
    }
}

impl TokenSource for JsonLexer<'_> {
    fn next_token(&mut self) -> Result<Option<Token>, DecodeError> {
        let result = self.lex();
        if result.is_err() {
            self.parse_state = ParseState::Error;
        }
        result
    }
}

fn format_char(c: char) -> String {
    match c {
        '"' => "\\\"".into(),
        '\'' => "\\'".into(),
        '\\' => "\\\\".into(),
        '\u{0008}' => "\\b".into(),
        '\u{000C}' => "\\f".into(),
        '\n' => "\\n".into(),
        '\r' => "\\r".into(),
        '\t' => "\\t".into(),
        '\0' => "\\0".into(),
        c if c.is_control() || (c.is_whitespace() && !c.is_ascii_whitespace()) => {
            format!("\\u{:04X}", c as u32)
        }
        c => c.to_string(),
    }
}
