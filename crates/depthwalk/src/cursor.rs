//! Position and nesting bookkeeping over a token stream.
//!
//! The [`Cursor`] is the only mutable state of a decode. It remembers the
//! current token and, for every open container, the field name that opened it
//! (its *label*). Array elements and the document root are anonymous.
//!
//! Depth counts labelled containers plus a pending field name, so a field's
//! name and the container holding its value sit at the same depth:
//!
//! ```text
//! {               depth 0   anonymous root
//!   "config":     depth 1   field name pending
//!   {             depth 1   container labelled "config"
//!     "x": 1      depth 2
//!   }             depth 0   closes "config"
//! }
//! ```
//!
//! This makes the depth observed before a composite's opening token equal to
//! the depth observed on it, which is what lets a composite decoder be entered
//! either way.
use tracing::trace;

use crate::{
    error::DecodeError,
    options::DecodeOptions,
    source::TokenSource,
    token::{Token, TokenKind},
};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Frame {
    kind: TokenKind,
    label: Option<String>,
}

/// A single-token window over a [`TokenSource`] with nesting bookkeeping.
pub struct Cursor<'a> {
    source: Box<dyn TokenSource + 'a>,
    current: Option<Token>,
    frames: Vec<Frame>,
    /// Number of frames with a label.
    labelled: usize,
    current_field: Option<String>,
    last_closed: Option<String>,
    consumed: usize,
    exhausted: bool,
    max_depth: usize,
}

impl core::fmt::Debug for Cursor<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Cursor")
            .field("current", &self.current)
            .field("depth", &self.current_depth())
            .field("field", &self.current_field)
            .field("consumed", &self.consumed)
            .finish_non_exhaustive()
    }
}

impl<'a> Cursor<'a> {
    /// Creates a cursor with default options. No token is fetched yet.
    pub fn new(source: impl TokenSource + 'a) -> Self {
        Self::with_options(source, DecodeOptions::default())
    }

    /// Creates a cursor with explicit options.
    pub fn with_options(source: impl TokenSource + 'a, options: DecodeOptions) -> Self {
        Self {
            source: Box::new(source),
            current: None,
            frames: Vec::new(),
            labelled: 0,
            current_field: None,
            last_closed: None,
            consumed: 0,
            exhausted: false,
            max_depth: options.max_depth,
        }
    }

    /// The token under the cursor; `None` before the first `advance` and
    /// after the stream is exhausted.
    #[must_use]
    pub fn current(&self) -> Option<&Token> {
        self.current.as_ref()
    }

    /// Fetches the next token and updates the nesting bookkeeping.
    ///
    /// # Errors
    ///
    /// Fails when the source fails, when a close token does not match the
    /// innermost open container, or when nesting exceeds the configured
    /// limit.
    pub fn advance(&mut self) -> Result<Option<&Token>, DecodeError> {
        self.last_closed = None;
        let next = if self.exhausted {
            None
        } else {
            self.source.next_token()?
        };
        self.current = next;

        let Some(token) = &self.current else {
            self.exhausted = true;
            return Ok(None);
        };
        self.consumed += 1;

        match token {
            Token::StartObject | Token::StartArray => {
                if self.frames.len() >= self.max_depth {
                    return Err(DecodeError::DepthLimitExceeded {
                        limit: self.max_depth,
                    });
                }
                let label = self.current_field.take();
                if label.is_some() {
                    self.labelled += 1;
                }
                self.frames.push(Frame {
                    kind: token.kind(),
                    label,
                });
            }
            Token::EndObject | Token::EndArray => {
                let opens = if matches!(token, Token::EndObject) {
                    TokenKind::StartObject
                } else {
                    TokenKind::StartArray
                };
                match self.frames.last() {
                    Some(frame) if frame.kind == opens => {}
                    _ => {
                        return Err(DecodeError::UnexpectedToken {
                            expected: "value or matching close",
                            found: token.kind(),
                            field: self.current_field.clone(),
                            depth: self.current_depth(),
                        });
                    }
                }
                if let Some(frame) = self.frames.pop() {
                    if frame.label.is_some() {
                        self.labelled -= 1;
                    }
                    self.last_closed = frame.label;
                }
                self.current_field = None;
            }
            Token::FieldName(name) => {
                if !matches!(self.frames.last(), Some(f) if f.kind == TokenKind::StartObject) {
                    return Err(DecodeError::UnexpectedToken {
                        expected: "value",
                        found: TokenKind::FieldName,
                        field: self.current_field.clone(),
                        depth: self.current_depth(),
                    });
                }
                self.current_field = Some(name.clone());
            }
            Token::Value(_) | Token::Null => {}
        }

        Ok(self.current.as_ref())
    }

    /// Labelled open containers, plus one while a field name is pending.
    #[must_use]
    pub fn current_depth(&self) -> usize {
        self.labelled + usize::from(self.current_field.is_some())
    }

    /// Label of the innermost open container, if it has one.
    #[must_use]
    pub fn current_parent_field_name(&self) -> Option<&str> {
        self.frames.last().and_then(|f| f.label.as_deref())
    }

    /// Label of the container closed by the current token, if the current
    /// token closed a labelled container.
    #[must_use]
    pub fn last_closed_parent_field_name(&self) -> Option<&str> {
        self.last_closed.as_deref()
    }

    /// The pending field name, or else the innermost container's label.
    #[must_use]
    pub fn current_name(&self) -> Option<&str> {
        self.current_field
            .as_deref()
            .or_else(|| self.current_parent_field_name())
    }

    /// Whether the current name is `name` and the cursor sits at `depth`.
    #[must_use]
    pub fn test_expression(&self, name: &str, depth: usize) -> bool {
        self.current_name() == Some(name) && self.current_depth() == depth
    }

    /// Number of tokens fetched so far.
    #[must_use]
    pub fn tokens_consumed(&self) -> usize {
        self.consumed
    }

    /// Consumes the value starting at the current token.
    ///
    /// Scalars and `null` are a single token and nothing moves. For a
    /// container the cursor advances until that container's close token is
    /// current.
    ///
    /// # Errors
    ///
    /// Fails when the stream ends before the container closes, or on any
    /// error from [`advance`](Self::advance).
    pub fn skip_value(&mut self) -> Result<(), DecodeError> {
        let Some(token) = &self.current else {
            return Err(self.unexpected_end());
        };
        if !token.is_start() {
            return Ok(());
        }
        let outer = self.frames.len() - 1;
        trace!(depth = self.current_depth(), "skipping container value");
        while self.frames.len() > outer {
            if self.advance()?.is_none() {
                return Err(self.unexpected_end());
            }
        }
        Ok(())
    }

    /// A type-mismatch or grammar error for the current position.
    #[must_use]
    pub fn unexpected(&self, expected: &'static str, found: TokenKind) -> DecodeError {
        DecodeError::UnexpectedToken {
            expected,
            found,
            field: self.current_name().map(str::to_owned),
            depth: self.current_depth(),
        }
    }

    /// A premature end-of-stream error for the current position.
    #[must_use]
    pub fn unexpected_end(&self) -> DecodeError {
        DecodeError::UnexpectedEnd {
            field: self.current_name().map(str::to_owned),
            depth: self.current_depth(),
        }
    }

    /// Error for scalar text that could not be converted to `kind`.
    pub fn invalid_value(
        &self,
        kind: &'static str,
        text: &str,
        reason: impl core::fmt::Display,
    ) -> DecodeError {
        DecodeError::InvalidValue {
            kind,
            text: text.to_owned(),
            field: self.current_name().map(str::to_owned),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::TokenReplay;

    fn cursor(tokens: Vec<Token>) -> Cursor<'static> {
        Cursor::new(TokenReplay::from(tokens))
    }

    #[test]
    fn depth_is_shared_by_field_and_its_container() {
        let mut c = cursor(vec![
            Token::StartObject,
            Token::field("config"),
            Token::StartObject,
            Token::field("x"),
            Token::number(1),
            Token::EndObject,
            Token::EndObject,
        ]);
        assert_eq!(c.current_depth(), 0);
        c.advance().unwrap();
        assert_eq!(c.current_depth(), 0);
        assert_eq!(c.current_parent_field_name(), None);

        c.advance().unwrap();
        assert_eq!(c.current_depth(), 1);
        assert!(c.test_expression("config", 1));

        c.advance().unwrap();
        assert_eq!(c.current_depth(), 1);
        assert_eq!(c.current_parent_field_name(), Some("config"));

        c.advance().unwrap();
        assert!(c.test_expression("x", 2));
        c.advance().unwrap();
        assert_eq!(c.current_depth(), 2);

        c.advance().unwrap();
        assert_eq!(c.last_closed_parent_field_name(), Some("config"));
        assert_eq!(c.current_depth(), 0);

        c.advance().unwrap();
        assert_eq!(c.last_closed_parent_field_name(), None);
        assert_eq!(c.advance().unwrap(), None);
        assert_eq!(c.tokens_consumed(), 7);
    }

    #[test]
    fn array_elements_are_anonymous() {
        let mut c = cursor(vec![
            Token::StartObject,
            Token::field("items"),
            Token::StartArray,
            Token::StartObject,
            Token::field("a"),
        ]);
        for _ in 0..3 {
            c.advance().unwrap();
        }
        assert_eq!(c.current_depth(), 1);
        c.advance().unwrap();
        assert_eq!(c.current_depth(), 1);
        assert_eq!(c.current_parent_field_name(), None);
        c.advance().unwrap();
        assert!(c.test_expression("a", 2));
    }

    #[test]
    fn skip_value_stops_on_matching_close() {
        let mut c = cursor(vec![
            Token::StartObject,
            Token::field("extra"),
            Token::StartArray,
            Token::StartObject,
            Token::field("extra"),
            Token::StartArray,
            Token::EndArray,
            Token::EndObject,
            Token::EndArray,
            Token::field("next"),
        ]);
        c.advance().unwrap();
        c.advance().unwrap();
        c.advance().unwrap();
        c.skip_value().unwrap();
        assert_eq!(c.current(), Some(&Token::EndArray));
        assert_eq!(c.last_closed_parent_field_name(), Some("extra"));
        assert_eq!(c.current_depth(), 0);
        c.advance().unwrap();
        assert!(c.test_expression("next", 1));
    }

    #[test]
    fn skip_value_on_scalar_is_noop() {
        let mut c = cursor(vec![Token::string("x"), Token::Null]);
        c.advance().unwrap();
        c.skip_value().unwrap();
        assert_eq!(c.current(), Some(&Token::string("x")));
    }

    #[test]
    fn skip_value_reports_truncation() {
        let mut c = cursor(vec![Token::StartArray, Token::number(1)]);
        c.advance().unwrap();
        assert_eq!(
            c.skip_value().unwrap_err(),
            DecodeError::UnexpectedEnd {
                field: None,
                depth: 0
            }
        );
    }

    #[test]
    fn mismatched_close_is_rejected() {
        let mut c = cursor(vec![Token::StartObject, Token::EndArray]);
        c.advance().unwrap();
        assert!(matches!(
            c.advance().unwrap_err(),
            DecodeError::UnexpectedToken {
                found: TokenKind::EndArray,
                ..
            }
        ));
    }

    #[test]
    fn field_name_outside_object_is_rejected() {
        let mut c = cursor(vec![Token::StartArray, Token::field("a")]);
        c.advance().unwrap();
        assert!(c.advance().is_err());
    }

    #[test]
    fn depth_limit() {
        let mut c = Cursor::with_options(
            TokenReplay::from(vec![Token::StartArray, Token::StartArray, Token::StartArray]),
            DecodeOptions { max_depth: 2 },
        );
        c.advance().unwrap();
        c.advance().unwrap();
        assert_eq!(
            c.advance().unwrap_err(),
            DecodeError::DepthLimitExceeded { limit: 2 }
        );
    }

    #[test]
    fn exhausted_source_is_not_polled_again() {
        let mut c = cursor(vec![]);
        assert_eq!(c.advance().unwrap(), None);
        assert_eq!(c.advance().unwrap(), None);
        assert_eq!(c.tokens_consumed(), 0);
    }
}
