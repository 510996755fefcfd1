//! Pull-based token sources.
//!
//! The unmarshaller never sees bytes: it pulls [`Token`]s from a
//! [`TokenSource`]. [`JsonLexer`](crate::JsonLexer) produces them from JSON
//! text; [`TokenReplay`] hands back a prepared sequence, which is what tests
//! and callers that already hold tokens use.
use std::collections::VecDeque;

use crate::{error::DecodeError, token::Token};

/// A lazily produced sequence of tokens for a single document.
///
/// `Ok(None)` marks the end of the stream. Once a source has returned
/// `Ok(None)` or an error it is not polled again by the cursor.
pub trait TokenSource {
    /// Produces the next token, or `None` when the stream is exhausted.
    ///
    /// # Errors
    ///
    /// Implementations fail when the underlying input is malformed.
    fn next_token(&mut self) -> Result<Option<Token>, DecodeError>;
}

impl<S: TokenSource + ?Sized> TokenSource for &mut S {
    fn next_token(&mut self) -> Result<Option<Token>, DecodeError> {
        (**self).next_token()
    }
}

impl<S: TokenSource + ?Sized> TokenSource for Box<S> {
    fn next_token(&mut self) -> Result<Option<Token>, DecodeError> {
        (**self).next_token()
    }
}

/// Replays an already materialised token sequence.
///
/// ```
/// use depthwalk::{Token, TokenReplay, TokenSource};
///
/// let mut replay = TokenReplay::from(vec![Token::Null]);
/// assert_eq!(replay.next_token().unwrap(), Some(Token::Null));
/// assert_eq!(replay.next_token().unwrap(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenReplay {
    tokens: VecDeque<Token>,
}

impl TokenReplay {
    /// Creates an empty replay.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tokens not yet handed out.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.tokens.len()
    }
}

impl From<Vec<Token>> for TokenReplay {
    fn from(tokens: Vec<Token>) -> Self {
        Self {
            tokens: tokens.into(),
        }
    }
}

impl FromIterator<Token> for TokenReplay {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}

impl TokenSource for TokenReplay {
    fn next_token(&mut self) -> Result<Option<Token>, DecodeError> {
        Ok(self.tokens.pop_front())
    }
}
