use crate::token::Token;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExpectedLiteralValue {
    Null,
    True,
    False,
}

/// What happened after feeding one more character into the literal matcher?
pub(crate) enum Step {
    /// Character matched, but the literal is not finished yet.
    NeedMore,
    /// Character matched and completed the literal.
    Done(Token),
    /// Character did not match the expected byte.
    Reject,
}

/// Remaining bytes of `null`, `true` or `false` after the first character.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct ExpectedLiteralBuffer(Option<(&'static [u8], ExpectedLiteralValue)>);

impl ExpectedLiteralBuffer {
    /// Start matching after the first character (`n`, `t`, or `f`).
    pub fn new(first: char) -> Self {
        match first {
            'n' => ExpectedLiteralBuffer(Some((b"ull", ExpectedLiteralValue::Null))),
            't' => ExpectedLiteralBuffer(Some((b"rue", ExpectedLiteralValue::True))),
            'f' => ExpectedLiteralBuffer(Some((b"alse", ExpectedLiteralValue::False))),
            _ => ExpectedLiteralBuffer(None),
        }
    }

    pub fn step(&mut self, c: char) -> Step {
        let Some((bytes, kind)) = self.0.take() else {
            return Step::Reject;
        };

        match bytes.split_first() {
            Some((expected, rest)) if char::from(*expected) == c => {
                if rest.is_empty() {
                    Step::Done(match kind {
                        ExpectedLiteralValue::Null => Token::Null,
                        ExpectedLiteralValue::True => Token::boolean(true),
                        ExpectedLiteralValue::False => Token::boolean(false),
                    })
                } else {
                    self.0 = Some((rest, kind));
                    Step::NeedMore
                }
            }
            _ => {
                self.0 = Some((bytes, kind));
                Step::Reject
            }
        }
    }
}
