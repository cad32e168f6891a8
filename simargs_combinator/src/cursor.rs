/// An immutable position over the tokens of a command line.
///
/// Parsers never mutate a cursor.
/// Consuming a token produces a new cursor, so restoring after a failed attempt is simply a matter of re-using the old one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenCursor<'t> {
    tokens: &'t [&'t str],
    position: usize,
}

impl<'t> TokenCursor<'t> {
    /// Create a cursor positioned at the first token.
    pub fn new(tokens: &'t [&'t str]) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// The next token, or `None` when every token has been consumed.
    pub fn peek(&self) -> Option<&'t str> {
        self.tokens.get(self.position).copied()
    }

    /// A cursor missing the next token, or `None` when already at the end.
    pub fn advance(self) -> Option<Self> {
        if self.is_empty() {
            None
        } else {
            Some(Self {
                tokens: self.tokens,
                position: self.position + 1,
            })
        }
    }

    /// The index of the next token within the full command line.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The tokens which have not been consumed yet.
    pub fn remaining(&self) -> &'t [&'t str] {
        &self.tokens[self.position..]
    }

    /// The full command line this cursor views.
    pub fn source(&self) -> &'t [&'t str] {
        self.tokens
    }

    /// Whether every token has been consumed.
    pub fn is_empty(&self) -> bool {
        self.position >= self.tokens.len()
    }
}
