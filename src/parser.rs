use thiserror::Error;

use simargs_combinator::ParseFailure;

mod interface;
mod middleware;
mod printer;

pub use middleware::CommandLineParser;

/// A command line which could not be understood, as presented to the user.
#[derive(Debug, Error)]
#[error("Parse error: {0}")]
pub struct ParseError(pub(crate) String);

impl From<ParseFailure> for ParseError {
    fn from(failure: ParseFailure) -> Self {
        ParseError(failure.into_error().to_string())
    }
}

/// The command line with a caret under the token where parsing failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ErrorContext {
    offset: usize,
    tokens: Vec<String>,
}

impl ErrorContext {
    pub(crate) fn new(offset: usize, tokens: &[&str]) -> Self {
        Self {
            offset,
            tokens: tokens.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let projection = self.tokens.join(" ");
        // Past the last token means the input ended too soon.
        let column = if self.offset < self.tokens.len() {
            self.tokens[..self.offset]
                .iter()
                .map(|token| token.len() + 1)
                .sum()
        } else if self.tokens.is_empty() {
            0
        } else {
            projection.len() + 1
        };

        write!(f, "{projection}\n{:column$}^", "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simargs_combinator::ParseError as Kind;

    #[test]
    fn parse_error() {
        let failure = ParseFailure::new(Kind::could_not_interpret("Int", Some("abc")), 1);
        assert_eq!(
            ParseError::from(failure).to_string(),
            "Parse error: Could not interpret 'abc' as Int."
        );
    }

    #[test]
    fn error_context_empty() {
        assert_eq!(ErrorContext::new(0, &[]).to_string(), "\n^");
        assert_eq!(ErrorContext::new(3, &[]).to_string(), "\n^");
    }

    #[test]
    fn error_context_tokens1() {
        assert_eq!(
            ErrorContext::new(0, &["abc"]).to_string(),
            r#"abc
^"#
        );
        assert_eq!(
            ErrorContext::new(1, &["abc"]).to_string(),
            r#"abc
    ^"#
        );
    }

    #[test]
    fn error_context_tokens3() {
        assert_eq!(
            ErrorContext::new(0, &["install", "/tmp", "--codesign"]).to_string(),
            r#"install /tmp --codesign
^"#
        );
        assert_eq!(
            ErrorContext::new(1, &["install", "/tmp", "--codesign"]).to_string(),
            r#"install /tmp --codesign
        ^"#
        );
        assert_eq!(
            ErrorContext::new(2, &["install", "/tmp", "--codesign"]).to_string(),
            r#"install /tmp --codesign
             ^"#
        );
        assert_eq!(
            ErrorContext::new(3, &["install", "/tmp", "--codesign"]).to_string(),
            r#"install /tmp --codesign
                        ^"#
        );
    }
}
