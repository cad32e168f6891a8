use thiserror::Error;

/// The reasons a parser may reject its input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The token was not the expected shape (structural).
    /// An `actual` of `None` means the input ended first.
    #[error("Could not interpret {} as {expected}.", describe_token(.actual))]
    CouldNotInterpret {
        expected: String,
        actual: Option<String>,
    },

    /// The token was the expected shape, but its value is invalid (semantic).
    #[error("{0}")]
    Custom(String),

    /// A valid prefix was parsed, but these tokens were left over (completeness).
    #[error("Unconsumed input: {}.", .0.join(" "))]
    Exhausted(Vec<String>),
}

fn describe_token(token: &Option<String>) -> String {
    match token {
        Some(token) => format!("'{token}'"),
        None => "the end of input".to_string(),
    }
}

impl ParseError {
    pub fn could_not_interpret(expected: impl Into<String>, actual: Option<&str>) -> Self {
        ParseError::CouldNotInterpret {
            expected: expected.into(),
            actual: actual.map(str::to_string),
        }
    }

    pub fn custom(message: impl Into<String>) -> Self {
        ParseError::Custom(message.into())
    }
}

/// A `ParseError` located at the token index where it was raised.
///
/// The offset is what lets an alternation pick the branch which progressed furthest.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{error}")]
pub struct ParseFailure {
    error: ParseError,
    offset: usize,
}

impl ParseFailure {
    pub fn new(error: ParseError, offset: usize) -> Self {
        Self { error, offset }
    }

    pub fn error(&self) -> &ParseError {
        &self.error
    }

    /// The index of the offending token in the full command line.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn into_error(self) -> ParseError {
        self.error
    }

    /// Keep whichever of the two failures got further into the input.
    /// Ties go to `self`, the failure which was encountered first.
    pub fn furthest(self, other: ParseFailure) -> ParseFailure {
        if other.offset > self.offset {
            other
        } else {
            self
        }
    }

    /// Keep this failure, unless the `recovered` one got strictly further into the input.
    pub fn or_recovered(self, recovered: Option<ParseFailure>) -> ParseFailure {
        match recovered {
            Some(recovered) if recovered.offset > self.offset => recovered,
            _ => self,
        }
    }
}

/// The furthest of two optional failures, preferring `first` on a tie.
pub(crate) fn deepest(
    first: Option<ParseFailure>,
    second: Option<ParseFailure>,
) -> Option<ParseFailure> {
    match (first, second) {
        (Some(first), Some(second)) => Some(first.furthest(second)),
        (first, second) => first.or(second),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(
        ParseError::could_not_interpret("Int", Some("abc")),
        "Could not interpret 'abc' as Int."
    )]
    #[case(
        ParseError::could_not_interpret("A Directory", None),
        "Could not interpret the end of input as A Directory."
    )]
    #[case(
        ParseError::custom("'/tmp' should be a file, but isn't"),
        "'/tmp' should be a file, but isn't"
    )]
    #[case(
        ParseError::Exhausted(vec!["extra".to_string(), "more".to_string()]),
        "Unconsumed input: extra more."
    )]
    fn display(#[case] error: ParseError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
        assert_eq!(ParseFailure::new(error, 3).to_string(), expected);
    }

    #[rstest]
    #[case(0, 0, 0)]
    #[case(0, 1, 1)]
    #[case(2, 1, 2)]
    fn furthest(#[case] first: usize, #[case] second: usize, #[case] expected: usize) {
        let a = ParseFailure::new(ParseError::custom("first"), first);
        let b = ParseFailure::new(ParseError::custom("second"), second);
        let winner = a.furthest(b);
        assert_eq!(winner.offset(), expected);

        if first >= second {
            assert_eq!(winner.error(), &ParseError::custom("first"));
        } else {
            assert_eq!(winner.into_error(), ParseError::custom("second"));
        }
    }

    #[rstest]
    #[case(None, "failure")]
    #[case(Some(1), "failure")]
    #[case(Some(2), "failure")]
    #[case(Some(3), "recovered")]
    fn or_recovered(#[case] recovered: Option<usize>, #[case] expected: &str) {
        let failure = ParseFailure::new(ParseError::custom("failure"), 2);
        let recovered =
            recovered.map(|offset| ParseFailure::new(ParseError::custom("recovered"), offset));
        assert_eq!(
            failure.or_recovered(recovered).into_error(),
            ParseError::custom(expected)
        );
    }

    #[test]
    fn deepest_of_optionals() {
        let at = |offset| Some(ParseFailure::new(ParseError::custom("x"), offset));
        assert_eq!(deepest(None, None), None);
        assert_eq!(deepest(at(1), None), at(1));
        assert_eq!(deepest(None, at(2)), at(2));
        assert_eq!(deepest(at(1), at(3)), at(3));
    }
}
