use std::rc::Rc;

use crate::cursor::TokenCursor;
use crate::error::{deepest, ParseError, ParseFailure};

/// The outcome of running a parser: what was parsed, or the failure.
/// A failure never carries a cursor, so the caller always resumes from the one it passed in.
pub type ParseResult<'t, T> = Result<Parsed<'t, T>, ParseFailure>;

type Run<T> = dyn for<'t> Fn(TokenCursor<'t>) -> ParseResult<'t, T>;

/// A successful parse.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<'t, T> {
    /// The value produced.
    pub value: T,
    /// The cursor after the consumed tokens.
    pub cursor: TokenCursor<'t>,
    /// The furthest failure which was recovered from along the way.
    ///
    /// When an optional part stops early because of a bad token, this is what explains the tokens it left behind.
    pub recovered: Option<ParseFailure>,
}

impl<'t, T> Parsed<'t, T> {
    /// A success which recovered from nothing.
    pub fn new(value: T, cursor: TokenCursor<'t>) -> Self {
        Self {
            value,
            cursor,
            recovered: None,
        }
    }

    /// Note a failure which was recovered from, keeping whichever is furthest.
    pub fn recovering(self, failure: Option<ParseFailure>) -> Self {
        Self {
            recovered: deepest(self.recovered, failure),
            ..self
        }
    }

    /// Transform the value, keeping the cursor and recovered failure.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Parsed<'t, U> {
        Parsed {
            value: f(self.value),
            cursor: self.cursor,
            recovered: self.recovered,
        }
    }
}

/// A named, composable unit that consumes tokens and produces a `T`.
///
/// Parsers are pure functions of the cursor; building a grammar once and running it many times yields identical outcomes.
pub struct Parser<T> {
    description: Rc<str>,
    run: Rc<Run<T>>,
}

impl<T> Clone for Parser<T> {
    fn clone(&self) -> Self {
        Self {
            description: self.description.clone(),
            run: self.run.clone(),
        }
    }
}

impl<T> std::fmt::Debug for Parser<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("description", &self.description)
            .finish()
    }
}

impl<T: 'static> Parser<T> {
    /// Create a parser from a description and the function which runs it.
    pub fn new<F>(description: impl Into<String>, run: F) -> Self
    where
        F: for<'t> Fn(TokenCursor<'t>) -> ParseResult<'t, T> + 'static,
    {
        Self {
            description: Rc::from(description.into()),
            run: Rc::new(run),
        }
    }

    /// What this parser expects, used in error messages.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Run the parser against the cursor.
    pub fn parse<'t>(&self, cursor: TokenCursor<'t>) -> ParseResult<'t, T> {
        (self.run)(cursor)
    }

    /// Run the parser against a whole command line, requiring every token to be consumed.
    pub fn parse_tokens(&self, tokens: &[&str]) -> Result<T, ParseFailure> {
        let cursor = TokenCursor::new(tokens);
        let parsed = ensure_exhausted(self.parse(cursor)?)?;
        Ok(parsed.value)
    }

    /// Consume exactly one token, converting it with `f`.
    ///
    /// The token is not consumed when `f` rejects it.
    pub fn single<F>(description: impl Into<String>, f: F) -> Self
    where
        F: Fn(&str) -> Result<T, ParseError> + 'static,
    {
        let description: String = description.into();
        let expected = description.clone();
        Parser::new(description, move |cursor| match cursor.peek() {
            Some(token) => {
                let value = f(token).map_err(|e| ParseFailure::new(e, cursor.position()))?;
                let next = cursor
                    .advance()
                    .expect("internal error - a peeked cursor must advance");
                Ok(Parsed::new(value, next))
            }
            None => Err(ParseFailure::new(
                ParseError::could_not_interpret(expected.as_str(), None),
                cursor.position(),
            )),
        })
    }

    /// Match `literal` exactly (case sensitive), yielding `value`.
    pub fn of_string(literal: impl Into<String>, value: T) -> Self
    where
        T: Clone,
    {
        let literal: String = literal.into();
        let expected = format!("'{literal}'");
        Parser::single(expected.clone(), move |token| {
            if token == literal {
                Ok(value.clone())
            } else {
                Err(ParseError::could_not_interpret(expected.as_str(), Some(token)))
            }
        })
    }

    /// Consume nothing, yielding `value`.
    pub fn succeed(value: T) -> Self
    where
        T: Clone,
    {
        Parser::new("nothing", move |cursor| Ok(Parsed::new(value.clone(), cursor)))
    }

    /// Consume nothing, always failing with `error`.
    pub fn fail(error: ParseError) -> Self {
        Parser::new(error.to_string(), move |cursor| {
            Err(ParseFailure::new(error.clone(), cursor.position()))
        })
    }

    /// Rename this parser for error messages.
    pub fn described(self, description: impl Into<String>) -> Self {
        Self {
            description: Rc::from(description.into()),
            run: self.run,
        }
    }

    /// Transform the parsed value.
    pub fn map<U, F>(self, f: F) -> Parser<U>
    where
        U: 'static,
        F: Fn(T) -> U + 'static,
    {
        let description = self.description.to_string();
        Parser::new(description, move |cursor| Ok(self.parse(cursor)?.map(&f)))
    }

    /// Transform the parsed value with a conversion that may itself reject it.
    ///
    /// A rejection is reported at the position this parser started from, and nothing is consumed.
    pub fn fmap<U, F>(self, f: F) -> Parser<U>
    where
        U: 'static,
        F: Fn(T) -> Result<U, ParseError> + 'static,
    {
        let description = self.description.to_string();
        Parser::new(description, move |cursor| {
            let Parsed {
                value,
                cursor: next,
                recovered,
            } = self.parse(cursor)?;

            match f(value) {
                Ok(converted) => Ok(Parsed {
                    value: converted,
                    cursor: next,
                    recovered,
                }),
                Err(e) => Err(ParseFailure::new(e, cursor.position()).or_recovered(recovered)),
            }
        })
    }

    /// Yield `None` rather than failing.
    pub fn optional(self) -> Parser<Option<T>> {
        let description = format!("[{}]", self.description);
        Parser::new(description, move |cursor| match self.parse(cursor) {
            Ok(parsed) => Ok(parsed.map(Some)),
            Err(failure) => Ok(Parsed::new(None, cursor).recovering(Some(failure))),
        })
    }

    /// Yield `default` rather than failing.
    pub fn fallback(self, default: T) -> Self
    where
        T: Clone,
    {
        let description = format!("[{}]", self.description);
        Parser::new(description, move |cursor| match self.parse(cursor) {
            Ok(parsed) => Ok(parsed),
            Err(failure) => Ok(Parsed::new(default.clone(), cursor).recovering(Some(failure))),
        })
    }
}

/// Require `parser` to account for every remaining token.
///
/// When tokens are left over because a nested parser stopped at (or beyond) them, that parser's failure is reported.
/// Otherwise the leftover tokens are reported as [`ParseError::Exhausted`].
pub fn exhaustive<T: 'static>(parser: Parser<T>) -> Parser<T> {
    let description = parser.description().to_string();
    Parser::new(description, move |cursor| ensure_exhausted(parser.parse(cursor)?))
}

fn ensure_exhausted<T>(parsed: Parsed<'_, T>) -> ParseResult<'_, T> {
    let remainder = parsed.cursor;

    if remainder.is_empty() {
        return Ok(parsed);
    }

    match parsed.recovered {
        Some(recovered) if recovered.offset() >= remainder.position() => Err(recovered),
        _ => Err(ParseFailure::new(
            ParseError::Exhausted(remainder.remaining().iter().map(|t| t.to_string()).collect()),
            remainder.position(),
        )),
    }
}
