#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::combinator::many_count;
use crate::error::{ParseError, ParseFailure};
use crate::parser::Parser;

/// Ordered choice: try each parser against the same cursor, yielding the first success.
///
/// When every branch fails, the failure which progressed furthest into the input is reported.
/// Among equally advanced failures, the first attempted branch wins.
/// A successful branch is returned as is; the failures of the branches tried before it are dropped.
pub fn alternative<T: 'static>(parsers: Vec<Parser<T>>) -> Parser<T> {
    let description = parsers
        .iter()
        .map(|p| p.description())
        .collect::<Vec<&str>>()
        .join(" | ");
    let expected = description.clone();

    Parser::new(description, move |cursor| {
        let mut best: Option<ParseFailure> = None;

        for parser in &parsers {
            match parser.parse(cursor) {
                Ok(success) => return Ok(success),
                Err(failure) => {
                    best = Some(match best {
                        Some(previous) => previous.furthest(failure),
                        None => failure,
                    });
                }
            }
        }

        let failure = best.unwrap_or_else(|| {
            ParseFailure::new(
                ParseError::could_not_interpret(expected.as_str(), cursor.peek()),
                cursor.position(),
            )
        });

        #[cfg(feature = "tracing_debug")]
        {
            debug!(
                "All {} alternatives failed at token {}.  Selected: {failure}",
                parsers.len(),
                cursor.position()
            );
        }

        Err(failure)
    })
}

/// At least `minimum` repetitions of an ordered choice between `parsers`.
pub fn alternative_many<T: 'static>(minimum: usize, parsers: Vec<Parser<T>>) -> Parser<Vec<T>> {
    many_count(minimum, alternative(parsers))
}
