use crate::error::{ParseError, ParseFailure};
use crate::parser::{Parsed, Parser};

/// Repeat `parser` until it fails, requiring at least `minimum` successes.
///
/// The final failing attempt consumes nothing; it is kept as the recovered failure.
pub fn many_count<T: 'static>(minimum: usize, parser: Parser<T>) -> Parser<Vec<T>> {
    let description = format!("{}{{{minimum},}}", parser.description());
    Parser::new(description, move |cursor| {
        let mut parsed = Parsed::new(Vec::default(), cursor);

        loop {
            match parser.parse(parsed.cursor) {
                Ok(next) => {
                    let progressed = next.cursor.position() != parsed.cursor.position();
                    parsed.value.push(next.value);
                    parsed.cursor = next.cursor;
                    parsed = parsed.recovering(next.recovered);

                    // A success which consumed nothing would match forever.
                    if !progressed {
                        break;
                    }
                }
                Err(failure) => {
                    if parsed.value.len() < minimum {
                        return Err(failure.or_recovered(parsed.recovered));
                    }

                    parsed = parsed.recovering(Some(failure));
                    break;
                }
            }
        }

        if parsed.value.len() < minimum {
            return Err(too_few(
                parser.description(),
                minimum,
                parsed.value.len(),
                parsed.cursor.position(),
            )
            .or_recovered(parsed.recovered));
        }

        Ok(parsed)
    })
}

/// Repeat `parser` any number of times.
pub fn many<T: 'static>(parser: Parser<T>) -> Parser<Vec<T>> {
    many_count(0, parser)
}

/// Repeat `parser` with `separator` between each repetition, requiring at least `minimum` successes.
///
/// A trailing separator which is not followed by a match ends the repetition, and is left unconsumed.
/// The failed match after it is kept as the recovered failure.
pub fn many_sep_count<T, S>(minimum: usize, parser: Parser<T>, separator: Parser<S>) -> Parser<Vec<T>>
where
    T: 'static,
    S: 'static,
{
    let description = format!(
        "{} [{} {} ...]",
        parser.description(),
        separator.description(),
        parser.description()
    );
    Parser::new(description, move |cursor| {
        let mut parsed = match parser.parse(cursor) {
            Ok(first) => first.map(|value| vec![value]),
            Err(failure) => {
                if minimum == 0 {
                    return Ok(Parsed::new(Vec::default(), cursor).recovering(Some(failure)));
                }

                return Err(failure);
            }
        };
        let mut last_failure: Option<ParseFailure> = None;

        loop {
            // Running out of separators is the normal end of the repetition.
            let after_separator = match separator.parse(parsed.cursor) {
                Ok(separated) => separated.cursor,
                Err(_) => break,
            };

            match parser.parse(after_separator) {
                Ok(next) => {
                    parsed.value.push(next.value);
                    parsed.cursor = next.cursor;
                    parsed = parsed.recovering(next.recovered);
                }
                Err(failure) => {
                    last_failure.replace(failure);
                    break;
                }
            }
        }

        if parsed.value.len() < minimum {
            return Err(last_failure.unwrap_or_else(|| {
                too_few(
                    parser.description(),
                    minimum,
                    parsed.value.len(),
                    parsed.cursor.position(),
                )
            })
            .or_recovered(parsed.recovered));
        }

        Ok(parsed.recovering(last_failure))
    })
}

/// Repeat `parser` until `terminator` would match or the input is exhausted.
///
/// The terminator is only looked ahead at; it is left for the caller to consume.
pub fn many_till<T, S>(terminator: Parser<S>, parser: Parser<T>) -> Parser<Vec<T>>
where
    T: 'static,
    S: 'static,
{
    let description = format!(
        "{} ... [{}]",
        parser.description(),
        terminator.description()
    );
    Parser::new(description, move |cursor| {
        let mut parsed = Parsed::new(Vec::default(), cursor);

        while !parsed.cursor.is_empty() && terminator.parse(parsed.cursor).is_err() {
            let next = parser
                .parse(parsed.cursor)
                .map_err(|failure| failure.or_recovered(parsed.recovered.clone()))?;
            let progressed = next.cursor.position() != parsed.cursor.position();
            parsed.value.push(next.value);
            parsed.cursor = next.cursor;
            parsed = parsed.recovering(next.recovered);

            if !progressed {
                break;
            }
        }

        Ok(parsed)
    })
}

fn too_few(description: &str, minimum: usize, provided: usize, offset: usize) -> ParseFailure {
    ParseFailure::new(
        ParseError::custom(format!(
            "too few values provided for '{description}' (provided={provided}, expected={minimum})."
        )),
        offset,
    )
}
