#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::accumulator::Accumulator;
use crate::error::{ParseError, ParseFailure};
use crate::parser::{Parsed, Parser};

/// A parser taking part in an [`accumulate`], along with the conversion of its value into the accumulated type.
pub struct Fragment<A> {
    parser: Parser<A>,
}

/// A fragment of `A`, converting each value of `parser` with `convert`.
pub fn fragment<T, A, F>(parser: Parser<T>, convert: F) -> Fragment<A>
where
    T: 'static,
    A: 'static,
    F: Fn(T) -> A + 'static,
{
    Fragment {
        parser: parser.map(convert),
    }
}

impl<T, A> From<Parser<T>> for Fragment<A>
where
    T: Into<A> + 'static,
    A: 'static,
{
    fn from(parser: Parser<T>) -> Self {
        fragment(parser, Into::into)
    }
}

/// Fold together fragments of `A`, in any order and any number of times.
///
/// The fragments need not parse into `A` themselves; each value is converted before being appended.
/// Scanning works as for [`union_count`].
pub fn accumulate<A>(minimum: usize, fragments: Vec<Fragment<A>>) -> Parser<A>
where
    A: Accumulator + 'static,
{
    scan(
        minimum,
        fragments
            .into_iter()
            .map(|fragment| fragment.parser)
            .collect(),
    )
}

/// Union of a set of flag parsers, any of which may be absent.
pub fn union<A>(parsers: Vec<Parser<A>>) -> Parser<A>
where
    A: Accumulator + 'static,
{
    scan(0, parsers)
}

/// Union of a set of flag parsers, requiring at least `minimum` flags in total.
///
/// Each round tries every parser from the start of the set, and consumes the first match.
/// Scanning stops when no parser matches or the input is exhausted.
/// Values are merged via [`Accumulator::append`] in the order they appear in the input, starting from [`Accumulator::identity`].
/// The furthest failure of the final round is kept as the recovered failure.
pub fn union_count<A>(minimum: usize, parsers: Vec<Parser<A>>) -> Parser<A>
where
    A: Accumulator + 'static,
{
    scan(minimum, parsers)
}

fn scan<A>(minimum: usize, parsers: Vec<Parser<A>>) -> Parser<A>
where
    A: Accumulator + 'static,
{
    let description = format!(
        "{{{}}}",
        parsers
            .iter()
            .map(|p| p.description())
            .collect::<Vec<&str>>()
            .join(", ")
    );
    let expected = description.clone();

    Parser::new(description, move |cursor| {
        let mut parsed = Parsed::new(A::identity(), cursor);
        let mut matched = 0;
        let mut last_round: Option<ParseFailure> = None;

        'rounds: while !parsed.cursor.is_empty() {
            last_round = None;

            for parser in &parsers {
                match parser.parse(parsed.cursor) {
                    Ok(next) => {
                        let progressed = next.cursor.position() != parsed.cursor.position();
                        parsed = Parsed {
                            value: parsed.value.append(next.value),
                            cursor: next.cursor,
                            recovered: parsed.recovered,
                        }
                        .recovering(next.recovered);
                        matched += 1;

                        // A fragment which consumed nothing would match forever.
                        if !progressed {
                            break 'rounds;
                        }

                        continue 'rounds;
                    }
                    Err(failure) => {
                        last_round = Some(match last_round {
                            Some(previous) => previous.furthest(failure),
                            None => failure,
                        });
                    }
                }
            }

            break;
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!(
                "Accumulated {matched} fragments of {expected}, stopping at token {}.",
                parsed.cursor.position()
            );
        }

        if matched < minimum {
            let failure = last_round.unwrap_or_else(|| {
                ParseFailure::new(
                    ParseError::could_not_interpret(expected.as_str(), parsed.cursor.peek()),
                    parsed.cursor.position(),
                )
            });
            return Err(failure.or_recovered(parsed.recovered));
        }

        Ok(parsed.recovering(last_round))
    })
}
