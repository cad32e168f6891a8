//! Backtracking parser combinators over command line tokens.
//!
//! A [`Parser`] consumes tokens from an immutable [`TokenCursor`] and either yields a value along with the advanced cursor, or a [`ParseFailure`].
//! Because the cursor is a plain value, a failed attempt leaves nothing to undo: alternation simply retries the next branch from the same cursor.
//!
//! A parser which gives up part way (an optional part, or a repetition which stops early) keeps the furthest failure it recovered from in its [`Parsed`] result.
//! When tokens are then left over, [`exhaustive`] reports that failure rather than only the leftover tokens.
//!
//! Option bags which may be given in any order are folded together through the [`Accumulator`] protocol, via [`accumulate`] and [`union`].
#![deny(missing_docs)]
mod accumulator;
#[allow(missing_docs)]
pub mod combinator;
mod cursor;
#[allow(missing_docs)]
mod error;
mod parser;
#[allow(missing_docs)]
pub mod prelude;

pub use accumulator::*;
pub use combinator::*;
pub use cursor::TokenCursor;
pub use error::{ParseError, ParseFailure};
pub use parser::{exhaustive, ParseResult, Parsed, Parser};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
