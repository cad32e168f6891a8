//! Everything needed to write a grammar: `use simargs_combinator::prelude::*`.
pub use crate::accumulator::{fold_all, Accumulator};
pub use crate::combinator::*;
pub use crate::cursor::TokenCursor;
pub use crate::error::{ParseError, ParseFailure};
pub use crate::parser::{exhaustive, ParseResult, Parsed, Parser};
