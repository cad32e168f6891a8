//! Operators building new parsers out of existing ones.
mod accumulate;
mod alternative;
mod repeat;
mod sequence;

pub use accumulate::*;
pub use alternative::*;
pub use repeat::*;
pub use sequence::*;
