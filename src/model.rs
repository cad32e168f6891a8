//! The values a command line parses into.
//!
//! Every type here is a plain, immutable record with structural equality.
//! Bags of options which may be specified piecemeal implement [`simargs_combinator::Accumulator`].

// Flag sets merge by union, which is both associative and commutative.
macro_rules! flag_accumulator {
    ($($flags:ty),* $(,)?) => {
        $(
            impl simargs_combinator::Accumulator for $flags {
                fn identity() -> Self {
                    <$flags>::empty()
                }

                fn append(self, other: Self) -> Self {
                    self | other
                }
            }
        )*
    };
}

mod action;
mod command;
mod configuration;
mod launch;
mod query;

pub use action::*;
pub use command::*;
pub use configuration::*;
pub use launch::*;
pub use query::*;
