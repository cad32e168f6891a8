//! Parsers for every value a command line is made of.
//!
//! The grammar is built entirely from [`simargs_combinator`] parts.
//! Each `of_*` function builds a fresh parser; build the top level [`of_cli`] once and re-use it across parses.
mod action;
mod command;
mod configuration;
mod launch;
mod primitive;
mod query;

pub use action::*;
pub use command::*;
pub use configuration::*;
pub use launch::*;
pub use primitive::*;
pub use query::*;
