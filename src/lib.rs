//! `simargs` parses simulator control command lines into strongly typed values.
//!
//! A command line is a flat list of tokens, such as:
//! ```console
//! $ simctl --json --state=booted boot --locale en_US --scale=75 -- launch com.example.app --verbose
//! ```
//! It is made of:
//! * *Configuration*: output and management flags, plus `--set <dir>`, in any order.
//! * An optional *query*, selecting the targets to act upon (ex: `--state=booted`, `iPhone 6`, a UDID).
//! * An optional *format*, naming the fields to describe each target with (ex: `--udid --name`).
//! * One or more *actions*, separated by `--`.
//!
//! The whole line must be understood; left over tokens are an error.
//!
//! # Usage
//! ```no_run
#![doc = include_str!("../demos/simctl.rs")]
//! ```
//!
//! A command line which cannot be parsed is reported with a caret under the offending token:
//! ```console
//! $ simctl install /tmp
//! Parse error: '/tmp' should be an application bundle, but isn't
//! install /tmp
//!         ^
//! usage: simctl [CONFIGURATION ...] [QUERY ...] [FORMAT ...] ACTION [-- ACTION ...]
//!        simctl [OUTPUT ...] help
//! ```
//!
//! # Grammar
//! Every rule is a [`simargs_combinator::Parser`], built in [`grammar`].
//! Alternatives are tried in order; when all of them fail, the failure which got furthest into the command line is reported.
//! Options which may be given piecemeal are merged via [`simargs_combinator::Accumulator`], which makes their order irrelevant.
//!
//! # Environment
//! Variables prefixed with `FBSIMCTL_CHILD_` are forwarded, without the prefix, to launched processes (see [`model::Cli::append_environment`]).
//!
//! # Features
//! * `tracing_debug`: Log parsing decisions via `tracing`.
mod environment;
pub mod grammar;
pub mod model;
mod parser;
pub mod report;

pub use environment::{subprocess_environment, ENVIRONMENT_PREFIX};
pub use parser::{CommandLineParser, ParseError};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
