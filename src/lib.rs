//! shline: shell-style command lines without a shell.
//!
//! This crate turns a raw command line such as `go "${hello} world" 'literal $x'`
//! into process arguments. It handles shell-like quoting (single and double
//! quotes, `\"` inside double quotes, quoted runs joined into one word,
//! recovery from unterminated quotes) and expands `$name` / `${name}`
//! references through a composable chain of variable sources. No shell is
//! spawned, and there is no globbing, piping or redirection.
//!
//! # Architecture
//!
//! - **[`parse`]**: Tokenizer producing a [`Line`] of [`Argument`]s made of literal/expandable [`Segment`]s, plus display quoting.
//! - **[`resolve`]**: The [`Resolver`] trait and its sources: env, map, chain, not-found, disabled, fail.
//! - **[`expand`]**: Expansion engine: resolves a `Line` into final argument strings.
//! - **[`command`]**: Copy-on-write [`Sh`] builder that wires the result into a `std::process::Command`.
//! - **[`config`]**: Configuration loading: embedded defaults + user overlay merge.
//! - **[`logging`]**: Logger setup and the shared command-log sink.

/// Copy-on-write command builder and process execution.
pub mod command;
/// Configuration types, loading, and overlay merge logic.
pub mod config;
/// Process wiring errors.
pub mod error;
/// Variable reference expansion over tokenized lines.
pub mod expand;
/// Logger initialization and command log sink.
pub mod logging;
/// Shell-style tokenizer, argument types, and display quoting.
pub mod parse;
/// Variable sources and their composition.
pub mod resolve;

pub use command::Sh;
pub use error::{Error, Result};
pub use parse::{Argument, Line, Segment};
pub use resolve::Resolver;

/// Tokenize `raw` and expand it against the process environment.
///
/// This is the main entry point for tests and simple usage.
/// For extra variables, other resolvers or execution, use [`Sh`].
pub fn split(raw: &str) -> Vec<String> {
    expand::resolve(&parse::parse(raw), &resolve::EnvResolver)
}
