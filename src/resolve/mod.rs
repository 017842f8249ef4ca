//! Variable resolvers: where `$name` / `${name}` values come from.
//!
//! Each source is a small [`Resolver`] implementation. They compose through
//! [`chain()`], which tries its members in order, so precedence such as
//! "explicit overrides first, then the process environment" is expressed by
//! ordering rather than by per-call-site lookup code.

/// Ordered composition of resolvers.
pub mod chain;
/// Process environment lookups.
pub mod env;
/// Resolvers with a fixed answer: not-found, disabled, and fail-on-missing.
pub mod fixed;
/// Lookups in an explicit name → value map.
pub mod map;

use std::collections::HashMap;
use std::sync::Arc;

pub use chain::ChainResolver;
pub use env::EnvResolver;
pub use fixed::{DisabledResolver, FailResolver, NotFoundResolver, UnresolvedVariable};
pub use map::MapResolver;

/// Maps a variable name to its value.
pub trait Resolver: Send + Sync {
    /// Look up `name`. `None` means the variable is not defined here; an
    /// empty string is a defined, empty value.
    fn lookup(&self, name: &str) -> Option<String>;

    /// Whether this resolver turns expansion off entirely.
    ///
    /// The expansion engine checks this once per line and, when set, emits
    /// every segment's text verbatim without scanning for references.
    fn is_disabled(&self) -> bool {
        false
    }
}

/// A resolver shared between builders and chains.
pub type SharedResolver = Arc<dyn Resolver>;

impl<R: Resolver + ?Sized> Resolver for Arc<R> {
    fn lookup(&self, name: &str) -> Option<String> {
        (**self).lookup(name)
    }

    fn is_disabled(&self) -> bool {
        (**self).is_disabled()
    }
}

/// Resolve from the process environment.
pub fn env() -> SharedResolver {
    Arc::new(EnvResolver)
}

/// Resolve from a fixed map.
pub fn map(vars: HashMap<String, String>) -> SharedResolver {
    Arc::new(MapResolver::new(vars))
}

/// Never find anything; every reference expands to the empty string.
pub fn not_found() -> SharedResolver {
    Arc::new(NotFoundResolver)
}

/// Disable expansion: references are left exactly as written.
pub fn disabled() -> SharedResolver {
    Arc::new(DisabledResolver)
}

/// Panic on every lookup. Place it last in a [`chain()`] to abort when a
/// variable is missing from every other source:
///
/// ```
/// let strict = shline::resolve::chain([shline::resolve::env(), shline::resolve::fail()]);
/// # let _ = strict;
/// ```
pub fn fail() -> SharedResolver {
    Arc::new(FailResolver)
}

/// Try each resolver in order and return the first value found.
pub fn chain<I>(resolvers: I) -> SharedResolver
where
    I: IntoIterator<Item = SharedResolver>,
{
    Arc::new(ChainResolver::new(resolvers))
}
