use crate::resolve::Resolver;

/// Never finds a variable.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotFoundResolver;

impl Resolver for NotFoundResolver {
    fn lookup(&self, _name: &str) -> Option<String> {
        None
    }
}

/// Answers every lookup with the reference itself, `${name}`, and marks
/// expansion as disabled so lines render verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledResolver;

impl Resolver for DisabledResolver {
    fn lookup(&self, name: &str) -> Option<String> {
        Some(format!("${{{name}}}"))
    }

    fn is_disabled(&self) -> bool {
        true
    }
}

/// Raised (as a panic) by [`FailResolver`] for a variable no source defines.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("can not find value to expand '${{{name}}}'")]
pub struct UnresolvedVariable {
    pub name: String,
}

/// Panics on every lookup.
///
/// A missing variable under this resolver aborts the whole operation; it is
/// not reported through `Result`. Callers that want missing variables to
/// expand to nothing must not use it.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailResolver;

impl Resolver for FailResolver {
    fn lookup(&self, name: &str) -> Option<String> {
        let err = UnresolvedVariable {
            name: name.to_string(),
        };
        log::error!("{err}");
        panic!("{err}");
    }
}
