use crate::resolve::Resolver;

/// Looks variables up in the process environment.
///
/// Values that are not valid UTF-8 are treated as not found.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvResolver;

impl Resolver for EnvResolver {
    fn lookup(&self, name: &str) -> Option<String> {
        if name.is_empty() {
            return None;
        }
        std::env::var(name).ok()
    }
}
