use crate::resolve::{Resolver, SharedResolver};

/// Tries each resolver in order; the first one that finds the name wins.
#[derive(Clone, Default)]
pub struct ChainResolver {
    resolvers: Vec<SharedResolver>,
}

impl ChainResolver {
    pub fn new<I>(resolvers: I) -> Self
    where
        I: IntoIterator<Item = SharedResolver>,
    {
        Self {
            resolvers: resolvers.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

impl std::fmt::Debug for ChainResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainResolver")
            .field("len", &self.len())
            .finish()
    }
}

impl Resolver for ChainResolver {
    fn lookup(&self, name: &str) -> Option<String> {
        self.resolvers.iter().find_map(|r| r.lookup(name))
    }

    /// A chain is disabled only when its first member is: anything in front
    /// of a disabled resolver still gets to answer lookups.
    fn is_disabled(&self) -> bool {
        self.resolvers.first().is_some_and(|r| r.is_disabled())
    }
}
