use std::collections::HashMap;

use crate::resolve::Resolver;

/// Looks variables up in an explicit map.
#[derive(Debug, Clone, Default)]
pub struct MapResolver {
    vars: HashMap<String, String>,
}

impl MapResolver {
    pub fn new(vars: HashMap<String, String>) -> Self {
        Self { vars }
    }
}

impl Resolver for MapResolver {
    fn lookup(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapResolver {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
