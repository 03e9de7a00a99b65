use indexmap::IndexMap;

use super::{AssetChecker, CheckerRef};

/// Named checker instances available to settings files.
///
/// Registration order is preserved.
#[derive(Debug, Default, Clone)]
pub struct CheckerRegistry {
    checkers: IndexMap<String, CheckerRef>,
}

impl CheckerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a checker under its own name, replacing any previous one.
    pub fn register<C: AssetChecker + 'static>(&mut self, checker: C) -> CheckerRef {
        let checker = CheckerRef::new(checker);
        self.register_ref(checker.clone());
        checker
    }

    pub fn register_ref(&mut self, checker: CheckerRef) -> Option<CheckerRef> {
        self.checkers.insert(checker.name().to_string(), checker)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<CheckerRef> {
        self.checkers.get(name.trim()).cloned()
    }

    /// Resolve names in order. Unknown names become `None` entries so the
    /// engine can report them without dropping the rest of the list.
    #[must_use]
    pub fn resolve<S: AsRef<str>>(&self, names: &[S]) -> Vec<Option<CheckerRef>> {
        names
            .iter()
            .map(|name| {
                let found = self.get(name.as_ref());
                if found.is_none() {
                    tracing::debug!(
                        target: crate::LOG_TARGET,
                        checker = name.as_ref(),
                        "checker is not registered"
                    );
                }
                found
            })
            .collect()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.checkers.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.checkers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checkers.is_empty()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
