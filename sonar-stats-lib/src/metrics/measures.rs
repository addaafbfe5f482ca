use super::metric_def;
use std::collections::HashMap;

/// Raw metric values retrieved for one project, keyed by catalog metric key.
///
/// Only metrics from the catalog can be stored, and metrics the server did not report are
/// simply absent. Nothing is defaulted here; that is left to each report view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Measures {
    values: HashMap<&'static str, String>,
}

impl Measures {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a value for `metric`.
    ///
    /// Returns `false` and stores nothing if the metric is not part of the catalog.
    pub fn insert(&mut self, metric: &str, value: impl Into<String>) -> bool {
        match metric_def::find(metric) {
            Some(def) => {
                let _ = self.values.insert(def.key, value.into());
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn get(&self, metric: &str) -> Option<&str> {
        self.values.get(metric).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
