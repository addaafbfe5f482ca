use core::fmt::{Display, Formatter, Result as FmtResult};
use serde::Deserialize;
use std::sync::Arc;

/// A project tracked by the server
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct Project {
    key: Arc<str>,
    name: Arc<str>,
}

impl Project {
    #[must_use]
    pub fn new(key: impl AsRef<str>, name: impl AsRef<str>) -> Self {
        Self {
            key: Arc::from(key.as_ref()),
            name: Arc::from(name.as_ref()),
        }
    }

    /// The server-assigned unique key
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The display label
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Display for Project {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} ({})", self.name, self.key)
    }
}
