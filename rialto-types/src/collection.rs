use core::fmt;
use serde::{Deserialize, Serialize};

/// A named document set inside a database.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Collection {
    /// Database name.
    pub database: String,
    /// Collection name within the database.
    pub name: String,
}

impl Collection {
    /// Convenience constructor.
    pub fn new(database: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            name: name.into(),
        }
    }

    /// Snapshot cache key prefix: `"{database}_{name}"`.
    #[must_use]
    pub fn cache_key(&self) -> String {
        format!("{}_{}", self.database, self.name)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.database, self.name)
    }
}

impl core::str::FromStr for Collection {
    type Err = crate::RialtoError;

    /// Parse the `database.name` display form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('.') {
            Some((db, name)) if !db.is_empty() && !name.is_empty() => Ok(Self::new(db, name)),
            _ => Err(crate::RialtoError::invalid_arg(format!(
                "collection must be `database.name`, got `{s}`"
            ))),
        }
    }
}
