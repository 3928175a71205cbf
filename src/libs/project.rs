use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name of the sentinel project that always exists and cannot be deleted.
/// Entries orphaned by a project deletion are reassigned to it.
pub const DEFAULT_PROJECT_NAME: &str = "@Default";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub name: String,
}

impl Project {
    pub fn new(name: &str) -> Self {
        Project {
            id: Uuid::new_v4(),
            name: name.to_string(),
        }
    }

    pub fn is_default(&self) -> bool {
        self.name == DEFAULT_PROJECT_NAME
    }
}
