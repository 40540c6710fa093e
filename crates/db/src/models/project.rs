//! Project entity model and DTOs.

use monarch_core::error::CoreError;
use monarch_core::patch::present;
use monarch_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::timestamp;

/// A project as returned by every project endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A raw row from the `projects` table, timestamps still in storage form.
#[derive(Debug, FromRow)]
pub struct ProjectRow {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<ProjectRow> for Project {
    type Error = sqlx::Error;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        Ok(Project {
            id: row.id,
            name: row.name,
            description: row.description,
            created_at: timestamp::decode(&row.created_at)?,
            updated_at: timestamp::decode(&row.updated_at)?,
        })
    }
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateProject {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// DTO for partially updating a project.
///
/// Omitted keys are `None` and leave the column untouched. An explicit
/// `null` is `Some(None)`: it clears `description` and is rejected for `name`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateProject {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
}

impl UpdateProject {
    /// True when the payload carried no fields at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }

    /// Reject patches the `projects` table cannot hold.
    pub fn validate(&self) -> Result<(), CoreError> {
        if matches!(self.name, Some(None)) {
            return Err(CoreError::Validation("name must not be null".into()));
        }
        Ok(())
    }
}
