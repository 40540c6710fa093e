//! Repository for the `projects` table.
//!
//! Every write is a single statement, so it never holds a read snapshot
//! that has to be upgraded to a write lock.

use chrono::Utc;
use monarch_core::types::DbId;

use crate::models::project::{CreateProject, Project, ProjectRow, UpdateProject};
use crate::{timestamp, DbConnection};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    ///
    /// `created_at` and `updated_at` are set to the same instant.
    pub async fn create(
        conn: &mut DbConnection,
        input: &CreateProject,
    ) -> Result<Project, sqlx::Error> {
        let now = timestamp::encode(Utc::now());
        let query = format!(
            "INSERT INTO projects (name, description, created_at, updated_at)
             VALUES ($1, $2, $3, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectRow>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(now)
            .fetch_one(conn)
            .await?
            .try_into()
    }

    /// Find a project by its ID.
    pub async fn find_by_id(
        conn: &mut DbConnection,
        id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, ProjectRow>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await?
            .map(Project::try_from)
            .transpose()
    }

    /// List one page of projects in primary-key order.
    ///
    /// Callers clamp `offset` and `limit`; see `monarch_core::pagination`.
    pub async fn list(
        conn: &mut DbConnection,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY id ASC LIMIT $1 OFFSET $2");
        sqlx::query_as::<_, ProjectRow>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(conn)
            .await?
            .into_iter()
            .map(Project::try_from)
            .collect()
    }

    /// Apply a partial update in one statement, returning the new row.
    ///
    /// Only fields present in `input` are written; a present `description`
    /// of `None` clears the column. `updated_at` becomes the later of now and
    /// its stored value, so it never moves backwards. Callers reject a null
    /// `name` first (see `UpdateProject::validate`). Returns `None` if no
    /// row has this ID.
    pub async fn update(
        conn: &mut DbConnection,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let now = timestamp::encode(Utc::now());
        let name = input.name.clone().flatten();
        let description = input.description.clone().flatten();
        let query = format!(
            "UPDATE projects SET
                name = CASE WHEN $1 THEN $2 ELSE name END,
                description = CASE WHEN $3 THEN $4 ELSE description END,
                updated_at = CASE WHEN updated_at > $5 THEN updated_at ELSE $5 END
             WHERE id = $6
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectRow>(&query)
            .bind(name.is_some())
            .bind(name)
            .bind(input.description.is_some())
            .bind(description)
            .bind(now)
            .bind(id)
            .fetch_optional(conn)
            .await?
            .map(Project::try_from)
            .transpose()
    }

    /// Permanently delete a project by ID. Returns `true` if a row was removed.
    pub async fn delete(conn: &mut DbConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
