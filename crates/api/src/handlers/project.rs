//! Handlers for the `/projects` resource.
//!
//! Writes run through [`detached`], so a client that disconnects mid-request
//! cannot roll back a write that has already started.


use axum::Json;
use monarch_core::error::CoreError;
use monarch_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT};
use monarch_core::types::DbId;
use monarch_db::models::project::{CreateProject, Project, UpdateProject};
use monarch_db::repositories::ProjectRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::{detached, DbSession, ValidJson, ValidPath, ValidQuery};
use crate::query::PaginationParams;

/// Body returned by a successful delete.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub ok: bool,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Project",
        id,
    })
}

/// POST /projects/
pub async fn create(
    session: DbSession,
    ValidJson(input): ValidJson<CreateProject>,
) -> AppResult<Json<Project>> {
    let project = detached(async move {
        let mut session = session;
        let project = ProjectRepo::create(&mut session, &input).await?;
        session.commit().await?;
        Ok::<_, AppError>(project)
    })
    .await?;
    tracing::info!(project_id = project.id, "Project created");
    Ok(Json(project))
}

/// GET /projects/?offset=&limit=
pub async fn list(
    mut session: DbSession,
    ValidQuery(params): ValidQuery<PaginationParams>,
) -> AppResult<Json<Vec<Project>>> {
    let offset = clamp_offset(params.offset);
    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT);
    let projects = ProjectRepo::list(&mut session, offset, limit).await?;
    Ok(Json(projects))
}

/// GET /projects/{id}
pub async fn get_by_id(
    mut session: DbSession,
    ValidPath(id): ValidPath<DbId>,
) -> AppResult<Json<Project>> {
    let project = ProjectRepo::find_by_id(&mut session, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(project))
}

/// PATCH /projects/{id}
///
/// Only fields present in the body are applied; `updated_at` is refreshed
/// even when the body is empty. The merge is one `UPDATE`, so concurrent
/// patches serialize in the database and the last writer wins.
pub async fn update(
    session: DbSession,
    ValidPath(id): ValidPath<DbId>,
    ValidJson(input): ValidJson<UpdateProject>,
) -> AppResult<Json<Project>> {
    input.validate()?;
    let empty_patch = input.is_empty();

    let project = detached(async move {
        let mut session = session;
        let project = ProjectRepo::update(&mut session, id, &input)
            .await?
            .ok_or_else(|| not_found(id))?;
        session.commit().await?;
        Ok::<_, AppError>(project)
    })
    .await?;

    tracing::info!(project_id = id, empty_patch, "Project updated");
    Ok(Json(project))
}

/// DELETE /projects/{id}
pub async fn delete(
    session: DbSession,
    ValidPath(id): ValidPath<DbId>,
) -> AppResult<Json<DeleteResponse>> {
    detached(async move {
        let mut session = session;
        if !ProjectRepo::delete(&mut session, id).await? {
            return Err(not_found(id));
        }
        session.commit().await?;
        Ok::<_, AppError>(())
    })
    .await?;
    tracing::info!(project_id = id, "Project deleted");
    Ok(Json(DeleteResponse { ok: true }))
}
