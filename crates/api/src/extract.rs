//! Request extractors shared by all handlers.
//!
//! - [`DbSession`] hands each request its own database transaction.
//! - [`detached`] runs a write so it completes even if the client goes away.
//! - [`ValidJson`], [`ValidQuery`] and [`ValidPath`] wrap the stock axum
//!   extractors so decoding failures render through [`AppError`].

use std::future::Future;
use std::ops::{Deref, DerefMut};

use axum::extract::{FromRequest, FromRequestParts};
use axum::http::request::Parts;
use monarch_core::error::CoreError;
use monarch_db::DbConnection;
use sqlx::{Any, Transaction};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// A database transaction scoped to a single request.
///
/// Begun when the handler is entered. Changes become visible only after
/// [`DbSession::commit`]; if the handler returns without committing (an
/// early `?`, a 404, a panic) the transaction is dropped and rolled back,
/// and its connection goes back to the pool.
///
/// Derefs to the underlying connection, so repositories accept
/// `&mut session` directly. Writes move the session into [`detached`]:
///
/// ```ignore
/// async fn handler(session: DbSession) -> AppResult<Json<Project>> {
///     let project = detached(async move {
///         let mut session = session;
///         let project = ProjectRepo::create(&mut session, &input).await?;
///         session.commit().await?;
///         Ok::<_, AppError>(project)
///     })
///     .await?;
///     Ok(Json(project))
/// }
/// ```
pub struct DbSession(Transaction<'static, Any>);

impl DbSession {
    /// Commit everything written through this session.
    pub async fn commit(self) -> Result<(), sqlx::Error> {
        self.0.commit().await
    }
}

impl FromRequestParts<AppState> for DbSession {
    type Rejection = AppError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let tx = state.pool.begin().await?;
        Ok(DbSession(tx))
    }
}

impl Deref for DbSession {
    type Target = DbConnection;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for DbSession {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// Run `work` on its own task and wait for it.
///
/// hyper drops the handler future when the client disconnects. A spawned
/// task is not dropped with it, so a write and its commit run to the end
/// either way.
pub async fn detached<F, T>(work: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>> + Send + 'static,
    T: Send + 'static,
{
    tokio::spawn(work).await.map_err(|e| {
        AppError::Core(CoreError::Internal(format!("write task failed: {e}")))
    })?
}

/// `axum::Json` with decoding failures mapped to a 422 [`AppError`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ValidJson<T>(pub T);

/// `axum::extract::Query` with decoding failures mapped to a 422 [`AppError`].
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ValidQuery<T>(pub T);

/// `axum::extract::Path` with decoding failures mapped to a 422 [`AppError`].
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ValidPath<T>(pub T);
