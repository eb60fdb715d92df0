//! Curriculum CRUD handlers.
//!
//! One generic handler set serves all six entity kinds; the [`HasTable`]
//! bound picks the right repository out of the application state. Every
//! handler is a thin pass-through: request validation happens at
//! deserialization, outcomes map to status codes through [`AppError`].

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{de::DeserializeOwned, Serialize};

use gremio_core::table::{RowKey, TableEntity, TableError};

use crate::{
    handlers::AppError,
    state::{AppState, HasTable},
};

/// Create a new record (POST /api/<kind>).
///
/// The identity is server-assigned: any caller-supplied row key or version
/// is ignored. Returns the record with its new key and version populated.
pub async fn create<E>(
    State(state): State<AppState>,
    Json(mut entity): Json<E>,
) -> Result<impl IntoResponse, AppError>
where
    E: TableEntity + Serialize + DeserializeOwned,
    AppState: HasTable<E>,
{
    let identity = entity.identity_mut();
    identity.row_key = None;
    identity.version = None;

    state.table().create(&mut entity).await?;

    if let Some(row_key) = &entity.identity().row_key {
        tracing::info!(kind = E::KIND, %row_key, "Created record");
    }

    Ok((StatusCode::CREATED, Json(entity)))
}

/// List every record of a kind (GET /api/<kind>).
pub async fn list<E>(State(state): State<AppState>) -> Result<Json<Vec<E>>, AppError>
where
    E: TableEntity + Serialize,
    AppState: HasTable<E>,
{
    let records = state.table().get_all().await?;
    Ok(Json(records))
}

/// Get a single record by row key (GET /api/<kind>/{row_key}).
///
/// Only the row identifier is supplied, so the lookup uses the repository's
/// cross-partition fallback.
pub async fn get_one<E>(
    State(state): State<AppState>,
    Path(row_key): Path<String>,
) -> Result<Json<E>, AppError>
where
    E: TableEntity + Serialize,
    AppState: HasTable<E>,
{
    let row_key = RowKey::parse(row_key)?;

    match state.table().get(&row_key).await? {
        Some(entity) => Ok(Json(entity)),
        None => Err(TableError::NotFound {
            kind: E::KIND,
            row_key: row_key.to_string(),
        }
        .into()),
    }
}

/// Update a record by row key (PUT /api/<kind>/{row_key}).
///
/// The body carries the domain fields and the last-seen version; the row key
/// in the path wins over any key in the body. A stale version is rejected as
/// a conflict. Returns the record with its re-stamped version.
pub async fn update<E>(
    State(state): State<AppState>,
    Path(row_key): Path<String>,
    Json(mut entity): Json<E>,
) -> Result<Json<E>, AppError>
where
    E: TableEntity + Serialize + DeserializeOwned,
    AppState: HasTable<E>,
{
    let row_key = RowKey::parse(row_key)?;
    entity.identity_mut().row_key = Some(row_key.clone());

    state.table().update(&mut entity).await?;

    tracing::info!(kind = E::KIND, %row_key, "Updated record");

    Ok(Json(entity))
}

/// Delete a record by the full key pair
/// (DELETE /api/<kind>/{partition_key}/{row_key}).
///
/// Idempotent: deleting an absent row reports `deleted: false` rather than
/// an error.
pub async fn remove<E>(
    State(state): State<AppState>,
    Path((partition_key, row_key)): Path<(String, String)>,
) -> Result<Json<serde_json::Value>, AppError>
where
    E: TableEntity,
    AppState: HasTable<E>,
{
    let row_key = RowKey::parse(row_key)?;
    let deleted = state.table().delete(&partition_key, &row_key).await?;

    if deleted {
        tracing::info!(kind = E::KIND, %row_key, "Deleted record");
    }

    Ok(Json(serde_json::json!({ "deleted": deleted })))
}
