//! Search history API handlers
//!
//! `GET`, `POST` and `DELETE` on `/api/searchhistory`. Every outcome is a JSON
//! body: the keyword list, `{ "success": true }`, or `{ "error": ... }`.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Query, State};
use serde_json::{Map, Value, json};

use crate::errors::ApiError;
use crate::server::AppState;

/// Query string accepted by `GET` and `DELETE`.
///
/// A repeated parameter resolves to its first occurrence; parameters other
/// than `user` and `keyword` are ignored.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct HistoryQuery {
    /// Owner of the history
    pub user: Option<String>,
    /// Keyword to delete; absent means clear all
    pub keyword: Option<String>,
}

impl HistoryQuery {
    /// Picks `user` and `keyword` out of decoded query pairs.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (name, value) in pairs {
            let slot = match name.as_str() {
                "user" => &mut query.user,
                "keyword" => &mut query.keyword,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        query
    }
}

/// JSON body accepted by `POST`.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct AddHistoryBody {
    /// Keyword to record
    pub keyword: Option<String>,
    /// Owner of the history
    pub user: Option<String>,
}

/// Reasons a `POST` body cannot be read.
#[derive(Debug, thiserror::Error)]
pub enum BodyError {
    /// Body is not JSON at all
    #[error("Request body is not valid JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    /// Body is JSON but not an object
    #[error("Request body must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    /// A known field holds something other than a string or null
    #[error("Field '{0}' must be a string")]
    NotAString(&'static str),
}

impl AddHistoryBody {
    /// Parses a `POST` body. Only a JSON object is accepted; a missing or
    /// `null` field reads as absent.
    ///
    /// # Errors
    /// - `BodyError::Syntax` - Body is not JSON
    /// - `BodyError::NotAnObject` - Body is an array, string, number, bool or null
    /// - `BodyError::NotAString` - `keyword` or `user` is not a string
    pub fn parse(bytes: &[u8]) -> Result<Self, BodyError> {
        let fields = match serde_json::from_slice::<Value>(bytes)? {
            Value::Object(fields) => fields,
            Value::Array(_) => return Err(BodyError::NotAnObject("an array")),
            Value::String(_) => return Err(BodyError::NotAnObject("a string")),
            Value::Number(_) => return Err(BodyError::NotAnObject("a number")),
            Value::Bool(_) => return Err(BodyError::NotAnObject("a boolean")),
            Value::Null => return Err(BodyError::NotAnObject("null")),
        };

        Ok(Self {
            keyword: string_field(&fields, "keyword")?,
            user: string_field(&fields, "user")?,
        })
    }
}

fn string_field(
    fields: &Map<String, Value>,
    name: &'static str,
) -> Result<Option<String>, BodyError> {
    match fields.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(_) => Err(BodyError::NotAString(name)),
    }
}

/// `GET /api/searchhistory?user=<u>`
///
/// # Errors
/// - `ApiError::Validation` - `user` missing or blank
/// - `ApiError::Internal` - Storage failed
pub async fn list_search_history(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<String>>, ApiError> {
    let query = HistoryQuery::from_pairs(pairs);
    let history = state
        .history_service
        .list(query.user.as_deref())
        .await
        .map_err(|e| ApiError::from_history("Failed to fetch search history", e))?;

    tracing::debug!("Listed {} search history entries", history.len());
    Ok(Json(history))
}

/// `POST /api/searchhistory` with body `{ keyword, user }`
///
/// The body is parsed inside the handler so that a malformed payload is
/// reported like any other internal failure.
///
/// # Errors
/// - `ApiError::Validation` - `keyword` or `user` missing or blank
/// - `ApiError::Internal` - Body unreadable or storage failed
pub async fn add_search_history(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Vec<String>>, ApiError> {
    let body = AddHistoryBody::parse(&body)
        .map_err(|e| ApiError::internal("Failed to add search history", &e))?;

    let history = state
        .history_service
        .add(body.user.as_deref(), body.keyword.as_deref())
        .await
        .map_err(|e| ApiError::from_history("Failed to add search history", e))?;

    tracing::debug!("Search history now holds {} entries", history.len());
    Ok(Json(history))
}

/// `DELETE /api/searchhistory?user=<u>[&keyword=<kw>]`
///
/// # Errors
/// - `ApiError::Validation` - `user` missing or blank
/// - `ApiError::Internal` - Storage failed
pub async fn delete_search_history(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Value>, ApiError> {
    let query = HistoryQuery::from_pairs(pairs);
    state
        .history_service
        .delete(query.user.as_deref(), query.keyword.as_deref())
        .await
        .map_err(|e| ApiError::from_history("Failed to delete search history", e))?;

    Ok(Json(json!({ "success": true })))
}
