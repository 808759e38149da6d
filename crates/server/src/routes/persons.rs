use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;
use store::{Contact, NewContact};

/// List every contact
pub async fn list_persons(
    State(state): State<Arc<ServerState>>,
) -> ServerResult<Json<Vec<Contact>>> {
    let persons = state.store.list_all().await?;
    Ok(Json(persons))
}

/// Fetch one contact by id
///
/// Unknown ids answer 404 with an empty body. Malformed ids surface as a
/// server error.
pub async fn get_person(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> ServerResult<Json<Contact>> {
    match state.store.find_by_id(&id).await {
        Ok(Some(person)) => Ok(Json(person)),
        Ok(None) => {
            tracing::debug!(id = %id, "no person found");
            Err(ServerError::NotFound)
        }
        Err(err) => Err(err.into()),
    }
}

/// Delete one contact by id
pub async fn delete_person(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> ServerResult<StatusCode> {
    if state.store.delete_by_id(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ServerError::PersonNotFound)
    }
}

/// Create a contact
///
/// Missing fields, and bodies that are not a JSON object, are rejected here
/// before the store is touched; the store still runs the full schema check.
pub async fn create_person(
    State(state): State<Arc<ServerState>>,
    body: Result<Json<NewContact>, JsonRejection>,
) -> ServerResult<Json<Contact>> {
    let input = match body {
        Ok(Json(input)) => input,
        Err(rejection) => {
            tracing::debug!(reason = %rejection.body_text(), "unreadable create body");
            NewContact::default()
        }
    };
    if !input.has_required_fields() {
        return Err(ServerError::MissingFields);
    }
    let saved = state.store.create(input).await?;
    Ok(Json(saved))
}
