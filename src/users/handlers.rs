use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tracing::{error, instrument};

use crate::response::{self, ApiError};
use crate::state::AppState;

use super::dto::{CreateUserRequest, ListQuery, PaginationMeta, UpdateUserRequest, UserListData};
use super::services::UserError;

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        let status = match &err {
            UserError::NotFound => StatusCode::NOT_FOUND,
            UserError::EmailExists | UserError::EmailInUse => StatusCode::CONFLICT,
            UserError::Validation(_) => StatusCode::BAD_REQUEST,
            UserError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %err, "user operation failed");
        }
        ApiError::new(status, err.to_string())
    }
}

fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::bad_request("Invalid user ID"))
}

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let (page, limit) = (q.page(), q.limit());
    let (users, total_pages, total_items) = state.users.list_users(page, limit).await?;

    let data = UserListData {
        users,
        pagination: PaginationMeta {
            current_page: page,
            per_page: limit,
            total_items,
            total_pages,
        },
    };
    Ok(response::ok(data, "Users fetched successfully"))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    let user = state.users.get_user(id).await?;
    Ok(response::ok(user, "User fetched successfully"))
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = payload.map_err(|e| UserError::Validation(e.to_string()))?;
    body.validate().map_err(UserError::Validation)?;

    let user = state.users.create_user(&body.name, &body.email).await?;
    Ok(response::ok(user, "User created successfully"))
}

#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    let Json(body) = payload.map_err(|e| UserError::Validation(e.to_string()))?;
    body.validate().map_err(UserError::Validation)?;

    let user = state.users.update_user(id, body.into_patch()).await?;
    Ok(response::ok(user, "User updated successfully"))
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    state.users.delete_user(id).await?;
    Ok(response::ok_message("User deleted successfully"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_expected_statuses() {
        let cases = [
            (UserError::NotFound, StatusCode::NOT_FOUND),
            (UserError::EmailExists, StatusCode::CONFLICT),
            (UserError::EmailInUse, StatusCode::CONFLICT),
            (
                UserError::Validation("name too short".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                UserError::Database(anyhow::anyhow!("pool timed out")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            let api: ApiError = err.into();
            assert_eq!(api.status, expected);
        }
    }

    #[test]
    fn not_found_message_matches_sentinel_text() {
        let api: ApiError = UserError::NotFound.into();
        assert_eq!(api.message, "user not found");
    }

    #[test]
    fn malformed_id_is_a_bad_request() {
        let err = parse_id("abc").unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Invalid user ID");
        assert_eq!(parse_id("17").unwrap(), 17);
    }
}
