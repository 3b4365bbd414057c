use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Uniform JSON wrapper every endpoint answers with.
/// `data` is omitted entirely when there is no payload.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub message: String,
}

pub fn ok<T: Serialize>(data: T, message: &str) -> (StatusCode, Json<ApiResponse<T>>) {
    (
        StatusCode::OK,
        Json(ApiResponse {
            success: true,
            data: Some(data),
            message: message.to_string(),
        }),
    )
}

pub fn ok_message(message: &str) -> (StatusCode, Json<ApiResponse<()>>) {
    (
        StatusCode::OK,
        Json(ApiResponse {
            success: true,
            data: None,
            message: message.to_string(),
        }),
    )
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiResponse::<()> {
            success: false,
            data: None,
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_carries_data() {
        let (status, Json(body)) = ok(serde_json::json!({"id": 1}), "fetched");
        assert_eq!(status, StatusCode::OK);
        let text = serde_json::to_string(&body).unwrap();
        assert_eq!(text, r#"{"success":true,"data":{"id":1},"message":"fetched"}"#);
    }

    #[test]
    fn empty_envelope_omits_data() {
        let (status, Json(body)) = ok_message("Service is healthy");
        assert_eq!(status, StatusCode::OK);
        let text = serde_json::to_string(&body).unwrap();
        assert_eq!(text, r#"{"success":true,"message":"Service is healthy"}"#);
    }

    #[test]
    fn error_envelope_is_unsuccessful() {
        let body = ApiResponse::<()> {
            success: false,
            data: None,
            message: "User not found".into(),
        };
        let text = serde_json::to_string(&body).unwrap();
        assert_eq!(text, r#"{"success":false,"message":"User not found"}"#);
    }
}
