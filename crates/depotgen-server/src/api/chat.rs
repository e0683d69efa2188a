use axum::{extract::rejection::JsonRejection, Extension, Json};
use serde::{Deserialize, Serialize};

use crate::middleware::{CurrentUser, RequestId};

use super::ApiError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ChatRequest {
    /// Must equal the signed-in user's id, as a JSON number.
    pub user_id: Option<serde_json::Value>,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub(super) struct ChatResponse {
    response: String,
}

pub(super) async fn chat(
    Extension(req_id): Extension<RequestId>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(body) = payload.map_err(|_| {
        ApiError::new(req_id.0.clone(), "bad_request", "request body must be a JSON object")
    })?;

    if body.user_id.as_ref().and_then(serde_json::Value::as_i64) != Some(user.id) {
        tracing::warn!(user_id = user.id, "chat request for another user rejected");
        return Err(ApiError::new(req_id.0, "unauthorized", "Unauthorized"));
    }

    Ok(Json(ChatResponse {
        response: format!("Echo: {}", body.message),
    }))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};

    use super::super::test_support::{body_json, send, sign_in, test_app};

    fn post_chat(cookie: &str, body: &serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/chat")
            .header(header::COOKIE, cookie)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn echoes_for_the_signed_in_user(pool: sqlx::PgPool) {
        let (user, cookie) = sign_in(&pool, "c-1").await;
        let app = test_app(pool, "http://127.0.0.1:9", false);

        let response = send(
            app,
            post_chat(
                &cookie,
                &serde_json::json!({"userId": user.id, "message": "hi"}),
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"response": "Echo: hi"})
        );
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn rejects_mismatched_user_id(pool: sqlx::PgPool) {
        let (user, cookie) = sign_in(&pool, "c-2").await;
        let app = test_app(pool, "http://127.0.0.1:9", false);

        let response = send(
            app.clone(),
            post_chat(
                &cookie,
                &serde_json::json!({"userId": user.id + 1, "message": "hi"}),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let as_string = send(
            app,
            post_chat(
                &cookie,
                &serde_json::json!({"userId": user.id.to_string(), "message": "hi"}),
            ),
        )
        .await;
        assert_eq!(as_string.status(), StatusCode::UNAUTHORIZED);
    }
}
