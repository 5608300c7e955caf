//! Status endpoint handlers

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sanbridge_core::status::Endpoint;
use std::sync::Arc;

use crate::state::AppState;

/// First battery attachment state
pub async fn bat1(State(state): State<Arc<AppState>>) -> Response {
    render(state, Endpoint::Bat1).await
}

/// Second battery attachment state
pub async fn bat2(State(state): State<Arc<AppState>>) -> Response {
    render(state, Endpoint::Bat2).await
}

/// Power adapter registration state
pub async fn adp1(State(state): State<Arc<AppState>>) -> Response {
    render(state, Endpoint::Adp1).await
}

/// Bridge version
pub async fn version(State(state): State<Arc<AppState>>) -> Response {
    render(state, Endpoint::Version).await
}

/// Render one endpoint body, or 404 while it is not published.
async fn render(state: Arc<AppState>, endpoint: Endpoint) -> Response {
    let ctx = state.context.read().await;
    match ctx.render_endpoint(endpoint) {
        Some(body) => (StatusCode::OK, body).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    async fn body_of(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), 1024)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_endpoints_404_until_published() {
        let state = AppState::new(Config::default());

        for handler_response in [
            bat1(State(state.clone())).await,
            bat2(State(state.clone())).await,
            adp1(State(state.clone())).await,
            version(State(state.clone())).await,
        ] {
            assert_eq!(handler_response.status(), StatusCode::NOT_FOUND);
        }
    }

    #[tokio::test]
    async fn test_endpoint_bodies_after_attach() {
        let state = AppState::new(Config::default());
        state.attach_all().await;

        let response = bat1(State(state.clone())).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_of(response).await, "attached: 1\n");

        let response = adp1(State(state.clone())).await;
        assert_eq!(body_of(response).await, "registered: 1\n");

        let response = version(State(state.clone())).await;
        assert_eq!(body_of(response).await, "driver: 0.1\n");
    }

    #[tokio::test]
    async fn test_failed_step_reads_as_absent_hardware() {
        let mut config = Config::default();
        config.firmware.fail_events = vec![0x08];
        let state = AppState::new(config);
        state.attach_all().await;

        let response = bat2(State(state.clone())).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_of(response).await, "attached: 0\n");

        let response = bat1(State(state.clone())).await;
        assert_eq!(body_of(response).await, "attached: 1\n");
    }

    #[tokio::test]
    async fn test_endpoints_404_again_after_detach() {
        let state = AppState::new(Config::default());
        state.attach_all().await;
        state.detach().await;

        let response = version(State(state.clone())).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
