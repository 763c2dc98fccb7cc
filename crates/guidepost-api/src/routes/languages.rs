//! Routes for language selection.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use tracing::instrument;

use guidepost_procedure::application::query_handlers::{self, LanguageView};

use crate::error::ApiError;
use crate::state::AppState;

/// GET /
#[instrument(skip_all)]
async fn list_languages(State(state): State<AppState>) -> Result<Json<Vec<LanguageView>>, ApiError> {
    let languages = query_handlers::list_languages(&*state.language_repository).await?;
    Ok(Json(languages))
}

/// Returns the router for language selection.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_languages))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use guidepost_core::ids::LanguageCode;
    use guidepost_core::repository::{LanguageRecord, LanguageRepository};
    use guidepost_test_support::{
        FailingLanguageRepository, InMemoryLanguageRepository, InMemoryStepRepository,
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn get_languages(language_repository: Arc<dyn LanguageRepository>) -> (StatusCode, Value) {
        let state = AppState::new(
            Arc::new(InMemoryStepRepository::builder().build()),
            language_repository,
        );
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();

        let response = router().with_state(state).oneshot(request).await.unwrap();

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body_bytes).unwrap())
    }

    #[tokio::test]
    async fn test_list_languages_returns_200_with_flags() {
        // Arrange
        let repo = InMemoryLanguageRepository::new(vec![LanguageRecord {
            id: LanguageCode::from("hungarian"),
            name: "Magyar".to_owned(),
            welcome: "Üdvözlöm.".to_owned(),
            flags: vec!["hu".to_owned()],
        }]);

        // Act
        let (status, json) = get_languages(Arc::new(repo)).await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            json!([{ "id": "hungarian", "name": "Magyar", "welcome": "Üdvözlöm.", "flags": ["hu"] }])
        );
    }

    #[tokio::test]
    async fn test_list_languages_returns_500_when_repository_fails() {
        let (status, json) = get_languages(Arc::new(FailingLanguageRepository)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "infrastructure_error");
    }
}
