//! Routes for procedure resolution.

use axum::extract::{Path, Query, State};
use axum::{Json, Router, routing::get};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use guidepost_core::ids::{LanguageCode, ProcedureId};
use guidepost_procedure::application::query_handlers;
use guidepost_procedure::domain::steps::ResolvedProcedure;

use crate::error::ApiError;
use crate::state::AppState;

/// Query string for GET /{id}.
#[derive(Debug, Deserialize)]
pub struct ProcedureQuery {
    /// Language to resolve text in. Defaults to the canonical language.
    pub language: Option<String>,
}

/// Accepts only plain decimal digits, as clients send them.
fn parse_procedure_id(raw: &str) -> Result<ProcedureId, ApiError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::InvalidProcedureId(raw.to_owned()));
    }
    raw.parse()
        .map(ProcedureId)
        .map_err(|_| ApiError::InvalidProcedureId(raw.to_owned()))
}

/// GET /{id}?language=<code>
#[instrument(skip_all, fields(procedure_id = %raw_id))]
async fn get_procedure(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Query(query): Query<ProcedureQuery>,
) -> Result<Json<ResolvedProcedure>, ApiError> {
    let procedure_id = parse_procedure_id(&raw_id)?;
    let language = query.language.map(LanguageCode::new).unwrap_or_default();
    let correlation_id = Uuid::new_v4();

    info!(%correlation_id, %language, "resolving procedure");

    let procedure =
        query_handlers::resolve_procedure(procedure_id, &language, &*state.step_repository)
            .await?;

    Ok(Json(procedure))
}

/// Returns the router for procedure resolution.
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", get(get_procedure))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use guidepost_core::repository::StepRepository;
    use guidepost_test_support::{
        FailingStepRepository, InMemoryLanguageRepository, InMemoryStepRepository,
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app_state_with(step_repository: Arc<dyn StepRepository>) -> AppState {
        AppState::new(
            step_repository,
            Arc::new(InMemoryLanguageRepository::default()),
        )
    }

    fn job_procedure() -> InMemoryStepRepository {
        InMemoryStepRepository::builder()
            .procedure(1, 1)
            .question(1, "Do you have a job?", &[("Yes", Some(3)), ("No", Some(5))])
            .question_overlay(1, "french", "Avez-vous un travail ?")
            .answer_overlay(1, 0, "french", "Oui")
            .question(3, "Are you paid to do this work?", &[("Continue", Some(5))])
            .advice(5, None, "end", None)
            .build()
    }

    async fn get_json(state: AppState, uri: &str) -> (StatusCode, Value) {
        let app = router().with_state(state);
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body_bytes).unwrap())
    }

    #[tokio::test]
    async fn test_get_procedure_returns_resolved_graph() {
        // Arrange
        let state = app_state_with(Arc::new(job_procedure()));

        // Act
        let (status, json) = get_json(state, "/1").await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_object().unwrap().len(), 4);
        assert_eq!(json["start"], 1);
        assert_eq!(json["1"]["question"], "Do you have a job?");
        assert_eq!(
            json["5"],
            json!({ "kind": "advice", "forUser": null, "forFacilitator": "end", "link": null })
        );
    }

    #[tokio::test]
    async fn test_get_procedure_uses_requested_language() {
        // Arrange
        let state = app_state_with(Arc::new(job_procedure()));

        // Act
        let (status, json) = get_json(state, "/1?language=french").await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["1"]["question"], "Avez-vous un travail ?");
        assert_eq!(json["1"]["answers"][0]["answer"], "Oui");
        assert_eq!(json["1"]["answers"][1]["answer"], "No");
        assert_eq!(json["3"]["question"], "Are you paid to do this work?");
    }

    #[tokio::test]
    async fn test_get_procedure_with_unknown_language_returns_canonical_text() {
        // Arrange
        let state = app_state_with(Arc::new(job_procedure()));

        // Act
        let (_, canonical) = get_json(state.clone(), "/1").await;
        let (status, unknown) = get_json(state, "/1?language=klingon").await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(canonical, unknown);
    }

    #[tokio::test]
    async fn test_get_procedure_returns_404_for_unknown_procedure() {
        // Arrange
        let state = app_state_with(Arc::new(job_procedure()));

        // Act
        let (status, json) = get_json(state, "/99").await;

        // Assert
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "procedure_not_found");
    }

    #[tokio::test]
    async fn test_get_procedure_returns_400_for_non_numeric_id() {
        // Arrange
        let state = app_state_with(Arc::new(job_procedure()));

        // Act
        let (status, json) = get_json(state, "/abc").await;

        // Assert
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "invalid_procedure_id");
    }

    #[tokio::test]
    async fn test_get_procedure_returns_500_for_dangling_edge() {
        // Arrange
        let repo = InMemoryStepRepository::builder()
            .procedure(1, 1)
            .question(1, "Go?", &[("Yes", Some(404))])
            .build();
        let state = app_state_with(Arc::new(repo));

        // Act
        let (status, json) = get_json(state, "/1").await;

        // Assert
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "step_integrity_error");
    }

    #[tokio::test]
    async fn test_get_procedure_returns_500_when_repository_fails() {
        // Arrange
        let state = app_state_with(Arc::new(FailingStepRepository));

        // Act
        let (status, json) = get_json(state, "/1").await;

        // Assert
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "infrastructure_error");
    }

    #[test]
    fn test_parse_procedure_id_rejects_signs_and_overflow() {
        assert!(parse_procedure_id("12").is_ok());
        assert!(parse_procedure_id("-1").is_err());
        assert!(parse_procedure_id("+1").is_err());
        assert!(parse_procedure_id("").is_err());
        assert!(parse_procedure_id("99999999999").is_err());
    }
}
