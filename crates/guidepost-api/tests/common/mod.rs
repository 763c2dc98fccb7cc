//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use guidepost_api::build_router;
use guidepost_api::state::AppState;
use guidepost_store::pg_language_repository::PgLanguageRepository;
use guidepost_store::pg_step_repository::PgStepRepository;

/// Build the full app router backed by the PostgreSQL repositories.
pub fn build_test_app(pool: PgPool) -> Router {
    let app_state = AppState::new(
        Arc::new(PgStepRepository::new(pool.clone())),
        Arc::new(PgLanguageRepository::new(pool)),
    );
    build_router(app_state)
}

/// Seeds languages and a small procedure modelled on the production seed:
/// 1 "Do you have a job?" {Yes -> 3, Not sure -> 2, No -> 5},
/// 2 {Yes -> 3, No -> 5}, 3 {Yes -> 5, No -> 11}, 11 advice -> 5,
/// 5 facilitator-only advice. French covers everything except answer
/// "Not sure".
pub async fn seed_procedure(pool: &PgPool) {
    sqlx::raw_sql(
        r"
        INSERT INTO languages (id, english_name, name, welcome, flags) VALUES
            (1, 'english', 'English', 'Hello, I''m here to help you.', 'gb,us,ca'),
            (2, 'french', 'Français', 'Bonjour, Je suis là pour vous aider.', 'bj,ci,ga'),
            (3, 'hungarian', 'Magyar', 'Üdvözlöm.', 'hu');

        INSERT INTO steps (id, kind) VALUES (1, 0), (2, 0), (3, 0), (5, 1), (11, 1);
        INSERT INTO procedures (id, name, start) VALUES (1, 'default', 1);

        INSERT INTO questions (id, english_text, procedure) VALUES
            (1, 'Do you have a job?', 1),
            (2, 'Does someone ask you to do things for them, and you are expected to do it?', 1),
            (3, 'Are you paid to do this work?', 1);
        INSERT INTO answers (id, english_text, answer_to, next_step) VALUES
            (1, 'Yes', 1, 3),
            (2, 'Not sure', 1, 2),
            (3, 'No', 1, 5),
            (4, 'Yes', 2, 3),
            (5, 'No', 2, 5),
            (6, 'Yes', 3, 5),
            (7, 'No', 3, 11);
        INSERT INTO advices (id, english_text, facilitator_advice, next_step, procedure) VALUES
            (5, NULL, 'end', NULL, 1),
            (11, 'You have the right to be paid for any work that you do.', 'Explain wage rights', 5, 1);

        INSERT INTO question_texts (text, language, question) VALUES
            ('Avez-vous un travail ?', 2, 1),
            ('Quelqu''un vous demande-t-il de faire des choses ?', 2, 2),
            ('Êtes-vous payé pour faire ce travail ?', 2, 3);
        INSERT INTO answer_texts (text, language, answer) VALUES
            ('Oui', 2, 1), ('Non', 2, 3),
            ('Oui', 2, 4), ('Non', 2, 5),
            ('Oui', 2, 6), ('Non', 2, 7);
        INSERT INTO advice_texts (text, language, advice) VALUES
            ('Vous avez le droit d''être payé pour n''importe quel travail que vous réalisez.', 2, 11);
        ",
    )
    .execute(pool)
    .await
    .unwrap();
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
