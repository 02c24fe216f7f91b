//! End-to-end session lifecycle through the command handlers.

#![allow(clippy::unwrap_used, clippy::panic)]

use std::sync::Arc;

use larder::cli::{Command, MealsCommand, PageArgs, RecipesCommand};
use larder::commands::run;
use larder::{CliError, connect};
use larder_application::{ApplicationError, SessionContext};
use larder_domain::{ClientSettings, SessionEvent, SessionState};
use larder_infrastructure::{FileCredentialStore, TokioFileSystem};
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Harness {
    server: MockServer,
    _dir: TempDir,
    credentials: std::path::PathBuf,
    settings: ClientSettings,
}

impl Harness {
    async fn start() -> Self {
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();
        let credentials = dir.path().join("credentials.json");
        let settings = ClientSettings::with_api_url(format!("{}/api/v1", server.uri()));
        Self {
            server,
            _dir: dir,
            credentials,
            settings,
        }
    }

    async fn session(&self) -> SessionContext {
        let store = FileCredentialStore::new(TokioFileSystem::new(), self.credentials.clone());
        SessionContext::restore(Arc::new(store)).await
    }
}

async fn run_to_string(
    api: &larder_application::LarderApi<larder_infrastructure::ReqwestTransport>,
    command: Command,
) -> Result<String, CliError> {
    let mut out = Vec::new();
    run(api, command, &mut out).await?;
    Ok(String::from_utf8(out).unwrap())
}

fn page() -> PageArgs {
    PageArgs {
        page: 1,
        limit: None,
    }
}

#[tokio::test]
async fn test_login_then_expiry_clears_stored_credential() {
    let harness = Harness::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .and(body_string("username=cook%40example.com&password=secret1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": "tok-abc", "token_type": "bearer"})),
        )
        .expect(1)
        .mount(&harness.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/meals"))
        .and(header("authorization", "Bearer tok-abc"))
        .and(query_param("skip", "0"))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 3,
            "name": "Shakshuka",
            "user_id": 1,
            "recipe_count": 2,
            "average_rating": 7.5,
            "created_at": "2024-03-01T09:30:00"
        }])))
        .expect(1)
        .mount(&harness.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users/me"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"detail": "Could not validate credentials"})),
        )
        .expect(1)
        .mount(&harness.server)
        .await;

    let session = harness.session().await;
    let mut events = session.subscribe();
    let api = connect(&harness.settings, session.clone()).unwrap();

    let output = run_to_string(
        &api,
        Command::Login {
            email: " cook@example.com ".to_string(),
            password: "secret1".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(output, "Signed in as cook@example.com.\n");
    assert_eq!(events.recv().await.unwrap(), SessionEvent::SignedIn);
    assert!(harness.credentials.exists());

    let output = run_to_string(
        &api,
        Command::Meals(MealsCommand::List {
            search: None,
            sort: None,
            page: page(),
        }),
    )
    .await
    .unwrap();
    assert_eq!(output, "#3 Shakshuka (2 recipes, avg 7.5)\n");

    let error = run_to_string(&api, Command::Whoami).await.unwrap_err();
    match error {
        CliError::Application(ApplicationError::Api(api_error)) => {
            assert_eq!(api_error.status_code, 401);
            assert_eq!(api_error.message, "Could not validate credentials");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(
        events.recv().await.unwrap(),
        SessionEvent::Expired {
            redirect_to: "/login".to_string()
        }
    );
    assert_eq!(session.state().await, SessionState::Anonymous);
    assert!(!harness.credentials.exists());

    // No request is made without a session.
    let error = run_to_string(&api, Command::Whoami).await.unwrap_err();
    assert!(matches!(
        error,
        CliError::Application(ApplicationError::NotSignedIn)
    ));
}

#[tokio::test]
async fn test_stored_credential_survives_restart() {
    let harness = Harness::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": "tok-keep", "token_type": "bearer"})),
        )
        .mount(&harness.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users/me"))
        .and(header("authorization", "Bearer tok-keep"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "username": "cook",
            "email": "cook@example.com",
            "is_active": true,
            "created_at": "2024-03-01T09:30:00Z"
        })))
        .expect(1)
        .mount(&harness.server)
        .await;

    {
        let api = connect(&harness.settings, harness.session().await).unwrap();
        run_to_string(
            &api,
            Command::Login {
                email: "cook@example.com".to_string(),
                password: "secret1".to_string(),
            },
        )
        .await
        .unwrap();
    }

    let api = connect(&harness.settings, harness.session().await).unwrap();
    let output = run_to_string(&api, Command::Whoami).await.unwrap();
    assert_eq!(output, "cook <cook@example.com> (id 1)\n");

    let output = run_to_string(&api, Command::Logout).await.unwrap();
    assert_eq!(output, "Signed out.\n");
    assert!(!harness.credentials.exists());
}

#[tokio::test]
async fn test_invalid_recipe_is_rejected_before_any_request() {
    let harness = Harness::start().await;
    let api = connect(&harness.settings, harness.session().await).unwrap();

    let error = run_to_string(
        &api,
        Command::Recipes(RecipesCommand::Add {
            meal_id: 3,
            rating: "eleven".to_string(),
            notes: String::new(),
            ingredients: Vec::new(),
        }),
    )
    .await
    .unwrap_err();

    match error {
        CliError::Invalid(message) => assert_eq!(
            message,
            "rating: Rating must be between 1 and 10; ingredients: Add at least one ingredient"
        ),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(harness.server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_recipe_edit_keeps_lines_and_clears_notes() {
    let harness = Harness::start().await;
    let stored = json!({
        "id": 9,
        "meal_id": 2,
        "rating": 6.0,
        "notes": "too salty",
        "ingredients": [{"id": 1, "recipe_id": 9, "ingredient_id": 4, "ingredient_name": "Salt", "quantity": 5.0, "unit": "g"}],
        "created_at": "2024-03-01T09:30:00"
    });
    let mut saved = stored.clone();
    saved["rating"] = json!(7.0);
    saved["notes"] = json!("");

    Mock::given(method("GET"))
        .and(path("/api/v1/recipes/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stored))
        .expect(1)
        .mount(&harness.server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/recipes/9"))
        .and(body_json(json!({
            "rating": 7.0,
            "notes": "",
            "ingredients": [{"ingredient_id": 4, "quantity": 5.0, "unit": "g"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(saved))
        .expect(1)
        .mount(&harness.server)
        .await;

    let api = connect(&harness.settings, harness.session().await).unwrap();
    let output = run_to_string(
        &api,
        Command::Recipes(RecipesCommand::Edit {
            id: 9,
            rating: Some("7".to_string()),
            notes: Some(String::new()),
            ingredients: Vec::new(),
        }),
    )
    .await
    .unwrap();

    assert_eq!(output, "Updated #9 meal 2 rated 7.0 (1 ingredients)\n");
}

#[tokio::test]
async fn test_recipe_edit_rejects_out_of_range_rating() {
    let harness = Harness::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/recipes/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 9,
            "meal_id": 2,
            "rating": 6.0,
            "ingredients": [{"ingredient_id": 4, "quantity": 5.0, "unit": "g"}],
            "created_at": "2024-03-01T09:30:00"
        })))
        .mount(&harness.server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&harness.server)
        .await;

    let api = connect(&harness.settings, harness.session().await).unwrap();
    let error = run_to_string(
        &api,
        Command::Recipes(RecipesCommand::Edit {
            id: 9,
            rating: Some("0".to_string()),
            notes: None,
            ingredients: Vec::new(),
        }),
    )
    .await
    .unwrap_err();

    assert_eq!(
        error.to_string(),
        "invalid input: rating: Rating must be between 1 and 10"
    );
}

#[tokio::test]
async fn test_login_form_errors_are_reported() {
    let harness = Harness::start().await;
    let api = connect(&harness.settings, harness.session().await).unwrap();

    let error = run_to_string(
        &api,
        Command::Login {
            email: String::new(),
            password: String::new(),
        },
    )
    .await
    .unwrap_err();

    assert_eq!(
        error.to_string(),
        "invalid input: email: Email is required; password: Password is required"
    );
}
