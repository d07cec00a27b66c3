//! End-to-end checks of the studio core against an in-process mock backend.

use axum::extract::Json;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;

use uml_studio::client::config::normalize_base;
use uml_studio::client::models::session::SessionGate;
use uml_studio::client::services::backend::{BackendClient, EvaluateRequirement, GenerateDiagram};
use uml_studio::client::services::catalog::{default_models, load_catalog, CatalogSource};
use uml_studio::client::services::renderer::{DotEngine, RenderError};
use uml_studio::client::services::workflow::{dispatch, Phase};
use uml_studio::common::models::{DiagramKind, DiagramRequest, RequirementRequest, Verdict};

#[derive(Default)]
struct RecordingEngine {
    calls: Mutex<Vec<String>>,
}

impl RecordingEngine {
    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl DotEngine for RecordingEngine {
    fn render(&self, dot_source: &str) -> Result<Vec<u8>, RenderError> {
        self.calls.lock().unwrap().push(dot_source.to_string());
        Ok(format!("<svg>{}</svg>", dot_source).into_bytes())
    }
}

async fn spawn_backend(router: Router) -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    normalize_base(&format!("http://{}", addr)).unwrap()
}

fn client(base: Url) -> BackendClient {
    BackendClient::with_base(base, Duration::from_secs(5)).unwrap()
}

fn logged_in(engine: Arc<RecordingEngine>) -> SessionGate {
    let mut gate = SessionGate::new(engine);
    assert!(gate.attempt_login("admin", "admin"));
    gate
}

fn atm_request() -> DiagramRequest {
    DiagramRequest {
        scenario_text: "An ATM withdraws cash".into(),
        diagram_kind: DiagramKind::Sequence,
        model_id: "llama3-8b-8192".into(),
    }
}

#[tokio::test]
async fn generated_diagram_is_rendered_once() {
    let received: Arc<Mutex<Option<Value>>> = Arc::default();
    let seen = received.clone();
    let router = Router::new().route(
        "/generate-uml",
        post(move |Json(body): Json<Value>| {
            let seen = seen.clone();
            async move {
                *seen.lock().unwrap() = Some(body);
                Json(json!({ "dot_source": "digraph{A->B}" }))
            }
        }),
    );
    let backend = client(spawn_backend(router).await);
    let engine = Arc::new(RecordingEngine::default());
    let mut gate = logged_in(engine.clone());
    let ws = gate.workspace_mut().unwrap();

    let ticket = ws.submit_diagram();
    assert_eq!(ws.diagrams.phase(), Phase::Pending);
    let (ticket, outcome) = dispatch::<GenerateDiagram>(backend, ticket, atm_request()).await;
    ws.finish_diagram(ticket, outcome);

    assert_eq!(ws.diagrams.phase(), Phase::Succeeded);
    assert!(ws.diagrams.error_message().is_none());
    assert_eq!(engine.calls(), vec!["digraph{A->B}".to_string()]);
    assert_eq!(ws.renderer.surface(), Some("<svg>digraph{A->B}</svg>".as_bytes()));

    let body = received.lock().unwrap().clone().unwrap();
    assert_eq!(
        body,
        json!({
            "scenario": "An ATM withdraws cash",
            "uml_type": "sequence",
            "model": "llama3-8b-8192",
        })
    );
}

#[tokio::test]
async fn requirement_verdict_is_reported() {
    let router = Router::new().route(
        "/evaluate-requirement",
        post(|Json(body): Json<Value>| async move {
            assert_eq!(body["requirement"], "The system shall be fast");
            Json(json!({ "result": "INVALID", "reason": "Not measurable" }))
        }),
    );
    let backend = client(spawn_backend(router).await);
    let mut gate = logged_in(Arc::default());
    let ws = gate.workspace_mut().unwrap();

    let request = RequirementRequest {
        requirement_text: "The system shall be fast".into(),
        model_id: "gemma-7b-it".into(),
    };
    let ticket = ws.submit_requirement();
    let (ticket, outcome) = dispatch::<EvaluateRequirement>(backend, ticket, request).await;
    ws.finish_requirement(ticket, outcome);

    assert_eq!(ws.requirements.phase(), Phase::Succeeded);
    let verdict = ws.requirements.result().unwrap();
    assert_eq!(verdict.verdict, Verdict::Invalid);
    assert_eq!(verdict.rationale, "Not measurable");
}

#[tokio::test]
async fn backend_detail_is_shown_verbatim_and_nothing_is_rendered() {
    let router = Router::new().route(
        "/generate-uml",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "detail": "model unavailable" })),
            )
        }),
    );
    let backend = client(spawn_backend(router).await);
    let engine = Arc::new(RecordingEngine::default());
    let mut gate = logged_in(engine.clone());
    let ws = gate.workspace_mut().unwrap();

    let ticket = ws.submit_diagram();
    let (ticket, outcome) = dispatch::<GenerateDiagram>(backend, ticket, atm_request()).await;
    ws.finish_diagram(ticket, outcome);

    assert_eq!(ws.diagrams.phase(), Phase::Failed);
    assert_eq!(ws.diagrams.error_message(), Some("model unavailable"));
    assert!(ws.diagrams.result().is_none());
    assert!(engine.calls().is_empty());
    assert!(ws.renderer.surface().is_none());
}

#[tokio::test]
async fn bad_scenario_detail_reaches_error_message() {
    let router = Router::new().route(
        "/generate-uml",
        post(|| async { (StatusCode::BAD_REQUEST, Json(json!({ "detail": "bad scenario" }))) }),
    );
    let backend = client(spawn_backend(router).await);
    let mut gate = logged_in(Arc::default());
    let ws = gate.workspace_mut().unwrap();

    let ticket = ws.submit_diagram();
    let (ticket, outcome) = dispatch::<GenerateDiagram>(backend, ticket, atm_request()).await;
    ws.finish_diagram(ticket, outcome);

    assert_eq!(ws.diagrams.error_message(), Some("bad scenario"));
}

#[tokio::test]
async fn failure_without_detail_uses_operation_fallback() {
    let router = Router::new()
        .route("/generate-uml", post(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }))
        .route(
            "/evaluate-requirement",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "detail": 42 }))) }),
        );
    let backend = client(spawn_backend(router).await);
    let mut gate = logged_in(Arc::default());
    let ws = gate.workspace_mut().unwrap();

    let ticket = ws.submit_diagram();
    let (ticket, outcome) = dispatch::<GenerateDiagram>(backend.clone(), ticket, atm_request()).await;
    ws.finish_diagram(ticket, outcome);
    assert_eq!(ws.diagrams.error_message(), Some("Error generating UML"));

    let request = RequirementRequest {
        requirement_text: "The system shall log every login".into(),
        model_id: "gemma-7b-it".into(),
    };
    let ticket = ws.submit_requirement();
    let (ticket, outcome) = dispatch::<EvaluateRequirement>(backend, ticket, request).await;
    ws.finish_requirement(ticket, outcome);
    assert_eq!(ws.requirements.error_message(), Some("Error evaluating requirement"));
}

#[tokio::test]
async fn empty_diagram_without_error_is_a_failure() {
    let router = Router::new().route(
        "/generate-uml",
        post(|| async { Json(json!({ "dot_source": "" })) }),
    );
    let backend = client(spawn_backend(router).await);
    let engine = Arc::new(RecordingEngine::default());
    let mut gate = logged_in(engine.clone());
    let ws = gate.workspace_mut().unwrap();

    let ticket = ws.submit_diagram();
    let (ticket, outcome) = dispatch::<GenerateDiagram>(backend, ticket, atm_request()).await;
    ws.finish_diagram(ticket, outcome);

    assert_eq!(ws.diagrams.phase(), Phase::Failed);
    assert_eq!(ws.diagrams.error_message(), Some("Error generating UML"));
    assert!(engine.calls().is_empty());
}

#[tokio::test]
async fn soft_error_with_diagram_is_still_rendered() {
    let router = Router::new().route(
        "/generate-uml",
        post(|| async {
            Json(json!({ "dot_source": "digraph{A}", "error": "Layout was simplified" }))
        }),
    );
    let backend = client(spawn_backend(router).await);
    let engine = Arc::new(RecordingEngine::default());
    let mut gate = logged_in(engine.clone());
    let ws = gate.workspace_mut().unwrap();

    let ticket = ws.submit_diagram();
    let (ticket, outcome) = dispatch::<GenerateDiagram>(backend, ticket, atm_request()).await;
    ws.finish_diagram(ticket, outcome);

    assert_eq!(ws.diagrams.phase(), Phase::Succeeded);
    assert_eq!(ws.diagrams.result().unwrap().warning(), Some("Layout was simplified"));
    assert_eq!(engine.calls().len(), 1);
}

#[tokio::test]
async fn slow_catalog_keeps_fallback() {
    let router = Router::new().route(
        "/models",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(json!({ "models": [{ "id": "late", "name": "Late", "description": "" }] }))
        }),
    );
    let base = spawn_backend(router).await;
    let backend = BackendClient::with_base(base, Duration::from_millis(200)).unwrap();
    let mut gate = logged_in(Arc::default());
    let ws = gate.workspace_mut().unwrap();

    assert!(ws.begin_catalog_load());
    let session = ws.session();
    let outcome = load_catalog(backend).await;
    assert!(!ws.finish_catalog_load(session, outcome));

    assert_eq!(ws.catalog.models(), default_models().as_slice());
    assert_eq!(ws.catalog.source(), CatalogSource::Fallback);
    assert!(ws.diagrams.error_message().is_none());
    assert!(ws.requirements.error_message().is_none());
}

#[tokio::test]
async fn unreachable_catalog_keeps_fallback_in_order() {
    // Grab a free port, then close it so nothing is listening there.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let backend = client(normalize_base(&format!("http://{}", addr)).unwrap());
    let mut gate = logged_in(Arc::default());
    let ws = gate.workspace_mut().unwrap();

    ws.begin_catalog_load();
    let session = ws.session();
    let outcome = load_catalog(backend).await;
    ws.finish_catalog_load(session, outcome);

    let ids: Vec<&str> = ws.catalog.models().iter().map(|m| m.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["llama3-8b-8192", "llama3-70b-8192", "mixtral-8x7b-32768", "gemma-7b-it", "gemma2-9b-it"]
    );
}

#[tokio::test]
async fn backend_catalog_replaces_fallback() {
    let router = Router::new().route(
        "/models",
        get(|| async {
            Json(json!({
                "models": [{ "id": "x", "name": "X", "description": "Only model", "provider": "Groq" }]
            }))
        }),
    );
    let backend = client(spawn_backend(router).await);
    let mut gate = logged_in(Arc::default());
    let ws = gate.workspace_mut().unwrap();

    ws.begin_catalog_load();
    let session = ws.session();
    let outcome = load_catalog(backend).await;
    assert!(ws.finish_catalog_load(session, outcome));

    assert_eq!(ws.catalog.source(), CatalogSource::Backend);
    assert_eq!(ws.catalog.models().len(), 1);
    let only = &ws.catalog.models()[0];
    assert_eq!(only.id, "x");
    assert_eq!(only.provider.as_deref(), Some("Groq"));
    assert!(ws.catalog.find("llama3-8b-8192").is_none());
}

#[tokio::test]
async fn requirement_runs_while_diagram_is_pending() {
    let router = Router::new()
        .route(
            "/generate-uml",
            post(|| async { Json(json!({ "dot_source": "digraph{Order->Item}" })) }),
        )
        .route(
            "/evaluate-requirement",
            post(|| async { Json(json!({ "result": "VALID", "reason": "Clear and testable" })) }),
        );
    let backend = client(spawn_backend(router).await);
    let engine = Arc::new(RecordingEngine::default());
    let mut gate = logged_in(engine.clone());
    let ws = gate.workspace_mut().unwrap();

    let diagram_ticket = ws.submit_diagram();
    let diagram_call = tokio::spawn(dispatch::<GenerateDiagram>(
        backend.clone(),
        diagram_ticket,
        DiagramRequest {
            scenario_text: "A customer places an order".into(),
            diagram_kind: DiagramKind::Class,
            model_id: "mixtral-8x7b-32768".into(),
        },
    ));

    let request = RequirementRequest {
        requirement_text: "The system shall reply within 2 seconds".into(),
        model_id: "gemma2-9b-it".into(),
    };
    let ticket = ws.submit_requirement();
    let (ticket, outcome) = dispatch::<EvaluateRequirement>(backend, ticket, request).await;
    ws.finish_requirement(ticket, outcome);

    assert_eq!(ws.requirements.phase(), Phase::Succeeded);
    assert!(ws.requirements.result().unwrap().verdict.is_valid());
    assert_eq!(ws.diagrams.phase(), Phase::Pending);
    assert!(ws.diagrams.result().is_none());
    assert!(ws.diagrams.error_message().is_none());
    assert!(engine.calls().is_empty());

    let (ticket, outcome) = diagram_call.await.unwrap();
    ws.finish_diagram(ticket, outcome);
    assert_eq!(ws.diagrams.phase(), Phase::Succeeded);
    assert_eq!(ws.requirements.result().unwrap().rationale, "Clear and testable");
}

#[tokio::test]
async fn superseded_submission_is_dropped() {
    let router = Router::new().route(
        "/generate-uml",
        post(|Json(body): Json<Value>| async move {
            let scenario = body["scenario"].as_str().unwrap_or_default().to_string();
            Json(json!({ "dot_source": format!("digraph{{\"{}\"}}", scenario) }))
        }),
    );
    let backend = client(spawn_backend(router).await);
    let engine = Arc::new(RecordingEngine::default());
    let mut gate = logged_in(engine.clone());
    let ws = gate.workspace_mut().unwrap();

    let first = ws.submit_diagram();
    let mut first_request = atm_request();
    first_request.scenario_text = "first".into();
    let first_call = dispatch::<GenerateDiagram>(backend.clone(), first, first_request).await;

    let second = ws.submit_diagram();
    let mut second_request = atm_request();
    second_request.scenario_text = "second".into();
    let (ticket, outcome) = dispatch::<GenerateDiagram>(backend, second, second_request).await;
    ws.finish_diagram(ticket, outcome);

    // The older response lands last and must not overwrite the newer one.
    let (ticket, outcome) = first_call;
    ws.finish_diagram(ticket, outcome);

    assert_eq!(ws.diagrams.result().unwrap().dot_source, "digraph{\"second\"}");
    assert_eq!(engine.calls(), vec!["digraph{\"second\"}".to_string()]);
}
