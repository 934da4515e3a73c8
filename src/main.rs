use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

use api_shared::{
    ChoiceDto, ErrorRes, FieldErrorDto, FieldValue, HealthRes, HealthService, InterviewInterestReq,
    QuestionBlockDto, SetFieldReq, StartSessionReq, StepViewRes, SubmitRes, SubmitSurveyReq,
    dto::ContactDto,
};
use sha_content::{
    home::{DiscoveryCard, Hero, HomePage},
    landing::{
        FormChoice, InterviewForm, InterviewFormField, LandingPage, PathCard, StatCallout,
        ValueProp,
    },
    thank_you::{NextStepCard, ThankYouPage},
};
use sha_core::{
    CoreConfig, DiscoveryError, FieldInput, InterviewSignup, JsonFileStore, SubmissionService,
    SurveyFlow,
    schema::{FieldSpec, WidgetKind},
};
use sha_types::{AnswerSet, AnswerValue, ContactInfo, STATE_CODES, Segment};

mod sessions;
use sessions::SessionRegistry;

/// User-facing message for any failed persistence attempt. The underlying
/// error is logged, never returned.
const SUBMIT_ERROR_MSG: &str = "There was an error submitting your response. Please try again.";

/// Application state shared across REST API handlers
///
/// Holds the in-memory survey session registry and the submission service
/// that persists completed records.
#[derive(Clone)]
struct AppState {
    sessions: SessionRegistry,
    submission: SubmissionService,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        home_page,
        landing_page,
        thank_you_page,
        start_session,
        get_session,
        set_field,
        advance_session,
        back_session,
        submit_session,
        submit_survey,
        interview_interest
    ),
    components(schemas(
        HealthRes,
        StartSessionReq,
        SetFieldReq,
        FieldValue,
        StepViewRes,
        QuestionBlockDto,
        ChoiceDto,
        FieldErrorDto,
        SubmitRes,
        SubmitSurveyReq,
        ContactDto,
        InterviewInterestReq,
        ErrorRes,
        HomePage,
        Hero,
        DiscoveryCard,
        LandingPage,
        ValueProp,
        StatCallout,
        PathCard,
        InterviewForm,
        InterviewFormField,
        FormChoice,
        ThankYouPage,
        NextStepCard
    ))
)]
struct ApiDoc;

/// Main entry point for the SHA intake server
///
/// Serves the discovery survey REST API on port 3000.
///
/// # Environment Variables
/// - `SHA_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `RESPONSE_DATA_DIR`: Directory for response storage (default: "/response_data")
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If server startup or runtime fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("sha=info".parse()?))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("SHA_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let config = Arc::new(CoreConfig::from_env_value(
        std::env::var("RESPONSE_DATA_DIR").ok(),
    ));

    tracing::info!("++ Starting SHA intake REST on {}", rest_addr);
    tracing::info!("++ Response data dir: {}", config.response_data_dir().display());

    let state = AppState {
        sessions: SessionRegistry::new(),
        submission: SubmissionService::new(Arc::new(JsonFileStore::new(config))),
    };

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/pages/home", get(home_page))
        .route("/pages/thank-you", get(thank_you_page))
        .route("/pages/:segment", get(landing_page))
        .route("/sessions", post(start_session))
        .route("/sessions/:id", get(get_session))
        .route("/sessions/:id/fields", post(set_field))
        .route("/sessions/:id/advance", post(advance_session))
        .route("/sessions/:id/back", post(back_session))
        .route("/sessions/:id/submit", post(submit_session))
        .route("/surveys", post(submit_survey))
        .route("/interview-interest", post(interview_interest))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

type ApiError = (StatusCode, Json<ErrorRes>);

fn session_not_found() -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorRes::message("Session not found")),
    )
}

fn discovery_error_response(err: DiscoveryError) -> ApiError {
    match err {
        DiscoveryError::Validation(errors) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorRes::with_details(
                "Please fix the highlighted fields",
                errors
                    .into_iter()
                    .map(|e| FieldErrorDto {
                        key: e.key,
                        message: e.message,
                    })
                    .collect(),
            )),
        ),
        DiscoveryError::InvalidInput(message) => {
            (StatusCode::BAD_REQUEST, Json(ErrorRes::message(message)))
        }
        DiscoveryError::SubmissionInFlight => (
            StatusCode::CONFLICT,
            Json(ErrorRes::message("A submission is already in progress")),
        ),
        DiscoveryError::AlreadySubmitted => (
            StatusCode::CONFLICT,
            Json(ErrorRes::message("This survey has already been submitted")),
        ),
        DiscoveryError::NotOnFinalStep => (
            StatusCode::BAD_REQUEST,
            Json(ErrorRes::message("Submit is only available on the final step")),
        ),
        DiscoveryError::Store(err) => {
            tracing::error!("Record store error: {:?}", err);
            (StatusCode::BAD_GATEWAY, Json(ErrorRes::message(SUBMIT_ERROR_MSG)))
        }
    }
}

fn thank_you_redirect(segment: Segment, interview: bool) -> String {
    if interview {
        format!("/thank-you?segment={segment}&interview=true")
    } else {
        format!("/thank-you?segment={segment}")
    }
}

/// The current value of one field, in its wire shape: a string, a string
/// array, or a boolean depending on the widget.
fn field_value(flow: &SurveyFlow, spec: &FieldSpec) -> serde_json::Value {
    let contact = flow.answers().contact();
    if let Some(contact_field) = spec.key.strip_prefix("contact.") {
        return match contact_field {
            "name" => contact.name.clone().into(),
            "email" => contact.email.clone().into(),
            "phone" => contact.phone.clone().into(),
            "preferred_contact" => contact
                .preferred_contact
                .map(|m| m.as_str().into())
                .unwrap_or(serde_json::Value::Null),
            "availability" => contact
                .availability
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .into(),
            "wants_updates" => contact.wants_updates.into(),
            "wants_interview" => contact.wants_interview.into(),
            _ => serde_json::Value::Null,
        };
    }
    match flow.answers().get(spec.key) {
        Some(AnswerValue::Multi(set)) => set.iter().cloned().collect::<Vec<_>>().into(),
        Some(AnswerValue::Single(s)) | Some(AnswerValue::Text(s)) => s.clone().into(),
        None => serde_json::Value::Null,
    }
}

fn step_view(session_id: Uuid, flow: &SurveyFlow) -> StepViewRes {
    let blocks = flow
        .visible_fields()
        .into_iter()
        .map(|spec| {
            let options = if spec.widget == WidgetKind::StateSelect {
                STATE_CODES
                    .iter()
                    .map(|code| ChoiceDto {
                        code: (*code).into(),
                        label: (*code).into(),
                    })
                    .collect()
            } else {
                spec.options
                    .iter()
                    .map(|choice| ChoiceDto {
                        code: choice.code.into(),
                        label: choice.label.into(),
                    })
                    .collect()
            };
            QuestionBlockDto {
                key: spec.key.into(),
                prompt: spec.prompt.into(),
                description: spec.description.map(Into::into),
                required: spec.is_required(),
                widget: spec.widget.as_str().into(),
                options,
                value: field_value(flow, spec),
            }
        })
        .collect();

    let percent =
        ((flow.current_step() as f64 / flow.total_steps() as f64) * 100.0).round() as u8;

    StepViewRes {
        session_id,
        segment: flow.segment(),
        title: flow.schema().title.into(),
        step: flow.current_step(),
        total_steps: flow.total_steps(),
        percent,
        blocks,
        errors: flow
            .errors()
            .iter()
            .map(|e| FieldErrorDto {
                key: e.key.clone(),
                message: e.message.clone(),
            })
            .collect(),
        submit_error: flow.submit_error().map(Into::into),
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used for monitoring and load balancer health checks.
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/pages/home",
    responses(
        (status = 200, description = "Home page content", body = HomePage)
    )
)]
/// Home page content: hero plus one discovery card per segment
async fn home_page() -> Json<HomePage> {
    Json(sha_content::home_page())
}

#[utoipa::path(
    get,
    path = "/pages/{segment}",
    params(("segment" = String, Path, description = "Segment tag: hp, derm, or client")),
    responses(
        (status = 200, description = "Segment landing page content", body = LandingPage),
        (status = 404, description = "Unknown segment", body = ErrorRes)
    )
)]
/// Landing page content for one segment
async fn landing_page(Path(segment): Path<String>) -> Result<Json<LandingPage>, ApiError> {
    let segment: Segment = segment.parse().map_err(|_| {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorRes::message("Unknown segment")),
        )
    })?;
    Ok(Json(sha_content::landing_page(segment)))
}

#[derive(Debug, Deserialize)]
struct ThankYouQuery {
    segment: Option<String>,
    interview: Option<bool>,
}

#[utoipa::path(
    get,
    path = "/pages/thank-you",
    params(
        ("segment" = Option<String>, Query, description = "Segment tag; unknown values fall back to client copy"),
        ("interview" = Option<bool>, Query, description = "Include the interview confirmation line")
    ),
    responses(
        (status = 200, description = "Thank-you page content", body = ThankYouPage)
    )
)]
/// Thank-you page content
///
/// Unknown or missing segments fall back to the client copy rather than
/// erroring, so a mangled redirect still lands on a sensible page.
async fn thank_you_page(Query(query): Query<ThankYouQuery>) -> Json<ThankYouPage> {
    Json(sha_content::thank_you_page(
        query.segment.as_deref(),
        query.interview.unwrap_or(false),
    ))
}

#[utoipa::path(
    post,
    path = "/sessions",
    request_body = StartSessionReq,
    responses(
        (status = 200, description = "Session started, step 1 view", body = StepViewRes)
    )
)]
/// Start a survey session for one segment
async fn start_session(
    State(state): State<AppState>,
    Json(req): Json<StartSessionReq>,
) -> Result<Json<StepViewRes>, ApiError> {
    let id = state.sessions.create(req.segment);
    tracing::info!(session = %id, segment = %req.segment, "survey session started");
    state
        .sessions
        .with(id, |flow| Json(step_view(id, flow)))
        .ok_or_else(session_not_found)
}

#[utoipa::path(
    get,
    path = "/sessions/{id}",
    params(("id" = Uuid, Path, description = "Session id")),
    responses(
        (status = 200, description = "Current step view", body = StepViewRes),
        (status = 404, description = "Session not found", body = ErrorRes)
    )
)]
/// Current step view of a survey session
async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StepViewRes>, ApiError> {
    state
        .sessions
        .with(id, |flow| Json(step_view(id, flow)))
        .ok_or_else(session_not_found)
}

#[utoipa::path(
    post,
    path = "/sessions/{id}/fields",
    params(("id" = Uuid, Path, description = "Session id")),
    request_body = SetFieldReq,
    responses(
        (status = 200, description = "Updated step view", body = StepViewRes),
        (status = 400, description = "Unknown field or wrong value shape", body = ErrorRes),
        (status = 404, description = "Session not found", body = ErrorRes)
    )
)]
/// Set one field of the survey
///
/// Multi-choice fields treat a string value as a toggle: sending the same
/// option code twice restores the previous selection.
async fn set_field(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SetFieldReq>,
) -> Result<Json<StepViewRes>, ApiError> {
    let input = match req.value {
        FieldValue::Flag(flag) => FieldInput::Flag(flag),
        FieldValue::Text(text) => FieldInput::Value(text),
    };
    state
        .sessions
        .with(id, |flow| {
            flow.set_field(&req.key, input)
                .map(|_| Json(step_view(id, flow)))
        })
        .ok_or_else(session_not_found)?
        .map_err(discovery_error_response)
}

#[utoipa::path(
    post,
    path = "/sessions/{id}/advance",
    params(("id" = Uuid, Path, description = "Session id")),
    responses(
        (status = 200, description = "Step view; on validation failure the view carries the inline errors and the step is unchanged", body = StepViewRes),
        (status = 404, description = "Session not found", body = ErrorRes)
    )
)]
/// Validate the current step and move forward on success
async fn advance_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StepViewRes>, ApiError> {
    state
        .sessions
        .with(id, |flow| {
            flow.advance();
            Json(step_view(id, flow))
        })
        .ok_or_else(session_not_found)
}

#[utoipa::path(
    post,
    path = "/sessions/{id}/back",
    params(("id" = Uuid, Path, description = "Session id")),
    responses(
        (status = 200, description = "Step view of the previous step", body = StepViewRes),
        (status = 404, description = "Session not found", body = ErrorRes)
    )
)]
/// Move back one step
///
/// Back navigation never validates; entered answers are kept.
async fn back_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StepViewRes>, ApiError> {
    state
        .sessions
        .with(id, |flow| {
            flow.retreat();
            Json(step_view(id, flow))
        })
        .ok_or_else(session_not_found)
}

#[utoipa::path(
    post,
    path = "/sessions/{id}/submit",
    params(("id" = Uuid, Path, description = "Session id")),
    responses(
        (status = 200, description = "Survey submitted", body = SubmitRes),
        (status = 400, description = "Not on the final step", body = ErrorRes),
        (status = 404, description = "Session not found", body = ErrorRes),
        (status = 409, description = "A submission is already in progress or completed", body = ErrorRes),
        (status = 422, description = "Validation failed", body = ErrorRes),
        (status = 502, description = "Persistence failed; the session and its answers are kept for a retry", body = ErrorRes)
    )
)]
/// Submit a completed survey session
///
/// Runs full validation across all steps, persists one discovery record,
/// and drops the session. While the insert is pending, further submit
/// requests for the same session are rejected with 409.
async fn submit_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SubmitRes>, ApiError> {
    let begun = state.sessions.with(id, |flow| flow.begin_submit());
    let answers = match begun {
        None => return Err(session_not_found()),
        Some(Err(err)) => return Err(discovery_error_response(err)),
        Some(Ok(answers)) => answers,
    };

    match state.submission.submit_survey(&answers) {
        Ok(record) => {
            state.sessions.with(id, |flow| flow.complete_submit(Ok(())));
            state.sessions.remove(id);
            tracing::info!(session = %id, record = %record.id, "survey submitted");
            Ok(Json(SubmitRes {
                id: record.id,
                source: record.source.as_str().into(),
                redirect: thank_you_redirect(record.segment, record.wants_interview),
            }))
        }
        Err(err) => {
            state
                .sessions
                .with(id, |flow| flow.complete_submit(Err(SUBMIT_ERROR_MSG.into())));
            Err(discovery_error_response(err))
        }
    }
}

/// Builds a validated answer set from a one-shot survey request.
fn answers_from_req(req: SubmitSurveyReq) -> Result<AnswerSet, DiscoveryError> {
    let schema = sha_core::SegmentSchema::for_segment(req.segment);
    let mut answers = AnswerSet::new(req.segment);

    for (key, value) in req.responses {
        let spec = schema
            .field(&key)
            .filter(|spec| !spec.key.starts_with("contact."))
            .ok_or_else(|| DiscoveryError::InvalidInput(format!("unknown field: '{key}'")))?;
        let parsed = match (spec.widget, value) {
            (WidgetKind::CheckboxGroup, serde_json::Value::Array(items)) => {
                let codes = items
                    .into_iter()
                    .map(|item| match item {
                        serde_json::Value::String(code) => Ok(code),
                        _ => Err(DiscoveryError::InvalidInput(format!(
                            "field '{key}' expects an array of strings"
                        ))),
                    })
                    .collect::<Result<_, _>>()?;
                AnswerValue::Multi(codes)
            }
            (WidgetKind::CheckboxGroup, _) => {
                return Err(DiscoveryError::InvalidInput(format!(
                    "field '{key}' expects an array of strings"
                )));
            }
            (_, serde_json::Value::String(s)) => AnswerValue::Single(s),
            (_, _) => {
                return Err(DiscoveryError::InvalidInput(format!(
                    "field '{key}' expects a string value"
                )));
            }
        };
        answers.insert(key, parsed);
    }

    if let Some(code) = req.state {
        answers.set_single("state", code);
    }
    if let Some(zip) = req.zip_code {
        answers.set_text("zip_code", zip);
    }

    let preferred_contact = match req.contact.preferred_contact.as_deref() {
        None | Some("") => None,
        Some(raw) => Some(raw.parse().map_err(DiscoveryError::InvalidInput)?),
    };
    *answers.contact_mut() = ContactInfo {
        name: req.contact.name,
        email: req.contact.email,
        phone: req.contact.phone,
        preferred_contact,
        availability: req.contact.availability,
        wants_updates: req.contact.wants_updates,
        wants_interview: req.contact.wants_interview,
    };

    let errors = sha_core::schema::validate_all(schema, &answers);
    if !errors.is_empty() {
        return Err(DiscoveryError::Validation(errors));
    }
    Ok(answers)
}

#[utoipa::path(
    post,
    path = "/surveys",
    request_body = SubmitSurveyReq,
    responses(
        (status = 200, description = "Survey submitted", body = SubmitRes),
        (status = 400, description = "Unknown field or wrong value shape", body = ErrorRes),
        (status = 422, description = "Validation failed", body = ErrorRes),
        (status = 502, description = "Persistence failed", body = ErrorRes)
    )
)]
/// Submit a complete survey in one request
///
/// For clients that collect all answers before talking to the server.
/// Runs the same full validation as the session path.
async fn submit_survey(
    State(state): State<AppState>,
    Json(req): Json<SubmitSurveyReq>,
) -> Result<Json<SubmitRes>, ApiError> {
    let answers = answers_from_req(req).map_err(discovery_error_response)?;
    let record = state
        .submission
        .submit_survey(&answers)
        .map_err(discovery_error_response)?;
    tracing::info!(record = %record.id, segment = %record.segment, "one-shot survey submitted");
    Ok(Json(SubmitRes {
        id: record.id,
        source: record.source.as_str().into(),
        redirect: thank_you_redirect(record.segment, record.wants_interview),
    }))
}

#[utoipa::path(
    post,
    path = "/interview-interest",
    request_body = InterviewInterestReq,
    responses(
        (status = 200, description = "Interview interest recorded", body = SubmitRes),
        (status = 422, description = "Validation failed", body = ErrorRes),
        (status = 502, description = "Persistence failed", body = ErrorRes)
    )
)]
/// Record interview interest from a landing page
///
/// The reduced path for respondents who skip the survey: name and email
/// are required, everything else optional. The stored record carries the
/// `interview_only` source tag.
async fn interview_interest(
    State(state): State<AppState>,
    Json(req): Json<InterviewInterestReq>,
) -> Result<Json<SubmitRes>, ApiError> {
    let signup = InterviewSignup {
        name: req.name,
        email: req.email,
        phone: req.phone,
        zip_code: req.zip_code,
        availability: req.availability,
    };
    let record = state
        .submission
        .submit_interview_interest(req.segment, &signup)
        .map_err(discovery_error_response)?;
    tracing::info!(record = %record.id, segment = %record.segment, "interview interest recorded");
    Ok(Json(SubmitRes {
        id: record.id,
        source: record.source.as_str().into(),
        redirect: thank_you_redirect(record.segment, true),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use sha_core::MemoryStore;
    use tower::ServiceExt;

    fn test_app() -> (Arc<MemoryStore>, Router) {
        let store = Arc::new(MemoryStore::new());
        let state = AppState {
            sessions: SessionRegistry::new(),
            submission: SubmissionService::new(store.clone()),
        };
        (store, app(state))
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let request = match body {
            Some(json) => Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn set(app: &Router, session: &str, key: &str, value: serde_json::Value) {
        let (status, _) = send(
            app,
            "POST",
            &format!("/sessions/{session}/fields"),
            Some(serde_json::json!({ "key": key, "value": value })),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "set {key}");
    }

    async fn advance(app: &Router, session: &str) -> serde_json::Value {
        let (status, json) =
            send(app, "POST", &format!("/sessions/{session}/advance"), None).await;
        assert_eq!(status, StatusCode::OK);
        json
    }

    #[tokio::test]
    async fn health_endpoint_reports_ok() {
        let (_, app) = test_app();
        let (status, json) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["ok"], true);
    }

    #[tokio::test]
    async fn content_pages_are_served() {
        let (_, app) = test_app();

        let (status, home) = send(&app, "GET", "/pages/home", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(home["cards"].as_array().unwrap().len(), 3);

        let (status, landing) = send(&app, "GET", "/pages/derm", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(landing["heading"], "A Better Patient Pipeline");

        let (status, _) = send(&app, "GET", "/pages/stylist", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn thank_you_page_falls_back_and_flags_interview() {
        let (_, app) = test_app();

        let (status, page) =
            send(&app, "GET", "/pages/thank-you?segment=bogus", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(page["segment"], "client");

        let (_, page) =
            send(&app, "GET", "/pages/thank-you?segment=hp&interview=true", None).await;
        assert_eq!(page["segment"], "hp");
        assert!(page["interview_note"].is_string());
    }

    #[tokio::test]
    async fn unknown_session_is_404() {
        let (_, app) = test_app();
        let id = Uuid::new_v4();
        let (status, _) = send(&app, "GET", &format!("/sessions/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn blocked_advance_keeps_step_and_surfaces_errors() {
        let (_, app) = test_app();
        let (status, view) = send(
            &app,
            "POST",
            "/sessions",
            Some(serde_json::json!({ "segment": "derm" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["step"], 1);
        assert_eq!(view["total_steps"], 11);
        let session = view["session_id"].as_str().unwrap().to_string();

        let view = advance(&app, &session).await;
        assert_eq!(view["step"], 1);
        assert_eq!(view["errors"].as_array().unwrap().len(), 1);
        assert_eq!(view["errors"][0]["key"], "practice_type");
    }

    #[tokio::test]
    async fn full_hp_session_walk_submits_a_survey_record() {
        let (store, app) = test_app();
        let (_, view) = send(
            &app,
            "POST",
            "/sessions",
            Some(serde_json::json!({ "segment": "hp" })),
        )
        .await;
        let session = view["session_id"].as_str().unwrap().to_string();

        // Submitting early is rejected.
        let (status, _) =
            send(&app, "POST", &format!("/sessions/{session}/submit"), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let steps = [
            ("professional_type", "hairstylist"),
            ("years_experience", "2_to_5"),
            ("scalp_condition_frequency", "weekly"),
            ("current_action", "mention_client"),
            ("client_reaction", "grateful"),
            ("referral_tool_interest", "very_interested"),
            ("training_interest", "somewhat_interested"),
            ("state", "MA"),
        ];
        for (key, value) in steps {
            set(&app, &session, key, serde_json::json!(value)).await;
            let view = advance(&app, &session).await;
            assert!(view["errors"].as_array().is_none_or(|e| e.is_empty()));
        }

        let (status, res) =
            send(&app, "POST", &format!("/sessions/{session}/submit"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(res["source"], "survey");
        assert_eq!(res["redirect"], "/thank-you?segment=hp");

        let records = store.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].responses["scalp_condition_frequency"], "weekly");

        // The session is gone after a successful submit.
        let (status, _) = send(&app, "GET", &format!("/sessions/{session}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    /// Store that rejects a fixed number of inserts before accepting.
    struct FlakyStore {
        inner: MemoryStore,
        failures_left: std::sync::atomic::AtomicUsize,
    }

    impl FlakyStore {
        fn failing_once() -> Self {
            Self {
                inner: MemoryStore::new(),
                failures_left: std::sync::atomic::AtomicUsize::new(1),
            }
        }
    }

    impl sha_core::RecordStore for FlakyStore {
        fn insert(
            &self,
            record: &sha_types::DiscoveryRecord,
        ) -> Result<(), sha_core::StoreError> {
            use std::sync::atomic::Ordering;
            if self
                .failures_left
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
            {
                return Err(sha_core::StoreError::Unavailable(
                    "storage offline".to_string(),
                ));
            }
            self.inner.insert(record)
        }
    }

    #[tokio::test]
    async fn store_failure_is_retryable_and_keeps_the_session() {
        let store = Arc::new(FlakyStore::failing_once());
        let state = AppState {
            sessions: SessionRegistry::new(),
            submission: SubmissionService::new(store.clone()),
        };
        let app = app(state);

        let (_, view) = send(
            &app,
            "POST",
            "/sessions",
            Some(serde_json::json!({ "segment": "hp" })),
        )
        .await;
        let session = view["session_id"].as_str().unwrap().to_string();

        for (key, value) in [
            ("professional_type", "hairstylist"),
            ("years_experience", "5_to_10"),
            ("scalp_condition_frequency", "daily"),
            ("current_action", "mention_client"),
            ("client_reaction", "grateful"),
            ("referral_tool_interest", "very_interested"),
            ("training_interest", "very_interested"),
            ("state", "WA"),
        ] {
            set(&app, &session, key, serde_json::json!(value)).await;
            advance(&app, &session).await;
        }

        let (status, body) =
            send(&app, "POST", &format!("/sessions/{session}/submit"), None).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], SUBMIT_ERROR_MSG);
        assert_eq!(store.inner.len(), 0);

        // The session is kept, answers intact, with the retryable message.
        let (status, view) = send(&app, "GET", &format!("/sessions/{session}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["submit_error"], SUBMIT_ERROR_MSG);

        // A retry on the same session goes through once the store recovers.
        let (status, res) =
            send(&app, "POST", &format!("/sessions/{session}/submit"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(res["source"], "survey");
        let records = store.inner.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].responses["years_experience"], "5_to_10");

        let (status, _) = send(&app, "GET", &format!("/sessions/{session}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn interview_consent_changes_redirect_and_source() {
        let (store, app) = test_app();
        let (_, view) = send(
            &app,
            "POST",
            "/sessions",
            Some(serde_json::json!({ "segment": "hp" })),
        )
        .await;
        let session = view["session_id"].as_str().unwrap().to_string();

        for (key, value) in [
            ("professional_type", "barber"),
            ("years_experience", "more_than_10"),
            ("scalp_condition_frequency", "daily"),
            ("current_action", "recommend_doctor"),
            ("client_reaction", "concerned"),
            ("referral_tool_interest", "very_interested"),
            ("training_interest", "very_interested"),
            ("state", "NY"),
        ] {
            set(&app, &session, key, serde_json::json!(value)).await;
            advance(&app, &session).await;
        }
        set(&app, &session, "contact.wants_interview", serde_json::json!(true)).await;
        set(&app, &session, "contact.email", serde_json::json!("pro@example.com")).await;

        let (status, res) =
            send(&app, "POST", &format!("/sessions/{session}/submit"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(res["source"], "both");
        assert_eq!(res["redirect"], "/thank-you?segment=hp&interview=true");
        assert_eq!(store.records()[0].wants_interview, true);
    }

    #[tokio::test]
    async fn consented_submit_without_email_is_422() {
        let (store, app) = test_app();
        let (_, view) = send(
            &app,
            "POST",
            "/sessions",
            Some(serde_json::json!({ "segment": "hp" })),
        )
        .await;
        let session = view["session_id"].as_str().unwrap().to_string();

        for (key, value) in [
            ("professional_type", "braider"),
            ("years_experience", "less_than_2"),
            ("scalp_condition_frequency", "monthly"),
            ("current_action", "take_photo"),
            ("client_reaction", "grateful"),
            ("referral_tool_interest", "neutral"),
            ("training_interest", "neutral"),
            ("state", "CA"),
        ] {
            set(&app, &session, key, serde_json::json!(value)).await;
            advance(&app, &session).await;
        }
        set(&app, &session, "contact.wants_updates", serde_json::json!(true)).await;

        let (status, body) =
            send(&app, "POST", &format!("/sessions/{session}/submit"), None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["details"][0]["key"], "contact.email");
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn one_shot_survey_endpoint() {
        let (store, app) = test_app();
        let req = serde_json::json!({
            "segment": "client",
            "responses": {
                "has_experience": "yes_current",
                "condition_types": ["dandruff", "itching"],
                "trust_hp_referral": "very_trust",
                "willingness_to_pay": "yes_reasonable",
                "photo_sharing_comfort": "somewhat_comfortable"
            },
            "state": "TX",
            "zip_code": "73301"
        });
        let (status, res) = send(&app, "POST", "/surveys", Some(req)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(res["source"], "survey");

        let record = &store.records()[0];
        assert_eq!(record.state.as_ref().unwrap().as_str(), "TX");
        assert_eq!(
            record.responses["condition_types"],
            serde_json::json!(["dandruff", "itching"])
        );

        // Missing required answers are rejected with field errors.
        let (status, body) = send(
            &app,
            "POST",
            "/surveys",
            Some(serde_json::json!({ "segment": "client", "responses": {} })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(!body["details"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn interview_interest_endpoint_validates_and_persists() {
        let (store, app) = test_app();

        let (status, body) = send(
            &app,
            "POST",
            "/interview-interest",
            Some(serde_json::json!({ "segment": "derm", "name": "", "email": "bad" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let keys: Vec<_> = body["details"]
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["key"].as_str().unwrap())
            .collect();
        assert_eq!(keys, ["name", "email"]);

        let (status, res) = send(
            &app,
            "POST",
            "/interview-interest",
            Some(serde_json::json!({
                "segment": "derm",
                "name": "Dr. Okafor",
                "email": "okafor@clinic.example",
                "availability": ["weekday_mornings"]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(res["source"], "interview_only");
        assert_eq!(res["redirect"], "/thank-you?segment=derm&interview=true");
        assert_eq!(store.len(), 1);
        assert!(store.records()[0].wants_updates);
    }
}
