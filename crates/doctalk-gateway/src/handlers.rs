use crate::server::AppState;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use doctalk_core::{DoctalkError, DoctalkResult, Message};
use doctalk_session::Session;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

// --- Request / response bodies ---

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub message_id: Uuid,
    pub history_len: usize,
}

#[derive(Debug, Serialize)]
pub struct SessionCreated {
    pub session_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct DocumentAccepted {
    pub file_name: String,
    pub fragments: usize,
    pub cached: bool,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub session_id: Uuid,
    pub messages: Vec<Message>,
}

// --- Error mapping ---

fn error_response(err: &DoctalkError) -> Response {
    let status = match err {
        DoctalkError::Validation(_) => StatusCode::BAD_REQUEST,
        DoctalkError::Session(_) => StatusCode::NOT_FOUND,
        DoctalkError::Extraction(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DoctalkError::Inference(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(serde_json::json!({ "error": err.to_string() })),
    )
        .into_response()
}

async fn load_session(state: &AppState, id: Uuid) -> Result<Session, Response> {
    match state.sessions.get(id).await {
        Ok(Some(session)) => Ok(session),
        Ok(None) => Err(error_response(&DoctalkError::Session(format!(
            "unknown session {id}"
        )))),
        Err(e) => Err(error_response(&e)),
    }
}

// --- Handlers ---

pub async fn create_session(State(state): State<Arc<AppState>>) -> Response {
    let session = Session::new();
    if let Err(e) = state.sessions.create(&session).await {
        return error_response(&e);
    }

    info!(session_id = %session.id, "Session created");
    (
        StatusCode::CREATED,
        Json(SessionCreated {
            session_id: session.id,
        }),
    )
        .into_response()
}

pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Response {
    if let Err(e) = state.sessions.delete(id).await {
        return error_response(&e);
    }

    // The session's cached extractions go with it
    state.orchestrator.discard_documents(id).await;

    info!(session_id = %id, "Session deleted");
    StatusCode::NO_CONTENT.into_response()
}

pub async fn upload_document(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Response {
    let mut session = match load_session(&state, id).await {
        Ok(s) => s,
        Err(resp) => return resp,
    };

    let (file_name, bytes) = match read_upload(&mut multipart).await {
        Ok(part) => part,
        Err(e) => {
            warn!(session_id = %id, error = %e, "Rejected upload");
            return error_response(&e);
        }
    };

    match state
        .orchestrator
        .attach_document(&mut session, &file_name, &bytes)
        .await
    {
        Ok(attached) => {
            if let Err(e) = state.sessions.update(&session).await {
                return error_response(&e);
            }
            Json(DocumentAccepted {
                file_name: attached.file_name,
                fragments: attached.fragment_count,
                cached: attached.cached,
            })
            .into_response()
        }
        Err(e) => {
            warn!(session_id = %id, error = %e, "Document attach failed");
            error_response(&e)
        }
    }
}

/// Pulls the single `file` part out of the upload and checks it is a PDF.
async fn read_upload(multipart: &mut Multipart) -> DoctalkResult<(String, Vec<u8>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| DoctalkError::Validation(format!("malformed multipart upload: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| DoctalkError::Validation("upload is missing a file name".to_string()))?;

        if !file_name.to_lowercase().ends_with(".pdf") {
            return Err(DoctalkError::Validation(format!(
                "only .pdf uploads are accepted, got {file_name}"
            )));
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| DoctalkError::Validation(format!("cannot read upload body: {e}")))?;

        return Ok((file_name, bytes.to_vec()));
    }

    Err(DoctalkError::Validation(
        "multipart upload without a `file` part".to_string(),
    ))
}

pub async fn chat(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<ChatRequest>,
) -> Response {
    let prompt = req.prompt.trim();
    if prompt.is_empty() {
        return error_response(&DoctalkError::Validation(
            "prompt must not be empty".to_string(),
        ));
    }

    let mut session = match load_session(&state, id).await {
        Ok(s) => s,
        Err(resp) => return resp,
    };

    let turn = state.orchestrator.handle_turn(&mut session, prompt).await;

    // The turn appended to the history on success and on failure alike;
    // persist the session either way.
    if let Err(e) = state.sessions.update(&session).await {
        return error_response(&e);
    }

    match turn {
        Ok(reply) => {
            let body = ChatResponse {
                message_id: reply.id,
                history_len: session.message_count(),
                reply: reply.content,
            };
            Json(body).into_response()
        }
        Err(e) => error_response(&e),
    }
}

pub async fn reset(State(state): State<Arc<AppState>>, Path(id): Path<Uuid>) -> Response {
    let mut session = match load_session(&state, id).await {
        Ok(s) => s,
        Err(resp) => return resp,
    };

    session.reset();
    if let Err(e) = state.sessions.update(&session).await {
        return error_response(&e);
    }

    info!(session_id = %id, "Conversation reset");
    StatusCode::NO_CONTENT.into_response()
}

pub async fn history(State(state): State<Arc<AppState>>, Path(id): Path<Uuid>) -> Response {
    let session = match load_session(&state, id).await {
        Ok(s) => s,
        Err(resp) => return resp,
    };

    Json(HistoryResponse {
        session_id: session.id,
        messages: session.messages,
    })
    .into_response()
}
