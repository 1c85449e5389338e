use crate::{
    assistant::ChatMessage,
    auth::middleware::AuthSession,
    types::{AppError, ChatRequest, ChatResponse, Result},
    AppState,
};
use axum::{extract::State, Json};

/// Talk to the portal assistant
///
/// The message and the reply are appended to the session transcript. When
/// auto-navigation is on (request flag, else `assistant.auto_navigate`), a
/// `navigate` action also moves the session to its target section.
#[utoipa::path(
    post,
    path = "/api/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Assistant reply", body = ChatResponse),
        (status = 400, description = "Empty message"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "chat",
    security(("bearer" = []))
)]
pub async fn chat(
    State(state): State<AppState>,
    auth: AuthSession,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    let text = payload.message.trim();
    if text.is_empty() {
        return Err(AppError::InvalidInput("Message cannot be empty".to_string()));
    }
    let auto_navigate = payload
        .auto_navigate
        .unwrap_or(state.config.config().assistant.auto_navigate);

    let mut context = auth.context.lock();
    let reply = state.dispatcher.dispatch(text, &context.dispatch_context());
    let action = reply.action.clone();
    let message = ChatMessage::from(reply);

    context.transcript_mut().push(ChatMessage::user(text));
    context.transcript_mut().push(message.clone());

    if auto_navigate {
        if let Some(section) = action.as_ref().and_then(|a| a.target_section()) {
            let screen = context.navigate(section);
            tracing::debug!("Assistant moved user {} to {}", auth.claims.sub, screen.id());
        }
    }

    Ok(Json(ChatResponse {
        reply: message,
        action,
        screen: context.screen(),
    }))
}

/// Full transcript of the current session, oldest first
#[utoipa::path(
    get,
    path = "/api/chat/history",
    responses(
        (status = 200, description = "Chat transcript", body = Vec<ChatMessage>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "chat",
    security(("bearer" = []))
)]
pub async fn history(auth: AuthSession) -> Json<Vec<ChatMessage>> {
    Json(auth.context.lock().transcript().messages().to_vec())
}
