use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chirp_core::phrase::PhraseState;
use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ManageParams {
    pub endpoint: Option<String>,
    pub action: Option<String>,
}

#[derive(Deserialize)]
struct OverrideBody {
    date: Option<String>,
    phrase: Option<String>,
}

/// GET/POST /api/manage — single management surface for the phrase bot,
/// dispatching on the `endpoint` and `action` query parameters.
pub async fn manage(
    State(app): State<AppState>,
    Query(params): Query<ManageParams>,
    body: String,
) -> Result<Response, AppError> {
    let endpoint = params.endpoint.ok_or_else(|| {
        AppError::bad_request(
            "Missing required parameter 'endpoint'. Use 'override' or 'killswitch'",
        )
    })?;

    match endpoint.as_str() {
        "override" => {
            let action = params.action.ok_or_else(|| {
                AppError::bad_request(
                    "Missing required parameter 'action'. Use 'add', 'remove', or 'list'",
                )
            })?;
            override_action(&app, &action, &body).await
        }
        "killswitch" => {
            let action = params.action.ok_or_else(|| {
                AppError::bad_request(
                    "Missing required parameter 'action'. Use 'status', 'enable', or 'disable'",
                )
            })?;
            killswitch_action(&app, &action).await
        }
        other => Err(AppError::bad_request(format!(
            "Unknown endpoint: {other}. Use 'override' or 'killswitch'"
        ))),
    }
}

async fn override_action(app: &AppState, action: &str, body: &str) -> Result<Response, AppError> {
    match action {
        "list" => {
            let app = app.clone();
            let table = tokio::task::spawn_blocking(move || {
                PhraseState::new(&*app.store, &app.bot_name).load_overrides()
            })
            .await
            .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))?;
            Ok((StatusCode::OK, Json(serde_json::to_value(table)?)).into_response())
        }
        "add" | "remove" => {
            if body.trim().is_empty() {
                return Err(AppError::bad_request("Request body required"));
            }
            let parsed: OverrideBody = serde_json::from_str(body)
                .map_err(|_| AppError::bad_request("Invalid JSON in request body"))?;
            let Some(date) = parsed.date else {
                return Err(AppError::bad_request(
                    "Please provide 'date' in format YYYY-MM-DD",
                ));
            };

            if action == "add" {
                let Some(phrase) = parsed.phrase else {
                    return Err(AppError::bad_request("Please provide 'phrase' for the override"));
                };
                let app = app.clone();
                let (d, p) = (date.clone(), phrase.clone());
                tokio::task::spawn_blocking(move || {
                    PhraseState::new(&*app.store, &app.bot_name).add_override(&d, &p)
                })
                .await
                .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;
                Ok((
                    StatusCode::OK,
                    Json(json!({
                        "success": true,
                        "message": format!("Override scheduled for {date}"),
                        "date": date,
                        "phrase": phrase,
                    })),
                )
                    .into_response())
            } else {
                let app = app.clone();
                let d = date.clone();
                let removed = tokio::task::spawn_blocking(move || {
                    PhraseState::new(&*app.store, &app.bot_name).remove_override(&d)
                })
                .await
                .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;
                if removed {
                    Ok((
                        StatusCode::OK,
                        Json(json!({
                            "success": true,
                            "message": format!("Override removed for {date}"),
                        })),
                    )
                        .into_response())
                } else {
                    Ok((
                        StatusCode::NOT_FOUND,
                        Json(json!({
                            "success": false,
                            "message": format!("No override found for {date}"),
                        })),
                    )
                        .into_response())
                }
            }
        }
        other => Err(AppError::bad_request(format!(
            "Unknown action: {other}. Use 'add', 'remove', or 'list'"
        ))),
    }
}

async fn killswitch_action(app: &AppState, action: &str) -> Result<Response, AppError> {
    match action {
        "status" => {
            let app = app.clone();
            let enabled = tokio::task::spawn_blocking(move || {
                PhraseState::new(&*app.store, &app.bot_name).is_enabled()
            })
            .await
            .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))?;
            Ok((
                StatusCode::OK,
                Json(json!({
                    "enabled": enabled,
                    "status": if enabled { "enabled" } else { "disabled" },
                })),
            )
                .into_response())
        }
        "enable" | "disable" => {
            let enabled = action == "enable";
            let app = app.clone();
            tokio::task::spawn_blocking(move || {
                PhraseState::new(&*app.store, &app.bot_name).set_enabled(enabled)
            })
            .await
            .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;
            Ok((
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "message": if enabled { "Bot enabled" } else { "Bot disabled" },
                    "enabled": enabled,
                })),
            )
                .into_response())
        }
        other => Err(AppError::bad_request(format!(
            "Unknown action: {other}. Use 'status', 'enable', or 'disable'"
        ))),
    }
}
