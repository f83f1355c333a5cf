// Question analysis handler: multipart intake, LLM call, JSON extraction

use serde_json::json;
use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
};
use tracing::{instrument, info, error, warn};

use crate::config::state::AppState;
use crate::llm::GenerateRequest;
use crate::utils::response_handler::HandlerResponse;
use super::extract::extract_json;
use super::prompt::{build_prompt, QuestionUpload};

/// Answers an uploaded file of questions with a single JSON value.
///
/// Expects a multipart form with a required `questions.txt` field and
/// optional `image.png` and `data.csv` fields. Unknown fields are ignored.
#[instrument(skip(state, multipart))]
pub async fn analyze_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> HandlerResponse {
    let upload: QuestionUpload = match collect_upload(&mut multipart).await {
        Ok(upload) => upload,
        Err(response) => return response,
    };

    // Checked per request so the service boots without a key
    if state.environment.gemini_api_key.is_none() {
        error!("GEMINI_API_KEY environment variable not set");
        return HandlerResponse::new(StatusCode::INTERNAL_SERVER_ERROR)
            .data(json!({ "error": "missing_api_key" }))
            .message("GEMINI_API_KEY environment variable not set");
    }

    let prompt: String = build_prompt(&upload);
    info!(
        prompt_bytes = prompt.len(),
        has_image = upload.image_filename.is_some(),
        has_csv = upload.csv.is_some(),
        "Submitting questions to the model"
    );

    let generated = match state.llm.generate(&GenerateRequest { prompt }).await {
        Ok(resp) => resp,
        Err(e) => {
            error!("Model request failed: {}", e);
            return HandlerResponse::new(StatusCode::INTERNAL_SERVER_ERROR)
                .data(json!({ "error": "llm_request_failed", "details": e.to_string() }))
                .message("Error calling the Gemini API");
        }
    };

    let text: &str = generated.content.trim();
    if text.is_empty() {
        // A finish reason like SAFETY explains an empty reply
        error!(
            model = %generated.model,
            finish_reason = %generated.finish_reason,
            "Model returned an empty reply"
        );
        return HandlerResponse::new(StatusCode::INTERNAL_SERVER_ERROR)
            .data(json!({ "error": "empty_model_reply" }))
            .message("No response from the Gemini API");
    }

    match extract_json(text) {
        Some(value) => {
            info!(
                model = %generated.model,
                finish_reason = %generated.finish_reason,
                "Questions answered"
            );
            HandlerResponse::new(StatusCode::OK)
                .data(value)
                .message("Questions processed successfully")
        }
        None => {
            error!(model = %generated.model, "Model reply contained no JSON value");
            HandlerResponse::new(StatusCode::INTERNAL_SERVER_ERROR)
                .data(json!({ "error": "invalid_model_reply" }))
                .message("The model did not return valid JSON")
        }
    }
}

/// Drains the multipart stream into a `QuestionUpload`.
///
/// `questions.txt` and `data.csv` must be valid UTF-8; `image.png`
/// contributes only its filename and its bytes are discarded.
async fn collect_upload(multipart: &mut Multipart) -> Result<QuestionUpload, HandlerResponse> {
    let mut questions: Option<String> = None;
    let mut image_filename: Option<String> = None;
    let mut csv: Option<String> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return Err(multipart_error_response(e)),
        };

        let name: String = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "questions.txt" => {
                let bytes = field.bytes().await.map_err(multipart_error_response)?;
                let text = String::from_utf8(bytes.to_vec()).map_err(|e| {
                    warn!("questions.txt is not valid UTF-8: {}", e);
                    HandlerResponse::new(StatusCode::BAD_REQUEST)
                        .data(json!({ "error": "invalid_questions_file" }))
                        .message(format!("Error reading questions.txt: {}", e))
                })?;
                questions = Some(text);
            }
            "image.png" => {
                let filename: String = field
                    .file_name()
                    .map(str::to_string)
                    .unwrap_or_else(|| "image.png".to_string());
                // Only the filename reaches the prompt
                field.bytes().await.map_err(multipart_error_response)?;
                image_filename = Some(filename);
            }
            "data.csv" => {
                let bytes = field.bytes().await.map_err(multipart_error_response)?;
                let text = String::from_utf8(bytes.to_vec()).map_err(|e| {
                    warn!("data.csv is not valid UTF-8: {}", e);
                    HandlerResponse::new(StatusCode::BAD_REQUEST)
                        .data(json!({ "error": "invalid_csv_file" }))
                        .message(format!("Error reading data.csv: {}", e))
                })?;
                csv = Some(text);
            }
            other => {
                // Unknown fields are drained and ignored
                warn!("Ignoring unexpected multipart field: {}", other);
                field.bytes().await.map_err(multipart_error_response)?;
            }
        }
    }

    match questions {
        Some(questions) => Ok(QuestionUpload {
            questions,
            image_filename,
            csv,
        }),
        None => Err(HandlerResponse::new(StatusCode::BAD_REQUEST)
            .data(json!({ "error": "missing_questions_file" }))
            .message("Multipart field 'questions.txt' is required")),
    }
}

/// Maps a multipart read error to the standard response envelope.
///
/// Keeps the status axum derived from the underlying error, so an upload
/// exceeding the global body limit still surfaces as 413.
fn multipart_error_response(e: MultipartError) -> HandlerResponse {
    warn!("Failed to process multipart field: {}", e);
    HandlerResponse::new(e.status())
        .data(json!({ "error": "multipart_read_failed" }))
        .message(format!("Failed to read multipart payload: {}", e))
}
