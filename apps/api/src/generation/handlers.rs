//! Axum route handlers for the training-program API.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::generation::parse_model_response;
use crate::generation::prompts::{build_training_program_prompt, CONNECTION_TEST_PROMPT};
use crate::models::profile::UserProfile;
use crate::models::program::TrainingProgramResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SimpleQuestionRequest {
    pub question: String,
}

/// POST /generate-training-program
///
/// Validates the profile, renders the prompt, calls the model backend,
/// and runs the reply through the parsing pipeline. The final
/// deserialization into `TrainingProgramResponse` is the schema check:
/// the pipeline guarantees it succeeds for anything the model says, so a
/// failure here is a genuine internal error.
pub async fn handle_generate_program(
    State(state): State<AppState>,
    Json(profile): Json<UserProfile>,
) -> Result<Json<TrainingProgramResponse>, AppError> {
    profile.validate().map_err(AppError::UnprocessableEntity)?;

    tracing::info!(
        model = %state.config.ollama_model,
        age = profile.age,
        goal = %profile.main_goal,
        experience = %profile.experience_level,
        "generating training program"
    );

    let prompt = build_training_program_prompt(&profile);
    let reply = state
        .llm
        .generate_program(&prompt)
        .await
        .map_err(|e| AppError::Llm(e.to_string()))?;

    let program = parse_model_response(&reply);
    let response: TrainingProgramResponse = serde_json::from_value(program).map_err(|e| {
        AppError::Internal(anyhow::anyhow!(
            "normalized program failed the schema check: {e}"
        ))
    })?;

    tracing::info!(
        program = %response.name,
        exercises = response.exercises.as_ref().map_or(0, Vec::len),
        "training program generated"
    );

    Ok(Json(response))
}

/// POST /test-ai-connection
///
/// Short-timeout probe so callers can check backend availability without
/// sitting out the full generation timeout.
pub async fn handle_test_connection(
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let reply = state
        .llm
        .test_connection(CONNECTION_TEST_PROMPT)
        .await
        .map_err(|e| AppError::Llm(e.to_string()))?;

    Ok(Json(json!({
        "status": "success",
        "ai_response": reply
    })))
}

/// POST /simple-question
///
/// Free-form passthrough to the model with constrained sampling. Kept off
/// the program pipeline: the reply goes back verbatim. A blank question
/// is rejected before any backend call.
pub async fn handle_simple_question(
    State(state): State<AppState>,
    Json(request): Json<SimpleQuestionRequest>,
) -> Result<Json<Value>, AppError> {
    if request.question.trim().is_empty() {
        return Err(AppError::Validation("question cannot be empty".to_string()));
    }

    let reply = state
        .llm
        .ask(&request.question)
        .await
        .map_err(|e| AppError::Llm(e.to_string()))?;

    Ok(Json(json!({
        "status": "success",
        "question": request.question,
        "response": reply
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::llm_client::LlmClient;

    fn test_state() -> AppState {
        let config = Config {
            ollama_base_url: "http://localhost:11434".to_string(),
            ollama_model: "llama2:7b".to_string(),
            ollama_timeout_secs: 300,
            port: 8000,
            rust_log: "info".to_string(),
        };
        let llm = LlmClient::new(&config);
        AppState { llm, config }
    }

    fn out_of_range_profile() -> UserProfile {
        UserProfile {
            age: 9,
            gender: "Homme".to_string(),
            weight: 20.0,
            height: 180.0,
            experience_level: "Débutant".to_string(),
            main_goal: "Force".to_string(),
            session_frequency: "3 fois par semaine".to_string(),
            session_duration: "45 minutes".to_string(),
            equipment: "Sans équipement".to_string(),
            training_preference: "Musculation".to_string(),
            body_fat_percentage: None,
            phone_number: None,
            first_name: None,
            last_name: None,
        }
    }

    #[tokio::test]
    async fn test_generate_rejects_out_of_range_profile() {
        // Must fail before any backend call: no server is listening here.
        let result =
            handle_generate_program(State(test_state()), Json(out_of_range_profile())).await;

        match result {
            Err(AppError::UnprocessableEntity(message)) => {
                assert!(message.contains("age must be between 13 and 100"));
                assert!(message.contains("weight must be between 30 and 300"));
            }
            _ => panic!("expected UnprocessableEntity for out-of-range profile"),
        }
    }

    #[tokio::test]
    async fn test_simple_question_rejects_empty_body() {
        let request = SimpleQuestionRequest {
            question: "   ".to_string(),
        };
        let result = handle_simple_question(State(test_state()), Json(request)).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
