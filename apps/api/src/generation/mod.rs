// Program generation: prompt rendering, model-output parsing, fallback
// construction, and schema normalization.
// All model calls go through llm_client — no direct Ollama calls here.

pub mod extract;
pub mod fallback;
pub mod handlers;
pub mod normalize;
pub mod prompts;

use serde_json::Value;

use crate::generation::extract::{extract_candidate, repair_candidate};
use crate::generation::fallback::build_fallback_program;
use crate::generation::normalize::normalize_program;

/// Turns raw model output into a schema-conformant program map.
///
/// Parse path: widest brace span, one repair-and-reparse attempt, then the
/// prose fallback. Every path ends in the normalizer, so the result always
/// carries the full required field set. Total: any input string produces a
/// program, never an error.
pub fn parse_model_response(raw: &str) -> Value {
    let trimmed = raw.trim();

    let parsed = match extract_candidate(trimmed) {
        Some(candidate) => match serde_json::from_str::<Value>(candidate) {
            Ok(value) => {
                tracing::debug!(bytes = candidate.len(), "model reply parsed as JSON");
                Some(value)
            }
            Err(first_err) => {
                tracing::debug!(error = %first_err, "candidate rejected, attempting repair");
                let repaired = repair_candidate(candidate);
                match serde_json::from_str::<Value>(&repaired) {
                    Ok(value) => Some(value),
                    Err(second_err) => {
                        tracing::warn!(
                            error = %second_err,
                            "candidate unparseable after repair, using fallback"
                        );
                        None
                    }
                }
            }
        },
        None => {
            tracing::warn!("no JSON candidate in model reply, using fallback");
            None
        }
    };

    let program = parsed.unwrap_or_else(|| build_fallback_program(trimmed));
    normalize_program(program)
}
