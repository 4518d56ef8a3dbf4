//! Resolution prompt composition and response normalization.
//!
//! Providers share one prompt contract (a JSON object with solutionTitle,
//! solutionDescription, implementationSteps, confidenceScore, reasoning,
//! relatedErrors, preventionSteps) and one parser that coerces untrusted
//! model output into a [`ResolutionResponse`]. The parser is the only place
//! where silent data-loss is intentional: well-formed but incomplete JSON is
//! filled with defaults, while input containing no JSON object at all (or
//! invalid JSON inside the matched braces) fails with
//! [`AiError::MalformedOutput`].

use crate::error::{AiError, AiResult};
use crate::logging::{log_debug, log_warn};
use crate::types::{ResolutionRequest, ResolutionResponse};
use serde_json::Value;

/// Artifact excerpt character budget for hosted backends.
pub(crate) const HOSTED_EXCERPT_BUDGET: usize = 1000;

/// Artifact excerpt character budget for the local backend. Local models
/// have small context windows, so excerpts are cut harder.
pub(crate) const LOCAL_EXCERPT_BUDGET: usize = 500;

/// Fallback confidence when a hosted backend omits the score.
pub(crate) const HOSTED_DEFAULT_CONFIDENCE: f64 = 0.8;

/// Fallback confidence when the local backend omits the score.
pub(crate) const LOCAL_DEFAULT_CONFIDENCE: f64 = 0.7;

/// Resolution generation always overrides these two options, regardless of
/// what the caller supplied.
pub(crate) const RESOLUTION_TEMPERATURE: f64 = 0.5;
pub(crate) const RESOLUTION_MAX_TOKENS: u32 = 2000;

/// System instruction for hosted backends with a distinct system slot.
pub(crate) const RESOLUTION_SYSTEM_PROMPT: &str = "You are an expert incident resolution assistant. Analyze the incident and provide actionable solutions.
Return a JSON object with: solutionTitle, solutionDescription, implementationSteps (array), confidenceScore (0-1), reasoning, relatedErrors (array), preventionSteps (array).";

/// Compose the user turn for hosted backends.
///
/// Artifact excerpts are truncated to `excerpt_budget` characters each to
/// bound prompt size; a "Previous attempts" trailer is appended when prior
/// resolutions exist.
pub(crate) fn build_incident_prompt(request: &ResolutionRequest, excerpt_budget: usize) -> String {
    let mut prompt = format!(
        "Incident: {}\nDescription: {}\n\nArtifact Data:\n{}\n",
        request.incident_title,
        request.incident_description,
        format_artifacts(&request.artifact_texts, excerpt_budget),
    );

    if let Some(previous) = &request.previous_resolutions {
        if !previous.is_empty() {
            prompt.push_str(&format!("\nPrevious attempts:\n{}\n", previous.join("\n")));
        }
    }

    prompt.push_str("\nGenerate a resolution with implementation steps.");
    prompt
}

/// Compose the self-contained prompt for the local backend.
///
/// Local models get no separate system slot, so the instruction, incident
/// data, and an explicit JSON template all go into one prompt.
pub(crate) fn build_local_incident_prompt(request: &ResolutionRequest) -> String {
    format!(
        "You are an expert incident resolution assistant.\n\n\
         Incident: {}\nDescription: {}\n\n\
         Artifact Data:\n{}\n\n\
         Provide a JSON response with:\n\
         {{\n  \"solutionTitle\": \"string\",\n  \"solutionDescription\": \"string\",\n  \"implementationSteps\": [\"step1\", \"step2\"],\n  \"confidenceScore\": 0.8,\n  \"reasoning\": \"string\",\n  \"relatedErrors\": [],\n  \"preventionSteps\": []\n}}",
        request.incident_title,
        request.incident_description,
        format_artifacts(&request.artifact_texts, LOCAL_EXCERPT_BUDGET),
    )
}

fn format_artifacts(artifact_texts: &[String], excerpt_budget: usize) -> String {
    artifact_texts
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let excerpt: String = text.chars().take(excerpt_budget).collect();
            format!("--- Artifact {} ---\n{}", i + 1, excerpt)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse raw backend text into a validated [`ResolutionResponse`].
///
/// The input is scanned for the outermost `{...}` JSON object, since some
/// backends wrap JSON in explanatory prose. Missing fields are filled with
/// defaults: title "Solution", description the full raw text, empty lists,
/// empty reasoning, and `default_confidence` for an absent score. The
/// confidence score is always clamped to [0, 1].
pub(crate) fn parse_resolution(raw: &str, default_confidence: f64) -> AiResult<ResolutionResponse> {
    log_debug!(
        content_length = raw.len(),
        "Parsing model output into structured resolution"
    );

    let json_str = extract_json_object(raw).ok_or_else(|| {
        AiError::malformed_output(format!(
            "No JSON object found in model output: {}",
            content_preview(raw)
        ))
    })?;

    let parsed: Value = serde_json::from_str(&json_str).map_err(|e| {
        log_warn!(
            error = %e,
            content_preview = content_preview(raw),
            "Extracted JSON object failed to parse"
        );
        AiError::malformed_output(format!("Invalid JSON in model output: {e}"))
    })?;

    let confidence_score = parsed
        .get("confidenceScore")
        .and_then(Value::as_f64)
        .unwrap_or(default_confidence)
        .clamp(0.0, 1.0);

    Ok(ResolutionResponse {
        solution_title: string_field(&parsed, "solutionTitle")
            .unwrap_or_else(|| "Solution".to_string()),
        solution_description: string_field(&parsed, "solutionDescription")
            .unwrap_or_else(|| raw.to_string()),
        implementation_steps: string_list_field(&parsed, "implementationSteps"),
        confidence_score,
        reasoning: string_field(&parsed, "reasoning").unwrap_or_default(),
        related_errors: string_list_field(&parsed, "relatedErrors"),
        prevention_steps: string_list_field(&parsed, "preventionSteps"),
    })
}

fn string_field(parsed: &Value, key: &str) -> Option<String> {
    parsed.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Extract a string list, defaulting to empty when the field is absent or
/// not list-shaped. Non-string list entries are rendered as JSON.
fn string_list_field(parsed: &Value, key: &str) -> Vec<String> {
    parsed
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|item| {
                    item.as_str()
                        .map(str::to_string)
                        .unwrap_or_else(|| item.to_string())
                })
                .collect()
        })
        .unwrap_or_default()
}

fn content_preview(raw: &str) -> String {
    let preview: String = raw.chars().take(200).collect();
    if raw.chars().count() > 200 {
        format!("{preview}...")
    } else {
        preview
    }
}

/// Extract the outermost JSON object from mixed content (text + JSON).
fn extract_json_object(content: &str) -> Option<String> {
    let start_idx = content.find('{')?;
    let chars: Vec<char> = content[start_idx..].chars().collect();
    let json_end = find_balanced_json_end(&chars)?;
    Some(chars[0..=json_end].iter().collect())
}

/// Find the index where balanced JSON ends, handling nested braces and
/// brace characters inside string literals.
fn find_balanced_json_end(chars: &[char]) -> Option<usize> {
    let mut brace_count = 0;
    let mut in_string = false;
    let mut escaped = false;

    for (char_idx, ch) in chars.iter().enumerate() {
        match ch {
            '"' if !escaped => in_string = !in_string,
            '\\' if in_string => escaped = !escaped,
            '{' if !in_string => brace_count += 1,
            '}' if !in_string => {
                brace_count -= 1;
                if brace_count == 0 {
                    return Some(char_idx);
                }
            }
            _ => escaped = false,
        }

        if *ch != '\\' {
            escaped = false;
        }
    }

    None // Unbalanced braces
}
