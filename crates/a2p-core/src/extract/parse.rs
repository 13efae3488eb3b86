//! Structured-candidate parsing of model output.
//!
//! Models are instructed to return only a JSON array, but in practice
//! wrap it in a fenced code block often enough that stripping the fence
//! has to be handled here. This module is the single place that turns
//! free text into candidate drafts; everything upstream treats its
//! typed failure as the signal to fall back to rule extraction.

use serde::Deserialize;

use a2p_types::error::ExtractionParseError;
use a2p_types::memory::{MemoryKind, Taxonomy};

/// One entry of the model's JSON array, before validation.
///
/// `memory_type` is accepted as an alias because some models echo the
/// older field name from the prompt examples they were trained on.
#[derive(Debug, Deserialize)]
struct RawCandidate {
    content: String,
    category: String,
    #[serde(alias = "memory_type")]
    memory_kind: String,
}

/// A validated candidate draft: in-taxonomy category, known kind,
/// non-empty content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCandidate {
    pub content: String,
    pub category: String,
    pub kind: MemoryKind,
}

/// Strip a leading/trailing fenced-code delimiter if present.
///
/// Takes everything between the first newline after the opening fence
/// and the matching closing fence; returns the input unchanged when no
/// fence is found.
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Skip the info string ("json", ...) up to the first newline.
    let Some(newline) = rest.find('\n') else {
        return trimmed;
    };
    let body = &rest[newline + 1..];
    match body.rfind("```") {
        Some(end) => body[..end].trim(),
        None => body.trim(),
    }
}

/// Parse model output into validated candidate drafts.
///
/// - Not a JSON array at all -> [`ExtractionParseError::NotJson`].
/// - Entries with an unknown kind or a category outside the taxonomy
///   are skipped with a warning (categories are never invented outside
///   the configured taxonomy).
/// - A non-empty array in which every entry was skipped ->
///   [`ExtractionParseError::AllOutsideTaxonomy`], so the caller falls
///   back instead of proposing nothing.
/// - An empty array parses as an empty draft list: the model found
///   nothing worth remembering, which is valid.
pub fn parse_candidates(
    raw: &str,
    taxonomy: &Taxonomy,
) -> Result<Vec<ParsedCandidate>, ExtractionParseError> {
    let body = strip_code_fence(raw);

    let entries: Vec<RawCandidate> = serde_json::from_str(body)
        .map_err(|e| ExtractionParseError::NotJson(e.to_string()))?;

    let total = entries.len();
    let candidates: Vec<ParsedCandidate> = entries
        .into_iter()
        .filter_map(|raw| {
            let kind: MemoryKind = match raw.memory_kind.parse() {
                Ok(kind) => kind,
                Err(_) => {
                    tracing::warn!(
                        memory_kind = %raw.memory_kind,
                        content = %raw.content,
                        "unknown memory kind in model output; skipping entry"
                    );
                    return None;
                }
            };
            if raw.content.trim().is_empty() {
                tracing::warn!(category = %raw.category, "empty content in model output; skipping entry");
                return None;
            }
            if !taxonomy.contains(&raw.category) {
                tracing::warn!(
                    category = %raw.category,
                    content = %raw.content,
                    "category outside taxonomy in model output; skipping entry"
                );
                return None;
            }
            Some(ParsedCandidate {
                content: raw.content,
                category: raw.category,
                kind,
            })
        })
        .collect();

    if candidates.is_empty() && total > 0 {
        return Err(ExtractionParseError::AllOutsideTaxonomy);
    }
    Ok(candidates)
}
