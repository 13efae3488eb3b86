//! Model-backed extraction with deterministic fallback.
//!
//! Serializes the conversation as `User:` / `Agent:` lines, asks the
//! model for a JSON array of candidates constrained to the domain
//! taxonomy, and parses the reply through [`super::parse`]. Any failure
//! along the way -- transport, timeout, non-JSON output, every entry
//! outside the taxonomy -- degrades to the rule extractor. Extraction
//! failures are a quality signal, never an error to the caller.

use a2p_types::conversation::ConversationLog;
use a2p_types::llm::CompletionRequest;
use a2p_types::memory::{CandidateBatch, CandidateRecord, ExtractionSource, Taxonomy};

use super::parse::parse_candidates;
use super::rules::RuleExtractor;
use super::{Extractor, MODEL_CONFIDENCE};
use crate::llm::BoxModelProvider;

/// Extraction instruction template. `{taxonomy}` and `{conversation}`
/// are interpolated per call.
const EXTRACTION_PROMPT: &str = r#"Based on the following conversation with a user, extract the key preferences and facts mentioned by the user. Return ONLY a JSON array of objects, each with:
- "content": a clear statement of the preference or fact
- "category": one of {taxonomy}
- "memory_kind": one of "semantic" (facts/preferences), "episodic" (specific experiences), or "procedural" (habitual behaviors)

Rules:
1. Extract only information stated by the user, never by the agent.
2. Each statement must be a single, self-contained sentence.
3. Do not include greetings or trivial exchanges.
4. If there is nothing worth extracting, return an empty array: []

Conversation:
{conversation}

Extract preferences (JSON array only, no other text):"#;

/// Model-backed extraction strategy for one agent domain.
///
/// Holds its own [`RuleExtractor`] so the fallback path is internal:
/// callers always get a batch, and the batch's `source` records which
/// strategy actually produced it.
pub struct ModelExtractor {
    provider: BoxModelProvider,
    taxonomy: Taxonomy,
    fallback: RuleExtractor,
    context_note: String,
    domain: String,
}

impl ModelExtractor {
    pub fn new(
        provider: BoxModelProvider,
        taxonomy: Taxonomy,
        fallback: RuleExtractor,
        context_note: impl Into<String>,
        domain: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            taxonomy,
            fallback,
            context_note: context_note.into(),
            domain: domain.into(),
        }
    }

    fn prompt_for(&self, log: &ConversationLog) -> String {
        EXTRACTION_PROMPT
            .replace("{taxonomy}", &self.taxonomy.prompt_list())
            .replace("{conversation}", &log.transcript())
    }
}

impl Extractor for ModelExtractor {
    fn name(&self) -> &str {
        "model"
    }

    #[tracing::instrument(
        name = "extract_candidates",
        skip(self, log),
        fields(domain = %self.domain, turn_count = log.len())
    )]
    async fn extract(&self, log: &ConversationLog) -> CandidateBatch {
        if !log.has_user_turn() {
            return CandidateBatch::new(Vec::new(), ExtractionSource::Model);
        }

        let request = CompletionRequest::deterministic(self.prompt_for(log));

        let raw = match self.provider.complete(&request).await {
            Ok(response) => response.content,
            Err(e) => {
                tracing::warn!(error = %e, "model extraction call failed; falling back to rules");
                return self.fallback.scan(log);
            }
        };

        match parse_candidates(&raw, &self.taxonomy) {
            Ok(parsed) => {
                let candidates = parsed
                    .into_iter()
                    .map(|c| CandidateRecord {
                        content: c.content,
                        category: c.category,
                        kind: c.kind,
                        confidence: MODEL_CONFIDENCE,
                        context_note: self.context_note.clone(),
                    })
                    .collect();
                CandidateBatch::new(candidates, ExtractionSource::Model)
            }
            Err(e) => {
                let preview: String = raw.chars().take(200).collect();
                tracing::warn!(
                    error = %e,
                    content_preview = %preview,
                    "could not parse extraction result; falling back to rules"
                );
                self.fallback.scan(log)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::rules::KeywordRule;
    use crate::extract::{BoxExtractor, RULE_CONFIDENCE};
    use crate::llm::ModelProvider;
    use a2p_types::conversation::ConversationTurn;
    use a2p_types::llm::{CompletionResponse, ModelError};
    use a2p_types::memory::MemoryKind;

    /// Test provider returning a canned completion (or failing).
    struct CannedProvider {
        reply: Option<String>,
    }

    impl ModelProvider for CannedProvider {
        fn name(&self) -> &str {
            "canned"
        }

        async fn complete(
            &self,
            _request: &CompletionRequest,
        ) -> Result<CompletionResponse, ModelError> {
            match &self.reply {
                Some(content) => Ok(CompletionResponse {
                    content: content.clone(),
                }),
                None => Err(ModelError::Transport("connection reset".to_string())),
            }
        }
    }

    fn taxonomy() -> Taxonomy {
        Taxonomy::new(["a2p:travel.seats", "a2p:travel.general"])
    }

    fn fallback() -> RuleExtractor {
        RuleExtractor::new(
            vec![KeywordRule::new(
                ["window"],
                "Prefers window seats on flights",
                "a2p:travel.seats",
                MemoryKind::Semantic,
            )],
            "Shared some travel context",
            "a2p:travel.general",
            "Learned during travel planning conversation",
            &taxonomy(),
        )
    }

    fn extractor(reply: Option<&str>) -> ModelExtractor {
        ModelExtractor::new(
            BoxModelProvider::new(CannedProvider {
                reply: reply.map(str::to_string),
            }),
            taxonomy(),
            fallback(),
            "Learned during travel planning conversation",
            "travel",
        )
    }

    fn log() -> ConversationLog {
        let mut log = ConversationLog::new();
        log.push(ConversationTurn::user("I always want a window seat."));
        log.push(ConversationTurn::agent("Noted!"));
        log
    }

    #[tokio::test]
    async fn valid_model_output_becomes_model_batch() {
        let raw = r#"[{"content": "Prefers window seats", "category": "a2p:travel.seats", "memory_kind": "semantic"}]"#;
        let batch = extractor(Some(raw)).extract(&log()).await;
        assert_eq!(batch.source, ExtractionSource::Model);
        assert_eq!(batch.len(), 1);
        assert!((batch.candidates[0].confidence - MODEL_CONFIDENCE).abs() < f64::EPSILON);
        assert_eq!(
            batch.candidates[0].context_note,
            "Learned during travel planning conversation"
        );
    }

    #[tokio::test]
    async fn malformed_output_falls_back_without_raising() {
        let batch = extractor(Some("Sure! [oops not json")).extract(&log()).await;
        assert_eq!(batch.source, ExtractionSource::Rules);
        assert!(!batch.is_empty());
        assert!((batch.candidates[0].confidence - RULE_CONFIDENCE).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn transport_failure_falls_back() {
        let batch = extractor(None).extract(&log()).await;
        assert_eq!(batch.source, ExtractionSource::Rules);
        assert_eq!(batch.candidates[0].category, "a2p:travel.seats");
    }

    #[tokio::test]
    async fn all_entries_outside_taxonomy_fall_back() {
        let raw = r#"[{"content": "x", "category": "a2p:invented", "memory_kind": "semantic"}]"#;
        let batch = extractor(Some(raw)).extract(&log()).await;
        assert_eq!(batch.source, ExtractionSource::Rules);
    }

    #[tokio::test]
    async fn empty_model_array_is_an_empty_model_batch() {
        let batch = extractor(Some("[]")).extract(&log()).await;
        assert_eq!(batch.source, ExtractionSource::Model);
        assert!(batch.is_empty());
    }

    #[tokio::test]
    async fn log_without_user_turns_yields_empty_batch() {
        let batch = extractor(Some("[]"))
            .extract(&ConversationLog::new())
            .await;
        assert!(batch.is_empty());
    }

    #[tokio::test]
    async fn boxed_extractor_preserves_strategy_name() {
        let boxed = BoxExtractor::new(extractor(Some("[]")));
        assert_eq!(boxed.name(), "model");
        let batch = boxed.extract(&log()).await;
        assert_eq!(batch.source, ExtractionSource::Model);
    }
}
