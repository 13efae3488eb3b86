//! Deterministic keyword-rule extraction.
//!
//! The fallback strategy: scans user-authored turns (never the agent's
//! own speech) for fixed domain keywords and emits one candidate per
//! matched rule. When nothing matches but the user said anything at
//! all, a single low-information catch-all candidate is emitted so a
//! session still makes progress under total extraction failure.

use a2p_types::conversation::ConversationLog;
use a2p_types::memory::{
    CandidateBatch, CandidateRecord, ExtractionSource, MemoryKind, Taxonomy,
};

use super::{Extractor, CATCH_ALL_CONFIDENCE, RULE_CONFIDENCE};

/// One keyword rule: if any keyword appears in the user's combined
/// text, emit a fixed candidate.
#[derive(Debug, Clone)]
pub struct KeywordRule {
    pub keywords: Vec<String>,
    pub content: String,
    pub category: String,
    pub kind: MemoryKind,
}

impl KeywordRule {
    pub fn new(
        keywords: impl IntoIterator<Item = impl Into<String>>,
        content: impl Into<String>,
        category: impl Into<String>,
        kind: MemoryKind,
    ) -> Self {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.into().to_lowercase())
                .collect(),
            content: content.into(),
            category: category.into(),
            kind,
        }
    }

    fn matches(&self, lowercased_text: &str) -> bool {
        self.keywords.iter().any(|k| lowercased_text.contains(k.as_str()))
    }
}

/// Rule-based extractor for one agent domain.
#[derive(Debug, Clone)]
pub struct RuleExtractor {
    rules: Vec<KeywordRule>,
    catch_all: CandidateRecord,
    context_note: String,
}

impl RuleExtractor {
    /// Build a rule extractor, checking every rule's category (and the
    /// catch-all's) against the domain taxonomy up front.
    ///
    /// # Panics
    /// Panics if a rule emits a category outside the taxonomy. Rule
    /// tables are static domain definitions, so this is a programming
    /// error, not a runtime condition.
    pub fn new(
        rules: Vec<KeywordRule>,
        catch_all_content: impl Into<String>,
        catch_all_category: impl Into<String>,
        context_note: impl Into<String>,
        taxonomy: &Taxonomy,
    ) -> Self {
        let catch_all_category = catch_all_category.into();
        for rule in &rules {
            assert!(
                taxonomy.contains(&rule.category),
                "rule category '{}' is not in the taxonomy",
                rule.category
            );
        }
        assert!(
            taxonomy.contains(&catch_all_category),
            "catch-all category '{catch_all_category}' is not in the taxonomy"
        );
        let context_note = context_note.into();
        Self {
            rules,
            catch_all: CandidateRecord {
                content: catch_all_content.into(),
                category: catch_all_category,
                kind: MemoryKind::Semantic,
                confidence: CATCH_ALL_CONFIDENCE,
                context_note: context_note.clone(),
            },
            context_note,
        }
    }

    /// Synchronous rule scan; the async trait method wraps this.
    pub fn scan(&self, log: &ConversationLog) -> CandidateBatch {
        if !log.has_user_turn() {
            return CandidateBatch::new(Vec::new(), ExtractionSource::Rules);
        }

        let text = log
            .user_turns()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        let mut candidates: Vec<CandidateRecord> = self
            .rules
            .iter()
            .filter(|rule| rule.matches(&text))
            .map(|rule| CandidateRecord {
                content: rule.content.clone(),
                category: rule.category.clone(),
                kind: rule.kind,
                confidence: RULE_CONFIDENCE,
                context_note: self.context_note.clone(),
            })
            .collect();

        if candidates.is_empty() {
            candidates.push(self.catch_all.clone());
        }

        CandidateBatch::new(candidates, ExtractionSource::Rules)
    }
}

impl Extractor for RuleExtractor {
    fn name(&self) -> &str {
        "rules"
    }

    async fn extract(&self, log: &ConversationLog) -> CandidateBatch {
        self.scan(log)
    }
}
