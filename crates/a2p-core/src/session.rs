//! Agent sessions.
//!
//! An [`AgentSession`] walks one agent through the exchange protocol:
//! load the scoped profile context, hold a sequential conversation,
//! then extract and propose memories once at session end. Every phase
//! degrades rather than aborts: a failed context load yields empty
//! grounding, a failed reply yields a fixed acknowledgment, and
//! proposal failures are reported per record.

use std::sync::Arc;

use a2p_types::conversation::{ConversationLog, ConversationTurn};
use a2p_types::llm::{CompletionRequest, Message};
use a2p_types::memory::{CandidateBatch, ExtractionSource, Taxonomy};
use a2p_types::scope::ScopeSet;

use crate::compose::ContextComposer;
use crate::extract::model::ModelExtractor;
use crate::extract::rules::{KeywordRule, RuleExtractor};
use crate::extract::BoxExtractor;
use crate::llm::BoxModelProvider;
use crate::profile::{BatchReport, ProfileReader, ProfileStore, ProposalClient};

/// Placeholder in a domain's system prompt where the composed profile
/// context is interpolated.
pub const CONTEXT_PLACEHOLDER: &str = "{profile_context}";

/// Reply used when the responder fails mid-conversation. The session
/// keeps going; the user's turn is still in the log for extraction.
const FALLBACK_REPLY: &str = "Got it, I'll keep that in mind.";

const REPLY_MAX_TOKENS: u32 = 1024;

/// Identity and behavior of one agent in the exchange.
#[derive(Debug, Clone)]
pub struct AgentDomain {
    /// Short identifier used as proposal origin (e.g., "travel").
    pub id: String,
    /// Name shown to the operator (e.g., "Travel Agent").
    pub display_name: String,
    /// System prompt template containing [`CONTEXT_PLACEHOLDER`].
    pub system_prompt: String,
    /// Categories this domain may emit.
    pub taxonomy: Taxonomy,
    /// Profile slice this domain reads.
    pub scopes: ScopeSet,
    /// Keyword table for the rule extraction strategy.
    pub rules: Vec<KeywordRule>,
    /// Catch-all candidate emitted when no rule matches.
    pub catch_all_content: String,
    /// Category of the catch-all candidate; must be in the taxonomy.
    pub default_category: String,
    /// Provenance note stamped on every candidate from this domain.
    pub context_note: String,
    /// Read-only domains (the assistant) never extract or propose.
    pub proposes: bool,
}

impl AgentDomain {
    /// The rule extraction strategy for this domain.
    ///
    /// # Panics
    /// Panics if a rule or the default category falls outside the
    /// taxonomy; domain definitions are static.
    pub fn rule_extractor(&self) -> RuleExtractor {
        RuleExtractor::new(
            self.rules.clone(),
            self.catch_all_content.clone(),
            self.default_category.clone(),
            self.context_note.clone(),
            &self.taxonomy,
        )
    }

    /// Select the extraction strategy once: model-backed when a
    /// provider is configured, rules otherwise.
    pub fn extractor(&self, provider: Option<BoxModelProvider>) -> BoxExtractor {
        match provider {
            Some(provider) => BoxExtractor::new(ModelExtractor::new(
                provider,
                self.taxonomy.clone(),
                self.rule_extractor(),
                self.context_note.clone(),
                self.id.clone(),
            )),
            None => BoxExtractor::new(self.rule_extractor()),
        }
    }
}

/// Where a session is in its lifecycle. Phases only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    ContextLoaded,
    Conversing,
    Extracting,
    Proposing,
    Done,
}

/// Outcome of one completed session.
#[derive(Debug)]
pub struct SessionReport {
    /// The extracted batch; `None` for read-only domains.
    pub batch: Option<CandidateBatch>,
    pub proposals: BatchReport,
}

impl SessionReport {
    /// Which strategy produced the batch, when one ran.
    pub fn source(&self) -> Option<ExtractionSource> {
        self.batch.as_ref().map(|b| b.source)
    }

    /// The "N of M memories proposed" line.
    pub fn summary(&self) -> String {
        self.proposals.summary()
    }
}

/// One agent's run through the protocol against a profile store.
pub struct AgentSession<S> {
    domain: AgentDomain,
    store: Arc<S>,
    responder: BoxModelProvider,
    extractor: BoxExtractor,
    composer: ContextComposer,
    phase: SessionPhase,
    log: ConversationLog,
    grounding: String,
}

impl<S: ProfileStore> AgentSession<S> {
    pub fn new(
        domain: AgentDomain,
        store: Arc<S>,
        responder: BoxModelProvider,
        extractor: BoxExtractor,
        composer: ContextComposer,
    ) -> Self {
        Self {
            domain,
            store,
            responder,
            extractor,
            composer,
            phase: SessionPhase::Idle,
            log: ConversationLog::new(),
            grounding: String::new(),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn domain(&self) -> &AgentDomain {
        &self.domain
    }

    /// Composed profile context loaded for this session.
    pub fn grounding(&self) -> &str {
        &self.grounding
    }

    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    /// Load the scoped profile slice and compose grounding text.
    ///
    /// Always reaches `context_loaded`: a read failure grounds the
    /// session in an empty view instead of blocking it.
    #[tracing::instrument(name = "load_context", skip(self), fields(agent = %self.domain.id))]
    pub async fn load_context(&mut self) -> &str {
        let reader = ProfileReader::new(self.store.as_ref());
        let view = reader.read(&self.domain.scopes).await;
        tracing::info!(memories = view.total(), "profile context loaded");
        self.grounding = self.composer.compose(&view);
        self.phase = SessionPhase::ContextLoaded;
        &self.grounding
    }

    /// One conversational exchange: record the user's turn, get the
    /// agent's reply, record it, return it.
    ///
    /// A responder failure degrades to a fixed acknowledgment; the
    /// user's turn stays in the log either way, so extraction still
    /// sees it.
    #[tracing::instrument(name = "exchange", skip(self, user_text), fields(agent = %self.domain.id))]
    pub async fn say(&mut self, user_text: impl Into<String>) -> String {
        if self.phase == SessionPhase::Idle {
            tracing::warn!("conversation started without context; grounding is empty");
        }
        self.phase = SessionPhase::Conversing;
        self.log.push(ConversationTurn::user(user_text));

        let request = self.reply_request();
        let reply = match self.responder.complete(&request).await {
            Ok(response) => response.content,
            Err(e) => {
                tracing::warn!(error = %e, "responder failed; using fallback reply");
                FALLBACK_REPLY.to_string()
            }
        };

        self.log.push(ConversationTurn::agent(reply.clone()));
        reply
    }

    /// End the session: one extraction pass over the full log, then one
    /// proposal batch. Read-only domains skip both.
    #[tracing::instrument(name = "finish_session", skip(self), fields(agent = %self.domain.id))]
    pub async fn finish(mut self) -> SessionReport {
        if !self.domain.proposes {
            tracing::info!("read-only domain; skipping extraction");
            self.phase = SessionPhase::Done;
            return SessionReport {
                batch: None,
                proposals: BatchReport::default(),
            };
        }

        self.phase = SessionPhase::Extracting;
        let batch = self.extractor.extract(&self.log).await;
        tracing::info!(
            candidates = batch.len(),
            source = %batch.source,
            "extraction complete"
        );

        self.phase = SessionPhase::Proposing;
        let client = ProposalClient::new(self.store.as_ref(), self.domain.id.clone());
        let proposals = client.propose_batch(&batch).await;
        tracing::info!(summary = %proposals.summary(), "session finished");

        self.phase = SessionPhase::Done;
        SessionReport {
            batch: Some(batch),
            proposals,
        }
    }

    fn reply_request(&self) -> CompletionRequest {
        let system = self
            .domain
            .system_prompt
            .replace(CONTEXT_PLACEHOLDER, &self.grounding);
        let messages = self
            .log
            .turns()
            .iter()
            .map(|turn| match turn.role {
                a2p_types::conversation::TurnRole::User => Message::user(turn.text.clone()),
                a2p_types::conversation::TurnRole::Agent => Message::assistant(turn.text.clone()),
            })
            .collect();
        CompletionRequest {
            messages,
            system: Some(system),
            max_tokens: REPLY_MAX_TOKENS,
            temperature: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ModelProvider;
    use a2p_types::error::{ProfileError, ProposalError};
    use a2p_types::llm::{CompletionResponse, ModelError};
    use a2p_types::memory::{CandidateRecord, MemoryKind};
    use a2p_types::profile::{ProfileView, ProposalHandle};
    use std::sync::Mutex;

    /// Store double recording proposals, with a switchable read result.
    struct RecordingStore {
        fail_reads: bool,
        proposed: Mutex<Vec<CandidateRecord>>,
    }

    impl RecordingStore {
        fn new(fail_reads: bool) -> Self {
            Self {
                fail_reads,
                proposed: Mutex::new(Vec::new()),
            }
        }
    }

    impl ProfileStore for RecordingStore {
        async fn read_profile(&self, _scopes: &ScopeSet) -> Result<ProfileView, ProfileError> {
            if self.fail_reads {
                Err(ProfileError::Timeout)
            } else {
                Ok(ProfileView::empty())
            }
        }

        async fn propose(
            &self,
            _origin: &str,
            candidate: &CandidateRecord,
        ) -> Result<ProposalHandle, ProposalError> {
            let mut proposed = self.proposed.lock().unwrap();
            proposed.push(candidate.clone());
            Ok(ProposalHandle::new(format!("prop-{}", proposed.len())))
        }
    }

    /// Responder that always replies, or always fails.
    struct FixedResponder {
        reply: Option<&'static str>,
    }

    impl ModelProvider for FixedResponder {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn complete(
            &self,
            _request: &CompletionRequest,
        ) -> Result<CompletionResponse, ModelError> {
            match self.reply {
                Some(text) => Ok(CompletionResponse {
                    content: text.to_string(),
                }),
                None => Err(ModelError::Timeout),
            }
        }
    }

    fn travel_domain(proposes: bool) -> AgentDomain {
        AgentDomain {
            id: "travel".to_string(),
            display_name: "Travel Agent".to_string(),
            system_prompt: format!("You are a travel agent.\n\n{CONTEXT_PLACEHOLDER}"),
            taxonomy: Taxonomy::new(["a2p:travel.seats", "a2p:travel.general"]),
            scopes: ScopeSet::new(["a2p:travel.*"]),
            rules: vec![KeywordRule::new(
                ["window"],
                "Prefers window seats on flights",
                "a2p:travel.seats",
                MemoryKind::Semantic,
            )],
            catch_all_content: "Shared some travel context".to_string(),
            default_category: "a2p:travel.general".to_string(),
            context_note: "Learned during travel planning conversation".to_string(),
            proposes,
        }
    }

    fn session(
        domain: AgentDomain,
        store: Arc<RecordingStore>,
        reply: Option<&'static str>,
    ) -> AgentSession<RecordingStore> {
        let extractor = domain.extractor(None);
        AgentSession::new(
            domain,
            store,
            BoxModelProvider::new(FixedResponder { reply }),
            extractor,
            ContextComposer::new(["travel", "food"]),
        )
    }

    #[tokio::test]
    async fn full_session_extracts_and_proposes() {
        let store = Arc::new(RecordingStore::new(false));
        let mut session = session(travel_domain(true), store.clone(), Some("Window seat it is!"));

        assert_eq!(session.phase(), SessionPhase::Idle);
        session.load_context().await;
        assert_eq!(session.phase(), SessionPhase::ContextLoaded);

        let reply = session.say("I always want a window seat.").await;
        assert_eq!(reply, "Window seat it is!");
        assert_eq!(session.phase(), SessionPhase::Conversing);

        let report = session.finish().await;
        assert_eq!(report.source(), Some(ExtractionSource::Rules));
        assert_eq!(report.summary(), "1 of 1 memories proposed");

        let proposed = store.proposed.lock().unwrap();
        assert_eq!(proposed.len(), 1);
        assert_eq!(proposed[0].category, "a2p:travel.seats");
    }

    #[tokio::test]
    async fn context_load_failure_still_reaches_context_loaded() {
        let store = Arc::new(RecordingStore::new(true));
        let mut session = session(travel_domain(true), store, Some("ok"));

        let grounding = session.load_context().await.to_string();
        assert_eq!(session.phase(), SessionPhase::ContextLoaded);
        assert_eq!(grounding, crate::compose::EMPTY_CONTEXT);
    }

    #[tokio::test]
    async fn responder_failure_degrades_to_fallback_reply() {
        let store = Arc::new(RecordingStore::new(false));
        let mut session = session(travel_domain(true), store.clone(), None);

        session.load_context().await;
        let reply = session.say("I always want a window seat.").await;
        assert_eq!(reply, FALLBACK_REPLY);

        // The user's turn survived for extraction.
        let report = session.finish().await;
        assert_eq!(report.proposals.accepted.len(), 1);
    }

    #[tokio::test]
    async fn read_only_domain_proposes_nothing() {
        let store = Arc::new(RecordingStore::new(false));
        let mut session = session(travel_domain(false), store.clone(), Some("Here's a summary."));

        session.load_context().await;
        session.say("What do you know about me?").await;
        let report = session.finish().await;

        assert_eq!(report.source(), None);
        assert_eq!(report.summary(), "0 of 0 memories proposed");
        assert!(store.proposed.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn system_prompt_carries_grounding() {
        let domain = travel_domain(true);
        let store = Arc::new(RecordingStore::new(false));
        let mut session = session(domain, store, Some("ok"));
        session.load_context().await;
        session.say("hello").await;

        let request = session.reply_request();
        let system = request.system.unwrap();
        assert!(system.contains(crate::compose::EMPTY_CONTEXT));
        assert!(!system.contains(CONTEXT_PLACEHOLDER));
    }

    #[tokio::test]
    async fn session_with_no_conversation_proposes_nothing() {
        let store = Arc::new(RecordingStore::new(false));
        let mut session = session(travel_domain(true), store.clone(), Some("ok"));
        session.load_context().await;
        let report = session.finish().await;
        assert_eq!(report.summary(), "0 of 0 memories proposed");
        assert!(store.proposed.lock().unwrap().is_empty());
    }
}
