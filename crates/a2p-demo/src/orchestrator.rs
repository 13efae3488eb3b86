//! The six-step demo flow.
//!
//! travel session -> approval checkpoint -> food session -> approval
//! checkpoint -> assistant session -> final profile view. Generic over
//! the profile store so the same flow runs against the live service or
//! the in-memory simulation.

use std::sync::Arc;

use anyhow::Result;
use dialoguer::Confirm;

use a2p_client::{AnthropicModelProvider, InMemoryProfileStore};
use a2p_core::compose::ContextComposer;
use a2p_core::llm::BoxModelProvider;
use a2p_core::profile::{ProfileReader, ProfileStore};
use a2p_core::session::{AgentDomain, AgentSession, SessionReport};
use a2p_types::config::ExchangeConfig;

use crate::responder::ScriptedResponder;
use crate::{agents, render};

/// What happens at the approval pauses between agents.
pub enum Checkpoint {
    /// Wait for the operator to approve proposals in the dashboard.
    Dashboard,
    /// Approve everything through the in-memory store (demo mode).
    AutoApprove(Arc<InMemoryProfileStore>),
}

impl Checkpoint {
    fn pause(&self, proposed: usize) -> Result<()> {
        match self {
            Checkpoint::Dashboard => {
                render::info(&format!(
                    "{proposed} memories are waiting in the dashboard."
                ));
                render::info("Approve the ones you want to keep; reject the rest.");
                wait_for_confirmation(|| {
                    Ok(Confirm::new()
                        .with_prompt("  Reviewed the proposals and ready to continue?")
                        .default(true)
                        .interact()?)
                })
            }
            Checkpoint::AutoApprove(store) => {
                let pending = store.pending();
                render::info("Pending proposals:");
                render::proposal_list(&pending);
                let approved = store.approve_all();
                render::success(&format!("Auto-approved {approved} memories (demo mode)"));
                Ok(())
            }
        }
    }
}

/// Re-prompts until the operator answers yes. The checkpoint is the
/// synchronization point between agents: the next session must not
/// start while proposals are still unreviewed.
fn wait_for_confirmation(mut confirm: impl FnMut() -> Result<bool>) -> Result<()> {
    while !confirm()? {
        render::info("No rush. Confirm once you have reviewed the dashboard.");
    }
    Ok(())
}

fn model_provider(config: &ExchangeConfig) -> Option<BoxModelProvider> {
    config
        .model_api_key
        .clone()
        .map(|key| BoxModelProvider::new(AnthropicModelProvider::new(key)))
}

fn responder_for(domain: &AgentDomain, config: &ExchangeConfig) -> BoxModelProvider {
    match model_provider(config) {
        Some(provider) => provider,
        None => BoxModelProvider::new(ScriptedResponder::new(domain.id.clone())),
    }
}

async fn run_segment<S: ProfileStore>(
    domain: AgentDomain,
    script: Vec<&'static str>,
    store: Arc<S>,
    config: &ExchangeConfig,
) -> SessionReport {
    let name = domain.display_name.clone();
    render::agent_header(&name);

    let responder = responder_for(&domain, config);
    let extractor = domain.extractor(model_provider(config));
    let composer = ContextComposer::new(["travel", "food"]);
    let mut session = AgentSession::new(domain, store, responder, extractor, composer);

    let grounding = session.load_context().await.to_string();
    render::context_loaded("Shared profile context:", &grounding);

    for message in script {
        render::user_says(message);
        let reply = session.say(message).await;
        render::agent_says(&name, &reply);
    }

    println!();
    let report = session.finish().await;
    if let Some(batch) = &report.batch {
        for (index, candidate) in batch.candidates.iter().enumerate() {
            let failed = report.proposals.failures.iter().any(|f| f.index == index);
            if failed {
                render::error(&format!("Failed to propose: {}", candidate.content));
            } else {
                render::memory_proposed(&candidate.content, &candidate.category);
            }
        }
    }
    render::success(&report.summary());
    report
}

fn config_status(config: &ExchangeConfig, checkpoint: &Checkpoint) {
    render::section("Configuration");
    render::success("Connection token: set");
    if config.has_model() {
        render::success("Anthropic API key: set (real model responses)");
    } else {
        render::info("Anthropic API key: not set (using scripted responses)");
    }
    match checkpoint {
        Checkpoint::Dashboard => render::info(&format!("Profile service: {}", config.api_url)),
        Checkpoint::AutoApprove(_) => {
            render::info("Profile service: in-memory simulation (demo mode)")
        }
    }
}

pub async fn run<S: ProfileStore>(
    store: Arc<S>,
    config: &ExchangeConfig,
    checkpoint: Checkpoint,
) -> Result<()> {
    render::banner("CROSS-AGENT MEMORY DEMO: Three Agents, One Profile");
    println!("  Your profile follows you across agents, and you control it.");
    config_status(config, &checkpoint);

    render::section("STEP 1: Travel Agent learns your preferences");
    render::step(1, "Talking to the Travel Agent...");
    let travel_report = run_segment(
        agents::travel(),
        agents::travel_script(),
        store.clone(),
        config,
    )
    .await;

    render::section("STEP 2: Approve the travel memories");
    render::step(2, "Review the proposed memories");
    checkpoint.pause(travel_report.proposals.accepted.len())?;

    render::section("STEP 3: Food Agent uses your shared profile");
    render::step(3, "Talking to the Food Agent...");
    let food_report = run_segment(
        agents::food(),
        agents::food_script(),
        store.clone(),
        config,
    )
    .await;

    render::section("STEP 4: Approve the food memories");
    render::step(4, "Review the new proposals");
    checkpoint.pause(food_report.proposals.accepted.len())?;

    render::section("STEP 5: Personal Assistant sees everything");
    render::step(5, "Talking to the Personal Assistant...");
    run_segment(
        agents::assistant(),
        agents::assistant_script(),
        store.clone(),
        config,
    )
    .await;

    render::section("STEP 6: Your complete profile");
    render::step(6, "Loading final profile state...");
    let reader = ProfileReader::new(store.as_ref());
    let view = reader.read(&agents::assistant().scopes).await;
    println!();
    render::profile_summary(&view);

    render::banner("DEMO COMPLETE");
    println!("  Three agents, one portable profile, every memory user-approved.");
    Ok(())
}
