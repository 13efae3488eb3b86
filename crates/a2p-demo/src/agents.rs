//! The three built-in agent domains.
//!
//! Each domain is a static definition: identity, taxonomy, read scopes,
//! keyword rules for the fallback extractor, and a scripted user
//! conversation. The travel and food agents propose memories; the
//! assistant only reads, demonstrating that a profile assembled by
//! other agents is immediately useful to a new one.

use a2p_core::extract::rules::KeywordRule;
use a2p_core::session::{AgentDomain, CONTEXT_PLACEHOLDER};
use a2p_types::memory::{MemoryKind, Taxonomy};
use a2p_types::scope::ScopeSet;

pub fn travel() -> AgentDomain {
    AgentDomain {
        id: "travel".to_string(),
        display_name: "Travel Agent".to_string(),
        system_prompt: format!(
            "You are a professional travel planning assistant. You help users plan \
             trips, find great destinations, and remember their travel preferences.\n\n\
             {CONTEXT_PLACEHOLDER}\n\n\
             When a user tells you about their travel preferences, acknowledge them \
             warmly and provide a brief, personalized recommendation based on what \
             you learn. Keep responses concise (2-4 sentences)."
        ),
        taxonomy: Taxonomy::new([
            "a2p:travel.seats",
            "a2p:travel.hotels",
            "a2p:travel.dietary",
            "a2p:travel.destinations",
            "a2p:travel.style",
            "a2p:travel.budget",
            "a2p:travel.general",
        ]),
        scopes: ScopeSet::new(["a2p:travel.*", "a2p:preferences"]),
        rules: vec![
            KeywordRule::new(
                ["window"],
                "Prefers window seats on flights",
                "a2p:travel.seats",
                MemoryKind::Semantic,
            ),
            KeywordRule::new(
                ["boutique", "city center"],
                "Prefers boutique hotels in city centers",
                "a2p:travel.hotels",
                MemoryKind::Semantic,
            ),
            KeywordRule::new(
                ["vegetarian", "vegan"],
                "Follows a vegetarian diet",
                "a2p:travel.dietary",
                MemoryKind::Semantic,
            ),
            KeywordRule::new(
                ["japan", "tokyo"],
                "Interested in traveling to Japan, especially Tokyo",
                "a2p:travel.destinations",
                MemoryKind::Episodic,
            ),
        ],
        catch_all_content: "Shared some travel preferences".to_string(),
        default_category: "a2p:travel.general".to_string(),
        context_note: "Learned during travel planning conversation".to_string(),
        proposes: true,
    }
}

/// The travel segment's scripted user messages.
pub fn travel_script() -> Vec<&'static str> {
    vec![
        "I always prefer window seats on my flights.",
        "For hotels, I love boutique places in city centers, not big chains.",
        "I'm vegetarian, so dining options matter a lot when I travel.",
        "I've been dreaming about visiting Tokyo! Any recommendations?",
    ]
}

pub fn food() -> AgentDomain {
    AgentDomain {
        id: "food".to_string(),
        display_name: "Food Agent".to_string(),
        system_prompt: format!(
            "You are a friendly food delivery assistant. You help users discover \
             restaurants and meals they'll love, based on their dietary preferences \
             and taste profile.\n\n\
             {CONTEXT_PLACEHOLDER}\n\n\
             Use the user's profile to personalize every recommendation. If you see \
             dietary restrictions, ALWAYS respect them. Keep responses concise \
             (2-4 sentences)."
        ),
        taxonomy: Taxonomy::new([
            "a2p:food.dietary",
            "a2p:food.cuisines",
            "a2p:food.restaurants",
            "a2p:food.dishes",
            "a2p:food.budget",
            "a2p:food.allergies",
            "a2p:food.general",
        ]),
        // Reads the travel agent's memories too: the cross-agent moment.
        scopes: ScopeSet::new([
            "a2p:travel.*",
            "a2p:food.*",
            "a2p:preferences",
            "a2p:interests",
        ]),
        rules: vec![
            KeywordRule::new(
                ["italian", "pasta"],
                "Enjoys Italian cuisine, especially pasta dishes",
                "a2p:food.cuisines",
                MemoryKind::Semantic,
            ),
            KeywordRule::new(
                ["spicy"],
                "Likes spicy food",
                "a2p:food.cuisines",
                MemoryKind::Semantic,
            ),
            KeywordRule::new(
                ["budget", "mid-range"],
                "Prefers mid-range budget for dining",
                "a2p:food.budget",
                MemoryKind::Semantic,
            ),
            KeywordRule::new(
                ["delivery"],
                "Uses food delivery services regularly",
                "a2p:food.general",
                MemoryKind::Procedural,
            ),
        ],
        catch_all_content: "Exploring diverse cuisine options".to_string(),
        default_category: "a2p:food.cuisines".to_string(),
        context_note: "Learned during food delivery conversation".to_string(),
        proposes: true,
    }
}

pub fn food_script() -> Vec<&'static str> {
    vec![
        "Can you recommend something for dinner tonight?",
        "I love Italian food. Any good pasta places nearby?",
        "I also enjoy spicy food. What are my options?",
        "Keep it mid-range budget please.",
    ]
}

pub fn assistant() -> AgentDomain {
    AgentDomain {
        id: "assistant".to_string(),
        display_name: "Personal Assistant".to_string(),
        system_prompt: format!(
            "You are a helpful personal assistant with access to the user's shared, \
             consent-based profile.\n\n\
             The following profile data was approved by the user. It includes \
             memories from different AI agents the user has interacted with.\n\n\
             {CONTEXT_PLACEHOLDER}\n\n\
             Reference specific memories from the profile to show you know the \
             user. Mention preferences learned by different agents to demonstrate \
             cross-agent awareness. Keep responses concise."
        ),
        taxonomy: Taxonomy::new(["a2p:context.general"]),
        scopes: ScopeSet::new([
            "a2p:travel.*",
            "a2p:food.*",
            "a2p:preferences",
            "a2p:interests",
            "a2p:context.*",
            "a2p:professional",
        ]),
        rules: Vec::new(),
        catch_all_content: "Talked with the personal assistant".to_string(),
        default_category: "a2p:context.general".to_string(),
        context_note: "Learned during assistant conversation".to_string(),
        proposes: false,
    }
}

pub fn assistant_script() -> Vec<&'static str> {
    vec![
        "What do you know about me?",
        "Can you help me plan a nice evening?",
        "What about planning that Japan trip?",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_rules_stay_inside_their_taxonomies() {
        // RuleExtractor::new panics on a category outside the taxonomy,
        // so constructing each extractor validates the tables.
        travel().rule_extractor();
        food().rule_extractor();
        assistant().rule_extractor();
    }

    #[test]
    fn only_the_assistant_is_read_only() {
        assert!(travel().proposes);
        assert!(food().proposes);
        assert!(!assistant().proposes);
    }

    #[test]
    fn food_agent_reads_travel_scope() {
        assert!(food().scopes.covers("a2p:travel.dietary"));
        assert!(!travel().scopes.covers("a2p:food.cuisines"));
    }

    #[test]
    fn system_prompts_carry_the_context_placeholder() {
        for domain in [travel(), food(), assistant()] {
            assert!(domain.system_prompt.contains(CONTEXT_PLACEHOLDER));
        }
    }
}
