//! Scripted conversational responder.
//!
//! Stands in for a real model so the demo runs without any model
//! credential. Replies come from a fixed decision table keyed on
//! keywords in the latest user message and in the grounding text the
//! session put in the system prompt. This is demo scaffolding, not
//! part of the reusable core: it implements [`ModelProvider`] so
//! sessions cannot tell it apart from a real provider.

use a2p_core::llm::ModelProvider;
use a2p_types::llm::{CompletionRequest, CompletionResponse, MessageRole, ModelError};

/// Decision-table responder for one agent domain.
pub struct ScriptedResponder {
    domain_id: String,
}

impl ScriptedResponder {
    pub fn new(domain_id: impl Into<String>) -> Self {
        Self {
            domain_id: domain_id.into(),
        }
    }

    fn reply(&self, message: &str, context: &str) -> String {
        let msg = message.to_lowercase();
        let ctx = context.to_lowercase();
        match self.domain_id.as_str() {
            "travel" => travel_reply(&msg),
            "food" => food_reply(&msg, &ctx),
            _ => assistant_reply(&msg, &ctx),
        }
    }
}

impl ModelProvider for ScriptedResponder {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, ModelError> {
        let message = request
            .messages
            .iter()
            .rev()
            .find(|m| m.role == MessageRole::User)
            .map(|m| m.content.as_str())
            .unwrap_or_default();
        let context = request.system.as_deref().unwrap_or_default();
        Ok(CompletionResponse {
            content: self.reply(message, context),
        })
    }
}

fn travel_reply(msg: &str) -> String {
    let reply = if msg.contains("window") || msg.contains("seat") {
        "Window seats are a great choice! There's nothing like watching the \
         landscape unfold below. I'll remember your preference for window seats \
         when planning your flights."
    } else if msg.contains("hotel") || msg.contains("boutique") {
        "Boutique hotels in city centers are wonderful. You get that authentic \
         local feel with easy access to everything. I'll keep that in mind for \
         your accommodation bookings."
    } else if msg.contains("vegetarian") || msg.contains("vegan") || msg.contains("diet") {
        "Noted! I'll make sure all restaurant and flight meal recommendations \
         accommodate your vegetarian dietary preferences. Many destinations have \
         fantastic vegetarian scenes."
    } else if msg.contains("japan") || msg.contains("tokyo") {
        "Japan is a phenomenal choice! Tokyo's blend of ultra-modern and \
         traditional culture is incredible. The vegetarian ramen scene is also \
         surprisingly good. I'll note this as a destination you love."
    } else {
        "Thanks for sharing that! I've noted your preference and will use it to \
         personalize your future travel recommendations."
    };
    reply.to_string()
}

fn food_reply(msg: &str, ctx: &str) -> String {
    let knows_vegetarian = ctx.contains("vegetarian");
    let knows_japan = ctx.contains("tokyo") || ctx.contains("japan");

    if msg.contains("recommend") || msg.contains("suggest") || msg.contains("dinner") {
        let mut reply = String::from("I'd love to help with dinner recommendations!");
        if knows_vegetarian {
            reply.push_str(
                " I see from your profile that you're vegetarian, so I'll make \
                 sure all suggestions are veggie-friendly.",
            );
        }
        if knows_japan {
            reply.push_str(
                " And since you're interested in Japanese food, how about a great \
                 Japanese restaurant with amazing vegetable tempura?",
            );
        }
        reply
    } else if msg.contains("italian") || msg.contains("pasta") {
        let mut reply = String::from("Italian is a fantastic choice!");
        if knows_vegetarian {
            reply.push_str(
                " Since you're vegetarian, I'd recommend the truffle mushroom \
                 risotto or the eggplant parmigiana. Both are incredible at \
                 Trattoria Verde.",
            );
        } else {
            reply.push_str(
                " There are some amazing pasta spots nearby. Trattoria Verde has \
                 incredible handmade pasta.",
            );
        }
        reply
    } else if msg.contains("spicy") {
        "Noted, you enjoy spicy food! I'll prioritize restaurants that offer good \
         heat levels. Thai and Sichuan places nearby have excellent spicy \
         vegetarian options."
            .to_string()
    } else if msg.contains("budget") || msg.contains("price") {
        "I'll keep recommendations in the mid-range budget. There are great \
         quality-to-price options for vegetarian dining in your area."
            .to_string()
    } else {
        "Got it! I've noted that preference. It helps me find the perfect \
         restaurants and dishes for you."
            .to_string()
    }
}

fn assistant_reply(msg: &str, ctx: &str) -> String {
    let knows_vegetarian = ctx.contains("vegetarian");
    let knows_window = ctx.contains("window");
    let knows_japan = ctx.contains("tokyo") || ctx.contains("japan");
    let knows_italian = ctx.contains("italian");
    let knows_spicy = ctx.contains("spicy");
    let knows_boutique = ctx.contains("boutique");

    if msg.contains("know about me") || msg.contains("what do you know") {
        let mut parts = vec!["Based on your shared profile, I know quite a bit about you!".to_string()];
        if knows_vegetarian {
            parts.push("You follow a vegetarian diet.".to_string());
        }
        if knows_window {
            parts.push("You prefer window seats on flights.".to_string());
        }
        if knows_boutique {
            parts.push("You love boutique hotels in city centers.".to_string());
        }
        if knows_japan {
            parts.push("You're interested in visiting Tokyo.".to_string());
        }
        if knows_italian {
            parts.push("You enjoy Italian cuisine.".to_string());
        }
        if knows_spicy {
            parts.push("You like spicy food.".to_string());
        }
        parts.push(
            "All of this was learned by different agents and approved by you. \
             I didn't have to ask you again!"
                .to_string(),
        );
        parts.join(" ")
    } else if msg.contains("plan") && (msg.contains("evening") || msg.contains("weekend")) {
        let mut reply = String::from("I'd love to help plan your evening!");
        if knows_vegetarian && knows_italian {
            reply.push_str(
                " Since you enjoy Italian food and are vegetarian, how about \
                 dinner at a great Italian place, maybe some truffle mushroom \
                 risotto?",
            );
        }
        if knows_japan {
            reply.push_str(
                " And if you're still dreaming about Tokyo, I could help you \
                 start planning that trip while you enjoy your meal!",
            );
        }
        reply
    } else if msg.contains("trip") || msg.contains("travel") || msg.contains("japan") {
        let mut reply = String::from("Let me pull together what I know for your trip!");
        if knows_window {
            reply.push_str(" I'll look for flights with window seat availability.");
        }
        if knows_boutique {
            reply.push_str(" And boutique hotels in the city center, of course.");
        }
        if knows_vegetarian {
            reply.push_str(" I'll also flag restaurants with strong vegetarian menus.");
        }
        reply.push_str(
            " Notice how I know all this from your travel and food agents. No \
             need to repeat yourself!",
        );
        reply
    } else {
        "I have your full profile, including preferences learned by both your \
         travel agent and food agent. I can use all of that context to help you \
         with anything."
            .to_string()
    }
}
