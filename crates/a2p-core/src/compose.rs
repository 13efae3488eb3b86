//! Deterministic context composition.
//!
//! Turns a scoped [`ProfileView`] into the grounding text an agent puts
//! in front of its model (or decision table). The rendering is pure and
//! deterministic: same view, same text. Records are grouped by the
//! domain segment of their category (`a2p:travel.seats` -> `travel`),
//! priority domains render first, and each group is attributed to the
//! agent that learned it so cross-agent provenance stays visible.

use a2p_types::memory::MemoryRecord;
use a2p_types::profile::ProfileView;

/// Rendered when the view is empty. Callers may key behavior off this
/// line, so it is part of the contract, not cosmetic.
pub const EMPTY_CONTEXT: &str = "No profile data available yet.";

const HEADER: &str = "USER PROFILE (approved memories shared across agents):";

const SUMMARY_WIDTH: usize = 80;

/// Composes grounding text from profile views.
pub struct ContextComposer {
    priority: Vec<String>,
}

impl ContextComposer {
    /// `priority` lists domain prefixes in render order; domains not
    /// listed render after them, in first-seen order.
    pub fn new(priority: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            priority: priority.into_iter().map(Into::into).collect(),
        }
    }

    /// Render the grounding block for a view. Never truncates content.
    pub fn compose(&self, view: &ProfileView) -> String {
        if view.is_empty() {
            return EMPTY_CONTEXT.to_string();
        }

        let mut groups: Vec<(String, Vec<&MemoryRecord>)> = Vec::new();
        for record in view.iter() {
            let domain = domain_of(&record.category).to_string();
            match groups.iter_mut().find(|(d, _)| *d == domain) {
                Some((_, records)) => records.push(record),
                None => groups.push((domain, vec![record])),
            }
        }
        // Priority domains first, everything else keeps first-seen order.
        groups.sort_by_key(|(domain, _)| {
            self.priority
                .iter()
                .position(|p| p == domain)
                .unwrap_or(self.priority.len())
        });

        let mut lines = vec![HEADER.to_string(), String::new()];
        for (domain, records) in &groups {
            lines.push(group_heading(domain, records));
            for record in records {
                lines.push(format!("  - {}", record.content));
            }
        }
        lines.join("\n")
    }

    /// One-line form of a record for terminal display, truncated to 80
    /// characters.
    pub fn summary_line(&self, record: &MemoryRecord) -> String {
        let line = format!("[{}] {}", record.category, record.content);
        truncate(&line, SUMMARY_WIDTH)
    }
}

/// The domain segment of a category: the part after `a2p:` up to the
/// first dot. Categories without the namespace fall in "other".
fn domain_of(category: &str) -> &str {
    let Some(rest) = category.strip_prefix("a2p:") else {
        return "other";
    };
    match rest.split('.').next() {
        Some(domain) if !domain.is_empty() => domain,
        _ => "other",
    }
}

fn group_heading(domain: &str, records: &[&MemoryRecord]) -> String {
    // Attribute the group to whoever learned it; mixed origins within
    // one domain fall back to the domain name alone.
    let mut origins = records.iter().map(|r| r.origin.as_str());
    let first = origins.next().unwrap_or(domain);
    if origins.all(|o| o == first) {
        format!("{} (learned by the {first} agent):", title(domain))
    } else {
        format!("{}:", title(domain))
    }
}

fn title(domain: &str) -> String {
    let mut chars = domain.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let cut: String = s.chars().take(width - 3).collect();
        format!("{cut}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use a2p_types::memory::{MemoryKind, MemoryStatus};
    use chrono::Utc;
    use uuid::Uuid;

    fn record(content: &str, category: &str, origin: &str, kind: MemoryKind) -> MemoryRecord {
        MemoryRecord {
            id: Uuid::new_v4(),
            content: content.to_string(),
            category: category.to_string(),
            kind,
            confidence: 0.85,
            status: MemoryStatus::Approved,
            origin: origin.to_string(),
            context_note: None,
            created_at: Utc::now(),
        }
    }

    fn composer() -> ContextComposer {
        ContextComposer::new(["travel", "food"])
    }

    #[test]
    fn empty_view_renders_sentinel() {
        assert_eq!(composer().compose(&ProfileView::empty()), EMPTY_CONTEXT);
    }

    #[test]
    fn groups_by_domain_in_priority_order() {
        let mut view = ProfileView::empty();
        view.semantic.push(record(
            "Likes spicy Thai food",
            "a2p:food.cuisines",
            "food",
            MemoryKind::Semantic,
        ));
        view.semantic.push(record(
            "Prefers window seats on flights",
            "a2p:travel.seats",
            "travel",
            MemoryKind::Semantic,
        ));

        let text = composer().compose(&view);
        let travel = text.find("Travel (learned by the travel agent):").unwrap();
        let food = text.find("Food (learned by the food agent):").unwrap();
        assert!(travel < food);
        assert!(text.contains("  - Prefers window seats on flights"));
        assert!(text.contains("  - Likes spicy Thai food"));
    }

    #[test]
    fn unlisted_domains_render_after_priority_ones() {
        let mut view = ProfileView::empty();
        view.semantic.push(record(
            "Replies in short sentences",
            "a2p:style.tone",
            "assistant",
            MemoryKind::Semantic,
        ));
        view.semantic.push(record(
            "Keeps a tight budget",
            "a2p:food.budget",
            "food",
            MemoryKind::Semantic,
        ));

        let text = composer().compose(&view);
        let food = text.find("Food").unwrap();
        let style = text.find("Style").unwrap();
        assert!(food < style);
    }

    #[test]
    fn composition_is_idempotent() {
        let mut view = ProfileView::empty();
        view.episodic.push(record(
            "Visited Tokyo in March",
            "a2p:travel.destinations",
            "travel",
            MemoryKind::Episodic,
        ));
        let first = composer().compose(&view);
        let second = composer().compose(&view);
        assert_eq!(first, second);
    }

    #[test]
    fn insertion_order_preserved_within_group() {
        let mut view = ProfileView::empty();
        view.semantic.push(record("first", "a2p:food.cuisines", "food", MemoryKind::Semantic));
        view.semantic.push(record("second", "a2p:food.dishes", "food", MemoryKind::Semantic));

        let text = composer().compose(&view);
        assert!(text.find("first").unwrap() < text.find("second").unwrap());
    }

    #[test]
    fn unnamespaced_categories_group_as_other() {
        let mut view = ProfileView::empty();
        view.semantic.push(record("x", "misc", "assistant", MemoryKind::Semantic));
        let text = composer().compose(&view);
        assert!(text.contains("Other (learned by the assistant agent):"));
    }

    #[test]
    fn summary_line_truncates_at_80_chars() {
        let long = "a".repeat(200);
        let rec = record(&long, "a2p:travel.style", "travel", MemoryKind::Semantic);
        let line = composer().summary_line(&rec);
        assert_eq!(line.chars().count(), 80);
        assert!(line.ends_with("..."));
        assert!(line.starts_with("[a2p:travel.style] "));
    }

    #[test]
    fn short_summary_line_is_untouched() {
        let rec = record("short", "a2p:food.dishes", "food", MemoryKind::Semantic);
        assert_eq!(composer().summary_line(&rec), "[a2p:food.dishes] short");
    }
}
