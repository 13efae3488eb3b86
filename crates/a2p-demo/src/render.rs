//! Console output for the demo.
//!
//! All user-facing text goes through here; tracing output goes to
//! stderr, so stdout stays a clean narrative.

use console::style;

use a2p_types::memory::{MemoryKind, MemoryRecord};
use a2p_types::profile::ProfileView;

const LINE_WIDTH: usize = 72;
const CONTENT_WIDTH: usize = 80;

pub fn banner(text: &str) {
    let border = "=".repeat(LINE_WIDTH);
    println!("\n{}", style(&border).cyan().bold());
    println!("  {}", style(text).cyan().bold());
    println!("{}\n", style(&border).cyan().bold());
}

pub fn section(text: &str) {
    println!("\n{}\n", style(format!("--- {text} ---")).white().bold());
}

pub fn step(number: usize, text: &str) {
    println!("  {} {text}", style(format!("[{number}]")).cyan().bold());
}

pub fn agent_header(name: &str) {
    let border = "-".repeat(LINE_WIDTH);
    println!("\n{}", style(&border).bold());
    println!("  {}", style(name).bold());
    println!("{}", style(&border).bold());
}

pub fn user_says(text: &str) {
    println!("\n  {} {text}", style("User:").white().bold());
}

pub fn agent_says(name: &str, text: &str) {
    println!("  {}", style(format!("{name}:")).bold());
    println!("    {text}");
}

pub fn memory_proposed(content: &str, category: &str) {
    println!(
        "  {} {}",
        style(">> Memory proposed:").green(),
        style(content).dim()
    );
    println!("     {}", style(format!("Category: {category}")).dim());
}

pub fn context_loaded(label: &str, grounding: &str) {
    println!("  {}", style(label).green());
    for line in grounding.lines() {
        println!("    {}", style(line).dim());
    }
}

pub fn success(text: &str) {
    println!("  {} {text}", style("OK").green().bold());
}

pub fn info(text: &str) {
    println!("  {}", style(text).dim());
}

pub fn error(text: &str) {
    eprintln!("  {} {text}", style("ERROR").red().bold());
}

/// Full-profile summary with confidence and status annotations,
/// bucketed by memory kind. Long content is truncated for the
/// terminal.
pub fn profile_summary(view: &ProfileView) {
    if view.is_empty() {
        println!("  {}", style("(no memories yet)").dim());
        return;
    }
    for kind in MemoryKind::ALL {
        let records = view.bucket(kind);
        if records.is_empty() {
            continue;
        }
        println!(
            "  {}",
            style(format!("{} memories ({}):", title(kind), records.len())).bold()
        );
        for record in records {
            println!(
                "    [{}] {} {}",
                record.category,
                truncate(&record.content),
                style(format!(
                    "(confidence: {}, status: {})",
                    record.confidence, record.status
                ))
                .dim()
            );
        }
    }
}

pub fn proposal_list(records: &[MemoryRecord]) {
    for record in records {
        println!(
            "    {} {}",
            style(format!("[{}]", record.category)).dim(),
            truncate(&record.content)
        );
    }
}

fn title(kind: MemoryKind) -> String {
    let s = kind.to_string();
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => s,
    }
}

fn truncate(content: &str) -> String {
    if content.chars().count() > CONTENT_WIDTH {
        let cut: String = content.chars().take(CONTENT_WIDTH - 3).collect();
        format!("{cut}...")
    } else {
        content.to_string()
    }
}
