use std::path::Path;

use babel_session::{GameSession, SessionConfig, SuspicionLevel};
use colored::Colorize;

pub fn run(save: &Path) -> Result<(), String> {
    let text = std::fs::read_to_string(save)
        .map_err(|e| format!("cannot read {}: {e}", save.display()))?;
    let mut session = GameSession::new(SessionConfig::default());
    let report = session
        .load(&text)
        .map_err(|e| format!("cannot load {}: {e}", save.display()))?;
    let state = session.state();

    println!(
        "  Save '{}' (version {})",
        save.display(),
        report.version.as_deref().unwrap_or("unknown")
    );
    if !report.rejected.is_empty() {
        println!(
            "  {} {}",
            "Unreadable fields kept at defaults:".yellow(),
            report.rejected.join(", ")
        );
    }
    println!("{}", super::profile_table(state));

    let level = session.suspicion_level();
    if let Some(title) = level.title() {
        let banner = format!("{title} / {level}");
        if level == SuspicionLevel::Wanted {
            println!("  {}", banner.red().bold());
        } else {
            println!("  {}", banner.yellow());
        }
    }

    println!(
        "  {} messages, {} characters, {} events ({} new)",
        state.messages.len(),
        state.character_dynamics.len(),
        state.events.len(),
        state.new_events().count()
    );
    println!("  Suggested: {}", state.suggested_actions.join(" / "));

    Ok(())
}
