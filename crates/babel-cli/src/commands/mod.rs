pub mod check;
pub mod parse;
pub mod play;
pub mod state;

use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use babel_core::atlas::place_characters;
use babel_core::{CharacterDynamics, GameEvent, GameState};
use babel_status::vocab::{CharacterAttr, ScalarKey};
use babel_status::{Diagnostic, ParsedStatus, StatusParse, Tally, render_diagnostics};

/// Read a narrator reply and parse it.
fn read_reply(file: &Path) -> Result<(String, StatusParse), String> {
    let raw = std::fs::read_to_string(file)
        .map_err(|e| format!("cannot read {}: {e}", file.display()))?;
    let parse = babel_status::parse_response(&raw);
    Ok((raw, parse))
}

/// Print diagnostics to stderr using ariadne, then a count line.
fn print_diagnostics(source: &str, filename: &str, diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }

    let rendered = render_diagnostics(source, filename, diagnostics);
    eprint!("{rendered}");
    eprintln!("  {}", Tally::of(diagnostics));
}

fn table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}

/// Scalar fields of a parsed status, one row per reported field.
fn status_table(status: &ParsedStatus) -> Table {
    let mut rows: Vec<(&str, String)> = Vec::new();
    let text = [
        (ScalarKey::Time, &status.time),
        (ScalarKey::Period, &status.period),
        (ScalarKey::Location, &status.location),
        (ScalarKey::Weather, &status.weather),
        (ScalarKey::Clothing, &status.clothing),
    ];
    for (key, value) in text {
        if let Some(v) = value {
            rows.push((key.label(), v.clone()));
        }
    }
    if let Some(coins) = status.coins {
        rows.push((ScalarKey::Coins.label(), coins.to_string()));
    }
    let stats = [
        (ScalarKey::EmpireContribution, status.empire_contribution),
        (ScalarKey::ClubContribution, status.club_contribution),
        (ScalarKey::Suspicion, status.suspicion),
    ];
    for (key, value) in stats {
        if let Some(v) = value {
            rows.push((key.label(), v.to_string()));
        }
    }
    for (i, slot) in status.actions.slots().iter().enumerate() {
        if let Some(action) = slot {
            rows.push((ScalarKey::Action(i).label(), action.clone()));
        }
    }

    let mut t = table(vec!["Field", "Value"]);
    for (label, value) in rows {
        t.add_row(vec![label.to_string(), value]);
    }
    t
}

fn characters_table(dynamics: &CharacterDynamics) -> Table {
    use CharacterAttr::*;
    let mut t = table(vec![
        "Name",
        Location.label(),
        Clothing.label(),
        Activity.label(),
        Thought.label(),
        Affection.label(),
    ]);
    for (name, d) in dynamics {
        t.add_row(vec![
            name.clone(),
            d.location.clone(),
            d.clothing.clone(),
            d.activity.clone(),
            d.thought.clone(),
            d.affection.to_string(),
        ]);
    }
    t
}

fn events_table(events: &[GameEvent]) -> Table {
    let mut t = table(vec!["", "Type", "Time", "Title", "Content"]);
    for e in events {
        let content = if e.is_locked() {
            "[locked]".to_string()
        } else {
            e.content().to_string()
        };
        t.add_row(vec![
            if e.is_new() { "NEW" } else { "" }.to_string(),
            e.kind().label().to_string(),
            e.timestamp().to_string(),
            e.title().to_string(),
            content,
        ]);
    }
    t
}

fn profile_table(state: &GameState) -> Table {
    let p = &state.profile;
    let s = &state.stats;
    let mut t = table(vec!["", ""]);
    t.add_row(vec!["姓名".to_string(), format!("{} ({})", p.name, p.grade)]);
    t.add_row(vec!["时间".to_string(), p.time.clone()]);
    t.add_row(vec!["地点".to_string(), p.location.clone()]);
    t.add_row(vec!["天气".to_string(), p.weather.clone()]);
    t.add_row(vec!["服装".to_string(), p.clothing.clone()]);
    t.add_row(vec!["银币".to_string(), p.coins.to_string()]);
    t.add_row(vec!["帝国贡献".to_string(), s.empire_contribution.to_string()]);
    t.add_row(vec!["社团声望".to_string(), s.club_contribution.to_string()]);
    t.add_row(vec!["怀疑度".to_string(), s.suspicion.to_string()]);
    t
}

fn print_map(state: &GameState) {
    let player = babel_core::atlas::match_location(&state.profile.location);
    match player {
        Some(loc) => println!("  {} {} ({}, {})", "You:".bold(), loc.key, loc.x, loc.y),
        None => println!("  {} {} (off the map)", "You:".bold(), state.profile.location),
    }
    for (name, loc) in place_characters(&state.character_dynamics) {
        println!("  {name}: {} ({}, {})", loc.key, loc.x, loc.y);
    }
}
