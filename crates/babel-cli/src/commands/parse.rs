use std::path::Path;

use colored::Colorize;

pub fn run(file: &Path, json: bool) -> Result<(), String> {
    let (raw, parse) = super::read_reply(file)?;
    super::print_diagnostics(&raw, &file.display().to_string(), &parse.diagnostics);

    if json {
        let out = serde_json::json!({
            "content": parse.content,
            "status": parse.status,
        });
        let text = serde_json::to_string_pretty(&out)
            .map_err(|e| format!("JSON serialization error: {e}"))?;
        println!("{text}");
        return Ok(());
    }

    println!("{}\n", parse.content);

    let Some(status) = parse.status else {
        println!("  {}", "No status block.".dimmed());
        return Ok(());
    };

    if status.is_empty() {
        println!("  Status block reports no fields.");
        return Ok(());
    }

    println!("{}", super::status_table(&status));
    if let Some(chars) = &status.character_dynamics {
        println!();
        println!("{}", super::characters_table(chars));
    }
    if !status.event_updates.is_empty() {
        println!();
        println!("{}", super::events_table(&status.event_updates));
    }

    Ok(())
}
