use std::path::Path;

pub fn run(file: &Path) -> Result<(), String> {
    let (raw, parse) = super::read_reply(file)?;
    super::print_diagnostics(&raw, &file.display().to_string(), &parse.diagnostics);

    if parse.has_errors() {
        return Err("status block is unusable".into());
    }
    let Some(status) = parse.status else {
        return Err("no status block".into());
    };

    let characters = status.character_dynamics.as_ref().map_or(0, |c| c.len());
    println!("  Status block OK for '{}'.", file.display());
    println!(
        "  {} characters, {} events, {} warnings",
        characters,
        status.event_updates.len(),
        parse.diagnostics.len()
    );

    Ok(())
}
