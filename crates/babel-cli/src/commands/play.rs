use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use colored::Colorize;

use babel_core::roster::find_character;
use babel_core::{CharacterDynamics, ModalType, PlayerIdentity};
use babel_session::presets::{quest_action, schedule_action};
use babel_session::settings::API_KEY;
use babel_session::{
    ApiCredentials, FileSettings, GameSession, MemorySettings, NoWorldInfo, ScriptedTransport,
    SessionConfig, SettingsStore, SuspicionLevel, TurnOutcome, save_file_name,
};

const HELP: &str = "\
  :status                 profile and stats
  :chars [name]           character dossiers
  :events                 event log
  :map                    who is where
  :open <panel>           open a panel (map, logs, social, ...)
  :close                  close the open panel
  :schedule <slot> <action> [sub]
  :quest <department> <task id>
  :save [path]            write a save file
  quit                    leave
  anything else is sent to the narrator";

pub fn run(
    script: &Path,
    load: Option<&Path>,
    save: Option<&Path>,
    settings: Option<&Path>,
    name: Option<&str>,
) -> Result<(), String> {
    let replies = read_script(script)?;
    let mut transport = ScriptedTransport::new(replies);

    let mut store: Box<dyn SettingsStore> = match settings {
        Some(path) => Box::new(
            FileSettings::open(path).map_err(|e| format!("cannot open settings: {e}"))?,
        ),
        None => {
            // Replayed replies need no provider; any key unlocks the turn.
            let mut mem = MemorySettings::new();
            mem.set(API_KEY, "scripted").map_err(|e| e.to_string())?;
            Box::new(mem)
        }
    };
    let credentials = ApiCredentials::from_store(store.as_ref());

    let mut session = GameSession::new(SessionConfig::default());
    if let Some(path) = load {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
        session
            .load(&text)
            .map_err(|e| format!("cannot load {}: {e}", path.display()))?;
    } else {
        let identity = PlayerIdentity {
            name: name.unwrap_or_default().to_string(),
            ..PlayerIdentity::default()
        };
        session
            .start_game(&identity, store.as_mut())
            .map_err(|e| format!("cannot start game: {e}"))?;
    }

    println!("  {} Babel Academy", "Starting".bold());
    println!("  {} scripted replies | model {}", transport.remaining(), credentials.model);
    println!("  Type ':help' for commands, 'quit' to exit.\n");
    if let Some(last) = session.state().messages.last() {
        println!("{}\n", last.content);
    }

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break,
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("q") {
            println!("Goodbye!");
            break;
        }

        let message = if let Some(command) = input.strip_prefix(':') {
            match meta_command(&mut session, command) {
                Ok(Some(message)) => message,
                Ok(None) => continue,
                Err(e) => {
                    println!("{}\n", e.yellow());
                    continue;
                }
            }
        } else {
            input.to_string()
        };

        match session.submit(&message, &mut transport, &NoWorldInfo, &credentials) {
            Ok(TurnOutcome::Completed(report)) => {
                println!("{}\n", report.content);
                for d in &report.diagnostics {
                    println!("  {}", d.to_string().yellow());
                }
                if let Some(alert) = report.suspicion_alert {
                    print_alert(alert.to);
                }
                let actions = &session.state().suggested_actions;
                println!("  {} {}\n", "Next:".dimmed(), actions.join(" / "));
            }
            Ok(TurnOutcome::Failed(_)) => {
                if let Some(notice) = session.state().messages.last() {
                    println!("{}\n", notice.content.yellow());
                }
            }
            Err(e) => println!("{}\n", e.to_string().yellow()),
        }
    }

    if let Some(path) = save {
        write_save(&session, path)?;
    }
    Ok(())
}

/// Run a `:command`. Returns a message to send when the command produces one.
fn meta_command(session: &mut GameSession, command: &str) -> Result<Option<String>, String> {
    let mut parts = command.split_whitespace();
    let cmd = parts.next().unwrap_or_default();
    let args: Vec<&str> = parts.collect();
    let state = session.state();

    match cmd {
        "help" => println!("{HELP}\n"),
        "status" => println!("{}\n", super::profile_table(state)),
        "chars" => match args.first() {
            Some(&name) => {
                let key = find_character(name).unwrap_or(name);
                let Some(record) = state.character_dynamics.get(key) else {
                    return Err(format!("no dossier for '{name}'"));
                };
                let one: CharacterDynamics =
                    [(key.to_string(), record.clone())].into_iter().collect();
                println!("{}\n", super::characters_table(&one));
            }
            None => println!("{}\n", super::characters_table(&state.character_dynamics)),
        },
        "events" => println!("{}\n", super::events_table(&state.events)),
        "map" => {
            super::print_map(state);
            println!();
        }
        "open" => {
            let panel = args.first().ok_or("usage: :open <panel>")?;
            let modal: ModalType = panel.parse().map_err(|e| format!("{e}"))?;
            session.open_modal(modal);
            println!("  [{}]\n", modal.title());
        }
        "close" => session.close_modal(),
        "schedule" => {
            let [slot, action, rest @ ..] = args.as_slice() else {
                return Err("usage: :schedule <slot> <action> [sub]".into());
            };
            let sub = (!rest.is_empty()).then(|| rest.join(" "));
            return Ok(Some(schedule_action(slot, action, sub.as_deref())));
        }
        "quest" => {
            let [department, task_id] = args.as_slice() else {
                return Err("usage: :quest <department> <task id>".into());
            };
            return Ok(Some(quest_action(department, task_id)));
        }
        "save" => {
            let path = match args.first() {
                Some(p) => PathBuf::from(p),
                None => PathBuf::from(save_file_name(Local::now().naive_local())),
            };
            write_save(session, &path)?;
        }
        other => return Err(format!("unknown command: :{other}")),
    }
    Ok(None)
}

fn write_save(session: &GameSession, path: &Path) -> Result<(), String> {
    session
        .save()
        .write(path)
        .map_err(|e| format!("cannot write {}: {e}", path.display()))?;
    println!("  Saved to {}", path.display());
    Ok(())
}

fn print_alert(level: SuspicionLevel) {
    let Some(title) = level.title() else {
        return;
    };
    let banner = format!("!! {title} / {level} !!");
    if level == SuspicionLevel::Wanted {
        println!("  {}\n", banner.red().bold());
    } else {
        println!("  {}\n", banner.yellow().bold());
    }
}

/// Read `*.txt` replies from a directory in file-name order.
fn read_script(dir: &Path) -> Result<Vec<String>, String> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| format!("cannot read directory {}: {e}", dir.display()))?;
    let mut files: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    files.sort();
    tracing::debug!(dir = %dir.display(), replies = files.len(), "script loaded");

    files
        .iter()
        .map(|p| {
            std::fs::read_to_string(p).map_err(|e| format!("cannot read {}: {e}", p.display()))
        })
        .collect()
}
