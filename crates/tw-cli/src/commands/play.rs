use std::fs;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;

use colored::Colorize;
use miette::{IntoDiagnostic, Result, WrapErr};
use serde::Deserialize;
use tracing::debug;
use tw_engine::{EngineConfig, Notice, SaveGame, Session};

/// Inputs that end the session without being sent to the engine.
const QUIT: [&str; 3] = ["quit", "ende", "beenden"];

pub struct PlayOptions<'a> {
    pub file: &'a Path,
    pub resume: Option<&'a Path>,
    pub save: Option<&'a Path>,
    pub config: Option<&'a Path>,
}

/// Layout of the `--config` file. Engine settings live under `[engine]`.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    engine: EngineConfig,
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let content = super::read(path)?;
    let file: ConfigFile = toml::from_str(&content)
        .into_diagnostic()
        .wrap_err_with(|| format!("invalid config file {}", path.display()))?;
    debug!(config = ?file.engine, "engine config loaded");
    Ok(file.engine)
}

pub fn run(options: &PlayOptions<'_>) -> Result<()> {
    let adventure = super::load_adventure(options.file)?;
    let config = load_config(options.config)?;

    let mut session = match options.resume {
        Some(path) => {
            let save = SaveGame::from_json(&super::read(path)?)
                .into_diagnostic()
                .wrap_err_with(|| format!("{} is not a save game", path.display()))?;
            adventure
                .resume(save, config)
                .into_diagnostic()
                .wrap_err("save game does not fit this world")?
        }
        None => adventure.start(config),
    };

    let world = adventure.world();
    println!("  {}", world.metadata.title.bold());
    if !world.metadata.description.is_empty() {
        println!("  {}", world.metadata.description.dimmed());
    }
    println!();
    println!("{}\n", session.opening().into_diagnostic()?);

    play_loop(&mut session)?;

    if session.is_victory() {
        println!("{}", "Gewonnen!".green().bold());
    } else if session.is_game_over() {
        println!("{}", "Verloren.".red().bold());
    }

    if let Some(path) = options.save {
        let json = session.save().to_json().into_diagnostic()?;
        fs::write(path, json)
            .into_diagnostic()
            .wrap_err_with(|| format!("cannot write {}", path.display()))?;
        println!("Spielstand gespeichert: {}", path.display());
    }

    Ok(())
}

fn play_loop(session: &mut Session) -> Result<()> {
    let interactive = io::stdin().is_terminal();
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    while !session.state().is_over() {
        if interactive {
            print!("> ");
            io::stdout().flush().into_diagnostic()?;
        }

        line.clear();
        if reader.read_line(&mut line).into_diagnostic()? == 0 {
            break; // EOF
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if QUIT.iter().any(|q| input.eq_ignore_ascii_case(q)) {
            break;
        }

        let outcome = session.execute(input).into_diagnostic()?;
        println!("{}", outcome.text);

        if !outcome.is_recognized() {
            if let Some(suggestion) = session.suggest(input) {
                println!("{}", format!("Meintest du \"{suggestion}\"?").yellow());
            }
        }
        for notice in &outcome.notices {
            if let Notice::Conversation { npc } = notice {
                print_replies(session, npc);
            }
        }
        println!();
    }

    Ok(())
}

/// List the replies the player could give, indented under the NPC's line.
fn print_replies(session: &Session, npc: &str) {
    let Some(view) = session.dialogue(npc) else {
        return;
    };
    for (i, response) in view.responses.iter().enumerate() {
        println!("  {} {}", format!("{}.", i + 1).dimmed(), response.text);
    }
}
