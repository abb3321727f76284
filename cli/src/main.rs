mod script;

use anyhow::{Context, Result};
use async_std::stream::StreamExt;
use clap::Parser;
use log::info;
use script::parse_script;
use state::{CurrentState, Episode, PlayerState};
use std::fs;
use std::path::{Path, PathBuf};

/// Drives the shared player state through a script of commands and prints it after each one.
#[derive(Debug, Parser)]
#[command(name = "podplayer", version)]
struct Args {
    /// JSON array of episodes ({title, members, thumbnail, duration, url}).
    #[arg(long)]
    episodes: PathBuf,

    /// Seed for shuffle, for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// play <i>, play-list <i>, next, prev, toggle-play, toggle-loop,
    /// toggle-shuffle, pause, resume, clear, status
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    commands: Vec<String>,
}

fn load_episodes(path: &Path) -> Result<Vec<Episode>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("could not read {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("could not parse {}", path.display()))
}

fn summary(state: &PlayerState) -> String {
    format!(
        "[{}/{}] {} playing={} loop={} shuffle={} next={} prev={}",
        state.current_episode_index(),
        state.episode_list().len(),
        state
            .current_episode()
            .map(Episode::title)
            .unwrap_or("(none)"),
        state.is_playing(),
        state.is_looping(),
        state.is_shuffling(),
        state.has_next(),
        state.has_previous(),
    )
}

fn main() -> Result<()> {
    pretty_env_logger::init();
    let args = Args::parse();

    let episodes = load_episodes(&args.episodes)?;
    info!("Loaded {} episode(s)", episodes.len());

    let script = parse_script(&args.commands)?
        .into_iter()
        .map(|command| -> Result<_> { Ok((command, command.to_actions(&episodes)?)) })
        .collect::<Result<Vec<_>>>()?;

    async_std::task::block_on(async {
        let (current, mut waiter) = match args.seed {
            Some(seed) => CurrentState::with_seed(seed),
            None => CurrentState::new(),
        };

        for (command, actions) in script {
            if let Some(actions) = actions {
                current.update(actions)?;
                waiter.next().await;
            }
            println!("{:<16} {}", command.to_string(), summary(&current.get()));
        }

        Ok::<(), anyhow::Error>(())
    })
}
