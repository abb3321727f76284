use anyhow::{anyhow, bail, Context, Result};
use state::{Episode, StateAction};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play(usize),
    PlayList(usize),
    Next,
    Prev,
    TogglePlay,
    ToggleLoop,
    ToggleShuffle,
    Pause,
    Resume,
    Clear,
    Status,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Play(index) => write!(f, "play {}", index),
            Command::PlayList(index) => write!(f, "play-list {}", index),
            Command::Next => write!(f, "next"),
            Command::Prev => write!(f, "prev"),
            Command::TogglePlay => write!(f, "toggle-play"),
            Command::ToggleLoop => write!(f, "toggle-loop"),
            Command::ToggleShuffle => write!(f, "toggle-shuffle"),
            Command::Pause => write!(f, "pause"),
            Command::Resume => write!(f, "resume"),
            Command::Clear => write!(f, "clear"),
            Command::Status => write!(f, "status"),
        }
    }
}

impl Command {
    /// What to send for this command. `None` means only print the state.
    ///
    /// `play` must name a loaded episode. `play-list` passes its index through unchecked.
    pub fn to_actions(self, episodes: &[Episode]) -> Result<Option<Vec<StateAction>>> {
        let action = match self {
            Command::Play(index) => {
                let episode = episodes.get(index).ok_or_else(|| {
                    anyhow!(
                        "play {}: only {} episode(s) loaded",
                        index,
                        episodes.len()
                    )
                })?;
                StateAction::Play(episode.clone())
            }
            Command::PlayList(index) => StateAction::PlayList {
                list: episodes.to_vec(),
                index,
            },
            Command::Next => StateAction::PlayNext,
            Command::Prev => StateAction::PlayPrevious,
            Command::TogglePlay => StateAction::TogglePlay,
            Command::ToggleLoop => StateAction::ToggleLoop,
            Command::ToggleShuffle => StateAction::ToggleShuffle,
            Command::Pause => StateAction::SetPlayingState(false),
            Command::Resume => StateAction::SetPlayingState(true),
            Command::Clear => StateAction::ClearPlayerState,
            Command::Status => return Ok(None),
        };

        Ok(Some(vec![action]))
    }
}

pub fn parse_script<S: AsRef<str>>(words: &[S]) -> Result<Vec<Command>> {
    let mut words = words.iter().map(AsRef::as_ref);
    let mut commands = vec![];

    while let Some(word) = words.next() {
        let command = match word {
            "play" => Command::Play(parse_index(word, words.next())?),
            "play-list" => Command::PlayList(parse_index(word, words.next())?),
            "next" => Command::Next,
            "prev" => Command::Prev,
            "toggle-play" => Command::TogglePlay,
            "toggle-loop" => Command::ToggleLoop,
            "toggle-shuffle" => Command::ToggleShuffle,
            "pause" => Command::Pause,
            "resume" => Command::Resume,
            "clear" => Command::Clear,
            "status" => Command::Status,
            other => bail!("unknown command {:?}", other),
        };
        commands.push(command);
    }

    Ok(commands)
}

fn parse_index(command: &str, arg: Option<&str>) -> Result<usize> {
    let arg = arg.ok_or_else(|| anyhow!("{} needs an episode index", command))?;
    arg.parse()
        .with_context(|| format!("{}: {:?} is not an episode index", command, arg))
}
