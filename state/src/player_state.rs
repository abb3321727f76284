use crate::{Episode, StateAction};
use log::{debug, trace};
use rand::Rng;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
/// Everything that is needed to render the player.
pub struct PlayerState {
    pub(crate) episode_list: Arc<Vec<Episode>>,
    pub(crate) current_episode_index: usize,
    pub(crate) is_playing: bool,
    pub(crate) is_looping: bool,
    pub(crate) is_shuffling: bool,
}

impl PlayerState {
    pub fn new() -> Self {
        PlayerState {
            episode_list: Default::default(),
            current_episode_index: 0,
            is_playing: false,
            is_looping: false,
            is_shuffling: false,
        }
    }

    pub fn episode_list(&self) -> &[Episode] {
        &self.episode_list
    }

    /// Not guaranteed to be in bounds: `StateAction::PlayList` stores the index it is given.
    pub fn current_episode_index(&self) -> usize {
        self.current_episode_index
    }

    pub fn current_episode(&self) -> Option<&Episode> {
        self.episode_list.get(self.current_episode_index)
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_looping(&self) -> bool {
        self.is_looping
    }

    pub fn is_shuffling(&self) -> bool {
        self.is_shuffling
    }

    /// Shuffle always has somewhere to go.
    pub fn has_next(&self) -> bool {
        self.is_shuffling
            || self.current_episode_index < self.episode_list.len().saturating_sub(1)
    }

    pub fn has_previous(&self) -> bool {
        self.current_episode_index > 0
    }

    pub(crate) fn apply<R: Rng + ?Sized>(
        &self,
        actions: Vec<StateAction>,
        rng: &mut R,
    ) -> PlayerState {
        let mut next = self.clone();
        debug!("Applying {} player action(s)", actions.len());

        for action in actions {
            trace!("{:?}", action);
            match action {
                StateAction::Play(episode) => {
                    next.episode_list = Arc::new(vec![episode]);
                    next.current_episode_index = 0;
                    next.is_playing = true;
                }
                StateAction::PlayList { list, index } => {
                    next.episode_list = Arc::new(list);
                    next.current_episode_index = index;
                    next.is_playing = true;
                }
                StateAction::PlayNext => {
                    if next.is_shuffling {
                        let len = next.episode_list.len();
                        next.current_episode_index = if len == 0 {
                            0
                        } else {
                            rng.gen_range(0..len)
                        };
                    } else if next.has_next() {
                        next.current_episode_index += 1;
                    }
                }
                StateAction::PlayPrevious => {
                    if next.has_previous() {
                        next.current_episode_index -= 1;
                    }
                }
                StateAction::TogglePlay => {
                    next.is_playing = !next.is_playing;
                }
                StateAction::ToggleLoop => {
                    next.is_looping = !next.is_looping;
                }
                StateAction::ToggleShuffle => {
                    next.is_shuffling = !next.is_shuffling;
                }
                StateAction::SetPlayingState(is_playing) => {
                    next.is_playing = is_playing;
                }
                StateAction::ClearPlayerState => {
                    next.episode_list = Default::default();
                    next.current_episode_index = 0;
                }
            }
        }

        next
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        PlayerState::new()
    }
}
