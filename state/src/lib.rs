use crossbeam_channel::{unbounded, Sender};
use futures::channel::mpsc::{channel as fchannel, Receiver as FReceiver};
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::{Arc, PoisonError, RwLock};
use std::thread;

mod episode;
mod player_state;
mod state_error;

pub use episode::Episode;
pub use player_state::PlayerState;
pub use state_error::StateError;

#[derive(Debug, Clone)]
pub enum StateAction {
    Play(Episode),
    /// `index` is stored as given, even past the end of `list`.
    PlayList {
        list: Vec<Episode>,
        index: usize,
    },
    PlayNext,
    PlayPrevious,

    TogglePlay,
    ToggleLoop,
    ToggleShuffle,
    SetPlayingState(bool),

    /// Empties the list. Flags are left alone.
    ClearPlayerState,
}

pub struct CurrentState(Arc<RwLock<Arc<PlayerState>>>, Sender<Vec<StateAction>>);

impl std::fmt::Debug for CurrentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CurrentState")
    }
}

impl CurrentState {
    /// Creates a player state that can be gotten or updated (async).
    ///
    /// Also creates a notifier that fires once queued actions have been applied.
    pub fn new() -> (Arc<CurrentState>, FReceiver<()>) {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Like `new`, but shuffle picks the same sequence of episodes every time for a given seed.
    pub fn with_seed(seed: u64) -> (Arc<CurrentState>, FReceiver<()>) {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(mut rng: StdRng) -> (Arc<CurrentState>, FReceiver<()>) {
        let state = Arc::new(RwLock::new(Arc::new(PlayerState::new())));
        let (send_action, receive_action) = unbounded::<Vec<StateAction>>();
        let (mut send_update, receive_update) = fchannel(1);

        let current_state = Arc::new(CurrentState(Arc::clone(&state), send_action));

        thread::spawn(move || {
            while let Ok(actions) = receive_action.recv() {
                let curr = state.read().unwrap_or_else(PoisonError::into_inner).clone();
                let mut next = curr.apply(actions, &mut rng);

                // Publish everything that queued up meanwhile as one snapshot.
                for actions in receive_action.try_iter() {
                    next = next.apply(actions, &mut rng);
                }

                *state.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(next);

                // Only send if they're not already waiting for an update.
                let _ = send_update.try_send(());
            }

            debug!("Player state dispatcher stopped");
        });

        (current_state, receive_update)
    }

    pub fn get(&self) -> Arc<PlayerState> {
        self.0.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn update(&self, actions: Vec<StateAction>) -> Result<(), StateError> {
        self.1.send(actions).map_err(|_| StateError::Disconnected)
    }

    pub fn play(&self, episode: Episode) -> Result<(), StateError> {
        self.update(vec![StateAction::Play(episode)])
    }

    pub fn play_list(&self, list: Vec<Episode>, index: usize) -> Result<(), StateError> {
        self.update(vec![StateAction::PlayList { list, index }])
    }

    pub fn play_next(&self) -> Result<(), StateError> {
        self.update(vec![StateAction::PlayNext])
    }

    pub fn play_previous(&self) -> Result<(), StateError> {
        self.update(vec![StateAction::PlayPrevious])
    }

    pub fn toggle_play(&self) -> Result<(), StateError> {
        self.update(vec![StateAction::TogglePlay])
    }

    pub fn toggle_loop(&self) -> Result<(), StateError> {
        self.update(vec![StateAction::ToggleLoop])
    }

    pub fn toggle_shuffle(&self) -> Result<(), StateError> {
        self.update(vec![StateAction::ToggleShuffle])
    }

    pub fn set_playing_state(&self, is_playing: bool) -> Result<(), StateError> {
        self.update(vec![StateAction::SetPlayingState(is_playing)])
    }

    pub fn clear_player_state(&self) -> Result<(), StateError> {
        self.update(vec![StateAction::ClearPlayerState])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use futures::StreamExt;

    fn episode(title: &str) -> Episode {
        Episode::default()
            .with_title(String::from(title))
            .with_members(String::from("Host"))
            .with_duration(1800)
            .with_url(format!("https://example.com/{}.mp3", title))
    }

    #[test]
    fn smoke() {
        let (current_state, mut wait_for_update) = CurrentState::new();

        assert!(current_state.get().episode_list().is_empty());
        assert!(!current_state.get().is_playing());

        current_state
            .play_list(vec![episode("a"), episode("b"), episode("c")], 1)
            .unwrap();
        block_on(wait_for_update.next()).unwrap();

        let state = current_state.get();
        assert_eq!(state.current_episode().unwrap().title(), "b");
        assert!(state.is_playing());
        assert!(state.has_next());
        assert!(state.has_previous());

        current_state.play_next().unwrap();
        block_on(wait_for_update.next()).unwrap();
        assert_eq!(current_state.get().current_episode_index(), 2);
        assert!(!current_state.get().has_next());

        current_state.toggle_play().unwrap();
        block_on(wait_for_update.next()).unwrap();
        assert!(!current_state.get().is_playing());

        current_state.clear_player_state().unwrap();
        block_on(wait_for_update.next()).unwrap();
        let state = current_state.get();
        assert!(state.episode_list().is_empty());
        assert_eq!(state.current_episode_index(), 0);
        assert!(!state.is_playing());
    }

    #[test]
    fn old_snapshots_are_unchanged() {
        let (current_state, mut wait_for_update) = CurrentState::new();
        let before = current_state.get();

        current_state.play(episode("solo")).unwrap();
        block_on(wait_for_update.next()).unwrap();

        assert!(before.episode_list().is_empty());
        assert_eq!(current_state.get().episode_list(), &[episode("solo")]);
    }

    #[test]
    fn batch_is_published_once() {
        let (current_state, mut wait_for_update) = CurrentState::new();

        current_state
            .update(vec![
                StateAction::PlayList {
                    list: vec![episode("a"), episode("b")],
                    index: 0,
                },
                StateAction::PlayNext,
                StateAction::ToggleLoop,
                StateAction::SetPlayingState(false),
            ])
            .unwrap();
        block_on(wait_for_update.next()).unwrap();

        let state = current_state.get();
        assert_eq!(state.current_episode().unwrap().title(), "b");
        assert!(state.is_looping());
        assert!(!state.is_playing());
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let run = || {
            let (current_state, mut wait_for_update) = CurrentState::with_seed(99);
            let list = (0..10).map(|i| episode(&i.to_string())).collect();
            current_state
                .update(vec![
                    StateAction::PlayList { list, index: 0 },
                    StateAction::ToggleShuffle,
                ])
                .unwrap();
            block_on(wait_for_update.next()).unwrap();

            let mut picks = vec![];
            for _ in 0..5 {
                current_state.play_next().unwrap();
                block_on(wait_for_update.next()).unwrap();
                let index = current_state.get().current_episode_index();
                assert!(index < 10);
                picks.push(index);
            }
            picks
        };

        assert_eq!(run(), run());
    }

    #[test]
    fn toggles_through_handle() {
        let (current_state, mut wait_for_update) = CurrentState::new();

        current_state.toggle_shuffle().unwrap();
        block_on(wait_for_update.next()).unwrap();
        assert!(current_state.get().is_shuffling());
        assert!(current_state.get().has_next());

        current_state.toggle_loop().unwrap();
        block_on(wait_for_update.next()).unwrap();
        assert!(current_state.get().is_looping());

        current_state.set_playing_state(true).unwrap();
        block_on(wait_for_update.next()).unwrap();
        assert!(current_state.get().is_playing());

        current_state.play_previous().unwrap();
        block_on(wait_for_update.next()).unwrap();
        assert_eq!(current_state.get().current_episode_index(), 0);
    }
}
