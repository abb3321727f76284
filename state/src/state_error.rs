use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// A reason why the shared player state cannot be reached.
pub enum StateError {
    #[error("player state dispatcher has stopped")]
    Disconnected,
}
