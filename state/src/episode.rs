use crate::StateAction;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// A playable podcast episode and the metadata shown next to it.
pub struct Episode {
    title: String,
    members: String,
    thumbnail: String,
    /// In seconds.
    duration: u64,
    url: String,
}

impl Episode {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn with_title(mut self, title: String) -> Self {
        self.title = title;
        self
    }

    pub fn members(&self) -> &str {
        &self.members
    }

    pub fn with_members(mut self, members: String) -> Self {
        self.members = members;
        self
    }

    pub fn thumbnail(&self) -> &str {
        &self.thumbnail
    }

    pub fn with_thumbnail(mut self, thumbnail: String) -> Self {
        self.thumbnail = thumbnail;
        self
    }

    pub fn duration(&self) -> u64 {
        self.duration
    }

    pub fn with_duration(mut self, duration: u64) -> Self {
        self.duration = duration;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn with_url(mut self, url: String) -> Self {
        self.url = url;
        self
    }

    /// An action that makes this the only queued episode and starts it.
    pub fn play(self) -> StateAction {
        StateAction::Play(self)
    }
}
