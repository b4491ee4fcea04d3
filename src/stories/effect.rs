use super::model::{Credentials, NewStory, StoryId};

/// API requests requested by `update`; executed by the effect runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    AddFavorite {
        credentials: Credentials,
        story_id: StoryId,
    },
    RemoveFavorite {
        credentials: Credentials,
        story_id: StoryId,
    },
    DeleteStory {
        credentials: Credentials,
        story_id: StoryId,
    },
    CreateStory {
        credentials: Credentials,
        story: NewStory,
    },
}

impl Effect {
    /// Submissions are awaited by the caller; everything else is spawned.
    pub fn is_blocking(&self) -> bool {
        matches!(self, Effect::CreateStory { .. })
    }
}
