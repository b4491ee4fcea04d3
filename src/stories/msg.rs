use super::model::{NewStory, Story, StoryId, User};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Initial fetch finished; `user` is `None` when running anonymously.
    StoriesLoaded {
        stories: Vec<Story>,
        user: Option<User>,
    },
    /// User navigated to the full story list.
    ShowAll,
    /// User navigated to their favorites.
    ShowFavorites,
    /// User clicked the star on a row.
    FavoriteClicked(StoryId),
    /// User clicked the trash icon on a row.
    DeleteClicked(StoryId),
    /// User submitted the new-story form.
    StorySubmitted(NewStory),
    /// API returned the story created from a submission.
    StoryCreated(Story),
    /// A background request failed. Nothing is rolled back.
    RequestFailed(String),
    /// Local feedback for the status line; no request was made.
    Notice(String),
}
