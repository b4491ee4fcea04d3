use super::model::{Story, StoryCollection, User};
use super::render::{render_all, render_favorites, StoryRow};
use crate::util::sanitize::sanitize_for_terminal;

const MAX_STATUS_CHARS: usize = 200;

/// Which list is currently on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    All,
    Favorites,
}

/// Everything the story screens know. Owned by the UI loop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    stories: StoryCollection,
    user: Option<User>,
    view: View,
    rows: Vec<StoryRow>,
    status: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stories(&self) -> &[Story] {
        self.stories.stories()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn view(&self) -> View {
        self.view
    }

    /// Rows as currently rendered, which may lag behind `stories()`.
    pub fn rows(&self) -> &[StoryRow] {
        &self.rows
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn take_status(&mut self) -> Option<String> {
        self.status.take()
    }

    pub(crate) fn load(&mut self, stories: Vec<Story>, user: Option<User>) {
        self.stories = StoryCollection::new(stories);
        self.user = user;
    }

    pub(crate) fn user_mut(&mut self) -> Option<&mut User> {
        self.user.as_mut()
    }

    pub(crate) fn rows_mut(&mut self) -> &mut Vec<StoryRow> {
        &mut self.rows
    }

    pub(crate) fn append_story(&mut self, story: Story) {
        self.stories.push(story);
    }

    /// Status text may carry server output, so it is cleaned before storing.
    pub(crate) fn set_status(&mut self, status: &str) {
        self.status = Some(sanitize_for_terminal(status, MAX_STATUS_CHARS));
    }

    /// Rebuild rows from the collection for `view`.
    pub(crate) fn show(&mut self, view: View) {
        self.view = view;
        self.rows = match view {
            View::All => render_all(self.stories.stories(), self.user.as_ref()),
            View::Favorites => render_favorites(self.stories.stories(), self.user.as_ref()),
        };
    }
}
