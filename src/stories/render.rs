//! Projection of stories into list rows.
//!
//! Rendering is pure: it reads the stories and the optional signed-in user
//! and returns plain data, so any front end can draw it.

use super::model::{Story, StoryId, User};
use super::msg::Msg;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteState {
    NotFavorited,
    Favorited,
}

impl FavoriteState {
    pub fn flipped(self) -> Self {
        match self {
            FavoriteState::NotFavorited => FavoriteState::Favorited,
            FavoriteState::Favorited => FavoriteState::NotFavorited,
        }
    }
}

/// Star indicator. Hidden when nobody is signed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Star {
    Hidden,
    Shown(FavoriteState),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryRow {
    pub story_id: StoryId,
    pub title: String,
    pub url: String,
    pub host_name: String,
    pub author: String,
    pub username: String,
    pub star: Star,
    pub can_delete: bool,
}

impl StoryRow {
    /// The two interactions bound to this row: favorite toggle, then delete.
    pub fn actions(&self) -> [Msg; 2] {
        [
            Msg::FavoriteClicked(self.story_id.clone()),
            Msg::DeleteClicked(self.story_id.clone()),
        ]
    }

    /// Flip the star in place. Returns the new state, or `None` if hidden.
    pub fn toggle_star(&mut self) -> Option<FavoriteState> {
        match self.star {
            Star::Hidden => None,
            Star::Shown(state) => {
                let next = state.flipped();
                self.star = Star::Shown(next);
                Some(next)
            }
        }
    }
}

pub fn story_row(story: &Story, user: Option<&User>) -> StoryRow {
    let star = match user {
        None => Star::Hidden,
        Some(u) if u.is_favorite(&story.story_id) => Star::Shown(FavoriteState::Favorited),
        Some(_) => Star::Shown(FavoriteState::NotFavorited),
    };
    StoryRow {
        story_id: story.story_id.clone(),
        title: story.title.clone(),
        url: story.url.clone(),
        host_name: story.host_name(),
        author: story.author.clone(),
        username: story.username.clone(),
        star,
        can_delete: user.is_some(),
    }
}

/// One row per story, in input order.
pub fn render_all(stories: &[Story], user: Option<&User>) -> Vec<StoryRow> {
    stories.iter().map(|s| story_row(s, user)).collect()
}

/// Only the user's favorites, in input order. Empty without a user.
pub fn render_favorites(stories: &[Story], user: Option<&User>) -> Vec<StoryRow> {
    let Some(u) = user else { return Vec::new() };
    stories
        .iter()
        .filter(|s| u.is_favorite(&s.story_id))
        .map(|s| story_row(s, Some(u)))
        .collect()
}
