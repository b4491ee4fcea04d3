use super::effect::Effect;
use super::model::StoryId;
use super::msg::Msg;
use super::render::FavoriteState;
use super::state::{AppState, View};

/// Pure update function: applies a message to state and returns any effects.
///
/// Mutations are optimistic. The view changes first and the matching request
/// is handed back as an effect; its outcome never rolls the view back.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::StoriesLoaded { stories, user } => {
            log::info!(
                "loaded {} stories (signed in: {})",
                stories.len(),
                user.is_some()
            );
            state.load(stories, user);
            state.show(View::All);
            Vec::new()
        }
        Msg::ShowAll => {
            state.show(View::All);
            Vec::new()
        }
        Msg::ShowFavorites => {
            state.show(View::Favorites);
            Vec::new()
        }
        Msg::FavoriteClicked(id) => toggle_favorite(&mut state, id),
        Msg::DeleteClicked(id) => delete_story(&mut state, id),
        Msg::StorySubmitted(story) => match state.user() {
            Some(user) => vec![Effect::CreateStory {
                credentials: user.credentials.clone(),
                story,
            }],
            None => {
                state.set_status("sign in to submit stories");
                Vec::new()
            }
        },
        Msg::StoryCreated(story) => {
            log::debug!("story {} created", story.story_id);
            state.append_story(story);
            state.show(View::All);
            Vec::new()
        }
        Msg::RequestFailed(reason) => {
            state.set_status(&reason);
            Vec::new()
        }
        Msg::Notice(text) => {
            state.set_status(&text);
            Vec::new()
        }
    };

    (state, effects)
}

fn toggle_favorite(state: &mut AppState, id: StoryId) -> Vec<Effect> {
    let Some(next) = state
        .rows_mut()
        .iter_mut()
        .find(|row| row.story_id == id)
        .and_then(|row| row.toggle_star())
    else {
        return Vec::new();
    };
    let Some(user) = state.user_mut() else {
        return Vec::new();
    };
    let credentials = user.credentials.clone();
    match next {
        FavoriteState::Favorited => {
            user.add_favorite(id.clone());
            vec![Effect::AddFavorite {
                credentials,
                story_id: id,
            }]
        }
        FavoriteState::NotFavorited => {
            user.remove_favorite(&id);
            vec![Effect::RemoveFavorite {
                credentials,
                story_id: id,
            }]
        }
    }
}

// The collection keeps the story; only the rendered row goes away.
fn delete_story(state: &mut AppState, id: StoryId) -> Vec<Effect> {
    let Some(credentials) = state.user().map(|u| u.credentials.clone()) else {
        return Vec::new();
    };
    let rows = state.rows_mut();
    let before = rows.len();
    rows.retain(|row| row.story_id != id);
    if rows.len() == before {
        return Vec::new();
    }
    vec![Effect::DeleteStory {
        credentials,
        story_id: id,
    }]
}
