use std::sync::Once;

use pretty_assertions::assert_eq;
use story_cli::logging;
use story_cli::stories::{
    update, AppState, Credentials, Effect, FavoriteState, Msg, NewStory, Star, Story, StoryId,
    User, View,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(logging::initialize_for_tests);
}

fn story(id: &str) -> Story {
    Story {
        story_id: StoryId::new(id),
        title: format!("Story {}", id),
        author: "Ann".into(),
        url: format!("https://example.com/{}", id),
        username: "poster".into(),
        created_at: None,
    }
}

fn creds() -> Credentials {
    Credentials {
        username: "ann".into(),
        token: "tok".into(),
    }
}

fn user(favorites: &[&str]) -> User {
    User::new(creds(), favorites.iter().map(|id| StoryId::new(*id)))
}

fn loaded(ids: &[&str], user: Option<User>) -> AppState {
    let stories = ids.iter().map(|id| story(id)).collect();
    let (state, effects) = update(AppState::new(), Msg::StoriesLoaded { stories, user });
    assert!(effects.is_empty());
    state
}

fn row_ids(state: &AppState) -> Vec<&str> {
    state.rows().iter().map(|r| r.story_id.as_str()).collect()
}

fn star_of(state: &AppState, id: &str) -> Star {
    state
        .rows()
        .iter()
        .find(|r| r.story_id.as_str() == id)
        .map(|r| r.star)
        .unwrap()
}

#[test]
fn load_renders_every_story_in_order() {
    init_logging();
    let state = loaded(&["3", "1", "2"], None);
    assert_eq!(state.view(), View::All);
    assert_eq!(row_ids(&state), vec!["3", "1", "2"]);
    assert!(state.rows().iter().all(|r| r.star == Star::Hidden && !r.can_delete));
}

#[test]
fn favorites_view_shows_only_favorites() {
    init_logging();
    let state = loaded(&["1", "2"], Some(user(&["2"])));
    let (state, effects) = update(state, Msg::ShowFavorites);
    assert!(effects.is_empty());
    assert_eq!(state.view(), View::Favorites);
    assert_eq!(row_ids(&state), vec!["2"]);
    assert_eq!(star_of(&state, "2"), Star::Shown(FavoriteState::Favorited));
}

#[test]
fn favorites_view_is_empty_when_anonymous() {
    init_logging();
    let state = loaded(&["1", "2"], None);
    let (state, _) = update(state, Msg::ShowFavorites);
    assert!(state.rows().is_empty());
}

#[test]
fn toggling_twice_restores_star_and_issues_both_requests() {
    init_logging();
    let state = loaded(&["1", "2"], Some(user(&[])));
    assert_eq!(star_of(&state, "1"), Star::Shown(FavoriteState::NotFavorited));

    let (state, first) = update(state, Msg::FavoriteClicked(StoryId::new("1")));
    assert_eq!(star_of(&state, "1"), Star::Shown(FavoriteState::Favorited));
    assert!(state.user().unwrap().is_favorite(&StoryId::new("1")));

    let (state, second) = update(state, Msg::FavoriteClicked(StoryId::new("1")));
    assert_eq!(star_of(&state, "1"), Star::Shown(FavoriteState::NotFavorited));
    assert!(!state.user().unwrap().is_favorite(&StoryId::new("1")));

    assert_eq!(
        first,
        vec![Effect::AddFavorite {
            credentials: creds(),
            story_id: StoryId::new("1"),
        }]
    );
    assert_eq!(
        second,
        vec![Effect::RemoveFavorite {
            credentials: creds(),
            story_id: StoryId::new("1"),
        }]
    );
    assert_eq!(star_of(&state, "2"), Star::Shown(FavoriteState::NotFavorited));
}

#[test]
fn failed_request_does_not_roll_back_toggle() {
    init_logging();
    let state = loaded(&["1"], Some(user(&[])));
    let (state, _) = update(state, Msg::FavoriteClicked(StoryId::new("1")));
    let (mut state, effects) = update(state, Msg::RequestFailed("HTTP 500".into()));
    assert!(effects.is_empty());
    assert_eq!(star_of(&state, "1"), Star::Shown(FavoriteState::Favorited));
    assert_eq!(state.take_status().as_deref(), Some("HTTP 500"));
    assert_eq!(state.status(), None);
}

#[test]
fn toggle_without_user_is_ignored() {
    init_logging();
    let state = loaded(&["1"], None);
    let (state, effects) = update(state, Msg::FavoriteClicked(StoryId::new("1")));
    assert!(effects.is_empty());
    assert_eq!(star_of(&state, "1"), Star::Hidden);
}

#[test]
fn unfavoriting_in_favorites_view_keeps_the_row() {
    init_logging();
    let state = loaded(&["1", "2"], Some(user(&["1", "2"])));
    let (state, _) = update(state, Msg::ShowFavorites);
    let (state, _) = update(state, Msg::FavoriteClicked(StoryId::new("1")));
    assert_eq!(row_ids(&state), vec!["1", "2"]);
    assert_eq!(star_of(&state, "1"), Star::Shown(FavoriteState::NotFavorited));

    let (state, _) = update(state, Msg::ShowFavorites);
    assert_eq!(row_ids(&state), vec!["2"]);
}

#[test]
fn delete_removes_exactly_one_row() {
    init_logging();
    let state = loaded(&["1", "2", "3"], Some(user(&[])));
    let (state, effects) = update(state, Msg::DeleteClicked(StoryId::new("2")));
    assert_eq!(row_ids(&state), vec!["1", "3"]);
    assert_eq!(
        effects,
        vec![Effect::DeleteStory {
            credentials: creds(),
            story_id: StoryId::new("2"),
        }]
    );

    // Second click on a row that is gone does nothing.
    let (state, effects) = update(state, Msg::DeleteClicked(StoryId::new("2")));
    assert!(effects.is_empty());
    assert_eq!(row_ids(&state), vec!["1", "3"]);
}

#[test]
fn deleted_story_returns_on_full_rerender() {
    init_logging();
    let state = loaded(&["1", "2"], Some(user(&[])));
    let (state, _) = update(state, Msg::DeleteClicked(StoryId::new("1")));
    assert_eq!(state.stories().len(), 2);
    let (state, _) = update(state, Msg::ShowAll);
    assert_eq!(row_ids(&state), vec!["1", "2"]);
}

#[test]
fn delete_without_user_is_ignored() {
    init_logging();
    let state = loaded(&["1"], None);
    let (state, effects) = update(state, Msg::DeleteClicked(StoryId::new("1")));
    assert!(effects.is_empty());
    assert_eq!(row_ids(&state), vec!["1"]);
}

#[test]
fn submission_appends_and_rerenders_all() {
    init_logging();
    let state = loaded(&["1", "2"], Some(user(&["1"])));
    let (state, _) = update(state, Msg::ShowFavorites);
    let new_story = NewStory::from_fields("A", "T", "http://x").unwrap();

    let (state, effects) = update(state, Msg::StorySubmitted(new_story.clone()));
    assert_eq!(
        effects,
        vec![Effect::CreateStory {
            credentials: creds(),
            story: new_story,
        }]
    );
    assert_eq!(state.stories().len(), 2);

    let created = Story {
        story_id: StoryId::new("9"),
        title: "T".into(),
        author: "A".into(),
        url: "http://x".into(),
        username: "ann".into(),
        created_at: None,
    };
    let (state, effects) = update(state, Msg::StoryCreated(created.clone()));
    assert!(effects.is_empty());
    assert_eq!(state.view(), View::All);
    assert_eq!(state.stories().last(), Some(&created));
    assert_eq!(row_ids(&state), vec!["1", "2", "9"]);
}

#[test]
fn submission_without_user_sets_status() {
    init_logging();
    let state = loaded(&["1"], None);
    let new_story = NewStory::from_fields("A", "T", "http://x").unwrap();
    let (state, effects) = update(state, Msg::StorySubmitted(new_story));
    assert!(effects.is_empty());
    assert_eq!(state.status(), Some("sign in to submit stories"));
}

#[test]
fn notice_only_sets_status() {
    init_logging();
    let state = loaded(&["1"], Some(user(&[])));
    let before = state.rows().to_vec();
    let (state, effects) = update(state, Msg::Notice("author, title and url are all required".into()));
    assert!(effects.is_empty());
    assert_eq!(state.rows(), &before[..]);
    assert_eq!(state.status(), Some("author, title and url are all required"));
}

#[test]
fn status_text_is_cleaned_before_storing() {
    init_logging();
    let state = loaded(&["1"], None);
    let (state, _) = update(state, Msg::RequestFailed("\x1b[31mbad\x07\n request".into()));
    assert_eq!(state.status(), Some("bad request"));
}
