use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use time::OffsetDateTime;
use url::Url;

/// Server-assigned story identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoryId(String);

impl StoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StoryId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    pub story_id: StoryId,
    pub title: String,
    pub author: String,
    pub url: String,
    pub username: String,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

impl Story {
    /// Host part of the story link, or the raw link when it does not parse.
    pub fn host_name(&self) -> String {
        Url::parse(&self.url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_else(|| self.url.clone())
    }
}

/// Payload for a story that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStory {
    pub author: String,
    pub title: String,
    pub url: String,
}

impl NewStory {
    /// Trims all three fields; a field left empty rejects the whole form.
    pub fn from_fields(author: &str, title: &str, url: &str) -> Option<Self> {
        let (author, title, url) = (author.trim(), title.trim(), url.trim());
        if author.is_empty() || title.is_empty() || url.is_empty() {
            return None;
        }
        Some(Self {
            author: author.to_string(),
            title: title.to_string(),
            url: url.to_string(),
        })
    }
}

/// Username and token used to authenticate mutating requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub token: String,
}

/// The signed-in user and their favorites, keyed by story id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub credentials: Credentials,
    pub name: Option<String>,
    favorites: HashSet<StoryId>,
}

impl User {
    pub fn new(credentials: Credentials, favorites: impl IntoIterator<Item = StoryId>) -> Self {
        Self {
            credentials,
            name: None,
            favorites: favorites.into_iter().collect(),
        }
    }

    pub fn username(&self) -> &str {
        &self.credentials.username
    }

    pub fn is_favorite(&self, id: &StoryId) -> bool {
        self.favorites.contains(id)
    }

    pub fn add_favorite(&mut self, id: StoryId) -> bool {
        self.favorites.insert(id)
    }

    pub fn remove_favorite(&mut self, id: &StoryId) -> bool {
        self.favorites.remove(id)
    }

    pub fn favorite_count(&self) -> usize {
        self.favorites.len()
    }
}

/// Ordered story list in server order. Appends go to the end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoryCollection {
    stories: Vec<Story>,
}

impl StoryCollection {
    pub fn new(stories: Vec<Story>) -> Self {
        Self { stories }
    }

    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    pub fn push(&mut self, story: Story) {
        self.stories.push(story);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn story(id: &str, url: &str) -> Story {
        Story {
            story_id: StoryId::new(id),
            title: "t".into(),
            author: "a".into(),
            url: url.into(),
            username: "u".into(),
            created_at: None,
        }
    }

    #[test]
    fn host_name_strips_scheme_and_path() {
        assert_eq!(story("1", "https://news.example.com/a/b?c=d").host_name(), "news.example.com");
        assert_eq!(story("1", "not a url").host_name(), "not a url");
    }

    #[test]
    fn story_decodes_camel_case_fields() {
        let json = r#"{
            "storyId": "abc-123",
            "title": "Title",
            "author": "Ann",
            "url": "http://x.org",
            "username": "ann",
            "createdAt": "2021-03-04T05:06:07.000Z",
            "updatedAt": "2021-03-04T05:06:07.000Z"
        }"#;
        let s: Story = serde_json::from_str(json).unwrap();
        assert_eq!(s.story_id.as_str(), "abc-123");
        assert_eq!(s.created_at.unwrap().year(), 2021);
    }

    #[test]
    fn new_story_requires_all_fields() {
        assert!(NewStory::from_fields("A", "T", "  ").is_none());
        let s = NewStory::from_fields(" A ", "T", "http://x").unwrap();
        assert_eq!(s.author, "A");
    }

    #[test]
    fn favorites_keyed_by_id() {
        let creds = Credentials { username: "u".into(), token: "t".into() };
        let mut user = User::new(creds, [StoryId::new("2")]);
        assert!(user.is_favorite(&StoryId::new("2")));
        assert!(user.add_favorite(StoryId::new("1")));
        assert!(!user.add_favorite(StoryId::new("1")));
        assert!(user.remove_favorite(&StoryId::new("2")));
        assert_eq!(user.favorite_count(), 1);
    }
}
