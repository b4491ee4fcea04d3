use super::model::{Credentials, NewStory, Story, StoryId, User};
use crate::config::RuntimeConfig;
use crate::error::ApiError;
use futures_util::StreamExt;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

// 5 MB cap
const MAX_BODY_BYTES: usize = 5 * 1024 * 1024;
// Error bodies only feed log lines and the status line.
const MAX_ERROR_BODY_CHARS: usize = 512;

#[derive(Debug, Deserialize)]
struct StoriesBody {
    stories: Vec<Story>,
}

#[derive(Debug, Deserialize)]
struct StoryBody {
    story: Story,
}

#[derive(Debug, Deserialize)]
struct UserBody {
    user: UserProfile,
}

#[derive(Debug, Deserialize)]
struct UserProfile {
    name: Option<String>,
    #[serde(default)]
    favorites: Vec<Story>,
}

#[derive(Serialize)]
struct TokenBody<'a> {
    token: &'a str,
}

#[derive(Serialize)]
struct CreateBody<'a> {
    token: &'a str,
    story: &'a NewStory,
}

/// Thin client for the story/user REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base: Url,
    max_body: usize,
}

impl ApiClient {
    pub fn new(base_url: &str, connect_timeout: Duration, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent("story-cli/0.1")
            .gzip(true)
            .connect_timeout(connect_timeout)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base: Url::parse(base_url)?,
            max_body: MAX_BODY_BYTES,
        })
    }

    pub fn from_config(cfg: &RuntimeConfig) -> Result<Self, ApiError> {
        Self::new(&cfg.base_url, cfg.connect_timeout, cfg.request_timeout)
    }

    pub async fn get_stories(&self, skip: usize, limit: usize) -> Result<Vec<Story>, ApiError> {
        let url = self.endpoint(&["stories"])?;
        let req = self
            .client
            .get(url)
            .query(&[("skip", skip), ("limit", limit)]);
        let body: StoriesBody = self.send_json(req).await?;
        Ok(body.stories)
    }

    /// Fetch the user's profile and build a `User` from its favorites.
    pub async fn get_user(&self, credentials: &Credentials) -> Result<User, ApiError> {
        let url = self.endpoint(&["users", credentials.username.as_str()])?;
        let req = self
            .client
            .get(url)
            .query(&[("token", credentials.token.as_str())]);
        let body: UserBody = self.send_json(req).await?;
        let mut user = User::new(
            credentials.clone(),
            body.user.favorites.into_iter().map(|s| s.story_id),
        );
        user.name = body.user.name;
        Ok(user)
    }

    pub async fn create_story(&self, credentials: &Credentials, story: &NewStory) -> Result<Story, ApiError> {
        let url = self.endpoint(&["stories"])?;
        let req = self.client.post(url).json(&CreateBody {
            token: &credentials.token,
            story,
        });
        let body: StoryBody = self.send_json(req).await?;
        Ok(body.story)
    }

    pub async fn add_favorite(&self, credentials: &Credentials, id: &StoryId) -> Result<(), ApiError> {
        self.favorite_request(Method::POST, credentials, id).await
    }

    pub async fn remove_favorite(&self, credentials: &Credentials, id: &StoryId) -> Result<(), ApiError> {
        self.favorite_request(Method::DELETE, credentials, id).await
    }

    pub async fn delete_story(&self, credentials: &Credentials, id: &StoryId) -> Result<(), ApiError> {
        let url = self.endpoint(&["stories", id.as_str()])?;
        let req = self.client.delete(url).json(&TokenBody {
            token: &credentials.token,
        });
        self.send(req).await.map(drop)
    }

    async fn favorite_request(
        &self,
        method: Method,
        credentials: &Credentials,
        id: &StoryId,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&["users", credentials.username.as_str(), "favorites", id.as_str()])?;
        let req = self.client.request(method, url).json(&TokenBody {
            token: &credentials.token,
        });
        self.send(req).await.map(drop)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ApiError> {
        let bytes = self.send(req).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn send(&self, req: RequestBuilder) -> Result<Vec<u8>, ApiError> {
        let resp = req.send().await?;
        let status = resp.status();
        let bytes = self.read_capped(resp).await?;
        if !status.is_success() {
            return Err(ApiError::Status {
                status,
                body: String::from_utf8_lossy(&bytes)
                    .chars()
                    .take(MAX_ERROR_BODY_CHARS)
                    .collect(),
            });
        }
        Ok(bytes)
    }

    async fn read_capped(&self, resp: Response) -> Result<Vec<u8>, ApiError> {
        let mut stream = resp.bytes_stream();
        let mut buf: Vec<u8> = Vec::new();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            if buf.len() + chunk.len() > self.max_body {
                return Err(ApiError::TooLarge {
                    limit: self.max_body,
                });
            }
            buf.extend_from_slice(&chunk);
        }
        Ok(buf)
    }
}
