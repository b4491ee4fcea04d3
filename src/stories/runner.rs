use super::api::ApiClient;
use super::effect::Effect;
use super::msg::Msg;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinSet;

/// Executes effects against the API and turns outcomes back into messages.
pub struct EffectRunner {
    api: ApiClient,
    tx: UnboundedSender<Msg>,
    in_flight: JoinSet<()>,
}

impl EffectRunner {
    pub fn new(api: ApiClient) -> (Self, UnboundedReceiver<Msg>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let runner = Self {
            api,
            tx,
            in_flight: JoinSet::new(),
        };
        (runner, rx)
    }

    /// Awaits blocking effects and returns their messages. The rest run as
    /// detached tasks and report through the channel.
    pub async fn dispatch(&mut self, effects: Vec<Effect>) -> Vec<Msg> {
        while self.in_flight.try_join_next().is_some() {}

        let mut out = Vec::new();
        for effect in effects {
            if effect.is_blocking() {
                out.extend(perform(&self.api, effect).await);
            } else {
                let api = self.api.clone();
                let tx = self.tx.clone();
                self.in_flight.spawn(async move {
                    if let Some(msg) = perform(&api, effect).await {
                        let _ = tx.send(msg);
                    }
                });
            }
        }
        out
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Wait for detached requests so quitting does not drop them.
    pub async fn finish(mut self) {
        if !self.in_flight.is_empty() {
            log::info!("waiting for {} request(s) before exit", self.in_flight.len());
        }
        while self.in_flight.join_next().await.is_some() {}
    }

    /// `finish`, then hand back whatever the UI loop ended with, error or not.
    pub async fn settle<T>(self, outcome: anyhow::Result<T>) -> anyhow::Result<T> {
        if let Err(err) = &outcome {
            log::warn!("session ended with error: {:#}", err);
        }
        self.finish().await;
        outcome
    }
}

pub async fn perform(api: &ApiClient, effect: Effect) -> Option<Msg> {
    match effect {
        Effect::AddFavorite {
            credentials,
            story_id,
        } => match api.add_favorite(&credentials, &story_id).await {
            Ok(()) => {
                log::info!("favorited {}", story_id);
                None
            }
            Err(err) => {
                log::warn!("add favorite {} failed: {}", story_id, err);
                Some(Msg::RequestFailed(format!("could not favorite story: {}", err)))
            }
        },
        Effect::RemoveFavorite {
            credentials,
            story_id,
        } => match api.remove_favorite(&credentials, &story_id).await {
            Ok(()) => {
                log::info!("unfavorited {}", story_id);
                None
            }
            Err(err) => {
                log::warn!("remove favorite {} failed: {}", story_id, err);
                Some(Msg::RequestFailed(format!("could not unfavorite story: {}", err)))
            }
        },
        Effect::DeleteStory {
            credentials,
            story_id,
        } => match api.delete_story(&credentials, &story_id).await {
            Ok(()) => {
                log::info!("deleted {}", story_id);
                None
            }
            Err(err) => {
                log::warn!("delete {} failed: {}", story_id, err);
                Some(Msg::RequestFailed(format!("could not delete story: {}", err)))
            }
        },
        Effect::CreateStory { credentials, story } => {
            match api.create_story(&credentials, &story).await {
                Ok(created) => {
                    log::info!("created story {}", created.story_id);
                    Some(Msg::StoryCreated(created))
                }
                Err(err) => {
                    log::warn!("create story {:?} failed: {}", story.title, err);
                    Some(Msg::RequestFailed(format!("could not submit story: {}", err)))
                }
            }
        }
    }
}
