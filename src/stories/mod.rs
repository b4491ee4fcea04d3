mod api;
mod effect;
mod model;
mod msg;
mod render;
mod runner;
mod state;
mod update;

pub use api::ApiClient;
pub use effect::Effect;
pub use model::{Credentials, NewStory, Story, StoryCollection, StoryId, User};
pub use msg::Msg;
pub use render::{render_all, render_favorites, story_row, FavoriteState, Star, StoryRow};
pub use runner::{perform, EffectRunner};
pub use state::{AppState, View};
pub use update::update;

use crate::config::RuntimeConfig;
use crate::open_url::open_url;
use crate::ui::{self, Menu, MenuChoice};
use crate::util::sanitize::sanitize_for_terminal;
use anyhow::{Context, Result};
use console::style;
use std::collections::VecDeque;
use tokio::sync::mpsc::UnboundedReceiver;

const MAX_TITLE_CHARS: usize = 200;

enum Flow {
    Continue,
    Quit,
}

/// Initial fetch: the story list, then the user's favorites if signed in.
/// A failed profile fetch degrades to anonymous mode.
pub async fn load(api: &ApiClient, cfg: &RuntimeConfig) -> Result<Msg> {
    let stories = api
        .get_stories(0, cfg.page_limit)
        .await
        .context("failed to fetch stories")?;
    let user = match &cfg.credentials {
        Some(creds) => match api.get_user(creds).await {
            Ok(user) => Some(user),
            Err(err) => {
                log::warn!("could not load user {}: {}", creds.username, err);
                None
            }
        },
        None => None,
    };
    Ok(Msg::StoriesLoaded { stories, user })
}

/// One-line label for a row: star, title, host, author, poster.
pub fn row_label(row: &StoryRow) -> String {
    let star = match row.star {
        Star::Hidden => String::new(),
        Star::Shown(FavoriteState::Favorited) => format!("{} ", style("★").yellow()),
        Star::Shown(FavoriteState::NotFavorited) => "☆ ".to_string(),
    };
    format!(
        "{}{} ({}) by {}, posted by {}",
        star,
        sanitize_for_terminal(&row.title, MAX_TITLE_CHARS),
        sanitize_for_terminal(&row.host_name, 80),
        sanitize_for_terminal(&row.author, 80),
        sanitize_for_terminal(&row.username, 80),
    )
}

struct Session<'a> {
    cfg: &'a RuntimeConfig,
    state: AppState,
    runner: EffectRunner,
    rx: UnboundedReceiver<Msg>,
}

impl Session<'_> {
    /// Feed a message through `update`, running effects until quiet.
    async fn apply(&mut self, msg: Msg) {
        let mut pending = VecDeque::from([msg]);
        while let Some(msg) = pending.pop_front() {
            let (next, effects) = update(std::mem::take(&mut self.state), msg);
            self.state = next;
            pending.extend(self.runner.dispatch(effects).await);
        }
    }

    async fn drain_results(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            self.apply(msg).await;
        }
    }

    fn signed_in_label(&self) -> String {
        match self.state.user() {
            Some(u) => format!("Signed in as {}", u.username()),
            None => "Not signed in (set username and token in config)".to_string(),
        }
    }

    async fn main_menu(&mut self) -> Result<()> {
        let items: Vec<String> = vec![
            "All stories".into(),
            "Favorites".into(),
            "Submit a story".into(),
            "Quit".into(),
        ];
        loop {
            self.drain_results().await;
            let status = self.state.take_status();
            let title = format!("Stories - {} (q = quit)", self.signed_in_label());
            let menu = Menu {
                title: &title,
                items: &items,
                header: self.cfg.header.as_deref(),
                status: status.as_deref(),
            };
            let flow = match menu.prompt() {
                Ok(MenuChoice::Index(0)) => {
                    self.apply(Msg::ShowAll).await;
                    self.list_screen().await?
                }
                Ok(MenuChoice::Index(1)) => {
                    self.apply(Msg::ShowFavorites).await;
                    self.list_screen().await?
                }
                Ok(MenuChoice::Index(2)) => self.submit_form().await?,
                Ok(MenuChoice::Index(_)) | Ok(MenuChoice::Quit) | Ok(MenuChoice::Back) => Flow::Quit,
                Err(err) => {
                    log::debug!("menu input: {}", err);
                    Flow::Continue
                }
            };
            if let Flow::Quit = flow {
                return Ok(());
            }
        }
    }

    async fn list_screen(&mut self) -> Result<Flow> {
        loop {
            self.drain_results().await;
            let labels: Vec<String> = self.state.rows().iter().map(row_label).collect();
            let status = self.state.take_status();
            let title = match self.state.view() {
                View::All => "All stories (b = back, q = quit)",
                View::Favorites => "Favorites (b = back, q = quit)",
            };
            let menu = Menu {
                title,
                items: &labels,
                header: self.cfg.header.as_deref(),
                status: status.as_deref(),
            };
            match menu.prompt() {
                Ok(MenuChoice::Back) => return Ok(Flow::Continue),
                Ok(MenuChoice::Quit) => return Ok(Flow::Quit),
                Ok(MenuChoice::Index(i)) => {
                    let Some(row) = self.state.rows().get(i).cloned() else {
                        continue;
                    };
                    if let Flow::Quit = self.row_screen(row).await? {
                        return Ok(Flow::Quit);
                    }
                }
                Err(err) => log::debug!("list input: {}", err),
            }
        }
    }

    async fn row_screen(&mut self, row: StoryRow) -> Result<Flow> {
        #[derive(Clone, Copy)]
        enum RowAction {
            Open,
            Favorite,
            Delete,
        }
        let [favorite_msg, delete_msg] = row.actions();

        let mut labels = vec!["Open link".to_string()];
        let mut actions = vec![RowAction::Open];
        match row.star {
            Star::Shown(FavoriteState::Favorited) => {
                labels.push("Remove from favorites".into());
                actions.push(RowAction::Favorite);
            }
            Star::Shown(FavoriteState::NotFavorited) => {
                labels.push("Add to favorites".into());
                actions.push(RowAction::Favorite);
            }
            Star::Hidden => {}
        }
        if row.can_delete {
            labels.push("Delete story".into());
            actions.push(RowAction::Delete);
        }

        let title = format!("{} (b = back, q = quit)", row_label(&row));
        let menu = Menu {
            title: &title,
            items: &labels,
            header: self.cfg.header.as_deref(),
            status: None,
        };
        match menu.prompt() {
            Ok(MenuChoice::Quit) => return Ok(Flow::Quit),
            Ok(MenuChoice::Index(i)) => match actions.get(i) {
                Some(RowAction::Open) => {
                    if let Err(err) = open_url(&row.url, self.cfg.open_command.as_deref()) {
                        log::warn!("open {} failed: {:#}", row.url, err);
                        self.apply(Msg::Notice(format!("{:#}", err))).await;
                    }
                }
                Some(RowAction::Favorite) => self.apply(favorite_msg).await,
                Some(RowAction::Delete) => self.apply(delete_msg).await,
                None => {}
            },
            Ok(MenuChoice::Back) | Err(_) => {}
        }
        Ok(Flow::Continue)
    }

    async fn submit_form(&mut self) -> Result<Flow> {
        println!("Submit a new story (all fields required)");
        let author = ui::prompt_text("Author")?;
        let title = ui::prompt_text("Title")?;
        let url = ui::prompt_text("URL")?;
        let Some(story) = NewStory::from_fields(&author, &title, &url) else {
            self.apply(Msg::Notice("author, title and url are all required".into()))
                .await;
            return Ok(Flow::Continue);
        };
        println!("Submitting...");
        self.apply(Msg::StorySubmitted(story)).await;
        if self.state.status().is_some() {
            return Ok(Flow::Continue);
        }
        self.list_screen().await
    }
}

/// Fetch stories and run the interactive screens until the user quits.
pub async fn run(cfg: &RuntimeConfig) -> Result<()> {
    let api = ApiClient::from_config(cfg).context("failed to build API client")?;
    println!("Loading stories from {}...", cfg.base_url);
    let loaded = load(&api, cfg).await?;

    let (runner, rx) = EffectRunner::new(api);
    let mut session = Session {
        cfg,
        state: AppState::new(),
        runner,
        rx,
    };
    session.apply(loaded).await;
    let outcome = session.main_menu().await;

    if session.runner.in_flight() > 0 {
        println!("Finishing pending requests...");
    }
    session.runner.settle(outcome).await
}
