//! Terminal client for a story-sharing API: list stories, keep favorites,
//! submit and delete stories.
pub mod config;
pub mod error;
pub mod logging;
pub mod open_url;
pub mod stories;
pub mod ui;
pub mod util;
