//! Logger setup.
//!
//! The terminal belongs to the menus, so log records go to a file in the
//! config directory. Only when that file cannot be opened do warnings fall
//! back to the terminal.

use std::fs::{self, File};
use std::path::Path;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

pub fn initialize(level: LevelFilter, log_file: Option<&Path>) {
    let config = build_config();
    let loggers: Vec<Box<dyn SharedLogger>> = match log_file.and_then(open_log_file) {
        Some(file) => vec![WriteLogger::new(level, config, file)],
        None => vec![TermLogger::new(
            LevelFilter::Warn.min(level),
            config,
            TerminalMode::Stderr,
            ColorChoice::Auto,
        )],
    };
    let _ = CombinedLogger::init(loggers);
}

/// Terminal logger for tests; no-ops if a logger is already installed.
pub fn initialize_for_tests() {
    let _ = CombinedLogger::init(vec![TermLogger::new(
        LevelFilter::Debug,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn open_log_file(path: &Path) -> Option<File> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    match File::create(path) {
        Ok(file) => Some(file),
        Err(err) => {
            eprintln!("Warning: could not create log file at {}: {}", path.display(), err);
            None
        }
    }
}
