use anyhow::Result;
use console::Term;
use std::env;
use story_cli::{config, logging, stories};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse a minimal CLI: optional --config <path> and --base-url <url>
    let mut args = env::args().skip(1);
    let mut config_override: Option<String> = None;
    let mut base_url_override: Option<String> = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => config_override = args.next(),
            "--base-url" => base_url_override = args.next(),
            "-h" | "--help" => {
                print_help();
                return Ok(());
            }
            other => eprintln!("ignoring unknown argument: {}", other),
        }
    }

    let cfg = config::load(config_override, base_url_override)?;
    logging::initialize(cfg.log_level, cfg.log_file.as_deref());
    log::info!("starting against {}", cfg.base_url);

    let _ = Term::stdout().clear_screen();
    stories::run(&cfg).await
}

fn print_help() {
    println!("story-cli");
    println!("Usage: story-cli [--config <path>] [--base-url <url>]");
    println!("  --config <path>    Path to a config.toml (base_url, username, token, ...)");
    println!("  --base-url <url>   Story API base url, overrides the config file");
    println!("Environment: STORY_CLI_TOKEN overrides the configured token.");
}
