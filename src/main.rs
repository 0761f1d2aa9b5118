use std::{io, process::ExitCode};

use log::{error, info};

use api::Api;
use client::FeedClient;
use prompt::LinePrompt;
use settings::Settings;

mod api;
mod client;
mod command;
mod logger;
mod model;
mod prompt;
mod settings;
mod templates;
mod terminal;
mod view;

#[tokio::main]
async fn main() -> ExitCode {
    let settings = match Settings::new() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("Invalid configuration: {}", err);
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = logger::init(settings.log_level) {
        eprintln!("Failed to set up logging: {}", err);
    }

    info!("Starting kudos client for {}", settings.base_url);

    let api = match Api::new(&settings.base_url) {
        Ok(api) => api,
        Err(err) => {
            error!("Failed to build HTTP client: {}", err);
            return ExitCode::FAILURE;
        }
    };

    // The prompt holds the only stdin lock; commands are read through it.
    let prompt = LinePrompt::new(io::stdin().lock(), io::stdout());
    let mut client = FeedClient::new(api, prompt)
        .with_feed_limit(settings.feed_limit)
        .with_feedback_clear_after(settings.feedback_clear_after);

    if let Err(err) = client.init().await {
        error!("Failed to load the page: {}", err);
    }
    let snapshot_path = settings.snapshot_path.as_deref();
    terminal::show(&client, snapshot_path).await;
    println!("Type \"help\" for commands.");

    terminal::run_session(&mut client, snapshot_path).await;

    info!("Bye");
    ExitCode::SUCCESS
}
