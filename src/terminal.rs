//! The line-based front end: read a command, run it, show the page.

use std::{
    io::{BufRead, Write},
    path::Path,
};

use log::{debug, error, warn};

use crate::{
    client::{self, FeedClient},
    command::{self, Command},
    prompt::{LinePrompt, Prompt},
    templates,
    view::View,
};

pub const UNAVAILABLE: &str = "That is not available right now.";

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// The command's controls are not on screen, so nothing was sent.
    Unavailable,
}

/// Read commands until end of input or `quit`.
///
/// Commands and prompt answers come from the same input, so a confirmation
/// asked by `delete` consumes the line after the command.
pub async fn run_session<R: BufRead, W: Write>(
    client: &mut FeedClient<LinePrompt<R, W>>,
    snapshot_path: Option<&Path>,
) {
    loop {
        let line = match client.prompt_mut().read_line() {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(err) => {
                error!("Failed to read input: {}", err);
                break;
            }
        };

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(command::ParseError::Empty) => continue,
            Err(err) => {
                println!("{}", err);
                continue;
            }
        };
        debug!("Running {:?}", command);

        match command {
            Command::Quit => break,
            Command::Help => {
                println!("{}", command::HELP);
                continue;
            }
            command => match run(client, command).await {
                Ok(Outcome::Done) => {}
                Ok(Outcome::Unavailable) => println!("{}", UNAVAILABLE),
                Err(err) => error!("{}", err),
            },
        }

        show(client, snapshot_path).await;
    }
}

/// Run a command, refusing the ones whose controls are not on screen.
pub async fn run<P: Prompt>(client: &mut FeedClient<P>, command: Command) -> client::Result<Outcome> {
    if !available(&client.snapshot().await, &command) {
        return Ok(Outcome::Unavailable);
    }

    match command {
        Command::Users => client.load_users().await?,
        Command::Whoami => client.whoami().await?,
        Command::Feed => client.load_feed().await?,
        Command::Login(id) => {
            client.select_user(id).await?;
            client.login().await?;
        }
        Command::Logout => client.logout().await?,
        Command::Send { recipient, message } => {
            client.select_recipient(recipient).await?;
            client.set_message(message).await;
            client.send_kudos().await;
        }
        Command::Hide(id) => client.hide(id).await?,
        Command::Delete(id) => {
            client.delete(id).await?;
        }
        Command::Show | Command::Help | Command::Quit => {}
    }
    Ok(Outcome::Done)
}

fn available(view: &View, command: &Command) -> bool {
    match command {
        Command::Login(_) => view.login_area,
        Command::Logout => view.whoami,
        Command::Send { .. } => view.give_kudos,
        _ => true,
    }
}

/// Print the page, and write it as HTML when a snapshot path is set.
pub async fn show<P: Prompt>(client: &FeedClient<P>, snapshot_path: Option<&Path>) {
    let view = client.snapshot().await;
    println!("{}", view);

    let Some(path) = snapshot_path else {
        return;
    };
    match templates::render_page(&view) {
        Ok(page) => {
            if let Err(err) = tokio::fs::write(path, page).await {
                warn!("Failed to write snapshot to {}: {}", path.display(), err);
            }
        }
        Err(err) => error!("{}", err),
    }
}
