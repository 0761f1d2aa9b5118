//! The flows a user can trigger, assembled from [`api`] calls and [`view`]
//! updates.
//!
//! Each flow takes `&mut self`, so one runs to completion before another can
//! start, and the calls inside a flow are awaited one after another. A flow
//! always fetches before it touches the view, so a failed request leaves the
//! view as it was.

use std::{sync::Arc, time::Duration};

use log::{debug, info, trace, warn};
use tokio::sync::Mutex;

use crate::{
    api::{self, Api, Moderation},
    model::{Id, Session},
    prompt::Prompt,
    templates,
    view::{self, View},
};

pub const FEED_LIMIT: u32 = 50;
pub const FEEDBACK_CLEAR_AFTER: Duration = Duration::from_millis(3000);

pub const KUDOS_SENT: &str = "Kudos sent!";
pub const SEND_FAILED: &str = "Error sending kudos";
pub const HIDE_REASON: &str = "Reason for hiding (optional)";
pub const DELETE_CONFIRMATION: &str = "Delete this kudos permanently?";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Request(#[from] api::Error),
    #[error(transparent)]
    Render(#[from] templates::Error),
    #[error("no moderation controls for kudos {0}")]
    NoControls(Id),
    #[error("no user selected")]
    NoSelection,
    #[error("{0} is not one of the options")]
    NotAnOption(Id),
}

impl Error {
    fn server_message(&self) -> Option<&str> {
        match self {
            Error::Request(err) => err.server_message(),
            _ => None,
        }
    }

    fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Error::Request(err) => err.status(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

pub struct FeedClient<P> {
    api: Api,
    session: Session,
    view: Arc<Mutex<View>>,
    prompt: P,
    feed_limit: u32,
    feedback_clear_after: Duration,
}

impl<P: Prompt> FeedClient<P> {
    pub fn new(api: Api, prompt: P) -> FeedClient<P> {
        FeedClient {
            api,
            session: Session::default(),
            view: Arc::new(Mutex::new(View::new())),
            prompt,
            feed_limit: FEED_LIMIT,
            feedback_clear_after: FEEDBACK_CLEAR_AFTER,
        }
    }

    pub fn with_feed_limit(mut self, feed_limit: u32) -> FeedClient<P> {
        self.feed_limit = feed_limit;
        self
    }

    pub fn with_feedback_clear_after(mut self, delay: Duration) -> FeedClient<P> {
        self.feedback_clear_after = delay;
        self
    }

    #[cfg(test)]
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn prompt_mut(&mut self) -> &mut P {
        &mut self.prompt
    }

    /// A copy of the current view state.
    pub async fn snapshot(&self) -> View {
        self.view.lock().await.clone()
    }

    /// Load the page: roster, then identity, then feed.
    ///
    /// Identity has to be known before the feed is rendered, since it decides
    /// whether moderation controls appear.
    pub async fn init(&mut self) -> Result<()> {
        debug!("Initializing feed client");
        self.load_users().await?;
        self.whoami().await?;
        self.load_feed().await?;
        Ok(())
    }

    /// Rebuild both selects from the roster.
    ///
    /// Rebuilding brings the current user back into the recipient list, so
    /// the auth UI is reconciled again right after.
    pub async fn load_users(&mut self) -> Result<()> {
        let users = self.api.users().await?;

        let mut view = self.view.lock().await;
        view::populate_roster(&mut view, &users);
        view::update_auth_ui(&mut view, &self.session);
        Ok(())
    }

    pub async fn whoami(&mut self) -> Result<()> {
        let user = self.api.whoami().await?;
        match &user {
            Some(user) => debug!("Session belongs to {} ({})", user.username, user.id),
            None => debug!("No session"),
        }

        self.session = Session::new(user);
        self.update_auth_ui().await;
        Ok(())
    }

    pub async fn update_auth_ui(&self) {
        let mut view = self.view.lock().await;
        view::update_auth_ui(&mut view, &self.session);
    }

    pub async fn load_feed(&mut self) -> Result<()> {
        let entries = self.api.kudos(self.feed_limit).await?;
        let items = view::render_feed(&entries, &self.session)?;
        trace!("Rendered {} feed entries", items.len());

        self.view.lock().await.feed = items;
        Ok(())
    }

    pub async fn select_user(&self, id: Id) -> Result<()> {
        if !self.view.lock().await.user_select.select(id) {
            return Err(Error::NotAnOption(id));
        }
        Ok(())
    }

    pub async fn select_recipient(&self, id: Id) -> Result<()> {
        if !self.view.lock().await.recipient_select.select(id) {
            return Err(Error::NotAnOption(id));
        }
        Ok(())
    }

    pub async fn set_message(&self, message: impl Into<String>) {
        self.view.lock().await.message = message.into();
    }

    /// Log in as the user picked in the login select.
    pub async fn login(&mut self) -> Result<()> {
        let user_id = self
            .view
            .lock()
            .await
            .user_select
            .value()
            .ok_or(Error::NoSelection)?;

        self.api.login(user_id).await?;
        info!("Logged in as user {}", user_id);

        self.whoami().await?;
        self.load_users().await?;
        self.load_feed().await?;
        Ok(())
    }

    /// Log out. The session is cleared and the layout switched before the
    /// roster and feed are fetched again.
    pub async fn logout(&mut self) -> Result<()> {
        self.api.logout().await?;
        info!("Logged out");

        self.session.clear();
        self.update_auth_ui().await;

        self.load_users().await?;
        self.load_feed().await?;
        Ok(())
    }

    /// Send the message in the form to the selected recipient.
    ///
    /// Failures never escape: they end up in the feedback line. A rejected
    /// send leaves the message input alone so it can be sent again; once the
    /// server has accepted it, the input stays cleared even if the feed
    /// reload fails.
    pub async fn send_kudos(&mut self) {
        if let Err(err) = self.try_send_kudos().await {
            match err.status() {
                Some(status) => warn!("Failed to send kudos ({}): {}", status, err),
                None => warn!("Failed to send kudos: {}", err),
            }
            let text = err.server_message().unwrap_or(SEND_FAILED).to_string();
            self.view.lock().await.feedback.show(text);
        }
    }

    async fn try_send_kudos(&mut self) -> Result<()> {
        let (recipient_id, message) = {
            let view = self.view.lock().await;
            (view.recipient_select.value(), view.message.clone())
        };

        self.api.send_kudos(recipient_id, &message).await?;
        info!("Sent kudos to {:?}", recipient_id);

        let generation = {
            let mut view = self.view.lock().await;
            view.message.clear();
            view.feedback.show(KUDOS_SENT)
        };
        self.clear_feedback_later(generation);

        self.load_feed().await
    }

    /// Clear the feedback line after the configured delay, unless something
    /// newer was shown in the meantime.
    fn clear_feedback_later(&self, generation: u64) {
        let view = Arc::clone(&self.view);
        let delay = self.feedback_clear_after;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if view.lock().await.feedback.clear_if_current(generation) {
                trace!("Cleared feedback");
            }
        });
    }

    /// The Hide control of an entry: ask for an optional reason, hide it, and
    /// reload the feed.
    pub async fn hide(&mut self, id: Id) -> Result<()> {
        self.ensure_controls(id).await?;

        let reason = self.prompt.ask(HIDE_REASON).unwrap_or_default();
        self.api.moderate(id, &Moderation::Hide { reason }).await?;
        info!("Hid kudos {}", id);

        self.load_feed().await
    }

    /// The Delete control of an entry. Nothing is sent unless the user
    /// confirms. Returns whether the entry was deleted.
    pub async fn delete(&mut self, id: Id) -> Result<bool> {
        self.ensure_controls(id).await?;

        if !self.prompt.confirm(DELETE_CONFIRMATION) {
            debug!("Deletion of kudos {} not confirmed", id);
            return Ok(false);
        }

        self.api.moderate(id, &Moderation::Delete).await?;
        info!("Deleted kudos {}", id);

        self.load_feed().await?;
        Ok(true)
    }

    async fn ensure_controls(&self, id: Id) -> Result<()> {
        if !self.view.lock().await.has_controls(id) {
            return Err(Error::NoControls(id));
        }
        Ok(())
    }
}
