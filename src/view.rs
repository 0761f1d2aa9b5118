//! Client-side UI state.
//!
//! [`View`] stands in for the page: which regions are visible, what the two
//! selects hold, the message input, the feedback line and the rendered feed.
//! Everything in here is a plain function of its inputs so it can be checked
//! without a network or a browser.

use std::fmt::{Display, Formatter};

use log::trace;

use crate::{
    model::{Id, KudosEntry, Session, User},
    templates,
};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct SelectOption {
    pub value: Id,
    pub label: String,
}

/// An option list with a current selection, behaving like a `<select>`:
/// the first option is selected unless something else was picked.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct Select {
    pub options: Vec<SelectOption>,
    pub selected: Option<Id>,
}

impl Select {
    pub fn rebuild(&mut self, users: &[User]) {
        self.options = users
            .iter()
            .map(|user| SelectOption {
                value: user.id,
                label: user.username.clone(),
            })
            .collect();
        self.selected = self.options.first().map(|option| option.value);
    }

    /// Drop every option with the given value.
    pub fn remove(&mut self, value: Id) {
        self.options.retain(|option| option.value != value);
        if self.selected == Some(value) {
            self.selected = self.options.first().map(|option| option.value);
        }
    }

    /// Pick an option. Returns `false` (and changes nothing) if no option
    /// carries that value.
    pub fn select(&mut self, value: Id) -> bool {
        if !self.contains(value) {
            return false;
        }
        self.selected = Some(value);
        true
    }

    pub fn value(&self) -> Option<Id> {
        self.selected
    }

    pub fn contains(&self, value: Id) -> bool {
        self.options.iter().any(|option| option.value == value)
    }
}

/// The transient line under the send form.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct Feedback {
    pub text: String,
    #[serde(skip)]
    generation: u64,
}

impl Feedback {
    /// Replace the text, returning a token for [`Feedback::clear_if_current`].
    pub fn show(&mut self, text: impl Into<String>) -> u64 {
        self.generation += 1;
        self.text = text.into();
        self.generation
    }

    /// Clear the text only if nothing was shown since `generation`.
    pub fn clear_if_current(&mut self, generation: u64) -> bool {
        if self.generation != generation {
            return false;
        }
        self.text.clear();
        true
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct FeedItem {
    pub entry: KudosEntry,
    pub html: String,
    /// Whether Hide and Delete controls were rendered for this entry.
    pub moderation: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct View {
    pub login_area: bool,
    pub whoami: bool,
    pub current_user: String,
    pub give_kudos: bool,
    pub user_select: Select,
    pub recipient_select: Select,
    pub message: String,
    pub feedback: Feedback,
    pub feed: Vec<FeedItem>,
}

impl View {
    /// An empty page in the logged-out layout.
    pub fn new() -> View {
        let mut view = View::default();
        update_auth_ui(&mut view, &Session::default());
        view
    }

    /// Whether moderation controls exist for the given entry.
    pub fn has_controls(&self, id: Id) -> bool {
        self.feed
            .iter()
            .any(|item| item.entry.id == id && item.moderation)
    }
}

/// Clear and rebuild both selects from the roster.
pub fn populate_roster(view: &mut View, users: &[User]) {
    trace!("Rebuilding selects with {} users", users.len());
    view.user_select.rebuild(users);
    view.recipient_select.rebuild(users);
}

/// Reconcile the auth-dependent regions with the session.
pub fn update_auth_ui(view: &mut View, session: &Session) {
    match session.user() {
        Some(user) => {
            view.login_area = false;
            view.whoami = true;
            view.current_user = user.display_name();
            view.give_kudos = true;
            view.recipient_select.remove(user.id);
        }
        None => {
            view.login_area = true;
            view.whoami = false;
            view.give_kudos = false;
        }
    }
}

/// Render feed entries in the order given. Moderation controls appear only
/// for admin sessions.
pub fn render_feed(entries: &[KudosEntry], session: &Session) -> Result<Vec<FeedItem>, templates::Error> {
    let moderation = session.is_admin();
    entries
        .iter()
        .map(|entry| {
            Ok(FeedItem {
                entry: entry.clone(),
                html: templates::render_feed_item(entry, moderation)?,
                moderation,
            })
        })
        .collect()
}

impl Display for View {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.whoami {
            writeln!(f, "Logged in as {}", self.current_user)?;
        }
        if self.login_area {
            let users = self
                .user_select
                .options
                .iter()
                .map(|option| format!("{}={}", option.value, option.label))
                .collect::<Vec<_>>();
            writeln!(f, "Log in as: {}", users.join(", "))?;
        }
        if self.give_kudos {
            let recipients = self
                .recipient_select
                .options
                .iter()
                .map(|option| format!("{}={}", option.value, option.label))
                .collect::<Vec<_>>();
            writeln!(f, "Send kudos to: {}", recipients.join(", "))?;
        }
        if !self.feedback.text.is_empty() {
            writeln!(f, "> {}", self.feedback.text)?;
        }

        writeln!(f, "--- feed ({} entries) ---", self.feed.len())?;
        for item in &self.feed {
            let entry = &item.entry;
            write!(
                f,
                "[{}] {} -> {} ({}): {}",
                entry.id, entry.sender, entry.recipient, entry.created_at, entry.message
            )?;
            if item.moderation {
                write!(f, "  [hide] [delete]")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
