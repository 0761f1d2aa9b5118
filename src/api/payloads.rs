use crate::model::{Id, KudosEntry, User};

#[derive(Debug, serde::Deserialize)]
pub(super) struct UserList {
    #[serde(default)]
    pub(super) users: Vec<User>,
}

#[derive(Debug, serde::Deserialize)]
pub(super) struct Whoami {
    #[serde(default)]
    pub(super) user: Option<User>,
}

#[derive(Debug, serde::Deserialize)]
pub(super) struct KudosList {
    #[serde(default)]
    pub(super) kudos: Vec<KudosEntry>,
}

#[derive(Debug, serde::Serialize)]
pub(super) struct Login {
    pub(super) user_id: Id,
}

#[derive(Debug, serde::Serialize)]
pub(super) struct SendKudos<'a> {
    /// `None` is sent as `null` and left for the server to reject.
    pub(super) recipient_id: Option<Id>,
    pub(super) message: &'a str,
}

/// A moderation request body.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Moderation {
    Hide { reason: String },
    Delete,
}

impl Moderation {
    pub fn name(&self) -> &'static str {
        match self {
            Moderation::Hide { .. } => "hide",
            Moderation::Delete => "delete",
        }
    }
}
