use super::User;

/// The client's belief about who is logged in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub current_user: Option<User>,
}

impl Session {
    pub fn new(current_user: Option<User>) -> Session {
        Session { current_user }
    }

    pub fn user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn is_admin(&self) -> bool {
        self.current_user.as_ref().is_some_and(|user| user.is_admin)
    }

    pub fn clear(&mut self) {
        self.current_user = None;
    }
}
