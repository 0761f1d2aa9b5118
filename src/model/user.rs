use super::Id;

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct User {
    pub id: Id,
    pub username: String,
    #[serde(default)]
    pub is_admin: bool,
}

impl User {
    /// The name shown in the "logged in as" banner.
    pub fn display_name(&self) -> String {
        if self.is_admin {
            format!("{} (admin)", self.username)
        } else {
            self.username.clone()
        }
    }
}
