use serde::{Deserialize, Deserializer};

use super::Id;

/// A single feed entry as listed by the server.
///
/// Any string the server leaves out or sends as `null` becomes empty, so the
/// renderer never has to think about absent values.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct KudosEntry {
    pub id: Id,
    #[serde(default, deserialize_with = "nullable")]
    pub sender: String,
    #[serde(default, deserialize_with = "nullable")]
    pub recipient: String,
    #[serde(default, deserialize_with = "nullable")]
    pub message: String,
    #[serde(default, deserialize_with = "nullable")]
    pub created_at: String,
}

fn nullable<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
