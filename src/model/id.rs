use std::{
    fmt::{Display, Formatter},
    num::ParseIntError,
    str::FromStr,
};

/// An opaque identifier handed out by the server.
///
/// The server emits integers, but form values travel as strings, so both are
/// accepted when deserializing. It is always serialized as an integer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(i64);

impl Id {
    #[cfg(test)]
    pub fn id(&self) -> i64 {
        self.0
    }
}

impl From<i64> for Id {
    fn from(value: i64) -> Self {
        Id(value)
    }
}

impl FromStr for Id {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, ParseIntError> {
        Ok(Id(s.trim().parse::<i64>()?))
    }
}

impl Display for Id {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl serde::Serialize for Id {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for Id {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(i64),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(num) => Ok(Id(num)),
            Repr::Text(text) => Id::from_str(&text).map_err(D::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_numbers_and_numeric_strings() {
        let from_number: Id = serde_json::from_str("7").unwrap();
        let from_text: Id = serde_json::from_str("\"7\"").unwrap();
        assert_eq!(from_number, Id::from(7));
        assert_eq!(from_text, Id::from(7));
    }

    #[test]
    fn rejects_non_numeric_strings() {
        assert!(serde_json::from_str::<Id>("\"seven\"").is_err());
    }

    #[test]
    fn serializes_as_a_number() {
        assert_eq!(serde_json::to_string(&Id::from(42)).unwrap(), "42");
    }
}
