use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Opaque reference to a document in a named collection.
///
/// References travel inside other documents and across the wire as a
/// `"collection/uuid"` path string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocRef {
    pub collection: String,
    pub id: Uuid,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocRefParseError {
    #[error("document path must look like collection/uuid, got '{0}'")]
    BadShape(String),

    #[error("invalid document id in path '{0}'")]
    BadId(String),
}

impl DocRef {
    pub fn new(collection: impl Into<String>, id: Uuid) -> Self {
        Self {
            collection: collection.into(),
            id,
        }
    }

    /// Wire/storage form: `collection/uuid`
    pub fn path(&self) -> String {
        format!("{}/{}", self.collection, self.id)
    }
}

impl fmt::Display for DocRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.id)
    }
}

impl FromStr for DocRef {
    type Err = DocRefParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (collection, id) = s
            .rsplit_once('/')
            .ok_or_else(|| DocRefParseError::BadShape(s.to_string()))?;
        if collection.is_empty() {
            return Err(DocRefParseError::BadShape(s.to_string()));
        }
        let id = Uuid::parse_str(id).map_err(|_| DocRefParseError::BadId(s.to_string()))?;
        Ok(DocRef::new(collection, id))
    }
}

impl Serialize for DocRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.path())
    }
}

impl<'de> Deserialize<'de> for DocRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_round_trips() {
        let id = Uuid::new_v4();
        let doc_ref = DocRef::new("users", id);
        let parsed: DocRef = doc_ref.path().parse().unwrap();
        assert_eq!(parsed, doc_ref);
    }

    #[test]
    fn rejects_malformed_paths() {
        assert!(matches!(
            "no-slash-here".parse::<DocRef>(),
            Err(DocRefParseError::BadShape(_))
        ));
        assert!(matches!(
            "/cafebabe".parse::<DocRef>(),
            Err(DocRefParseError::BadShape(_))
        ));
        assert!(matches!(
            "users/not-a-uuid".parse::<DocRef>(),
            Err(DocRefParseError::BadId(_))
        ));
    }

    #[test]
    fn serde_uses_path_string() {
        let id = Uuid::parse_str("11111111-1111-1111-1111-111111111111").unwrap();
        let doc_ref = DocRef::new("devices", id);
        let json = serde_json::to_string(&doc_ref).unwrap();
        assert_eq!(json, "\"devices/11111111-1111-1111-1111-111111111111\"");

        let back: DocRef = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc_ref);
    }
}
