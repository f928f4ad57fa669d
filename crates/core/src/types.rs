//! Identifier newtypes and aliases for backend-issued values.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Driver primary key as stored in the backend database.
pub type DriverId = i64;

/// Violation-type primary key (the catalog of offence classes).
pub type ViolationTypeId = i64;

/// Backend-issued storage path for an uploaded capture.
///
/// The backend returns the server-side path of each stored image
/// (`slika1`, `slika2`); the client holds it only to echo it back in
/// the confirm/reject payload.
pub type ImageRef = String;

/// Opaque violation identifier issued by the backend on first-image
/// analysis.
///
/// Scopes the zoom submission and the confirm/reject payload. The
/// client never interprets it -- historical backend variants have sent
/// it both as a JSON number and as a string, so deserialization
/// accepts either and normalizes to the string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViolationId(String);

impl ViolationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ViolationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ViolationId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Serialize for ViolationId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Echo numeric ids back as numbers so the backend's integer
        // column accepts them; anything else goes through as a string.
        if let Ok(n) = self.0.parse::<i64>() {
            serializer.serialize_i64(n)
        } else {
            serializer.serialize_str(&self.0)
        }
    }
}

impl<'de> Deserialize<'de> for ViolationId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IdVisitor;

        impl serde::de::Visitor<'_> for IdVisitor {
            type Value = ViolationId;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a string or integer violation id")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(ViolationId(v.to_string()))
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(ViolationId(v.to_string()))
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(ViolationId(v.to_string()))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn violation_id_deserializes_from_string() {
        let id: ViolationId = serde_json::from_str(r#""V123""#).unwrap();
        assert_eq!(id.as_str(), "V123");
    }

    #[test]
    fn violation_id_deserializes_from_number() {
        let id: ViolationId = serde_json::from_str("7").unwrap();
        assert_eq!(id.as_str(), "7");
    }

    #[test]
    fn numeric_violation_id_serializes_as_number() {
        let json = serde_json::to_string(&ViolationId::new("7")).unwrap();
        assert_eq!(json, "7");
    }

    #[test]
    fn opaque_violation_id_serializes_as_string() {
        let json = serde_json::to_string(&ViolationId::new("V123")).unwrap();
        assert_eq!(json, r#""V123""#);
    }
}
