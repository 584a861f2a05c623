//! Room identifiers.
//!
//! A room is the lobby's unit of play. The engine keys sessions by room and
//! never interprets the identifier.

use serde::{Deserialize, Serialize};

/// Opaque room identifier supplied by the lobby layer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub String);

impl RoomId {
    /// Create a new room ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_id_serializes_as_string() {
        let room = RoomId::new("room_1700000000_ab12");
        let json = serde_json::to_string(&room).unwrap();
        assert_eq!(json, r#""room_1700000000_ab12""#);

        let back: RoomId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, room);
        assert_eq!(back.to_string(), "room_1700000000_ab12");
    }
}
