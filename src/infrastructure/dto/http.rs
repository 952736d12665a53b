//! HTTP response shapes.

use serde::{Deserialize, Serialize};

use crate::common::time::millis_to_rfc3339;
use crate::domain::Room;

/// JSON representation of a room record.
///
/// Timestamps are rendered RFC 3339 (UTC) at this boundary; the domain
/// keeps epoch millis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDto {
    pub room_id: String,
    pub name: String,
    pub notes: String,
    pub created_at: String,
    pub last_activity: String,
}

impl From<&Room> for RoomDto {
    fn from(room: &Room) -> Self {
        Self {
            room_id: room.id.as_str().to_string(),
            name: room.name.clone(),
            notes: room.notes.clone(),
            created_at: millis_to_rfc3339(room.created_at.value()),
            last_activity: millis_to_rfc3339(room.last_activity.value()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RoomId, Timestamp};

    #[test]
    fn test_room_dto_field_names_and_formats() {
        // given: a room created at 2023-01-01 00:00:00 UTC
        let room = Room::new(
            RoomId::new("abc1234").unwrap(),
            None,
            Timestamp::new(1_672_531_200_000),
        );

        // when:
        let dto = RoomDto::from(&room);
        let json = serde_json::to_value(&dto).unwrap();

        // then: camelCase keys, RFC 3339 timestamps, defaulted name
        assert_eq!(json["roomId"], "abc1234");
        assert_eq!(json["name"], "Study Room");
        assert_eq!(json["notes"], "");
        assert!(
            json["createdAt"]
                .as_str()
                .unwrap()
                .starts_with("2023-01-01T00:00:00")
        );
        assert_eq!(json["createdAt"], json["lastActivity"]);
    }
}
