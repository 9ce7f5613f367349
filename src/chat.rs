//! Support chat stand-in: every message gets the same canned reply. Nothing
//! is stored and no other user ever sees the conversation.

use crate::models::ChatMessage;
use chrono::{DateTime, Duration, Utc};

pub const SUPPORT_ID: &str = "support";
pub const SUPPORT_NAME: &str = "Support team";
pub const SUPPORT_REPLY: &str =
    "Thanks for reaching out. One of our support team members will get back to you shortly.";

pub fn exchange(user_id: &str, content: &str, now: DateTime<Utc>) -> [ChatMessage; 2] {
    let stamp = now.timestamp_millis();
    [
        ChatMessage {
            id: stamp.to_string(),
            sender_id: user_id.to_string(),
            sender_name: "me".to_string(),
            content: content.trim().to_string(),
            timestamp: now,
        },
        ChatMessage {
            id: (stamp + 1).to_string(),
            sender_id: SUPPORT_ID.to_string(),
            sender_name: SUPPORT_NAME.to_string(),
            content: SUPPORT_REPLY.to_string(),
            timestamp: now + Duration::seconds(1),
        },
    ]
}
