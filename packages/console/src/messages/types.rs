use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Upper bound on the page size of the message read path
pub const MAX_PAGE_SIZE: i64 = 100;

/// Page size used when the client does not send one
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// A message row joined with the sender's display name
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub id: i64,
    pub sender_id: Option<i64>,
    pub sender_name: Option<String>,
    pub channel: String,
    pub content: String,
    pub message_type: String,
    pub metadata: Option<Value>,
    pub created_at: String,
}

/// Pagination envelope for the message read path
#[derive(Debug, Clone, Serialize)]
pub struct Pagination {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub has_more: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessagePage {
    pub messages: Vec<Message>,
    pub pagination: Pagination,
}

/// Filters for the message read path.
///
/// `channel` restricts to an exact match; `agent` matches rows the agent sent
/// or the agent's 1:1 thread (`agent_<id>`). Both AND together when given.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MessageFilter {
    pub channel: Option<String>,
    pub agent: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl MessageFilter {
    /// Clamp limit to `(0, MAX_PAGE_SIZE]` and offset to `>= 0`
    pub fn page(&self) -> (i64, i64) {
        let limit = self
            .limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        let offset = self.offset.unwrap_or(0).max(0);
        (limit, offset)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageSendInput {
    pub content: String,
    pub channel: String,
    pub sender_id: Option<i64>,
    pub message_type: Option<String>,
    pub metadata: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_applies_defaults() {
        let filter = MessageFilter::default();
        assert_eq!(filter.page(), (DEFAULT_PAGE_SIZE, 0));
    }

    #[test]
    fn page_clamps_limit_and_offset() {
        let filter = MessageFilter {
            limit: Some(500),
            offset: Some(-3),
            ..Default::default()
        };
        assert_eq!(filter.page(), (MAX_PAGE_SIZE, 0));
    }
}
