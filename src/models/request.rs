use serde::{Deserialize, Serialize};

use crate::error::{IrisError, IrisResult};

/// Body of the chat stream request.
///
/// Built once per submitted message and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatRequest {
    /// Who is asking
    pub user_identifier: String,
    /// The message text
    pub user_input: String,
    /// Conversation thread the message belongs to
    pub thread_id: String,
}

impl ChatRequest {
    /// Create a request, rejecting empty (or whitespace-only) fields.
    pub fn new(
        user_identifier: impl Into<String>,
        user_input: impl Into<String>,
        thread_id: impl Into<String>,
    ) -> IrisResult<Self> {
        let request = Self {
            user_identifier: user_identifier.into(),
            user_input: user_input.into(),
            thread_id: thread_id.into(),
        };
        request.validate()?;
        Ok(request)
    }

    /// Check that every field is non-empty.
    pub fn validate(&self) -> IrisResult<()> {
        let fields = [
            ("user_identifier", &self.user_identifier),
            ("user_input", &self.user_input),
            ("thread_id", &self.thread_id),
        ];
        for (field, value) in fields {
            if value.trim().is_empty() {
                return Err(IrisError::InvalidRequest { field });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_serialization() {
        let request = ChatRequest::new("u1", "Is TCS a buy?", "t1").unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "user_identifier": "u1",
                "user_input": "Is TCS a buy?",
                "thread_id": "t1"
            })
        );
    }

    #[test]
    fn test_chat_request_rejects_empty_input() {
        let err = ChatRequest::new("u1", "   ", "t1").unwrap_err();
        assert!(matches!(
            err,
            IrisError::InvalidRequest {
                field: "user_input"
            }
        ));
    }

    #[test]
    fn test_chat_request_rejects_empty_thread() {
        let err = ChatRequest::new("u1", "hello", "").unwrap_err();
        assert!(matches!(err, IrisError::InvalidRequest { field: "thread_id" }));
    }

    #[test]
    fn test_chat_request_rejects_empty_user() {
        assert!(ChatRequest::new("", "hello", "t1").is_err());
    }
}
