//! Conversation state blob round-tripped through the client
//!
//! The server holds nothing between requests: the full state travels in
//! every response and comes back with the next message. Field names on
//! the wire are camelCase for compatibility with the web widget.

use serde::{Deserialize, Serialize};

use crate::conversation::{ConversationStage, RequestType};

/// Delivery parameters for the summary email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Recipient, as entered by the user
    pub to: String,
    /// Configured sender address
    pub from: String,
    /// Fixed report subject
    pub subject: String,
}

/// Everything collected so far in one conversation
///
/// A new value is produced each turn; nothing is mutated in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationState {
    /// Current stage of the flow
    #[serde(default)]
    pub stage: ConversationStage,
    /// Classified request type, set once and never changed
    #[serde(default)]
    pub request_type: RequestType,
    /// Contact phone number, 7-10 digits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    /// Customer id, any string of 3+ chars
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    /// Site the parking facility is at
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_address: Option<String>,
    /// Issue description or free-text message body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_description: Option<String>,
    /// Whether the unit is disabled by the fault (issue path only)
    #[serde(default)]
    pub is_system_disabled: bool,
    /// Summary delivery parameters (issue path only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_config: Option<EmailConfig>,
}

impl ConversationState {
    /// Contact identifier for summaries: phone preferred over customer id
    pub fn contact_identifier(&self) -> Option<&str> {
        self.customer_phone
            .as_deref()
            .or(self.customer_id.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = ConversationState::default();
        assert_eq!(state.stage, ConversationStage::Initial);
        assert_eq!(state.request_type, RequestType::Unknown);
        assert!(state.customer_phone.is_none());
        assert!(!state.is_system_disabled);
        assert!(state.email_config.is_none());
    }

    #[test]
    fn test_wire_field_names() {
        let state = ConversationState {
            stage: ConversationStage::GetSiteAddress,
            request_type: RequestType::Issue,
            customer_phone: Some("0501234567".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["stage"], "GET_SITE_ADDRESS");
        assert_eq!(json["requestType"], "ISSUE");
        assert_eq!(json["customerPhone"], "0501234567");
        // absent optionals are omitted, not null
        assert!(json.get("customerId").is_none());
        assert!(json.get("emailConfig").is_none());
    }

    #[test]
    fn test_round_trip() {
        let state = ConversationState {
            stage: ConversationStage::Completed,
            request_type: RequestType::Issue,
            customer_id: Some("AB123".to_string()),
            site_address: Some("חניון הרצל 12".to_string()),
            issue_description: Some("השער לא נפתח".to_string()),
            is_system_disabled: true,
            email_config: Some(EmailConfig {
                to: "user@example.com".to_string(),
                from: "no-reply@urbanparking.co.il".to_string(),
                subject: "סיכום דיווח תקלה - חניה אורבנית".to_string(),
            }),
            ..Default::default()
        };

        let json = serde_json::to_string(&state).unwrap();
        let back: ConversationState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn test_partial_blob_deserializes() {
        // a client may send only the fields it has
        let back: ConversationState =
            serde_json::from_str(r#"{"stage":"GET_PHONE","requestType":"MESSAGE"}"#).unwrap();
        assert_eq!(back.stage, ConversationStage::GetPhone);
        assert_eq!(back.request_type, RequestType::Message);
        assert!(back.site_address.is_none());
    }

    #[test]
    fn test_contact_identifier_prefers_phone() {
        let mut state = ConversationState {
            customer_id: Some("AB123".to_string()),
            ..Default::default()
        };
        assert_eq!(state.contact_identifier(), Some("AB123"));

        state.customer_phone = Some("0501234567".to_string());
        assert_eq!(state.contact_identifier(), Some("0501234567"));
    }
}
