//! Conversation stages and request classification types

use serde::{Deserialize, Serialize};

/// Stages of the report-intake flow
///
/// The flow is a fixed sequence: classify the request, collect contact
/// details, collect the site and the description, and (for issue reports)
/// the system status and a summary email address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConversationStage {
    /// First user message, nothing collected yet
    #[default]
    Initial,
    /// Re-asking whether this is an issue report or a message
    GetRequestType,
    /// Collecting a phone number or customer id
    GetContactInfo,
    /// Collecting a phone number after a customer id was given
    GetPhone,
    /// Collecting the site address
    GetSiteAddress,
    /// Collecting the issue description or message body
    GetIssueDescription,
    /// Asking whether the unit is disabled by the fault
    CheckSystemStatus,
    /// Collecting the address for the summary email
    GetEmail,
    /// Flow finished, summary delivered
    Completed,
}

impl ConversationStage {
    /// User-facing prompt for this stage
    pub fn prompt(&self) -> &'static str {
        match self {
            ConversationStage::Initial => {
                "שלום, אני מערכת הדיווח של חניה אורבנית - במה אוכל לעזור לכם?"
            }
            ConversationStage::GetRequestType => "האם תרצו לדווח על תקלה או להשאיר הודעה?",
            ConversationStage::GetContactInfo => "אנא הזינו את מספר הטלפון או מספר הלקוח שלכם",
            ConversationStage::GetPhone => "אנא הזינו את מספר הטלפון שלכם ליצירת קשר",
            ConversationStage::GetSiteAddress => "באיזה אתר נמצאת החניה?",
            ConversationStage::GetIssueDescription => "אנא תארו את התקלה",
            ConversationStage::CheckSystemStatus => "האם המתקן מושבת כתוצאה מהתקלה? (כן/לא)",
            ConversationStage::GetEmail => "לאיזו כתובת מייל לשלוח את סיכום התקלה?",
            ConversationStage::Completed => "תודה על פנייתכם. הפרטים נקלטו במערכת ויטופלו בהקדם.",
        }
    }

    /// Whether user input at this stage goes through the validator first
    pub fn requires_validation(&self) -> bool {
        matches!(
            self,
            ConversationStage::GetContactInfo
                | ConversationStage::GetPhone
                | ConversationStage::GetSiteAddress
                | ConversationStage::GetIssueDescription
                | ConversationStage::CheckSystemStatus
                | ConversationStage::GetEmail
        )
    }

    /// Whether the flow has finished
    pub fn is_terminal(&self) -> bool {
        matches!(self, ConversationStage::Completed)
    }

    /// Human-readable name for logs and diagnostics
    pub fn display_name(&self) -> &'static str {
        match self {
            ConversationStage::Initial => "Initial",
            ConversationStage::GetRequestType => "Get Request Type",
            ConversationStage::GetContactInfo => "Get Contact Info",
            ConversationStage::GetPhone => "Get Phone",
            ConversationStage::GetSiteAddress => "Get Site Address",
            ConversationStage::GetIssueDescription => "Get Issue Description",
            ConversationStage::CheckSystemStatus => "Check System Status",
            ConversationStage::GetEmail => "Get Email",
            ConversationStage::Completed => "Completed",
        }
    }
}

impl std::fmt::Display for ConversationStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Classification of what the user wants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestType {
    /// Not classified yet
    #[default]
    Unknown,
    /// Reporting a fault at a site
    Issue,
    /// Leaving a general message
    Message,
}

impl RequestType {
    /// Whether classification succeeded
    pub fn is_known(&self) -> bool {
        !matches!(self, RequestType::Unknown)
    }
}

impl std::fmt::Display for RequestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RequestType::Unknown => "unknown",
            RequestType::Issue => "issue",
            RequestType::Message => "message",
        };
        write!(f, "{}", name)
    }
}
