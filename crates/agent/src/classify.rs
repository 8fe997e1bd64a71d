//! Request-type classification
//!
//! Case-insensitive keyword containment over two fixed lists. The issue
//! list is checked first and the first match wins; there is no scoring.

use parkdesk_core::RequestType;

/// Keywords indicating a fault report
const ISSUE_KEYWORDS: &[&str] = &[
    "תקלה",
    "בעיה",
    "לא עובד",
    "דיווח",
    "מקולקל",
    "שבור",
    "תיקון",
    "מתקלקל",
    "תקול",
];

/// Keywords indicating a general message
const MESSAGE_KEYWORDS: &[&str] = &[
    "הודעה",
    "למסור",
    "להשאיר",
    "לעדכן",
    "להודיע",
    "לדבר",
    "ליצור קשר",
];

/// Classify free text into a request type
pub fn classify(text: &str) -> RequestType {
    let normalized = text.trim().to_lowercase();

    if ISSUE_KEYWORDS.iter().any(|k| normalized.contains(k)) {
        return RequestType::Issue;
    }

    if MESSAGE_KEYWORDS.iter().any(|k| normalized.contains(k)) {
        return RequestType::Message;
    }

    RequestType::Unknown
}
