//! Summary rendering
//!
//! Two templates keyed by request type. The issue template always has a
//! contact line (phone preferred over customer id); the message template
//! only prints the contact lines that exist.

use parkdesk_core::{ConversationState, RequestType};

/// Divider between the header/footer and the report fields
pub const SEPARATOR: &str = "--------------------------------";

/// Render the completion summary for a finished conversation
pub fn summarize(state: &ConversationState) -> String {
    match state.request_type {
        RequestType::Issue => issue_summary(state),
        _ => message_summary(state),
    }
}

fn issue_summary(state: &ConversationState) -> String {
    let contact = match &state.customer_phone {
        Some(phone) => format!("מספר טלפון: {}", phone),
        None => format!(
            "מספר לקוח: {}",
            state.customer_id.as_deref().unwrap_or_default()
        ),
    };

    let system_status = if state.is_system_disabled {
        "כן - המתקן מושבת"
    } else {
        "לא - המתקן עדיין פעיל"
    };

    let lines = vec![
        "תודה על פנייתכם למערכת הדיווח של חניה אורבנית.".to_string(),
        "להלן סיכום הדיווח:".to_string(),
        SEPARATOR.to_string(),
        "סוג פנייה: דיווח על תקלה".to_string(),
        contact,
        format!(
            "כתובת האתר: {}",
            state.site_address.as_deref().unwrap_or_default()
        ),
        format!(
            "תיאור התקלה: {}",
            state.issue_description.as_deref().unwrap_or_default()
        ),
        format!("מצב המתקן: {}", system_status),
        SEPARATOR.to_string(),
        "הפנייה נקלטה במערכת ותטופל בהקדם.".to_string(),
        "במידת הצורך ניצור איתכם קשר בהתאם לפרטים שמסרתם.".to_string(),
    ];

    lines.join("\n")
}

fn message_summary(state: &ConversationState) -> String {
    let mut lines = vec![
        "תודה על פנייתכם למערכת הדיווח של חניה אורבנית.".to_string(),
        "להלן סיכום ההודעה:".to_string(),
        SEPARATOR.to_string(),
        "סוג פנייה: הודעה כללית".to_string(),
    ];

    if let Some(phone) = &state.customer_phone {
        lines.push(format!("מספר טלפון: {}", phone));
    }
    if let Some(id) = &state.customer_id {
        lines.push(format!("מספר לקוח: {}", id));
    }

    lines.push(format!(
        "תוכן ההודעה: {}",
        state.issue_description.as_deref().unwrap_or_default()
    ));
    lines.push(SEPARATOR.to_string());
    lines.push("הודעתכם נקלטה במערכת ותטופל בהקדם.".to_string());

    lines.join("\n")
}
