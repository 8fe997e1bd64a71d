//! Per-stage input validation
//!
//! Each collecting stage has its own acceptance rule and its own
//! corrective message. Rejection never advances the flow. Lengths are
//! counted in characters so Hebrew input measures the way users see it.

use once_cell::sync::Lazy;
use regex::Regex;

use parkdesk_core::ConversationStage;

static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{7,10}$").unwrap());
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Affirmative answer to the system-status question
const YES_TOKEN: &str = "כן";
/// Negative answer to the system-status question
const NO_TOKEN: &str = "לא";

/// Whether the text is a 7-10 digit phone number
pub fn is_phone(text: &str) -> bool {
    PHONE_RE.is_match(text)
}

/// Parse a yes/no answer to the system-status question
pub fn yes_no(text: &str) -> Option<bool> {
    match text.trim().to_lowercase().as_str() {
        YES_TOKEN => Some(true),
        NO_TOKEN => Some(false),
        _ => None,
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Validate user input against the current stage's acceptance rule
///
/// Returns the stage's corrective message on rejection. Stages that
/// collect nothing accept everything.
pub fn validate(text: &str, stage: ConversationStage) -> Result<(), &'static str> {
    match stage {
        ConversationStage::GetContactInfo => {
            if is_phone(text) || char_len(text) >= 3 {
                Ok(())
            } else {
                Err("מספר הטלפון או מספר הלקוח אינו תקין. אנא הזן מספר בן 7-10 ספרות או מזהה לקוח תקין.")
            }
        }
        ConversationStage::GetPhone => {
            if is_phone(text) {
                Ok(())
            } else {
                Err("מספר הטלפון אינו תקין. אנא הזן מספר בן 7-10 ספרות.")
            }
        }
        ConversationStage::GetSiteAddress => {
            if char_len(text) >= 5 {
                Ok(())
            } else {
                Err("אנא הזן כתובת מפורטת יותר (לפחות 5 תווים).")
            }
        }
        ConversationStage::GetIssueDescription => {
            if char_len(text) >= 3 {
                Ok(())
            } else {
                Err("אנא הזן תיאור מפורט יותר (לפחות 3 תווים).")
            }
        }
        ConversationStage::CheckSystemStatus => {
            if yes_no(text).is_some() {
                Ok(())
            } else {
                Err("אנא ענה \"כן\" או \"לא\" - האם המתקן מושבת?")
            }
        }
        ConversationStage::GetEmail => {
            if EMAIL_RE.is_match(text) {
                Ok(())
            } else {
                Err("כתובת המייל אינה תקינה. אנא הזן כתובת מייל חוקית.")
            }
        }
        _ => Ok(()),
    }
}
