//! Stage transition function
//!
//! One user message advances the flow by at most one stage. The function
//! is pure and total over every declared stage: classification stages
//! run the classifier, collecting stages run the validator first and
//! short-circuit on rejection, and COMPLETED is an idle terminal state
//! that re-emits its own message without touching the state.

use parkdesk_core::{ConversationState, ConversationStage, EmailConfig, RequestType};

use crate::classify::classify;
use crate::validate::{is_phone, validate, yes_no};

/// Re-prompt when classification fails a second time
const REPHRASE: &str = "לא הצלחתי להבין את בקשתך. האם תוכל לנסח מחדש?";
/// Description prompt wording on the message path
const LEAVE_MESSAGE_PROMPT: &str = "אנא השאירו את הודעתכם";
/// Prompt after a customer id was captured instead of a phone
const ASK_PHONE: &str = "אנא הזן את מספר הטלפון שלך ליצירת קשר";
/// Subject of the summary email
pub const SUMMARY_SUBJECT: &str = "סיכום דיווח תקלה - חניה אורבנית";

/// Reply produced by a single transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepReply {
    /// Text to send back: the next prompt or a corrective message
    Say(String),
    /// The flow reached COMPLETED this turn; the caller renders the
    /// summary and dispatches the email if one is configured
    Complete,
}

/// Outcome of advancing the machine by one user message
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// The state to hand back to the client
    pub state: ConversationState,
    /// What to say this turn
    pub reply: StepReply,
}

impl Transition {
    fn say(state: ConversationState, reply: impl Into<String>) -> Self {
        Self {
            state,
            reply: StepReply::Say(reply.into()),
        }
    }
}

/// Stage prompt, with the message-path wording for the description stage
fn stage_message(stage: ConversationStage, request_type: RequestType) -> &'static str {
    if stage == ConversationStage::GetIssueDescription && request_type == RequestType::Message {
        return LEAVE_MESSAGE_PROMPT;
    }
    stage.prompt()
}

/// Advance the machine by one user message
///
/// `sender` is the configured from-address used when the email stage
/// builds the delivery parameters.
pub fn advance(state: ConversationState, message: &str, sender: &str) -> Transition {
    // classification runs before validation
    if matches!(
        state.stage,
        ConversationStage::Initial | ConversationStage::GetRequestType
    ) {
        let request_type = classify(message);
        if request_type.is_known() {
            let next = ConversationState {
                stage: ConversationStage::GetContactInfo,
                request_type,
                ..state
            };
            let prompt = stage_message(ConversationStage::GetContactInfo, request_type);
            return Transition::say(next, prompt);
        }

        return match state.stage {
            ConversationStage::Initial => {
                let next = ConversationState {
                    stage: ConversationStage::GetRequestType,
                    ..state
                };
                let prompt = ConversationStage::GetRequestType.prompt();
                Transition::say(next, prompt)
            }
            _ => Transition::say(state, REPHRASE),
        };
    }

    if state.stage.requires_validation() {
        if let Err(error) = validate(message, state.stage) {
            return Transition::say(state, error);
        }
    }

    match state.stage {
        ConversationStage::GetContactInfo => {
            if is_phone(message) {
                let next = ConversationState {
                    stage: ConversationStage::GetSiteAddress,
                    customer_phone: Some(message.to_string()),
                    ..state
                };
                Transition::say(next, ConversationStage::GetSiteAddress.prompt())
            } else {
                let next = ConversationState {
                    stage: ConversationStage::GetPhone,
                    customer_id: Some(message.to_string()),
                    ..state
                };
                Transition::say(next, ASK_PHONE)
            }
        }
        ConversationStage::GetPhone => {
            let next = ConversationState {
                stage: ConversationStage::GetSiteAddress,
                customer_phone: Some(message.to_string()),
                ..state
            };
            Transition::say(next, ConversationStage::GetSiteAddress.prompt())
        }
        ConversationStage::GetSiteAddress => {
            let request_type = state.request_type;
            let next = ConversationState {
                stage: ConversationStage::GetIssueDescription,
                site_address: Some(message.to_string()),
                ..state
            };
            Transition::say(
                next,
                stage_message(ConversationStage::GetIssueDescription, request_type),
            )
        }
        ConversationStage::GetIssueDescription => {
            if state.request_type == RequestType::Issue {
                let next = ConversationState {
                    stage: ConversationStage::CheckSystemStatus,
                    issue_description: Some(message.to_string()),
                    ..state
                };
                Transition::say(next, ConversationStage::CheckSystemStatus.prompt())
            } else {
                let next = ConversationState {
                    stage: ConversationStage::Completed,
                    issue_description: Some(message.to_string()),
                    ..state
                };
                Transition {
                    state: next,
                    reply: StepReply::Complete,
                }
            }
        }
        ConversationStage::CheckSystemStatus => {
            // the validator guarantees a yes/no token here
            let disabled = matches!(yes_no(message), Some(true));
            let next = ConversationState {
                stage: ConversationStage::GetEmail,
                is_system_disabled: disabled,
                ..state
            };
            Transition::say(next, ConversationStage::GetEmail.prompt())
        }
        ConversationStage::GetEmail => {
            let next = ConversationState {
                stage: ConversationStage::Completed,
                email_config: Some(EmailConfig {
                    to: message.to_string(),
                    from: sender.to_string(),
                    subject: SUMMARY_SUBJECT.to_string(),
                }),
                ..state
            };
            Transition {
                state: next,
                reply: StepReply::Complete,
            }
        }
        // COMPLETED (and the classification stages handled above)
        // re-emit their own stage message without advancing
        _ => {
            let prompt = state.stage.prompt();
            Transition::say(state, prompt)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SENDER: &str = "no-reply@urbanparking.co.il";

    fn advanced(state: ConversationState, message: &str) -> Transition {
        advance(state, message, SENDER)
    }

    fn reply_text(transition: &Transition) -> &str {
        match &transition.reply {
            StepReply::Say(text) => text,
            StepReply::Complete => panic!("expected a textual reply"),
        }
    }

    #[test]
    fn test_initial_with_issue_keyword() {
        let t = advanced(ConversationState::default(), "יש לי תקלה בחניה");
        assert_eq!(t.state.stage, ConversationStage::GetContactInfo);
        assert_eq!(t.state.request_type, RequestType::Issue);
        assert_eq!(
            reply_text(&t),
            "אנא הזינו את מספר הטלפון או מספר הלקוח שלכם"
        );
    }

    #[test]
    fn test_initial_unclassified_asks_request_type() {
        let t = advanced(ConversationState::default(), "שלום");
        assert_eq!(t.state.stage, ConversationStage::GetRequestType);
        assert_eq!(t.state.request_type, RequestType::Unknown);
        assert_eq!(reply_text(&t), ConversationStage::GetRequestType.prompt());
    }

    #[test]
    fn test_request_type_retry_reprompts() {
        let state = ConversationState {
            stage: ConversationStage::GetRequestType,
            ..Default::default()
        };
        let t = advanced(state.clone(), "מה?");
        assert_eq!(t.state, state);
        assert_eq!(reply_text(&t), REPHRASE);

        let t = advanced(t.state, "אני רוצה להשאיר הודעה");
        assert_eq!(t.state.stage, ConversationStage::GetContactInfo);
        assert_eq!(t.state.request_type, RequestType::Message);
    }

    #[test]
    fn test_contact_info_phone_branch() {
        let state = ConversationState {
            stage: ConversationStage::GetContactInfo,
            request_type: RequestType::Issue,
            ..Default::default()
        };
        let t = advanced(state, "0501234567");
        assert_eq!(t.state.stage, ConversationStage::GetSiteAddress);
        assert_eq!(t.state.customer_phone.as_deref(), Some("0501234567"));
        assert!(t.state.customer_id.is_none());
    }

    #[test]
    fn test_contact_info_customer_id_branch() {
        let state = ConversationState {
            stage: ConversationStage::GetContactInfo,
            request_type: RequestType::Issue,
            ..Default::default()
        };
        let t = advanced(state, "AB123");
        assert_eq!(t.state.stage, ConversationStage::GetPhone);
        assert_eq!(t.state.customer_id.as_deref(), Some("AB123"));
        assert!(t.state.customer_phone.is_none());
        assert_eq!(reply_text(&t), ASK_PHONE);
    }

    #[test]
    fn test_rejected_input_leaves_state_unchanged() {
        let state = ConversationState {
            stage: ConversationStage::GetPhone,
            request_type: RequestType::Issue,
            customer_id: Some("AB123".to_string()),
            ..Default::default()
        };
        let t = advanced(state.clone(), "not a phone");
        assert_eq!(t.state, state);
        assert_eq!(
            reply_text(&t),
            "מספר הטלפון אינו תקין. אנא הזן מספר בן 7-10 ספרות."
        );
    }

    #[test]
    fn test_description_prompt_wording_per_path() {
        let issue = ConversationState {
            stage: ConversationStage::GetSiteAddress,
            request_type: RequestType::Issue,
            ..Default::default()
        };
        let t = advanced(issue, "חניון הרצל 12");
        assert_eq!(reply_text(&t), "אנא תארו את התקלה");

        let message = ConversationState {
            stage: ConversationStage::GetSiteAddress,
            request_type: RequestType::Message,
            ..Default::default()
        };
        let t = advanced(message, "חניון הרצל 12");
        assert_eq!(t.state.site_address.as_deref(), Some("חניון הרצל 12"));
        assert_eq!(reply_text(&t), LEAVE_MESSAGE_PROMPT);
    }

    #[test]
    fn test_issue_path_forks_to_system_status() {
        let state = ConversationState {
            stage: ConversationStage::GetIssueDescription,
            request_type: RequestType::Issue,
            ..Default::default()
        };
        let t = advanced(state, "השער לא נפתח");
        assert_eq!(t.state.stage, ConversationStage::CheckSystemStatus);
        assert_eq!(t.state.issue_description.as_deref(), Some("השער לא נפתח"));
    }

    #[test]
    fn test_message_path_completes_after_description() {
        let state = ConversationState {
            stage: ConversationStage::GetIssueDescription,
            request_type: RequestType::Message,
            ..Default::default()
        };
        let t = advanced(state, "תעדכנו את מספר הטלפון שלי");
        assert_eq!(t.state.stage, ConversationStage::Completed);
        assert_eq!(t.reply, StepReply::Complete);
        assert!(t.state.email_config.is_none());
    }

    #[test]
    fn test_system_status_no_means_still_active() {
        let state = ConversationState {
            stage: ConversationStage::CheckSystemStatus,
            request_type: RequestType::Issue,
            ..Default::default()
        };
        let t = advanced(state, "לא");
        assert_eq!(t.state.stage, ConversationStage::GetEmail);
        assert!(!t.state.is_system_disabled);

        let state = ConversationState {
            stage: ConversationStage::CheckSystemStatus,
            request_type: RequestType::Issue,
            ..Default::default()
        };
        let t = advanced(state, "כן");
        assert!(t.state.is_system_disabled);
    }

    #[test]
    fn test_email_stage_builds_delivery_config() {
        let state = ConversationState {
            stage: ConversationStage::GetEmail,
            request_type: RequestType::Issue,
            ..Default::default()
        };
        let t = advanced(state, "user@example.com");
        assert_eq!(t.state.stage, ConversationStage::Completed);
        assert_eq!(t.reply, StepReply::Complete);

        let config = t.state.email_config.expect("email config set");
        assert_eq!(config.to, "user@example.com");
        assert_eq!(config.from, SENDER);
        assert_eq!(config.subject, SUMMARY_SUBJECT);
    }

    #[test]
    fn test_invalid_email_short_circuits() {
        let state = ConversationState {
            stage: ConversationStage::GetEmail,
            request_type: RequestType::Issue,
            ..Default::default()
        };
        let t = advanced(state.clone(), "not-an-email");
        assert_eq!(t.state, state);
        assert_eq!(
            reply_text(&t),
            "כתובת המייל אינה תקינה. אנא הזן כתובת מייל חוקית."
        );
    }

    #[test]
    fn test_completed_is_idle() {
        let state = ConversationState {
            stage: ConversationStage::Completed,
            request_type: RequestType::Message,
            issue_description: Some("הודעה".to_string()),
            ..Default::default()
        };
        let t = advanced(state.clone(), "עוד הודעה");
        assert_eq!(t.state, state);
        assert_eq!(reply_text(&t), ConversationStage::Completed.prompt());
    }

    #[test]
    fn test_message_path_never_visits_issue_stages() {
        let mut state = ConversationState::default();
        let mut visited = Vec::new();
        for message in [
            "אני רוצה להשאיר הודעה",
            "0501234567",
            "חניון הרצל 12",
            "נא לחזור אליי",
        ] {
            let t = advanced(state, message);
            state = t.state;
            visited.push(state.stage);
        }
        assert_eq!(state.stage, ConversationStage::Completed);
        assert!(!visited.contains(&ConversationStage::CheckSystemStatus));
        assert!(!visited.contains(&ConversationStage::GetEmail));
    }

    #[test]
    fn test_issue_path_visits_status_and_email() {
        let mut state = ConversationState::default();
        let mut visited = Vec::new();
        for message in [
            "יש לי תקלה בחניה",
            "AB123",
            "0501234567",
            "חניון הרצל 12",
            "השער לא נפתח",
            "כן",
            "user@example.com",
        ] {
            let t = advanced(state, message);
            state = t.state;
            visited.push(state.stage);
        }
        assert_eq!(state.stage, ConversationStage::Completed);
        assert!(visited.contains(&ConversationStage::CheckSystemStatus));
        assert!(visited.contains(&ConversationStage::GetEmail));
        assert_eq!(state.customer_id.as_deref(), Some("AB123"));
        assert_eq!(state.customer_phone.as_deref(), Some("0501234567"));
    }
}
