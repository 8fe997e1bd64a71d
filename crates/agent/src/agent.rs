//! Report agent
//!
//! Drives the transition function and applies its one effect: when a
//! turn completes the flow, the summary is rendered and, on the issue
//! path, dispatched by email. A failed dispatch regresses the stage to
//! the email question and keeps everything else that was collected.

use std::sync::Arc;

use parkdesk_core::{ConversationStage, ConversationState};
use parkdesk_mailer::Mailer;

use crate::flow::{advance, StepReply, Transition};
use crate::summary::summarize;
use crate::AgentError;

/// Reply when the summary email could not be delivered
const MAIL_RETRY: &str = "אירעה שגיאה בשליחת המייל. אנא נסה שנית או צור קשר עם התמיכה.";

/// One request/response exchange
#[derive(Debug, Clone)]
pub struct ChatTurn {
    /// Assistant reply for this turn
    pub response: String,
    /// State to hand back to the client
    pub state: ConversationState,
}

/// The conversational report desk
pub struct ReportAgent {
    sender: String,
    mailer: Arc<dyn Mailer>,
}

impl ReportAgent {
    /// Create an agent with the configured sender address and mailer
    pub fn new(sender: impl Into<String>, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            sender: sender.into(),
            mailer,
        }
    }

    /// Process one user message against the state the client sent back
    pub async fn process(
        &self,
        state: ConversationState,
        message: &str,
    ) -> Result<ChatTurn, AgentError> {
        let from_stage = state.stage;
        let Transition { state, reply } = advance(state, message, &self.sender);

        tracing::debug!(
            from = %from_stage,
            to = %state.stage,
            request_type = %state.request_type,
            "Turn advanced"
        );

        match reply {
            StepReply::Say(response) => Ok(ChatTurn { response, state }),
            StepReply::Complete => self.complete(state).await,
        }
    }

    async fn complete(&self, state: ConversationState) -> Result<ChatTurn, AgentError> {
        if state.stage != ConversationStage::Completed {
            return Err(AgentError::InconsistentState(
                "completion reply outside the terminal stage",
            ));
        }

        let summary = summarize(&state);

        if let Some(config) = &state.email_config {
            if !self.mailer.send(config, &summary).await {
                tracing::warn!(to = %config.to, "Summary email failed, re-asking for address");
                let state = ConversationState {
                    stage: ConversationStage::GetEmail,
                    ..state
                };
                return Ok(ChatTurn {
                    response: MAIL_RETRY.to_string(),
                    state,
                });
            }
            tracing::info!(to = %config.to, "Report delivered");
        }

        Ok(ChatTurn {
            response: summary,
            state,
        })
    }
}
