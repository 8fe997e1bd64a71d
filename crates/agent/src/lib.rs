//! Conversation state machine for the parkdesk report flow
//!
//! Features:
//! - Keyword-based request-type classification
//! - Per-stage input validation with corrective replies
//! - An explicit stage transition function
//! - Summary rendering and email dispatch on completion

pub mod agent;
pub mod classify;
pub mod flow;
pub mod summary;
pub mod validate;

pub use agent::{ChatTurn, ReportAgent};
pub use classify::classify;
pub use flow::{advance, StepReply, Transition, SUMMARY_SUBJECT};
pub use summary::summarize;
pub use validate::validate;

use thiserror::Error;

/// Agent errors
#[derive(Error, Debug)]
pub enum AgentError {
    /// The client sent a state blob the flow cannot act on
    #[error("Inconsistent conversation state: {0}")]
    InconsistentState(&'static str),
}
