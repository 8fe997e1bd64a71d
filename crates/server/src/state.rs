//! Shared application state

use std::sync::Arc;

use parkdesk_agent::ReportAgent;
use parkdesk_config::Settings;
use parkdesk_mailer::Mailer;

/// State shared by all handlers
///
/// Constructed once at startup; the settings are read-only from then on.
/// No per-conversation state lives here — the state blob travels through
/// the client.
#[derive(Clone)]
pub struct AppState {
    /// Runtime settings
    pub config: Arc<Settings>,
    /// The conversation agent
    pub agent: Arc<ReportAgent>,
}

impl AppState {
    /// Wire the agent to the configured sender address and the mailer
    pub fn new(settings: Settings, mailer: Arc<dyn Mailer>) -> Self {
        let agent = ReportAgent::new(settings.smtp.sender(), mailer);
        Self {
            config: Arc::new(settings),
            agent: Arc::new(agent),
        }
    }
}
