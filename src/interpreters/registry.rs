use std::collections::HashMap;

use tracing::debug;

use crate::config::ExportConfig;
use crate::interpreters::algomint::Algomint;
use crate::interpreters::{GroupContext, Interpreter, Protocol};
use crate::models::ExportRecord;
use crate::types::ApplicationId;

/// Dispatch table from application ids to protocols, plus the dapps recognised by
/// counterparty address instead of application id.
#[derive(Debug, Default)]
pub struct InterpreterRegistry {
    applications: HashMap<ApplicationId, Protocol>
}

impl InterpreterRegistry {
    pub fn from_config(config: &ExportConfig) -> Self {
        Self {
            applications: config.applications.iter()
                .map(|entry| (entry.id, entry.protocol))
                .collect()
        }
    }

    pub fn protocol(&self, application_id: ApplicationId) -> Option<Protocol> {
        self.applications.get(&application_id).copied()
    }

    /// The interpreter responsible for a group, if any.
    pub fn select(&self, group: &GroupContext<'_>, records: &[ExportRecord]) -> Option<&'static dyn Interpreter> {
        if group.is_application_group() {
            if let Some(application_id) = group.call.application_id {
                match self.protocol(application_id) {
                    Some(protocol) => return Some(protocol.interpreter()),
                    None => debug!("Skipping application [{application_id}] for group [{}]", group.describe())
                }
            }
        }

        if Algomint::applies(group, records) {
            return Some(&Algomint);
        }

        None
    }
}
