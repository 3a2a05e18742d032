mod decompose;
mod errors;
mod exporter;
mod group;

use std::sync::Arc;

use crate::classifiers::ClassifierChain;
use crate::config::ExportConfig;
use crate::interpreters::InterpreterRegistry;

pub use decompose::decompose;
pub use errors::ExportError;
pub use exporter::AccountExporter;
pub use group::{decompose_group, Batch, GroupBuffer};

/// Everything an account exporter needs that is shared between accounts.
pub struct Pipeline {
    config: Arc<ExportConfig>,
    registry: InterpreterRegistry,
    classifiers: ClassifierChain
}

impl Pipeline {
    pub fn new(config: Arc<ExportConfig>) -> Self {
        Self {
            registry: InterpreterRegistry::from_config(&config),
            classifiers: ClassifierChain::from_config(&config),
            config
        }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    pub fn registry(&self) -> &InterpreterRegistry {
        &self.registry
    }

    pub fn classifiers(&self) -> &ClassifierChain {
        &self.classifiers
    }
}
