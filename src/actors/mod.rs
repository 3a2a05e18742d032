mod account_actor;
mod errors;

use std::collections::HashMap;
use std::sync::Arc;

use crate::assets::AssetCatalog;
use crate::config::ExportConfig;
use crate::formats::ExportFormat;
use crate::pipeline::Pipeline;
use crate::types::AssetId;

pub use account_actor::AccountActor;
pub use errors::ActorError;

/// Everything account actors share: the pipeline, the asset catalog and the
/// output format.
pub struct ExportContext {
    pub pipeline: Arc<Pipeline>,
    pub catalog: Arc<AssetCatalog>,
    pub format: Arc<dyn ExportFormat>,
    verified: Arc<HashMap<AssetId, Option<String>>>
}

impl ExportContext {
    pub fn new(config: Arc<ExportConfig>, catalog: Arc<AssetCatalog>, format: Arc<dyn ExportFormat>) -> Self {
        Self {
            verified: Arc::new(config.verified_symbols()),
            pipeline: Arc::new(Pipeline::new(config)),
            catalog,
            format
        }
    }

    pub fn verified(&self) -> Arc<HashMap<AssetId, Option<String>>> {
        Arc::clone(&self.verified)
    }
}
