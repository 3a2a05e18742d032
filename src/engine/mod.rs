mod errors;
mod export_engine;
#[cfg(test)]
mod tests;

pub use errors::EngineError;
pub use export_engine::ExportEngine;
