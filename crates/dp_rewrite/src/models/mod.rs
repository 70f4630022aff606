use std::sync::Arc;

use dp_core::{Error, Result, RewriteModel};

pub mod dummy;
pub mod gemini;

pub use dummy::DummyModel;
pub use gemini::GeminiModel;

/// Builds the configured rewrite backend. `none` disables the rewrite
/// stage entirely.
pub fn create_model(name: &str, api_key: Option<String>) -> Result<Option<Arc<dyn RewriteModel>>> {
    match name {
        "gemini" => Ok(Some(Arc::new(GeminiModel::new(api_key)?))),
        "dummy" => Ok(Some(Arc::new(DummyModel))),
        "none" => Ok(None),
        other => Err(Error::Rewrite(format!(
            "unknown rewrite model: {} (available: gemini, dummy, none)",
            other
        ))),
    }
}
