use std::fmt;

use dp_core::{Result, RewriteModel};

/// Offline model that hands every chunk back unchanged. Useful for dry
/// runs and for exercising the pipeline without credentials.
pub struct DummyModel;

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel").finish()
    }
}

#[async_trait::async_trait]
impl RewriteModel for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn rewrite_chunk(&self, text: &str) -> Result<String> {
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dummy_model_is_identity() {
        let model = DummyModel;
        let text = "One paragraph.\n\nAnother paragraph.";
        assert_eq!(model.rewrite_chunk(text).await.unwrap(), text);
    }
}
