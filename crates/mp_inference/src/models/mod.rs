use std::sync::Arc;

use mp_core::{Error, InferenceModel, Result};

use crate::Config;

pub mod dummy;
pub mod gemini;

pub use dummy::DummyModel;
pub use gemini::GeminiModel;

/// Builds the model named by `config` (`gemini` or `dummy`).
pub async fn create_model(config: Option<Config>) -> Result<Arc<dyn InferenceModel>> {
    let config = config.unwrap_or_else(Config::from_env);
    let model: Arc<dyn InferenceModel> = match config.model_name().to_lowercase().as_str() {
        "gemini" => Arc::new(GeminiModel::new(&config)?),
        "dummy" => Arc::new(DummyModel::new()),
        other => {
            return Err(Error::InvalidInput(format!(
                "unknown model '{}'. Available models: gemini, dummy",
                other
            )))
        }
    };
    tracing::debug!("Created inference model {}", model.name());
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_model_by_name() {
        let config = Config {
            model_name: Some("Dummy".to_string()),
            ..Default::default()
        };
        assert_eq!(create_model(Some(config)).await.unwrap().name(), "Dummy");

        let config = Config {
            model_name: Some("gemini".to_string()),
            ..Default::default()
        };
        let model = create_model(Some(config)).await.unwrap();
        assert_eq!(model.name(), "Gemini");
        assert!(!model.has_credential());
    }

    #[tokio::test]
    async fn test_unknown_model_is_rejected() {
        let config = Config {
            model_name: Some("llama".to_string()),
            ..Default::default()
        };
        assert!(matches!(create_model(Some(config)).await, Err(Error::InvalidInput(_))));
    }
}
