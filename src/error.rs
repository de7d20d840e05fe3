use thiserror::Error;

#[derive(Debug, Error)]
pub enum ThreadLogicError {
    #[error("Inputs not ready: missing {0}")]
    InputsNotReady(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    #[error("Unknown fabric: {0}")]
    UnknownFabric(String),

    #[error("Invalid tech pack: {}", .0.join("; "))]
    InvalidTechPack(Vec<String>),

    #[error("Ingestion error: {0}")]
    Ingestion(String),

    #[error("No API key configured for '{0}'")]
    MissingCredential(String),

    #[error("Keychain error: {0}")]
    Keychain(String),

    #[error("Explanation error: {0}")]
    Explanation(String),

    #[error("Cannot apply '{event}' while in '{state}'")]
    InvalidTransition {
        state: &'static str,
        event: &'static str,
    },
}

impl From<ThreadLogicError> for String {
    fn from(err: ThreadLogicError) -> Self {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_tech_pack_joins_problems() {
        let err = ThreadLogicError::InvalidTechPack(vec![
            "spi must be greater than 0".to_string(),
            "garment type is empty".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "Invalid tech pack: spi must be greater than 0; garment type is empty"
        );
    }

    #[test]
    fn test_invalid_transition_message() {
        let err = ThreadLogicError::InvalidTransition {
            state: "Uploading",
            event: "AnalysisConfirmed",
        };
        let msg: String = err.into();
        assert_eq!(msg, "Cannot apply 'AnalysisConfirmed' while in 'Uploading'");
    }
}
