//! Domain error types.

/// Top-level error type for sigbench.
#[derive(Debug, thiserror::Error)]
pub enum SigbenchError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("unknown rule: {id}")]
    UnknownRule { id: String },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("data integrity violation at bar {index}: {reason}")]
    DataIntegrity { index: usize, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&SigbenchError> for std::process::ExitCode {
    fn from(err: &SigbenchError) -> Self {
        let code: u8 = match err {
            SigbenchError::Io(_) => 1,
            SigbenchError::ConfigParse { .. }
            | SigbenchError::ConfigMissing { .. }
            | SigbenchError::ConfigInvalid { .. } => 2,
            SigbenchError::Data { .. } => 3,
            SigbenchError::UnknownRule { .. } => 4,
            SigbenchError::DataIntegrity { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_invalid_display() {
        let err = SigbenchError::ConfigInvalid {
            section: "backtest".into(),
            key: "reward_risk_ratio".into(),
            reason: "must be positive".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid config value [backtest] reward_risk_ratio: must be positive"
        );
    }

    #[test]
    fn data_integrity_carries_index() {
        let err = SigbenchError::DataIntegrity {
            index: 7,
            reason: "timestamp not strictly increasing".into(),
        };
        assert!(err.to_string().contains("bar 7"));
    }

    #[test]
    fn unknown_rule_display() {
        let err = SigbenchError::UnknownRule {
            id: "mean_reversion".into(),
        };
        assert_eq!(err.to_string(), "unknown rule: mean_reversion");
    }
}
