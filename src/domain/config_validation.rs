//! Building and validating a [`BacktestConfig`] from a config source.

use std::collections::HashMap;

use super::engine::BacktestConfig;
use super::error::SigbenchError;
use super::rules::{known_rules, FillModel};
use crate::ports::config_port::ConfigPort;

/// Validate a config source without keeping the result.
pub fn validate_backtest_config(config: &dyn ConfigPort) -> Result<(), SigbenchError> {
    build_backtest_config(config).map(|_| ())
}

/// Build a [`BacktestConfig`] from `[backtest]` and `[windows]` sections,
/// applying defaults for absent keys and failing fast on invalid values.
pub fn build_backtest_config(config: &dyn ConfigPort) -> Result<BacktestConfig, SigbenchError> {
    let defaults = BacktestConfig::default();

    let initial_capital =
        double_key(config, "backtest", "initial_capital", defaults.initial_capital)?;
    let reward_risk_ratio =
        double_key(config, "backtest", "reward_risk_ratio", defaults.reward_risk_ratio)?;
    let position_units =
        double_key(config, "backtest", "position_units", defaults.position_units)?;

    let fill_model = match config.get_string("backtest", "fill_model") {
        None => defaults.fill_model,
        Some(value) => {
            FillModel::parse(&value).ok_or_else(|| SigbenchError::ConfigInvalid {
                section: "backtest".to_string(),
                key: "fill_model".to_string(),
                reason: format!("unknown fill model '{value}', expected optimistic or first_touch"),
            })?
        }
    };

    let active_rules = match config.get_string("backtest", "rules") {
        None => defaults.active_rules,
        Some(value) => value
            .split(',')
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .collect(),
    };

    let mut windows = HashMap::new();
    for id in known_rules() {
        let window = match config.get_int("windows", id) {
            Ok(Some(value)) => value,
            Ok(None) => continue,
            Err(reason) => {
                return Err(SigbenchError::ConfigInvalid {
                    section: "windows".to_string(),
                    key: id.to_string(),
                    reason,
                });
            }
        };
        if window < 1 {
            return Err(SigbenchError::ConfigInvalid {
                section: "windows".to_string(),
                key: id.to_string(),
                reason: "window must be at least 1".to_string(),
            });
        }
        windows.insert(id.to_string(), window as usize);
    }

    let built = BacktestConfig {
        initial_capital,
        reward_risk_ratio,
        position_units,
        fill_model,
        active_rules,
        windows,
    };
    built.validate()?;
    Ok(built)
}

/// Read an optional double, turning a present-but-unparseable value into a
/// config error rather than a silent default.
fn double_key(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: f64,
) -> Result<f64, SigbenchError> {
    match config.get_double(section, key) {
        Ok(Some(value)) => Ok(value),
        Ok(None) => Ok(default),
        Err(reason) => Err(SigbenchError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason,
        }),
    }
}
