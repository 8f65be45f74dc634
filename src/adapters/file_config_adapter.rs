//! INI file configuration adapter.

use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str) -> Result<Option<i64>, String> {
        self.config.getint(section, key)
    }

    fn get_double(&self, section: &str, key: &str) -> Result<Option<f64>, String> {
        self.config.getfloat(section, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
[backtest]
initial_capital = 100000.0
reward_risk_ratio = 2.0
rules = bullish_continuation, breakout

[windows]
breakout = 5
"#;

    #[test]
    fn from_string_parses_sections() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(
            adapter.get_string("backtest", "rules"),
            Some("bullish_continuation, breakout".to_string())
        );
        assert_eq!(adapter.get_int("windows", "breakout"), Ok(Some(5)));
        assert_eq!(
            adapter.get_double("backtest", "reward_risk_ratio"),
            Ok(Some(2.0))
        );
    }

    #[test]
    fn missing_keys_read_as_absent() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(adapter.get_string("backtest", "fill_model"), None);
        assert_eq!(adapter.get_int("windows", "bullish_continuation"), Ok(None));
        assert_eq!(adapter.get_double("backtest", "position_units"), Ok(None));
    }

    #[test]
    fn non_numeric_values_surface_as_errors() {
        let adapter =
            FileConfigAdapter::from_string("[backtest]\ninitial_capital = plenty\n").unwrap();
        assert!(adapter.get_double("backtest", "initial_capital").is_err());
        assert!(adapter.get_int("backtest", "initial_capital").is_err());
    }

    #[test]
    fn from_file_reads_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{SAMPLE}").unwrap();
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(adapter.get_int("windows", "breakout"), Ok(Some(5)));
    }

    #[test]
    fn from_file_missing_file_errors() {
        assert!(FileConfigAdapter::from_file("/nonexistent/sigbench.ini").is_err());
    }
}
