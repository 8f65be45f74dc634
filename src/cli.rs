//! CLI definition and dispatch.

use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::{write_bars, CsvBarSource};
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::text_report_adapter::TextReportAdapter;
use crate::domain::config_validation::build_backtest_config;
use crate::domain::engine::run_backtest;
use crate::domain::error::SigbenchError;
use crate::domain::synthetic::SyntheticSeries;
use crate::ports::data_port::BarSource;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "sigbench", about = "Signal-rule backtester with risk-adjusted metrics")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a backtest over a CSV bar series
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        data: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a backtest configuration
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Generate a synthetic 4-hour OHLC series as CSV
    Generate {
        #[arg(short, long)]
        output: PathBuf,
        #[arg(long, default_value_t = 500)]
        bars: usize,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long, default_value_t = 1.25)]
        base_price: f64,
        #[arg(long, default_value = "2020-01-01")]
        start: String,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Backtest {
            config,
            data,
            output,
        } => run_backtest_command(&config, &data, output.as_ref()),
        Command::Validate { config } => run_validate(&config),
        Command::Generate {
            output,
            bars,
            seed,
            base_price,
            start,
        } => run_generate(&output, bars, seed, base_price, &start),
    }
}

fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = SigbenchError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn run_backtest_command(
    config_path: &PathBuf,
    data_path: &PathBuf,
    output_path: Option<&PathBuf>,
) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let config = match build_backtest_config(&adapter) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!("Loading bars from {}", data_path.display());
    let source = CsvBarSource::new(data_path.clone());
    let series = match source.load() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!(
        "Scanning {} bars with {} active rules...",
        series.len(),
        config.active_rules.len()
    );
    let result = match run_backtest(&series, &config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let reporter = TextReportAdapter;
    let written = match output_path {
        Some(path) => fs::File::create(path)
            .map_err(SigbenchError::from)
            .and_then(|mut file| reporter.write(&result, &mut file))
            .map(|()| eprintln!("Report written to {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            reporter.write(&result, &mut stdout)
        }
    };
    if let Err(e) = written {
        eprintln!("error: {e}");
        return (&e).into();
    }

    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    match build_backtest_config(&adapter) {
        Ok(config) => {
            println!(
                "config OK: {} active rules, fill model {}",
                config.active_rules.len(),
                config.fill_model.as_str()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_generate(
    output_path: &PathBuf,
    bars: usize,
    seed: u64,
    base_price: f64,
    start: &str,
) -> ExitCode {
    let start_date = match NaiveDate::parse_from_str(start, "%Y-%m-%d") {
        Ok(d) => d,
        Err(_) => {
            let err = SigbenchError::ConfigInvalid {
                section: "generate".to_string(),
                key: "start".to_string(),
                reason: format!("invalid start date '{start}', expected YYYY-MM-DD"),
            };
            eprintln!("error: {err}");
            return (&err).into();
        }
    };

    let mut generator = SyntheticSeries::new(seed).with_base_price(base_price);
    let series = match generator.generate(start_date.and_time(NaiveTime::MIN), bars) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if let Err(e) = write_bars(output_path, series.bars()) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    eprintln!("Wrote {} bars to {}", series.len(), output_path.display());
    ExitCode::SUCCESS
}
