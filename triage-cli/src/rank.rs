//! Rank command implementation for the triage CLI.

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use clap::Parser;
use log::{info, warn};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::io::{self, BufReader};
use triage_core::{Facility, RankingResult};
use triage_fs::{
    dir_exists, ensure_dir, file_is_file, open_utf8_file, remove_file_if_exists, write_utf8_file,
};
use triage_ranker::{DEFAULT_TOP_N, Ranker, RankerConfig, ScoreWeights};

use crate::{
    ARG_CAPACITY_WEIGHT, ARG_CASE, ARG_DATASET, ARG_DISTANCE_WEIGHT, ARG_INPUTS_DIR,
    ARG_OUTPUT_DIR, ARG_SPECIALIZATION_WEIGHT, ARG_TOP, CliError,
};

pub(crate) const DEFAULT_INPUTS_DIR: &str = "inputs";
pub(crate) const DEFAULT_OUTPUT_DIR: &str = "outputs";
pub(crate) const DATASET_FILE: &str = "dataset";
pub(crate) const CASE_FILE: &str = "algorithm";
pub(crate) const RESULT_FILE: &str = "result.json";
pub(crate) const ERROR_FILE: &str = "error.txt";
pub(crate) const ERROR_PREFIX: &str = "Error in facility matching";

/// CLI arguments for the `rank` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Rank the facilities in a JSON dataset against the case held \
                 in a JSON case document. Paths and ranking weights can come \
                 from CLI flags, configuration files, or TRIAGE_* environment \
                 variables.",
    about = "Rank facilities for an incoming case"
)]
#[ortho_config(prefix = "TRIAGE")]
pub(crate) struct RankArgs {
    /// Directory holding the default `dataset` and `algorithm` inputs.
    #[arg(long = ARG_INPUTS_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) inputs_dir: Option<Utf8PathBuf>,
    /// Override the path to the facility dataset.
    #[arg(long = ARG_DATASET, value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
    /// Override the path to the case document.
    #[arg(long = ARG_CASE, value_name = "path")]
    #[serde(default)]
    pub(crate) case: Option<Utf8PathBuf>,
    /// Directory receiving `result.json` or `error.txt`.
    #[arg(long = ARG_OUTPUT_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) output_dir: Option<Utf8PathBuf>,
    /// Maximum number of matches to report.
    #[arg(long = ARG_TOP, value_name = "count")]
    #[serde(default)]
    pub(crate) top: Option<usize>,
    /// Weight of the distance sub-score.
    #[arg(long = ARG_DISTANCE_WEIGHT, value_name = "weight")]
    #[serde(default)]
    pub(crate) distance_weight: Option<f64>,
    /// Weight of the specialization sub-score.
    #[arg(long = ARG_SPECIALIZATION_WEIGHT, value_name = "weight")]
    #[serde(default)]
    pub(crate) specialization_weight: Option<f64>,
    /// Weight of the capacity sub-score.
    #[arg(long = ARG_CAPACITY_WEIGHT, value_name = "weight")]
    #[serde(default)]
    pub(crate) capacity_weight: Option<f64>,
}

impl RankArgs {
    pub(crate) fn into_config(self) -> Result<RankConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RankConfig::try_from(merged)
    }
}

/// Resolved `rank` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RankConfig {
    /// Path to the facility dataset.
    pub(crate) dataset: Utf8PathBuf,
    /// Path to the case document.
    pub(crate) case: Utf8PathBuf,
    /// Directory receiving the run outcome.
    pub(crate) output_dir: Utf8PathBuf,
    /// Validated ranker.
    pub(crate) ranker: Ranker,
}

impl RankConfig {
    pub(crate) fn result_path(&self) -> Utf8PathBuf {
        self.output_dir.join(RESULT_FILE)
    }

    pub(crate) fn error_path(&self) -> Utf8PathBuf {
        self.output_dir.join(ERROR_FILE)
    }

    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.dataset, ARG_DATASET)?;
        Self::require_existing(&self.case, ARG_CASE)?;
        Ok(())
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<RankArgs> for RankConfig {
    type Error = CliError;

    fn try_from(args: RankArgs) -> Result<Self, Self::Error> {
        let inputs_dir = args
            .inputs_dir
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_INPUTS_DIR));
        let dataset = args
            .dataset
            .unwrap_or_else(|| inputs_dir.join(DATASET_FILE));
        let case = args.case.unwrap_or_else(|| inputs_dir.join(CASE_FILE));
        let output_dir = args
            .output_dir
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_OUTPUT_DIR));

        let defaults = ScoreWeights::default();
        let weights = ScoreWeights {
            distance: args.distance_weight.unwrap_or(defaults.distance),
            specialization: args
                .specialization_weight
                .unwrap_or(defaults.specialization),
            capacity: args.capacity_weight.unwrap_or(defaults.capacity),
        };
        let ranker = Ranker::new(RankerConfig {
            weights,
            top_n: args.top.unwrap_or(DEFAULT_TOP_N),
        })
        .map_err(CliError::InvalidRankerConfig)?;

        Ok(Self {
            dataset,
            case,
            output_dir,
            ranker,
        })
    }
}

/// Source of the timestamp stamped on each result.
pub(crate) trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the system wall clock.
pub(crate) struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), CliError> {
    run_rank_with(args, &SystemClock).map(|_| ())
}

/// Resolve configuration, rank, and record the outcome in the output
/// directory.
///
/// Once the output directory is usable every failure is also written to
/// `error.txt`, and any `result.json` from an earlier run is removed.
pub(crate) fn run_rank_with(
    args: RankArgs,
    clock: &dyn Clock,
) -> Result<RankingResult, CliError> {
    let config = args.into_config()?;
    prepare_output_dir(&config.output_dir)?;
    match execute_rank(&config, clock) {
        Ok(result) => {
            log_summary(&result);
            Ok(result)
        }
        Err(err) => {
            record_failure(&config, &err);
            Err(err)
        }
    }
}

fn execute_rank(config: &RankConfig, clock: &dyn Clock) -> Result<RankingResult, CliError> {
    config.validate_sources()?;
    let facilities = load_dataset(&config.dataset)?;
    let document = load_case_document(&config.case)?;
    let result = config
        .ranker
        .rank_document(&facilities, &document, clock.now())
        .map_err(|source| CliError::Rank {
            path: config.case.clone(),
            source,
        })?;
    write_result(&config.result_path(), &result)?;
    if let Err(err) = remove_file_if_exists(&config.error_path()) {
        warn!("failed to remove stale {ERROR_FILE}: {err}");
    }
    Ok(result)
}

fn prepare_output_dir(path: &Utf8Path) -> Result<(), CliError> {
    let create_failed = |source: io::Error| CliError::CreateOutputDirectory {
        path: path.to_path_buf(),
        source,
    };
    if dir_exists(path).map_err(create_failed)? {
        return Ok(());
    }
    match file_is_file(path) {
        Ok(_) => Err(CliError::OutputDirectoryNotDirectory {
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == io::ErrorKind::NotFound => {
            ensure_dir(path).map_err(create_failed)
        }
        Err(source) => Err(create_failed(source)),
    }
}

/// Loads the JSON array of facility records from disk.
///
/// Every element must be a JSON object; fields inside each object decode
/// leniently, and records without a location are logged.
pub(crate) fn load_dataset(path: &Utf8Path) -> Result<Vec<Facility>, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenDataset {
        path: path.to_path_buf(),
        source,
    })?;
    let records: Vec<Map<String, Value>> = serde_json::from_reader(BufReader::new(file))
        .map_err(|source| CliError::ParseDataset {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(records.iter().map(Facility::from_record).collect())
}

/// Loads the case document from disk without interpreting it.
pub(crate) fn load_case_document(path: &Utf8Path) -> Result<Value, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenCase {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::ParseCase {
        path: path.to_path_buf(),
        source,
    })
}

fn write_result(path: &Utf8Path, result: &RankingResult) -> Result<(), CliError> {
    let mut payload = serde_json::to_string_pretty(result).map_err(CliError::SerialiseResult)?;
    payload.push('\n');
    write_utf8_file(path, payload.as_bytes()).map_err(|source| CliError::WriteResult {
        path: path.to_path_buf(),
        source,
    })
}

fn record_failure(config: &RankConfig, err: &CliError) {
    if let Err(remove_err) = remove_file_if_exists(&config.result_path()) {
        warn!("failed to remove stale {RESULT_FILE}: {remove_err}");
    }
    let message = format!("{ERROR_PREFIX}: {err}");
    if let Err(write_err) = write_utf8_file(&config.error_path(), message.as_bytes()) {
        warn!("failed to write {ERROR_FILE}: {write_err}");
    }
}

fn log_summary(result: &RankingResult) {
    info!(
        "case {:?} ({}) processed; {} matches reported",
        result.case_id,
        result.case_type,
        result.matches.len()
    );
    match &result.best_match {
        Some(best) => info!("best match: {} (score {})", best.facility_name, best.score),
        None => info!("no facilities to match"),
    }
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RankConfig, CliError> {
    let merged = RankArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RankConfig::try_from(merged)
}
