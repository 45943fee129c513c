use crate::cli::AssembleArgs;
use crate::config::{AppConfig, build_config};
use crate::error::{CliError, Result};
use crate::utils::fragments::{discover_fragments, select_seed};
use crate::utils::progress::CliProgressHandler;
use complexbuilder::{
    core::io::{pdb::PdbFile, traits::MolecularFile},
    engine::{loader::PdbLoader, progress::ProgressReporter},
    workflows::{
        self,
        assemble::{AssemblyOutcome, AssemblyReport},
    },
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const COMPLEX_FILE_NAME: &str = "macrocomplex.pdb";
pub const REPORT_FILE_NAME: &str = "assembly_report.toml";

pub fn run(args: AssembleArgs) -> Result<AssemblyOutcome> {
    info!("Merging configuration from file, --set values and CLI arguments...");
    let config = build_config(&args)?;
    assemble(&config, Some(CliProgressHandler::new()))
}

pub(crate) fn assemble(
    config: &AppConfig,
    progress: Option<CliProgressHandler>,
) -> Result<AssemblyOutcome> {
    let fragments = discover_fragments(&config.input_dir, &config.extensions)?;
    let (seed_path, worklist) = select_seed(fragments, config.seed.as_deref())?;

    info!("Loading seed structure from {:?}", &seed_path);
    let (seed, _) = PdbFile::read_from_path(&seed_path).map_err(|e| CliError::FileParsing {
        path: seed_path.clone(),
        source: e.into(),
    })?;

    fs::create_dir_all(&config.output_dir)?;

    let reporter = match &progress {
        Some(handler) => ProgressReporter::with_callback(handler.get_callback()),
        None => ProgressReporter::new(),
    };

    println!(
        "Assembling {} chain(s) from seed {} and {} fragment(s)...",
        config.core_config.stoichiometry,
        seed_path.display(),
        worklist.len()
    );
    let result = workflows::assemble::run(
        seed,
        worklist,
        &config.core_config,
        &PdbLoader,
        &reporter,
    )?;
    let report = &result.report;

    let complex_path = config.output_dir.join(COMPLEX_FILE_NAME);
    info!("Writing assembled complex to {:?}", &complex_path);
    PdbFile::write_system_to_path(&result.system, &complex_path).map_err(|e| {
        CliError::FileWriting {
            path: complex_path.clone(),
            source: e.into(),
        }
    })?;

    let report_path = config.output_dir.join(REPORT_FILE_NAME);
    write_report(report, &report_path)?;

    summarize(report, &complex_path, &report_path);
    Ok(report.outcome)
}

fn write_report(report: &AssemblyReport, path: &Path) -> Result<()> {
    info!("Writing assembly report to {:?}", path);
    let content = toml::to_string_pretty(report).map_err(|e| CliError::FileWriting {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    fs::write(path, content).map_err(|e| CliError::FileWriting {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

fn summarize(report: &AssemblyReport, complex_path: &Path, report_path: &Path) {
    if report.outcome.is_complete() {
        println!(
            "✓ Complex with {} chain(s) written to: {}",
            report.chain_count,
            complex_path.display()
        );
    } else {
        warn!(
            "Assembly stopped ({}) with {} of {} chains.",
            report.outcome, report.chain_count, report.target_stoichiometry
        );
        println!(
            "Warning: assembly stopped ({}) with {} of {} chain(s). Partial complex written to: {}",
            report.outcome,
            report.chain_count,
            report.target_stoichiometry,
            complex_path.display()
        );
    }
    if !report.skipped_fragments.is_empty() {
        println!(
            "  {} fragment(s) skipped: {}",
            report.skipped_fragments.len(),
            join_paths(&report.skipped_fragments)
        );
    }
    println!("  Report written to: {}", report_path.display());
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
