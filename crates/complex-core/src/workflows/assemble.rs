use crate::core::models::ids::ChainId;
use crate::core::models::system::MolecularSystem;
use crate::core::utils::identifiers::allocate_chain_id;
use crate::engine::config::{AssemblyConfig, FragmentErrorPolicy};
use crate::engine::error::EngineError;
use crate::engine::key_atoms;
use crate::engine::loader::FragmentLoader;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::tasks::{chain_matching, clash_detection};
use crate::engine::worklist::Worklist;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Why an assembly stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssemblyOutcome {
    /// The complex reached the target number of chains.
    Complete,
    /// Every fragment was tried since the last merge without adding a chain.
    Exhausted,
    /// The configured maximum number of fragment attempts was used up.
    IterationLimit,
}

impl AssemblyOutcome {
    pub fn is_complete(&self) -> bool {
        matches!(self, AssemblyOutcome::Complete)
    }
}

impl fmt::Display for AssemblyOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssemblyOutcome::Complete => write!(f, "complete"),
            AssemblyOutcome::Exhausted => write!(f, "exhausted"),
            AssemblyOutcome::IterationLimit => write!(f, "iteration limit reached"),
        }
    }
}

/// One chain added to the complex.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeRecord {
    pub iteration: usize,
    pub fragment: PathBuf,
    /// Complex chain the fragment was superimposed onto.
    pub reference_chain: String,
    /// Fragment chain that was superimposed.
    pub sample_chain: String,
    /// Label of the added chain within its fragment.
    pub source_chain: String,
    /// Label of the added chain within the complex.
    pub new_chain: String,
    pub rmsd: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssemblyReport {
    pub outcome: AssemblyOutcome,
    pub target_stoichiometry: usize,
    pub chain_count: usize,
    pub iterations: usize,
    pub chains: Vec<String>,
    pub skipped_fragments: Vec<PathBuf>,
    pub merges: Vec<MergeRecord>,
}

#[derive(Debug, Clone)]
pub struct AssemblyResult {
    pub system: MolecularSystem,
    pub report: AssemblyReport,
}

/// What a single call to [`Assembler::step`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// A chain of the fragment was added to the complex.
    Merged(MergeRecord),
    /// The fragment matched, but every candidate chain was already present.
    Rejected { fragment: PathBuf, matches: usize },
    /// No chain of the fragment superimposed onto the complex.
    NoMatch { fragment: PathBuf },
    /// The fragment could not be used and the error policy is to skip it.
    Skipped { fragment: PathBuf },
    /// The assembly is over; further steps do nothing.
    Finished(AssemblyOutcome),
}

/// Drives the assembly one fragment attempt at a time.
///
/// Each attempt takes the fragment at the front of the worklist, superimposes it onto the
/// complex through every matching chain pair (best RMSD first) and merges the first moved
/// partner chain that does not clash with the complex. Whatever happens, the fragment then
/// goes to the back of the worklist.
pub struct Assembler<'a, L: FragmentLoader> {
    config: &'a AssemblyConfig,
    loader: &'a L,
    reporter: &'a ProgressReporter<'a>,
    reference: MolecularSystem,
    worklist: Worklist,
    iteration: usize,
    attempts_without_progress: usize,
    merges: Vec<MergeRecord>,
    skipped: Vec<PathBuf>,
}

impl<'a, L: FragmentLoader> Assembler<'a, L> {
    pub fn new(
        seed: MolecularSystem,
        fragments: impl IntoIterator<Item = PathBuf>,
        config: &'a AssemblyConfig,
        loader: &'a L,
        reporter: &'a ProgressReporter<'a>,
    ) -> Self {
        Self {
            config,
            loader,
            reporter,
            reference: seed,
            worklist: Worklist::new(fragments),
            iteration: 0,
            attempts_without_progress: 0,
            merges: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn reference(&self) -> &MolecularSystem {
        &self.reference
    }

    pub fn worklist(&self) -> &Worklist {
        &self.worklist
    }

    /// Number of fragment attempts so far.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn terminal_state(&self) -> Option<AssemblyOutcome> {
        if self.reference.chain_count() >= self.config.stoichiometry {
            Some(AssemblyOutcome::Complete)
        } else if self.worklist.is_empty()
            || self.attempts_without_progress > self.worklist.len()
        {
            Some(AssemblyOutcome::Exhausted)
        } else if self
            .config
            .search
            .max_iterations
            .is_some_and(|max| self.iteration >= max)
        {
            Some(AssemblyOutcome::IterationLimit)
        } else {
            None
        }
    }

    /// Performs one fragment attempt, or reports the terminal state if the assembly is over.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`] if a fragment fails to load or has other than two chains
    /// (under [`FragmentErrorPolicy::Abort`]), if the chain identifiers are exhausted, or if
    /// a superposition cannot be computed.
    pub fn step(&mut self) -> Result<StepOutcome, EngineError> {
        if let Some(outcome) = self.terminal_state() {
            return Ok(StepOutcome::Finished(outcome));
        }
        let Some(path) = self.worklist.front().map(Path::to_path_buf) else {
            return Ok(StepOutcome::Finished(AssemblyOutcome::Exhausted));
        };

        self.reporter.report(Progress::FragmentAttempt {
            iteration: self.iteration + 1,
            fragment: path.display().to_string(),
        });

        let fragment = match self.load_fragment(&path) {
            Ok(fragment) => fragment,
            Err(error) => return self.handle_fragment_error(path, error),
        };

        let report = chain_matching::run(&self.reference, &fragment, self.config.thresholds.rmsd)?;
        if report.matches.is_empty() {
            info!(
                fragment = %path.display(),
                best_rmsd = ?report.best_rmsd,
                "No chain of the fragment matches the complex."
            );
            self.finish_attempt(false);
            return Ok(StepOutcome::NoMatch { fragment: path });
        }

        for chain_match in &report.matches {
            let mut moved = fragment.clone();
            moved.transform(&chain_match.superposition.isometry());

            let Some((candidate_id, candidate)) = moved
                .chains_iter()
                .find(|(id, _)| *id != chain_match.sample_chain)
            else {
                return Err(EngineError::Internal(
                    "two-chain fragment has no partner chain".to_string(),
                ));
            };
            let source_chain = candidate.id.clone();

            let candidate_atoms = key_atoms::extract(&moved, candidate_id);
            let clash_report = clash_detection::run(
                &candidate_atoms.positions,
                &self.reference,
                self.config.thresholds.clash_radius,
                self.config.thresholds.clashes,
            );
            if let Some(clash) = &clash_report.clash {
                debug!(
                    fragment = %path.display(),
                    candidate = %source_chain,
                    clashing_chain = %clash.label,
                    contacts = clash.contacts,
                    "Candidate chain is already present."
                );
                continue;
            }

            let in_use: HashSet<String> = self.reference.chain_labels().into_iter().collect();
            let new_chain = allocate_chain_id(&in_use, &source_chain)?;
            self.reference
                .copy_chain_from(&moved, candidate_id, &new_chain)
                .ok_or_else(|| {
                    EngineError::Internal(format!("chain '{new_chain}' could not be merged"))
                })?;

            let record = MergeRecord {
                iteration: self.iteration + 1,
                fragment: path.clone(),
                reference_chain: chain_label(&self.reference, chain_match.reference_chain),
                sample_chain: chain_label(&fragment, chain_match.sample_chain),
                source_chain,
                new_chain,
                rmsd: chain_match.rmsd(),
            };
            info!(
                fragment = %path.display(),
                chain = %record.new_chain,
                rmsd = record.rmsd,
                chains = self.reference.chain_count(),
                "Added chain to the complex."
            );
            self.reporter.report(Progress::ChainMerged {
                label: record.new_chain.clone(),
                total: self.reference.chain_count() as u64,
            });
            self.merges.push(record.clone());
            self.finish_attempt(true);
            return Ok(StepOutcome::Merged(record));
        }

        info!(
            fragment = %path.display(),
            matches = report.matches.len(),
            "Every candidate chain clashes with the complex."
        );
        self.finish_attempt(false);
        Ok(StepOutcome::Rejected {
            fragment: path,
            matches: report.matches.len(),
        })
    }

    /// Steps until the assembly is over and returns the complex with a summary.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by [`Assembler::step`].
    #[instrument(skip_all, name = "assembly_workflow")]
    pub fn run(mut self) -> Result<AssemblyResult, EngineError> {
        self.reporter.report(Progress::PhaseStart { name: "Assembly" });
        self.reporter.report(Progress::AssemblyStart {
            chains: self.reference.chain_count() as u64,
            target: self.config.stoichiometry as u64,
        });
        info!(
            seed_chains = self.reference.chain_count(),
            fragments = self.worklist.len(),
            target = self.config.stoichiometry,
            "Starting complex assembly."
        );

        let outcome = loop {
            if let StepOutcome::Finished(outcome) = self.step()? {
                break outcome;
            }
        };

        self.reporter.report(Progress::AssemblyFinish);
        self.reporter.report(Progress::PhaseFinish);

        if outcome.is_complete() {
            info!(
                chains = self.reference.chain_count(),
                iterations = self.iteration,
                "Assembly complete."
            );
        } else {
            warn!(
                %outcome,
                chains = self.reference.chain_count(),
                target = self.config.stoichiometry,
                iterations = self.iteration,
                "Assembly stopped before reaching the target stoichiometry."
            );
        }

        Ok(self.into_result(outcome))
    }

    fn load_fragment(&self, path: &Path) -> Result<MolecularSystem, EngineError> {
        let fragment = self.loader.load(path)?;
        if fragment.chain_count() != 2 {
            return Err(EngineError::MalformedFragment {
                path: path.to_path_buf(),
                chains: fragment.chain_count(),
            });
        }
        Ok(fragment)
    }

    fn handle_fragment_error(
        &mut self,
        path: PathBuf,
        error: EngineError,
    ) -> Result<StepOutcome, EngineError> {
        match self.config.search.on_fragment_error {
            FragmentErrorPolicy::Abort => Err(error),
            FragmentErrorPolicy::Skip => {
                warn!(%error, "Skipping unusable fragment.");
                self.reporter.report(Progress::Message(format!(
                    "Skipped {}: {}",
                    path.display(),
                    error
                )));
                if !self.skipped.contains(&path) {
                    self.skipped.push(path.clone());
                }
                self.finish_attempt(false);
                Ok(StepOutcome::Skipped { fragment: path })
            }
        }
    }

    fn finish_attempt(&mut self, merged: bool) {
        self.worklist.rotate();
        self.iteration += 1;
        if merged {
            self.attempts_without_progress = 0;
        } else {
            self.attempts_without_progress += 1;
        }
    }

    fn into_result(self, outcome: AssemblyOutcome) -> AssemblyResult {
        let report = AssemblyReport {
            outcome,
            target_stoichiometry: self.config.stoichiometry,
            chain_count: self.reference.chain_count(),
            iterations: self.iteration,
            chains: self.reference.chain_labels(),
            skipped_fragments: self.skipped,
            merges: self.merges,
        };
        AssemblyResult {
            system: self.reference,
            report,
        }
    }
}

fn chain_label(system: &MolecularSystem, id: ChainId) -> String {
    system
        .chain(id)
        .map(|chain| chain.id.clone())
        .unwrap_or_default()
}

/// Assembles a complex from `seed` and the fragments at `fragments`, in worklist order.
///
/// # Errors
///
/// See [`Assembler::step`].
pub fn run<L: FragmentLoader>(
    seed: MolecularSystem,
    fragments: Vec<PathBuf>,
    config: &AssemblyConfig,
    loader: &L,
    reporter: &ProgressReporter,
) -> Result<AssemblyResult, EngineError> {
    Assembler::new(seed, fragments, config, loader, reporter).run()
}
