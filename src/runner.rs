//! Run coordinator.
//!
//! Runs one independent pipeline per input file:
//! load → validate → schedule → audit → write.
//!
//! Pipelines execute on a bounded pool of scoped threads. Workers pull
//! the next input index from a shared counter, so each thread handles as
//! many inputs as it can; the end of the scope joins every worker before
//! results are returned. Pipelines share no mutable state. A failing or
//! panicking pipeline yields an error for its own input only.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Serialize;
use tracing::{debug, info, info_span, warn};

use crate::config::RunConfig;
use crate::error::RunError;
use crate::io::{write_schedule_file, InstanceLoader};
use crate::scheduler::{GreedyScheduler, ScheduleKpi, Termination};
use crate::validation::{audit_schedule, catalog_warnings, validate_instance};

/// Summary of a successful pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstanceReport {
    /// Input file.
    pub input: PathBuf,
    /// Written schedule.
    pub output: PathBuf,
    /// Schedule metrics.
    pub kpi: ScheduleKpi,
    /// Why the selection loop stopped.
    pub termination: Termination,
    /// Libraries signed up, including those that ship nothing.
    pub signed_up: usize,
}

/// Outcome of one pipeline.
pub type InstanceResult = Result<InstanceReport, RunError>;

/// Runs scheduling pipelines for a batch of inputs.
#[derive(Debug, Clone, Default)]
pub struct RunCoordinator {
    config: RunConfig,
}

impl RunCoordinator {
    /// Creates a coordinator.
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Runs every input and returns the results in input order.
    ///
    /// Blocks until all pipelines have finished.
    pub fn run<P: AsRef<Path> + Sync>(&self, inputs: &[P]) -> Vec<InstanceResult> {
        let workers = self.config.worker_count(inputs.len());
        if workers == 0 {
            return Vec::new();
        }
        debug!(inputs = inputs.len(), workers, "dispatching pipelines");

        let next = AtomicUsize::new(0);
        let mut slots: Vec<Option<InstanceResult>> = (0..inputs.len()).map(|_| None).collect();

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..workers)
                .map(|_| {
                    let next = &next;
                    scope.spawn(move || {
                        let mut done = Vec::new();
                        loop {
                            let idx = next.fetch_add(1, Ordering::Relaxed);
                            let Some(input) = inputs.get(idx) else {
                                break;
                            };
                            done.push((idx, self.process_isolated(input.as_ref())));
                        }
                        done
                    })
                })
                .collect();

            for handle in handles {
                // Pipelines catch their own panics, so a worker only fails
                // outside of them; its inputs are reported below.
                if let Ok(done) = handle.join() {
                    for (idx, result) in done {
                        slots[idx] = Some(result);
                    }
                }
            }
        });

        slots
            .into_iter()
            .zip(inputs)
            .map(|(slot, input)| {
                slot.unwrap_or_else(|| {
                    Err(RunError::Panicked {
                        path: input.as_ref().to_path_buf(),
                        message: "worker thread terminated".into(),
                    })
                })
            })
            .collect()
    }

    /// Runs one pipeline, converting a panic into an error.
    fn process_isolated(&self, input: &Path) -> InstanceResult {
        panic::catch_unwind(AssertUnwindSafe(|| self.process(input))).unwrap_or_else(|payload| {
            Err(RunError::Panicked {
                path: input.to_path_buf(),
                message: panic_message(payload.as_ref()),
            })
        })
    }

    /// Runs the full pipeline for one input.
    pub fn process(&self, input: &Path) -> InstanceResult {
        let span = info_span!("instance", path = %input.display());
        let _guard = span.enter();
        info!("starting pipeline");

        let instance = InstanceLoader::new()
            .from_path(input)
            .map_err(|source| RunError::Load {
                path: input.to_path_buf(),
                source,
            })?;

        validate_instance(&instance).map_err(|errors| RunError::Invalid {
            path: input.to_path_buf(),
            errors,
        })?;
        for warning in catalog_warnings(&instance) {
            warn!("{warning}");
        }

        let outcome = GreedyScheduler::with_policy(self.config.policy).run(&instance);
        debug!(dispersion = outcome.dispersion, "computed schedule");

        let violations = audit_schedule(&outcome.schedule, &instance);
        if !violations.is_empty() {
            warn!(count = violations.len(), "schedule failed its audit");
            return Err(RunError::Audit {
                path: input.to_path_buf(),
                violations,
            });
        }

        let kpi = ScheduleKpi::calculate(&outcome.schedule, &instance);
        info!(
            total_value = kpi.total_value,
            books = kpi.books_delivered,
            libraries = kpi.libraries_scheduled,
            coverage = kpi.coverage,
            termination = ?outcome.termination,
            "schedule ready"
        );

        let output = output_path(&self.config.out_dir, input);
        info!(output = %output.display(), "writing schedule");
        write_schedule_file(&outcome.schedule, &output).map_err(|source| RunError::Write {
            path: input.to_path_buf(),
            output: output.clone(),
            source,
        })?;

        Ok(InstanceReport {
            input: input.to_path_buf(),
            output,
            kpi,
            termination: outcome.termination,
            signed_up: outcome.signed_up,
        })
    }
}

/// Output file for `input`: its file name inside `out_dir`.
pub fn output_path(out_dir: &Path, input: &Path) -> PathBuf {
    match input.file_name() {
        Some(name) => out_dir.join(name),
        None => out_dir.join("schedule.txt"),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
