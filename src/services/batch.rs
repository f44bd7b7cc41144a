use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use emerald_tone::NormalizationSettings;

use crate::codec::ImageSource;
use crate::error::{BatchError, PipelineError};
use crate::models::{FailurePolicy, ProcessedImage};
use crate::services::ImagePipeline;

/// Shared flag that stops a running batch before its next file.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// A file that failed under [`FailurePolicy::SkipAndContinue`].
#[derive(Debug)]
pub struct BatchFailure {
    pub index: usize,
    pub name: String,
    pub error: PipelineError,
}

/// Outcome of a completed batch, results in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub results: Vec<ProcessedImage>,
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    /// Number of inputs the batch went through.
    pub fn total(&self) -> usize {
        self.results.len() + self.failures.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// One output path per result, in result order.
    ///
    /// Files are named `<stem>-normalized.<extension>`. Inputs that share a
    /// stem (same file name in different folders) get `-2`, `-3`, ... so no
    /// result overwrites another.
    pub fn output_paths(&self, dir: &Path, extension: &str) -> Vec<PathBuf> {
        let mut used = HashSet::new();
        self.results
            .iter()
            .map(|result| {
                let stem = Path::new(&result.name)
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| result.id.to_string());

                let mut file_name = format!("{stem}-normalized.{extension}");
                let mut suffix = 2;
                while !used.insert(file_name.clone()) {
                    file_name = format!("{stem}-normalized-{suffix}.{extension}");
                    suffix += 1;
                }
                dir.join(file_name)
            })
            .collect()
    }
}

/// Runs the pipeline over a list of inputs, one at a time.
#[derive(Debug, Clone, Default)]
pub struct BatchProcessor {
    pipeline: ImagePipeline,
    policy: FailurePolicy,
}

impl BatchProcessor {
    pub fn new(pipeline: ImagePipeline) -> Self {
        Self {
            pipeline,
            policy: FailurePolicy::default(),
        }
    }

    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Process every source with the same settings.
    ///
    /// `on_progress(done, total)` is called after each file, including
    /// files that failed and were skipped. The cancel flag is checked
    /// before each file starts; a cancelled run hands back the files that
    /// already finished in [`BatchError::Cancelled`].
    pub async fn run<F>(
        &self,
        sources: &[ImageSource],
        settings: &NormalizationSettings,
        mut on_progress: F,
        cancel: &CancelFlag,
    ) -> Result<BatchReport, BatchError>
    where
        F: FnMut(usize, usize),
    {
        let total = sources.len();
        let mut report = BatchReport::default();

        tracing::info!(total, policy = ?self.policy, "Starting batch");

        for (index, source) in sources.iter().enumerate() {
            if cancel.is_cancelled() {
                tracing::info!(completed = index, total, "Batch cancelled");
                return Err(BatchError::Cancelled { report, total });
            }

            match self.pipeline.process(source, settings).await {
                Ok(result) => report.results.push(result),
                Err(error) => {
                    let name = source.name();
                    match self.policy {
                        FailurePolicy::Abort => {
                            tracing::error!(index, name = %name, %error, "Batch aborted");
                            return Err(BatchError::Failed {
                                index,
                                name,
                                source: error,
                            });
                        }
                        FailurePolicy::SkipAndContinue => {
                            tracing::warn!(index, name = %name, %error, "Skipping file");
                            report.failures.push(BatchFailure { index, name, error });
                        }
                    }
                }
            }

            on_progress(index + 1, total);
        }

        tracing::info!(
            processed = report.results.len(),
            failed = report.failures.len(),
            "Batch complete"
        );
        Ok(report)
    }
}
