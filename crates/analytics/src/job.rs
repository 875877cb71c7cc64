use crate::config::AnalysisConfig;
use crate::report::AnalysisError;

/// A self-contained analysis run over an in-memory snapshot.
///
/// Inputs are handed over by callers (CLI, services, tests); this crate stays
/// storage-agnostic and never performs IO. Running a job twice on the same
/// input yields the same output.
pub trait AnalysisJob: Send + Sync {
    type Input: Send + Sync;
    type Output;

    fn config(&self) -> &AnalysisConfig;

    /// The input snapshot the job will run on.
    fn input(&self) -> &Self::Input;

    /// Execute the analysis. Only run-level failures (configuration, strict
    /// mode input) are errors; per-part problems are reported in the output.
    fn run(&self) -> Result<Self::Output, AnalysisError>;
}
