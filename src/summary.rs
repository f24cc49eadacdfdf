//! Per-item results for the file converter jobs.
//!
//! `convert-heic` and `thumbnails` never stop on a bad file. Each source
//! file produces an [`ItemResult`]; a failure is recorded with its message
//! and the job moves on. The results roll up into a [`Summary`] whose
//! [`exit_code`](Summary::exit_code) is non-zero whenever anything failed.

/// What happened to one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    /// Target written.
    Written,
    /// Dry run: target would have been written.
    WouldWrite,
    /// Target already existed and overwriting was not requested.
    Skipped,
    /// Decode, encode or filesystem error.
    Failed(String),
}

/// One source file and its outcome. Paths are site-relative, `/`-separated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemResult {
    pub source: String,
    pub target: String,
    pub outcome: ItemOutcome,
    /// The source was removed after a successful write.
    pub deleted: bool,
}

impl ItemResult {
    pub fn new(source: String, target: String, outcome: ItemOutcome) -> Self {
        Self {
            source,
            target,
            outcome,
            deleted: false,
        }
    }
}

/// Results for one section, in scan order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionReport {
    pub section: String,
    pub items: Vec<ItemResult>,
}

/// Results for a whole job run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobReport {
    pub dry_run: bool,
    pub sections: Vec<SectionReport>,
}

impl JobReport {
    pub fn items(&self) -> impl Iterator<Item = &ItemResult> {
        self.sections.iter().flat_map(|s| s.items.iter())
    }

    pub fn summary(&self) -> Summary {
        let mut summary = Summary::default();
        for item in self.items() {
            match item.outcome {
                ItemOutcome::Written | ItemOutcome::WouldWrite => summary.written += 1,
                ItemOutcome::Skipped => summary.skipped += 1,
                ItemOutcome::Failed(_) => summary.failed += 1,
            }
            if item.deleted {
                summary.deleted += 1;
            }
        }
        summary
    }
}

/// Aggregated counts for a job run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Converted or generated (or would be, in a dry run).
    pub written: usize,
    pub skipped: usize,
    pub deleted: usize,
    pub failed: usize,
}

impl Summary {
    /// Process exit status when this was the whole run: 0, or 2 if any file failed.
    pub fn exit_code(&self) -> u8 {
        if self.failed == 0 { 0 } else { 2 }
    }
}
