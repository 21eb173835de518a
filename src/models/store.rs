use std::{
    fmt::{Display, Formatter, Result},
    path::PathBuf,
};

/// Flags controlling which versions are written and how.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StorePolicy {
    pub include_plain: bool,
    pub overwrite_existing: bool,
    pub all_versions: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Html,
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Inactive,
    HtmlExists(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedVersion {
    pub version_id: String,
    pub reason: SkipReason,
}

/// What a single `store` call did on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreReport {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<SkippedVersion>,
}

impl ContentKind {
    pub fn extension(&self) -> &'static str {
        match self {
            ContentKind::Html => "html",
            ContentKind::Plain => "txt",
        }
    }
}

impl Display for ContentKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            ContentKind::Html => write!(f, "HTML"),
            ContentKind::Plain => write!(f, "PLAIN"),
        }
    }
}

impl StoreReport {
    pub fn skip(&mut self, version_id: &str, reason: SkipReason) {
        self.skipped.push(SkippedVersion {
            version_id: version_id.to_string(),
            reason,
        });
    }
}

/// Totals for a whole run, logged when the export finishes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub templates_found: usize,
    pub templates_stored: usize,
    pub templates_failed: usize,
    pub files_written: usize,
    pub versions_skipped: usize,
}

impl ExportSummary {
    pub fn record(&mut self, report: &StoreReport) {
        self.templates_stored += 1;
        self.files_written += report.written.len();
        self.versions_skipped += report.skipped.len();
    }
}
