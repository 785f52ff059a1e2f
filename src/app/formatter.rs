use crate::app::models::Outcome;
use pathdiff::diff_paths;
use std::path::Path;

/// Tally of what a run did with every file it looked at.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    pub renamed: usize,
    pub already_named: usize,
    pub filtered: usize,
    pub failed: usize,
}

impl Summary {
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Renamed { .. } => self.renamed += 1,
            Outcome::AlreadyNamed => self.already_named += 1,
            Outcome::Filtered => self.filtered += 1,
            Outcome::Failed => self.failed += 1,
        }
    }
}

pub struct OutputGenerator;

impl OutputGenerator {
    /// `from -> to`, with the target shown relative to the source directory.
    pub fn rename_line(from: &Path, to: &Path, dry_run: bool) -> String {
        let shown = from
            .parent()
            .and_then(|dir| diff_paths(to, dir))
            .unwrap_or_else(|| to.to_path_buf());
        let prefix = if dry_run { "[dry-run] " } else { "" };
        format!("{}{} -> {}", prefix, from.display(), shown.display())
    }

    pub fn summary_line(summary: &Summary, dry_run: bool) -> String {
        let verb = if dry_run { "would rename" } else { "renamed" };
        format!(
            "{} {}, {} already named, {} filtered out, {} failed",
            verb, summary.renamed, summary.already_named, summary.filtered, summary.failed
        )
    }
}
