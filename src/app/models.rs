use std::fs::Permissions;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Represents the final configuration after merging presets and CLI args.
#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    pub dirs: Vec<PathBuf>,
    /// Lowercased, without the leading dot. Empty means every file.
    pub suffixes: Vec<String>,
    pub create_year_dir: bool,
    pub create_month_dir: bool,
    pub sibling_dir: bool,
    pub skip_date_dir: bool,
    pub ignore_dirs: Vec<PathBuf>,
    pub dry_run: bool,
}

impl RuntimeConfig {
    /// Date-named directories only count as buckets when some bucketing is on.
    pub fn bucketing_requested(&self) -> bool {
        self.create_year_dir || self.create_month_dir
    }

    /// `ext` is dotted, as returned by [`split_name`].
    pub fn accepts_extension(&self, ext: &str) -> bool {
        if self.suffixes.is_empty() {
            return true;
        }
        match ext.strip_prefix('.') {
            Some(ext) => {
                let ext = ext.to_lowercase();
                self.suffixes.iter().any(|s| *s == ext)
            }
            None => false,
        }
    }
}

/// A regular file discovered during the walk, with the metadata the planner needs.
#[derive(Debug, Clone)]
pub struct MediaFile {
    pub path: PathBuf,
    pub modified: SystemTime,
    pub permissions: Permissions,
}

impl MediaFile {
    /// The extension including its dot, original case, or empty.
    pub fn dotted_extension(&self) -> String {
        let name = file_name(&self.path);
        split_name(&name).1.to_string()
    }
}

pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Splits a file name at its last dot into stem and dotted extension.
/// A leading dot starts the extension, so `.jpg` is all extension.
pub fn split_name(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(dot) => name.split_at(dot),
        None => (name, ""),
    }
}

/// Granularity matched by a date-shaped directory name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateToken {
    Year,
    YearMonth,
    YearMonthDay,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Renamed { from: PathBuf, to: PathBuf },
    AlreadyNamed,
    Filtered,
    Failed,
}
