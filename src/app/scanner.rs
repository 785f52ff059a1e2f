use crate::app::error::{RenameError, Result};
use crate::app::formatter::{OutputGenerator, Summary};
use crate::app::models::{self, DateToken, MediaFile, Outcome, RuntimeConfig};
use crate::app::planner::Planner;
use crate::app::stamp;
use ignore::{DirEntry, WalkBuilder};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SkipReason {
    DateBucket(DateToken),
    Ignored,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::DateBucket(DateToken::Year) => write!(f, "is a year directory, skipped"),
            SkipReason::DateBucket(DateToken::YearMonth) => {
                write!(f, "is a month directory, skipped")
            }
            SkipReason::DateBucket(DateToken::YearMonthDay) => {
                write!(f, "is a day directory, skipped")
            }
            SkipReason::Ignored => write!(f, "is ignored"),
        }
    }
}

/// Decides which directory subtrees the walk must not enter. Owned so it can
/// live inside the walker's filter.
#[derive(Debug, Clone)]
struct DirFilter {
    skip_dates: bool,
    ignore_dirs: Vec<PathBuf>,
}

impl DirFilter {
    fn from_config(config: &RuntimeConfig) -> Self {
        Self {
            skip_dates: config.bucketing_requested() && config.skip_date_dir,
            ignore_dirs: config.ignore_dirs.clone(),
        }
    }

    fn skip_reason(&self, dir: &Path) -> Option<SkipReason> {
        if self.skip_dates {
            let token = dir
                .file_name()
                .and_then(|name| name.to_str())
                .and_then(stamp::date_token);
            if let Some(token) = token {
                return Some(SkipReason::DateBucket(token));
            }
        }
        if self.ignore_dirs.iter().any(|ignored| ignored == dir) {
            return Some(SkipReason::Ignored);
        }
        None
    }

    /// Logs and returns false for a directory that should not be entered.
    fn keeps(&self, dir: &Path) -> bool {
        match self.skip_reason(dir) {
            Some(reason) => {
                log::info!("Directory `{}` {}", dir.display(), reason);
                false
            }
            None => true,
        }
    }
}

/// Walks the configured roots and renames every eligible file.
pub struct Scanner<'a> {
    config: &'a RuntimeConfig,
    filter: DirFilter,
    planner: Planner<'a>,
}

impl<'a> Scanner<'a> {
    pub fn new(config: &'a RuntimeConfig) -> Self {
        Self {
            config,
            filter: DirFilter::from_config(config),
            planner: Planner::new(config),
        }
    }

    pub fn scan(&mut self) -> Summary {
        let mut summary = Summary::default();
        let config = self.config;
        for root in &config.dirs {
            self.scan_root(root, &mut summary);
        }
        summary
    }

    fn scan_root(&mut self, root: &Path, summary: &mut Summary) {
        // The walker never filters its own root.
        if root.is_dir() && !self.filter.keeps(root) {
            return;
        }

        let filter = self.filter.clone();
        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry: &DirEntry| {
                let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                !is_dir || filter.keeps(entry.path())
            })
            .build();

        for result in walker {
            match result {
                Ok(entry) => {
                    if entry.file_type().is_some_and(|t| t.is_file()) {
                        let outcome = self.process_file(entry.path());
                        if let Outcome::Renamed { from, to } = &outcome {
                            println!(
                                "{}",
                                OutputGenerator::rename_line(from, to, self.config.dry_run)
                            );
                        }
                        summary.record(&outcome);
                    }
                }
                Err(err) => {
                    log::error!("{}", RenameError::from(err));
                    summary.record(&Outcome::Failed);
                }
            }
        }
    }

    fn process_file(&mut self, path: &Path) -> Outcome {
        let name = models::file_name(path);
        let (stem, ext) = models::split_name(&name);
        if stamp::is_completed_name(stem) {
            log::debug!("Path `{}` need not be processed", path.display());
            return Outcome::AlreadyNamed;
        }

        if !self.config.accepts_extension(ext) {
            log::debug!("Path `{}` does not match the suffix list", path.display());
            return Outcome::Filtered;
        }

        let file = match load_media_file(path) {
            Ok(file) => file,
            Err(e) => {
                log::error!("{}", e);
                return Outcome::Failed;
            }
        };

        match self.planner.rename(&file) {
            Ok(target) => {
                if let Err(e) = self.planner.restore_metadata(&file, &target) {
                    log::warn!("{}", e);
                }
                Outcome::Renamed {
                    from: file.path,
                    to: target,
                }
            }
            Err(e) => {
                log::error!("{}", e);
                Outcome::Failed
            }
        }
    }
}

fn load_media_file(path: &Path) -> Result<MediaFile> {
    let stat_err = |e| RenameError::Stat(path.to_path_buf(), e);
    let meta = fs::metadata(path).map_err(stat_err)?;
    Ok(MediaFile {
        path: path.to_path_buf(),
        modified: meta.modified().map_err(stat_err)?,
        permissions: meta.permissions(),
    })
}
