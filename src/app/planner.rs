use crate::app::error::{RenameError, Result};
use crate::app::models::{MediaFile, RuntimeConfig};
use crate::app::stamp;
use filetime::FileTime;
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Highest collision index tried before giving up on a file.
pub const MAX_COLLISION_INDEX: usize = 999;

/// Computes target paths and moves files there.
pub struct Planner<'a> {
    config: &'a RuntimeConfig,
    /// Targets handed out during a dry run, standing in for files that were never moved.
    claimed: HashSet<PathBuf>,
    max_index: usize,
}

impl<'a> Planner<'a> {
    pub fn new(config: &'a RuntimeConfig) -> Self {
        Self {
            config,
            claimed: HashSet::new(),
            max_index: MAX_COLLISION_INDEX,
        }
    }

    /// Lowers the collision bound, so exhausting it is cheap to set up.
    #[cfg(test)]
    fn with_max_index(mut self, max_index: usize) -> Self {
        self.max_index = max_index;
        self
    }

    /// Directory a file modified at `modified` and found in `source_dir` belongs in.
    pub fn target_dir(&self, modified: SystemTime, source_dir: &Path) -> PathBuf {
        if !self.config.create_year_dir {
            return source_dir.to_path_buf();
        }

        let base = if self.config.sibling_dir {
            source_dir.parent().unwrap_or(source_dir)
        } else {
            source_dir
        };

        let mut dir = base.join(stamp::year_dir(modified));
        if self.config.create_month_dir {
            dir.push(stamp::month_dir(modified));
        }
        dir
    }

    pub fn file_name(modified: SystemTime, ext: &str, index: usize) -> String {
        let stamp = stamp::file_stamp(modified);
        if index == 0 {
            format!("{stamp}{ext}")
        } else {
            format!("{stamp}-{index:02}{ext}")
        }
    }

    /// Full target path for one collision index. Creates the bucket directory
    /// unless this is a dry run.
    pub fn plan(
        &self,
        modified: SystemTime,
        ext: &str,
        source_dir: &Path,
        index: usize,
    ) -> Result<PathBuf> {
        let dir = self.target_dir(modified, source_dir);
        self.ensure_dir(&dir)?;
        Ok(dir.join(Self::file_name(modified, ext, index)))
    }

    /// Renames `file` to the first free target and returns where it went.
    pub fn rename(&mut self, file: &MediaFile) -> Result<PathBuf> {
        let source_dir = file.path.parent().unwrap_or(Path::new(""));
        let ext = file.dotted_extension();
        let target = self.first_free(file, source_dir, &ext)?;

        if self.config.dry_run {
            self.claimed.insert(target.clone());
            return Ok(target);
        }

        fs::rename(&file.path, &target)
            .map_err(|e| RenameError::Move(file.path.clone(), target.clone(), e))?;

        Ok(target)
    }

    /// Puts the original modification time and permission bits back on a moved file.
    pub fn restore_metadata(&self, file: &MediaFile, target: &Path) -> Result {
        if self.config.dry_run {
            return Ok(());
        }
        let mtime = FileTime::from_system_time(file.modified);
        filetime::set_file_times(target, mtime, mtime)
            .map_err(|e| RenameError::RestoreTimes(target.to_path_buf(), e))?;
        fs::set_permissions(target, file.permissions.clone())
            .map_err(|e| RenameError::RestorePermissions(target.to_path_buf(), e))?;
        Ok(())
    }

    fn first_free(&self, file: &MediaFile, source_dir: &Path, ext: &str) -> Result<PathBuf> {
        for index in 0..=self.max_index {
            let candidate = self.plan(file.modified, ext, source_dir, index)?;
            if !self.occupied(&candidate)? {
                return Ok(candidate);
            }
            log::debug!("`{}` exists, trying next index", candidate.display());
        }
        Err(RenameError::CollisionLimit(
            file.path.clone(),
            self.max_index + 1,
        ))
    }

    fn occupied(&self, path: &Path) -> Result<bool> {
        if self.claimed.contains(path) {
            return Ok(true);
        }
        match fs::symlink_metadata(path) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(RenameError::ExistenceCheck(path.to_path_buf(), e)),
        }
    }

    fn ensure_dir(&self, dir: &Path) -> Result {
        if self.config.dry_run || dir.is_dir() {
            return Ok(());
        }
        fs::create_dir_all(dir).map_err(|e| RenameError::CreateDir(dir.to_path_buf(), e))?;
        log::info!("Created directory `{}`", dir.display());
        Ok(())
    }
}
