use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while handling a single entry.
/// None of these stop the walk.
#[derive(Debug, Error)]
pub enum RenameError {
    #[error("Read directory entry error: {0}")]
    Walk(#[from] ignore::Error),
    #[error("Stat file `{}` error: {}", .0.display(), .1)]
    Stat(PathBuf, #[source] io::Error),
    #[error("Create directory `{}` error: {}", .0.display(), .1)]
    CreateDir(PathBuf, #[source] io::Error),
    #[error("Check existence of `{}` error: {}", .0.display(), .1)]
    ExistenceCheck(PathBuf, #[source] io::Error),
    #[error("Rename file `{}` to `{}` error: {}", .0.display(), .1.display(), .2)]
    Move(PathBuf, PathBuf, #[source] io::Error),
    #[error("Restore times of `{}` error: {}", .0.display(), .1)]
    RestoreTimes(PathBuf, #[source] io::Error),
    #[error("Restore permissions of `{}` error: {}", .0.display(), .1)]
    RestorePermissions(PathBuf, #[source] io::Error),
    #[error("No free name for `{}` after {} attempts", .0.display(), .1)]
    CollisionLimit(PathBuf, usize),
}

pub type Result<T = ()> = std::result::Result<T, RenameError>;
