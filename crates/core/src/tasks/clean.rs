//! The clean task
//!
//! Recursively removes the configured build output directory. Removal is
//! destructive and irreversible; a path that is already absent is a
//! success, not an error, so repeated runs are idempotent.

use super::{RunMode, Task, TaskOutcome};
use crate::error::{Error, Result, ResultExt};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use walkdir::WalkDir;

/// What a clean run removed, or would remove under dry-run
#[derive(Debug, Clone)]
pub struct CleanReport {
    /// Path targeted for removal
    pub path: PathBuf,
    /// Whether the path existed when the run started
    pub existed: bool,
    /// Files removed
    pub files: usize,
    /// Directories removed, the target itself included
    pub dirs: usize,
    /// Bytes reclaimed (best effort; never fails the task)
    pub bytes: u64,
    /// Wall-clock time of the run
    pub duration: Duration,
}

/// Recursively remove a path, tallying what goes
///
/// The tally is taken before removal and is best effort: unreadable
/// entries are skipped, the removal itself is authoritative. A target that
/// is a plain file is unlinked rather than treated as an error.
pub fn clean_path(path: &Path, mode: RunMode) -> Result<CleanReport> {
    let started = Instant::now();

    let mut report = CleanReport {
        path: path.to_path_buf(),
        existed: false,
        files: 0,
        dirs: 0,
        bytes: 0,
        duration: Duration::ZERO,
    };

    // Only a missing path is a no-op; any other stat failure fails the task.
    let metadata = match std::fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "clean target absent");
            report.duration = started.elapsed();
            return Ok(report);
        }
        Err(e) => {
            return Err(Error::from(e))
                .context(format!("While removing {}", path.display()));
        }
    };
    report.existed = true;

    if metadata.is_dir() {
        for entry in WalkDir::new(path).into_iter().filter_map(|e| e.ok()) {
            if entry.file_type().is_dir() {
                report.dirs += 1;
            } else {
                report.files += 1;
                report.bytes += entry.metadata().map(|m| m.len()).unwrap_or(0);
            }
        }
        if mode == RunMode::Execute {
            std::fs::remove_dir_all(path)
                .map_err(Error::from)
                .context(format!("While removing {}", path.display()))?;
        }
    } else {
        report.files = 1;
        report.bytes = metadata.len();
        if mode == RunMode::Execute {
            std::fs::remove_file(path)
                .map_err(Error::from)
                .context(format!("While removing {}", path.display()))?;
        }
    }

    tracing::debug!(
        path = %path.display(),
        files = report.files,
        dirs = report.dirs,
        bytes = report.bytes,
        dry_run = (mode == RunMode::DryRun),
        "clean finished"
    );

    report.duration = started.elapsed();
    Ok(report)
}

/// The registered `clean` task
#[derive(Debug, Clone)]
pub struct CleanTask {
    build_dir: PathBuf,
}

impl CleanTask {
    /// Create a clean task for a resolved build directory
    pub fn new(build_dir: PathBuf) -> Self {
        Self { build_dir }
    }

    /// Directory the task removes
    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    /// Run the task and return the full report
    pub fn clean(&self, mode: RunMode) -> Result<CleanReport> {
        clean_path(&self.build_dir, mode)
    }
}

impl Task for CleanTask {
    fn name(&self) -> &'static str {
        "clean"
    }

    fn description(&self) -> &'static str {
        "Recursively delete the build output directory"
    }

    fn run(&self, mode: RunMode) -> Result<TaskOutcome> {
        let report = self.clean(mode)?;
        let summary = match (mode, report.existed) {
            (RunMode::Execute, true) => {
                format!("Removed build directory {}", report.path.display())
            }
            (RunMode::DryRun, true) => {
                format!("Would remove build directory {}", report.path.display())
            }
            (_, false) => format!("Build directory {} already absent", report.path.display()),
        };
        Ok(TaskOutcome {
            changed: report.existed,
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn populated_build_dir(root: &TempDir) -> PathBuf {
        let build = root.path().join("build");
        fs::create_dir_all(build.join("outputs/apk")).unwrap();
        fs::write(build.join("outputs/apk/app-debug.apk"), b"not a real apk").unwrap();
        fs::write(build.join("kotlin.lock"), b"lock").unwrap();
        build
    }

    #[test]
    fn test_clean_removes_directory_and_contents() {
        let root = TempDir::new().unwrap();
        let build = populated_build_dir(&root);

        let report = clean_path(&build, RunMode::Execute).unwrap();

        assert!(!build.exists());
        assert!(report.existed);
        assert_eq!(report.files, 2);
        // build, outputs, outputs/apk
        assert_eq!(report.dirs, 3);
        assert_eq!(report.bytes, 18);
    }

    #[test]
    fn test_clean_missing_path_is_a_noop_success() {
        let root = TempDir::new().unwrap();
        let build = root.path().join("build");

        let report = clean_path(&build, RunMode::Execute).unwrap();

        assert!(!report.existed);
        assert_eq!(report.files, 0);
        assert_eq!(report.bytes, 0);
    }

    #[test]
    fn test_clean_twice_is_idempotent() {
        let root = TempDir::new().unwrap();
        let build = populated_build_dir(&root);

        let first = clean_path(&build, RunMode::Execute).unwrap();
        let second = clean_path(&build, RunMode::Execute).unwrap();

        assert!(first.existed);
        assert!(!second.existed);
        assert!(!build.exists());
    }

    #[test]
    fn test_dry_run_removes_nothing() {
        let root = TempDir::new().unwrap();
        let build = populated_build_dir(&root);

        let report = clean_path(&build, RunMode::DryRun).unwrap();

        assert!(build.exists());
        assert!(build.join("outputs/apk/app-debug.apk").exists());
        assert!(report.existed);
        assert_eq!(report.files, 2);
        assert_eq!(report.bytes, 18);
    }

    #[test]
    fn test_clean_unlinks_a_file_target() {
        let root = TempDir::new().unwrap();
        let target = root.path().join("build");
        fs::write(&target, b"stray").unwrap();

        let report = clean_path(&target, RunMode::Execute).unwrap();

        assert!(!target.exists());
        assert_eq!(report.files, 1);
        assert_eq!(report.dirs, 0);
        assert_eq!(report.bytes, 5);
    }

    #[cfg(unix)]
    #[test]
    fn test_stat_failure_is_not_treated_as_absent() {
        use crate::error::{exit_codes, ErrorCode};

        let root = TempDir::new().unwrap();
        // A regular file in the middle of the path makes the stat fail
        // with ENOTDIR rather than ENOENT.
        let blocker = root.path().join("output");
        fs::write(&blocker, b"not a directory").unwrap();
        let target = blocker.join("build");

        let err = clean_path(&target, RunMode::Execute).unwrap_err();

        assert_eq!(err.code, ErrorCode::IoError);
        assert_eq!(err.exit_code(), exit_codes::FAILURE);
        assert!(err.context.as_deref().unwrap().contains("While removing"));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_parent_fails_the_clean() {
        use crate::error::ErrorCode;
        use std::os::unix::fs::PermissionsExt;

        let root = TempDir::new().unwrap();
        let parent = root.path().join("locked");
        let build = parent.join("build");
        fs::create_dir_all(&build).unwrap();
        fs::write(build.join("artifact.bin"), b"x").unwrap();

        fs::set_permissions(&parent, fs::Permissions::from_mode(0o000)).unwrap();
        // Directory permissions do not apply when running as root, so
        // only assert the failure when the stat is actually blocked.
        let stat_blocked = fs::symlink_metadata(&build).is_err();
        let result = clean_path(&build, RunMode::Execute);
        fs::set_permissions(&parent, fs::Permissions::from_mode(0o755)).unwrap();

        if stat_blocked {
            let err = result.unwrap_err();
            assert_eq!(err.code, ErrorCode::PermissionDenied);
            assert!(build.exists());
        } else {
            assert!(result.is_ok());
        }
    }

    #[test]
    fn test_task_outcome_summaries() {
        let root = TempDir::new().unwrap();
        let build = populated_build_dir(&root);
        let task = CleanTask::new(build.clone());

        let outcome = task.run(RunMode::DryRun).unwrap();
        assert!(outcome.changed);
        assert!(outcome.summary.starts_with("Would remove"));

        let outcome = task.run(RunMode::Execute).unwrap();
        assert!(outcome.changed);
        assert!(outcome.summary.starts_with("Removed"));

        let outcome = task.run(RunMode::Execute).unwrap();
        assert!(!outcome.changed);
        assert!(outcome.summary.contains("already absent"));
    }
}
