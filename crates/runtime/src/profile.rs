//! Browser profile (user data directory) resolution.

use std::path::{Path, PathBuf};

/// Directory name used under the working directory when no profile root is given.
pub const DEFAULT_USER_DATA_DIR: &str = ".browser-data";
/// Directory name used under an explicit profile root.
pub const PROFILE_USER_DATA_DIR: &str = "browser-data";

/// Computes the user-data-dir for a launch without touching the filesystem.
pub fn user_data_dir(profile_dir: Option<&Path>, cwd: &Path) -> PathBuf {
	match profile_dir {
		Some(dir) if dir.is_absolute() => dir.join(PROFILE_USER_DATA_DIR),
		Some(dir) => cwd.join(dir).join(PROFILE_USER_DATA_DIR),
		None => cwd.join(DEFAULT_USER_DATA_DIR),
	}
}

/// Resolves and creates the user-data-dir relative to the current directory.
pub fn resolve_user_data_dir(profile_dir: Option<&Path>) -> std::io::Result<PathBuf> {
	let cwd = std::env::current_dir()?;
	let resolved = user_data_dir(profile_dir, &cwd);
	std::fs::create_dir_all(&resolved)?;
	Ok(resolved)
}
