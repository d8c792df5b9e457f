//! Browser executable discovery.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, RuntimeError};

/// Resolves the browser binary to launch.
///
/// An explicit path must exist. Without one, the platform candidates are tried
/// first and Playwright's downloaded Chromium builds last.
pub fn resolve_executable(explicit: Option<&Path>) -> Result<PathBuf> {
	if let Some(path) = explicit {
		if path.exists() {
			return Ok(path.to_path_buf());
		}
		return Err(RuntimeError::ExecutableMissing(path.to_path_buf()));
	}

	find_browser_executable().ok_or(RuntimeError::BrowserNotFound)
}

/// Searches installed Chromium-family browsers, then the Playwright cache.
pub fn find_browser_executable() -> Option<PathBuf> {
	for candidate in platform_candidates() {
		if is_path_like(&candidate) {
			if Path::new(&candidate).exists() {
				debug!(target = "dev_browser.runtime", path = %candidate, "found browser executable");
				return Some(PathBuf::from(candidate));
			}
		} else if let Ok(path) = which::which(&candidate) {
			debug!(target = "dev_browser.runtime", path = %path.display(), "found browser on PATH");
			return Some(path);
		}
	}

	let cache = dirs::cache_dir()?.join("ms-playwright");
	playwright_chromium(&cache)
}

fn is_path_like(candidate: &str) -> bool {
	candidate.starts_with('/') || candidate.contains('\\') || candidate.contains(':')
}

fn platform_candidates() -> Vec<String> {
	if cfg!(target_os = "macos") {
		[
			"/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
			"/Applications/Chromium.app/Contents/MacOS/Chromium",
			"/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
			"/Applications/Brave Browser.app/Contents/MacOS/Brave Browser",
			"/Applications/Google Chrome Canary.app/Contents/MacOS/Google Chrome Canary",
		]
		.into_iter()
		.map(str::to_string)
		.collect()
	} else if cfg!(target_os = "windows") {
		windows_browser_candidates()
	} else {
		[
			"google-chrome-stable",
			"google-chrome",
			"chromium-browser",
			"chromium",
			"microsoft-edge",
			"brave-browser",
			"/usr/bin/google-chrome-stable",
			"/usr/bin/google-chrome",
			"/usr/bin/chromium-browser",
			"/usr/bin/chromium",
			"/snap/bin/chromium",
		]
		.into_iter()
		.map(str::to_string)
		.collect()
	}
}

pub(crate) fn windows_browser_candidates() -> Vec<String> {
	let mut roots = Vec::new();
	for key in ["PROGRAMFILES", "PROGRAMFILES(X86)", "LOCALAPPDATA"] {
		if let Ok(value) = std::env::var(key) {
			roots.push(PathBuf::from(value));
		}
	}
	if roots.is_empty() {
		roots.push(PathBuf::from(r"C:\Program Files"));
		roots.push(PathBuf::from(r"C:\Program Files (x86)"));
	}

	let suffixes: &[&[&str]] = &[
		&["Google", "Chrome", "Application", "chrome.exe"],
		&["Chromium", "Application", "chrome.exe"],
		&["Microsoft", "Edge", "Application", "msedge.exe"],
		&["BraveSoftware", "Brave-Browser", "Application", "brave.exe"],
	];

	let mut candidates = Vec::new();
	for root in roots {
		for suffix in suffixes {
			let path: PathBuf = suffix.iter().fold(root.clone(), |path, part| path.join(part));
			candidates.push(path.to_string_lossy().to_string());
		}
	}

	candidates.extend(["chrome.exe", "msedge.exe", "brave.exe", "chromium.exe"].map(str::to_string));
	candidates
}

/// Picks the newest `chromium-<rev>` build under a Playwright browser cache.
pub(crate) fn playwright_chromium(cache_root: &Path) -> Option<PathBuf> {
	let pattern = cache_root.join("chromium-*");
	let mut builds: Vec<(u64, PathBuf)> = glob::glob(&pattern.to_string_lossy())
		.ok()?
		.filter_map(|entry| entry.ok())
		.filter_map(|dir| {
			let revision = dir.file_name()?.to_str()?.strip_prefix("chromium-")?.parse().ok()?;
			Some((revision, dir))
		})
		.collect();
	builds.sort_by(|a, b| b.0.cmp(&a.0));

	builds
		.into_iter()
		.flat_map(|(_, dir)| playwright_layouts().iter().map(move |parts| parts.iter().fold(dir.clone(), |path, part| path.join(part))))
		.find(|path| path.exists())
}

fn playwright_layouts() -> &'static [&'static [&'static str]] {
	if cfg!(target_os = "macos") {
		&[
			&["chrome-mac-arm64", "Chromium.app", "Contents", "MacOS", "Chromium"],
			&["chrome-mac", "Chromium.app", "Contents", "MacOS", "Chromium"],
		]
	} else if cfg!(target_os = "windows") {
		&[&["chrome-win", "chrome.exe"], &["chrome-win64", "chrome.exe"]]
	} else {
		&[&["chrome-linux", "chrome"], &["chrome-linux64", "chrome"]]
	}
}
