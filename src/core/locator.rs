use std::fs;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobMatcher};
use log::debug;

/// Collect every XML report file under `root`, recursively.
///
/// A missing or empty root yields an empty list; callers decide whether
/// that deserves a warning. Unreadable entries are skipped so one bad
/// directory never sinks the whole walk.
pub fn locate_reports(root: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();
    if let Ok(glob) = Glob::new("**/*.xml") {
        collect(root, &glob.compile_matcher(), &mut found);
    }
    found.sort();
    found
}

fn collect(dir: &Path, matcher: &GlobMatcher, found: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        debug!("Skipping unreadable directory: {}", dir.display());
        return;
    };

    for entry in entries {
        let Ok(entry) = entry else { continue };
        let path = entry.path();
        if path.is_dir() {
            collect(&path, matcher, found);
        } else if matcher.is_match(&path) {
            found.push(path);
        }
    }
}
