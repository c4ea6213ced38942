use std::fs;
use std::path::{Path, PathBuf};

fn root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn rs_files(dir: &Path, files: &mut Vec<PathBuf>) {
    let entries =
        fs::read_dir(dir).unwrap_or_else(|e| panic!("failed to read dir {}: {e}", dir.display()));
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            rs_files(&path, files);
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            files.push(path);
        }
    }
}

/// Lines under `relative_dir` containing any of `patterns`, as
/// `(file, line number, line)`.
pub fn find_lines_containing(relative_dir: &str, patterns: &[&str]) -> Vec<(String, usize, String)> {
    let mut files = Vec::new();
    rs_files(&root().join(relative_dir), &mut files);
    files.sort();

    let mut hits = Vec::new();
    for file in files {
        let content = fs::read_to_string(&file)
            .unwrap_or_else(|e| panic!("failed to read {}: {e}", file.display()));
        let name = file
            .strip_prefix(root())
            .unwrap_or(&file)
            .to_string_lossy()
            .replace('\\', "/");
        for (idx, line) in content.lines().enumerate() {
            if patterns.iter().any(|p| line.contains(p)) {
                hits.push((name.clone(), idx + 1, line.to_string()));
            }
        }
    }
    hits
}

/// Lines in `mod.rs` files under `relative_dir` that are neither module
/// declarations nor re-exports.
pub fn find_non_export_lines_in_mod_files(relative_dir: &str) -> Vec<(String, usize, String)> {
    let mut files = Vec::new();
    rs_files(&root().join(relative_dir), &mut files);
    files.sort();

    let mut violations = Vec::new();
    for file in files {
        if file.file_name().and_then(|s| s.to_str()) != Some("mod.rs") {
            continue;
        }
        let content = fs::read_to_string(&file)
            .unwrap_or_else(|e| panic!("failed to read {}: {e}", file.display()));
        let name = file
            .strip_prefix(root())
            .unwrap_or(&file)
            .to_string_lossy()
            .replace('\\', "/");

        let mut in_reexport = false;
        for (idx, raw_line) in content.lines().enumerate() {
            let line = raw_line.trim();
            if in_reexport {
                in_reexport = !line.ends_with(';');
                continue;
            }
            if line.starts_with("pub use ") {
                in_reexport = !line.ends_with(';');
                continue;
            }
            if line.is_empty()
                || line.starts_with("//")
                || line.starts_with("pub mod ")
                || line.starts_with("mod ")
                || line.starts_with("#[cfg")
            {
                continue;
            }
            violations.push((name.clone(), idx + 1, raw_line.to_string()));
        }
    }
    violations
}
