//! File discovery for the commands that take paths

use anyhow::{Context, Result, bail};
use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Files below `paths`, in a stable order
///
/// Explicit file arguments are always returned. Files found by walking a
/// directory must match one of the `include` patterns when any are given;
/// hidden directories such as `.git` or `.terraform` are not entered.
pub fn discover_files(paths: &[PathBuf], include: &[String]) -> Result<Vec<PathBuf>> {
    let patterns = include
        .iter()
        .map(|pattern| {
            Pattern::new(pattern).with_context(|| format!("invalid include pattern `{pattern}`"))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            files.push(path.clone());
            continue;
        }
        if !path.is_dir() {
            bail!("path not found: {}", path.display());
        }

        let walker = WalkDir::new(path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));
        for entry in walker {
            let entry = entry.with_context(|| format!("failed to walk {}", path.display()))?;
            if entry.file_type().is_file() && is_included(entry.path(), &patterns) {
                files.push(entry.into_path());
            }
        }
    }

    tracing::debug!("Discovered {} files", files.len());
    Ok(files)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

fn is_included(path: &Path, patterns: &[Pattern]) -> bool {
    if patterns.is_empty() {
        return true;
    }
    let name = path.file_name().and_then(|name| name.to_str()).unwrap_or("");
    patterns
        .iter()
        .any(|pattern| pattern.matches(name) || pattern.matches_path(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn layout() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("modules/net")).unwrap();
        fs::create_dir_all(dir.path().join(".terraform/cache")).unwrap();
        fs::write(dir.path().join("main.tf"), "a = 1\n").unwrap();
        fs::write(dir.path().join("modules/net/vars.tf"), "b = 2\n").unwrap();
        fs::write(dir.path().join("Dockerfile"), "FROM a\n").unwrap();
        fs::write(dir.path().join(".terraform/cache/x.tf"), "c = 3\n").unwrap();
        dir
    }

    #[test]
    fn walks_directories_skipping_hidden_ones() {
        let dir = layout();
        let files = discover_files(&[dir.path().to_path_buf()], &[]).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|file| file.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Dockerfile", "main.tf", "vars.tf"]);
    }

    #[test]
    fn include_patterns_filter_walked_files() {
        let dir = layout();
        let files = discover_files(&[dir.path().to_path_buf()], &["*.tf".to_string()]).unwrap();
        assert_eq!(files.len(), 2);

        let explicit = dir.path().join("Dockerfile");
        let files = discover_files(&[explicit.clone()], &["*.tf".to_string()]).unwrap();
        assert_eq!(files, vec![explicit]);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(discover_files(&[PathBuf::from("/no/such/dir")], &[]).is_err());
        assert!(discover_files(&[PathBuf::from(".")], &["[".to_string()]).is_err());
    }
}
