//! Locating and reading input documents.

use std::path::{Path, PathBuf};

use tracing::debug;
use wml_options::WmlConfig;

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("'{path}' is not valid UTF-8")]
    Utf8 { path: String },
}

impl InputError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        InputError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

/// Expand `roots` into the list of documents to parse.
///
/// Files named explicitly are always taken. Directories are walked
/// recursively in name order, keeping files that `config` matches and
/// skipping excluded subdirectories.
pub fn collect_files(roots: &[PathBuf], config: &WmlConfig) -> Result<Vec<PathBuf>, InputError> {
    let mut files = Vec::new();
    for root in roots {
        let metadata = std::fs::metadata(root).map_err(|e| InputError::io(root, e))?;
        if metadata.is_dir() {
            walk(root, config, &mut files)?;
        } else {
            files.push(root.clone());
        }
    }
    debug!(count = files.len(), "collected input files");
    Ok(files)
}

fn walk(dir: &Path, config: &WmlConfig, files: &mut Vec<PathBuf>) -> Result<(), InputError> {
    let mut pending = vec![dir.to_path_buf()];
    while let Some(dir) = pending.pop() {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(&dir).map_err(|e| InputError::io(&dir, e))? {
            let entry = entry.map_err(|e| InputError::io(&dir, e))?;
            entries.push(entry.path());
        }
        entries.sort();

        let mut subdirs = Vec::new();
        for path in entries {
            if path.is_dir() {
                if !config.is_excluded(&path) {
                    subdirs.push(path);
                }
            } else if config.matches(&path) {
                files.push(path);
            }
        }
        // Reverse so the stack yields subdirectories in name order.
        pending.extend(subdirs.into_iter().rev());
    }
    Ok(())
}

/// Read `path` as UTF-8 text.
pub fn read_source(path: &Path) -> Result<String, InputError> {
    let bytes = std::fs::read(path).map_err(|e| InputError::io(path, e))?;
    match simdutf8::basic::from_utf8(&bytes) {
        Ok(text) => Ok(text.to_string()),
        Err(_) => Err(InputError::Utf8 {
            path: path.display().to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("wmlp-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_walk_filters_and_orders() {
        let dir = scratch_dir("walk");
        std::fs::create_dir_all(dir.join("units/elves")).unwrap();
        std::fs::create_dir_all(dir.join("skip")).unwrap();
        std::fs::write(dir.join("b.cfg"), "").unwrap();
        std::fs::write(dir.join("a.cfg"), "").unwrap();
        std::fs::write(dir.join("notes.txt"), "").unwrap();
        std::fs::write(dir.join("units/elves/archer.cfg"), "").unwrap();
        std::fs::write(dir.join("skip/x.cfg"), "").unwrap();

        let config = WmlConfig {
            exclude: vec!["skip".to_string()],
            ..WmlConfig::default()
        };
        let files = collect_files(&[dir.clone()], &config).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.strip_prefix(&dir).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(names, vec!["a.cfg", "b.cfg", "units/elves/archer.cfg"]);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_read_source_rejects_invalid_utf8() {
        let dir = scratch_dir("utf8");
        let path = dir.join("bad.cfg");
        std::fs::write(&path, [b'a', 0xff, b'b']).unwrap();
        assert!(matches!(read_source(&path), Err(InputError::Utf8 { .. })));

        std::fs::write(&path, "[a]\n[/a]\n").unwrap();
        assert_eq!(read_source(&path).unwrap(), "[a]\n[/a]\n");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_root() {
        let missing = std::env::temp_dir().join("wmlp-does-not-exist-42");
        let err = collect_files(&[missing], &WmlConfig::default()).unwrap_err();
        assert!(matches!(err, InputError::Io { .. }));
    }
}
