//! Resolve the `--input` argument into a list of edge tables.
//!
//! An argument ending in `.csv` names one file under the input root.
//! Anything else names a directory under the input root, and every
//! immediate entry of that directory is taken as an input. Entries are not
//! filtered by suffix or type.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::{Error, Result};

/// Suffix that marks the argument as a single file.
pub const FILE_SUFFIX: &str = ".csv";

/// One edge table to process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputFile {
    /// Path to read, already joined onto the input root.
    pub path: PathBuf,
    /// File name with its last four characters removed; names the outputs.
    pub basename: String,
}

impl InputFile {
    fn from_name(path: PathBuf, file_name: &str) -> Self {
        Self {
            path,
            basename: strip_suffix_chars(file_name).to_string(),
        }
    }
}

/// How the argument was interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    SingleFile,
    Directory,
}

#[must_use]
pub fn input_mode(arg: &str) -> InputMode {
    if arg.ends_with(FILE_SUFFIX) {
        InputMode::SingleFile
    } else {
        InputMode::Directory
    }
}

/// Resolve `arg` against `input_root`.
///
/// Directory entries are returned sorted by file name.
///
/// # Errors
///
/// [`Error::Io`] if a directory argument does not exist or cannot be
/// listed. A single-file argument is not checked here; a missing file
/// surfaces when it is loaded.
#[instrument]
pub fn resolve_inputs(arg: &str, input_root: &Path) -> Result<Vec<InputFile>> {
    match input_mode(arg) {
        InputMode::SingleFile => {
            let path = input_root.join(arg);
            let file_name = Path::new(arg)
                .file_name()
                .map_or_else(|| arg.to_string(), |n| n.to_string_lossy().into_owned());
            Ok(vec![InputFile::from_name(path, &file_name)])
        }
        InputMode::Directory => {
            let dir = input_root.join(arg);
            let entries = fs::read_dir(&dir).map_err(|e| Error::io(&dir, e))?;

            let mut inputs = Vec::new();
            for entry in entries {
                let entry = entry.map_err(|e| Error::io(&dir, e))?;
                let name = entry.file_name().to_string_lossy().into_owned();
                inputs.push(InputFile::from_name(entry.path(), &name));
            }
            inputs.sort_by(|a, b| a.path.cmp(&b.path));

            debug!(dir = %dir.display(), count = inputs.len(), "resolved directory inputs");
            Ok(inputs)
        }
    }
}

/// Drop the last four characters (the assumed `.csv`), or everything if
/// the name is shorter.
fn strip_suffix_chars(name: &str) -> &str {
    name.char_indices()
        .rev()
        .nth(FILE_SUFFIX.len() - 1)
        .map_or("", |(i, _)| &name[..i])
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn csv_suffix_selects_single_file() {
        let inputs = resolve_inputs("toy.csv", Path::new("in")).expect("resolve");
        assert_eq!(
            inputs,
            vec![InputFile {
                path: PathBuf::from("in/toy.csv"),
                basename: "toy".to_string(),
            }]
        );
    }

    #[test]
    fn suffix_match_is_literal_and_case_sensitive() {
        assert_eq!(input_mode("edges.csv"), InputMode::SingleFile);
        assert_eq!(input_mode("edges.CSV"), InputMode::Directory);
        assert_eq!(input_mode("edges.tsv"), InputMode::Directory);
        assert_eq!(input_mode("csv"), InputMode::Directory);
    }

    #[test]
    fn nested_file_basename_is_flat() {
        let inputs = resolve_inputs("sub/net.csv", Path::new("in")).expect("resolve");
        assert_eq!(inputs[0].path, PathBuf::from("in/sub/net.csv"));
        assert_eq!(inputs[0].basename, "net");
    }

    #[test]
    fn directory_entries_are_all_inputs() {
        let root = TempDir::new().expect("tempdir");
        let dir = root.path().join("batch");
        fs::create_dir(&dir).expect("mkdir");
        fs::write(dir.join("b.csv"), "").expect("write");
        fs::write(dir.join("a.csv"), "").expect("write");
        fs::write(dir.join("notes.txt"), "").expect("write");
        fs::create_dir(dir.join("nested")).expect("mkdir");

        let inputs = resolve_inputs("batch", root.path()).expect("resolve");
        let basenames: Vec<_> = inputs.iter().map(|i| i.basename.as_str()).collect();
        // "nested" loses four characters like any other entry.
        assert_eq!(basenames, ["a", "b", "ne", "notes"]);
        assert_eq!(inputs[0].path, dir.join("a.csv"));
    }

    #[test]
    fn missing_directory_is_io_error() {
        let root = TempDir::new().expect("tempdir");
        let err = resolve_inputs("nope", root.path()).expect_err("missing");
        assert!(matches!(err, Error::Io { .. }), "got {err:?}");
    }

    #[test]
    fn strip_counts_characters() {
        assert_eq!(strip_suffix_chars("toy.csv"), "toy");
        assert_eq!(strip_suffix_chars("café.csv"), "café");
        assert_eq!(strip_suffix_chars("data"), "");
        assert_eq!(strip_suffix_chars("abc"), "");
        assert_eq!(strip_suffix_chars("notes.txt"), "notes");
    }
}
