//! Output helpers for the `idealab` CLI.

use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

/// Print a value as pretty-printed JSON to stdout.
///
/// Terminates the process with exit code 1 if serialization fails.
pub fn output_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            // Ignore broken pipe errors (e.g., piped to `head`)
            let _ = writeln!(handle, "{}", json);
        }
        Err(e) => {
            eprintln!("Error: failed to serialize JSON: {}", e);
            std::process::exit(1);
        }
    }
}

/// Print pre-rendered text to stdout without adding a trailing newline.
pub fn output_text(text: &str) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let _ = handle.write_all(text.as_bytes());
}

/// Read a whole file, or stdin when `path` is `None` or `-`.
pub fn read_source(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)
            .with_context(|| format!("failed to read {}", p.display())),
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn read_source_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("reply.txt");
        std::fs::write(&path, "hello").unwrap();
        assert_eq!(read_source(Some(&path)).unwrap(), "hello");
    }

    #[test]
    fn read_source_missing_file_names_path() {
        let err = read_source(Some(Path::new("/no/such/file.txt"))).unwrap_err();
        assert!(format!("{:#}", err).contains("/no/such/file.txt"));
    }
}
