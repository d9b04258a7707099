use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::models::{Transcript, Utterance};

/// Read a transcript file
///
/// `.json` files hold an array of `{"speaker": ..., "text": ...}` objects;
/// anything else is treated as speaker-labelled plain text.
pub fn read_transcript_file(path: &Path) -> Result<Transcript> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {:?}", path))?;

    if is_json(path) {
        parse_transcript_json(&content)
            .with_context(|| format!("Failed to parse transcript JSON: {:?}", path))
    } else {
        Ok(Transcript::parse(&content))
    }
}

/// Parse a JSON utterance array into a Transcript
pub fn parse_transcript_json(json: &str) -> Result<Transcript> {
    let utterances: Vec<Utterance> =
        serde_json::from_str(json).context("Expected an array of {speaker, text} objects")?;
    Ok(Transcript::from_utterances(utterances))
}

/// Transcript files (`.txt`, `.json`) in a directory, sorted by name
pub fn list_transcript_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {:?}", dir))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let is_transcript = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("txt") || e.eq_ignore_ascii_case("json"));
        if path.is_file() && is_transcript {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Call identifier derived from a transcript path (`calls/call3.txt` -> `call3`)
pub fn call_id_for(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_text_transcript() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("call1.txt");
        std::fs::write(&path, "Agent: Hello\nCustomer: Where is my order?\n").unwrap();

        let transcript = read_transcript_file(&path).unwrap();
        assert_eq!(transcript.len(), 2);
        assert_eq!(call_id_for(&path), "call1");
    }

    #[test]
    fn test_read_json_transcript() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("call2.json");
        std::fs::write(
            &path,
            r#"[{"speaker": "Agent", "text": "Hi"}, {"speaker": "Customer", "text": "Refund please"}, {"text": ""}]"#,
        )
        .unwrap();

        let transcript = read_transcript_file(&path).unwrap();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.utterances()[1].text, "Refund please");
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(parse_transcript_json(r#"{"speaker": "Agent"}"#).is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_transcript_file(&dir.path().join("nope.txt")).is_err());
    }

    #[test]
    fn test_list_transcript_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["call2.txt", "call1.json", "notes.md", "call3.TXT"] {
            std::fs::write(dir.path().join(name), "Agent: hi").unwrap();
        }

        let files = list_transcript_files(dir.path()).unwrap();
        let ids: Vec<String> = files.iter().map(|p| call_id_for(p)).collect();
        assert_eq!(ids, vec!["call1", "call2", "call3"]);
    }
}
