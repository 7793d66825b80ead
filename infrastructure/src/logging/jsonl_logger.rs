//! JSONL transcript writer for conversation events.
//!
//! Each [`ConversationEvent`] becomes one JSON line carrying the payload
//! fields plus `type`, `timestamp` and the `session` it belongs to. The file
//! is opened in append mode so transcripts from several runs accumulate.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;
use travel_application::ports::conversation_logger::{ConversationEvent, ConversationLogger};

/// Thread-safe via `Mutex<BufWriter<File>>`; flushes after every line.
pub struct JsonlConversationLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
    session: String,
}

impl JsonlConversationLogger {
    /// Open (or create) the transcript at `path`, creating parent directories.
    ///
    /// Returns `None` and logs a warning if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create conversation log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!(
                    "Could not open conversation log file {}: {}",
                    path.display(),
                    e
                );
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
            session: chrono::Utc::now().format("%Y%m%dT%H%M%S%.3fZ").to_string(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Identifier stamped on every line written by this logger.
    pub fn session(&self) -> &str {
        &self.session
    }
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let mut record = match event.payload {
            serde_json::Value::Object(map) => map,
            other => {
                let mut map = serde_json::Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        record.insert("type".to_string(), event.event_type.into());
        record.insert("timestamp".to_string(), timestamp.into());
        record.insert("session".to_string(), self.session.clone().into());

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlConversationLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_lines(path: &Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_record_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("turns.jsonl");
        let logger = JsonlConversationLogger::new(&path).unwrap();

        logger.log(ConversationEvent::new(
            "turn_started",
            serde_json::json!({ "turn": 1, "input": "Flights to Rome?" }),
        ));
        logger.log(ConversationEvent::new(
            "guardrail_blocked",
            serde_json::json!({ "turn": 1, "reasoning": "not travel" }),
        ));
        let session = logger.session().to_string();
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["type"], "turn_started");
        assert_eq!(records[0]["input"], "Flights to Rome?");
        assert_eq!(records[1]["type"], "guardrail_blocked");
        for record in &records {
            assert!(record["timestamp"].is_string());
            assert_eq!(record["session"], session.as_str());
        }
    }

    #[test]
    fn test_non_object_payload_is_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("turns.jsonl");
        let logger = JsonlConversationLogger::new(&path).unwrap();
        logger.log(ConversationEvent::new("note", serde_json::json!("plain")));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records[0]["type"], "note");
        assert_eq!(records[0]["data"], "plain");
    }

    #[test]
    fn test_appends_across_loggers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("turns.jsonl");
        for turn in 1..=2 {
            let logger = JsonlConversationLogger::new(&path).unwrap();
            logger.log(ConversationEvent::new(
                "turn_completed",
                serde_json::json!({ "turn": turn }),
            ));
        }
        assert_eq!(read_lines(&path).len(), 2);
    }

    #[test]
    fn test_directory_path_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(JsonlConversationLogger::new(dir.path()).is_none());
    }
}
