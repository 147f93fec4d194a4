use std::{fs::OpenOptions, io::Write, sync::Mutex};

use tracing::warn;

use crate::engine::notify::{Notification, NotificationSink};
use crate::trace::trace::TraceEvent;

/// Appends engine notifications to a JSONL file.
pub struct TraceLogger {
    file: Option<Mutex<std::fs::File>>,
    script: String,
    step: u64,
}

impl TraceLogger {
    pub fn new(path: &str, script: &str) -> Self {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path);

        match file {
            Ok(f) => Self {
                file: Some(Mutex::new(f)),
                script: script.to_string(),
                step: 0,
            },
            Err(e) => {
                warn!("could not open trace file '{}': {}", path, e);
                Self {
                    file: None,
                    script: script.to_string(),
                    step: 0,
                }
            }
        }
    }

    pub fn log(&self, event: &TraceEvent) {
        let file_mutex = match &self.file {
            Some(f) => f,
            None => return, // tracing disabled
        };

        let json = match serde_json::to_string(event) {
            Ok(j) => j,
            Err(e) => {
                warn!("failed to serialize trace event: {}", e);
                return;
            }
        };

        let mut file = match file_mutex.lock() {
            Ok(f) => f,
            Err(e) => {
                warn!("trace logger lock poisoned: {}", e);
                return;
            }
        };

        if let Err(e) = writeln!(file, "{}", json) {
            warn!("failed to write trace event: {}", e);
        }
    }
}

impl NotificationSink for TraceLogger {
    fn notify(&mut self, notification: &Notification) {
        self.step += 1;
        self.log(&TraceEvent::from_notification(&self.script, self.step, notification));
    }
}
