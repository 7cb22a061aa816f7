use serde_json::json;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// JSON-lines diagnostic sink. One line per event plus a counter summary.
#[derive(Clone)]
pub(crate) struct DebugLogger {
    inner: Arc<Mutex<DebugState>>,
}

struct DebugState {
    writer: BufWriter<File>,
    counters: BTreeMap<String, u64>,
}

impl DebugLogger {
    pub fn new(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            inner: Arc::new(Mutex::new(DebugState {
                writer: BufWriter::new(file),
                counters: BTreeMap::new(),
            })),
        })
    }

    pub fn log_json(&self, event: &serde_json::Value) {
        if let Ok(mut state) = self.inner.lock() {
            let _ = writeln!(state.writer, "{event}");
        }
    }

    pub fn increment(&self, key: &str, amount: u64) {
        if let Ok(mut state) = self.inner.lock() {
            let entry = state.counters.entry(key.to_string()).or_insert(0);
            *entry = entry.saturating_add(amount);
        }
    }

    pub fn log_page(&self, page_number: usize, kind: &str, section: Option<&str>, items: usize) {
        self.log_json(&json!({
            "type": "catalog.page",
            "page": page_number,
            "kind": kind,
            "section": section,
            "items": items,
        }));
        self.increment("catalog.pages", 1);
    }

    pub fn log_image_skipped(&self, page_number: usize, context: &str, reason: &str) {
        self.log_json(&json!({
            "type": "catalog.image_skipped",
            "page": page_number,
            "context": context,
            "reason": reason,
        }));
        self.increment("catalog.images_skipped", 1);
    }

    pub fn emit_summary(&self, context: &str) {
        if let Ok(mut state) = self.inner.lock() {
            let counters = std::mem::take(&mut state.counters);
            let event = json!({
                "type": "catalog.summary",
                "context": context,
                "counts": counters,
            });
            let _ = writeln!(state.writer, "{event}");
            let _ = state.writer.flush();
        }
    }
}
