use std::collections::VecDeque;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::DetectedSymbol;
use crate::stats::DetectionStats;

pub const DEFAULT_CAPACITY: usize = 10_000;

/// Caller-owned record of everything detected so far.
///
/// Bounded ring: once the capacity is reached the oldest entry is
/// evicted. There is no shared or global instance; each consumer owns
/// its log and passes it where needed.
#[derive(Debug, Clone)]
pub struct DetectionLog {
    entries: VecDeque<DetectedSymbol>,
    capacity: usize,
}

impl DetectionLog {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { entries: VecDeque::with_capacity(capacity.min(DEFAULT_CAPACITY)), capacity }
    }

    /// Append one detection, evicting the oldest entry if at capacity.
    pub fn record(&mut self, symbol: DetectedSymbol) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(symbol);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&DetectedSymbol> {
        self.entries.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DetectedSymbol> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Serialize the whole history to `path` as a JSON array,
    /// overwriting any previous content.
    ///
    /// A write failure leaves the in-memory history untouched; callers
    /// treat the error as a non-fatal warning.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("failed to create history file {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &self.entries)
            .with_context(|| format!("failed to write history to {}", path.display()))?;
        Ok(())
    }

    /// Append one detection and rewrite the whole history file in one
    /// step. The entry is recorded even when the write fails.
    pub fn record_and_save(&mut self, symbol: DetectedSymbol, path: &Path) -> Result<()> {
        self.record(symbol);
        self.save(path)
    }

    pub fn stats(&self) -> DetectionStats {
        DetectionStats::compute(self.entries.iter())
    }
}

impl Default for DetectionLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;

    use super::*;
    use crate::models::BoundingBox;
    use crate::symbology::Symbology;

    fn symbol(data: &str) -> DetectedSymbol {
        DetectedSymbol {
            data: data.to_string(),
            symbology: Symbology::Code128,
            rect: BoundingBox::new(0, 0, 80, 25),
            polygon: vec![],
            timestamp: OffsetDateTime::UNIX_EPOCH,
            confidence: 60,
            valid: true,
        }
    }

    #[test]
    fn records_in_order() {
        let mut log = DetectionLog::new();
        log.record(symbol("first"));
        log.record(symbol("second"));
        assert_eq!(log.len(), 2);
        assert_eq!(log.last().unwrap().data, "second");
    }

    #[test]
    fn capacity_evicts_oldest() {
        let mut log = DetectionLog::with_capacity(3);
        for data in ["a", "b", "c", "d"] {
            log.record(symbol(data));
        }
        assert_eq!(log.len(), 3);
        let datas: Vec<&str> = log.iter().map(|s| s.data.as_str()).collect();
        assert_eq!(datas, ["b", "c", "d"]);
    }

    #[test]
    fn zero_capacity_is_bumped_to_one() {
        let mut log = DetectionLog::with_capacity(0);
        log.record(symbol("only"));
        log.record(symbol("newer"));
        assert_eq!(log.len(), 1);
        assert_eq!(log.last().unwrap().data, "newer");
    }

    #[test]
    fn save_overwrites_with_full_history() -> anyhow::Result<()> {
        let dir = tempfile::TempDir::new()?;
        let path = dir.path().join("detections.json");

        let mut log = DetectionLog::new();
        log.record(symbol("first"));
        log.save(&path)?;
        log.record(symbol("second"));
        log.save(&path)?;

        let contents = std::fs::read_to_string(&path)?;
        let parsed: Vec<DetectedSymbol> = serde_json::from_str(&contents)?;
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1].data, "second");
        Ok(())
    }

    #[test]
    fn record_and_save_keeps_entry_on_write_failure() {
        let mut log = DetectionLog::new();
        let bogus = Path::new("/nonexistent-dir/detections.json");
        assert!(log.record_and_save(symbol("kept"), bogus).is_err());
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn save_failure_keeps_history_intact() {
        let mut log = DetectionLog::new();
        log.record(symbol("kept"));
        let bogus = Path::new("/nonexistent-dir/detections.json");
        assert!(log.save(bogus).is_err());
        assert_eq!(log.len(), 1);
    }
}
