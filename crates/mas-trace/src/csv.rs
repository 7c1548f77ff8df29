//! CSV trace backend.
//!
//! One file, one row per object per notified tick:
//!
//! `time,id,kind,name,x,y,angle,speed`

use std::fs::File;
use std::path::Path;

use csv::Writer;
use mas_env::{EnvironmentEvent, EnvironmentListener};
use parking_lot::Mutex;

use crate::row::SnapshotRow;
use crate::{TraceError, TraceResult};

/// Writes every notified world snapshot to a CSV file.
///
/// Implements [`EnvironmentListener`], whose hook has no return value, so
/// write errors are stored internally.  After the run, check for them with
/// [`take_error`][Self::take_error]; only the first error is kept.
pub struct CsvTrace {
    writer: Mutex<Writer<File>>,
    last_error: Mutex<Option<TraceError>>,
}

impl CsvTrace {
    /// Create (or truncate) the trace file at `path` and write the header row.
    pub fn create(path: &Path) -> TraceResult<Self> {
        let mut writer = Writer::from_path(path)?;
        writer.write_record(["time", "id", "kind", "name", "x", "y", "angle", "speed"])?;
        Ok(Self {
            writer: Mutex::new(writer),
            last_error: Mutex::new(None),
        })
    }

    /// Take the stored write error (if any) after the run.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&self) -> Option<TraceError> {
        self.last_error.lock().take()
    }

    /// Flush buffered rows to disk.
    pub fn flush(&self) -> TraceResult<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    fn write_rows(&self, rows: &[SnapshotRow]) -> TraceResult<()> {
        let mut writer = self.writer.lock();
        for row in rows {
            writer.write_record(&[
                row.time.to_string(),
                row.id.to_string(),
                row.kind.to_string(),
                row.name.clone().unwrap_or_default(),
                row.x.to_string(),
                row.y.to_string(),
                row.angle.to_string(),
                row.speed.to_string(),
            ])?;
        }
        Ok(())
    }

    fn store_err(&self, result: TraceResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            let mut slot = self.last_error.lock();
            if slot.is_none() {
                *slot = Some(e);
            }
        }
    }
}

impl EnvironmentListener for CsvTrace {
    fn environment_changed(&self, event: &EnvironmentEvent) {
        let rows: Vec<SnapshotRow> = event
            .world
            .objects
            .iter()
            .map(|percept| SnapshotRow::new(event.time, percept))
            .collect();
        let result = self.write_rows(&rows);
        self.store_err(result);
    }
}
