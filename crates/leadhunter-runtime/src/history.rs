//! History log implementations.

use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use leadhunter_core::{HistoryError, HistoryRecord, HistorySink, HISTORY_HEADERS};

/// Append-only CSV file with a header row.
///
/// The file and its header are created on first use. Appends from the same
/// process are serialized.
#[derive(Debug)]
pub struct CsvHistoryLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl CsvHistoryLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the file with its header row if it is missing or empty.
    pub fn ensure_header(&self) -> Result<(), HistoryError> {
        let _guard = self.lock.lock();
        self.ensure_header_locked()
    }

    fn ensure_header_locked(&self) -> Result<(), HistoryError> {
        let needs_header = match std::fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(e) if e.kind() == io::ErrorKind::NotFound => true,
            Err(e) => return Err(e.into()),
        };

        if needs_header {
            if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let mut writer = csv::Writer::from_path(&self.path)?;
            writer.write_record(HISTORY_HEADERS)?;
            writer.flush()?;
        }
        Ok(())
    }

    /// All records, oldest first. The header row is skipped.
    pub fn read_all(&self) -> Result<Vec<HistoryRecord>, HistoryError> {
        let _guard = self.lock.lock();
        self.ensure_header_locked()?;

        let mut reader = csv::Reader::from_path(&self.path)?;
        let records = reader
            .deserialize::<HistoryRecord>()
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// Copy the raw log, header included, into `out`.
    pub fn export_to<W: Write>(&self, out: &mut W) -> Result<(), HistoryError> {
        let _guard = self.lock.lock();
        self.ensure_header_locked()?;

        let mut contents = Vec::new();
        File::open(&self.path)?.read_to_end(&mut contents)?;
        out.write_all(&contents)?;
        Ok(())
    }
}

impl HistorySink for CsvHistoryLog {
    fn append(&self, record: &HistoryRecord) -> Result<(), HistoryError> {
        let _guard = self.lock.lock();
        self.ensure_header_locked()?;

        let file = OpenOptions::new().append(true).open(&self.path)?;
        let mut writer = csv::Writer::from_writer(file);
        writer.write_record(record.fields())?;
        writer.flush()?;
        Ok(())
    }
}

/// In-memory history, for embedding and tests.
#[derive(Debug, Default)]
pub struct MemoryHistory {
    records: Mutex<Vec<HistoryRecord>>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the records appended so far.
    pub fn records(&self) -> Vec<HistoryRecord> {
        self.records.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl HistorySink for MemoryHistory {
    fn append(&self, record: &HistoryRecord) -> Result<(), HistoryError> {
        self.records.lock().push(record.clone());
        Ok(())
    }
}
