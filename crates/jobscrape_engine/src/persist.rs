use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use jobscrape_core::JobRecord;
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::export::encode_records;
use crate::timing::{system_clock, Clock};

/// Upper bound on `_N` suffixes tried before giving up on a file name.
const MAX_NAME_SUFFIX: u32 = 1_000;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("no free file name for {0} after {max} attempts", max = MAX_NAME_SUFFIX)]
    NameExhausted(String),
    #[error("csv encoding failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure output directory exists; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::OutputDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    }
    // Basic writability probe: try creating a temp file.
    NamedTempFile::new_in(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    Ok(())
}

/// Writes complete files into `dir` via a temp file and a rename, never
/// replacing a file that already exists.
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Write `content` to `{dir}/{stem}.{extension}`, or `{stem}_{n}.{extension}`
    /// for the first free `n` when the plain name is taken.
    pub fn write_new(
        &self,
        stem: &str,
        extension: &str,
        content: impl AsRef<[u8]>,
    ) -> Result<PathBuf, PersistError> {
        ensure_output_dir(&self.dir)?;

        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_ref())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        for suffix in 0..MAX_NAME_SUFFIX {
            let name = if suffix == 0 {
                format!("{stem}.{extension}")
            } else {
                format!("{stem}_{suffix}.{extension}")
            };
            let target = self.dir.join(name);
            match tmp.persist_noclobber(&target) {
                Ok(_) => return Ok(target),
                Err(err) if err.error.kind() == io::ErrorKind::AlreadyExists => {
                    tmp = err.file;
                }
                Err(err) => return Err(PersistError::Io(err.error)),
            }
        }
        Err(PersistError::NameExhausted(stem.to_string()))
    }
}

/// Durable destination for the records of one run.
pub trait RecordStore: Send + Sync {
    fn save(&self, records: &[JobRecord]) -> Result<PathBuf, PersistError>;
}

/// Stores records as `job_data_<YYYYMMDD_HHMMSS>.csv` in a fixed directory.
pub struct CsvRecordStore {
    dir: PathBuf,
    clock: Clock,
}

impl CsvRecordStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_clock(dir, system_clock())
    }

    pub fn with_clock(dir: impl Into<PathBuf>, clock: Clock) -> Self {
        Self {
            dir: dir.into(),
            clock,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl RecordStore for CsvRecordStore {
    fn save(&self, records: &[JobRecord]) -> Result<PathBuf, PersistError> {
        let stem = format!("job_data_{}", (self.clock)().format("%Y%m%d_%H%M%S"));
        let content = encode_records(records)?;
        AtomicFileWriter::new(self.dir.clone()).write_new(&stem, "csv", &content)
    }
}
