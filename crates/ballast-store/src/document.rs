use std::fmt;
use std::fs::{File, OpenOptions, create_dir_all};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use ballast_core::Dataset;

use crate::capability::{Capability, CapabilitySource};
use crate::error::{StoreError, StoreResult};

/// Gateway to the single persisted dataset document.
///
/// Both operations are whole-document on purpose. The document is the unit
/// of storage, every read parses all of it and every write rewrites all of
/// it. There is no locking and no concurrency token: concurrent writers
/// race at document granularity and the later rename wins.
pub struct DocumentStore {
    path: PathBuf,
    capability: Box<dyn CapabilitySource>,
}

impl DocumentStore {
    pub fn new(path: impl Into<PathBuf>, capability: impl CapabilitySource + 'static) -> Self {
        Self {
            path: path.into(),
            capability: Box::new(capability),
        }
    }

    /// Document location on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current capability, re-evaluated from the source on every call.
    pub fn capability(&self) -> Capability {
        self.capability.current()
    }

    /// Read and parse the entire document.
    pub fn read_all(&self) -> StoreResult<Dataset> {
        if !self.capability().can_read() {
            return Err(StoreError::Unavailable);
        }

        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(self.path.clone()));
            }
            Err(err) => return Err(StoreError::ReadFailed(err)),
        };

        let reader = BufReader::new(file);
        let dataset: Dataset = serde_json::from_reader(reader).map_err(|err| {
            if err.is_io() {
                StoreError::ReadFailed(err.into())
            } else {
                StoreError::Corrupt(err)
            }
        })?;

        debug!(records = dataset.len(), path = %self.path.display(), "dataset document read");
        Ok(dataset)
    }

    /// Serialize and replace the entire document, returning the bytes
    /// written.
    ///
    /// The document streams through a temp file and renames over the
    /// target, so a failed write leaves any previous document untouched and
    /// readers never observe a half-written array.
    pub fn write_all(&self, dataset: &Dataset) -> StoreResult<u64> {
        let capability = self.capability();
        if !capability.can_write() {
            return Err(StoreError::PermissionDenied(capability));
        }

        let bytes = write_document_atomic(&self.path, dataset).map_err(StoreError::WriteFailed)?;
        info!(
            records = dataset.len(),
            bytes,
            path = %self.path.display(),
            "dataset document written"
        );
        Ok(bytes)
    }
}

impl fmt::Debug for DocumentStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentStore")
            .field("path", &self.path)
            .field("capability", &self.capability())
            .finish()
    }
}

fn write_document_atomic(path: &Path, dataset: &Dataset) -> io::Result<u64> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)?;
        }
    }

    let tmp_path = temp_path(path)?;
    let file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(&tmp_path)?;

    // Streaming serialization keeps the in-memory dataset the only full
    // copy of the document.
    let mut writer = CountingWriter::new(BufWriter::new(file));
    serde_json::to_writer(&mut writer, dataset).map_err(io::Error::from)?;
    writer.flush()?;
    let bytes = writer.bytes_written();

    let file = writer
        .into_inner()
        .into_inner()
        .map_err(|err| err.into_error())?;
    file.sync_all()?;
    drop(file);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            sync_dir(parent)?;
        }
    }

    std::fs::rename(&tmp_path, path)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            sync_dir(parent)?;
        }
    }

    Ok(bytes)
}

fn temp_path(path: &Path) -> io::Result<PathBuf> {
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "document path has no file name",
        )
    })?;
    let tmp_name = format!("{}.tmp", file_name.to_string_lossy());
    Ok(path.with_file_name(tmp_name))
}

fn sync_dir(path: &Path) -> io::Result<()> {
    let dir = OpenOptions::new().read(true).open(path)?;
    dir.sync_all()
}

struct CountingWriter<W: Write> {
    inner: W,
    bytes: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, bytes: 0 }
    }

    fn bytes_written(&self) -> u64 {
        self.bytes
    }

    fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let size = self.inner.write(buf)?;
        self.bytes = self.bytes.saturating_add(size as u64);
        Ok(size)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
