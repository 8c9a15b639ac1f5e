//! Destinations for a [FieldCodePayload].
//!
//! A sink is acquired with [PayloadSink::open], which returns a [SinkSession]. The
//! session holds the destination until it is dropped, so every exit path (including
//! a failed delivery) releases it. Both buffers are delivered by one call; a
//! session either stores both or reports an error.

use crate::error::SinkError;
use crate::rtf::FieldCodePayload;
use fs2::FileExt;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File name of the RTF payload in a [DirectorySink].
pub const RTF_FILE_NAME: &str = "citation.rtf";
/// File name of the UTF-16LE text payload in a [DirectorySink].
pub const TEXT_FILE_NAME: &str = "citation.txt";
/// Lock file held while a [DirectorySink] session is open.
///
/// The lock is an OS file lock, so a host that dies mid-session leaves no stale lock
/// behind even if the file itself remains.
pub const LOCK_FILE_NAME: &str = ".citation.lock";

/// An acquired destination.
pub trait SinkSession {
    /// Replace the destination's content with both buffers of `payload`.
    fn deliver(&mut self, payload: &FieldCodePayload) -> Result<(), SinkError>;
}

/// Something that can accept payloads, one session at a time.
pub trait PayloadSink {
    /// Acquire the destination.
    fn open(&mut self) -> Result<Box<dyn SinkSession + '_>, SinkError>;
}

/// In-memory sink that keeps every delivered payload.
#[derive(Debug, Default)]
pub struct MemorySink {
    delivered: Vec<FieldCodePayload>,
    opened: usize,
    released: usize,
    unavailable: Option<String>,
    reject_deliveries: bool,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose [PayloadSink::open] always fails with [SinkError::Unavailable].
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            unavailable: Some(reason.into()),
            ..Self::default()
        }
    }

    /// A sink that opens, but fails every delivery.
    #[must_use]
    pub fn rejecting() -> Self {
        Self {
            reject_deliveries: true,
            ..Self::default()
        }
    }

    pub fn delivered(&self) -> &[FieldCodePayload] {
        &self.delivered
    }

    /// The most recently delivered payload.
    pub fn last(&self) -> Option<&FieldCodePayload> {
        self.delivered.last()
    }

    /// Number of sessions opened so far.
    pub fn opened(&self) -> usize {
        self.opened
    }

    /// Whether every opened session has been released.
    pub fn is_released(&self) -> bool {
        self.opened == self.released
    }
}

impl PayloadSink for MemorySink {
    fn open(&mut self) -> Result<Box<dyn SinkSession + '_>, SinkError> {
        if let Some(reason) = &self.unavailable {
            return Err(SinkError::Unavailable(reason.clone()));
        }
        self.opened += 1;
        Ok(Box::new(MemorySession { sink: self }))
    }
}

struct MemorySession<'a> {
    sink: &'a mut MemorySink,
}

impl SinkSession for MemorySession<'_> {
    fn deliver(&mut self, payload: &FieldCodePayload) -> Result<(), SinkError> {
        if self.sink.reject_deliveries {
            return Err(SinkError::Unavailable("delivery rejected".to_string()));
        }
        self.sink.delivered.push(payload.clone());
        Ok(())
    }
}

impl Drop for MemorySession<'_> {
    fn drop(&mut self) {
        self.sink.released += 1;
    }
}

/// Sink writing [RTF_FILE_NAME] and [TEXT_FILE_NAME] into a directory.
///
/// A session holds an exclusive lock on [LOCK_FILE_NAME] in the directory, so two
/// hosts writing to the same directory never interleave; the second gets
/// [SinkError::Busy]. A delivery that fails part way restores the previous pair.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn rtf_path(&self) -> PathBuf {
        self.dir.join(RTF_FILE_NAME)
    }

    pub fn text_path(&self) -> PathBuf {
        self.dir.join(TEXT_FILE_NAME)
    }
}

impl PayloadSink for DirectorySink {
    fn open(&mut self) -> Result<Box<dyn SinkSession + '_>, SinkError> {
        if !self.dir.is_dir() {
            return Err(SinkError::Unavailable(format!(
                "{} is not a directory",
                self.dir.display()
            )));
        }
        let lock_path = self.dir.join(LOCK_FILE_NAME);
        let lock = File::create(&lock_path)?;
        lock.try_lock_exclusive().map_err(|e| {
            if e.kind() == ErrorKind::WouldBlock {
                SinkError::Busy
            } else {
                SinkError::Io(e)
            }
        })?;
        debug!("Acquired {}", lock_path.display());
        Ok(Box::new(DirectorySession {
            sink: self,
            _lock: lock,
            lock_path,
        }))
    }
}

struct DirectorySession<'a> {
    sink: &'a DirectorySink,
    /// Unlocked by the OS when closed.
    _lock: File,
    lock_path: PathBuf,
}

/// `path` with `suffix` appended to its file name.
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

fn remove_quietly(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => warn!("Failed to remove {}: {e}", path.display()),
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), SinkError> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    Ok(())
}

impl DirectorySession<'_> {
    /// Move both staged files into place, keeping the previous RTF aside until the
    /// text file has been replaced too.
    fn swap_in(
        &self,
        payload: &FieldCodePayload,
        rtf_staged: &Path,
        text_staged: &Path,
    ) -> Result<(), SinkError> {
        let rtf_path = self.sink.rtf_path();
        let text_path = self.sink.text_path();
        write_file(rtf_staged, &payload.rtf)?;
        write_file(text_staged, &payload.text)?;

        let backup = with_suffix(&rtf_path, ".bak");
        let had_rtf = rtf_path.is_file();
        if had_rtf {
            fs::rename(&rtf_path, &backup)?;
        }
        let restore = || {
            let restored = if had_rtf {
                fs::rename(&backup, &rtf_path)
            } else {
                fs::remove_file(&rtf_path)
            };
            if let Err(e) = restored {
                warn!("Failed to restore {}: {e}", rtf_path.display());
            }
        };

        if let Err(e) = fs::rename(rtf_staged, &rtf_path) {
            if had_rtf {
                restore();
            }
            return Err(e.into());
        }
        if let Err(e) = fs::rename(text_staged, &text_path) {
            restore();
            return Err(e.into());
        }
        if had_rtf {
            remove_quietly(&backup);
        }
        Ok(())
    }
}

impl SinkSession for DirectorySession<'_> {
    fn deliver(&mut self, payload: &FieldCodePayload) -> Result<(), SinkError> {
        let rtf_staged = with_suffix(&self.sink.rtf_path(), ".tmp");
        let text_staged = with_suffix(&self.sink.text_path(), ".tmp");
        let result = self.swap_in(payload, &rtf_staged, &text_staged);
        if result.is_err() {
            remove_quietly(&rtf_staged);
            remove_quietly(&text_staged);
        }
        result
    }
}

impl Drop for DirectorySession<'_> {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.lock_path) {
            debug!("Failed to remove {}: {e}", self.lock_path.display());
        }
    }
}
