//! Finding the source device by name.
//!
//! The locator walks a device namespace in enumeration order, opens every candidate and returns
//! the first one whose advertised name matches a shell glob. Non-matching handles are dropped
//! (closed) before moving on.

use std::ffi::CString;
use std::fs::{self, ReadDir};
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::FileTypeExt;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::LocateError;
use crate::{Config, SourceDevice};

/// Directory the kernel populates with evdev nodes.
pub const DEV_INPUT_DIR: &str = "/dev/input";
/// Only nodes whose file name starts with this are considered.
pub const CANDIDATE_PREFIX: &str = "event";

/// An opened device that can report the name it advertises.
pub trait NamedDevice {
    fn name(&self) -> Option<&str>;
}

impl NamedDevice for SourceDevice {
    fn name(&self) -> Option<&str> {
        SourceDevice::name(self)
    }
}

/// A place devices can be discovered and opened from.
pub trait DeviceNamespace {
    type Device: NamedDevice;
    type Candidates: Iterator<Item = PathBuf>;

    /// The directory being searched, for diagnostics.
    fn dir(&self) -> &Path;

    /// Lists candidate paths in enumeration order.
    fn candidates(&self) -> io::Result<Self::Candidates>;

    /// Opens one candidate for reading.
    fn open(&self, path: &Path) -> io::Result<Self::Device>;
}

/// The real `/dev/input` namespace.
#[derive(Debug, Clone)]
pub struct DevInput {
    dir: PathBuf,
}

impl DevInput {
    pub fn new() -> Self {
        Self::with_dir(DEV_INPUT_DIR)
    }

    /// Search some other directory laid out like `/dev/input`.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        DevInput { dir: dir.into() }
    }
}

impl Default for DevInput {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceNamespace for DevInput {
    type Device = SourceDevice;
    type Candidates = Candidates;

    fn dir(&self) -> &Path {
        &self.dir
    }

    fn candidates(&self) -> io::Result<Candidates> {
        Ok(Candidates {
            readdir: fs::read_dir(&self.dir)?,
        })
    }

    fn open(&self, path: &Path) -> io::Result<SourceDevice> {
        SourceDevice::open(path)
    }
}

/// Character devices named `event*`, in the order the directory yields them.
///
/// Entries that fail to read are skipped.
#[derive(Debug)]
pub struct Candidates {
    readdir: ReadDir,
}

impl Iterator for Candidates {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        loop {
            let Ok(entry) = self.readdir.next()? else {
                continue;
            };
            let is_char_device = entry
                .file_type()
                .map(|ty| ty.is_char_device())
                .unwrap_or(false);
            let name = entry.file_name();
            if is_char_device && name.as_bytes().starts_with(CANDIDATE_PREFIX.as_bytes()) {
                return Some(entry.path());
            }
        }
    }
}

/// A device-name pattern, matched with `fnmatch(3)` and no flags.
///
/// Matching is case-sensitive, `*` crosses `/` and leading dots, `\` escapes the next
/// character and a `[` without its `]` is an ordinary character. A pattern or name with an
/// interior NUL never matches.
#[derive(Debug, Clone)]
pub struct NamePattern {
    pattern: Option<CString>,
}

impl NamePattern {
    pub fn new(pattern: &str) -> Self {
        NamePattern {
            pattern: CString::new(pattern).ok(),
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        let (Some(pattern), Ok(name)) = (&self.pattern, CString::new(name)) else {
            return false;
        };
        unsafe { libc::fnmatch(pattern.as_ptr(), name.as_ptr(), 0) == 0 }
    }
}

/// Searches a [`DeviceNamespace`] for the first device whose name matches the configured
/// pattern.
#[derive(Debug)]
pub struct Locator<N> {
    namespace: N,
    pattern: String,
    matcher: NamePattern,
    log_match: bool,
}

impl<N: DeviceNamespace> Locator<N> {
    pub fn new(namespace: N, config: &Config) -> Self {
        Locator {
            namespace,
            pattern: config.pattern.clone(),
            matcher: NamePattern::new(&config.pattern),
            log_match: config.logs_matched_device(),
        }
    }

    pub fn namespace(&self) -> &N {
        &self.namespace
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns the first candidate, in enumeration order, whose name matches the pattern.
    ///
    /// Candidates that can't be opened are skipped. A device whose name can't be read never
    /// matches.
    pub fn find(&self) -> Result<N::Device, LocateError> {
        let candidates = self
            .namespace
            .candidates()
            .map_err(|source| LocateError::Namespace {
                dir: self.namespace.dir().to_path_buf(),
                source,
            })?;

        for path in candidates {
            let device = match self.namespace.open(&path) {
                Ok(device) => device,
                Err(e) => {
                    debug!("skipping {}: {}", path.display(), e);
                    continue;
                }
            };

            if device.name().map_or(false, |name| self.matcher.matches(name)) {
                if self.log_match {
                    info!("found device {}", path.display());
                }
                return Ok(device);
            }
            debug!("{}: {:?} does not match", path.display(), device.name());
        }

        Err(LocateError::NotFound {
            pattern: self.pattern.clone(),
        })
    }
}
