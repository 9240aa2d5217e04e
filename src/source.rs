use std::fs::{File, OpenOptions};
use std::io;
use std::mem;
use std::os::unix::io::{AsRawFd, RawFd};
use std::path::{Path, PathBuf};

use crate::compat::input_event;
use crate::translate::EventSource;
use crate::{sys, InputEvent};

/// Upper bound for strings fetched through `EVIOCG*` ioctls, including the trailing NUL.
pub(crate) const NAME_CAPACITY: usize = 256;

const EVENT_BATCH_SIZE: usize = 32;

fn ioctl_get_cstring(
    f: unsafe fn(RawFd, &mut [u8]) -> nix::Result<libc::c_int>,
    fd: RawFd,
) -> Option<Vec<u8>> {
    let mut buf = vec![0; NAME_CAPACITY];
    match unsafe { f(fd, buf.as_mut_slice()) } {
        Ok(len) if len > 0 && len as usize <= buf.len() => {
            // The kernel reports the number of bytes copied, which includes the trailing \0
            // unless the string had to be cut short.
            buf.truncate(len as usize);
            if let Some(nul) = buf.iter().position(|&b| b == 0) {
                buf.truncate(nul);
            }
            Some(buf)
        }
        _ => None,
    }
}

fn bytes_into_string_lossy(v: Vec<u8>) -> String {
    String::from_utf8(v).unwrap_or_else(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
}

/// A physical input device opened read-only, used as the source of axis events.
///
/// Reads block until the kernel has events queued. The descriptor is closed when this value is
/// dropped.
#[derive(Debug)]
pub struct SourceDevice {
    file: File,
    path: PathBuf,
    name: Option<String>,
    event_buf: Vec<input_event>,
    index: usize,
}

impl SourceDevice {
    /// Opens a device, given its system path.
    ///
    /// Paths are typically something like `/dev/input/event0`.
    #[inline(always)]
    pub fn open(path: impl AsRef<Path>) -> io::Result<SourceDevice> {
        Self::_open(path.as_ref())
    }

    fn _open(path: &Path) -> io::Result<SourceDevice> {
        let file = OpenOptions::new().read(true).open(path)?;

        let name =
            ioctl_get_cstring(sys::eviocgname, file.as_raw_fd()).map(bytes_into_string_lossy);

        Ok(SourceDevice {
            file,
            path: path.to_path_buf(),
            name,
            event_buf: Vec::new(),
            index: 0,
        })
    }

    /// Returns the device's name as read from the kernel.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the path the device was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read a batch of events into the internal buffer. The descriptor is not O_NONBLOCK, so
    /// this blocks until at least one event is available.
    ///
    /// Returns the number of events that were read, or an error. End of file is reported as
    /// [`io::ErrorKind::UnexpectedEof`] since an event device never legitimately runs dry.
    fn fill_events(&mut self) -> io::Result<usize> {
        let fd = self.as_raw_fd();
        self.event_buf.reserve(EVENT_BATCH_SIZE);

        let spare_capacity = self.event_buf.spare_capacity_mut();
        let spare_capacity_size = mem::size_of_val(spare_capacity);

        // use libc::read instead of nix::unistd::read b/c we need to pass an uninitialized buf
        let res = unsafe { libc::read(fd, spare_capacity.as_mut_ptr() as _, spare_capacity_size) };
        let bytes_read = nix::errno::Errno::result(res)?;
        if bytes_read == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input device reported end of file",
            ));
        }
        let num_read = bytes_read as usize / mem::size_of::<input_event>();
        unsafe {
            let len = self.event_buf.len();
            self.event_buf.set_len(len + num_read);
        }
        Ok(num_read)
    }
}

impl EventSource for SourceDevice {
    fn next_event(&mut self) -> io::Result<InputEvent> {
        loop {
            if let Some(&ev) = self.event_buf.get(self.index) {
                self.index += 1;
                return Ok(InputEvent(ev));
            }

            self.event_buf.clear();
            self.index = 0;
            self.fill_events()?;
        }
    }
}

impl AsRawFd for SourceDevice {
    fn as_raw_fd(&self) -> RawFd {
        self.file.as_raw_fd()
    }
}
