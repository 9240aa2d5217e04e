//! The virtual keyboard, created through uinput.
//!
//! The device exists for as long as the [`VirtualKeyboard`] does; dropping it tears the device
//! down and closes the control handle.

use crate::compat::{uinput_setup, UINPUT_MAX_NAME_SIZE};
use crate::error::DeviceError;
use crate::translate::{Direction, EventSink};
use crate::{sys, BusType, EventType, InputEvent, InputId, KeyCode};
use libc::O_NONBLOCK;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::os::unix::{fs::OpenOptionsExt, io::AsRawFd};
use std::path::Path;

pub const UINPUT_PATH: &str = "/dev/uinput";
pub const DEVICE_NAME: &str = "jsmapper";
pub const DEVICE_ID: InputId = InputId::new(BusType::BUS_USB, 0x00dd, 0x0001, 1);

#[derive(Debug)]
pub struct VirtualKeyboardBuilder<'a> {
    file: File,
    name: &'a str,
    id: Option<InputId>,
}

impl<'a> VirtualKeyboardBuilder<'a> {
    pub fn new() -> Result<Self, DeviceError> {
        Self::open(UINPUT_PATH)
    }

    /// Opens an alternative uinput control node.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DeviceError> {
        let path = path.as_ref();
        let mut options = OpenOptions::new();

        // Open in write-only, in nonblocking mode.
        let file = options
            .write(true)
            .custom_flags(O_NONBLOCK)
            .open(path)
            .map_err(|source| DeviceError::Uinput {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(VirtualKeyboardBuilder {
            file,
            name: DEVICE_NAME,
            id: None,
        })
    }

    pub fn name(mut self, name: &'a str) -> Self {
        self.name = name;
        self
    }

    pub fn input_id(mut self, id: InputId) -> Self {
        self.id = Some(id);
        self
    }

    /// Registers key events and each of `keys` as capabilities of the device.
    pub fn with_keys(self, keys: &[KeyCode]) -> Result<Self, DeviceError> {
        // Run ioctls for setting capability bits
        unsafe {
            sys::ui_set_evbit(
                self.file.as_raw_fd(),
                EventType::KEY.0 as nix::sys::ioctl::ioctl_param_type,
            )
        }
        .map_err(|e| DeviceError::Register {
            what: "EV_KEY",
            source: e.into(),
        })?;

        for key in keys {
            unsafe {
                sys::ui_set_keybit(
                    self.file.as_raw_fd(),
                    key.code() as nix::sys::ioctl::ioctl_param_type,
                )
            }
            .map_err(|e| DeviceError::Register {
                what: "key code",
                source: e.into(),
            })?;
        }

        Ok(self)
    }

    pub fn build(self) -> Result<VirtualKeyboard, DeviceError> {
        let usetup = uinput_setup {
            id: *self.id.unwrap_or(DEVICE_ID).as_ref(),
            name: encode_name(self.name).map_err(DeviceError::Setup)?,
            ff_effects_max: 0,
        };

        VirtualKeyboard::new(self.file, usetup)
    }
}

/// Copies `name` into the fixed, NUL-terminated field uinput expects, cutting it short if needed.
fn encode_name(name: &str) -> io::Result<[libc::c_char; UINPUT_MAX_NAME_SIZE]> {
    if name.as_bytes().contains(&0) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "device name contains a NUL byte",
        ));
    }
    let mut out = [0 as libc::c_char; UINPUT_MAX_NAME_SIZE];
    for (dst, &src) in out
        .iter_mut()
        .zip(name.as_bytes().iter().take(UINPUT_MAX_NAME_SIZE - 1))
    {
        *dst = src as libc::c_char;
    }
    Ok(out)
}

/// A live uinput keyboard.
#[derive(Debug)]
pub struct VirtualKeyboard {
    file: File,
}

impl VirtualKeyboard {
    /// Creates the keyboard this tool drives: the four arrow keys, named `jsmapper`, on the
    /// USB bus with vendor 0x00dd and product 0x0001.
    pub fn directional() -> Result<Self, DeviceError> {
        Self::directional_from(VirtualKeyboardBuilder::new()?)
    }

    /// Same as [`VirtualKeyboard::directional`], using another uinput node.
    pub fn directional_at(path: impl AsRef<Path>) -> Result<Self, DeviceError> {
        Self::directional_from(VirtualKeyboardBuilder::open(path)?)
    }

    fn directional_from(builder: VirtualKeyboardBuilder<'_>) -> Result<Self, DeviceError> {
        let keys: Vec<KeyCode> = Direction::ALL.iter().map(|d| d.key_code()).collect();
        builder
            .name(DEVICE_NAME)
            .input_id(DEVICE_ID)
            .with_keys(&keys)?
            .build()
    }

    fn new(file: File, usetup: uinput_setup) -> Result<Self, DeviceError> {
        unsafe { sys::ui_dev_setup(file.as_raw_fd(), &usetup) }
            .map_err(|e| DeviceError::Setup(e.into()))?;
        unsafe { sys::ui_dev_create(file.as_raw_fd()) }
            .map_err(|e| DeviceError::Create(e.into()))?;

        Ok(VirtualKeyboard { file })
    }
}

impl EventSink for VirtualKeyboard {
    /// Writes `events` verbatim in a single call. Callers supply their own `SYN_REPORT`.
    fn emit(&mut self, events: &[InputEvent]) -> io::Result<()> {
        let bytes = unsafe { crate::cast_to_bytes(events) };
        self.file.write_all(bytes)
    }
}

impl Drop for VirtualKeyboard {
    fn drop(&mut self) {
        let _ = unsafe { sys::ui_dev_destroy(self.file.as_raw_fd()) };
    }
}
