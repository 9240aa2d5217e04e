//! Joystick-to-arrow-key translation for Linux.
//!
//! Some joysticks and arcade sticks only report their position on two absolute axes, with each
//! axis sitting at one of three values: fully one way, centered, or fully the other way. This
//! crate turns that stream into arrow-key presses on a virtual keyboard, so programs that only
//! understand keyboard input can be driven by the stick.
//!
//! There are two halves:
//!
//! - [`Locator`] searches `/dev/input` for the first `event*` node whose advertised name matches
//!   a shell glob, and hands back the opened [`SourceDevice`].
//! - [`Translator`] reads [`InputEvent`]s from the source, tracks which key each axis is holding
//!   in an [`AxisState`], and writes key presses and releases to a [`VirtualKeyboard`].
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use jsmapper::{Config, DevInput, Locator, Translator, VirtualKeyboard};
//!
//! let config = Config::new("*Pad*").with_verbosity(1);
//! let source = Locator::new(DevInput::new(), &config).find()?;
//! let keyboard = VirtualKeyboard::directional()?;
//! Translator::new(source, keyboard, &config).run()?;
//! # Ok(())
//! # }
//! ```
//!
//! Both halves are generic over small traits ([`DeviceNamespace`], [`EventSource`] and
//! [`EventSink`]) so they can be exercised without real hardware.

#![cfg(any(unix, target_os = "android"))]

// has to be first for its macro
#[macro_use]
mod constants;

mod compat;
mod config;
mod error;
mod inputid;
pub mod locate;
mod source;
mod sys;
pub mod translate;
pub mod uinput;

use std::fmt;

use crate::compat::input_event;

pub use crate::config::Config;
pub use crate::constants::*;
pub use crate::error::{DeviceError, LocateError, TranslateError};
pub use crate::inputid::*;
pub use crate::locate::{DevInput, DeviceNamespace, Locator, NamePattern, NamedDevice};
pub use crate::source::SourceDevice;
pub use crate::translate::{
    Axis, AxisState, Direction, EventSink, EventSource, KeyTransition, Translator,
};
pub use crate::uinput::{VirtualKeyboard, VirtualKeyboardBuilder};

/// A wrapped `input_event` returned by the input device via the kernel.
///
/// `input_event` is a struct containing four fields:
/// - `time: timeval`
/// - `type_: u16`
/// - `code: u16`
/// - `value: s32`
///
/// The meaning of the "code" and "value" fields will depend on the underlying type of event.
#[derive(Copy, Clone, PartialEq, Eq)]
#[repr(transparent)]
pub struct InputEvent(pub(crate) input_event);

impl InputEvent {
    /// Create a new InputEvent with a zero timestamp; the kernel stamps events written to
    /// uinput itself.
    pub fn new(type_: EventType, code: u16, value: i32) -> Self {
        InputEvent(input_event {
            time: libc::timeval {
                tv_sec: 0,
                tv_usec: 0,
            },
            type_: type_.0,
            code,
            value,
        })
    }

    /// Returns the type of event this describes, e.g. Key, Switch, etc.
    #[inline]
    pub fn event_type(&self) -> EventType {
        EventType(self.0.type_)
    }

    /// Returns the raw "code" field directly from input_event.
    #[inline]
    pub fn code(&self) -> u16 {
        self.0.code
    }

    /// Returns the raw "value" field directly from input_event.
    ///
    /// For keys 1 means pressed, 0 released and 2 an autorepeat.
    /// For axes, the values depend on the hardware and driver implementation.
    #[inline]
    pub fn value(&self) -> i32 {
        self.0.value
    }
}

impl From<input_event> for InputEvent {
    fn from(raw: input_event) -> Self {
        Self(raw)
    }
}

impl AsRef<input_event> for InputEvent {
    fn as_ref(&self) -> &input_event {
        &self.0
    }
}

impl fmt::Debug for InputEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut debug = f.debug_struct("InputEvent");
        debug.field("type", &self.event_type());
        match self.event_type() {
            EventType::KEY => debug.field("code", &KeyCode(self.code())),
            EventType::ABSOLUTE => debug.field("code", &AbsoluteAxisCode(self.code())),
            EventType::SYNCHRONIZATION => debug.field("code", &SynchronizationCode(self.code())),
            _ => debug.field("code", &self.code()),
        };
        debug.field("value", &self.value()).finish()
    }
}

/// Crawls `/dev/input` for a device whose name matches `pattern`.
///
/// Shorthand for [`Locator::find`] over [`DevInput`].
pub fn locate(config: &Config) -> Result<SourceDevice, LocateError> {
    Locator::new(DevInput::new(), config).find()
}

/// Reinterprets a slice of plain-old-data as its bytes.
///
/// # Safety
///
/// `T` must have no padding bytes.
pub(crate) unsafe fn cast_to_bytes<T: ?Sized>(mem: &T) -> &[u8] {
    std::slice::from_raw_parts(mem as *const T as *const u8, std::mem::size_of_val(mem))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn events_cast_to_kernel_layout() {
        let events = KeyTransition::Press(Direction::Left).events();
        let bytes = unsafe { cast_to_bytes(&events[..]) };
        assert_eq!(bytes.len(), 2 * std::mem::size_of::<input_event>());
    }

    #[test]
    fn debug_names_codes_by_type() {
        let ev = InputEvent::new(EventType::ABSOLUTE, AbsoluteAxisCode::ABS_Y.0, 255);
        assert_eq!(
            format!("{:?}", ev),
            "InputEvent { type: ABSOLUTE, code: ABS_Y, value: 255 }"
        );
    }
}
