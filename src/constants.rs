/// Declares the named constants of a kernel code newtype and a `Debug` impl that prints them
/// by name.
macro_rules! evdev_enum {
    ($t:ty, $($(#[$attr:meta])* $c:ident = $val:expr,)*) => {
        impl $t {
            $($(#[$attr])* pub const $c: Self = Self($val);)*
        }
        impl std::fmt::Debug for $t {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                #[allow(unreachable_patterns)]
                match *self {
                    $(Self::$c => f.pad(stringify!($c)),)*
                    _ => write!(f, "unknown {}: {}", stringify!($t), self.0),
                }
            }
        }
    }
}

/// Event types supported by the device.
///
/// Only the types this tool reads or writes are named; anything else still round-trips through
/// the raw `u16`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventType(pub u16);

evdev_enum!(
    EventType,
    /// A bookkeeping event. Usually not important to applications.
    SYNCHRONIZATION = 0x00,
    /// A key changed state. A key, or button, is usually a momentary switch (in the circuit sense).
    /// There are events for when keys are pressed (become down) and released (become up).
    KEY = 0x01,
    /// Movement on a relative axis, e.g. mouse movement or scroll wheels.
    RELATIVE = 0x02,
    /// Movement on an absolute axis. Used for things such as touch events and joysticks.
    ABSOLUTE = 0x03,
    /// Miscellaneous events that don't fall into other categories.
    MISC = 0x04,
);

/// Subtypes of [`EventType::SYNCHRONIZATION`].
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SynchronizationCode(pub u16);

evdev_enum!(
    SynchronizationCode,
    /// Terminates a packet of events from the device.
    SYN_REPORT = 0,
);

/// Key codes, as found in `include/uapi/linux/input-event-codes.h`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyCode(pub u16);

impl KeyCode {
    #[inline]
    pub const fn code(self) -> u16 {
        self.0
    }
}

evdev_enum!(
    KeyCode,
    KEY_UP = 103,
    KEY_LEFT = 105,
    KEY_RIGHT = 106,
    KEY_DOWN = 108,
    BTN_TRIGGER = 0x120,
);

/// Absolute axis codes.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AbsoluteAxisCode(pub u16);

evdev_enum!(
    AbsoluteAxisCode,
    ABS_X = 0x00,
    ABS_Y = 0x01,
    ABS_Z = 0x02,
    ABS_HAT0X = 0x10,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_names_known_codes() {
        assert_eq!(format!("{:?}", KeyCode::KEY_LEFT), "KEY_LEFT");
        assert_eq!(format!("{:?}", EventType::ABSOLUTE), "ABSOLUTE");
        assert_eq!(format!("{:?}", AbsoluteAxisCode(0x28)), "unknown AbsoluteAxisCode: 40");
        assert_eq!(format!("{:?}", KeyCode(0x130)), "unknown KeyCode: 304");
        assert_eq!(format!("{:?}", SynchronizationCode(3)), "unknown SynchronizationCode: 3");
    }

    #[test]
    fn directional_key_codes_match_kernel() {
        assert_eq!(KeyCode::KEY_UP.code(), 103);
        assert_eq!(KeyCode::KEY_DOWN.code(), 108);
        assert_eq!(KeyCode::KEY_LEFT.code(), 105);
        assert_eq!(KeyCode::KEY_RIGHT.code(), 106);
    }
}
