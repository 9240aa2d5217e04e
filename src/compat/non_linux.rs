//! FreeBSD and other non-Linux targets don't have these available in libc, because they're in
//! the "linux-like" impl directory. They are copied here so the crate still builds there.
//!
//! Only the evdev compatibility layers of the BSDs provide `/dev/input` and `/dev/uinput`.

#![allow(non_camel_case_types)]

pub const UINPUT_MAX_NAME_SIZE: usize = 80;

#[repr(C)]
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct input_event {
    pub time: libc::timeval,
    pub type_: u16,
    pub code: u16,
    pub value: i32,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct input_id {
    pub bustype: u16,
    pub vendor: u16,
    pub product: u16,
    pub version: u16,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct uinput_setup {
    pub id: input_id,
    pub name: [libc::c_char; UINPUT_MAX_NAME_SIZE],
    pub ff_effects_max: u32,
}
