use crate::compat::uinput_setup;
use nix::{ioctl_none, ioctl_read_buf, ioctl_write_int, ioctl_write_ptr};

ioctl_read_buf!(eviocgname, b'E', 0x06, u8);

const UINPUT_IOCTL_BASE: u8 = b'U';
ioctl_none!(ui_dev_create, UINPUT_IOCTL_BASE, 1);
ioctl_none!(ui_dev_destroy, UINPUT_IOCTL_BASE, 2);
ioctl_write_ptr!(ui_dev_setup, UINPUT_IOCTL_BASE, 3, uinput_setup);

ioctl_write_int!(ui_set_evbit, UINPUT_IOCTL_BASE, 100);
ioctl_write_int!(ui_set_keybit, UINPUT_IOCTL_BASE, 101);
