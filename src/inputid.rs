use crate::compat::input_id;
use std::fmt;

/// Bus type and vendor/product/version identifiers a device advertises to the kernel.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct InputId(pub(crate) input_id);

impl From<input_id> for InputId {
    #[inline]
    fn from(id: input_id) -> Self {
        Self(id)
    }
}
impl AsRef<input_id> for InputId {
    #[inline]
    fn as_ref(&self) -> &input_id {
        &self.0
    }
}

impl InputId {
    pub fn bus_type(&self) -> BusType {
        BusType(self.0.bustype)
    }
    pub fn vendor(&self) -> u16 {
        self.0.vendor
    }
    pub fn product(&self) -> u16 {
        self.0.product
    }
    pub fn version(&self) -> u16 {
        self.0.version
    }

    /// Create a new InputId, used to describe the virtual keyboard.
    pub const fn new(bus_type: BusType, vendor: u16, product: u16, version: u16) -> Self {
        Self(input_id {
            bustype: bus_type.0,
            vendor,
            product,
            version,
        })
    }
}

impl PartialEq for InputId {
    fn eq(&self, other: &Self) -> bool {
        self.0.bustype == other.0.bustype
            && self.0.vendor == other.0.vendor
            && self.0.product == other.0.product
            && self.0.version == other.0.version
    }
}
impl Eq for InputId {}

impl fmt::Debug for InputId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("InputId")
            .field("bus_type", &self.bus_type())
            .field("vendor", &format_args!("{:#x}", self.vendor()))
            .field("product", &format_args!("{:#x}", self.product()))
            .field("version", &format_args!("{:#x}", self.version()))
            .finish()
    }
}

#[derive(Copy, Clone, PartialEq, Eq)]
pub struct BusType(pub u16);

evdev_enum!(
    BusType,
    BUS_USB = 0x03,
);

impl fmt::Display for BusType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Self::BUS_USB => f.write_str("USB"),
            _ => write!(f, "bus {:#x}", self.0),
        }
    }
}
