#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use jsmapper::{
    AbsoluteAxisCode, DeviceNamespace, EventSink, EventSource, EventType, InputEvent, KeyCode,
    NamedDevice, SynchronizationCode,
};

pub fn abs_event(axis: AbsoluteAxisCode, value: i32) -> InputEvent {
    InputEvent::new(EventType::ABSOLUTE, axis.0, value)
}

pub fn abs_x(values: &[i32]) -> Vec<InputEvent> {
    values
        .iter()
        .map(|&v| abs_event(AbsoluteAxisCode::ABS_X, v))
        .collect()
}

pub fn abs_y(values: &[i32]) -> Vec<InputEvent> {
    values
        .iter()
        .map(|&v| abs_event(AbsoluteAxisCode::ABS_Y, v))
        .collect()
}

pub fn key_event(key: KeyCode, key_state: i32) -> InputEvent {
    InputEvent::new(EventType::KEY, key.code(), key_state)
}

pub fn syn_report() -> InputEvent {
    InputEvent::new(
        EventType::SYNCHRONIZATION,
        SynchronizationCode::SYN_REPORT.0,
        0,
    )
}

/// What the virtual keyboard should receive for one key transition.
pub fn reported(key: KeyCode, key_state: i32) -> Vec<InputEvent> {
    vec![key_event(key, key_state), syn_report()]
}

/// Plays back a fixed list of events, then fails like a disconnected device.
pub struct ScriptedSource {
    events: VecDeque<InputEvent>,
}

impl ScriptedSource {
    pub fn new(events: impl IntoIterator<Item = InputEvent>) -> Self {
        ScriptedSource {
            events: events.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl EventSource for ScriptedSource {
    fn next_event(&mut self) -> io::Result<InputEvent> {
        self.events
            .pop_front()
            .ok_or_else(|| io::Error::from_raw_os_error(libc::ENODEV))
    }
}

/// Records every write; optionally starts failing after a number of successful writes.
#[derive(Default)]
pub struct RecordingSink {
    pub writes: Vec<Vec<InputEvent>>,
    pub fail_after: Option<usize>,
}

impl RecordingSink {
    pub fn failing_after(writes: usize) -> Self {
        RecordingSink {
            writes: Vec::new(),
            fail_after: Some(writes),
        }
    }

    pub fn events(&self) -> Vec<InputEvent> {
        self.writes.iter().flatten().copied().collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, events: &[InputEvent]) -> io::Result<()> {
        if self.fail_after == Some(self.writes.len()) {
            return Err(io::Error::from(io::ErrorKind::BrokenPipe));
        }
        self.writes.push(events.to_vec());
        Ok(())
    }
}

pub enum FakeEntry {
    Named(&'static str),
    Nameless,
    Unopenable,
}

/// An opened fake device; counts how many handles have been closed.
#[derive(Debug)]
pub struct FakeDevice {
    pub path: PathBuf,
    name: Option<String>,
    closed: Rc<Cell<usize>>,
}

impl NamedDevice for FakeDevice {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl Drop for FakeDevice {
    fn drop(&mut self) {
        self.closed.set(self.closed.get() + 1);
    }
}

/// A device directory held in memory. Entries enumerate in insertion order.
pub struct FakeNamespace {
    dir: PathBuf,
    entries: Vec<(PathBuf, FakeEntry)>,
    unavailable: bool,
    pub opened: RefCell<Vec<PathBuf>>,
    pub closed: Rc<Cell<usize>>,
}

impl FakeNamespace {
    pub fn new<P: AsRef<Path>>(entries: impl IntoIterator<Item = (P, FakeEntry)>) -> Self {
        let dir = PathBuf::from("/fake/input");
        FakeNamespace {
            entries: entries
                .into_iter()
                .map(|(file, entry)| (dir.join(file), entry))
                .collect(),
            dir,
            unavailable: false,
            opened: RefCell::new(Vec::new()),
            closed: Rc::new(Cell::new(0)),
        }
    }

    pub fn named(names: &[&'static str]) -> Self {
        Self::new(
            names
                .iter()
                .enumerate()
                .map(|(i, &name)| (format!("event{}", i), FakeEntry::Named(name))),
        )
    }

    pub fn unavailable() -> Self {
        FakeNamespace {
            unavailable: true,
            ..Self::new(Vec::<(&str, FakeEntry)>::new())
        }
    }
}

impl DeviceNamespace for FakeNamespace {
    type Device = FakeDevice;
    type Candidates = std::vec::IntoIter<PathBuf>;

    fn dir(&self) -> &Path {
        &self.dir
    }

    fn candidates(&self) -> io::Result<Self::Candidates> {
        if self.unavailable {
            return Err(io::Error::from(io::ErrorKind::PermissionDenied));
        }
        let paths: Vec<PathBuf> = self.entries.iter().map(|(p, _)| p.clone()).collect();
        Ok(paths.into_iter())
    }

    fn open(&self, path: &Path) -> io::Result<FakeDevice> {
        let (_, entry) = self
            .entries
            .iter()
            .find(|(p, _)| p == path)
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))?;
        let name = match entry {
            FakeEntry::Named(name) => Some(name.to_string()),
            FakeEntry::Nameless => None,
            FakeEntry::Unopenable => return Err(io::Error::from(io::ErrorKind::PermissionDenied)),
        };
        self.opened.borrow_mut().push(path.to_path_buf());
        Ok(FakeDevice {
            path: path.to_path_buf(),
            name,
            closed: Rc::clone(&self.closed),
        })
    }
}
