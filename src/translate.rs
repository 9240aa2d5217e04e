//! Turning a three-position joystick into arrow keys.
//!
//! Each monitored axis reports one of three positions: the minimum (0), the center (127) or the
//! maximum (255). An extreme position presses the arrow key for that side and remembers it; the
//! center position releases whichever key the axis last pressed. Every key event is followed by
//! a `SYN_REPORT` so the virtual keyboard never exposes a half-written state.
//!
//! The horizontal mapping is inverted with respect to the raw value (0 is right, 255 is left),
//! matching the polarity of the hardware this was written for.

use std::io;

use tracing::{debug, error};

use crate::error::TranslateError;
use crate::{AbsoluteAxisCode, Config, EventType, InputEvent, KeyCode, SynchronizationCode};

pub const AXIS_MIN: i32 = 0;
pub const AXIS_CENTER: i32 = 127;
pub const AXIS_MAX: i32 = 255;

/// Something that yields input events one at a time, blocking until the next is available.
pub trait EventSource {
    fn next_event(&mut self) -> io::Result<InputEvent>;
}

/// Something input events can be written to.
///
/// `emit` must deliver the whole slice or fail; the translator relies on a key event and its
/// `SYN_REPORT` arriving together.
pub trait EventSink {
    fn emit(&mut self, events: &[InputEvent]) -> io::Result<()>;
}

impl<T: EventSink + ?Sized> EventSink for &mut T {
    fn emit(&mut self, events: &[InputEvent]) -> io::Result<()> {
        (**self).emit(events)
    }
}

/// The keys the virtual keyboard can press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn key_code(self) -> KeyCode {
        match self {
            Direction::Up => KeyCode::KEY_UP,
            Direction::Down => KeyCode::KEY_DOWN,
            Direction::Left => KeyCode::KEY_LEFT,
            Direction::Right => KeyCode::KEY_RIGHT,
        }
    }
}

/// The two axes that are watched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub fn from_code(code: AbsoluteAxisCode) -> Option<Axis> {
        match code {
            AbsoluteAxisCode::ABS_X => Some(Axis::Horizontal),
            AbsoluteAxisCode::ABS_Y => Some(Axis::Vertical),
            _ => None,
        }
    }

    /// Keys pressed at the minimum and maximum raw value.
    fn extremes(self) -> (Direction, Direction) {
        match self {
            Axis::Horizontal => (Direction::Right, Direction::Left),
            Axis::Vertical => (Direction::Down, Direction::Up),
        }
    }
}

/// A change in the state of one virtual key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTransition {
    Press(Direction),
    Release(Direction),
}

impl KeyTransition {
    pub fn direction(self) -> Direction {
        match self {
            KeyTransition::Press(d) | KeyTransition::Release(d) => d,
        }
    }

    /// The key event followed by the report that publishes it.
    pub fn events(self) -> [InputEvent; 2] {
        let value = match self {
            KeyTransition::Press(_) => 1,
            KeyTransition::Release(_) => 0,
        };
        [
            InputEvent::new(EventType::KEY, self.direction().key_code().code(), value),
            InputEvent::new(
                EventType::SYNCHRONIZATION,
                SynchronizationCode::SYN_REPORT.0,
                0,
            ),
        ]
    }
}

/// The key each axis last pressed, if it has pressed one yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AxisState {
    horizontal: Option<Direction>,
    vertical: Option<Direction>,
}

impl AxisState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn held(&self, axis: Axis) -> Option<Direction> {
        match axis {
            Axis::Horizontal => self.horizontal,
            Axis::Vertical => self.vertical,
        }
    }

    fn slot_mut(&mut self, axis: Axis) -> &mut Option<Direction> {
        match axis {
            Axis::Horizontal => &mut self.horizontal,
            Axis::Vertical => &mut self.vertical,
        }
    }

    /// Feeds one sample for `axis` and returns the transition it causes, if any.
    ///
    /// An extreme sample replaces the held key without releasing the old one first. A center
    /// sample releases the last pressed key, every time; before the first press it does nothing.
    pub fn apply(&mut self, axis: Axis, value: i32) -> Option<KeyTransition> {
        let (at_min, at_max) = axis.extremes();
        let slot = self.slot_mut(axis);
        match value {
            AXIS_MIN => {
                *slot = Some(at_min);
                Some(KeyTransition::Press(at_min))
            }
            AXIS_MAX => {
                *slot = Some(at_max);
                Some(KeyTransition::Press(at_max))
            }
            AXIS_CENTER => slot.map(KeyTransition::Release),
            _ => None,
        }
    }
}

/// Pumps events from a source device into a virtual keyboard.
#[derive(Debug)]
pub struct Translator<S, K> {
    source: S,
    sink: K,
    state: AxisState,
    log_events: bool,
}

impl<S: EventSource, K: EventSink> Translator<S, K> {
    pub fn new(source: S, sink: K, config: &Config) -> Self {
        Translator {
            source,
            sink,
            state: AxisState::new(),
            log_events: config.logs_raw_events(),
        }
    }

    pub fn state(&self) -> &AxisState {
        &self.state
    }

    pub fn into_parts(self) -> (S, K) {
        (self.source, self.sink)
    }

    /// Dispatches a single input event, writing any resulting key transition to the sink.
    pub fn handle_event(
        &mut self,
        event: &InputEvent,
    ) -> Result<Option<KeyTransition>, TranslateError> {
        if self.log_events {
            debug!(
                "type {} code {} value {}",
                event.event_type().0,
                event.code(),
                event.value()
            );
        }

        if event.event_type() != EventType::ABSOLUTE {
            return Ok(None);
        }
        let Some(axis) = Axis::from_code(AbsoluteAxisCode(event.code())) else {
            return Ok(None);
        };

        let transition = self.state.apply(axis, event.value());
        if let Some(transition) = transition {
            self.sink
                .emit(&transition.events())
                .map_err(TranslateError::Emit)?;
        }
        Ok(transition)
    }

    /// Runs until the source fails to deliver an event.
    ///
    /// A read failure is logged and ends the run normally; there is no reconnect. A write
    /// failure is returned as an error.
    pub fn run(&mut self) -> Result<(), TranslateError> {
        loop {
            let event = match self.source.next_event() {
                Ok(event) => event,
                Err(e) => {
                    error!("failed to read input event: {}", e);
                    return Ok(());
                }
            };
            self.handle_event(&event)?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_polarity_is_inverted() {
        let mut state = AxisState::new();
        assert_eq!(
            state.apply(Axis::Horizontal, 0),
            Some(KeyTransition::Press(Direction::Right))
        );
        assert_eq!(
            state.apply(Axis::Horizontal, 255),
            Some(KeyTransition::Press(Direction::Left))
        );
        assert_eq!(state.held(Axis::Horizontal), Some(Direction::Left));
    }

    #[test]
    fn repeated_center_releases_last_key_again() {
        let mut state = AxisState::new();
        state.apply(Axis::Vertical, 0);
        state.apply(Axis::Vertical, 255);
        for _ in 0..2 {
            assert_eq!(
                state.apply(Axis::Vertical, 127),
                Some(KeyTransition::Release(Direction::Up))
            );
        }
        assert_eq!(state.held(Axis::Vertical), Some(Direction::Up));
    }

    #[test]
    fn center_before_any_press_is_a_no_op() {
        let mut state = AxisState::new();
        assert_eq!(state.apply(Axis::Horizontal, 127), None);
        assert_eq!(state, AxisState::new());
    }

    #[test]
    fn intermediate_values_are_ignored() {
        let mut state = AxisState::new();
        state.apply(Axis::Horizontal, 255);
        for value in [1, 64, 126, 128, 200, 254, 256, -1] {
            assert_eq!(state.apply(Axis::Horizontal, value), None);
        }
        assert_eq!(state.held(Axis::Horizontal), Some(Direction::Left));
    }

    #[test]
    fn axes_are_independent() {
        let mut state = AxisState::new();
        state.apply(Axis::Horizontal, 0);
        state.apply(Axis::Vertical, 255);
        assert_eq!(
            state.apply(Axis::Horizontal, 127),
            Some(KeyTransition::Release(Direction::Right))
        );
        assert_eq!(state.held(Axis::Vertical), Some(Direction::Up));
    }

    #[test]
    fn transition_events_end_with_report() {
        let [key, syn] = KeyTransition::Release(Direction::Down).events();
        assert_eq!(key.event_type(), EventType::KEY);
        assert_eq!(key.code(), KeyCode::KEY_DOWN.code());
        assert_eq!(key.value(), 0);
        assert_eq!(syn.event_type(), EventType::SYNCHRONIZATION);
        assert_eq!(syn.code(), SynchronizationCode::SYN_REPORT.0);
        assert_eq!(syn.value(), 0);
    }

    #[test]
    fn only_x_and_y_are_watched() {
        assert_eq!(Axis::from_code(AbsoluteAxisCode::ABS_X), Some(Axis::Horizontal));
        assert_eq!(Axis::from_code(AbsoluteAxisCode::ABS_Y), Some(Axis::Vertical));
        assert_eq!(Axis::from_code(AbsoluteAxisCode::ABS_HAT0X), None);
    }
}
