//! Raw evdev record decoding
//!
//! The G600 keyboard interface reports every side button as two consecutive
//! records: an `EV_MSC/MSC_SCAN` carrying the HID usage, immediately followed
//! by the `EV_KEY` carrying the button state. Sync records (and anything else)
//! are interleaved between pairs and must be skipped.

use evdev::{EventType, InputEvent};

/// `MSC_SCAN` code within the `EV_MSC` class
pub const MSC_SCAN: u16 = 0x04;

/// HID usage page bits the device ORs into every scancode
pub const SCANCODE_OFFSET_MASK: i32 = 0x70000;

/// One fixed-size record from the device stream, stripped to what decoding needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawRecord {
    pub kind: u16,
    pub code: u16,
    pub value: i32,
}

impl RawRecord {
    pub fn new(kind: EventType, code: u16, value: i32) -> Self {
        Self {
            kind: kind.0,
            code,
            value,
        }
    }

    /// `EV_MSC/MSC_SCAN` record carrying a raw scancode
    pub fn scan(raw_scancode: i32) -> Self {
        Self::new(EventType::MISC, MSC_SCAN, raw_scancode)
    }

    /// `EV_KEY` state record
    pub fn key(code: u16, value: i32) -> Self {
        Self::new(EventType::KEY, code, value)
    }

    /// `EV_SYN/SYN_REPORT`
    pub fn sync() -> Self {
        Self::new(EventType::SYNCHRONIZATION, 0, 0)
    }

    fn is_scan(&self) -> bool {
        self.kind == EventType::MISC.0 && self.code == MSC_SCAN
    }

    fn is_key_state(&self) -> bool {
        self.kind == EventType::KEY.0
    }
}

impl From<InputEvent> for RawRecord {
    fn from(ev: InputEvent) -> Self {
        Self::new(ev.event_type(), ev.code(), ev.value())
    }
}

/// A decoded button transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub scancode: u16,
    /// Repeats (value 2) also surface as pressed
    pub pressed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum PairState {
    #[default]
    AwaitingScan,
    AwaitingState(i32),
}

/// Pairs `MSC_SCAN` records with the `EV_KEY` record that follows them.
///
/// The pending half of a pair survives across batches, so the decoder works on
/// any chunking of the stream.
#[derive(Debug, Default)]
pub struct PairDecoder {
    state: PairState,
}

impl PairDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one record; returns a transition when it completes a pair.
    pub fn push(&mut self, record: RawRecord) -> Option<Transition> {
        match self.state {
            PairState::AwaitingScan => {
                if record.is_scan() {
                    self.state = PairState::AwaitingState(record.value);
                }
                None
            }
            PairState::AwaitingState(raw) => {
                if record.is_key_state() {
                    self.state = PairState::AwaitingScan;
                    Some(Transition {
                        scancode: strip_offset(raw),
                        pressed: record.value != 0,
                    })
                } else if record.is_scan() {
                    self.state = PairState::AwaitingState(record.value);
                    None
                } else {
                    self.state = PairState::AwaitingScan;
                    None
                }
            }
        }
    }

    /// Decode a whole batch, in order.
    pub fn decode_batch<I>(&mut self, batch: I) -> Vec<Transition>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        batch.into_iter().filter_map(|r| self.push(r)).collect()
    }
}

fn strip_offset(raw: i32) -> u16 {
    // Anything left above 16 bits isn't a G600 button; let the table lookup miss.
    u16::try_from(raw & !SCANCODE_OFFSET_MASK).unwrap_or(u16::MAX)
}
