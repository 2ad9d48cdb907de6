//! Blocking decode/dispatch loop

use crate::decoder::{PairDecoder, RawRecord};
use crate::device::{self, G600Device};
use crate::dispatch::Dispatcher;
use crate::error::Result;
use crate::executor::ActionExecutor;
use tracing::info;

/// Something that yields batches of raw records until it fails
pub trait EventSource {
    fn read_batch(&mut self) -> Result<Vec<RawRecord>>;
}

impl EventSource for G600Device {
    fn read_batch(&mut self) -> Result<Vec<RawRecord>> {
        G600Device::read_batch(self)
    }
}

/// Locate the G600 and take it over exclusively.
pub fn connect() -> Result<G600Device> {
    let path = device::find_g600()?;
    G600Device::open(&path)
}

/// Decode and dispatch forever. Only returns when the source fails.
pub fn run<S, E>(source: &mut S, dispatcher: &mut Dispatcher<'_, E>) -> Result<()>
where
    S: EventSource,
    E: ActionExecutor,
{
    let mut decoder = PairDecoder::new();
    info!("Processing events...");

    loop {
        let batch = source.read_batch()?;
        for transition in decoder.decode_batch(batch) {
            dispatcher.handle(transition);
        }
    }
}
