//! G-Shift aware dispatch of decoded transitions

use crate::decoder::Transition;
use crate::executor::ActionExecutor;
use crate::keymap::{CommandTable, Edge, Layer, buttons};
use tracing::{debug, warn};

/// Holds the G-Shift layer and the last non-shift button seen.
///
/// Only one held button is tracked. If several are down when G-Shift flips,
/// only the most recent one follows the layer change.
pub struct Dispatcher<'a, E: ActionExecutor> {
    table: &'a CommandTable,
    executor: E,
    layer: Layer,
    last_scancode: u16,
    last_pressed: bool,
}

impl<'a, E: ActionExecutor> Dispatcher<'a, E> {
    pub fn new(table: &'a CommandTable, executor: E) -> Self {
        Self {
            table,
            executor,
            layer: Layer::Base,
            last_scancode: 0,
            last_pressed: false,
        }
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    /// Last non-shift button and whether it's still down
    pub fn last_button(&self) -> (u16, bool) {
        (self.last_scancode, self.last_pressed)
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn executor_mut(&mut self) -> &mut E {
        &mut self.executor
    }

    pub fn handle(&mut self, transition: Transition) {
        if transition.scancode == buttons::G_SHIFT {
            self.handle_shift(transition.pressed);
            return;
        }

        self.last_scancode = transition.scancode;
        self.last_pressed = transition.pressed;

        let edge = Edge::from_pressed(transition.pressed);
        self.run(self.layer, edge, transition.scancode);
    }

    fn handle_shift(&mut self, pressed: bool) {
        debug!("g-shift {}", if pressed { "on" } else { "off" });

        if !self.last_pressed {
            self.layer = self.layer.toggled();
            return;
        }

        // Move the held button over to the new layer so nothing stays stuck down.
        self.run(self.layer, Edge::Release, self.last_scancode);
        self.layer = self.layer.toggled();
        self.run(self.layer, Edge::Press, self.last_scancode);
    }

    fn run(&mut self, layer: Layer, edge: Edge, scancode: u16) {
        let Some(command) = self.table.lookup(layer, edge, scancode) else {
            return;
        };

        let button = buttons::name(scancode).unwrap_or("unnamed");
        debug!(button, "Executing: \"{}\"", command);
        if let Err(e) = self.executor.execute(command) {
            warn!("Command failed to start: {e:#}");
        }
    }
}
