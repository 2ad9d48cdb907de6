//! Two-layer command table
//!
//! Maps `(layer, scancode)` to an optional shell command, separately for
//! press and release. The table is parsed once from TOML and never mutated.

use crate::error::{ControllerError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Built-in table shipped with the binary
const DEFAULT_KEYMAP: &str = include_str!("default_keymap.toml");

/// G600 scancodes (after the usage page has been stripped)
pub mod buttons {
    pub const HWHEEL_LEFT: u16 = 4;
    pub const HWHEEL_RIGHT: u16 = 7;
    pub const MIDDLE_BUTTON: u16 = 11;
    pub const G9: u16 = 30;
    pub const G10: u16 = 31;
    pub const G11: u16 = 32;
    pub const G12: u16 = 33;
    pub const G13: u16 = 34;
    pub const G14: u16 = 35;
    pub const G15: u16 = 36;
    pub const G16: u16 = 37;
    pub const G17: u16 = 38;
    pub const G18: u16 = 39;
    pub const G19: u16 = 45;
    pub const G20: u16 = 46;
    pub const G_SHIFT: u16 = 55;

    /// Highest scancode the table can hold
    pub const MAX_BUTTON: u16 = G_SHIFT;

    pub const NAMED: [(&str, u16); 16] = [
        ("HWHEEL_LEFT", HWHEEL_LEFT),
        ("HWHEEL_RIGHT", HWHEEL_RIGHT),
        ("MIDDLE_BUTTON", MIDDLE_BUTTON),
        ("G9", G9),
        ("G10", G10),
        ("G11", G11),
        ("G12", G12),
        ("G13", G13),
        ("G14", G14),
        ("G15", G15),
        ("G16", G16),
        ("G17", G17),
        ("G18", G18),
        ("G19", G19),
        ("G20", G20),
        ("G_SHIFT", G_SHIFT),
    ];

    /// Resolve a button name or a decimal scancode
    pub fn parse(name: &str) -> Option<u16> {
        NAMED
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|&(_, code)| code)
            .or_else(|| name.parse().ok())
    }

    pub fn name(code: u16) -> Option<&'static str> {
        NAMED.iter().find(|&&(_, c)| c == code).map(|&(n, _)| n)
    }
}

/// Active G-Shift layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layer {
    #[default]
    Base = 0,
    Shifted = 1,
}

impl Layer {
    pub fn toggled(self) -> Self {
        match self {
            Layer::Base => Layer::Shifted,
            Layer::Shifted => Layer::Base,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Press,
    Release,
}

impl Edge {
    pub fn from_pressed(pressed: bool) -> Self {
        if pressed { Edge::Press } else { Edge::Release }
    }
}

/// On-disk shape of the table
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct KeymapFile {
    #[serde(default)]
    base: LayerFile,
    #[serde(default)]
    shifted: LayerFile,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct LayerFile {
    #[serde(default)]
    press: BTreeMap<String, String>,
    #[serde(default)]
    release: BTreeMap<String, String>,
}

/// Immutable `(layer, scancode) -> command` lookup for both edges
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandTable {
    press: [BTreeMap<u16, String>; 2],
    release: [BTreeMap<u16, String>; 2],
}

impl CommandTable {
    /// An empty table: every lookup is "no action"
    pub fn new() -> Self {
        Self::default()
    }

    /// The table compiled into the binary
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(DEFAULT_KEYMAP)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: KeymapFile =
            toml::from_str(content).map_err(|e| ControllerError::KeymapInvalid(e.to_string()))?;

        let mut table = Self::new();
        for (layer, layer_file) in [(Layer::Base, file.base), (Layer::Shifted, file.shifted)] {
            for (name, command) in layer_file.press {
                table.bind(layer, Edge::Press, &name, command)?;
            }
            for (name, command) in layer_file.release {
                table.bind(layer, Edge::Release, &name, command)?;
            }
        }
        Ok(table)
    }

    fn bind(&mut self, layer: Layer, edge: Edge, name: &str, command: String) -> Result<()> {
        let code = buttons::parse(name)
            .ok_or_else(|| ControllerError::KeymapInvalid(format!("unknown button '{name}'")))?;
        self.insert(layer, edge, code, command)
    }

    /// Add a binding. The G-Shift button and scancodes past `MAX_BUTTON` are rejected.
    pub fn insert(
        &mut self,
        layer: Layer,
        edge: Edge,
        scancode: u16,
        command: impl Into<String>,
    ) -> Result<()> {
        if scancode == buttons::G_SHIFT {
            return Err(ControllerError::KeymapInvalid(
                "G-Shift toggles layers and can't carry a command".to_string(),
            ));
        }
        if scancode > buttons::MAX_BUTTON {
            return Err(ControllerError::KeymapInvalid(format!(
                "scancode {scancode} is out of range (max {})",
                buttons::MAX_BUTTON
            )));
        }

        let slot = match edge {
            Edge::Press => &mut self.press[layer.index()],
            Edge::Release => &mut self.release[layer.index()],
        };
        slot.insert(scancode, command.into());
        Ok(())
    }

    pub fn lookup(&self, layer: Layer, edge: Edge, scancode: u16) -> Option<&str> {
        let slot = match edge {
            Edge::Press => &self.press[layer.index()],
            Edge::Release => &self.release[layer.index()],
        };
        slot.get(&scancode).map(String::as_str)
    }

    pub fn on_press(&self, layer: Layer, scancode: u16) -> Option<&str> {
        self.lookup(layer, Edge::Press, scancode)
    }

    pub fn on_release(&self, layer: Layer, scancode: u16) -> Option<&str> {
        self.lookup(layer, Edge::Release, scancode)
    }

    /// Number of bindings across both layers and edges
    pub fn len(&self) -> usize {
        self.press.iter().chain(&self.release).map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::buttons::*;
    use super::*;

    #[test]
    fn test_builtin_table_parses() {
        let table = CommandTable::builtin().unwrap();
        // 14 + 14 bindings on the base layer, 12 + 12 on the shifted one
        assert_eq!(table.len(), 52);
    }

    #[test]
    fn test_builtin_g9_bindings() {
        let table = CommandTable::builtin().unwrap();
        assert_eq!(table.on_press(Layer::Base, G9), Some("xdotool keydown 1"));
        assert_eq!(table.on_release(Layer::Base, G9), Some("xdotool keyup 1"));
        assert_eq!(table.on_press(Layer::Shifted, G9), Some("xdotool keydown Home"));
        assert_eq!(table.on_release(Layer::Shifted, G9), Some("xdotool keyup Home"));
    }

    #[test]
    fn test_builtin_shifted_gaps() {
        let table = CommandTable::builtin().unwrap();
        for code in [G18, G20] {
            assert!(table.on_press(Layer::Shifted, code).is_none());
            assert!(table.on_release(Layer::Shifted, code).is_none());
            assert!(table.on_press(Layer::Base, code).is_some());
        }
        assert!(table.on_press(Layer::Base, MIDDLE_BUTTON).is_none());
    }

    #[test]
    fn test_out_of_range_lookup_is_absent() {
        let table = CommandTable::builtin().unwrap();
        assert!(table.on_press(Layer::Base, 200).is_none());
        assert!(table.on_release(Layer::Shifted, u16::MAX).is_none());
    }

    #[test]
    fn test_new_table_is_empty() {
        let mut table = CommandTable::new();
        assert!(table.is_empty());
        assert!(!CommandTable::builtin().unwrap().is_empty());

        table.insert(Layer::Base, Edge::Press, G9, "true").unwrap();
        assert!(!table.is_empty());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_empty_command_is_not_absent() {
        let table = CommandTable::from_toml_str(
            r#"
[base.press]
G10 = ""
"#,
        )
        .unwrap();
        assert_eq!(table.on_press(Layer::Base, G10), Some(""));
        assert_eq!(table.on_release(Layer::Base, G10), None);
    }

    #[test]
    fn test_numeric_scancode_keys() {
        let table = CommandTable::from_toml_str(
            r#"
[shifted.release]
"40" = "notify-send hi"
"#,
        )
        .unwrap();
        assert_eq!(table.on_release(Layer::Shifted, 40), Some("notify-send hi"));
    }

    #[test]
    fn test_rejects_g_shift_binding() {
        let err = CommandTable::from_toml_str("[base.press]\nG_SHIFT = \"true\"\n").unwrap_err();
        assert!(matches!(err, ControllerError::KeymapInvalid(_)));
    }

    #[test]
    fn test_rejects_unknown_button_and_layer() {
        assert!(CommandTable::from_toml_str("[base.press]\nG99 = \"x\"\n").is_err());
        assert!(CommandTable::from_toml_str("[base.press]\n\"56\" = \"x\"\n").is_err());
        assert!(CommandTable::from_toml_str("[third.press]\nG9 = \"x\"\n").is_err());
    }

    #[test]
    fn test_button_names_round_trip() {
        for (name, code) in NAMED {
            assert_eq!(parse(name), Some(code));
            assert_eq!(super::buttons::name(code), Some(name));
        }
        assert_eq!(parse("g9"), Some(G9));
    }

    #[test]
    fn test_layer_toggle() {
        assert_eq!(Layer::Base.toggled(), Layer::Shifted);
        assert_eq!(Layer::Shifted.toggled(), Layer::Base);
        assert_eq!(Layer::default(), Layer::Base);
    }
}
