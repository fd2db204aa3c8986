//! Immutable configuration snapshot for the stowage subsystem.
//!
//! The snapshot is built once by the config loading phase and shared
//! read-only afterwards. Components receive it explicitly; there is no
//! ambient global state.

/// Process-wide settings loaded from the `Global` section.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GlobalSettings {
    /// Atmospheric pressure above which an agent can breathe without a helmet.
    pub breathable_atmo_pressure: f32,
    /// Default body mass applied to the agent part definitions.
    pub agent_default_mass: f32,
    /// Enables the per-item debug context menu.
    pub item_debug: bool,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            breathable_atmo_pressure: 0.5,
            agent_default_mass: 0.094,
            item_debug: false,
        }
    }
}

/// Per-seat inventory defaults loaded from the `SeatInventory` section.
///
/// Applied to every seat inventory capability attached during the loader's
/// population phase, and to the agent EVA definitions directly.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SeatInventorySettings {
    pub slots_x: u8,
    pub slots_y: u8,
    pub slot_size: u16,
    pub max_volume: f32,
    pub inventory_key: String,
    pub right_hand_key: String,
    pub helmet_key: String,
    pub open_cue: String,
    pub close_cue: String,
}

impl Default for SeatInventorySettings {
    fn default() -> Self {
        Self {
            slots_x: 4,
            slots_y: 4,
            slot_size: 50,
            max_volume: 300.0,
            inventory_key: "tab".into(),
            right_hand_key: "x".into(),
            helmet_key: "j".into(),
            open_cue: "cues/containerOpen".into(),
            close_cue: "cues/containerClose".into(),
        }
    }
}

/// Agent pickup/drag defaults loaded from the `AgentPickup` section.
///
/// These are the values an equipped attach tool temporarily overrides; the
/// tool must restore the exact prior values on unequip.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PickupSettings {
    pub allow_part_attach: bool,
    pub allow_static_attach: bool,
    pub allow_part_stack: bool,
    pub max_distance: f32,
    pub grab_max_mass: f32,
    pub grab_key: String,
    pub attach_key: String,
    pub drop_cue: String,
    pub attach_part_cue: String,
    pub detach_part_cue: String,
    pub attach_static_cue: String,
    pub detach_static_cue: String,
}

impl Default for PickupSettings {
    fn default() -> Self {
        Self {
            allow_part_attach: false,
            allow_static_attach: false,
            allow_part_stack: false,
            max_distance: 2.0,
            grab_max_mass: 1.0,
            grab_key: "g".into(),
            attach_key: "h".into(),
            drop_cue: "cues/drop".into(),
            attach_part_cue: "cues/attachPart".into(),
            detach_part_cue: "cues/detachPart".into(),
            attach_static_cue: "cues/attachStatic".into(),
            detach_static_cue: "cues/detachStatic".into(),
        }
    }
}

/// The full configuration snapshot consumed by the stowage subsystem.
///
/// Loaded once, before bulk part content is instantiated, and read-only for
/// the rest of the process lifetime.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StowageConfig {
    pub global: GlobalSettings,
    pub seat_inventory: SeatInventorySettings,
    pub agent_pickup: PickupSettings,
    /// Item kind names that may stack even without a stackable module.
    pub stackable_kinds: Vec<String>,
    /// Part module names whose presence makes an item kind stackable.
    pub stackable_modules: Vec<String>,
}

impl StowageConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if the named kind is stackable under this configuration.
    pub fn is_stackable_kind(&self, kind: &str) -> bool {
        self.stackable_kinds.iter().any(|k| k == kind)
    }
}
