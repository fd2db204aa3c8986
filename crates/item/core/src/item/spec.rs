//! Per-kind item configuration.
//!
//! An [`ItemKindSpec`] is loaded once per item kind and never mutated
//! afterwards. Runtime state lives in [`super::ItemState`].

/// Specifies how an item kind can be attached.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemAttachMode {
    /// Not initialized. Special value, treated as [`ItemAttachMode::Disabled`]
    /// by every guard.
    Unknown,
    /// The item cannot be attached.
    #[default]
    Disabled,
    /// The item can be attached with bare hands. No tool skill is checked.
    AllowedAlways,
    /// The item can be attached only while an attach tool is equipped. The
    /// tool may apply extra limitations on the attach action.
    AllowedWithTool,
}

impl ItemAttachMode {
    /// True when the mode permits attaching at all.
    pub fn allows_attach(self) -> bool {
        matches!(self, Self::AllowedAlways | Self::AllowedWithTool)
    }
}

/// Immutable per-kind configuration for a portable item.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ItemKindSpec {
    /// Policy for attaching the item to another structural part.
    pub part_attach: ItemAttachMode,
    /// Policy for anchoring the item to terrain or the static world frame.
    pub static_attach: ItemAttachMode,
    /// Load threshold for the ground anchor joint.
    pub static_attach_break_force: f32,
    /// Torque threshold for the ground anchor joint. Defaults to the break
    /// force when not configured separately.
    pub static_attach_break_torque: Option<f32>,
    /// The item attaches to the agent's model and reacts to the use key.
    pub equippable: bool,
    /// The item is carried on the agent's body without occupying a slot.
    pub carriable: bool,
    /// Equip slot name (e.g. "rightHand", "jetpack").
    pub equip_slot: String,
    pub stackable: bool,
    /// Overrides the computed stowage volume when positive.
    pub volume_override: f32,
    pub usable_from_eva: bool,
    pub usable_from_container: bool,
    pub usable_from_pod: bool,
    pub usable_from_editor: bool,
    /// Cue played when the item is moved between slots.
    pub move_cue: String,
}

impl Default for ItemKindSpec {
    fn default() -> Self {
        Self {
            part_attach: ItemAttachMode::AllowedWithTool,
            static_attach: ItemAttachMode::Disabled,
            static_attach_break_force: 10.0,
            static_attach_break_torque: None,
            equippable: false,
            carriable: false,
            equip_slot: String::new(),
            stackable: false,
            volume_override: 0.0,
            usable_from_eva: false,
            usable_from_container: false,
            usable_from_pod: false,
            usable_from_editor: false,
            move_cue: "cues/itemMove".into(),
        }
    }
}

impl ItemKindSpec {
    /// Effective torque threshold for the anchor joint.
    pub fn break_torque(&self) -> f32 {
        self.static_attach_break_torque
            .unwrap_or(self.static_attach_break_force)
    }
}
