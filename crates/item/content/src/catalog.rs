//! The loaded-part-definition catalog.
//!
//! Models this subsystem's view of the host's part list after bulk content
//! load: a read-only iteration surface for the population phase, plus the
//! mutation points it needs to attach inventory capabilities.

use item_core::{ItemKindSpec, PickupSettings, SeatInventorySettings};

/// Reserved agent part identifiers, handled by direct lookup rather than the
/// per-seat iteration.
pub const EVA_MALE: &str = "evaAgentMale";
pub const EVA_FEMALE: &str = "evaAgentFemale";
pub const EVA_VINTAGE: &str = "evaAgentVintage";

/// True for the agent's own EVA definitions, which never receive pod seat
/// inventories.
pub fn is_reserved_eva(name: &str) -> bool {
    matches!(name, EVA_MALE | EVA_FEMALE | EVA_VINTAGE)
}

/// What owns an inventory capability instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InventoryKind {
    /// Inventory bound to one passenger seat of a crewed part.
    Pod,
    /// Inventory of the agent itself.
    Eva,
    /// Free-standing container inventory.
    Container,
}

/// One inventory capability attached to a part definition.
#[derive(Clone, Debug, PartialEq)]
pub struct SeatInventory {
    pub kind: InventoryKind,
    /// Seat index for pod inventories; 0 for the others.
    pub seat: u32,
    pub settings: SeatInventorySettings,
}

/// One part definition as loaded by the host's bulk content loader.
#[derive(Clone, Debug)]
pub struct PartDefinition {
    pub name: String,
    pub crew_capacity: u32,
    /// Whether the host produced a usable prefab for this definition.
    /// Definitions without one cannot accept capability modules.
    pub has_prefab: bool,
    pub kind_spec: ItemKindSpec,
    pub inventories: Vec<SeatInventory>,
    /// Pickup configuration, present only on agent definitions.
    pub pickup: Option<PickupSettings>,
}

impl PartDefinition {
    pub fn new(name: impl Into<String>, crew_capacity: u32) -> Self {
        Self {
            name: name.into(),
            crew_capacity,
            has_prefab: true,
            kind_spec: ItemKindSpec::default(),
            inventories: Vec::new(),
            pickup: None,
        }
    }

    pub fn without_prefab(mut self) -> Self {
        self.has_prefab = false;
        self
    }
}

/// Errors from catalog mutation during the population phase.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("part definition '{0}' not found")]
    UnknownPart(String),
    #[error("part definition '{0}' has no prefab; cannot attach capability")]
    NoPrefab(String),
}

/// The ordered list of loaded part definitions.
///
/// Read-only to the stowage subsystem during population, except for the
/// capability attach points below.
#[derive(Debug, Default)]
pub struct PartCatalog {
    parts: Vec<PartDefinition>,
}

impl PartCatalog {
    pub fn new(parts: Vec<PartDefinition>) -> Self {
        Self { parts }
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Parts in host load order.
    pub fn iter(&self) -> impl Iterator<Item = &PartDefinition> {
        self.parts.iter()
    }

    pub fn get(&self, name: &str) -> Option<&PartDefinition> {
        self.parts.iter().find(|p| p.name == name)
    }

    /// Name and crew capacity of the definition at `index`, if valid.
    pub fn at(&self, index: usize) -> Option<&PartDefinition> {
        self.parts.get(index)
    }

    /// Replaces the catalog contents. Called once by the bulk content phase.
    pub fn set_parts(&mut self, parts: Vec<PartDefinition>) {
        self.parts = parts;
    }

    /// Attaches one pod inventory capability for the given seat.
    ///
    /// Fails when the definition is missing or has no prefab; the caller
    /// logs and continues with the remaining seats.
    pub fn attach_seat_inventory(
        &mut self,
        name: &str,
        seat: u32,
        settings: &SeatInventorySettings,
    ) -> Result<(), CatalogError> {
        let part = self
            .parts
            .iter_mut()
            .find(|p| p.name == name)
            .ok_or_else(|| CatalogError::UnknownPart(name.to_string()))?;
        if !part.has_prefab {
            return Err(CatalogError::NoPrefab(name.to_string()));
        }
        part.inventories.push(SeatInventory {
            kind: InventoryKind::Pod,
            seat,
            settings: settings.clone(),
        });
        Ok(())
    }

    /// Directly configures an agent EVA definition: one EVA inventory plus
    /// the agent pickup settings. Replaces any prior configuration.
    pub fn configure_eva(
        &mut self,
        name: &str,
        inventory: &SeatInventorySettings,
        pickup: &PickupSettings,
    ) -> Result<(), CatalogError> {
        let part = self
            .parts
            .iter_mut()
            .find(|p| p.name == name)
            .ok_or_else(|| CatalogError::UnknownPart(name.to_string()))?;
        part.inventories = vec![SeatInventory {
            kind: InventoryKind::Eva,
            seat: 0,
            settings: inventory.clone(),
        }];
        part.pickup = Some(pickup.clone());
        Ok(())
    }

    /// Total number of inventory capabilities attached across the catalog.
    pub fn total_inventories(&self) -> usize {
        self.parts.iter().map(|p| p.inventories.len()).sum()
    }
}
