//! Semantic action events from the pickup/drag controller.
//!
//! The router is pure dispatch: it holds no state beyond the mapping from
//! action token to state-machine transition.

use crate::item::{AttachEffect, ItemState};
use crate::types::PartId;

/// The closed vocabulary of pickup/drag notifications.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
pub enum ItemAction {
    /// The item was put back into a container.
    Store,
    /// A drag gesture ended with the item dropped.
    DropEnd,
    /// An attach gesture began.
    AttachStart,
    /// An attach gesture completed.
    AttachEnd,
}

/// One notification from the pickup subsystem.
///
/// `target_part` is absent when the gesture targets open ground/world and
/// present when the item lands on another structure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionEvent {
    pub action: ItemAction,
    pub target_part: Option<PartId>,
}

impl ActionEvent {
    pub fn new(action: ItemAction, target_part: Option<PartId>) -> Self {
        Self {
            action,
            target_part,
        }
    }
}

/// Routes one action event into the item's state machine.
///
/// Items whose static-attach policy is disabled ignore the whole vocabulary.
/// Store/DropEnd/AttachStart release any ground anchor first: the item must
/// be free of the world before it can be re-stored or a new attach gesture
/// can begin. AttachEnd anchors to the world only when there is no
/// structural target.
pub fn route_action(state: &mut ItemState, event: ActionEvent) -> Option<AttachEffect> {
    if !state.attach_mode().allows_attach() {
        return None;
    }
    match event.action {
        ItemAction::Store | ItemAction::DropEnd | ItemAction::AttachStart => {
            state.request_ground_detach()
        }
        ItemAction::AttachEnd => match event.target_part {
            None => state.request_ground_attach(),
            // The item becomes part of another structure; no ground anchor.
            Some(_) => None,
        },
    }
}
