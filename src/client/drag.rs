//! Drag Interaction Controller
//!
//! Turns drag gestures into store moves. The gesture layer (pointer,
//! keyboard, tests) attaches JSON metadata to draggables and drop zones;
//! it is decoded once into [`DragPayload`] / [`DropTarget`] and the rest of
//! the controller works on those types only.
//!
//! - `drag_over` performs cross-list card relocations live, so the card
//!   already sits in the hovered list while the drag continues.
//! - `drag_end` performs the final placement, including same-list reorders
//!   and list moves.
//! - `drag_cancel` clears the gesture without touching the store.
//!
//! Both return once the move is applied locally; the batch request runs on
//! a spawned task and its result comes back through the [`Dispatch`].
//! Malformed metadata, unknown ids and unchanged positions all end in a
//! no-op. Nothing here returns an error to the gesture layer.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::store::{BoardSnapshot, BoardStore, CardMove, Dispatch, ListMove, MoveCommand};
use crate::shared::{BoardId, CardId, ListId, SharedError};

/// What is being dragged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DragPayload {
    List { id: ListId },
    Card { id: CardId },
}

impl DragPayload {
    pub fn decode(data: &Value) -> Result<Self, SharedError> {
        Self::deserialize(data).map_err(|e| SharedError::validation("drag", e.to_string()))
    }
}

/// A drop zone reported under the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DropTarget {
    Card { id: CardId },
    List { id: ListId },
    Board { id: BoardId },
}

impl DropTarget {
    pub fn decode(data: &Value) -> Result<Self, SharedError> {
        Self::deserialize(data).map_err(|e| SharedError::validation("drop", e.to_string()))
    }

    /// Higher wins between targets at the same depth
    fn specificity(&self) -> u8 {
        match self {
            Self::Card { .. } => 2,
            Self::List { .. } => 1,
            Self::Board { .. } => 0,
        }
    }

    fn accepts(&self, active: &DragPayload) -> bool {
        match (active, self) {
            (DragPayload::Card { .. }, Self::Card { .. } | Self::List { .. }) => true,
            (DragPayload::List { .. }, Self::List { .. }) => true,
            _ => false,
        }
    }
}

/// Raw drop zone metadata with its nesting depth (board 0, list 1, card 2)
#[derive(Debug, Clone, PartialEq)]
pub struct DropCandidate {
    pub data: Value,
    pub depth: u32,
}

impl DropCandidate {
    pub fn new(data: Value, depth: u32) -> Self {
        Self { data, depth }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragStage {
    Over,
    End,
}

/// Pick the innermost target the active item may land on
///
/// Candidates that fail to decode are skipped.
pub fn resolve_target(active: &DragPayload, candidates: &[DropCandidate]) -> Option<DropTarget> {
    candidates
        .iter()
        .filter_map(|candidate| {
            DropTarget::decode(&candidate.data)
                .ok()
                .filter(|target| target.accepts(active))
                .map(|target| (candidate.depth, target.specificity(), target))
        })
        .max_by_key(|(depth, specificity, _)| (*depth, *specificity))
        .map(|(_, _, target)| target)
}

/// Translate a resolved gesture into a store command
///
/// Returns `None` for unknown ids, unchanged positions, and same-list or
/// list moves reported by `drag_over`.
pub fn plan_move(
    snapshot: &BoardSnapshot,
    active: &DragPayload,
    target: &DropTarget,
    stage: DragStage,
) -> Option<MoveCommand> {
    match (*active, *target) {
        (DragPayload::Card { id: card_id }, DropTarget::Card { id: over_id }) => {
            if card_id == over_id {
                return None;
            }
            let (source_list_id, source_index) = snapshot.locate_card(card_id)?;
            let (dest_list_id, dest_index) = snapshot.locate_card(over_id)?;
            card_command(card_id, source_list_id, source_index, dest_list_id, dest_index, stage)
        }
        (DragPayload::Card { id: card_id }, DropTarget::List { id: dest_list_id }) => {
            let (source_list_id, source_index) = snapshot.locate_card(card_id)?;
            let len = snapshot.cards(dest_list_id)?.len();
            // append; within its own list the card is one of the `len`
            let dest_index = if dest_list_id == source_list_id { len - 1 } else { len };
            card_command(card_id, source_list_id, source_index, dest_list_id, dest_index, stage)
        }
        (DragPayload::List { id: list_id }, DropTarget::List { id: over_id }) => {
            if stage != DragStage::End || list_id == over_id {
                return None;
            }
            let source_index = snapshot.list_index(list_id)?;
            let dest_index = snapshot.list_index(over_id)?;
            Some(MoveCommand::List(ListMove {
                list_id,
                source_index,
                dest_index,
            }))
        }
        _ => None,
    }
}

fn card_command(
    card_id: CardId,
    source_list_id: ListId,
    source_index: usize,
    dest_list_id: ListId,
    dest_index: usize,
    stage: DragStage,
) -> Option<MoveCommand> {
    let same_list = source_list_id == dest_list_id;
    if same_list && (stage == DragStage::Over || source_index == dest_index) {
        return None;
    }
    Some(MoveCommand::Card(CardMove {
        card_id,
        source_list_id,
        dest_list_id,
        source_index,
        dest_index,
    }))
}

/// Gesture state for one board view
#[derive(Debug)]
pub struct DragController {
    store: Arc<BoardStore>,
    active: Option<DragPayload>,
}

impl DragController {
    pub fn new(store: Arc<BoardStore>) -> Self {
        Self { store, active: None }
    }

    pub fn active(&self) -> Option<DragPayload> {
        self.active
    }

    /// Record what is being dragged; malformed metadata leaves no drag active
    pub fn drag_start(&mut self, data: &Value) -> Option<DragPayload> {
        self.active = match DragPayload::decode(data) {
            Ok(payload) => Some(payload),
            Err(e) => {
                tracing::warn!("Ignoring drag with invalid metadata: {}", e);
                None
            }
        };
        self.active
    }

    pub async fn drag_over(&mut self, candidates: &[DropCandidate]) -> Dispatch {
        match self.active {
            Some(active) => self.route(active, candidates, DragStage::Over).await,
            None => Dispatch::Noop,
        }
    }

    /// Final placement; the drag is over afterwards
    pub async fn drag_end(&mut self, candidates: &[DropCandidate]) -> Dispatch {
        match self.active.take() {
            Some(active) => self.route(active, candidates, DragStage::End).await,
            None => Dispatch::Noop,
        }
    }

    pub fn drag_cancel(&mut self) {
        if let Some(active) = self.active.take() {
            tracing::debug!("Drag of {:?} cancelled", active);
        }
    }

    async fn route(&self, active: DragPayload, candidates: &[DropCandidate], stage: DragStage) -> Dispatch {
        let Some(target) = resolve_target(&active, candidates) else {
            return Dispatch::Noop;
        };
        let snapshot = self.store.snapshot().await;
        match plan_move(&snapshot, &active, &target, stage) {
            Some(command) => {
                tracing::debug!("{:?} of {:?} over {:?} -> {:?}", stage, active, target, command);
                self.store.dispatch(command).await
            }
            None => Dispatch::Noop,
        }
    }
}
