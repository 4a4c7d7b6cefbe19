//! Optimistic Board Store
//!
//! Holds the session view of one board: the ordered lists and, per list,
//! the ordered cards. Moves run in two phases:
//!
//! 1. [`BoardStore::apply_local`] computes the next snapshot synchronously
//!    from the current one and commits it, so the view shows the move at
//!    once. It also derives the batch request: the full renumbering of
//!    every touched sibling set.
//! 2. [`BoardStore::persist`] sends that batch. On failure the store
//!    reloads the authoritative board and pushes an error notice.
//!
//! [`BoardStore::dispatch`] runs the second phase on a spawned task so
//! gesture handling never waits on the network.
//!
//! Snapshots share unchanged sibling sequences through `Arc`; a move only
//! copies the one or two sequences it touches.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::client::api::BoardBackend;
use crate::client::error::ClientError;
use crate::client::notice::{Notice, NoticeBoard};
use crate::shared::{
    BatchOrderItem, BatchOrderRequest, BoardId, Card, CardId, EntityKind, List, ListId, ListWithCards,
};

/// Relocate one card, possibly into another list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardMove {
    pub card_id: CardId,
    pub source_list_id: ListId,
    pub dest_list_id: ListId,
    pub source_index: usize,
    pub dest_index: usize,
}

/// Relocate one list within the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListMove {
    pub list_id: ListId,
    pub source_index: usize,
    pub dest_index: usize,
}

/// A move the drag controller asks the store to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveCommand {
    Card(CardMove),
    List(ListMove),
}

/// Result of planning a move against a snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovePlan {
    /// Source and destination are the same position
    Noop,
    /// The move references ids or positions no longer in the snapshot
    Stale,
    Apply {
        snapshot: BoardSnapshot,
        request: BatchOrderRequest,
    },
}

/// Immutable view of a board's lists and cards
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardSnapshot {
    lists: Arc<Vec<List>>,
    cards: HashMap<ListId, Arc<Vec<Card>>>,
}

impl BoardSnapshot {
    /// Build from a server read, sorting both levels by `order`
    ///
    /// Ties keep creation order, then id, like the server's read path.
    pub fn from_lists(lists_with_cards: Vec<ListWithCards>) -> Self {
        let mut lists = Vec::with_capacity(lists_with_cards.len());
        let mut cards = HashMap::with_capacity(lists_with_cards.len());

        for ListWithCards { list, cards: mut list_cards } in lists_with_cards {
            list_cards.sort_by(|a, b| (a.order, a.created_at, a.id).cmp(&(b.order, b.created_at, b.id)));
            cards.insert(list.id, Arc::new(list_cards));
            lists.push(list);
        }
        lists.sort_by(|a, b| (a.order, a.created_at, a.id).cmp(&(b.order, b.created_at, b.id)));

        Self {
            lists: Arc::new(lists),
            cards,
        }
    }

    pub fn lists(&self) -> &[List] {
        &self.lists
    }

    /// Cards of a list in display order
    pub fn cards(&self, list_id: ListId) -> Option<&[Card]> {
        self.cards.get(&list_id).map(|cards| cards.as_slice())
    }

    pub fn contains_list(&self, list_id: ListId) -> bool {
        self.cards.contains_key(&list_id)
    }

    pub fn list_index(&self, list_id: ListId) -> Option<usize> {
        self.lists.iter().position(|l| l.id == list_id)
    }

    /// Parent list and index of a card
    pub fn locate_card(&self, card_id: CardId) -> Option<(ListId, usize)> {
        self.lists.iter().find_map(|list| {
            self.cards
                .get(&list.id)
                .and_then(|cards| cards.iter().position(|c| c.id == card_id))
                .map(|index| (list.id, index))
        })
    }

    pub fn to_lists_with_cards(&self) -> Vec<ListWithCards> {
        self.lists
            .iter()
            .map(|list| ListWithCards {
                list: list.clone(),
                cards: self.cards(list.id).map(<[Card]>::to_vec).unwrap_or_default(),
            })
            .collect()
    }

    /// Plan either kind of move
    pub fn apply(&self, command: &MoveCommand) -> MovePlan {
        match command {
            MoveCommand::Card(mv) => self.apply_card_move(mv),
            MoveCommand::List(mv) => self.apply_list_move(mv),
        }
    }

    /// Remove the card at `source_index` and insert it at `dest_index`
    ///
    /// `dest_index` is clamped to the destination length. Every card of the
    /// touched list(s) is renumbered to its new index, and the batch lists
    /// the source list's cards followed by the destination list's.
    pub fn apply_card_move(&self, mv: &CardMove) -> MovePlan {
        let (Some(source), Some(dest)) = (self.cards(mv.source_list_id), self.cards(mv.dest_list_id)) else {
            return MovePlan::Stale;
        };
        if source.get(mv.source_index).map(|c| c.id) != Some(mv.card_id) {
            return MovePlan::Stale;
        }

        let same_list = mv.source_list_id == mv.dest_list_id;
        let dest_index = if same_list {
            mv.dest_index.min(source.len() - 1)
        } else {
            mv.dest_index.min(dest.len())
        };
        if same_list && dest_index == mv.source_index {
            return MovePlan::Noop;
        }

        let mut next = self.clone();

        let mut source_cards = source.to_vec();
        let mut card = source_cards.remove(mv.source_index);

        let mut items;
        if same_list {
            source_cards.insert(dest_index, card);
            renumber_cards(&mut source_cards);
            items = card_items(&source_cards, mv.source_list_id);
        } else {
            card.list_id = mv.dest_list_id;
            let mut dest_cards = dest.to_vec();
            dest_cards.insert(dest_index, card);
            renumber_cards(&mut source_cards);
            renumber_cards(&mut dest_cards);

            items = card_items(&source_cards, mv.source_list_id);
            items.extend(card_items(&dest_cards, mv.dest_list_id));
            next.cards.insert(mv.dest_list_id, Arc::new(dest_cards));
        }
        next.cards.insert(mv.source_list_id, Arc::new(source_cards));

        MovePlan::Apply {
            snapshot: next,
            request: BatchOrderRequest::new(EntityKind::Card, items),
        }
    }

    /// Reposition a list and renumber every list of the board
    pub fn apply_list_move(&self, mv: &ListMove) -> MovePlan {
        if self.lists.get(mv.source_index).map(|l| l.id) != Some(mv.list_id) {
            return MovePlan::Stale;
        }

        let dest_index = mv.dest_index.min(self.lists.len() - 1);
        if dest_index == mv.source_index {
            return MovePlan::Noop;
        }

        let mut next = self.clone();
        let lists = Arc::make_mut(&mut next.lists);
        let list = lists.remove(mv.source_index);
        lists.insert(dest_index, list);
        for (index, list) in lists.iter_mut().enumerate() {
            list.order = index as i64;
        }

        let items = lists
            .iter()
            .map(|list| BatchOrderItem {
                id: list.id,
                title: list.title.clone(),
                order: list.order,
                list_id: None,
            })
            .collect();

        MovePlan::Apply {
            snapshot: next,
            request: BatchOrderRequest::new(EntityKind::List, items),
        }
    }
}

fn renumber_cards(cards: &mut [Card]) {
    for (index, card) in cards.iter_mut().enumerate() {
        card.order = index as i64;
    }
}

fn card_items(cards: &[Card], list_id: ListId) -> Vec<BatchOrderItem> {
    cards
        .iter()
        .map(|card| BatchOrderItem {
            id: card.id,
            title: card.title.clone(),
            order: card.order,
            list_id: Some(list_id),
        })
        .collect()
}

/// Where the most recently applied move is in its lifecycle
///
/// Only that move updates the phase. An older move still in flight reports
/// its own result through its [`MoveOutcome`] alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovePhase {
    #[default]
    Idle,
    OptimisticApplied,
    Persisting,
    Settled,
    RolledBack,
}

/// What happened to one move
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    Noop,
    Stale,
    Settled { count: u64 },
    RolledBack { reason: String },
}

/// A move committed locally and not yet persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMove {
    /// Store revision this move produced
    pub revision: u64,
    /// State just before the move
    pub previous: BoardSnapshot,
    pub request: BatchOrderRequest,
}

/// Result of the synchronous phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalChange {
    Noop,
    Stale,
    Committed(PendingMove),
}

/// A move handed to the store whose persist runs in the background
#[derive(Debug)]
pub enum Dispatch {
    Noop,
    Stale,
    Persisting(JoinHandle<MoveOutcome>),
}

impl Dispatch {
    /// Wait for the background persist, if one was started
    pub async fn settled(self) -> MoveOutcome {
        match self {
            Self::Noop => MoveOutcome::Noop,
            Self::Stale => MoveOutcome::Stale,
            Self::Persisting(handle) => handle.await.unwrap_or_else(|e| MoveOutcome::RolledBack {
                reason: format!("persist task failed: {}", e),
            }),
        }
    }
}

#[derive(Debug, Default)]
struct StoreState {
    snapshot: BoardSnapshot,
    /// Bumped by every local commit and every reload
    revision: u64,
    /// Revision produced by the most recent local commit
    latest_move: u64,
    phase: MovePhase,
    needs_reload: bool,
}

impl StoreState {
    fn set_phase_for(&mut self, revision: u64, phase: MovePhase) {
        if self.latest_move == revision {
            self.phase = phase;
        }
    }
}

/// Session-scoped optimistic state for one board
pub struct BoardStore {
    board_id: BoardId,
    backend: Arc<dyn BoardBackend>,
    state: RwLock<StoreState>,
    notices: NoticeBoard,
}

impl std::fmt::Debug for BoardStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoardStore").field("board_id", &self.board_id).finish_non_exhaustive()
    }
}

impl BoardStore {
    pub fn new(backend: Arc<dyn BoardBackend>, board_id: BoardId, lists: Vec<ListWithCards>) -> Self {
        Self {
            board_id,
            backend,
            state: RwLock::new(StoreState {
                snapshot: BoardSnapshot::from_lists(lists),
                ..StoreState::default()
            }),
            notices: NoticeBoard::new(),
        }
    }

    /// Fetch the board and build a store around it
    pub async fn load(backend: Arc<dyn BoardBackend>, board_id: BoardId) -> Result<Self, ClientError> {
        let lists = backend.fetch_lists_with_cards(board_id).await?;
        tracing::debug!("Loaded board {} with {} lists", board_id, lists.len());
        Ok(Self::new(backend, board_id, lists))
    }

    pub fn board_id(&self) -> BoardId {
        self.board_id
    }

    /// Current state; cheap to clone and never mutated in place
    pub async fn snapshot(&self) -> BoardSnapshot {
        self.state.read().await.snapshot.clone()
    }

    pub async fn phase(&self) -> MovePhase {
        self.state.read().await.phase
    }

    /// Set when a rollback could neither reload nor safely restore
    ///
    /// The local state then still shows later optimistic moves and should
    /// be replaced by a server read once one succeeds.
    pub async fn needs_reload(&self) -> bool {
        self.state.read().await.needs_reload
    }

    /// Notices raised since the last call
    pub async fn drain_notices(&self) -> Vec<Notice> {
        self.notices.drain().await
    }

    pub(crate) fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    pub async fn move_card(&self, mv: CardMove) -> MoveOutcome {
        self.execute(MoveCommand::Card(mv)).await
    }

    pub async fn move_list(&self, mv: ListMove) -> MoveOutcome {
        self.execute(MoveCommand::List(mv)).await
    }

    /// Apply locally, then persist in place
    pub async fn execute(&self, command: MoveCommand) -> MoveOutcome {
        match self.apply_local(&command).await {
            LocalChange::Noop => MoveOutcome::Noop,
            LocalChange::Stale => {
                tracing::debug!("Dropping stale move {:?}", command);
                MoveOutcome::Stale
            }
            LocalChange::Committed(pending) => self.persist(pending).await,
        }
    }

    /// Apply locally and persist on a background task
    ///
    /// Returns as soon as the move is visible; the caller may keep handling
    /// input while the batch is in flight.
    pub async fn dispatch(self: &Arc<Self>, command: MoveCommand) -> Dispatch {
        match self.apply_local(&command).await {
            LocalChange::Noop => Dispatch::Noop,
            LocalChange::Stale => {
                tracing::debug!("Dropping stale move {:?}", command);
                Dispatch::Stale
            }
            LocalChange::Committed(pending) => {
                let store = Arc::clone(self);
                Dispatch::Persisting(tokio::spawn(async move { store.persist(pending).await }))
            }
        }
    }

    /// Plan the move against the current state and commit it
    ///
    /// Commands are applied in call order; each one sees the state left by
    /// the previous one.
    pub async fn apply_local(&self, command: &MoveCommand) -> LocalChange {
        let mut state = self.state.write().await;
        match state.snapshot.apply(command) {
            MovePlan::Noop => LocalChange::Noop,
            MovePlan::Stale => LocalChange::Stale,
            MovePlan::Apply { snapshot, request } => {
                let previous = std::mem::replace(&mut state.snapshot, snapshot);
                state.revision += 1;
                state.latest_move = state.revision;
                state.phase = MovePhase::OptimisticApplied;
                tracing::debug!("Applied {:?} locally ({} items)", command, request.items.len());
                LocalChange::Committed(PendingMove {
                    revision: state.revision,
                    previous,
                    request,
                })
            }
        }
    }

    /// Send the batch; on failure discard the optimistic state
    ///
    /// The board is refetched. If that also fails, the state before the move
    /// is restored, but only while nothing was applied on top of this move.
    /// Otherwise the current state is kept and flagged by [`Self::needs_reload`].
    pub async fn persist(&self, pending: PendingMove) -> MoveOutcome {
        let PendingMove {
            revision,
            previous,
            request,
        } = pending;
        self.state.write().await.set_phase_for(revision, MovePhase::Persisting);

        let (reason, notice) = match self.backend.batch_update_order(self.board_id, &request).await {
            Ok(response) if response.success => {
                self.state.write().await.set_phase_for(revision, MovePhase::Settled);
                return MoveOutcome::Settled { count: response.count };
            }
            Ok(_) => (
                "server did not apply the new order".to_string(),
                format!("Could not save the new {} order", request.kind),
            ),
            Err(e) if e.is_not_found() => (
                e.to_string(),
                format!("A moved {} no longer exists on this board", request.kind),
            ),
            Err(e) => (e.to_string(), format!("Could not save the new {} order", request.kind)),
        };

        tracing::error!("Persisting {} order on board {} failed: {}", request.kind, self.board_id, reason);

        if let Err(reload_error) = self.reload_authoritative().await {
            let mut state = self.state.write().await;
            if state.revision == revision {
                tracing::warn!("Reload after failed move failed, restoring previous state: {}", reload_error);
                state.snapshot = previous;
                state.revision += 1;
            } else {
                tracing::warn!(
                    "Reload after failed move failed and later changes exist, keeping current state: {}",
                    reload_error
                );
                state.needs_reload = true;
            }
        }

        self.notices.push(Notice::error(notice)).await;
        self.state.write().await.set_phase_for(revision, MovePhase::RolledBack);
        tracing::warn!("Rolled back {} move on board {}", request.kind, self.board_id);

        MoveOutcome::RolledBack { reason }
    }

    /// Replace local state with a fresh server read
    pub async fn reload_authoritative(&self) -> Result<(), ClientError> {
        let lists = self.backend.fetch_lists_with_cards(self.board_id).await?;
        let mut state = self.state.write().await;
        state.snapshot = BoardSnapshot::from_lists(lists);
        state.revision += 1;
        state.needs_reload = false;
        Ok(())
    }
}
