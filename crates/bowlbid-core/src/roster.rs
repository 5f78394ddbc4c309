// In-memory player pool: assigns ids on addition and routes bids through the
// ledger.

use tracing::info;

use crate::filter::{filter_players, FilterSpec};
use crate::ledger::{apply_bid, BidAction};
use crate::player::{BidState, Player, PlayerId};
use crate::validate::PlayerDraft;

/// The player pool for the current session.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    players: Vec<Player>,
    next_id: u64,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a validated player with no bids. Returns its new id.
    pub fn add(&mut self, draft: PlayerDraft) -> PlayerId {
        self.next_id += 1;
        let id = PlayerId(self.next_id);

        info!(
            "Added {} {} {} ({}) value {}",
            draft.race, draft.position, draft.name, id, draft.value
        );

        self.players.push(Player {
            id,
            name: draft.name,
            race: draft.race,
            position: draft.position,
            level: draft.level,
            skills: draft.skills,
            value: draft.value,
            bid_count: 0,
            bid: BidState::NoBid,
        });
        id
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Apply a validated bid. Returns the transition performed, or `None`
    /// when no player has that id.
    pub fn apply_bid(&mut self, id: PlayerId, amount: f64) -> Option<BidAction> {
        let action = BidAction::for_player(self.get(id)?);
        self.players = apply_bid(&self.players, id, amount);
        Some(action)
    }

    /// The players passing `spec`, in roster order.
    pub fn filtered(&self, spec: &FilterSpec) -> Vec<Player> {
        filter_players(&self.players, spec)
    }
}
