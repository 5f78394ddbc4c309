// Bid ledger: applies the local user's bids to the roster.
//
// A first bid on a player ("place") adds one bidding party; later bids by the
// same user ("update") only change the amount.

use tracing::{debug, info};

use crate::player::{BidState, Player, PlayerId};

/// Which transition the next bid on a player will perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidAction {
    Place,
    Update,
}

impl BidAction {
    pub fn for_player(player: &Player) -> Self {
        match player.bid {
            BidState::NoBid => BidAction::Place,
            BidState::ActiveBid { .. } => BidAction::Update,
        }
    }
}

/// What the bid dialog shows for a player.
#[derive(Debug, Clone, PartialEq)]
pub struct BidPrompt {
    pub action: BidAction,
    pub title: &'static str,
    pub placeholder: &'static str,
    /// Pre-filled input text: the current bid, or empty. A bid of 0 is not
    /// pre-filled.
    pub prefill: String,
}

impl BidPrompt {
    pub fn for_player(player: &Player) -> Self {
        let action = BidAction::for_player(player);
        let (title, placeholder) = match action {
            BidAction::Place => ("Place Bid", "Enter bid amount"),
            BidAction::Update => ("Update Bid", "Update bid amount"),
        };
        BidPrompt {
            action,
            title,
            placeholder,
            prefill: player
                .user_bid_amount()
                .filter(|a| *a != 0.0)
                .map(|a| a.to_string())
                .unwrap_or_default(),
        }
    }
}

/// Apply a bid of `amount` to the player with `player_id`.
///
/// Returns the new roster. Only the first matching player changes; an unknown
/// id returns the roster unchanged. `amount` must already be validated
/// (finite, non-negative).
pub fn apply_bid(roster: &[Player], player_id: PlayerId, amount: f64) -> Vec<Player> {
    let mut next = roster.to_vec();

    let Some(idx) = next.iter().position(|p| p.id == player_id) else {
        debug!("Bid on unknown player {}; roster unchanged", player_id);
        return next;
    };
    let player = &mut next[idx];

    match BidAction::for_player(player) {
        BidAction::Place => {
            player.bid_count = player.bid_count.saturating_add(1);
            info!(
                "Placed bid of {} on {} ({}), {} bidder(s)",
                amount, player.name, player.id, player.bid_count
            );
        }
        BidAction::Update => {
            info!(
                "Updated bid on {} ({}) to {}",
                player.name, player.id, amount
            );
        }
    }
    player.bid = BidState::ActiveBid { amount };

    next
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
