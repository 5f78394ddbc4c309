// Player entries in the pool and the local user's bid state on each one.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator used in the serialized `skills` field ("Block, Tackle").
pub const SKILL_SEPARATOR: &str = ", ";

/// Stable identifier assigned when a player is added to the roster.
///
/// Names are display attributes only; two players may share one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The local user's maximum bid on a player.
///
/// Other bidders are only visible through `Player::bid_count`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum BidState {
    #[default]
    NoBid,
    ActiveBid { amount: f64 },
}

impl BidState {
    /// The bid amount, if a bid is active.
    pub fn amount(&self) -> Option<f64> {
        match self {
            BidState::NoBid => None,
            BidState::ActiveBid { amount } => Some(*amount),
        }
    }
}

/// A roster entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub race: String,
    pub position: String,
    /// String-encoded level, 1..=7 in the default league rules.
    pub level: String,
    /// Skill names joined with `SKILL_SEPARATOR`.
    pub skills: String,
    /// String-encoded value. Non-numeric text reads as 0 when filtering.
    pub value: String,
    /// Number of distinct parties bidding on this player.
    #[serde(default)]
    pub bid_count: u32,
    #[serde(default)]
    pub bid: BidState,
}

impl Player {
    pub fn has_user_bid(&self) -> bool {
        matches!(self.bid, BidState::ActiveBid { .. })
    }

    pub fn user_bid_amount(&self) -> Option<f64> {
        self.bid.amount()
    }

    /// Individual skill names, in stored order.
    pub fn skill_list(&self) -> impl Iterator<Item = &str> {
        self.skills.split(SKILL_SEPARATOR).map(str::trim)
    }

    /// The player's value as an integer, 0 when it doesn't parse.
    pub fn numeric_value(&self) -> i64 {
        parse_int_prefix(&self.value).unwrap_or(0)
    }
}

/// Parse the leading integer of `text`, ignoring leading whitespace and
/// anything after the digits ("12abc" -> 12, "3.9" -> 3, " -5" -> -5).
///
/// Returns `None` when no digit follows the optional sign. Values beyond the
/// `i64` range saturate.
pub fn parse_int_prefix(text: &str) -> Option<i64> {
    let s = text.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits: Vec<i64> = rest
        .bytes()
        .take_while(u8::is_ascii_digit)
        .map(|b| i64::from(b - b'0'))
        .collect();
    if digits.is_empty() {
        return None;
    }

    let magnitude = digits
        .iter()
        .fold(0i64, |acc, d| acc.saturating_mul(10).saturating_add(*d));
    Some(if negative { -magnitude } else { magnitude })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
