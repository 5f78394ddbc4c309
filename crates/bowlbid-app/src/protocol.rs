// Message types between the front end and the application state.
//
// Commands arrive as JSON objects tagged by `type`; every command, `QUIT`
// included, is answered with exactly one update.

use serde::{Deserialize, Serialize};

use bowlbid_core::filter::FilterSpec;
use bowlbid_core::ledger::{BidAction, BidPrompt};
use bowlbid_core::player::{Player, PlayerId};
use bowlbid_core::taxonomy::SkillCategory;
use bowlbid_core::validate::NewPlayer;

/// Commands sent by the front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserCommand {
    AddPlayer {
        player: NewPlayer,
    },
    SetFilters {
        filters: FilterSpec,
    },
    ClearFilters,
    ToggleSkill {
        skill: String,
    },
    /// Ask for the bid dialog contents for a player.
    OpenBid {
        #[serde(rename = "playerId")]
        player_id: PlayerId,
    },
    /// Submit a bid. `amount` is the raw text typed by the user.
    PlaceBid {
        #[serde(rename = "playerId")]
        player_id: PlayerId,
        amount: String,
    },
    ListPositions {
        #[serde(default)]
        race: String,
    },
    ListSkills,
    Quit,
}

/// Updates sent back to the front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UiUpdate {
    Snapshot(PoolSnapshot),
    BidDialog(BidDialog),
    Positions {
        race: String,
        positions: Vec<String>,
    },
    Skills {
        categories: Vec<SkillGroup>,
    },
    Rejected {
        reason: String,
    },
}

/// What the player pool screen renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolSnapshot {
    /// Players passing the current filters, in roster order.
    pub players: Vec<Player>,
    pub total_players: usize,
    pub filters: FilterSpec,
    pub filters_active: bool,
    pub value_range_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidDialog {
    pub player_id: PlayerId,
    pub player_name: String,
    pub is_update: bool,
    pub title: String,
    pub placeholder: String,
    pub prefill: String,
}

impl BidDialog {
    pub fn new(player: &Player, prompt: BidPrompt) -> Self {
        BidDialog {
            player_id: player.id,
            player_name: player.name.clone(),
            is_update: prompt.action == BidAction::Update,
            title: prompt.title.to_string(),
            placeholder: prompt.placeholder.to_string(),
            prefill: prompt.prefill,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGroup {
    pub category: String,
    pub skills: Vec<String>,
}

impl From<&SkillCategory> for SkillGroup {
    fn from(c: &SkillCategory) -> Self {
        SkillGroup {
            category: c.category.to_string(),
            skills: c.skills.iter().map(|s| s.to_string()).collect(),
        }
    }
}
