// Filter predicate over the player pool: name, race, position, skills, and
// value range, all combined with AND.

use serde::{Deserialize, Serialize};

use crate::player::{parse_int_prefix, Player};

/// The active search constraints for the player pool view.
///
/// Every field uses "empty means unconstrained". Bounds stay string-encoded
/// because they come straight from text inputs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSpec {
    /// Case-insensitive substring of the player name.
    pub name: String,
    /// Exact race.
    pub race: String,
    /// Exact position.
    pub position: String,
    /// Every entry must appear (as a case-insensitive substring) in at
    /// least one of the player's skills.
    pub skills: Vec<String>,
    pub min_value: String,
    pub max_value: String,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_race(mut self, race: impl Into<String>) -> Self {
        self.race = race.into();
        self
    }

    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = position.into();
        self
    }

    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.skills.push(skill.into());
        self
    }

    pub fn with_min_value(mut self, min: impl Into<String>) -> Self {
        self.min_value = min.into();
        self
    }

    pub fn with_max_value(mut self, max: impl Into<String>) -> Self {
        self.max_value = max.into();
        self
    }

    /// Whether any field constrains the result.
    pub fn is_active(&self) -> bool {
        !self.name.is_empty()
            || !self.race.is_empty()
            || !self.position.is_empty()
            || !self.skills.is_empty()
            || !self.min_value.is_empty()
            || !self.max_value.is_empty()
    }

    /// Reset every field to unconstrained.
    pub fn clear(&mut self) {
        *self = FilterSpec::default();
    }

    /// Add `skill` if it isn't selected, remove it if it is.
    pub fn toggle_skill(&mut self, skill: &str) {
        if let Some(idx) = self.skills.iter().position(|s| s == skill) {
            self.skills.remove(idx);
        } else {
            self.skills.push(skill.to_string());
        }
    }

    /// Summary of the value range for the active-filters panel, e.g.
    /// "Value: 50 - ∞". `None` when neither bound is set.
    pub fn value_range_label(&self) -> Option<String> {
        if self.min_value.is_empty() && self.max_value.is_empty() {
            return None;
        }
        let min = if self.min_value.is_empty() { "0" } else { self.min_value.as_str() };
        let max = if self.max_value.is_empty() { "∞" } else { self.max_value.as_str() };
        Some(format!("Value: {min} - {max}"))
    }

    /// Whether `player` satisfies every active constraint.
    pub fn matches(&self, player: &Player) -> bool {
        if !self.name.is_empty()
            && !player
                .name
                .to_lowercase()
                .contains(&self.name.to_lowercase())
        {
            return false;
        }

        if !self.race.is_empty() && player.race != self.race {
            return false;
        }

        if !self.position.is_empty() && player.position != self.position {
            return false;
        }

        if !self.skills.is_empty() && !has_all_skills(player, &self.skills) {
            return false;
        }

        let value = player.numeric_value();
        if let Some(min) = parse_bound(&self.min_value) {
            if value < min {
                return false;
            }
        }
        if let Some(max) = parse_bound(&self.max_value) {
            if value > max {
                return false;
            }
        }

        true
    }
}

/// Filter the roster, preserving order.
pub fn filter_players(roster: &[Player], spec: &FilterSpec) -> Vec<Player> {
    roster
        .iter()
        .filter(|p| spec.matches(p))
        .cloned()
        .collect()
}

/// Strip every non-digit from typed bound text.
pub fn sanitize_bound(text: &str) -> String {
    text.chars().filter(char::is_ascii_digit).collect()
}

/// A bound constrains only when it is non-empty and parses.
fn parse_bound(text: &str) -> Option<i64> {
    if text.is_empty() {
        return None;
    }
    parse_int_prefix(text)
}

/// Substring match, not set membership: "Block" also matches a player with
/// "Multiple Block".
fn has_all_skills(player: &Player, wanted: &[String]) -> bool {
    let player_skills: Vec<String> = player.skill_list().map(str::to_lowercase).collect();
    wanted.iter().all(|skill| {
        let skill = skill.to_lowercase();
        player_skills.iter().any(|ps| ps.contains(&skill))
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
