// Input boundary: turns raw form text into values the roster and bid ledger
// accept. Nothing past this module re-checks its input.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{LeagueConfig, LevelMode};
use crate::player::SKILL_SEPARATOR;
use crate::taxonomy::canonical_skill;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bid amount `{input}`: enter a number of at least 0")]
    InvalidBidAmount { input: String },

    #[error("`{field}` is required")]
    MissingField { field: &'static str },

    #[error("unknown race `{race}`")]
    UnknownRace { race: String },

    #[error("position `{position}` is not available to {race}")]
    PositionNotAllowed { race: String, position: String },

    #[error("unknown skill `{skill}`")]
    UnknownSkill { skill: String },

    #[error("{count} skills given, at most {max} allowed")]
    TooManySkills { count: usize, max: usize },

    #[error("invalid level `{input}`: must be a whole number from 1 to {max}")]
    InvalidLevel { input: String, max: u8 },

    #[error("invalid value `{input}`: must be a whole or decimal number like 90 or 90.5")]
    InvalidValue { input: String },
}

/// Parse typed bid text into an amount the bid ledger accepts.
///
/// Zero is a valid bid; negative, non-finite and non-numeric text is not.
pub fn parse_bid_amount(text: &str) -> Result<f64, ValidationError> {
    parse_non_negative(text).ok_or_else(|| ValidationError::InvalidBidAmount {
        input: text.to_string(),
    })
}

fn parse_non_negative(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

/// Raw text of the "add player" form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewPlayer {
    pub name: String,
    pub race: String,
    pub position: String,
    pub level: String,
    /// Comma-separated skill names.
    pub skills: String,
    pub value: String,
}

/// A validated player, ready to be given an id by the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerDraft {
    pub name: String,
    pub race: String,
    pub position: String,
    pub level: String,
    pub skills: String,
    pub value: String,
}

impl NewPlayer {
    /// Check the form against the league rules and normalize it.
    ///
    /// Skills are matched against the skill table case-insensitively,
    /// stored with the table's spelling, and de-duplicated in order.
    pub fn validate(&self, league: &LeagueConfig) -> Result<PlayerDraft, ValidationError> {
        let name = required("name", &self.name)?;
        let race = required("race", &self.race)?;
        let position = required("position", &self.position)?;
        let skills_text = required("skills", &self.skills)?;
        let value = required("value", &self.value)?;

        let race_config = league.race(race).ok_or_else(|| ValidationError::UnknownRace {
            race: race.to_string(),
        })?;
        if !race_config.positions.iter().any(|p| p == position) {
            return Err(ValidationError::PositionNotAllowed {
                race: race.to_string(),
                position: position.to_string(),
            });
        }

        let skills = parse_skills(skills_text, league.max_skills)?;

        let level = match league.level_mode {
            LevelMode::Explicit => {
                let text = required("level", &self.level)?;
                parse_level(text, league.max_level)?.to_string()
            }
            LevelMode::FromSkills => {
                let derived = skills.len() + 1;
                if derived > usize::from(league.max_level) {
                    return Err(ValidationError::InvalidLevel {
                        input: derived.to_string(),
                        max: league.max_level,
                    });
                }
                derived.to_string()
            }
        };

        if !is_plain_decimal(value) {
            return Err(ValidationError::InvalidValue {
                input: value.to_string(),
            });
        }

        Ok(PlayerDraft {
            name: name.to_string(),
            race: race.to_string(),
            position: position.to_string(),
            level,
            skills: skills.join(SKILL_SEPARATOR),
            value: value.to_string(),
        })
    }
}

fn required<'a>(field: &'static str, text: &'a str) -> Result<&'a str, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField { field });
    }
    Ok(trimmed)
}

/// Digits with an optional `.digits` fraction. The filter reads a value by its
/// leading integer, so anything else (exponents, a bare `.5`, signs) would be
/// filtered at a different magnitude than it was entered with.
fn is_plain_decimal(text: &str) -> bool {
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (text, None),
    };
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    all_digits(whole) && fraction.map_or(true, all_digits)
}

fn parse_skills(text: &str, max: usize) -> Result<Vec<&'static str>, ValidationError> {
    let mut skills: Vec<&'static str> = Vec::new();
    for entry in text.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let skill = canonical_skill(entry).ok_or_else(|| ValidationError::UnknownSkill {
            skill: entry.to_string(),
        })?;
        if !skills.contains(&skill) {
            skills.push(skill);
        }
    }

    if skills.is_empty() {
        return Err(ValidationError::MissingField { field: "skills" });
    }
    if skills.len() > max {
        return Err(ValidationError::TooManySkills {
            count: skills.len(),
            max,
        });
    }
    Ok(skills)
}

fn parse_level(text: &str, max: u8) -> Result<u8, ValidationError> {
    text.parse::<u8>()
        .ok()
        .filter(|l| (1..=max).contains(l))
        .ok_or_else(|| ValidationError::InvalidLevel {
            input: text.to_string(),
            max,
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RaceConfig;

    fn league(level_mode: LevelMode) -> LeagueConfig {
        LeagueConfig {
            name: "Test League".into(),
            level_mode,
            max_level: 7,
            max_skills: 6,
            races: vec![
                RaceConfig {
                    name: "Orc".into(),
                    positions: vec!["Lineman".into(), "Blitzer".into()],
                },
                RaceConfig {
                    name: "Elf".into(),
                    positions: vec!["Catcher".into()],
                },
            ],
        }
    }

    fn thorg_form() -> NewPlayer {
        NewPlayer {
            name: "Thorg".into(),
            race: "Orc".into(),
            position: "Blitzer".into(),
            level: "3".into(),
            skills: "Block, Tackle".into(),
            value: "90".into(),
        }
    }

    #[test]
    fn bid_amount_accepts_non_negative_numbers() {
        assert_eq!(parse_bid_amount("75"), Ok(75.0));
        assert_eq!(parse_bid_amount(" 12.5 "), Ok(12.5));
        assert_eq!(parse_bid_amount("0"), Ok(0.0));
    }

    #[test]
    fn bid_amount_rejects_bad_input() {
        for input in ["", "abc", "-1", "NaN", "inf", "12abc"] {
            assert_eq!(
                parse_bid_amount(input),
                Err(ValidationError::InvalidBidAmount {
                    input: input.to_string()
                }),
                "input {input:?}"
            );
        }
    }

    #[test]
    fn valid_form_produces_draft() {
        let draft = thorg_form().validate(&league(LevelMode::Explicit)).unwrap();
        assert_eq!(draft.name, "Thorg");
        assert_eq!(draft.level, "3");
        assert_eq!(draft.skills, "Block, Tackle");
        assert_eq!(draft.value, "90");
    }

    #[test]
    fn skills_are_canonicalized_and_deduplicated() {
        let mut form = thorg_form();
        form.skills = "block,  TACKLE, Block,".into();
        let draft = form.validate(&league(LevelMode::Explicit)).unwrap();
        assert_eq!(draft.skills, "Block, Tackle");
    }

    #[test]
    fn missing_fields_are_reported() {
        let mut form = thorg_form();
        form.name = "   ".into();
        assert_eq!(
            form.validate(&league(LevelMode::Explicit)),
            Err(ValidationError::MissingField { field: "name" })
        );

        let mut form = thorg_form();
        form.skills = " , ".into();
        assert_eq!(
            form.validate(&league(LevelMode::Explicit)),
            Err(ValidationError::MissingField { field: "skills" })
        );
    }

    #[test]
    fn unknown_race_and_wrong_position() {
        let mut form = thorg_form();
        form.race = "Goblin".into();
        assert!(matches!(
            form.validate(&league(LevelMode::Explicit)),
            Err(ValidationError::UnknownRace { .. })
        ));

        let mut form = thorg_form();
        form.race = "Elf".into();
        assert_eq!(
            form.validate(&league(LevelMode::Explicit)),
            Err(ValidationError::PositionNotAllowed {
                race: "Elf".into(),
                position: "Blitzer".into(),
            })
        );
    }

    #[test]
    fn unknown_skill_rejected() {
        let mut form = thorg_form();
        form.skills = "Block, Teleport".into();
        assert_eq!(
            form.validate(&league(LevelMode::Explicit)),
            Err(ValidationError::UnknownSkill {
                skill: "Teleport".into()
            })
        );
    }

    #[test]
    fn more_than_six_skills_rejected() {
        let mut form = thorg_form();
        form.skills = "Block, Tackle, Dodge, Catch, Guard, Pro, Kick".into();
        assert_eq!(
            form.validate(&league(LevelMode::Explicit)),
            Err(ValidationError::TooManySkills { count: 7, max: 6 })
        );
    }

    #[test]
    fn level_must_be_in_range() {
        for bad in ["0", "8", "two", "-1", "3.5"] {
            let mut form = thorg_form();
            form.level = bad.into();
            assert!(
                matches!(
                    form.validate(&league(LevelMode::Explicit)),
                    Err(ValidationError::InvalidLevel { .. })
                ),
                "level {bad:?}"
            );
        }
    }

    #[test]
    fn level_derived_from_skills() {
        let mut form = thorg_form();
        form.level = String::new();
        let draft = form.validate(&league(LevelMode::FromSkills)).unwrap();
        assert_eq!(draft.level, "3");
    }

    #[test]
    fn derived_level_cannot_exceed_max_level() {
        let mut small = league(LevelMode::FromSkills);
        small.max_level = 3;

        let mut form = thorg_form();
        form.skills = "Block, Dodge, Tackle, Guard".into();
        assert_eq!(
            form.validate(&small),
            Err(ValidationError::InvalidLevel {
                input: "5".into(),
                max: 3
            })
        );

        form.skills = "Block, Dodge".into();
        assert_eq!(form.validate(&small).unwrap().level, "3");
    }

    #[test]
    fn value_must_be_plain_decimal() {
        for bad in ["-10", "1e3", ".5", "5.", "+5", "0x10", "1.2.3", "90 gp"] {
            let mut form = thorg_form();
            form.value = bad.into();
            assert!(
                matches!(
                    form.validate(&league(LevelMode::Explicit)),
                    Err(ValidationError::InvalidValue { .. })
                ),
                "value {bad:?}"
            );
        }

        for good in ["0", "90", "55.5", " 120 "] {
            let mut form = thorg_form();
            form.value = good.into();
            assert!(form.validate(&league(LevelMode::Explicit)).is_ok(), "value {good:?}");
        }
    }
}
