// Application state and command handling.
//
// Holds the session's roster and filters, validates raw input at the edge,
// and answers every command with a UI update. Bids are applied to the roster
// before the next snapshot is filtered, so a fresh bid is always visible.

use std::io::{BufRead, Write};

use anyhow::Context;
use thiserror::Error;
use tracing::{debug, info, warn};

use bowlbid_core::config::Config;
use bowlbid_core::filter::{sanitize_bound, FilterSpec};
use bowlbid_core::ledger::BidPrompt;
use bowlbid_core::player::PlayerId;
use bowlbid_core::roster::Roster;
use bowlbid_core::taxonomy::SKILL_CATEGORIES;
use bowlbid_core::validate::{parse_bid_amount, ValidationError};

use crate::protocol::{BidDialog, PoolSnapshot, SkillGroup, UiUpdate, UserCommand};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a command was turned away.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("no player with id {0}")]
    UnknownPlayer(PlayerId),

    #[error("malformed command: {0}")]
    Malformed(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// The complete application state for one session.
pub struct AppState {
    pub config: Config,
    pub roster: Roster,
    pub filters: FilterSpec,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        AppState {
            config,
            roster: Roster::new(),
            filters: FilterSpec::default(),
        }
    }

    /// Handle one command. Failures become a `Rejected` update; they never
    /// end the session.
    pub fn handle_command(&mut self, cmd: UserCommand) -> UiUpdate {
        match self.try_handle(cmd) {
            Ok(update) => update,
            Err(e) => {
                warn!("Command rejected: {}", e);
                UiUpdate::Rejected {
                    reason: e.to_string(),
                }
            }
        }
    }

    fn try_handle(&mut self, cmd: UserCommand) -> Result<UiUpdate, CommandError> {
        match cmd {
            UserCommand::AddPlayer { player } => {
                let draft = player.validate(&self.config.league)?;
                self.roster.add(draft);
            }
            UserCommand::SetFilters { mut filters } => {
                filters.min_value = sanitize_bound(&filters.min_value);
                filters.max_value = sanitize_bound(&filters.max_value);
                debug!("Filters set: {:?}", filters);
                self.filters = filters;
            }
            UserCommand::ClearFilters => {
                self.filters.clear();
            }
            UserCommand::ToggleSkill { skill } => {
                self.filters.toggle_skill(&skill);
            }
            UserCommand::OpenBid { player_id } => {
                let player = self
                    .roster
                    .get(player_id)
                    .ok_or(CommandError::UnknownPlayer(player_id))?;
                let prompt = BidPrompt::for_player(player);
                return Ok(UiUpdate::BidDialog(BidDialog::new(player, prompt)));
            }
            UserCommand::PlaceBid { player_id, amount } => {
                let amount = parse_bid_amount(&amount)?;
                let action = self
                    .roster
                    .apply_bid(player_id, amount)
                    .ok_or(CommandError::UnknownPlayer(player_id))?;
                debug!("Bid {:?} on {} applied", action, player_id);
            }
            UserCommand::ListPositions { race } => {
                let positions = self
                    .config
                    .league
                    .positions_for(&race)
                    .into_iter()
                    .map(String::from)
                    .collect();
                return Ok(UiUpdate::Positions { race, positions });
            }
            UserCommand::ListSkills => {
                return Ok(UiUpdate::Skills {
                    categories: SKILL_CATEGORIES.iter().map(SkillGroup::from).collect(),
                });
            }
            UserCommand::Quit => {
                debug!("Quit requested with {} player(s) in the pool", self.roster.len());
            }
        }
        Ok(UiUpdate::Snapshot(self.build_snapshot()))
    }

    /// Build a `PoolSnapshot` from the current roster and filters.
    pub fn build_snapshot(&self) -> PoolSnapshot {
        PoolSnapshot {
            players: self.roster.filtered(&self.filters),
            total_players: self.roster.len(),
            filters: self.filters.clone(),
            filters_active: self.filters.is_active(),
            value_range_label: self.filters.value_range_label(),
        }
    }
}

// ---------------------------------------------------------------------------
// Driver loop
// ---------------------------------------------------------------------------

/// Read one JSON command per line from `input` and write one JSON update per
/// line to `output`, until `QUIT` or end of input.
///
/// `QUIT` is answered with a final snapshot before the loop stops. Lines that
/// don't parse are answered with `REJECTED`; blank lines are skipped.
pub fn run<R: BufRead, W: Write>(
    state: &mut AppState,
    input: R,
    mut output: W,
) -> anyhow::Result<()> {
    for (line_no, line) in input.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read command line {}", line_no + 1))?;
        if line.trim().is_empty() {
            continue;
        }

        let mut quit = false;
        let update = match serde_json::from_str::<UserCommand>(&line) {
            Ok(cmd) => {
                quit = matches!(cmd, UserCommand::Quit);
                state.handle_command(cmd)
            }
            Err(e) => {
                let err = CommandError::from(e);
                warn!("Line {}: {}", line_no + 1, err);
                UiUpdate::Rejected {
                    reason: err.to_string(),
                }
            }
        };

        serde_json::to_writer(&mut output, &update).context("failed to encode update")?;
        writeln!(output).context("failed to write update")?;
        output.flush().context("failed to flush output")?;

        if quit {
            info!("Quit received after {} line(s)", line_no + 1);
            return Ok(());
        }
    }

    info!("Input closed; shutting down");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
