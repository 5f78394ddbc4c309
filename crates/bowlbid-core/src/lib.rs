// Library root: the player filter and bid-state engine, plus the roster,
// input validation, skill taxonomy, and league configuration around it.

pub mod config;
pub mod filter;
pub mod ledger;
pub mod player;
pub mod roster;
pub mod taxonomy;
pub mod validate;
