//! # Connect Four Engine
//!
//! Board mechanics and win detection for Connect Four on any board shape.
//! A [`game::CombinationIndex`] is built once per shape; every game on that
//! shape borrows it and checks for a win by looking only at the lines through
//! the cell that was just filled.
//!
//! ## Modules
//!
//! - [`game`] — Board, players, combination index, game state machine
//! - [`simulate`] — Random self-play driver and result summary
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod simulate;
