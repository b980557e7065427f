//! Library crate for scoreboard-sync: polls an authoritative game state, reconciles it with a
//! locally ticking clock and scoring animations, and serves the result over REST and SSE.

pub mod config;
pub mod dto;
pub mod error;
pub mod routes;
pub mod services;
pub mod source;
pub mod state;
