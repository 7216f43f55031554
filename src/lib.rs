//! Simulation core for a two-ship Space Invaders duel.
//!
//! A human ship and an AI ship share the playfield against a marching 10×5
//! formation and a bonus mystery ship.  The crate owns the timing, collision,
//! scoring, AI and round logic; drawing, sound and raw input are reached only
//! through the traits in [`interfaces`].

pub mod ai;
pub mod collision;
pub mod config;
pub mod entities;
pub mod error;
pub mod formation;
pub mod game;
pub mod interfaces;
pub mod round;
pub mod scene;
pub mod scoring;

pub use error::GameError;
pub use game::{Flow, Game, Phase};
