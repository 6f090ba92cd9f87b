//! Four-in-a-row move search farmed out to a pool of workers.
//!
//! A [`farm::Coordinator`] splits every decision into the `columns²` two-ply
//! continuations of the current board and hands them out on request. Workers
//! score each one with a depth-bounded exhaustive search
//! ([`player::ai::predict`]) and the coordinator plays the first move with the
//! highest total.

pub mod core;
pub mod display;
pub mod error;
pub mod farm;
pub mod game;
pub mod logic;
pub mod network;
pub mod player;

#[cfg(test)]
mod logic_tests;
