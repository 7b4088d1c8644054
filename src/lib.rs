//! Snake Grid: a snake that grows with time, drawn on a character grid.
//!
//! `domain` holds the drawable building blocks, `sim` the state machine
//! (`sim::step::update` is the transition, `sim::frame::view` the render),
//! and `ui` the terminal and gamepad adapters used by the binary.

pub mod config;
pub mod domain;
pub mod sim;
pub mod ui;
