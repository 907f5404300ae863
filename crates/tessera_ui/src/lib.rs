//! # TESSERA UI
//!
//! The boundary between the simulation and whatever owns the window.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                       UI BOUNDARY                         │
//! ├──────────────────────────────────────────────────────────┤
//! │  Platform events → InputState → InputBindings → Actions  │
//! │  Simulation events → FloatingText / inventory lines      │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here draws. HUD types are plain data a renderer can consume.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod hud;
pub mod input;

pub use hud::{inventory_lines, Color, FloatingText, FloatingTexts};
pub use input::{
    Action, InputBindings, InputEvent, InputSource, InputState, Key, MouseButton, ScriptedInput,
};
