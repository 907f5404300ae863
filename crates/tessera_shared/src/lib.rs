//! # TESSERA Shared
//!
//! Leaf types used by every other crate in the workspace.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on another workspace crate. Chunks embed
//! a [`Collider`] per block, the physics resolver moves colliders, and the
//! camera maps [`Vec2`] points; all of them meet here.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod constants;
pub mod math;

pub use constants::{BLOCK_SIZE, CHUNK_SIZE, WORLD_BASE_HEIGHT, WORLD_HEIGHT_CHUNKS, WORLD_WIDTH_CHUNKS};
pub use math::{lerp, Collider, Vec2};
