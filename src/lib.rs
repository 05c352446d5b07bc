//! Interactive core of the research-lab site
//!
//! Two independent visuals mounted by the host page:
//! - a drifting, depth-projected particle field behind the hero section
//! - a pannable, zoomable world map of collaborating countries
//!
//! `core` and `config` are platform-agnostic and tested on the host. The
//! browser front-end is compiled for `wasm32` with the `wasm` feature.

pub mod config;
pub mod core;
pub mod time;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
mod app;
#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
mod field_canvas;
#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
mod flag_loader;
#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
mod theme;
#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
mod web;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
pub use web::{mount_particle_field, mount_world_map, ParticleFieldHandle, WorldMapHandle};
