//! Animated particle backdrop for a web page.
//!
//! The particle engine, the viewport host and the frame scheduling contract
//! are plain Rust and run anywhere; the `wasm32` build adds the browser
//! bindings and exports the `Background` class.

mod utils;

pub mod color;
pub mod config;
pub mod error;
pub mod field;
pub mod host;
pub mod layers;
pub mod logging;
pub mod particle;
pub mod scene;
pub mod scheduler;
pub mod surface;

#[cfg(target_arch = "wasm32")]
mod web;

use wasm_bindgen::prelude::*;

pub use color::{Color, Paint};
pub use config::{BackgroundConfig, Span};
pub use error::{BackgroundError, ConfigError, HostError, SceneError};
pub use field::ParticleField;
pub use host::ViewportHost;
pub use particle::{advance, render, Particle};
pub use scene::{ExternalScene, SceneLayer};
pub use scheduler::{FrameHandle, FrameScheduler, ManualScheduler};
pub use surface::{Bounds, PixelSurface, Surface};

#[cfg(target_arch = "wasm32")]
pub use web::{AnimationFrames, Background, CanvasSurface, SplineViewer};

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    logging::init(level);
}
