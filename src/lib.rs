//! scaleoverlay - Calibrated scale-bar overlay geometry for medical image viewports

pub mod config;
pub mod domain;
pub mod error;
pub mod geometry;
pub mod overlay;
pub mod render;

pub use error::OverlayError;
