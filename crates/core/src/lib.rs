#![deny(unsafe_code)]
//! Core types for the shaderloop real-time shader-rendering host.
//!
//! Provides the `Scene` registry (named vertex/fragment shader pairs with a
//! fixed uniform contract), the `AnimationClock` and `Viewport` state types,
//! the `DiagnosticSink` reporting boundary, and -- behind the `render`
//! feature -- the GPU-facing shader compiler, program linker, and
//! `RenderContext` driving the per-frame draw cycle.

pub mod clock;
pub mod diag;
pub mod error;
pub mod scene;
pub mod viewport;

#[cfg(feature = "render")]
pub mod render;

pub use clock::AnimationClock;
pub use diag::{DiagLevel, DiagnosticSink, LogSink, RecordingSink};
pub use error::RenderError;
pub use scene::{Scene, ShaderStage};
pub use viewport::Viewport;
