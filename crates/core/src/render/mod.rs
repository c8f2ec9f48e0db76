//! GPU-facing rendering infrastructure.
//!
//! This module is only available when the `render` feature is enabled.
//! It drives the whole program lifecycle -- compile, link, bind, render
//! forever -- against a `glow::Context` supplied by the host.
//!
//! # Module overview
//!
//! - [`shader`] -- per-stage compilation with diagnostic extraction.
//! - [`program`] -- linking, attribute/uniform resolution, uniform updates.
//! - [`quad`] -- the fixed full-screen triangle-strip quad.
//! - [`check`] -- GPU error draining after every fallible call.
//! - [`context`] -- the host-owned `RenderContext`: setup + per-frame step.

pub mod check;
pub mod context;
pub mod program;
pub mod quad;
pub mod shader;

pub use check::{check_gl_errors, error_name};
pub use context::RenderContext;
pub use program::{build_program, link_program, SceneProgram};
pub use quad::{VertexQuad, QUAD_VERTICES};
pub use shader::{compile_shader, format_shader_error, CompiledShader};
