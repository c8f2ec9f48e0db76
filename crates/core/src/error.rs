//! Error types for the shaderloop core.

use crate::scene::ShaderStage;
use thiserror::Error;

/// Errors produced while building a shader program or setting up rendering.
///
/// Transient per-frame GPU errors are deliberately not represented here:
/// they are drained and reported through the diagnostic sink without
/// interrupting the frame.
#[derive(Debug, Clone, Error)]
pub enum RenderError {
    /// The driver failed to hand out a GPU object (shader, program, buffer).
    #[error("could not allocate {what}: {detail}")]
    Allocation {
        /// What kind of object was requested (e.g. "shader object").
        what: &'static str,
        /// The driver's description of the failure.
        detail: String,
    },

    /// A shader stage failed to compile.
    #[error("shader compile error ({stage}):\n{log}")]
    Compile {
        /// The stage that failed.
        stage: ShaderStage,
        /// Formatted driver diagnostics, with numbered source lines.
        log: String,
    },

    /// The program failed to link.
    #[error("program link error:\n{log}")]
    Link {
        /// The driver's link info log.
        log: String,
    },

    /// A required vertex attribute did not resolve to a location.
    #[error("attribute not found in linked program: {name}")]
    MissingAttribute {
        /// The attribute name that was looked up.
        name: &'static str,
    },

    /// A scene name was not found in the registry.
    #[error("unknown scene: {0}")]
    UnknownScene(String),
}
