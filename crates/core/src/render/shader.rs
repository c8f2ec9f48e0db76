//! Per-stage shader compilation with diagnostic extraction.
//!
//! Compilation requires a live `glow::Context`; the log formatting helper
//! is pure string processing and testable without one. Failures never
//! leak a partially-built object: the shader is deleted before the error
//! is returned.

use glow::HasContext;

use crate::diag::{DiagLevel, DiagnosticSink};
use crate::error::RenderError;
use crate::scene::ShaderStage;

/// A successfully compiled shader object for one stage.
///
/// Only exists on the success path; consumed by the linker, which deletes
/// the underlying GPU object once the program holds its own copy.
pub struct CompiledShader {
    pub(crate) raw: glow::Shader,
    /// The stage this shader was compiled for.
    pub stage: ShaderStage,
}

impl CompiledShader {
    /// Deletes the underlying shader object without linking it.
    ///
    /// Used when a later stage fails and this one must be released.
    #[allow(unsafe_code)]
    pub(crate) fn delete(self, gl: &glow::Context) {
        // SAFETY: raw is a valid shader handle produced by compile_shader.
        unsafe { gl.delete_shader(self.raw) };
    }
}

fn gl_stage(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    }
}

/// Pairs the driver's info log with a line-numbered copy of the source.
///
/// Driver messages reference line numbers; numbering the source makes the
/// two halves line up when the result lands in a log file. Either input
/// may be empty.
pub fn format_shader_error(source: &str, log: &str) -> String {
    if source.is_empty() {
        return log.to_string();
    }

    let lines: Vec<&str> = source.lines().collect();
    let width = lines.len().to_string().len();
    let mut out = String::with_capacity(source.len() + log.len() + lines.len() * 4);
    for (i, line) in lines.iter().enumerate() {
        out.push_str(&format!("{:>width$}: {line}\n", i + 1));
    }
    if !log.is_empty() {
        out.push('\n');
        out.push_str(log);
    }
    out
}

/// Compiles one shader stage from source.
///
/// On failure the driver's info log (if any) is forwarded to the sink
/// tagged with the failing stage, the shader object is deleted, and a
/// `RenderError::Compile` carrying the formatted log is returned. A
/// driver that refuses to allocate the object at all yields
/// `RenderError::Allocation`, reported the same way.
///
/// # Errors
///
/// `RenderError::Allocation` or `RenderError::Compile`.
#[allow(unsafe_code)]
pub fn compile_shader(
    gl: &glow::Context,
    stage: ShaderStage,
    source: &str,
    sink: &dyn DiagnosticSink,
) -> Result<CompiledShader, RenderError> {
    // SAFETY: glow wraps raw GL calls as unsafe. The stage constant is
    // valid and the handle is checked on every path before reuse.
    let shader = match unsafe { gl.create_shader(gl_stage(stage)) } {
        Ok(shader) => shader,
        Err(detail) => {
            sink.report(
                DiagLevel::Error,
                stage.name(),
                &format!("could not allocate shader object: {detail}"),
            );
            return Err(RenderError::Allocation {
                what: "shader object",
                detail,
            });
        }
    };

    unsafe {
        gl.shader_source(shader, source);
        gl.compile_shader(shader);
    }

    if unsafe { gl.get_shader_compile_status(shader) } {
        return Ok(CompiledShader { raw: shader, stage });
    }

    let info_log = unsafe { gl.get_shader_info_log(shader) };
    unsafe { gl.delete_shader(shader) };

    let log = format_shader_error(source, &info_log);
    if !log.is_empty() {
        sink.report(DiagLevel::Error, stage.name(), &log);
    }
    Err(RenderError::Compile { stage, log })
}
