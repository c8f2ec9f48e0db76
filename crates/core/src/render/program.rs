//! Program linking and uniform updates.
//!
//! Linking consumes the two compiled stages, resolves the attribute and
//! uniform locations once, and hands back a [`SceneProgram`] that caches
//! them for the whole program lifetime. Locations are never re-queried per
//! frame; a program swap goes through [`build_program`] again.

use glow::HasContext;

use crate::diag::{DiagLevel, DiagnosticSink};
use crate::error::RenderError;
use crate::scene::{self, Scene, ShaderStage};

use super::check::check_gl_errors;
use super::shader::{compile_shader, CompiledShader};

/// A linked program with its locations resolved at link time.
///
/// Invariant: a `SceneProgram` value always wraps a successfully linked
/// program whose position attribute resolved -- every failure path returns
/// an error instead of constructing one.
pub struct SceneProgram {
    program: glow::Program,
    position_attrib: u32,
    resolution_uniform: Option<glow::UniformLocation>,
    time_uniform: Option<glow::UniformLocation>,
}

impl SceneProgram {
    /// Location of the position attribute.
    pub fn position_attrib(&self) -> u32 {
        self.position_attrib
    }

    /// Whether the resolution uniform resolved at link time.
    pub fn has_resolution_uniform(&self) -> bool {
        self.resolution_uniform.is_some()
    }

    /// Whether the time uniform resolved at link time.
    pub fn has_time_uniform(&self) -> bool {
        self.time_uniform.is_some()
    }

    /// Makes this program the active one.
    #[allow(unsafe_code)]
    pub fn bind(&self, gl: &glow::Context) {
        // SAFETY: program is a valid handle; see the struct invariant.
        unsafe { gl.use_program(Some(self.program)) };
    }

    /// Sets the resolution uniform, if the scene declares one.
    ///
    /// A scene that never samples the resolution simply has no such
    /// uniform after link; that is not an error and the call is skipped.
    #[allow(unsafe_code)]
    pub fn set_resolution(&self, gl: &glow::Context, width: f32, height: f32) {
        if let Some(loc) = &self.resolution_uniform {
            // SAFETY: loc was resolved against this program at link time
            // and the program is bound by the frame sequence before any
            // uniform call.
            unsafe { gl.uniform_2_f32(Some(loc), width, height) };
        }
    }

    /// Sets the time uniform, if the scene declares one.
    #[allow(unsafe_code)]
    pub fn set_time(&self, gl: &glow::Context, seconds: f32) {
        if let Some(loc) = &self.time_uniform {
            // SAFETY: as for set_resolution.
            unsafe { gl.uniform_1_f32(Some(loc), seconds) };
        }
    }

    /// Deletes the underlying program object.
    #[allow(unsafe_code)]
    pub fn destroy(&self, gl: &glow::Context) {
        // SAFETY: program is a valid handle owned by this value.
        unsafe { gl.delete_program(self.program) };
    }
}

/// Links two compiled stages into a [`SceneProgram`].
///
/// Both shader objects are detached and deleted once the link attempt is
/// over, whatever its outcome -- the program keeps its own copies. Each
/// attach is followed by a GPU error drain so a bad attach is visible in
/// the diagnostics even though attach itself returns nothing.
///
/// # Errors
///
/// `RenderError::Allocation` if the driver refuses a program object,
/// `RenderError::Link` with the driver's log on link failure, or
/// `RenderError::MissingAttribute` if the position attribute does not
/// resolve in the linked program.
#[allow(unsafe_code)]
pub fn link_program(
    gl: &glow::Context,
    vertex: CompiledShader,
    fragment: CompiledShader,
    sink: &dyn DiagnosticSink,
) -> Result<SceneProgram, RenderError> {
    // SAFETY: glow wraps raw GL calls as unsafe. Shader handles come from
    // compile_shader and the program handle is checked at creation; every
    // failure path deletes what it allocated.
    let program = match unsafe { gl.create_program() } {
        Ok(program) => program,
        Err(detail) => {
            sink.report(
                DiagLevel::Error,
                "link",
                &format!("could not allocate program object: {detail}"),
            );
            vertex.delete(gl);
            fragment.delete(gl);
            return Err(RenderError::Allocation {
                what: "program object",
                detail,
            });
        }
    };

    unsafe {
        gl.attach_shader(program, vertex.raw);
        check_gl_errors(gl, sink, "attach_shader(vertex)");
        gl.attach_shader(program, fragment.raw);
        check_gl_errors(gl, sink, "attach_shader(fragment)");
        gl.link_program(program);
    }

    let linked = unsafe { gl.get_program_link_status(program) };

    // The program owns its own copies after the link attempt; the stage
    // objects are no longer needed either way.
    unsafe {
        gl.detach_shader(program, vertex.raw);
        gl.detach_shader(program, fragment.raw);
        gl.delete_shader(vertex.raw);
        gl.delete_shader(fragment.raw);
    }

    if !linked {
        let log = unsafe { gl.get_program_info_log(program) };
        unsafe { gl.delete_program(program) };
        if !log.is_empty() {
            sink.report(DiagLevel::Error, "link", &log);
        }
        return Err(RenderError::Link { log });
    }

    let Some(position_attrib) =
        (unsafe { gl.get_attrib_location(program, scene::ATTRIB_POSITION) })
    else {
        unsafe { gl.delete_program(program) };
        sink.report(
            DiagLevel::Error,
            "link",
            &format!("attribute {} not found", scene::ATTRIB_POSITION),
        );
        return Err(RenderError::MissingAttribute {
            name: scene::ATTRIB_POSITION,
        });
    };

    let resolution_uniform =
        unsafe { gl.get_uniform_location(program, scene::UNIFORM_RESOLUTION) };
    let time_uniform = unsafe { gl.get_uniform_location(program, scene::UNIFORM_TIME) };

    sink.report(
        DiagLevel::Info,
        "link",
        &format!(
            "{} -> {position_attrib}, {} {}, {} {}",
            scene::ATTRIB_POSITION,
            scene::UNIFORM_RESOLUTION,
            if resolution_uniform.is_some() {
                "resolved"
            } else {
                "absent"
            },
            scene::UNIFORM_TIME,
            if time_uniform.is_some() {
                "resolved"
            } else {
                "absent"
            },
        ),
    );

    Ok(SceneProgram {
        program,
        position_attrib,
        resolution_uniform,
        time_uniform,
    })
}

/// Compiles both of a scene's stages and links them.
///
/// Stops at the first compile failure: a failed vertex stage means the
/// fragment stage is never compiled and no link is attempted, and a
/// failed fragment stage releases the surviving vertex shader before
/// returning.
///
/// # Errors
///
/// Whatever [`compile_shader`] or [`link_program`] returns.
pub fn build_program(
    gl: &glow::Context,
    scene: &Scene,
    sink: &dyn DiagnosticSink,
) -> Result<SceneProgram, RenderError> {
    let vertex = compile_shader(gl, ShaderStage::Vertex, scene.vertex_source(), sink)?;
    let fragment = match compile_shader(gl, ShaderStage::Fragment, scene.fragment_source(), sink) {
        Ok(fragment) => fragment,
        Err(err) => {
            vertex.delete(gl);
            return Err(err);
        }
    };
    link_program(gl, vertex, fragment, sink)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Linking requires a live GL context; the pure orchestration contract
    // (stop at first failure, release survivors) is documented by the
    // ignored tests below and exercised end-to-end by a GL-backed host.

    #[test]
    fn scene_program_struct_has_expected_api() {
        fn _assert_api(p: &SceneProgram, gl: &glow::Context) {
            let _attrib: u32 = p.position_attrib();
            let _res: bool = p.has_resolution_uniform();
            let _time: bool = p.has_time_uniform();
            p.bind(gl);
            p.set_resolution(gl, 800.0, 600.0);
            p.set_time(gl, 0.5);
            p.destroy(gl);
        }
    }

    #[test]
    #[ignore = "requires GL context"]
    fn build_program_links_both_builtin_scenes() {
        // Would test: build_program succeeds for "ember" and "plasma" and
        // resolves the position attribute and both uniforms.
    }

    #[test]
    #[ignore = "requires GL context"]
    fn vertex_compile_failure_short_circuits_before_link() {
        // Would test: with a broken vertex source the sink records exactly
        // one compile diagnostic (tagged "vertex") and none tagged "link".
    }

    #[test]
    #[ignore = "requires GL context"]
    fn link_failure_reports_log_and_deletes_program() {
        // Would test: stages with mismatched varyings fail to link, the
        // sink receives the driver's link log, and Err(Link) is returned.
    }
}
