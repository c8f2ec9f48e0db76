//! The fixed full-screen quad.
//!
//! Four clip-space positions drawn as a triangle strip cover the entire
//! surface; the fragment shader does all the actual work. The vertex data
//! is uploaded once and never mutated.

use glow::HasContext;

use crate::diag::DiagnosticSink;
use crate::error::RenderError;

use super::check::check_gl_errors;

/// Triangle-strip positions covering clip space, interleaved x, y.
pub const QUAD_VERTICES: [f32; 8] = [
    1.0, -1.0, //
    -1.0, -1.0, //
    1.0, 1.0, //
    -1.0, 1.0, //
];

/// Number of vertices the quad draws.
pub const QUAD_VERTEX_COUNT: i32 = 4;

const FLOATS_PER_VERTEX: i32 = 2;
const STRIDE_BYTES: i32 = FLOATS_PER_VERTEX * std::mem::size_of::<f32>() as i32;

/// VAO + VBO pair holding the quad positions on the GPU.
pub struct VertexQuad {
    vao: glow::VertexArray,
    vbo: glow::Buffer,
}

impl VertexQuad {
    /// Uploads the quad vertices into a fresh VAO/VBO pair.
    ///
    /// # Errors
    ///
    /// `RenderError::Allocation` if the driver refuses either object.
    #[allow(unsafe_code)]
    pub fn new(gl: &glow::Context, sink: &dyn DiagnosticSink) -> Result<Self, RenderError> {
        // SAFETY: glow wraps raw GL calls as unsafe. Both handles are
        // checked at creation; the upload uses a static, correctly sized
        // slice and the bindings are cleared before returning.
        let vao = unsafe { gl.create_vertex_array() }.map_err(|detail| RenderError::Allocation {
            what: "vertex array object",
            detail,
        })?;
        let vbo = match unsafe { gl.create_buffer() } {
            Ok(vbo) => vbo,
            Err(detail) => {
                unsafe { gl.delete_vertex_array(vao) };
                return Err(RenderError::Allocation {
                    what: "vertex buffer object",
                    detail,
                });
            }
        };

        unsafe {
            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(&QUAD_VERTICES),
                glow::STATIC_DRAW,
            );
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
            gl.bind_vertex_array(None);
        }
        check_gl_errors(gl, sink, "quad upload");

        Ok(Self { vao, vbo })
    }

    /// Binds the quad positions to the given attribute location and
    /// enables the attribute.
    ///
    /// Called every frame before the draw; each GL call is followed by an
    /// error drain.
    #[allow(unsafe_code)]
    pub fn bind(&self, gl: &glow::Context, position_attrib: u32, sink: &dyn DiagnosticSink) {
        // SAFETY: vao/vbo are valid handles from new(); the pointer layout
        // matches the uploaded data (tightly packed vec2 floats).
        unsafe {
            gl.bind_vertex_array(Some(self.vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.vbo));
            gl.vertex_attrib_pointer_f32(
                position_attrib,
                FLOATS_PER_VERTEX,
                glow::FLOAT,
                false,
                STRIDE_BYTES,
                0,
            );
        }
        check_gl_errors(gl, sink, "vertex_attrib_pointer");
        unsafe { gl.enable_vertex_attrib_array(position_attrib) };
        check_gl_errors(gl, sink, "enable_vertex_attrib_array");
    }

    /// Deletes the VAO and VBO.
    #[allow(unsafe_code)]
    pub fn destroy(&self, gl: &glow::Context) {
        // SAFETY: both handles are valid and owned by this value.
        unsafe {
            gl.delete_buffer(self.vbo);
            gl.delete_vertex_array(self.vao);
        }
    }
}
