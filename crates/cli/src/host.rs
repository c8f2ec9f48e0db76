//! Window and event-loop plumbing around the render context.
//!
//! The host owns the pacing: every display refresh requests a redraw, and
//! each redraw performs exactly one frame step. A surface resize is a
//! repeated setup at the new size.

use glutin::event::{Event, WindowEvent};
use glutin::event_loop::{ControlFlow, EventLoop};
use glutin::window::WindowBuilder;
use glutin::ContextBuilder;

use shaderloop_core::render::RenderContext;
use shaderloop_core::Scene;

use crate::error::CliError;

/// Opens a window, builds the GL context, runs setup, and services the
/// event loop until the window closes.
///
/// # Errors
///
/// `CliError::Window` if the window or GL context cannot be created, or
/// `CliError::Render` if the initial setup fails.
#[allow(unsafe_code)]
pub fn run_windowed(scene: Scene, width: u32, height: u32) -> Result<(), CliError> {
    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title(format!("shaderloop - {}", scene.name()))
        .with_inner_size(glutin::dpi::LogicalSize::new(width as f64, height as f64));
    let windowed = ContextBuilder::new()
        .with_vsync(true)
        .build_windowed(window, &event_loop)
        .map_err(|e| CliError::Window(format!("could not create window: {e}")))?;

    // SAFETY: the context is made current exactly once, on this thread,
    // before any GL call goes through it.
    let windowed = unsafe { windowed.make_current() }
        .map_err(|(_, e)| CliError::Window(format!("could not make context current: {e}")))?;

    // SAFETY: the loader resolves symbols against the live, current context.
    let gl = unsafe {
        glow::Context::from_loader_function(|s| windowed.get_proc_address(s) as *const _)
    };

    let mut context = RenderContext::new();
    let size = windowed.window().inner_size();
    context.setup(&gl, &scene, size.width, size.height)?;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;
        match event {
            Event::MainEventsCleared => windowed.window().request_redraw(),
            Event::RedrawRequested(_) => {
                context.render_frame(&gl);
                if let Err(e) = windowed.swap_buffers() {
                    log::error!("swap_buffers failed: {e}");
                }
            }
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::Resized(size) => {
                    windowed.resize(size);
                    // Frames degrade to reported no-ops until a later
                    // setup succeeds.
                    if let Err(e) = context.setup(&gl, &scene, size.width, size.height) {
                        log::error!("setup after resize failed: {e}");
                    }
                }
                WindowEvent::CloseRequested => *control_flow = ControlFlow::Exit,
                _ => {}
            },
            _ => {}
        }
    })
}
