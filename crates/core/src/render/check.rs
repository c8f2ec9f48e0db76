//! GPU error draining.
//!
//! GL errors queue up silently; a single failed call can leave several
//! codes pending. After every operation in the frame sequence we drain the
//! whole queue and report each code, then carry on -- a bad frame is
//! preferable to a dead host.

use glow::HasContext;

use crate::diag::{DiagLevel, DiagnosticSink};

/// Human-readable name for a GL error code.
pub fn error_name(code: u32) -> &'static str {
    match code {
        glow::INVALID_ENUM => "INVALID_ENUM",
        glow::INVALID_VALUE => "INVALID_VALUE",
        glow::INVALID_OPERATION => "INVALID_OPERATION",
        glow::INVALID_FRAMEBUFFER_OPERATION => "INVALID_FRAMEBUFFER_OPERATION",
        glow::OUT_OF_MEMORY => "OUT_OF_MEMORY",
        _ => "UNKNOWN",
    }
}

/// Drains every pending GL error and reports each one, tagged with the
/// operation that just ran. Returns the number of codes drained.
///
/// This is diagnostic-only: it never interrupts the caller, whatever it
/// finds.
#[allow(unsafe_code)]
pub fn check_gl_errors(gl: &glow::Context, sink: &dyn DiagnosticSink, op: &str) -> usize {
    let mut drained = 0;
    loop {
        // SAFETY: get_error has no preconditions beyond a live context.
        let code = unsafe { gl.get_error() };
        if code == glow::NO_ERROR {
            break;
        }
        drained += 1;
        sink.report(
            DiagLevel::Error,
            "gl",
            &format!("after {op}: error 0x{code:04X} ({})", error_name(code)),
        );
    }
    drained
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_name_maps_known_codes() {
        assert_eq!(error_name(glow::INVALID_ENUM), "INVALID_ENUM");
        assert_eq!(error_name(glow::INVALID_VALUE), "INVALID_VALUE");
        assert_eq!(error_name(glow::INVALID_OPERATION), "INVALID_OPERATION");
        assert_eq!(
            error_name(glow::INVALID_FRAMEBUFFER_OPERATION),
            "INVALID_FRAMEBUFFER_OPERATION"
        );
        assert_eq!(error_name(glow::OUT_OF_MEMORY), "OUT_OF_MEMORY");
    }

    #[test]
    fn error_name_falls_back_for_unknown_codes() {
        assert_eq!(error_name(0xDEAD), "UNKNOWN");
    }

    #[test]
    fn no_error_is_not_a_named_error() {
        // NO_ERROR terminates the drain loop before naming, so the name
        // table intentionally has no entry for it.
        assert_eq!(error_name(glow::NO_ERROR), "UNKNOWN");
    }

    #[test]
    #[ignore = "requires GL context"]
    fn drains_multiple_queued_errors() {
        // Would test: after two invalid calls, check_gl_errors reports two
        // entries and returns 2, and a second drain returns 0.
    }
}
