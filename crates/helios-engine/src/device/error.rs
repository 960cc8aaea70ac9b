use thiserror::Error;

/// Setup-time failure reasons.
///
/// All of these are fatal by contract: constructors return them as `Result`
/// errors and the runtime propagates them out of `main`, terminating the
/// process. There is no recovery or retry path at setup time.
#[derive(Debug, Error)]
pub enum SetupError {
    /// No suitable adapter or logical device could be acquired.
    #[error("GPU device unavailable: {0}")]
    DeviceUnavailable(String),

    /// The window surface could not be created or configured.
    #[error("surface unavailable: {0}")]
    SurfaceUnavailable(String),

    /// A named program entry point failed to resolve, or its pipeline failed
    /// validation.
    #[error("program compilation failed for `{entry}`: {reason}")]
    ProgramCompileFailed { entry: String, reason: String },

    /// A GPU resource (texture, buffer) could not be allocated.
    #[error("resource allocation failed: {0}")]
    ResourceAllocationFailed(String),
}

/// High-level response to a per-frame surface error.
///
/// Per-frame failures are the non-fatal tier: the affected tick is skipped
/// and the next tick is attempted independently. Only out-of-memory ends the
/// run.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface must be reconfigured; rendering may resume next tick.
    Reconfigured,
    /// Transient error; skip the current tick's work.
    SkipFrame,
    /// Fatal error (out of memory); terminate gracefully.
    Fatal,
}

/// Maps a `wgpu::SurfaceError` to the action the frame loop should take.
pub fn surface_error_action(err: &wgpu::SurfaceError) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
            SurfaceErrorAction::Reconfigured
        }
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout => SurfaceErrorAction::SkipFrame,
        wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_out_of_memory_is_fatal() {
        assert_eq!(
            surface_error_action(&wgpu::SurfaceError::OutOfMemory),
            SurfaceErrorAction::Fatal
        );
        assert_eq!(
            surface_error_action(&wgpu::SurfaceError::Timeout),
            SurfaceErrorAction::SkipFrame
        );
        assert_eq!(
            surface_error_action(&wgpu::SurfaceError::Other),
            SurfaceErrorAction::SkipFrame
        );
    }

    #[test]
    fn lost_and_outdated_reconfigure() {
        assert_eq!(
            surface_error_action(&wgpu::SurfaceError::Lost),
            SurfaceErrorAction::Reconfigured
        );
        assert_eq!(
            surface_error_action(&wgpu::SurfaceError::Outdated),
            SurfaceErrorAction::Reconfigured
        );
    }

    #[test]
    fn setup_errors_name_the_failing_entry_point() {
        let err = SetupError::ProgramCompileFailed {
            entry: "cMain".to_string(),
            reason: "entry point not found".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("cMain"));
        assert!(msg.contains("entry point not found"));
    }
}
