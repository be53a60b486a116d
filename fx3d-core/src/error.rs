//! Error type for the few checked paths of the engine.
use std::fmt;

pub type Result<T> = std::result::Result<T, Fx3dError>;

/// Errors reported by fx3d operations.
///
/// Numeric range problems (overflow, angles more than one turn out of
/// range) are contracts on the caller and are never reported here.
#[derive(Debug)]
pub enum Fx3dError {
    /// Source and destination point buffers differ in length.
    LengthMismatch { src: usize, dest: usize },
    /// A render context configuration could not be parsed or written.
    Config(serde_json::Error),
}

impl fmt::Display for Fx3dError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fx3dError::LengthMismatch { src, dest } => write!(
                f,
                "point buffer length mismatch: {src} source points, {dest} destination slots"
            ),
            Fx3dError::Config(e) => write!(f, "render context config error: {e}"),
        }
    }
}

impl std::error::Error for Fx3dError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Fx3dError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Fx3dError {
    fn from(e: serde_json::Error) -> Self {
        Fx3dError::Config(e)
    }
}
