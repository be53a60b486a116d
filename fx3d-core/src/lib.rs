//! FX3D Core Library - fixed-point 3D transformation engine
//!
//! Builds and caches rotation matrices from Euler angles, composes parent
//! and child transforms, and applies them to batches of points, all in
//! 16.16 fixed-point arithmetic for targets without a floating-point unit.
//!
//! ```
//! use fx3d_core::{Fix, RenderContext, Transform, Vector3};
//!
//! let ctx = RenderContext::new();
//! let mut transform = Transform::default();
//! transform.set_rotation(Fix::ZERO, Fix::from_int(90), Fix::ZERO);
//!
//! let mut points = [Vector3::X];
//! transform.rotate_points_in_place(&ctx, &mut points);
//! assert_eq!(points[0], Vector3::Z);
//! ```

mod batch;
mod compose;
pub mod context;
pub mod error;
pub mod fixed;
pub mod geometry;
pub mod shared;
pub mod transform;
pub mod trig;

// Re-export commonly used types
pub use context::{RenderContext, Viewport};
pub use error::{Fx3dError, Result};
pub use fixed::Fix;
pub use geometry::{Matrix3, Vector3};
pub use shared::Shared;
pub use transform::{Rotation, Transform, Translation};
