//! Point and vector operators driven by a transform's cached matrix.
use crate::context::RenderContext;
use crate::error::{Fx3dError, Result};
use crate::geometry::Vector3;
use crate::transform::Transform;

impl Transform {
    /// Add the translation to every point. Never rebuilds.
    pub fn translate_points(&self, points: &mut [Vector3]) {
        let translation = self.translation.get();
        for point in points {
            *point += translation;
        }
    }

    /// `dest[i] = mat * src[i]` for every point.
    ///
    /// Both buffers must hold the same number of points; on a mismatch
    /// nothing is written.
    pub fn rotate_points(
        &mut self,
        ctx: &RenderContext,
        src: &[Vector3],
        dest: &mut [Vector3],
    ) -> Result<()> {
        if src.len() != dest.len() {
            return Err(Fx3dError::LengthMismatch {
                src: src.len(),
                dest: dest.len(),
            });
        }
        self.rebuild(ctx);

        let mat = self.mat;
        for (out, point) in dest.iter_mut().zip(src) {
            *out = mat.mul_vector(*point);
        }
        Ok(())
    }

    /// Rotate a buffer in place.
    pub fn rotate_points_in_place(&mut self, ctx: &RenderContext, points: &mut [Vector3]) {
        self.rebuild(ctx);

        let mat = self.mat;
        for point in points {
            *point = mat.mul_vector(*point);
        }
    }

    /// Rotate then translate a buffer in place (local to parent space).
    pub fn transform_points(&mut self, ctx: &RenderContext, points: &mut [Vector3]) {
        self.rotate_points_in_place(ctx, points);
        self.translate_points(points);
    }

    /// Express `src` in this transform's local frame: `mat_inv * src`.
    pub fn inverse_rotate(&mut self, ctx: &RenderContext, src: &Vector3) -> Vector3 {
        self.rebuild(ctx);
        self.apply_inverse(*src)
    }
}
