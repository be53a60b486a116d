//! Transform composition.
//!
//! Every operator reads all of its inputs before it writes the result, so a
//! result that shares a [`Translation`] record with one of its inputs is
//! safe. When the result *is* one of the inputs, use the in-place forms
//! ([`Transform::combine_assign`], [`Transform::pre_translate`], ...).
//!
//! A result's composed matrix stays authoritative until its own rotation
//! record changes again.
use crate::context::RenderContext;
use crate::geometry::Matrix3;
use crate::transform::{Transform, Translation};

//              x y z t   x y z t
//
//          a   a b c x   k l m u   x     ak+bn+cq al+bo+cr am+bp+cs au+bv+cw+x
// tr.T =   b   d e f y . n o p v   y  =  dk+en+fq dl+eo+fr dm+ep+fs du+ev+fw+y
//          c   g h i z   q r s w   z     gk+hn+iq gl+ho+ir gm+hp+is gu+hv+iw+z
//              0 0 0 1   0 0 0 1
fn compose(left: &mut Transform, right: &mut Transform) -> (Matrix3, Translation) {
    left.rebuild_core();
    right.rebuild_core();

    let mat = left.mat.mul_matrix(&right.mat);
    let translation = left.mat.mul_vector(right.translation.get()) + left.translation.get();
    (mat, translation)
}

impl Transform {
    /// `result = left * right` (36 multiplies).
    pub fn combine(
        left: &mut Transform,
        right: &mut Transform,
        result: &mut Transform,
        ctx: &RenderContext,
    ) {
        let (mat, translation) = compose(left, right);
        result.write_composed(mat, translation, ctx);
    }

    /// `self = self * right`.
    pub fn combine_assign(&mut self, right: &mut Transform, ctx: &RenderContext) {
        let (mat, translation) = compose(self, right);
        self.write_composed(mat, translation, ctx);
    }

    /// `self = left * self`.
    pub fn combine_assign_left(&mut self, left: &mut Transform, ctx: &RenderContext) {
        let (mat, translation) = compose(left, self);
        self.write_composed(mat, translation, ctx);
    }

    /// `result = T(left) * right`: the linear part of `right` is kept and
    /// the translations add (3 additions).
    pub fn combine_translation_left(
        left: &Translation,
        right: &mut Transform,
        result: &mut Transform,
        ctx: &RenderContext,
    ) {
        right.rebuild(ctx);
        let translation = *left + right.translation.get();

        result.copy_cache_from(right);
        result.translation.set(translation);
    }

    /// `self = T(left) * self`.
    pub fn pre_translate(&mut self, left: &Translation, ctx: &RenderContext) {
        self.rebuild(ctx);
        self.translation.update(|t| *left + t);
    }

    /// `result = left * T(right)`: `right` is rotated into the frame of
    /// `left` before it is added (9 multiplies).
    pub fn combine_translation_right(
        left: &mut Transform,
        right: &Translation,
        result: &mut Transform,
        ctx: &RenderContext,
    ) {
        left.rebuild(ctx);
        let translation = left.mat.mul_vector(*right) + left.translation.get();

        result.copy_cache_from(left);
        result.translation.set(translation);
    }

    /// `self = self * T(right)`.
    pub fn post_translate(&mut self, right: &Translation, ctx: &RenderContext) {
        self.rebuild(ctx);
        let translation = self.mat.mul_vector(*right) + self.translation.get();
        self.translation.set(translation);
    }
}
