//! Rigid transforms with a lazily rebuilt rotation matrix
use crate::context::RenderContext;
use crate::fixed::{dot3, Fix};
use crate::geometry::{Matrix3, Vector3};
use crate::shared::Shared;
use crate::trig;

/// Translation component of a transform
pub type Translation = Vector3;

/// Euler angles around the x, y and z axes (fixed-point degrees)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rotation {
    pub x: Fix,
    pub y: Fix,
    pub z: Fix,
}

impl Rotation {
    pub const fn new(x: Fix, y: Fix, z: Fix) -> Self {
        Self { x, y, z }
    }

    pub const fn zero() -> Self {
        Self::new(Fix::ZERO, Fix::ZERO, Fix::ZERO)
    }

    /// Build from whole degrees
    pub const fn from_degrees(x: i32, y: i32, z: i32) -> Self {
        Self::new(Fix::from_int(x), Fix::from_int(y), Fix::from_int(z))
    }

    /// Rotate by delta amounts (in degrees)
    pub fn rotate(&mut self, dx: Fix, dy: Fix, dz: Fix) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }

    /// Wrap each angle into `[0, 360)`, correcting at most one turn.
    pub fn normalized(self) -> Self {
        Self::new(wrap_once(self.x), wrap_once(self.y), wrap_once(self.z))
    }

    /// Whether every angle lies within one turn of `[0, 360)`.
    pub fn within_single_wrap(&self) -> bool {
        let lo = -Fix::DEG_360;
        let hi = Fix::DEG_360 + Fix::DEG_360;
        [self.x, self.y, self.z]
            .iter()
            .all(|angle| (lo..hi).contains(angle))
    }
}

fn wrap_once(angle: Fix) -> Fix {
    if angle >= Fix::DEG_360 {
        angle - Fix::DEG_360
    } else if angle < Fix::ZERO {
        angle + Fix::DEG_360
    } else {
        angle
    }
}

/// `(a * b + c * d) >> FRAC_BITS`, shifted once after the sum.
#[inline]
fn mac2(a: Fix, b: Fix, c: Fix, d: Fix) -> Fix {
    dot3([a, c, Fix::ZERO], [b, d, Fix::ZERO])
}

/// Rotation + translation bound to caller-owned shared records.
///
/// The transform caches its rotation matrix `mat`, the transpose `mat_inv`,
/// and two directions derived from it: the local-space camera axis and the
/// local-space light direction. The cache is valid while the bound
/// [`Rotation`] record keeps the version it was built from. Any write to
/// that record, through this transform or through another handle, makes
/// the transform dirty and the next read rebuilds.
///
/// Cloning a transform clones its cache and shares its records.
#[derive(Debug, Clone)]
pub struct Transform {
    pub(crate) translation: Shared<Translation>,
    pub(crate) rotation: Shared<Rotation>,
    pub(crate) mat: Matrix3,
    pub(crate) mat_inv: Matrix3,
    pub(crate) camera_inv: Vector3,
    pub(crate) light_inv: Vector3,
    /// Rotation version `mat` was built against.
    built_version: Option<u64>,
    /// `mat_inv`, `camera_inv` and `light_inv` match `mat`.
    extras_current: bool,
}

impl Transform {
    /// Bind to existing records. The cache starts dirty.
    pub fn new(translation: Shared<Translation>, rotation: Shared<Rotation>) -> Self {
        Self {
            translation,
            rotation,
            mat: Matrix3::IDENTITY,
            mat_inv: Matrix3::IDENTITY,
            camera_inv: Vector3::Z,
            light_inv: Vector3::ZERO,
            built_version: None,
            extras_current: false,
        }
    }

    /// Zero the bound records and reset the cache to identity.
    pub fn reset(&mut self, ctx: &RenderContext) {
        self.rotation.set(Rotation::zero());
        self.translation.set(Translation::ZERO);

        self.mat = Matrix3::IDENTITY;
        self.mat_inv = Matrix3::IDENTITY;
        // camera view axis (0, 0, 1)
        self.camera_inv = Vector3::Z;
        self.mark_built();
        self.extras_current = true;

        if ctx.light_enabled() {
            self.light_inv = self.apply_inverse(ctx.light());
        }
    }

    /// Attach records. Switching to a different rotation record marks the
    /// transform dirty.
    pub fn bind(&mut self, translation: Shared<Translation>, rotation: Shared<Rotation>) {
        self.translation = translation;

        if !self.rotation.ptr_eq(&rotation) {
            self.rotation = rotation;
            self.built_version = None;
        }
    }

    pub fn translation(&self) -> &Shared<Translation> {
        &self.translation
    }

    pub fn rotation(&self) -> &Shared<Rotation> {
        &self.rotation
    }

    pub fn set_translation(&self, x: Fix, y: Fix, z: Fix) {
        self.translation.set(Translation::new(x, y, z));
    }

    /// Set the rotation angles. Identical angles leave the cache untouched.
    pub fn set_rotation(&self, x: Fix, y: Fix, z: Fix) {
        self.rotation.set(Rotation::new(x, y, z));
    }

    pub fn translate_by(&self, delta: Translation) {
        self.translation.update(|t| t + delta);
    }

    /// Accumulate rotation deltas. Keep the accumulated angles within one
    /// turn of `[0, 360)` between rebuilds.
    pub fn rotate_by(&self, dx: Fix, dy: Fix, dz: Fix) {
        self.rotation.update(|mut r| {
            r.rotate(dx, dy, dz);
            r
        });
    }

    /// Whether `mat` is stale relative to the bound rotation.
    pub fn is_dirty(&self) -> bool {
        self.built_version != Some(self.rotation.version())
    }

    /// Bring the matrix and its derived data up to date.
    pub fn rebuild(&mut self, ctx: &RenderContext) {
        if self.is_dirty() {
            self.build(ctx);
        } else if !self.extras_current {
            self.build_extras(ctx);
        }
    }

    /// Rebuild the linear part only; used when composing.
    pub(crate) fn rebuild_core(&mut self) {
        if self.is_dirty() {
            self.build_core();
        }
    }

    /// Unconditional full build: core then extras.
    pub fn build(&mut self, ctx: &RenderContext) {
        self.build_core();
        self.build_extras(ctx);
    }

    /// Build `mat` from the bound rotation angles.
    ///
    /// The angles are normalized to `[0, 360)` and stored back into the
    /// rotation record before the sines and cosines are looked up.
    pub fn build_core(&mut self) {
        let raw = self.rotation.get();
        if !raw.within_single_wrap() {
            log::warn!(
                "rotation ({}, {}, {}) is more than one turn out of range; matrix built from unnormalized angles",
                raw.x,
                raw.y,
                raw.z
            );
        }
        let angles = raw.normalized();
        self.rotation.set(angles);

        let (sx, cx) = (trig::sin(angles.x), trig::cos(angles.x));
        let (sy, cy) = (trig::sin(angles.y), trig::cos(angles.y));
        let (sz, cz) = (trig::sin(angles.z), trig::cos(angles.z));

        let sxsy = sx.mul(sy);
        let cxsy = cx.mul(sy);

        self.mat = Matrix3::from_rows(
            Vector3::new(
                cy.mul(cz),
                mac2(sxsy, cz, cx, sz),
                mac2(sx, sz, -cxsy, cz),
            ),
            Vector3::new(
                -cy.mul(sz),
                mac2(cx, cz, -sxsy, sz),
                mac2(cxsy, sz, sx, cz),
            ),
            Vector3::new(sy, -sx.mul(cy), cx.mul(cy)),
        );

        self.mark_built();
        self.extras_current = false;
        log::trace!("built rotation matrix for ({}, {}, {})", angles.x, angles.y, angles.z);
    }

    /// Derive `mat_inv`, `camera_inv` and (with lighting on) `light_inv`
    /// from the current `mat`.
    pub fn build_extras(&mut self, ctx: &RenderContext) {
        self.mat_inv = self.mat.transpose();
        // local direction of the camera view axis (0, 0, 1)
        self.camera_inv = self.mat_inv.column_z();
        self.extras_current = true;

        if ctx.light_enabled() {
            self.light_inv = self.apply_inverse(ctx.light());
        }
    }

    /// Rotation matrix, rebuilt first if stale.
    pub fn matrix(&mut self, ctx: &RenderContext) -> Matrix3 {
        self.rebuild(ctx);
        self.mat
    }

    /// Transposed (inverse) rotation matrix, rebuilt first if stale.
    pub fn inverse_matrix(&mut self, ctx: &RenderContext) -> Matrix3 {
        self.rebuild(ctx);
        self.mat_inv
    }

    /// Local-space direction that maps onto the world view axis.
    pub fn camera_inv(&mut self, ctx: &RenderContext) -> Vector3 {
        self.rebuild(ctx);
        self.camera_inv
    }

    /// Light direction in local space. Only maintained while lighting is
    /// enabled; otherwise the last computed value is returned.
    pub fn light_inv(&mut self, ctx: &RenderContext) -> Vector3 {
        self.rebuild(ctx);
        self.light_inv
    }

    /// `mat_inv * v` with the cache as it stands.
    #[inline]
    pub(crate) fn apply_inverse(&self, v: Vector3) -> Vector3 {
        self.mat_inv.mul_vector(v)
    }

    /// Take over a fully built cache from `source`.
    pub(crate) fn copy_cache_from(&mut self, source: &Transform) {
        self.mat = source.mat;
        self.mat_inv = source.mat_inv;
        self.camera_inv = source.camera_inv;
        self.light_inv = source.light_inv;
        self.mark_built();
        self.extras_current = true;
    }

    /// Install a composed linear part and translation, then derive extras.
    pub(crate) fn write_composed(&mut self, mat: Matrix3, translation: Translation, ctx: &RenderContext) {
        self.mat = mat;
        self.translation.set(translation);
        self.mark_built();
        self.build_extras(ctx);
    }

    fn mark_built(&mut self) {
        self.built_version = Some(self.rotation.version());
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(Shared::default(), Shared::default())
    }
}
