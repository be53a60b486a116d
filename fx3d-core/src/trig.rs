//! Sine and cosine of fixed-point angles in degrees.
use crate::fixed::{Fix, FRAC_BITS};

include!(concat!(env!("OUT_DIR"), "/sin_table.rs"));

/// Table steps per full turn.
const STEPS_PER_TURN: i64 = 1024;
const QUARTER: i64 = STEPS_PER_TURN / 4;
const FRAC_MASK: i64 = (1 << FRAC_BITS) - 1;

/// Sine at a table step, for any step within one turn.
#[inline]
fn step_sin(step: i64) -> i64 {
    let step = step & (STEPS_PER_TURN - 1);
    let offset = (step & (QUARTER - 1)) as usize;
    let quarter = QUARTER as usize;
    match step / QUARTER {
        0 => SIN_QUARTER[offset] as i64,
        1 => SIN_QUARTER[quarter - offset] as i64,
        2 => -(SIN_QUARTER[offset] as i64),
        _ => -(SIN_QUARTER[quarter - offset] as i64),
    }
}

/// Sine of `angle` (degrees). Any angle is accepted.
pub fn sin(angle: Fix) -> Fix {
    let full_turn = Fix::DEG_360.to_bits() as i64;
    let wrapped = (angle.to_bits() as i64).rem_euclid(full_turn);
    // Position in table steps, keeping FRAC_BITS of sub-step precision.
    let position = wrapped * STEPS_PER_TURN / 360;
    let step = position >> FRAC_BITS;
    let frac = position & FRAC_MASK;

    let lo = step_sin(step);
    let hi = step_sin(step + 1);
    Fix::from_bits((lo + (((hi - lo) * frac) >> FRAC_BITS)) as i32)
}

/// Cosine of `angle` (degrees).
pub fn cos(angle: Fix) -> Fix {
    sin(angle + Fix::from_int(90))
}
