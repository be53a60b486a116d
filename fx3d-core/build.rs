//! Generates the quarter-wave sine table used by `trig`.
//!
//! The table covers 0..=90 degrees in 256 steps (1024 steps per turn) and
//! holds 16.16 fixed-point values, so the library itself never touches
//! floating point at run time.
use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

const QUARTER_STEPS: usize = 256;
const FRAC_BITS: u32 = 16;

fn main() {
    let mut table = String::new();
    writeln!(
        table,
        "pub(crate) const SIN_QUARTER: [i32; {}] = [",
        QUARTER_STEPS + 1
    )
    .unwrap();

    for i in 0..=QUARTER_STEPS {
        let radians = (i as f64) * std::f64::consts::FRAC_PI_2 / (QUARTER_STEPS as f64);
        let value = (radians.sin() * f64::from(1u32 << FRAC_BITS)).round() as i32;
        writeln!(table, "    {value},").unwrap();
    }
    table.push_str("];\n");

    let out_dir = env::var("OUT_DIR").unwrap();
    fs::write(Path::new(&out_dir).join("sin_table.rs"), table).unwrap();

    println!("cargo:rerun-if-changed=build.rs");
}
