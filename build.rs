// Build script that derives the Keccak-f[1600] step constants.
// Build scripts are not part of the hashing path, so we allow expect().
#![allow(clippy::expect_used)]
//
// Generates `keccak_constants.rs` in OUT_DIR:
// - ROUND_CONSTANTS: the 24 iota constants, produced by the degree-8 LFSR
//   x^8 + x^6 + x^5 + x^4 + 1 from FIPS 202 section 3.2.5
// - RHO_OFFSETS: the 25 rho rotation amounts, indexed by x + 5*y
//
// The unit tests in src/keccak pin the output against the FIPS 202 tables.

use std::env;
use std::fs;
use std::path::Path;

const ROUNDS: usize = 24;
const LANES: usize = 25;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR not set");
    let out_path = Path::new(&out_dir);

    let round_constants = derive_round_constants();
    let rho_offsets = derive_rho_offsets();

    generate_constants_rs(out_path, &round_constants, &rho_offsets);
}

/// One step of the LFSR; returns the output bit.
fn lfsr_step(lfsr: &mut u8) -> bool {
    let bit = (*lfsr & 0x01) != 0;
    if (*lfsr & 0x80) != 0 {
        *lfsr = (*lfsr << 1) ^ 0x71;
    } else {
        *lfsr <<= 1;
    }
    bit
}

fn derive_round_constants() -> [u64; ROUNDS] {
    let mut constants = [0u64; ROUNDS];
    let mut lfsr = 0x01u8;

    for rc in constants.iter_mut() {
        for j in 0..7 {
            let bit_position = (1u32 << j) - 1;
            if lfsr_step(&mut lfsr) {
                *rc ^= 1u64 << bit_position;
            }
        }
    }

    constants
}

fn derive_rho_offsets() -> [u32; LANES] {
    let mut offsets = [0u32; LANES];
    let (mut x, mut y) = (1usize, 0usize);

    for t in 0..24u32 {
        offsets[x + 5 * y] = ((t + 1) * (t + 2) / 2) % 64;
        let next_y = (2 * x + 3 * y) % 5;
        x = y;
        y = next_y;
    }

    offsets
}

fn generate_constants_rs(out_path: &Path, round_constants: &[u64; ROUNDS], rho: &[u32; LANES]) {
    let mut code = String::new();

    code.push_str(
        r#"// Keccak-f[1600] step constants.
//
// DO NOT EDIT - This file is generated by build.rs

"#,
    );

    code.push_str("/// Iota round constants, one per round.\n");
    code.push_str(&format!("pub const ROUND_CONSTANTS: [u64; {}] = [\n", ROUNDS));
    for (round, rc) in round_constants.iter().enumerate() {
        code.push_str(&format!("    0x{:016x}, // round {}\n", rc, round));
    }
    code.push_str("];\n\n");

    code.push_str("/// Rho rotation offsets, indexed by lane `x + 5 * y`.\n");
    code.push_str(&format!("pub const RHO_OFFSETS: [u32; {}] = [\n", LANES));
    for row in rho.chunks(5) {
        code.push_str("    ");
        let cells: Vec<String> = row.iter().map(|r| format!("{:2}", r)).collect();
        code.push_str(&cells.join(", "));
        code.push_str(",\n");
    }
    code.push_str("];\n");

    fs::write(out_path.join("keccak_constants.rs"), code)
        .expect("Failed to write keccak_constants.rs");
}
