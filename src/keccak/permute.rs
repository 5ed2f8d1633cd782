//! Keccak-f[1600] permutation.
//!
//! Each of the 24 rounds applies, in order:
//! 1. theta - XOR every lane with the parities of its two neighbouring columns
//! 2. rho   - rotate each lane by its fixed offset
//! 3. pi    - move lane (x, y) to (y, 2x + 3y mod 5)
//! 4. chi   - the non-linear row step `a ^= !b & c`
//! 5. iota  - XOR the round constant into lane (0, 0)
//!
//! The state is mutated in place; no step allocates.

use super::{LANES, RHO_OFFSETS, ROUNDS, ROUND_CONSTANTS};

/// The 1600-bit permutation state: lane `(x, y)` lives at index `x + 5 * y`.
pub type KeccakState = [u64; LANES];

#[inline(always)]
fn theta(a: &mut KeccakState) {
    let mut c = [0u64; 5];
    for x in 0..5 {
        c[x] = a[x] ^ a[x + 5] ^ a[x + 10] ^ a[x + 15] ^ a[x + 20];
    }
    for x in 0..5 {
        let d = c[(x + 4) % 5] ^ c[(x + 1) % 5].rotate_left(1);
        for y in 0..5 {
            a[x + 5 * y] ^= d;
        }
    }
}

/// rho and pi fused: rotate each lane, then write it to its new position.
#[inline(always)]
fn rho_pi(a: &KeccakState, b: &mut KeccakState) {
    for y in 0..5 {
        for x in 0..5 {
            let src = x + 5 * y;
            let dst = y + 5 * ((2 * x + 3 * y) % 5);
            b[dst] = a[src].rotate_left(RHO_OFFSETS[src]);
        }
    }
}

#[inline(always)]
fn chi(b: &KeccakState, a: &mut KeccakState) {
    for y in 0..5 {
        let row = 5 * y;
        for x in 0..5 {
            a[row + x] = b[row + x] ^ (!b[row + (x + 1) % 5] & b[row + (x + 2) % 5]);
        }
    }
}

#[inline(always)]
fn iota(a: &mut KeccakState, round: usize) {
    a[0] ^= ROUND_CONSTANTS[round];
}

#[inline(always)]
fn round(a: &mut KeccakState, scratch: &mut KeccakState, index: usize) {
    theta(a);
    rho_pi(a, scratch);
    chi(scratch, a);
    iota(a, index);
}

/// Apply the full 24-round Keccak-f[1600] permutation in place.
pub fn permute(state: &mut KeccakState) {
    let mut scratch = [0u64; LANES];
    for index in 0..ROUNDS {
        round(state, &mut scratch, index);
    }
}

/// Keccak-f[1600] with per-round trace output for debugging.
///
/// Returns `(final_state, round_states)` where `round_states[i]` is the state
/// after round `i`. The last entry equals the final state.
pub fn permute_with_trace(state: &KeccakState) -> (KeccakState, Vec<KeccakState>) {
    let mut st = *state;
    let mut scratch = [0u64; LANES];
    let mut traces = Vec::with_capacity(ROUNDS);

    for index in 0..ROUNDS {
        round(&mut st, &mut scratch, index);
        traces.push(st);
    }

    (st, traces)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permute_zero_state() {
        // First and last lanes of Keccak-f[1600] applied to the all-zero state
        // (Keccak team intermediate values).
        let mut state = [0u64; LANES];
        permute(&mut state);
        assert_eq!(state[0], 0xF1258F7940E1DDE7);
        assert_eq!(state[24], 0xEAF1FF7B5CECA249);
    }

    #[test]
    fn test_permute_deterministic() {
        let mut s1 = [0u64; LANES];
        s1[3] = 0xDEADBEEF12345678;
        let mut s2 = s1;
        permute(&mut s1);
        permute(&mut s2);
        assert_eq!(s1, s2);
    }

    #[test]
    fn test_theta_zero_state() {
        let mut state = [0u64; LANES];
        theta(&mut state);
        assert_eq!(state, [0u64; LANES]);
    }

    #[test]
    fn test_theta_single_bit_diffuses_to_neighbour_columns() {
        let mut state = [0u64; LANES];
        state[0] = 1; // column 0 parity = 1
        theta(&mut state);
        // D[1] = C[0], D[4] = ROT1(C[0]); columns 0, 2, 3 see zero.
        assert_eq!(state[0], 1);
        for y in 0..5 {
            assert_eq!(state[1 + 5 * y], 1);
            assert_eq!(state[4 + 5 * y], 2);
            assert_eq!(state[2 + 5 * y], 0);
            assert_eq!(state[3 + 5 * y], 0);
        }
        for y in 1..5 {
            assert_eq!(state[5 * y], 0);
        }
    }

    #[test]
    fn test_rho_pi_moves_lane_1_0_to_0_2() {
        let mut a = [0u64; LANES];
        a[1] = 1; // lane (1, 0), rho offset 1
        let mut b = [0u64; LANES];
        rho_pi(&a, &mut b);
        assert_eq!(b[5 * 2], 2); // lane (0, 2)
        assert_eq!(b.iter().filter(|&&l| l != 0).count(), 1);
    }

    #[test]
    fn test_chi_all_ones_is_identity() {
        let b = [u64::MAX; LANES];
        let mut a = [0u64; LANES];
        chi(&b, &mut a);
        assert_eq!(a, [u64::MAX; LANES]);
    }

    #[test]
    fn test_iota_touches_only_lane_0() {
        let mut state = [0u64; LANES];
        iota(&mut state, 1);
        assert_eq!(state[0], 0x8082);
        assert!(state[1..].iter().all(|&l| l == 0));
    }

    #[test]
    fn test_trace_matches_permute() {
        let mut state = [0u64; LANES];
        state[0] = 0x0123456789ABCDEF;
        let (traced, rounds) = permute_with_trace(&state);
        assert_eq!(rounds.len(), ROUNDS);
        assert_eq!(rounds[ROUNDS - 1], traced);

        let mut direct = state;
        permute(&mut direct);
        assert_eq!(traced, direct);
    }
}
