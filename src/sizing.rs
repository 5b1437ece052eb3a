//! Target-size computation (spec §4.4 step 1), ported from the original
//! `resizer.cpp`'s "round up to power of two" bithack
//! (http://graphics.stanford.edu/~seander/bithacks.html#RoundUpPowerOf2).
//!
//! Spec §9 "Open question — 64-bit shift in a 32-bit rounder" requires this
//! to operate on a genuine 64-bit quantity throughout, never narrowed to
//! `u32`, so the `n |= n >> 32` step is well-defined.

/// Round `n` up to the next power of two, as a 64-bit value.
fn round_up_pow2_u64(mut n: u64) -> u64 {
    if n == 0 {
        return 1;
    }
    n -= 1;
    n |= n >> 1;
    n |= n >> 2;
    n |= n >> 4;
    n |= n >> 8;
    n |= n >> 16;
    n |= n >> 32;
    n + 1
}

/// Round `n` down to the nearest power of two not exceeding it (spec §4.4
/// step 3: "fit to the nearest powers of two not exceeding targets"). `n`
/// may not already be a power of two, since step 1's clamp to the texture's
/// original width can land on an arbitrary value when that width isn't
/// itself a power of two.
fn floor_pow2_u64(n: u64) -> u64 {
    if n == 0 {
        return 1;
    }
    let mut p = 1u64 << 63;
    while p > n {
        p >>= 1;
    }
    p
}

/// Compute the target power-of-two edge length for a texture given the
/// maximum bounding-sphere radius that referenced it and its original width.
///
/// Mirrors `resizer.cpp`'s step 1 plus step 3's power-of-two fit:
/// ```text
/// needed = max(floor(radius) << 4, 128)
/// needed = round_up_pow2(needed)
/// needed = min(needed, original_width)
/// if is_normal_map { needed >>= 2 }
/// if needed < 128 { needed = max(needed, original_width) }
/// needed = floor_pow2(needed)
/// ```
/// The final floor is what keeps the result a genuine power of two even when
/// `original_width` itself isn't one (spec §8 invariant 5).
pub fn target_size(radius: f32, original_width: u64, is_normal_map: bool) -> u64 {
    let floored = radius.floor().max(0.0) as u64;
    let mut needed = (floored << 4).max(128);
    needed = round_up_pow2_u64(needed);
    needed = needed.min(original_width.max(1));

    if is_normal_map {
        needed >>= 2;
    }

    if needed < 128 {
        needed = needed.max(original_width);
    }

    floor_pow2_u64(needed)
}

/// Apply the CLI's `texsize`/`normalsize` ceiling on top of the
/// radius-driven target (spec §6 CLI: "positive integers interpreted as
/// maximum edge lengths (the sizing algorithm in §4.4 further constrains
/// them)"). The ceiling is the last clamp applied, so a texture can never
/// come out larger than what the user asked for regardless of how the
/// radius-driven formula or the floor-at-128 restoration moved it. `cap`
/// itself isn't required to be a power of two (spec §6 only requires a
/// positive integer), so the cap is re-floored afterward to keep the result
/// a genuine power of two (spec §8 invariant 5).
pub fn apply_edge_cap(needed: u64, cap: u32) -> u64 {
    floor_pow2_u64(needed.min(cap as u64))
}
