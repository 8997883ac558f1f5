//! RNG seed derivation for deterministic per-deal behavior.
//!
//! Derives unique-but-deterministic seeds from a base match seed so that the
//! same match seed always produces the same shuffles and starting card,
//! deal by deal.

/// Derive the shuffle seed for a deal.
pub fn derive_deal_seed(match_seed: u64, deal_number: u32) -> u64 {
    // Multiplier separates deals; offset separates from the starting-card
    // seed below.
    match_seed
        .wrapping_add((deal_number as u64).wrapping_mul(1_000_000))
        .wrapping_add(1)
}

/// Derive the seed used to pick the first deal's starting card.
pub fn derive_starting_card_seed(match_seed: u64) -> u64 {
    match_seed.wrapping_mul(31).wrapping_add(7)
}
