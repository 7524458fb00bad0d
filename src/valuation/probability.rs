//! Combinatorial probability over hidden cards

/// Chance that `draws` cards taken without replacement from `total` cards,
/// `non_matching` of which are harmless, are all harmless
///
/// Computed as a falling-factorial ratio:
/// `prod_{i < draws} (non_matching - i) / (total - i)`.
pub fn probability_none_match(total: u32, non_matching: u32, draws: u32) -> f32 {
    if draws == 0 || total == 0 {
        return 1.0;
    }
    let non_matching = non_matching.min(total);
    let draws = draws.min(total);
    if draws > non_matching {
        return 0.0;
    }

    let mut chance = 1.0f64;
    for i in 0..draws {
        chance *= (non_matching - i) as f64 / (total - i) as f64;
    }
    chance as f32
}

/// Chance that at least one of the drawn cards matches
pub fn probability_some_match(total: u32, non_matching: u32, draws: u32) -> f32 {
    1.0 - probability_none_match(total, non_matching, draws)
}
