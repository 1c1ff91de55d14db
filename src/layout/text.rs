use crate::config::FontTiers;

/// Index into the short/medium/long tier arrays for a label of `len`
/// characters. Label sizing is a discrete lookup, never a font measurement,
/// so layout stays deterministic across platforms and font installs.
pub(crate) fn tier_index(len: usize, tiers: &FontTiers) -> usize {
    if len <= tiers.short_max {
        0
    } else if len <= tiers.medium_max {
        1
    } else {
        2
    }
}

pub(super) fn pick(sizes: &[f32; 3], text: &str, tiers: &FontTiers) -> f32 {
    sizes[tier_index(text.chars().count(), tiers)]
}
