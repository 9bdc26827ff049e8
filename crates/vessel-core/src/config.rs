//! Growth policy parameters.

/// Capacity growth policy for the dynamic array.
///
/// Appending to a full array multiplies its capacity by `factor`, starting
/// from `min_non_empty` when the array owns no storage yet. With the
/// default factor of 2 the capacity sequence from empty is
/// `0 → 1 → 2 → 4 → 8 → …`, which keeps the total cost of N appends
/// proportional to N.
///
/// `Vector` always grows with [`GrowthPolicy::DOUBLING`]; other values are
/// for callers computing capacities of their own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GrowthPolicy {
    /// Multiplier applied to the current capacity when an append overflows.
    ///
    /// Default: 2. Must be at least 2 for amortised O(1) appends.
    pub factor: usize,

    /// Capacity given to an array that owns no storage yet.
    ///
    /// Default: 1.
    pub min_non_empty: usize,
}

impl GrowthPolicy {
    /// Default growth multiplier.
    pub const DEFAULT_FACTOR: usize = 2;

    /// Default capacity for the first allocation.
    pub const MIN_NON_EMPTY_CAPACITY: usize = 1;

    /// The doubling policy.
    pub const DOUBLING: Self = Self {
        factor: Self::DEFAULT_FACTOR,
        min_non_empty: Self::MIN_NON_EMPTY_CAPACITY,
    };

    /// Capacity to allocate when an append finds `capacity` slots full.
    ///
    /// Saturates at `usize::MAX`; the allocation layer then reports the
    /// overflow.
    pub fn grow(&self, capacity: usize) -> usize {
        capacity
            .saturating_mul(self.factor)
            .max(self.min_non_empty)
    }

    /// Capacity to allocate when at least `required` slots are needed.
    ///
    /// Used by `resize`: the larger of the multiplied capacity and the
    /// exact requirement.
    pub fn grow_to(&self, capacity: usize, required: usize) -> usize {
        capacity.saturating_mul(self.factor).max(required)
    }
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self::DOUBLING
    }
}
