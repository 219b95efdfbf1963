//! Sorted, disjoint integer-range sets
//!
//! [`IntervalSet`] is the representation behind every character class in this
//! crate: a sorted sequence of inclusive `(min, max)` ranges with no overlap
//! and no adjacency, so each set has exactly one canonical form.

use core::fmt;

/// A set of `u32` values stored as sorted, disjoint, non-adjacent ranges
///
/// ## Example
///
/// ```rust
/// use sift::intervals::IntervalSet;
///
/// let digits = IntervalSet::range(0x30, 0x39);
/// assert!(digits.contains('7' as u32));
/// assert!(!digits.contains('a' as u32));
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct IntervalSet {
    ranges: Vec<(u32, u32)>,
}

impl IntervalSet {
    /// The empty set
    #[inline]
    pub fn new() -> Self {
        Self { ranges: Vec::new() }
    }

    /// The set holding exactly `value`
    #[inline]
    pub fn singleton(value: u32) -> Self {
        Self {
            ranges: vec![(value, value)],
        }
    }

    /// The set holding `min..=max`
    ///
    /// # Panics
    ///
    /// Panics when `min > max`; an inverted range is a construction bug, not
    /// a value.
    pub fn range(min: u32, max: u32) -> Self {
        assert!(min <= max, "inverted range {min}..={max}");
        Self {
            ranges: vec![(min, max)],
        }
    }

    /// Build from ranges already known to be sorted, disjoint, non-adjacent
    pub(crate) fn from_sorted_ranges(ranges: Vec<(u32, u32)>) -> Self {
        debug_assert!(ranges
            .windows(2)
            .all(|pair| pair[0].1 < u32::MAX && pair[0].1 + 1 < pair[1].0));
        debug_assert!(ranges.iter().all(|&(min, max)| min <= max));
        Self { ranges }
    }

    /// `true` when the set has no members
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// The ranges, in order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.ranges.iter().copied()
    }

    /// Number of members (not ranges)
    pub fn len(&self) -> usize {
        self.ranges
            .iter()
            .map(|&(min, max)| (max - min) as usize + 1)
            .sum()
    }

    /// Membership by binary search over the sorted ranges
    #[inline]
    pub fn contains(&self, value: u32) -> bool {
        self.ranges
            .binary_search_by(|&(min, max)| {
                if value < min {
                    core::cmp::Ordering::Greater
                } else if max < value {
                    core::cmp::Ordering::Less
                } else {
                    core::cmp::Ordering::Equal
                }
            })
            .is_ok()
    }

    /// Add one value, preserving the invariants
    pub fn insert(&mut self, value: u32) {
        self.insert_range(value, value);
    }

    /// Add `min..=max`, merging with overlapping or adjacent neighbors
    ///
    /// # Panics
    ///
    /// Panics when `min > max`.
    pub fn insert_range(&mut self, min: u32, max: u32) {
        assert!(min <= max, "inverted range {min}..={max}");
        // first range that could touch (min, max): its max reaches min - 1
        let start = self
            .ranges
            .partition_point(|&(_, existing_max)| existing_max < min.saturating_sub(1));
        let mut merged = (min, max);
        let mut end = start;
        while end < self.ranges.len() {
            let (existing_min, existing_max) = self.ranges[end];
            if existing_min > max.saturating_add(1) {
                break;
            }
            merged.0 = merged.0.min(existing_min);
            merged.1 = merged.1.max(existing_max);
            end += 1;
        }
        self.ranges.splice(start..end, [merged]);
    }

    /// Union by sweeping both sorted range lists
    ///
    /// Merges the two inputs by `min`, then folds left, extending the top of
    /// the result whenever the next range starts within `top.max + 1`.
    pub fn union(&self, other: &Self) -> Self {
        let mut left = self.ranges.iter().copied().peekable();
        let mut right = other.ranges.iter().copied().peekable();
        let mut result: Vec<(u32, u32)> = Vec::with_capacity(self.ranges.len() + other.ranges.len());
        loop {
            let next = match (left.peek(), right.peek()) {
                (Some(&l), Some(&r)) => {
                    if l.0 <= r.0 {
                        left.next()
                    } else {
                        right.next()
                    }
                }
                (Some(_), None) => left.next(),
                (None, Some(_)) => right.next(),
                (None, None) => break,
            };
            let (min, max) = match next {
                Some(range) => range,
                None => break,
            };
            match result.last_mut() {
                Some(top) if min <= top.1.saturating_add(1) => top.1 = top.1.max(max),
                _ => result.push((min, max)),
            }
        }
        Self { ranges: result }
    }

    /// The members of `lo..=hi` absent from this set
    pub fn complement(&self, lo: u32, hi: u32) -> Self {
        assert!(lo <= hi, "inverted universe {lo}..={hi}");
        let mut result = Vec::new();
        let mut next = lo;
        for &(min, max) in &self.ranges {
            if max < lo {
                continue;
            }
            if min > hi {
                break;
            }
            if min > next {
                result.push((next, min - 1));
            }
            next = match max.checked_add(1) {
                Some(next) => next.max(lo),
                None => return Self { ranges: result },
            };
            if next > hi {
                return Self { ranges: result };
            }
        }
        if next <= hi {
            result.push((next, hi));
        }
        Self { ranges: result }
    }

    /// Materialize a set from a characteristic function over `lo..=hi`
    pub fn build(lo: u32, hi: u32, mut predicate: impl FnMut(u32) -> bool) -> Self {
        assert!(lo <= hi, "inverted universe {lo}..={hi}");
        let mut ranges: Vec<(u32, u32)> = Vec::new();
        let mut run: Option<(u32, u32)> = None;
        for value in lo..=hi {
            if predicate(value) {
                match run.as_mut() {
                    Some(range) => range.1 = value,
                    None => run = Some((value, value)),
                }
            } else if let Some(range) = run.take() {
                ranges.push(range);
            }
        }
        if let Some(range) = run {
            ranges.push(range);
        }
        Self { ranges }
    }
}

impl FromIterator<(u32, u32)> for IntervalSet {
    fn from_iter<I: IntoIterator<Item = (u32, u32)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (min, max) in iter {
            set.insert_range(min, max);
        }
        set
    }
}

impl fmt::Debug for IntervalSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.ranges.iter().map(|&(min, max)| min..=max))
            .finish()
    }
}
