//! Lazy permutation enumeration.
//!
//! Order: for each position `p` in turn, the element at `p` followed by
//! every permutation of the remaining elements (kept in their original
//! relative order). For sorted input this is lexicographic order. The
//! sequence is produced from an explicit index state, so it can be paused
//! between items and cloned to restart.

/// `n!`, saturating at `usize::MAX` once it no longer fits (n > 20 on
/// 64-bit targets).
///
/// ```
/// use tsp_stepper::exact::factorial;
///
/// assert_eq!(factorial(0), 1);
/// assert_eq!(factorial(4), 24);
/// assert_eq!(factorial(9), 362_880);
/// assert_eq!(factorial(30), usize::MAX);
/// ```
pub fn factorial(n: usize) -> usize {
    (1..=n)
        .try_fold(1usize, |acc, k| acc.checked_mul(k))
        .unwrap_or(usize::MAX)
}

/// Iterator over all permutations of a list of ids.
///
/// `len()` saturates like [`factorial`] for more than 20 items; the
/// sequence itself is still produced in full order.
///
/// # Examples
///
/// ```
/// use tsp_stepper::exact::Permutations;
///
/// let perms: Vec<Vec<usize>> = Permutations::new(vec![0, 1, 2]).collect();
/// assert_eq!(perms.len(), 6);
/// assert_eq!(perms[0], vec![0, 1, 2]);
/// assert_eq!(perms[1], vec![0, 2, 1]);
/// assert_eq!(perms[5], vec![2, 1, 0]);
/// ```
#[derive(Debug, Clone)]
pub struct Permutations {
    items: Vec<usize>,
    positions: Vec<usize>,
    remaining: usize,
}

impl Permutations {
    /// Starts the sequence over `items`.
    pub fn new(items: Vec<usize>) -> Self {
        let n = items.len();
        Self {
            positions: (0..n).collect(),
            remaining: factorial(n),
            items,
        }
    }

    /// Total number of permutations in the full sequence.
    pub fn total(&self) -> usize {
        factorial(self.items.len())
    }

    /// Advances `positions` to the next lexicographic arrangement.
    /// Returns `false` after the last one.
    fn advance(&mut self) -> bool {
        let p = &mut self.positions;
        let Some(j) = (0..p.len().saturating_sub(1)).rev().find(|&j| p[j] < p[j + 1]) else {
            return false;
        };
        let Some(l) = (j + 1..p.len()).rev().find(|&l| p[j] < p[l]) else {
            return false;
        };
        p.swap(j, l);
        p[j + 1..].reverse();
        true
    }
}

impl Iterator for Permutations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.positions.iter().map(|&p| self.items[p]).collect();
        self.remaining = if self.advance() {
            self.remaining.saturating_sub(1)
        } else {
            0
        };
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Permutations {}

#[cfg(test)]
mod tests {
    use super::*;

    /// The reference order: each element, then permutations of the rest.
    fn recursive(items: &[usize]) -> Vec<Vec<usize>> {
        if items.is_empty() {
            return vec![vec![]];
        }
        let mut out = Vec::new();
        for i in 0..items.len() {
            let mut rest = items.to_vec();
            let first = rest.remove(i);
            for mut tail in recursive(&rest) {
                tail.insert(0, first);
                out.push(tail);
            }
        }
        out
    }

    #[test]
    fn test_matches_recursive_order() {
        let items = vec![3, 0, 2, 1];
        let lazy: Vec<Vec<usize>> = Permutations::new(items.clone()).collect();
        assert_eq!(lazy, recursive(&items));
    }

    #[test]
    fn test_count_is_factorial() {
        for n in 0..=6 {
            assert_eq!(Permutations::new((0..n).collect()).count(), factorial(n));
        }
    }

    #[test]
    fn test_empty_yields_one_empty_permutation() {
        let perms: Vec<Vec<usize>> = Permutations::new(vec![]).collect();
        assert_eq!(perms, vec![Vec::<usize>::new()]);
    }

    #[test]
    fn test_exact_size_tracks_progress() {
        let mut perms = Permutations::new(vec![0, 1, 2]);
        assert_eq!(perms.len(), 6);
        perms.next();
        perms.next();
        assert_eq!(perms.len(), 4);
        assert_eq!(perms.total(), 6);
    }

    #[test]
    fn test_large_input_does_not_overflow() {
        let mut perms = Permutations::new((0..25).collect());
        assert_eq!(perms.total(), usize::MAX);
        assert_eq!(perms.next(), Some((0..25).collect::<Vec<_>>()));
        let second = perms.next().expect("more permutations");
        assert_eq!(&second[23..], &[24, 23]);
    }

    #[test]
    fn test_clone_restarts_independently() {
        let fresh = Permutations::new(vec![0, 1, 2, 3]);
        let mut a = fresh.clone();
        a.nth(10);
        let b: Vec<Vec<usize>> = fresh.collect();
        assert_eq!(b.len(), 24);
        assert_eq!(b[0], vec![0, 1, 2, 3]);
    }
}
