//! Lazy combination of per-component morphism lists.
//!
//! A selector owns a `patterns x hosts` matrix of morphism lists, filled
//! once from a provider. Iteration walks every globally consistent
//! position: one chosen `(host, morphism)` per pattern component, treated
//! as a mixed-radix counter where the LAST component varies fastest and a
//! component's digit sequence runs through its hosts in order.
//!
//! In partial mode a component that exhausts its hosts parks in an
//! "unmatched" state, contributing one extra digit; the all-unmatched
//! combination is never yielded. A component with no morphisms anywhere is
//! excluded from iteration entirely, as are pre-disabled components.

use itertools::Itertools;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// A component's entry inside a [`Cursor`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Slot {
    disabled: bool,
    /// Selected host, or `num_hosts` when parked unmatched.
    host: usize,
    /// Index into the selected host's morphism list.
    morphism: usize,
}

/// Explicit iteration state over a [`MultiDimSelector`].
///
/// Obtained from [`MultiDimSelector::cursor`] and moved forward with
/// [`MultiDimSelector::advance`]; reading happens through
/// [`MultiDimSelector::get`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cursor {
    slots: Vec<Slot>,
}

/// What a cursor currently holds for one pattern component.
#[derive(Debug)]
pub enum SlotView<'s, M> {
    /// The component does not take part in iteration.
    Disabled,
    /// The component is parked unmatched (partial mode only).
    Unmatched,
    /// The component's current choice.
    Match {
        /// Selected host component.
        host: usize,
        /// Selected morphism into that host.
        morphism: &'s M,
    },
}

/// Memoized morphism matrix plus the iteration rules over it.
#[derive(Clone, Debug)]
pub struct MultiDimSelector<M> {
    num_patterns: usize,
    num_hosts: usize,
    allow_partial: bool,
    pre_disabled: Vec<bool>,
    matrix: Vec<Vec<Vec<M>>>,
}

impl<M> MultiDimSelector<M> {
    /// Builds the matrix by calling `provider` exactly once per
    /// `(pattern, host)` cell.
    #[contracts::requires(num_patterns > 0 && num_hosts > 0, "both dimensions must be non-empty")]
    #[contracts::requires(pre_disabled.len() == num_patterns)]
    #[must_use]
    pub fn new<P>(
        num_patterns: usize,
        num_hosts: usize,
        allow_partial: bool,
        pre_disabled: Vec<bool>,
        mut provider: P,
    ) -> Self
    where
        P: FnMut(usize, usize) -> Vec<M>,
    {
        let mut matrix: Vec<Vec<Vec<M>>> = (0..num_patterns)
            .map(|_| Vec::with_capacity(num_hosts))
            .collect();
        for (p, h) in (0..num_patterns).cartesian_product(0..num_hosts) {
            matrix[p].push(provider(p, h));
        }
        MultiDimSelector {
            num_patterns,
            num_hosts,
            allow_partial,
            pre_disabled,
            matrix,
        }
    }

    /// Like [`MultiDimSelector::new`], filling the matrix in parallel.
    #[cfg(feature = "rayon")]
    #[contracts::requires(num_patterns > 0 && num_hosts > 0, "both dimensions must be non-empty")]
    #[contracts::requires(pre_disabled.len() == num_patterns)]
    #[must_use]
    pub fn new_parallel<P>(
        num_patterns: usize,
        num_hosts: usize,
        allow_partial: bool,
        pre_disabled: Vec<bool>,
        provider: P,
    ) -> Self
    where
        M: Send,
        P: Fn(usize, usize) -> Vec<M> + Sync,
    {
        let matrix: Vec<Vec<Vec<M>>> = (0..num_patterns)
            .into_par_iter()
            .map(|p| (0..num_hosts).map(|h| provider(p, h)).collect())
            .collect();
        MultiDimSelector {
            num_patterns,
            num_hosts,
            allow_partial,
            pre_disabled,
            matrix,
        }
    }

    /// Number of pattern components.
    #[must_use]
    pub fn num_patterns(&self) -> usize {
        self.num_patterns
    }

    /// Number of host components.
    #[must_use]
    pub fn num_hosts(&self) -> usize {
        self.num_hosts
    }

    /// Whether partial positions are part of the sequence.
    #[must_use]
    pub fn allow_partial(&self) -> bool {
        self.allow_partial
    }

    /// Whether a pattern component was excluded up front.
    #[contracts::debug_requires(pattern < self.num_patterns)]
    #[must_use]
    pub fn pre_disabled(&self, pattern: usize) -> bool {
        self.pre_disabled[pattern]
    }

    /// The memoized morphisms of one cell.
    #[contracts::debug_requires(pattern < self.num_patterns && host < self.num_hosts)]
    #[must_use]
    pub fn morphisms(&self, pattern: usize, host: usize) -> &[M] {
        &self.matrix[pattern][host]
    }

    /// First host at or after `from` with a non-empty morphism list.
    fn first_host(&self, pattern: usize, from: usize) -> Option<usize> {
        (from..self.num_hosts).find(|&h| !self.matrix[pattern][h].is_empty())
    }

    /// The first position of the sequence, or `None` when it is empty.
    #[must_use]
    pub fn cursor(&self) -> Option<Cursor> {
        let mut slots = Vec::with_capacity(self.num_patterns);
        for p in 0..self.num_patterns {
            if self.pre_disabled[p] {
                slots.push(Slot {
                    disabled: true,
                    host: self.num_hosts,
                    morphism: 0,
                });
                continue;
            }
            match self.first_host(p, 0) {
                Some(h) => slots.push(Slot {
                    disabled: false,
                    host: h,
                    morphism: 0,
                }),
                // A component with nothing to offer empties the whole
                // sequence, unless partial positions may leave it out.
                None if self.allow_partial => slots.push(Slot {
                    disabled: true,
                    host: self.num_hosts,
                    morphism: 0,
                }),
                None => return None,
            }
        }
        if slots.iter().all(|s| s.disabled) {
            return None;
        }
        Some(Cursor { slots })
    }

    /// Reads the cursor's entry for one pattern component.
    #[contracts::debug_requires(cursor.slots.len() == self.num_patterns)]
    #[contracts::debug_requires(pattern < self.num_patterns)]
    #[must_use]
    pub fn get<'s>(&'s self, cursor: &Cursor, pattern: usize) -> SlotView<'s, M> {
        let slot = cursor.slots[pattern];
        if slot.disabled {
            SlotView::Disabled
        } else if slot.host == self.num_hosts {
            SlotView::Unmatched
        } else {
            SlotView::Match {
                host: slot.host,
                morphism: &self.matrix[pattern][slot.host][slot.morphism],
            }
        }
    }

    /// Moves to the next position; `false` means the sequence is exhausted
    /// and the cursor must not be read again.
    #[contracts::debug_requires(cursor.slots.len() == self.num_patterns)]
    pub fn advance(&self, cursor: &mut Cursor) -> bool {
        let mut p = self.num_patterns;
        while p > 0 {
            p -= 1;
            let slot = cursor.slots[p];
            if slot.disabled {
                continue;
            }
            if slot.host == self.num_hosts {
                // Parked unmatched: fold back to the first host, carry on.
                debug_assert!(self.allow_partial);
                let h = self
                    .first_host(p, 0)
                    .expect("a parked component has morphisms somewhere");
                cursor.slots[p] = Slot {
                    disabled: false,
                    host: h,
                    morphism: 0,
                };
                continue;
            }
            if slot.morphism + 1 < self.matrix[p][slot.host].len() {
                cursor.slots[p].morphism += 1;
                return true;
            }
            if let Some(h) = self.first_host(p, slot.host + 1) {
                cursor.slots[p] = Slot {
                    disabled: false,
                    host: h,
                    morphism: 0,
                };
                return true;
            }
            if self.allow_partial {
                cursor.slots[p].host = self.num_hosts;
                if cursor
                    .slots
                    .iter()
                    .all(|s| s.disabled || s.host == self.num_hosts)
                {
                    // The all-unmatched combination ends the sequence.
                    return false;
                }
                return true;
            }
            let h = self
                .first_host(p, 0)
                .expect("an active component has morphisms somewhere");
            cursor.slots[p] = Slot {
                disabled: false,
                host: h,
                morphism: 0,
            };
        }
        false
    }
}
