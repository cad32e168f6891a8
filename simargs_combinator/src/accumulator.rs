use std::collections::{BTreeMap, BTreeSet};

/// Behaviour for a bag of options which may be specified piecemeal, in any order.
///
/// Implementations must satisfy:
/// * `a.append(b).append(c) == a.append(b.append(c))`
/// * `x.append(identity()) == x == identity().append(x)`
///
/// When both sides specify a scalar field the right hand (more recently parsed) side wins.
/// Sticky booleans are or'ed, so once enabled they stay enabled.
pub trait Accumulator: Sized {
    /// The value holding no options at all.
    fn identity() -> Self;

    /// Merge `other` on top of `self`.
    fn append(self, other: Self) -> Self;
}

impl Accumulator for bool {
    fn identity() -> Self {
        false
    }

    fn append(self, other: Self) -> Self {
        self || other
    }
}

// Last wins, missing stays.
impl<T> Accumulator for Option<T> {
    fn identity() -> Self {
        None
    }

    fn append(self, other: Self) -> Self {
        other.or(self)
    }
}

impl<T> Accumulator for Vec<T> {
    fn identity() -> Self {
        Vec::default()
    }

    fn append(mut self, other: Self) -> Self {
        self.extend(other);
        self
    }
}

impl<T: Ord> Accumulator for BTreeSet<T> {
    fn identity() -> Self {
        BTreeSet::default()
    }

    fn append(mut self, other: Self) -> Self {
        self.extend(other);
        self
    }
}

impl<K: Ord, V> Accumulator for BTreeMap<K, V> {
    fn identity() -> Self {
        BTreeMap::default()
    }

    fn append(mut self, other: Self) -> Self {
        self.extend(other);
        self
    }
}

/// Fold a sequence of fragments, starting from the identity.
pub fn fold_all<A: Accumulator>(fragments: impl IntoIterator<Item = A>) -> A {
    fragments
        .into_iter()
        .fold(A::identity(), |acc, fragment| acc.append(fragment))
}
