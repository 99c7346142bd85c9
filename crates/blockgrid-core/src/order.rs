//! Traversal orders and the [`OrderSet`] capability bitset.

use std::fmt;

/// The sequence in which a traversal visits a grid's cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Order {
    /// Rows top to bottom, each row left to right.
    RowMajor,
    /// Columns left to right, each column top to bottom.
    ColMajor,
    /// Blocks in row-major order of block coordinates, each block's cells in
    /// row-major order. Only meaningful for layouts with physical blocks.
    BlockMajor,
}

impl Order {
    /// Every order, in declaration order.
    pub const ALL: [Order; 3] = [Order::RowMajor, Order::ColMajor, Order::BlockMajor];

    /// Dense index of this order, `0..3`. Used to key capability tables.
    pub const fn index(self) -> usize {
        match self {
            Order::RowMajor => 0,
            Order::ColMajor => 1,
            Order::BlockMajor => 2,
        }
    }

    const fn bit(self) -> u8 {
        1 << self.index()
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RowMajor => write!(f, "row-major"),
            Self::ColMajor => write!(f, "column-major"),
            Self::BlockMajor => write!(f, "block-major"),
        }
    }
}

/// A set of traversal orders, stored as a bitset.
///
/// Each grid kind advertises the orders it supports as an `OrderSet`.
/// All constructors are `const` so sets can live in `static` tables.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct OrderSet {
    bits: u8,
}

impl OrderSet {
    /// The empty set.
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    /// The set of every order.
    pub const fn all() -> Self {
        Self::empty()
            .with(Order::RowMajor)
            .with(Order::ColMajor)
            .with(Order::BlockMajor)
    }

    /// A set containing exactly `order`.
    pub const fn of(order: Order) -> Self {
        Self { bits: order.bit() }
    }

    /// This set plus `order`.
    pub const fn with(self, order: Order) -> Self {
        Self {
            bits: self.bits | order.bit(),
        }
    }

    /// Add `order` in place. Returns `true` if it was not already present.
    pub fn insert(&mut self, order: Order) -> bool {
        let was = self.contains(order);
        self.bits |= order.bit();
        !was
    }

    /// Whether `order` is a member.
    pub const fn contains(&self, order: Order) -> bool {
        self.bits & order.bit() != 0
    }

    /// Number of orders in the set.
    pub const fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Whether the set is empty.
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Union of two sets.
    pub const fn union(&self, other: &Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    /// Intersection of two sets.
    pub const fn intersection(&self, other: &Self) -> Self {
        Self {
            bits: self.bits & other.bits,
        }
    }

    /// Whether every member of `self` is in `other`.
    pub const fn is_subset(&self, other: &Self) -> bool {
        self.bits & !other.bits == 0
    }

    /// Iterate over members in [`Order::ALL`] order.
    pub fn iter(&self) -> OrderSetIter {
        OrderSetIter {
            set: *self,
            next: 0,
        }
    }
}

impl fmt::Display for OrderSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, order) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{order}")?;
        }
        write!(f, "}}")
    }
}

impl FromIterator<Order> for OrderSet {
    fn from_iter<I: IntoIterator<Item = Order>>(iter: I) -> Self {
        let mut set = Self::empty();
        for order in iter {
            set.insert(order);
        }
        set
    }
}

impl IntoIterator for OrderSet {
    type Item = Order;
    type IntoIter = OrderSetIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the orders in an [`OrderSet`].
pub struct OrderSetIter {
    set: OrderSet,
    next: usize,
}

impl Iterator for OrderSetIter {
    type Item = Order;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next < Order::ALL.len() {
            let order = Order::ALL[self.next];
            self.next += 1;
            if self.set.contains(order) {
                return Some(order);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn index_matches_all_position() {
        for (i, order) in Order::ALL.iter().enumerate() {
            assert_eq!(order.index(), i);
        }
    }

    #[test]
    fn const_construction() {
        const FLAT: OrderSet = OrderSet::of(Order::RowMajor).with(Order::ColMajor);
        assert!(FLAT.contains(Order::RowMajor));
        assert!(FLAT.contains(Order::ColMajor));
        assert!(!FLAT.contains(Order::BlockMajor));
        assert_eq!(FLAT.len(), 2);
    }

    #[test]
    fn all_contains_every_order() {
        let all = OrderSet::all();
        assert_eq!(all.len(), 3);
        assert_eq!(all.iter().collect::<Vec<_>>(), Order::ALL.to_vec());
    }

    #[test]
    fn insert_reports_novelty() {
        let mut set = OrderSet::empty();
        assert!(set.is_empty());
        assert!(set.insert(Order::BlockMajor));
        assert!(!set.insert(Order::BlockMajor));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn display_lists_members() {
        let set = OrderSet::of(Order::RowMajor).with(Order::BlockMajor);
        assert_eq!(set.to_string(), "{row-major, block-major}");
        assert_eq!(OrderSet::empty().to_string(), "{}");
    }

    fn arb_order_set() -> impl Strategy<Value = OrderSet> {
        prop::collection::vec(0usize..3, 0..6)
            .prop_map(|ids| ids.into_iter().map(|i| Order::ALL[i]).collect::<OrderSet>())
    }

    proptest! {
        #[test]
        fn union_is_commutative(a in arb_order_set(), b in arb_order_set()) {
            prop_assert_eq!(a.union(&b), b.union(&a));
        }

        #[test]
        fn intersection_is_subset_of_both(a in arb_order_set(), b in arb_order_set()) {
            let i = a.intersection(&b);
            prop_assert!(i.is_subset(&a));
            prop_assert!(i.is_subset(&b));
        }

        #[test]
        fn iter_yields_exactly_members(a in arb_order_set()) {
            let collected: OrderSet = a.iter().collect();
            prop_assert_eq!(collected, a);
            prop_assert_eq!(a.iter().count(), a.len());
        }
    }
}
