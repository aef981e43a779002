use core::fmt;
use core::hash::Hash;
use num_integer::Integer;
use num_traits::{CheckedMul, PrimInt, Signed, ToPrimitive, Unsigned};
use std::collections::hash_map::RandomState;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use crate::tree::NodeId;

#[cfg(feature = "num-bigint")]
use num_bigint::{BigInt, BigUint};

/// Type of the partial quotients and depths of the tree.
///
/// Quotients are generally much smaller than the fractions themselves,
/// so a machine integer is enough. Parity comes from [Integer].
pub trait Quotient: PrimInt + Integer + Signed + Hash + fmt::Debug + fmt::Display {}

impl<T> Quotient for T where T: PrimInt + Integer + Signed + Hash + fmt::Debug + fmt::Display {}

/// Type of the numerators and denominators of the tree.
pub trait FractionInteger<Q>:
    Integer + Signed + Clone + CheckedMul + From<Q> + ToPrimitive + fmt::Debug + fmt::Display
{
}

impl<T, Q> FractionInteger<Q> for T where
    T: Integer + Signed + Clone + CheckedMul + From<Q> + ToPrimitive + fmt::Debug + fmt::Display
{
}

pub trait WithUnsigned: Signed {
    type Unsigned: Unsigned;
    fn to_unsigned(self) -> Self::Unsigned;
}

macro_rules! impl_primitive_sign {
    ($TSigned:ty, $TUnsigned:ty) => {
        impl WithUnsigned for $TSigned {
            type Unsigned = $TUnsigned;
            fn to_unsigned(self) -> Self::Unsigned { self as $TUnsigned }
        }
    };
}
impl_primitive_sign!(i8, u8);
impl_primitive_sign!(i16, u16);
impl_primitive_sign!(i32, u32);
impl_primitive_sign!(i64, u64);
impl_primitive_sign!(i128, u128);

#[cfg(feature = "num-bigint")]
impl WithUnsigned for BigInt {
    type Unsigned = BigUint;
    fn to_unsigned(self) -> Self::Unsigned { self.into_parts().1 }
}

/// Associative store from a partial quotient to the node it leads to.
///
/// Entries are only ever added: inserting on an existing key keeps the
/// first node.
pub trait QuotientMap<Q>: Default {
    fn get(&self, quotient: &Q) -> Option<NodeId>;

    fn insert(&mut self, quotient: Q, node: NodeId);

    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over all `(quotient, node)` entries
    fn entries(&self) -> Box<dyn Iterator<Item = (Q, NodeId)> + '_>;
}

impl<Q: Ord + Copy> QuotientMap<Q> for BTreeMap<Q, NodeId> {
    #[inline]
    fn get(&self, quotient: &Q) -> Option<NodeId> {
        BTreeMap::get(self, quotient).copied()
    }

    fn insert(&mut self, quotient: Q, node: NodeId) {
        self.entry(quotient).or_insert(node);
    }

    #[inline]
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (Q, NodeId)> + '_> {
        Box::new(self.iter().map(|(q, n)| (*q, *n)))
    }
}

impl<Q: Eq + Hash + Copy, S: BuildHasher + Default> QuotientMap<Q> for HashMap<Q, NodeId, S> {
    #[inline]
    fn get(&self, quotient: &Q) -> Option<NodeId> {
        HashMap::get(self, quotient).copied()
    }

    fn insert(&mut self, quotient: Q, node: NodeId) {
        self.entry(quotient).or_insert(node);
    }

    #[inline]
    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (Q, NodeId)> + '_> {
        Box::new(self.iter().map(|(q, n)| (*q, *n)))
    }
}

/// Hash-based quotient map with the standard hasher
pub type HashQuotientMap<Q> = HashMap<Q, NodeId, RandomState>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsigned_test() {
        assert_eq!(7i64.to_unsigned(), 7u64);
        assert_eq!(0i32.to_unsigned(), 0u32);
    }

    #[test]
    fn quotient_map_test() {
        let mut tree_map = BTreeMap::<i32, NodeId>::new();
        QuotientMap::insert(&mut tree_map, 3, NodeId::new(5));
        QuotientMap::insert(&mut tree_map, 3, NodeId::new(7));
        QuotientMap::insert(&mut tree_map, 2, NodeId::new(9));
        assert_eq!(QuotientMap::get(&tree_map, &3), Some(NodeId::new(5)));
        assert_eq!(QuotientMap::get(&tree_map, &4), None);
        assert_eq!(
            tree_map.entries().collect::<Vec<_>>(),
            vec![(2, NodeId::new(9)), (3, NodeId::new(5))]
        );

        let mut hash_map = HashQuotientMap::<i32>::default();
        QuotientMap::insert(&mut hash_map, 2, NodeId::new(1));
        QuotientMap::insert(&mut hash_map, 2, NodeId::new(4));
        assert_eq!(QuotientMap::get(&hash_map, &2), Some(NodeId::new(1)));
        assert_eq!(QuotientMap::len(&hash_map), 1);
        assert!(!QuotientMap::is_empty(&hash_map));
    }
}
