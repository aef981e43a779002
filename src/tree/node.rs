use core::fmt;

use crate::traits::{Quotient, QuotientMap};

/// Stable index of a [Node] in the arena of a [SternBrocot][crate::SternBrocot] tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    #[inline]
    pub const fn new(index: usize) -> Self {
        NodeId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Returns true if the `primary` children of a node of depth `depth` are
/// smaller than the node (its left descendants). The `alternate` children
/// are then on the right, and the other way around for even depths.
#[inline]
pub fn is_primary_left<Q: Quotient>(depth: Q) -> bool {
    depth.is_odd()
}

/// A node of the tree, i.e. an irreducible fraction `p/q` with `p <= q`
/// together with its position. Fractions greater than one share the node
/// of their inverse.
///
/// The node `[0; u_1, .., u_n]` has two families of children, keyed by the
/// next coefficient `v >= 2`:
/// - `primary[v]` is `[0; u_1, .., u_n, v]`,
/// - `alternate[v]` is `[0; u_1, .., u_n - 1, 1, v]`.
#[derive(Debug, Clone)]
pub struct Node<I, Q, M> {
    pub(crate) p: I,
    pub(crate) q: I,
    pub(crate) u: Q,
    pub(crate) k: Q,
    pub(crate) ascendant: Option<NodeId>,
    pub(crate) primary: M,
    pub(crate) alternate: M,
    pub(crate) father: Option<NodeId>, // cached once computed
}

impl<I, Q: Quotient, M: QuotientMap<Q>> Node<I, Q, M> {
    pub(crate) fn new(p: I, q: I, u: Q, k: Q, ascendant: Option<NodeId>) -> Self {
        Node { p, q, u, k, ascendant, primary: M::default(), alternate: M::default(), father: None }
    }

    /// the numerator
    #[inline]
    pub fn p(&self) -> &I {
        &self.p
    }

    /// the denominator
    #[inline]
    pub fn q(&self) -> &I {
        &self.q
    }

    /// the last coefficient of the continued fraction
    #[inline]
    pub fn u(&self) -> Q {
        self.u
    }

    /// the number of coefficients after the leading zero
    #[inline]
    pub fn k(&self) -> Q {
        self.k
    }

    /// The node of the preceding principal convergent. Only `0/1` has none.
    #[inline]
    pub fn ascendant(&self) -> Option<NodeId> {
        self.ascendant
    }

    #[inline]
    pub fn primary(&self) -> &M {
        &self.primary
    }

    #[inline]
    pub fn alternate(&self) -> &M {
        &self.alternate
    }

    #[inline]
    pub(crate) fn children(&self, commuted: bool) -> &M {
        if commuted { &self.alternate } else { &self.primary }
    }

    #[inline]
    pub(crate) fn children_mut(&mut self, commuted: bool) -> &mut M {
        if commuted { &mut self.alternate } else { &mut self.primary }
    }

    #[inline]
    pub fn even(&self) -> bool {
        self.k.is_even()
    }

    #[inline]
    pub fn odd(&self) -> bool {
        self.k.is_odd()
    }

    /// true iff the children in `primary` are to the left
    #[inline]
    pub fn is_same_depth_left(&self) -> bool {
        is_primary_left(self.k)
    }
}
