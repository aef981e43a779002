//! The node store: an arena of nodes built on demand.

use core::cell::RefCell;
use core::cmp::Ordering;
use num_rational::Ratio;
use num_traits::NumCast;
use std::collections::BTreeMap;
use tracing::{debug, trace};

use super::block::Block;
use super::fraction::{cmp_fractions, Fraction};
use super::node::{is_primary_left, Node, NodeId};
use crate::error::FractionError;
use crate::traits::{FractionInteger, Quotient, QuotientMap};

pub(crate) const ZERO_OVER_ONE: NodeId = NodeId::new(0);
pub(crate) const ONE_OVER_ONE: NodeId = NodeId::new(1);

/// Spelling of the prefix reached so far during a descent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Descent {
    /// the prefix ends with the last coefficient of its node
    Direct,
    /// the prefix is `[.., u - 1, 1]` where `[.., u]` is its node
    Commuted,
}

/// The Stern-Brocot tree of positive irreducible fractions, built
/// progressively.
///
/// Only fractions `p/q <= 1` are stored, a fraction greater than one is
/// represented by the node of its inverse (see [Fraction::is_sup1]). Each node
/// `[0; u_1, .., u_n]` knows its preceding principal convergent and caches its
/// children `[.., u_n, v]` and `[.., u_n - 1, 1, v]`, so that navigation is
/// mostly pointer chasing.
///
/// The nodes are never released until the tree is dropped or [reset][SternBrocot::reset].
/// Requesting the same fraction twice returns handles onto the same node.
///
/// ```
/// use num_sternbrocot::SternBrocot;
///
/// let tree = SternBrocot::<i64, i32>::new();
/// let f = tree.fraction(7, 5);
/// assert_eq!(f.cfrac(), vec![1, 2, 2]);
/// assert_eq!(f.father(), tree.fraction(4, 3));
/// assert!(f.same_node(&tree.fraction(14, 10)));
/// ```
///
/// The tree is not thread safe. Fractions borrow the tree, and may extend it
/// through that shared borrow.
#[derive(Debug)]
pub struct SternBrocot<I = i64, Q = i32, M = BTreeMap<Q, NodeId>> {
    nodes: RefCell<Vec<Node<I, Q, M>>>,
}

impl<I, Q, M> Default for SternBrocot<I, Q, M>
where
    I: FractionInteger<Q>,
    Q: Quotient,
    M: QuotientMap<Q>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<I, Q, M> SternBrocot<I, Q, M>
where
    I: FractionInteger<Q>,
    Q: Quotient,
    M: QuotientMap<Q>,
{
    /// Creates a tree holding only its roots `0/1` and `1/1`
    /// (and `1/0` as the inverse of `0/1`).
    pub fn new() -> Self {
        let zero = Node::new(I::zero(), I::one(), Q::zero(), Q::zero(), None);
        let one = Node::new(I::one(), I::one(), Q::one(), Q::one(), Some(ZERO_OVER_ONE));
        SternBrocot { nodes: RefCell::new(vec![zero, one]) }
    }

    /// The fraction 0/1
    #[inline]
    pub fn zero_over_one(&self) -> Fraction<'_, I, Q, M> {
        Fraction::new(self, ZERO_OVER_ONE, false)
    }

    /// The fraction 1/0
    #[inline]
    pub fn one_over_zero(&self) -> Fraction<'_, I, Q, M> {
        Fraction::new(self, ZERO_OVER_ONE, true)
    }

    /// The null fraction 0/0
    #[inline]
    pub fn null(&self) -> Fraction<'_, I, Q, M> {
        Fraction::null(self)
    }

    /// Creates the fraction p/q, reduced if needed. Complexity is bounded by
    /// the length of the continued fraction of p/q.
    ///
    /// # Panics
    /// If `p` or `q` is negative, or a partial quotient overflows `Q`.
    pub fn fraction(&self, p: I, q: I) -> Fraction<'_, I, Q, M> {
        match self.try_fraction(p, q) {
            Ok(f) => f,
            Err(e) => panic!("{}", e),
        }
    }

    /// Same as [fraction][SternBrocot::fraction] but reports contract breaches.
    /// `0/0` gives the null fraction.
    pub fn try_fraction(&self, p: I, q: I) -> Result<Fraction<'_, I, Q, M>, FractionError> {
        if p.is_negative() || q.is_negative() {
            return Err(FractionError::NegativeComponent { p: p.to_string(), q: q.to_string() });
        }
        let g = p.gcd(&q);
        if g.is_zero() {
            return Ok(self.null());
        }
        let (p, q) = (p / g.clone(), q / g);

        let sup1 = p >= q;
        let node = if sup1 { self.descend(q, p)? } else { self.descend(p, q)? };
        Ok(Fraction::new(self, node, sup1))
    }

    /// Creates the fraction equal to a non-negative ratio
    pub fn from_ratio(&self, r: &Ratio<I>) -> Result<Fraction<'_, I, Q, M>, FractionError> {
        self.try_fraction(r.numer().clone(), r.denom().clone())
    }

    /// Creates the fraction `[u_0; u_1, .., u_n]` by appending the coefficients
    /// one at a time. An empty sequence gives the null fraction.
    pub fn from_quotients<T>(&self, quotients: T) -> Result<Fraction<'_, I, Q, M>, FractionError>
    where
        T: IntoIterator<Item = Q>,
    {
        let mut f = self.null();
        let mut depth = Q::zero();
        for u in quotients {
            f.try_push_back((u, depth))?;
            depth = depth + Q::one();
        }
        Ok(f)
    }

    /// The number of fractions stored in the tree
    pub fn len(&self) -> usize {
        self.nodes.borrow().len()
    }

    /// Always false, the roots are never removed
    pub fn is_empty(&self) -> bool {
        self.nodes.borrow().is_empty()
    }

    /// Drops every node except the roots. Requires that no fraction is alive.
    pub fn reset(&mut self) {
        debug!(dropped = self.len() - 2, "resetting Stern-Brocot tree");
        *self = Self::new();
    }

    /// Gives a read-only access to a copy of a node, so `f` may keep
    /// extending the tree. Children created meanwhile are not in the copy.
    pub fn with_node<R>(&self, id: NodeId, f: impl FnOnce(&Node<I, Q, M>) -> R) -> R
    where
        M: Clone,
    {
        let node = self.nodes.borrow()[id.index()].clone();
        f(&node)
    }

    /// Checks the consistency of the tree: every fraction is irreducible,
    /// children are keyed by quotients >= 2, point back to their parent one
    /// or two levels up, and lie on the side given by the depth parity.
    pub fn is_valid(&self) -> bool {
        let nodes = self.nodes.borrow();
        for (index, node) in nodes.iter().enumerate() {
            let id = NodeId::new(index);
            if !node.p.gcd(&node.q).is_one() {
                debug!(node = %id, p = %node.p, q = %node.q, "reducible fraction");
                return false;
            }
            if node.p.is_negative() || !node.q.is_positive() {
                debug!(node = %id, p = %node.p, q = %node.q, "negative fraction");
                return false;
            }
            if id != ZERO_OVER_ONE && node.p > node.q {
                debug!(node = %id, p = %node.p, q = %node.q, "fraction greater than one");
                return false;
            }
            if node.u < Q::one() && id != ZERO_OVER_ONE {
                debug!(node = %id, u = %node.u, "invalid partial quotient");
                return false;
            }
            if let Some(asc) = node.ascendant {
                let diff = node.k - nodes[asc.index()].k;
                if diff != Q::one() && diff != Q::one() + Q::one() {
                    debug!(node = %id, ascendant = %asc, "ascendant depth mismatch");
                    return false;
                }
            } else if id != ZERO_OVER_ONE {
                debug!(node = %id, "missing ascendant");
                return false;
            }

            for &commuted in &[false, true] {
                if commuted && node.u <= Q::one() && !node.children(commuted).is_empty() {
                    debug!(node = %id, "commuted children below a quotient one");
                    return false;
                }
                let step = if commuted { Q::one() + Q::one() } else { Q::one() };
                let left = is_primary_left(node.k) != commuted;
                for (v, child_id) in node.children(commuted).entries() {
                    let child = &nodes[child_id.index()];
                    if v <= Q::one()
                        || child.u != v
                        || child.k != node.k + step
                        || child.ascendant != Some(id)
                    {
                        debug!(node = %id, child = %child_id, key = %v, "inconsistent child");
                        return false;
                    }
                    let side =
                        cmp_fractions(child.p.clone(), child.q.clone(), node.p.clone(), node.q.clone());
                    if (side == Ordering::Less) != left {
                        debug!(node = %id, child = %child_id, "child on the wrong side");
                        return false;
                    }
                }
            }
        }
        true
    }

    // ------------------------- node primitives -------------------------

    #[inline]
    pub(crate) fn u(&self, id: NodeId) -> Q {
        self.nodes.borrow()[id.index()].u
    }

    #[inline]
    pub(crate) fn k(&self, id: NodeId) -> Q {
        self.nodes.borrow()[id.index()].k
    }

    #[inline]
    pub(crate) fn ascendant(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.borrow()[id.index()].ascendant
    }

    pub(crate) fn numerator_denominator(&self, id: NodeId) -> (I, I) {
        let nodes = self.nodes.borrow();
        let node = &nodes[id.index()];
        (node.p.clone(), node.q.clone())
    }

    /// true iff the ascendant is exactly one level up
    pub(crate) fn is_direct(&self, id: NodeId) -> bool {
        let nodes = self.nodes.borrow();
        let node = &nodes[id.index()];
        match node.ascendant {
            Some(asc) => node.k - nodes[asc.index()].k == Q::one(),
            None => false,
        }
    }

    /// The convergents of a node and of its ascendant
    fn block(&self, id: NodeId) -> Block<I> {
        let nodes = self.nodes.borrow();
        let node = &nodes[id.index()];
        match node.ascendant {
            Some(asc) => {
                let asc = &nodes[asc.index()];
                Block::new(node.p.clone(), asc.p.clone(), node.q.clone(), asc.q.clone())
            }
            None => Block::zero(),
        }
    }

    /// `u + 1`, which may not fit in the quotient type
    fn successor(&self, u: Q) -> Result<Q, FractionError> {
        u.checked_add(&Q::one())
            .ok_or_else(|| FractionError::QuotientOverflow((I::from(u) + I::one()).to_string()))
    }

    /// `[.., u, v]` if not commuted, `[.., u - 1, 1, v]` otherwise, for `v >= 2`.
    /// The node is created if it does not exist yet.
    pub(crate) fn child(&self, parent: NodeId, v: Q, commuted: bool) -> Result<NodeId, FractionError> {
        debug_assert!(v > Q::one(), "children are keyed by quotients >= 2");
        if let Some(id) = self.nodes.borrow()[parent.index()].children(commuted).get(&v) {
            return Ok(id);
        }

        let block = self.block(parent);
        let (k, u) = {
            let nodes = self.nodes.borrow();
            (nodes[parent.index()].k, nodes[parent.index()].u)
        };
        debug_assert!(!commuted || u > Q::one(), "no commuted spelling for quotient {}", u);
        let (p, q, depth) = if commuted {
            let (p, q) = block.commuted_move(I::from(v));
            (p, q, self.successor(self.successor(k)?)?)
        } else {
            let (p, q) = block.rmove(I::from(v));
            (p, q, self.successor(k)?)
        };

        let mut nodes = self.nodes.borrow_mut();
        let id = NodeId::new(nodes.len());
        trace!(node = %id, parent = %parent, %p, %q, u = %v, k = %depth, "new fraction");
        nodes.push(Node::new(p, q, v, depth, Some(parent)));
        nodes[parent.index()].children_mut(commuted).insert(v, id);
        Ok(id)
    }

    /// The node with the same prefix and the last coefficient replaced by `v >= 1`.
    pub(crate) fn sibling(&self, id: NodeId, v: Q) -> Result<NodeId, FractionError> {
        let asc = match self.ascendant(id) {
            Some(asc) => asc,
            None => {
                debug_assert!(v.is_one(), "0/1 has no sibling [{}]", v);
                return Ok(ONE_OVER_ONE);
            }
        };
        let direct = self.is_direct(id);
        if v > Q::one() {
            return self.child(asc, v, !direct);
        }
        if direct {
            // [.., x, 1] = [.., x + 1]
            if asc == ZERO_OVER_ONE {
                Ok(ONE_OVER_ONE)
            } else {
                self.increment(asc)
            }
        } else {
            // [.., x - 1, 1, 1] = [.., x - 1, 2]
            self.branch(asc)
        }
    }

    /// `[.., u + 1]`
    #[inline]
    pub(crate) fn increment(&self, id: NodeId) -> Result<NodeId, FractionError> {
        if id == ZERO_OVER_ONE {
            return Ok(ONE_OVER_ONE);
        }
        let v = self.successor(self.u(id))?;
        self.sibling(id, v)
    }

    fn cached_father(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.borrow()[id.index()].father
    }

    fn cache_father(&self, id: NodeId, father: NodeId) {
        self.nodes.borrow_mut()[id.index()].father = Some(father);
    }

    /// `[.., u - 1]`, for `u >= 2`.
    ///
    /// The father of `[.., x - 1, 1, 2]` is the branch of `[.., x]`, which needs
    /// the father of `[.., x]` first. Such chains are resolved bottom-up in a loop,
    /// in O(length of the chain) the first time and O(1) afterwards.
    pub(crate) fn father(&self, id: NodeId) -> Result<NodeId, FractionError> {
        let two = Q::one() + Q::one();
        let mut chain = Vec::new();
        let mut top = id;
        let mut father = loop {
            if let Some(father) = self.cached_father(top) {
                break father;
            }
            match self.ascendant(top) {
                Some(asc) if self.u(top) == two && !self.is_direct(top) => {
                    chain.push(top);
                    top = asc;
                }
                _ => {
                    let father = self.sibling(top, self.u(top) - Q::one())?;
                    self.cache_father(top, father);
                    break father;
                }
            }
        };
        while let Some(node) = chain.pop() {
            // `node` is [.., x - 1, 1, 2] below `top` = [.., x]
            let commuted = self.u(father) != self.u(top) - Q::one();
            father = self.child(father, two, commuted)?;
            self.cache_father(node, father);
            top = node;
        }
        Ok(father)
    }

    /// `[.., u - 1, 2]`, for `u >= 2`
    pub(crate) fn branch(&self, id: NodeId) -> Result<NodeId, FractionError> {
        let u = self.u(id);
        let father = self.father(id)?;
        // the father is spelled [.., u - 1] only if that is its own last quotient
        let commuted = self.u(father) != u - Q::one();
        self.child(father, Q::one() + Q::one(), commuted)
    }

    /// Walks down from 0/1 along the continued fraction of `p/q`, with
    /// `0 <= p <= q` coprime, creating the missing nodes on the way.
    fn descend(&self, p: I, q: I) -> Result<NodeId, FractionError> {
        let mut current = ZERO_OVER_ONE;
        let mut state = Descent::Direct;
        let mut previous: Option<(NodeId, Descent)> = None;
        let mut last = Q::zero();

        let (mut a, mut b) = (q, p);
        while !b.is_zero() {
            let (quot, rem) = a.div_rem(&b);
            let v: Q = <Q as NumCast>::from(quot.clone())
                .ok_or_else(|| FractionError::QuotientOverflow(quot.to_string()))?;

            let (next, next_state) = if v > Q::one() {
                (self.child(current, v, state == Descent::Commuted)?, Descent::Direct)
            } else {
                match previous {
                    // [0; 1] is its own node
                    None => (ONE_OVER_ONE, Descent::Direct),
                    // [.., x, 1] is the node [.., x + 1]
                    Some((node, s)) => {
                        let x = self.successor(last)?;
                        (self.child(node, x, s == Descent::Commuted)?, Descent::Commuted)
                    }
                }
            };
            trace!(quotient = %v, node = %next, state = ?next_state, "descent step");

            previous = Some((current, state));
            current = next;
            state = next_state;
            last = v;
            a = b;
            b = rem;
        }
        Ok(current)
    }
}
