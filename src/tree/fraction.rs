use core::cmp::Ordering;
use core::fmt;
use num_integer::Integer;
use num_rational::Ratio;
use num_traits::CheckedMul;

use super::quotients::Quotients;
use super::store::{SternBrocot, ONE_OVER_ONE, ZERO_OVER_ONE};
use super::node::NodeId;
use crate::error::FractionError;
use crate::traits::{FractionInteger, Quotient, QuotientMap, WithUnsigned};

/// A positive irreducible fraction of a [SternBrocot] tree.
///
/// It is only a reference to the node `p/q` (or `q/p` when the fraction is
/// greater than one) plus an orientation flag, so it is cheap to copy.
/// The continued fraction of a fraction is `[u_0; u_1, .., u_k]` where `k`
/// is its depth and `u_k >= 2`, except for `1/1 = [1]`.
///
/// Every operation except [is_null][Fraction::is_null], [p][Fraction::p],
/// [q][Fraction::q], comparisons and display panics on the null fraction.
pub struct Fraction<'a, I, Q, M> {
    tree: &'a SternBrocot<I, Q, M>,
    node: Option<NodeId>,
    sup1: bool,
}

impl<'a, I, Q, M> Clone for Fraction<'a, I, Q, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, I, Q, M> Copy for Fraction<'a, I, Q, M> {}

impl<'a, I, Q, M> Fraction<'a, I, Q, M>
where
    I: FractionInteger<Q>,
    Q: Quotient,
    M: QuotientMap<Q>,
{
    /// 1/1 is always spelled `[1]`
    #[inline]
    pub(crate) fn new(tree: &'a SternBrocot<I, Q, M>, node: NodeId, sup1: bool) -> Self {
        Fraction { tree, node: Some(node), sup1: sup1 || node == ONE_OVER_ONE }
    }

    #[inline]
    pub(crate) fn null(tree: &'a SternBrocot<I, Q, M>) -> Self {
        Fraction { tree, node: None, sup1: false }
    }

    #[inline]
    fn with(&self, node: NodeId) -> Self {
        Fraction::new(self.tree, node, self.sup1)
    }

    fn step(&self, node: Result<NodeId, FractionError>) -> Self {
        match node {
            Ok(id) => self.with(id),
            Err(e) => panic!("{}", e),
        }
    }

    #[inline]
    fn id(&self) -> NodeId {
        match self.node {
            Some(id) => id,
            None => panic!("{}", FractionError::NullFraction),
        }
    }

    /// true iff it is the null fraction 0/0
    #[inline]
    pub fn is_null(&self) -> bool {
        self.node.is_none()
    }

    /// true iff it is 0/1 or 1/0
    #[inline]
    pub fn is_boundary(&self) -> bool {
        self.node == Some(ZERO_OVER_ONE)
    }

    /// the numerator
    pub fn p(&self) -> I {
        match self.node {
            Some(id) => {
                let (p, q) = self.tree.numerator_denominator(id);
                if self.sup1 { q } else { p }
            }
            None => I::zero(),
        }
    }

    /// the denominator
    pub fn q(&self) -> I {
        match self.node {
            Some(id) => {
                let (p, q) = self.tree.numerator_denominator(id);
                if self.sup1 { p } else { q }
            }
            None => I::zero(),
        }
    }

    /// the last coefficient of its continued fraction
    #[inline]
    pub fn u(&self) -> Q {
        self.tree.u(self.id())
    }

    /// the depth, i.e. the index of the last coefficient of its continued fraction.
    /// Both 0/1 and 1/0 have depth 0, and so has 1/1 which is always `[1]`.
    pub fn k(&self) -> Q {
        let k = self.tree.k(self.id());
        if self.sup1 && !k.is_zero() { k - Q::one() } else { k }
    }

    /// the depth of the underlying node, one more than [k][Fraction::k] when
    /// the fraction is greater than one
    #[inline]
    pub fn node_depth(&self) -> Q {
        self.tree.k(self.id())
    }

    /// true iff the fraction is represented by the node of its inverse
    #[inline]
    pub fn is_sup1(&self) -> bool {
        self.sup1
    }

    #[inline]
    pub fn node_id(&self) -> Option<NodeId> {
        self.node
    }

    /// true iff both fractions are backed by the same node of the same tree
    #[inline]
    pub fn same_node(&self, other: &Self) -> bool {
        core::ptr::eq(self.tree, other.tree) && self.node == other.node
    }

    /// the depth of the value, counting 1/0 at depth -1
    fn signed_depth(&self) -> Q {
        self.tree.k(self.id()) - if self.sup1 { Q::one() } else { Q::zero() }
    }

    #[inline]
    pub fn even(&self) -> bool {
        self.k().is_even()
    }

    #[inline]
    pub fn odd(&self) -> bool {
        self.k().is_odd()
    }

    /// `[u_0; .., u_k + 1]`
    fn increment(&self) -> Self {
        self.step(self.tree.increment(self.id()))
    }

    /// `[u_0; .., u_k - 1, 2]`
    fn branch(&self) -> Self {
        let id = self.id();
        if id == ONE_OVER_ONE {
            // [1] -> [0; 2]
            return match self.tree.increment(id) {
                Ok(half) => Fraction::new(self.tree, half, false),
                Err(e) => panic!("{}", e),
            };
        }
        self.step(self.tree.branch(id))
    }

    /// Its left descendant in the Stern-Brocot tree (construct it if needed).
    /// 0/1 has none and gives the null fraction.
    pub fn left(&self) -> Self {
        if self.is_boundary() {
            return if self.sup1 { self.increment() } else { Fraction::null(self.tree) };
        }
        if self.even() { self.branch() } else { self.increment() }
    }

    /// Its right descendant in the Stern-Brocot tree (construct it if needed).
    /// 1/0 has none and gives the null fraction.
    pub fn right(&self) -> Self {
        if self.is_boundary() {
            return if self.sup1 { Fraction::null(self.tree) } else { self.increment() };
        }
        if self.even() { self.increment() } else { self.branch() }
    }

    fn check_append(&self, v: Q) {
        assert!(v > Q::one(), "appended quotients must be >= 2, got {}", v);
        assert!(!(self.is_boundary() && self.sup1), "nothing can be appended to 1/0");
    }

    /// `[u_0; .., u_k, v]` for `v >= 2` (construct it if needed)
    pub fn next(&self, v: Q) -> Self {
        self.check_append(v);
        self.step(self.tree.child(self.id(), v, false))
    }

    /// `[u_0; .., u_k - 1, 1, v]` for `v >= 2` and `u_k >= 2` (construct it if needed)
    pub fn next_commuted(&self, v: Q) -> Self {
        self.check_append(v);
        assert!(self.u() > Q::one(), "no commuted spelling for a last quotient {}", self.u());
        self.step(self.tree.child(self.id(), v, true))
    }

    /// The father, ie `[u_0; .., u_k]` => `[u_0; .., u_k - 1]`.
    /// The roots 0/1, 1/0 and 1/1 have none and give the null fraction.
    ///
    /// It is O(1) except for `[.., x, 1, .., 1, 2]`, whose father depends on the
    /// father of `[.., x + 1]`: the first call walks the `n` ones in O(n) and
    /// caches the result for every node of the chain.
    ///
    /// # Panics
    /// If the father has a quotient that overflows `Q`.
    pub fn father(&self) -> Self {
        match self.try_father() {
            Ok(f) => f,
            Err(e) => panic!("{}", e),
        }
    }

    fn try_father(&self) -> Result<Self, FractionError> {
        let id = self.id();
        if id == ZERO_OVER_ONE || id == ONE_OVER_ONE {
            return Ok(Fraction::null(self.tree));
        }
        Ok(self.with(self.tree.father(id)?))
    }

    /// `[u_0; .., u_k]` => `[u_0; .., m]` in O(u_k - m)
    ///
    /// # Panics
    /// If `m` is not in `[1, u_k - 1]`.
    pub fn father_at(&self, m: Q) -> Self {
        match self.try_father_at(m) {
            Ok(f) => f,
            Err(e) => panic!("{}", e),
        }
    }

    pub fn try_father_at(&self, m: Q) -> Result<Self, FractionError> {
        let u = self.u();
        if m < Q::one() || m >= u {
            return Err(FractionError::InvalidFatherDepth {
                m: m.to_string(),
                max: (u - Q::one()).to_string(),
            });
        }
        let mut f = *self;
        let mut i = u;
        while i > m {
            f = f.try_father()?;
            i = i - Q::one();
        }
        Ok(f)
    }

    /// The ancestor in O(1), ie the preceding principal convergent:
    /// `[u_0; .., u_(k-1), u_k]` => `[u_0; .., u_(k-1)]` if `u_(k-1) > 1`,
    /// `[u_0; .., u_(k-2) + 1]` otherwise.
    /// 0/1 and 1/0 give the null fraction.
    pub fn ancestor(&self) -> Self {
        match self.tree.ascendant(self.id()) {
            Some(asc) => self.with(asc),
            None => Fraction::null(self.tree),
        }
    }

    /// true iff its ancestor has depth `k - 1`
    #[inline]
    pub fn is_ancestor_direct(&self) -> bool {
        self.tree.is_direct(self.id())
    }

    /// `[u_0; .., u_(k-1), u_k]` => `[u_0; .., u_(k-1)]`. It has the same value as
    /// its [ancestor][Fraction::ancestor].
    #[inline]
    pub fn previous_partial(&self) -> Self {
        self.ancestor()
    }

    /// `[u_0; .., u_k]` => `[0; u_0, .., u_k]` or `[0; u_0, .., u_k]` => `[u_0; .., u_k]`
    #[inline]
    pub fn inverse(&self) -> Self {
        match self.node {
            Some(id) => Fraction::new(self.tree, id, !self.sup1),
            None => *self,
        }
    }

    /// The partial fraction of depth `kp <= k`, ie `[u_0; .., u_k]` => `[u_0; .., u_kp]`.
    /// Depth -1 gives 1/0.
    pub fn partial(&self, kp: Q) -> Self {
        let tree = self.tree;
        let shift = if self.sup1 { Q::one() } else { Q::zero() };
        let depth = |id: NodeId| tree.k(id) - shift;
        let mut id = self.id();
        // depth of the last coefficient of the current prefix, which is
        // `[.., u - 1, 1]` instead of `[.., u]` when one more than the depth of `id`
        let mut spelled = depth(id);
        while spelled > kp {
            let asc = match tree.ascendant(id) {
                Some(asc) => asc,
                // [0] => 1/0
                None => return tree.one_over_zero(),
            };
            if spelled != depth(id) {
                // [.., x - 1, 1] => [.., x - 1], itself spelled [.., y, 1] when x = 2
                id = match tree.father(id) {
                    Ok(father) => father,
                    Err(e) => panic!("{}", e),
                };
                spelled = spelled - Q::one();
            } else {
                spelled = if tree.is_direct(id) { depth(asc) } else { depth(asc) + Q::one() };
                id = asc;
            }
        }
        Fraction::new(tree, id, self.sup1)
    }

    /// The partial fraction of depth `k - i`, ie `[u_0; .., u_k]` => `[u_0; .., u_(k-i)]`
    #[inline]
    pub fn reduced(&self, i: Q) -> Self {
        self.partial(self.k() - i)
    }

    /// Modifies `[u_0; .., u_k]` into `[u_0; .., u_k, m]`. The depth of the new
    /// quotient is given as `(m, depth)` since `[.., u_k]` may also be written
    /// `[.., u_k - 1, 1]`, in which case `m` lands at depth `k + 2`.
    ///
    /// # Panics
    /// If the quotient cannot be appended at that depth.
    pub fn push_back(&mut self, quotient: (Q, Q)) {
        if let Err(e) = self.try_push_back(quotient) {
            panic!("{}", e);
        }
    }

    pub fn try_push_back(&mut self, quotient: (Q, Q)) -> Result<(), FractionError> {
        let (m, depth) = quotient;
        let invalid = |k: Q| FractionError::InvalidPush {
            coefficient: m.to_string(),
            depth: depth.to_string(),
            k: k.to_string(),
        };

        let id = match self.node {
            Some(id) => id,
            None => {
                if !depth.is_zero() || m.is_negative() {
                    return Err(invalid(-Q::one()));
                }
                *self = if m.is_zero() {
                    self.tree.zero_over_one()
                } else if m.is_one() {
                    Fraction::new(self.tree, ONE_OVER_ONE, true)
                } else {
                    Fraction::new(self.tree, self.tree.child(ZERO_OVER_ONE, m, false)?, true)
                };
                return Ok(());
            }
        };

        let k = self.tree.k(id);
        if m < Q::one() || (id == ZERO_OVER_ONE && self.sup1) {
            return Err(invalid(self.signed_depth()));
        }
        let mut sup1 = self.sup1;
        if id == ONE_OVER_ONE && depth == k + Q::one() {
            // [1] written [0; 1]
            sup1 = false;
        }
        let node_depth = if sup1 { depth + Q::one() } else { depth };
        let next = if node_depth == k + Q::one() {
            if m > Q::one() {
                self.tree.child(id, m, false)?
            } else {
                self.tree.increment(id)?
            }
        } else if node_depth == k + Q::one() + Q::one() && self.tree.u(id) > Q::one() {
            if m > Q::one() {
                self.tree.child(id, m, true)?
            } else {
                self.tree.branch(id)?
            }
        } else {
            return Err(invalid(self.signed_depth()));
        };
        *self = Fraction::new(self.tree, next, sup1);
        Ok(())
    }

    /// Splitting formula in O(1): `self = f1 ⊕ f2` where `f1 < self < f2`
    /// are its two parents (its father and its ancestor).
    ///
    /// # Panics
    /// On 0/1 and 1/0.
    pub fn split(&self) -> (Self, Self) {
        assert!(!self.is_boundary(), "0/1 and 1/0 cannot be split");
        if self.id() == ONE_OVER_ONE {
            return (self.tree.zero_over_one(), self.tree.one_over_zero());
        }
        let father = self.father();
        let ancestor = self.ancestor();
        if self.even() { (father, ancestor) } else { (ancestor, father) }
    }

    /// Berstel splitting formula in O(1): `self = nb1 * f1 ⊕ nb2 * f2` with
    /// `f1 < self < f2` returned as `(f1, nb1, f2, nb2)`. If `k` is even then
    /// `nb1 = 1`, otherwise `nb2 = 1`, and the other one is `u_k`.
    ///
    /// # Panics
    /// On 0/1 and 1/0.
    pub fn split_berstel(&self) -> (Self, Q, Self, Q) {
        assert!(!self.is_boundary(), "0/1 and 1/0 cannot be split");
        let u = self.u();
        // the last two principal convergents
        let last = self.ancestor();
        let last_id = last.id();
        let before = if !self.is_ancestor_direct() {
            self.step(self.tree.father(last_id))
        } else {
            match self.tree.ascendant(last_id) {
                Some(asc) => self.with(asc),
                None => last.inverse(),
            }
        };
        if self.even() {
            (before, Q::one(), last, u)
        } else {
            (last, u, before, Q::one())
        }
    }

    /// The coefficients `[u_0, .., u_k]` of its continued fraction, in O(k).
    /// 1/0 has no coefficient.
    pub fn cfrac(&self) -> Vec<Q> {
        let mut quotients = Vec::new();
        let mut id = self.id();
        let mut carry = Q::zero();
        while let Some(asc) = self.tree.ascendant(id) {
            quotients.push(self.tree.u(id) - carry);
            carry = Q::zero();
            if self.tree.k(id) - self.tree.k(asc) != Q::one() {
                // [.., x - 1, 1, u] hangs below [.., x]
                quotients.push(Q::one());
                carry = Q::one();
            }
            id = asc;
        }
        if !self.sup1 {
            quotients.push(Q::zero());
        }
        quotients.reverse();
        quotients
    }

    /// Iterates over the `(u_i, i)` pairs of its continued fraction
    pub fn iter(&self) -> Quotients<Q> {
        Quotients::new(self.cfrac())
    }

    /// true iff it is `p1/q1`, with `p1, q1 >= 0`
    pub fn equals(&self, p1: I, q1: I) -> bool {
        cmp_fractions(self.p(), self.q(), p1, q1) == Ordering::Equal
    }

    /// true iff it is less than `p1/q1`, with `p1, q1 >= 0`
    pub fn less_than(&self, p1: I, q1: I) -> bool {
        cmp_fractions(self.p(), self.q(), p1, q1) == Ordering::Less
    }

    /// true iff it is greater than `p1/q1`, with `p1, q1 >= 0`
    pub fn more_than(&self, p1: I, q1: I) -> bool {
        cmp_fractions(self.p(), self.q(), p1, q1) == Ordering::Greater
    }

    /// The fraction as a [Ratio], `None` for 1/0 and 0/0
    pub fn to_ratio(&self) -> Option<Ratio<I>> {
        let q = self.q();
        if q.is_zero() {
            None
        } else {
            Some(Ratio::new_raw(self.p(), q))
        }
    }
}

/// Compares `p1/q1` and `p2/q2`, with non-negative terms and non-zero
/// fractions (`1/0` is allowed). The cross products are used when they fit
/// in `I`, otherwise both continued fractions are expanded until they differ.
pub(crate) fn cmp_fractions<I: Integer + Clone + CheckedMul>(p1: I, q1: I, p2: I, q2: I) -> Ordering {
    if let (Some(lhs), Some(rhs)) = (p1.checked_mul(&q2), p2.checked_mul(&q1)) {
        return lhs.cmp(&rhs);
    }
    let (mut p1, mut q1, mut p2, mut q2) = (p1, q1, p2, q2);
    // every step inverts both remainders, and so the order
    let mut reversed = false;
    loop {
        let ord = match (q1.is_zero(), q2.is_zero()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => {
                let (a1, r1) = p1.div_rem(&q1);
                let (a2, r2) = p2.div_rem(&q2);
                if a1 == a2 {
                    p1 = core::mem::replace(&mut q1, r1);
                    p2 = core::mem::replace(&mut q2, r2);
                    reversed = !reversed;
                    continue;
                }
                a1.cmp(&a2)
            }
        };
        return if reversed { ord.reverse() } else { ord };
    }
}

impl<'a, I, Q, M> Fraction<'a, I, Q, M>
where
    I: FractionInteger<Q> + WithUnsigned,
    Q: Quotient,
    M: QuotientMap<Q>,
{
    #[inline]
    pub fn unsigned_p(&self) -> I::Unsigned {
        self.p().to_unsigned()
    }

    #[inline]
    pub fn unsigned_q(&self) -> I::Unsigned {
        self.q().to_unsigned()
    }
}

impl<'a, I, Q, M> Extend<(Q, Q)> for Fraction<'a, I, Q, M>
where
    I: FractionInteger<Q>,
    Q: Quotient,
    M: QuotientMap<Q>,
{
    fn extend<T: IntoIterator<Item = (Q, Q)>>(&mut self, iter: T) {
        for quotient in iter {
            self.push_back(quotient);
        }
    }
}

impl<'a, I, Q, M> IntoIterator for Fraction<'a, I, Q, M>
where
    I: FractionInteger<Q>,
    Q: Quotient,
    M: QuotientMap<Q>,
{
    type Item = (Q, Q);
    type IntoIter = Quotients<Q>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, 'b, I, Q, M> PartialEq<Fraction<'b, I, Q, M>> for Fraction<'a, I, Q, M>
where
    I: FractionInteger<Q>,
    Q: Quotient,
    M: QuotientMap<Q>,
{
    fn eq(&self, other: &Fraction<'b, I, Q, M>) -> bool {
        match (self.is_null(), other.is_null()) {
            (true, true) => true,
            (false, false) => self.equals(other.p(), other.q()),
            _ => false,
        }
    }
}

impl<'a, I, Q, M> Eq for Fraction<'a, I, Q, M>
where
    I: FractionInteger<Q>,
    Q: Quotient,
    M: QuotientMap<Q>,
{
}

impl<'a, 'b, I, Q, M> PartialOrd<Fraction<'b, I, Q, M>> for Fraction<'a, I, Q, M>
where
    I: FractionInteger<Q>,
    Q: Quotient,
    M: QuotientMap<Q>,
{
    fn partial_cmp(&self, other: &Fraction<'b, I, Q, M>) -> Option<Ordering> {
        if self.is_null() || other.is_null() {
            return if self.is_null() && other.is_null() { Some(Ordering::Equal) } else { None };
        }
        Some(cmp_fractions(self.p(), self.q(), other.p(), other.q()))
    }
}

impl<'a, I, Q, M> fmt::Display for Fraction<'a, I, Q, M>
where
    I: FractionInteger<Q>,
    Q: Quotient,
    M: QuotientMap<Q>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.p(), self.q())
    }
}

impl<'a, I, Q, M> fmt::Debug for Fraction<'a, I, Q, M>
where
    I: FractionInteger<Q>,
    Q: Quotient,
    M: QuotientMap<Q>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fraction")
            .field("p", &self.p())
            .field("q", &self.q())
            .field("node", &self.node)
            .field("sup1", &self.sup1)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::NumCast;

    fn depth<Q: Quotient>(i: usize) -> Q {
        <Q as NumCast>::from(i).unwrap()
    }

    type Tree = SternBrocot<i64, i32>;

    #[test]
    fn depth_and_quotient_test() {
        let tree = Tree::new();
        let f = tree.fraction(7, 5);
        assert_eq!((f.u(), f.k()), (2, 2));
        assert!(f.even());
        assert_eq!(f.node_depth(), 3);

        let g = tree.fraction(5, 7);
        assert_eq!((g.u(), g.k()), (2, 3));
        assert!(g.odd());

        assert_eq!(tree.fraction(1, 1).k(), 0);
        assert_eq!(tree.fraction(1, 1).u(), 1);
        assert_eq!(tree.fraction(4, 1).k(), 0);
        assert_eq!(tree.fraction(1, 4).k(), 1);
        assert_eq!(tree.zero_over_one().k(), 0);
        assert_eq!(tree.one_over_zero().k(), 0);
    }

    #[test]
    fn children_test() {
        let tree = Tree::new();
        let one = tree.fraction(1, 1);
        assert_eq!(one.left(), tree.fraction(1, 2));
        assert_eq!(one.right(), tree.fraction(2, 1));

        let half = tree.fraction(1, 2);
        assert_eq!(half.left(), tree.fraction(1, 3));
        assert_eq!(half.right(), tree.fraction(2, 3));

        let two = tree.fraction(2, 1);
        assert_eq!(two.left(), tree.fraction(3, 2));
        assert_eq!(two.right(), tree.fraction(3, 1));

        let f = tree.fraction(5, 3);
        assert_eq!(f.left(), tree.fraction(8, 5));
        assert_eq!(f.right(), tree.fraction(7, 4));

        assert_eq!(tree.zero_over_one().right(), one);
        assert!(tree.zero_over_one().left().is_null());
        assert_eq!(tree.one_over_zero().left(), one);
        assert!(tree.one_over_zero().right().is_null());
        assert!(tree.is_valid());
    }

    #[test]
    fn next_test() {
        let tree = Tree::new();
        let f = tree.fraction(1, 2);
        assert_eq!(f.next(2), tree.fraction(2, 5));
        assert_eq!(f.next_commuted(2), tree.fraction(3, 5));
        assert_eq!(tree.fraction(1, 1).next(3), tree.fraction(4, 3));
        assert_eq!(tree.zero_over_one().next(5), tree.fraction(1, 5));
    }

    #[test]
    #[should_panic(expected = "no commuted spelling")]
    fn next_commuted_panic_test() {
        let tree = Tree::new();
        tree.fraction(1, 1).next_commuted(2);
    }

    #[test]
    fn father_test() {
        let tree = Tree::new();
        assert_eq!(tree.fraction(7, 5).father(), tree.fraction(4, 3));
        assert_eq!(tree.fraction(5, 7).father(), tree.fraction(3, 4));
        assert_eq!(tree.fraction(3, 5).father(), tree.fraction(2, 3));
        assert_eq!(tree.fraction(2, 3).father(), tree.fraction(1, 2));
        assert_eq!(tree.fraction(1, 2).father(), tree.fraction(1, 1));
        assert_eq!(tree.fraction(5, 1).father(), tree.fraction(4, 1));
        // [0; 1, 1, 1, 1, 2] => [0; 1, 1, 1, 1, 1] = [0; 1, 1, 1, 2]
        assert_eq!(tree.fraction(8, 13).father(), tree.fraction(5, 8));

        assert!(tree.fraction(1, 1).father().is_null());
        assert!(tree.zero_over_one().father().is_null());
        assert!(tree.one_over_zero().father().is_null());
        assert!(tree.is_valid());
    }

    #[test]
    fn father_at_test() {
        let tree = Tree::new();
        let f = tree.fraction(1, 7);
        assert_eq!(f.father_at(3), tree.fraction(1, 3));
        assert_eq!(f.father_at(6), tree.fraction(1, 6));
        assert!(matches!(f.try_father_at(7), Err(FractionError::InvalidFatherDepth { .. })));
        assert!(matches!(f.try_father_at(0), Err(FractionError::InvalidFatherDepth { .. })));
    }

    #[test]
    fn ancestor_test() {
        let tree = Tree::new();
        let f = tree.fraction(7, 5);
        assert_eq!(f.ancestor(), tree.fraction(3, 2));
        assert!(f.is_ancestor_direct());
        assert_eq!(f.previous_partial(), f.ancestor());

        // [0; 1, 1, 2] => [0; 1, 1] = [0; 2]
        let g = tree.fraction(3, 5);
        assert_eq!(g.ancestor(), tree.fraction(1, 2));
        assert!(!g.is_ancestor_direct());

        assert_eq!(tree.fraction(3, 1).ancestor(), tree.one_over_zero());
        assert_eq!(tree.fraction(1, 3).ancestor(), tree.zero_over_one());
        assert!(tree.zero_over_one().ancestor().is_null());
    }

    #[test]
    fn inverse_test() {
        let tree = Tree::new();
        let f = tree.fraction(7, 5);
        assert_eq!(f.inverse(), tree.fraction(5, 7));
        assert!(f.inverse().same_node(&f));
        assert_eq!(tree.zero_over_one().inverse(), tree.one_over_zero());
        assert_eq!(tree.fraction(1, 1).inverse(), tree.fraction(1, 1));
    }

    #[test]
    fn partial_test() {
        let tree = Tree::new();
        // 355/113 = [3; 7, 16]
        let f = tree.fraction(355, 113);
        assert_eq!(f.partial(2), f);
        assert_eq!(f.partial(1), tree.fraction(22, 7));
        assert_eq!(f.partial(0), tree.fraction(3, 1));
        assert_eq!(f.partial(-1), tree.one_over_zero());
        assert_eq!(f.reduced(1), tree.fraction(22, 7));
        assert_eq!(f.reduced(3), tree.one_over_zero());

        // 3/5 = [0; 1, 1, 2], the partial [0; 1, 1] has the value of [0; 2]
        let g = tree.fraction(3, 5);
        assert_eq!(g.partial(2), tree.fraction(1, 2));
        assert_eq!(g.partial(1), tree.fraction(1, 1));
        assert_eq!(g.partial(0), tree.zero_over_one());
        assert_eq!(g.partial(-1), tree.one_over_zero());
    }

    #[test]
    fn push_back_test() {
        let tree = Tree::new();
        let mut f = tree.null();
        f.push_back((1, 0));
        f.push_back((2, 1));
        f.push_back((2, 2));
        assert_eq!(f, tree.fraction(7, 5));

        // [0; 1, 1, 1, 2] written one coefficient at a time
        let mut g = tree.null();
        g.extend((0..5).map(|i| (if i == 0 { 0 } else if i == 4 { 2 } else { 1 }, depth(i))));
        assert_eq!(g, tree.fraction(5, 8));

        let mut h = tree.fraction(1, 2);
        assert!(h.try_push_back((2, 5)).is_err());
        assert!(h.try_push_back((0, 2)).is_err());
        assert!(tree.one_over_zero().try_push_back((2, 1)).is_err());
        assert!(tree.null().try_push_back((2, 1)).is_err());
        assert!(tree.is_valid());
    }

    #[test]
    fn split_test() {
        let tree = Tree::new();
        let f = tree.fraction(5, 3);
        let (f1, f2) = f.split();
        assert_eq!((f1.p() + f2.p(), f1.q() + f2.q()), (5, 3));
        assert!(f1 < f && f < f2);
        assert_eq!(f1, tree.fraction(3, 2));
        assert_eq!(f2, tree.fraction(2, 1));

        let (g1, g2) = tree.fraction(1, 1).split();
        assert_eq!((g1, g2), (tree.zero_over_one(), tree.one_over_zero()));

        let (h1, h2) = tree.fraction(1, 4).split();
        assert_eq!((h1, h2), (tree.zero_over_one(), tree.fraction(1, 3)));
    }

    #[test]
    fn split_berstel_test() {
        let tree = Tree::new();
        // 7/5 = [1; 2, 2], even depth
        let (f1, nb1, f2, nb2) = tree.fraction(7, 5).split_berstel();
        assert_eq!((nb1, nb2), (1, 2));
        assert_eq!(f1, tree.fraction(1, 1));
        assert_eq!(f2, tree.fraction(3, 2));

        // 3/5 = [0; 1, 1, 2], odd depth
        let (g1, nb1, g2, nb2) = tree.fraction(3, 5).split_berstel();
        assert_eq!((nb1, nb2), (2, 1));
        assert_eq!(g1, tree.fraction(1, 2));
        assert_eq!(g2, tree.fraction(1, 1));

        let (h1, nb1, h2, nb2) = tree.fraction(4, 1).split_berstel();
        assert_eq!((h1, nb1, h2, nb2), (tree.zero_over_one(), 1, tree.one_over_zero(), 4));
    }

    #[test]
    #[should_panic(expected = "cannot be split")]
    fn split_boundary_test() {
        let tree = Tree::new();
        tree.one_over_zero().split();
    }

    #[test]
    fn cfrac_test() {
        let tree = Tree::new();
        assert_eq!(tree.fraction(7, 5).cfrac(), vec![1, 2, 2]);
        assert_eq!(tree.fraction(1, 1).cfrac(), vec![1]);
        assert_eq!(tree.fraction(5, 7).cfrac(), vec![0, 1, 2, 2]);
        assert_eq!(tree.fraction(5, 8).cfrac(), vec![0, 1, 1, 1, 2]);
        assert_eq!(tree.fraction(355, 113).cfrac(), vec![3, 7, 16]);
        assert_eq!(tree.zero_over_one().cfrac(), vec![0]);
        assert!(tree.one_over_zero().cfrac().is_empty());

        let pairs: Vec<_> = tree.fraction(7, 5).into_iter().collect();
        assert_eq!(pairs, vec![(1, 0), (2, 1), (2, 2)]);
    }

    #[test]
    fn comparison_test() {
        let tree = Tree::new();
        let f = tree.fraction(2, 3);
        assert!(f.equals(4, 6));
        assert!(f.less_than(3, 4));
        assert!(f.more_than(1, 2));
        assert!(f < tree.fraction(3, 4));
        assert!(tree.fraction(1000, 1) < tree.one_over_zero());
        assert!(tree.zero_over_one() < tree.fraction(1, 1000));
        assert_eq!(tree.null(), tree.null());
        assert!(tree.null() != tree.zero_over_one());
        assert_eq!(tree.null().partial_cmp(&f), None);

        let other = Tree::new();
        assert_eq!(f, other.fraction(2, 3));
        assert!(!f.same_node(&other.fraction(2, 3)));
    }

    #[test]
    fn large_comparison_test() {
        let tree = Tree::new();
        let (mut a, mut b) = (0i64, 1i64);
        for _ in 0..89 {
            let c = a + b;
            a = b;
            b = c;
        }
        // F(91) / F(90) > F(90) / F(89), with F(91) close to i64::MAX / 2
        let (f89, f90, f91) = (a, b, a + b);
        let f = tree.fraction(f91, f90);
        let g = tree.fraction(f90, f89);
        assert_eq!((f.p(), f.q()), (f91, f90));
        assert!(g < f);
        assert!(f > g);
        assert!(f != g);
        assert_eq!(f, tree.fraction(f91, f90));
        assert!(f.more_than(f90, f89));
        assert!(g.less_than(f91, f90));
        assert!(f.equals(f91, f90));
        assert!(f < tree.one_over_zero());
        assert!(tree.zero_over_one() < g.inverse());
        assert!(tree.is_valid());

        assert_eq!(cmp_fractions(i64::MAX, 2, i64::MAX - 1, 2), Ordering::Greater);
        assert_eq!(cmp_fractions(i64::MAX, i64::MAX - 1, i64::MAX - 1, i64::MAX - 2), Ordering::Less);
        assert_eq!(cmp_fractions(i64::MAX, 3, i64::MAX, 3), Ordering::Equal);
    }

    #[test]
    fn one_spelling_test() {
        let tree = Tree::new();
        let one = tree.fraction(1, 1);
        let from_half = tree.fraction(1, 2).father();
        let from_two = tree.fraction(2, 1).father();
        for f in [one, from_half, from_two, tree.zero_over_one().right(), one.inverse()].iter() {
            assert!(f.same_node(&one));
            assert!(f.is_sup1());
            assert_eq!(f.k(), 0);
            assert_eq!(f.cfrac(), vec![1]);
        }
        assert_eq!(tree.from_quotients(vec![0, 1]).unwrap().cfrac(), vec![1]);
        assert_eq!(tree.fraction(2, 3).partial(1).k(), 0);

        // [0; 1] can still be extended as [0; 1, m]
        assert_eq!(tree.from_quotients(vec![0, 1, 1]).unwrap(), tree.fraction(1, 2));
        assert_eq!(tree.from_quotients(vec![0, 1, 3]).unwrap(), tree.fraction(3, 4));
        assert_eq!(tree.from_quotients(vec![1, 3]).unwrap(), tree.fraction(4, 3));
    }

    #[test]
    fn fmt_test() {
        let tree = Tree::new();
        assert_eq!(format!("{}", tree.fraction(7, 5)), "7/5");
        assert_eq!(format!("{}", tree.one_over_zero()), "1/0");
        assert_eq!(format!("{}", tree.null()), "0/0");
        assert_eq!(tree.fraction(7, 5).to_ratio(), Some(Ratio::new(7, 5)));
        assert_eq!(tree.one_over_zero().to_ratio(), None);
        assert_eq!(tree.fraction(7, 5).unsigned_q(), 5u64);
    }

    #[test]
    #[should_panic(expected = "null fraction")]
    fn null_misuse_test() {
        let tree = Tree::new();
        tree.null().u();
    }
}
