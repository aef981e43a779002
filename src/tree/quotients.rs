use num_traits::NumCast;

use crate::traits::Quotient;

/// Iterator over the `(u_i, i)` pairs of the continued fraction `[u_0; .., u_k]`
/// of a [Fraction][crate::Fraction]. The coefficients are collected once, so the
/// iterator can be cloned to restart and supports random access by rank.
#[derive(Debug, Clone)]
pub struct Quotients<Q> {
    coeffs: Vec<Q>,
    front: usize, // rank of the next pair from the front
    back: usize,  // one past the rank of the next pair from the back
}

impl<Q: Quotient> Quotients<Q> {
    pub(crate) fn new(coeffs: Vec<Q>) -> Self {
        let back = coeffs.len();
        Quotients { coeffs, front: 0, back }
    }

    /// rank of the next pair returned by `next()`
    #[inline]
    pub fn rank(&self) -> usize {
        self.front
    }

    /// the whole sequence of coefficients, regardless of the position
    #[inline]
    pub fn coeffs(&self) -> &[Q] {
        &self.coeffs[..]
    }

    /// the pair of a given rank
    pub fn get(&self, rank: usize) -> Option<(Q, Q)> {
        let u = *self.coeffs.get(rank)?;
        Some((u, <Q as NumCast>::from(rank)?))
    }
}

impl<Q: Quotient> Iterator for Quotients<Q> {
    type Item = (Q, Q);

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let item = self.get(self.front);
        self.front += 1;
        item
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.front = self.front.saturating_add(n).min(self.back);
        self.next()
    }
}

impl<Q: Quotient> DoubleEndedIterator for Quotients<Q> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.get(self.back)
    }
}

impl<Q: Quotient> ExactSizeIterator for Quotients<Q> {}
