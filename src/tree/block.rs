use num_integer::Integer;
use num_traits::{One, Zero};

/// The last two principal convergents of a continued fraction `[u_0; .., u_k]`.
///
/// Extending the expansion with one more coefficient is the classical
/// `p_(k+1) = a p_k + p_(k-1)` recurrence.
#[derive(Debug, Clone)]
pub struct Block<T> {
    pm1: T, // p_k
    pm2: T, // p_(k-1)
    qm1: T, // q_k
    qm2: T, // q_(k-1)
}

impl<T> Block<T> {
    /// create a block from the convergent `pm1/qm1` and the one before it `pm2/qm2`
    pub fn new(pm1: T, pm2: T, qm1: T, qm2: T) -> Self {
        Block { pm1, pm2, qm1, qm2 }
    }
}

impl<T: Zero + One> Block<T> {
    /// the block of `[0]`, whose preceding convergent is `1/0`
    pub fn zero() -> Self {
        Block { pm1: T::zero(), pm2: T::one(), qm1: T::one(), qm2: T::zero() }
    }
}

impl<T: Integer + Clone> Block<T> {
    /// `[.., u_k]` extended with `a`, i.e. `[.., u_k, a]`
    pub fn rmove(&self, a: T) -> (T, T) {
        let p = a.clone() * self.pm1.clone() + self.pm2.clone();
        let q = a * self.qm1.clone() + self.qm2.clone();
        (p, q)
    }

    /// `[.., u_k - 1, 1]` extended with `a`, i.e. `[.., u_k - 1, 1, a]`
    pub fn commuted_move(&self, a: T) -> (T, T) {
        // (a + 1) p_k - p_(k-1), without going above the result
        let p = a.clone() * self.pm1.clone() + (self.pm1.clone() - self.pm2.clone());
        let q = a * self.qm1.clone() + (self.qm1.clone() - self.qm2.clone());
        (p, q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_move_test() {
        // [0; 2] = 1/2 after [0] = 0/1
        assert_eq!(Block::<i64>::zero().rmove(2), (1, 2));

        // [0; 1, 2] = 2/3, from 1/1 and 0/1
        let one = Block::new(1i64, 0, 1, 1);
        assert_eq!(one.rmove(2), (2, 3));

        // [0; 1, 1, 2] = 3/5, from [0; 2] = 1/2 and 0/1
        let half = Block::new(1i64, 0, 2, 1);
        assert_eq!(half.commuted_move(2), (3, 5));

        // 3 * q_k is above i64::MAX while the result is not
        let near = Block::new(1i64, 0, i64::MAX / 3 + 1, 2);
        assert_eq!(near.commuted_move(2), (3, i64::MAX));
    }
}
