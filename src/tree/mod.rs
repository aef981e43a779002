//! Data structures and algorithms implementations related to
//! the Stern-Brocot tree of positive irreducible fractions
//!
//! There are three abstractions of the tree
//! 1. [SternBrocot][SternBrocot] owns every node, built on demand and never released
//! 2. [Node][Node] is one fraction `p/q <= 1` with its partial quotient, depth,
//!    preceding principal convergent and cached children
//! 3. [Fraction][Fraction] is a copyable handle on a node, with an orientation flag
//!    for fractions greater than one
//!
//! The splitting formulas of [Fraction] are the ones used in digital geometry
//! to recognize digital straight lines.
//!
//! # References:
//! - <https://en.wikipedia.org/wiki/Stern%E2%80%93Brocot_tree>
//! - J. Berstel, A. de Luca. Sturmian words, Lyndon words and trees.
//!   Theoretical Computer Science 178 (1997)
//!

mod block;
mod fraction;
mod node;
mod quotients;
mod store;

pub use fraction::*;
pub use node::*;
pub use quotients::*;
pub use store::SternBrocot;
