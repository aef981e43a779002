mod error;
mod tree;
pub mod traits;

pub use error::FractionError;
pub use traits::{FractionInteger, HashQuotientMap, Quotient, QuotientMap, WithUnsigned};
pub use tree::{is_primary_left, Fraction, Node, NodeId, Quotients, SternBrocot};
