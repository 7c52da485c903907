//! Functional wrappers (functions, operators, predicates, consumers,
//! suppliers and their fallible forms) specialised over the primitive types,
//! with composition, partial application, error adaptation and memoization.
//!
//! ```
//! use primfn::{Function, IntUnaryOperator};
//!
//! let square: IntUnaryOperator = Function::new(|x| x * x);
//! let square = square.memoize();
//! assert_eq!(square.apply(12), 144);
//! assert!(square.memoize().ptr_eq(&square));
//! ```

pub mod bifunction;
pub mod consumer;
pub mod error;
pub mod function;
mod handle;
pub mod memoizer;
pub mod pipeline;
pub mod predicate;
pub mod prim;
pub mod specialized;
pub mod supplier;
pub mod throwing;

pub use bifunction::{BiFunction, BinaryOperator};
pub use consumer::{BiConsumer, Consumer};
pub use error::{FnError, Result};
pub use function::{Function, UnaryOperator};
pub use memoizer::{CacheStats, Memoizer};
pub use pipeline::{Arith, Pipeline, Step, StepKind};
pub use predicate::{BiPredicate, Predicate};
pub use prim::{CacheKey, Primitive, PrimitiveKind};
pub use specialized::*;
pub use supplier::{Supplier, ThrowingSupplier};
pub use throwing::{
    ThrowingBiFunction, ThrowingBinaryOperator, ThrowingFunction, ThrowingPredicate,
    ThrowingUnaryOperator,
};
