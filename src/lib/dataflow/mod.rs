//! Dataflow node kinds (C6): the generic unary/binary/n-ary/window nodes and
//! the PWL/PWC/variable sources that feed them, wired together over
//! `graph::Notifier`/`graph::Memory`.

pub mod binary;
pub mod min_optimal;
pub mod nary;
pub mod operators;
pub mod source;
pub mod unary;
pub mod window_node;

pub use binary::BinaryNode;
pub use min_optimal::{MinOptimalWindowNode, MinOptimalWindowNode2};
pub use nary::{NaryNode, NaryOp};
pub use operators::{Add, Filter, HigherThan, LowerThan, Max, Min, MultConst, Shift, Sub};
pub use source::{PwcSourceNode, PwlSourceNode, VariableNode};
pub use unary::UnaryNode;
pub use window_node::WindowNode;
