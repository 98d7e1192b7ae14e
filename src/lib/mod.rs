//! A streaming dataflow engine that evaluates real-valued signal
//! specifications over piecewise-polynomial traces: samples come in through
//! PWL/PWC sources, flow through unary/binary/n-ary/window nodes wired by a
//! `Memory`, and are observed as `Signal`s at the graph's sink points.

// Module definition
mod error;
pub mod dataflow;
pub mod graph;
pub mod interval;
pub mod logger;
pub mod poly;
pub mod queue;
pub mod window;
pub mod window_ops;

// Re-exports
pub use self::error::Error;
pub use self::graph::{Memory, NaryReceiver, Notifier, Signal};
pub use self::interval::Interval;
pub use self::poly::Polynomial;
pub use self::window::WindowInterval;
