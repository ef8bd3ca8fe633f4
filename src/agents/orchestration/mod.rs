//! Multi-agent orchestration
//!
//! Fan-out: every agent receives the same prompt, calls run concurrently up to
//! a configured limit, and results are reassembled in roster order.

mod fan_out;

pub use fan_out::FanOutOrchestrator;
