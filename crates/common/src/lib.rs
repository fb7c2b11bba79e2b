pub mod types;

pub use types::{Money, OrderId, Violation, Violations};
