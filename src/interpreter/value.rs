/// The tagged runtime value and its canonical text form.
pub mod core;
/// The shared, mutable list container and its index semantics.
pub mod list;

pub use core::Value;
pub use list::List;
