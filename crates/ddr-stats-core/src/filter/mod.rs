//! Play filtering
//!
//! Every player in a comparison is filtered the same way: the failing grade
//! is dropped and, optionally, only plays inside a date window are kept.

mod criteria;
mod window;

pub use criteria::PlayFilter;
pub use window::TimeWindow;
