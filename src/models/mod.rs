//! Data models

pub mod customer;
pub mod attribution;
pub mod summary;
pub mod risk;
pub mod drivers;

pub use customer::*;
pub use attribution::*;
pub use summary::*;
pub use risk::*;
pub use drivers::*;
