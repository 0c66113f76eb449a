pub mod portfolio;
pub mod protocol;
pub mod strategy;

pub use portfolio::*;
pub use protocol::*;
pub use strategy::*;
