pub mod allocate_deposit;
pub mod initialize_portfolio;
pub mod initialize_registry;
pub mod set_custom_strategy;
pub mod set_mode;

pub use allocate_deposit::*;
pub use initialize_portfolio::*;
pub use initialize_registry::*;
pub use set_custom_strategy::*;
pub use set_mode::*;
