//! Core abstractions shared by the model and its front ends
//!
//! Error taxonomy, name validation, the view
//! binder contract and logging setup.

mod error;
pub mod logging;
mod naming;
mod view;

pub use error::*;
pub use logging::*;
pub use naming::*;
pub use view::*;
