//! Domain models for the PharmaMap catalog.

mod catalog;
mod inventory;
mod pharmacy;
mod summary;
mod user;

pub use catalog::*;
pub use inventory::*;
pub use pharmacy::*;
pub use summary::*;
pub use user::*;
