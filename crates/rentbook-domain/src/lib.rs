//! rentbook-domain
//!
//! Pure domain models (Portfolio, Property, Rental, FeeTemplate, Payment, etc.).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod common;
pub mod fee;
pub mod media;
pub mod meter;
pub mod owner;
pub mod payment;
pub mod portfolio;
pub mod property;
pub mod rental;
pub mod tenant;
pub mod timeline;

pub use common::*;
pub use fee::*;
pub use media::*;
pub use meter::*;
pub use owner::*;
pub use payment::*;
pub use portfolio::*;
pub use property::*;
pub use rental::*;
pub use tenant::*;
pub use timeline::*;
