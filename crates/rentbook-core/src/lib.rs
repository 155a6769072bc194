//! rentbook-core
//!
//! Fee schedule engine and portfolio services for Rentbook.
//! Depends on rentbook-domain. No CLI, no terminal I/O, no storage.

pub mod attachment_service;
pub mod calendar;
pub mod due_service;
pub mod error;
pub mod fee_service;
pub mod frequency;
pub mod meter_service;
pub mod owner_service;
pub mod page;
pub mod payment_service;
pub mod property_service;
pub mod rental_service;
pub mod schedule;
pub mod tenant_service;
pub mod time;
pub mod timeline_service;

pub use attachment_service::*;
pub use calendar::*;
pub use due_service::*;
pub use error::{ConfigurationError, CoreError};
pub use fee_service::*;
pub use frequency::{month_name, FrequencyRule};
pub use meter_service::*;
pub use owner_service::*;
pub use page::{paginate, Page};
pub use payment_service::*;
pub use property_service::*;
pub use rental_service::*;
pub use schedule::*;
pub use tenant_service::*;
pub use time::{Clock, FixedClock};
pub use timeline_service::*;
