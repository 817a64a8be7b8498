//! Service Module
//!
//! Business logic of the relay. The router classifies an update and drives
//! the listing and dispatch services; `menu` renders everything the user sees.

pub mod dispatch;
pub mod listing;
pub mod menu;
pub mod notify;
pub mod router;

// Re-export for convenience
pub use dispatch as dispatch_service;
pub use listing as listing_service;
pub use router::{RouterError, RouterSettings, UpdateRouter};
