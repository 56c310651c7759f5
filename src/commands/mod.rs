//! CLI commands for charm-fleet
//!
//! This module contains all user-facing command implementations:
//!
//! ## Inspection
//! - **what_is**: Classify a single charm checkout
//! - **status**: Batch classification report for the whole fleet
//!
//! ## Fleet maintenance
//! - **sync**: Re-apply the per-kind templates across the fleet
//! - **add_release**: Extend every charm's test/CI matrix to a new release
//!
//! ## Single-charm maintenance
//! - **bump**: Create the stable branch and pin dependencies
//! - **lock**: Build and extract src/build.lock for a source charm
//!
//! Commands stay thin: they parse/validate input, load `FleetConfig`, and
//! delegate to the engines in `core`.

pub mod add_release;
pub mod bump;
pub mod lock;
pub mod status;
pub mod sync;
pub mod what_is;

pub use add_release::run_add_release;
pub use bump::run_bump;
pub use lock::run_lock;
pub use status::run_status;
pub use sync::run_sync;
pub use what_is::run_what_is;
