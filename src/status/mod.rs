//! Document status derivation.
//!
//! - [`classifier`] — per-document [`DisplayStatus`](crate::models::DisplayStatus),
//!   status counts and the per-driver compliance verdict.
//! - [`dates`] — lenient parsing of backend expiry dates.
//! - [`reminders`] — expired and soon-to-expire documents, most urgent first.

pub mod classifier;
pub mod dates;
pub mod reminders;
