//! Helpers shared by the spanwise test suites.
//!
//! - [`profile`] reads property-test tuning from the environment.
//! - [`capture`] records spans and events so tests can assert on logging.

pub mod capture;
pub mod profile;
