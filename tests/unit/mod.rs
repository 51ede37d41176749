//! Unit test harness for stepburst.
//!
//! This module organizes unit tests for each component of the library.

mod config_parsing;
mod config_validation;
mod driver;
mod feedback;
mod properties;
