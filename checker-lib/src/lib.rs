#![allow(clippy::needless_return)]

mod checker;
pub mod column_resolver;
pub mod config;
pub mod consistency;
mod error;
pub mod header_locator;
pub mod match_engine;
mod result;
pub mod row_sanitizer;
pub mod sheet;
pub mod utils;
mod workbook;

// Test utilities - only compiled when testing or with test feature
// #[cfg(test)] alone doesn't work for integration tests (they're external crates)
// The feature flag makes it available to integration tests via dev-dependencies
#[cfg(any(test, feature = "test"))]
pub mod test_utils;

pub use checker::{ImageChecker, ImageCheckerBuilder, check_workbook};
pub use config::{CheckerConfig, IdentifierScope, Role, RoleSpec};
pub use error::{CheckError, KeyError};
pub use result::{MatchKey, Status, ValidationResult};
pub use sheet::{Cell, Sheet};
pub use workbook::load_sheet;

pub const ERRORS_LOG_FILE: &str = "errors.log";
