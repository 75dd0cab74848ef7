//! Configuration utility types.
//!
//! | Module   | Purpose                                      |
//! |----------|----------------------------------------------|
//! | `diag`   | Field paths and batched diagnostics          |
//! | `error`  | Configuration error types                    |
//! | `status` | Field status validation                      |

mod diag;
mod error;
mod status;

pub use diag::{ConfigDiagnostic, ConfigDiagnostics, FieldPath};
pub use error::ConfigError;
pub use status::{FieldStatus, check_field_status, check_section_status};
