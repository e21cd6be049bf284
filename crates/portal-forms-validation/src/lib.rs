//! Portal-Forms-Validation Core
//!
//! Pure validation functions for the resident portal forms.
//! Nothing here knows about the DOM: every function maps a raw value to
//! `Ok(())` or a description of what is wrong with it. The form engine and
//! the WASM bindings both call into this crate.

pub mod attachment;
pub mod date;
pub mod email;
pub mod identity;
pub mod numeric;
pub mod string;

// Re-export all validators
pub use attachment::*;
pub use date::*;
pub use email::*;
pub use identity::*;
pub use numeric::*;
pub use string::*;
