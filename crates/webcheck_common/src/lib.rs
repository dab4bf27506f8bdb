//! Webcheck Common - Shared types for the validation gateway and its clients
//!
//! Result shapes returned by webcheckd, the CSS normalization policy, and the
//! counting helpers used when rendering results.

pub mod api;
pub mod css;
pub mod html;
pub mod outcome;

pub use api::*;
pub use css::*;
pub use html::*;
pub use outcome::*;
