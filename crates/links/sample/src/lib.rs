//! Sample vcon link.
//!
//! Fetches a vcon, appends one attachment built from the link options, and
//! stores the vcon back. Intended as a template for writing new links.

mod link;
mod options;

pub use link::SampleLink;
pub use options::{DEFAULT_ATTACHMENT_TYPE, SampleLinkOptions, default_custom_data};
