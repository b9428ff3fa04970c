pub mod error;
pub mod link;

pub use error::LinkError;
pub use link::{DynLink, Link};
