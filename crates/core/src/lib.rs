pub mod attachment;
pub mod error;
pub mod types;
pub mod vcon;

pub use attachment::{Attachment, Encoding};
pub use error::VconError;
pub use types::VconId;
pub use vcon::{VCON_VERSION, Vcon};
