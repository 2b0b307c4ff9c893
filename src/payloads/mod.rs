mod base_payload;
mod certificates;
mod mdm;
mod payload_types;
mod profile;
mod scep;
pub(crate) mod ser;

pub use base_payload::*;
pub use certificates::*;
pub use mdm::*;
pub use payload_types::*;
pub use profile::*;
pub use scep::*;
