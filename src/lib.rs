//! Generates MDM enrollment profiles: a SCEP payload providing the device
//! identity, and an MDM payload referring to it.

pub mod app_state;
pub mod certificates;
pub mod config;
pub mod enrollment;
pub mod payloads;
mod plist;
pub mod routes;
#[cfg(test)]
mod test_support;
