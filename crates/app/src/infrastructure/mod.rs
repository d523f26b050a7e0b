//! Infrastructure adapters implementing the outbound ports.

pub mod geolocation;
pub mod platform;
pub mod resilient_directory;
pub mod rest_countries;

#[cfg(test)]
pub mod testing;
