pub mod access;
pub mod accounts;
pub mod assessment;
pub mod community;
pub mod config;
pub mod error;
pub mod import;
pub mod pagination;
pub mod personalities;
pub mod repository;
pub mod telemetry;

#[cfg(test)]
mod test_support;
