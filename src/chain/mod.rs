//! Chain configuration and canonical Safe deployments

mod config;

pub use config::{chain_ids, ChainAddresses, ChainConfig};
