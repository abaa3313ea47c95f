//! Chain-reading collaborator: ERC-20 metadata and balances over JSON-RPC
//!
//! The commitment core in `merkledrop-tree` consumes an ordered sequence of
//! (address, balance) pairs and nothing else; this crate resolves those
//! pairs from a live Ethereum node. All calls are reads.

pub mod config;
pub mod erc20;
pub mod rpc;
pub mod units;

pub use config::Config;
pub use erc20::{Erc20, TokenMetadata};
pub use rpc::{network_name, RpcClient};
pub use units::format_units;
