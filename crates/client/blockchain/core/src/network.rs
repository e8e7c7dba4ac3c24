//! Fixed network parameters.
//!
//! The client targets a single deployment; none of these values can be
//! changed at runtime.

use crate::types::Address;

/// Deployed RockPaperScissors contract.
pub const CONTRACT_ADDRESS: Address = Address([
    0x5f, 0xbd, 0xb2, 0x31, 0x56, 0x78, 0xaf, 0xec, 0xb3, 0x67, 0xf0, 0x32, 0xd9, 0x3f, 0x64, 0x2f,
    0x64, 0x18, 0x0a, 0xa3,
]);

/// Sepolia testnet.
pub const CHAIN_ID: u64 = 11_155_111;

pub const NETWORK_NAME: &str = "sepolia";
