//! Static chain id to human-readable network name resolution.
//!
//! The mapping is a pure function of its input: no RPC calls, no registry
//! lookups. Unknown chain ids resolve to a fallback label that embeds the id
//! so no information is lost.

use alloy_primitives::ChainId;
use std::borrow::Cow;

/// Returns the canonical name for `chain_id`, if it is a known network.
pub fn known_network_name(chain_id: ChainId) -> Option<&'static str> {
    let name = match chain_id {
        1 => "Ethereum Mainnet",
        5 => "Goerli",
        10 => "OP Mainnet",
        56 => "BNB Smart Chain",
        97 => "BNB Smart Chain Testnet",
        100 => "Gnosis",
        137 => "Polygon",
        250 => "Fantom Opera",
        324 => "zkSync Era",
        8453 => "Base",
        17000 => "Holesky",
        31337 => "Anvil",
        42161 => "Arbitrum One",
        43114 => "Avalanche C-Chain",
        59144 => "Linea",
        80002 => "Polygon Amoy",
        84532 => "Base Sepolia",
        421614 => "Arbitrum Sepolia",
        534352 => "Scroll",
        11155111 => "Sepolia",
        11155420 => "OP Sepolia",
        _ => return None,
    };
    Some(name)
}

/// Resolves `chain_id` to a display name.
///
/// Unknown ids produce `"Unknown network (0x..)"` with the id rendered in
/// hex, mirroring what wallets report for unrecognized chains.
pub fn network_name(chain_id: ChainId) -> Cow<'static, str> {
    match known_network_name(chain_id) {
        Some(name) => Cow::Borrowed(name),
        None => Cow::Owned(format!("Unknown network ({chain_id:#x})")),
    }
}

/// Formats a chain id for display as `"<decimal> (<hex>)"`, e.g. `"1 (0x1)"`.
pub fn format_chain_id(chain_id: ChainId) -> String {
    format!("{chain_id} ({chain_id:#x})")
}
