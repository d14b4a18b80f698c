// Helpers shared by the integration tests, not every test file uses every helper.
#![allow(dead_code)]

use std::convert::TryFrom;

use bech32_segwit::segwit::KnownHrp;
use bech32_segwit::Fe32;

/// Returns the network prefix of a segwit address from the BIP test vectors.
pub fn network_hrp(addr: &str) -> &'static str {
    let lower = addr.to_ascii_lowercase();
    if lower.starts_with("tb1") {
        KnownHrp::Testnet.as_str()
    } else if lower.starts_with("bcrt1") {
        KnownHrp::Regtest.as_str()
    } else {
        KnownHrp::Mainnet.as_str()
    }
}

/// Converts quintet values to field elements, panics on values above 31.
pub fn fes(data: &[u8]) -> Vec<Fe32> {
    data.iter().map(|&v| Fe32::try_from(v).expect("value is a quintet")).collect()
}

/// Returns the quintet values of `fes`.
pub fn values(fes: &[Fe32]) -> Vec<u8> { fes.iter().map(|fe| fe.to_u8()).collect() }
