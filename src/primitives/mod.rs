// SPDX-License-Identifier: MIT

//! Provides the internal nuts and bolts that enable bech32 encoding/decoding.

pub mod checksum;
pub mod convert;
pub mod correction;
pub mod gf32;
pub mod gf32_ext;
pub mod hrp;
pub mod hrpstring;
pub mod segwit;
