// BIP-350 test vectors.

mod common;

use bech32_segwit::primitives::hrpstring::Parsed;
use bech32_segwit::segwit::{self, DecodeError, WitnessProgram, WitnessVersion};
use bech32_segwit::Variant;
use hex_literal::hex;

macro_rules! check_valid_bech32m {
    ($($test_name:ident, $s:literal);* $(;)?) => {
        $(
            #[test]
            fn $test_name() {
                let valid_bech32m = $s;
                let (hrp, data, variant) = bech32_segwit::decode(valid_bech32m).unwrap();
                assert_eq!(variant, Variant::Bech32m);

                let encoded = bech32_segwit::encode_fes(
                    bech32_segwit::Hrp::parse(&hrp).unwrap(),
                    &data,
                    variant,
                ).unwrap();
                assert_eq!(encoded, valid_bech32m.to_lowercase());

                // Valid bech32m strings are by definition invalid bech32.
                let hrps = Parsed::new(valid_bech32m).unwrap();
                assert_eq!(hrps.validate_checksum(), Ok(Variant::Bech32m));
            }
        )*
    }
}
check_valid_bech32m! {
    valid_bech32m_hrp_string_0, "A1LQFN3A";
    valid_bech32m_hrp_string_1, "a1lqfn3a";
    valid_bech32m_hrp_string_2, "an83characterlonghumanreadablepartthatcontainsthetheexcludedcharactersbioandnumber11sg7hg6";
    valid_bech32m_hrp_string_3, "abcdef1l7aum6echk45nj3s0wdvt2fg8x9yrzpqzd3ryx";
    valid_bech32m_hrp_string_4, "11llllllllllllllllllllllllllllllllllllllllllllllllllllllllllllllllllllllllllllllllllludsr8";
    valid_bech32m_hrp_string_5, "split1checkupstagehandshakeupstreamerranterredcaperredlc445v";
    valid_bech32m_hrp_string_6, "?1v759aa";
}

#[test]
fn bip_350_invalid_hrpstring() {
    use bech32_segwit::primitives::hrp::Error as HrpError;
    use bech32_segwit::DecodeError::*;

    let invalid: Vec<(&str, bech32_segwit::DecodeError)> = vec!(
        // 0x20 + 1xj0phk: HRP character out of range
        ("\u{20}1xj0phk",
         InvalidHrp(HrpError::InvalidAsciiByte(0x20))),
        // 0x7F + 1g6xzxy: HRP character out of range
        ("\u{7F}1g6xzxy",
         InvalidHrp(HrpError::InvalidAsciiByte(0x7F))),
        ("an84characterslonghumanreadablepartthatcontainsthetheexcludedcharactersbioandnumber11d6pts4",
         TooLong(91)),
        ("qyrz8wqd2c9m",
         MissingSeparator),
        ("1qyrz8wqd2c9m",
         SeparatorMisplaced(0)),
        ("y1b0jsk6g",
         InvalidBech32Char('b')),
        ("lt1igcx5c",
         InvalidBech32Char('i')),
        ("in1muywd",
         SeparatorMisplaced(2)),
        ("mm1crxm3i",
         InvalidBech32Char('i')),
        ("au1s5cgom",
         InvalidBech32Char('o')),
        // Checksum calculated with uppercase form of HRP.
        ("M1VUXWEZ",
         InvalidChecksum),
        ("16plkw9",
         TooShort(7)),
        ("1p2gdwpf",
         SeparatorMisplaced(0)),
    );

    for (s, expected_error) in invalid {
        assert_eq!(bech32_segwit::decode(s).unwrap_err(), expected_error, "testing input '{}'", s);
    }
}

macro_rules! check_valid_address_roundtrip {
    ($($test_name:ident, $addr:literal, $version:expr, $script_pubkey:expr);* $(;)?) => {
        $(
            #[test]
            fn $test_name() {
                let hrp = common::network_hrp($addr);
                let wp = WitnessProgram::from_address(hrp, $addr).expect("failed to decode");
                assert_eq!(wp.version(), $version);
                assert_eq!(wp.script_pubkey(), $script_pubkey.to_vec());
                assert_eq!(WitnessProgram::from_script_pubkey(&$script_pubkey), Ok(wp.clone()));

                // BIP-350: No string can be simultaneously valid Bech32 and Bech32m.
                let (_, _, variant) = bech32_segwit::decode($addr).unwrap();
                assert_eq!(variant, $version.variant());

                let encoded = wp.to_address(hrp).unwrap();
                assert_eq!(encoded, $addr.to_lowercase());
                // Uppercase network prefixes give uppercase addresses.
                let upper = segwit::encode(&hrp.to_uppercase(), wp.version().to_num(), wp.program());
                assert_eq!(upper, Ok($addr.to_uppercase()));
            }
        )*
    }
}
// Note these test vectors include various witness versions.
check_valid_address_roundtrip! {
    bip_350_valid_address_roundtrip_0, "BC1QW508D6QEJXTDG4Y5R3ZARVARY0C5XW7KV8F3T4", WitnessVersion::V0,
        hex!("0014751e76e8199196d454941c45d1b3a323f1433bd6");
    bip_350_valid_address_roundtrip_1, "tb1qrp33g0q5c5txsp9arysrx4k6zdkfs4nce4xj0gdcccefvpysxf3q0sl5k7", WitnessVersion::V0,
        hex!("00201863143c14c5166804bd19203356da136c985678cd4d27a1b8c6329604903262");
    bip_350_valid_address_roundtrip_2, "bc1pw508d6qejxtdg4y5r3zarvary0c5xw7kw508d6qejxtdg4y5r3zarvary0c5xw7kt5nd6y", WitnessVersion::V1,
        hex!("5128751e76e8199196d454941c45d1b3a323f1433bd6751e76e8199196d454941c45d1b3a323f1433bd6");
    bip_350_valid_address_roundtrip_3, "BC1SW50QGDZ25J", WitnessVersion::V16,
        hex!("6002751e");
    bip_350_valid_address_roundtrip_4, "bc1zw508d6qejxtdg4y5r3zarvaryvaxxpcs", WitnessVersion::V2,
        hex!("5210751e76e8199196d454941c45d1b3a323");
    bip_350_valid_address_roundtrip_5, "tb1qqqqqp399et2xygdj5xreqhjjvcmzhxw4aywxecjdzew6hylgvsesrxh6hy", WitnessVersion::V0,
        hex!("0020000000c4a5cad46221b2a187905e5266362b99d5e91c6ce24d165dab93e86433");
    bip_350_valid_address_roundtrip_6, "tb1pqqqqp399et2xygdj5xreqhjjvcmzhxw4aywxecjdzew6hylgvsesf3hn0c", WitnessVersion::V1,
        hex!("5120000000c4a5cad46221b2a187905e5266362b99d5e91c6ce24d165dab93e86433");
    bip_350_valid_address_roundtrip_7, "bc1p0xlxvlhemja6c4dqv22uapctqupfhlxm9h8z3k2e72q4k9hcz7vqzk5jj0", WitnessVersion::V1,
        hex!("512079be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798");
}

macro_rules! check_invalid_address {
    ($($test_name:ident, $addr:literal, $err:expr);* $(;)?) => {
        $(
            #[test]
            #[allow(unused_imports)]
            fn $test_name() {
                use bech32_segwit::primitives::convert::Error::*;
                use bech32_segwit::segwit::WitnessLengthError::*;
                use bech32_segwit::DecodeError as Bech32Error;

                let hrp = common::network_hrp($addr);
                assert_eq!(segwit::decode(hrp, $addr), Err($err), "testing input '{}'", $addr);
            }
        )*
    }
}
check_invalid_address! {
    // Invalid human-readable part
    bip_350_invalid_address_0, "tc1p0xlxvlhemja6c4dqv22uapctqupfhlxm9h8z3k2e72q4k9hcz7vq5zuyut",
        DecodeError::HrpMismatch { expected: "bc".to_string(), found: "tc".to_string() };
    // Invalid checksums (Bech32 instead of Bech32m):
    bip_350_invalid_address_1, "bc1p0xlxvlhemja6c4dqv22uapctqupfhlxm9h8z3k2e72q4k9hcz7vqh2y7hd",
        DecodeError::VariantMismatch { version: WitnessVersion::V1, variant: Variant::Bech32 };
    bip_350_invalid_address_2, "tb1z0xlxvlhemja6c4dqv22uapctqupfhlxm9h8z3k2e72q4k9hcz7vqglt7rf",
        DecodeError::VariantMismatch { version: WitnessVersion::V2, variant: Variant::Bech32 };
    bip_350_invalid_address_3, "BC1S0XLXVLHEMJA6C4DQV22UAPCTQUPFHLXM9H8Z3K2E72Q4K9HCZ7VQ54WELL",
        DecodeError::VariantMismatch { version: WitnessVersion::V16, variant: Variant::Bech32 };
    // Invalid checksums (Bech32m instead of Bech32):
    bip_350_invalid_address_4, "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kemeawh",
        DecodeError::VariantMismatch { version: WitnessVersion::V0, variant: Variant::Bech32m };
    bip_350_invalid_address_5, "tb1q0xlxvlhemja6c4dqv22uapctqupfhlxm9h8z3k2e72q4k9hcz7vq24jc47",
        DecodeError::VariantMismatch { version: WitnessVersion::V0, variant: Variant::Bech32m };
    // Invalid character in checksum
    bip_350_invalid_address_6, "bc1p38j9r5y49hruaue7wxjce0updqjuyyx0kh56v8s25huc6995vvpql3jow4",
        DecodeError::Bech32(Bech32Error::InvalidBech32Char('o'));
    // Invalid witness version
    bip_350_invalid_address_7, "BC130XLXVLHEMJA6C4DQV22UAPCTQUPFHLXM9H8Z3K2E72Q4K9HCZ7VQ7ZWS8R",
        DecodeError::WitnessVersion(invalid_version(17));
    // Invalid program length (1 byte)
    bip_350_invalid_address_8, "bc1pw5dgrnzv",
        DecodeError::WitnessLength(TooShort(1));
    // Invalid program length (41 bytes)
    bip_350_invalid_address_9, "bc1p0xlxvlhemja6c4dqv22uapctqupfhlxm9h8z3k2e72q4k9hcz7v8n0nx0muaewav253zgeav",
        DecodeError::WitnessLength(TooLong(41));
    // Invalid program length for witness version 0 (per BIP-141)
    bip_350_invalid_address_10, "BC1QR508D6QEJXTDG4Y5R3ZARVARYV98GJ9P",
        DecodeError::WitnessLength(InvalidSegwitV0(16));
    // Mixed case
    bip_350_invalid_address_11, "tb1p0xlxvlhemja6c4dqv22uapctqupfhlxm9h8z3k2e72q4k9hcz7vq47Zagq",
        DecodeError::Bech32(Bech32Error::MixedCase);
    // Zero padding of more than 4 bits
    bip_350_invalid_address_12, "bc1p0xlxvlhemja6c4dqv22uapctqupfhlxm9h8z3k2e72q4k9hcz7v07qwwzcrf",
        DecodeError::Padding(ExcessPaddingBits(6));
    // Non-zero padding in 8-to-5 conversion
    bip_350_invalid_address_13, "tb1p0xlxvlhemja6c4dqv22uapctqupfhlxm9h8z3k2e72q4k9hcz7vpggkg4j",
        DecodeError::Padding(NonZeroPadding);
    // Empty data section
    bip_350_invalid_address_14, "bc1gmk9yu",
        DecodeError::MissingWitnessVersion;
}

/// Builds the error for an out of range witness version.
fn invalid_version(version: u8) -> segwit::InvalidWitnessVersionError {
    use std::convert::TryFrom;

    WitnessVersion::try_from(version).expect_err("version is out of range")
}
