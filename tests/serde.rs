// Serde support, enabled with the "serde" feature.

#![cfg(feature = "serde")]

use bech32_segwit::segwit::WitnessVersion;
use bech32_segwit::Variant;

#[test]
fn variant_json() {
    assert_eq!(serde_json::to_string(&Variant::Bech32).unwrap(), "\"Bech32\"");
    assert_eq!(serde_json::to_string(&Variant::Bech32m).unwrap(), "\"Bech32m\"");
    assert_eq!(serde_json::from_str::<Variant>("\"Bech32m\"").unwrap(), Variant::Bech32m);
    assert!(serde_json::from_str::<Variant>("\"bech33\"").is_err());
}

#[test]
fn witness_version_is_a_number() {
    assert_eq!(serde_json::to_string(&WitnessVersion::V0).unwrap(), "0");
    assert_eq!(serde_json::to_string(&WitnessVersion::V16).unwrap(), "16");
    assert_eq!(serde_json::from_str::<WitnessVersion>("1").unwrap(), WitnessVersion::V1);

    let err = serde_json::from_str::<WitnessVersion>("17").unwrap_err();
    assert!(err.to_string().contains("invalid witness version 17"), "{}", err);
}

#[test]
fn decoded_address_roundtrips_through_json() {
    let (version, program) =
        bech32_segwit::segwit::decode("bc", "bc1p0xlxvlhemja6c4dqv22uapctqupfhlxm9h8z3k2e72q4k9hcz7vqzk5jj0")
            .unwrap();
    let json = serde_json::to_string(&(version, &program)).unwrap();
    let (back, back_program): (WitnessVersion, Vec<u8>) = serde_json::from_str(&json).unwrap();
    assert_eq!(back, version);
    assert_eq!(back_program, program);
}
