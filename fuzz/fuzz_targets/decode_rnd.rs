use bech32_segwit::primitives::hrpstring::Parsed;
use honggfuzz::fuzz;

// Checks that we do not crash if passed random data while decoding.
fn do_test(data: &[u8]) {
    let data_str = String::from_utf8_lossy(data);
    let _ = bech32_segwit::decode(&data_str);
    let _ = bech32_segwit::decode_lenient(&data_str);
    let _ = bech32_segwit::segwit::decode("bc", &data_str);

    if let Ok(parsed) = Parsed::new(&data_str) {
        let _ = parsed.validate_checksum();
        assert_eq!(parsed.checksum().len(), 6);
        assert_eq!(parsed.data(), &parsed.clone().into_data()[..]);
    }
}

fn main() {
    loop {
        fuzz!(|data| {
            do_test(data);
        });
    }
}
