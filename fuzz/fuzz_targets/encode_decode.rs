use std::str;

use bech32_segwit::{Fe32, Hrp, Variant};
use honggfuzz::fuzz;

fn do_test(data: &[u8]) {
    if data.len() < 2 {
        return;
    }

    let variant = if data[0] & 1 == 0 { Variant::Bech32 } else { Variant::Bech32m };
    let hrp_end = (data[1] as usize) + 2;

    if data.len() < hrp_end {
        return;
    }

    let dp = data[hrp_end..].iter().map(|&b| Fe32::from_low_5_bits(b)).collect::<Vec<Fe32>>();

    let s = match str::from_utf8(&data[2..hrp_end]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let hrp = match Hrp::parse(s) {
        Ok(hrp) => hrp,
        Err(_) => return,
    };
    let encoded = match bech32_segwit::encode_fes(hrp, &dp, variant) {
        Ok(s) => s,
        Err(_) => return,
    };

    let (decoded_hrp, decoded, decoded_variant) =
        bech32_segwit::decode(&encoded).expect("should be able to decode own encoding");
    assert_eq!(decoded_hrp, hrp.to_lowercase());
    assert_eq!(decoded, dp);
    assert_eq!(decoded_variant, variant);
}

fn main() {
    loop {
        fuzz!(|data| {
            do_test(data);
        });
    }
}

#[cfg(test)]
mod tests {
    fn extend_vec_from_hex(hex: &str, out: &mut Vec<u8>) {
        let mut b = 0;
        for (idx, c) in hex.as_bytes().iter().filter(|&&c| c != b'\n').enumerate() {
            b <<= 4;
            match *c {
                b'A'..=b'F' => b |= c - b'A' + 10,
                b'a'..=b'f' => b |= c - b'a' + 10,
                b'0'..=b'9' => b |= c - b'0',
                _ => panic!("Bad hex"),
            }
            if (idx & 1) == 1 {
                out.push(b);
                b = 0;
            }
        }
    }

    #[test]
    fn duplicate_crash() {
        let mut a = Vec::new();
        extend_vec_from_hex("01ff6c2d", &mut a);
        super::do_test(&a);
    }
}
