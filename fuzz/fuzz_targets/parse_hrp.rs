use bech32_segwit::Hrp;
use honggfuzz::fuzz;

fn do_test(data: &[u8]) {
    let s = String::from_utf8_lossy(data);

    // Make sure parsing garbage doesn't make us crash (from_utf8_lossy should
    // contain some garbage, perhaps even invalid chars).
    if let Ok(hrp) = Hrp::parse(&s) {
        assert_eq!(hrp.iter().count(), hrp.len());
        assert!(hrp.iter().all(|b| !b.is_ascii_uppercase()));
    }
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
        extend_vec_from_hex("ff6c2d", &mut a);
        super::do_test(&a);
    }
}
