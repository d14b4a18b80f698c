use bech32_segwit::segwit::{self, WitnessProgram};
use honggfuzz::fuzz;

// First byte picks the witness version, the rest is the program.
fn do_test(data: &[u8]) {
    if data.is_empty() {
        return;
    }

    let version = data[0] % 17;
    let program = &data[1..];
    let addr = match segwit::encode("bc", version, program) {
        Ok(addr) => addr,
        Err(_) => return,
    };

    let (witver, decoded) = segwit::decode("bc", &addr).expect("should be able to decode own encoding");
    assert_eq!(witver.to_num(), version);
    assert_eq!(decoded, program);

    let wp = WitnessProgram::new(witver, decoded).expect("length already checked");
    assert_eq!(WitnessProgram::from_script_pubkey(&wp.script_pubkey()), Ok(wp));
}

fn main() {
    loop {
        fuzz!(|data| {
            do_test(data);
        });
    }
}
