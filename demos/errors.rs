//! Demonstrate output from the various crate errors.

#[cfg(not(feature = "std"))]
use core::fmt;
#[cfg(feature = "std")]
use std::error::Error;

use bech32_segwit::Variant;

fn main() {
    crate_decode();
    crate_encode();

    crate_segwit_decode();
    crate_segwit_check();
    crate_segwit_encode();
    segwit_script_pubkey();

    primitives_hrp();
}

/// Demonstrates `bech32_segwit::decode` errors.
fn crate_decode() {
    use bech32_segwit::decode;
    let function = "bech32_segwit::decode";

    // The arguments to pass to `function`.
    let strings = vec!["1qqq", "hrp1abc", "a1qqqq", "pzry9x0s0muk", "A1G7SGD8", "tb1qW508d6qe"];

    for s in strings {
        let err = decode(s).unwrap_err();
        println!("\n\n* Call `{}(\"{}\")` -> {:?}", function, s, err);
        println!("\n------------");
        print_source(&err);
        println!("------------");
    }
}

/// Demonstrates `bech32_segwit::encode` errors.
fn crate_encode() {
    use bech32_segwit::encode;
    let function = "bech32_segwit::encode";

    let long = [0u8; 90];
    let args: Vec<(&str, &[u8])> =
        vec![("", &[0][..]), ("aB", &[0][..]), ("hrp", &[32][..]), ("hrp", &long[..])];

    for (hrp, data) in args {
        let err = encode(hrp, data, Variant::Bech32m).unwrap_err();
        println!("\n\n* Call `{}(\"{}\", {} values)` -> {:?}", function, hrp, data.len(), err);
        println!("\n------------");
        print_source(&err);
        println!("------------");
    }
}

/// Demonstrates the `Hrp::Error` variants.
fn primitives_hrp() {
    use bech32_segwit::primitives::hrp::Error::*;

    println!("\n\n* All errors when parsing an invalid HRP");
    let errs = vec![Empty, NonAsciiChar('\u{e9}'), InvalidAsciiByte(127), MixedCase];
    println!("\n------------");

    let last = errs.len() - 1;
    for (i, e) in errs.iter().enumerate() {
        println!("Debug: {:?}\nError: {}", e.clone(), e);
        if i != last {
            println!();
        }
    }
    println!("------------");
}

/// Demonstrates `bech32_segwit::segwit::check` errors and the positions they locate.
fn crate_segwit_check() {
    use bech32_segwit::segwit::check;
    let function = "bech32_segwit::segwit::check";

    let strings = vec![
        "bc1qw508d6xejxtdg4y5r3zarvary0c5xw7kv8f3t4",
        "bc1p38j9r5y49hruaue7wxjce0updqjuyyx0kh56v8s25huc6995vvpql3jow4",
        "BC130XLXVLHEMJA6C4DQV22UAPCTQUPFHLXM9H8Z3K2E72Q4K9HCZ7VQ7ZWS8R",
        "bc1qwq08dqqejxtdg4y5r3zarvary0c5xw7kv8f3t4",
    ];

    for s in strings {
        let err = check("bc", s).unwrap_err();
        println!("\n\n* Call `{}(\"bc\", \"{}\")` -> {:?}", function, s, err);
        let marks = (0..s.len())
            .map(|i| if err.positions().contains(&i) { '^' } else { ' ' })
            .collect::<String>();
        println!("\n    {}\n    {}", s, marks.trim_end());
        println!("\n------------");
        print_source(&err);
        println!("------------");
    }
}

/// Demonstrates `bech32_segwit::segwit::decode` errors.
fn crate_segwit_decode() {
    use bech32_segwit::segwit::decode;
    let function = "bech32_segwit::segwit::decode";

    // The arguments to pass to `function`.
    let strings = vec![
        "1qpppppp",
        "tb1qrp33g0q5c5txsp9arysrx4k6zdkfs4nce4xj0gdcccefvpysxf3q0sl5k7",
        "bc1gmk9yu",
        "BC130XLXVLHEMJA6C4DQV22UAPCTQUPFHLXM9H8Z3K2E72Q4K9HCZ7VQ7ZWS8R",
        "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kemeawh",
        "bc1p0xlxvlhemja6c4dqv22uapctqupfhlxm9h8z3k2e72q4k9hcz7v07qwwzcrf",
        "BC1QR508D6QEJXTDG4Y5R3ZARVARYV98GJ9P",
    ];

    for s in strings {
        let err = decode("bc", s).unwrap_err();
        println!("\n\n* Call `{}(\"bc\", \"{}\")` -> {:?}", function, s, err);
        println!("\n------------");
        print_source(&err);
        println!("------------");
    }
}

/// Demonstrates `bech32_segwit::segwit::encode` errors.
fn crate_segwit_encode() {
    use bech32_segwit::segwit::encode;
    let function = "bech32_segwit::segwit::encode";

    let valid_witness_program_segwit_v1 = [0x00, 0x01];
    let invalid_witness_program_too_short = [0x00];
    let invalid_witness_program_too_long = [0x00; 50];

    let print = |version: u8, len: usize, err: bech32_segwit::segwit::EncodeError| {
        println!("\n\n* Call `{}(\"bc\", {}, [{} bytes])` -> {:?}", function, version, len, err);
        println!("\n------------");
        print_source(&err);
        println!("------------");
    };

    let err = encode("bc", 17, &valid_witness_program_segwit_v1).unwrap_err();
    print(17, valid_witness_program_segwit_v1.len(), err);

    let err = encode("bc", 1, &invalid_witness_program_too_short).unwrap_err();
    print(1, invalid_witness_program_too_short.len(), err);

    let err = encode("bc", 1, &invalid_witness_program_too_long).unwrap_err();
    print(1, invalid_witness_program_too_long.len(), err);

    let err = encode("bc", 0, &valid_witness_program_segwit_v1).unwrap_err();
    print(0, valid_witness_program_segwit_v1.len(), err);
}

/// Demonstrates `WitnessProgram::from_script_pubkey` errors.
fn segwit_script_pubkey() {
    use bech32_segwit::segwit::WitnessProgram;
    let function = "WitnessProgram::from_script_pubkey";

    let scripts: Vec<&[u8]> = vec![
        &[0x00, 0x01][..],
        &[0x00, 0x14, 0x00, 0x00][..],
        &[0x50, 0x02, 0x00, 0x00][..],
        &[0x00, 0x02, 0x00, 0x00][..],
    ];

    for script in scripts {
        let err = WitnessProgram::from_script_pubkey(script).unwrap_err();
        println!("\n\n* Call `{}({:02x?})` -> {:?}", function, script, err);
        println!("\n------------");
        print_source(&err);
        println!("------------");
    }
}

/// Prints `e` in a similar fashion to the output created by `anyhow`.
#[cfg(feature = "std")]
fn print_source(mut e: &dyn Error) {
    println!("Error: {}", e);

    if e.source().is_some() {
        let mut counter = 0;
        println!("\nCaused by: ");

        while let Some(inner) = e.source() {
            println!("\t{}: {}", counter, inner);
            e = inner;
            counter += 1;
        }
    }
}

#[cfg(not(feature = "std"))]
fn print_source(e: &dyn fmt::Display) { println!("{}", e) }
