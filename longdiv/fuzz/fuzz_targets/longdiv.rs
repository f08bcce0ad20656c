#![no_main]
use libfuzzer_sys::fuzz_target;

use liblongdiv::{evaluate, parse_decimal, to_fraction, ConversionOptions};

fuzz_target!(|input: String| {
    let options = ConversionOptions::default().max_digits(64).max_steps(64);

    // Any input either converts or is diagnosed; panics are bugs.
    let evaluated = evaluate(&input, &options);
    assert_eq!(
        evaluated.result.is_some(),
        !evaluated.diagnostics.iter().any(|d| d.is_fatal())
    );

    // A parsed decimal must survive conversion to a fraction and back.
    if let Ok(notation) = parse_decimal(&input) {
        if let Ok(derivation) = to_fraction(&notation) {
            let simplified = &derivation.simplified;
            let expansion = liblongdiv::to_decimal(
                simplified.numerator().clone(),
                simplified.denominator().clone(),
                options.max_digits,
            );
            assert!(expansion.is_ok(), "{} has no expansion", simplified);
        }
    }
});
