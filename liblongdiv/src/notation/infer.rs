/// Infers the repeating block of a decimal written with an ellipsis, like `0.1666...`, from its
/// fractional digits. Returns `(non_repeating, repeating)`.
///
/// ## Algorithm
///
/// For each candidate length `L` from 1 up to half the number of digits, the trailing `L` digits
/// are the candidate cycle. Every whole `L`-digit tile before them, read backwards, must equal
/// the cycle, and the digits left over at the front must equal the cycle's first digits:
///
/// ```text
/// 11212...
///    ^^-- candidate cycle "12"
///  ^^---- whole tile, equal to the cycle
/// ^------ leading partial tile, equal to the "1" the cycle starts with
/// ```
///
/// The first `L` that passes wins, so the shortest cycle is preferred; `0.333...` has the cycle
/// `3`, not `33`. The leading partial tile, if any, is kept as the non-repeating part, so the
/// value is the one written: `0.11212...` is `0.1(12)`.
///
/// If no `L` passes, the last digit is taken as the cycle and everything before it as
/// non-repeating; `0.14141...` is read as `0.1414(1)`. This is a best-effort guess. Short or
/// unrepresentative digit strings can be misread, so the parenthesized notation should be
/// preferred when exactness matters.
pub(crate) fn infer_cycle(digits: &str) -> (String, String) {
    let len = digits.len();

    for cycle_len in 1..=len / 2 {
        let cycle = &digits[len - cycle_len..];
        let partial = len % cycle_len;

        let whole_tiles_match = (1..len / cycle_len).all(|k| {
            let hi = len - k * cycle_len;
            &digits[hi - cycle_len..hi] == cycle
        });
        if whole_tiles_match && digits[..partial] == cycle[..partial] {
            return (digits[..partial].to_owned(), cycle.to_owned());
        }
    }

    match len {
        0 => (String::new(), String::new()),
        _ => (digits[..len - 1].to_owned(), digits[len - 1..].to_owned()),
    }
}
