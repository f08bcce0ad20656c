mod iter;
pub use iter::*;

/// Serializes big integers as decimal strings, so they survive JSON consumers that read numbers
/// as doubles.
#[cfg(feature = "serde")]
pub(crate) mod serde_bigint {
    use num_bigint::BigInt;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(n: &BigInt, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(n)
    }
}

/// Right-pads `digits` with zeros to `len` characters.
pub(crate) fn pad_zeros(digits: &str, len: usize) -> String {
    let mut padded = digits.to_owned();
    while padded.len() < len {
        padded.push('0');
    }
    padded
}
