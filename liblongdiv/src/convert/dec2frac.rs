use crate::errors::{ConversionError, Result};
use crate::math::{digits_value, gcd, pow10, Fraction};
use crate::notation::DecimalNotation;

use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

#[cfg(feature = "serde")]
use serde::Serialize;

/// A numeric fact of a decimal-to-fraction derivation, in the order it is established.
///
/// Facts carry magnitudes; the sign of the decimal is applied to the final fraction only.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum DerivationFact {
    /// The decimal's shape: `integer_part`, then `non_repeating_len` non-repeating digits, then a
    /// repeating block of `repeating_len` digits.
    Structure {
        integer_part: String,
        non_repeating_len: usize,
        repeating_len: usize,
    },
    /// A terminating decimal with `places` fractional digits is `numerator / 10^places`.
    Scale {
        places: usize,
        #[cfg_attr(feature = "serde", serde(with = "crate::utils::serde_bigint"))]
        numerator: BigInt,
        #[cfg_attr(feature = "serde", serde(with = "crate::utils::serde_bigint"))]
        denominator: BigInt,
    },
    /// `multiplier * x` has the integer part `value`, followed by the same repeating tail as
    /// every other multiplied equation.
    Multiply {
        #[cfg_attr(feature = "serde", serde(with = "crate::utils::serde_bigint"))]
        multiplier: BigInt,
        #[cfg_attr(feature = "serde", serde(with = "crate::utils::serde_bigint"))]
        value: BigInt,
    },
    /// Subtracting the two equations leaves `denominator * x = numerator`.
    Subtract {
        #[cfg_attr(feature = "serde", serde(with = "crate::utils::serde_bigint"))]
        numerator: BigInt,
        #[cfg_attr(feature = "serde", serde(with = "crate::utils::serde_bigint"))]
        denominator: BigInt,
    },
    /// Numerator and denominator were both divided by the small `divisor`, giving the fraction
    /// `numerator / denominator`.
    DivideBy {
        divisor: u32,
        #[cfg_attr(feature = "serde", serde(with = "crate::utils::serde_bigint"))]
        numerator: BigInt,
        #[cfg_attr(feature = "serde", serde(with = "crate::utils::serde_bigint"))]
        denominator: BigInt,
    },
    /// Numerator and denominator were divided by their remaining greatest common divisor `gcd`,
    /// which has no factor of 10 or below.
    Gcd {
        #[cfg_attr(feature = "serde", serde(with = "crate::utils::serde_bigint"))]
        gcd: BigInt,
        #[cfg_attr(feature = "serde", serde(with = "crate::utils::serde_bigint"))]
        numerator: BigInt,
        #[cfg_attr(feature = "serde", serde(with = "crate::utils::serde_bigint"))]
        denominator: BigInt,
    },
}

/// The exact fraction of a decimal, and how it was found.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct FractionDerivation {
    /// The decimal that was converted, normalized.
    pub notation: DecimalNotation,
    /// The fraction as derived, before simplification.
    pub fraction: Fraction,
    pub simplified: Fraction,
    /// The greatest common divisor of the derived numerator and denominator.
    #[cfg_attr(feature = "serde", serde(with = "crate::utils::serde_bigint"))]
    pub gcd: BigInt,
    pub facts: Vec<DerivationFact>,
}

/// Converts a decimal to an exact fraction.
///
/// ## Algorithm
///
/// A terminating decimal with `p` fractional digits is its digits over `10^p`:
/// `1.25 = 125/100`.
///
/// A repeating decimal `x` with `n` non-repeating and `m` repeating digits is converted by
/// eliminating its repeating tail. Multiplying by `10^(n+m)` and by `10^n` shifts the same tail
/// behind the point, so subtracting the two equations leaves an integer equation:
///
/// ```text
///      x =  0.1666...
///  100 x = 16.666...      multiplier 10^(n+m), value 16
///   10 x =  1.666...      multiplier 10^n,     value 1
///   90 x = 15             subtract
///      x = 15/90
/// ```
///
/// The values are the integer part followed by the leading `n+m` (or `n`) digits of the
/// expansion, read as integers, so no floating point is involved. The elimination is checked
/// against the closed form `((I*10^n + N) * (10^m - 1) + R) / (10^n * (10^m - 1))`, where `I`,
/// `N` and `R` are the integer part, non-repeating and repeating digits read as integers.
///
/// The fraction is then reduced, first by repeatedly dividing out the largest common divisor in
/// `10..=2` (the steps a person would take), then by whatever greatest common divisor remains.
///
/// A repeating block of zeros is dropped before conversion.
///
/// ## Failure
///
/// Fails with [InternalConsistency](ConversionError::InternalConsistency) if the elimination and
/// the closed form disagree, or if the stepwise reduction misses the lowest terms. Either is a
/// defect in liblongdiv.
pub fn to_fraction(notation: &DecimalNotation) -> Result<FractionDerivation> {
    let notation = notation.clone().normalize();
    let integer = digits_value(&notation.integer_part);
    let (n, m) = (notation.non_repeating.len(), notation.repeating.len());

    let mut facts = vec![DerivationFact::Structure {
        integer_part: notation.integer_part.clone(),
        non_repeating_len: n,
        repeating_len: m,
    }];

    let (numerator, denominator) = if notation.is_terminating() {
        let denominator = pow10(n);
        let numerator = &integer * &denominator + digits_value(&notation.non_repeating);
        facts.push(DerivationFact::Scale {
            places: n,
            numerator: numerator.clone(),
            denominator: denominator.clone(),
        });
        (numerator, denominator)
    } else {
        let (multiplier1, multiplier2) = (pow10(n + m), pow10(n));
        let value1 = &integer * &multiplier1 + digits_value(&notation.written_digits());
        let value2 = &integer * &multiplier2 + digits_value(&notation.non_repeating);
        let numerator = &value1 - &value2;
        let denominator = &multiplier1 - &multiplier2;

        facts.push(DerivationFact::Multiply {
            multiplier: multiplier1,
            value: value1,
        });
        facts.push(DerivationFact::Multiply {
            multiplier: multiplier2,
            value: value2,
        });
        facts.push(DerivationFact::Subtract {
            numerator: numerator.clone(),
            denominator: denominator.clone(),
        });

        check_closed_form(&notation, &integer, &numerator, &denominator)?;
        (numerator, denominator)
    };

    let common = gcd(&numerator, &denominator);
    let (stepwise_numerator, stepwise_denominator) =
        reduce_stepwise(numerator.clone(), denominator.clone(), &mut facts);

    let signed = if notation.is_negative {
        -numerator
    } else {
        numerator
    };
    let fraction = Fraction::new(signed, denominator)?;
    let simplified = fraction.simplify();

    if stepwise_numerator != simplified.numerator().abs()
        || &stepwise_denominator != simplified.denominator()
    {
        return Err(ConversionError::InternalConsistency(format!(
            "stepwise reduction of {} gave {}/{}, but its lowest terms are {}",
            fraction, stepwise_numerator, stepwise_denominator, simplified
        )));
    }

    Ok(FractionDerivation {
        notation,
        fraction,
        simplified,
        gcd: common,
        facts,
    })
}

fn check_closed_form(
    notation: &DecimalNotation,
    integer: &BigInt,
    numerator: &BigInt,
    denominator: &BigInt,
) -> Result<()> {
    let (n, m) = (notation.non_repeating.len(), notation.repeating.len());
    let nines = pow10(m) - BigInt::one();
    let closed_numerator = (integer * pow10(n) + digits_value(&notation.non_repeating)) * &nines
        + digits_value(&notation.repeating);
    let closed_denominator = pow10(n) * nines;

    if numerator * &closed_denominator != &closed_numerator * denominator {
        return Err(ConversionError::InternalConsistency(format!(
            "elimination of {} gave {}/{}, but its closed form is {}/{}",
            notation, numerator, denominator, closed_numerator, closed_denominator
        )));
    }
    Ok(())
}

/// Divides out the largest common divisor in `10..=2` until none is left, then the remaining
/// greatest common divisor. Each division is recorded as a fact. Returns the reduced magnitudes.
fn reduce_stepwise(
    numerator: BigInt,
    denominator: BigInt,
    facts: &mut Vec<DerivationFact>,
) -> (BigInt, BigInt) {
    let mut numerator = numerator.abs();
    let mut denominator = denominator.abs();

    while let Some(divisor) = (2..=10u32)
        .rev()
        .find(|&d| (&numerator % d).is_zero() && (&denominator % d).is_zero())
    {
        numerator /= divisor;
        denominator /= divisor;
        facts.push(DerivationFact::DivideBy {
            divisor,
            numerator: numerator.clone(),
            denominator: denominator.clone(),
        });
    }

    let remaining = gcd(&numerator, &denominator);
    if remaining > BigInt::one() {
        numerator /= &remaining;
        denominator /= &remaining;
        facts.push(DerivationFact::Gcd {
            gcd: remaining,
            numerator: numerator.clone(),
            denominator: denominator.clone(),
        });
    }

    (numerator, denominator)
}
