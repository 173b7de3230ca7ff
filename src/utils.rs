//! # Some useful functions for simulating code performance
//!
//! The [`random_bits`] function returns a given number of random bits; the [`inject_errors`]
//! function flips a given number of distinct, randomly chosen positions in a bit sequence; and
//! the [`error_count`] function returns the number of errors in a sequence with respect to a
//! reference sequence.
//!
//! # Examples
//!
//! The code below illustrates the usage of the functions in this module.
//! ```
//! use bch::utils;
//!
//! let num_bits = 40;
//! let bits = utils::random_bits(num_bits);
//! let noisy_bits = utils::inject_errors(&bits, 3)?;
//! let err_count = utils::error_count(&noisy_bits, &bits);
//! assert_eq!(err_count, 3);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use rand::Rng;

use crate::{Bit, Error};

/// Returns given number of random bits.
///
/// # Parameters
///
/// - `num_bits`: Number of random bits to be generated.
///
/// # Returns
///
/// - `bits`: Random bits.
#[must_use]
pub fn random_bits(num_bits: usize) -> Vec<Bit> {
    let mut rng = rand::rng();
    (0 .. num_bits)
        .map(|_| {
            if rng.random_bool(0.5) {
                Bit::One
            } else {
                Bit::Zero
            }
        })
        .collect()
}

/// Returns copy of given bits with a given number of distinct positions flipped.
///
/// # Parameters
///
/// - `bits`: Bits into which errors must be injected.
///
/// - `num_errors`: Number of bit errors to inject. The error positions are drawn uniformly at
///   random without replacement, so the output differs from the input in exactly `num_errors`
///   positions.
///
/// # Returns
///
/// - `noisy_bits`: Copy of the given bits with `num_errors` of them flipped.
///
/// # Errors
///
/// Returns an error if `num_errors` exceeds `bits.len()`.
///
/// # Examples
///
/// ```
/// use bch::utils::{error_count, inject_errors, random_bits};
///
/// let bits = random_bits(20);
/// let noisy_bits = inject_errors(&bits, 4)?;
/// assert_eq!(error_count(&noisy_bits, &bits), 4);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn inject_errors(bits: &[Bit], num_errors: usize) -> Result<Vec<Bit>, Error> {
    if num_errors > bits.len() {
        return Err(Error::InvalidInput(format!(
            "Cannot inject {num_errors} errors into {} bits",
            bits.len()
        )));
    }
    let mut rng = rand::rng();
    let mut noisy_bits = bits.to_vec();
    for position in rand::seq::index::sample(&mut rng, bits.len(), num_errors) {
        noisy_bits[position] = match noisy_bits[position] {
            Bit::Zero => Bit::One,
            Bit::One => Bit::Zero,
        };
    }
    Ok(noisy_bits)
}

/// Returns number of errors in a sequence with respect to a reference sequence.
///
/// # Parameters
///
/// - `seq`: Sequence in which errors must be counted.
///
/// - `ref_seq`: Reference sequence to which the given sequence is compared.
///
/// # Returns
///
/// - `err_count`: Number of positions in which the two sequences differ. If they are of different
///   lengths, then the longer sequence is effectively truncated to the length of the shorter one.
pub fn error_count<T: PartialEq>(seq: &[T], ref_seq: &[T]) -> usize {
    ref_seq
        .iter()
        .zip(seq.iter())
        .filter(|&(x, y)| x != y)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use Bit::{One, Zero};

    #[test]
    fn test_random_bits() {
        let num_bits = 0;
        assert!(random_bits(num_bits).is_empty());
        let num_bits = 10000;
        let bits = random_bits(num_bits);
        let num_zeros = bits.iter().filter(|&b| *b == Zero).count();
        let num_ones = bits.iter().filter(|&b| *b == One).count();
        assert!(num_zeros > 9 * num_bits / 20 && num_ones > 9 * num_bits / 20);
    }

    #[test]
    fn test_inject_errors() {
        let bits = random_bits(10);
        // Invalid input
        assert!(inject_errors(&bits, 11).is_err());
        // Valid input
        assert!(inject_errors(&[], 0).unwrap().is_empty());
        for num_errors in 0 ..= 10 {
            let noisy_bits = inject_errors(&bits, num_errors).unwrap();
            assert_eq!(error_count(&noisy_bits, &bits), num_errors);
        }
        let noisy_bits = inject_errors(&bits, 10).unwrap();
        for (noisy_bit, bit) in noisy_bits.iter().zip(bits.iter()) {
            assert_ne!(noisy_bit, bit);
        }
    }

    #[test]
    fn test_error_count() {
        assert_eq!(error_count(&[], &[One, Zero]), 0);
        assert_eq!(error_count(&[One, Zero], &[]), 0);
        // Longer `seq`
        let ref_seq = [One, Zero, Zero, One, One, One, Zero, Zero];
        let seq = [One, One, Zero, Zero, One, One, Zero, Zero, Zero, One];
        assert_eq!(error_count(&seq, &ref_seq), 2);
        // Shorter `seq`
        let ref_seq = [One, Zero, Zero, One, One, One, Zero, Zero, Zero, One];
        let seq = [One, One, Zero, Zero, One, One, Zero, Zero];
        assert_eq!(error_count(&seq, &ref_seq), 2);
    }
}
