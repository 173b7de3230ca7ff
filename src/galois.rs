//! Galois field tables and generator polynomial for binary BCH codes

use crate::{Bit, Error};

/// Smallest supported field order
pub(crate) const MIN_FIELD_ORDER: usize = 2;

/// Largest supported field order
pub(crate) const MAX_FIELD_ORDER: usize = 16;

/// Sentinel discrete log assigned to the zero element, which has no exponent
pub(crate) const LOG_ZERO: i32 = -1;

/// Primitive polynomials over GF(2), one per supported field order `m` (index `m - 2`). Bit `k`
/// of each entry is the coefficient of `x^k`.
const PRIMITIVE_POLYS: [u32; 15] = [
    0b111,                   // m = 2: x^2 + x + 1
    0b1011,                  // m = 3: x^3 + x + 1
    0b1_0011,                // m = 4: x^4 + x + 1
    0b10_0101,               // m = 5: x^5 + x^2 + 1
    0b100_0011,              // m = 6: x^6 + x + 1
    0b1000_1001,             // m = 7: x^7 + x^3 + 1
    0b1_0001_1101,           // m = 8: x^8 + x^4 + x^3 + x^2 + 1
    0b10_0001_0001,          // m = 9: x^9 + x^4 + 1
    0b100_0000_1001,         // m = 10: x^10 + x^3 + 1
    0b1000_0000_0101,        // m = 11: x^11 + x^2 + 1
    0b1_0000_0101_0011,      // m = 12: x^12 + x^6 + x^4 + x + 1
    0b10_0000_0001_1011,     // m = 13: x^13 + x^4 + x^3 + x + 1
    0b100_0100_0100_0011,    // m = 14: x^14 + x^10 + x^6 + x + 1
    0b1000_0000_0000_0011,   // m = 15: x^15 + x + 1
    0b1_0001_0000_0000_1011, // m = 16: x^16 + x^12 + x^3 + x + 1
];

// All table entries, exponents, and their pairwise sums fit in well under 31 bits for the
// supported field orders, so these conversions cannot lose information.

/// Returns the `i32` holding a small nonnegative count or table value.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub(crate) fn to_i32(value: usize) -> i32 {
    debug_assert!(value <= 2 * (1 << MAX_FIELD_ORDER));
    value as i32
}

/// Returns the table index held in a nonnegative `i32`.
#[allow(clippy::cast_sign_loss)]
pub(crate) fn to_usize(value: i32) -> usize {
    debug_assert!(value >= 0);
    value as usize
}

/// Galois field tables and code parameters for a binary BCH code
///
/// A value of this type fixes the field GF(2^m), the error-correction capability `t`, and hence
/// the code: codewords are `n = 2^m - 1` bits long, with `n - k` of them given by the degree of
/// the generator polynomial. The tables are immutable once built and are shared read-only by
/// every encoder and decoder call that borrows them.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct GaloisField {
    /// Field order `m`
    pub(crate) field_order: usize,
    /// Codeword length `n = 2^m - 1` (also the order of the multiplicative group)
    pub(crate) code_length: usize,
    /// Number of bit errors the code corrects per codeword
    pub(crate) correction_capability: usize,
    /// Antilog table: `alpha_to[i]` is the field element with discrete log `i`
    pub(crate) alpha_to: Vec<i32>,
    /// Discrete-log table: `index_of[x]` is the discrete log of `x` (`LOG_ZERO` for zero)
    pub(crate) index_of: Vec<i32>,
    /// Generator polynomial coefficients, from constant term to leading term
    pub(crate) generator: Vec<Bit>,
}

impl GaloisField {
    /// Returns field tables and generator polynomial for given field order and correction
    /// capability.
    ///
    /// # Parameters
    ///
    /// - `field_order`: Field order `m`, so that codewords are `2^m - 1` bits long. Must be in
    ///   the range `[2, 16]` (tables and all index-form arithmetic then fit comfortably in the
    ///   `i32` symbol storage, whose sign carries the "no exponent" sentinel).
    ///
    /// - `correction_capability`: Number of bit errors `t` the code must correct per codeword.
    ///   Must be a positive integer with `2 * t < 2^m - 1`.
    ///
    /// # Errors
    ///
    /// Returns an error if `field_order` or `correction_capability` is out of range.
    ///
    /// # Examples
    ///
    /// ```
    /// use bch::GaloisField;
    ///
    /// let field = GaloisField::new(4, 3)?;
    /// assert_eq!(field.code_length(), 15);
    /// assert_eq!(field.message_length(), 5);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(field_order: usize, correction_capability: usize) -> Result<Self, Error> {
        check_code_parameters(field_order, correction_capability)?;
        let (alpha_to, index_of) = build_tables(field_order);
        Self::with_tables(field_order, correction_capability, alpha_to, index_of)
    }

    /// Returns field tables and generator polynomial for externally supplied tables.
    ///
    /// # Parameters
    ///
    /// - `field_order`: Field order `m`. Must be in the range `[2, 16]`.
    ///
    /// - `correction_capability`: Number of bit errors `t` the code must correct per codeword.
    ///   Must be a positive integer with `2 * t < 2^m - 1`.
    ///
    /// - `alpha_to`: Antilog table of length `2^m`; entry `i` must be the field element with
    ///   discrete log `i`, for `i` in `[0, 2^m - 1)`.
    ///
    /// - `index_of`: Discrete-log table of length `2^m`; entry `0` must be `-1` (the zero
    ///   element has no exponent), and `alpha_to[index_of[x]]` must equal `x` for every nonzero
    ///   `x`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are out of range, if the tables have the wrong
    /// length, if the zero sentinel is missing, if the tables fail the inverse property above,
    /// or if they are not consistent with a field (the generator polynomial they yield must
    /// have binary coefficients).
    ///
    /// # Examples
    ///
    /// ```
    /// use bch::GaloisField;
    ///
    /// let reference = GaloisField::new(4, 3)?;
    /// let field = GaloisField::from_tables(
    ///     4,
    ///     3,
    ///     reference.alpha_to().to_vec(),
    ///     reference.index_of().to_vec(),
    /// )?;
    /// assert_eq!(field, reference);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_tables(
        field_order: usize,
        correction_capability: usize,
        alpha_to: Vec<i32>,
        index_of: Vec<i32>,
    ) -> Result<Self, Error> {
        check_code_parameters(field_order, correction_capability)?;
        check_tables(field_order, &alpha_to, &index_of)?;
        Self::with_tables(field_order, correction_capability, alpha_to, index_of)
    }

    /// Returns field tables for valid parameters and tables, computing the generator polynomial.
    fn with_tables(
        field_order: usize,
        correction_capability: usize,
        alpha_to: Vec<i32>,
        index_of: Vec<i32>,
    ) -> Result<Self, Error> {
        let mut field = Self {
            field_order,
            code_length: (1 << field_order) - 1,
            correction_capability,
            alpha_to,
            index_of,
            generator: Vec::new(),
        };
        field.generator = field.generator_polynomial()?;
        Ok(field)
    }

    /// Returns field order `m`.
    #[must_use]
    pub fn field_order(&self) -> usize {
        self.field_order
    }

    /// Returns codeword length `n = 2^m - 1`.
    #[must_use]
    pub fn code_length(&self) -> usize {
        self.code_length
    }

    /// Returns number of bit errors the code corrects per codeword.
    #[must_use]
    pub fn correction_capability(&self) -> usize {
        self.correction_capability
    }

    /// Returns number of parity bits per codeword (degree of the generator polynomial).
    #[must_use]
    pub fn redundancy(&self) -> usize {
        self.generator.len() - 1
    }

    /// Returns number of message bits per codeword.
    #[must_use]
    pub fn message_length(&self) -> usize {
        self.code_length - self.redundancy()
    }

    /// Returns generator polynomial coefficients, from constant term to leading term.
    #[must_use]
    pub fn generator_coefficients(&self) -> &[Bit] {
        &self.generator
    }

    /// Returns antilog table.
    #[must_use]
    pub fn alpha_to(&self) -> &[i32] {
        &self.alpha_to
    }

    /// Returns discrete-log table.
    #[must_use]
    pub fn index_of(&self) -> &[i32] {
        &self.index_of
    }

    /// Returns the field element with given discrete log (taken modulo the group order).
    pub(crate) fn alpha(&self, exponent: usize) -> i32 {
        self.alpha_to[exponent % self.code_length]
    }

    /// Returns the discrete log of a field element (`LOG_ZERO` for the zero element).
    pub(crate) fn log(&self, element: i32) -> i32 {
        self.index_of[to_usize(element)]
    }

    /// Returns the product of two field elements.
    pub(crate) fn multiply(&self, left: i32, right: i32) -> i32 {
        if left == 0 || right == 0 {
            0
        } else {
            self.alpha(to_usize(self.log(left)) + to_usize(self.log(right)))
        }
    }

    /// Returns the generator polynomial: the product of the distinct minimal polynomials of
    /// `alpha^1 .. alpha^2t`, computed by closing the root exponents under conjugation
    /// (doubling modulo `n`) and multiplying out the linear factors.
    fn generator_polynomial(&self) -> Result<Vec<Bit>, Error> {
        let mut is_root = vec![false; self.code_length];
        for i in 1 ..= 2 * self.correction_capability {
            let mut exponent = i;
            while !is_root[exponent] {
                is_root[exponent] = true;
                exponent = (2 * exponent) % self.code_length;
            }
        }
        let mut coefficients = vec![1i32];
        for exponent in 1 .. self.code_length {
            if !is_root[exponent] {
                continue;
            }
            let root = self.alpha(exponent);
            let mut next = vec![0i32; coefficients.len() + 1];
            for (degree, &coefficient) in coefficients.iter().enumerate() {
                next[degree] ^= self.multiply(root, coefficient);
                next[degree + 1] ^= coefficient;
            }
            coefficients = next;
        }
        coefficients
            .iter()
            .map(|&coefficient| match coefficient {
                0 => Ok(Bit::Zero),
                1 => Ok(Bit::One),
                _ => Err(Error::InvalidInput(format!(
                    "Tables are not consistent with a Galois field of order 2^{}",
                    self.field_order
                ))),
            })
            .collect()
    }
}

/// Checks validity of field order and correction capability.
fn check_code_parameters(field_order: usize, correction_capability: usize) -> Result<(), Error> {
    if !(MIN_FIELD_ORDER ..= MAX_FIELD_ORDER).contains(&field_order) {
        return Err(Error::InvalidInput(format!(
            "Field order must be in the range [{MIN_FIELD_ORDER}, {MAX_FIELD_ORDER}], \
            found {field_order}",
        )));
    }
    if correction_capability == 0 {
        return Err(Error::InvalidInput(
            "Correction capability must be a positive integer".to_string(),
        ));
    }
    let code_length = (1usize << field_order) - 1;
    if 2 * correction_capability >= code_length {
        return Err(Error::InvalidInput(format!(
            "Correction capability {correction_capability} is too large for field order \
            {field_order} (need 2t < {code_length})",
        )));
    }
    Ok(())
}

/// Returns antilog and discrete-log tables generated from the primitive polynomial for given
/// field order.
fn build_tables(field_order: usize) -> (Vec<i32>, Vec<i32>) {
    let num_elements = 1usize << field_order;
    let code_length = num_elements - 1;
    let poly = PRIMITIVE_POLYS[field_order - MIN_FIELD_ORDER];
    let mut alpha_to = vec![0i32; num_elements];
    let mut index_of = vec![LOG_ZERO; num_elements];
    let mut element: u32 = 1;
    for exponent in 0 .. code_length {
        alpha_to[exponent] = to_i32(element as usize);
        index_of[element as usize] = to_i32(exponent);
        element <<= 1;
        if element & (1 << field_order) != 0 {
            element ^= poly;
        }
    }
    // Wraparound entry: alpha^n == alpha^0
    alpha_to[code_length] = 1;
    (alpha_to, index_of)
}

/// Checks validity of externally supplied antilog and discrete-log tables.
fn check_tables(field_order: usize, alpha_to: &[i32], index_of: &[i32]) -> Result<(), Error> {
    let num_elements = 1usize << field_order;
    if alpha_to.len() != num_elements || index_of.len() != num_elements {
        return Err(Error::InvalidInput(format!(
            "Expected tables of length {num_elements}, found alpha_to of length {} and \
            index_of of length {}",
            alpha_to.len(),
            index_of.len()
        )));
    }
    if index_of[0] != LOG_ZERO {
        return Err(Error::InvalidInput(format!(
            "Discrete log of the zero element must be the sentinel {LOG_ZERO}, found {}",
            index_of[0]
        )));
    }
    let code_length = num_elements - 1;
    for element in 1 ..= code_length {
        let exponent = index_of[element];
        if exponent < 0 || to_usize(exponent) >= code_length {
            return Err(Error::InvalidInput(format!(
                "Discrete log of element {element} must be in the range [0, {code_length}), \
                found {exponent}",
            )));
        }
        if alpha_to[to_usize(exponent)] != to_i32(element) {
            return Err(Error::InvalidInput(format!(
                "Tables fail the inverse property at element {element}: \
                alpha_to[index_of[{element}]] != {element}",
            )));
        }
    }
    Ok(())
}
