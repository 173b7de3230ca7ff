//! Encoder and lane-parallel decoder for binary BCH codes

use crate::galois::{to_i32, to_usize, LOG_ZERO};
use crate::{Bit, Error, FrameReorderer, GaloisField};

/// Returns codeword from systematic BCH encoder for given message bits.
///
/// The `n - k` parity bits are computed by LFSR division of `x^(n-k) m(x)` by the generator
/// polynomial `g(x)`, where `m(x)` is the message polynomial. The codeword holds the parity
/// bits at positions `0 .. n-k`, followed by the message bits.
///
/// # Parameters
///
/// - `message_bits`: Message bits to be encoded. Their number must equal
///   `field.message_length()`.
///
/// - `field`: Field tables and code parameters.
///
/// # Returns
///
/// - `codeword_bits`: Codeword bits from the BCH encoder.
///
/// # Errors
///
/// Returns an error if `message_bits.len()` is not equal to `field.message_length()`.
///
/// # Examples
///
/// ```
/// use bch::Bit::{One, Zero};
/// use bch::{encoder, GaloisField};
///
/// let field = GaloisField::new(4, 3)?;
/// let message_bits = [One, Zero, Zero, One, One];
/// let codeword_bits = encoder(&message_bits, &field)?;
/// assert_eq!(
///     codeword_bits,
///     [Zero, One, Zero, One, One, One, One, Zero, Zero, Zero, One, Zero, Zero, One, One]
/// );
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn encoder(message_bits: &[Bit], field: &GaloisField) -> Result<Vec<Bit>, Error> {
    if message_bits.len() != field.message_length() {
        return Err(Error::InvalidInput(format!(
            "Wrong number of message bits (expected {}, found {})",
            field.message_length(),
            message_bits.len()
        )));
    }
    let redundancy = field.redundancy();
    let generator = field.generator_coefficients();
    let mut parity = vec![Bit::Zero; redundancy];
    for &message_bit in message_bits.iter().rev() {
        let feedback = xor(message_bit, parity[redundancy - 1]);
        for j in (1 .. redundancy).rev() {
            parity[j] = if generator[j] == Bit::One {
                xor(parity[j - 1], feedback)
            } else {
                parity[j - 1]
            };
        }
        // Constant term of the generator polynomial is always 1
        parity[0] = feedback;
    }
    let mut codeword_bits = parity;
    codeword_bits.extend_from_slice(message_bits);
    Ok(codeword_bits)
}

/// Lane-parallel bounded-distance BCH decoder
///
/// A decoder is built for a fixed batch shape and decodes `num_frames` codewords per call, all
/// sharing one set of field tables. The frames are carried through syndrome computation, the
/// Berlekamp-Massey key equation, and the Chien search in lockstep, one lane per frame, with
/// per-lane predicates deciding which lanes each stage still touches. Decoding a frame alone
/// gives bit-identical results to decoding it within any batch.
///
/// The field tables are borrowed for the lifetime of the decoder; scratch buffers are allocated
/// once at construction and reset on every call.
#[derive(Debug)]
pub struct BchDecoder<'a> {
    /// Field tables and code parameters
    field: &'a GaloisField,
    /// Reorderer between frame-major input/output and lane-major scratch
    reorderer: FrameReorderer,
    /// Decoder workspace
    workspace: DecoderWorkspace,
}

impl<'a> BchDecoder<'a> {
    /// Returns decoder for given field tables and batch shape.
    ///
    /// # Parameters
    ///
    /// - `field`: Field tables and code parameters.
    ///
    /// - `message_length`: Number of message bits `k` per codeword. Together with
    ///   `codeword_length`, must match the redundancy declared by the field tables.
    ///
    /// - `codeword_length`: Number of bits `n` per codeword. Must equal `2^m - 1` for the
    ///   field order `m`.
    ///
    /// - `num_frames`: Number of codewords decoded per call. Must be a positive integer.
    ///
    /// # Errors
    ///
    /// Returns an error if `codeword_length` is not `2^m - 1`, if `message_length` and
    /// `codeword_length` do not differ by the redundancy of the generator polynomial, or if
    /// `num_frames` is `0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bch::{BchDecoder, GaloisField};
    ///
    /// let field = GaloisField::new(4, 3)?;
    /// let decoder = BchDecoder::new(&field, 5, 15, 4)?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(
        field: &'a GaloisField,
        message_length: usize,
        codeword_length: usize,
        num_frames: usize,
    ) -> Result<Self, Error> {
        if codeword_length != field.code_length() {
            return Err(Error::InvalidInput(format!(
                "Codeword length must be 2^m - 1 for field order m = {} (expected {}, found \
                {codeword_length})",
                field.field_order(),
                field.code_length()
            )));
        }
        if message_length != field.message_length() {
            return Err(Error::InvalidInput(format!(
                "Codeword and message lengths must differ by the generator polynomial \
                redundancy {} (expected message length {}, found {message_length})",
                field.redundancy(),
                field.message_length()
            )));
        }
        let reorderer = FrameReorderer::new(num_frames, codeword_length)?;
        Ok(Self {
            field,
            reorderer,
            workspace: DecoderWorkspace::new(field, num_frames),
        })
    }

    /// Generates corrected codewords and per-frame validity flags for a batch of received
    /// codewords.
    ///
    /// All frames with at most `t` bit errors are corrected exactly, where `t` is the
    /// correction capability of the code. A frame whose error locator cannot be resolved
    /// within `t` positions is reported as invalid; its bits are still returned, with any
    /// best-effort flips applied. A frame with more than `t` errors can occasionally be
    /// miscorrected to a different codeword and reported valid, which is inherent to
    /// bounded-distance decoding.
    ///
    /// # Parameters
    ///
    /// - `received_bits`: Received codewords, frame-major, `num_frames * n` bits in all.
    ///
    /// # Returns
    ///
    /// - `corrected_bits`: Corrected codewords in the same frame-major layout.
    ///
    /// - `frame_valid`: One flag per frame, `true` if the frame decoded to a codeword.
    ///
    /// # Errors
    ///
    /// Returns an error if `received_bits.len()` is not equal to the batch size the decoder
    /// was built for.
    ///
    /// # Examples
    ///
    /// ```
    /// use bch::Bit::{One, Zero};
    /// use bch::{encoder, BchDecoder, GaloisField};
    ///
    /// let field = GaloisField::new(4, 3)?;
    /// let mut decoder = BchDecoder::new(&field, 5, 15, 1)?;
    /// let codeword_bits = encoder(&[One, Zero, Zero, One, One], &field)?;
    /// let mut received_bits = codeword_bits.clone();
    /// received_bits[1] = Zero;
    /// received_bits[8] = One;
    /// received_bits[14] = Zero;
    /// let (corrected_bits, frame_valid) = decoder.decode(&received_bits)?;
    /// assert_eq!(corrected_bits, codeword_bits);
    /// assert_eq!(frame_valid, [true]);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn decode(&mut self, received_bits: &[Bit]) -> Result<(Vec<Bit>, Vec<bool>), Error> {
        let expected_len = self.reorderer.num_frames * self.reorderer.frame_len;
        if received_bits.len() != expected_len {
            return Err(Error::InvalidInput(format!(
                "Wrong number of received bits (expected {expected_len}, found {})",
                received_bits.len()
            )));
        }
        let field = self.field;
        let reorderer = self.reorderer;
        let workspace = &mut self.workspace;
        reorderer.reorder(received_bits, &mut workspace.lane_bits)?;
        compute_syndromes(field, workspace);
        if workspace.needs_correction.iter().any(|&flag| flag) {
            solve_key_equation(field, workspace);
        }
        run_chien_search(field, workspace);
        let mut corrected_bits = Vec::new();
        reorderer.restore(&workspace.lane_bits, &mut corrected_bits)?;
        Ok((corrected_bits, workspace.frame_valid.clone()))
    }
}

/// Workspace for lane-parallel BCH decoder
///
/// All per-iteration arrays hold one value per lane at each step, laid out row-major with the
/// lane index innermost; the error locator array additionally has one row of `2t + 1`
/// coefficients per iteration.
#[derive(Debug)]
struct DecoderWorkspace {
    /// Number of lanes (frames decoded in lockstep)
    num_lanes: usize,
    /// Received bits in lane-major layout, corrected in place
    lane_bits: Vec<Bit>,
    /// Syndromes of orders `1 ..= 2t` in all lanes (order `0` unused)
    syndromes: Vec<i32>,
    /// Whether each lane has a nonzero syndrome
    needs_correction: Vec<bool>,
    /// Whether each lane is still being processed by the key-equation solver
    active: Vec<bool>,
    /// Error locator candidates for iterations `0 ..= 2t + 1` in all lanes
    locator: Vec<i32>,
    /// Discrepancy for each iteration in each lane, in index form
    discrepancy: Vec<i32>,
    /// Error locator degree for each iteration in each lane
    degree: Vec<i32>,
    /// Iteration number minus locator degree, maximized by the reference-iteration search
    step_minus_degree: Vec<i32>,
    /// Chien search registers for one lane, in index form
    registers: Vec<i32>,
    /// Number of bit flips applied to each lane
    flip_count: Vec<usize>,
    /// Whether each lane decoded to a codeword
    frame_valid: Vec<bool>,
}

impl DecoderWorkspace {
    /// Returns new workspace for given field tables and number of lanes.
    fn new(field: &GaloisField, num_lanes: usize) -> Self {
        let num_iterations = 2 * field.correction_capability() + 2;
        let num_coefficients = 2 * field.correction_capability() + 1;
        Self {
            num_lanes,
            lane_bits: Vec::with_capacity(field.code_length() * num_lanes),
            syndromes: vec![0; num_coefficients * num_lanes],
            needs_correction: vec![false; num_lanes],
            active: vec![false; num_lanes],
            locator: vec![0; num_iterations * num_coefficients * num_lanes],
            discrepancy: vec![0; num_iterations * num_lanes],
            degree: vec![0; num_iterations * num_lanes],
            step_minus_degree: vec![0; num_iterations * num_lanes],
            registers: vec![0; field.correction_capability() + 1],
            flip_count: vec![0; num_lanes],
            frame_valid: vec![false; num_lanes],
        }
    }
}

/// Computes syndromes of orders `1 ..= 2t` for all lanes, flags lanes with a nonzero syndrome,
/// and converts the syndromes to index form.
fn compute_syndromes(field: &GaloisField, workspace: &mut DecoderWorkspace) {
    let width = workspace.num_lanes;
    let code_length = field.code_length();
    let num_orders = 2 * field.correction_capability();
    workspace.syndromes.fill(0);
    for order in 1 ..= num_orders {
        for position in 0 .. code_length {
            let table_value = field.alpha(order * position);
            for lane in 0 .. width {
                if workspace.lane_bits[position * width + lane] == Bit::One {
                    workspace.syndromes[order * width + lane] ^= table_value;
                }
            }
        }
    }
    for lane in 0 .. width {
        workspace.needs_correction[lane] = false;
        workspace.frame_valid[lane] = false;
        workspace.flip_count[lane] = 0;
    }
    for order in 1 ..= num_orders {
        for lane in 0 .. width {
            let value = workspace.syndromes[order * width + lane];
            if value != 0 {
                workspace.needs_correction[lane] = true;
            }
            workspace.syndromes[order * width + lane] = field.log(value);
        }
    }
}

/// Solves the key equation by the Berlekamp-Massey algorithm, all flagged lanes in lockstep.
///
/// Iterations run over `u = 1 ..= 2t`, each producing the error locator candidate of iteration
/// `u + 1` for every lane still active. A lane whose locator degree exceeds `t` is frozen: its
/// state is stamped into the terminal iteration row once and later iterations skip the lane,
/// so the terminal row always holds every lane's final locator and degree. The loop ends early
/// when no lane remains active.
fn solve_key_equation(field: &GaloisField, workspace: &mut DecoderWorkspace) {
    let width = workspace.num_lanes;
    let capability = to_i32(field.correction_capability());
    let num_orders = 2 * field.correction_capability();
    let num_coefficients = num_orders + 1;
    for lane in 0 .. width {
        workspace.active[lane] = workspace.needs_correction[lane];
        if !workspace.needs_correction[lane] {
            continue;
        }
        // Iteration 0 is the virtual start with unit locator and unit discrepancy (in index
        // form); iteration 1 holds the unit locator in polynomial form and the first syndrome
        // as its discrepancy.
        workspace.locator[lane] = 0;
        workspace.locator[num_coefficients * width + lane] = 1;
        for coefficient in 1 ..= num_orders {
            workspace.locator[coefficient * width + lane] = LOG_ZERO;
            workspace.locator[(num_coefficients + coefficient) * width + lane] = 0;
        }
        workspace.discrepancy[lane] = 0;
        workspace.discrepancy[width + lane] = workspace.syndromes[width + lane];
        workspace.degree[lane] = 0;
        workspace.degree[width + lane] = 0;
        workspace.step_minus_degree[lane] = -1;
        workspace.step_minus_degree[width + lane] = 0;
    }
    for iteration in 1 ..= num_orders {
        let mut any_active = false;
        for lane in 0 .. width {
            if !workspace.active[lane] {
                continue;
            }
            advance_lane(field, workspace, iteration, lane);
            if workspace.degree[(iteration + 1) * width + lane] > capability {
                workspace.active[lane] = false;
                freeze_lane(field, workspace, iteration + 1, lane);
            } else {
                any_active = true;
            }
        }
        if !any_active {
            break;
        }
    }
}

/// Runs one Berlekamp-Massey iteration for one lane, producing the error locator candidate,
/// degree, and discrepancy of the next iteration.
fn advance_lane(
    field: &GaloisField,
    workspace: &mut DecoderWorkspace,
    iteration: usize,
    lane: usize,
) {
    let width = workspace.num_lanes;
    let num_orders = 2 * field.correction_capability();
    let num_coefficients = num_orders + 1;
    let code_length = field.code_length();
    let row = |step: usize, coefficient: usize| (step * num_coefficients + coefficient) * width;
    let current_degree = to_usize(workspace.degree[iteration * width + lane]);
    for coefficient in 0 ..= num_orders {
        workspace.locator[row(iteration + 1, coefficient) + lane] = 0;
    }
    let current_discrepancy = workspace.discrepancy[iteration * width + lane];
    if current_discrepancy == LOG_ZERO {
        // Zero discrepancy: carry the locator forward unchanged
        workspace.degree[(iteration + 1) * width + lane] =
            workspace.degree[iteration * width + lane];
        for coefficient in 0 ..= current_degree {
            let value = workspace.locator[row(iteration, coefficient) + lane];
            workspace.locator[row(iteration + 1, coefficient) + lane] = value;
            workspace.locator[row(iteration, coefficient) + lane] = field.log(value);
        }
    } else {
        // Reference-iteration search: most recent prior iteration with defined discrepancy,
        // then the largest step-minus-degree among all such iterations, ties going to the
        // most recent one
        let mut reference = iteration - 1;
        while reference > 0 && workspace.discrepancy[reference * width + lane] == LOG_ZERO {
            reference -= 1;
        }
        for candidate in (0 .. reference).rev() {
            if workspace.discrepancy[candidate * width + lane] != LOG_ZERO
                && workspace.step_minus_degree[reference * width + lane]
                    < workspace.step_minus_degree[candidate * width + lane]
            {
                reference = candidate;
            }
        }
        let reference_degree = to_usize(workspace.degree[reference * width + lane]);
        let shift = iteration - reference;
        workspace.degree[(iteration + 1) * width + lane] = workspace.degree
            [iteration * width + lane]
            .max(to_i32(reference_degree + shift));
        // New locator: shifted, discrepancy-ratio-scaled reference locator plus the current one
        let reference_discrepancy = to_usize(workspace.discrepancy[reference * width + lane]);
        for coefficient in 0 ..= reference_degree {
            let log_value = workspace.locator[row(reference, coefficient) + lane];
            if log_value != LOG_ZERO {
                workspace.locator[row(iteration + 1, coefficient + shift) + lane] = field.alpha(
                    to_usize(current_discrepancy) + code_length - reference_discrepancy
                        + to_usize(log_value),
                );
            }
        }
        for coefficient in 0 ..= current_degree {
            let value = workspace.locator[row(iteration, coefficient) + lane];
            workspace.locator[row(iteration + 1, coefficient) + lane] ^= value;
            workspace.locator[row(iteration, coefficient) + lane] = field.log(value);
        }
    }
    let next_degree = workspace.degree[(iteration + 1) * width + lane];
    workspace.step_minus_degree[(iteration + 1) * width + lane] =
        to_i32(iteration + 1) - next_degree;
    if iteration < num_orders {
        // Next discrepancy, from the new locator and the syndromes
        let next_syndrome = workspace.syndromes[(iteration + 1) * width + lane];
        let mut value = if next_syndrome == LOG_ZERO {
            0
        } else {
            field.alpha(to_usize(next_syndrome))
        };
        for coefficient in 1 ..= to_usize(next_degree) {
            let syndrome = workspace.syndromes[(iteration + 1 - coefficient) * width + lane];
            let locator_value = workspace.locator[row(iteration + 1, coefficient) + lane];
            if syndrome != LOG_ZERO && locator_value != 0 {
                value ^= field.alpha(to_usize(syndrome) + to_usize(field.log(locator_value)));
            }
        }
        workspace.discrepancy[(iteration + 1) * width + lane] = field.log(value);
    }
}

/// Stamps a frozen lane's locator and degree into the terminal iteration row.
fn freeze_lane(
    field: &GaloisField,
    workspace: &mut DecoderWorkspace,
    source: usize,
    lane: usize,
) {
    let width = workspace.num_lanes;
    let num_coefficients = 2 * field.correction_capability() + 1;
    let terminal = 2 * field.correction_capability() + 1;
    if source == terminal {
        return;
    }
    workspace.degree[terminal * width + lane] = workspace.degree[source * width + lane];
    for coefficient in 0 .. num_coefficients {
        workspace.locator[(terminal * num_coefficients + coefficient) * width + lane] =
            workspace.locator[(source * num_coefficients + coefficient) * width + lane];
    }
}

/// Runs the Chien search over each flagged lane with a resolvable error locator, flipping the
/// bit at each root's error position, and sets every lane's validity flag.
fn run_chien_search(field: &GaloisField, workspace: &mut DecoderWorkspace) {
    let width = workspace.num_lanes;
    let capability = field.correction_capability();
    let num_coefficients = 2 * capability + 1;
    let terminal = 2 * capability + 1;
    let code_length = field.code_length();
    for lane in 0 .. width {
        if !workspace.needs_correction[lane] {
            workspace.frame_valid[lane] = true;
            continue;
        }
        let degree = workspace.degree[terminal * width + lane];
        if degree > to_i32(capability) {
            workspace.frame_valid[lane] = false;
            continue;
        }
        let degree = to_usize(degree);
        for coefficient in 0 ..= degree {
            let index = (terminal * num_coefficients + coefficient) * width + lane;
            workspace.locator[index] = field.log(workspace.locator[index]);
        }
        for coefficient in 1 ..= degree {
            workspace.registers[coefficient] =
                workspace.locator[(terminal * num_coefficients + coefficient) * width + lane];
        }
        let mut flips = 0;
        for step in 1 ..= code_length {
            let mut sum = 1;
            for coefficient in 1 ..= degree {
                if workspace.registers[coefficient] != LOG_ZERO {
                    workspace.registers[coefficient] = to_i32(
                        (to_usize(workspace.registers[coefficient]) + coefficient) % code_length,
                    );
                    sum ^= field.alpha(to_usize(workspace.registers[coefficient]));
                }
            }
            if sum == 0 {
                let index = (code_length - step) * width + lane;
                workspace.lane_bits[index] = flip(workspace.lane_bits[index]);
                flips += 1;
            }
        }
        workspace.flip_count[lane] = flips;
        workspace.frame_valid[lane] = flips == degree;
    }
}

/// Returns XOR of two bits.
fn xor(left: Bit, right: Bit) -> Bit {
    if left == right {
        Bit::Zero
    } else {
        Bit::One
    }
}

/// Returns complement of given bit.
fn flip(bit: Bit) -> Bit {
    match bit {
        Bit::Zero => Bit::One,
        Bit::One => Bit::Zero,
    }
}


#[cfg(test)]
mod tests_of_bch_decoder {
    use super::*;
    use Bit::{One, Zero};

    /// Returns copy of given codeword with the bits at given positions flipped.
    fn with_flips(codeword_bits: &[Bit], positions: &[usize]) -> Vec<Bit> {
        let mut received_bits = codeword_bits.to_vec();
        for &position in positions {
            received_bits[position] = flip(received_bits[position]);
        }
        received_bits
    }

    #[test]
    fn test_new() {
        let field = GaloisField::new(4, 3).unwrap();
        // Invalid input
        assert!(BchDecoder::new(&field, 5, 14, 1).is_err());
        assert!(BchDecoder::new(&field, 6, 15, 1).is_err());
        assert!(BchDecoder::new(&field, 16, 15, 1).is_err());
        assert!(BchDecoder::new(&field, 5, 15, 0).is_err());
        // Valid input
        assert!(BchDecoder::new(&field, 5, 15, 4).is_ok());
    }

    #[test]
    fn test_decode_wrong_batch_size() {
        let field = GaloisField::new(4, 3).unwrap();
        let mut decoder = BchDecoder::new(&field, 5, 15, 2).unwrap();
        assert!(decoder.decode(&[Zero; 15]).is_err());
        assert!(decoder.decode(&[Zero; 45]).is_err());
    }

    #[test]
    fn test_decode_with_zero_errors() {
        let field = GaloisField::new(4, 3).unwrap();
        let mut decoder = BchDecoder::new(&field, 5, 15, 1).unwrap();
        let codeword_bits = encoder(&[One, Zero, Zero, One, One], &field).unwrap();
        let (corrected_bits, frame_valid) = decoder.decode(&codeword_bits).unwrap();
        assert_eq!(corrected_bits, codeword_bits);
        assert_eq!(frame_valid, [true]);
        assert_eq!(decoder.workspace.flip_count, [0]);
    }

    #[test]
    fn test_decode_corrects_all_patterns_within_capability() {
        let field = GaloisField::new(4, 3).unwrap();
        let mut decoder = BchDecoder::new(&field, 5, 15, 1).unwrap();
        let codeword_bits = encoder(&[One, Zero, Zero, One, One], &field).unwrap();
        let mut check = |positions: &[usize]| {
            let received_bits = with_flips(&codeword_bits, positions);
            let (corrected_bits, frame_valid) = decoder.decode(&received_bits).unwrap();
            assert_eq!(corrected_bits, codeword_bits, "error positions {positions:?}");
            assert_eq!(frame_valid, [true], "error positions {positions:?}");
        };
        for first in 0 .. 15 {
            check(&[first]);
            for second in first + 1 .. 15 {
                check(&[first, second]);
                for third in second + 1 .. 15 {
                    check(&[first, second, third]);
                }
            }
        }
    }

    #[test]
    fn test_decode_reports_uncorrectable_frame() {
        // Four errors on the all-zero codeword of the (15, 5) code, at positions chosen so
        // that no codeword lies within distance 3 of the received word
        let field = GaloisField::new(4, 3).unwrap();
        let mut decoder = BchDecoder::new(&field, 5, 15, 1).unwrap();
        let received_bits = with_flips(&[Zero; 15], &[0, 1, 2, 3]);
        let (corrected_bits, frame_valid) = decoder.decode(&received_bits).unwrap();
        assert_eq!(corrected_bits.len(), 15);
        assert_eq!(frame_valid, [false]);
    }

    #[test]
    fn test_decode_lane_isolation() {
        // Each frame must decode identically alone and within a batch
        let field = GaloisField::new(4, 3).unwrap();
        let codeword_bits = encoder(&[One, Zero, Zero, One, One], &field).unwrap();
        let frames = [
            codeword_bits.clone(),
            with_flips(&codeword_bits, &[5]),
            with_flips(&codeword_bits, &[2, 7, 12]),
            with_flips(&[Zero; 15], &[0, 1, 2, 3]),
        ];
        let batch_bits: Vec<Bit> = frames.iter().flatten().copied().collect();
        let mut batch_decoder = BchDecoder::new(&field, 5, 15, 4).unwrap();
        let (batch_corrected, batch_valid) = batch_decoder.decode(&batch_bits).unwrap();
        let mut solo_decoder = BchDecoder::new(&field, 5, 15, 1).unwrap();
        for (index, frame) in frames.iter().enumerate() {
            let (solo_corrected, solo_valid) = solo_decoder.decode(frame).unwrap();
            assert_eq!(batch_corrected[15 * index .. 15 * (index + 1)], solo_corrected);
            assert_eq!(batch_valid[index], solo_valid[0]);
        }
        assert_eq!(batch_corrected[.. 45], [&codeword_bits[..]; 3].concat());
        assert_eq!(batch_valid, [true, true, true, false]);
    }

    #[test]
    fn test_decode_freezes_frame_with_excess_locator_degree() {
        // Errors at positions 0, 1, 2, and 13 have the syndromes of a single error at
        // position 9 through order 4 (s3 = s1^3), so the locator degree jumps from 1 to 4 at
        // the fifth key-equation iteration and the frame freezes with one iteration to go.
        // The frame must come back invalid with its bits untouched, the frame decoded beside
        // it must still be corrected, and both must decode as they do alone.
        let field = GaloisField::new(4, 3).unwrap();
        let codeword_bits = encoder(&[One, Zero, Zero, One, One], &field).unwrap();
        let frozen_bits = with_flips(&codeword_bits, &[0, 1, 2, 13]);
        let correctable_bits = with_flips(&codeword_bits, &[2, 7, 12]);
        let batch_bits: Vec<Bit> = [&frozen_bits[..], &correctable_bits[..]].concat();
        let mut batch_decoder = BchDecoder::new(&field, 5, 15, 2).unwrap();
        let (batch_corrected, batch_valid) = batch_decoder.decode(&batch_bits).unwrap();
        assert_eq!(batch_valid, [false, true]);
        assert_eq!(batch_corrected[.. 15], frozen_bits);
        assert_eq!(batch_corrected[15 ..], codeword_bits);
        let mut solo_decoder = BchDecoder::new(&field, 5, 15, 1).unwrap();
        let (solo_corrected, solo_valid) = solo_decoder.decode(&frozen_bits).unwrap();
        assert_eq!(solo_corrected, frozen_bits);
        assert_eq!(solo_valid, [false]);
        let terminal = 2 * field.correction_capability() + 1;
        assert_eq!(solo_decoder.workspace.degree[terminal], 4);
        let (solo_corrected, solo_valid) = solo_decoder.decode(&correctable_bits).unwrap();
        assert_eq!(solo_corrected, codeword_bits);
        assert_eq!(solo_valid, [true]);
    }

    #[test]
    fn test_decode_reuses_workspace_across_calls() {
        let field = GaloisField::new(4, 3).unwrap();
        let mut decoder = BchDecoder::new(&field, 5, 15, 1).unwrap();
        let codeword_bits = encoder(&[One, Zero, Zero, One, One], &field).unwrap();
        let (_, frame_valid) = decoder
            .decode(&with_flips(&[Zero; 15], &[0, 1, 2, 3]))
            .unwrap();
        assert_eq!(frame_valid, [false]);
        let (corrected_bits, frame_valid) = decoder.decode(&codeword_bits).unwrap();
        assert_eq!(corrected_bits, codeword_bits);
        assert_eq!(frame_valid, [true]);
        let (corrected_bits, frame_valid) = decoder
            .decode(&with_flips(&codeword_bits, &[2, 7, 12]))
            .unwrap();
        assert_eq!(corrected_bits, codeword_bits);
        assert_eq!(frame_valid, [true]);
    }

    #[test]
    fn test_decode_with_larger_field() {
        let field = GaloisField::new(6, 3).unwrap();
        let message_bits: Vec<Bit> = (0 .. field.message_length())
            .map(|index| if index % 4 == 1 { One } else { Zero })
            .collect();
        let codeword_bits = encoder(&message_bits, &field).unwrap();
        let mut decoder = BchDecoder::new(&field, 45, 63, 1).unwrap();
        let received_bits = with_flips(&codeword_bits, &[0, 31, 62]);
        let (corrected_bits, frame_valid) = decoder.decode(&received_bits).unwrap();
        assert_eq!(corrected_bits, codeword_bits);
        assert_eq!(frame_valid, [true]);
    }
}
