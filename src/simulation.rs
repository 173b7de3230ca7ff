//! Simulator to evaluate performance of BCH codes under exact-weight error injection

use itertools::izip;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;

use crate::{encoder, utils, BchDecoder, Bit, Error, GaloisField};

/// Parameters for error injection simulation
#[derive(Clone, PartialEq, Debug, Copy, Deserialize, Serialize)]
pub struct SimParams {
    /// Order of the Galois field over which the code is built
    pub field_order: u32,
    /// Number of bit errors per codeword the code is designed to correct
    pub correction_capability: u32,
    /// Number of bit errors injected into each codeword
    pub num_errors_per_frame: u32,
    /// Number of frames decoded together in one batch
    pub num_frames_per_batch: u32,
    /// Number of batches to be simulated
    pub num_batches: u32,
}

/// Results of error injection simulation
///
/// A frame counts as a frame error if its decoded message differs from the transmitted one or if
/// the decoder flags it as invalid.
#[derive(Clone, PartialEq, Debug, Copy, Deserialize, Serialize)]
pub struct SimResults {
    /// Simulation parameters
    pub params: SimParams,
    /// Number of frames decoded
    pub num_frames: usize,
    /// Number of frame errors
    pub num_frame_errors: usize,
    /// Number of frames flagged as invalid by the decoder
    pub num_invalid_frames: usize,
    /// Number of message bits decoded
    pub num_message_bits: usize,
    /// Number of message bit errors
    pub num_message_bit_errors: usize,
    /// Frame error rate
    pub frame_error_rate: f64,
    /// Message bit error rate
    pub message_bit_error_rate: f64,
}

/// Error counts accumulated over decoded batches
#[derive(Clone, Eq, PartialEq, Debug, Copy, Default)]
struct Tally {
    /// Number of frames decoded
    num_frames: usize,
    /// Number of frame errors
    num_frame_errors: usize,
    /// Number of frames flagged as invalid
    num_invalid_frames: usize,
    /// Number of message bits decoded
    num_message_bits: usize,
    /// Number of message bit errors
    num_message_bit_errors: usize,
}

/// Runs error injection simulation for given parameters, and returns the results.
///
/// Each batch consists of random messages that are encoded, corrupted by a random error pattern
/// of exact weight [`num_errors_per_frame`](SimParams::num_errors_per_frame) per codeword, and
/// decoded together. Batches run in parallel.
///
/// # Parameters
///
/// - `params`: Simulation parameters.
///
/// # Returns
///
/// - `Ok(results)`: Simulation results.
///
/// # Errors
///
/// Returns an error if `params` is invalid.
///
/// # Examples
/// ```
/// use bch::simulation::{error_injection_sim, SimParams};
///
/// let params = SimParams {
///     field_order: 4,
///     correction_capability: 3,
///     num_errors_per_frame: 2,
///     num_frames_per_batch: 8,
///     num_batches: 4,
/// };
/// let results = error_injection_sim(&params)?;
/// assert_eq!(results.num_frames, 32);
/// assert_eq!(results.num_frame_errors, 0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn error_injection_sim(params: &SimParams) -> Result<SimResults, Error> {
    check_sim_params(params)?;
    // OK to cast `u32` to `usize`: Numbers involved will always be small enough.
    let field = GaloisField::new(
        params.field_order as usize,
        params.correction_capability as usize,
    )?;
    let tally = (0 .. params.num_batches)
        .into_par_iter()
        .map(|_| run_batch(params, &field))
        .try_reduce(Tally::default, |left, right| Ok(merge_tallies(left, right)))?;
    Ok(results_from_tally(params, &tally))
}

/// Runs error injection simulations for given sets of parameters, and saves results to file.
///
/// Results of the simulation for each set of parameters are reported on `stderr` as the
/// simulations progress, and all results are saved to a JSON file at the end.
///
/// # Parameters
///
/// - `all_params`: Sets of simulation parameters.
///
/// - `json_filename`: Name of the JSON file to which all simulation results must be saved.
///
/// # Errors
///
/// Returns an error if any set of parameters in `all_params` is invalid, or if the results cannot
/// be saved to the given file.
pub fn run_error_injection_sims(
    all_params: &[SimParams],
    json_filename: &str,
) -> Result<(), Error> {
    let mut all_results = Vec::with_capacity(all_params.len());
    for params in all_params {
        let results = error_injection_sim(params)?;
        eprintln!(
            "{} errors per frame over GF(2^{}): FER = {:.3e}, BER = {:.3e} ({} frames)",
            params.num_errors_per_frame,
            params.field_order,
            results.frame_error_rate,
            results.message_bit_error_rate,
            results.num_frames,
        );
        all_results.push(results);
    }
    serde_json::to_writer_pretty(File::create(json_filename)?, &all_results)?;
    Ok(())
}

/// Checks validity of simulation parameters.
fn check_sim_params(params: &SimParams) -> Result<(), Error> {
    if params.num_frames_per_batch == 0 {
        return Err(Error::InvalidInput(
            "Number of frames per batch cannot be zero".to_string(),
        ));
    }
    if params.num_batches == 0 {
        return Err(Error::InvalidInput(
            "Number of batches cannot be zero".to_string(),
        ));
    }
    Ok(())
}

/// Encodes, corrupts, and decodes one batch of random messages, and returns its error counts.
fn run_batch(params: &SimParams, field: &GaloisField) -> Result<Tally, Error> {
    // OK to cast `u32` to `usize`: Numbers involved will always be small enough.
    let num_frames = params.num_frames_per_batch as usize;
    let num_errors = params.num_errors_per_frame as usize;
    let mut decoder = BchDecoder::new(
        field,
        field.message_length(),
        field.code_length(),
        num_frames,
    )?;
    let mut all_message_bits = Vec::with_capacity(num_frames);
    let mut received_bits = Vec::with_capacity(num_frames * field.code_length());
    for _ in 0 .. num_frames {
        let message_bits = utils::random_bits(field.message_length());
        let codeword = encoder(&message_bits, field)?;
        received_bits.extend(utils::inject_errors(&codeword, num_errors)?);
        all_message_bits.push(message_bits);
    }
    let (corrected_bits, frame_valid) = decoder.decode(&received_bits)?;
    Ok(tally_batch(field, &all_message_bits, &corrected_bits, &frame_valid))
}

/// Returns error counts for one decoded batch.
fn tally_batch(
    field: &GaloisField,
    all_message_bits: &[Vec<Bit>],
    corrected_bits: &[Bit],
    frame_valid: &[bool],
) -> Tally {
    let mut tally = Tally::default();
    for (message_bits, frame, &valid) in izip!(
        all_message_bits,
        corrected_bits.chunks_exact(field.code_length()),
        frame_valid,
    ) {
        let num_bit_errors = utils::error_count(&frame[field.redundancy() ..], message_bits);
        tally.num_frames += 1;
        if num_bit_errors > 0 || !valid {
            tally.num_frame_errors += 1;
        }
        if !valid {
            tally.num_invalid_frames += 1;
        }
        tally.num_message_bits += message_bits.len();
        tally.num_message_bit_errors += num_bit_errors;
    }
    tally
}

/// Returns combination of two sets of error counts.
fn merge_tallies(left: Tally, right: Tally) -> Tally {
    Tally {
        num_frames: left.num_frames + right.num_frames,
        num_frame_errors: left.num_frame_errors + right.num_frame_errors,
        num_invalid_frames: left.num_invalid_frames + right.num_invalid_frames,
        num_message_bits: left.num_message_bits + right.num_message_bits,
        num_message_bit_errors: left.num_message_bit_errors + right.num_message_bit_errors,
    }
}

/// Returns simulation results for given parameters and accumulated error counts.
fn results_from_tally(params: &SimParams, tally: &Tally) -> SimResults {
    SimResults {
        params: *params,
        num_frames: tally.num_frames,
        num_frame_errors: tally.num_frame_errors,
        num_invalid_frames: tally.num_invalid_frames,
        num_message_bits: tally.num_message_bits,
        num_message_bit_errors: tally.num_message_bit_errors,
        frame_error_rate: as_f64(tally.num_frame_errors) / as_f64(tally.num_frames),
        message_bit_error_rate: as_f64(tally.num_message_bit_errors)
            / as_f64(tally.num_message_bits),
    }
}

/// Returns given count as an `f64` value.
#[allow(clippy::cast_precision_loss)]
fn as_f64(count: usize) -> f64 {
    count as f64
}

#[cfg(test)]
mod tests_of_functions {
    use super::*;
    use float_eq::assert_float_eq;

    fn sim_params_for_test(num_errors_per_frame: u32) -> SimParams {
        SimParams {
            field_order: 4,
            correction_capability: 3,
            num_errors_per_frame,
            num_frames_per_batch: 16,
            num_batches: 8,
        }
    }

    #[test]
    fn test_check_sim_params() {
        // Invalid parameters
        let mut params = sim_params_for_test(1);
        params.num_frames_per_batch = 0;
        assert!(check_sim_params(&params).is_err());
        let mut params = sim_params_for_test(1);
        params.num_batches = 0;
        assert!(check_sim_params(&params).is_err());
        // Valid parameters
        assert!(check_sim_params(&sim_params_for_test(1)).is_ok());
    }

    #[test]
    fn test_error_injection_sim_invalid_params() {
        let mut params = sim_params_for_test(1);
        params.field_order = 1;
        assert!(error_injection_sim(&params).is_err());
        let mut params = sim_params_for_test(1);
        params.correction_capability = 0;
        assert!(error_injection_sim(&params).is_err());
        // More errors per frame than bits in a codeword
        let params = sim_params_for_test(16);
        assert!(error_injection_sim(&params).is_err());
    }

    #[test]
    fn test_error_injection_sim_within_correction_capability() {
        for num_errors_per_frame in 0 ..= 3 {
            let params = sim_params_for_test(num_errors_per_frame);
            let results = error_injection_sim(&params).unwrap();
            assert_eq!(results.num_frames, 128);
            assert_eq!(results.num_message_bits, 128 * 5);
            assert_eq!(results.num_frame_errors, 0);
            assert_eq!(results.num_invalid_frames, 0);
            assert_eq!(results.num_message_bit_errors, 0);
            assert_float_eq!(results.frame_error_rate, 0.0, abs <= 0.0);
            assert_float_eq!(results.message_bit_error_rate, 0.0, abs <= 0.0);
        }
    }

    #[test]
    fn test_error_injection_sim_beyond_correction_capability() {
        // A weight-4 error pattern is never fully undone by a decoder that corrects at most
        // 3 errors, so every frame is either flagged as invalid or miscorrected; a miscorrected
        // frame always has a message bit error, since distinct codewords of a systematic code
        // cannot agree on all message bits.
        let params = sim_params_for_test(4);
        let results = error_injection_sim(&params).unwrap();
        assert_eq!(results.num_frames, 128);
        assert_eq!(results.num_frame_errors, 128);
        assert_float_eq!(results.frame_error_rate, 1.0, abs <= 0.0);
    }
}
