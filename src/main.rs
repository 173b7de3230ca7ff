//! This crate simulates the frame-error-rate performance of binary BCH codes under injection of
//! random error patterns of exact weight. Simulation parameters are specified on the command
//! line, and simulation results are saved to a JSON file.
//!
//! Build the executable with `cargo build --release` and then run `./target/release/bch -h` for
//! help on the command-line interface.

#![warn(
    clippy::complexity,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_allocation,
    unused_import_braces,
    unused_qualifications
)]

use anyhow::Result;
use bch::simulation;
use clap::parser::ValueSource;
use clap::{crate_name, crate_version, value_parser, Arg, ArgMatches, Command};
use std::time::Instant;

/// Main function
fn main() -> Result<()> {
    let timer = Instant::now();
    let matches = command_line_parser().get_matches();
    let json_filename = &json_filename_from_matches(&matches);
    simulation::run_error_injection_sims(&all_sim_params(&matches), json_filename)?;
    eprintln!("Elapsed time: {:.3?}", timer.elapsed());
    Ok(())
}

/// Returns command line parser.
fn command_line_parser() -> Command {
    Command::new(crate_name!())
        .version(crate_version!())
        .about("Evaluates the performance of binary BCH codes under exact-weight error injection")
        .arg(field_order())
        .arg(correction_capability())
        .arg(max_num_errors_per_frame())
        .arg(num_frames_per_batch())
        .arg(num_batches())
        .arg(json_filename())
}

/// Returns argument for order of the Galois field.
fn field_order() -> Arg {
    Arg::new("field_order")
        .short('m')
        .value_parser(value_parser!(u32))
        .default_value("4")
        .help("Order of the Galois field over which the code is built")
}

/// Returns argument for correction capability of the code.
fn correction_capability() -> Arg {
    Arg::new("correction_capability")
        .short('t')
        .value_parser(value_parser!(u32))
        .default_value("3")
        .help("Number of bit errors per codeword the code is designed to correct")
}

/// Returns argument for maximum number of bit errors injected per frame.
fn max_num_errors_per_frame() -> Arg {
    Arg::new("max_num_errors_per_frame")
        .short('e')
        .value_parser(value_parser!(u32))
        .default_value("5")
        .help("Maximum number of bit errors injected per frame")
}

/// Returns argument for number of frames decoded together in one batch.
fn num_frames_per_batch() -> Arg {
    Arg::new("num_frames_per_batch")
        .short('w')
        .value_parser(value_parser!(u32))
        .default_value("64")
        .help("Number of frames decoded together in one batch")
}

/// Returns argument for number of batches to be simulated.
fn num_batches() -> Arg {
    Arg::new("num_batches")
        .short('b')
        .value_parser(value_parser!(u32))
        .default_value("100")
        .help("Number of batches to be simulated")
}

/// Returns argument for name of JSON file to which results must be saved.
fn json_filename() -> Arg {
    Arg::new("json_filename")
        .short('f')
        .default_value("results.json")
        .help("Name of JSON file to which results must be saved")
}

/// Returns simulation parameters based on command-line arguments.
fn all_sim_params(matches: &ArgMatches) -> Vec<simulation::SimParams> {
    let field_order = field_order_from_matches(matches);
    let code_length = 2u64.saturating_pow(field_order).saturating_sub(1);
    let mut correction_capability = correction_capability_from_matches(matches);
    if 2 * u64::from(correction_capability) >= code_length {
        if let Some(ValueSource::DefaultValue) = matches.value_source("correction_capability") {
            // OK to unwrap: The clamp only applies when the code length is below twice the
            // given `u32` correction capability.
            correction_capability = u32::try_from(code_length.saturating_sub(1) / 2)
                .unwrap()
                .max(1);
        }
    }
    let mut max_num_errors_per_frame = max_num_errors_per_frame_from_matches(matches);
    if u64::from(max_num_errors_per_frame) > code_length {
        if let Some(ValueSource::DefaultValue) = matches.value_source("max_num_errors_per_frame") {
            // OK to unwrap: The clamp only applies when the code length is below the given
            // `u32` maximum number of errors.
            max_num_errors_per_frame = u32::try_from(code_length).unwrap();
        }
    }
    let mut all_params = Vec::new();
    for num_errors_per_frame in 0 ..= max_num_errors_per_frame {
        all_params.push(simulation::SimParams {
            field_order,
            correction_capability,
            num_errors_per_frame,
            num_frames_per_batch: num_frames_per_batch_from_matches(matches),
            num_batches: num_batches_from_matches(matches),
        });
    }
    // OK to unwrap: All command-line arguments have default values, so an error cannot occur
    // in any of the associated functions called above.
    all_params
}

/// Returns order of the Galois field.
fn field_order_from_matches(matches: &ArgMatches) -> u32 {
    *matches.get_one("field_order").unwrap()
}

/// Returns correction capability of the code.
fn correction_capability_from_matches(matches: &ArgMatches) -> u32 {
    *matches.get_one("correction_capability").unwrap()
}

/// Returns maximum number of bit errors injected per frame.
fn max_num_errors_per_frame_from_matches(matches: &ArgMatches) -> u32 {
    *matches.get_one("max_num_errors_per_frame").unwrap()
}

/// Returns number of frames decoded together in one batch.
fn num_frames_per_batch_from_matches(matches: &ArgMatches) -> u32 {
    *matches.get_one("num_frames_per_batch").unwrap()
}

/// Returns number of batches to be simulated.
fn num_batches_from_matches(matches: &ArgMatches) -> u32 {
    *matches.get_one("num_batches").unwrap()
}

/// Returns name of JSON file to which simulation results must be saved.
fn json_filename_from_matches(matches: &ArgMatches) -> String {
    matches
        .get_one::<String>("json_filename")
        .unwrap()
        .to_string()
}
