use clap::Parser;
use itertools::Itertools;
use log::{info, warn};
use primfn::pipeline::{parse_steps, read_steps};
use primfn::{Arith, FnError, Pipeline};
use std::process;

mod cli;
mod logging;

use cli::{Args, NumericType};

fn main() {
    // parse CLI arguments
    let args = Args::parse();

    // set up logging
    logging::setup_logger(args.verbosity, args.quiet, args.log_output.as_deref());

    let outcome = match args.numeric_type {
        NumericType::Byte => run::<i8>(&args),
        NumericType::Short => run::<i16>(&args),
        NumericType::Int => run::<i32>(&args),
        NumericType::Long => run::<i64>(&args),
        NumericType::Float => run::<f32>(&args),
        NumericType::Double => run::<f64>(&args),
    };

    match outcome {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(2);
        }
    }
}

/// Builds the pipeline and evaluates it on every input.
/// Returns whether every input evaluated successfully.
fn run<T: Arith>(args: &Args) -> primfn::Result<bool> {
    // validate everything before evaluating anything
    let mut pipeline = build_pipeline::<T>(args)?;
    let inputs = parse_inputs::<T>(&args.inputs)?;

    if args.memoize {
        pipeline.memoize();
    }
    info!(
        "evaluating '{}' over {} {} value(s)",
        pipeline,
        inputs.len(),
        T::KIND
    );

    let evaluate = pipeline.operator().sneaky();
    let results = if args.parallel {
        evaluate.apply_all(&inputs)
    } else {
        inputs.iter().map(|&x| evaluate.apply(x)).collect()
    };

    let mut all_ok = true;
    for (input, result) in inputs.iter().zip(&results) {
        match result {
            Ok(output) => println!("{} -> {}", input, output),
            Err(e) => {
                all_ok = false;
                warn!("{} failed: {}", input, e);
                println!("{} -> error: {}", input, e);
            }
        }
    }
    info!(
        "outputs: {}",
        results.iter().filter_map(|r| r.as_ref().ok()).join(", ")
    );

    if let Some(stats) = pipeline.operator().cache_stats() {
        println!("cache: {}", stats);
    }
    Ok(all_ok)
}

fn build_pipeline<T: Arith>(args: &Args) -> primfn::Result<Pipeline<T>> {
    let mut steps = parse_steps::<T, _>(&args.steps)?;
    if let Some(path) = &args.steps_file {
        steps.extend(read_steps::<T>(path)?);
    }
    Pipeline::from_steps(steps)
}

fn parse_inputs<T: Arith>(inputs: &[String]) -> primfn::Result<Vec<T>> {
    inputs
        .iter()
        .map(|text| {
            T::parse_value(text).ok_or_else(|| {
                FnError::invalid_argument(format!("'{}' is not a valid {} value", text, T::KIND))
            })
        })
        .collect()
}
