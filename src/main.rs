//! OfferForge binary: reads three artifact paths and one customer record
//! from the command line and writes a single JSON response to stdout.
//!
//! stdout carries nothing but the response envelope; diagnostics go to
//! stderr. Exit code is 0 on success and 1 on every handled failure,
//! including argument problems.

use std::process::ExitCode;

use clap::Parser;
use offerforge::{Args, OfferPipeline, PipelineError, PredictionResult, Response, Result};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // Argument failures use the same envelope and exit code as
            // every other failure instead of clap's usage dump.
            let invocation = PipelineError::Invocation(err.to_string());
            println!("{}", render(&Response::failure(&invocation)));
            return ExitCode::from(1);
        }
    };

    init_logging(args.verbose);

    let response = Response::from(run(&args));
    let code = match response {
        Response::Success { .. } => 0,
        Response::Error { .. } => 1,
    };
    println!("{}", render(&response));
    ExitCode::from(code)
}

/// Assemble the pipeline and score the supplied record.
fn run(args: &Args) -> Result<PredictionResult> {
    let pipeline = OfferPipeline::from_artifact_files(&args.model, &args.scaler, &args.encoder)?;
    let record = args.customer_record()?;
    pipeline.predict(&record)
}

fn render(response: &Response) -> String {
    serde_json::to_string(response).unwrap_or_else(|_| {
        r#"{"status":"error","message":"failed to encode response","error_type":"PredictionError"}"#
            .to_string()
    })
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
