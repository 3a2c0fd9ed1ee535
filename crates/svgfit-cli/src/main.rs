mod args;
mod render;
mod terminal;
mod tracing;

use std::process::ExitCode;

use clap::Parser;
use ecow::EcoString;

use crate::args::CliArguments;

/// A result whose error is a plain message.
pub type StrResult<T> = Result<T, EcoString>;

/// Return early with a formatted error message.
macro_rules! bail {
    ($($tts:tt)*) => {
        return Err(ecow::eco_format!($($tts)*))
    };
}

pub(crate) use bail;

/// Entry point.
fn main() -> ExitCode {
    let args = CliArguments::parse();
    tracing::setup_tracing(args.verbosity);

    if let Err(msg) = render::render(&args) {
        terminal::print_error(args.color, &msg).expect("failed to print error");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
