use std::io::{self, IsTerminal, Write};

use codespan_reporting::term::{self, termcolor};
use termcolor::{ColorChoice, WriteColor};

/// Print an error message to stderr, colored if the terminal allows it.
pub fn print_error(color: clap::ColorChoice, msg: &str) -> io::Result<()> {
    let choice = match color {
        clap::ColorChoice::Auto if io::stderr().is_terminal() => ColorChoice::Auto,
        clap::ColorChoice::Always => ColorChoice::Always,
        _ => ColorChoice::Never,
    };

    let styles = term::Styles::default();
    let mut output = termcolor::StandardStream::stderr(choice);
    output.set_color(&styles.header_error)?;
    write!(output, "error")?;

    output.reset()?;
    writeln!(output, ": {msg}")
}
