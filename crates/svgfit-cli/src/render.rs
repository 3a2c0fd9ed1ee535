use std::fs;
use std::io::{self, Read, Write};

use ecow::eco_format;
use svgfit::tiny_skia::Pixmap;
use svgfit::{RenderRequest, RenderResult, Renderer};

use crate::args::{CliArguments, Input, Output};
use crate::{StrResult, bail};

/// Execute a render or size query.
pub fn render(args: &CliArguments) -> StrResult<()> {
    let renderer = Renderer::new(args.options());
    if args.query {
        let (width, height) = query(&renderer, &args.input)?;
        println!("{width}x{height}");
        return Ok(());
    }

    let Some(output) = args.output() else {
        bail!("an output path is required when reading from stdin");
    };

    let pixmap = rasterize(&renderer, &args.input, &args.request())?;
    tracing::info!(width = pixmap.width(), height = pixmap.height(), %output, "writing image");

    let buf = pixmap
        .encode_png()
        .map_err(|err| eco_format!("failed to encode PNG file ({err})"))?;
    write(&output, &buf)
        .map_err(|err| eco_format!("failed to write PNG file to {output} ({err})"))
}

/// Render the input into a pixel buffer.
fn rasterize(
    renderer: &Renderer,
    input: &Input,
    request: &RenderRequest,
) -> StrResult<Pixmap> {
    match input {
        Input::Stdin => Ok(renderer.render(&read_stdin()?, request)?),
        Input::Path(path) => {
            with_path(renderer.render_file(path, request), path.display())
        }
    }
}

/// Measure the input.
fn query(renderer: &Renderer, input: &Input) -> StrResult<(u32, u32)> {
    match input {
        Input::Stdin => Ok(renderer.query_size(&read_stdin()?)?),
        Input::Path(path) => with_path(renderer.query_size_file(path), path.display()),
    }
}

/// Prefix an error with the path it occurred for.
fn with_path<T>(result: RenderResult<T>, path: impl std::fmt::Display) -> StrResult<T> {
    result.map_err(|err| eco_format!("{path}: {err}"))
}

/// Read the whole of stdin.
fn read_stdin() -> StrResult<Vec<u8>> {
    let mut buf = Vec::new();
    io::stdin()
        .read_to_end(&mut buf)
        .map_err(|err| eco_format!("failed to read from stdin ({err})"))?;
    if !svgfit::is_svg(&buf) {
        tracing::warn!("input does not look like an SVG document");
    }
    Ok(buf)
}

/// Write the encoded image.
fn write(output: &Output, buf: &[u8]) -> io::Result<()> {
    match output {
        Output::Stdout => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(buf)?;
            stdout.flush()
        }
        Output::Path(path) => fs::write(path, buf),
    }
}
