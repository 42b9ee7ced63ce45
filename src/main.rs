use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use tartanloom::{
    compile_pattern, encode_png, rasterize, DEFAULT_COLORS, DEFAULT_PATTERN, DEFAULT_TWILL_WIDTH,
};

const USAGE: &str = "usage: tartanloom [COLUMNS_FILE [ROWS_FILE]] [-c COLOR]... [-t TWILL_WIDTH] [-o OUTPUT]

Renders a tartan twill weave to a PNG file. With no pattern files the
built-in three-color tartan is rendered; with one file its pattern is used
for both axes. Colors given with -c replace the default palette and are
referenced by 0-based index from the pattern lines (<index>:<thickness>).";

fn main() -> ExitCode {
    env_logger::init();

    let mut colors: Vec<String> = Vec::new();
    let mut twill_width = DEFAULT_TWILL_WIDTH;
    let mut output = PathBuf::from("tartan.png");
    let mut pattern_files: Vec<PathBuf> = Vec::new();

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                println!("{}", USAGE);
                return ExitCode::SUCCESS;
            }
            "-c" | "--color" => match args.next() {
                Some(spec) => colors.push(spec),
                None => return bad_usage("missing value for -c"),
            },
            "-t" | "--twill-width" => match args.next().and_then(|v| v.parse::<f32>().ok()) {
                Some(width) => twill_width = width,
                None => return bad_usage("missing or non-numeric value for -t"),
            },
            "-o" | "--output" => match args.next() {
                Some(path) => output = PathBuf::from(path),
                None => return bad_usage("missing value for -o"),
            },
            _ => pattern_files.push(PathBuf::from(arg)),
        }
    }
    if pattern_files.len() > 2 {
        return bad_usage("at most two pattern files (columns, rows) are accepted");
    }

    if colors.is_empty() {
        colors = DEFAULT_COLORS.iter().map(|c| c.to_string()).collect();
    }

    // A trailing newline from an editor would read as an extra empty
    // segment line, so file input is trimmed at the end.
    let columns_text = match pattern_files.first() {
        Some(path) => match fs::read_to_string(path) {
            Ok(text) => text.trim_end().to_string(),
            Err(err) => return fail(&format!("Failed to read {}: {}", path.display(), err)),
        },
        None => DEFAULT_PATTERN.to_string(),
    };
    let rows_text = match pattern_files.get(1) {
        Some(path) => match fs::read_to_string(path) {
            Ok(text) => text.trim_end().to_string(),
            Err(err) => return fail(&format!("Failed to read {}: {}", path.display(), err)),
        },
        None => columns_text.clone(),
    };

    let pattern = match compile_pattern(&colors, twill_width, &columns_text, &rows_text) {
        Ok(pattern) => pattern,
        Err(message) => return fail(&message),
    };

    let canvas = rasterize(&pattern);
    log::info!(
        "Rendered {}x{} weave ({} columns, {} rows)",
        canvas.width(),
        canvas.height(),
        pattern.horizontal.len(),
        pattern.vertical.len()
    );

    let bytes = match encode_png(&canvas) {
        Ok(bytes) => bytes,
        Err(message) => return fail(&message),
    };
    if let Err(err) = fs::write(&output, bytes) {
        return fail(&format!("Failed to write {}: {}", output.display(), err));
    }

    println!("{}", output.display());
    ExitCode::SUCCESS
}

fn bad_usage(message: &str) -> ExitCode {
    eprintln!("{}\n\n{}", message, USAGE);
    ExitCode::FAILURE
}

fn fail(message: &str) -> ExitCode {
    eprintln!("{}", message);
    ExitCode::FAILURE
}
