use std::io::Write;

use anyhow::Context;
use halfblock_png::{DecodeOptions, PNG};

const USAGE: &str = "Usage: png-preview [-v|-vv] [--strict-crc] [--no-title] IMAGE.png...";

struct Args {
    verbosity: log::LevelFilter,
    options: DecodeOptions,
    titles: bool,
    files: Vec<String>,
}

fn parse_args(args: impl Iterator<Item = String>) -> anyhow::Result<Args> {
    let mut parsed = Args {
        verbosity: log::LevelFilter::Error,
        options: DecodeOptions::default(),
        titles: true,
        files: vec![],
    };
    for arg in args {
        match arg.as_str() {
            "-v" => parsed.verbosity = log::LevelFilter::Info,
            "-vv" => parsed.verbosity = log::LevelFilter::Debug,
            "--strict-crc" => parsed.options.verify_crc = true,
            "--no-title" => parsed.titles = false,
            flag if flag.starts_with('-') => anyhow::bail!("unknown option {flag}\n{USAGE}"),
            file_name => parsed.files.push(file_name.to_owned()),
        }
    }
    if parsed.files.is_empty() {
        anyhow::bail!(USAGE);
    }
    Ok(parsed)
}

/// Decodes and renders one file. Nothing is returned unless the whole image
/// decoded.
fn preview(file_name: &str, args: &Args) -> anyhow::Result<String> {
    let input = std::fs::read(file_name).context(format!("Failed to read {file_name}"))?;
    let png = PNG::decode_with(&input, args.options)
        .context(format!("Failed to decode {file_name}"))?;
    let mut text = String::from("\n");
    if args.titles {
        text.push_str(&format!(
            "  {file_name} ({}x{})\n",
            png.width(),
            png.height()
        ));
    }
    text.push_str(&png.half_blocks().margin(2).to_string());
    Ok(text)
}

fn main() -> anyhow::Result<()> {
    let args = parse_args(std::env::args().skip(1))?;
    pretty_env_logger::formatted_builder()
        .filter_level(args.verbosity)
        .parse_env("RUST_LOG")
        .init();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut failed = 0;
    for file_name in &args.files {
        match preview(file_name, &args) {
            Ok(text) => out.write_all(text.as_bytes())?,
            Err(e) => {
                log::error!("{e:#}");
                failed += 1;
            }
        }
    }
    writeln!(out)?;
    if failed > 0 {
        anyhow::bail!("{failed} of {} images could not be previewed", args.files.len());
    }
    Ok(())
}
