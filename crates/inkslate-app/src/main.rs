//! Command-line entry point: replay a session and write its exports.

use clap::Parser;
use inkslate_app::{Options, run};
use inkslate_render::ExportFormat;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "inkslate", version, about = "Replay an Inkslate whiteboard session")]
struct Args {
    /// Session file (JSON).
    session: PathBuf,
    /// Directory for exported images.
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,
    /// Export format: jpeg or png.
    #[arg(short, long, default_value_t = ExportFormat::Jpeg)]
    format: ExportFormat,
    /// TrueType/OpenType font for text shapes.
    #[arg(long)]
    font: Option<PathBuf>,
    /// Also write the final canvas frame as PNG.
    #[arg(long)]
    frame: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    log::info!("Starting Inkslate replay of {}", args.session.display());

    let options = Options {
        session: args.session,
        out_dir: args.out_dir,
        format: args.format,
        font: args.font,
        frame: args.frame,
    };
    match run(&options) {
        Ok(summary) => {
            log::info!(
                "done: {} shapes, {} exports, unsaved changes: {}",
                summary.shapes,
                summary.exports.len(),
                summary.dirty
            );
            for path in &summary.exports {
                println!("{}", path.display());
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{err}");
            eprintln!("inkslate: {err}");
            ExitCode::FAILURE
        }
    }
}
