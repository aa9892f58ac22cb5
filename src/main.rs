use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use docxtract::Profile;

/// Extract text and images from a DOCX file, preserving document order.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Path to the DOCX file
    input: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = "./output")]
    output: PathBuf,

    /// Legacy plain-text flavor: [[file]] markers, 2-digit indexes, .txt output
    #[arg(long)]
    plain_text: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if !cli.input.exists() {
        log::error!("The file '{}' does not exist.", cli.input.display());
        return ExitCode::from(1);
    }

    let profile = if cli.plain_text {
        Profile::plain_text()
    } else {
        Profile::markdown()
    };

    match docxtract::extract_file(&cli.input, &cli.output, &profile) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::from(1)
        }
    }
}
