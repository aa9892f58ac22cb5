mod docx;
mod error;
mod extract;
mod model;

pub use docx::{Docx, RelatedParts, from_bytes, open};
pub use error::Error;
pub use extract::{
    DedupPolicy, Extraction, LogReporter, PlaceholderStyle, Profile, Reporter, walk, write_output,
};
pub use model::{AnchorOrigin, Document, ImageAnchor, Paragraph, Run};

use std::io::{Read, Seek};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// What one extraction run produced, and where.
pub struct Summary {
    pub text_path: PathBuf,
    pub images: Vec<PathBuf>,
    pub output_dir: PathBuf,
}

pub fn extract_file(input: &Path, output_root: &Path, profile: &Profile) -> Result<Summary, Error> {
    extract_file_with(input, output_root, profile, &LogReporter)
}

pub fn extract_file_with(
    input: &Path,
    output_root: &Path,
    profile: &Profile,
    reporter: &dyn Reporter,
) -> Result<Summary, Error> {
    let doc_name = document_name(input);
    let t0 = Instant::now();
    let mut docx = docx::open(input)?;
    let t_parse = t0.elapsed();

    let summary = run_extraction(&mut docx, &doc_name, output_root, profile, reporter)?;

    let t_total = t0.elapsed();
    log::info!(
        "Timing: parse={:.1}ms, walk+write={:.1}ms, total={:.1}ms ({} images)",
        t_parse.as_secs_f64() * 1000.0,
        (t_total - t_parse).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        summary.images.len(),
    );

    Ok(summary)
}

pub fn extract_bytes(
    input: &[u8],
    doc_name: &str,
    output_root: &Path,
    profile: &Profile,
) -> Result<Summary, Error> {
    extract_bytes_with(input, doc_name, output_root, profile, &LogReporter)
}

pub fn extract_bytes_with(
    input: &[u8],
    doc_name: &str,
    output_root: &Path,
    profile: &Profile,
    reporter: &dyn Reporter,
) -> Result<Summary, Error> {
    let mut docx = docx::from_bytes(input)?;
    run_extraction(&mut docx, doc_name, output_root, profile, reporter)
}

fn run_extraction<R: Read + Seek>(
    docx: &mut Docx<R>,
    doc_name: &str,
    output_root: &Path,
    profile: &Profile,
    reporter: &dyn Reporter,
) -> Result<Summary, Error> {
    let output_dir = output_root.join(doc_name);
    std::fs::create_dir_all(&output_dir).map_err(Error::Io)?;

    log::info!("Starting extraction for document: {doc_name}");

    let extraction = extract::walk(docx, doc_name, &output_dir, profile, reporter);
    let text_path = extract::write_output(&extraction.text, doc_name, &output_dir, profile)?;

    log::info!("Extraction complete. Text saved to: {}", text_path.display());
    log::info!("Images saved to: {}", output_dir.display());

    Ok(Summary {
        text_path,
        images: extraction.images,
        output_dir,
    })
}

fn document_name(input: &Path) -> String {
    input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string())
}
