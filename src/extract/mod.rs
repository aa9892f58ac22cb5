mod media;

use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

use crate::docx::Docx;
use crate::error::Error;

/// Placeholder marker syntax emitted into the text buffer for each image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlaceholderStyle {
    /// `![file](file)`
    Markdown,
    /// `[[file]]`
    Bracketed,
}

/// What to do when the two detection probes (or repeated markup) surface
/// the same relationship id within one paragraph.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DedupPolicy {
    /// Materialize each distinct relationship id once per paragraph.
    ByRelId,
    /// Materialize every detection, duplicates included.
    KeepAll,
}

/// Output conventions for one extraction run. The two constructors are the
/// two flavors the tool ships; fields are public so callers can mix.
#[derive(Clone, Debug)]
pub struct Profile {
    pub placeholder: PlaceholderStyle,
    pub index_width: usize,
    pub output_suffix: String,
    pub dedup: DedupPolicy,
}

impl Profile {
    /// Canonical flavor: `doc.md`, 3-digit image indexes, markdown markers.
    pub fn markdown() -> Self {
        Profile {
            placeholder: PlaceholderStyle::Markdown,
            index_width: 3,
            output_suffix: ".md".into(),
            dedup: DedupPolicy::ByRelId,
        }
    }

    /// Legacy flavor: `doc_output.txt`, 2-digit indexes, `[[file]]` markers.
    pub fn plain_text() -> Self {
        Profile {
            placeholder: PlaceholderStyle::Bracketed,
            index_width: 2,
            output_suffix: "_output.txt".into(),
            dedup: DedupPolicy::ByRelId,
        }
    }

    pub fn image_file_name(&self, doc_name: &str, index: u32) -> String {
        format!("{doc_name}_img_{index:0width$}.png", width = self.index_width)
    }

    pub fn output_file_name(&self, doc_name: &str) -> String {
        format!("{doc_name}{}", self.output_suffix)
    }

    fn placeholder_for(&self, file_name: &str) -> String {
        match self.placeholder {
            PlaceholderStyle::Markdown => format!("![{file_name}]({file_name})"),
            PlaceholderStyle::Bracketed => format!("[[{file_name}]]"),
        }
    }
}

impl Default for Profile {
    fn default() -> Self {
        Profile::markdown()
    }
}

/// Observer for per-image and per-paragraph events during the walk. All
/// events are informational; the walk never aborts on their account.
pub trait Reporter {
    fn image_saved(&self, path: &Path) {
        let _ = path;
    }
    fn image_skipped(&self, rel_id: &str, reason: &str) {
        let _ = (rel_id, reason);
    }
    fn paragraph_done(&self, paragraph: usize, images: usize) {
        let _ = (paragraph, images);
    }
}

/// Default reporter: forwards everything to the log facade.
pub struct LogReporter;

impl Reporter for LogReporter {
    fn image_saved(&self, path: &Path) {
        log::info!("Image saved: {}", path.display());
    }

    fn image_skipped(&self, rel_id: &str, reason: &str) {
        log::error!("Error saving image {rel_id}: {reason}");
    }

    fn paragraph_done(&self, paragraph: usize, images: usize) {
        log::info!("Processing paragraph {paragraph}: text extracted, {images} images found.");
    }
}

/// Everything the walk produced: the interleaved text buffer and the image
/// files written along the way.
pub struct Extraction {
    pub text: String,
    pub images: Vec<PathBuf>,
}

/// The content walk: strictly sequential, single pass over paragraphs.
///
/// Per paragraph: non-blank text first (with a blank-line separator), then
/// one placeholder per successfully materialized image, in detection order.
/// The image index is global across the document and advances only when a
/// file was actually written.
pub fn walk<R: Read + Seek>(
    docx: &mut Docx<R>,
    doc_name: &str,
    out_dir: &Path,
    profile: &Profile,
    reporter: &dyn Reporter,
) -> Extraction {
    let Docx { document, related } = docx;

    let mut text = String::new();
    let mut images = Vec::new();
    let mut index: u32 = 1;

    for (para_idx, para) in document.paragraphs.iter().enumerate() {
        let para_text = para.text();
        if !para_text.trim().is_empty() {
            text.push_str(&para_text);
            text.push_str("\n\n");
        }

        let mut rel_ids: Vec<&str> = Vec::new();
        for anchor in para.image_anchors() {
            let duplicate = profile.dedup == DedupPolicy::ByRelId
                && rel_ids.iter().any(|id| *id == anchor.rel_id);
            if !duplicate {
                rel_ids.push(&anchor.rel_id);
            }
        }

        let mut saved_here = 0usize;
        for rel_id in rel_ids {
            let Some(blob) = related.blob(rel_id) else {
                reporter.image_skipped(rel_id, "no related part for relationship id");
                continue;
            };
            let file_name = profile.image_file_name(doc_name, index);
            match media::save_image(&blob, out_dir, &file_name) {
                Ok(path) => {
                    reporter.image_saved(&path);
                    text.push_str(&profile.placeholder_for(&file_name));
                    text.push_str("\n\n");
                    images.push(path);
                    index += 1;
                    saved_here += 1;
                }
                Err(e) => reporter.image_skipped(rel_id, &e.to_string()),
            }
        }

        if saved_here > 0 {
            reporter.paragraph_done(para_idx + 1, saved_here);
        }
    }

    Extraction { text, images }
}

/// Write the accumulated buffer verbatim; purely a sink.
pub fn write_output(
    text: &str,
    doc_name: &str,
    out_dir: &Path,
    profile: &Profile,
) -> Result<PathBuf, Error> {
    let path = out_dir.join(profile.output_file_name(doc_name));
    std::fs::write(&path, text).map_err(Error::Io)?;
    Ok(path)
}
