use std::cell::RefCell;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Default Extension="png" ContentType="image/png"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

/// Assemble a minimal DOCX package in memory. Media entries land under word/.
pub fn docx_bytes(document_xml: &str, rels_xml: &str, media: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let opts = SimpleFileOptions::default();

    zip.start_file("[Content_Types].xml", opts).unwrap();
    zip.write_all(CONTENT_TYPES.as_bytes()).unwrap();
    zip.start_file("_rels/.rels", opts).unwrap();
    zip.write_all(ROOT_RELS.as_bytes()).unwrap();
    zip.start_file("word/document.xml", opts).unwrap();
    zip.write_all(document_xml.as_bytes()).unwrap();
    zip.start_file("word/_rels/document.xml.rels", opts).unwrap();
    zip.write_all(rels_xml.as_bytes()).unwrap();
    for (name, data) in media {
        zip.start_file(format!("word/{name}"), opts).unwrap();
        zip.write_all(data).unwrap();
    }

    zip.finish().unwrap().into_inner()
}

pub fn document(body: &str) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<w:document"#,
            r#" xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main""#,
            r#" xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing""#,
            r#" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main""#,
            r#" xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture""#,
            r#" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
            r#"<w:body>{}</w:body></w:document>"#,
        ),
        body
    )
}

pub fn rels(entries: &[(&str, &str)]) -> String {
    let mut body = String::new();
    for (id, target) in entries {
        body.push_str(&format!(
            r#"<Relationship Id="{id}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="{target}"/>"#
        ));
    }
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{body}</Relationships>"#
    )
}

pub fn para(text: &str) -> String {
    format!("<w:p><w:r><w:t>{text}</w:t></w:r></w:p>")
}

/// A run carrying a full wp:inline picture. Both detection probes fire on
/// this markup, which is exactly what the dedup tests need.
pub fn inline_image_run(rel_id: &str) -> String {
    format!(
        concat!(
            r#"<w:r><w:drawing><wp:inline><wp:extent cx="914400" cy="914400"/>"#,
            r#"<a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture">"#,
            r#"<pic:pic><pic:nvPicPr/><pic:blipFill><a:blip r:embed="{}"/></pic:blipFill></pic:pic>"#,
            r#"</a:graphicData></a:graphic></wp:inline></w:drawing></w:r>"#,
        ),
        rel_id
    )
}

/// A run carrying an anchored (floating) picture; only the raw-markup probe
/// sees these.
pub fn anchored_image_run(rel_id: &str) -> String {
    format!(
        concat!(
            r#"<w:r><w:drawing><wp:anchor behindDoc="0"><wp:extent cx="914400" cy="914400"/>"#,
            r#"<a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture">"#,
            r#"<pic:pic><pic:nvPicPr/><pic:blipFill><a:blip r:embed="{}"/></pic:blipFill></pic:pic>"#,
            r#"</a:graphicData></a:graphic></wp:anchor></w:drawing></w:r>"#,
        ),
        rel_id
    )
}

pub fn png_bytes() -> Vec<u8> {
    let img = image::DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
        2,
        2,
        image::Rgba([200, 40, 40, 255]),
    ));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
    buf.into_inner()
}

#[derive(Default)]
pub struct RecordingReporter {
    pub saved: RefCell<Vec<PathBuf>>,
    pub skipped: RefCell<Vec<(String, String)>>,
}

impl docxtract::Reporter for RecordingReporter {
    fn image_saved(&self, path: &Path) {
        self.saved.borrow_mut().push(path.to_path_buf());
    }

    fn image_skipped(&self, rel_id: &str, reason: &str) {
        self.skipped
            .borrow_mut()
            .push((rel_id.to_string(), reason.to_string()));
    }
}
