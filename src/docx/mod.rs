mod images;

use std::collections::HashMap;
use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use crate::error::Error;
use crate::model::{Document, Paragraph, Run};

pub(super) const WML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
pub(super) const DML_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
pub(super) const WPD_NS: &str =
    "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing";
pub(super) const REL_NS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

pub(super) fn wml<'a>(node: roxmltree::Node<'a, 'a>, name: &str) -> Option<roxmltree::Node<'a, 'a>> {
    node.children()
        .find(|n| n.tag_name().name() == name && n.tag_name().namespace() == Some(WML_NS))
}

fn read_zip_text<R: Read + Seek>(zip: &mut zip::ZipArchive<R>, name: &str) -> Option<String> {
    let mut content = String::new();
    zip.by_name(name).ok()?.read_to_string(&mut content).ok()?;
    Some(content)
}

fn parse_rels_xml(xml_content: &str) -> HashMap<String, String> {
    let mut rels = HashMap::new();
    let Ok(xml) = roxmltree::Document::parse(xml_content) else {
        return rels;
    };
    for node in xml.root_element().children() {
        if node.tag_name().name() == "Relationship"
            && let (Some(id), Some(target)) = (node.attribute("Id"), node.attribute("Target"))
        {
            rels.insert(id.to_string(), target.to_string());
        }
    }
    rels
}

fn parse_relationships<R: Read + Seek>(zip: &mut zip::ZipArchive<R>) -> HashMap<String, String> {
    let Some(xml_content) = read_zip_text(zip, "word/_rels/document.xml.rels") else {
        return HashMap::new();
    };
    parse_rels_xml(&xml_content)
}

/// The document part's relationship map plus the archive it resolves into.
/// A missing id or missing zip entry is an expected condition (hand-edited
/// documents reference parts that no longer exist) and yields None.
#[derive(Debug)]
pub struct RelatedParts<R: Read + Seek> {
    zip: zip::ZipArchive<R>,
    rels: HashMap<String, String>,
}

impl<R: Read + Seek> RelatedParts<R> {
    pub fn blob(&mut self, rel_id: &str) -> Option<Vec<u8>> {
        let target = self.rels.get(rel_id)?;
        let zip_path = target
            .strip_prefix('/')
            .map(String::from)
            .unwrap_or_else(|| format!("word/{}", target));
        let mut entry = self.zip.by_name(&zip_path).ok()?;
        let mut data = Vec::new();
        entry.read_to_end(&mut data).ok()?;
        Some(data)
    }
}

/// A parsed package: the paragraph/run model plus the related-parts
/// resolver for the main document part.
#[derive(Debug)]
pub struct Docx<R: Read + Seek> {
    pub document: Document,
    pub related: RelatedParts<R>,
}

pub fn open(path: &Path) -> Result<Docx<File>, Error> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => Error::Io(
            std::io::Error::new(e.kind(), format!("{}: {}", e, path.display())),
        ),
        _ => Error::Io(e),
    })?;

    let zip = zip::ZipArchive::new(file)
        .map_err(|_| Error::InvalidDocx("file is not a ZIP archive".into()))?;
    parse_archive(zip)
}

pub fn from_bytes(data: &[u8]) -> Result<Docx<Cursor<Vec<u8>>>, Error> {
    let zip = zip::ZipArchive::new(Cursor::new(data.to_vec()))
        .map_err(|_| Error::InvalidDocx("input is not a ZIP archive".into()))?;
    parse_archive(zip)
}

fn parse_archive<R: Read + Seek>(mut zip: zip::ZipArchive<R>) -> Result<Docx<R>, Error> {
    let rels = parse_relationships(&mut zip);

    let mut xml_content = String::new();
    zip.by_name("word/document.xml")
        .map_err(|_| Error::InvalidDocx("missing word/document.xml (is this a DOCX file?)".into()))?
        .read_to_string(&mut xml_content)?;

    let xml = roxmltree::Document::parse(&xml_content)?;
    let root = xml.root_element();
    let body = wml(root, "body").ok_or_else(|| Error::InvalidDocx("missing w:body".into()))?;

    let mut paragraphs = Vec::new();
    for node in collect_block_nodes(body) {
        if node.tag_name().namespace() != Some(WML_NS) || node.tag_name().name() != "p" {
            continue;
        }
        paragraphs.push(parse_paragraph(node));
    }

    Ok(Docx {
        document: Document { paragraphs },
        related: RelatedParts { zip, rels },
    })
}

/// Flatten SDT wrappers: descend into w:sdtContent and collect effective children.
fn collect_block_nodes<'a>(parent: roxmltree::Node<'a, 'a>) -> Vec<roxmltree::Node<'a, 'a>> {
    let mut nodes = Vec::new();
    for child in parent.children() {
        if child.tag_name().name() == "sdt" && child.tag_name().namespace() == Some(WML_NS) {
            if let Some(content) = wml(child, "sdtContent") {
                nodes.extend(collect_block_nodes(content));
            }
        } else {
            nodes.push(child);
        }
    }
    nodes
}

fn collect_run_nodes<'a>(parent: roxmltree::Node<'a, 'a>, out: &mut Vec<roxmltree::Node<'a, 'a>>) {
    for child in parent.children() {
        let name = child.tag_name().name();
        let is_wml = child.tag_name().namespace() == Some(WML_NS);
        if is_wml && name == "r" {
            out.push(child);
        } else if is_wml && name == "hyperlink" {
            for n in child.children().filter(|n| {
                n.tag_name().name() == "r" && n.tag_name().namespace() == Some(WML_NS)
            }) {
                out.push(n);
            }
        } else if is_wml && name == "sdt" {
            if let Some(content) = wml(child, "sdtContent") {
                collect_run_nodes(content, out);
            }
        }
    }
}

fn parse_paragraph(para_node: roxmltree::Node) -> Paragraph {
    let mut run_nodes = Vec::new();
    collect_run_nodes(para_node, &mut run_nodes);

    let runs = run_nodes.into_iter().map(parse_run).collect();
    Paragraph { runs }
}

fn parse_run(run_node: roxmltree::Node) -> Run {
    let mut text = String::new();
    for child in run_node.children() {
        if child.tag_name().namespace() != Some(WML_NS) {
            continue;
        }
        match child.tag_name().name() {
            "t" => {
                if let Some(t) = child.text() {
                    // Word treats newlines in w:t as whitespace; only w:br breaks lines
                    text.push_str(&t.replace('\n', " "));
                }
            }
            "tab" => text.push('\t'),
            "br" => text.push('\n'),
            _ => {}
        }
    }

    Run {
        text,
        anchors: images::locate_run_images(run_node),
    }
}
