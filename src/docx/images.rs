use crate::model::{AnchorOrigin, ImageAnchor};

use super::{DML_NS, REL_NS, WML_NS, WPD_NS};

const PIC_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/picture";

fn dml<'a>(node: roxmltree::Node<'a, 'a>, name: &str) -> Option<roxmltree::Node<'a, 'a>> {
    node.children()
        .find(|n| n.tag_name().name() == name && n.tag_name().namespace() == Some(DML_NS))
}

fn pic<'a>(node: roxmltree::Node<'a, 'a>, name: &str) -> Option<roxmltree::Node<'a, 'a>> {
    node.children()
        .find(|n| n.tag_name().name() == name && n.tag_name().namespace() == Some(PIC_NS))
}

/// A run either carries drawing markup or it doesn't. Classified once per
/// run so that plain text runs cost a single child scan and no probing.
enum RunKind<'a> {
    Drawing(Vec<roxmltree::Node<'a, 'a>>),
    Plain,
}

fn classify<'a>(run_node: roxmltree::Node<'a, 'a>) -> RunKind<'a> {
    let drawings: Vec<_> = run_node
        .children()
        .filter(|n| n.tag_name().name() == "drawing" && n.tag_name().namespace() == Some(WML_NS))
        .collect();
    if drawings.is_empty() {
        RunKind::Plain
    } else {
        RunKind::Drawing(drawings)
    }
}

/// Every image reference detected in one run, in markup order.
///
/// Two probes run independently: the structured inline-shape descent and the
/// raw drawing-markup scan. Both can surface the same embed id for the same
/// physical image; callers coalesce per their dedup policy.
pub(super) fn locate_run_images(run_node: roxmltree::Node) -> Vec<ImageAnchor> {
    let RunKind::Drawing(drawings) = classify(run_node) else {
        return Vec::new();
    };

    let mut anchors = Vec::new();

    for drawing in &drawings {
        for inline in drawing.children().filter(|n| {
            n.tag_name().name() == "inline" && n.tag_name().namespace() == Some(WPD_NS)
        }) {
            if let Some(rel_id) = inline_shape_embed(inline) {
                anchors.push(ImageAnchor {
                    rel_id: rel_id.to_string(),
                    origin: AnchorOrigin::InlineShape,
                });
            }
        }
    }

    // If any drawing container exists, read every blip in the run. This
    // intentionally revisits inline pictures the first probe already found.
    let has_container = run_node.descendants().any(|n| {
        matches!(n.tag_name().name(), "inline" | "anchor")
            && n.tag_name().namespace() == Some(WPD_NS)
    });
    if has_container {
        for blip in run_node
            .descendants()
            .filter(|n| n.tag_name().name() == "blip" && n.tag_name().namespace() == Some(DML_NS))
        {
            if let Some(rel_id) = blip.attribute((REL_NS, "embed")) {
                anchors.push(ImageAnchor {
                    rel_id: rel_id.to_string(),
                    origin: AnchorOrigin::DrawingMarkup,
                });
            }
        }
    }

    anchors
}

/// Structured descent through the legacy inline-shape path:
/// wp:inline → a:graphic → a:graphicData → pic:pic → pic:blipFill → a:blip.
/// Any missing node means "no picture on this path", never an error.
fn inline_shape_embed<'a>(inline: roxmltree::Node<'a, 'a>) -> Option<&'a str> {
    let graphic = dml(inline, "graphic")?;
    let graphic_data = dml(graphic, "graphicData")?;
    if graphic_data.attribute("uri") != Some(PIC_NS) {
        return None;
    }
    let picture = pic(graphic_data, "pic")?;
    let blip_fill = pic(picture, "blipFill")?;
    let blip = dml(blip_fill, "blip")?;
    blip.attribute((REL_NS, "embed"))
}
