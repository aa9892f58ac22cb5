/// The paragraph/run model built from word/document.xml. Read-only once
/// parsed; the extraction walk never mutates it.
#[derive(Debug)]
pub struct Document {
    pub paragraphs: Vec<Paragraph>,
}

#[derive(Debug)]
pub struct Paragraph {
    pub runs: Vec<Run>,
}

impl Paragraph {
    /// Concatenation of run texts, in run order.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Every image anchor detected in this paragraph, in run order.
    /// Duplicate detections of one embed are NOT coalesced here; that is
    /// the walker's job, governed by the profile's dedup policy.
    pub fn image_anchors(&self) -> impl Iterator<Item = &ImageAnchor> {
        self.runs.iter().flat_map(|r| r.anchors.iter())
    }
}

#[derive(Debug)]
pub struct Run {
    pub text: String,
    pub anchors: Vec<ImageAnchor>,
}

/// A relationship id pointing at an image part, tagged with the probe
/// that surfaced it.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageAnchor {
    pub rel_id: String,
    pub origin: AnchorOrigin,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnchorOrigin {
    /// Structured descent through wp:inline → a:graphic → pic:pic → a:blip.
    InlineShape,
    /// Raw scan of a:blip elements under wp:inline or wp:anchor markup.
    DrawingMarkup,
}
