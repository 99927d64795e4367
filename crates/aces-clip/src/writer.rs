//! ACESclip encoder.
//!
//! [`ClipWriter`] appends sections in the order the schema requires. Calls
//! are expected in this order:
//!
//! 1. [`info`](ClipWriter::info)
//! 2. [`clip_id`](ClipWriter::clip_id)
//! 3. [`config`](ClipWriter::config)
//! 4. [`itl_start`](ClipWriter::itl_start), [`add_idt`](ClipWriter::add_idt),
//!    optionally [`grade_ref`](ClipWriter::grade_ref), then
//!    [`itl_end`](ClipWriter::itl_end)
//! 5. [`ptl_start`](ClipWriter::ptl_start), any number of
//!    [`add_lmt`](ClipWriter::add_lmt), then either
//!    [`add_rrt`](ClipWriter::add_rrt) + [`add_odt`](ClipWriter::add_odt) or
//!    [`add_rrtodt`](ClipWriter::add_rrtodt), then
//!    [`ptl_end`](ClipWriter::ptl_end)
//!
//! The order is not checked: calls made out of order still produce
//! well-formed XML, just not a meaningful clip file.
//!
//! # Example
//!
//! ```rust,no_run
//! use aces_clip::{ClipWriter, TransformRef, TransformStatus};
//! use aces_clip::writer::{ITL_LINK_DEFAULT, PTL_LINK_DEFAULT};
//! use chrono::Utc;
//! use std::path::Path;
//!
//! let now = Utc::now();
//! let mut w = ClipWriter::new();
//! w.info_default()
//!     .clip_id("A001C003", "show,shot010,take3", &now)
//!     .config(&now)
//!     .itl_start()
//!     .add_idt(&TransformRef::new("IDT.ARRI.Alexa-v3-logC-EI800", TransformStatus::Applied))
//!     .itl_end(ITL_LINK_DEFAULT)
//!     .ptl_start()
//!     .add_rrt(&TransformRef::new("RRT", TransformStatus::Preview))
//!     .add_odt(&TransformRef::new("ODT.Academy.Rec709_100nits_dim", TransformStatus::Preview))
//!     .ptl_end(PTL_LINK_DEFAULT);
//! w.save(Path::new("ACESclip.xml")).unwrap();
//! ```

use crate::cdl::{AscCdl, BitDepth};
use crate::text::format_clip_date;
use crate::transform::{TransformRef, TransformStatus};
use crate::xml::{XmlElement, write_xml_to};
use crate::{ClipError, ClipResult};
use chrono::{DateTime, Utc};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, trace};

/// Application name written by [`ClipWriter::info_default`].
pub const LIB_NAME: &str = "ACESclipLib";

/// Library version written by [`ClipWriter::info_default`].
pub const LIB_VERSION: &str = "0.1";

/// Conventional id of a combined input transform list.
pub const ITL_LINK_DEFAULT: &str = "inputTransformID";

/// Conventional id of a combined LMT + RRT + ODT list.
pub const PTL_LINK_DEFAULT: &str = "CombinedLMT_RRT_ODT";

/// Namespace bound to the `aces:` prefix.
pub const ACES_NAMESPACE: &str = "http://www.oscars.org/aces/ref/acesmetadata";

const FORMAT_VERSION: &str = "1.0";
const RELEASE_VERSION: &str = "1.0";

/// Grade applied in a working space, written as `aces:GradeRef`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GradeRef {
    /// Working space the grade is applied in.
    pub convert_to: String,
    /// Space converted back to after grading.
    pub convert_from: String,
    /// Grade input bit depth, omitted when unknown.
    pub in_bit_depth: BitDepth,
    /// Grade output bit depth, omitted when unknown.
    pub out_bit_depth: BitDepth,
    /// Grade values.
    pub cdl: AscCdl,
    /// Preview or applied.
    pub status: TransformStatus,
}

/// Builds an ACESclip document.
///
/// Elements opened by [`config`](Self::config) and the list `*_start` calls
/// stay open until the matching `*_end` call; anything still open is closed
/// when the document is written.
#[derive(Debug, Clone)]
pub struct ClipWriter {
    /// Open elements, document element first.
    open: Vec<XmlElement>,
}

impl Default for ClipWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn vec3_text(v: &[f32; 3]) -> String {
    format!("{} {} {}", v[0], v[1], v[2])
}

fn transform_element(name: &str, t: &TransformRef) -> XmlElement {
    let mut elem = XmlElement::new(name)
        .with_attribute("TransformID", t.name.as_str())
        .with_attribute("status", t.status.as_str());
    if !t.link_transform.is_empty() {
        elem.push(XmlElement::new("LinkTransform").with_text(t.link_transform.as_str()));
    }
    elem
}

impl ClipWriter {
    /// Starts a document with its container format version.
    pub fn new() -> Self {
        let mut root =
            XmlElement::new("aces:ACESmetadata").with_attribute("xmlns:aces", ACES_NAMESPACE);
        root.push(XmlElement::new("ContainerFormatVersion").with_text(FORMAT_VERSION));
        Self { open: vec![root] }
    }

    fn append(&mut self, elem: XmlElement) {
        if let Some(top) = self.open.last_mut() {
            top.push(elem);
        }
    }

    fn open(&mut self, elem: XmlElement) {
        self.open.push(elem);
    }

    fn close(&mut self) {
        // The document element is only closed when writing.
        if self.open.len() > 1 {
            if let Some(elem) = self.open.pop() {
                self.append(elem);
            }
        }
    }

    /// `aces:Info` section.
    pub fn info(&mut self, application: &str, version: &str, comment: &str) -> &mut Self {
        trace!(application, version, "writer::info");
        let mut info = XmlElement::new("aces:Info");
        info.push(
            XmlElement::new("Application")
                .with_attribute("version", version)
                .with_text(application),
        );
        if !comment.is_empty() {
            info.push(XmlElement::new("Comment").with_text(comment));
        }
        self.append(info);
        self
    }

    /// `aces:Info` naming this library as the writer.
    pub fn info_default(&mut self) -> &mut Self {
        self.info(LIB_NAME, LIB_VERSION, "")
    }

    /// `aces:ClipID` section.
    pub fn clip_id(
        &mut self,
        clip_name: &str,
        media_id: &str,
        clip_date: &DateTime<Utc>,
    ) -> &mut Self {
        trace!(clip_name, media_id, "writer::clip_id");
        let mut id = XmlElement::new("aces:ClipID");
        id.push(XmlElement::new("ClipName").with_text(clip_name));
        id.push(XmlElement::new("Source_MediaID").with_text(media_id));
        id.push(XmlElement::new("ClipDate").with_text(format_clip_date(clip_date)));
        self.append(id);
        self
    }

    /// Opens `aces:Config`, stamped with the metadata creation time.
    pub fn config(&mut self, xml_date: &DateTime<Utc>) -> &mut Self {
        trace!("writer::config");
        let mut config = XmlElement::new("aces:Config");
        config.push(XmlElement::new("ACESrelease_Version").with_text(RELEASE_VERSION));
        config.push(XmlElement::new("ClipDate").with_text(format_clip_date(xml_date)));
        self.open(config);
        self
    }

    /// Opens the input transform list.
    pub fn itl_start(&mut self) -> &mut Self {
        trace!("writer::itl_start");
        self.open(XmlElement::new("aces:InputTransformList"));
        self
    }

    /// Adds the input device transform.
    pub fn add_idt(&mut self, idt: &TransformRef) -> &mut Self {
        trace!(name = %idt.name, "writer::add_idt");
        self.append(transform_element("aces:IDTref", idt));
        self
    }

    /// Adds the grade reference.
    pub fn grade_ref(&mut self, grade: &GradeRef) -> &mut Self {
        trace!(to = %grade.convert_to, from = %grade.convert_from, "writer::grade_ref");
        let mut node =
            XmlElement::new("aces:GradeRef").with_attribute("status", grade.status.as_str());
        node.push(
            XmlElement::new("Convert_to_WorkSpace")
                .with_attribute("TransformID", grade.convert_to.as_str()),
        );

        let mut asc = XmlElement::new("ASC_CDL");
        if let Some(depth) = grade.in_bit_depth.as_str() {
            asc = asc.with_attribute("inBitDepth", depth);
        }
        if let Some(depth) = grade.out_bit_depth.as_str() {
            asc = asc.with_attribute("outBitDepth", depth);
        }
        let mut sop = XmlElement::new("SOPNode");
        sop.push(XmlElement::new("Slope").with_text(vec3_text(&grade.cdl.slope)));
        sop.push(XmlElement::new("Offset").with_text(vec3_text(&grade.cdl.offset)));
        sop.push(XmlElement::new("Power").with_text(vec3_text(&grade.cdl.power)));
        asc.push(sop);
        let mut sat = XmlElement::new("SatNode");
        sat.push(XmlElement::new("Saturation").with_text(grade.cdl.saturation.to_string()));
        asc.push(sat);

        let mut list = XmlElement::new("ColorDecisionList");
        list.push(asc);
        node.push(list);

        node.push(
            XmlElement::new("Convert_from_WorkSpace")
                .with_attribute("TransformID", grade.convert_from.as_str()),
        );
        self.append(node);
        self
    }

    /// Closes the input transform list, linking it to a combined list id
    /// (see [`ITL_LINK_DEFAULT`]). An empty id writes no link.
    pub fn itl_end(&mut self, link: &str) -> &mut Self {
        trace!(link, "writer::itl_end");
        if !link.is_empty() {
            self.append(XmlElement::new("LinkInputTransformList").with_text(link));
        }
        self.close();
        self
    }

    /// Opens the preview transform list.
    pub fn ptl_start(&mut self) -> &mut Self {
        trace!("writer::ptl_start");
        self.open(XmlElement::new("aces:PreviewTransformList"));
        self
    }

    /// Appends a look modification transform. May be called repeatedly.
    pub fn add_lmt(&mut self, lmt: &TransformRef) -> &mut Self {
        trace!(name = %lmt.name, "writer::add_lmt");
        self.append(transform_element("aces:LMTref", lmt));
        self
    }

    /// Adds the reference rendering transform.
    pub fn add_rrt(&mut self, rrt: &TransformRef) -> &mut Self {
        trace!(name = %rrt.name, "writer::add_rrt");
        self.append(transform_element("aces:RRTref", rrt));
        self
    }

    /// Adds the output device transform.
    pub fn add_odt(&mut self, odt: &TransformRef) -> &mut Self {
        trace!(name = %odt.name, "writer::add_odt");
        self.append(transform_element("aces:ODTref", odt));
        self
    }

    /// Adds a combined RRT + ODT, used instead of the separate pair.
    pub fn add_rrtodt(&mut self, rrtodt: &TransformRef) -> &mut Self {
        trace!(name = %rrtodt.name, "writer::add_rrtodt");
        self.append(transform_element("aces:RRTODTref", rrtodt));
        self
    }

    /// Closes the preview transform list, linking it to a combined list id
    /// (see [`PTL_LINK_DEFAULT`]). An empty id writes no link.
    pub fn ptl_end(&mut self, link: &str) -> &mut Self {
        trace!(link, "writer::ptl_end");
        if !link.is_empty() {
            self.append(XmlElement::new("LinkPreviewTransformList").with_text(link));
        }
        self.close();
        self
    }

    /// Consumes the writer, closing open elements, and returns the tree.
    pub fn into_element(mut self) -> XmlElement {
        while self.open.len() > 1 {
            self.close();
        }
        self.open.pop().unwrap_or_default()
    }

    /// Writes the document to any writer.
    pub fn write_to<W: Write>(&self, writer: W) -> ClipResult<()> {
        let root = self.clone().into_element();
        write_xml_to(writer, &root)
    }

    /// Saves the document to a file.
    pub fn save(&self, path: &Path) -> ClipResult<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer.flush().map_err(ClipError::Io)?;
        debug!(path = %path.display(), "saved clip metadata");
        Ok(())
    }
}
