//! ACESclip decoder.
//!
//! Walks an element tree section by section, in the order the schema lays
//! them out:
//!
//! ```xml
//! <aces:ACESmetadata xmlns:aces="http://www.oscars.org/aces/ref/acesmetadata">
//!   <ContainerFormatVersion>1.0</ContainerFormatVersion>
//!   <aces:Info>...</aces:Info>
//!   <aces:ClipID>...</aces:ClipID>
//!   <aces:Config>
//!     <ACESrelease_Version>1.0</ACESrelease_Version>
//!     <aces:InputTransformList>...</aces:InputTransformList>
//!     <aces:PreviewTransformList>...</aces:PreviewTransformList>
//!   </aces:Config>
//! </aces:ACESmetadata>
//! ```
//!
//! The first section that fails ends the decode.
//!
//! # Example
//!
//! ```rust,no_run
//! use aces_clip::read_clip;
//! use std::path::Path;
//!
//! let clip = read_clip(Path::new("ACESclip.xml")).unwrap();
//! println!("IDT: {}", clip.idt);
//! for lmt in &clip.lmt {
//!     println!("LMT: {}", lmt);
//! }
//! ```

use crate::cdl::BitDepth;
use crate::descriptor::ClipDescriptor;
use crate::text::{parse_float, parse_leading_float, parse_vec3, reformat_clip_date};
use crate::transform::{TransformRef, TransformStatus};
use crate::xml::{XmlElement, parse_xml, read_xml};
use crate::{ClipError, ClipResult};
use std::io::BufRead;
use std::path::Path;
use tracing::{debug, trace};

/// Highest container format and ACES release version understood.
pub const SUPPORTED_VERSION: f32 = 1.0;

/// Reads and decodes a clip file.
pub fn read_clip(path: &Path) -> ClipResult<ClipDescriptor> {
    trace!(path = %path.display(), "reader::read_clip");
    let root = read_xml(path)?;
    decode(&root)
}

/// Parses and decodes clip XML from a reader.
pub fn parse_clip<R: BufRead>(reader: R) -> ClipResult<ClipDescriptor> {
    let root = parse_xml(reader)?;
    decode(&root)
}

/// Decodes a document element into a new descriptor.
pub fn decode(root: &XmlElement) -> ClipResult<ClipDescriptor> {
    let mut clip = ClipDescriptor::default();
    decode_into(root, &mut clip)?;
    Ok(clip)
}

/// Decodes a document element into `clip`.
///
/// On error, fields filled by the sections that already succeeded are left
/// in place.
pub fn decode_into(root: &XmlElement, clip: &mut ClipDescriptor) -> ClipResult<()> {
    let result = decode_sections(root, clip);
    if let Err(ref e) = result {
        debug!(error = %e, "clip decode stopped");
    }
    result
}

fn decode_sections(root: &XmlElement, clip: &mut ClipDescriptor) -> ClipResult<()> {
    let metadata = header(root)?;
    info(metadata, clip)?;
    clip_id(metadata, clip)?;
    let config = config(metadata, clip)?;
    input_transform_list(config, clip)?;
    preview_transform_list(config, clip)?;
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

fn check_version(element: &'static str, version: f32) -> ClipResult<()> {
    if version > SUPPORTED_VERSION {
        return Err(ClipError::UnsupportedVersion { element, version });
    }
    Ok(())
}

fn copy_text(node: &XmlElement, name: &str, out: &mut String) {
    if let Some(text) = node.child_text(name) {
        *out = text.to_string();
    }
}

/// Reads a `*ref` element: name (with the legacy `name` fallback), status
/// and optional `LinkTransform`.
fn transform_ref(elem: &XmlElement) -> TransformRef {
    let name = elem
        .attribute("TransformID")
        .or_else(|| elem.attribute("name"))
        .unwrap_or_default();
    let status = elem
        .attribute("status")
        .map(TransformStatus::from_attr)
        .unwrap_or_default();
    let link = elem.child_text("LinkTransform").unwrap_or_default();

    TransformRef {
        name: name.to_string(),
        link_transform: link.to_string(),
        status,
    }
}

fn workspace_conversion(grade: &XmlElement, name: &'static str) -> ClipResult<String> {
    grade
        .first_child(name)
        .and_then(|e| e.attribute("TransformID"))
        .map(str::to_string)
        .ok_or(ClipError::MissingSpaceConversion(name))
}

// ============================================================================
// Sections
// ============================================================================

fn header(root: &XmlElement) -> ClipResult<&XmlElement> {
    trace!("reader::header");
    if root.name != "aces:ACESmetadata" {
        return Err(ClipError::NotAnAcesFile);
    }

    let version = root
        .child_text("ContainerFormatVersion")
        .and_then(parse_leading_float)
        .ok_or(ClipError::ParseElement("ContainerFormatVersion"))?;
    check_version("ContainerFormatVersion", version)?;

    Ok(root)
}

fn info(metadata: &XmlElement, clip: &mut ClipDescriptor) -> ClipResult<()> {
    trace!("reader::info");
    let info = metadata.first_child("aces:Info").ok_or(ClipError::MissingInfo)?;

    if let Some(app) = info.first_child("Application") {
        if let Some(text) = app.text() {
            clip.application = text.to_string();
        }
        if let Some(version) = app.attribute("version") {
            clip.version = version.to_string();
        }
    }
    copy_text(info, "Comment", &mut clip.comment);

    Ok(())
}

fn clip_id(metadata: &XmlElement, clip: &mut ClipDescriptor) -> ClipResult<()> {
    trace!("reader::clip_id");
    let id = metadata.first_child("aces:ClipID").ok_or(ClipError::MissingClipId)?;

    copy_text(id, "ClipName", &mut clip.clip_name);
    copy_text(id, "Source_MediaID", &mut clip.media_id);
    if let Some(date) = id.child_text("ClipDate") {
        clip.clip_date = reformat_clip_date(date);
    }

    Ok(())
}

fn config<'a>(metadata: &'a XmlElement, clip: &mut ClipDescriptor) -> ClipResult<&'a XmlElement> {
    trace!("reader::config");
    let config = metadata.first_child("aces:Config").ok_or(ClipError::MissingConfig)?;

    // Dotted releases are gated on their leading number; an unreadable one
    // is not checked.
    if let Some(version) = config
        .child_text("ACESrelease_Version")
        .and_then(parse_leading_float)
    {
        check_version("ACESrelease_Version", version)?;
    }
    copy_text(config, "ClipDate", &mut clip.timestamp);

    Ok(config)
}

fn input_transform_list(config: &XmlElement, clip: &mut ClipDescriptor) -> ClipResult<()> {
    trace!("reader::input_transform_list");
    let itl = config
        .first_child_any(&["aces:InputTransformList", "InputTransformList"])
        .ok_or(ClipError::MissingInputTransformList)?;

    clip.idt = itl.first_child("aces:IDTref").map(transform_ref).unwrap_or_default();

    if let Some(grade) = itl.first_child("aces:GradeRef") {
        grade_ref(grade, clip)?;
    }

    copy_text(itl, "LinkInputTransformList", &mut clip.link_itl);
    Ok(())
}

fn grade_ref(grade: &XmlElement, clip: &mut ClipDescriptor) -> ClipResult<()> {
    trace!("reader::grade_ref");
    clip.grade_status = grade
        .attribute("status")
        .map(TransformStatus::from_attr)
        .unwrap_or_default();

    clip.convert_to = workspace_conversion(grade, "Convert_to_WorkSpace")?;

    if let Some(asc) = grade
        .first_child("ColorDecisionList")
        .and_then(|cdl| cdl.first_child("ASC_CDL"))
    {
        if let Some(depth) = asc.attribute("inBitDepth") {
            clip.in_bit_depth = BitDepth::from_attr(depth);
        }
        if let Some(depth) = asc.attribute("outBitDepth") {
            clip.out_bit_depth = BitDepth::from_attr(depth);
        }

        if let Some(sop) = asc.first_child("SOPNode") {
            if let Some(text) = sop.child_text("Slope") {
                clip.cdl.slope = parse_vec3(text);
            }
            if let Some(text) = sop.child_text("Offset") {
                clip.cdl.offset = parse_vec3(text);
            }
            if let Some(text) = sop.child_text("Power") {
                clip.cdl.power = parse_vec3(text);
            }
        }

        if let Some(sat) = asc
            .first_child("SatNode")
            .and_then(|node| node.child_text("Saturation"))
            .and_then(parse_float)
        {
            clip.cdl.saturation = sat;
        }
    }

    clip.convert_from = workspace_conversion(grade, "Convert_from_WorkSpace")?;
    Ok(())
}

fn preview_transform_list(config: &XmlElement, clip: &mut ClipDescriptor) -> ClipResult<()> {
    trace!("reader::preview_transform_list");
    let ptl = config
        .first_child_any(&["aces:PreviewTransformList", "PreviewTransformList"])
        .ok_or(ClipError::MissingPreviewTransformList)?;

    clip.lmt.extend(ptl.children_named("aces:LMTref").map(transform_ref));

    // A combined RRTODT wins over the separate pair.
    match ptl.first_child("aces:RRTODTref") {
        Some(combined) => clip.rrtodt = transform_ref(combined),
        None => {
            clip.rrt = ptl.first_child("aces:RRTref").map(transform_ref).unwrap_or_default();
            clip.odt = ptl.first_child("aces:ODTref").map(transform_ref).unwrap_or_default();
        }
    }

    copy_text(ptl, "LinkPreviewTransformList", &mut clip.link_ptl);
    Ok(())
}
