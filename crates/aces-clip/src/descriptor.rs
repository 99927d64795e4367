//! The decoded clip descriptor.

use crate::cdl::{AscCdl, BitDepth};
use crate::transform::{TransformRef, TransformStatus};

/// Everything an ACESclip file says about one clip.
///
/// String fields are empty when the file does not carry them. Exactly one
/// of [`rrtodt`](Self::rrtodt) or the [`rrt`](Self::rrt)/[`odt`](Self::odt)
/// pair is filled by a decode, depending on which elements the file uses.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClipDescriptor {
    // aces:Info
    /// Application that wrote the file.
    pub application: String,
    /// Version of that application.
    pub version: String,
    /// Free-form comment.
    pub comment: String,

    // aces:ClipID
    /// Clip (image) name.
    pub clip_name: String,
    /// Source media id (show, shot, take...).
    pub media_id: String,
    /// Clip date, as `DATE Time: TIME`.
    pub clip_date: String,

    // aces:Config
    /// Creation time of the metadata, verbatim.
    pub timestamp: String,

    // aces:GradeRef
    /// Working space the grade is applied in.
    pub convert_to: String,
    /// Space converted back to after grading.
    pub convert_from: String,
    /// Grade input bit depth.
    pub in_bit_depth: BitDepth,
    /// Grade output bit depth.
    pub out_bit_depth: BitDepth,
    /// Status of the grade.
    pub grade_status: TransformStatus,
    /// Grade values, neutral when the file has none.
    pub cdl: AscCdl,

    /// Input device transform.
    pub idt: TransformRef,
    /// Look modification transforms, in document order.
    pub lmt: Vec<TransformRef>,
    /// Combined reference rendering + output transform.
    pub rrtodt: TransformRef,
    /// Reference rendering transform.
    pub rrt: TransformRef,
    /// Output device transform.
    pub odt: TransformRef,
    /// Link to an externally stored input transform list.
    pub link_itl: String,
    /// Link to an externally stored preview transform list.
    pub link_ptl: String,
}

/// Which rendering/output representation a descriptor carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewOutput<'a> {
    /// A single combined RRT+ODT.
    Combined(&'a TransformRef),
    /// Separate RRT and ODT.
    Separate {
        /// Reference rendering transform.
        rrt: &'a TransformRef,
        /// Output device transform.
        odt: &'a TransformRef,
    },
}

impl ClipDescriptor {
    /// Creates an empty descriptor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the populated rendering/output branch.
    pub fn preview_output(&self) -> PreviewOutput<'_> {
        if self.rrtodt.is_empty() {
            PreviewOutput::Separate { rrt: &self.rrt, odt: &self.odt }
        } else {
            PreviewOutput::Combined(&self.rrtodt)
        }
    }

    /// True when the file carried a grade reference.
    pub fn has_grade(&self) -> bool {
        !self.convert_to.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_descriptor() {
        let clip = ClipDescriptor::new();
        assert!(clip.application.is_empty());
        assert!(clip.lmt.is_empty());
        assert!(clip.cdl.is_identity());
        assert_eq!(clip.in_bit_depth, BitDepth::Unknown);
        assert!(!clip.has_grade());
    }

    #[test]
    fn preview_output_branch() {
        let mut clip = ClipDescriptor::new();
        clip.rrt = TransformRef::new("RRT", TransformStatus::Preview);
        clip.odt = TransformRef::new("ODT.Academy.sRGB_100nits_dim", TransformStatus::Preview);
        assert!(matches!(
            clip.preview_output(),
            PreviewOutput::Separate { rrt, .. } if rrt.name == "RRT"
        ));

        clip.rrtodt =
            TransformRef::new("RRTODT.Academy.Rec709_100nits_dim", TransformStatus::Applied);
        assert!(matches!(
            clip.preview_output(),
            PreviewOutput::Combined(t) if t.status == TransformStatus::Applied
        ));
    }
}
