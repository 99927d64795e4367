//! ASC CDL grade values carried by `aces:GradeRef`.
//!
//! # File Structure
//!
//! ```xml
//! <ColorDecisionList>
//!   <ASC_CDL inBitDepth="16f" outBitDepth="16f">
//!     <SOPNode>
//!       <Slope>1.0 1.0 1.0</Slope>
//!       <Offset>0.0 0.0 0.0</Offset>
//!       <Power>1.0 1.0 1.0</Power>
//!     </SOPNode>
//!     <SatNode>
//!       <Saturation>1.0</Saturation>
//!     </SatNode>
//!   </ASC_CDL>
//! </ColorDecisionList>
//! ```

/// Bit depth of the grade's input or output.
///
/// Unrecognized attribute strings map to [`BitDepth::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BitDepth {
    /// 10-bit integer.
    Int10,
    /// 12-bit integer.
    Int12,
    /// 16-bit integer.
    Int16,
    /// 16-bit half float.
    Float16,
    /// 32-bit float.
    Float32,
    /// Absent or unrecognized.
    #[default]
    Unknown,
}

impl BitDepth {
    /// Parses an `inBitDepth`/`outBitDepth` attribute.
    ///
    /// # Example
    ///
    /// ```rust
    /// use aces_clip::BitDepth;
    ///
    /// assert_eq!(BitDepth::from_attr("16f"), BitDepth::Float16);
    /// assert_eq!(BitDepth::from_attr("8i"), BitDepth::Unknown);
    /// ```
    pub fn from_attr(s: &str) -> Self {
        match s {
            "10i" => BitDepth::Int10,
            "12i" => BitDepth::Int12,
            "16i" => BitDepth::Int16,
            "16f" => BitDepth::Float16,
            "32f" => BitDepth::Float32,
            _ => BitDepth::Unknown,
        }
    }

    /// Returns the attribute string, `None` for [`BitDepth::Unknown`].
    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            BitDepth::Int10 => Some("10i"),
            BitDepth::Int12 => Some("12i"),
            BitDepth::Int16 => Some("16i"),
            BitDepth::Float16 => Some("16f"),
            BitDepth::Float32 => Some("32f"),
            BitDepth::Unknown => None,
        }
    }
}

/// ASC CDL slope/offset/power and saturation.
///
/// ```text
/// out = (in * slope + offset) ^ power
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AscCdl {
    /// Slope (multiply) per channel [R, G, B].
    pub slope: [f32; 3],
    /// Offset (add) per channel [R, G, B].
    pub offset: [f32; 3],
    /// Power (gamma) per channel [R, G, B].
    pub power: [f32; 3],
    /// Saturation adjustment (1.0 = no change).
    pub saturation: f32,
}

impl Default for AscCdl {
    fn default() -> Self {
        Self {
            slope: [1.0, 1.0, 1.0],
            offset: [0.0, 0.0, 0.0],
            power: [1.0, 1.0, 1.0],
            saturation: 1.0,
        }
    }
}

impl AscCdl {
    /// Creates a CDL with given SOP values and neutral saturation.
    pub fn new(slope: [f32; 3], offset: [f32; 3], power: [f32; 3]) -> Self {
        Self { slope, offset, power, ..Default::default() }
    }

    /// Sets saturation.
    pub fn with_saturation(mut self, saturation: f32) -> Self {
        self.saturation = saturation;
        self
    }

    /// True when every value is neutral.
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }
}
