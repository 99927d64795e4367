//! Transform references.
//!
//! Every stage of the ACES viewing pipeline (IDT, LMT, RRT, ODT, or the
//! combined RRTODT) is referenced in a clip file by name together with a
//! status saying whether it was baked into the pixels or is only a preview.

use std::fmt;

/// Whether a transform has been applied to the image data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransformStatus {
    /// Transform is only used for viewing.
    #[default]
    Preview,
    /// Transform has been baked into the image.
    Applied,
}

impl TransformStatus {
    /// Maps a `status` attribute value to a status.
    ///
    /// Only `"applied"` is recognized; every other value is `Preview`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use aces_clip::TransformStatus;
    ///
    /// assert_eq!(TransformStatus::from_attr("applied"), TransformStatus::Applied);
    /// assert_eq!(TransformStatus::from_attr("Applied"), TransformStatus::Preview);
    /// ```
    pub fn from_attr(s: &str) -> Self {
        match s {
            "applied" => TransformStatus::Applied,
            _ => TransformStatus::Preview,
        }
    }

    /// Returns the `status` attribute string.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransformStatus::Preview => "preview",
            TransformStatus::Applied => "applied",
        }
    }
}

impl fmt::Display for TransformStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named color transform and its status.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransformRef {
    /// Transform identifier (e.g. `IDT.ARRI.Alexa-v3-logC-EI800`).
    pub name: String,
    /// Linked combined transform, empty when absent.
    pub link_transform: String,
    /// Preview or applied.
    pub status: TransformStatus,
}

impl TransformRef {
    /// Creates a transform reference without a link.
    pub fn new(name: impl Into<String>, status: TransformStatus) -> Self {
        Self { name: name.into(), link_transform: String::new(), status }
    }

    /// Sets the linked transform.
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link_transform = link.into();
        self
    }

    /// True when no transform is named.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }
}

impl fmt::Display for TransformRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.status)?;
        if !self.link_transform.is_empty() {
            write!(f, " -> {}", self.link_transform)?;
        }
        Ok(())
    }
}
