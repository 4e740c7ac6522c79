//! Tracker configuration types
//!
//! This module defines the few knobs the visualization tracker needs.
//! Everything about layout and scaling belongs to the host HUD framework.

use crate::types::{HudError, Result};
use serde::{Deserialize, Serialize};

/// Configuration for the visualization tracker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Number of working-width segments on the display
    #[serde(default = "default_segment_count")]
    pub segment_count: usize,

    /// Segments highlighted on each side of the center while tram lines are active
    #[serde(default = "default_tram_line_span")]
    pub tram_line_span: usize,

    /// Maximum number of attacher hops searched for ridge markers
    #[serde(default = "default_max_attachment_depth")]
    pub max_attachment_depth: usize,
}

fn default_segment_count() -> usize {
    20
}

fn default_tram_line_span() -> usize {
    2
}

fn default_max_attachment_depth() -> usize {
    4
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            segment_count: default_segment_count(),
            tram_line_span: default_tram_line_span(),
            max_attachment_depth: default_max_attachment_depth(),
        }
    }
}

impl TrackerConfig {
    /// Create a new tracker configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the number of display segments
    pub fn with_segment_count(mut self, count: usize) -> Self {
        self.segment_count = count;
        self
    }

    /// Builder method: set the tram line span on each side of the center
    pub fn with_tram_line_span(mut self, span: usize) -> Self {
        self.tram_line_span = span;
        self
    }

    /// Builder method: set how far up the attachment chain to look
    pub fn with_max_attachment_depth(mut self, depth: usize) -> Self {
        self.max_attachment_depth = depth;
        self
    }

    /// Check that the configuration describes a drawable segment bar
    ///
    /// The bar must split into two equal halves, and the tram line
    /// highlight must fit inside it on both sides of the center.
    pub fn validate(&self) -> Result<()> {
        if self.segment_count < 6 || self.segment_count % 2 != 0 {
            return Err(HudError::InvalidSegmentCount(self.segment_count));
        }

        let center = self.segment_count / 2;
        if self.tram_line_span == 0 || self.tram_line_span >= center {
            return Err(HudError::InvalidTramLineSpan {
                span: self.tram_line_span,
                segments: self.segment_count,
            });
        }

        if self.max_attachment_depth == 0 {
            return Err(HudError::InvalidAttachmentDepth(self.max_attachment_depth));
        }

        Ok(())
    }
}
