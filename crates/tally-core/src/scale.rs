//! Scale-to-fit math for previewing a fixed-size page in a variable-width
//! container.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::page::PageSize;

/// Widths observed once layout has settled, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Measurement {
    pub container_width: f32,
    pub intrinsic_width: f32,
    pub intrinsic_height: f32,
}

impl Measurement {
    /// Measurement of a page of `size` laid out at its authored size.
    pub fn for_page(container_width: f32, size: PageSize) -> Self {
        Self {
            container_width,
            intrinsic_width: size.width_px(),
            intrinsic_height: size.height_px(),
        }
    }
}

/// `min(1, container / intrinsic)`, or `None` when either width cannot be
/// used yet (not laid out, zero, negative or non-finite).
pub fn fit_scale(container_width: f32, intrinsic_width: f32) -> Option<f32> {
    if !intrinsic_width.is_finite() || intrinsic_width <= 0.0 {
        return None;
    }
    if !container_width.is_finite() || container_width <= 0.0 {
        return None;
    }
    let scale = (container_width / intrinsic_width).min(1.0);
    // Subnormal widths can underflow to zero.
    (scale > 0.0).then_some(scale)
}

/// Display scale of the preview. Never enlarges; pinned to 1 with fit off.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleToFit {
    fit: bool,
    scale: f32,
    last: Option<Measurement>,
}

impl ScaleToFit {
    pub fn new(fit: bool) -> Self {
        Self {
            fit,
            scale: 1.0,
            last: None,
        }
    }

    pub fn fit(&self) -> bool {
        self.fit
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn last_measurement(&self) -> Option<Measurement> {
        self.last
    }

    /// Record a measurement and recompute. An unusable measurement leaves
    /// the previous scale in place.
    pub fn measure(&mut self, measurement: Measurement) -> f32 {
        if fit_scale(measurement.container_width, measurement.intrinsic_width).is_some() {
            self.last = Some(measurement);
        }
        self.refresh()
    }

    pub fn set_fit(&mut self, fit: bool) -> f32 {
        self.fit = fit;
        self.refresh()
    }

    pub fn toggle_fit(&mut self) -> f32 {
        self.set_fit(!self.fit)
    }

    /// Recompute from the last usable measurement.
    pub fn refresh(&mut self) -> f32 {
        if !self.fit {
            self.scale = 1.0;
        } else if let Some(m) = self.last
            && let Some(scale) = fit_scale(m.container_width, m.intrinsic_width)
        {
            self.scale = scale;
        }
        self.scale
    }

    /// Height of the spacer that keeps surrounding layout in step with the
    /// scaled page. Only present in fit mode once measured.
    pub fn spacer_height(&self) -> Option<f32> {
        if !self.fit {
            return None;
        }
        self.last.map(|m| m.intrinsic_height * self.scale)
    }
}

impl Default for ScaleToFit {
    fn default() -> Self {
        Self::new(true)
    }
}
