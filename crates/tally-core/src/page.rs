use serde::{Deserialize, Serialize};

pub const MM_PER_INCH: f32 = 25.4;
pub const PT_PER_INCH: f32 = 72.0;
/// CSS reference pixel density.
pub const CSS_PX_PER_INCH: f32 = 96.0;

/// Physical page size in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width_mm: f32,
    pub height_mm: f32,
}

impl PageSize {
    pub const A4: Self = Self {
        width_mm: 210.0,
        height_mm: 297.0,
    };

    pub fn width_px(&self) -> f32 {
        mm_to_px(self.width_mm)
    }

    pub fn height_px(&self) -> f32 {
        mm_to_px(self.height_mm)
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::A4
    }
}

pub fn mm_to_px(mm: f32) -> f32 {
    mm / MM_PER_INCH * CSS_PX_PER_INCH
}

pub fn px_to_mm(px: f32) -> f32 {
    px / CSS_PX_PER_INCH * MM_PER_INCH
}

pub fn pt_to_mm(pt: f32) -> f32 {
    pt / PT_PER_INCH * MM_PER_INCH
}
