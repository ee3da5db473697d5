/// Tolerance for floating point inaccuracies in fit checks.
pub const EPSILON: f32 = 0.01;

pub struct BreakAnalysis {
    pub should_break: bool,
    pub remaining_height: f32,
}

/// Checks whether a band of `band_height` fits between `cursor_y` and
/// `bottom`, both absolute page coordinates.
pub fn check_band_fit(cursor_y: f32, band_height: f32, bottom: f32) -> BreakAnalysis {
    let available = (bottom - cursor_y).max(0.0);
    BreakAnalysis {
        should_break: band_height > available + EPSILON,
        remaining_height: available,
    }
}
