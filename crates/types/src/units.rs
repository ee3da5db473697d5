//! Physical units. Every length inside the engine is stored in PDF points
//! (1/72 inch); these helpers convert from the units report authors think in.

pub const POINTS_PER_INCH: f32 = 72.0;
pub const POINTS_PER_CM: f32 = POINTS_PER_INCH / 2.54;
pub const POINTS_PER_MM: f32 = POINTS_PER_CM / 10.0;

/// Centimeters to points.
pub fn cm(value: f32) -> f32 {
    value * POINTS_PER_CM
}

/// Millimeters to points.
pub fn mm(value: f32) -> f32 {
    value * POINTS_PER_MM
}

/// Inches to points.
pub fn inch(value: f32) -> f32 {
    value * POINTS_PER_INCH
}

/// Points to centimeters.
pub fn to_cm(points: f32) -> f32 {
    points / POINTS_PER_CM
}
