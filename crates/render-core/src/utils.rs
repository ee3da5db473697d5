use folio_style::TextAlign;
use folio_types::Rect;

/// Horizontal offset of content `content_width` wide inside `rect` for the
/// given alignment. Content wider than the rect starts at its left edge.
pub fn aligned_x(alignment: TextAlign, content_width: f32, rect: &Rect) -> f32 {
    let slack = (rect.width - content_width).max(0.0);
    match alignment {
        TextAlign::Left | TextAlign::Justify => rect.x,
        TextAlign::Right => rect.x + slack,
        TextAlign::Center => rect.x + slack / 2.0,
    }
}
