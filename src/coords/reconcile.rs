use crate::tree::tree_model::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    /// Portrait when strictly taller than wide; squares count as landscape.
    pub fn of(width: i64, height: i64) -> Self {
        if height > width {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }
}

/// Reproject `bounds` from the dump frame onto the screenshot frame.
///
/// When both frames have the same orientation the input is returned as is.
/// Otherwise the rectangle is taken as fractions of the dump frame and
/// rescaled to the image size. This is a heuristic for a device that rotated
/// between the two captures, not an exact rotation transform.
pub fn reconcile(
    bounds: Rect,
    dump_width: i64,
    dump_height: i64,
    image_width: i64,
    image_height: i64,
) -> Rect {
    if Orientation::of(dump_width, dump_height) == Orientation::of(image_width, image_height) {
        return bounds;
    }
    if dump_width <= 0 || dump_height <= 0 {
        return bounds;
    }

    let sx = image_width as f64 / dump_width as f64;
    let sy = image_height as f64 / dump_height as f64;

    Rect::new(
        (bounds.x as f64 * sx).round() as i64,
        (bounds.y as f64 * sy).round() as i64,
        (bounds.w as f64 * sx).round() as i64,
        (bounds.h as f64 * sy).round() as i64,
    )
}

/// Map a pointer position on a displayed (scaled) screenshot to natural
/// image pixels.
pub fn to_natural_point(
    x: f64,
    y: f64,
    displayed_width: f64,
    displayed_height: f64,
    natural_width: i64,
    natural_height: i64,
) -> (i64, i64) {
    if displayed_width <= 0.0 || displayed_height <= 0.0 {
        return (x.round() as i64, y.round() as i64);
    }
    (
        (x * natural_width as f64 / displayed_width).round() as i64,
        (y * natural_height as f64 / displayed_height).round() as i64,
    )
}
