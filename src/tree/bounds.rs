use crate::tree::tree_model::Rect;

/// Parse a uiautomator bounds attribute of the form `[x1,y1][x2,y2]`.
///
/// Anything else (including inverted corners) yields `None`. Missing bounds
/// are common in real dumps and are not an error.
pub fn parse_bounds(raw: &str) -> Option<Rect> {
    let rest = raw.strip_prefix('[')?;
    let (first, rest) = rest.split_once("][")?;
    let second = rest.strip_suffix(']')?;

    let (x1, y1) = parse_pair(first)?;
    let (x2, y2) = parse_pair(second)?;

    if x2 < x1 || y2 < y1 {
        return None;
    }

    Some(Rect::new(x1, y1, x2 - x1, y2 - y1))
}

/// Format a rectangle back into the uiautomator bounds encoding.
pub fn format_bounds(rect: &Rect) -> String {
    format!("[{},{}][{},{}]", rect.x, rect.y, rect.right(), rect.bottom())
}

fn parse_pair(raw: &str) -> Option<(i64, i64)> {
    let (a, b) = raw.split_once(',')?;
    Some((parse_coordinate(a)?, parse_coordinate(b)?))
}

fn parse_coordinate(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}
