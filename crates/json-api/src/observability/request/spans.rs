//! Route labels for spans and metrics.

use uuid::Uuid;

/// Collapse UUID path segments to `{uuid}` so every book, order or user maps
/// to a single route label.
pub(super) fn route_label(path: &str) -> String {
    let segments: Vec<&str> = path
        .trim_start_matches('/')
        .split('/')
        .map(|segment| {
            if Uuid::parse_str(segment).is_ok() {
                "{uuid}"
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}
