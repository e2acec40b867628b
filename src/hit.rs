#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::bounds::bounds;
use crate::consts::HIT_PADDING;
use crate::doc::{AnnotationId, DocStore};
use crate::geom::Point;

/// Topmost annotation whose padded bounds contain `pt`.
///
/// Walks the store from the last (topmost) entry down, so newer annotations
/// win where they overlap older ones.
#[must_use]
pub fn hit_test(pt: Point, doc: &DocStore) -> Option<AnnotationId> {
    doc.iter()
        .rev()
        .find(|a| bounds(&a.shape).inflate(HIT_PADDING).contains(pt))
        .map(|a| a.id)
}
