use crate::shared::rect::Rect;

/// Whether a merged text patch lies inside a vehicle's bounding box.
///
/// The patch must start inside the container and fit within the extent
/// remaining from the patch's own origin. Note this is not symmetric
/// corner containment: a patch whose origin precedes the container is
/// rejected even when it overlaps the container. Downstream behavior has
/// been tuned against this exact inequality set, so it is kept as is.
pub fn is_inside(patch: &Rect, container: &Rect) -> bool {
    patch.y >= container.y
        && patch.x >= container.x
        && patch.y <= container.y + container.height
        && patch.x <= container.x + container.width
        && patch.width <= container.width + container.x - patch.x
        && patch.height <= container.height + container.y - patch.y
}
