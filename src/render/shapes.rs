//! Polygon to triangle conversion

use glam::Vec2;

use super::vertex::Vertex;

/// Fan-triangulate a convex polygon around its first vertex.
///
/// Returns `3 * (n - 2)` vertices; fewer than three points is a caller bug.
pub fn triangle_fan(points: &[Vec2], color: [f32; 4]) -> Vec<Vertex> {
    assert!(
        points.len() >= 3,
        "polygon needs at least 3 vertices, got {}",
        points.len()
    );

    let mut vertices = Vec::with_capacity((points.len() - 2) * 3);
    let hub = Vertex::at(points[0], color);
    for pair in points[1..].windows(2) {
        vertices.extend([hub, Vertex::at(pair[0], color), Vertex::at(pair[1], color)]);
    }

    vertices
}
