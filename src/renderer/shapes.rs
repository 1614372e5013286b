//! Shape generation for 2D primitives
//!
//! All positions are in screen pixels (origin top-left); the pipeline maps
//! them to clip space.

use glam::Vec2;

use super::scene::{JUNK_STROKE_WIDTH, OUTLINE_WIDTH, Scene, Visual};
use super::vertex::{Vertex, colors};
use crate::sim::Rect;

/// Two triangles covering `rect`
pub fn rect_fill(rect: Rect, color: [f32; 4]) -> Vec<Vertex> {
    let (x0, y0) = (rect.x as f32, rect.y as f32);
    let (x1, y1) = (rect.right() as f32, rect.bottom() as f32);
    vec![
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Border drawn inside `rect`
pub fn rect_outline(rect: Rect, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let w = (width.round() as i32).clamp(1, rect.w.min(rect.h).max(1));
    let edges = [
        Rect::new(rect.x, rect.y, rect.w, w),
        Rect::new(rect.x, rect.bottom() - w, rect.w, w),
        Rect::new(rect.x, rect.y + w, w, rect.h - 2 * w),
        Rect::new(rect.right() - w, rect.y + w, w, rect.h - 2 * w),
    ];
    edges
        .into_iter()
        .filter(|e| !e.is_empty())
        .flat_map(|e| rect_fill(e, color))
        .collect()
}

/// Thick line segment as a quad
pub fn line(from: Vec2, to: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    // Perpendicular for width
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);

    let a1 = from + perp;
    let a2 = from - perp;
    let b1 = to + perp;
    let b2 = to - perp;

    vec![
        Vertex::new(a1.x, a1.y, color),
        Vertex::new(a2.x, a2.y, color),
        Vertex::new(b1.x, b1.y, color),
        Vertex::new(b1.x, b1.y, color),
        Vertex::new(a2.x, a2.y, color),
        Vertex::new(b2.x, b2.y, color),
    ]
}

/// The junk marker: both diagonals of `rect`
pub fn cross(rect: Rect, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let (x0, y0) = (rect.x as f32, rect.y as f32);
    let (x1, y1) = (rect.right() as f32, rect.bottom() as f32);
    let mut vertices = line(Vec2::new(x0, y0), Vec2::new(x1, y1), width, color);
    vertices.extend(line(Vec2::new(x1, y0), Vec2::new(x0, y1), width, color));
    vertices
}

/// Geometry for every shape in the scene, back to front.
///
/// Images contribute their fallback color; the bitmap itself is drawn by the
/// shell on top. Text is left to the shell as well.
pub fn scene_vertices(scene: &Scene) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(
        (scene.zones.len() + scene.slots.len()) * 24 + scene.sprites.len() * 12,
    );

    for zone in &scene.zones {
        vertices.extend(rect_outline(zone.rect, OUTLINE_WIDTH, zone.color.to_rgba()));
    }
    for slot in &scene.slots {
        vertices.extend(rect_outline(*slot, OUTLINE_WIDTH, colors::SLOT_OUTLINE.to_rgba()));
    }
    for sprite in &scene.sprites {
        match &sprite.visual {
            Visual::Color(color) | Visual::Image { fallback: color, .. } => {
                vertices.extend(rect_fill(sprite.rect, color.to_rgba()));
            }
            Visual::JunkMark(color) => {
                vertices.extend(cross(sprite.rect, JUNK_STROKE_WIDTH, color.to_rgba()));
            }
        }
    }

    vertices
}
