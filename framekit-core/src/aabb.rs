/// Axis-aligned bounding boxes over entity subtrees
use std::collections::HashSet;

use crate::error::{MathError, SceneError};
use crate::matrix::Matrix;
use crate::scene::{EntityGraph, EntityId};
use crate::vector::Vector;

/// Tag identifying the shape of a collision volume, so callers can dispatch
/// on pairs of geometry kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGeomType {
    Aabb,
}

/// Anything that can draw 2D line segments, e.g. a terminal canvas.
pub trait LineSurface {
    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32));
}

/// Corner index pairs forming the 12 box edges; see [`Aabb::corners`].
pub const EDGES: [(usize, usize); 12] = [
    // near face
    (0, 1), (1, 2), (2, 3), (3, 0),
    // far face
    (4, 5), (5, 6), (6, 7), (7, 4),
    // connecting edges
    (0, 4), (1, 5), (2, 6), (3, 7),
];

/// Axis-aligned bounding box.
///
/// Invariant: `min[i] <= max[i]` on every axis. A fresh box, and a box
/// computed over a subtree without points, is degenerate at the origin.
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    min: [f32; 3],
    max: [f32; 3],
    geom_type: CollisionGeomType,
}

impl Aabb {
    pub fn new(min: [f32; 3], max: [f32; 3]) -> Result<Self, MathError> {
        if (0..3).any(|i| min[i] > max[i]) {
            return Err(MathError::InvalidBounds { min, max });
        }
        Ok(Self {
            min,
            max,
            geom_type: CollisionGeomType::Aabb,
        })
    }

    pub fn empty() -> Self {
        Self {
            min: [0.0; 3],
            max: [0.0; 3],
            geom_type: CollisionGeomType::Aabb,
        }
    }

    pub fn min(&self) -> [f32; 3] {
        self.min
    }

    pub fn max(&self) -> [f32; 3] {
        self.max
    }

    pub fn geom_type(&self) -> CollisionGeomType {
        self.geom_type
    }

    /// Recompute the box from `root` and every entity reachable through
    /// children links.
    ///
    /// Each entity is visited at most once, so cyclic graphs terminate.
    /// Returns the number of points folded into the box; when that is zero
    /// the box collapses to the origin.
    pub fn compute_bounds<G: EntityGraph>(
        &mut self,
        graph: &G,
        root: EntityId,
    ) -> Result<usize, SceneError> {
        let mut worklist = vec![root];
        let mut visited: HashSet<EntityId> = HashSet::new();
        let mut min = [f32::INFINITY; 3];
        let mut max = [f32::NEG_INFINITY; 3];
        let mut count = 0usize;

        let mut cursor = 0;
        while cursor < worklist.len() {
            let id = worklist[cursor];
            cursor += 1;
            if !visited.insert(id) {
                continue;
            }

            let children = graph.children(id).ok_or(SceneError::UnknownEntity(id))?;
            worklist.extend(children.into_iter().filter(|c| !visited.contains(c)));

            let points = graph.points(id).ok_or(SceneError::UnknownEntity(id))?;
            for p in points {
                for (axis, value) in p.xyz().into_iter().enumerate() {
                    min[axis] = min[axis].min(value);
                    max[axis] = max[axis].max(value);
                }
            }
            count += points.len();
        }

        if count == 0 {
            *self = Self::empty();
        } else {
            self.min = min;
            self.max = max;
        }

        tracing::debug!(
            root = %root,
            entities = visited.len(),
            points = count,
            min = ?self.min,
            max = ?self.max,
            "recomputed bounds"
        );
        Ok(count)
    }

    /// Overlap test, inclusive on touching faces.
    pub fn is_colliding(&self, other: &Aabb) -> bool {
        for axis in 0..3 {
            if self.max[axis] < other.min[axis] || self.min[axis] > other.max[axis] {
                return false;
            }
        }
        true
    }

    /// The eight corners as points: 0-3 on the `min.z` face counter-clockwise
    /// from `min`, 4-7 the same on the `max.z` face.
    pub fn corners(&self) -> [Vector; 8] {
        let [x0, y0, z0] = self.min;
        let [x1, y1, z1] = self.max;
        [
            Vector::point(x0, y0, z0),
            Vector::point(x1, y0, z0),
            Vector::point(x1, y1, z0),
            Vector::point(x0, y1, z0),
            Vector::point(x0, y0, z1),
            Vector::point(x1, y0, z1),
            Vector::point(x1, y1, z1),
            Vector::point(x0, y1, z1),
        ]
    }

    /// Draw the wireframe: each corner goes through `view` and then
    /// `viewport`, and the 12 edges are handed to `surface`.
    ///
    /// No clipping happens here; corners behind the camera project to
    /// garbage and the surface is expected to cope.
    pub fn draw(&self, surface: &mut impl LineSurface, view: &Matrix, viewport: &Matrix) {
        let projected = self
            .corners()
            .map(|c| viewport.multiply_vector(&view.multiply_vector(&c)));

        for (a, b) in EDGES {
            surface.draw_line(
                (projected[a].x, projected[a].y),
                (projected[b].x, projected[b].y),
            );
        }
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}
