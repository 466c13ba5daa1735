//! 2-D primitives and the immutable world snapshot.

use glam::Vec2;
use smallvec::SmallVec;

use crate::defs::EPSILON;

pub type VertexId = u32;
pub type NodeId = u32;
pub type SectorId = u32;

/// Map vertex. The pool only ever grows (the BSP builder appends split
/// points), so indices stay valid for the lifetime of the world.
#[derive(Clone, Copy, Debug)]
pub struct Vertex {
    pub pos: Vec2,
}

/// Directed wall between two pool vertices.
///
/// The visible side is the right-hand side of `v1 → v2`; a closed room winds
/// so its interior lies to the right of every wall.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineSegment {
    pub v1: VertexId,
    pub v2: VertexId,
}

impl LineSegment {
    pub fn new(v1: VertexId, v2: VertexId) -> Self {
        Self { v1, v2 }
    }
}

/// Convex leaf region of the BSP tree.
#[derive(Clone, Debug)]
pub struct Sector {
    pub segs: SmallVec<[LineSegment; 8]>,
}

/// Child slot of a BSP node: another node or a leaf sector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChildRef {
    Node(NodeId),
    Sector(SectorId),
}

#[derive(Clone, Debug)]
pub struct Node {
    pub splitter: LineSegment,
    pub left: ChildRef,
    pub right: ChildRef,
}

/// Runtime snapshot of one map (immutable after [`build_world`]).
///
/// [`build_world`]: crate::world::build_world
#[derive(Debug)]
pub struct World {
    pub vertices: Vec<Vertex>,
    pub nodes: Vec<Node>,
    pub sectors: Vec<Sector>,
    pub root: ChildRef,
    pub floor_height: f32,
    pub ceiling_height: f32,
}

impl World {
    /// World-space endpoints of `seg`.
    #[inline]
    pub fn seg_endpoints(&self, seg: LineSegment) -> (Vec2, Vec2) {
        (
            self.vertices[seg.v1 as usize].pos,
            self.vertices[seg.v2 as usize].pos,
        )
    }
}

/// Classify `p` against the directed line `a → b`.
///
/// Returns −1 strictly left, +1 strictly right, 0 on the line within
/// [`EPSILON`].
#[inline]
pub fn point_side(a: Vec2, b: Vec2, p: Vec2) -> i32 {
    let cross = (b - a).perp_dot(p - a);
    if cross.abs() < EPSILON {
        0
    } else if cross > 0.0 {
        -1
    } else {
        1
    }
}

/// Intersection of the infinite lines through (`p1`,`p2`) and (`p3`,`p4`).
///
/// `None` when the determinant vanishes (parallel or coincident lines).
pub fn line_intersect(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> Option<Vec2> {
    let det = (p1.x - p2.x) * (p3.y - p4.y) - (p1.y - p2.y) * (p3.x - p4.x);
    if det.abs() < EPSILON {
        return None;
    }

    let a = p1.x * p2.y - p1.y * p2.x;
    let b = p3.x * p4.y - p3.y * p4.x;
    Some(Vec2::new(
        (a * (p3.x - p4.x) - (p1.x - p2.x) * b) / det,
        (a * (p3.y - p4.y) - (p1.y - p2.y) * b) / det,
    ))
}

/// Like [`line_intersect`] but the crossing must fall inside both segments.
pub fn segment_intersect(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> Option<Vec2> {
    let det = (p1.x - p2.x) * (p3.y - p4.y) - (p1.y - p2.y) * (p3.x - p4.x);
    if det.abs() < EPSILON {
        return None;
    }

    let t = ((p1.x - p3.x) * (p3.y - p4.y) - (p1.y - p3.y) * (p3.x - p4.x)) / det;
    let u = -((p1.x - p2.x) * (p1.y - p3.y) - (p1.y - p2.y) * (p1.x - p3.x)) / det;
    if !(0.0..=1.0).contains(&t) || !(0.0..=1.0).contains(&u) {
        return None;
    }

    Some(p1 + t * (p2 - p1))
}

/// Signed angle from `a` to `b`, in (−π, π].
#[inline]
pub fn signed_angle(a: Vec2, b: Vec2) -> f32 {
    a.perp_dot(b).atan2(a.dot(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn side_signs_match_winding() {
        let a = vec2(0.0, 0.0);
        let b = vec2(10.0, 0.0);
        assert_eq!(point_side(a, b, vec2(5.0, 1.0)), -1); // left of +X
        assert_eq!(point_side(a, b, vec2(5.0, -1.0)), 1); // right of +X
        assert_eq!(point_side(a, b, vec2(20.0, 0.0)), 0); // collinear
    }

    #[test]
    fn side_tolerates_near_collinear() {
        let a = vec2(0.0, 0.0);
        let b = vec2(10.0, 0.0);
        assert_eq!(point_side(a, b, vec2(5.0, 1e-8)), 0);
    }

    #[test]
    fn lines_cross_at_expected_point() {
        let p = line_intersect(
            vec2(-1.0, 0.0),
            vec2(1.0, 0.0),
            vec2(0.0, -1.0),
            vec2(0.0, 1.0),
        )
        .unwrap();
        assert!((p - vec2(0.0, 0.0)).length() < 1e-5);

        // crossing outside both segments is still a line intersection
        let p = line_intersect(
            vec2(1.0, 1.0),
            vec2(2.0, 2.0),
            vec2(1.0, -1.0),
            vec2(2.0, -2.0),
        )
        .unwrap();
        assert!((p - vec2(0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn parallel_lines_do_not_cross() {
        assert!(
            line_intersect(
                vec2(0.0, 0.0),
                vec2(10.0, 0.0),
                vec2(0.0, 1.0),
                vec2(10.0, 1.0),
            )
            .is_none()
        );
    }

    #[test]
    fn segment_intersection_respects_extents() {
        // same supporting lines as above, but the crossing lies outside
        assert!(
            segment_intersect(
                vec2(1.0, 1.0),
                vec2(2.0, 2.0),
                vec2(1.0, -1.0),
                vec2(2.0, -2.0),
            )
            .is_none()
        );

        let p = segment_intersect(
            vec2(-1.0, 1.0),
            vec2(1.0, -1.0),
            vec2(-1.0, -1.0),
            vec2(1.0, 1.0),
        )
        .unwrap();
        assert!((p - vec2(0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn endpoint_touch_counts_as_intersection() {
        let p = segment_intersect(
            vec2(0.0, 0.0),
            vec2(1.0, 1.0),
            vec2(1.0, 1.0),
            vec2(2.0, 0.0),
        )
        .unwrap();
        assert!((p - vec2(1.0, 1.0)).length() < 1e-5);
    }

    #[test]
    fn signed_angle_quadrants() {
        let up = Vec2::Y;
        assert!((signed_angle(up, vec2(-1.0, 0.0)) - FRAC_PI_2).abs() < 1e-5);
        assert!((signed_angle(up, vec2(1.0, 0.0)) + FRAC_PI_2).abs() < 1e-5);
        assert!(signed_angle(up, vec2(0.0, 5.0)).abs() < 1e-5);
    }
}
