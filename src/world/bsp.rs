//! BSP construction and traversal.
//!
//! [`build_world`] compiles an arbitrary bag of directed segments into a tree
//! of splitter nodes whose leaves are convex sectors. Segments that straddle
//! a splitter are cut at the infinite-line crossing; the cut point is
//! appended to the vertex pool and both fragments keep the original
//! direction. Everything is index-addressed, so pool growth never invalidates
//! references held elsewhere.

use glam::Vec2;
use smallvec::SmallVec;
use thiserror::Error;

use crate::world::geometry::{
    ChildRef, LineSegment, Node, NodeId, Sector, SectorId, Vertex, World, line_intersect,
    point_side,
};

type SegList = SmallVec<[LineSegment; 8]>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    /// Zero segments supplied.
    #[error("no segments supplied")]
    EmptyInput,

    /// The whole input is one collinear bundle; no splitter can partition it
    /// and no enclosed region exists.
    #[error("input segments are mutually collinear, nothing to partition")]
    DegenerateSplitter,
}

/// Compile `segments` over `vertices` into an immutable [`World`].
///
/// `vertices` seeds the pool; the builder appends one vertex per straddle
/// cut. Fails on an empty segment list and on input that is a single
/// collinear bundle.
pub fn build_world(
    vertices: &[Vec2],
    segments: &[LineSegment],
    floor_height: f32,
    ceiling_height: f32,
) -> Result<World, BuildError> {
    if segments.is_empty() {
        return Err(BuildError::EmptyInput);
    }

    let mut builder = Builder {
        vertices: vertices.iter().map(|&pos| Vertex { pos }).collect(),
        nodes: Vec::new(),
        sectors: Vec::new(),
    };

    let segs: SegList = segments.iter().copied().collect();
    if builder.all_collinear(&segs) {
        return Err(BuildError::DegenerateSplitter);
    }

    let root = builder.subdivide(segs);
    Ok(World {
        vertices: builder.vertices,
        nodes: builder.nodes,
        sectors: builder.sectors,
        root,
        floor_height,
        ceiling_height,
    })
}

struct Builder {
    vertices: Vec<Vertex>,
    nodes: Vec<Node>,
    sectors: Vec<Sector>,
}

impl Builder {
    #[inline]
    fn seg_points(&self, seg: LineSegment) -> (Vec2, Vec2) {
        (
            self.vertices[seg.v1 as usize].pos,
            self.vertices[seg.v2 as usize].pos,
        )
    }

    /// Recursion step: the first segment becomes the splitter, the rest are
    /// partitioned against its infinite line, and each side either closes as
    /// a convex sector or subdivides further. Children are allocated before
    /// the node, so the root ends up last in the pool.
    fn subdivide(&mut self, segs: SegList) -> ChildRef {
        let splitter = segs[0];
        let (left, right) = self.partition(segs);

        let left = self.close_or_recurse(left);
        let right = self.close_or_recurse(right);

        let id = self.nodes.len() as NodeId;
        self.nodes.push(Node {
            splitter,
            left,
            right,
        });
        ChildRef::Node(id)
    }

    fn close_or_recurse(&mut self, segs: SegList) -> ChildRef {
        if self.is_convex(&segs) {
            let id = self.sectors.len() as SectorId;
            self.sectors.push(Sector { segs });
            ChildRef::Sector(id)
        } else {
            self.subdivide(segs)
        }
    }

    /// Distribute `segs[1..]` around the line of `segs[0]`.
    ///
    /// Straddlers are cut in two, with the cut point appended to the vertex
    /// pool. Segments touching the right half-plane go right; strictly-left
    /// and collinear segments go left. The splitter itself backfills
    /// whichever side would otherwise stay empty, so both children are
    /// always populated.
    fn partition(&mut self, segs: SegList) -> (SegList, SegList) {
        let splitter = segs[0];
        let (sa, sb) = self.seg_points(splitter);

        let mut left = SegList::new();
        let mut right = SegList::new();

        for seg in segs.into_iter().skip(1) {
            let (p, q) = self.seg_points(seg);
            let a = point_side(sa, sb, p);
            let b = point_side(sa, sb, q);

            if a * b == -1 {
                let Some(cut) = line_intersect(sa, sb, p, q) else {
                    // numerically parallel after all; keep it whole
                    left.push(seg);
                    continue;
                };

                let cut_id = self.vertices.len() as u32;
                self.vertices.push(Vertex { pos: cut });

                let head = LineSegment::new(seg.v1, cut_id);
                let tail = LineSegment::new(cut_id, seg.v2);
                if a == -1 {
                    left.push(head);
                    right.push(tail);
                } else {
                    right.push(head);
                    left.push(tail);
                }
            } else if a == 1 || b == 1 {
                right.push(seg);
            } else {
                left.push(seg);
            }
        }

        if right.is_empty() {
            right.push(splitter);
        } else {
            left.push(splitter);
        }
        (left, right)
    }

    /// A list closes as a sector when no segment has an endpoint strictly
    /// left of any other and no pair crosses: every wall then faces the
    /// common interior on its right.
    fn is_convex(&self, segs: &[LineSegment]) -> bool {
        for (i, &si) in segs.iter().enumerate() {
            let (a1, a2) = self.seg_points(si);
            for (j, &sj) in segs.iter().enumerate() {
                if i == j {
                    continue;
                }
                let (p, q) = self.seg_points(sj);
                let a = point_side(a1, a2, p);
                let b = point_side(a1, a2, q);
                if a * b == -1 || a == -1 || b == -1 {
                    return false;
                }
            }
        }
        true
    }

    /// True when every segment after the first lies on the first one's line.
    fn all_collinear(&self, segs: &SegList) -> bool {
        let (sa, sb) = self.seg_points(segs[0]);
        segs.iter().skip(1).all(|&seg| {
            let (p, q) = self.seg_points(seg);
            point_side(sa, sb, p) == 0 && point_side(sa, sb, q) == 0
        })
    }
}

impl World {
    /// Collect leaf sectors in front-to-back order as seen from `eye`.
    ///
    /// At every node the child on the eye's side is visited first; reversing
    /// the result gives painter's-algorithm order.
    pub fn sectors_front_to_back(&self, eye: Vec2, out: &mut Vec<SectorId>) {
        out.clear();
        self.walk(self.root, eye, out);
    }

    fn walk(&self, child: ChildRef, eye: Vec2, out: &mut Vec<SectorId>) {
        match child {
            ChildRef::Sector(id) => out.push(id),
            ChildRef::Node(id) => {
                let node = &self.nodes[id as usize];
                let (a, b) = self.seg_endpoints(node.splitter);
                if point_side(a, b, eye) == 1 {
                    self.walk(node.right, eye, out);
                    self.walk(node.left, eye, out);
                } else {
                    self.walk(node.left, eye, out);
                    self.walk(node.right, eye, out);
                }
            }
        }
    }
}
