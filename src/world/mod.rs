mod bsp;
mod camera;
mod geometry;
mod texture;

pub use bsp::{BuildError, build_world};

pub use camera::Camera;

pub use geometry::{
    ChildRef, LineSegment, Node, NodeId, Sector, SectorId, Vertex, VertexId, World,
    line_intersect, point_side, segment_intersect, signed_angle,
};

pub use texture::Texture;
