//! # Primitives
//!
//! Local-frame solid descriptions handed to the target kernel. Every
//! primitive is centred on its frame origin except the half-space, whose
//! boundary plane is local `z = 0` with the interior below it.
//!
//! Infinite bodies (half-spaces, infinite cylinders, quadrics) are bounded
//! by a cube of half-size [`config::constants::INFINITY`].

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::extent::Extent;

/// Points per circle when sampling a round outline.
const OUTLINE_SAMPLES: usize = 24;

/// A bounding plane of a convex polyhedron: `normal · p ≤ offset` inside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    /// Outward unit normal.
    pub normal: DVec3,
    /// Signed distance of the plane from the origin along `normal`.
    pub offset: f64,
}

impl Plane {
    /// Signed distance of `point` from the plane, positive outside.
    pub fn distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) - self.offset
    }
}

/// Target-kernel primitive in its local frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    /// Box with half edge lengths.
    Box {
        /// Half sizes along local x, y, z.
        half: DVec3,
    },
    /// Sphere.
    Sphere {
        /// Radius.
        radius: f64,
    },
    /// Circular cylinder along local z.
    Tube {
        /// Radius.
        radius: f64,
        /// Half length.
        half_length: f64,
    },
    /// Elliptical cylinder along local z.
    EllipticalTube {
        /// Semi-axis along local x.
        semi_x: f64,
        /// Semi-axis along local y.
        semi_y: f64,
        /// Half length.
        half_length: f64,
    },
    /// Truncated cone along local z.
    Cone {
        /// Radius at `z = -half_length`.
        bottom_radius: f64,
        /// Radius at `z = +half_length`.
        top_radius: f64,
        /// Half length.
        half_length: f64,
    },
    /// Axis-aligned ellipsoid.
    Ellipsoid {
        /// Semi-axes along local x, y, z.
        semi_axes: DVec3,
    },
    /// Half-space `z ≤ 0`, bounded laterally and below by `size`.
    HalfSpace {
        /// Bounding half-size.
        size: f64,
    },
    /// Quadric `f(p) ≤ 0` with
    /// `f = xx·x² + yy·y² + zz·z² + xy·xy + xz·xz + yz·yz + x·x + y·y + z·z + c`.
    Quadric {
        /// Coefficients in the order `xx yy zz xy xz yz x y z c`.
        coefficients: [f64; 10],
        /// Bounding half-size.
        size: f64,
    },
    /// Convex polyhedron given by its bounding planes and vertices.
    ConvexPolyhedron {
        /// Bounding planes.
        planes: Vec<Plane>,
        /// Vertices, used for the extent.
        vertices: Vec<DVec3>,
    },
}

impl Primitive {
    /// Short kernel-facing name of the shape.
    pub fn shape_name(&self) -> &'static str {
        match self {
            Primitive::Box { .. } => "box",
            Primitive::Sphere { .. } => "sphere",
            Primitive::Tube { .. } => "tube",
            Primitive::EllipticalTube { .. } => "elliptical_tube",
            Primitive::Cone { .. } => "cone",
            Primitive::Ellipsoid { .. } => "ellipsoid",
            Primitive::HalfSpace { .. } => "half_space",
            Primitive::Quadric { .. } => "quadric",
            Primitive::ConvexPolyhedron { .. } => "convex_polyhedron",
        }
    }

    /// Bounding box in the local frame.
    pub fn local_extent(&self) -> Extent {
        match self {
            Primitive::Box { half } => Extent::symmetric(*half),
            Primitive::Sphere { radius } => Extent::symmetric(DVec3::splat(*radius)),
            Primitive::Tube { radius, half_length } => {
                Extent::symmetric(DVec3::new(*radius, *radius, *half_length))
            }
            Primitive::EllipticalTube {
                semi_x,
                semi_y,
                half_length,
            } => Extent::symmetric(DVec3::new(*semi_x, *semi_y, *half_length)),
            Primitive::Cone {
                bottom_radius,
                top_radius,
                half_length,
            } => {
                let r = bottom_radius.max(*top_radius);
                Extent::symmetric(DVec3::new(r, r, *half_length))
            }
            Primitive::Ellipsoid { semi_axes } => Extent::symmetric(*semi_axes),
            Primitive::HalfSpace { size } => {
                Extent::new(DVec3::new(-size, -size, -size), DVec3::new(*size, *size, 0.0))
            }
            Primitive::Quadric { size, .. } => Extent::symmetric(DVec3::splat(*size)),
            Primitive::ConvexPolyhedron { vertices, .. } => {
                Extent::from_points(vertices.iter().copied())
            }
        }
    }

    /// Point-membership test in the local frame (boundary counts as inside).
    pub fn contains(&self, p: DVec3) -> bool {
        match self {
            Primitive::Box { half } => p.abs().cmple(*half).all(),
            Primitive::Sphere { radius } => p.length_squared() <= radius * radius,
            Primitive::Tube { radius, half_length } => {
                p.z.abs() <= *half_length && p.x * p.x + p.y * p.y <= radius * radius
            }
            Primitive::EllipticalTube {
                semi_x,
                semi_y,
                half_length,
            } => {
                p.z.abs() <= *half_length
                    && (p.x / semi_x).powi(2) + (p.y / semi_y).powi(2) <= 1.0
            }
            Primitive::Cone {
                bottom_radius,
                top_radius,
                half_length,
            } => {
                if p.z.abs() > *half_length {
                    return false;
                }
                let t = (p.z + half_length) / (2.0 * half_length);
                let r = bottom_radius + (top_radius - bottom_radius) * t;
                p.x * p.x + p.y * p.y <= r * r
            }
            Primitive::Ellipsoid { semi_axes } => (p / *semi_axes).length_squared() <= 1.0,
            Primitive::HalfSpace { size } => {
                p.z <= 0.0 && p.z >= -size && p.x.abs() <= *size && p.y.abs() <= *size
            }
            Primitive::Quadric { coefficients, size } => {
                p.abs().max_element() <= *size && quadric_value(coefficients, p) <= 0.0
            }
            Primitive::ConvexPolyhedron { planes, .. } => {
                planes.iter().all(|plane| plane.distance(p) <= 0.0)
            }
        }
    }

    /// Whether the shape is convex. Only quadrics may not be.
    pub fn is_convex(&self) -> bool {
        !matches!(self, Primitive::Quadric { .. })
    }

    /// Points on the outline whose convex hull covers the shape.
    ///
    /// Exact for boxes, half-spaces and polyhedra. Round outlines are
    /// sampled with [`OUTLINE_SAMPLES`] points per circle, and a quadric
    /// stands in for its bounding cube.
    pub fn hull_points(&self) -> Vec<DVec3> {
        match self {
            Primitive::Box { half } => Extent::symmetric(*half).corners().to_vec(),
            Primitive::Sphere { radius } => ellipsoid_outline(DVec3::splat(*radius)),
            Primitive::Tube { radius, half_length } => {
                let mut points = ring(*radius, *radius, -half_length);
                points.extend(ring(*radius, *radius, *half_length));
                points
            }
            Primitive::EllipticalTube {
                semi_x,
                semi_y,
                half_length,
            } => {
                let mut points = ring(*semi_x, *semi_y, -half_length);
                points.extend(ring(*semi_x, *semi_y, *half_length));
                points
            }
            Primitive::Cone {
                bottom_radius,
                top_radius,
                half_length,
            } => {
                let mut points = ring(*bottom_radius, *bottom_radius, -half_length);
                points.extend(ring(*top_radius, *top_radius, *half_length));
                points
            }
            Primitive::Ellipsoid { semi_axes } => ellipsoid_outline(*semi_axes),
            Primitive::HalfSpace { .. } | Primitive::Quadric { .. } => {
                self.local_extent().corners().to_vec()
            }
            Primitive::ConvexPolyhedron { vertices, .. } => vertices.clone(),
        }
    }

    /// Closed-form volume where one exists.
    pub fn analytic_volume(&self) -> Option<f64> {
        use std::f64::consts::PI;
        match self {
            Primitive::Box { half } => Some(8.0 * half.x * half.y * half.z),
            Primitive::Sphere { radius } => Some(4.0 / 3.0 * PI * radius.powi(3)),
            Primitive::Tube { radius, half_length } => Some(PI * radius * radius * 2.0 * half_length),
            Primitive::EllipticalTube {
                semi_x,
                semi_y,
                half_length,
            } => Some(PI * semi_x * semi_y * 2.0 * half_length),
            Primitive::Cone {
                bottom_radius: r1,
                top_radius: r2,
                half_length,
            } => Some(PI * 2.0 * half_length / 3.0 * (r1 * r1 + r1 * r2 + r2 * r2)),
            Primitive::Ellipsoid { semi_axes } => {
                Some(4.0 / 3.0 * PI * semi_axes.x * semi_axes.y * semi_axes.z)
            }
            Primitive::HalfSpace { .. }
            | Primitive::Quadric { .. }
            | Primitive::ConvexPolyhedron { .. } => None,
        }
    }
}

/// Points on the ellipse with semi-axes `a`, `b` in the plane at height `z`.
fn ring(a: f64, b: f64, z: f64) -> Vec<DVec3> {
    (0..OUTLINE_SAMPLES)
        .map(|i| {
            let angle = std::f64::consts::TAU * i as f64 / OUTLINE_SAMPLES as f64;
            DVec3::new(a * angle.cos(), b * angle.sin(), z)
        })
        .collect()
}

/// Rings of an ellipsoid surface from pole to pole.
fn ellipsoid_outline(semi_axes: DVec3) -> Vec<DVec3> {
    let rings = OUTLINE_SAMPLES / 2;
    let mut points = vec![DVec3::new(0.0, 0.0, -semi_axes.z), DVec3::new(0.0, 0.0, semi_axes.z)];
    for i in 1..rings {
        let polar = std::f64::consts::PI * i as f64 / rings as f64;
        let (sin, cos) = polar.sin_cos();
        points.extend(ring(semi_axes.x * sin, semi_axes.y * sin, -semi_axes.z * cos));
    }
    points
}

/// Evaluate the quadric polynomial at `p`.
pub fn quadric_value(c: &[f64; 10], p: DVec3) -> f64 {
    c[0] * p.x * p.x
        + c[1] * p.y * p.y
        + c[2] * p.z * p.z
        + c[3] * p.x * p.y
        + c[4] * p.x * p.z
        + c[5] * p.y * p.z
        + c[6] * p.x
        + c[7] * p.y
        + c[8] * p.z
        + c[9]
}
