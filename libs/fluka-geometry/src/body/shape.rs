//! Native frames and local primitives of each body kind.
//!
//! Frame conventions:
//!
//! | Kind | Centre | Local z |
//! |------|--------|---------|
//! | `RPP` | box centre | world z |
//! | `BOX` | box centre | `h1 × h2` (x, y along `h1`, `h2`) |
//! | `SPH` | sphere centre | world z |
//! | `RCC`, `REC`, `TRC` | mid-axis | along `h` |
//! | `ELL` | between the foci | along `f2 − f1` |
//! | `ARB` | vertex centroid | world z |
//! | `XYP`, `XZP`, `YZP`, `PLA` | point on the plane | outward normal |
//! | `XCC`, `XEC` | on the axis | world x (local x, y = world y, z) |
//! | `YCC`, `YEC` | on the axis | world y (local x, y = world z, x) |
//! | `ZCC`, `ZEC`, `QUA` | on the axis / origin | world z |

use config::constants::{approx_zero, INFINITY};
use glam::{DMat3, DVec3};

use super::kind::BodyKind;
use crate::frame::Frame;
use crate::primitive::{Plane, Primitive};

/// Local axes of bodies aligned with world x: `(x, y, z) → (Y, Z, X)`.
const X_ALIGNED: DMat3 = DMat3::from_cols(DVec3::Y, DVec3::Z, DVec3::X);
/// Local axes of bodies aligned with world y: `(x, y, z) → (Z, X, Y)`.
const Y_ALIGNED: DMat3 = DMat3::from_cols(DVec3::Z, DVec3::X, DVec3::Y);

/// Frame of a kind in definition coordinates.
pub(crate) fn native_frame(kind: &BodyKind) -> Frame {
    match kind {
        BodyKind::Rpp { min, max } => Frame::at((*min + *max) * 0.5),
        BodyKind::Box { vertex, edges } => {
            let centre = *vertex + (edges[0] + edges[1] + edges[2]) * 0.5;
            let x = edges[0].normalize_or_zero();
            let y = edges[1].normalize_or_zero();
            Frame::new(centre, DMat3::from_cols(x, y, x.cross(y)))
        }
        BodyKind::Sph { centre, .. } => Frame::at(*centre),
        BodyKind::Rcc { base, height, .. } | BodyKind::Trc { base, height, .. } => {
            Frame::along(*base + *height * 0.5, *height)
        }
        BodyKind::Rec {
            base,
            height,
            semi_a,
            ..
        } => {
            let z = height.normalize_or_zero();
            let x = semi_a.normalize_or_zero();
            Frame::new(*base + *height * 0.5, DMat3::from_cols(x, z.cross(x), z))
        }
        BodyKind::Ell { focus1, focus2, .. } => {
            Frame::along((*focus1 + *focus2) * 0.5, *focus2 - *focus1)
        }
        BodyKind::Arb { vertices, .. } => Frame::at(centroid(vertices)),
        BodyKind::Xyp { z } => Frame::at(DVec3::new(0.0, 0.0, *z)),
        BodyKind::Xzp { y } => Frame::new(DVec3::new(0.0, *y, 0.0), Y_ALIGNED),
        BodyKind::Yzp { x } => Frame::new(DVec3::new(*x, 0.0, 0.0), X_ALIGNED),
        BodyKind::Pla { normal, point } => Frame::along(*point, *normal),
        BodyKind::Xcc { y, z, .. } | BodyKind::Xec { y, z, .. } => {
            Frame::new(DVec3::new(0.0, *y, *z), X_ALIGNED)
        }
        BodyKind::Ycc { z, x, .. } | BodyKind::Yec { z, x, .. } => {
            Frame::new(DVec3::new(*x, 0.0, *z), Y_ALIGNED)
        }
        BodyKind::Zcc { x, y, .. } | BodyKind::Zec { x, y, .. } => {
            Frame::at(DVec3::new(*x, *y, 0.0))
        }
        BodyKind::Qua { .. } => Frame::IDENTITY,
    }
}

/// Primitive of a kind in its native frame.
///
/// `kind` must have passed validation.
pub(crate) fn primitive(kind: &BodyKind) -> Primitive {
    match kind {
        BodyKind::Rpp { min, max } => Primitive::Box {
            half: (*max - *min) * 0.5,
        },
        BodyKind::Box { edges, .. } => Primitive::Box {
            half: DVec3::new(edges[0].length(), edges[1].length(), edges[2].length()) * 0.5,
        },
        BodyKind::Sph { radius, .. } => Primitive::Sphere { radius: *radius },
        BodyKind::Rcc { height, radius, .. } => Primitive::Tube {
            radius: *radius,
            half_length: height.length() * 0.5,
        },
        BodyKind::Rec {
            height,
            semi_a,
            semi_b,
            ..
        } => Primitive::EllipticalTube {
            semi_x: semi_a.length(),
            semi_y: semi_b.length(),
            half_length: height.length() * 0.5,
        },
        BodyKind::Trc {
            height,
            base_radius,
            top_radius,
            ..
        } => Primitive::Cone {
            bottom_radius: *base_radius,
            top_radius: *top_radius,
            half_length: height.length() * 0.5,
        },
        BodyKind::Ell {
            focus1,
            focus2,
            length,
        } => {
            let a = length * 0.5;
            let c = focus1.distance(*focus2) * 0.5;
            let b = (a * a - c * c).max(0.0).sqrt();
            Primitive::Ellipsoid {
                semi_axes: DVec3::new(b, b, a),
            }
        }
        BodyKind::Arb { vertices, .. } => {
            let centre = centroid(vertices);
            let planes = arb_planes(kind)
                .unwrap_or_default()
                .into_iter()
                .map(|plane| Plane {
                    normal: plane.normal,
                    offset: plane.offset - plane.normal.dot(centre),
                })
                .collect();
            Primitive::ConvexPolyhedron {
                planes,
                vertices: vertices.iter().map(|v| *v - centre).collect(),
            }
        }
        BodyKind::Xyp { .. } | BodyKind::Xzp { .. } | BodyKind::Yzp { .. } | BodyKind::Pla { .. } => {
            Primitive::HalfSpace { size: INFINITY }
        }
        BodyKind::Xcc { radius, .. } | BodyKind::Ycc { radius, .. } | BodyKind::Zcc { radius, .. } => {
            Primitive::Tube {
                radius: *radius,
                half_length: INFINITY,
            }
        }
        BodyKind::Xec { ry: a, rz: b, .. }
        | BodyKind::Yec { rz: a, rx: b, .. }
        | BodyKind::Zec { rx: a, ry: b, .. } => Primitive::EllipticalTube {
            semi_x: *a,
            semi_y: *b,
            half_length: INFINITY,
        },
        BodyKind::Qua { coefficients } => Primitive::Quadric {
            coefficients: *coefficients,
            size: INFINITY,
        },
    }
}

fn centroid(vertices: &[DVec3; 8]) -> DVec3 {
    vertices.iter().fold(DVec3::ZERO, |acc, v| acc + *v) / vertices.len() as f64
}

/// Outward face planes of an `ARB` in definition coordinates.
///
/// Each face lists up to four 1-based vertex indices as the digits of its
/// number (`4321`); zero digits are unused slots and a zero face is
/// skipped. Planes are oriented so the vertex centroid lies inside.
pub(crate) fn arb_planes(kind: &BodyKind) -> Result<Vec<Plane>, String> {
    let BodyKind::Arb { vertices, faces } = kind else {
        return Ok(Vec::new());
    };
    let centre = centroid(vertices);
    let mut planes = Vec::new();

    for (face_index, face) in faces.iter().enumerate() {
        if face.abs() < 0.5 {
            continue;
        }
        let digits = format!("{}", face.abs().round() as u64);
        let mut indices: Vec<usize> = Vec::new();
        for digit in digits.chars().filter_map(|c| c.to_digit(10)) {
            let index = digit as usize;
            if index > 8 {
                return Err(format!("ARB face {} refers to vertex {index}", face_index + 1));
            }
            if index > 0 && !indices.contains(&index) {
                indices.push(index);
            }
        }
        if indices.len() < 3 {
            return Err(format!("ARB face {} needs at least three vertices", face_index + 1));
        }

        let a = vertices[indices[0] - 1];
        let b = vertices[indices[1] - 1];
        let c = vertices[indices[2] - 1];
        let normal = (b - a).cross(c - a);
        if approx_zero(normal.length()) {
            return Err(format!("ARB face {} is degenerate", face_index + 1));
        }
        let mut normal = normal.normalize();
        if normal.dot(centre - a) > 0.0 {
            normal = -normal;
        }
        planes.push(Plane {
            normal,
            offset: normal.dot(a),
        });
    }

    if planes.len() < 4 {
        return Err("ARB needs at least four faces".to_string());
    }
    Ok(planes)
}
