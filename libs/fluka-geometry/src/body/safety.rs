//! Length-safety variants of body kinds.
//!
//! A positive margin grows a body outward by that distance on every
//! surface, a negative one shrinks it. Half-spaces move their plane along
//! the outward normal. Kinds without a variant return `None` and are left
//! to the caller to pass through unchanged.

use glam::DVec3;

use super::kind::BodyKind;

impl BodyKind {
    /// Kind grown by `margin` (shrunk when negative), or `None` when the
    /// kind has no length-safety variant (`ARB`, `QUA`).
    pub fn safety_adjusted(&self, margin: f64) -> Option<BodyKind> {
        let d = margin;
        let kind = match self {
            BodyKind::Rpp { min, max } => BodyKind::Rpp {
                min: *min - DVec3::splat(d),
                max: *max + DVec3::splat(d),
            },
            BodyKind::Box { vertex, edges } => {
                let units = edges.map(|e| e.normalize_or_zero());
                BodyKind::Box {
                    vertex: *vertex - (units[0] + units[1] + units[2]) * d,
                    edges: [
                        edges[0] + units[0] * 2.0 * d,
                        edges[1] + units[1] * 2.0 * d,
                        edges[2] + units[2] * 2.0 * d,
                    ],
                }
            }
            BodyKind::Sph { centre, radius } => BodyKind::Sph {
                centre: *centre,
                radius: radius + d,
            },
            BodyKind::Rcc { base, height, radius } => {
                let (base, height) = lengthen(*base, *height, d);
                BodyKind::Rcc {
                    base,
                    height,
                    radius: radius + d,
                }
            }
            BodyKind::Rec {
                base,
                height,
                semi_a,
                semi_b,
            } => {
                let (base, height) = lengthen(*base, *height, d);
                BodyKind::Rec {
                    base,
                    height,
                    semi_a: *semi_a + semi_a.normalize_or_zero() * d,
                    semi_b: *semi_b + semi_b.normalize_or_zero() * d,
                }
            }
            BodyKind::Trc {
                base,
                height,
                base_radius,
                top_radius,
            } => {
                let (base, height) = lengthen(*base, *height, d);
                BodyKind::Trc {
                    base,
                    height,
                    base_radius: grow_radius(*base_radius, d),
                    top_radius: grow_radius(*top_radius, d),
                }
            }
            BodyKind::Ell {
                focus1,
                focus2,
                length,
            } => BodyKind::Ell {
                focus1: *focus1,
                focus2: *focus2,
                length: length + 2.0 * d,
            },
            BodyKind::Xyp { z } => BodyKind::Xyp { z: z + d },
            BodyKind::Xzp { y } => BodyKind::Xzp { y: y + d },
            BodyKind::Yzp { x } => BodyKind::Yzp { x: x + d },
            BodyKind::Pla { normal, point } => BodyKind::Pla {
                normal: *normal,
                point: *point + normal.normalize_or_zero() * d,
            },
            BodyKind::Xcc { y, z, radius } => BodyKind::Xcc {
                y: *y,
                z: *z,
                radius: radius + d,
            },
            BodyKind::Ycc { z, x, radius } => BodyKind::Ycc {
                z: *z,
                x: *x,
                radius: radius + d,
            },
            BodyKind::Zcc { x, y, radius } => BodyKind::Zcc {
                x: *x,
                y: *y,
                radius: radius + d,
            },
            BodyKind::Xec { y, z, ry, rz } => BodyKind::Xec {
                y: *y,
                z: *z,
                ry: ry + d,
                rz: rz + d,
            },
            BodyKind::Yec { z, x, rz, rx } => BodyKind::Yec {
                z: *z,
                x: *x,
                rz: rz + d,
                rx: rx + d,
            },
            BodyKind::Zec { x, y, rx, ry } => BodyKind::Zec {
                x: *x,
                y: *y,
                rx: rx + d,
                ry: ry + d,
            },
            BodyKind::Arb { .. } | BodyKind::Qua { .. } => return None,
        };
        Some(kind)
    }
}

/// Move both caps of an axial body outward by `d`.
fn lengthen(base: DVec3, height: DVec3, d: f64) -> (DVec3, DVec3) {
    let axis = height.normalize_or_zero();
    (base - axis * d, height + axis * 2.0 * d)
}

/// Zero radii (cone apices) stay zero.
fn grow_radius(radius: f64, d: f64) -> f64 {
    if radius > 0.0 {
        radius + d
    } else {
        radius
    }
}
