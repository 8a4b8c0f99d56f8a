//! Body kinds with their native card parameters.

use config::constants::{EPSILON, ORTHOGONALITY_TOLERANCE};
use fluka_parser::BodyCode;
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Primitive kind tag with native parameters, one variant per body code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BodyKind {
    /// `RPP xmin xmax ymin ymax zmin zmax`
    Rpp { min: DVec3, max: DVec3 },
    /// `BOX v h1 h2 h3`: corner and three perpendicular edges.
    Box { vertex: DVec3, edges: [DVec3; 3] },
    /// `SPH v r`
    Sph { centre: DVec3, radius: f64 },
    /// `RCC v h r`
    Rcc { base: DVec3, height: DVec3, radius: f64 },
    /// `REC v h r1 r2`: semi-axis vectors perpendicular to `h`.
    Rec {
        base: DVec3,
        height: DVec3,
        semi_a: DVec3,
        semi_b: DVec3,
    },
    /// `TRC v h r1 r2`: base radius at `v`, top radius at `v + h`.
    Trc {
        base: DVec3,
        height: DVec3,
        base_radius: f64,
        top_radius: f64,
    },
    /// `ELL f1 f2 L`: foci and full length of the major axis.
    Ell { focus1: DVec3, focus2: DVec3, length: f64 },
    /// `ARB v1 … v8 f1 … f6`: faces are digit strings of 1-based vertex
    /// indices, `0` marking an unused slot.
    Arb { vertices: [DVec3; 8], faces: [f64; 6] },
    /// `XYP v`: `z ≤ v`
    Xyp { z: f64 },
    /// `XZP v`: `y ≤ v`
    Xzp { y: f64 },
    /// `YZP v`: `x ≤ v`
    Yzp { x: f64 },
    /// `PLA n p`: `n · (q − p) ≤ 0`
    Pla { normal: DVec3, point: DVec3 },
    /// `XCC y z r`
    Xcc { y: f64, z: f64, radius: f64 },
    /// `YCC z x r`
    Ycc { z: f64, x: f64, radius: f64 },
    /// `ZCC x y r`
    Zcc { x: f64, y: f64, radius: f64 },
    /// `XEC y z ry rz`
    Xec { y: f64, z: f64, ry: f64, rz: f64 },
    /// `YEC z x rz rx`
    Yec { z: f64, x: f64, rz: f64, rx: f64 },
    /// `ZEC x y rx ry`
    Zec { x: f64, y: f64, rx: f64, ry: f64 },
    /// `QUA xx yy zz xy xz yz x y z c`
    Qua { coefficients: [f64; 10] },
}

fn v(p: &[f64], i: usize) -> DVec3 {
    DVec3::new(p[i], p[i + 1], p[i + 2])
}

impl BodyKind {
    /// Builds a kind from a body code and its parameters.
    ///
    /// The caller guarantees `params.len() == code.param_count()` (the
    /// parser enforces it); a mismatch is reported as an error message.
    pub fn from_card(code: BodyCode, params: &[f64]) -> Result<Self, String> {
        if params.len() != code.param_count() {
            return Err(format!(
                "{} expects {} parameters, found {}",
                code.keyword(),
                code.param_count(),
                params.len()
            ));
        }
        let p = params;
        Ok(match code {
            BodyCode::Rpp => BodyKind::Rpp {
                min: DVec3::new(p[0], p[2], p[4]),
                max: DVec3::new(p[1], p[3], p[5]),
            },
            BodyCode::Box => BodyKind::Box {
                vertex: v(p, 0),
                edges: [v(p, 3), v(p, 6), v(p, 9)],
            },
            BodyCode::Sph => BodyKind::Sph {
                centre: v(p, 0),
                radius: p[3],
            },
            BodyCode::Rcc => BodyKind::Rcc {
                base: v(p, 0),
                height: v(p, 3),
                radius: p[6],
            },
            BodyCode::Rec => BodyKind::Rec {
                base: v(p, 0),
                height: v(p, 3),
                semi_a: v(p, 6),
                semi_b: v(p, 9),
            },
            BodyCode::Trc => BodyKind::Trc {
                base: v(p, 0),
                height: v(p, 3),
                base_radius: p[6],
                top_radius: p[7],
            },
            BodyCode::Ell => BodyKind::Ell {
                focus1: v(p, 0),
                focus2: v(p, 3),
                length: p[6],
            },
            BodyCode::Arb => {
                let mut vertices = [DVec3::ZERO; 8];
                for (i, vertex) in vertices.iter_mut().enumerate() {
                    *vertex = v(p, 3 * i);
                }
                let mut faces = [0.0; 6];
                faces.copy_from_slice(&p[24..30]);
                BodyKind::Arb { vertices, faces }
            }
            BodyCode::Xyp => BodyKind::Xyp { z: p[0] },
            BodyCode::Xzp => BodyKind::Xzp { y: p[0] },
            BodyCode::Yzp => BodyKind::Yzp { x: p[0] },
            BodyCode::Pla => BodyKind::Pla {
                normal: v(p, 0),
                point: v(p, 3),
            },
            BodyCode::Xcc => BodyKind::Xcc { y: p[0], z: p[1], radius: p[2] },
            BodyCode::Ycc => BodyKind::Ycc { z: p[0], x: p[1], radius: p[2] },
            BodyCode::Zcc => BodyKind::Zcc { x: p[0], y: p[1], radius: p[2] },
            BodyCode::Xec => BodyKind::Xec { y: p[0], z: p[1], ry: p[2], rz: p[3] },
            BodyCode::Yec => BodyKind::Yec { z: p[0], x: p[1], rz: p[2], rx: p[3] },
            BodyCode::Zec => BodyKind::Zec { x: p[0], y: p[1], rx: p[2], ry: p[3] },
            BodyCode::Qua => {
                let mut coefficients = [0.0; 10];
                coefficients.copy_from_slice(p);
                BodyKind::Qua { coefficients }
            }
        })
    }

    /// Body code of this kind.
    pub fn code(&self) -> BodyCode {
        match self {
            BodyKind::Rpp { .. } => BodyCode::Rpp,
            BodyKind::Box { .. } => BodyCode::Box,
            BodyKind::Sph { .. } => BodyCode::Sph,
            BodyKind::Rcc { .. } => BodyCode::Rcc,
            BodyKind::Rec { .. } => BodyCode::Rec,
            BodyKind::Trc { .. } => BodyCode::Trc,
            BodyKind::Ell { .. } => BodyCode::Ell,
            BodyKind::Arb { .. } => BodyCode::Arb,
            BodyKind::Xyp { .. } => BodyCode::Xyp,
            BodyKind::Xzp { .. } => BodyCode::Xzp,
            BodyKind::Yzp { .. } => BodyCode::Yzp,
            BodyKind::Pla { .. } => BodyCode::Pla,
            BodyKind::Xcc { .. } => BodyCode::Xcc,
            BodyKind::Ycc { .. } => BodyCode::Ycc,
            BodyKind::Zcc { .. } => BodyCode::Zcc,
            BodyKind::Xec { .. } => BodyCode::Xec,
            BodyKind::Yec { .. } => BodyCode::Yec,
            BodyKind::Zec { .. } => BodyCode::Zec,
            BodyKind::Qua { .. } => BodyCode::Qua,
        }
    }

    /// Card parameters in card order; inverse of [`BodyKind::from_card`].
    pub fn params(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.code().param_count());
        match self {
            BodyKind::Rpp { min, max } => {
                return vec![min.x, max.x, min.y, max.y, min.z, max.z];
            }
            BodyKind::Box { vertex, edges } => {
                push(&mut out, *vertex);
                edges.iter().for_each(|e| push(&mut out, *e));
            }
            BodyKind::Sph { centre, radius } => {
                push(&mut out, *centre);
                out.push(*radius);
            }
            BodyKind::Rcc { base, height, radius } => {
                push(&mut out, *base);
                push(&mut out, *height);
                out.push(*radius);
            }
            BodyKind::Rec {
                base,
                height,
                semi_a,
                semi_b,
            } => {
                push(&mut out, *base);
                push(&mut out, *height);
                push(&mut out, *semi_a);
                push(&mut out, *semi_b);
            }
            BodyKind::Trc {
                base,
                height,
                base_radius,
                top_radius,
            } => {
                push(&mut out, *base);
                push(&mut out, *height);
                out.extend_from_slice(&[*base_radius, *top_radius]);
            }
            BodyKind::Ell { focus1, focus2, length } => {
                push(&mut out, *focus1);
                push(&mut out, *focus2);
                out.push(*length);
            }
            BodyKind::Arb { vertices, faces } => {
                vertices.iter().for_each(|v| push(&mut out, *v));
                out.extend_from_slice(faces);
            }
            BodyKind::Xyp { z: value } | BodyKind::Xzp { y: value } | BodyKind::Yzp { x: value } => {
                out.push(*value);
            }
            BodyKind::Pla { normal, point } => {
                push(&mut out, *normal);
                push(&mut out, *point);
            }
            BodyKind::Xcc { y: a, z: b, radius }
            | BodyKind::Ycc { z: a, x: b, radius }
            | BodyKind::Zcc { x: a, y: b, radius } => {
                out.extend_from_slice(&[*a, *b, *radius]);
            }
            BodyKind::Xec { y: a, z: b, ry: ra, rz: rb }
            | BodyKind::Yec { z: a, x: b, rz: ra, rx: rb }
            | BodyKind::Zec { x: a, y: b, rx: ra, ry: rb } => {
                out.extend_from_slice(&[*a, *b, *ra, *rb]);
            }
            BodyKind::Qua { coefficients } => out.extend_from_slice(coefficients),
        }
        out
    }

    /// Checks the geometric sanity of the parameters.
    pub fn validate(&self) -> Result<(), String> {
        if self.params().iter().any(|p| !p.is_finite()) {
            return Err("parameters must be finite".to_string());
        }
        match self {
            BodyKind::Rpp { min, max } => {
                if min.cmpge(*max).any() {
                    return Err(format!("RPP bounds must satisfy min < max, got {min} and {max}"));
                }
            }
            BodyKind::Box { edges, .. } => {
                if edges.iter().any(|e| e.length() <= EPSILON) {
                    return Err("BOX edges must have non-zero length".to_string());
                }
                let pairs = [(0, 1), (0, 2), (1, 2)];
                for (i, j) in pairs {
                    let (a, b) = (edges[i], edges[j]);
                    if a.dot(b).abs() > ORTHOGONALITY_TOLERANCE * a.length() * b.length() {
                        return Err(format!("BOX edges {} and {} are not perpendicular", i + 1, j + 1));
                    }
                }
            }
            BodyKind::Sph { radius, .. } => positive("radius", *radius)?,
            BodyKind::Rcc { height, radius, .. } => {
                non_zero("height", *height)?;
                positive("radius", *radius)?;
            }
            BodyKind::Rec {
                height,
                semi_a,
                semi_b,
                ..
            } => {
                non_zero("height", *height)?;
                non_zero("first semi-axis", *semi_a)?;
                non_zero("second semi-axis", *semi_b)?;
                let tol = ORTHOGONALITY_TOLERANCE;
                if semi_a.dot(*height).abs() > tol * semi_a.length() * height.length()
                    || semi_b.dot(*height).abs() > tol * semi_b.length() * height.length()
                    || semi_a.dot(*semi_b).abs() > tol * semi_a.length() * semi_b.length()
                {
                    return Err("REC axis vectors must be mutually perpendicular".to_string());
                }
            }
            BodyKind::Trc {
                height,
                base_radius,
                top_radius,
                ..
            } => {
                non_zero("height", *height)?;
                if *base_radius < 0.0 || *top_radius < 0.0 {
                    return Err("TRC radii must not be negative".to_string());
                }
                if base_radius.max(*top_radius) <= EPSILON {
                    return Err("TRC needs a non-zero radius".to_string());
                }
            }
            BodyKind::Ell { focus1, focus2, length } => {
                if *length <= focus1.distance(*focus2) {
                    return Err(format!(
                        "ELL length {length} must exceed the focal distance {}",
                        focus1.distance(*focus2)
                    ));
                }
            }
            BodyKind::Arb { .. } => {
                super::shape::arb_planes(self)?;
            }
            BodyKind::Pla { normal, .. } => non_zero("normal", *normal)?,
            BodyKind::Xcc { radius, .. } | BodyKind::Ycc { radius, .. } | BodyKind::Zcc { radius, .. } => {
                positive("radius", *radius)?;
            }
            BodyKind::Xec { ry: a, rz: b, .. }
            | BodyKind::Yec { rz: a, rx: b, .. }
            | BodyKind::Zec { rx: a, ry: b, .. } => {
                positive("semi-axis", *a)?;
                positive("semi-axis", *b)?;
            }
            BodyKind::Xyp { .. } | BodyKind::Xzp { .. } | BodyKind::Yzp { .. } | BodyKind::Qua { .. } => {}
        }
        Ok(())
    }

    /// The same body with every length multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> BodyKind {
        let s = factor;
        match self {
            BodyKind::Qua { coefficients: c } => {
                // f(p / s) keeps the surface scaled about the origin
                let s2 = s * s;
                BodyKind::Qua {
                    coefficients: [
                        c[0] / s2,
                        c[1] / s2,
                        c[2] / s2,
                        c[3] / s2,
                        c[4] / s2,
                        c[5] / s2,
                        c[6] / s,
                        c[7] / s,
                        c[8] / s,
                        c[9],
                    ],
                }
            }
            BodyKind::Arb { vertices, faces } => BodyKind::Arb {
                vertices: vertices.map(|v| v * s),
                faces: *faces,
            },
            BodyKind::Pla { normal, point } => BodyKind::Pla {
                normal: *normal,
                point: *point * s,
            },
            other => {
                let params: Vec<f64> = other.params().iter().map(|p| p * s).collect();
                // same code and same parameter count, so this cannot fail
                BodyKind::from_card(other.code(), &params).unwrap_or_else(|_| other.clone())
            }
        }
    }

    /// Whether the body extends to [`config::constants::INFINITY`].
    pub fn is_infinite(&self) -> bool {
        matches!(
            self,
            BodyKind::Xyp { .. }
                | BodyKind::Xzp { .. }
                | BodyKind::Yzp { .. }
                | BodyKind::Pla { .. }
                | BodyKind::Xcc { .. }
                | BodyKind::Ycc { .. }
                | BodyKind::Zcc { .. }
                | BodyKind::Xec { .. }
                | BodyKind::Yec { .. }
                | BodyKind::Zec { .. }
                | BodyKind::Qua { .. }
        )
    }
}

fn push(out: &mut Vec<f64>, v: DVec3) {
    out.extend_from_slice(&v.to_array());
}

fn positive(what: &str, value: f64) -> Result<(), String> {
    if value > EPSILON {
        Ok(())
    } else {
        Err(format!("{what} must be positive, got {value}"))
    }
}

fn non_zero(what: &str, value: DVec3) -> Result<(), String> {
    if value.length() > EPSILON {
        Ok(())
    } else {
        Err(format!("{what} vector must be non-zero"))
    }
}
