// 📐 Triangle Solver
//
// Side i is opposite angle i (a ↔ A, b ↔ B, c ↔ C). Angles are degrees.
// Any three values with at least one side determine the triangle, except
// the SSA case which may give zero, one or two triangles.

use crate::error::{CalcError, CalcResult};
use serde::{Deserialize, Serialize};

const TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TriangleInput {
    pub a: Option<f64>,
    pub b: Option<f64>,
    pub c: Option<f64>,
    #[serde(rename = "A", alias = "alpha")]
    pub angle_a: Option<f64>,
    #[serde(rename = "B", alias = "beta")]
    pub angle_b: Option<f64>,
    #[serde(rename = "C", alias = "gamma")]
    pub angle_c: Option<f64>,
}

impl TriangleInput {
    fn sides(&self) -> [Option<f64>; 3] {
        [self.a, self.b, self.c]
    }

    fn angles(&self) -> [Option<f64>; 3] {
        [self.angle_a, self.angle_b, self.angle_c]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SideClass {
    Equilateral,
    Isosceles,
    Scalene,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleClass {
    Acute,
    Right,
    Obtuse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    /// a, b, c
    pub sides: [f64; 3],
    /// A, B, C in degrees
    pub angles: [f64; 3],
    pub area: f64,
    pub perimeter: f64,
    pub inradius: f64,
    pub circumradius: f64,
    pub side_class: SideClass,
    pub angle_class: AngleClass,
}

impl Triangle {
    fn from_sides_and_angles(sides: [f64; 3], angles: [f64; 3]) -> Self {
        let perimeter = sides.iter().sum::<f64>();
        let area = 0.5 * sides[0] * sides[1] * angles[2].to_radians().sin();
        let s = perimeter / 2.0;

        let rel = |x: f64, y: f64| (x - y).abs() <= 1e-9 * x.max(y).max(1.0);
        let side_class = if rel(sides[0], sides[1]) && rel(sides[1], sides[2]) {
            SideClass::Equilateral
        } else if rel(sides[0], sides[1]) || rel(sides[1], sides[2]) || rel(sides[0], sides[2]) {
            SideClass::Isosceles
        } else {
            SideClass::Scalene
        };

        let largest = angles.iter().cloned().fold(0.0, f64::max);
        let angle_class = if (largest - 90.0).abs() <= 1e-7 {
            AngleClass::Right
        } else if largest > 90.0 {
            AngleClass::Obtuse
        } else {
            AngleClass::Acute
        };

        Triangle {
            sides,
            angles,
            area,
            perimeter,
            inradius: area / s,
            circumradius: sides[0] / (2.0 * angles[0].to_radians().sin()),
            side_class,
            angle_class,
        }
    }
}

fn check_values(input: &TriangleInput) -> CalcResult<()> {
    const SIDE_NAMES: [&str; 3] = ["a", "b", "c"];
    const ANGLE_NAMES: [&str; 3] = ["A", "B", "C"];

    for (name, side) in SIDE_NAMES.iter().zip(input.sides()) {
        if let Some(v) = side {
            if !v.is_finite() || v <= 0.0 {
                return Err(CalcError::invalid(name, "side must be greater than 0"));
            }
        }
    }
    for (name, angle) in ANGLE_NAMES.iter().zip(input.angles()) {
        if let Some(v) = angle {
            if !v.is_finite() || v <= 0.0 || v >= 180.0 {
                return Err(CalcError::invalid(name, "angle must be between 0 and 180 degrees"));
            }
        }
    }

    let known_sides = input.sides().iter().flatten().count();
    let known_angles = input.angles().iter().flatten().count();
    if known_sides + known_angles != 3 {
        return Err(CalcError::invalid(
            "values",
            format!("enter exactly three values, got {}", known_sides + known_angles),
        ));
    }
    if known_sides == 0 {
        return Err(CalcError::NoSolution(
            "three angles fix the shape but not the size; enter at least one side".to_string(),
        ));
    }
    Ok(())
}

/// Solve the triangle. Returns one solution, or two for ambiguous SSA.
pub fn solve(input: &TriangleInput) -> CalcResult<Vec<Triangle>> {
    check_values(input)?;

    let sides = input.sides();
    let angles = input.angles();
    let known_angles = angles.iter().flatten().count();

    if known_angles >= 2 {
        return solve_two_angles(sides, angles).map(|t| vec![t]);
    }

    if known_angles == 0 {
        let [a, b, c] = [sides[0], sides[1], sides[2]].map(|s| s.unwrap_or_default());
        return solve_sss([a, b, c]).map(|t| vec![t]);
    }

    // Two sides and one angle
    let k = angles.iter().position(|a| a.is_some()).unwrap_or(0);
    let angle = angles[k].unwrap_or_default();

    match sides[k] {
        None => {
            // Included angle: law of cosines for the opposite side
            let (i, j) = ((k + 1) % 3, (k + 2) % 3);
            let (si, sj) = (sides[i].unwrap_or_default(), sides[j].unwrap_or_default());
            let sk = (si * si + sj * sj - 2.0 * si * sj * angle.to_radians().cos()).sqrt();
            let mut all = [0.0; 3];
            all[i] = si;
            all[j] = sj;
            all[k] = sk;
            solve_sss(all).map(|t| vec![t])
        }
        Some(sk) => solve_ssa(sides, k, sk, angle),
    }
}

fn solve_two_angles(sides: [Option<f64>; 3], angles: [Option<f64>; 3]) -> CalcResult<Triangle> {
    let known_sum: f64 = angles.iter().flatten().sum();
    if known_sum >= 180.0 - TOLERANCE {
        return Err(CalcError::NoSolution(
            "the angles must add up to less than 180 degrees".to_string(),
        ));
    }

    let mut all_angles = [0.0; 3];
    for i in 0..3 {
        all_angles[i] = angles[i].unwrap_or(180.0 - known_sum);
    }

    let k = sides.iter().position(|s| s.is_some()).unwrap_or(0);
    let ratio = sides[k].unwrap_or_default() / all_angles[k].to_radians().sin();
    let mut all_sides = [0.0; 3];
    for i in 0..3 {
        all_sides[i] = ratio * all_angles[i].to_radians().sin();
    }

    Ok(Triangle::from_sides_and_angles(all_sides, all_angles))
}

fn solve_sss(sides: [f64; 3]) -> CalcResult<Triangle> {
    let [a, b, c] = sides;
    if a + b <= c || a + c <= b || b + c <= a {
        return Err(CalcError::NoSolution(
            "each side must be shorter than the other two combined".to_string(),
        ));
    }

    let angle = |opp: f64, x: f64, y: f64| {
        ((x * x + y * y - opp * opp) / (2.0 * x * y))
            .clamp(-1.0, 1.0)
            .acos()
            .to_degrees()
    };
    let angle_a = angle(a, b, c);
    let angle_b = angle(b, a, c);
    let angle_c = 180.0 - angle_a - angle_b;

    Ok(Triangle::from_sides_and_angles(sides, [angle_a, angle_b, angle_c]))
}

/// Known angle k with its opposite side sk, plus one more side
fn solve_ssa(sides: [Option<f64>; 3], k: usize, sk: f64, angle_k: f64) -> CalcResult<Vec<Triangle>> {
    let j = (0..3)
        .find(|&i| i != k && sides[i].is_some())
        .unwrap_or((k + 1) % 3);
    let m = 3 - k - j;
    let sj = sides[j].unwrap_or_default();

    let sin_j = sj * angle_k.to_radians().sin() / sk;
    if sin_j > 1.0 + TOLERANCE {
        return Err(CalcError::NoSolution(format!(
            "side {:.4} is too short to reach the opposite side",
            sk
        )));
    }

    let first = sin_j.min(1.0).asin().to_degrees();
    let mut candidates = vec![first];
    if (first - 90.0).abs() > 1e-7 {
        candidates.push(180.0 - first);
    }

    let solutions: Vec<Triangle> = candidates
        .into_iter()
        .filter(|angle_j| angle_k + angle_j < 180.0 - TOLERANCE)
        .map(|angle_j| {
            let angle_m = 180.0 - angle_k - angle_j;
            let sm = sk * angle_m.to_radians().sin() / angle_k.to_radians().sin();
            let mut all_sides = [0.0; 3];
            let mut all_angles = [0.0; 3];
            all_sides[k] = sk;
            all_sides[j] = sj;
            all_sides[m] = sm;
            all_angles[k] = angle_k;
            all_angles[j] = angle_j;
            all_angles[m] = angle_m;
            Triangle::from_sides_and_angles(all_sides, all_angles)
        })
        .collect();

    if solutions.is_empty() {
        return Err(CalcError::NoSolution(
            "the given angle leaves no room for the third angle".to_string(),
        ));
    }
    Ok(solutions)
}
