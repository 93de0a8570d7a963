// 📐 Triangle Calculator

use super::Calculator;
use crate::error::{CalcError, CalcResult};
use crate::export::{fmt2, Report};
use crate::math::{solve_triangle, AngleClass, SideClass, Triangle, TriangleInput};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriangleOutput {
    /// One triangle, or two for the ambiguous side-side-angle case
    pub solutions: Vec<Triangle>,
}

pub struct TriangleCalculator;

impl Calculator for TriangleCalculator {
    const KEY: &'static str = "triangle";
    const TITLE: &'static str = "Triangle Calculator";

    type Input = TriangleInput;
    type Output = TriangleOutput;

    fn validate(input: &TriangleInput) -> CalcResult<()> {
        let given = [input.a, input.b, input.c, input.angle_a, input.angle_b, input.angle_c]
            .iter()
            .flatten()
            .count();
        if given < 3 {
            return Err(CalcError::MissingField(
                "three of the sides a, b, c and angles A, B, C".to_string(),
            ));
        }
        Ok(())
    }

    fn compute(input: &TriangleInput) -> CalcResult<TriangleOutput> {
        let solutions = solve_triangle(input)?;
        Ok(TriangleOutput { solutions })
    }
}

fn side_class_name(class: SideClass) -> &'static str {
    match class {
        SideClass::Equilateral => "equilateral",
        SideClass::Isosceles => "isosceles",
        SideClass::Scalene => "scalene",
    }
}

fn angle_class_name(class: AngleClass) -> &'static str {
    match class {
        AngleClass::Acute => "acute",
        AngleClass::Right => "right",
        AngleClass::Obtuse => "obtuse",
    }
}

impl Report for TriangleOutput {
    fn summary(&self) -> Vec<(String, String)> {
        let mut lines = vec![("Solutions".to_string(), self.solutions.len().to_string())];
        for (i, t) in self.solutions.iter().enumerate() {
            lines.push((
                format!("Triangle {}", i + 1),
                format!("{} {}", angle_class_name(t.angle_class), side_class_name(t.side_class)),
            ));
        }
        lines
    }

    fn headers(&self) -> Vec<String> {
        [
            "#", "a", "b", "c", "A", "B", "C", "Area", "Perimeter", "Inradius", "Circumradius",
        ]
        .iter()
        .map(|h| h.to_string())
        .collect()
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.solutions
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let mut row = vec![(i + 1).to_string()];
                row.extend(t.sides.iter().map(|&v| fmt2(v)));
                row.extend(t.angles.iter().map(|&v| fmt2(v)));
                row.push(fmt2(t.area));
                row.push(fmt2(t.perimeter));
                row.push(fmt2(t.inradius));
                row.push(fmt2(t.circumradius));
                row
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_right_triangle_from_sides() {
        let input = TriangleInput {
            a: Some(3.0),
            b: Some(4.0),
            c: Some(5.0),
            ..Default::default()
        };
        let out = TriangleCalculator::calculate(&input).unwrap();

        assert_eq!(out.solutions.len(), 1);
        let t = &out.solutions[0];
        assert!((t.area - 6.0).abs() < 1e-9);
        assert_eq!(t.angle_class, AngleClass::Right);
        assert_eq!(out.rows()[0][7], "6.00");
        assert_eq!(out.summary()[1].1, "right scalene");
    }

    #[test]
    fn test_ambiguous_case_gives_two_rows() {
        let input = TriangleInput {
            a: Some(8.0),
            b: Some(10.0),
            angle_a: Some(40.0),
            ..Default::default()
        };
        let out = TriangleCalculator::calculate(&input).unwrap();
        assert_eq!(out.solutions.len(), 2);
        assert_eq!(out.rows().len(), 2);
    }

    #[test]
    fn test_too_few_values() {
        let input = TriangleInput {
            a: Some(3.0),
            angle_b: Some(50.0),
            ..Default::default()
        };
        assert!(matches!(
            TriangleCalculator::calculate(&input),
            Err(CalcError::MissingField(_))
        ));
    }

    #[test]
    fn test_json_angle_keys() {
        let input: TriangleInput = serde_json::from_value(json!({ "c": 10.0, "A": 30.0, "B": 60.0 })).unwrap();
        let out = TriangleCalculator::calculate(&input).unwrap();
        assert!((out.solutions[0].angles[2] - 90.0).abs() < 1e-9);
    }
}
