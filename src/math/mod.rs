// Number theory and geometry helpers for the math calculators

pub mod number_theory;
pub mod triangle;

pub use number_theory::{
    format_factorization, gcd, gcd_all, gcd_by_factorization, is_prime, lcm, lcm_all,
    lcm_by_factorization, prime_factorization,
};
pub use triangle::{solve as solve_triangle, AngleClass, SideClass, Triangle, TriangleInput};
