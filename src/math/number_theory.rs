// 🔢 Number Theory - GCF / LCM / prime factorization

use crate::error::{CalcError, CalcResult};

/// Euclidean algorithm
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// Least common multiple, erroring on u64 overflow
pub fn lcm(a: u64, b: u64) -> CalcResult<u64> {
    if a == 0 || b == 0 {
        return Ok(0);
    }
    (a / gcd(a, b))
        .checked_mul(b)
        .ok_or_else(|| CalcError::Overflow(format!("LCM of {} and {}", a, b)))
}

pub fn gcd_all(numbers: &[u64]) -> u64 {
    numbers.iter().fold(0, |acc, &n| gcd(acc, n))
}

pub fn lcm_all(numbers: &[u64]) -> CalcResult<u64> {
    if numbers.is_empty() {
        return Ok(0);
    }
    numbers.iter().try_fold(1, |acc, &n| lcm(acc, n))
}

pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }
    let mut i = 5u64;
    while i.saturating_mul(i) <= n {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}

/// Trial division. Returns (prime, exponent) pairs in ascending order;
/// 0 and 1 have no factors.
pub fn prime_factorization(mut n: u64) -> Vec<(u64, u32)> {
    let mut factors = Vec::new();
    if n < 2 {
        return factors;
    }

    let mut divisor = 2u64;
    while divisor.saturating_mul(divisor) <= n {
        if n % divisor == 0 {
            let mut exponent = 0;
            while n % divisor == 0 {
                n /= divisor;
                exponent += 1;
            }
            factors.push((divisor, exponent));
        }
        divisor += if divisor == 2 { 1 } else { 2 };
    }
    if n > 1 {
        factors.push((n, 1));
    }
    factors
}

/// GCF from the minimum shared exponents
pub fn gcd_by_factorization(numbers: &[u64]) -> u64 {
    if numbers.is_empty() || numbers.contains(&0) {
        return gcd_all(numbers);
    }

    let factorizations: Vec<Vec<(u64, u32)>> =
        numbers.iter().map(|&n| prime_factorization(n)).collect();

    factorizations[0]
        .iter()
        .filter_map(|&(prime, _)| {
            factorizations
                .iter()
                .map(|f| f.iter().find(|(p, _)| *p == prime).map(|(_, e)| *e))
                .min()
                .flatten()
                .map(|exp| prime.pow(exp))
        })
        .product()
}

/// LCM from the maximum exponents
pub fn lcm_by_factorization(numbers: &[u64]) -> CalcResult<u64> {
    if numbers.is_empty() || numbers.contains(&0) {
        return lcm_all(numbers);
    }

    let mut exponents: Vec<(u64, u32)> = Vec::new();
    for &n in numbers {
        for (prime, exp) in prime_factorization(n) {
            match exponents.iter_mut().find(|(p, _)| *p == prime) {
                Some(entry) => entry.1 = entry.1.max(exp),
                None => exponents.push((prime, exp)),
            }
        }
    }

    exponents.iter().try_fold(1u64, |acc, &(prime, exp)| {
        prime
            .checked_pow(exp)
            .and_then(|power| acc.checked_mul(power))
            .ok_or_else(|| CalcError::Overflow(format!("LCM of {:?}", numbers)))
    })
}

/// "2^3 × 3 × 5"
pub fn format_factorization(n: u64) -> String {
    let factors = prime_factorization(n);
    if factors.is_empty() {
        return n.to_string();
    }
    factors
        .iter()
        .map(|&(p, e)| if e == 1 { p.to_string() } else { format!("{}^{}", p, e) })
        .collect::<Vec<_>>()
        .join(" × ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gcd_and_lcm() {
        assert_eq!(gcd(48, 18), 6);
        assert_eq!(gcd(17, 5), 1);
        assert_eq!(gcd(0, 9), 9);
        assert_eq!(lcm(4, 6).unwrap(), 12);
        assert_eq!(lcm(0, 6).unwrap(), 0);
    }

    #[test]
    fn test_many_numbers() {
        assert_eq!(gcd_all(&[24, 36, 60]), 12);
        assert_eq!(lcm_all(&[4, 6, 10]).unwrap(), 60);
    }

    #[test]
    fn test_lcm_overflow() {
        let err = lcm(u64::MAX, u64::MAX - 1).unwrap_err();
        assert!(matches!(err, CalcError::Overflow(_)));
    }

    #[test]
    fn test_prime_factorization() {
        assert_eq!(prime_factorization(360), vec![(2, 3), (3, 2), (5, 1)]);
        assert_eq!(prime_factorization(97), vec![(97, 1)]);
        assert!(prime_factorization(1).is_empty());
        assert_eq!(format_factorization(360), "2^3 × 3^2 × 5");
        assert_eq!(format_factorization(1), "1");
    }

    #[test]
    fn test_is_prime() {
        let primes: Vec<u64> = (0..30).filter(|&n| is_prime(n)).collect();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
        assert!(is_prime(1_000_000_007));
    }

    #[test]
    fn test_factorization_agrees_with_euclid() {
        let sets: [&[u64]; 4] = [&[24, 36, 60], &[7, 13], &[100, 75, 50], &[12, 18, 30, 42]];
        for set in sets {
            assert_eq!(gcd_by_factorization(set), gcd_all(set), "gcf {:?}", set);
            assert_eq!(lcm_by_factorization(set).unwrap(), lcm_all(set).unwrap(), "lcm {:?}", set);
        }
    }
}
