//! Modular arithmetic over unsigned integers of unbounded width.
//!
//! Operands may be larger than the modulus; they are reduced internally.
//! A zero modulus is a contract violation and panics.

use num_bigint::BigUint;
use num_traits::{One, Zero};

/// `(a + b) % m`
pub fn add_mod(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    assert!(!m.is_zero(), "modulus must be non-zero");
    (a % m + b % m) % m
}

/// `(a - b) % m`, wrapping around the modulus when `a % m < b % m`.
pub fn sub_mod(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    assert!(!m.is_zero(), "modulus must be non-zero");
    (a % m + (m - b % m)) % m
}

/// `(a * b) % m`
pub fn mul_mod(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    assert!(!m.is_zero(), "modulus must be non-zero");
    a % m * (b % m) % m
}

/// `base^exp % m` by binary square-and-multiply, scanning the exponent from
/// the least significant bit up.
pub fn pow_mod(base: &BigUint, exp: &BigUint, m: &BigUint) -> BigUint {
    assert!(!m.is_zero(), "modulus must be non-zero");
    if m.is_one() {
        return BigUint::zero();
    }

    let (mut r, mut b) = (BigUint::one(), base % m);
    for i in 0..exp.bits() {
        if exp.bit(i) {
            r = &r * &b % m;
        }
        b = &b * &b % m;
    }
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::Num;

    fn big(s: &str) -> BigUint {
        BigUint::from_str_radix(s, 16).expect("can't convert str to big uint")
    }

    #[test]
    fn operands_larger_than_modulus() {
        let m = BigUint::from(97u8);
        let (a, b) = (BigUint::from(1000u32), BigUint::from(2500u32));

        assert_eq!(add_mod(&a, &b, &m), BigUint::from((1000u32 + 2500) % 97));
        assert_eq!(mul_mod(&a, &b, &m), BigUint::from(1000u32 * 2500 % 97));
        // 1000 % 97 = 30, 2500 % 97 = 75, 30 - 75 wraps to 52
        assert_eq!(sub_mod(&a, &b, &m), BigUint::from(52u8));
        assert_eq!(sub_mod(&b, &a, &m), BigUint::from(45u8));
    }

    #[test]
    fn pow_mod_matches_modpow() {
        let cases = [
            (
                "a5e198f3b1619971e077ce9186615d47cc45340d7d1f8c4fa8f998884f934f62",
                "10001",
                "c5d940adfaee20d634f1aed7768dc40b050873f75e4d2eb192eba01db5896a90c4362c7a3f83cd3116aebc178dcb00cb321d760d9c9edfe4fb191f6c169b8c5b",
            ),
            (
                "2",
                "77db0681e603c83450e5201b64064bb909ee62caf04270464aa875bee008674e",
                "d6a304998f9c9c81afdc04d39adab29ef4c98574cfa73464bee5dc16c36e1d95",
            ),
            ("ffffffffffffffffffffffff", "2", "5"),
        ];

        for (a, e, m) in cases {
            let (a, e, m) = (big(a), big(e), big(m));
            assert_eq!(pow_mod(&a, &e, &m), a.modpow(&e, &m));
        }
    }

    #[test]
    fn pow_mod_edge_exponents() {
        let m = BigUint::from(3233u32);
        let a = BigUint::from(65u32);
        assert_eq!(pow_mod(&a, &BigUint::zero(), &m), BigUint::one());
        assert_eq!(pow_mod(&a, &BigUint::one(), &m), a);
        assert_eq!(pow_mod(&a, &BigUint::from(2u8), &BigUint::one()), BigUint::zero());
    }

    #[test]
    #[should_panic(expected = "modulus must be non-zero")]
    fn zero_modulus_panics() {
        pow_mod(
            &BigUint::from(2u8),
            &BigUint::from(3u8),
            &BigUint::zero(),
        );
    }
}
