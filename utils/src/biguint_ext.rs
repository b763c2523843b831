use crate::mod_arith;
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{Euclid, One, Zero};
use rand::Rand;
use std::borrow::Borrow;
use std::ops::Deref;

/// Witness set that makes the Miller-Rabin test deterministic for any
/// n < 2^64.
const WITNESSES: [u8; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

const SMALL_PRIMES: [u8; 15] = [3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53];

pub struct BigUintExt<T: Borrow<BigUint>>(pub T);

impl<T: Borrow<BigUint>> Deref for BigUintExt<T> {
    type Target = BigUint;
    fn deref(&self) -> &Self::Target {
        self.0.borrow()
    }
}

impl<T: Borrow<BigUint>> BigUintExt<T> {
    /// `self * inv = 1 % modulus`, `None` if `self` and `modulus` are not coprime.
    pub fn modinv(&self, modulus: &BigUint) -> Option<BigUint> {
        let (a, n) = (
            BigInt::from(self.deref() % modulus),
            BigInt::from(modulus.clone()),
        );
        let g = a.extended_gcd(&n);
        g.gcd.is_one().then_some(
            g.x.rem_euclid(&n)
                .to_biguint()
                .expect("remainder of a positive modulus is non-negative"),
        )
    }

    /// Uniform random number in `[0, self)`.
    pub fn gen_random<R: Rand>(&self, rng: &mut R) -> BigUint {
        let bits = self.bits() as usize;
        let mut n = vec![0u8; (bits + 7) >> 3];

        loop {
            rng.rand(n.as_mut_slice());
            let r = BigUint::from_bytes_le(n.as_slice());
            if self.deref() > &r {
                return r;
            }
        }
    }

    /// Deterministic Miller-Rabin test against the fixed witness set
    /// {2, 3, ..., 37}. The answer is exact for any `self < 2^64`; above that
    /// bound a pass only means "no fixed witness proved compositeness" and
    /// [`Self::probably_prime_test`] should be used instead.
    pub fn is_probable_prime(&self) -> bool {
        let n = self.deref();
        if n < &BigUint::from(2u8) {
            return false;
        }
        if n <= &BigUint::from(3u8) {
            return true;
        }
        if n.is_even() {
            return false;
        }

        // n - 1 = 2^k * q with q odd
        let n_m1 = n - 1u32;
        let k = n_m1.trailing_zeros().unwrap_or(0);
        let q = &n_m1 >> k;

        for &a in WITNESSES.iter() {
            let a = BigUint::from(a);
            if a >= n_m1 {
                // n is too small for this and any later witness
                return true;
            }
            if self.miller_rabin_witness(k, &q, &n_m1, &a) {
                return false;
            }
        }
        true
    }

    /// Probabilistic Miller-Rabin test with `test_rounds` uniformly sampled
    /// bases. For any odd composite the chance of passing is at most
    /// `4^-test_rounds`. Values below 2^64 are settled exactly by the fixed
    /// witness set.
    pub fn probably_prime_test<R: Rand>(&self, test_rounds: usize, rng: &mut R) -> bool {
        let n = self.deref();
        if n.bits() <= 64 {
            return self.is_probable_prime();
        }
        if n.is_even() {
            return false;
        }

        for &p in SMALL_PRIMES.iter() {
            if (n % (p as u32)).is_zero() {
                return false;
            }
        }

        let n_m1 = n - 1u32;
        let k = n_m1.trailing_zeros().unwrap_or(0);
        let q = &n_m1 >> k;

        let mut rounds = 0;
        while rounds < test_rounds {
            let a = BigUintExt(&n_m1).gen_random(rng);
            if a < BigUint::from(2u8) {
                continue;
            }
            rounds += 1;
            if self.miller_rabin_witness(k, &q, &n_m1, &a) {
                return false;
            }
        }
        true
    }

    /// Returns true if the base `a` proves `self` composite.
    ///
    /// `self - 1 = 2^k * q` with `q` odd, `1 < a < self - 1`.
    fn miller_rabin_witness(&self, k: u64, q: &BigUint, n_m1: &BigUint, a: &BigUint) -> bool {
        let n = self.deref();
        let mut t = mod_arith::pow_mod(a, q, n);
        if t.is_one() || &t == n_m1 {
            return false;
        }

        for _ in 1..k {
            t = mod_arith::mul_mod(&t, &t, n);
            if &t == n_m1 {
                return false;
            }
        }
        true
    }

    /// Generate a prime of exactly `bits_len` bits by rejection sampling.
    /// Candidates have the top and bottom bits forced so they are odd and of
    /// full width; acceptance is `probably_prime_test` with `test_rounds`
    /// random bases.
    pub fn generate_prime<R: Rand>(
        bits_len: usize,
        test_rounds: usize,
        rng: &mut R,
    ) -> Result<BigUint, String> {
        if bits_len < 2 {
            return Err("prime size must be at least 2-bits".to_string());
        }

        let mut buf = vec![0u8; (bits_len + 7) >> 3];
        let excess = (buf.len() << 3) - bits_len;
        loop {
            rng.rand(buf.as_mut_slice());

            // clear bits above the requested width, set the top and low bits
            buf[0] &= 0xff >> excess;
            buf[0] |= 0x80 >> excess;
            if let Some(x) = buf.last_mut() {
                *x |= 1;
            }

            let n = BigUintExt(BigUint::from_bytes_be(buf.as_slice()));
            if n.probably_prime_test(test_rounds, rng) {
                return Ok(n.0);
            }
        }
    }
}
