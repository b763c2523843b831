use crate::{rsa::rsa_transform, CipherError, Rand};
use log::debug;
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use utils::{octets, BigUintExt};

/// F4, the common fixed public exponent.
pub const F4: u32 = 65537;

/// Number of random-base Miller-Rabin rounds used for prime candidates. The
/// fixed witness set is only exact below 2^64, large candidates get `2^-100`
/// error probability instead.
const PRIME_TEST_ROUNDS: usize = 50;

/// Public exponent selection policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExponentMode {
    /// e = 65537, falling back to random sampling in the unlikely case that
    /// 65537 divides lambda(n).
    Fixed,
    /// e sampled uniformly from (1, lambda(n)) until coprime to lambda(n).
    Random,
}

#[derive(Clone, Debug, PartialOrd, PartialEq, Ord, Eq, Serialize, Deserialize)]
pub struct PublicKey {
    // n = p * q
    n: BigUint,
    // public exponent, gcd(e, lambda(n)) = 1
    e: BigUint,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PrivateKey {
    pk: PublicKey,
    // d * e = 1 % lambda(n)
    d: BigUint,
    // lambda(n) = lcm(p-1, q-1), kept by the generator so the key can be
    // revalidated; keys rebuilt from octet strings do not have it
    lambda: Option<BigUint>,
}

impl PublicKey {
    /// note: not to check the `n` and `exp` are right RSA parameters
    pub fn new_uncheck(n: BigUint, exp: BigUint) -> Self {
        Self { e: exp, n }
    }

    /// note: not to check the `n` and `exp` are right RSA parameters
    pub fn from_be_bytes(n: &[u8], exp: &[u8]) -> Self {
        Self {
            e: BigUint::from_bytes_be(exp),
            n: BigUint::from_bytes_be(n),
        }
    }

    /// n
    pub fn modulus(&self) -> &BigUint {
        &self.n
    }

    /// e
    pub fn exponent(&self) -> &BigUint {
        &self.e
    }

    /// 公钥modulus占用的字节数
    pub fn key_len(&self) -> usize {
        (self.n.bits() as usize + 7) >> 3
    }

    /// RSAEP: RSA encrypt primitive, `m^e mod n`
    pub fn rsaep(&self, m: &BigUint) -> Result<BigUint, CipherError> {
        rsa_transform(m, &self.e, &self.n)
    }

    pub fn is_valid(&self) -> Result<(), CipherError> {
        if self.e < BigUint::from(3u8) {
            Err(CipherError::InvalidPublicKey(format!(
                "rsa: public exponent {:#x} is too small",
                self.e
            )))
        } else if self.e.is_even() {
            // lambda(n) is even, an even exponent cannot be coprime to it
            Err(CipherError::InvalidPublicKey(format!(
                "rsa: public exponent {:#x} is even",
                self.e
            )))
        } else if self.e >= self.n {
            Err(CipherError::InvalidPublicKey(
                "rsa: public exponent is not less than the modulus".to_string(),
            ))
        } else {
            Ok(())
        }
    }

    /// `(e, n)` as big-endian octet strings of the key width.
    ///
    /// Fails when the exponent does not fit the key width, which only keys
    /// built through the unchecked constructors can carry.
    pub fn to_be_bytes(&self) -> Result<(Vec<u8>, Vec<u8>), CipherError> {
        let klen = self.key_len();
        let e = octets::to_fixed_be(&self.e, klen).map_err(|_| CipherError::InvalidKeySize {
            target: klen,
            real: (self.e.bits() as usize + 7) >> 3,
        })?;
        let n = octets::to_fixed_be(&self.n, klen).expect("the key width is derived from n");
        Ok((e, n))
    }
}

impl PrivateKey {
    /// note: not to check that the parameters form a valid RSA key
    pub fn new_uncheck(modulus: BigUint, public_exp: BigUint, private_exp: BigUint) -> Self {
        Self {
            pk: PublicKey::new_uncheck(modulus, public_exp),
            d: private_exp,
            lambda: None,
        }
    }

    /// note: not to check that the parameters form a valid RSA key
    pub fn from_be_bytes(n: &[u8], public_exp: &[u8], private_exp: &[u8]) -> Self {
        Self {
            pk: PublicKey::from_be_bytes(n, public_exp),
            d: BigUint::from_bytes_be(private_exp),
            lambda: None,
        }
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.pk
    }

    /// RSADP: RSA decrypt primitive, `c^d mod n`
    pub fn rsadp(&self, c: &BigUint) -> Result<BigUint, CipherError> {
        rsa_transform(c, &self.d, &self.pk.n)
    }

    pub fn is_valid(&self) -> Result<(), CipherError> {
        self.pk.is_valid()?;

        let lambda = self.lambda.as_ref().ok_or(CipherError::InvalidPrivateKey(
            "rsa: lambda(n) doesn't exist".to_string(),
        ))?;

        if lambda.is_zero() || (&self.d * &self.pk.e % lambda) != BigUint::one() {
            return Err(CipherError::InvalidPrivateKey(
                "rsa: invalid exponent pair".to_string(),
            ));
        }

        Ok(())
    }

    /// Generate an RSA key of exactly `bits_len` bits.
    ///
    /// Primes `p` and `q` of `bits_len/2` bits are rejection-sampled until
    /// their product has the full width and `p != q`; the exponent pair comes
    /// from `lambda(n) = lcm(p-1, q-1)` per the selected [`ExponentMode`].
    ///
    /// `prime_test_rounds`(t) bounds the per-prime error probability by
    /// `4^-t`.
    pub fn generate_key<R: Rand>(
        bits_len: usize,
        mode: ExponentMode,
        prime_test_rounds: usize,
        rd: &mut R,
    ) -> Result<PrivateKey, CipherError> {
        if bits_len < 16 || (bits_len & 7) != 0 {
            return Err(CipherError::InvalidKeySize {
                target: 16,
                real: bits_len,
            });
        }

        let half = bits_len >> 1;
        let (p, q, n) = loop {
            let p = BigUintExt::<BigUint>::generate_prime(half, prime_test_rounds, rd)
                .expect("bits_len is at least 16, so the half width is valid");
            let q = BigUintExt::<BigUint>::generate_prime(half, prime_test_rounds, rd)
                .expect("bits_len is at least 16, so the half width is valid");
            if p == q {
                debug!("rsa: sampled p == q, resampling");
                continue;
            }

            let n = &p * &q;
            if n.bits() as usize == bits_len {
                break (p, q, n);
            }
            debug!(
                "rsa: modulus has {} bits, want {}, resampling",
                n.bits(),
                bits_len
            );
        };

        let lambda = (p - 1u32).lcm(&(q - 1u32));
        let e = match mode {
            ExponentMode::Fixed => {
                let f4 = BigUint::from(F4);
                if f4.gcd(&lambda).is_one() {
                    f4
                } else {
                    debug!("rsa: 65537 is not coprime to lambda(n), sampling the exponent");
                    Self::sample_exponent(&lambda, rd)
                }
            }
            ExponentMode::Random => Self::sample_exponent(&lambda, rd),
        };
        let d = BigUintExt(&e)
            .modinv(&lambda)
            .expect("e was chosen coprime to lambda(n)");

        Ok(Self {
            pk: PublicKey::new_uncheck(n, e),
            d,
            lambda: Some(lambda),
        })
    }

    // uniform e in (1, lambda) with gcd(e, lambda) = 1
    fn sample_exponent<R: Rand>(lambda: &BigUint, rd: &mut R) -> BigUint {
        let bound = BigUintExt(lambda);
        loop {
            let e = bound.gen_random(rd);
            if !e.is_zero() && !e.is_one() && e.gcd(lambda).is_one() {
                return e;
            }
        }
    }

    /// `(e, d, n)` as big-endian octet strings of the key width.
    ///
    /// Fails when an exponent does not fit the key width, which only keys
    /// built through the unchecked constructors can carry.
    pub fn to_be_bytes(&self) -> Result<(Vec<u8>, Vec<u8>, Vec<u8>), CipherError> {
        let (e, n) = self.pk.to_be_bytes()?;
        let d = octets::to_fixed_be(&self.d, n.len()).map_err(|_| CipherError::InvalidKeySize {
            target: n.len(),
            real: (self.d.bits() as usize + 7) >> 3,
        })?;
        Ok((e, d, n))
    }
}

/// The key interchange surface: `(e, d, n)` as big-endian octet strings of
/// `key_bits/8` bytes each.
///
/// Uses 50 rounds of random-base Miller-Rabin per prime candidate. Failure is
/// only by invalid `key_bits`; the sampling loops retry internally.
pub fn generate_key_pair<R: Rand>(
    key_bits: usize,
    mode: ExponentMode,
    rd: &mut R,
) -> Result<(Vec<u8>, Vec<u8>, Vec<u8>), CipherError> {
    let key = PrivateKey::generate_key(key_bits, mode, PRIME_TEST_ROUNDS, rd)?;
    key.to_be_bytes()
}

impl Display for PublicKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{n={:#x}, e={:#x}}}", self.n, self.e)
    }
}

impl Display for PrivateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{pk: {}, d: {:#x}}}", self.pk, self.d)
    }
}
