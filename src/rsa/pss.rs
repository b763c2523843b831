//! RSASSA-PSS probabilistic signature scheme.
//!
//! == Encoded message layout
//!
//! `EM = maskedDB || H || 0xbc`, `EM.len()` equals the key width `k`:
//! - `H = Hash(M')`, `M' = eight zero octets || Hash(msg) || salt`;
//! - `DB = PS || 0x01 || salt` of `k - hLen - 1` bytes, `PS` all zero;
//! - `maskedDB = DB ^ MGF1(H, DB.len())`;
//! - the top bit of `EM` is cleared so EM as an integer stays below the
//!   modulus (the modulus has its top bit set).
//!
//! The salt is `hLen` fresh random bytes per signing call, which is what
//! makes two signatures of the same message differ.

use crate::rsa::{mgf1, rsa_transform, PrivateKey, PublicKey};
use crate::{CipherError, DigestX, Rand, Sign, Verify};
use num_bigint::BigUint;
use std::cell::RefCell;
use utils::octets;

/// The SHA-2 family stops accepting input at 2^61 bytes.
const MSG_LEN_LIMIT: u64 = 0x2000_0000_0000_0000;

pub struct PSSVerify<H: DigestX, R: Rand> {
    key: PublicKey,
    // key width in bytes
    klen: usize,
    hlen: usize,
    // salt len, equals the digest len
    slen: usize,
    hf: RefCell<H>,
    rd: RefCell<R>,
}

pub struct PSSSign<H: DigestX, R: Rand> {
    key: PrivateKey,
    pss: PSSVerify<H, R>,
}

impl<H: DigestX, R: Rand> AsRef<PSSVerify<H, R>> for PSSSign<H, R> {
    fn as_ref(&self) -> &PSSVerify<H, R> {
        &self.pss
    }
}

impl<H: DigestX, R: Rand> AsRef<PublicKey> for PSSVerify<H, R> {
    fn as_ref(&self) -> &PublicKey {
        &self.key
    }
}

impl<H: DigestX, R: Rand> AsRef<PrivateKey> for PSSSign<H, R> {
    fn as_ref(&self) -> &PrivateKey {
        &self.key
    }
}

impl<H: DigestX, R: Rand> From<PSSSign<H, R>> for PSSVerify<H, R> {
    fn from(value: PSSSign<H, R>) -> Self {
        value.pss
    }
}

impl<H: DigestX, R: Rand> PSSVerify<H, R> {
    /// `hasher`: message digest generator, also fixes the salt length;
    /// `rng`: random number generator (unused when only verifying).
    ///
    /// All encoding lengths are derived here once; the encoding fits the key
    /// iff `2 * hLen + 9 <= k`.
    pub fn new(key: PublicKey, hasher: H, rng: R) -> Result<Self, CipherError> {
        key.is_valid()?;
        Self::new_uncheck(key, hasher, rng)
    }

    /// 不检查key的合法性
    pub fn new_uncheck(key: PublicKey, hasher: H, rng: R) -> Result<Self, CipherError> {
        let (klen, hlen) = (key.key_len(), hasher.digest_bits_x() >> 3);
        if 2 * hlen + 9 > klen {
            return Err(CipherError::HashTooLong {
                digest_len: hlen,
                key_len: klen,
            });
        }

        Ok(Self {
            key,
            klen,
            hlen,
            slen: hlen,
            hf: RefCell::new(hasher),
            rd: RefCell::new(rng),
        })
    }

    pub fn key_len(&self) -> usize {
        self.klen
    }

    pub fn hash_len(&self) -> usize {
        self.hlen
    }

    pub fn salt_len(&self) -> usize {
        self.slen
    }

    // DB = PS || 0x01 || salt
    fn db_len(&self) -> usize {
        self.klen - self.hlen - 1
    }

    // PS || 0x01
    fn ps_len(&self) -> usize {
        self.db_len() - self.slen
    }

    fn emsa_pss_encode(&self, msg: &[u8]) -> Result<Vec<u8>, CipherError> {
        if msg.len() as u64 > MSG_LEN_LIMIT {
            return Err(CipherError::MessageTooLong {
                limit: MSG_LEN_LIMIT,
                real: msg.len() as u64,
            });
        }

        let mut salt = vec![0u8; self.slen];
        self.rd.borrow_mut().rand(salt.as_mut_slice());
        self.emsa_pss_encode_with_salt(msg, salt.as_slice())
    }

    // em = maskedDB || H || 0xbc
    // H = Hash(M')
    // M' = 0x00 * 8 || Hash(msg) || salt
    // db = ps || 0x01 || salt
    // maskedDB = db ^ MGF1(H, db.len())
    fn emsa_pss_encode_with_salt(&self, msg: &[u8], salt: &[u8]) -> Result<Vec<u8>, CipherError> {
        let (klen, db_len, ps_len) = (self.klen, self.db_len(), self.ps_len());

        let mut hf = self.hf.borrow_mut();
        hf.reset_x();
        hf.write_x(msg);
        let m_hash = hf.finish_x();

        // H = Hash(M')
        hf.reset_x();
        hf.write_x([0u8; 8].as_slice());
        hf.write_x(m_hash.as_slice());
        hf.write_x(salt);
        let h = hf.finish_x();

        // db = ps || 0x01 || salt
        let mut em = vec![0u8; klen];
        em[ps_len - 1] = 0x01;
        em[ps_len..db_len].copy_from_slice(salt);

        let mask = mgf1(&mut *hf, h.as_slice(), db_len)?;
        drop(hf);
        em[..db_len]
            .iter_mut()
            .zip(mask)
            .for_each(|(a, b)| *a ^= b);

        em[db_len..klen - 1].copy_from_slice(h.as_slice());
        em[klen - 1] = 0xbc;
        // EM as an integer must stay below the modulus
        em[0] &= 0x7f;
        Ok(em)
    }

    fn emsa_pss_verify(&self, msg: &[u8], em: &mut [u8]) -> Result<(), CipherError> {
        let (klen, db_len, ps_len) = (self.klen, self.db_len(), self.ps_len());

        if em[klen - 1] != 0xbc {
            return Err(CipherError::InvalidTrailer);
        }
        if em[0] & 0x80 != 0 {
            return Err(CipherError::InvalidLeadingBit);
        }

        let h = em[db_len..klen - 1].to_vec();
        let mut hf = self.hf.borrow_mut();
        let mask = mgf1(&mut *hf, h.as_slice(), db_len)?;
        em[..db_len]
            .iter_mut()
            .zip(mask)
            .for_each(|(a, b)| *a ^= b);
        // the encoder may have cleared a set top bit, mirror that here
        if em[0] & 0x80 != 0 {
            em[0] &= 0x7f;
        }

        // db = ps || 0x01 || salt
        if em.iter().take(ps_len - 1).any(|&x| x != 0) || em[ps_len - 1] != 0x01 {
            return Err(CipherError::InvalidPadding);
        }
        let salt = &em[ps_len..db_len];

        hf.reset_x();
        hf.write_x(msg);
        let m_hash = hf.finish_x();

        hf.reset_x();
        hf.write_x([0u8; 8].as_slice());
        hf.write_x(m_hash.as_slice());
        hf.write_x(salt);
        let h_prime = hf.finish_x();

        if h_prime != h {
            return Err(CipherError::HashMismatch);
        }
        Ok(())
    }

    fn verify_inner(&self, msg: &[u8], signature: &[u8]) -> Result<(), CipherError> {
        if signature.len() != self.klen {
            return Err(CipherError::InvalidSignatureSize {
                target: self.klen,
                real: signature.len(),
            });
        }

        // an out-of-range representative is reduced and then rejected by the
        // encoding checks, keeping every rejection within the four
        // verification kinds
        let s = BigUint::from_bytes_be(signature) % self.key.modulus();
        let m = rsa_transform(&s, self.key.exponent(), self.key.modulus())?;
        let mut em =
            octets::to_fixed_be(&m, self.klen).expect("the transform result is below the modulus");
        self.emsa_pss_verify(msg, em.as_mut_slice())
    }
}

impl<H: DigestX, R: Rand> PSSSign<H, R> {
    /// `hasher`: message digest generator, also fixes the salt length;
    /// `rng`: random number generator, consumed for one salt per signature.
    pub fn new(key: PrivateKey, hasher: H, rng: R) -> Result<Self, CipherError> {
        key.is_valid()?;
        Self::new_uncheck(key, hasher, rng)
    }

    /// 不检查key的合法性, 无需`lambda(n)`
    pub fn new_uncheck(key: PrivateKey, hasher: H, rng: R) -> Result<Self, CipherError> {
        let pss = PSSVerify::new_uncheck(key.public_key().clone(), hasher, rng)?;
        Ok(Self { key, pss })
    }

    pub fn key_len(&self) -> usize {
        self.pss.key_len()
    }

    pub fn hash_len(&self) -> usize {
        self.pss.hash_len()
    }

    pub fn salt_len(&self) -> usize {
        self.pss.salt_len()
    }

    fn sign_inner(&self, msg: &[u8], signature: &mut Vec<u8>) -> Result<(), CipherError> {
        let em = self.pss.emsa_pss_encode(msg)?;
        let m = BigUint::from_bytes_be(em.as_slice());
        let c = self.key.rsadp(&m)?;
        let mut s = octets::to_fixed_be(&c, self.pss.klen)
            .expect("the transform result is below the modulus");
        signature.append(&mut s);
        Ok(())
    }
}

impl<H: DigestX, R: Rand> Verify for PSSVerify<H, R> {
    fn verify(&self, msg: &[u8], signature: &[u8]) -> Result<(), CipherError> {
        self.verify_inner(msg, signature)
    }
}

impl<H: DigestX, R: Rand> Verify for PSSSign<H, R> {
    fn verify(&self, msg: &[u8], signature: &[u8]) -> Result<(), CipherError> {
        self.pss.verify_inner(msg, signature)
    }
}

impl<H: DigestX, R: Rand> Sign for PSSSign<H, R> {
    fn sign(&self, msg: &[u8], signature: &mut Vec<u8>) -> Result<(), CipherError> {
        self.sign_inner(msg, signature)
    }
}

/// Octet-string signing surface: `d` and `n` are big-endian strings of the
/// key width, the signature comes back at the same width.
pub fn rsassa_pss_sign<R: Rand>(
    msg: &[u8],
    d: &[u8],
    n: &[u8],
    kind: crate::Sha2Kind,
    rd: R,
) -> Result<Vec<u8>, CipherError> {
    let d = octets::from_fixed_be(d, n.len()).map_err(|_| CipherError::InvalidKeySize {
        target: n.len(),
        real: d.len(),
    })?;
    // the public exponent is not part of the signing surface
    let key = PrivateKey::new_uncheck(BigUint::from_bytes_be(n), BigUint::default(), d);

    let pss = PSSSign::new_uncheck(key, kind.hasher(), rd)?;
    let mut signature = Vec::with_capacity(pss.key_len());
    pss.sign(msg, &mut signature)?;
    Ok(signature)
}

/// Octet-string verification surface, the counterpart of
/// [`rsassa_pss_sign`].
pub fn rsassa_pss_verify(
    msg: &[u8],
    e: &[u8],
    n: &[u8],
    signature: &[u8],
    kind: crate::Sha2Kind,
) -> Result<(), CipherError> {
    let e = octets::from_fixed_be(e, n.len()).map_err(|_| CipherError::InvalidKeySize {
        target: n.len(),
        real: e.len(),
    })?;
    let key = PublicKey::new_uncheck(BigUint::from_bytes_be(n), e);

    let pss = PSSVerify::new(key, kind.hasher(), crate::DefaultRand::default())?;
    pss.verify(msg, signature)
}
