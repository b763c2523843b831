use crate::{CipherError, DigestX};

/// MGF1: expand `seed` into `mask_len` pseudorandom bytes.
///
/// `T = Hash(seed || C(0)) || Hash(seed || C(1)) || ...` truncated to
/// `mask_len`, where `C(i)` is the 4-byte big-endian counter. The output is a
/// deterministic function of the seed; the theoretical ceiling is
/// `2^32 * digest_len` bytes.
pub fn mgf1<H: DigestX>(hf: &mut H, seed: &[u8], mask_len: usize) -> Result<Vec<u8>, CipherError> {
    let hlen = hf.digest_bits_x() >> 3;
    let limit = (hlen as u64) << 32;
    if mask_len as u64 > limit {
        return Err(CipherError::MaskTooLong {
            limit,
            real: mask_len as u64,
        });
    }

    let mut mask = Vec::with_capacity(mask_len + hlen);
    let mut counter = 0u32;
    while mask.len() < mask_len {
        hf.reset_x();
        hf.write_x(seed);
        hf.write_x(counter.to_be_bytes().as_ref());
        mask.extend_from_slice(hf.finish_x().as_slice());
        counter += 1;
    }
    mask.truncate(mask_len);
    Ok(mask)
}

#[cfg(test)]
mod tests {
    use super::mgf1;
    use crate::{CipherError, Sha2Kind};

    #[test]
    fn exact_requested_length() {
        let mut hf = Sha2Kind::Sha256.hasher();
        for len in [0usize, 1, 5, 31, 32, 33, 64, 100] {
            assert_eq!(mgf1(&mut hf, b"seed", len).unwrap().len(), len);
        }
    }

    #[test]
    fn deterministic_and_prefix_consistent() {
        let mut hf = Sha2Kind::Sha256.hasher();
        let long = mgf1(&mut hf, b"seed", 100).unwrap();
        let again = mgf1(&mut hf, b"seed", 100).unwrap();
        let short = mgf1(&mut hf, b"seed", 10).unwrap();

        assert_eq!(long, again);
        assert_eq!(&long[..10], short.as_slice());

        let other = mgf1(&mut hf, b"seeds", 100).unwrap();
        assert_ne!(long, other);
    }

    #[test]
    fn mask_too_long() {
        let mut hf = Sha2Kind::Sha256.hasher();
        let err = mgf1(&mut hf, b"seed", usize::MAX).unwrap_err();
        assert_eq!(
            err,
            CipherError::MaskTooLong {
                limit: 32u64 << 32,
                real: usize::MAX as u64
            }
        );
    }
}
