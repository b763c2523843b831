use crate::CipherError;
use num_bigint::BigUint;
use utils::mod_arith;

/// The raw RSA primitive: `m^k mod n`.
///
/// Serves as encryption and decryption, and inside PSS as the signing
/// (private exponent) and verification (public exponent) transform of the
/// encoded message. The only precondition is `m < n`.
pub fn rsa_transform(m: &BigUint, k: &BigUint, n: &BigUint) -> Result<BigUint, CipherError> {
    if m >= n {
        return Err(CipherError::MessageOutOfRange);
    }
    Ok(mod_arith::pow_mod(m, k, n))
}

#[cfg(test)]
mod tests {
    use super::rsa_transform;
    use crate::CipherError;
    use num_bigint::BigUint;

    // p = 61, q = 53, n = 3233, lambda = 780, e = 17, d = 413
    const N: u32 = 3233;
    const E: u32 = 17;
    const D: u32 = 413;

    #[test]
    fn encrypt_decrypt_round_trip() {
        let (n, e, d) = (BigUint::from(N), BigUint::from(E), BigUint::from(D));

        for m in [0u32, 1, 42, 65, 3232] {
            let m = BigUint::from(m);
            let c = rsa_transform(&m, &e, &n).unwrap();
            assert_eq!(rsa_transform(&c, &d, &n).unwrap(), m);

            let c = rsa_transform(&m, &d, &n).unwrap();
            assert_eq!(rsa_transform(&c, &e, &n).unwrap(), m);
        }
    }

    #[test]
    fn rejects_message_out_of_range() {
        let (n, e) = (BigUint::from(N), BigUint::from(E));
        for m in [N, N + 1, N * 7] {
            assert_eq!(
                rsa_transform(&BigUint::from(m), &e, &n),
                Err(CipherError::MessageOutOfRange)
            );
        }
    }
}
