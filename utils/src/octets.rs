//! Fixed-width big-endian octet string conversion.

use num_bigint::BigUint;
use num_traits::Zero;

/// Export `x` as exactly `len` big-endian bytes, zero-padded on the left.
/// Fails if `x` does not fit the requested width.
pub fn to_fixed_be(x: &BigUint, len: usize) -> Result<Vec<u8>, String> {
    let need = ((x.bits() as usize) + 7) >> 3;
    if need > len {
        return Err(format!(
            "octets: value needs {} bytes, requested width is {}",
            need, len
        ));
    }

    let mut out = vec![0u8; len];
    if !x.is_zero() {
        out[len - need..].copy_from_slice(&x.to_bytes_be());
    }
    Ok(out)
}

/// Import exactly `len` big-endian bytes as an unsigned integer.
pub fn from_fixed_be(octets: &[u8], len: usize) -> Result<BigUint, String> {
    if octets.len() != len {
        return Err(format!(
            "octets: got {} bytes, requested width is {}",
            octets.len(),
            len
        ));
    }
    Ok(BigUint::from_bytes_be(octets))
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::Zero;

    #[test]
    fn export_pads_on_the_left() {
        let x = BigUint::from(0x0102u32);
        assert_eq!(to_fixed_be(&x, 4).unwrap(), vec![0, 0, 1, 2]);
        assert_eq!(to_fixed_be(&BigUint::zero(), 3).unwrap(), vec![0, 0, 0]);
    }

    #[test]
    fn export_rejects_overflow() {
        let x = BigUint::from(0x010203u32);
        assert!(to_fixed_be(&x, 2).is_err());
    }

    #[test]
    fn import_checks_width() {
        assert!(from_fixed_be(&[1, 2, 3], 4).is_err());
        assert_eq!(
            from_fixed_be(&[0, 0, 1, 2], 4).unwrap(),
            BigUint::from(0x0102u32)
        );
    }

    #[test]
    fn round_trip() {
        let x = BigUint::from(0xdeadbeefu32);
        let octets = to_fixed_be(&x, 16).unwrap();
        assert_eq!(from_fixed_be(&octets, 16).unwrap(), x);
    }
}
