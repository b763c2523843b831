//! Hash capability used by the PSS scheme and MGF1.
//!
//! The digest is a call-time parameter rather than process-wide state;
//! any `DigestX` value can be handed to the signing and verification
//! contexts, [`Sha2Kind`] covers the SHA-2 family.

use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};

/// Object-safe digest interface. Implementations must produce digests whose
/// bit length is a multiple of 8.
pub trait DigestX {
    fn digest_bits_x(&self) -> usize;
    fn write_x(&mut self, data: &[u8]);
    fn finish_x(&mut self) -> Vec<u8>;
    fn reset_x(&mut self);
}

macro_rules! impl_digestx {
    ($TY: ty, $BITS: literal) => {
        impl DigestX for $TY {
            fn digest_bits_x(&self) -> usize {
                $BITS
            }

            fn write_x(&mut self, data: &[u8]) {
                Digest::update(self, data)
            }

            fn finish_x(&mut self) -> Vec<u8> {
                self.finalize_reset().to_vec()
            }

            fn reset_x(&mut self) {
                Digest::reset(self)
            }
        }
    };
}

impl_digestx!(Sha224, 224);
impl_digestx!(Sha256, 256);
impl_digestx!(Sha384, 384);
impl_digestx!(Sha512, 512);

impl DigestX for Box<dyn DigestX> {
    fn digest_bits_x(&self) -> usize {
        self.as_ref().digest_bits_x()
    }

    fn write_x(&mut self, data: &[u8]) {
        self.as_mut().write_x(data)
    }

    fn finish_x(&mut self) -> Vec<u8> {
        self.as_mut().finish_x()
    }

    fn reset_x(&mut self) {
        self.as_mut().reset_x()
    }
}

/// SHA-2 digest selector. Picks the digest length and with it the salt
/// length and padding layout of the PSS encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sha2Kind {
    Sha224,
    Sha256,
    Sha384,
    Sha512,
}

impl Sha2Kind {
    pub fn digest_bits(&self) -> usize {
        match self {
            Sha2Kind::Sha224 => 224,
            Sha2Kind::Sha256 => 256,
            Sha2Kind::Sha384 => 384,
            Sha2Kind::Sha512 => 512,
        }
    }

    pub fn digest_len(&self) -> usize {
        self.digest_bits() >> 3
    }

    pub fn hasher(&self) -> Box<dyn DigestX> {
        match self {
            Sha2Kind::Sha224 => Box::new(Sha224::new()),
            Sha2Kind::Sha256 => Box::new(Sha256::new()),
            Sha2Kind::Sha384 => Box::new(Sha384::new()),
            Sha2Kind::Sha512 => Box::new(Sha512::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DigestX, Sha2Kind};

    #[test]
    fn digest_lengths() {
        let cases = [
            (Sha2Kind::Sha224, 28usize),
            (Sha2Kind::Sha256, 32),
            (Sha2Kind::Sha384, 48),
            (Sha2Kind::Sha512, 64),
        ];
        for (kind, len) in cases {
            let mut hf = kind.hasher();
            assert_eq!(kind.digest_len(), len);
            assert_eq!(hf.digest_bits_x() >> 3, len);
            hf.write_x(b"abc");
            assert_eq!(hf.finish_x().len(), len);
        }
    }

    #[test]
    fn sha256_known_digest() {
        let expected = [
            0xbau8, 0x78, 0x16, 0xbf, 0x8f, 0x01, 0xcf, 0xea, 0x41, 0x41, 0x40, 0xde, 0x5d, 0xae,
            0x22, 0x23, 0xb0, 0x03, 0x61, 0xa3, 0x96, 0x17, 0x7a, 0x9c, 0xb4, 0x10, 0xff, 0x61,
            0xf2, 0x00, 0x15, 0xad,
        ];

        let mut hf = Sha2Kind::Sha256.hasher();
        hf.write_x(b"abc");
        assert_eq!(hf.finish_x(), expected);

        // finish_x resets, the state is reusable
        hf.write_x(b"abc");
        assert_eq!(hf.finish_x(), expected);
    }
}
