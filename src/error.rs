use std::{error::Error, fmt::Display};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CipherError {
    /// 原始RSA输入大于等于模数
    MessageOutOfRange,

    /// 消息长度超过哈希函数支持的输入上限
    MessageTooLong { limit: u64, real: u64 },

    /// 摘要长度与密钥长度不兼容, PSS编码无法放入密钥宽度中
    HashTooLong { digest_len: usize, key_len: usize },

    /// MGF1请求的掩码长度超过`2^32 * digest_len`
    MaskTooLong { limit: u64, real: u64 },

    /// 不合法的密钥长度
    InvalidKeySize { target: usize, real: usize },

    /// 签名的字节长度与密钥宽度不一致
    InvalidSignatureSize { target: usize, real: usize },

    /// 不合法的公钥
    InvalidPublicKey(String),

    /// 不合法的私钥
    InvalidPrivateKey(String),

    /// 编码消息的尾字节不是0xbc
    InvalidTrailer,

    /// 编码消息的首字节最高位不是0
    InvalidLeadingBit,

    /// 数据块的前缀不是全0后跟0x01
    InvalidPadding,

    /// 重新计算的摘要与编码消息中的摘要不一致
    HashMismatch,
}

impl CipherError {
    /// Whether the error is one of the verification-time rejections. Callers
    /// that care about oracle leakage should collapse all of these into a
    /// single "signature invalid" answer.
    pub fn is_invalid_signature(&self) -> bool {
        matches!(
            self,
            CipherError::InvalidTrailer
                | CipherError::InvalidLeadingBit
                | CipherError::InvalidPadding
                | CipherError::HashMismatch
        )
    }
}

impl Display for CipherError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CipherError::MessageOutOfRange => {
                f.write_str("rsa: message representative out of range")
            }
            CipherError::MessageTooLong { limit, real } => f.write_fmt(format_args!(
                "pss: message length `{real}` exceeds the hash input limit `{limit}`"
            )),
            CipherError::HashTooLong { digest_len, key_len } => f.write_fmt(format_args!(
                "pss: digest length `{digest_len}` does not fit the key length `{key_len}`"
            )),
            CipherError::MaskTooLong { limit, real } => f.write_fmt(format_args!(
                "mgf: mask length `{real}` exceeds the limit `{limit}`"
            )),
            CipherError::InvalidKeySize { target, real } => f.write_fmt(format_args!(
                "Invalid key size `{real}` not match to target size `{target}`"
            )),
            CipherError::InvalidSignatureSize { target, real } => f.write_fmt(format_args!(
                "Invalid signature size `{real}` not match to target size `{target}`"
            )),
            CipherError::InvalidPublicKey(s) => f.write_str(s),
            CipherError::InvalidPrivateKey(s) => f.write_str(s),
            CipherError::InvalidTrailer => f.write_str("pss: invalid trailer byte"),
            CipherError::InvalidLeadingBit => f.write_str("pss: invalid leading bit"),
            CipherError::InvalidPadding => f.write_str("pss: invalid data block padding"),
            CipherError::HashMismatch => f.write_str("pss: hash value mismatch"),
        }
    }
}

impl Error for CipherError {}

#[cfg(test)]
mod tests {
    use super::CipherError;

    #[test]
    fn verification_rejections_group_together() {
        let rejections = [
            CipherError::InvalidTrailer,
            CipherError::InvalidLeadingBit,
            CipherError::InvalidPadding,
            CipherError::HashMismatch,
        ];
        for e in rejections {
            assert!(e.is_invalid_signature(), "{e}");
        }

        assert!(!CipherError::MessageOutOfRange.is_invalid_signature());
        assert!(!CipherError::HashTooLong {
            digest_len: 32,
            key_len: 72
        }
        .is_invalid_signature());
    }
}
