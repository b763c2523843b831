//! RSA
//!
//! - 随机选择两个质数$p$和$q$($p\neq q$), 则模数$n=p*q$. 模数的比特长度固定为密钥长度;
//! - $\lambda(n) = lcm(p-1, q-1)$ (Carmichael函数), 公钥指数$e$满足$\gcd(e, \lambda) = 1$;
//! - 私钥指数$d$满足: $d \cdot e \equiv 1 \mod \lambda(n)$;
//!
//! 签名: $s = EM ^ d \mod n$;
//!
//! 验签: $EM = s ^ e \mod n$;
//!
//! `EM`是RSASSA-PSS编码的消息, 见[`pss`]模块.

mod key;
pub use key::{generate_key_pair, ExponentMode, PrivateKey, PublicKey};

mod cipher;
pub use cipher::rsa_transform;

mod mgf;
pub use mgf::mgf1;

mod pss;
pub use pss::{rsassa_pss_sign, rsassa_pss_verify, PSSSign, PSSVerify};
