//! RSA-2048 / PKCS#1 v1.5 / SHA-256 signature service.
//!
//! Mirrors the reference node's use of PyCryptodome: `generate_keys` returns
//! a PKCS#1 PEM private key and an SPKI ("PUBLIC KEY") PEM public key, and
//! `sign`/`verify` operate over the SHA-256 digest of caller-supplied
//! canonical bytes — never over any other field of a transaction.

use pkcs8::{DecodePublicKey, EncodePublicKey, LineEnding};
use rsa::pkcs1::{DecodeRsaPrivateKey, EncodeRsaPrivateKey};
use rsa::{Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256};
use thiserror::Error;

const KEY_BITS: usize = 2048;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    #[error("malformed private key")]
    MalformedPrivateKey,

    #[error("malformed public key")]
    MalformedPublicKey,

    #[error("malformed signature")]
    MalformedSignature,

    #[error("invalid signature")]
    InvalidSignature,

    #[error("key encoding failed")]
    Encoding,
}

/// A freshly generated RSA-2048 keypair, PEM-encoded.
pub struct KeyPair {
    pub private_key_pem: String,
    pub public_key_pem: String,
}

/// Generate a new RSA-2048 keypair.
pub fn generate_keypair() -> Result<KeyPair, CryptoError> {
    let mut rng = rand::thread_rng();
    let private_key = RsaPrivateKey::new(&mut rng, KEY_BITS)
        .map_err(|e| CryptoError::KeyGeneration(e.to_string()))?;
    let public_key = RsaPublicKey::from(&private_key);

    let private_key_pem = private_key
        .to_pkcs1_pem(LineEnding::LF)
        .map_err(|_| CryptoError::Encoding)?
        .to_string();
    let public_key_pem = public_key
        .to_public_key_pem(LineEnding::LF)
        .map_err(|_| CryptoError::Encoding)?;

    Ok(KeyPair {
        private_key_pem,
        public_key_pem,
    })
}

/// Sign `canonical_bytes` with `private_key_pem`. Returns a lowercase hex
/// PKCS#1 v1.5 signature over the SHA-256 digest of `canonical_bytes`.
pub fn sign(private_key_pem: &str, canonical_bytes: &[u8]) -> Result<String, CryptoError> {
    let private_key = RsaPrivateKey::from_pkcs1_pem(private_key_pem)
        .map_err(|_| CryptoError::MalformedPrivateKey)?;
    let digest = Sha256::digest(canonical_bytes);
    let signature = private_key
        .sign(Pkcs1v15Sign::new::<Sha256>(), &digest)
        .map_err(|_| CryptoError::InvalidSignature)?;
    Ok(hex::encode(signature))
}

/// Verify `signature_hex` against `canonical_bytes` using `public_key_pem`.
///
/// Fails with [`CryptoError::InvalidSignature`] on any format error or
/// mismatch, per the signature service's contract: a malformed key or
/// signature is just another way the signature fails to verify.
pub fn verify(
    public_key_pem: &str,
    canonical_bytes: &[u8],
    signature_hex: &str,
) -> Result<(), CryptoError> {
    let public_key =
        RsaPublicKey::from_public_key_pem(public_key_pem).map_err(|_| CryptoError::InvalidSignature)?;
    let signature =
        hex::decode(signature_hex).map_err(|_| CryptoError::InvalidSignature)?;
    let digest = Sha256::digest(canonical_bytes);
    public_key
        .verify(Pkcs1v15Sign::new::<Sha256>(), &digest, &signature)
        .map_err(|_| CryptoError::InvalidSignature)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_then_verify_round_trips() {
        let keys = generate_keypair().unwrap();
        let signature = sign(&keys.private_key_pem, b"hello").unwrap();
        assert!(verify(&keys.public_key_pem, b"hello", &signature).is_ok());
    }

    #[test]
    fn verify_rejects_tampered_data() {
        let keys = generate_keypair().unwrap();
        let signature = sign(&keys.private_key_pem, b"hello").unwrap();
        assert!(verify(&keys.public_key_pem, b"goodbye", &signature).is_err());
    }

    #[test]
    fn verify_rejects_wrong_key() {
        let keys_a = generate_keypair().unwrap();
        let keys_b = generate_keypair().unwrap();
        let signature = sign(&keys_a.private_key_pem, b"hello").unwrap();
        assert!(verify(&keys_b.public_key_pem, b"hello", &signature).is_err());
    }

    #[test]
    fn verify_rejects_malformed_signature_hex() {
        let keys = generate_keypair().unwrap();
        assert!(verify(&keys.public_key_pem, b"hello", "not-hex").is_err());
    }
}
