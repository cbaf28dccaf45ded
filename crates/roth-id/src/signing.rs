//! ECDSA request signing
//!
//! Requests are signed over the SHA-256 digest of a canonical string with
//! the app identity key. Signatures serialize as DER hex; the matching
//! public key travels as compressed-point hex. RFC 6979 nonces make the
//! signature a pure function of key and message.

use crate::{Error, Result};
use once_cell::sync::Lazy;
use secp256k1::ecdsa::Signature;
use secp256k1::{All, Message, PublicKey, Secp256k1, SecretKey};
use sha2::{Digest, Sha256};

static SECP: Lazy<Secp256k1<All>> = Lazy::new(Secp256k1::new);

fn message_for(data: &str) -> Result<Message> {
    let digest = Sha256::digest(data.as_bytes());
    Ok(Message::from_slice(digest.as_slice())?)
}

/// Sign a canonical string, returning the DER signature as hex
pub fn sign(data: &str, secret: &SecretKey) -> Result<String> {
    let message = message_for(data)?;
    let signature = SECP.sign_ecdsa(&message, secret);
    Ok(hex::encode(signature.serialize_der()))
}

/// Verify a DER hex signature over a canonical string against a
/// compressed-point hex public key
pub fn verify(data: &str, public_key_hex: &str, signature_hex: &str) -> Result<bool> {
    let message = message_for(data)?;
    let public_key = PublicKey::from_slice(
        &hex::decode(public_key_hex).map_err(|e| Error::Signing(e.to_string()))?,
    )?;
    let signature =
        Signature::from_der(&hex::decode(signature_hex).map_err(|e| Error::Signing(e.to_string()))?)?;
    Ok(SECP.verify_ecdsa(&message, &signature, &public_key).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use secp256k1::rand::thread_rng;

    fn test_key() -> (SecretKey, PublicKey) {
        SECP.generate_keypair(&mut thread_rng())
    }

    #[test]
    fn test_sign_verify_roundtrip() {
        let (secret, public) = test_key();
        let data = "https://roth.com/api/v2/tok{\"method\":\"getBasicInfo\"}";
        let signature = sign(data, &secret).unwrap();
        assert!(verify(data, &hex::encode(public.serialize()), &signature).unwrap());
        assert!(!verify("tampered", &hex::encode(public.serialize()), &signature).unwrap());
    }

    #[test]
    fn test_signing_is_deterministic() {
        // RFC 6979 nonces: same key and message, same signature
        let (secret, _) = test_key();
        let a = sign("payload", &secret).unwrap();
        let b = sign("payload", &secret).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_wrong_key_fails_verification() {
        let (secret, _) = test_key();
        let (_, other_public) = test_key();
        let signature = sign("payload", &secret).unwrap();
        assert!(!verify("payload", &hex::encode(other_public.serialize()), &signature).unwrap());
    }
}
