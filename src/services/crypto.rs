use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

use crate::config;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Missing encryption key or nonce in configuration")]
    MissingKeyMaterial,

    #[error("Failed to parse base64 encryption key material: {0}")]
    BadKeyMaterial(String),

    #[error("Encryption failed")]
    EncryptFailed,

    #[error("Decryption failed. Possibly due to incorrect key/nonce or corrupted data.")]
    DecryptFailed,
}

/// Symmetric encryption of stored old-password values.
///
/// Key and nonce both come from configuration and are fixed, so the same
/// plaintext always maps to the same ciphertext and records stay decryptable
/// across restarts. Ciphertext travels base64-encoded.
pub struct CryptoBox {
    cipher: Aes256Gcm,
    nonce: [u8; 12],
}

impl CryptoBox {
    pub fn from_config() -> Result<Self, CryptoError> {
        let crypto = &config::config().crypto;

        if crypto.key_base64.trim().is_empty() || crypto.nonce_base64.trim().is_empty() {
            return Err(CryptoError::MissingKeyMaterial);
        }

        let key = STANDARD
            .decode(&crypto.key_base64)
            .map_err(|e| CryptoError::BadKeyMaterial(e.to_string()))?;
        let nonce = STANDARD
            .decode(&crypto.nonce_base64)
            .map_err(|e| CryptoError::BadKeyMaterial(e.to_string()))?;

        Self::new(&key, &nonce)
    }

    pub fn new(key: &[u8], nonce: &[u8]) -> Result<Self, CryptoError> {
        let cipher = Aes256Gcm::new_from_slice(key)
            .map_err(|_| CryptoError::BadKeyMaterial("key must be 32 bytes".to_string()))?;
        let nonce: [u8; 12] = nonce
            .try_into()
            .map_err(|_| CryptoError::BadKeyMaterial("nonce must be 12 bytes".to_string()))?;

        Ok(Self { cipher, nonce })
    }

    pub fn encrypt(&self, plaintext: &str) -> Result<String, CryptoError> {
        let ciphertext = self
            .cipher
            .encrypt(Nonce::from_slice(&self.nonce), plaintext.as_bytes())
            .map_err(|_| CryptoError::EncryptFailed)?;
        Ok(STANDARD.encode(ciphertext))
    }

    pub fn decrypt(&self, ciphertext_base64: &str) -> Result<String, CryptoError> {
        let ciphertext = STANDARD
            .decode(ciphertext_base64)
            .map_err(|_| CryptoError::DecryptFailed)?;
        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(&self.nonce), ciphertext.as_ref())
            .map_err(|_| CryptoError::DecryptFailed)?;
        String::from_utf8(plaintext).map_err(|_| CryptoError::DecryptFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_box() -> CryptoBox {
        CryptoBox::new(&[7u8; 32], &[3u8; 12]).unwrap()
    }

    #[test]
    fn round_trips_plaintext() {
        let crypto = test_box();
        let ciphertext = crypto.encrypt("hunter2").unwrap();
        assert_ne!(ciphertext, "hunter2");
        assert_eq!(crypto.decrypt(&ciphertext).unwrap(), "hunter2");
    }

    #[test]
    fn fixed_nonce_means_stable_ciphertext() {
        let crypto = test_box();
        assert_eq!(
            crypto.encrypt("same input").unwrap(),
            crypto.encrypt("same input").unwrap()
        );
    }

    #[test]
    fn tampered_ciphertext_fails() {
        let crypto = test_box();
        let mut bytes = STANDARD.decode(crypto.encrypt("secret").unwrap()).unwrap();
        bytes[0] ^= 0xff;
        let tampered = STANDARD.encode(bytes);
        assert!(matches!(
            crypto.decrypt(&tampered),
            Err(CryptoError::DecryptFailed)
        ));
    }

    #[test]
    fn rejects_wrong_key_material_sizes() {
        assert!(CryptoBox::new(&[0u8; 16], &[0u8; 12]).is_err());
        assert!(CryptoBox::new(&[0u8; 32], &[0u8; 16]).is_err());
    }

    #[test]
    fn garbage_base64_is_a_decrypt_error() {
        let crypto = test_box();
        assert!(matches!(
            crypto.decrypt("%%% not base64 %%%"),
            Err(CryptoError::DecryptFailed)
        ));
    }
}
