//! # AEZ - Robust Authenticated Encryption
//!
//! This crate implements AEZ v4, an authenticated-encryption scheme built
//! around a wide-block enciphering core.
//!
//! AEZ differs from conventional AEAD in being *robust*: the whole stretched
//! message is enciphered, so any modification of a ciphertext randomizes the
//! entire decrypted plaintext, and reusing a nonce degrades the scheme only
//! to a deterministic cipher instead of breaking it.
//!
//! ## Features
//!
//! - **Nonce-misuse resistance**: repeated nonces never leak more than
//!   message equality
//! - **Arbitrary parameters**: keys up to 4095 bytes, nonces and associated
//!   data of any length, configurable ciphertext expansion
//! - **Hardware acceleration**: AES-NI and ARM Crypto Extensions round
//!   functions, with a portable constant-time fallback
//! - **No-std compatible**: usable in embedded environments with `alloc`
//!
//! ## Usage
//!
//! ```rust
//! use aez::{encrypt, decrypt};
//!
//! let key = [0u8; 16];      // 128-bit key
//! let nonce = [0u8; 12];    // 96-bit nonce
//! let plaintext = b"Hello, world!";
//! let ad = b"additional data";
//!
//! let ciphertext = encrypt(plaintext, ad, &key, &nonce)?;
//! let decrypted = decrypt(&ciphertext, ad, &key, &nonce)?;
//! assert_eq!(decrypted, plaintext);
//! # Ok::<(), aez::Error>(())
//! ```
//!
//! For long-lived keys, vector associated data, or a tag length other than
//! 16 bytes, build an [`Aez`] context once and reuse it:
//!
//! ```rust
//! use aez::Aez;
//!
//! let ctx = Aez::new(b"a key of any length up to 4095 bytes")?;
//! let ciphertext = ctx.encrypt(b"nonce", &[b"header", b"footer"], 8, b"secret")?;
//! let plaintext = ctx.decrypt(b"nonce", &[b"header", b"footer"], 8, &ciphertext)?;
//! assert_eq!(plaintext, b"secret");
//! # Ok::<(), aez::Error>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

extern crate alloc;

mod core;
mod error;
mod intrinsics;
mod utils;

#[cfg(test)]
mod tests;

pub use crate::core::{Aez, MAX_KEY_LEN};
pub use crate::error::{Error, Result};

use alloc::vec::Vec;

/// Tag length used by the convenience functions, in bytes.
pub const TAG_LEN: usize = 16;

/// Encrypts plaintext with associated data using AEZ with the parameters of
/// the CAESAR submission: a 16-byte key, a 12-byte nonce, and 16 bytes of
/// ciphertext expansion.
///
/// # Arguments
///
/// * `plaintext` - The data to encrypt
/// * `ad` - Additional authenticated data (not encrypted, but authenticated)
/// * `key` - 128-bit encryption key
/// * `nonce` - 96-bit nonce
///
/// # Returns
///
/// The ciphertext, `plaintext.len() + 16` bytes long. Unlike conventional
/// AEAD there is no separate tag: the expansion is enciphered into the whole
/// ciphertext.
///
/// # Security
///
/// - Nonce reuse with the same key reveals only whether two messages are
///   identical; still, unique nonces are recommended
/// - The key MUST be randomly chosen from a uniform distribution
///
/// # Example
///
/// ```rust
/// use aez::encrypt;
///
/// let key = [0u8; 16];
/// let nonce = [0u8; 12];
///
/// let ciphertext = encrypt(b"secret message", b"public header", &key, &nonce)?;
/// # Ok::<(), aez::Error>(())
/// ```
pub fn encrypt(plaintext: &[u8], ad: &[u8], key: &[u8; 16], nonce: &[u8; 12]) -> Result<Vec<u8>> {
    Aez::new(key)?.encrypt(nonce, &[ad], TAG_LEN, plaintext)
}

/// Decrypts ciphertext produced by [`encrypt`] and verifies its authenticity.
///
/// # Arguments
///
/// * `ciphertext` - The encrypted data (at least 16 bytes)
/// * `ad` - Additional authenticated data (must match encryption)
/// * `key` - 128-bit encryption key (must match encryption)
/// * `nonce` - 96-bit nonce (must match encryption)
///
/// # Returns
///
/// The decrypted plaintext, `ciphertext.len() - 16` bytes long, or an error
/// if verification fails.
///
/// # Security
///
/// - If verification fails, no plaintext data is returned
/// - Verification is performed in constant time
///
/// # Example
///
/// ```rust
/// use aez::{encrypt, decrypt};
///
/// let key = [0u8; 16];
/// let nonce = [0u8; 12];
///
/// let ciphertext = encrypt(b"secret message", b"public header", &key, &nonce)?;
/// let plaintext = decrypt(&ciphertext, b"public header", &key, &nonce)?;
///
/// assert_eq!(plaintext, b"secret message");
/// # Ok::<(), aez::Error>(())
/// ```
pub fn decrypt(ciphertext: &[u8], ad: &[u8], key: &[u8; 16], nonce: &[u8; 12]) -> Result<Vec<u8>> {
    Aez::new(key)?.decrypt(nonce, &[ad], TAG_LEN, ciphertext)
}
