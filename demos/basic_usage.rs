//! Basic usage example for AEZ authenticated encryption.

use aez::{decrypt, encrypt, Aez, Error};

fn main() -> Result<(), Error> {
    println!("AEZ Basic Usage Example");
    println!("=======================");

    // Example 1: Basic encryption and decryption
    basic_example()?;

    // Example 2: Contexts, vector AD, and custom tag lengths
    context_example()?;

    // Example 3: Error handling
    error_handling_example()?;

    Ok(())
}

fn basic_example() -> Result<(), Error> {
    println!("\n1. Basic Encryption/Decryption:");

    let key = [0x01; 16]; // 128-bit key
    let nonce = [0x02; 12]; // 96-bit nonce
    let plaintext = b"Hello, AEZ! This is a secret message.";
    let ad = b"public header";

    // Encrypt: the ciphertext carries 16 bytes of enciphered expansion
    // instead of a separate tag.
    let ciphertext = encrypt(plaintext, ad, &key, &nonce)?;
    println!("  Plaintext: {:?}", String::from_utf8_lossy(plaintext));
    println!("  Ciphertext: {} bytes", ciphertext.len());

    // Decrypt
    let decrypted = decrypt(&ciphertext, ad, &key, &nonce)?;
    println!("  Decrypted: {:?}", String::from_utf8_lossy(&decrypted));

    assert_eq!(decrypted, plaintext);
    println!("  Encryption/decryption successful!");

    Ok(())
}

fn context_example() -> Result<(), Error> {
    println!("\n2. Contexts and Parameters:");

    // Keys may be any length up to 4095 bytes; extraction happens once.
    let ctx = Aez::new(b"a passphrase-sized key works fine")?;

    // Vector associated data: the split is authenticated too.
    let ciphertext = ctx.encrypt(b"nonce-1", &[b"header", b"trailer"], 16, b"payload")?;
    let plaintext = ctx.decrypt(b"nonce-1", &[b"header", b"trailer"], 16, &ciphertext)?;
    assert_eq!(plaintext, b"payload");
    println!("  Vector AD round trip: ok");

    // Shorter tags trade authenticity margin for space.
    let short = ctx.encrypt(b"nonce-2", &[], 4, b"tiny tag")?;
    println!(
        "  4-byte tag: {} byte message -> {} byte ciphertext",
        "tiny tag".len(),
        short.len()
    );
    assert_eq!(ctx.decrypt(b"nonce-2", &[], 4, &short)?, b"tiny tag");

    // An empty message still authenticates: the ciphertext is pure tag.
    let tag_only = ctx.encrypt(b"nonce-3", &[b"session header"], 16, b"")?;
    assert_eq!(tag_only.len(), 16);
    assert!(ctx.decrypt(b"nonce-3", &[b"session header"], 16, &tag_only)?.is_empty());
    println!("  Empty message: 16-byte authenticator only");

    Ok(())
}

fn error_handling_example() -> Result<(), Error> {
    println!("\n3. Error Handling:");

    let key = [0x05; 16];
    let nonce = [0x06; 12];
    let plaintext = b"secret data";
    let ad = b"header";

    // Encrypt normally
    let ciphertext = encrypt(plaintext, ad, &key, &nonce)?;

    // Any bit flip randomizes the whole decryption and fails the check.
    let mut corrupted = ciphertext.clone();
    corrupted[0] ^= 1;
    match decrypt(&corrupted, ad, &key, &nonce) {
        Ok(_) => println!("  Should have failed!"),
        Err(Error::AuthenticationFailed) => {
            println!("  Corrupted ciphertext detected correctly");
        }
        Err(e) => println!("  Unexpected error: {e}"),
    }

    // Test with wrong AD
    match decrypt(&ciphertext, b"wrong header", &key, &nonce) {
        Ok(_) => println!("  Should have failed!"),
        Err(Error::AuthenticationFailed) => {
            println!("  Wrong AD detected correctly");
        }
        Err(e) => println!("  Unexpected error: {e}"),
    }

    // Test with wrong key
    let wrong_key = [0x99; 16];
    match decrypt(&ciphertext, ad, &wrong_key, &nonce) {
        Ok(_) => println!("  Should have failed!"),
        Err(Error::AuthenticationFailed) => {
            println!("  Wrong key detected correctly");
        }
        Err(e) => println!("  Unexpected error: {e}"),
    }

    // Ciphertexts shorter than the tag are rejected outright.
    match decrypt(&ciphertext[..8], ad, &key, &nonce) {
        Err(Error::InputTooShort) => println!("  Truncated ciphertext rejected"),
        other => println!("  Unexpected result: {other:?}"),
    }

    println!("  All error handling checks passed!");
    Ok(())
}
