//! Cross-cutting property tests: round trips at scale, expansion, and
//! shared-context thread safety.

use crate::{decrypt, encrypt, Aez, Error};

/// Small deterministic byte-stream generator so the tests need no RNG crate.
struct XorShift(u64);

impl XorShift {
    fn fill(&mut self, len: usize) -> Vec<u8> {
        let mut out = Vec::with_capacity(len);
        while out.len() < len {
            self.0 ^= self.0 << 13;
            self.0 ^= self.0 >> 7;
            self.0 ^= self.0 << 17;
            out.extend_from_slice(&self.0.to_le_bytes());
        }
        out.truncate(len);
        out
    }
}

#[test]
fn test_large_message_roundtrip() {
    let mut gen = XorShift(0x9e3779b97f4a7c15);
    let msg = gen.fill(1024);
    let ad = gen.fill(100);
    let key = [0x2au8; 16];
    let nonce = [0x0bu8; 12];

    let ciphertext = encrypt(&msg, &ad, &key, &nonce).unwrap();
    assert_eq!(ciphertext.len(), msg.len() + 16);

    let plaintext = decrypt(&ciphertext, &ad, &key, &nonce).unwrap();
    assert_eq!(plaintext, msg);
}

#[test]
fn test_expansion_is_exact() {
    let ctx = Aez::new(b"expansion test key").unwrap();
    for len in [0usize, 1, 15, 16, 31, 32, 100, 999] {
        let msg = vec![0xa5u8; len];
        for tag_len in [0usize, 4, 16] {
            let ct = ctx.encrypt(b"n", &[], tag_len, &msg).unwrap();
            assert_eq!(ct.len(), len + tag_len);
        }
    }
}

#[test]
fn test_ciphertexts_differ_across_nonces() {
    let ctx = Aez::new(&[0u8; 16]).unwrap();
    let a = ctx.encrypt(b"nonce-a", &[], 16, b"same message").unwrap();
    let b = ctx.encrypt(b"nonce-b", &[], 16, b"same message").unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_corrupting_nonce_or_ad_fails() {
    let mut gen = XorShift(7);
    let msg = gen.fill(64);
    let key = [3u8; 16];
    let nonce = [4u8; 12];
    let ciphertext = encrypt(&msg, b"header", &key, &nonce).unwrap();

    let mut bad_nonce = nonce;
    bad_nonce[11] ^= 0x80;
    assert_eq!(
        decrypt(&ciphertext, b"header", &key, &bad_nonce),
        Err(Error::AuthenticationFailed)
    );
    assert_eq!(
        decrypt(&ciphertext, b"headex", &key, &nonce),
        Err(Error::AuthenticationFailed)
    );
}

#[test]
fn test_shared_context_across_threads() {
    let ctx = Aez::new(&[0x55u8; 16]).unwrap();
    let reference = ctx.encrypt(b"nonce", &[b"ad"], 16, b"thread payload").unwrap();

    std::thread::scope(|scope| {
        let ctx = &ctx;
        let reference = &reference;
        for worker in 0..16 {
            scope.spawn(move || {
                let mut gen = XorShift(worker + 1);
                let msg = gen.fill(1024);
                let ad = gen.fill(100);
                let ct = ctx.encrypt(b"nonce", &[&ad], 16, &msg).unwrap();
                assert_eq!(ctx.decrypt(b"nonce", &[&ad], 16, &ct).unwrap(), msg);

                // Identical inputs must give identical ciphertexts from any
                // thread.
                let again = ctx.encrypt(b"nonce", &[b"ad"], 16, b"thread payload").unwrap();
                assert_eq!(&again, reference);
            });
        }
    });
}

#[test]
fn test_context_clone_is_equivalent() {
    let ctx = Aez::new(b"clone me").unwrap();
    let clone = ctx.clone();
    let ct = ctx.encrypt(b"n", &[], 16, b"payload").unwrap();
    assert_eq!(clone.decrypt(b"n", &[], 16, &ct).unwrap(), b"payload");
}
