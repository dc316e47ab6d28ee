//! x86-64 AES-NI optimized implementation.

#![allow(unsafe_code)]

#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

/// x86-64 AES-NI keyed round.
///
/// `_mm_aesenc_si128` performs SubBytes + ShiftRows + MixColumns followed by
/// AddRoundKey, which is exactly the round AEZ's AES4/AES10 are built from.
#[target_feature(enable = "aes")]
unsafe fn aes_round_impl(block: &[u8; 16], round_key: &[u8; 16]) -> [u8; 16] {
    let input = _mm_loadu_si128(block.as_ptr() as *const __m128i);
    let key = _mm_loadu_si128(round_key.as_ptr() as *const __m128i);

    let result = _mm_aesenc_si128(input, key);

    let mut output = [0u8; 16];
    _mm_storeu_si128(output.as_mut_ptr() as *mut __m128i, result);
    output
}

/// Safe wrapper around the x86-64 implementation.
#[inline]
pub fn aes_round(block: &[u8; 16], round_key: &[u8; 16]) -> [u8; 16] {
    unsafe { aes_round_impl(block, round_key) }
}
