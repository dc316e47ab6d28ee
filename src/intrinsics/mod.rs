//! Platform-specific intrinsics for the AES round function.

/// One keyed AES round: AddRoundKey(MixColumns(ShiftRows(SubBytes(x))), key).
///
/// This is the `aesenc` primitive AEZ builds AES4 and AES10 from; the final
/// round keeps MixColumns, so no special last-round form exists. The
/// implementation is selected at compile time based on the target architecture
/// and available features.
#[inline]
pub fn aes_round(block: &[u8; 16], round_key: &[u8; 16]) -> [u8; 16] {
    #[cfg(all(
        target_arch = "aarch64",
        target_feature = "neon",
        target_feature = "aes"
    ))]
    {
        aarch64::aes_round(block, round_key)
    }
    #[cfg(all(target_arch = "x86_64", target_feature = "aes"))]
    {
        x86_64::aes_round(block, round_key)
    }
    #[cfg(not(any(
        all(
            target_arch = "aarch64",
            target_feature = "neon",
            target_feature = "aes"
        ),
        all(target_arch = "x86_64", target_feature = "aes")
    )))]
    {
        fallback::aes_round(block, round_key)
    }
}

#[cfg(all(
    target_arch = "aarch64",
    target_feature = "neon",
    target_feature = "aes"
))]
mod aarch64;

#[cfg(all(target_arch = "x86_64", target_feature = "aes"))]
mod x86_64;

#[cfg(not(any(
    all(
        target_arch = "aarch64",
        target_feature = "neon",
        target_feature = "aes"
    ),
    all(target_arch = "x86_64", target_feature = "aes")
)))]
mod fallback;
