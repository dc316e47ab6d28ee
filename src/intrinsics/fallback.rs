//! Portable AES round for targets without AES instructions.

use aes::hazmat::cipher_round;
use aes::Block;

/// Portable keyed AES round built on the `aes` crate's fixsliced,
/// constant-time round primitive.
#[inline]
pub fn aes_round(block: &[u8; 16], round_key: &[u8; 16]) -> [u8; 16] {
    let mut state = *Block::from_slice(block);
    cipher_round(&mut state, Block::from_slice(round_key));

    let mut output = [0u8; 16];
    output.copy_from_slice(&state);
    output
}
