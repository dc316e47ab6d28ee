//! Block-level primitives: XOR, GF(2^128) arithmetic, padding, constant-time
//! predicates.

/// A 128-bit block, the unit every AEZ component works in.
pub type Block = [u8; 16];

/// XOR two 16-byte blocks.
#[inline]
pub fn xor_block(a: &Block, b: &Block) -> Block {
    let mut result = [0u8; 16];
    for i in 0..16 {
        result[i] = a[i] ^ b[i];
    }
    result
}

/// XOR `src` into `dst` over the overlapping prefix.
#[inline]
pub fn xor_bytes_in_place(dst: &mut [u8], src: &[u8]) {
    for (d, s) in dst.iter_mut().zip(src.iter()) {
        *d ^= s;
    }
}

/// Copy the first 16 bytes of a slice into a block.
#[inline]
pub fn read_block(src: &[u8]) -> Block {
    let mut block = [0u8; 16];
    block.copy_from_slice(&src[..16]);
    block
}

/// Double a block in GF(2^128) with reduction polynomial
/// x^128 + x^7 + x^2 + x + 1, treating the block as a big-endian integer.
#[inline]
pub fn double_block(p: &Block) -> Block {
    let mut out = [0u8; 16];
    for i in 0..15 {
        out[i] = (p[i] << 1) | (p[i + 1] >> 7);
    }
    out[15] = (p[15] << 1) ^ ((p[0] >> 7) * 135);
    out
}

/// Multiply a block by a small integer in GF(2^128) via double-and-add.
pub fn mult_block(mut x: u64, src: &Block) -> Block {
    let mut t = *src;
    let mut r = [0u8; 16];
    while x != 0 {
        if x & 1 != 0 {
            r = xor_block(&r, &t);
        }
        t = double_block(&t);
        x >>= 1;
    }
    r
}

/// Pad a partial block (0 to 15 bytes) with `10*` to a full block.
#[inline]
pub fn pad_one_zero(src: &[u8]) -> Block {
    debug_assert!(src.len() < 16);
    let mut block = [0u8; 16];
    block[..src.len()].copy_from_slice(src);
    block[src.len()] = 0x80;
    block
}

/// A zero block with a 32-bit big-endian integer in the last four bytes.
#[inline]
pub fn be32_block(x: u32) -> Block {
    let mut block = [0u8; 16];
    block[12..].copy_from_slice(&x.to_be_bytes());
    block
}

/// Constant-time comparison of two byte slices.
#[inline]
pub fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }

    result == 0
}

/// Constant-time all-zero check: an OR-reduction over every byte, with no
/// early exit.
#[inline]
pub fn ct_is_zero(bytes: &[u8]) -> bool {
    let mut result = 0u8;
    for b in bytes {
        result |= b;
    }
    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xor_block() {
        let a = [0xf0; 16];
        let b = [0x0f; 16];
        let result = xor_block(&a, &b);
        assert_eq!(result, [0xff; 16]);
    }

    #[test]
    fn test_double_block_shifts() {
        let mut one = [0u8; 16];
        one[15] = 1;
        let mut two = [0u8; 16];
        two[15] = 2;
        assert_eq!(double_block(&one), two);

        // Top bit set: reduction XORs 0x87 into the last byte.
        let mut top = [0u8; 16];
        top[0] = 0x80;
        let mut reduced = [0u8; 16];
        reduced[15] = 0x87;
        assert_eq!(double_block(&top), reduced);
    }

    #[test]
    fn test_double_block_linearity() {
        let a = [0x5a; 16];
        let b = [
            0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef, 0xfe, 0xdc, 0xba, 0x98, 0x76, 0x54,
            0x32, 0x10,
        ];
        let lhs = double_block(&xor_block(&a, &b));
        let rhs = xor_block(&double_block(&a), &double_block(&b));
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn test_mult_block() {
        let b = [
            0x80, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd,
            0xee, 0xff,
        ];
        assert_eq!(mult_block(0, &b), [0u8; 16]);
        assert_eq!(mult_block(1, &b), b);
        assert_eq!(mult_block(2, &b), double_block(&b));
        assert_eq!(mult_block(3, &b), xor_block(&b, &double_block(&b)));
        assert_eq!(
            mult_block(8, &b),
            double_block(&double_block(&double_block(&b)))
        );
    }

    #[test]
    fn test_pad_one_zero() {
        let padded = pad_one_zero(&[1, 2, 3]);
        assert_eq!(&padded[..3], &[1, 2, 3]);
        assert_eq!(padded[3], 0x80);
        assert_eq!(&padded[4..], &[0; 12]);

        let empty = pad_one_zero(&[]);
        assert_eq!(empty[0], 0x80);
        assert_eq!(&empty[1..], &[0; 15]);
    }

    #[test]
    fn test_be32_block() {
        let block = be32_block(128);
        assert_eq!(&block[..12], &[0; 12]);
        assert_eq!(&block[12..], &[0, 0, 0, 128]);
    }

    #[test]
    fn test_ct_eq() {
        assert!(ct_eq(&[1, 2, 3], &[1, 2, 3]));
        assert!(!ct_eq(&[1, 2, 3], &[1, 2, 4]));
        assert!(!ct_eq(&[1, 2], &[1, 2, 3]));
    }

    #[test]
    fn test_ct_is_zero() {
        assert!(ct_is_zero(&[]));
        assert!(ct_is_zero(&[0; 7]));
        assert!(!ct_is_zero(&[0, 0, 1, 0]));
    }
}
