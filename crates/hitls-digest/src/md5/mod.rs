//! MD5 message digest algorithm.
//!
//! MD5 produces a 128-bit (16-byte) hash value. It is defined in RFC 1321.
//!
//! **Security warning**: MD5 is cryptographically broken and should not be
//! used for security purposes. It is provided only for legacy compatibility
//! and non-security applications (e.g., checksums).

use std::io;

use hitls_types::CryptoError;

use crate::md32::{ByteOrder, LittleEndian, Md32Algorithm, Md32Context};
use crate::provider::{exact_block, write_digest, Digest};

/// MD5 output size in bytes.
pub const MD5_OUTPUT_SIZE: usize = 16;

/// MD5 block size in bytes.
pub const MD5_BLOCK_SIZE: usize = 64;

const MD5_IV: [u32; 4] = [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476];

/// Per-round additive constants, `floor(abs(sin(i + 1)) * 2^32)`.
const T: [u32; 64] = [
    0xd76aa478, 0xe8c7b756, 0x242070db, 0xc1bdceee, 0xf57c0faf, 0x4787c62a, 0xa8304613, 0xfd469501,
    0x698098d8, 0x8b44f7af, 0xffff5bb1, 0x895cd7be, 0x6b901122, 0xfd987193, 0xa679438e, 0x49b40821,
    0xf61e2562, 0xc040b340, 0x265e5a51, 0xe9b6c7aa, 0xd62f105d, 0x02441453, 0xd8a1e681, 0xe7d3fbc8,
    0x21e1cde6, 0xc33707d6, 0xf4d50d87, 0x455a14ed, 0xa9e3e905, 0xfcefa3f8, 0x676f02d9, 0x8d2a4c8a,
    0xfffa3942, 0x8771f681, 0x6d9d6122, 0xfde5380c, 0xa4beea44, 0x4bdecfa9, 0xf6bb4b60, 0xbebfbc70,
    0x289b7ec6, 0xeaa127fa, 0xd4ef3085, 0x04881d05, 0xd9d4d039, 0xe6db99e5, 0x1fa27cf8, 0xc4ac5665,
    0xf4292244, 0x432aff97, 0xab9423a7, 0xfc93a039, 0x655b59c3, 0x8f0ccc92, 0xffeff47d, 0x85845dd1,
    0x6fa87e4f, 0xfe2ce6e0, 0xa3014314, 0x4e0811a1, 0xf7537e82, 0xbd3af235, 0x2ad7d2bb, 0xeb86d391,
];

/// Left-rotate amounts, four per round.
const S: [[u32; 4]; 4] = [[7, 12, 17, 22], [5, 9, 14, 20], [4, 11, 16, 23], [6, 10, 15, 21]];

/// MD5 plug-in for the MD32 engine.
pub enum Md5Core {}

impl Md32Algorithm for Md5Core {
    type Order = LittleEndian;
    type State = [u32; 4];
    type Block = [u8; MD5_BLOCK_SIZE];
    type Output = [u8; MD5_OUTPUT_SIZE];

    const INITIAL_STATE: [u32; 4] = MD5_IV;
    const EMPTY_BLOCK: [u8; MD5_BLOCK_SIZE] = [0; MD5_BLOCK_SIZE];

    fn block_data_order(state: &mut [u32; 4], data: &[u8], num: usize) {
        for block in data.chunks_exact(MD5_BLOCK_SIZE).take(num) {
            compress(state, block);
        }
    }

    fn make_output(state: &[u32; 4]) -> [u8; MD5_OUTPUT_SIZE] {
        let mut out = [0u8; MD5_OUTPUT_SIZE];
        LittleEndian::store_words(state, &mut out);
        out
    }
}

fn compress(state: &mut [u32; 4], block: &[u8]) {
    let mut x = [0u32; 16];
    LittleEndian::load_words(block, &mut x);

    let [mut a, mut b, mut c, mut d] = *state;

    for i in 0..64 {
        let round = i / 16;
        let (f, g) = match round {
            0 => ((b & c) | (!b & d), i),
            1 => ((d & b) | (!d & c), (5 * i + 1) % 16),
            2 => (b ^ c ^ d, (3 * i + 5) % 16),
            _ => (c ^ (b | !d), (7 * i) % 16),
        };
        let sum = a.wrapping_add(f).wrapping_add(T[i]).wrapping_add(x[g]);
        a = d;
        d = c;
        c = b;
        b = b.wrapping_add(sum.rotate_left(S[round][i % 4]));
    }

    state[0] = state[0].wrapping_add(a);
    state[1] = state[1].wrapping_add(b);
    state[2] = state[2].wrapping_add(c);
    state[3] = state[3].wrapping_add(d);
}

/// MD5 hash context.
#[derive(Clone, Default)]
pub struct Md5 {
    ctx: Md32Context<Md5Core>,
}

impl Md5 {
    /// Create a new MD5 hash context.
    pub fn new() -> Self {
        Self {
            ctx: Md32Context::new(),
        }
    }

    /// Feed data into the hash computation.
    pub fn update(&mut self, data: &[u8]) -> Result<(), CryptoError> {
        self.ctx.update(data);
        Ok(())
    }

    /// Apply the compression function to one raw 64-byte block without
    /// touching the buffered input or the length counter.
    pub fn transform(&mut self, block: &[u8]) -> Result<(), CryptoError> {
        self.ctx.transform(exact_block(block)?);
        Ok(())
    }

    /// Finalize the hash and return the 16-byte digest.
    pub fn finish(&mut self) -> Result<[u8; MD5_OUTPUT_SIZE], CryptoError> {
        Ok(self.ctx.finalize())
    }

    /// Reset the hash context for a new computation.
    pub fn reset(&mut self) {
        self.ctx.reset();
    }

    /// One-shot: compute the MD5 digest of `data`.
    pub fn digest(data: &[u8]) -> Result<[u8; MD5_OUTPUT_SIZE], CryptoError> {
        let mut ctx = Self::new();
        ctx.update(data)?;
        ctx.finish()
    }
}

impl Digest for Md5 {
    fn output_size(&self) -> usize {
        MD5_OUTPUT_SIZE
    }

    fn block_size(&self) -> usize {
        MD5_BLOCK_SIZE
    }

    fn update(&mut self, data: &[u8]) -> Result<(), CryptoError> {
        Md5::update(self, data)
    }

    fn finish(&mut self, out: &mut [u8]) -> Result<(), CryptoError> {
        write_digest(out, &Md5::finish(self)?)
    }

    fn reset(&mut self) {
        Md5::reset(self);
    }
}

impl io::Write for Md5 {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.ctx.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
