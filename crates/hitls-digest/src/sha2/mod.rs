//! SHA-2 family of hash algorithms with 32-bit words.
//!
//! Provides SHA-224 and SHA-256 as defined in FIPS 180-4. Both share one
//! compression function and differ only in the initial hash value and in
//! SHA-224 truncating the final state to seven words.

use std::io;

use hitls_types::CryptoError;

use crate::md32::{BigEndian, ByteOrder, Md32Algorithm, Md32Context};
use crate::provider::{exact_block, write_digest, Digest};

/// SHA-224 / SHA-256 block size in bytes.
pub const SHA256_BLOCK_SIZE: usize = 64;

const K256: [u32; 64] = [
    0x428a2f98, 0x71374491, 0xb5c0fbcf, 0xe9b5dba5, 0x3956c25b, 0x59f111f1, 0x923f82a4, 0xab1c5ed5,
    0xd807aa98, 0x12835b01, 0x243185be, 0x550c7dc3, 0x72be5d74, 0x80deb1fe, 0x9bdc06a7, 0xc19bf174,
    0xe49b69c1, 0xefbe4786, 0x0fc19dc6, 0x240ca1cc, 0x2de92c6f, 0x4a7484aa, 0x5cb0a9dc, 0x76f988da,
    0x983e5152, 0xa831c66d, 0xb00327c8, 0xbf597fc7, 0xc6e00bf3, 0xd5a79147, 0x06ca6351, 0x14292967,
    0x27b70a85, 0x2e1b2138, 0x4d2c6dfc, 0x53380d13, 0x650a7354, 0x766a0abb, 0x81c2c92e, 0x92722c85,
    0xa2bfe8a1, 0xa81a664b, 0xc24b8b70, 0xc76c51a3, 0xd192e819, 0xd6990624, 0xf40e3585, 0x106aa070,
    0x19a4c116, 0x1e376c08, 0x2748774c, 0x34b0bcb5, 0x391c0cb3, 0x4ed8aa4a, 0x5b9cca4f, 0x682e6ff3,
    0x748f82ee, 0x78a5636f, 0x84c87814, 0x8cc70208, 0x90befffa, 0xa4506ceb, 0xbef9a3f7, 0xc67178f2,
];

// ---------------------------------------------------------------------------
// Shared compression function
// ---------------------------------------------------------------------------

/// Process `num` consecutive 64-byte blocks from `data`.
fn sha256_block_data_order(state: &mut [u32; 8], data: &[u8], num: usize) {
    for block in data.chunks_exact(SHA256_BLOCK_SIZE).take(num) {
        compress(state, block);
    }
}

fn compress(state: &mut [u32; 8], block: &[u8]) {
    let mut w = [0u32; 64];
    BigEndian::load_words(block, &mut w[..16]);
    for t in 16..64 {
        let s0 = w[t - 15].rotate_right(7) ^ w[t - 15].rotate_right(18) ^ (w[t - 15] >> 3);
        let s1 = w[t - 2].rotate_right(17) ^ w[t - 2].rotate_right(19) ^ (w[t - 2] >> 10);
        w[t] = w[t - 16]
            .wrapping_add(s0)
            .wrapping_add(w[t - 7])
            .wrapping_add(s1);
    }

    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;

    for t in 0..64 {
        let big_s1 = e.rotate_right(6) ^ e.rotate_right(11) ^ e.rotate_right(25);
        let ch = (e & f) ^ (!e & g);
        let t1 = h
            .wrapping_add(big_s1)
            .wrapping_add(ch)
            .wrapping_add(K256[t])
            .wrapping_add(w[t]);
        let big_s0 = a.rotate_right(2) ^ a.rotate_right(13) ^ a.rotate_right(22);
        let maj = (a & b) ^ (a & c) ^ (b & c);
        let t2 = big_s0.wrapping_add(maj);

        h = g;
        g = f;
        f = e;
        e = d.wrapping_add(t1);
        d = c;
        c = b;
        b = a;
        a = t1.wrapping_add(t2);
    }

    for (s, v) in state.iter_mut().zip([a, b, c, d, e, f, g, h]) {
        *s = s.wrapping_add(v);
    }
}

// ---------------------------------------------------------------------------
// SHA-224
// ---------------------------------------------------------------------------

/// SHA-224 output size in bytes.
pub const SHA224_OUTPUT_SIZE: usize = 28;

const SHA224_IV: [u32; 8] = [
    0xc1059ed8, 0x367cd507, 0x3070dd17, 0xf70e5939, 0xffc00b31, 0x68581511, 0x64f98fa7, 0xbefa4fa4,
];

/// SHA-224 plug-in for the MD32 engine.
pub enum Sha224Core {}

impl Md32Algorithm for Sha224Core {
    type Order = BigEndian;
    type State = [u32; 8];
    type Block = [u8; SHA256_BLOCK_SIZE];
    type Output = [u8; SHA224_OUTPUT_SIZE];

    const INITIAL_STATE: [u32; 8] = SHA224_IV;
    const EMPTY_BLOCK: [u8; SHA256_BLOCK_SIZE] = [0; SHA256_BLOCK_SIZE];

    fn block_data_order(state: &mut [u32; 8], data: &[u8], num: usize) {
        sha256_block_data_order(state, data, num);
    }

    fn make_output(state: &[u32; 8]) -> [u8; SHA224_OUTPUT_SIZE] {
        // The eighth word is dropped.
        let mut out = [0u8; SHA224_OUTPUT_SIZE];
        BigEndian::store_words(&state[..7], &mut out);
        out
    }
}

/// SHA-224 hash context.
#[derive(Clone, Default)]
pub struct Sha224 {
    ctx: Md32Context<Sha224Core>,
}

impl Sha224 {
    /// Create a new SHA-224 hash context.
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

    /// Apply the compression function to one raw 64-byte block.
    pub fn transform(&mut self, block: &[u8]) -> Result<(), CryptoError> {
        self.ctx.transform(exact_block(block)?);
        Ok(())
    }

    /// Finalize the hash and return the 28-byte digest.
    pub fn finish(&mut self) -> Result<[u8; SHA224_OUTPUT_SIZE], CryptoError> {
        Ok(self.ctx.finalize())
    }

    /// Reset the hash context for a new computation.
    pub fn reset(&mut self) {
        self.ctx.reset();
    }

    /// One-shot: compute the SHA-224 digest of `data`.
    pub fn digest(data: &[u8]) -> Result<[u8; SHA224_OUTPUT_SIZE], CryptoError> {
        let mut ctx = Self::new();
        ctx.update(data)?;
        ctx.finish()
    }
}

impl Digest for Sha224 {
    fn output_size(&self) -> usize {
        SHA224_OUTPUT_SIZE
    }

    fn block_size(&self) -> usize {
        SHA256_BLOCK_SIZE
    }

    fn update(&mut self, data: &[u8]) -> Result<(), CryptoError> {
        Sha224::update(self, data)
    }

    fn finish(&mut self, out: &mut [u8]) -> Result<(), CryptoError> {
        write_digest(out, &Sha224::finish(self)?)
    }

    fn reset(&mut self) {
        Sha224::reset(self);
    }
}

impl io::Write for Sha224 {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.ctx.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// SHA-256
// ---------------------------------------------------------------------------

/// SHA-256 output size in bytes.
pub const SHA256_OUTPUT_SIZE: usize = 32;

const SHA256_IV: [u32; 8] = [
    0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
];

/// SHA-256 plug-in for the MD32 engine.
pub enum Sha256Core {}

impl Md32Algorithm for Sha256Core {
    type Order = BigEndian;
    type State = [u32; 8];
    type Block = [u8; SHA256_BLOCK_SIZE];
    type Output = [u8; SHA256_OUTPUT_SIZE];

    const INITIAL_STATE: [u32; 8] = SHA256_IV;
    const EMPTY_BLOCK: [u8; SHA256_BLOCK_SIZE] = [0; SHA256_BLOCK_SIZE];

    fn block_data_order(state: &mut [u32; 8], data: &[u8], num: usize) {
        sha256_block_data_order(state, data, num);
    }

    fn make_output(state: &[u32; 8]) -> [u8; SHA256_OUTPUT_SIZE] {
        let mut out = [0u8; SHA256_OUTPUT_SIZE];
        BigEndian::store_words(state, &mut out);
        out
    }
}

/// SHA-256 hash context.
#[derive(Clone, Default)]
pub struct Sha256 {
    ctx: Md32Context<Sha256Core>,
}

impl Sha256 {
    /// Create a new SHA-256 hash context.
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

    /// Apply the compression function to one raw 64-byte block.
    pub fn transform(&mut self, block: &[u8]) -> Result<(), CryptoError> {
        self.ctx.transform(exact_block(block)?);
        Ok(())
    }

    /// Finalize the hash and return the 32-byte digest.
    pub fn finish(&mut self) -> Result<[u8; SHA256_OUTPUT_SIZE], CryptoError> {
        Ok(self.ctx.finalize())
    }

    /// Reset the hash context for a new computation.
    pub fn reset(&mut self) {
        self.ctx.reset();
    }

    /// One-shot: compute the SHA-256 digest of `data`.
    pub fn digest(data: &[u8]) -> Result<[u8; SHA256_OUTPUT_SIZE], CryptoError> {
        let mut ctx = Self::new();
        ctx.update(data)?;
        ctx.finish()
    }
}

impl Digest for Sha256 {
    fn output_size(&self) -> usize {
        SHA256_OUTPUT_SIZE
    }

    fn block_size(&self) -> usize {
        SHA256_BLOCK_SIZE
    }

    fn update(&mut self, data: &[u8]) -> Result<(), CryptoError> {
        Sha256::update(self, data)
    }

    fn finish(&mut self, out: &mut [u8]) -> Result<(), CryptoError> {
        write_digest(out, &Sha256::finish(self)?)
    }

    fn reset(&mut self) {
        Sha256::reset(self);
    }
}

impl io::Write for Sha256 {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.ctx.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
