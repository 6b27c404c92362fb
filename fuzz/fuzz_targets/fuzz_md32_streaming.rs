#![no_main]
use hitls_digest::md32::{Md32Algorithm, Md32Context};
use hitls_digest::md5::Md5Core;
use hitls_digest::sha1::Sha1Core;
use hitls_digest::sha2::{Sha224Core, Sha256Core};
use hitls_digest::sm3::Sm3Core;
use libfuzzer_sys::fuzz_target;

// The first two bytes pick the chunk size; the rest is the message.
fn check<A: Md32Algorithm>(step: usize, msg: &[u8])
where
    A::Output: PartialEq + core::fmt::Debug,
{
    let mut whole = Md32Context::<A>::new();
    whole.update(msg);
    let expected = whole.finalize();

    let mut ctx = Md32Context::<A>::new();
    for chunk in msg.chunks(step) {
        ctx.update(chunk);
        assert!(ctx.pending().len() < Md32Context::<A>::block_size());
    }
    assert_eq!(ctx.bit_len(), (msg.len() as u64) << 3);
    assert_eq!(ctx.finalize(), expected);
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let step = u16::from_le_bytes([data[0], data[1]]) as usize % 256 + 1;
    let msg = &data[2..];

    check::<Md5Core>(step, msg);
    check::<Sha1Core>(step, msg);
    check::<Sha224Core>(step, msg);
    check::<Sha256Core>(step, msg);
    check::<Sm3Core>(step, msg);
});
