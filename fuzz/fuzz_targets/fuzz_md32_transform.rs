#![no_main]
use hitls_digest::sha2::Sha256;
use libfuzzer_sys::fuzz_target;

// Raw block transforms must accept exactly one block and leave the
// streaming path intact.
fuzz_target!(|data: &[u8]| {
    let mut ctx = Sha256::new();
    let accepted = ctx.transform(data).is_ok();
    assert_eq!(accepted, data.len() == 64);

    ctx.reset();
    ctx.update(data).unwrap();
    let streamed = ctx.finish().unwrap();
    assert_eq!(streamed, Sha256::digest(data).unwrap());
});
