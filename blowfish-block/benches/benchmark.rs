use blowfish_block::{BlockCipher, BlowfishControlBlock};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("Blowfish key setup", |b| {
        b.iter(|| {
            let _block =
                black_box(BlowfishControlBlock::new(b"0123456789abcdef0123456789abcdef")).unwrap();
        })
    });

    c.bench_function("Blowfish encrypt 1M (ECB)", |b| {
        let control_block =
            BlowfishControlBlock::new(b"0123456789abcdef0123456789abcdef").unwrap();
        let buff = vec![0_u8; 1024 * 1024];
        b.iter(|| {
            for chunk in buff.chunks_exact(8) {
                black_box(control_block.encrypt(chunk.try_into().unwrap()));
            }
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
