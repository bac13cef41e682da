use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use colormatch_image::{Image, ImageSize};
use colormatch_transfer::{ColorMatcher, Method};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_image(rng: &mut StdRng, size: ImageSize) -> Image<f64> {
    let data = (0..size.num_pixels() * 3)
        .map(|_| rng.random_range(0.0..1.0))
        .collect();
    Image::new(size, 3, data).unwrap()
}

fn bench_transfer(c: &mut Criterion) {
    let mut group = c.benchmark_group("ColorTransfer");
    let mut rng = StdRng::seed_from_u64(0);

    for (width, height) in [(256, 224), (512, 448)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let size = ImageSize {
            width: *width,
            height: *height,
        };
        let src = random_image(&mut rng, size);
        let reference = random_image(&mut rng, size);

        for method in Method::ALL {
            let parameter_string = format!("{width}x{height}");
            let matcher = ColorMatcher::new(method);

            group.bench_with_input(
                BenchmarkId::new(method.as_str(), &parameter_string),
                &(&src, &reference),
                |b, i| {
                    let (src, reference) = (i.0.clone(), i.1.clone());
                    b.iter(|| {
                        black_box(matcher.transfer(src.clone(), reference.clone())).unwrap();
                    })
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_transfer);
criterion_main!(benches);
