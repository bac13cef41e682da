use colormatch_image::{Image, ImageArray, ImageSize};
use colormatch_linalg::{w2_dist, GaussianStats};
use colormatch_transfer::{
    color_match, ColorMatcher, ErrorKind, HistogramMatcher, Method, MvgdMatcher, Solver,
    TransferError, TransferStage,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_image(
    rng: &mut StdRng,
    size: ImageSize,
    num_channels: usize,
    lo: f64,
    hi: f64,
) -> Result<Image<f64>, TransferError> {
    let data = (0..size.num_pixels() * num_channels)
        .map(|_| rng.random_range(lo..hi))
        .collect();
    Ok(Image::new(size, num_channels, data)?)
}

// correlated channels so the covariance is not diagonal
fn tinted_image(
    rng: &mut StdRng,
    size: ImageSize,
    tint: [f64; 3],
    spread: f64,
) -> Result<Image<f64>, TransferError> {
    let data = (0..size.num_pixels())
        .flat_map(|_| {
            let base = rng.random_range(0.0..1.0);
            let noise: [f64; 3] = [
                rng.random_range(-0.1..0.1),
                rng.random_range(-0.1..0.1),
                rng.random_range(-0.1..0.1),
            ];
            [0, 1, 2].map(|i| tint[i] + spread * (base + noise[i]))
        })
        .collect();
    Ok(Image::new(size, 3, data)?)
}

fn channel_range(image: &Image<f64>, ch: usize) -> Result<(f64, f64), TransferError> {
    Ok(image
        .channel_iter(ch)?
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        }))
}

#[test]
fn histogram_stays_in_reference_range() -> Result<(), TransferError> {
    let mut rng = StdRng::seed_from_u64(7);
    let src = random_image(&mut rng, [16, 12].into(), 3, 0.0, 1.0)?;
    let reference = random_image(&mut rng, [9, 7].into(), 3, 0.3, 0.6)?;

    let out = HistogramMatcher.apply(&src, &reference)?;

    for ch in 0..3 {
        let (lo, hi) = channel_range(&reference, ch)?;
        let (out_lo, out_hi) = channel_range(&out, ch)?;
        assert!(out_lo >= lo && out_hi <= hi);
        assert_eq!((out_lo, out_hi), (lo, hi));
    }

    Ok(())
}

#[test]
fn histogram_is_idempotent() -> Result<(), TransferError> {
    let mut rng = StdRng::seed_from_u64(11);
    let src = random_image(&mut rng, [10, 10].into(), 3, 0.0, 1.0)?;
    let reference = random_image(&mut rng, [10, 10].into(), 3, 0.2, 0.9)?;

    let once = HistogramMatcher.apply(&src, &reference)?;
    let twice = HistogramMatcher.apply(&once, &reference)?;

    once.as_slice()
        .iter()
        .zip(twice.as_slice())
        .for_each(|(a, b)| approx::assert_abs_diff_eq!(*a, *b, epsilon = 1e-12));

    Ok(())
}

#[test]
fn mkl_reduces_wasserstein_distance() -> Result<(), TransferError> {
    let mut rng = StdRng::seed_from_u64(3);
    let src = tinted_image(&mut rng, [20, 15].into(), [0.1, 0.3, 0.2], 0.5)?;
    let reference = tinted_image(&mut rng, [12, 10].into(), [0.5, 0.2, 0.1], 0.3)?;

    let out = ColorMatcher::new(Method::Mkl).transfer(src.clone(), reference.clone())?;

    let ref_stats = GaussianStats::from_image(&reference)?;
    let before = w2_dist(&GaussianStats::from_image(&src)?, &ref_stats)?;
    let after = w2_dist(&GaussianStats::from_image(&out)?, &ref_stats)?;

    assert!(after < before);
    approx::assert_abs_diff_eq!(after, 0.0, epsilon = 1e-9);

    Ok(())
}

#[test]
fn analytical_recovers_affine_reference() -> Result<(), TransferError> {
    let mut rng = StdRng::seed_from_u64(5);
    let src = tinted_image(&mut rng, [8, 8].into(), [0.1, 0.2, 0.3], 0.5)?;
    let reference = src.map(|&v| 0.5 * v + 0.25);

    let out = color_match(src.clone(), reference.clone(), "mvgd")?;

    out.as_slice()
        .iter()
        .zip(reference.as_slice())
        .for_each(|(a, b)| approx::assert_abs_diff_eq!(*a, *b, epsilon = 1e-6));

    let ref_stats = GaussianStats::from_image(&reference)?;
    let before = w2_dist(&GaussianStats::from_image(&src)?, &ref_stats)?;
    let after = w2_dist(&GaussianStats::from_image(&out)?, &ref_stats)?;
    assert!(after < before);

    Ok(())
}

#[test]
fn rgb_against_rgba_gives_rgb() -> Result<(), TransferError> {
    let mut rng = StdRng::seed_from_u64(1);
    let src = random_image(&mut rng, [6, 6].into(), 3, 0.0, 1.0)?;
    let reference = random_image(&mut rng, [6, 6].into(), 4, 0.0, 1.0)?;

    for method in Method::ALL {
        let out = ColorMatcher::new(method).transfer(src.clone(), reference.clone())?;
        assert_eq!(out.shape(), [6, 6, 3], "{method}");
    }

    Ok(())
}

#[test]
fn mono_against_rgb_gives_mono() -> Result<(), TransferError> {
    let mut rng = StdRng::seed_from_u64(2);
    let src = random_image(&mut rng, [6, 5].into(), 1, 0.0, 1.0)?;
    let reference = random_image(&mut rng, [6, 5].into(), 3, 0.4, 0.5)?;

    let out = ColorMatcher::new(Method::Default).transfer(src, reference)?;
    assert_eq!(out.shape(), [5, 6, 1]);

    // histogram matching against the luma of the reference
    assert!(out
        .as_slice()
        .iter()
        .all(|&v| (0.4 - 1e-12..=0.5 + 1e-12).contains(&v)));

    Ok(())
}

#[test]
fn histogram_method_reconciles_channels() -> Result<(), TransferError> {
    let mut rng = StdRng::seed_from_u64(4);
    let rgba = random_image(&mut rng, [6, 4].into(), 4, 0.0, 1.0)?;
    let rgb = random_image(&mut rng, [5, 5].into(), 3, 0.2, 0.7)?;
    let mono = random_image(&mut rng, [4, 4].into(), 1, 0.4, 0.5)?;

    let matcher = ColorMatcher::new(Method::HistogramMatch);

    let out = matcher.transfer(rgba, rgb.clone())?;
    assert_eq!(out.shape(), [4, 6, 3]);

    let out = matcher.transfer(rgb, mono.clone())?;
    assert_eq!(out.shape(), [5, 5, 1]);
    let (lo, hi) = channel_range(&mono, 0)?;
    assert!(out.as_slice().iter().all(|&v| (lo..=hi).contains(&v)));

    Ok(())
}

#[test]
fn composite_pipelines_chain_stages() -> Result<(), TransferError> {
    let mut rng = StdRng::seed_from_u64(13);
    let src = tinted_image(&mut rng, [8, 6].into(), [0.2, 0.1, 0.3], 0.5)?;
    let reference = tinted_image(&mut rng, [8, 6].into(), [0.4, 0.3, 0.1], 0.3)?;

    for (method, solver) in [(Method::HmMklHm, Solver::Mkl), (Method::HmMvgdHm, Solver::Analytical)] {
        let out = ColorMatcher::new(method).transfer(src.clone(), reference.clone())?;

        // every stage sees the unchanged reference
        let first = HistogramMatcher.apply(&src, &reference)?;
        let second = MvgdMatcher::new(solver).apply(&first, &reference)?;
        let expected = HistogramMatcher.apply(&second, &reference)?;

        assert_eq!(out, expected, "{method}");
    }

    Ok(())
}

#[test]
fn rank_four_array_rejected() -> Result<(), TransferError> {
    let src = ImageArray::new(vec![5, 5, 3, 1], vec![0.5; 75])?;
    let reference = ImageArray::new(vec![5, 5, 3], vec![0.5; 75])?;

    let err = ColorMatcher::default().transfer(src, reference).err();
    assert_eq!(err.map(|e| e.kind()), Some(ErrorKind::Dimension));

    Ok(())
}

#[test]
fn flat_gray_mvgd() -> Result<(), TransferError> {
    let size = ImageSize {
        width: 5,
        height: 5,
    };
    let src = Image::from_size_val(size, 3, 0.2)?;
    let reference = Image::from_size_val(size, 3, 0.8)?;

    for method in [Method::Mvgd, Method::Mkl, Method::Default] {
        let out = ColorMatcher::new(method).transfer(src.clone(), reference.clone())?;
        assert_eq!(out.shape(), [5, 5, 3]);
        out.as_slice()
            .iter()
            .for_each(|&v| approx::assert_abs_diff_eq!(v, 0.8, epsilon = 1e-9));
    }

    Ok(())
}

#[test]
fn unknown_method_rejected() -> Result<(), TransferError> {
    let src = Image::from_size_val([4, 4].into(), 3, 0.5)?;
    let err = color_match(src.clone(), src, "unknown-method").err();
    assert_eq!(
        err,
        Some(TransferError::Method("unknown-method".to_string()))
    );
    Ok(())
}

#[test]
fn every_method_keeps_source_shape() -> Result<(), TransferError> {
    let mut rng = StdRng::seed_from_u64(9);
    let src = tinted_image(&mut rng, [7, 9].into(), [0.1, 0.2, 0.1], 0.6)?;
    let reference = tinted_image(&mut rng, [7, 9].into(), [0.3, 0.1, 0.2], 0.4)?;

    for method in Method::ALL {
        let out = ColorMatcher::new(method).transfer(src.clone(), reference.clone())?;
        assert_eq!(out.shape(), src.shape(), "{method}");
        assert!(out.as_slice().iter().all(|v| v.is_finite()), "{method}");
    }

    Ok(())
}
