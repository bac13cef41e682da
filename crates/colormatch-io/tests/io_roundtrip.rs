use colormatch_image::{Image, ImageSize};
use colormatch_io::{read_image, read_image_any, write_image, GenericImage, IoError};

fn ramp(size: ImageSize, num_channels: usize) -> Result<Image<f64>, IoError> {
    let n = size.num_pixels() * num_channels;
    let data = (0..n).map(|i| i as f64 / (n - 1) as f64).collect();
    Ok(Image::new(size, num_channels, data)?)
}

const SIZE: ImageSize = ImageSize {
    width: 8,
    height: 6,
};

#[test]
fn write_read_png() -> Result<(), IoError> {
    let tmp_dir = tempfile::tempdir()?;
    let file_path = tmp_dir.path().join("ramp.png");

    let image = ramp(SIZE, 3)?;
    write_image(&file_path, &image)?;
    assert!(file_path.exists(), "File does not exist: {:?}", file_path);

    let image_any = read_image_any(&file_path)?;
    assert!(matches!(image_any, GenericImage::U8(_)));

    let image_back = read_image(&file_path)?;
    assert_eq!(image_back.size(), SIZE);
    assert_eq!(image_back.num_channels(), 3);

    image_back
        .as_slice()
        .iter()
        .zip(image.as_slice())
        .for_each(|(a, b)| assert!((a - b).abs() <= 0.5 / 255.0 + 1e-12));

    Ok(())
}

#[test]
fn write_read_tiff_16bit() -> Result<(), IoError> {
    let tmp_dir = tempfile::tempdir()?;
    let file_path = tmp_dir.path().join("ramp.TIF");

    // values outside of the unit range are stretched by their own extent
    let image = ramp(SIZE, 3)?.map(|&v| 4.0 * v - 1.0);
    write_image(&file_path, &image)?;

    let image_any = read_image_any(&file_path)?;
    assert!(matches!(image_any, GenericImage::U16(_)));
    assert_eq!(image_any.num_channels(), 3);

    let image_back = image_any.into_unit()?;
    assert_eq!(image_back.as_slice()[0], 0.0);
    assert_eq!(image_back.as_slice()[SIZE.num_pixels() * 3 - 1], 1.0);

    Ok(())
}

#[test]
fn write_read_channel_layouts() -> Result<(), IoError> {
    let tmp_dir = tempfile::tempdir()?;

    for num_channels in [1, 2, 4] {
        let file_path = tmp_dir.path().join(format!("ramp_{num_channels}.png"));
        write_image(&file_path, &ramp(SIZE, num_channels)?)?;

        let image_back = read_image(&file_path)?;
        assert_eq!(image_back.num_channels(), num_channels);
        assert_eq!(image_back.size(), SIZE);
    }

    Ok(())
}

#[test]
fn write_read_bmp_and_jpeg() -> Result<(), IoError> {
    let tmp_dir = tempfile::tempdir()?;

    for name in ["ramp.bmp", "ramp.jpg"] {
        let file_path = tmp_dir.path().join(name);
        write_image(&file_path, &ramp(SIZE, 3)?)?;

        let image_back = read_image(&file_path)?;
        assert_eq!(image_back.size(), SIZE);
        assert_eq!(image_back.num_channels(), 3);
    }

    Ok(())
}

#[test]
fn write_jpeg_drops_alpha() -> Result<(), IoError> {
    let tmp_dir = tempfile::tempdir()?;

    for (num_channels, expected) in [(4, 3), (2, 1)] {
        let file_path = tmp_dir.path().join(format!("ramp_{num_channels}.jpeg"));
        write_image(&file_path, &ramp(SIZE, num_channels)?)?;

        let image_back = read_image(&file_path)?;
        assert_eq!(image_back.num_channels(), expected);
        assert_eq!(image_back.size(), SIZE);
    }

    Ok(())
}

#[test]
fn invalid_extension() -> Result<(), IoError> {
    let tmp_dir = tempfile::tempdir()?;
    let file_path = tmp_dir.path().join("ramp.gif");

    let res = write_image(&file_path, &ramp(SIZE, 3)?);
    assert!(matches!(res, Err(IoError::InvalidFileExtension(_))));

    std::fs::write(&file_path, b"GIF89a")?;
    let res = read_image(&file_path);
    assert!(matches!(res, Err(IoError::InvalidFileExtension(_))));

    Ok(())
}

#[test]
fn missing_file() {
    let res = read_image("does/not/exist.png");
    assert!(matches!(res, Err(IoError::FileDoesNotExist(_))));
}
