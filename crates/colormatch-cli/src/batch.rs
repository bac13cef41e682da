use std::path::{Path, PathBuf};

use colormatch::image::Image;
use colormatch::io::{functional::has_supported_extension, read_image, write_image, IoError};
use colormatch::transfer::{ColorMatcher, Method, TransferError};

/// An error type for the command line tool.
#[derive(thiserror::Error, Debug)]
pub enum CliError {
    /// Error reading or writing a file.
    #[error(transparent)]
    Io(#[from] IoError),

    /// Error in the color transfer.
    #[error(transparent)]
    Transfer(#[from] TransferError),

    /// Error when a path has no file name.
    #[error("Not a file path: {0}")]
    InvalidPath(PathBuf),

    /// Error when no source image was found.
    #[error("No supported source images found in {0}")]
    NoSources(PathBuf),

    /// Error when some files of a batch failed.
    #[error("{0} of {1} files failed")]
    Failed(usize, usize),
}

/// Parse a method name, falling back to [`Method::Default`] for unknown names.
pub fn resolve_method(name: &str) -> Method {
    match name.parse() {
        Ok(method) => method,
        Err(e) => {
            log::warn!("{e}, using '{}' instead", Method::Default);
            Method::Default
        }
    }
}

/// List the supported images of a directory sorted by name, leaving out the reference.
pub fn collect_sources(dir: &Path, reference: &Path) -> Result<Vec<PathBuf>, CliError> {
    let reference = reference
        .canonicalize()
        .unwrap_or_else(|_| reference.to_path_buf());

    let mut sources = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(IoError::from)? {
        let path = entry.map_err(IoError::from)?.path();
        if !path.is_file() || !has_supported_extension(&path) {
            continue;
        }
        let canonical = path.canonicalize().unwrap_or_else(|_| path.clone());
        if canonical != reference {
            sources.push(path);
        }
    }
    sources.sort();

    Ok(sources)
}

/// The output path `<stem>_<method>.<ext>` of a source image.
pub fn output_path(
    src_path: &Path,
    method: Method,
    output_dir: Option<&Path>,
) -> Result<PathBuf, CliError> {
    let invalid = || CliError::InvalidPath(src_path.to_path_buf());

    let stem = src_path.file_stem().ok_or_else(invalid)?.to_string_lossy();
    let name = match src_path.extension() {
        Some(ext) => format!("{stem}_{method}.{}", ext.to_string_lossy()),
        None => format!("{stem}_{method}"),
    };

    let dir = match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => src_path.parent().ok_or_else(invalid)?.to_path_buf(),
    };

    Ok(dir.join(name))
}

/// Match one source file against the reference and write the result.
pub fn process_one(
    src_path: &Path,
    reference: &Image<f64>,
    matcher: &ColorMatcher,
    method: Method,
    output_dir: Option<&Path>,
) -> Result<PathBuf, CliError> {
    let src = read_image(src_path)?;
    let result = matcher.transfer(src, reference.clone())?;

    let out_path = output_path(src_path, method, output_dir)?;
    write_image(&out_path, &result)?;

    Ok(out_path)
}

#[cfg(test)]
mod tests {
    use super::{collect_sources, output_path, process_one, resolve_method, CliError};
    use colormatch::image::{Image, ImageSize};
    use colormatch::io::{read_image, write_image};
    use colormatch::transfer::{ColorMatcher, Method};
    use std::path::Path;

    #[test]
    fn method_fallback() {
        assert_eq!(resolve_method("HM-MKL-HM"), Method::HmMklHm);
        assert_eq!(resolve_method("unknown-method"), Method::Default);
    }

    #[test]
    fn output_naming() -> Result<(), CliError> {
        let out = output_path(Path::new("shots/frame_01.png"), Method::Reinhard, None)?;
        assert_eq!(out, Path::new("shots/frame_01_reinhard.png"));

        let out = output_path(
            Path::new("shots/frame_01.TIF"),
            Method::HmMklHm,
            Some(Path::new("graded")),
        )?;
        assert_eq!(out, Path::new("graded/frame_01_hm-mkl-hm.TIF"));

        Ok(())
    }

    #[test]
    fn batch_directory() -> Result<(), Box<dyn std::error::Error>> {
        let tmp_dir = tempfile::tempdir()?;
        let dir = tmp_dir.path();

        let size = ImageSize {
            width: 6,
            height: 4,
        };
        let ramp = |offset: f64| {
            Image::new(
                size,
                3,
                (0..72).map(|i| offset + (i % 7) as f64 / 10.0).collect(),
            )
        };

        write_image(dir.join("b.png"), &ramp(0.0)?)?;
        write_image(dir.join("a.jpg"), &ramp(0.1)?)?;
        write_image(dir.join("ref.png"), &ramp(0.3)?)?;
        std::fs::write(dir.join("notes.txt"), "not an image")?;

        let reference_path = dir.join("ref.png");
        let sources = collect_sources(dir, &reference_path)?;
        assert_eq!(sources, vec![dir.join("a.jpg"), dir.join("b.png")]);

        let reference = read_image(&reference_path)?;
        let matcher = ColorMatcher::new(Method::HistogramMatch);
        let out_dir = dir.join("out");
        std::fs::create_dir_all(&out_dir)?;

        for src in &sources {
            process_one(src, &reference, &matcher, Method::HistogramMatch, Some(&out_dir))?;
        }

        assert!(out_dir.join("a_hm.jpg").exists());
        assert!(out_dir.join("b_hm.png").exists());
        assert_eq!(read_image(out_dir.join("b_hm.png"))?.size(), size);

        Ok(())
    }
}
