use argh::FromArgs;
use rayon::prelude::*;
use std::path::PathBuf;

use colormatch::{io::read_image, transfer::ColorMatcher};

mod batch;

#[derive(FromArgs)]
/// Transfer the colors of a reference image onto one or many source images
struct Args {
    /// path to a source image or to a directory of source images
    #[argh(option, short = 's')]
    src: PathBuf,

    /// path to the reference image
    #[argh(option, short = 'r', long = "ref")]
    reference: PathBuf,

    /// method: default, hm, reinhard, mvgd, mkl, hm-mvgd-hm, hm-mkl-hm (default: default)
    #[argh(option, short = 'm', default = "String::from(\"default\")")]
    method: String,

    /// output directory (default: the directory of each source image)
    #[argh(option, short = 'o')]
    output: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();

    let method = batch::resolve_method(&args.method);
    let matcher = ColorMatcher::new(method);

    let reference = read_image(&args.reference)?;
    log::info!(
        "reference {} ({} x {} channels)",
        args.reference.display(),
        reference.size(),
        reference.num_channels()
    );

    if let Some(dir) = &args.output {
        std::fs::create_dir_all(dir)?;
    }

    let sources = if args.src.is_dir() {
        batch::collect_sources(&args.src, &args.reference)?
    } else {
        vec![args.src.clone()]
    };

    if sources.is_empty() {
        return Err(batch::CliError::NoSources(args.src).into());
    }

    let failures = sources
        .par_iter()
        .map(|src_path| {
            match batch::process_one(src_path, &reference, &matcher, method, args.output.as_deref()) {
                Ok(out_path) => {
                    log::info!("{} -> {}", src_path.display(), out_path.display());
                    0
                }
                Err(e) => {
                    log::error!("{}: {e}", src_path.display());
                    1
                }
            }
        })
        .sum::<usize>();

    if failures > 0 {
        return Err(batch::CliError::Failed(failures, sources.len()).into());
    }

    Ok(())
}
