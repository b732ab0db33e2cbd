//! CLI command for texture extraction

use std::path::Path;
use std::time::Instant;

use crate::archive::{ExtractProgress, ExtractionOptions, TextureArchive};
use crate::cli::progress::{LOOKING_GLASS, PACKAGE, PICTURE, print_done, print_step, simple_bar};

pub fn execute(
    source: &Path,
    destination: &Path,
    file: Option<&str>,
    index: Option<usize>,
    overwrite: bool,
    show_progress: bool,
    single_threaded: bool,
) -> anyhow::Result<()> {
    let started = Instant::now();

    print_step(
        1,
        2,
        LOOKING_GLASS,
        &format!("Reading {}...", source.display()),
    );
    let archive = TextureArchive::open(source)?;

    if let Some(name) = file {
        print_step(2, 2, PICTURE, &format!("Extracting {name}..."));
        let path = archive.extract_file_by_name(name, destination, overwrite)?;
        println!("Wrote {}", path.display());
    } else if let Some(index) = index {
        let name = archive.name_of(index).unwrap_or("<unnamed>").to_string();
        print_step(2, 2, PICTURE, &format!("Extracting #{index} ({name})..."));
        let path = archive.extract_file(index, destination, overwrite)?;
        println!("Wrote {}", path.display());
    } else {
        let total = archive.file_count();
        print_step(2, 2, PACKAGE, &format!("Extracting {total} textures..."));

        let options = ExtractionOptions::new()
            .with_overwrite(overwrite)
            .with_multithreaded(!single_threaded);

        if show_progress {
            let bar = simple_bar(total as u64, "Extracting");
            let report = |p: &ExtractProgress| bar.set_position(p.current as u64);
            archive.extract_all_with_progress(destination, &options, Some(&report), None)?;
            bar.finish_and_clear();
        } else {
            archive.extract_all(destination, &options)?;
        }
        println!("Extracted {total} textures to {}", destination.display());
    }

    print_done(started.elapsed());
    Ok(())
}
