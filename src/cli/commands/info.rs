//! CLI command for aggregate archive info

use std::collections::HashMap;
use std::path::Path;

use super::list::format_size;
use crate::archive::TextureArchive;
use crate::dds::DxgiFormat;

/// Show aggregate info about a BA2 texture archive
pub fn execute(source: &Path) -> anyhow::Result<()> {
    let archive = TextureArchive::open(source)?;
    let infos = archive.entry_infos();

    let total_files = infos.len();
    let total_size: u64 = infos.iter().map(|i| i.size).sum();
    let cubemaps = infos.iter().filter(|i| i.is_cubemap).count();

    // Count by pixel format
    let mut by_format: HashMap<String, (usize, u64)> = HashMap::new();
    for info in &infos {
        let name = DxgiFormat::from_code(info.format)
            .map_or_else(|| format!("unknown({})", info.format), |f| f.as_str().to_string());
        let (file_count, size) = by_format.entry(name).or_insert((0, 0));
        *file_count += 1;
        *size += info.size;
    }

    // Find largest textures
    let mut largest: Vec<_> = infos.iter().collect();
    largest.sort_by_key(|i| std::cmp::Reverse(i.size));

    println!("Archive: {}", source.display());
    println!();
    println!("Version: {}", archive.header().version);
    println!("Total textures: {total_files}");
    println!(
        "Total size (extracted): {} ({} bytes)",
        format_size(total_size),
        total_size
    );
    if cubemaps > 0 {
        println!("Cubemaps: {cubemaps}");
    }
    println!();

    println!("Textures by format:");
    let mut format_list: Vec<_> = by_format.iter().collect();
    format_list.sort_by_key(|(_, (file_count, _))| std::cmp::Reverse(*file_count));
    for (format, (file_count, size)) in format_list {
        println!(
            "  {:<14} {:>6} files  {:>10}",
            format,
            file_count,
            format_size(*size)
        );
    }
    println!();

    println!("Largest textures:");
    for info in largest.iter().take(10) {
        println!(
            "  {:>10}  {:>5}x{:<5}  {}",
            format_size(info.size),
            info.width,
            info.height,
            info.path
        );
    }

    Ok(())
}
