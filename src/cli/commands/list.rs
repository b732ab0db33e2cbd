//! CLI command for listing archive contents

use std::path::Path;

use crate::archive::TextureArchive;
use crate::dds::DxgiFormat;

/// Simple glob pattern matching (supports * and ?)
fn matches_glob(pattern: &str, text: &str) -> bool {
    let pattern_chars: Vec<char> = pattern.chars().collect();
    let text_chars: Vec<char> = text.chars().collect();
    matches_glob_recursive(&pattern_chars, &text_chars, 0, 0)
}

fn matches_glob_recursive(pattern: &[char], text: &[char], pi: usize, ti: usize) -> bool {
    if pi == pattern.len() && ti == text.len() {
        return true;
    }
    if pi == pattern.len() {
        return false;
    }

    match pattern[pi] {
        '*' => {
            for i in ti..=text.len() {
                if matches_glob_recursive(pattern, text, pi + 1, i) {
                    return true;
                }
            }
            false
        }
        '?' => {
            if ti < text.len() {
                matches_glob_recursive(pattern, text, pi + 1, ti + 1)
            } else {
                false
            }
        }
        c => {
            if ti < text.len() && text[ti].eq_ignore_ascii_case(&c) {
                matches_glob_recursive(pattern, text, pi + 1, ti + 1)
            } else {
                false
            }
        }
    }
}

/// Format byte size for human-readable output
pub(crate) fn format_size(bytes: u64) -> String {
    if bytes >= 1_048_576 {
        format!("{:.1}M", bytes as f64 / 1_048_576.0)
    } else if bytes >= 1024 {
        format!("{:.1}K", bytes as f64 / 1024.0)
    } else {
        format!("{bytes}")
    }
}

pub fn execute(
    source: &Path,
    detailed: bool,
    filter: Option<&str>,
    count: bool,
) -> anyhow::Result<()> {
    let archive = TextureArchive::open(source)?;
    let infos = archive.entry_infos();

    let filtered: Vec<_> = if let Some(pattern) = filter {
        infos
            .iter()
            .filter(|info| {
                let filename = info
                    .path
                    .rsplit(['\\', '/'])
                    .next()
                    .unwrap_or(info.path.as_str());
                matches_glob(pattern, filename) || matches_glob(pattern, &info.path)
            })
            .collect()
    } else {
        infos.iter().collect()
    };

    if count {
        println!("{}", filtered.len());
        return Ok(());
    }

    for info in &filtered {
        if detailed {
            let format = DxgiFormat::from_code(info.format)
                .map_or_else(|| format!("unknown({})", info.format), |f| f.as_str().to_string());
            let cubemap = if info.is_cubemap { " cubemap" } else { "" };
            println!(
                "{:>6}  {:>5}x{:<5} {:>2} mips  {:<14} {:>8}{}  {}",
                info.index,
                info.width,
                info.height,
                info.mipmap_count,
                format,
                format_size(info.size),
                cubemap,
                info.path
            );
        } else {
            println!("{}", info.path);
        }
    }

    Ok(())
}
