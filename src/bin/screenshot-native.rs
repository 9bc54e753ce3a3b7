use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use rayon::prelude::*;

use screenshot_native::{
    probe, scan, AlphaChannelOption, BuildConfig, CompositeOperator, Image, LinkedLibrary,
    ProbeStatus, QuantumFormat, ScanOptions, ALPHA_THRESHOLD,
};

#[derive(Parser)]
#[command(
    name = "screenshot-native",
    about = "Check image library compatibility and locate non-transparent pixels",
    version,
    after_help = "Set RUST_LOG=debug for diagnostics."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Verify the linked image library matches this build
    Probe,

    /// Print coordinates of non-transparent pixels
    Scan {
        /// Image files or directories
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output buffer capacity (at most max - 1 pixels are reported)
        #[arg(short, long, default_value_t = 1024)]
        max: usize,

        /// Alpha cutoff on the native quantum scale
        #[arg(short, long, default_value_t = ALPHA_THRESHOLD)]
        threshold: f64,
    },
}

struct ScanReport {
    path: PathBuf,
    outcome: screenshot_native::Result<Vec<(usize, usize)>>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let code = match cli.command {
        Command::Probe => run_probe(),
        Command::Scan {
            inputs,
            max,
            threshold,
        } => run_scan(&inputs, max, threshold),
    };
    process::exit(code);
}

fn run_probe() -> i32 {
    let config = BuildConfig::compiled();
    let status = probe::probe(
        &LinkedLibrary,
        &config,
        CompositeOperator::Src as i32,
        AlphaChannelOption::On as i32,
    );
    println!(
        "quantum depth {}, HDRI {}: {status}",
        config.format.depth,
        if config.format.hdri { "on" } else { "off" }
    );
    i32::from(status != ProbeStatus::Compatible)
}

fn run_scan(inputs: &[PathBuf], max: usize, threshold: f64) -> i32 {
    if max == 0 {
        eprintln!("Error: --max must be at least 1");
        return 1;
    }

    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            match image_files(input) {
                Ok(found) => files.extend(found),
                Err(e) => {
                    eprintln!("Error: Failed to read directory {}: {e}", input.display());
                    return 1;
                }
            }
        } else if input.exists() {
            files.push(input.clone());
        } else {
            eprintln!("Error: Input path does not exist: {}", input.display());
            return 1;
        }
    }

    let opts = ScanOptions { threshold };
    let reports: Vec<ScanReport> = files
        .par_iter()
        .map(|path| ScanReport {
            path: path.clone(),
            outcome: scan_file(path, max, &opts),
        })
        .collect();

    let mut failed = 0u32;
    for report in &reports {
        match &report.outcome {
            Ok(pixels) => {
                for (x, y) in pixels {
                    println!("{} {x},{y}", report.path.display());
                }
            }
            Err(e) => {
                failed += 1;
                eprintln!("[FAIL] {}: {e}", report.path.display());
            }
        }
    }

    i32::from(failed > 0)
}

fn scan_file(
    path: &Path,
    max: usize,
    opts: &ScanOptions,
) -> screenshot_native::Result<Vec<(usize, usize)>> {
    let img = Image::open(path, QuantumFormat::COMPILED)?;
    // One slot of the `max` buffer stays reserved, as with the C entry point.
    let found = scan::collect(&img, opts, max.saturating_sub(1));
    Ok(found.iter().map(|p| (p.x, p.y)).collect())
}

fn image_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().map(|ft| ft.is_file()).unwrap_or(false))
        .map(|e| e.path())
        .filter(|p| is_supported_image(p))
        .collect();
    files.sort();
    Ok(files)
}

fn is_supported_image(path: &Path) -> bool {
    image::ImageFormat::from_path(path).is_ok_and(|f| f.reading_enabled())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opaque_png(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "screenshot-native-cli-{}-{name}.png",
            process::id()
        ));
        image::RgbaImage::from_pixel(2, 2, image::Rgba([9, 9, 9, 255]))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn scan_file_handles_unbounded_max() {
        let path = opaque_png("unbounded");
        let found = scan_file(&path, usize::MAX, &ScanOptions::default()).unwrap();
        assert_eq!(found, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn scan_file_keeps_reserved_slot() {
        let path = opaque_png("reserved");
        let opts = ScanOptions::default();
        assert_eq!(scan_file(&path, 3, &opts).unwrap(), vec![(0, 0), (1, 0)]);
        assert!(scan_file(&path, 1, &opts).unwrap().is_empty());
        std::fs::remove_file(path).ok();
    }
}
