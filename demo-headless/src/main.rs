use clap::Parser;
use skewt_core::{
    parse_profile, read_profile, AdiabatFieldGenerator, DiagramConfig, Millibars, SkewTDiagram,
    SoundingProfile,
};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Sounding used when no file is given (Norman, OK, 12Z)
const SAMPLE_SOUNDING: &str = "\
1000.0, 110, 22.6, 19.4, 170, 12
 925.0, 800, 19.0, 16.8, 190, 28
 850.0, 1513, 16.4, 10.2, 210, 32
 700.0, 3129, 6.8, -2.2, 240, 30
 500.0, 5850, -9.9, -27.9, 255, 42
 400.0, 7530, -20.5, -39.5, 260, 55
 300.0, 9580, -35.3, -52.3, 260, 70
 250.0, 10830, -44.5, -58.5, 265, 80
 200.0, 12280, -53.1, -65.1, 265, 75
 150.0, 14070, -59.7, -74.7, 260, 55
";

/// Skew-T Log-P diagram generator
#[derive(Parser, Debug)]
#[command(name = "skewt-headless")]
#[command(about = "Build Skew-T Log-P reference lines for a sounding", long_about = None)]
struct Args {
    /// Comma-delimited sounding file (p, z, T, Td, ...). Uses a built-in sample if omitted
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Header lines to skip before the first record
    #[arg(short, long, default_value_t = 0)]
    skip_rows: usize,

    /// Skew slope of the temperature axis
    #[arg(long, default_value_t = 40.0)]
    skew_slope: f64,

    /// Lowest pressure (mb) at which mixing ratio lines are drawn
    #[arg(long, default_value_t = 600.0)]
    mixing_ratio_cutoff: f64,
}

fn load_profile(args: &Args) -> skewt_core::Result<SoundingProfile> {
    if let Some(path) = &args.file {
        info!("Reading sounding from {}", path.display());
        read_profile(BufReader::new(File::open(path)?), args.skip_rows)
    } else {
        info!("No sounding file given, using built-in sample");
        parse_profile(SAMPLE_SOUNDING, 0)
    }
}

fn print_summary(diagram: &SkewTDiagram) {
    let (rows, cols) = diagram.moist_adiabats.shape();
    println!("=== Skew-T Log-P Diagram ===\n");
    println!(
        "Axis: x {:.2} .. {:.2}, y {:.4} .. {:.4}",
        diagram.axis.x_min, diagram.axis.x_max, diagram.axis.y_min, diagram.axis.y_max
    );
    println!("Isobars:            {}", diagram.isobars.len());
    println!("Isotherms:          {}", diagram.isotherms.len());
    println!("Dry adiabats:       {}", diagram.dry_adiabats.len());
    println!("Mixing ratio lines: {}", diagram.mixing_ratio_lines.len());
    println!(
        "Moist adiabat mesh: {rows} x {cols} ({} contour levels)",
        diagram.moist_adiabats.levels.len()
    );
    println!(
        "Sounding levels:    {} plotted, {} rejected\n",
        diagram.trace.len(),
        diagram.trace.rejected.len()
    );
}

fn run(args: &Args) -> skewt_core::Result<()> {
    let config = DiagramConfig::default()
        .with_skew_slope(args.skew_slope)
        .with_mixing_ratio_cutoff(Millibars::new(args.mixing_ratio_cutoff));
    let generator = AdiabatFieldGenerator::new(config)?;

    let profile = load_profile(args)?;
    let diagram = generator.generate(&profile)?;
    print_summary(&diagram);

    println!(
        "{:>8} {:>8} {:>7} {:>7} {:>7} {:>6} {:>7} {:>7} {:>7}",
        "p (mb)", "z (m)", "T (C)", "Td (C)", "w g/kg", "RH %", "T_L K", "θ K", "θ_ep K"
    );
    let reference = generator.config().reference_pressure;
    let (valid, _) = profile.valid_records();
    for record in &valid {
        match record.diagnostics(reference) {
            Ok(d) => println!(
                "{:>8.1} {:>8.0} {:>7.1} {:>7.1} {:>7.2} {:>6.1} {:>7.1} {:>7.1} {:>7.1}",
                *d.pressure,
                *d.altitude,
                *d.temperature,
                *d.dewpoint,
                d.mixing_ratio.to_grams_per_kg(),
                *d.relative_humidity,
                *d.lcl_temperature,
                *d.potential_temperature,
                *d.equivalent_potential_temperature,
            ),
            Err(e) => warn!("Level {} has no diagnostics: {e}", record.index),
        }
    }

    if let Some(surface) = diagram.trace.temperature.first() {
        println!(
            "\nSurface readout: {}",
            generator.transform().readout(surface.x, surface.y)?
        );
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
