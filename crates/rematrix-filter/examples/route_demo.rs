//! Routing demo: build a filter, change routes and layouts, print the result.
//!
//! Run with: cargo run -p rematrix-filter --example route_demo -- --route 0=1 --route 1=0
//!
//! Set `RUST_LOG=debug` to see lifecycle and update logging.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::Parser;
use rematrix_filter::{
    FilterRegistry, PlanarBuffer, Preset, REMATRIX_FILTER_ID, RouteConfig, Settings, SharedHost,
    properties, route_key,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "route_demo", about = "Rematrix routing demo")]
struct Args {
    /// Output channels reported by the simulated host
    #[arg(long, default_value_t = 2)]
    channels: usize,

    /// Route override as OUTPUT=SOURCE (SOURCE -1 mutes)
    #[arg(long = "route", value_parser = parse_route)]
    routes: Vec<(usize, i64)>,

    /// Load settings from a preset file before applying overrides
    #[arg(long)]
    preset: Option<PathBuf>,

    /// Save the resulting routes as a preset file
    #[arg(long)]
    save: Option<PathBuf>,

    /// Switch the host to this many channels after the first pass
    #[arg(long)]
    relayout: Option<usize>,
}

fn parse_route(s: &str) -> Result<(usize, i64), String> {
    let (output, source) = s
        .split_once('=')
        .ok_or_else(|| format!("expected OUTPUT=SOURCE, got '{s}'"))?;
    let output = output.trim().parse().map_err(|e| format!("bad output: {e}"))?;
    let source = source.trim().parse().map_err(|e| format!("bad source: {e}"))?;
    Ok((output, source))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    if args.channels == 0 {
        bail!("--channels must be at least 1");
    }

    let mut settings = match &args.preset {
        Some(path) => {
            let preset = Preset::load(path)
                .with_context(|| format!("loading preset {}", path.display()))?;
            println!("Preset: {}", preset.name);
            preset.settings
        }
        None => Settings::new(),
    };
    for &(output, source) in &args.routes {
        settings.set_int(route_key(output), source);
    }

    let host = Arc::new(SharedHost::new(args.channels));
    let registry = FilterRegistry::new();
    let mut filter = registry.create(REMATRIX_FILTER_ID, &settings, host.clone())?;

    println!("=== Properties ===\n");
    for prop in properties(host.as_ref()) {
        let current = filter.routes().route(prop.output().unwrap_or_default()).value();
        let shown = prop
            .choice_for(current)
            .map_or_else(|| format!("{current} (inactive)"), |c| c.label.clone());
        println!("  {:<10} {}", prop.label, shown);
    }

    println!("\n=== Processing ===\n");
    run_tick(&mut filter, args.channels);

    if let Some(channels) = args.relayout {
        println!("\n=== Relayout to {channels} channels ===\n");
        host.set_output_channels(channels);
        filter.update(&settings)?;
        run_tick(&mut filter, channels);
    }

    if let Some(path) = &args.save {
        let preset = Preset::new("route_demo").with_routes(&RouteConfig::from(filter.routes()));
        preset.save(path)?;
        println!("\nSaved preset to {}", path.display());
    }

    filter.destroy();
    Ok(())
}

/// Fills each channel with its own index and prints where every output ended up.
fn run_tick(filter: &mut rematrix_filter::RematrixFilter, channels: usize) {
    let mut buffer = PlanarBuffer::from_channels(
        (0..channels).map(|c| vec![c as f32 + 1.0; 8]).collect(),
    );
    filter.process_buffer(&mut buffer);

    for (output, samples) in buffer.channels().iter().enumerate() {
        let source = samples[0];
        if source == 0.0 {
            println!("  out {output} <- (silence)");
        } else {
            println!("  out {output} <- in {}", source as usize - 1);
        }
    }
}
