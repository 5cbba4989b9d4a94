//! Reveal CLI
//!
//! Inspect variants, plan staggers and replay scroll sessions against a
//! page description.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use reveal_animation::{StaggerPlan, VariantName};

mod page;
mod simulate;

use page::PageConfig;
use simulate::{SimulationOptions, SimulationReport};

#[derive(Parser)]
#[command(name = "reveal")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Scroll reveal animation toolkit", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scroll through a page and print when each section reveals
    Simulate {
        /// Page description (TOML)
        page: PathBuf,

        /// Override the viewport height in px
        #[arg(long)]
        viewport_height: Option<f32>,

        /// Scroll speed in px per second
        #[arg(long, default_value_t = 600.0)]
        scroll_speed: f32,

        /// Frames per second
        #[arg(long, default_value_t = 60)]
        fps: u32,

        /// Print the timeline as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the built-in animation variants
    Variants {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compute stagger delays for a list of items
    Plan {
        /// Number of items
        count: usize,

        /// Delay between consecutive items, in seconds
        #[arg(short, long, default_value_t = 0.1)]
        step: f32,

        /// Delay before the first item, in seconds
        #[arg(short, long, default_value_t = 0.0)]
        base: f32,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a page description
    Check {
        /// Page description (TOML)
        page: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Simulate {
            page,
            viewport_height,
            scroll_speed,
            fps,
            json,
        } => {
            let options = SimulationOptions {
                scroll_speed,
                fps,
                viewport_height,
            };
            cmd_simulate(&page, options, json)
        }

        Commands::Variants { json } => cmd_variants(json),

        Commands::Plan {
            count,
            step,
            base,
            json,
        } => cmd_plan(count, step, base, json),

        Commands::Check { page } => cmd_check(&page),
    }
}

fn cmd_simulate(path: &Path, options: SimulationOptions, json: bool) -> Result<()> {
    let page = PageConfig::load(path)?;
    info!("Simulating {} ({} sections)", path.display(), page.sections.len());

    for problem in page.problems() {
        warn!("{}", problem);
    }

    let report = simulate::simulate(&page, options);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_timeline(&report);
    }
    Ok(())
}

fn print_timeline(report: &SimulationReport) {
    println!("{:>9}  {:>8}  {:<24} phase", "time", "scroll", "section");
    for event in &report.events {
        let target = match event.item {
            Some(item) => format!("{}[{}]", event.section, item),
            None => event.section.clone(),
        };
        println!(
            "{:>7.0}ms  {:>6.0}px  {:<24} {}",
            event.time_ms, event.scroll_y, target, event.phase
        );
    }

    println!();
    println!(
        "{} events over {:.0}ms ({} frames)",
        report.events.len(),
        report.duration_ms,
        report.frames
    );
    if !report.never_revealed.is_empty() {
        println!("Never revealed: {}", report.never_revealed.join(", "));
    }
}

fn cmd_variants(json: bool) -> Result<()> {
    if json {
        let variants: Vec<_> = VariantName::ALL.iter().map(|name| *name.variant()).collect();
        println!("{}", serde_json::to_string_pretty(&variants)?);
        return Ok(());
    }

    println!("{:<12} {:>9}  {:<28} hidden", "variant", "duration", "easing");
    for name in VariantName::ALL {
        let variant = name.variant();
        let [x1, y1, x2, y2] = variant.easing.control_points();
        println!(
            "{:<12} {:>7}ms  cubic-bezier({}, {}, {}, {})  {}",
            name.as_str(),
            variant.duration_ms,
            x1,
            y1,
            x2,
            y2,
            variant.hidden.css_transform()
        );
    }
    Ok(())
}

fn cmd_plan(count: usize, step: f32, base: f32, json: bool) -> Result<()> {
    let plan = StaggerPlan::from_secs(count, step, base);

    if json {
        let output = serde_json::json!({ "plan": plan, "delays_ms": plan.delays() });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for (index, delay) in plan.iter().enumerate() {
        println!("item {:>3}  +{}ms", index, delay);
    }
    Ok(())
}

fn cmd_check(path: &Path) -> Result<()> {
    let page = PageConfig::load(path)?;
    let problems = page.problems();

    if problems.is_empty() {
        info!(
            "{}: {} sections, page height {}px",
            path.display(),
            page.sections.len(),
            page.page_height()
        );
        return Ok(());
    }

    for problem in &problems {
        warn!("{}", problem);
    }
    anyhow::bail!("{} problem(s) found in {}", problems.len(), path.display())
}
