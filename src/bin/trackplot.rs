use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "trackplot", version)]
struct Cli {
    /// Log debug events (registry, config lookups) as well as progress.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the built-in plots and the dataset keys they require.
    List,
    /// Draw a plan file into a recorded figure.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Plan JSON (grid size and per-target plot configurations).
    #[arg(long)]
    plan: PathBuf,

    /// Configuration file (JSON or YAML). Repeat to merge; later files win per key.
    #[arg(long = "config")]
    configs: Vec<PathBuf>,

    /// Default dataset JSON for layers without data of their own.
    #[arg(long)]
    data: Option<PathBuf>,

    /// Save the recorded figure to this JSON path instead of showing it.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Keep figure state after saving or showing.
    #[arg(long)]
    keep_open: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    trackplot::register_builtin_plots(trackplot::global());

    match cli.cmd {
        Command::List => cmd_list(),
        Command::Render(args) => cmd_render(args),
    }
}

fn cmd_list() -> anyhow::Result<()> {
    for plot in trackplot::BUILTIN_PLOTS {
        println!(
            "{:<12} [{}]  {}",
            plot.name,
            plot.requirements.join(", "),
            plot.summary
        );
    }
    Ok(())
}

fn read_data_json(path: &Path) -> anyhow::Result<serde_json::Value> {
    let f = File::open(path).with_context(|| format!("open dataset '{}'", path.display()))?;
    let r = BufReader::new(f);
    let data: serde_json::Value = serde_json::from_reader(r)
        .with_context(|| format!("parse dataset JSON '{}'", path.display()))?;
    Ok(data)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let plan_file = trackplot::PlanFile::from_path(&args.plan)
        .with_context(|| format!("load plan '{}'", args.plan.display()))?;
    let plan = plan_file.render_plan()?;

    let mut plotter = trackplot::Plotter::new(plan_file.figure(), plan)
        .props(plan_file.props().clone())
        .config(args.configs)
        .opts(trackplot::PlotterOpts {
            close_after: !args.keep_open,
        });
    if let Some(path) = &args.data {
        plotter = plotter.data(read_data_json(path)?);
    }

    let report = plotter
        .plot(args.out.as_deref())
        .context("render plan")?;

    for skipped in &report.skipped {
        println!(
            "skipped {} layer {}: {}",
            skipped.target, skipped.layer, skipped.reason
        );
    }
    println!(
        "drew {} layer(s), skipped {} in {:.3}s",
        report.drawn.len(),
        report.skipped.len(),
        report.elapsed.as_secs_f64()
    );
    if let Some(out) = &report.output {
        eprintln!("wrote {}", out.display());
    }
    Ok(())
}
