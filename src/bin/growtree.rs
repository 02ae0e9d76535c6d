use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "growtree", version)]
struct Cli {
    /// Stage config JSON; defaults reproduce the stock illustration.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Tree and story JSON; defaults to the built-in project.
    #[arg(long, global = true)]
    scene: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as SVG or PNG (chosen by extension).
    Frame(FrameArgs),
    /// Simulate scrolling top to bottom, writing one file per frame.
    Sweep(SweepArgs),
    /// Print the story section selected at each progress value.
    Story(StoryArgs),
    /// Print the target layout geometry as JSON.
    DumpLayout(DumpArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Scroll progress in [0, 1].
    #[arg(long)]
    progress: f64,

    /// Output path (.svg or .png).
    #[arg(long)]
    out: PathBuf,

    /// Let springs come to rest before rendering.
    #[arg(long)]
    settle: bool,

    /// Viewport width; narrow viewports render the card layout. Defaults to the config.
    #[arg(long)]
    width: Option<f64>,

    /// Viewport height. Defaults to the config.
    #[arg(long)]
    height: Option<f64>,

    /// PNG scale factor.
    #[arg(long, default_value_t = 1.0)]
    scale: f32,
}

#[derive(Parser, Debug)]
struct SweepArgs {
    /// Number of frames from top to bottom.
    #[arg(long)]
    frames: u32,

    /// Output directory.
    #[arg(long)]
    out: PathBuf,

    /// Write PNG instead of SVG.
    #[arg(long)]
    png: bool,
}

#[derive(Parser, Debug)]
struct StoryArgs {
    /// Progress values to resolve.
    #[arg(long = "progress", default_values_t = [0.0, 0.25, 0.5, 0.75, 1.0])]
    progress: Vec<f64>,
}

#[derive(Parser, Debug)]
struct DumpArgs {
    #[arg(long)]
    progress: f64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    let stage = load_stage(cli.config.as_deref(), cli.scene.as_deref())?;
    match cli.cmd {
        Command::Frame(args) => cmd_frame(stage, args),
        Command::Sweep(args) => cmd_sweep(stage, args),
        Command::Story(args) => cmd_story(&stage, args),
        Command::DumpLayout(args) => cmd_dump(&stage, args),
    }
}

fn load_stage(config: Option<&Path>, scene: Option<&Path>) -> anyhow::Result<growtree::Stage> {
    let config = match config {
        Some(p) => growtree::StageConfig::load(p)?,
        None => growtree::StageConfig::default(),
    };
    let inputs = match scene {
        Some(p) => growtree::SceneInputs::load(p)?,
        None => growtree::SceneInputs::builtin(),
    };
    Ok(growtree::Stage::new(inputs, config)?)
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn write_output(svg: &str, out: &Path, scale: f32) -> anyhow::Result<()> {
    ensure_parent(out)?;
    let is_png = out
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("png"));
    if is_png {
        let frame = growtree::rasterize(svg, scale)?;
        growtree::write_png(&frame, out)?;
    } else {
        std::fs::write(out, svg).with_context(|| format!("write svg '{}'", out.display()))?;
    }
    Ok(())
}

fn cmd_frame(mut stage: growtree::Stage, args: FrameArgs) -> anyhow::Result<()> {
    if args.width.is_some() || args.height.is_some() {
        let width = args.width.unwrap_or(stage.config().viewport_width);
        let height = args.height.unwrap_or(stage.config().viewport_height);
        stage.resize(width, height);
    }
    stage.scroll_to_progress(growtree::Progress::new(args.progress));
    if args.settle {
        let frames = stage.settle();
        tracing::info!(frames, "settled");
    } else {
        stage.tick(stage.config().frame_duration());
    }

    let svg = growtree::SvgWriter::new(&growtree::OutlineGlyphs).document(&stage.frame());
    write_output(&svg, &args.out, args.scale)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_sweep(mut stage: growtree::Stage, args: SweepArgs) -> anyhow::Result<()> {
    if args.frames == 0 {
        anyhow::bail!("--frames must be > 0");
    }
    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create output dir '{}'", args.out.display()))?;

    let dt = stage.config().frame_duration();
    let writer = growtree::SvgWriter::new(&growtree::OutlineGlyphs);
    let last = f64::from(args.frames.saturating_sub(1).max(1));
    for i in 0..args.frames {
        let p = growtree::Progress::new(f64::from(i) / last);
        if let Some(change) = stage.scroll_to_progress(p) {
            tracing::info!(
                frame = i,
                section = %stage.story().sections()[change.to].id,
                "section change"
            );
        }
        stage.tick(dt);

        let ext = if args.png { "png" } else { "svg" };
        let path = args.out.join(format!("frame_{i:05}.{ext}"));
        write_output(&writer.document(&stage.frame()), &path, 1.0)?;
    }
    eprintln!("wrote {} frames to {}", args.frames, args.out.display());
    Ok(())
}

fn cmd_story(stage: &growtree::Stage, args: StoryArgs) -> anyhow::Result<()> {
    for p in args.progress {
        let section = stage.story().select(growtree::Progress::new(p));
        println!("{p:.3}\t{}\t{}", section.id, section.title);
    }
    Ok(())
}

#[derive(serde::Serialize)]
struct DumpEdge<'a> {
    #[serde(flatten)]
    edge: &'a growtree::BranchEdge,
    targets: growtree::EdgeTargets,
}

fn cmd_dump(stage: &growtree::Stage, args: DumpArgs) -> anyhow::Result<()> {
    let p = growtree::Progress::new(args.progress);
    let edges: Vec<DumpEdge<'_>> = stage
        .layout()
        .edges
        .iter()
        .map(|edge| DumpEdge {
            edge,
            targets: edge.timing.targets(p),
        })
        .collect();
    let out = serde_json::json!({
        "progress": p,
        "section": stage.story().select(p).id,
        "edges": edges,
        "roots": stage.layout().roots,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
