use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tableau::{
    AppConfig, Application, Color, Content, HeadlessWindow, ImageLoader, Manifest, Node, Point,
    RecordingRenderer, Scene, Shape, ShapeStyle, Size, Task, Text, Transition, Vec2, ops,
};

#[derive(Parser, Debug)]
#[command(name = "tableau", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the demo scenes headlessly and report what was drawn.
    Demo(DemoArgs),
    /// Load a resource manifest and report what it contains.
    Manifest(ManifestArgs),
}

#[derive(Parser, Debug)]
struct DemoArgs {
    /// Number of frames to run.
    #[arg(long, default_value_t = 120)]
    frames: u64,

    /// Seconds advanced per frame.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f64,

    /// Application config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the recorded display list as JSON.
    #[arg(long)]
    dump: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ManifestArgs {
    /// Manifest file (`.json` or `.xml`).
    path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Demo(args) => cmd_demo(args),
        Command::Manifest(args) => cmd_manifest(args),
    }
}

fn read_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    match path {
        Some(path) => AppConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display())),
        None => Ok(AppConfig::default()),
    }
}

fn title_scene(size: Size) -> anyhow::Result<Scene> {
    let mut scene = Scene::new(size);
    let panel_style = ShapeStyle {
        fill: Some(Color::from_hex(0x1f2433)),
        stroke: Some(Color::WHITE),
        stroke_width: 2.0,
    };
    let panel = scene.add(
        Node::new()
            .named("panel")
            .at(Point::new(40.0, 40.0))
            .with_content(Content::Shape(Shape::rounded_rect(
                Size::new(240.0, 120.0),
                12.0,
                panel_style,
            ))),
    )?;

    let tree = scene.tree_mut();
    let title = tree.insert(
        Node::new()
            .named("title")
            .at(Point::new(16.0, 16.0))
            .with_content(Content::Text(Text::new("tableau"))),
    );
    tree.add_child(panel, title)?;

    let dot = tree.insert(
        Node::new()
            .named("dot")
            .at(Point::new(16.0, 80.0))
            .with_content(Content::Shape(Shape::circle(
                8.0,
                ShapeStyle {
                    fill: Some(Color::GREEN),
                    ..ShapeStyle::default()
                },
            ))),
    );
    tree.add_child(panel, dot)?;
    tree.run_action(
        dot,
        ops::forever(ops::sequence(vec![
            ops::move_by(0.5, Vec2::new(180.0, 0.0)),
            ops::move_by(0.5, Vec2::new(-180.0, 0.0)),
        ]))
        .named("bounce"),
    )?;
    tree.run_action(panel, ops::fade_in(0.25))?;
    tree.add_task(
        title,
        Task::new(0.5, -1, |tree, id| {
            if let Some(node) = tree.get_mut(id) {
                let visible = node.is_visible();
                node.set_visible(!visible);
            }
        })
        .named("blink"),
    )?;
    Ok(scene)
}

fn credits_scene(size: Size) -> anyhow::Result<Scene> {
    let mut scene = Scene::new(size);
    let label = scene.add(
        Node::new()
            .named("credits")
            .at(Point::new(40.0, 40.0))
            .with_content(Content::Text(Text::new("credits"))),
    )?;
    scene
        .tree_mut()
        .run_action(label, ops::rotate_by(1.0, 360.0))?;
    Ok(scene)
}

fn cmd_demo(args: DemoArgs) -> anyhow::Result<()> {
    let config = read_config(args.config.as_deref())?;
    let mut app: Application<HeadlessWindow, RecordingRenderer> =
        Application::headless(config).context("create application")?;
    let size = app.stage().window_size();

    app.stage_mut().enter_scene(title_scene(size)?);
    let half = args.frames / 2;
    app.run_frames(half, args.dt).context("run title scene")?;

    app.stage_mut()
        .enter_scene_with(credits_scene(size)?, Transition::fade(0.5));
    app.run_frames(args.frames - half, args.dt)
        .context("run credits scene")?;

    let renderer = app.renderer();
    println!(
        "frames={} ops={} text={:?}",
        renderer.frames(),
        renderer.ops().len(),
        renderer.drawn_text()
    );

    if let Some(out) = &args.dump {
        let json = renderer.to_json().context("serialize display list")?;
        std::fs::write(out, json).with_context(|| format!("write '{}'", out.display()))?;
        eprintln!("wrote {}", out.display());
    }
    Ok(())
}

fn cmd_manifest(args: ManifestArgs) -> anyhow::Result<()> {
    let manifest = Manifest::from_path(&args.path)
        .with_context(|| format!("read manifest '{}'", args.path.display()))?;
    let base_dir = args.path.parent().unwrap_or_else(|| Path::new("."));

    let mut cache = tableau::ResourceCache::new();
    let report = cache
        .load_manifest(&manifest, &ImageLoader, base_dir)
        .context("load manifest entries")?;

    println!(
        "frames={} sequences={} sequence_frames={} fonts={} textures={}",
        report.frames,
        report.sequences,
        report.sequence_frames,
        report.fonts,
        cache.texture_count()
    );
    for id in cache.object_ids() {
        println!("object {id}");
    }
    for id in cache.font_ids() {
        println!("font {id}");
    }
    Ok(())
}
