use std::{
    ffi::OsString,
    io::Write as _,
    path::{Path, PathBuf},
    sync::mpsc::{self, Receiver},
    time::{Duration, Instant, SystemTime, UNIX_EPOCH},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher as _};
use spinring::{
    AnimationConfig, AnimationSession, ColorMode, Debouncer, ImageLayer, OrientationMode,
    OutlineSpec, PngSequenceSink, RenderSettings, RenderThreading, Rgb8, Scene, SlotState,
    SlotView,
};

#[derive(Parser, Debug)]
#[command(name = "spinring", version, about = "Ring-of-N loading spinner generator")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export the full loop as an animated PNG.
    Export(ExportArgs),
    /// Write every frame as its own PNG file.
    Frames(FramesArgs),
    /// Render a single step as a PNG.
    Frame(FrameArgs),
    /// Print element states and slot placements as JSON.
    States(StatesArgs),
    /// Run the live driver in the terminal.
    Preview(PreviewArgs),
}

#[derive(Args, Debug, Clone)]
struct SpinnerArgs {
    /// Config JSON file; flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of ring elements. Without --config or --head, the head spans all of them.
    #[arg(long)]
    elements: Option<u32>,

    /// Number of elements spanned by the gradient head.
    #[arg(long)]
    head: Option<u32>,

    /// Container edge in pixels.
    #[arg(long)]
    size: Option<u32>,

    /// Margin as a percentage of the container.
    #[arg(long)]
    margin: Option<f64>,

    /// Global rotation in degrees.
    #[arg(long)]
    rotation: Option<f64>,

    /// Duration of one step in milliseconds.
    #[arg(long = "step-ms")]
    step_ms: Option<f64>,

    /// Full loop duration in milliseconds (overrides --step-ms).
    #[arg(long = "loop-ms")]
    loop_ms: Option<f64>,

    /// Source image for image elements. Use "default" for the built-in arrowhead.
    #[arg(long)]
    image: Option<PathBuf>,

    /// Recolor images as flat silhouettes.
    #[arg(long)]
    silhouette: bool,

    /// Rotate images so they point away from the ring center.
    #[arg(long = "orient-center")]
    orient_center: bool,

    /// Enable the outline layer with this width in pixels.
    #[arg(long = "outline-width")]
    outline_width: Option<f64>,

    /// Outline color (#rrggbb or #rgb).
    #[arg(long = "outline-color")]
    outline_color: Option<Rgb8>,

    /// Rasterize frames on a thread pool.
    #[arg(long)]
    parallel: bool,

    /// Worker threads for --parallel.
    #[arg(long)]
    threads: Option<usize>,

    /// Background color; frames stay transparent when omitted.
    #[arg(long)]
    background: Option<Rgb8>,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[command(flatten)]
    spinner: SpinnerArgs,

    /// Output APNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct FramesArgs {
    #[command(flatten)]
    spinner: SpinnerArgs,

    /// Output directory.
    #[arg(long = "out-dir")]
    out_dir: PathBuf,

    /// File name prefix.
    #[arg(long, default_value = "spinner")]
    stem: String,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    spinner: SpinnerArgs,

    /// Step to render (wraps around the ring).
    #[arg(long, default_value_t = 0)]
    step: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct StatesArgs {
    #[command(flatten)]
    spinner: SpinnerArgs,

    /// Step whose slot placements are reported.
    #[arg(long, default_value_t = 0)]
    step: u64,
}

#[derive(Args, Debug)]
struct PreviewArgs {
    #[command(flatten)]
    spinner: SpinnerArgs,

    /// Stop after this many ticks; runs until interrupted when omitted.
    #[arg(long)]
    ticks: Option<u64>,

    /// Re-read --config when it changes.
    #[arg(long)]
    watch: bool,

    /// Terminal grid width in cells.
    #[arg(long, default_value_t = 40)]
    columns: u32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Export(args) => cmd_export(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Frame(args) => cmd_frame(args),
        Command::States(args) => cmd_states(args),
        Command::Preview(args) => cmd_preview(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

impl SpinnerArgs {
    fn load_config(&self) -> anyhow::Result<AnimationConfig> {
        let mut cfg = match &self.config {
            Some(path) => AnimationConfig::from_path(path)?,
            None => AnimationConfig::default(),
        };
        self.apply(&mut cfg);
        Ok(cfg.sanitized())
    }

    fn apply(&self, cfg: &mut AnimationConfig) {
        if let Some(v) = self.elements {
            cfg.element_count = v;
            // A config file keeps its own head_count.
            if self.head.is_none() && self.config.is_none() {
                cfg.head_count = v;
            }
        }
        if let Some(v) = self.head {
            cfg.head_count = v;
        }
        if let Some(v) = self.size {
            cfg.container_size = v;
        }
        if let Some(v) = self.margin {
            cfg.margin_percent = v;
        }
        if let Some(v) = self.rotation {
            cfg.rotation_degrees = v;
        }
        if let Some(v) = self.step_ms {
            cfg.step_duration_ms = v;
        }
        if self.loop_ms.is_some() {
            cfg.loop_duration_ms = self.loop_ms;
        }

        if self.image.is_some() || self.silhouette || self.orient_center {
            let layer = cfg.image.get_or_insert_with(ImageLayer::default);
            if let Some(path) = &self.image {
                layer.path = (path.as_path() != Path::new("default")).then(|| path.clone());
            }
            if self.silhouette {
                layer.color_mode = ColorMode::Silhouette;
            }
            if self.orient_center {
                layer.orientation = OrientationMode::Center;
            }
        }

        if self.outline_width.is_some() || self.outline_color.is_some() {
            let outline = cfg.outline.get_or_insert_with(OutlineSpec::default);
            outline.enabled = true;
            if let Some(w) = self.outline_width {
                outline.width = w;
            }
            if let Some(c) = self.outline_color {
                outline.color = c;
            }
        }
    }

    fn settings(&self) -> RenderSettings {
        RenderSettings {
            clear_rgba: self.background.map(|c| c.with_alpha(1.0)),
        }
    }

    fn threading(&self) -> RenderThreading {
        RenderThreading {
            parallel: self.parallel,
            threads: self.threads,
            ..RenderThreading::default()
        }
    }
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let cfg = args.spinner.load_config()?;
    let mut session = AnimationSession::new(cfg, Instant::now())
        .with_render_options(args.spinner.settings(), args.spinner.threading());

    let out = args.out.clone();
    let frames = session.export(move |seq| {
        spinring::write_apng_file(&seq, &out)?;
        Ok(seq.len())
    })?;

    eprintln!("wrote {} ({frames} frames)", args.out.display());
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let cfg = args.spinner.load_config()?;
    let scene = Scene::load(cfg);
    let seq = spinring::emit_frames(&scene, &args.spinner.settings(), &args.spinner.threading())?;

    let mut sink = PngSequenceSink::new(&args.out_dir, &args.stem, unix_millis());
    spinring::write_sequence(&seq, &mut sink)?;

    eprintln!(
        "wrote {} frames to {}",
        sink.written().len(),
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = args.spinner.load_config()?;
    let scene = Scene::load(cfg);
    let frame = spinring::render_step(&scene, args.step, &args.spinner.settings())?;

    ensure_parent_dir(&args.out)?;
    spinring::write_png(&args.out, &frame)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_states(args: StatesArgs) -> anyhow::Result<()> {
    let cfg = args.spinner.load_config()?;
    let scene = Scene::load(cfg);
    let slots = spinring::step_slots(scene.states(), scene.layout(), args.step);

    let doc = serde_json::json!({
        "config": scene.config(),
        "layout": scene.layout(),
        "step_interval_ms": scene.config().step_interval_ms(),
        "loop_time_ms": scene.config().loop_time_ms(),
        "elements": scene.states(),
        "step": args.step,
        "slots": slots,
    });
    let text = serde_json::to_string_pretty(&doc).context("serialize states")?;
    println!("{text}");
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let cfg = args.spinner.load_config()?;
    let container = cfg.container_size;
    let mut session = AnimationSession::new(cfg, Instant::now());
    let mut view = TerminalView::new(args.columns, container);

    let watch = match (args.watch, &args.spinner.config) {
        (true, Some(path)) => Some(ConfigWatch::new(path)?),
        (true, None) => anyhow::bail!("--watch needs --config"),
        (false, _) => None,
    };
    let mut debouncer = Debouncer::new(Duration::from_millis(250));

    session.present(&mut view);
    let mut ticks = 0u64;
    while args.ticks.is_none_or(|limit| ticks < limit) {
        let now = Instant::now();

        if let Some(watch) = &watch {
            if watch.drain_changed() {
                debouncer.push((), now);
            }
            if debouncer.take_ready(now).is_some() {
                match args.spinner.load_config() {
                    Ok(cfg) => {
                        session.set_config(cfg);
                    }
                    Err(e) => tracing::warn!(error = %e, "ignoring unreadable config"),
                }
            }
        }

        if session.apply_pending(now) {
            view.resize(session.scene().config().container_size);
            session.present(&mut view);
        }
        let before = session.step();
        if session.poll(now, &mut view) && session.step() != before {
            ticks += 1;
        }

        let wait = session
            .timer()
            .remaining(Instant::now())
            .unwrap_or(Duration::from_millis(10))
            .min(Duration::from_millis(50));
        std::thread::sleep(wait);
    }
    Ok(())
}

/// File-system watch on a config file.
///
/// Watches the parent directory so editors that save by rename still report the file.
struct ConfigWatch {
    _watcher: RecommendedWatcher,
    events: Receiver<notify::Result<notify::Event>>,
    file_name: OsString,
}

impl ConfigWatch {
    fn new(path: &Path) -> anyhow::Result<Self> {
        let file_name = path
            .file_name()
            .map(OsString::from)
            .with_context(|| format!("config path '{}' has no file name", path.display()))?;
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let (tx, events) = mpsc::channel();
        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<notify::Event>| {
                let _ = tx.send(res);
            },
            notify::Config::default(),
        )
        .context("create config watcher")?;
        watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .with_context(|| format!("watch '{}'", dir.display()))?;
        tracing::debug!(dir = %dir.display(), "watching config");

        Ok(Self {
            _watcher: watcher,
            events,
            file_name,
        })
    }

    /// Drain queued events; true when any of them touched the config file.
    fn drain_changed(&self) -> bool {
        let mut changed = false;
        while let Ok(res) = self.events.try_recv() {
            match res {
                Ok(event) => {
                    let relevant = matches!(
                        event.kind,
                        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                    );
                    if relevant
                        && event
                            .paths
                            .iter()
                            .any(|p| p.file_name() == Some(self.file_name.as_os_str()))
                    {
                        changed = true;
                    }
                }
                Err(e) => tracing::warn!(error = %e, "config watch error"),
            }
        }
        changed
    }
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

/// Draws slots as truecolor dots on a character grid, redrawing in place.
struct TerminalView {
    columns: u32,
    rows: u32,
    scale: f64,
    cells: Vec<Option<[u8; 3]>>,
    drawn_rows: u32,
}

impl TerminalView {
    fn new(columns: u32, container: u32) -> Self {
        let mut view = Self {
            columns: columns.max(4),
            rows: 0,
            scale: 1.0,
            cells: Vec::new(),
            drawn_rows: 0,
        };
        view.resize(container);
        view
    }

    fn resize(&mut self, container: u32) {
        // Terminal cells are roughly twice as tall as they are wide.
        self.rows = (self.columns / 2).max(2);
        self.scale = f64::from(self.columns) / f64::from(container.max(1));
        self.cells = vec![None; (self.columns * self.rows) as usize];
    }
}

impl SlotView for TerminalView {
    fn begin_step(&mut self, _step: u64) {
        self.cells.fill(None);
    }

    fn apply_slot(&mut self, slot: &SlotState) {
        let col = (slot.center.x * self.scale).floor();
        let row = (slot.center.y * self.scale / 2.0).floor();
        if col < 0.0 || row < 0.0 {
            return;
        }
        let (col, row) = (col as u32, row as u32);
        if col >= self.columns || row >= self.rows {
            return;
        }
        let v = &slot.visual;
        let k = (v.alpha * v.opacity).clamp(0.0, 1.0);
        let shade = |c: u8| (f64::from(c) * k).round() as u8;
        self.cells[(row * self.columns + col) as usize] =
            Some([shade(v.color.r), shade(v.color.g), shade(v.color.b)]);
    }

    fn end_step(&mut self) {
        let mut out = String::new();
        if self.drawn_rows > 0 {
            out.push_str(&format!("\x1b[{}A", self.drawn_rows));
        }
        for row in self.cells.chunks(self.columns as usize) {
            for cell in row {
                match cell {
                    Some([r, g, b]) => out.push_str(&format!("\x1b[38;2;{r};{g};{b}m●\x1b[0m")),
                    None => out.push(' '),
                }
            }
            out.push_str("\x1b[K\n");
        }
        self.drawn_rows = self.rows;

        let mut stdout = std::io::stdout().lock();
        if let Err(e) = stdout.write_all(out.as_bytes()).and_then(|()| stdout.flush()) {
            tracing::warn!(error = %e, "preview write failed");
        }
    }
}
