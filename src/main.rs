//! CLI entry point for dirtree

use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use dirtree::{
    EventProxy, FileSaveService, OutputFormat, ProgressSink, RenderRequest, TaskEvent,
    TreeGenerationService, WalkerConfig,
};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use tracing_subscriber::EnvFilter;

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to color status lines based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            // Respect FORCE_COLOR environment variable
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            // Respect TERM=dumb
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            // Status lines go to stderr
            io::stderr().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "dirtree")]
#[command(about = "Snapshot a directory hierarchy as text, JSON or XML")]
#[command(version)]
struct Args {
    /// Directory to display
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Descend only N levels deep (negative for unlimited)
    #[arg(
        short = 'L',
        long = "level",
        default_value = "-1",
        allow_negative_numbers = true
    )]
    level: i64,

    /// Output format (defaults to the extension of --output, else text)
    #[arg(short = 'f', long = "format", value_name = "FORMAT")]
    format: Option<OutputFormat>,

    /// Write the tree to FILE instead of stdout
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,

    /// Descend into symlinked directories (loops back to an ancestor are cut)
    #[arg(long = "follow-symlinks")]
    follow_symlinks: bool,

    /// Control color of status lines: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Print progress while walking
    #[arg(long = "progress")]
    progress: bool,
}

/// Status line printer for stderr.
struct Status {
    stream: StandardStream,
    started: Instant,
}

impl Status {
    fn new(use_color: bool) -> Self {
        let choice = if use_color {
            ColorChoice::Always
        } else {
            ColorChoice::Never
        };
        Self {
            stream: StandardStream::stderr(choice),
            started: Instant::now(),
        }
    }

    fn elapsed(&self) -> humantime::FormattedDuration {
        let millis = u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX);
        humantime::format_duration(Duration::from_millis(millis))
    }

    fn line(&mut self, color: Color, label: &str, message: &str) {
        let _ = self
            .stream
            .set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
        let _ = write!(self.stream, "{label}");
        let _ = self.stream.reset();
        let _ = writeln!(self.stream, " {message}");
    }

    fn progress(&mut self, message: &str) {
        self.line(Color::Cyan, "progress:", message);
    }

    fn saved(&mut self, path: &Path) {
        let message = format!("{} in {}", path.display(), self.elapsed());
        self.line(Color::Green, "saved:", &message);
    }

    fn error(&mut self, message: &str) {
        self.line(Color::Red, "error:", message);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn progress_sink<P: EventProxy>(proxy: &P, enabled: bool) -> Option<ProgressSink> {
    if !enabled {
        return None;
    }
    let proxy = proxy.clone();
    let sink: ProgressSink = Arc::new(move |message: &str| {
        proxy.send_event(TaskEvent::Progress(message.to_string()))
    });
    Some(sink)
}

fn start_generation<P: EventProxy>(
    service: &mut TreeGenerationService,
    request: RenderRequest,
    proxy: &P,
    show_progress: bool,
) {
    let on_completed = proxy.clone();
    let on_error = proxy.clone();
    service.start(
        request,
        move |text| on_completed.send_event(TaskEvent::TreeCompleted(text)),
        move |err| on_error.send_event(TaskEvent::TreeFailed(err)),
        progress_sink(proxy, show_progress),
    );
}

fn start_save<P: EventProxy>(
    service: &mut FileSaveService,
    path: PathBuf,
    request: RenderRequest,
    proxy: &P,
) {
    let on_completed = proxy.clone();
    let on_error = proxy.clone();
    service.save_tree_async(
        path,
        request,
        move |path| on_completed.send_event(TaskEvent::SaveCompleted(path)),
        move |err| on_error.send_event(TaskEvent::SaveFailed(err)),
    );
}

fn print_tree(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()
}

/// Drain worker events until every sender is gone. Returns whether the run
/// succeeded.
fn handle_events(
    events: Receiver<TaskEvent>,
    destination: Option<&Path>,
    saver: &FileSaveService,
    status: &mut Status,
) -> bool {
    let mut ok = true;
    for event in events {
        match event {
            TaskEvent::Progress(message) => status.progress(&message),
            TaskEvent::TreeCompleted(text) => match destination {
                // Text saves reuse the rendered tree as-is
                Some(path) => match saver.save_text_sync(path, &text) {
                    Ok(()) => status.saved(path),
                    Err(e) => {
                        status.error(&e.to_string());
                        ok = false;
                    }
                },
                None => {
                    if let Err(e) = print_tree(&text) {
                        // Broken pipe is not worth a status line
                        if e.kind() != io::ErrorKind::BrokenPipe {
                            status.error(&format!("writing output: {e}"));
                        }
                        ok = false;
                    }
                }
            },
            TaskEvent::SaveCompleted(path) => status.saved(&path),
            TaskEvent::TreeFailed(err) | TaskEvent::SaveFailed(err) => {
                status.error(&err.to_string());
                ok = false;
            }
        }
    }
    ok
}

fn main() {
    let args = Args::parse();
    init_tracing();

    let root = if args.path.is_absolute() {
        args.path.clone()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(&args.path)
    };

    let format = args
        .format
        .or_else(|| args.output.as_deref().map(OutputFormat::from_path))
        .unwrap_or_default();
    let destination = args.output.map(|path| format.ensure_extension(path));

    let request = RenderRequest::new(root)
        .with_config(WalkerConfig::with_signed_depth(args.level, args.follow_symlinks))
        .with_format(format);

    let mut status = Status::new(should_use_color(args.color));
    let mut generator = TreeGenerationService::new();
    let mut saver = FileSaveService::new();
    let (proxy, events) = mpsc::channel::<TaskEvent>();

    match (&destination, format) {
        (Some(path), OutputFormat::Json | OutputFormat::Xml) => {
            start_save(&mut saver, path.clone(), request, &proxy);
        }
        _ => start_generation(&mut generator, request, &proxy, args.progress),
    }
    // Workers hold the remaining senders; the event loop ends when they finish.
    drop(proxy);

    let ok = handle_events(events, destination.as_deref(), &saver, &mut status);
    generator.wait();
    saver.wait();

    if !ok {
        process::exit(1);
    }
}
