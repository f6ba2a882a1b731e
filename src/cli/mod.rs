//! Scrawl CLI module
//!
//! Command-line interface for serving the web app and classifying grids
//! straight from JSON files.

use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use crate::grid::Grid;
use crate::inference::InferenceEngine;
use crate::model::OnnxDigitModel;

// ─── Styling helpers ───────────────────────────────────────────────────────────

const W: usize = 58; // box inner width

fn dim(s: &str) -> ColoredString   { s.truecolor(100, 100, 100) }
fn accent(s: &str) -> ColoredString { s.truecolor(120, 170, 255) }
fn muted(s: &str) -> ColoredString  { s.truecolor(140, 140, 140) }
fn ok(s: &str) -> ColoredString     { s.truecolor(100, 210, 120) }

fn line_box_top()    { println!("  {}", dim("┌─────────────────────────────────────────────────────────┐")); }
fn line_box_bottom() { println!("  {}", dim("└─────────────────────────────────────────────────────────┘")); }
fn line_box_sep()    { println!("  {}", dim("├─────────────────────────────────────────────────────────┤")); }

fn line_box(content: &str) {
    let visible_len = strip_ansi(content).len();
    let pad = if visible_len < W { W - visible_len } else { 0 };
    println!("  {}  {}{} {}", dim("│"), content, " ".repeat(pad), dim("│"));
}

fn line_box_center(content: &str) {
    let visible_len = strip_ansi(content).len();
    let total_pad = if visible_len < W { W - visible_len } else { 0 };
    let left = total_pad / 2;
    let right = total_pad - left;
    println!("  {}  {}{}{} {}", dim("│"), " ".repeat(left), content, " ".repeat(right), dim("│"));
}

fn line_box_empty() { line_box(""); }

fn strip_ansi(s: &str) -> String {
    let mut out = String::new();
    let mut in_escape = false;
    for c in s.chars() {
        if c == '\x1b' { in_escape = true; continue; }
        if in_escape { if c == 'm' { in_escape = false; } continue; }
        out.push(c);
    }
    out
}

fn kv(key: &str, val: &str) -> String {
    format!("{} {}", muted(key), val.white())
}

fn step_run(msg: &str) {
    print!("  {} {}... ", accent("›"), msg);
}

fn step_done(detail: &str) {
    println!("{} {}", ok("done"), dim(detail));
}

fn section(title: &str) {
    println!();
    println!("  {}", title.white().bold());
    println!("  {}", dim(&"─".repeat(56)));
}

fn wait_enter() {
    println!();
    println!("  {}", dim("press enter to continue"));
    let mut input = String::new();
    let _ = std::io::stdin().read_line(&mut input);
}

// ─── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "scrawl")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Handwritten digit recognition server")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Server port
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Server host
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Model artifact file (ONNX); defaults to MODEL_PATH
        #[arg(short, long)]
        model: Option<PathBuf>,
    },

    /// Classify a grid from a JSON file
    Predict {
        /// Model artifact file (ONNX)
        #[arg(short, long)]
        model: PathBuf,

        /// JSON file with {"grid": [[...]]} or a bare 28x28 array
        #[arg(short, long)]
        grid: PathBuf,
    },

    /// Show model artifact information
    Info {
        /// Model artifact file (ONNX)
        #[arg(short, long)]
        model: PathBuf,
    },
}

// ─── Grid loading ──────────────────────────────────────────────────────────────

#[derive(serde::Deserialize)]
struct GridFile {
    grid: Vec<Vec<f64>>,
}

pub fn load_grid(path: &PathBuf) -> crate::error::Result<Grid> {
    let raw = std::fs::read_to_string(path)?;

    let rows: Vec<Vec<f64>> = match serde_json::from_str::<GridFile>(&raw) {
        Ok(file) => file.grid,
        Err(_) => serde_json::from_str(&raw)?,
    };

    Grid::from_rows(&rows)
}

fn model_path_str(path: &PathBuf) -> anyhow::Result<&str> {
    path.to_str()
        .ok_or_else(|| anyhow::anyhow!("Model path is not valid UTF-8: {}", path.display()))
}

// ─── Commands ──────────────────────────────────────────────────────────────────

pub fn cmd_predict(model_path: &PathBuf, grid_path: &PathBuf) -> anyhow::Result<()> {
    section("Predict");

    step_run("Loading model");
    let start = Instant::now();
    let model = OnnxDigitModel::load(model_path_str(model_path)?)?;
    step_done(&format!("{:?}", start.elapsed()));

    step_run("Reading grid");
    let grid = load_grid(grid_path)?;
    step_done(&format!("{} drawn cells", grid.active_cells()));

    let engine = InferenceEngine::new(Arc::new(model));
    let start = Instant::now();
    let prediction = engine.predict(&grid)?;
    let elapsed = start.elapsed();

    println!();
    println!("  {:<16} {}", muted("Digit"), prediction.digit.to_string().white().bold());
    println!("  {:<16} {}", muted("Confidence"), prediction.confidence_percent().white());
    println!("  {:<16} {}", muted("Time"), format!("{:?}", elapsed).white());

    println!();
    println!("  {:<6} {:<30} {:>8}", muted("Class"), muted("Distribution"), muted("Prob"));
    println!("  {}", dim(&"─".repeat(46)));

    for (digit, p) in prediction.probabilities.iter().enumerate() {
        let bar_len = (p * 30.0).round() as usize;
        let marker = if digit == prediction.digit { ok("›") } else { dim(" ") };
        println!(
            "  {} {:<4} {:<30} {:>8}",
            marker,
            digit,
            accent(&"█".repeat(bar_len)),
            format!("{:.2}%", p * 100.0)
        );
    }

    println!();
    Ok(())
}

pub fn cmd_info(model_path: &PathBuf) -> anyhow::Result<()> {
    section("Model Info");

    let start = Instant::now();
    let model = OnnxDigitModel::load(model_path_str(model_path)?)?;
    let info = model.info();

    println!("  {:<14} {}", muted("Path"), info.path);
    println!("  {:<14} {}", muted("Format"), info.format);
    println!("  {:<14} {}", muted("Input"), info.input_shape);
    println!("  {:<14} {}", muted("Output"), info.output_shape);
    println!("  {:<14} {:?}", muted("Load time"), start.elapsed());
    println!();

    Ok(())
}

// ─── Serve ─────────────────────────────────────────────────────────────────────

pub async fn cmd_serve(host: &str, port: u16, model: Option<&std::path::Path>) -> anyhow::Result<()> {
    use crate::server::{run_server, ServerConfig};

    let mut config = ServerConfig {
        host: host.to_string(),
        port,
        ..Default::default()
    };
    if let Some(path) = model {
        config.model_path = path.display().to_string();
    }

    println!();
    line_box_top();
    line_box_empty();
    line_box_center(&format!("{}", "Scrawl".white().bold()));
    line_box_center(&format!("{}", dim(&format!("v{}", env!("CARGO_PKG_VERSION")))));
    line_box_empty();
    line_box_sep();
    line_box_empty();
    line_box(&kv("Grid   ", &format!("http://{}:{}", host, port)));
    line_box(&kv("API    ", &format!("http://{}:{}/api", host, port)));
    line_box(&kv("Health ", &format!("http://{}:{}/api/health", host, port)));
    line_box(&kv("Model  ", &config.model_path));
    line_box_empty();
    line_box_sep();
    line_box_empty();
    line_box_center(&format!("{}", dim("ctrl+c to stop")));
    line_box_empty();
    line_box_bottom();
    println!();

    run_server(config).await
}

// ─── Interactive mode ──────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!();
    println!("       {}", "┏━┓┏━╸┏━┓┏━┓╻ ╻╻  ".truecolor(120, 170, 255));
    println!("       {}", "┗━┓┃  ┣┳┛┣━┫┃╻┃┃  ".truecolor(100, 150, 240));
    println!("       {}", "┗━┛┗━╸╹┗╸╹ ╹┗┻┛┗━╸".truecolor(80, 130, 220));
    println!();
    println!("       {}", dim(&format!("Digit Recognition  ·  v{}  ·  rust", env!("CARGO_PKG_VERSION"))));
    println!();
}

fn show_system_info() {
    use sysinfo::System;

    let mut sys = System::new_all();
    sys.refresh_all();

    section("System");

    println!("  {:<12} {}", muted("OS"), System::name().unwrap_or_else(|| "unknown".into()));
    println!("  {:<12} {}", muted("Arch"), std::env::consts::ARCH);
    println!("  {:<12} {}", muted("CPUs"), sys.cpus().len());
    println!("  {:<12} {:.1} / {:.1} GB", muted("Memory"),
        sys.used_memory() as f64 / 1024.0 / 1024.0 / 1024.0,
        sys.total_memory() as f64 / 1024.0 / 1024.0 / 1024.0,
    );
    println!("  {:<12} v{}", muted("Scrawl"), env!("CARGO_PKG_VERSION"));
    println!();
}

fn show_help() {
    section("Commands");

    let cmds: &[(&str, &str)] = &[
        ("scrawl", "Interactive launcher (default)"),
        ("scrawl serve", "Start drawing grid + API server"),
        ("scrawl serve -p 3000", "Serve on custom port"),
        ("scrawl serve -m cnn.onnx", "Serve a specific artifact"),
        ("scrawl predict -m cnn.onnx -g grid.json", "Classify a saved grid"),
        ("scrawl info -m cnn.onnx", "Inspect a model artifact"),
    ];

    for (cmd, desc) in cmds {
        println!("  {:<44} {}", cmd.white(), muted(desc));
    }

    section("Endpoints");

    let endpoints: &[(&str, &str)] = &[
        ("http://localhost:8080", "Drawing grid"),
        ("http://localhost:8080/api/predict", "Classify a grid (POST)"),
        ("http://localhost:8080/api/health", "Health check"),
        ("http://localhost:8080/api/status", "Inference statistics"),
        ("http://localhost:8080/api/model", "Loaded model info"),
    ];

    for (url, desc) in endpoints {
        println!("  {:<44} {}", url.truecolor(120, 170, 255), muted(desc));
    }

    println!();
}

pub async fn cmd_interactive() -> anyhow::Result<()> {
    use dialoguer::{Select, theme::ColorfulTheme};

    print_banner();

    let theme = ColorfulTheme {
        active_item_prefix: dialoguer::console::style("  ›".to_string()).for_stderr().cyan(),
        active_item_style: dialoguer::console::Style::new().for_stderr().white().bold(),
        inactive_item_prefix: dialoguer::console::style("   ".to_string()).for_stderr(),
        inactive_item_style: dialoguer::console::Style::new().for_stderr().color256(245),
        prompt_prefix: dialoguer::console::style("  ?".to_string()).for_stderr().color256(111),
        prompt_style: dialoguer::console::Style::new().for_stderr().white().bold(),
        ..ColorfulTheme::default()
    };

    loop {
        let items = &[
            "Start Server          drawing grid + rest api on :8080",
            "System Info           hardware & runtime details",
            "Help                  commands & endpoints",
            "Exit",
        ];

        println!();
        let sel = Select::with_theme(&theme)
            .with_prompt("What would you like to do")
            .items(items)
            .default(0)
            .interact_opt()?;

        match sel {
            Some(0) => {
                cmd_serve("0.0.0.0", 8080, None).await?;
                break;
            }
            Some(1) => {
                show_system_info();
                wait_enter();
            }
            Some(2) => {
                show_help();
                wait_enter();
            }
            Some(3) | None => {
                println!();
                println!("  {}", dim("goodbye"));
                println!();
                break;
            }
            _ => {}
        }
    }

    Ok(())
}
