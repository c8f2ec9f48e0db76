#![deny(unsafe_code)]
//! Reference host binary for the shaderloop render core.
//!
//! Subcommands:
//! - `run` -- open a window and animate a scene at the display refresh rate
//! - `list` -- print available scenes

mod error;
mod host;

use clap::{Parser, Subcommand};
use error::CliError;
use shaderloop_core::Scene;
use std::process;

#[derive(Parser)]
#[command(name = "shaderloop", about = "Full-screen shader animation host")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Open a window and animate a scene.
    Run {
        /// Scene name (see `list`).
        #[arg(short, long, default_value = "ember")]
        scene: String,

        /// Initial window width in pixels.
        #[arg(short = 'W', long, default_value_t = 800)]
        width: u32,

        /// Initial window height in pixels.
        #[arg(short = 'H', long, default_value_t = 600)]
        height: u32,
    },
    /// List available scenes.
    List,
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let scenes = Scene::list_names();
            if cli.json {
                let info = serde_json::json!({ "scenes": scenes });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Scenes:");
                for name in scenes {
                    println!("  {name}");
                }
            }
            Ok(())
        }
        Command::Run {
            scene,
            width,
            height,
        } => {
            let scene = Scene::from_name(&scene)?;
            host::run_windowed(scene, width, height)
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
