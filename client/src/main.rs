mod constants;
mod demo;
mod input;
mod surfaces;
mod ui;

use bevy::{prelude::*, window::PresentMode};
use clap::Parser;
use constants::{DEFAULT_COLUMNS, WINDOW_TITLE};
use demo::{setup_demo_scene, DemoSettings};
use input::keyboard::{wetness_controls_system, KeyMap};
use std::path::PathBuf;
use std::process::ExitCode;
use surfaces::{WetnessPlugin, WetnessUpdateSet};
use ui::HudPlugin;
use wetness::{WaveType, WetnessConfig};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long, help = "RON file with the wetness configuration")]
    config: Option<PathBuf>,

    #[arg(long, help = "Start with the water level waveform running")]
    simulate: bool,

    #[arg(long, help = "Waveform shape: sine, triangle or square")]
    wave_type: Option<WaveType>,

    #[arg(long, help = "Print the effective configuration as RON and exit")]
    dump_config: bool,

    #[arg(long, default_value_t = DEFAULT_COLUMNS)]
    columns: u32,
}

fn build_config(args: &Args) -> Result<WetnessConfig, wetness::WetnessError> {
    let mut config = match &args.config {
        Some(path) => WetnessConfig::load(path)?,
        None => WetnessConfig::default(),
    };
    if args.simulate {
        config.simulation.enabled = true;
    }
    if let Some(wave_type) = args.wave_type {
        config.simulation.wave_type = wave_type;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Invalid wetness configuration: {err}");
            return ExitCode::FAILURE;
        }
    };

    if args.dump_config {
        return match config.to_ron_string() {
            Ok(text) => {
                println!("{text}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("Could not serialize configuration: {err}");
                ExitCode::FAILURE
            }
        };
    }

    println!(
        "Starting with {} columns, waveform {}",
        args.columns,
        if config.simulation.enabled {
            config.simulation.wave_type.as_str()
        } else {
            "off"
        }
    );

    let exit = App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: WINDOW_TITLE.to_string(),
                present_mode: PresentMode::AutoVsync,
                ..default()
            }),
            ..default()
        }))
        .add_plugins((WetnessPlugin { config }, HudPlugin))
        .insert_resource(DemoSettings {
            columns: args.columns,
        })
        .init_resource::<KeyMap>()
        .add_systems(Startup, setup_demo_scene)
        .add_systems(Update, wetness_controls_system.before(WetnessUpdateSet))
        .run();

    if exit.is_error() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
