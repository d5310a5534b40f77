//! Helix CLI
//!
//! Headless driver for the animation editor: replays scripted input
//! sessions, plays back recorded animations frame by frame, and writes
//! default configuration files.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use helix_animation::{AnimationPlayer, FrameSample, PlayerConfig, PlayerState};
use helix_core::{FixedRateClock, SystemClock, Timestamp};
use helix_editor::config::CONFIG_FILE;
use helix_editor::{Editor, EditorConfig, EditorState, FileStorage, TimedEvent};
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Keyframe animation editor, headless
#[derive(Parser, Debug)]
#[command(name = "helix")]
#[command(about = "Record and play back keyframe animations")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Feed a scripted input session through the editor
    Replay {
        /// JSON array of timed input events
        session: PathBuf,

        /// Configuration file or directory containing helix.toml
        #[arg(short, long, default_value = ".")]
        config: PathBuf,

        /// Print the render tree after each state instead of the state
        #[arg(long)]
        render: bool,

        /// Start from and save to the configured storage
        #[arg(long)]
        save: bool,
    },

    /// Play an animation from a saved editor state
    Play {
        /// Saved editor state (JSON)
        state: PathBuf,

        /// Animation to play, the selected one if omitted
        #[arg(short, long)]
        animation: Option<usize>,

        /// Frames per second, the configured rate if omitted
        #[arg(long)]
        fps: Option<f64>,

        /// Playback speed multiplier
        #[arg(long, default_value_t = 1.0)]
        speed: f64,

        /// Configuration file or directory containing helix.toml
        #[arg(short, long, default_value = ".")]
        config: PathBuf,

        /// Emit frames at wall-clock pace instead of as fast as possible
        #[arg(long)]
        realtime: bool,
    },

    /// Write a default helix.toml
    Init {
        /// Target directory
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Replay {
            session,
            config,
            render,
            save,
        } => cmd_replay(&session, &config, render, save),
        Command::Play {
            state,
            animation,
            fps,
            speed,
            config,
            realtime,
        } => cmd_play(&state, animation, fps, speed, &config, realtime),
        Command::Init { dir, force } => cmd_init(&dir, force),
    }
}

fn cmd_replay(session: &Path, config_path: &Path, render: bool, save: bool) -> Result<()> {
    let config = EditorConfig::load_or_default(config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    let content =
        fs::read_to_string(session).with_context(|| format!("Failed to read {}", session.display()))?;
    let events: Vec<TimedEvent> =
        serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", session.display()))?;

    info!(events = events.len(), "replaying {}", session.display());

    let mut editor = Editor::from_config(&config);
    if save && config.persistence.enabled {
        let dir = config.persistence.dir.clone().unwrap_or_else(|| PathBuf::from("."));
        editor = editor.with_persistence(Box::new(FileStorage::new(dir)), &config.persistence);
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for event in events {
        let time = event.time;
        editor.push(event);
        for state in editor.process() {
            if render {
                let tree = editor.frame(time)?;
                serde_json::to_writer(&mut out, &tree)?;
            } else {
                serde_json::to_writer(&mut out, &*state)?;
            }
            writeln!(out)?;
        }
    }
    out.flush()?;

    editor.flush().context("Failed to save editor state")?;
    Ok(())
}

fn cmd_play(
    path: &Path,
    index: Option<usize>,
    fps: Option<f64>,
    speed: f64,
    config_path: &Path,
    realtime: bool,
) -> Result<()> {
    let config = EditorConfig::load_or_default(config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    let mut ticks = play_clock(fps, speed, &config)?;

    let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let state: EditorState = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    let state = state.normalized();

    let index = match index.or(state.selected_animation) {
        Some(index) => index,
        None => bail!("{} contains no animations", path.display()),
    };
    let animation = state
        .animations
        .get(index)
        .map(Arc::clone)
        .with_context(|| format!("No animation {index} ({} available)", state.animations.len()))?;

    info!(
        animation = %animation.name,
        duration = %animation.duration(),
        fps = ticks.fps(),
        speed,
        realtime,
        "playing"
    );

    let player_config = PlayerConfig::default().with_fps(ticks.fps()).with_speed(speed);
    let mut player = AnimationPlayer::new(animation, player_config);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let wall = SystemClock::new();

    let frames = play_frames(&mut player, &mut ticks, |tick, sample| {
        if realtime {
            let wait = tick.elapsed_since(wall.now());
            thread::sleep(Duration::from_secs_f64(wait.as_secs_f64()));
        }
        serde_json::to_writer(&mut out, sample)?;
        writeln!(out)?;
        if realtime {
            out.flush()?;
        }
        Ok(())
    })?;
    out.flush()?;

    info!(frames, "playback finished");
    Ok(())
}

/// Frame clock for `helix play`, at `fps` or else the configured rate
fn play_clock(fps: Option<f64>, speed: f64, config: &EditorConfig) -> Result<FixedRateClock> {
    if !(speed.is_finite() && speed > 0.0) {
        bail!("--speed must be positive, got {speed}");
    }

    let fps = fps.unwrap_or(config.fps);
    FixedRateClock::new(fps).with_context(|| format!("--fps must be positive, got {fps}"))
}

/// Play from the start, sampling once per tick until playback finishes.
///
/// Returns the number of frames emitted.
fn play_frames<F>(player: &mut AnimationPlayer, ticks: &mut FixedRateClock, mut emit: F) -> Result<usize>
where
    F: FnMut(Timestamp, &FrameSample) -> Result<()>,
{
    let Some(mut previous) = ticks.next() else {
        return Ok(0);
    };

    player.play();
    emit(previous, &player.sample()?)?;
    let mut frames = 1;

    while player.state() != PlayerState::Finished {
        let Some(tick) = ticks.next() else {
            break;
        };
        emit(tick, &player.advance(tick.elapsed_since(previous))?)?;
        previous = tick;
        frames += 1;
    }

    Ok(frames)
}

fn cmd_init(dir: &Path, force: bool) -> Result<()> {
    let path = dir.join(CONFIG_FILE);
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    let content = EditorConfig::default().to_toml()?;
    fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;

    info!("Created {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use helix_animation::{Animation, Waypoint};
    use helix_core::Point;

    fn at(millis: f64) -> Timestamp {
        Timestamp::from_millis(millis)
    }

    fn slide() -> Arc<Animation> {
        let actor = "0".into();
        let animation = Animation::new("Animation 1")
            .with_waypoint(&actor, Waypoint::new(at(0.0), Point::new(0.0, 0.0)))
            .unwrap()
            .with_waypoint(&actor, Waypoint::new(at(100.0), Point::new(100.0, 0.0)))
            .unwrap();
        Arc::new(animation)
    }

    fn collect(speed: f64, fps: f64) -> Vec<(Timestamp, Timestamp)> {
        let mut ticks = FixedRateClock::new(fps).unwrap();
        let mut player = AnimationPlayer::new(slide(), PlayerConfig::default().with_fps(fps).with_speed(speed));
        let mut seen = Vec::new();
        let frames = play_frames(&mut player, &mut ticks, |tick, sample| {
            seen.push((tick, sample.elapsed));
            Ok(())
        })
        .unwrap();
        assert_eq!(frames, seen.len());
        seen
    }

    #[test]
    fn test_fps_defaults_to_config() {
        let config = EditorConfig {
            fps: 20.0,
            ..EditorConfig::default()
        };
        assert_eq!(play_clock(None, 1.0, &config).unwrap().interval(), at(50.0));
        assert_eq!(play_clock(Some(10.0), 1.0, &config).unwrap().interval(), at(100.0));
    }

    #[test]
    fn test_bad_rates_are_rejected() {
        let config = EditorConfig::default();
        for speed in [f64::NAN, f64::INFINITY, 0.0, -1.0] {
            assert!(play_clock(None, speed, &config).is_err(), "speed {speed}");
        }
        for fps in [f64::NAN, 0.0, -30.0] {
            assert!(play_clock(Some(fps), 1.0, &config).is_err(), "fps {fps}");
        }
    }

    #[test]
    fn test_frames_follow_the_clock() {
        let seen = collect(1.0, 20.0);
        let ticks: Vec<_> = seen.iter().map(|(tick, _)| *tick).collect();
        assert_eq!(ticks, [at(0.0), at(50.0), at(100.0)]);
        assert_eq!(seen.last().map(|(_, elapsed)| *elapsed), Some(at(100.0)));
    }

    #[test]
    fn test_half_speed_takes_twice_the_frames() {
        let seen = collect(0.5, 20.0);
        assert_eq!(seen.len(), 5);
        assert_eq!(seen[2].1, at(50.0));
        assert_eq!(seen.last().map(|(_, elapsed)| *elapsed), Some(at(100.0)));
    }
}
