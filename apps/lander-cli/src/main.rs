use anyhow::Context;
use clap::{Parser, Subcommand};
use lander_assets::{AssetManifest, TextureRegistry, TextureSet};
use lander_common::Outcome;
use lander_input::{InputScript, ScriptFrame};
use lander_kernel::{LanderConfig, World, WorldEvent};
use lander_render::{DebugTextRenderer, DrawList, RenderView, Renderer};
use lander_tools::SessionInspector;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lander-cli", about = "Headless lunar lander")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// YAML configuration file; defaults apply when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Play a session from an input script
    Run {
        /// Input script; the craft drifts idle without one
        #[arg(short, long)]
        script: Option<PathBuf>,
        /// Maximum number of frames to run
        #[arg(short, long, default_value = "600")]
        frames: usize,
        /// Simulated frame time in milliseconds
        #[arg(long, default_value = "16.667")]
        frame_ms: f32,
        /// Print a debug frame every N frames (0 disables)
        #[arg(long, default_value = "60")]
        print_every: usize,
        /// Write the event log to this file as YAML
        #[arg(long)]
        events_out: Option<PathBuf>,
    },
    /// Check that a session replays to the same state
    Replay {
        /// Input script to play before replaying
        #[arg(short, long)]
        script: Option<PathBuf>,
        /// Replay a saved event log instead of playing a script
        #[arg(short, long, conflicts_with = "script")]
        events: Option<PathBuf>,
        #[arg(short, long, default_value = "600")]
        frames: usize,
        #[arg(long, default_value = "16.667")]
        frame_ms: f32,
    },
    /// Print the effective configuration as YAML
    Config,
    /// List the asset manifest and report missing files
    Assets {
        /// Directory the manifest paths are relative to
        #[arg(short, long, default_value = ".")]
        root: PathBuf,
        /// JSON manifest; the built-in one is used when omitted
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Info => {
            println!("lander-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("kernel: {}", lander_kernel::crate_info());
            println!("input: {}", lander_input::crate_info());
            println!("render: {}", lander_render::crate_info());
            println!("assets: {}", lander_assets::crate_info());
            println!("tools: {}", lander_tools::crate_info());
            println!("{}", SessionInspector::summary(&World::new(config)));
        }
        Commands::Run {
            script,
            frames,
            frame_ms,
            print_every,
            events_out,
        } => {
            let script = load_script(script.as_deref())?;
            let view = RenderView::from_config(&config.view);
            let mut registry = TextureRegistry::new();
            let textures = TextureSet::register(&AssetManifest::default(), &mut registry);
            let renderer = DebugTextRenderer::new(textures);

            let mut world = World::new(config);
            let played = play(&mut world, &script, frames, frame_ms, |frame, world| {
                let list = DrawList::build(world, &textures);
                tracing::trace!(frame, quads = list.len(), "frame drawn");
                if print_every > 0 && frame % print_every == 0 {
                    print!("{}", renderer.render(world, &view));
                }
            });

            print!("{}", renderer.render(&world, &view));
            println!("{}", SessionInspector::summary(&world));
            println!(
                "Result: {} after {played} frames, fuel={} hash={:#018x}",
                describe(world.outcome()),
                world.fuel(),
                world.state_hash()
            );

            if let Some(path) = events_out {
                save_events(&path, world.events())?;
                println!("Events: {} written to {}", world.events().len(), path.display());
            }
        }
        Commands::Replay {
            script,
            events,
            frames,
            frame_ms,
        } => {
            if let Some(path) = events {
                let log = load_events(&path)?;
                let replayed = World::replay(config, &log);
                println!("{}", SessionInspector::summary(&replayed));
                println!(
                    "Replayed {} events: {} hash={:#018x}",
                    log.len(),
                    describe(replayed.outcome()),
                    replayed.state_hash()
                );
                return Ok(());
            }

            let script = load_script(script.as_deref())?;
            let mut live = World::new(config.clone());
            play(&mut live, &script, frames, frame_ms, |_, _| {});
            let replayed = World::replay(config, live.events());

            println!(
                "Live:   tick={} fuel={} outcome={} hash={:#018x}",
                live.tick(),
                live.fuel(),
                live.outcome(),
                live.state_hash()
            );
            println!(
                "Replay: tick={} fuel={} outcome={} hash={:#018x}",
                replayed.tick(),
                replayed.fuel(),
                replayed.outcome(),
                replayed.state_hash()
            );
            let matched = live.state_hash() == replayed.state_hash();
            println!("Match: {}", if matched { "OK" } else { "MISMATCH" });
            if !matched {
                anyhow::bail!("replay diverged from the live session");
            }
        }
        Commands::Config => {
            print!("{}", config.to_yaml_string()?);
        }
        Commands::Assets { root, manifest } => {
            let manifest = match manifest {
                Some(path) => AssetManifest::load(&path)
                    .with_context(|| format!("loading manifest {}", path.display()))?,
                None => AssetManifest::default(),
            };
            let mut registry = TextureRegistry::new();
            let textures = TextureSet::register(&manifest, &mut registry);
            println!("Textures: {}", registry.len());
            for handle in [
                textures.player,
                textures.rock,
                textures.victory,
                textures.start,
                textures.win,
                textures.lose,
                textures.font,
                textures.flame,
                textures.background,
            ] {
                println!("  {:#018x} {}", handle.0, registry.require(handle)?);
            }
            println!("Shaders: {} {}", manifest.shaders.vertex, manifest.shaders.fragment);

            let missing = manifest.missing_files(&root);
            if missing.is_empty() {
                println!("All files present under {}", root.display());
            } else {
                for path in &missing {
                    println!("  missing: {}", path.display());
                }
                println!("{} of {} files missing", missing.len(), manifest.paths().count());
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<LanderConfig> {
    let config = match path {
        Some(path) => LanderConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => LanderConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn load_script(path: Option<&Path>) -> anyhow::Result<InputScript> {
    match path {
        Some(path) => InputScript::load(path)
            .with_context(|| format!("loading script {}", path.display())),
        None => Ok(InputScript::default()),
    }
}

fn save_events(path: &Path, events: &[WorldEvent]) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)?;
    serde_yaml::to_writer(file, events)?;
    Ok(())
}

fn load_events(path: &Path) -> anyhow::Result<Vec<WorldEvent>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening event log {}", path.display()))?;
    Ok(serde_yaml::from_reader(file)?)
}

/// Drive the frame loop: input, controls, update, then `on_frame`. Stops
/// when the script asks to quit or the descent is decided. Returns the
/// number of frames played.
fn play(
    world: &mut World,
    script: &InputScript,
    frames: usize,
    frame_ms: f32,
    mut on_frame: impl FnMut(usize, &World),
) -> usize {
    let elapsed = frame_ms / 1000.0;
    let inputs = script
        .frames()
        .chain(std::iter::repeat(ScriptFrame::IDLE))
        .take(frames);
    let mut played = 0;
    for (frame, input) in inputs.enumerate() {
        if input.quit {
            tracing::info!(frame, "quit requested");
            break;
        }
        world.apply_controls(input.controls);
        world.update(elapsed);
        on_frame(frame, world);
        played += 1;
        if world.outcome().is_decided() {
            break;
        }
    }
    played
}

fn describe(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Flying => "still flying",
        Outcome::Crashed => "crashed",
        Outcome::Landed => "landed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["lander-cli", "run", "-v", "-c", "lander.yaml"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("lander.yaml")));
        assert!(matches!(cli.command, Commands::Run { frames: 600, .. }));
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["lander-cli", "--verbose", "config"]).unwrap();
        assert!(cli.verbose);
        assert!(cli.config.is_none());
    }

    #[test]
    fn replay_sources_conflict() {
        let result = Cli::try_parse_from(["lander-cli", "replay", "-s", "a.txt", "-e", "b.yaml"]);
        assert!(result.is_err());
    }
}
