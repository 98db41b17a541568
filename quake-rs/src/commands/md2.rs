//! MD2 model file command implementations

use anyhow::{Context, Result};
use clap::Subcommand;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use quake_md2::{CoordinateSystem, DirectoryArchive, Md2Model, ParseOptions};

use crate::utils::{
    ANIMATION_COLUMNS, PLAYBACK_COLUMNS, add_table_row, animation_row, create_table, format_bytes,
    format_vec3, playback_row,
};

/// Most updates `md2 play` will simulate
const MAX_PLAY_STEPS: usize = 100_000;

#[derive(Subcommand)]
pub enum Md2Commands {
    /// Display information about an MD2 model file
    Info {
        /// Path to the MD2 file
        file: PathBuf,

        /// Keep the native Z-up axes instead of converting to Y-up
        #[arg(long)]
        z_up: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the animations of an MD2 model
    Animations {
        /// Path to the MD2 file
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve the skins of an MD2 model against a game directory
    Skins {
        /// Path to the MD2 file
        file: PathBuf,

        /// Game directory skin paths are relative to (defaults to the model's directory)
        #[arg(short, long)]
        root: Option<PathBuf>,
    },

    /// Validate an MD2 model file
    Validate {
        /// Path to the MD2 file
        file: PathBuf,
    },

    /// Simulate playback and print the frame sequence
    Play {
        /// Path to the MD2 file
        file: PathBuf,

        /// Animation to play (defaults to the first one)
        #[arg(short, long)]
        animation: Option<String>,

        /// Playback rate in frames per second
        #[arg(long, default_value = "10")]
        fps: f32,

        /// Simulated time in seconds
        #[arg(short, long, default_value = "1")]
        duration: f32,

        /// Time step per update in seconds
        #[arg(short, long, default_value = "0.05")]
        step: f32,

        /// Play the animation once instead of looping
        #[arg(long)]
        once: bool,
    },
}

pub fn execute(cmd: Md2Commands) -> Result<()> {
    match cmd {
        Md2Commands::Info { file, z_up, json } => handle_info(&file, z_up, json),
        Md2Commands::Animations { file, json } => handle_animations(&file, json),
        Md2Commands::Skins { file, root } => handle_skins(&file, root),
        Md2Commands::Validate { file } => handle_validate(&file),
        Md2Commands::Play {
            file,
            animation,
            fps,
            duration,
            step,
            once,
        } => handle_play(&file, animation.as_deref(), fps, duration, step, once),
    }
}

fn load_model(path: &Path, options: &ParseOptions) -> Result<Md2Model> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    Md2Model::load_with_options(&mut BufReader::new(file), options)
        .with_context(|| format!("Failed to load MD2 model from {}", path.display()))
}

fn coordinate_label(coordinate_system: CoordinateSystem) -> &'static str {
    match coordinate_system {
        CoordinateSystem::YUp => "Y-up",
        CoordinateSystem::ZUp => "Z-up (native)",
    }
}

fn handle_info(path: &Path, z_up: bool, json: bool) -> Result<()> {
    let coordinate_system = if z_up {
        CoordinateSystem::ZUp
    } else {
        CoordinateSystem::YUp
    };
    let options = ParseOptions::default().with_coordinate_system(coordinate_system);
    let model = load_model(path, &options)?;
    let header = model.header();
    let bounds = model.key_frames().first().and_then(|frame| frame.bounds());

    if json {
        #[cfg(feature = "serde")]
        {
            let info = serde_json::json!({
                "file": path.display().to_string(),
                "coordinate_system": coordinate_system,
                "header": header,
                "corners_per_frame": model.mesh().corner_count(),
                "bounds": bounds.map(|(min, max)| [min.to_array(), max.to_array()]),
                "animations": model.animations(),
                "skins": model.skins(),
            });
            println!("{}", serde_json::to_string_pretty(&info)?);
            return Ok(());
        }
        #[cfg(not(feature = "serde"))]
        {
            anyhow::bail!("JSON output requires the 'serde' feature to be enabled");
        }
    }

    let file_size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);

    println!("MD2 model: {}", path.display());
    println!("File size: {}", format_bytes(file_size));

    println!("\n=== Header ===");
    println!("Version: {}", header.version);
    println!("Skin size: {}x{}", header.skin_width, header.skin_height);
    println!("Frame size: {} bytes", header.frame_size);
    println!("Skins: {}", header.num_skins);
    println!("Vertices: {}", header.num_vertices);
    println!("Texture coordinates: {}", header.num_tex_coords);
    println!("Triangles: {}", header.num_triangles);
    println!("GL commands: {}", header.num_gl_commands);
    println!("Frames: {}", header.num_frames);

    println!("\n=== Geometry ===");
    println!("Coordinate system: {}", coordinate_label(coordinate_system));
    println!("Corners per frame: {}", model.mesh().corner_count());
    match bounds {
        Some((min, max)) => {
            println!("Bounds (frame 0): {} .. {}", format_vec3(min), format_vec3(max));
        }
        None => println!("Bounds (frame 0): empty"),
    }
    println!("Animations: {}", model.animations().len());

    Ok(())
}

fn handle_animations(path: &Path, json: bool) -> Result<()> {
    let model = load_model(path, &ParseOptions::default())?;

    if json {
        #[cfg(feature = "serde")]
        {
            println!("{}", serde_json::to_string_pretty(model.animations())?);
            return Ok(());
        }
        #[cfg(not(feature = "serde"))]
        {
            anyhow::bail!("JSON output requires the 'serde' feature to be enabled");
        }
    }

    let mut table = create_table(&ANIMATION_COLUMNS);
    for (index, anim) in model.animations().iter().enumerate() {
        add_table_row(&mut table, animation_row(index, anim));
    }
    table.printstd();

    Ok(())
}

/// Archive-relative path of `file` inside `root`, with `/` separators
fn archive_relative(file: &Path, root: &Path) -> Result<String> {
    let relative = file.strip_prefix(root).with_context(|| {
        format!(
            "{} is not inside the game directory {}",
            file.display(),
            root.display()
        )
    })?;

    Ok(relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/"))
}

fn handle_skins(path: &Path, root: Option<PathBuf>) -> Result<()> {
    let root = match root {
        Some(root) => root,
        None => path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default(),
    };
    let model_path = archive_relative(path, &root)?;
    let archive = DirectoryArchive::new(&root);

    let model = Md2Model::load_from_archive(&archive, &model_path, &ParseOptions::default())
        .with_context(|| format!("Failed to load MD2 model from {}", path.display()))?;

    println!("Stored skins:");
    if model.mesh().skins().is_empty() {
        println!("  (none)");
    }
    for skin in model.mesh().skins() {
        println!("  {}", skin.name);
    }

    println!("\nResolved skins:");
    if model.skins().is_empty() {
        println!("  (none)");
        return Ok(());
    }

    let mut table = create_table(&["#", "Name", "Path"]);
    for (index, skin) in model.skins().iter().enumerate() {
        add_table_row(
            &mut table,
            vec![index.to_string(), skin.name.clone(), skin.path.clone()],
        );
    }
    table.printstd();

    Ok(())
}

fn handle_validate(path: &Path) -> Result<()> {
    let model = load_model(path, &ParseOptions::default())?;

    println!(
        "{}: valid ({} frames, {} animations, {} triangles)",
        path.display(),
        model.key_frames().len(),
        model.animations().len(),
        model.mesh().triangles().len()
    );

    Ok(())
}

fn handle_play(
    path: &Path,
    animation: Option<&str>,
    fps: f32,
    duration: f32,
    step: f32,
    once: bool,
) -> Result<()> {
    if !(step.is_finite() && step > 0.0) {
        anyhow::bail!("Time step must be a positive number, got {step}");
    }

    let steps = (duration / step).ceil();
    if !(0.0..=MAX_PLAY_STEPS as f32).contains(&steps) {
        anyhow::bail!(
            "Simulating {duration}s in steps of {step}s needs {steps} updates, limit is {MAX_PLAY_STEPS}"
        );
    }
    let steps = steps as usize;

    let options = ParseOptions::default().with_frames_per_second(fps);
    let mut model = load_model(path, &options)?;

    if let Some(name) = animation {
        model
            .set_animation(name)
            .with_context(|| format!("Cannot play animation '{name}'"))?;
    }
    if once {
        let index = model.player().animation_index();
        model.set_animation_looping(index, false)?;
    }

    let anim_name = model
        .current_animation()
        .map(|a| a.name.clone())
        .unwrap_or_default();
    println!(
        "Playing '{}' at {} fps for {}s (step {}s)",
        anim_name,
        model.frames_per_second(),
        duration,
        step
    );

    let mut table = create_table(&PLAYBACK_COLUMNS);
    for i in 1..=steps {
        model.update(step);
        add_table_row(
            &mut table,
            playback_row(i as f32 * step, model.player(), model.playback_state()),
        );
    }
    table.printstd();

    Ok(())
}
