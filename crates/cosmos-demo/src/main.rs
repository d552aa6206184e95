//! Command-line planet generator.
//!
//! Loads a planet from RON or randomizes one from a seed and orbit, builds
//! its six-face mesh, and exports the mesh, color ramp and settings.

mod export;

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use cosmos_config::{CliArgs, Config, GenerationConfig, OutputConfig, default_config_dir};
use cosmos_planet::{
    FaceExecution, HabitableZone, PlanetConfig, PlanetGenerator, PlanetMesh, RandomizerSettings,
    randomize_planet,
};
use tracing::{error, info, warn};

fn main() -> Result<(), Box<dyn Error>> {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().unwrap_or_else(default_config_dir);
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    cosmos_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    run(&args, &config).inspect_err(|e| error!("Planet generation failed: {e}"))
}

fn run(args: &CliArgs, config: &Config) -> Result<(), Box<dyn Error>> {
    let planet = match &args.planet {
        Some(path) => PlanetConfig::load(path)?,
        None => randomized_planet(&config.generation)?,
    };
    info!(
        "Planet '{}': {:?}, seed {}, radius {:.2}, {} noise layers, {} biomes",
        planet.name,
        planet.planet_type,
        planet.seed,
        planet.radius,
        planet.noise_layers.len(),
        planet.biomes.len()
    );

    let execution = face_execution(config.generation.parallel_faces, num_cpus::get());
    let generator = PlanetGenerator::new(&planet)?;
    let mesh = generator.generate(config.generation.resolution, execution)?;

    let shading = &mesh.shading;
    info!(
        "Elevation {:.3}..{:.3}, ocean {}, atmosphere scale {:?}",
        shading.elevation_min_max[0],
        shading.elevation_min_max[1],
        shading.has_ocean,
        shading.atmosphere_scale
    );

    let written = export(&planet, &mesh, &config.output)?;
    for path in &written {
        info!("Wrote {}", path.display());
    }
    Ok(())
}

fn randomized_planet(generation: &GenerationConfig) -> Result<PlanetConfig, Box<dyn Error>> {
    let settings = match &generation.randomizer_settings {
        Some(path) => RandomizerSettings::load(path)?,
        None => RandomizerSettings::default(),
    };
    let zone = generation
        .star_size
        .map(|(min, max)| HabitableZone::for_star(min, max))
        .unwrap_or_default();
    Ok(randomize_planet(
        generation.seed,
        generation.orbit_distance,
        &zone,
        &settings,
    )?)
}

fn face_execution(parallel_faces: bool, cpus: usize) -> FaceExecution {
    if !parallel_faces {
        return FaceExecution::Sequential;
    }
    if cpus > 1 {
        FaceExecution::Parallel
    } else {
        warn!("Only one CPU available, building faces sequentially");
        FaceExecution::Sequential
    }
}

fn export(
    planet: &PlanetConfig,
    mesh: &PlanetMesh,
    output: &OutputConfig,
) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    std::fs::create_dir_all(&output.directory)?;
    let stem = export::file_stem(&planet.name);
    let mut written = Vec::new();

    if output.write_mesh {
        let path = output.directory.join(format!("{stem}.obj"));
        export::save_obj(mesh, &stem, &path)?;
        written.push(path);
    }
    if output.write_color_ramp {
        let path = output.directory.join(format!("{stem}_ramp.png"));
        mesh.color_ramp.save_png(&path)?;
        written.push(path);
    }
    if output.write_settings {
        let path = output.directory.join(format!("{stem}.ron"));
        planet.save(&path)?;
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_execution_selection() {
        assert_eq!(face_execution(true, 8), FaceExecution::Parallel);
        assert_eq!(face_execution(true, 1), FaceExecution::Sequential);
        assert_eq!(face_execution(false, 8), FaceExecution::Sequential);
    }

    #[test]
    fn test_randomized_planet_uses_generation_settings() {
        let generation = GenerationConfig {
            seed: 4242,
            orbit_distance: 20.0,
            ..Default::default()
        };
        let a = randomized_planet(&generation).unwrap();
        let b = randomize_planet(4242, 20.0, &HabitableZone::default(), &RandomizerSettings::default())
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_export_writes_all_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let output = OutputConfig {
            directory: dir.path().join("out"),
            ..Default::default()
        };
        let planet = PlanetConfig::default();
        let mesh = PlanetGenerator::new(&planet)
            .unwrap()
            .generate(4, FaceExecution::Sequential)
            .unwrap();

        let written = export(&planet, &mesh, &output).unwrap();
        let names: Vec<String> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["planet_x.obj", "planet_x_ramp.png", "planet_x.ron"]);
        assert!(written.iter().all(|p| p.exists()));

        let reloaded = PlanetConfig::load(&written[2]).unwrap();
        assert_eq!(reloaded, planet);
    }

    #[test]
    fn test_export_respects_toggles() {
        let dir = tempfile::tempdir().unwrap();
        let output = OutputConfig {
            directory: dir.path().to_path_buf(),
            write_mesh: false,
            write_color_ramp: false,
            write_settings: true,
        };
        let planet = PlanetConfig::default();
        let mesh = PlanetGenerator::new(&planet)
            .unwrap()
            .generate(2, FaceExecution::Sequential)
            .unwrap();
        let written = export(&planet, &mesh, &output).unwrap();
        assert_eq!(written.len(), 1);
    }
}
