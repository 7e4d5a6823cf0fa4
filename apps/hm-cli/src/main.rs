use clap::{Parser, Subcommand, ValueEnum};
use hm_app::{AppResult, TranslateOptions, query};
use hm_hvac::ResidualPolicy;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "hm")]
#[command(about = "House model translator - building description to energy model", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a building description
    Validate {
        /// Path to the description (YAML or JSON)
        input: PathBuf,
    },
    /// Build the energy model, optionally writing exports
    Translate {
        /// Path to the description (YAML or JSON)
        input: PathBuf,
        /// Directory for manifest.json, model.json and map_hvac.tsv
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Weather directory recorded for the simulation engine
        #[arg(long)]
        weather_dir: Option<PathBuf>,
        /// Schema directory; must exist when given
        #[arg(long)]
        schemas_dir: Option<PathBuf>,
        /// Validate only if the build fails
        #[arg(long)]
        skip_validation: bool,
        /// How to treat load left unserved by the declared systems
        #[arg(long, value_enum, default_value_t = Policy::Default)]
        residual_policy: Policy,
    },
    /// List the zones of the built model
    Zones {
        input: PathBuf,
    },
    /// List the construction assigned to each surface
    Constructions {
        input: PathBuf,
    },
    /// List HVAC equipment and the load each serves
    Hvac {
        input: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Policy {
    Default,
    CoverAll,
}

impl From<Policy> for ResidualPolicy {
    fn from(p: Policy) -> Self {
        match p {
            Policy::Default => ResidualPolicy::Default,
            Policy::CoverAll => ResidualPolicy::CoverAll,
        }
    }
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { input } => cmd_validate(&input),
        Commands::Translate {
            input,
            output_dir,
            weather_dir,
            schemas_dir,
            skip_validation,
            residual_policy,
        } => cmd_translate(
            &input,
            TranslateOptions {
                skip_validation,
                output_dir,
                weather_dir,
                schemas_dir,
                residual_policy: residual_policy.into(),
            },
        ),
        Commands::Zones { input } => cmd_zones(&input),
        Commands::Constructions { input } => cmd_constructions(&input),
        Commands::Hvac { input } => cmd_hvac(&input),
    }
}

fn cmd_validate(input: &Path) -> AppResult<()> {
    println!("Validating description: {}", input.display());
    let desc = hm_app::load_description(input)?;
    hm_app::validate_description(&desc)?;
    println!("✓ Description is valid");
    Ok(())
}

fn cmd_translate(input: &Path, options: TranslateOptions) -> AppResult<()> {
    println!("Translating: {}", input.display());
    let translation = hm_app::translate_file(input, &options)?;
    let model = &translation.model;
    println!(
        "✓ Model built: {} zones, {} surfaces, {} sub-surfaces, {} equipment, {} ducts",
        model.zones.len(),
        model.surfaces.len(),
        model.sub_surfaces.len(),
        model.equipment.len(),
        model.ducts.len()
    );

    let cfa = &translation.envelope.floor_area;
    if cfa.basement_ceiling > 0.0 || cfa.floor > 0.0 {
        println!(
            "  Inferred floor area: {:.1} ft² basement ceiling, {:.1} ft² floor",
            cfa.basement_ceiling, cfa.floor
        );
    }
    if let Some(plan) = &translation.envelope.explode {
        println!(
            "  Surfaces spread over {} sides, {:.1} ft apart",
            plan.sides, plan.distance
        );
    }
    if let Some(manifest) = &translation.manifest {
        println!("✓ Exported build {}", manifest.build_id);
    }
    Ok(())
}

fn build(input: &Path) -> AppResult<hm_app::Translation> {
    let desc = hm_app::load_description(input)?;
    hm_app::translate(&desc, &TranslateOptions::default())
}

fn cmd_zones(input: &Path) -> AppResult<()> {
    let translation = build(input)?;
    let zones = query::list_zones(&translation.model);
    println!("Zones:");
    for z in zones {
        let volume = z
            .volume
            .map(|v| format!("{v:.1} ft³"))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {} [{}] {} surfaces, {}{}",
            z.name,
            z.location,
            z.surface_count,
            volume,
            if z.conditioned { ", conditioned" } else { "" }
        );
    }
    Ok(())
}

fn cmd_constructions(input: &Path) -> AppResult<()> {
    let translation = build(input)?;
    println!("Constructions:");
    for c in query::list_constructions(&translation.model) {
        println!(
            "  {} - {} (R-{:.2}, {:?})",
            c.surface, c.construction, c.realized_r, c.source
        );
    }
    Ok(())
}

fn cmd_hvac(input: &Path) -> AppResult<()> {
    let translation = build(input)?;
    let fraction = |f: Option<f64>| f.map_or_else(|| "-".to_string(), |f| format!("{f:.2}"));
    println!("HVAC equipment:");
    for e in query::list_equipment(&translation.model) {
        println!(
            "  {} (system {}) heat {} cool {}{}",
            e.name,
            e.system_id.as_deref().unwrap_or("-"),
            fraction(e.heating_fraction),
            fraction(e.cooling_fraction),
            e.air_loop
                .map(|l| format!(", {l}"))
                .unwrap_or_default()
        );
    }
    println!(
        "✓ {} systems mapped",
        translation.model.equipment_map.len()
    );
    Ok(())
}
