use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process;

use airburst_engine::{
    analyse_outcome, compute_energy_profile, AtmosphereModel, EntryError, EntryInputs,
    EntrySolver, EntryTrajectory, IntegrationBackend, Planet,
};

#[derive(Parser)]
#[command(name = "airburst")]
#[command(version = "0.1.0")]
#[command(about = "Meteoroid atmospheric entry simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Table,
    Csv,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve an entry scenario and print the trajectory
    Entry {
        /// Body radius (m)
        #[arg(short = 'r', long)]
        radius: f64,

        /// Entry speed (m/s)
        #[arg(short = 'v', long)]
        velocity: f64,

        /// Body material density (kg/m³)
        #[arg(short = 'd', long)]
        density: f64,

        /// Material strength (Pa)
        #[arg(short = 's', long)]
        strength: f64,

        /// Trajectory angle to the horizontal (degrees unless --radians)
        #[arg(short = 'a', long)]
        angle: f64,

        /// Initial altitude (m)
        #[arg(long, default_value = "100000.0")]
        altitude: f64,

        /// Output timestep (s)
        #[arg(long, default_value = "0.05")]
        dt: f64,

        /// Interpret the angle as radians
        #[arg(long)]
        radians: bool,

        /// Integration backend: RK4, FE or Euler
        #[arg(long, default_value = "RK4")]
        backend: String,

        /// Atmosphere model: exponential, constant or tabular
        #[arg(long, default_value = "exponential")]
        atmosphere: String,

        /// Altitude/density table file (required for tabular atmosphere)
        #[arg(long)]
        table: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Print every Nth row (table format only)
        #[arg(long, default_value = "1")]
        stride: usize,
    },

    /// Solve a scenario and report the airburst/cratering outcome
    Outcome {
        /// Body radius (m)
        #[arg(short = 'r', long)]
        radius: f64,

        /// Entry speed (m/s)
        #[arg(short = 'v', long)]
        velocity: f64,

        /// Body material density (kg/m³)
        #[arg(short = 'd', long)]
        density: f64,

        /// Material strength (Pa)
        #[arg(short = 's', long)]
        strength: f64,

        /// Trajectory angle to the horizontal (degrees unless --radians)
        #[arg(short = 'a', long)]
        angle: f64,

        /// Initial altitude (m)
        #[arg(long, default_value = "100000.0")]
        altitude: f64,

        /// Output timestep (s)
        #[arg(long, default_value = "0.05")]
        dt: f64,

        /// Interpret the angle as radians
        #[arg(long)]
        radians: bool,

        /// Integration backend: RK4, FE or Euler
        #[arg(long, default_value = "RK4")]
        backend: String,

        /// Atmosphere model: exponential, constant or tabular
        #[arg(long, default_value = "exponential")]
        atmosphere: String,

        /// Altitude/density table file (required for tabular atmosphere)
        #[arg(long)]
        table: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Print information about the engine
    Info,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), EntryError> {
    match cli.command {
        Commands::Entry {
            radius,
            velocity,
            density,
            strength,
            angle,
            altitude,
            dt,
            radians,
            backend,
            atmosphere,
            table,
            format,
            stride,
        } => {
            let trajectory = solve_scenario(
                radius, velocity, density, strength, angle, altitude, dt, radians, &backend,
                &atmosphere, table.as_deref(),
            )?;
            print_trajectory(&trajectory, format, stride.max(1));
            Ok(())
        }
        Commands::Outcome {
            radius,
            velocity,
            density,
            strength,
            angle,
            altitude,
            dt,
            radians,
            backend,
            atmosphere,
            table,
            format,
        } => {
            let trajectory = solve_scenario(
                radius, velocity, density, strength, angle, altitude, dt, radians, &backend,
                &atmosphere, table.as_deref(),
            )?;
            let dedz = compute_energy_profile(&trajectory);
            let summary = analyse_outcome(&trajectory, &dedz)?;
            match format {
                OutputFormat::Json => {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&summary)
                            .expect("outcome summary serializes")
                    );
                }
                _ => {
                    println!("Outcome: {}", summary.outcome);
                    println!("  Peak energy rate: {:.4} kt/km", summary.burst_peak_dedz);
                    println!("  Burst altitude:   {:.1} m", summary.burst_altitude);
                    println!("  Burst distance:   {:.1} m", summary.burst_distance);
                    println!("  Burst energy:     {:.4} kt", summary.burst_energy);
                    println!("  Steps:            {}", trajectory.steps.len());
                }
            }
            Ok(())
        }
        Commands::Info => {
            println!("Airburst Engine v0.1.0");
            println!();
            println!("Simulates meteoroid atmospheric entry by integrating the coupled");
            println!("equations for velocity, mass, angle, altitude, distance and");
            println!("fragmentation-driven radius growth, then classifies the event as");
            println!("an airburst or a cratering impact.");
            println!();
            println!("Backends:    RK4 (default), FE");
            println!("Atmospheres: exponential (default), constant, tabular");
            Ok(())
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn solve_scenario(
    radius: f64,
    velocity: f64,
    density: f64,
    strength: f64,
    angle: f64,
    altitude: f64,
    dt: f64,
    radians: bool,
    backend: &str,
    atmosphere: &str,
    table: Option<&std::path::Path>,
) -> Result<EntryTrajectory, EntryError> {
    let planet = Planet::earth();
    let atmosphere = build_atmosphere(atmosphere, table, &planet)?;
    let inputs = EntryInputs {
        radius,
        velocity,
        density,
        strength,
        angle,
        init_altitude: altitude,
        dt,
        radians,
        backend: IntegrationBackend::from_name_or_default(backend),
    };
    EntrySolver::new(planet, atmosphere, inputs).solve()
}

fn build_atmosphere(
    name: &str,
    table: Option<&std::path::Path>,
    planet: &Planet,
) -> Result<AtmosphereModel, EntryError> {
    if name.eq_ignore_ascii_case("tabular") {
        let path = table.ok_or_else(|| {
            EntryError::InvalidInput("tabular atmosphere requires --table <file>".to_string())
        })?;
        return AtmosphereModel::from_table_file(path);
    }
    Ok(AtmosphereModel::from_name(
        name,
        planet.surface_density,
        planet.scale_height,
    ))
}

fn print_trajectory(trajectory: &EntryTrajectory, format: OutputFormat, stride: usize) {
    match format {
        OutputFormat::Table => {
            println!(
                "  Time (s) | Velocity (m/s) |      Mass (kg) | Angle (deg) | Altitude (m) | Distance (m) | Radius (m)"
            );
            println!(
                "  ---------|----------------|----------------|-------------|--------------|--------------|-----------"
            );
            for step in trajectory.steps.iter().step_by(stride) {
                println!(
                    "  {:8.2} | {:14.2} | {:14.3e} | {:11.4} | {:12.1} | {:12.1} | {:10.3}",
                    step.time,
                    step.velocity,
                    step.mass,
                    step.angle,
                    step.altitude,
                    step.distance,
                    step.radius
                );
            }
            println!();
            println!("  {} steps, stopped: {:?}", trajectory.steps.len(), trajectory.stop);
            if let Some(burst) = trajectory.burst_index {
                println!("  fragmentation began at step {}", burst);
            }
        }
        OutputFormat::Csv => {
            println!("velocity,mass,angle,altitude,distance,radius,time");
            for step in &trajectory.steps {
                println!(
                    "{},{},{},{},{},{},{}",
                    step.velocity,
                    step.mass,
                    step.angle,
                    step.altitude,
                    step.distance,
                    step.radius,
                    step.time
                );
            }
        }
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&trajectory.steps)
                    .expect("trajectory rows serialize")
            );
        }
    }
}
