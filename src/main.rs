//! meshcalc - three-mesh residential circuit calculator
//!
//! # Usage
//!
//! ```bash
//! meshcalc solve --preset default --r4 18
//! meshcalc solve --file params.toml --json
//! meshcalc preset example --json
//! meshcalc diagram --v1 110 -o circuit.svg
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use mesh_core::{
    api,
    circuit::{CircuitParameters, ParamName, Preset},
    config::ParameterFile,
    diagram,
    error::{MeshError, Result},
    interpret::interpret_currents,
    MeshSolution, MeshSolver,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Three-mesh residential circuit calculator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Solve for the three mesh currents
    Solve {
        #[command(flatten)]
        params: ParamArgs,

        /// Print the JSON API response instead of a report
        #[arg(long)]
        json: bool,
    },

    /// Print a built-in parameter set
    Preset {
        /// Preset name (default or example)
        #[arg(value_name = "NAME", default_value = "default")]
        name: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render the circuit schematic as SVG
    Diagram {
        #[command(flatten)]
        params: ParamArgs,

        /// Output file (stdout when omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

/// Where the nine circuit values come from: preset, then file, then flags.
#[derive(Args, Debug)]
struct ParamArgs {
    /// Base parameter set (default or example)
    #[arg(short, long)]
    preset: Option<String>,

    /// TOML parameter file
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,

    #[arg(long, value_name = "OHMS")]
    r1: Option<f64>,
    #[arg(long, value_name = "OHMS")]
    r2: Option<f64>,
    #[arg(long, value_name = "OHMS")]
    r3: Option<f64>,
    #[arg(long, value_name = "OHMS")]
    r4: Option<f64>,
    #[arg(long, value_name = "OHMS")]
    r5: Option<f64>,
    #[arg(long, value_name = "OHMS")]
    r6: Option<f64>,
    #[arg(long, value_name = "VOLTS")]
    v1: Option<f64>,
    #[arg(long, value_name = "VOLTS")]
    v2: Option<f64>,
    #[arg(long, value_name = "VOLTS")]
    v3: Option<f64>,
}

impl ParamArgs {
    fn flag(&self, name: ParamName) -> Option<f64> {
        match name {
            ParamName::R1 => self.r1,
            ParamName::R2 => self.r2,
            ParamName::R3 => self.r3,
            ParamName::R4 => self.r4,
            ParamName::R5 => self.r5,
            ParamName::R6 => self.r6,
            ParamName::V1 => self.v1,
            ParamName::V2 => self.v2,
            ParamName::V3 => self.v3,
        }
    }

    /// Resolve the parameter set and the solver to use.
    fn resolve(&self) -> Result<(CircuitParameters, MeshSolver)> {
        let file = match &self.file {
            Some(path) => ParameterFile::from_file(path)?,
            None => ParameterFile::default(),
        };

        let preset = self.preset.as_deref().map(str::parse::<Preset>).transpose()?;
        let params = file.resolve_with(preset, |name| self.flag(name))?;
        Ok((params, MeshSolver::with_config(file.solver)))
    }
}

fn init_logger(verbose: bool) {
    let default = if verbose { "mesh_core=debug,meshcalc=debug" } else { "mesh_core=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

fn print_report(params: &CircuitParameters, solution: &MeshSolution) {
    println!("Parameters:");
    for (name, value) in params.iter() {
        println!("  {:<3} = {:>8} {}", name, value, name.kind().unit());
    }

    println!("\nCoefficient matrix A:");
    for row in &solution.system.a {
        println!("  [ {:>10.3} {:>10.3} {:>10.3} ]", row[0], row[1], row[2]);
    }
    let b = solution.system.b;
    println!("Vector B: [ {} {} {} ]", b[0], b[1], b[2]);
    println!("det(A) = {:.6e}", solution.determinant);

    println!("\nMesh currents:");
    for interpretation in interpret_currents(&solution.currents) {
        println!(
            "  {} = {:>12.6} A   {}",
            interpretation.mesh.current_label(),
            interpretation.current,
            interpretation
        );
    }

    for notice in &solution.notices {
        println!("\nwarning: {}", notice);
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Command::Solve { params, json } => {
            let (values, solver) = params.resolve()?;

            if json {
                let response = api::respond(&values, &solver);
                println!("{}", serde_json::to_string_pretty(&response.body)?);
                return Ok(if response.is_success() {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::FAILURE
                });
            }

            let solution = solver.solve(&values)?;
            for notice in &solution.notices {
                tracing::warn!(%notice, "implausible result");
            }
            print_report(&values, &solution);
        }

        Command::Preset { name, json } => {
            let values = name.parse::<Preset>()?.parameters();
            if json {
                println!("{}", serde_json::to_string_pretty(&values)?);
            } else {
                for (name, value) in values.iter() {
                    println!("{} = {}", name, value);
                }
            }
        }

        Command::Diagram { params, output } => {
            let (values, _) = params.resolve()?;
            let svg = diagram::render_svg(&values);
            match output {
                Some(path) => {
                    std::fs::write(&path, svg).map_err(|source| MeshError::FileWriteError {
                        path: path.display().to_string(),
                        source,
                    })?;
                    tracing::info!(path = %path.display(), "wrote schematic");
                }
                None => print!("{}", svg),
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
