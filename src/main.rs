// --- Seatplan: asignación de asientos para exámenes ---

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use seatplan::algorithm::{PlanSummary, make_rng};
use seatplan::excel::{export_seating_plan, load_classrooms_excel, load_roster_excel};
use seatplan::{AppConfig, Session, run_server};

#[derive(Parser)]
#[command(name = "seatplan")]
#[command(about = "Asigna asientos de examen sin sentar juntos a compañeros del mismo año y rama")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inicia la API HTTP.
    Serve {
        /// Dirección de escucha (reemplaza SEATPLAN_BIND)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Genera un plan de asientos a partir de dos libros.
    Plan {
        /// Libro con columnas Enrollment, Name, Year, Branch
        #[arg(long)]
        students: PathBuf,
        /// Libro con columnas Classroom, Rows, Cols
        #[arg(long)]
        classrooms: PathBuf,
        /// Escribe el plan en este .xlsx (una hoja por sala)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Semilla para barajar (reemplaza SEATPLAN_SEED)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Muestra nombre, rama y año de un estudiante.
    Lookup {
        #[arg(long)]
        students: PathBuf,
        enrollment: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::from_env();

    match cli.command {
        Commands::Serve { bind } => {
            if let Some(b) = bind {
                config.bind = b;
            }
            run_server(config).await?;
        }
        Commands::Plan { students, classrooms, out, seed } => {
            let mut session = Session::new();
            let roster = load_roster_excel(&students).with_context(|| format!("loading roster {}", students.display()))?;
            session.set_roster(roster);
            let specs = load_classrooms_excel(&classrooms)
                .with_context(|| format!("loading classrooms {}", classrooms.display()))?;
            session.load_classrooms(specs);

            let mut rng = make_rng(seed.or(config.seed));
            let plan = session.plan(&mut rng)?.clone();
            for (name, grid) in plan.iter() {
                println!("Seating arrangement for {}:\n\n{}", name, grid);
            }
            if let Some(roster) = session.roster() {
                let summary = PlanSummary::from_plan(&plan, roster);
                println!("{}", serde_json::to_string_pretty(&summary)?);
            }
            if let Some(path) = out {
                export_seating_plan(&plan, &path)?;
                info!(path = %path.display(), "plan written");
            }
        }
        Commands::Lookup { students, enrollment } => {
            let mut session = Session::new();
            session.set_roster(load_roster_excel(&students)?);
            match session.lookup_student(&enrollment) {
                Some(info) => println!("{}", info),
                None => println!("Student {} not found.", enrollment),
            }
        }
    }
    Ok(())
}
