use clap::Parser;
use eyre::{Result, WrapErr};
use log::info;

use judge_scheduler::config::{Cli, Command, ScheduleArgs};
use judge_scheduler::display::{print_assignments, print_summary, print_workload};
use judge_scheduler::example::{example_games, example_judges, write_example_files};
use judge_scheduler::export::{assignment_rows, export_reports, workload_rows};
use judge_scheduler::parser::{load_games, load_judges};
use judge_scheduler::schedule::schedule_judges;
use judge_scheduler::web;

fn setup_logging() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

fn run_schedule(args: ScheduleArgs) -> Result<()> {
    let (judges, games) = match (&args.judges, &args.games) {
        (Some(judges_path), Some(games_path)) if !args.example => {
            let judges = load_judges(judges_path)
                .wrap_err_with(|| format!("Failed to load judges from {}", judges_path.display()))?;
            let games = load_games(games_path)
                .wrap_err_with(|| format!("Failed to load games from {}", games_path.display()))?;
            (judges, games)
        }
        _ => {
            info!("Using example data");
            (example_judges(), example_games())
        }
    };

    print_summary(&judges, &games);

    println!("\n=== Running Scheduler ===");
    let schedule = schedule_judges(&judges, &games).wrap_err("Scheduling failed")?;

    print_assignments(&assignment_rows(&schedule, &judges));
    print_workload(&workload_rows(&schedule));

    if let Some(out_dir) = &args.out_dir {
        let paths = export_reports(&schedule, &judges, out_dir, args.format)
            .wrap_err("Failed to write reports")?;
        println!("\nReports saved to:");
        for path in paths {
            println!("  - {}", path.display());
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();
    let cli = Cli::parse();

    match cli.command {
        Command::Schedule(args) => run_schedule(args)?,
        Command::Example { out_dir } => {
            let paths = write_example_files(&out_dir).wrap_err("Failed to write example data")?;
            println!("Example data saved to:");
            for path in paths {
                println!("  - {}", path.display());
            }
        }
        Command::Web(config) => {
            println!("Access the site at http://localhost:{}", config.port);
            web::start_server(config).await.wrap_err("Web server failed")?;
        }
    }

    Ok(())
}
