use std::path::PathBuf;

use chrono::{Local, NaiveDate, Utc};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use playsync::config::{Config, PathsConfig};
use playsync::services::{self, document};

#[derive(Parser)]
#[command(name = "playsync")]
#[command(about = "Sync playing group scores, bots, suggestions and conversations into the dashboard document")]
struct Args {
    /// Workspace root holding `memory/` (resets every derived path)
    #[arg(long)]
    workspace: Option<PathBuf>,

    /// Output document path
    #[arg(long)]
    output: Option<PathBuf>,

    /// Leave out the snapshot day's daily log to avoid counting it twice
    #[arg(long)]
    exclude_snapshot_day: bool,

    /// Day the snapshot covers (YYYY-MM-DD), used with --exclude-snapshot-day
    #[arg(long)]
    snapshot_date: Option<NaiveDate>,

    /// Print the document to stdout instead of writing the output file
    #[arg(long)]
    print: bool,
}

/// Command-line flags take precedence over the environment.
fn apply_args(config: &mut Config, args: &Args) {
    if let Some(workspace) = &args.workspace {
        config.paths = PathsConfig::rooted_at(workspace);
    }
    if let Some(output) = &args.output {
        config.paths.output = output.clone();
    }
    if args.exclude_snapshot_day {
        config.scoring.exclude_snapshot_day = true;
    }
    if args.snapshot_date.is_some() {
        config.scoring.snapshot_date = args.snapshot_date;
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "playsync=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = Config::from_env();
    apply_args(&mut config, &args);

    if args.print {
        let assembled = services::DocumentAssembler::new(&config)
            .assemble(Utc::now(), Local::now().date_naive());
        document::log_summary(&assembled);
        println!("{}", document::render_document(&assembled)?);
        return Ok(());
    }

    if let Err(e) = services::sync(&config) {
        tracing::error!("Sync failed: {}", e);
        return Err(e.into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("playsync").chain(argv.iter().copied())).unwrap()
    }

    fn env_config() -> Config {
        let mut config = Config::for_workspace("/srv/env");
        config.paths.output = PathBuf::from("/srv/env/out.json");
        config.scoring.snapshot_date = NaiveDate::from_ymd_opt(2026, 1, 1);
        config
    }

    #[test]
    fn test_no_flags_keep_env_config() {
        let mut config = env_config();
        apply_args(&mut config, &parse(&[]));

        assert_eq!(config.paths.workspace, Path::new("/srv/env"));
        assert_eq!(config.paths.output, Path::new("/srv/env/out.json"));
        assert!(!config.scoring.exclude_snapshot_day);
        assert_eq!(config.scoring.snapshot_date, NaiveDate::from_ymd_opt(2026, 1, 1));
    }

    #[test]
    fn test_workspace_flag_reroots_every_path() {
        let mut config = env_config();
        apply_args(&mut config, &parse(&["--workspace", "/tmp/ws"]));

        assert_eq!(config.paths.workspace, Path::new("/tmp/ws"));
        assert!(config.paths.scores.starts_with("/tmp/ws"));
        assert!(config.paths.output.starts_with("/tmp/ws"));
    }

    #[test]
    fn test_output_flag_wins_over_workspace_default() {
        let mut config = env_config();
        apply_args(
            &mut config,
            &parse(&["--workspace", "/tmp/ws", "--output", "/tmp/board.json"]),
        );

        assert!(config.paths.daily_dir.starts_with("/tmp/ws"));
        assert_eq!(config.paths.output, Path::new("/tmp/board.json"));
    }

    #[test]
    fn test_snapshot_flags_override_env() {
        let mut config = env_config();
        let args = parse(&["--exclude-snapshot-day", "--snapshot-date", "2026-03-02", "--print"]);
        assert!(args.print);
        apply_args(&mut config, &args);

        assert!(config.scoring.exclude_snapshot_day);
        assert_eq!(config.scoring.snapshot_date, NaiveDate::from_ymd_opt(2026, 3, 2));
    }

    #[test]
    fn test_invalid_snapshot_date_is_rejected() {
        let result = Args::try_parse_from(["playsync", "--snapshot-date", "March 2nd"]);
        assert!(result.is_err());
    }
}
