use anyhow::{anyhow, Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use presence_core::prelude::*;
use presence_core::test_harness::{run_simulator, SimulatorConfig};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod render;

fn cli() -> Command {
    let scenario = Arg::new("scenario")
        .long("scenario")
        .required(true)
        .help("Scenario key, e.g. client-negotiation");
    let json = Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Output as JSON");

    Command::new("presence")
        .version(presence_core::VERSION)
        .about("Executive presence training session driver")
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Session configuration (TOML)"),
        )
        .subcommand_required(true)
        .subcommand(
            Command::new("catalog")
                .about("List the available scenarios")
                .arg(json.clone()),
        )
        .subcommand(
            Command::new("walk")
                .about("Select a scenario and print every page along the suggested path")
                .arg(scenario.clone())
                .arg(json.clone()),
        )
        .subcommand(
            Command::new("score")
                .about("Record one attempt's scores and print the resulting trajectory")
                .arg(scenario.clone())
                .arg(
                    Arg::new("shape")
                        .long("shape")
                        .required(true)
                        .help("presence | stage"),
                )
                .arg(
                    Arg::new("attempt")
                        .long("attempt")
                        .required(true)
                        .value_parser(value_parser!(usize))
                        .help("1-based attempt number"),
                )
                .arg(
                    Arg::new("values")
                        .long("values")
                        .required(true)
                        .allow_hyphen_values(true)
                        .help("Comma-separated scores in label order"),
                ),
        )
        .subcommand(
            Command::new("growth")
                .about("Print the growth trajectory of a scenario")
                .arg(scenario)
                .arg(json),
        )
        .subcommand(
            Command::new("simulate")
                .about("Run the interaction simulator")
                .arg(
                    Arg::new("operations")
                        .long("ops")
                        .default_value("10000")
                        .value_parser(value_parser!(u64))
                        .help("Number of operations to simulate"),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .default_value("42")
                        .value_parser(value_parser!(u64))
                        .help("Random seed for reproducibility"),
                )
                .arg(
                    Arg::new("stop-on-violation")
                        .long("stop-on-violation")
                        .action(ArgAction::SetTrue)
                        .help("Stop simulation on first violation"),
                ),
        )
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "presence=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(path: Option<&Path>) -> Result<SessionConfig> {
    let Some(path) = path else {
        return Ok(SessionConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = SessionConfig::from_toml_str(&raw)
        .with_context(|| format!("invalid config {}", path.display()))?;
    tracing::debug!(path = %path.display(), weeks = config.weeks, "loaded config");
    Ok(config)
}

fn parse_values(raw: &str) -> Result<Vec<f64>> {
    raw.split(',')
        .map(|v| {
            v.trim()
                .parse::<f64>()
                .with_context(|| format!("not a number: {v:?}"))
        })
        .collect()
}

fn scenario_arg(args: &ArgMatches) -> Result<ScenarioKey> {
    let name = args
        .get_one::<String>("scenario")
        .ok_or_else(|| anyhow!("--scenario is required"))?;
    Ok(name.parse::<ScenarioKey>()?)
}

fn print_view(view: &PageView, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(view)?);
    } else {
        print!("{}", render::page(view));
    }
    Ok(())
}

fn catalog(session: &SessionState, json: bool) -> Result<()> {
    print_view(&session.current_view()?, json)
}

fn walk(session: &mut SessionState, key: ScenarioKey, json: bool) -> Result<()> {
    session.select_scenario(key.as_str())?;
    for page in Page::ALL {
        session.navigate(page)?;
        if !json {
            println!("== {page} ==");
        }
        print_view(&session.current_view()?, json)?;
        println!();
    }
    session.go_back();
    Ok(())
}

fn score(session: &mut SessionState, args: &ArgMatches) -> Result<()> {
    let key = scenario_arg(args)?;
    let shape = args
        .get_one::<String>("shape")
        .ok_or_else(|| anyhow!("--shape is required"))?
        .parse::<VectorShape>()
        .map_err(|e| anyhow!(e))?;
    let number = *args
        .get_one::<usize>("attempt")
        .ok_or_else(|| anyhow!("--attempt is required"))?;
    let attempt = AttemptIndex::new(number)
        .ok_or_else(|| anyhow!("attempt numbers start at 1"))?;
    let values = parse_values(
        args.get_one::<String>("values")
            .ok_or_else(|| anyhow!("--values is required"))?,
    )?;

    session.set_score_vector(key, shape, attempt, &values)?;
    if let Some(notice) = session.notice() {
        println!("note: {}", notice.message());
    }
    let saved = session.score_vector(key, shape, attempt)?;
    println!(
        "{key} {shape} attempt {attempt}: {:?} (mean {:.3})",
        saved.values(),
        saved.composite()
    );
    print!("{}", render::trajectory_table(&session.trajectory(key)?));
    Ok(())
}

fn growth(session: &mut SessionState, key: ScenarioKey, json: bool) -> Result<()> {
    session.select_scenario(key.as_str())?;
    session.navigate(Page::Growth)?;
    print_view(&session.current_view()?, json)
}

fn simulate(config: SessionConfig, args: &ArgMatches) -> Result<bool> {
    let operations = *args
        .get_one::<u64>("operations")
        .ok_or_else(|| anyhow!("--ops has a default"))?;
    let seed = *args
        .get_one::<u64>("seed")
        .ok_or_else(|| anyhow!("--seed has a default"))?;

    println!("Running session simulator...");
    println!("Operations: {operations}");
    println!("Seed: {seed}");
    println!();

    let report = run_simulator(SimulatorConfig {
        seed,
        total_operations: operations,
        session: config,
        stop_on_first_violation: args.get_flag("stop-on-violation"),
        ..Default::default()
    })?;
    println!("{}", report.generate_text());
    Ok(report.passed())
}

fn main() -> Result<()> {
    init_tracing();

    let matches = cli().get_matches();
    let config = load_config(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?;
    let mut session = SessionState::with_config(config.clone())?;

    match matches.subcommand() {
        Some(("catalog", args)) => catalog(&session, args.get_flag("json"))?,
        Some(("walk", args)) => walk(&mut session, scenario_arg(args)?, args.get_flag("json"))?,
        Some(("score", args)) => score(&mut session, args)?,
        Some(("growth", args)) => {
            growth(&mut session, scenario_arg(args)?, args.get_flag("json"))?;
        }
        Some(("simulate", args)) => {
            if !simulate(config, args)? {
                std::process::exit(1);
            }
        }
        _ => unreachable!("subcommand is required"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn cli_definition_is_consistent() {
        cli().debug_assert();
    }

    #[test]
    fn missing_config_means_defaults() {
        assert_eq!(load_config(None).unwrap(), SessionConfig::default());
    }

    #[test]
    fn config_file_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "weeks = 8\ngranularity = \"whole\"").unwrap();
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.weeks, 8);
    }

    #[test]
    fn bad_config_names_the_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "weeks = 1").unwrap();
        let err = load_config(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("invalid config"));
    }

    #[test]
    fn values_parse_from_csv() {
        assert_eq!(parse_values("11, -2,5").unwrap(), vec![11.0, -2.0, 5.0]);
        assert!(parse_values("1,two,3").is_err());
    }

    #[test]
    fn score_subcommand_parses() {
        let matches = cli()
            .try_get_matches_from([
                "presence",
                "score",
                "--scenario",
                "board-update",
                "--shape",
                "stage",
                "--attempt",
                "1",
                "--values",
                "-1,5,12",
            ])
            .unwrap();
        let (name, args) = matches.subcommand().unwrap();
        assert_eq!(name, "score");
        let mut session = SessionState::new();
        score(&mut session, args).unwrap();
        assert_eq!(
            session
                .score_vector(ScenarioKey::BoardUpdate, VectorShape::Stage, AttemptIndex::FIRST)
                .unwrap()
                .values(),
            &[0.0, 5.0, 10.0]
        );
    }
}
