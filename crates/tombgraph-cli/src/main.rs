use anyhow::{anyhow, bail, Context};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use tombgraph_cli::{logging, run_demo, run_stress, Shell, StressConfig};
use tombgraph_core::GraphConfig;

fn cli() -> Command {
    Command::new("tombgraph")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Concurrent named-node graph with lazy reclaim of removed nodes")
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML file with compaction settings"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable debug logging"),
        )
        .subcommand(
            Command::new("run")
                .about("Execute create/connect/remove/show commands")
                .arg(
                    Arg::new("script")
                        .long("script")
                        .value_parser(value_parser!(PathBuf))
                        .help("Script file (reads stdin when omitted)"),
                ),
        )
        .subcommand(Command::new("demo").about("Remove 200 children and show the lazy cleanup"))
        .subcommand(
            Command::new("stress")
                .about("Run randomized concurrent schedules")
                .arg(
                    Arg::new("threads")
                        .long("threads")
                        .default_value("8")
                        .value_parser(value_parser!(usize))
                        .help("Number of concurrent workers"),
                )
                .arg(
                    Arg::new("operations")
                        .long("ops")
                        .default_value("10000")
                        .value_parser(value_parser!(usize))
                        .help("Operations per worker"),
                )
                .arg(
                    Arg::new("names")
                        .long("names")
                        .default_value("64")
                        .value_parser(value_parser!(usize))
                        .help("Size of the node name pool"),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .default_value("42")
                        .value_parser(value_parser!(u64))
                        .help("Random seed for reproducibility"),
                ),
        )
}

fn arg<T: Clone + Send + Sync + 'static>(args: &ArgMatches, id: &str) -> anyhow::Result<T> {
    args.get_one::<T>(id)
        .cloned()
        .ok_or_else(|| anyhow!("missing argument --{id}"))
}

fn load_config(matches: &ArgMatches) -> anyhow::Result<GraphConfig> {
    match matches.get_one::<PathBuf>("config") {
        Some(path) => GraphConfig::from_path(path)
            .with_context(|| format!("loading {}", path.display())),
        None => Ok(GraphConfig::default()),
    }
}

fn run_script(shell: &Shell, script: Option<&PathBuf>) -> anyhow::Result<()> {
    let stdout = io::stdout().lock();
    let summary = match script {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            shell.run(BufReader::new(file), stdout)?
        }
        None => shell.run(io::stdin().lock(), stdout)?,
    };
    tracing::info!(
        commands = summary.commands,
        failures = summary.failures,
        "script finished"
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();
    logging::init(matches.get_flag("verbose"))?;
    let config = load_config(&matches)?;

    match matches.subcommand() {
        Some(("demo", _)) => {
            let summary = run_demo(io::stdout().lock(), config)?;
            println!();
            println!(
                "Child slots of A: {} before cleanup, {} after",
                summary.slots_before, summary.slots_after
            );
        }
        Some(("stress", args)) => {
            let stress = StressConfig {
                threads: arg(args, "threads")?,
                operations_per_thread: arg(args, "operations")?,
                name_pool: arg(args, "names")?,
                seed: arg(args, "seed")?,
            };

            println!("Running stress test...");
            println!("Threads: {}", stress.threads);
            println!("Operations per thread: {}", stress.operations_per_thread);
            println!("Seed: {}", stress.seed);
            println!();

            let report = run_stress(&stress, config);
            println!("{}", report.generate_text());

            if !report.passed() {
                bail!("stress run observed {} malformed listings", report.malformed);
            }
        }
        Some(("run", args)) => run_script(&Shell::with_config(config), args.get_one::<PathBuf>("script"))?,
        _ => run_script(&Shell::with_config(config), None)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        cli().debug_assert();
    }

    #[test]
    fn stress_defaults_parse() {
        let matches = cli().get_matches_from(["tombgraph", "stress", "--threads", "2"]);
        let (_, args) = matches.subcommand().unwrap();
        assert_eq!(arg::<usize>(args, "threads").unwrap(), 2);
        assert_eq!(arg::<u64>(args, "seed").unwrap(), 42);
    }

    #[test]
    fn global_config_flag_after_subcommand() {
        let matches = cli().get_matches_from(["tombgraph", "demo", "--config", "g.toml"]);
        assert_eq!(
            matches.get_one::<PathBuf>("config"),
            Some(&PathBuf::from("g.toml"))
        );
    }
}
