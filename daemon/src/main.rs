//! OIG daemon: runs the election node or issues a single operator command.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use oig_election::{ElectionDraft, ElectionStatus};
use oig_node::{init_logging, ElectionNode, LogFormat, NodeConfig};
use oig_store::Schedule;
use oig_types::{AccountName, BallotId, Timestamp};
use oig_utils::describe_deadline;

#[derive(Parser)]
#[command(name = "oig-daemon", about = "Election orchestrator for a token-weighted ballot service")]
struct Cli {
    /// Path to a TOML configuration file. File settings are the base;
    /// CLI flags and env vars override them.
    #[arg(long, env = "OIG_CONFIG")]
    config: Option<PathBuf>,

    /// Data directory for the election store.
    #[arg(long, env = "OIG_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Operator account that owns the election.
    #[arg(long, env = "OIG_OPERATOR")]
    operator: Option<AccountName>,

    /// Base URL of the action gateway.
    #[arg(long, env = "OIG_ENDPOINT")]
    endpoint: Option<String>,

    /// Seconds between automatic advance attempts.
    #[arg(long, env = "OIG_ADVANCE_INTERVAL")]
    advance_interval: Option<u64>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "OIG_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "OIG_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Run the node and advance the election on schedule.
    Run,
    /// Register the operator with the ballot service.
    Init,
    /// Schedule a new election. Times are unix seconds.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        /// Link to further details (IPFS or URL).
        #[arg(long, default_value = "")]
        content: String,
        #[arg(long)]
        nomination_open: u64,
        #[arg(long)]
        nomination_close: u64,
        #[arg(long)]
        voting_open: u64,
        #[arg(long)]
        voting_close: u64,
    },
    /// Cancel an election whose ballot does not exist yet.
    Cancel,
    /// End a concluded election and start cleanup.
    End,
    /// Run one cleanup pass.
    Cleanup,
    /// Evaluate the step function once.
    Advance,
    /// Replace the ballot id used for the next election.
    SetBallotId { id: u64 },
    /// Show the election state.
    Status {
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// List the current nominations as JSON.
    Nominations,
    /// Print the effective configuration as TOML.
    ShowConfig,
}

fn load_config(cli: &Cli) -> anyhow::Result<NodeConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let config = NodeConfig::from_toml_file(path)
                .with_context(|| format!("loading {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config file");
            config
        }
        None => NodeConfig::default(),
    };

    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(operator) = &cli.operator {
        config.operator = Some(operator.clone());
    }
    if let Some(endpoint) = &cli.endpoint {
        config.service.endpoint = endpoint.clone();
    }
    if let Some(secs) = cli.advance_interval {
        config.advance_interval_secs = secs;
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    config.validate()?;
    Ok(config)
}

fn print_status(status: &ElectionStatus) {
    let now = Timestamp::now();
    println!("operator:     {}", status.operator);
    println!("state:        {} ({})", status.state, status.state_code);
    println!("ballot:       {}", status.ballot_id);
    if !status.title.is_empty() {
        println!("title:        {}", status.title);
    }
    println!(
        "nominations:  {} ({} accepted)",
        status.nomination_count, status.accepted_nominees
    );
    println!(
        "voters:       {} pending, {} synced",
        status.pending_voters, status.synced_voters
    );
    if let Some(deadline) = status.next_deadline {
        println!("next step:    {} ({})", deadline, describe_deadline(deadline, now));
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    if let Command::ShowConfig = cli.command {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    if let Command::Run = cli.command {
        init_logging(config.log_format, &config.log_level);
        let node = ElectionNode::open(config)?;
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .context("building tokio runtime")?;
        runtime.block_on(node.run())?;
        return Ok(());
    }

    oig_utils::init_tracing(&config.log_level);
    let node = ElectionNode::open(config)?;
    let service = node.service();
    let operator = service.operator().clone();

    match cli.command {
        Command::Init => {
            let state = service.initialize(&operator)?;
            println!("initialized; state {state}");
        }
        Command::Create {
            title,
            description,
            content,
            nomination_open,
            nomination_close,
            voting_open,
            voting_close,
        } => {
            let draft = ElectionDraft {
                title,
                description,
                content,
                schedule: Schedule {
                    nomination_open: Timestamp::new(nomination_open),
                    nomination_close: Timestamp::new(nomination_close),
                    voting_open: Timestamp::new(voting_open),
                    voting_close: Timestamp::new(voting_close),
                },
            };
            let state = service.create(&operator, draft)?;
            let status = service.status()?;
            println!("election created with ballot {}; state {state}", status.ballot_id);
        }
        Command::Cancel => {
            let state = service.cancel(&operator)?;
            println!("election cancelled; state {state}");
        }
        Command::End => {
            let state = service.end_election(&operator)?;
            println!("election ended; state {state}");
        }
        Command::Cleanup => {
            let state = service.cleanup(&operator)?;
            println!("cleanup pass done; state {state}");
        }
        Command::Advance => {
            let report = service.request_advance()?;
            if report.transitioned() {
                println!("advanced {} -> {}", report.from, report.to);
            } else if report.changed {
                println!("progress made; still {}", report.to);
            } else {
                println!("nothing due; state {}", report.to);
            }
        }
        Command::SetBallotId { id } => {
            let state = service.override_ballot_id(&operator, BallotId::new(id))?;
            println!("next election uses ballot {}; state {state}", BallotId::new(id));
        }
        Command::Status { json } => {
            let status = service.status()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                print_status(&status);
            }
        }
        Command::Nominations => {
            let nominations = service.nominations()?;
            println!("{}", serde_json::to_string_pretty(&nominations)?);
        }
        Command::Run | Command::ShowConfig => {}
    }
    Ok(())
}
