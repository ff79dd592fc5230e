use clap::Parser;
use ifstate_check::config::AppConfig;
use ifstate_check::poller::{SnmpPoller, SnmpTarget};
use ifstate_check::probe::run_check;
use ifstate_check::report::{EXIT_UNKNOWN, Report, failure_exit_code};
use ifstate_check::version;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

/// Classify router interfaces by description suffix (CORE, CUST, ACCESS, FREE) over SNMP.
#[derive(Parser, Debug)]
#[command(name = "check_ifstate")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Device to poll
    host: String,

    /// SNMPv2c community
    community: String,

    /// Print one trace line per classified interface
    #[arg(short = 'd', long)]
    debug: bool,

    /// TOML config file (falls back to $CONFIG_FILE, then built-in defaults)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,
}

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let start = Instant::now();

    // clap exits 2 on usage errors, which Nagios would read as CRITICAL.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(EXIT_UNKNOWN)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    // stdout belongs to the plugin output.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::info!(probe = %version::user_agent(), host = %args.host, "starting interface check");

    let app_config = match AppConfig::load(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            println!("UNKNOWN: configuration error: {e:#}");
            return ExitCode::from(EXIT_UNKNOWN);
        }
    };

    let poller = SnmpPoller::new(
        SnmpTarget {
            host: args.host,
            port: app_config.snmp.port,
            community: args.community,
        },
        app_config.snmp_settings(),
    );
    let filter = app_config.interface_filter();

    match run_check(&poller, &filter, args.debug).await {
        Ok(outcome) => {
            for line in &outcome.trace {
                println!("{line}");
            }
            let report = Report::new(&outcome.classifier, start.elapsed());
            print!("{}", report.render());
            ExitCode::from(report.exit_code())
        }
        Err(e) => {
            tracing::warn!(error = %e, "interface check aborted");
            println!("{e}");
            ExitCode::from(failure_exit_code(&e))
        }
    }
}
