//! relwait - wait for a Helm release to reach a terminal status
//!
//! Progress goes to stderr; the final release record is printed to stdout
//! as a single JSON object.

use clap::{CommandFactory, Parser};
use console::style;
use relwait_core::{HelmInspector, KnownStatus, PollRequest, ReleaseSnapshot};
use tracing_subscriber::EnvFilter;

mod error;
mod exit_codes;

use error::{CliError, Result};

#[derive(Parser, Debug)]
#[command(name = "relwait")]
#[command(author = "Relwait Contributors")]
#[command(version)]
#[command(about = "Wait for a Helm release to reach a terminal status", long_about = None)]
struct Cli {
    /// Release name to poll for
    #[arg(short, long)]
    release: Option<String>,

    /// Namespace of the release
    #[arg(short, long, env = "HELM_NAMESPACE", default_value = "default")]
    namespace: String,

    /// The timeout in seconds
    #[arg(short, long, default_value_t = 300, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: u64,

    /// The polling interval in seconds
    #[arg(short, long, default_value_t = 5, value_parser = clap::value_parser!(u64).range(1..))]
    interval: u64,

    /// Enable debug output (logs every helm invocation)
    #[arg(long)]
    debug: bool,

    /// Helm executable to run
    #[arg(long, env = "HELM_BIN", default_value = "helm")]
    helm_bin: String,

    /// Kubeconfig context to inspect
    #[arg(long, env = "HELM_KUBECONTEXT")]
    kube_context: Option<String>,

    /// Pretty-print the release record
    #[arg(long)]
    pretty: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    miette::set_panic_hook();

    let cli = Cli::parse();

    if cli.debug {
        // SAFETY: We're the only thread at this point (start of main)
        unsafe { std::env::set_var("RUST_BACKTRACE", "1") };
    }
    init_logging(cli.debug);

    let Some(release) = cli.release.clone().filter(|name| !name.is_empty()) else {
        eprintln!(
            "{}",
            style("You must specify a release name to poll for!").red().bold()
        );
        eprintln!("{}", Cli::command().render_help());
        std::process::exit(exit_codes::SUCCESS);
    };

    if let Err(err) = run(cli, release).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

/// Log to stderr so stdout only ever carries the release record
fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_ansi(console::colors_enabled_stderr())
        .with_target(false)
        .init();
}

async fn run(cli: Cli, release: String) -> Result<()> {
    let request = PollRequest::new(release, cli.namespace, cli.timeout, cli.interval)?;
    let inspector = HelmInspector::new()
        .with_program(cli.helm_bin)
        .with_kube_context(cli.kube_context);

    tracing::debug!(
        helm = inspector.program(),
        release = %request.release_name,
        namespace = %request.namespace,
        max_attempts = request.max_attempts(),
        interval = ?request.interval(),
        "waiting for release"
    );

    let snapshot = relwait_core::poll(&inspector, &request).await?;
    match KnownStatus::parse(&snapshot.status) {
        Some(status) if status.is_success() => {
            tracing::info!("{} is {} at revision {}", request.release_name, status, snapshot.revision)
        }
        Some(status) => tracing::warn!(
            "{} settled as {} at revision {}",
            request.release_name,
            status,
            snapshot.revision
        ),
        None => {}
    }
    println!("{}", render(&snapshot, cli.pretty)?);
    Ok(())
}

fn render(snapshot: &ReleaseSnapshot, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(snapshot)
    } else {
        serde_json::to_string(snapshot)
    };
    json.map_err(CliError::internal)
}
