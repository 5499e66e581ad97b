//! rendezvous-ctl — command-line client for the rendezvous server.

mod cmd;

use std::time::Duration;

use anyhow::{Context, Result, bail};

use rendezvous_core::{SESSION_ID_LEN, generate_session_id};

const DEFAULT_URL: &str = "http://127.0.0.1:3000/";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Peers,
    Register {
        address: String,
        session_id: Option<String>,
        /// Keepalive period; `None` registers once.
        interval: Option<Duration>,
    },
    Help,
}

#[derive(Debug, PartialEq, Eq)]
struct Invocation {
    url: String,
    command: Command,
}

fn parse_args(args: &[String]) -> Result<Invocation> {
    let mut url = DEFAULT_URL.to_string();
    let mut session_id = None;
    let mut interval = None;
    let mut remaining: Vec<&str> = Vec::new();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--url" => {
                i += 1;
                url = args.get(i).context("--url requires a value")?.clone();
            }
            "--session" => {
                i += 1;
                let id = args.get(i).context("--session requires a value")?;
                if id.is_empty() {
                    bail!("--session must not be empty");
                }
                session_id = Some(id.clone());
            }
            "--interval" => {
                i += 1;
                let raw = args.get(i).context("--interval requires a value")?;
                let secs: u64 = raw
                    .parse()
                    .with_context(|| format!("--interval must be whole seconds, got {:?}", raw))?;
                if secs == 0 {
                    bail!("--interval must be at least 1 second");
                }
                interval = Some(Duration::from_secs(secs));
            }
            "--keepalive" => {
                interval.get_or_insert(cmd::register::DEFAULT_INTERVAL);
            }
            other => remaining.push(other),
        }
        i += 1;
    }

    let command = match remaining.as_slice() {
        ["peers"] | [] if interval.is_none() => Command::Peers,
        ["register", address] => Command::Register {
            address: address.to_string(),
            session_id,
            interval,
        },
        ["peers"] | [] => bail!("--interval and --keepalive only apply to register"),
        ["help"] | ["--help"] | ["-h"] => Command::Help,
        other => bail!("unknown command: {}", other.join(" ")),
    };

    Ok(Invocation { url, command })
}

fn print_usage() {
    println!("Usage: rendezvous-ctl [--url <url>] <command>");
    println!();
    println!("Commands:");
    println!("  peers                                List live peer addresses");
    println!("  register <address> [--session <id>]  Register an address once");
    println!("  register <address> --keepalive       Re-register periodically until Ctrl-C");
    println!();
    println!("Options:");
    println!("  --url <url>      Registry URL (default: {})", DEFAULT_URL);
    println!(
        "  --session <id>   Session id to register under (default: random, {} chars)",
        SESSION_ID_LEN
    );
    println!(
        "  --keepalive      Re-register every {}s and print live peers",
        cmd::register::DEFAULT_INTERVAL.as_secs()
    );
    println!("  --interval <s>   Re-register every <s> seconds (implies --keepalive)");
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let invocation = match parse_args(&args) {
        Ok(inv) => inv,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    match invocation.command {
        Command::Peers => cmd::peers::cmd_peers(&invocation.url).await,
        Command::Register {
            address,
            session_id,
            interval,
        } => {
            let session_id = session_id.unwrap_or_else(|| generate_session_id(SESSION_ID_LEN));
            match interval {
                Some(every) => {
                    cmd::register::cmd_keepalive(&invocation.url, &address, &session_id, every)
                        .await
                }
                None => cmd::register::cmd_register(&invocation.url, &address, &session_id).await,
            }
        }
        Command::Help => {
            print_usage();
            Ok(())
        }
    }
}
