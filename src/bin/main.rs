//! walletlink CLI - drive the connection adapter against the in-memory SDK
//!
//!   walletlink demo [--method <m>] [--needs-recovery] [--passcode <p>] [--user <id>]
//!   walletlink repl
//!
//! REPL commands:
//!   login [method]                  → email | sms | apple | google
//!   monitor [provider]              → defaults to the configured provider tag
//!   recover <method> <credential>   → user-passcode | google-drive | icloud
//!   logout | state | help | quit
//!
//! Output format:
//!   --json     One JSON object per event: {"event": ..., "message": ..., "failure": bool}
//!   (default)  Status line text; failures go to stderr

use anyhow::{bail, Context, Result};
use serde_json::{json, Value};
use std::env;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use walletlink::logging::init_logging;
use walletlink::{
    AdapterConfig, ConnectionResult, ConnectionState, LoginMethod, MemorySdk, RecoveryMethod,
    StatusEvent, WalletConnectionAdapter,
};

#[tokio::main]
async fn main() {
    init_logging();

    let args: Vec<String> = env::args().collect();
    let opts = match ParsedArgs::parse(&args[1..]) {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("error: {e:#}");
            print_usage();
            std::process::exit(2);
        }
    };

    if opts.help {
        print_usage();
        return;
    }
    if opts.version {
        println!("walletlink {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    let result = match opts.command.as_deref() {
        Some("demo") => cmd_demo(&opts).await,
        Some("repl") => cmd_repl(&opts).await,
        Some(cmd) => Err(anyhow::anyhow!("Unknown command: {cmd}")),
        None => {
            print_usage();
            return;
        }
    };

    if let Err(e) = result {
        if opts.json {
            eprintln!("{}", json!({"error": format!("{e:#}")}));
        } else {
            eprintln!("error: {e:#}");
        }
        std::process::exit(1);
    }
}

#[derive(Default)]
struct ParsedArgs {
    command: Option<String>,
    method: Option<LoginMethod>,
    passcode: Option<String>,
    user: Option<String>,
    needs_recovery: bool,
    json: bool,
    help: bool,
    version: bool,
}

impl ParsedArgs {
    fn parse(args: &[String]) -> Result<Self> {
        let mut opts = ParsedArgs::default();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "-h" | "--help" => opts.help = true,
                "-V" | "--version" => opts.version = true,
                "--json" => opts.json = true,
                "--needs-recovery" => opts.needs_recovery = true,
                "--method" => {
                    let value = iter.next().context("--method needs a value")?;
                    opts.method = Some(LoginMethod::from_str(value).with_context(|| format!("unknown login method: {value}"))?);
                }
                "--passcode" => opts.passcode = Some(iter.next().context("--passcode needs a value")?.clone()),
                "--user" => opts.user = Some(iter.next().context("--user needs a value")?.clone()),
                flag if flag.starts_with('-') => bail!("unknown flag: {flag}"),
                cmd if opts.command.is_none() => opts.command = Some(cmd.to_string()),
                extra => bail!("unexpected argument: {extra}"),
            }
        }
        Ok(opts)
    }
}

fn print_usage() {
    eprintln!(
        "walletlink - embedded wallet connection adapter (in-memory SDK)

USAGE:
    walletlink [--json] demo [--method <m>] [--needs-recovery] [--passcode <p>] [--user <id>]
    walletlink [--json] repl

ENVIRONMENT:
    WALLETLINK_PROVIDER, WALLETLINK_LOGO, WALLETLINK_LOGIN_METHOD, WALLETLINK_LOG_JSON, RUST_LOG"
    );
}

/// Prints events and results as text or JSON lines.
#[derive(Clone, Copy)]
struct Printer {
    json: bool,
}

impl Printer {
    fn event(&self, event: StatusEvent) {
        if self.json {
            let mut value = serde_json::to_value(&event).unwrap_or(Value::Null);
            if let Value::Object(map) = &mut value {
                map.insert("message".into(), Value::String(event.to_string()));
                map.insert("failure".into(), Value::Bool(event.is_failure()));
            }
            println!("{value}");
        } else if event.is_failure() {
            eprintln!("{event}");
        } else {
            println!("{event}");
        }
    }

    fn result(&self, result: ConnectionResult) {
        match serde_json::to_string(&result) {
            Ok(line) => println!("{line}"),
            Err(e) => eprintln!("result encode: {e}"),
        }
    }
}

fn build(opts: &ParsedArgs) -> (MemorySdk, WalletConnectionAdapter) {
    let mut sdk = MemorySdk::new().login_as(opts.user.clone().unwrap_or_else(|| "did:memory:demo".into()));
    if opts.needs_recovery {
        sdk = sdk.with_wallet_needing_recovery();
    }
    if let Some(passcode) = &opts.passcode {
        sdk = sdk.with_passcode(passcode.clone());
    }
    let mut config = AdapterConfig::from_env();
    if let Some(method) = opts.method {
        config = config.with_default_login_method(method);
    }
    let adapter = WalletConnectionAdapter::with_config(Arc::new(sdk.clone()), config);
    (sdk, adapter)
}

async fn cmd_demo(opts: &ParsedArgs) -> Result<()> {
    let (_sdk, adapter) = build(opts);
    let out = Printer { json: opts.json };
    let on_status = move |e: StatusEvent| out.event(e);
    let on_result = move |r: ConnectionResult| out.result(r);
    let provider = adapter.provider().to_string();

    adapter.login_default(&on_status).await;
    let mut connected = adapter.monitor_connection(&provider, &on_status, &on_result).await;

    if connected.is_none() && adapter.connection_state().await == Some(ConnectionState::NeedsRecovery) {
        let passcode = opts.passcode.clone().unwrap_or_default();
        connected = adapter.recover_wallet(RecoveryMethod::UserPasscode, &passcode, &on_status, &on_result).await;
    }
    if connected.is_some() {
        // A second pass sees the existing wallet and does not create again.
        adapter.monitor_connection(&provider, &on_status, &on_result).await;
    }

    adapter.logout(&on_status).await;
    Ok(())
}

async fn cmd_repl(opts: &ParsedArgs) -> Result<()> {
    let (_sdk, adapter) = build(opts);
    let out = Printer { json: opts.json };
    // Last wallet address announced by any event, shown by `state`.
    let last_address = Arc::new(Mutex::new(None::<String>));
    let seen = last_address.clone();
    let on_status = move |e: StatusEvent| {
        if let Some(address) = e.address() {
            *seen.lock().unwrap_or_else(|p| p.into_inner()) = Some(address.to_string());
        }
        out.event(e)
    };
    let on_result = move |r: ConnectionResult| out.result(r);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line.context("stdin")?,
            _ = tokio::signal::ctrl_c() => {
                debug!("interrupted");
                break;
            }
        };
        let Some(line) = line else { break };
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            [] => continue,
            ["quit"] | ["exit"] => break,
            ["help"] => print_usage(),
            ["login"] => adapter.login_default(&on_status).await,
            ["login", method] => match LoginMethod::from_str(method) {
                Some(method) => adapter.login(method, &on_status).await,
                None => eprintln!("unknown login method: {method}"),
            },
            ["monitor"] => {
                let provider = adapter.provider().to_string();
                adapter.monitor_connection(&provider, &on_status, &on_result).await;
            }
            ["monitor", provider] => {
                adapter.monitor_connection(provider, &on_status, &on_result).await;
            }
            ["recover", method, credential] => match RecoveryMethod::from_str(method) {
                Some(method) => {
                    adapter.recover_wallet(method, credential, &on_status, &on_result).await;
                }
                None => eprintln!("unknown recovery method: {method}"),
            },
            ["logout"] => adapter.logout(&on_status).await,
            ["state"] => {
                let state = json!({
                    "user": adapter.user().map(|u| u.id),
                    "ready": adapter.is_ready(),
                    "wallet": adapter.connection_state().await.map(|s| format!("{s:?}")),
                    "address": last_address.lock().unwrap_or_else(|p| p.into_inner()).clone(),
                });
                println!("{state}");
            }
            _ => eprintln!("unknown command: {line} (try `help`)"),
        }
    }
    Ok(())
}
