// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! tokenrelay CLI
//!
//! Replays requests through the hook and exercises the relay by hand.

use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use tokenrelay::{
    CompletionGuard, Credential, HookConfig, InterceptedRequest, Matcher, NoopClipboard, Outcome,
    Relay, RelayClient, RelayResult, RelaySubmission, TokenCaptureHook,
};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "tokenrelay=info";

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(env::var("RUST_LOG").ok().as_deref()))
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    let options = match Options::parse(&args[2..]) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(1);
        }
    };

    match args[1].as_str() {
        "replay" => match options.positional.as_deref() {
            Some(url) => replay(url, &options).await,
            None => {
                eprintln!("Usage: tokenrelay replay <url> [-H 'Name: value']...");
                ExitCode::from(1)
            }
        },
        "submit" => match options.positional.as_deref() {
            Some(token) => submit(token, &options).await,
            None => {
                eprintln!("Usage: tokenrelay submit <token>");
                ExitCode::from(1)
            }
        },
        "check" => match options.positional.as_deref() {
            Some(url) => check(url, &options),
            None => {
                eprintln!("Usage: tokenrelay check <url>");
                ExitCode::from(1)
            }
        },
        "--help" | "-h" | "help" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "--version" | "-v" | "version" => {
            println!("tokenrelay {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            ExitCode::from(1)
        }
    }
}

/// `RUST_LOG` when set, otherwise `tokenrelay=info`
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    match rust_log.filter(|v| !v.trim().is_empty()) {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::new(DEFAULT_LOG_FILTER),
    }
}

fn print_usage() {
    println!(
        r#"tokenrelay - Credential capture hook

USAGE:
    tokenrelay <COMMAND> [OPTIONS]

COMMANDS:
    replay <url>    Run one request through the hook
    submit <token>  Relay a token directly
    check <url>     Show whether a URL is in scope
    help            Show this help message
    version         Show version information

OPTIONS:
    -H, --header 'Name: value'   Request header (replay, repeatable)
    -c, --config <file>          JSON config file
        --no-clipboard           Skip the clipboard write

ENVIRONMENT:
    TOKENRELAY_ENDPOINT   Relay endpoint (overrides config)
    TOKENRELAY_API_KEY    Relay API key (overrides config)
    RUST_LOG              Log filter

EXAMPLES:
    tokenrelay check https://api.example.com/remote-control/vehicle/status/VIN1
    tokenrelay replay https://api.example.com/remote-control/vehicle/status/VIN1 \
        -H 'Authorization: Bearer abc'
"#
    );
}

/// Parsed command-line options shared by all commands
#[derive(Debug, Default)]
struct Options {
    positional: Option<String>,
    headers: Vec<(String, String)>,
    config: Option<String>,
    no_clipboard: bool,
}

impl Options {
    fn parse(args: &[String]) -> anyhow::Result<Self> {
        let mut options = Options::default();
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "-H" | "--header" => {
                    let raw = iter.next().context("--header needs a value")?;
                    let (name, value) = raw
                        .split_once(':')
                        .with_context(|| format!("header '{}' is not 'Name: value'", raw))?;
                    options
                        .headers
                        .push((name.trim().to_string(), value.trim().to_string()));
                }
                "-c" | "--config" => {
                    options.config = Some(iter.next().context("--config needs a path")?.clone());
                }
                "--no-clipboard" => options.no_clipboard = true,
                other if options.positional.is_none() => {
                    options.positional = Some(other.to_string());
                }
                other => anyhow::bail!("Unexpected argument: {}", other),
            }
        }

        Ok(options)
    }

    fn load_config(&self) -> anyhow::Result<HookConfig> {
        let config = match &self.config {
            Some(path) => HookConfig::from_file(path)
                .with_context(|| format!("failed to load config from {}", path))?,
            None => HookConfig::default(),
        };
        Ok(config.apply_env())
    }
}

async fn replay(url: &str, options: &Options) -> ExitCode {
    let config = match options.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{:#}", e);
            return ExitCode::from(1);
        }
    };

    let mut builder = TokenCaptureHook::builder(config);
    if options.no_clipboard {
        builder = builder.clipboard(Arc::new(NoopClipboard));
    }
    let hook = match builder.build() {
        Ok(hook) => hook,
        Err(e) => {
            eprintln!("Failed to create hook: {}", e);
            return ExitCode::from(1);
        }
    };

    let request = options
        .headers
        .iter()
        .fold(InterceptedRequest::new(url), |request, (name, value)| {
            request.header(name.as_str(), value.as_str())
        });

    let (guard, released) = CompletionGuard::channel();
    let report = hook.handle(&request, guard).await;
    if released.await.is_err() {
        eprintln!("Interception session was not released");
        return ExitCode::from(1);
    }

    println!("\n=== Outcome ===");
    println!("Phases: {:?}", report.phases);

    match report.outcome {
        Outcome::NoMatch => {
            println!("Out of scope: {}", url);
            ExitCode::SUCCESS
        }
        Outcome::CredentialAbsent { present } => {
            println!("No credential header. Present: {}", present.join(", "));
            ExitCode::SUCCESS
        }
        Outcome::Detached { capture, relay } => {
            println!(
                "Captured from '{}' ({} chars); session released before relay",
                capture.variant,
                capture.credential.len()
            );
            // The runtime shuts down with main, so wait for the detached relay.
            match relay.await {
                Ok(result) => print_relay_result(&result),
                Err(e) => {
                    eprintln!("Relay task failed: {}", e);
                    ExitCode::from(2)
                }
            }
        }
        Outcome::Relayed { capture, result } => {
            println!(
                "Captured from '{}' ({} chars) at {}",
                capture.variant,
                capture.credential.len(),
                capture.captured_at.format("%Y-%m-%d %H:%M:%S")
            );
            print_relay_result(&result)
        }
    }
}

async fn submit(token: &str, options: &Options) -> ExitCode {
    let config = match options.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{:#}", e);
            return ExitCode::from(1);
        }
    };

    if let Err(e) = config.relay.validate() {
        eprintln!("{}", e);
        return ExitCode::from(1);
    }

    let client = match RelayClient::from_config(&config.relay) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Failed to create relay client: {}", e);
            return ExitCode::from(1);
        }
    };

    let Some(credential) = Credential::new(token) else {
        eprintln!("Token must not be empty");
        return ExitCode::from(1);
    };

    println!("Submitting to: {}", client.endpoint());
    let result = client
        .submit(&RelaySubmission::new(credential, config.relay.api_key.clone()))
        .await;
    print_relay_result(&result)
}

fn check(url: &str, options: &Options) -> ExitCode {
    let config = match options.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{:#}", e);
            return ExitCode::from(1);
        }
    };

    let matcher = Matcher::new(config.path_fragment);
    if matcher.matches(url) {
        println!("[IN SCOPE] contains '{}'", matcher.fragment());
    } else {
        println!("[OUT OF SCOPE] does not contain '{}'", matcher.fragment());
    }
    ExitCode::SUCCESS
}

fn print_relay_result(result: &RelayResult) -> ExitCode {
    match result {
        RelayResult::Success { data } => {
            println!("[OK] Relayed. Server data: {}", data);
            ExitCode::SUCCESS
        }
        RelayResult::Failure(err) => {
            println!("[FAILED] {}", err);
            ExitCode::from(2)
        }
    }
}
