//! Genealogy CLI: build and query a variant genealogy from command scripts
//!
//! Commands:
//!   genealogy run <script>   execute a script file
//!   genealogy repl           read commands from stdin
//!   genealogy demo           walk through a small example genealogy
//!   genealogy help           show usage

use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;
use variant_genealogy::session::{ScriptReport, SessionError, SYNOPSIS};
use variant_genealogy::{Session, SessionConfig};

const DEMO_SCRIPT: &str = "\
# stem is 0
create 1 0
create 2 0 1
children 0
create 1 0        # already created
connect 2 1       # already connected, no-op
connect 0 2       # 0 is an ancestor of 2
remove 1
children 0
parents 2
remove 0          # the stem stays
create 3 2
create 4 3
prune 3
dump
";

fn print_usage() {
    println!(
        r#"
Variant Genealogy

Usage: genealogy <command> [options]

Commands:
  run   <script> [--config <file>]   Execute a command script
  repl  [--config <file>]            Read commands from stdin
  demo                               Run the example genealogy
  help                               Show this message

Script commands:"#
    );
    for (keyword, args) in SYNOPSIS {
        println!("  {:<12} {}", keyword, args);
    }
    println!(
        r#"
Config file (JSON, every field optional):
  {{"stem": "stem", "stop_on_error": true, "echo": false, "pretty_json": true}}
"#
    );
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage();
        return;
    }

    let result = match args[1].as_str() {
        "run" => cmd_run(&args[2..]),
        "repl" => cmd_repl(&args[2..]),
        "demo" => cmd_demo(),
        "help" | "--help" | "-h" => {
            print_usage();
            return;
        }
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            process::exit(2);
        }
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

/// Load `--config <file>` if present, defaults otherwise
fn load_config(args: &[String]) -> Result<SessionConfig, SessionError> {
    match args.iter().position(|a| a == "--config") {
        Some(i) => match args.get(i + 1) {
            Some(path) => SessionConfig::load(path),
            None => {
                eprintln!("Usage: --config <file>");
                process::exit(2);
            }
        },
        None => Ok(SessionConfig::default()),
    }
}

fn print_report(report: &ScriptReport) {
    println!(
        "\n  {} commands executed, {} failed",
        report.executed, report.failed
    );
}

fn cmd_run(args: &[String]) -> Result<(), SessionError> {
    let Some(path) = args.first().filter(|a| *a != "--config") else {
        eprintln!("Usage: genealogy run <script> [--config <file>]");
        process::exit(2);
    };

    let config = load_config(args)?;
    let script = BufReader::new(File::open(path)?);
    let mut session = Session::new(config);
    let report = session.run(script, &mut io::stdout().lock())?;
    print_report(&report);
    Ok(())
}

fn cmd_repl(args: &[String]) -> Result<(), SessionError> {
    let config = SessionConfig {
        stop_on_error: false,
        ..load_config(args)?
    };
    let mut session = Session::new(config);
    let report = session.run(io::stdin().lock(), &mut io::stdout().lock())?;
    print_report(&report);
    Ok(())
}

fn cmd_demo() -> Result<(), SessionError> {
    println!("\n  Variant Genealogy demo");
    println!("  {}", "=".repeat(40));

    let config = SessionConfig {
        stem: "0".to_string(),
        stop_on_error: false,
        echo: true,
        pretty_json: true,
    };
    let mut session = Session::new(config);
    let report = session.run(DEMO_SCRIPT.as_bytes(), &mut io::stdout().lock())?;
    print_report(&report);
    Ok(())
}
