//! script-gate - policy gate for AI-generated Python scripts
//!
//! A PreToolUse hook that gates script writes before they reach disk.
//!
//! # Usage
//!
//! ```bash
//! # As a hook (reads tool-input JSON from stdin, writes a decision to stdout)
//! echo '{"tool_name":"Write","tool_input":{"file_path":"gen.py","content":"import os"}}' | script-gate
//!
//! # Gate an on-disk file directly
//! script-gate --check generated/model.py
//!
//! # With an explicit config
//! script-gate --config ./gate.toml
//! ```

use std::env;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use script_gate::{Candidate, Config, GateEngine, GateResponse, HookInput};

/// Print version information
fn print_version() {
    println!("script-gate {}", env!("CARGO_PKG_VERSION"));
}

/// Print help message
fn print_help() {
    println!(
        r#"script-gate - policy gate for AI-generated Python scripts

USAGE:
    script-gate [OPTIONS]

OPTIONS:
    -h, --help              Print this help message
    -v, --version           Print version information
    -c, --config PATH       Path to config file
    -k, --check FILE        Gate an on-disk file instead of reading stdin

ENVIRONMENT:
    SCRIPT_GATE_DISABLED=1  Pass everything through with allow

OUTPUT:
    One JSON object on stdout:
        {{"decision":"allow"|"ask"|"block","reason":"..."}}
    The reason field is present only when the decision is not allow.

    Tooling and configuration failures are NOT decisions: they are
    reported on stderr with a nonzero exit so the caller falls back to
    blocking the write.

USAGE AS HOOK:
    Configure in ~/.claude/settings.json:
    {{
      "hooks": {{
        "PreToolUse": [{{
          "type": "command",
          "command": "~/.claude/script-gate/script-gate",
          "timeout": 10000,
          "tools": ["Write", "Edit"]
        }}]
      }}
    }}
"#
    );
}

/// Parse command line arguments
struct Args {
    help: bool,
    version: bool,
    config_path: Option<String>,
    check_file: Option<String>,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = env::args().collect();
        let mut result = Args {
            help: false,
            version: false,
            config_path: None,
            check_file: None,
        };

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "-h" | "--help" => result.help = true,
                "-v" | "--version" => result.version = true,
                "-c" | "--config" => {
                    if i + 1 < args.len() {
                        i += 1;
                        result.config_path = Some(args[i].clone());
                    }
                }
                "-k" | "--check" => {
                    if i + 1 < args.len() {
                        i += 1;
                        result.check_file = Some(args[i].clone());
                    }
                }
                arg if arg.starts_with("--config=") => {
                    let path = arg.trim_start_matches("--config=");
                    result.config_path = Some(path.to_string());
                }
                arg if arg.starts_with("--check=") => {
                    let path = arg.trim_start_matches("--check=");
                    result.check_file = Some(path.to_string());
                }
                _ => {}
            }
            i += 1;
        }

        result
    }
}

fn emit(response: &GateResponse) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let _ = writeln!(handle, "{}", response.to_json());
    let _ = handle.flush();
}

fn main() -> ExitCode {
    let args = Args::parse();

    if args.help {
        print_help();
        return ExitCode::SUCCESS;
    }

    if args.version {
        print_version();
        return ExitCode::SUCCESS;
    }

    // Load configuration
    let config = if let Some(ref path) = args.config_path {
        Config::load_from(std::path::Path::new(path)).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to load config from {}: {}", path, e);
            Config::default()
        })
    } else {
        Config::load()
    };

    // A malformed rule set is not a decision: fail before reading any input
    let engine = match GateEngine::new(config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    if env::var("SCRIPT_GATE_DISABLED").is_ok() {
        emit(&GateResponse {
            decision: "allow",
            reason: None,
        });
        return ExitCode::SUCCESS;
    }

    // Build the candidate from --check or from stdin hook JSON
    let candidate = if let Some(ref path) = args.check_file {
        match std::fs::read_to_string(path) {
            Ok(source) => Some(Candidate::new(path.clone(), source)),
            Err(e) => {
                eprintln!("Error: cannot read {}: {}", path, e);
                return ExitCode::from(2);
            }
        }
    } else {
        match read_stdin_candidate() {
            Ok(candidate) => candidate,
            Err(response) => {
                emit(&response);
                return ExitCode::SUCCESS;
            }
        }
    };

    // Inputs that carry no script (unknown tools, empty stdin) pass through
    let Some(candidate) = candidate else {
        emit(&GateResponse {
            decision: "allow",
            reason: None,
        });
        return ExitCode::SUCCESS;
    };

    match engine.evaluate(&candidate) {
        Ok(decision) => {
            emit(&GateResponse::from_decision(&decision));
            ExitCode::SUCCESS
        }
        Err(e) => {
            // Tooling failures must never read as "code is safe"
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}

/// Read the hook JSON from stdin and extract its candidate.
///
/// Malformed input fails closed: the Err carries a block response, since a
/// payload the gate cannot read could be an evasion attempt.
fn read_stdin_candidate() -> Result<Option<Candidate>, GateResponse> {
    let stdin = io::stdin();
    let mut input_json = String::new();

    for line in stdin.lock().lines() {
        match line {
            Ok(line) => {
                input_json.push_str(&line);
                input_json.push('\n');
            }
            Err(_) => break,
        }
    }

    // No input = nothing to check
    if input_json.trim().is_empty() {
        return Ok(None);
    }

    match HookInput::from_json(&input_json) {
        Ok(input) => Ok(input.candidate()),
        Err(e) => {
            eprintln!("Error: Failed to parse input (blocking): {}", e);
            Err(GateResponse {
                decision: "block",
                reason: Some(format!("[input] failed to parse hook input: {}", e)),
            })
        }
    }
}
