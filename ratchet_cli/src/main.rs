use std::process::ExitCode;

use clap::{Parser as ClapParser, Subcommand};
use console::style;
use ratchet_vm::{
    ecmascript::{
        builtins::register_default_plugins,
        execution::{Agent, DefaultHostHooks, Options},
        scripts_and_modules::script::{parse_script, script_evaluation},
        types::String as JsString,
    },
    engine::debug_string,
};

/// A JavaScript engine
#[derive(Debug, ClapParser)]
#[command(name = "ratchet")]
#[command(about = "A step-driven JavaScript interpreter", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parses a file and reports syntax errors
    Parse {
        /// The path of the file to parse
        path: String,
    },

    /// Evaluates one or more files in a shared realm
    Eval {
        /// Evaluates the scripts in strict mode.
        #[arg(short, long)]
        strict: bool,

        /// Prints the completion value of the last script.
        #[arg(short, long)]
        verbose: bool,

        /// The files to evaluate.
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

fn main() -> ExitCode {
    let args = Cli::parse();
    match args.command {
        Command::Parse { path } => parse_command(&path),
        Command::Eval {
            strict,
            verbose,
            paths,
        } => eval_command(strict, verbose, &paths),
    }
}

fn read_source(path: &str) -> Result<String, ExitCode> {
    std::fs::read_to_string(path).map_err(|error| {
        eprintln!("{} {}: {}", style("error:").red().bold(), path, error);
        ExitCode::from(2)
    })
}

fn parse_command(path: &str) -> ExitCode {
    let source = match read_source(path) {
        Ok(source) => source,
        Err(code) => return code,
    };
    let mut agent = Agent::new(Options::default(), &DefaultHostHooks);
    register_default_plugins(&mut agent);
    let realm = agent.create_default_realm().unwrap();
    agent.run_in_realm(realm, |agent| {
        let source = JsString::from_string(agent, source);
        match parse_script(agent, source, realm, false) {
            Ok(_) => {
                println!("{} {}", style("ok:").green().bold(), path);
                ExitCode::SUCCESS
            }
            Err(errors) => {
                for error in errors {
                    eprintln!("{} {}", style("syntax error:").red().bold(), error);
                }
                ExitCode::FAILURE
            }
        }
    })
}

fn eval_command(strict: bool, verbose: bool, paths: &[String]) -> ExitCode {
    let mut agent = Agent::new(Options::default(), &DefaultHostHooks);
    register_default_plugins(&mut agent);
    let realm = agent.create_default_realm().unwrap();

    for (index, path) in paths.iter().enumerate() {
        let source = match read_source(path) {
            Ok(source) => source,
            Err(code) => return code,
        };
        let is_last = index == paths.len() - 1;
        let result = agent.run_in_realm(realm, |agent| {
            let source = JsString::from_string(agent, source);
            let script = match parse_script(agent, source, realm, strict) {
                Ok(script) => script,
                Err(errors) => {
                    for error in errors {
                        eprintln!("{} {}", style("syntax error:").red().bold(), error);
                    }
                    return Err(());
                }
            };
            match script_evaluation(agent, script) {
                Ok(value) => {
                    if verbose && is_last {
                        let rendered = debug_string(agent, value, 4);
                        println!("{}", rendered);
                    }
                    Ok(())
                }
                Err(error) => {
                    let rendered = debug_string(agent, error.value(), 4);
                    eprintln!("{} {}", style("uncaught:").red().bold(), rendered);
                    Err(())
                }
            }
        });
        if result.is_err() {
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
