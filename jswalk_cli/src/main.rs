// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

mod demos;

use clap::{Parser as ClapParser, Subcommand};
use jswalk_vm::agent::{CancellationToken, EvalOutcome, EvaluatorOptions};
use jswalk_vm::program::{evaluate_program, ExecutionKind};
use jswalk_vm::realm::Realm;

/// A typed-AST tree-walking ECMAScript evaluator
#[derive(Debug, ClapParser)]
#[command(name = "jswalk")]
#[command(about = "A typed-AST tree-walking ECMAScript evaluator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Lists the built-in demo programs
    List,

    /// Runs one of the built-in demo programs
    Run {
        /// Name of the demo to run, see `jswalk_cli list`
        name: String,

        /// Runs as sloppy mode instead of strict
        #[arg(long)]
        sloppy: bool,
    },
}

fn main() {
    let args = Cli::parse();

    match args.command {
        Command::List => {
            for demo in demos::DEMOS {
                println!("{:<12} {}", demo.name, demo.description);
            }
        }
        Command::Run { name, sloppy } => {
            let Some(demo) = demos::find(&name) else {
                eprintln!("no such demo: {name} (try `jswalk_cli list`)");
                std::process::exit(1);
            };
            let mut program = (demo.build)();
            program.strict = !sloppy;

            let realm = Realm::new();
            let global_environment = realm.global_environment();
            let options = EvaluatorOptions::default();
            let cancellation = CancellationToken::new();

            let result = evaluate_program(&program, global_environment, realm, options, cancellation, ExecutionKind::Script, false);

            match result {
                Ok(value) => println!("{value:?}"),
                Err(EvalOutcome::Thrown(err)) => {
                    eprintln!("Uncaught exception: {:?}", err.value());
                    std::process::exit(1);
                }
                Err(EvalOutcome::Cancelled) => {
                    eprintln!("evaluation cancelled");
                    std::process::exit(1);
                }
                Err(EvalOutcome::Internal(err)) => {
                    eprintln!("internal error: {err}");
                    std::process::exit(1);
                }
            }
        }
    }
}
