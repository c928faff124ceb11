use std::{
    fs,
    io::{self, Write},
};

use clap::Parser;
use technologic::{
    interpreter::evaluator::core::{DEFAULT_MAX_CALL_DEPTH, InterpreterConfig},
    parse_source, run_source_with_config,
};

/// technologic runs scripts written in a language of everyday verbs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells technologic to look at a file instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Prints the parsed instruction listing instead of running it.
    #[arg(short, long)]
    dump: bool,

    /// Most nested function calls allowed before the run is aborted.
    #[arg(long, default_value_t = DEFAULT_MAX_CALL_DEPTH)]
    max_depth: usize,

    contents: String,
}

fn main() {
    let args = Args::parse();

    let script = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            std::process::exit(1);
        })
    } else {
        args.contents
    };

    let result = if args.dump {
        parse_source(&script).map(|program| print!("{program}"))
    } else {
        let config = InterpreterConfig { max_call_depth: args.max_depth };
        run_source_with_config(&script, io::stdout().lock(), io::stdin().lock(), config)
    };

    if let Err(e) = result {
        io::stdout().flush().ok();
        eprintln!("{e}");
        std::process::exit(1);
    }
}
