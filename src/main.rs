use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;

/// The basil interpreter.
///
/// Runs a script file, an inline snippet given with --eval, or whatever
/// arrives on standard input when neither is present.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to a basil script.
    script: Option<PathBuf>,

    /// Evaluate an inline snippet instead of a script file.
    #[arg(short, long, value_name = "SOURCE", conflicts_with = "script")]
    eval: Option<String>,
}

fn read_source(args: Args) -> io::Result<String> {
    if let Some(source) = args.eval {
        return Ok(source);
    }
    if let Some(path) = args.script {
        return fs::read_to_string(path);
    }

    let mut source = String::new();
    io::stdin().read_to_string(&mut source)?;
    Ok(source)
}

fn main() -> ExitCode {
    let args = Args::parse();
    let script = args.script.clone();

    let source = match read_source(args) {
        Ok(source) => source,
        Err(error) => {
            match script {
                Some(path) => eprintln!("basil: cannot read script {}: {error}", path.display()),
                None => eprintln!("basil: cannot read program from standard input: {error}"),
            }
            return ExitCode::FAILURE;
        },
    };

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    match basil::run(&source, &mut input, &mut output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        },
    }
}
