// Leor: parse a source file and dump its tokens or syntax tree

use std::fs;
use std::path::Path;

use leor::parser::parse::{ParseError, Parser};
use leor::parser::tokenize;
use log::info;

fn usage(program_name: &str) -> ! {
    eprintln!("Usage: {} <file.leor> [--tokens]", program_name);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --tokens    print the token stream instead of the syntax tree");
    eprintln!();
    eprintln!("Set RUST_LOG=trace to follow the lexer and parser.");
    std::process::exit(1);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Parse command-line arguments
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("leor");

    let mut source_file = None;
    let mut dump_tokens = false;
    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--tokens" => dump_tokens = true,
            "-h" | "--help" => usage(program_name),
            _ if source_file.is_none() => source_file = Some(arg.as_str()),
            _ => {
                eprintln!("Error: unexpected argument '{}'", arg);
                usage(program_name);
            }
        }
    }

    let Some(source_file) = source_file else {
        eprintln!("Error: No input file provided");
        eprintln!();
        usage(program_name);
    };

    if !Path::new(source_file).exists() {
        eprintln!("Error: File '{}' not found", source_file);
        std::process::exit(1);
    }

    let source = fs::read_to_string(source_file)?;
    info!("read {} bytes from {}", source.len(), source_file);

    if dump_tokens {
        let tokens = match tokenize(&source) {
            Ok(tokens) => tokens,
            Err(e) => {
                eprintln!("{}", ParseError::from(e));
                std::process::exit(1);
            }
        };
        for token in tokens {
            println!("{}", token);
        }
        return Ok(());
    }

    let program = match Parser::new(&source).parse_program() {
        Ok(program) => program,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    print!("{}", program);
    Ok(())
}
