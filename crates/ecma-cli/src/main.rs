// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! ecma - tokenize, parse and re-render ECMAScript files.

mod output;

use std::env;
use std::fs;
use std::process;

use ecma_ast::LineMap;
use ecma_fmt::{FormatConfig, FormatError};
use ecma_parser::ParseError;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() {
    output::init();
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    match args[1].as_str() {
        "lex" => {
            if args.len() < 3 {
                eprintln!("Usage: ecma lex <file.js>");
                process::exit(1);
            }
            cmd_lex(&args[2]);
        }
        "parse" => {
            if args.len() < 3 {
                eprintln!("Usage: ecma parse <file.js>");
                process::exit(1);
            }
            cmd_parse(&args[2]);
        }
        "fmt" => match parse_fmt_args(&args[2..]) {
            Ok(opts) => cmd_fmt(&opts),
            Err(msg) => {
                eprintln!("{}: {}", output::error_label(), msg);
                eprintln!("Usage: ecma fmt <file.js> [--indent N] [--check]");
                process::exit(1);
            }
        },
        "compact" => {
            if args.len() < 3 {
                eprintln!("Usage: ecma compact <file.js>");
                process::exit(1);
            }
            cmd_compact(&args[2]);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("ecma {}", VERSION);
        }
        other => {
            if other.ends_with(".js") {
                cmd_parse(other);
            } else {
                eprintln!("Unknown command: {}", other);
                print_usage();
                process::exit(1);
            }
        }
    }
}

fn print_usage() {
    println!("{} - ECMAScript formatter", output::title("ecma", VERSION));
    println!();
    println!("{}: ecma <command> [args]", output::section_header("Usage"));
    println!();
    println!("{}", output::section_header("Commands:"));
    println!("{}", output::usage_line("lex", "<file>", "Tokenize a file and print tokens"));
    println!("{}", output::usage_line("parse", "<file>", "Parse a file and print the tree as JSON"));
    println!("{}", output::usage_line("fmt", "<file> [--indent N]", "Print the file in house style"));
    println!("{}", output::usage_line("fmt", "<file> --check", "Exit 1 if the file is not formatted"));
    println!("{}", output::usage_line("compact", "<file>", "Print the file on one line"));
    println!("{}", output::usage_line("help", "", "Show this help"));
    println!("{}", output::usage_line("version", "", "Show version"));
}

struct FmtOptions {
    path: String,
    check: bool,
    config: FormatConfig,
}

fn parse_fmt_args(args: &[String]) -> Result<FmtOptions, String> {
    let mut path = None;
    let mut check = false;
    let mut config = FormatConfig::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--check" => check = true,
            "--indent" => {
                let value = iter.next().ok_or("--indent needs a value")?;
                config.indent_width = value
                    .parse()
                    .map_err(|_| format!("--indent expects a number, got '{}'", value))?;
            }
            flag if flag.starts_with("--") => return Err(format!("unknown option '{}'", flag)),
            file => {
                if path.replace(file.to_string()).is_some() {
                    return Err("fmt takes one file".to_string());
                }
            }
        }
    }
    let path = path.ok_or("missing file")?;
    Ok(FmtOptions { path, check, config })
}

fn read_source(path: &str) -> String {
    match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}: reading {}: {}", output::error_label(), path, e);
            process::exit(1);
        }
    }
}

fn cmd_lex(path: &str) {
    let source = read_source(path);
    let result = ecma_lexer::Lexer::new(&source).tokenize();
    let lines = LineMap::new(&source);

    for error in &result.errors {
        eprintln!("{}\n", output::diagnostic(path, &source, &lines, error.span.start, &error.message, error.hint.as_deref()));
    }

    if result.is_ok() {
        println!("=== Tokens ({}) ===\n", result.tokens.len());
        for tok in &result.tokens {
            let marker = if tok.newline_before { "\u{21b5}" } else { " " };
            println!("{:4}:{:<4} {} {:?}", tok.span.start, tok.span.end, marker, tok.kind);
        }
        println!("\n{}", output::banner_ok("Lex"));
    } else {
        eprintln!("{}", output::banner_fail("Lex", result.errors.len()));
        process::exit(1);
    }
}

fn cmd_parse(path: &str) {
    let source = read_source(path);
    let result = ecma_parser::parse_source(&source);
    if !result.is_ok() {
        report_syntax_errors(path, &source, &result.errors);
    }
    match serde_json::to_string_pretty(&result.program) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("{}: serializing tree: {}", output::error_label(), e);
            process::exit(1);
        }
    }
}

fn cmd_fmt(opts: &FmtOptions) {
    let source = read_source(&opts.path);
    let formatted = match ecma_fmt::format_source_with_config(&source, &opts.config) {
        Ok(text) => text,
        Err(e) => report_format_error(&opts.path, &source, e),
    };

    if opts.check {
        let clean = formatted == source;
        println!("{}", output::check_status(&opts.path, clean));
        if !clean {
            process::exit(1);
        }
        return;
    }
    print!("{}", formatted);
}

fn cmd_compact(path: &str) {
    let source = read_source(path);
    match ecma_fmt::compact_source(&source) {
        Ok(text) => println!("{}", text),
        Err(e) => report_format_error(path, &source, e),
    }
}

fn report_format_error(path: &str, source: &str, error: FormatError) -> ! {
    match error {
        FormatError::Syntax(errors) => report_syntax_errors(path, source, &errors),
        FormatError::Render(e) => {
            eprintln!("{}: {}", output::error_label(), e);
            eprintln!("{}", output::banner_fail("Render", 1));
            process::exit(1);
        }
    }
}

/// One diagnostic per line; later errors on the same line are usually
/// fallout from the first.
fn report_syntax_errors(path: &str, source: &str, errors: &[ParseError]) -> ! {
    let lines = LineMap::new(source);
    let mut last_line = None;
    let mut shown = 0;
    for error in errors {
        let (line, _) = lines.line_col(error.span.start);
        if last_line == Some(line) {
            continue;
        }
        last_line = Some(line);
        shown += 1;
        eprintln!("{}\n", output::diagnostic(path, source, &lines, error.span.start, &error.message, error.hint.as_deref()));
    }
    eprintln!("{}", output::banner_fail("Parse", shown));
    process::exit(1);
}
