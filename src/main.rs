//! Lexes a Sanity source file and prints its tokens.
//!
//! ```text
//! sanity-lex program.sane program.out
//! cat program.sane | sanity-lex --format json - program.out
//! ```
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`.

use std::io::{self, BufRead, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use sanity_lex::{tokenize, FileChars, PullSequence, ReaderChars, Token};
use tracing_subscriber::EnvFilter;

/// How tokens are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// One token's content per line
    Plain,
    /// One JSON object per line, with literal flag and span
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "sanity-lex", version, about = "Tokenize a Sanity source file")]
struct Args {
    /// The input file to compile, or `-` for stdin
    input_file: PathBuf,

    /// Accepted for a future code generator; nothing is written to it yet
    output_file: PathBuf,

    /// Token output format
    #[arg(long, value_enum, default_value_t = Format::Plain)]
    format: Format,
}

/// Honours `RUST_LOG` when it is set and valid, otherwise logs warnings only
fn log_filter(directives: Option<String>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok()))
        .init();

    let args = Args::parse();

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let result = run(&args, ReaderChars::stdin(), &mut out);
    // Flush whatever was written before a failure.
    drop(out);

    if let Err(err) = result {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run<R, W>(args: &Args, stdin: ReaderChars<R>, out: &mut W) -> anyhow::Result<()>
where
    R: BufRead,
    W: Write,
{
    tracing::info!(
        input = %args.input_file.display(),
        output = %args.output_file.display(),
        format = ?args.format,
        "Tokenizing"
    );

    if args.input_file.as_os_str() == "-" {
        print_tokens(stdin, args.format, out).context("while lexing stdin")?;
    } else {
        let source = FileChars::open(&args.input_file)?;
        print_tokens(source, args.format, out)
            .with_context(|| format!("while lexing '{}'", args.input_file.display()))?;
    }

    out.flush().context("failed to flush output")?;
    Ok(())
}

fn print_tokens<R, W>(source: ReaderChars<R>, format: Format, out: &mut W) -> anyhow::Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut tokens = tokenize(PullSequence::new(source));
    let mut count = 0usize;
    for token in tokens.values() {
        write_token(&token, format, out)?;
        count += 1;
    }
    tracing::debug!(count, "tokens written");

    tokens.into_producer().into_chars().into_producer().finish()?;
    Ok(())
}

fn write_token<W: Write>(token: &Token, format: Format, out: &mut W) -> anyhow::Result<()> {
    match format {
        Format::Plain => writeln!(out, "{}", token)?,
        Format::Json => {
            serde_json::to_writer(&mut *out, token)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn lex_to_string(input: &[u8], format: Format) -> (anyhow::Result<()>, String) {
        let mut out = Vec::new();
        let source = ReaderChars::new(Cursor::new(input.to_vec()));
        let result = print_tokens(source, format, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    fn args(input: &str, format: Format) -> Args {
        Args {
            input_file: input.into(),
            output_file: "out.bin".into(),
            format,
        }
    }

    #[test]
    fn test_plain_output_one_token_per_line() {
        let (result, out) = lex_to_string(b"print(\"hi there\") 42", Format::Plain);
        assert!(result.is_ok());
        assert_eq!(out, "print\n(\nhi there\n)\n4\n2\n");
    }

    #[test]
    fn test_json_output_carries_flag_and_span() {
        let (result, out) = lex_to_string(b"x\n  \"s\"", Format::Json);
        assert!(result.is_ok());
        let lines: Vec<serde_json::Value> = out
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["content"], "x");
        assert_eq!(lines[0]["is_string_literal"], false);
        assert_eq!(lines[1]["content"], "s");
        assert_eq!(lines[1]["is_string_literal"], true);
        assert_eq!(lines[1]["span"]["start"]["line"], 2);
        assert_eq!(lines[1]["span"]["start"]["column"], 4);
    }

    #[test]
    fn test_invalid_utf8_fails_after_earlier_tokens() {
        let (result, out) = lex_to_string(b"ab c\xff d", Format::Plain);
        assert_eq!(out, "ab\nc\n");
        let err = result.unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid UTF-8"));
    }

    #[test]
    fn test_dash_reads_stdin() {
        let stdin = ReaderChars::new(Cursor::new(b"a + b".to_vec()));
        let mut out = Vec::new();
        run(&args("-", Format::Plain), stdin, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a\n+\nb\n");
    }

    #[test]
    fn test_missing_input_file_is_an_error() {
        let stdin = ReaderChars::new(Cursor::new(Vec::new()));
        let mut out = Vec::new();
        let err = run(&args("/nonexistent/input.sane", Format::Plain), stdin, &mut out)
            .unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/input.sane"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_args_require_both_paths() {
        let parsed =
            Args::try_parse_from(["sanity-lex", "in.sane", "out.bin", "--format", "json"])
                .unwrap();
        assert_eq!(parsed.format, Format::Json);
        assert_eq!(parsed.output_file, PathBuf::from("out.bin"));
        assert!(Args::try_parse_from(["sanity-lex", "in.sane"]).is_err());
    }

    #[test]
    fn test_output_file_help_says_it_is_unused() {
        use clap::CommandFactory;
        let cmd = Args::command();
        let arg = cmd
            .get_arguments()
            .find(|a| a.get_id() == "output_file")
            .unwrap();
        let help = arg.get_help().unwrap().to_string();
        assert!(help.contains("nothing is written"));
        assert!(!help.contains("compiled binary"));
    }

    fn debug_enabled(filter: EnvFilter) -> bool {
        use tracing_subscriber::prelude::*;
        let subscriber = tracing_subscriber::registry().with(filter);
        tracing::subscriber::with_default(subscriber, || {
            tracing::enabled!(tracing::Level::DEBUG)
        })
    }

    #[test]
    fn test_rust_log_level_is_honoured() {
        assert!(debug_enabled(log_filter(Some("debug".to_string()))));
        assert!(debug_enabled(log_filter(Some("trace".to_string()))));
    }

    #[test]
    fn test_log_filter_defaults_to_warn() {
        assert!(!debug_enabled(log_filter(None)));
        assert!(!debug_enabled(log_filter(Some("sanity_lex=notalevel".to_string()))));
    }
}
