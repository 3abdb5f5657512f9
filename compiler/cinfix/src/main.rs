use std::env;
use std::path::PathBuf;

use cinfix_ast::{to_json, Node, TreePrinter};
use cinfix_eval::{evaluate_tokens, ExprError};
use cinfix_lexer::Lexer;
use cinfix_parser::parser::DEFAULT_MAX_DEPTH;
use cinfix_parser::{render_snippet, Diagnostic, Fixer, ParseError, ParserConfig, TreeBuilder};
use cinfix_pp::{PreprocessErrorKind, Preprocessor, PreprocessorConfig};
use clap::{Args, Parser, Subcommand};
use log::{debug, LevelFilter};

#[derive(Debug, Parser)]
#[command(
    name = "cinfix",
    version,
    about = "Evaluate C-style integer expressions and preprocess conditional text",
    long_about = "cinfix evaluates constant integer expressions with C operator precedence\n\
        and runs a small C-style preprocessor whose #if conditions use the same engine.\n\n\
        EXAMPLES:\n\
        \n  cinfix eval '2 + 3 * 4'              Print 14\n\
        \n  cinfix tree '48 / 4 / 3'             Show the tree before and after fixing\n\
        \n  cinfix -D DEBUG=2 pp config.in       Preprocess a file\n\
        \n  cinfix                               Start the calculator",
    after_help = "Set RUST_LOG to override the log level chosen by -v."
)]
struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Maximum nesting depth of an expression tree
    #[arg(
        long,
        value_name = "N",
        env = "CINFIX_MAX_DEPTH",
        default_value_t = DEFAULT_MAX_DEPTH,
        global = true
    )]
    max_depth: usize,

    /// Directory searched for #include files (repeatable)
    #[arg(short = 'I', long = "include-dir", value_name = "DIR", global = true)]
    include_dirs: Vec<PathBuf>,

    /// Predefine a macro for `pp`; VALUE defaults to 1 (repeatable)
    #[arg(short = 'D', long = "define", value_name = "NAME[=VALUE]", global = true)]
    defines: Vec<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start an interactive calculator
    #[command(
        about = "Start an interactive calculator",
        long_about = "Reads one expression per line and prints its value or the error.\n\n\
            An empty line or end of input (Ctrl-D) ends the session."
    )]
    Calc,

    /// Evaluate expressions given on the command line
    #[command(
        about = "Evaluate expressions given on the command line",
        long_about = "Joins the arguments with spaces and evaluates each line of the result,\n\
            printing one value per line. Blank lines are skipped."
    )]
    Eval(EvalArgs),

    /// Show how an expression is parsed
    #[command(about = "Print the textual-order and precedence-fixed trees of an expression")]
    Tree(TreeArgs),

    /// Preprocess a file
    #[command(about = "Preprocess a file and print the result")]
    Pp(PpArgs),
}

#[derive(Debug, Args, Clone)]
struct EvalArgs {
    /// Expression text
    #[arg(value_name = "EXPR", required = true, num_args = 1.., allow_hyphen_values = true)]
    expr: Vec<String>,
}

#[derive(Debug, Args, Clone)]
struct TreeArgs {
    /// Print both trees as one JSON document
    #[arg(long)]
    json: bool,

    /// Expression text
    #[arg(value_name = "EXPR", required = true, num_args = 1.., allow_hyphen_values = true)]
    expr: Vec<String>,
}

#[derive(Debug, Args, Clone)]
struct PpArgs {
    /// Input file
    #[arg(value_name = "FILE")]
    input: PathBuf,
}

fn init_logging(verbose: u8) {
    let mut builder = env_logger::Builder::new();
    if env::var_os("RUST_LOG").is_some() {
        builder.parse_default_env();
    } else {
        builder.filter_level(match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        });
    }
    let _ = builder.try_init();
}

/// Renders an engine error for a terminal. Parse errors show the offending
/// part of `source`.
fn render_error(err: &ExprError, source: &str) -> String {
    match err {
        ExprError::Parse(parse) => render_parse_error(parse, source),
        ExprError::Eval(eval) => format!("error: {eval}"),
    }
}

fn render_parse_error(err: &ParseError, source: &str) -> String {
    render_snippet(&Diagnostic::from(err), source)
        .trim_end()
        .to_string()
}

/// Evaluates a single line of input.
fn evaluate_line(line: &str, config: &ParserConfig) -> Result<i32, String> {
    evaluate_tokens(&mut Lexer::new(line), config).map_err(|e| render_error(&e, line))
}

/// State of an interactive calculator session.
struct CalcSession {
    config: ParserConfig,
    evaluated: usize,
}

impl CalcSession {
    fn new(config: ParserConfig) -> Self {
        Self {
            config,
            evaluated: 0,
        }
    }

    fn prompt(&self) -> String {
        format!("[{}]> ", self.evaluated + 1)
    }

    /// Handles one input line. Returns the lines to print and whether the
    /// session is over.
    fn handle_line(&mut self, line: &str) -> (Vec<String>, bool) {
        if line.trim().is_empty() {
            return (Vec::new(), true);
        }
        self.evaluated += 1;
        let out = match evaluate_line(line, &self.config) {
            Ok(value) => value.to_string(),
            Err(rendered) => rendered,
        };
        (vec![out], false)
    }
}

fn run_calc(config: ParserConfig) -> i32 {
    use rustyline::error::ReadlineError;
    use rustyline::Editor;
    let mut rl = match Editor::<(), rustyline::history::DefaultHistory>::new() {
        Ok(e) => e,
        Err(e) => {
            eprintln!("error: failed to initialize line editor: {e}");
            return 2;
        }
    };

    let mut session = CalcSession::new(config);
    loop {
        let prompt = session.prompt();
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    let _ = rl.add_history_entry(trimmed);
                }
                let (out, exit) = session.handle_line(&line);
                for l in out {
                    println!("{l}");
                }
                if exit {
                    return 0;
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => return 0,
            Err(e) => {
                eprintln!("error: calculator failed: {e}");
                return 2;
            }
        }
    }
}

/// Evaluates every non-blank line of `text`. Stops at the first error.
fn evaluate_all(text: &str, config: &ParserConfig) -> Result<Vec<i32>, String> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| evaluate_line(line, config))
        .collect()
}

fn run_eval(args: &EvalArgs, config: &ParserConfig) -> i32 {
    let text = args.expr.join(" ");
    match evaluate_all(&text, config) {
        Ok(values) => {
            for value in values {
                println!("{value}");
            }
            0
        }
        Err(rendered) => {
            eprintln!("{rendered}");
            1
        }
    }
}

/// The textual-order tree of `source`'s first line and the same tree after
/// fixing, with the number of rotations that took.
fn build_trees(source: &str, config: &ParserConfig) -> Result<(Node, Node, usize), ParseError> {
    let provisional = TreeBuilder::new(config.clone()).build(&mut Lexer::new(source))?;
    let mut fixer = Fixer::new();
    let fixed = fixer.fix(provisional.clone());
    debug!("fixed '{source}' with {} rotations", fixer.rotations());
    Ok((provisional, fixed, fixer.rotations()))
}

fn render_trees(source: &str, config: &ParserConfig, json: bool) -> Result<String, String> {
    let (provisional, fixed, rotations) =
        build_trees(source, config).map_err(|e| render_parse_error(&e, source))?;
    if json {
        let provisional = to_json(&provisional).map_err(|e| format!("error: {e}"))?;
        let fixed = to_json(&fixed).map_err(|e| format!("error: {e}"))?;
        return Ok(format!(
            "{{\n\"rotations\": {rotations},\n\"provisional\": {provisional},\n\"fixed\": {fixed}\n}}\n"
        ));
    }
    let printer = TreePrinter::new();
    Ok(format!(
        "textual order: {provisional}\n{}\nfixed after {rotations} rotation(s): {fixed}\n{}",
        printer.print(&provisional),
        printer.print(&fixed)
    ))
}

fn run_tree(args: &TreeArgs, config: &ParserConfig) -> i32 {
    let source = args.expr.join(" ");
    match render_trees(&source, config, args.json) {
        Ok(text) => {
            print!("{text}");
            0
        }
        Err(rendered) => {
            eprintln!("{rendered}");
            1
        }
    }
}

/// Splits a `-D` argument into a macro name and body.
fn parse_define(arg: &str) -> (&str, &str) {
    match arg.split_once('=') {
        Some((name, body)) => (name.trim(), body),
        None => (arg.trim(), "1"),
    }
}

fn run_pp(args: &PpArgs, cli: &Cli, config: ParserConfig) -> i32 {
    let mut pp = Preprocessor::new(PreprocessorConfig {
        include_dirs: cli.include_dirs.clone(),
        parser: config,
        ..PreprocessorConfig::default()
    });
    for define in &cli.defines {
        let (name, body) = parse_define(define);
        if let Err(e) = pp.define(name, body) {
            eprintln!("error: invalid -D '{define}': {}", e.kind);
            return 2;
        }
    }

    match pp.process_file(&args.input) {
        Ok(text) => {
            print!("{text}");
            0
        }
        Err(e) => {
            eprintln!("error: {e}");
            // the input itself could not be read
            let unreadable =
                e.line == 0 && matches!(e.kind, PreprocessErrorKind::IncludeFailed { .. });
            if unreadable {
                2
            } else {
                1
            }
        }
    }
}

fn run_cli() -> i32 {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = ParserConfig::with_max_depth(cli.max_depth);

    match &cli.command {
        None | Some(Command::Calc) => run_calc(config),
        Some(Command::Eval(args)) => run_eval(args, &config),
        Some(Command::Tree(args)) => run_tree(args, &config),
        Some(Command::Pp(args)) => run_pp(args, &cli, config),
    }
}

fn main() {
    std::process::exit(run_cli());
}
