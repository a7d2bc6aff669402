// hefront: parse, resolve and explore programs in the terminal

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use hefront::ast::{AnyNode, AstNode, Statement};
use hefront::parser::{load_source, parse, parse_json};
use hefront::ui::App;
use hefront::visitor::{render_tree, resolve_scopes};

/// What to print instead of opening the explorer
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Dump {
    /// Indented node labels
    Tree,
    /// Structured form as pretty JSON
    Json,
    /// Scope tree with declarations
    Scopes,
}

#[derive(Parser)]
#[clap(name = "hefront", version, about = "Parse and explore programs with secret types")]
struct Cli {
    /// Program file to read
    file: PathBuf,

    /// Read the file as a structured (JSON) tree instead of source text
    #[clap(long)]
    json: bool,

    /// Print the result and exit instead of opening the explorer
    #[clap(long, value_enum)]
    dump: Option<Dump>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let text = load_source(&cli.file)?;
    let (root, source) = if cli.json {
        let root = parse_json(&text)
            .with_context(|| format!("failed to read tree from {}", cli.file.display()))?;
        (root, String::new())
    } else {
        let block =
            parse(&text).with_context(|| format!("failed to parse {}", cli.file.display()))?;
        (AnyNode::Statement(Statement::Block(block)), text)
    };

    let resolution = resolve_scopes(root.as_node()).context("scope resolution failed")?;

    match cli.dump {
        Some(Dump::Tree) => print!("{}", render_tree(root.as_node())),
        Some(Dump::Json) => println!("{}", serde_json::to_string_pretty(&root.to_structured())?),
        Some(Dump::Scopes) => match &resolution.scopes {
            Some(scopes) => print!("{}", scopes.render()),
            None => println!("(no scopes)"),
        },
        None => explore(App::new(root, resolution, source))?,
    }

    Ok(())
}

fn explore(mut app: App) -> Result<()> {
    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("terminal error")
}
