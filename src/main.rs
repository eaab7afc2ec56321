use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use env_logger::Builder;
use log::{debug, info, LevelFilter};
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;
use termcolor::ColorChoice;

use seqscan::output::{self, LabeledMatch, MatchReport, RepeatReport, TransformReport};
use seqscan::{Alphabet, Automaton, BoyerMoore, Bwt, SeqScanConfig, SuffixTree, Trie};

#[derive(Parser)]
#[command(name = "seqscan")]
#[command(version, about = "Exact pattern matching over sequences")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// When to color output
    #[arg(long, value_enum, default_value_t = ColorMode::Auto, global = true)]
    color: ColorMode,
}

#[derive(Clone, Copy, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl From<ColorMode> for ColorChoice {
    fn from(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Auto => ColorChoice::Auto,
            ColorMode::Always => ColorChoice::Always,
            ColorMode::Never => ColorChoice::Never,
        }
    }
}

/// Where the text to search comes from
#[derive(Args)]
struct TextInput {
    /// Text to search (omit when using --input)
    #[arg(required_unless_present = "input")]
    text: Option<String>,

    /// Read the text from a file; whitespace is ignored
    #[arg(short, long, conflicts_with = "text")]
    input: Option<PathBuf>,
}

impl TextInput {
    fn load(&self) -> Result<Vec<u8>> {
        let raw = match (&self.text, &self.input) {
            (Some(text), _) => text.as_bytes().to_vec(),
            (None, Some(path)) => std::fs::read(path)
                .with_context(|| format!("Failed to read {}", path.display()))?,
            (None, None) => anyhow::bail!("no text given"),
        };
        Ok(raw.into_iter().filter(|b| !b.is_ascii_whitespace()).collect())
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Boyer-Moore search for one pattern
    Bm {
        /// Pattern to search for
        #[arg(short, long)]
        pattern: String,

        /// Alphabet symbols (default: symbols of text and pattern)
        #[arg(short, long)]
        alphabet: Option<String>,

        #[command(flatten)]
        input: TextInput,
    },
    /// Finite automaton search for one pattern
    Automaton {
        /// Pattern to search for
        #[arg(short, long)]
        pattern: String,

        /// Alphabet symbols (default: symbols of text and pattern)
        #[arg(short, long)]
        alphabet: Option<String>,

        /// Print the transition table
        #[arg(long)]
        table: bool,

        #[command(flatten)]
        input: TextInput,
    },
    /// Match a set of patterns with a trie
    Trie {
        /// Comma-separated patterns
        #[arg(short, long, value_delimiter = ',', required = true)]
        patterns: Vec<String>,

        #[command(flatten)]
        input: TextInput,
    },
    /// Query a suffix tree of the text
    SuffixTree {
        #[command(subcommand)]
        action: SuffixTreeAction,
    },
    /// Burrows-Wheeler transform operations
    Bwt {
        #[command(subcommand)]
        action: BwtAction,
    },
}

#[derive(Subcommand)]
enum SuffixTreeAction {
    /// Offsets where a pattern occurs
    Find {
        /// Pattern to search for
        #[arg(short, long)]
        pattern: String,

        #[command(flatten)]
        input: TextInput,
    },
    /// Distinct substrings that start with a prefix
    Prefix {
        /// Prefix to extend
        #[arg(short, long)]
        prefix: String,

        #[command(flatten)]
        input: TextInput,
    },
    /// Substrings that occur several times
    Repeats {
        /// Minimum repeat length
        #[arg(long, default_value_t = 2)]
        min_len: usize,

        /// Minimum number of occurrences
        #[arg(long, default_value_t = 2)]
        min_count: usize,

        #[command(flatten)]
        input: TextInput,
    },
    /// Nodes and leaves below a node
    Below {
        /// Node id (0 is the root)
        #[arg(short, long, default_value_t = 0)]
        node: usize,

        #[command(flatten)]
        input: TextInput,
    },
    /// Print every node of the tree
    Show {
        #[command(flatten)]
        input: TextInput,
    },
}

#[derive(Subcommand)]
enum BwtAction {
    /// Compute the transform of a text
    Transform {
        /// Also print the suffix array
        #[arg(long)]
        suffix_array: bool,

        #[command(flatten)]
        input: TextInput,
    },
    /// Recover a text from its transform
    Inverse {
        /// The transform
        bwt: String,
    },
    /// Backward search for a pattern
    Search {
        /// Pattern to search for
        #[arg(short, long)]
        pattern: String,

        /// Report text offsets instead of sorted rotation rows
        #[arg(long)]
        positions: bool,

        #[command(flatten)]
        input: TextInput,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    Builder::new()
        .filter_level(log_level)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    let config = match &cli.config {
        Some(path) => SeqScanConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SeqScanConfig::default(),
    };
    debug!("config: {:?}", config);

    let ctx = RunContext {
        config,
        json: cli.json,
        color: cli.color.into(),
    };

    match cli.command {
        Commands::Bm {
            pattern,
            alphabet,
            input,
        } => run_boyer_moore(&ctx, pattern.as_bytes(), alphabet.as_deref(), &input.load()?)?,
        Commands::Automaton {
            pattern,
            alphabet,
            table,
            input,
        } => run_automaton(
            &ctx,
            pattern.as_bytes(),
            alphabet.as_deref(),
            table,
            &input.load()?,
        )?,
        Commands::Trie { patterns, input } => run_trie(&ctx, &patterns, &input.load()?)?,
        Commands::SuffixTree { action } => handle_suffix_tree(&ctx, action)?,
        Commands::Bwt { action } => handle_bwt(&ctx, action)?,
    }

    Ok(())
}

/// Settings shared by every command
struct RunContext {
    config: SeqScanConfig,
    json: bool,
    color: ColorChoice,
}

impl RunContext {
    fn report_matches(&self, pattern: &[u8], positions: Vec<usize>, text: &[u8]) -> Result<()> {
        let report = MatchReport {
            pattern: output::lossy(pattern),
            positions,
        };
        if self.json {
            output::print_json(&report)?;
        } else {
            output::print_match_report(&report, text, pattern.len(), self.color)?;
        }
        Ok(())
    }
}

/// Use the given alphabet, or the symbols of the text and pattern
fn resolve_alphabet(symbols: Option<&str>, text: &[u8], pattern: &[u8]) -> Result<Alphabet> {
    let alphabet = match symbols {
        Some(symbols) => Alphabet::new(symbols.as_bytes())?,
        None => {
            let mut all = text.to_vec();
            all.extend_from_slice(pattern);
            Alphabet::from_text(&all)?
        }
    };
    debug!("alphabet: {}", alphabet);
    Ok(alphabet)
}

fn run_boyer_moore(ctx: &RunContext, pattern: &[u8], symbols: Option<&str>, text: &[u8]) -> Result<()> {
    let alphabet = resolve_alphabet(symbols, text, pattern)?;
    let bm = BoyerMoore::new(&alphabet, pattern).context("Invalid pattern")?;
    info!("Boyer-Moore search over {} symbols", text.len());

    let positions = bm.search(text).context("Invalid text")?;
    ctx.report_matches(pattern, positions, text)
}

fn run_automaton(
    ctx: &RunContext,
    pattern: &[u8],
    symbols: Option<&str>,
    table: bool,
    text: &[u8],
) -> Result<()> {
    let alphabet = resolve_alphabet(symbols, text, pattern)?;
    let automaton = Automaton::new(&alphabet, pattern).context("Invalid pattern")?;
    info!(
        "Automaton with {} states over {} symbols",
        automaton.num_states(),
        text.len()
    );

    if table && !ctx.json {
        print!("{}", automaton);
    }

    let positions = automaton.occurrences(text).context("Invalid text")?;
    ctx.report_matches(pattern, positions, text)
}

fn run_trie(ctx: &RunContext, patterns: &[String], text: &[u8]) -> Result<()> {
    let trie = Trie::from_patterns(patterns.iter().filter(|p| !p.is_empty()));
    info!(
        "Trie with {} nodes from {} patterns",
        trie.node_count(),
        trie.pattern_count()
    );

    let matches: Vec<LabeledMatch> = trie
        .matches(text)
        .into_iter()
        .map(|(offset, matched)| LabeledMatch::new(offset, matched))
        .collect();

    if ctx.json {
        output::print_json(&matches)?;
    } else {
        output::print_labeled_matches(&matches, text, ctx.color)?;
    }
    Ok(())
}

fn build_suffix_tree(ctx: &RunContext, text: &[u8]) -> Result<SuffixTree> {
    let start = Instant::now();
    let tree = SuffixTree::with_config(text, &ctx.config.suffix_tree)
        .context("Failed to build suffix tree")?;
    info!(
        "Suffix tree with {} nodes built in {:?}",
        tree.node_count(),
        start.elapsed()
    );
    Ok(tree)
}

fn handle_suffix_tree(ctx: &RunContext, action: SuffixTreeAction) -> Result<()> {
    match action {
        SuffixTreeAction::Find { pattern, input } => {
            let text = input.load()?;
            let tree = build_suffix_tree(ctx, &text)?;
            let positions = tree.find_pattern(pattern.as_bytes());
            ctx.report_matches(pattern.as_bytes(), positions, &text)?;
        }

        SuffixTreeAction::Prefix { prefix, input } => {
            let tree = build_suffix_tree(ctx, &input.load()?)?;
            let found: Vec<String> = tree
                .matches_with_prefix(prefix.as_bytes())
                .iter()
                .map(|s| output::lossy(s))
                .collect();
            if ctx.json {
                output::print_json(&found)?;
            } else {
                output::print_sequences(&found)?;
            }
        }

        SuffixTreeAction::Repeats {
            min_len,
            min_count,
            input,
        } => {
            let tree = build_suffix_tree(ctx, &input.load()?)?;
            let repeats: Vec<RepeatReport> = tree
                .repeats(min_len, min_count)
                .into_iter()
                .map(|r| RepeatReport {
                    sequence: output::lossy(&r.sequence),
                    positions: r.positions,
                })
                .collect();
            debug!("{} repeats found", repeats.len());
            if ctx.json {
                output::print_json(&repeats)?;
            } else {
                output::print_repeats(&repeats, ctx.color)?;
            }
        }

        SuffixTreeAction::Below { node, input } => {
            let tree = build_suffix_tree(ctx, &input.load()?)?;
            let nodes = tree.nodes_below(node)?;
            let mut leaves = tree.leaves_below(node)?;
            leaves.sort_unstable();
            if ctx.json {
                output::print_json(&serde_json::json!({
                    "node": node,
                    "nodes_below": nodes,
                    "leaves_below": leaves,
                }))?;
            } else {
                println!("nodes: {:?}", nodes);
                println!("leaves: {:?}", leaves);
            }
        }

        SuffixTreeAction::Show { input } => {
            let tree = build_suffix_tree(ctx, &input.load()?)?;
            print!("{}", tree);
        }
    }

    Ok(())
}

fn handle_bwt(ctx: &RunContext, action: BwtAction) -> Result<()> {
    let mut bwt_config = ctx.config.bwt.clone();

    match action {
        BwtAction::Transform {
            suffix_array,
            input,
        } => {
            bwt_config.build_suffix_array |= suffix_array;
            let text = input.load()?;
            let start = Instant::now();
            let bw = Bwt::with_config(&text, &bwt_config).context("Failed to build transform")?;
            info!("Transform of {} symbols built in {:?}", text.len(), start.elapsed());

            let report = TransformReport {
                bwt: output::lossy(bw.as_bytes()),
                suffix_array: bw.suffix_array().map(|sa| sa.to_vec()),
            };
            if ctx.json {
                output::print_json(&report)?;
            } else {
                println!("{}", report.bwt);
                if let Some(sa) = &report.suffix_array {
                    println!("{:?}", sa);
                }
            }
        }

        BwtAction::Inverse { bwt } => {
            let bw = Bwt::from_transformed(bwt.as_bytes(), bwt_config.terminator)?;
            let text = output::lossy(&bw.inverse()?);
            if ctx.json {
                output::print_json(&serde_json::json!({ "text": text }))?;
            } else {
                println!("{}", text);
            }
        }

        BwtAction::Search {
            pattern,
            positions,
            input,
        } => {
            bwt_config.build_suffix_array |= positions;
            let text = input.load()?;
            let bw = Bwt::with_config(&text, &bwt_config).context("Failed to build transform")?;

            if positions {
                let found = bw.backward_search_positions(pattern.as_bytes())?;
                ctx.report_matches(pattern.as_bytes(), found, &text)?;
            } else {
                let rows = bw.backward_search(pattern.as_bytes());
                debug!("rows {:?} of {}", rows, bw.len());
                let report = MatchReport {
                    pattern: pattern.clone(),
                    positions: rows,
                };
                if ctx.json {
                    output::print_json(&report)?;
                } else {
                    println!("{}: rows {:?}", report.pattern, report.positions);
                }
            }
        }
    }

    Ok(())
}
