use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use libkana::{
    create_ime_engine, load_lexicon, ComposingText, DictionaryEngine, InputMode, InputStyle,
    KeyEvent, KeyResult, StyleConfig, Width,
};
use libkana_core::{normalize, request_candidates, CandidateRequest, Normalized};

#[derive(Parser)]
#[command(name = "libkana")]
#[command(about = "Japanese kana input front end: normalization, composing and conversion")]
#[command(version)]
struct Cli {
    /// Style configuration (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Lexicon file (.json or .toml); the built-in demo lexicon otherwise
    #[arg(long, global = true)]
    lexicon: Option<PathBuf>,

    /// Ask for predictive completions
    #[arg(long, global = true)]
    predict: bool,

    /// Maximum number of candidates
    #[arg(long, global = true)]
    n_best: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the canonical form of each character
    Normalize {
        chars: String,
        /// Treat the keys as direct input
        #[arg(long)]
        direct: bool,
    },
    /// Feed keys into a composing buffer and print its renderings
    Compose {
        keys: String,
        #[arg(long)]
        direct: bool,
    },
    /// Print conversion candidates for the keys
    Convert {
        keys: String,
        /// Print candidates as JSON
        #[arg(long)]
        json: bool,
    },
    /// Interactive key-event session
    Repl,
}

fn init_tracing() {
    // A subscriber may already be installed when embedded.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();
}

fn load_config(path: Option<&PathBuf>) -> Result<StyleConfig> {
    match path {
        Some(path) => StyleConfig::load_toml(path),
        None => Ok(StyleConfig::default()),
    }
}

fn compose(keys: &str, style: InputStyle, config: &StyleConfig) -> ComposingText {
    let mut text = ComposingText::new();
    for ch in keys.chars() {
        text.input(ch, style, config);
    }
    text
}

fn run_normalize(chars: &str, direct: bool, config: &StyleConfig) {
    let style = InputStyle::from_direct_flag(direct);
    for ch in chars.chars() {
        match normalize(ch, style, config) {
            Normalized::Text(text) => println!("{}\t{}", ch, text),
            Normalized::Mark(mark) => println!("{}\t{:?}", ch, mark),
        }
    }
}

fn run_compose(keys: &str, direct: bool, config: &StyleConfig) {
    let text = compose(keys, InputStyle::from_direct_flag(direct), config);
    println!("hiragana:   {}", text.to_hiragana());
    println!("cursor:     {}", text.to_hiragana_with_cursor());
    println!("reading:    {}", text.reading());
    println!("katakana:   {}", text.to_katakana(Width::Fullwidth));
    println!("hw katakana: {}", text.to_katakana(Width::Halfwidth));
    println!("alphabet:   {}", text.to_alphabet(Width::Halfwidth, ""));
    println!("units:      {}", text.len());
}

fn run_convert(
    keys: &str,
    json: bool,
    engine: &DictionaryEngine,
    config: &StyleConfig,
    request: CandidateRequest,
) -> Result<()> {
    let text = compose(keys, InputStyle::Transliterated, config);
    let Some(list) = request_candidates(&text, engine, config, request) else {
        println!("(empty input)");
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(list.candidates())?);
        return Ok(());
    }
    if list.is_empty() {
        println!("(no candidates)");
    }
    for (i, cand) in list.candidates().iter().enumerate() {
        println!(
            "{}. {}  reading={} units={}/{}",
            i + 1,
            cand.text,
            cand.reading,
            cand.corresponding_count,
            text.len()
        );
    }
    Ok(())
}

/// One REPL line as key events. `:name` lines are named keys, anything else
/// is typed character by character.
fn parse_line(line: &str) -> Vec<KeyEvent> {
    let Some(name) = line.strip_prefix(':') else {
        return line.chars().map(KeyEvent::Char).collect();
    };
    let key = match name {
        "space" => KeyEvent::Space,
        "enter" => KeyEvent::Enter,
        "bs" => KeyEvent::Backspace,
        "del" => KeyEvent::Delete,
        "esc" => KeyEvent::Escape,
        "tab" => KeyEvent::Tab,
        "left" => KeyEvent::Left,
        "right" => KeyEvent::Right,
        "up" => KeyEvent::Up,
        "down" => KeyEvent::Down,
        "pgup" => KeyEvent::PageUp,
        "pgdn" => KeyEvent::PageDown,
        _ => {
            if let Some(n) = name.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                KeyEvent::Function(n)
            } else if let Ok(n @ 1..=9) = name.parse::<u8>() {
                KeyEvent::Number(n)
            } else {
                // unknown names are typed literally
                return line.chars().map(KeyEvent::Char).collect();
            }
        }
    };
    vec![key]
}

fn run_repl(lexicon: libkana::Lexicon, config: StyleConfig) -> Result<()> {
    let mut ime = create_ime_engine(lexicon, config);

    println!("libkana REPL: type romaji, or :space :enter :bs :del :esc :tab :left :right :up :down :f6..:f10 :1..:9");
    println!("Ctrl-D to exit.");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut committed = String::new();
    for line in stdin.lock().lines() {
        let line = line.context("read stdin")?;
        if line.is_empty() {
            continue;
        }
        for key in parse_line(&line) {
            if ime.process_key(key.clone()) == KeyResult::NotHandled {
                println!("  (passed through: {:?})", key);
            }
            let commit = ime.context_mut().take_commit();
            committed.push_str(&commit);
        }

        let selecting = ime.session().mode() == InputMode::Selecting;
        let ctx = ime.context();
        println!("  committed: {}", committed);
        println!("  preedit:   {}", ctx.preedit_text);
        if !ctx.candidates.is_empty() {
            let page: Vec<String> = ctx
                .candidates
                .iter()
                .enumerate()
                .map(|(i, c)| {
                    let mark = if selecting && i == ctx.candidate_cursor { ">" } else { " " };
                    format!("{}{}.{}", mark, i + 1, c)
                })
                .collect();
            println!("  {}  {}", page.join(" "), ctx.auxiliary_text);
        }
        stdout.flush()?;
    }
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = load_config(cli.config.as_ref())?;
    let request = CandidateRequest::new(cli.predict.then_some(true), cli.n_best);

    match cli.command {
        Commands::Normalize { chars, direct } => run_normalize(&chars, direct, &config),
        Commands::Compose { keys, direct } => run_compose(&keys, direct, &config),
        Commands::Convert { keys, json } => {
            let lexicon = load_lexicon(cli.lexicon.as_deref())?;
            let engine = DictionaryEngine::new(lexicon);
            run_convert(&keys, json, &engine, &config, request)?;
        }
        Commands::Repl => {
            let lexicon = load_lexicon(cli.lexicon.as_deref())?;
            run_repl(lexicon, config)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_keys() {
        assert_eq!(parse_line(":space"), vec![KeyEvent::Space]);
        assert_eq!(parse_line(":f7"), vec![KeyEvent::Function(7)]);
        assert_eq!(parse_line(":3"), vec![KeyEvent::Number(3)]);
    }

    #[test]
    fn test_parse_typed_text() {
        assert_eq!(
            parse_line("ka"),
            vec![KeyEvent::Char('k'), KeyEvent::Char('a')]
        );
        assert_eq!(parse_line(":0").len(), 2);
        assert_eq!(parse_line(":"), vec![KeyEvent::Char(':')]);
    }

    #[test]
    fn test_cli_parses_global_options() {
        let cli = Cli::try_parse_from(["libkana", "convert", "kanji", "--n-best", "3", "--predict"])
            .unwrap();
        assert_eq!(cli.n_best, Some(3));
        assert!(cli.predict);
        assert!(matches!(cli.command, Commands::Convert { json: false, .. }));
    }
}
