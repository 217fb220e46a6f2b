use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand};
use inline_fold_core::{LineRange, Position};

#[derive(Parser, Debug)]
#[command(name = "fold-preview")]
#[command(about = "Preview inline injector-id folding for a file")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
    /// Verbose logging (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the file with folded regions replaced by their mask
    Fold(FoldArgs),
    /// Insert an `@injector-id` marker and print the result
    Insert(AnnotateArgs),
    /// Wrap the selection in `@injector-start`/`@injector-stop` markers and print the result
    Wrap(AnnotateArgs),
}

/// Arguments of `fold`.
#[derive(Args, Debug)]
pub struct FoldArgs {
    /// File to preview
    pub file: PathBuf,

    /// JSON settings file (keys flat, dotted, or nested under `inlineInjectorIdFold`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: PathBuf,

    /// Language id of the file (defaults to the first supported language)
    #[arg(long, short = 'l')]
    pub language: Option<String>,

    /// Cursor or selection, `LINE:COL` or `LINE:COL-LINE:COL` (0-based, repeatable)
    #[arg(long, short = 's', value_name = "RANGE")]
    pub selection: Vec<SelectionArg>,

    /// Visible lines, `START:END` (0-based, inclusive)
    #[arg(long, value_name = "RANGE")]
    pub visible: Option<VisibleArg>,

    /// Start with folding toggled off
    #[arg(long)]
    pub inactive: bool,

    /// Print the decorations as JSON instead of the masked text
    #[arg(long)]
    pub json: bool,
}

/// Arguments of `insert` and `wrap`.
#[derive(Args, Debug)]
pub struct AnnotateArgs {
    /// File to annotate
    pub file: PathBuf,

    /// Injector id catalog (`{"result": [{"title", "injectorId"}]}`)
    #[arg(long, value_name = "PATH")]
    pub catalog: PathBuf,

    /// Catalog entry to pick, by title or injector id
    #[arg(long)]
    pub pick: String,

    /// Value for ids of the form `prefix-{placeholder}`
    #[arg(long)]
    pub value: Option<String>,

    /// Primary selection, `LINE:COL` or `LINE:COL-LINE:COL` (0-based)
    #[arg(long, short = 's', value_name = "RANGE")]
    pub selection: SelectionArg,
}

/// A parsed `--selection` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionArg {
    /// Anchor.
    pub anchor: Position,
    /// Caret.
    pub caret: Position,
}

impl FromStr for SelectionArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (anchor, caret) = match s.split_once('-') {
            Some((anchor, caret)) => (parse_position(anchor)?, parse_position(caret)?),
            None => {
                let pos = parse_position(s)?;
                (pos, pos)
            }
        };
        Ok(Self { anchor, caret })
    }
}

/// A parsed `--visible` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleArg(pub LineRange);

impl FromStr for VisibleArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = parse_pair(s)?;
        if end < start {
            return Err(format!("visible range '{}' ends before it starts", s));
        }
        Ok(Self(LineRange::new(start, end)))
    }
}

fn parse_position(s: &str) -> Result<Position, String> {
    let (line, column) = parse_pair(s)?;
    Ok(Position::new(line, column))
}

fn parse_pair(s: &str) -> Result<(usize, usize), String> {
    let (a, b) = s
        .split_once(':')
        .ok_or_else(|| format!("expected 'A:B', got '{}'", s))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<usize>()
            .map_err(|e| format!("invalid number '{}': {}", part, e))
    };
    Ok((parse(a)?, parse(b)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_arg_forms() {
        assert_eq!(
            "3:4".parse::<SelectionArg>().unwrap(),
            SelectionArg {
                anchor: Position::new(3, 4),
                caret: Position::new(3, 4),
            }
        );
        assert_eq!(
            "1:0-2:7".parse::<SelectionArg>().unwrap().caret,
            Position::new(2, 7)
        );
        assert!("1".parse::<SelectionArg>().is_err());
    }

    #[test]
    fn test_visible_arg_rejects_reversed_range() {
        assert_eq!(
            "10:40".parse::<VisibleArg>().unwrap(),
            VisibleArg(LineRange::new(10, 40))
        );
        assert!("40:10".parse::<VisibleArg>().is_err());
    }

    #[test]
    fn test_cli_parses_fold_subcommand() {
        let cli = Cli::try_parse_from([
            "fold-preview",
            "-vv",
            "fold",
            "src/app.ts",
            "--config",
            "settings.json",
            "-s",
            "4:2",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        let Command::Fold(args) = cli.command else {
            panic!("expected fold");
        };
        assert_eq!(args.selection.len(), 1);
        assert!(!args.json);
    }
}
