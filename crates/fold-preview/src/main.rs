//! Headless inline-fold preview.
//!
//! Runs the fold controller against an in-memory editor and prints the document as the editor
//! would show it, or applies the injector-id insert/wrap commands to a file and prints the result.

mod cli;
mod render;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use inline_fold_annotate::{
    AnnotateError, IdCatalog, IdEntry, InputRequest, Prompt, apply_edits, insert_edits, wrap_edits,
};
use inline_fold_core::{
    CONFIG_NAMESPACE, FoldConfig, FoldController, MaskStyle, MemoryEditor, RefreshOutcome,
    ScopedConfig, Selection,
};
use serde_json::{Map, Value, json};
use tracing::{debug, info};

use crate::cli::{AnnotateArgs, Cli, Command, FoldArgs};

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    match cli.command {
        Command::Fold(args) => run_fold(args),
        Command::Insert(args) => run_annotate(args, false),
        Command::Wrap(args) => run_annotate(args, true),
    }
}

fn setup_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_settings(path: &Path) -> Result<Map<String, Value>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings {}", path.display()))?;
    match serde_json::from_str::<Value>(&raw)
        .with_context(|| format!("failed to parse settings {}", path.display()))?
    {
        Value::Object(map) => Ok(map),
        other => bail!("settings must be a JSON object, got {}", other),
    }
}

fn run_fold(args: FoldArgs) -> Result<()> {
    let settings = load_settings(&args.config)?;
    let config = FoldConfig::from_source(&ScopedConfig::new(&settings, CONFIG_NAMESPACE))?;
    let text = fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    let language = args
        .language
        .or_else(|| config.supported_languages.first().cloned())
        .ok_or_else(|| anyhow!("no --language given and no supported languages configured"))?;

    let mut editor = MemoryEditor::new(language, &text);
    if let Some(visible) = args.visible {
        editor.set_visible_range(visible.0);
    }
    editor.set_selections(
        args.selection
            .iter()
            .map(|s| Selection::new(s.anchor, s.caret))
            .collect(),
    );

    let mut controller = FoldController::new();
    controller
        .update_configs(&mut editor, &config)
        .context("fold pattern rejected")?;

    let mut outcome = controller.active_editor(&mut editor);
    if args.inactive {
        outcome = controller.toggle(&mut editor);
    }

    let partition = match outcome {
        RefreshOutcome::Applied(partition) => partition,
        RefreshOutcome::ScanFailed(err) => return Err(err).context("scan aborted"),
        other => bail!("nothing to preview: {:?}", other),
    };
    info!(
        hover = partition.hover.len(),
        mask = partition.mask.len(),
        out_of_viewport = partition.out_of_viewport,
        "preview computed"
    );

    if args.json {
        let report = json!({
            "viewport": {
                "start": controller.viewport().start_line,
                "end": controller.viewport().end_line,
            },
            "hover": render::decorations_json(&partition.hover),
            "mask": render::decorations_json(&partition.mask),
            "suspended": partition.suspended.map(|s| format!("{:?}", s)),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let style = MaskStyle::from_config(&config);
    print!("{}", render::masked_text(&text, &partition.mask, &style));
    Ok(())
}

/// Answers the command prompts from the command line.
struct ArgsPrompt<'a> {
    pick: &'a str,
    value: Option<&'a str>,
}

impl Prompt for ArgsPrompt<'_> {
    fn pick<'e>(&mut self, items: &'e [IdEntry]) -> Option<&'e IdEntry> {
        items
            .iter()
            .find(|entry| entry.title == self.pick || entry.injector_id == self.pick)
    }

    fn input(&mut self, request: &InputRequest) -> Option<String> {
        debug!(prompt = %request.prompt, "answering input box from --value");
        self.value.map(str::to_string)
    }

    fn show_error(&mut self, message: &str) {
        eprintln!("error: {}", message);
    }
}

fn run_annotate(args: AnnotateArgs, wrap: bool) -> Result<()> {
    let payload = fs::read_to_string(&args.catalog)
        .with_context(|| format!("failed to read catalog {}", args.catalog.display()))?;
    let catalog = IdCatalog::from_json(&payload)?;
    let text = fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    let mut editor = MemoryEditor::new("plaintext", &text);
    editor.set_selections(vec![Selection::new(
        args.selection.anchor,
        args.selection.caret,
    )]);

    let mut prompt = ArgsPrompt {
        pick: &args.pick,
        value: args.value.as_deref(),
    };
    let edits = if wrap {
        wrap_edits(&editor, &catalog, &mut prompt)
    } else {
        insert_edits(&editor, &catalog, &mut prompt)
    };

    let edits = match edits {
        Ok(edits) => edits,
        Err(AnnotateError::PromptCancelled) => {
            bail!("no catalog entry matches '{}' or --value is missing", args.pick)
        }
        Err(err) => return Err(err.into()),
    };
    print!("{}", apply_edits(&text, &edits));
    Ok(())
}
