use inline_fold_annotate::{
    AnnotateError, IdCatalog, IdEntry, InputRequest, Prompt, TextEdit, WRAP_EMPTY_SELECTION_MESSAGE,
    apply_edits, insert_edits, wrap_edits,
};
use inline_fold_core::{
    FoldConfig, FoldController, MemoryEditor, Position, RefreshOutcome, Selection,
};
use pretty_assertions::assert_eq;

/// Picks a fixed entry and answers every input box with the same value.
#[derive(Default)]
struct ScriptedPrompt {
    pick: Option<usize>,
    answer: Option<String>,
    picks_shown: usize,
    errors: Vec<String>,
}

impl ScriptedPrompt {
    fn choosing(index: usize, answer: &str) -> Self {
        Self {
            pick: Some(index),
            answer: Some(answer.to_string()),
            ..Default::default()
        }
    }
}

impl Prompt for ScriptedPrompt {
    fn pick<'a>(&mut self, items: &'a [IdEntry]) -> Option<&'a IdEntry> {
        self.picks_shown += 1;
        self.pick.and_then(|i| items.get(i))
    }

    fn input(&mut self, _request: &InputRequest) -> Option<String> {
        self.answer.clone()
    }

    fn show_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }
}

fn catalog() -> IdCatalog {
    IdCatalog::from_json(
        r#"{"result": [
            {"title": "Auth", "injectorId": "auth-{name}"},
            {"title": "Metrics", "injectorId": "metrics"}
        ]}"#,
    )
    .unwrap()
}

const SOURCE: &str = "function main() {\n    const user = load();\n    save(user);\n}\n";

fn editor_with(selection: Selection) -> MemoryEditor {
    let mut editor = MemoryEditor::new("typescript", SOURCE);
    editor.set_selections(vec![selection]);
    editor
}

#[test]
fn test_insert_at_caret_appends_marker() {
    let editor = editor_with(Selection::caret(Position::new(1, 24)));
    let mut prompt = ScriptedPrompt::choosing(1, "unused");

    let edits = insert_edits(&editor, &catalog(), &mut prompt).unwrap();

    assert_eq!(
        edits,
        vec![TextEdit::insert(
            Position::new(1, 24),
            " /** @injector-id: metrics */"
        )]
    );
    assert_eq!(
        apply_edits(SOURCE, &edits),
        "function main() {\n    const user = load(); /** @injector-id: metrics */\n    save(user);\n}\n"
    );
}

#[test]
fn test_insert_over_selection_adds_indented_line() {
    let editor = editor_with(Selection::new(Position::new(2, 15), Position::new(1, 6)));
    let mut prompt = ScriptedPrompt::choosing(0, "session");

    let edits = insert_edits(&editor, &catalog(), &mut prompt).unwrap();

    assert_eq!(
        apply_edits(SOURCE, &edits),
        "function main() {\n    /** @injector-id: auth-session */\n    const user = load();\n    save(user);\n}\n"
    );
}

#[test]
fn test_wrap_multi_line_selection() {
    let editor = editor_with(Selection::new(Position::new(1, 4), Position::new(2, 15)));
    let mut prompt = ScriptedPrompt::choosing(0, "persist");

    let edits = wrap_edits(&editor, &catalog(), &mut prompt).unwrap();

    assert_eq!(edits.len(), 2);
    assert_eq!(
        apply_edits(SOURCE, &edits),
        "function main() {\n    /** @injector-start: auth-persist */\n    const user = load();\n    save(user);\n    /** @injector-stop: auth-persist */\n}\n"
    );
}

#[test]
fn test_wrap_without_selection_reports_error_before_prompting() {
    let editor = editor_with(Selection::caret(Position::new(1, 4)));
    let mut prompt = ScriptedPrompt::choosing(0, "x");

    let err = wrap_edits(&editor, &catalog(), &mut prompt).unwrap_err();

    assert!(matches!(err, AnnotateError::EmptySelection));
    assert!(!err.is_silent());
    assert_eq!(prompt.errors, vec![WRAP_EMPTY_SELECTION_MESSAGE.to_string()]);
    assert_eq!(prompt.picks_shown, 0);
}

#[test]
fn test_dismissed_prompt_produces_no_edits() {
    let editor = editor_with(Selection::new(Position::new(1, 4), Position::new(1, 8)));

    let mut dismissed_pick = ScriptedPrompt::default();
    let err = wrap_edits(&editor, &catalog(), &mut dismissed_pick).unwrap_err();
    assert!(err.is_silent());

    let mut dismissed_input = ScriptedPrompt {
        pick: Some(0),
        ..Default::default()
    };
    let err = insert_edits(&editor, &catalog(), &mut dismissed_input).unwrap_err();
    assert!(matches!(err, AnnotateError::PromptCancelled));
    assert!(dismissed_input.errors.is_empty());
}

#[test]
fn test_wrapped_region_folds_behind_its_name() {
    let editor = editor_with(Selection::new(Position::new(1, 4), Position::new(2, 15)));
    let mut prompt = ScriptedPrompt::choosing(0, "persist");
    let edits = wrap_edits(&editor, &catalog(), &mut prompt).unwrap();
    let annotated = apply_edits(SOURCE, &edits);

    let mut editor = MemoryEditor::new("typescript", &annotated);
    let config = FoldConfig {
        regex: Some(
            r"(/\*\* @injector-start: [^*]*\*/)[\s\S]*?/\*\* @injector-stop:[^*]*\*/".to_string(),
        ),
        supported_languages: vec!["typescript".to_string()],
        ..FoldConfig::default()
    };
    let mut controller = FoldController::new();
    controller.update_configs(&mut editor, &config).unwrap();

    let RefreshOutcome::Applied(partition) = controller.active_editor(&mut editor) else {
        panic!("expected decorations");
    };
    assert_eq!(partition.mask.len(), 1);
    // Without a `name:` token the region has no display name.
    assert_eq!(partition.mask[0].label, None);
}
