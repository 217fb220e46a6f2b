//! Host UI seam and id resolution.

use crate::catalog::{IdCatalog, IdEntry};
use crate::error::AnnotateError;

/// An input-box request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRequest {
    /// Greyed-out hint inside the box.
    pub placeholder: String,
    /// Text shown above the box.
    pub prompt: String,
}

/// Quick-pick, input box and error toast, provided by the host.
///
/// `None` from [`pick`](Prompt::pick) or [`input`](Prompt::input) means the user dismissed it.
pub trait Prompt {
    /// Let the user choose one entry.
    fn pick<'a>(&mut self, items: &'a [IdEntry]) -> Option<&'a IdEntry>;

    /// Ask for a free-form value.
    fn input(&mut self, request: &InputRequest) -> Option<String>;

    /// Show an error message.
    fn show_error(&mut self, message: &str);
}

/// Pick an id from `catalog` and fill in its placeholder part.
///
/// An id of the form `prefix-{what}` asks for a value and becomes `prefix-<value>`. Any other id
/// (no dash, or more than one) is used verbatim.
pub fn resolve_injector_id<P>(catalog: &IdCatalog, prompt: &mut P) -> Result<String, AnnotateError>
where
    P: Prompt + ?Sized,
{
    let entry = prompt
        .pick(catalog.entries())
        .ok_or(AnnotateError::PromptCancelled)?;

    let parts: Vec<&str> = entry.injector_id.split('-').collect();
    let [prefix, placeholder] = parts.as_slice() else {
        return Ok(entry.injector_id.clone());
    };

    let request = InputRequest {
        placeholder: "Enter name".to_string(),
        prompt: format!("Enter {}", placeholder.replacen('{', "", 1).replacen('}', "", 1)),
    };
    let value = prompt
        .input(&request)
        .ok_or(AnnotateError::PromptCancelled)?;

    Ok(format!("{}-{}", prefix, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Scripted {
        pick: Option<usize>,
        input: Option<String>,
        requests: Vec<InputRequest>,
    }

    impl Prompt for Scripted {
        fn pick<'a>(&mut self, items: &'a [IdEntry]) -> Option<&'a IdEntry> {
            self.pick.and_then(|i| items.get(i))
        }

        fn input(&mut self, request: &InputRequest) -> Option<String> {
            self.requests.push(request.clone());
            self.input.clone()
        }

        fn show_error(&mut self, _message: &str) {}
    }

    fn catalog() -> IdCatalog {
        IdCatalog::from_entries(vec![
            IdEntry::new("Auth", "auth-{name}"),
            IdEntry::new("Plain", "metrics"),
            IdEntry::new("Nested", "a-b-c"),
        ])
    }

    #[test]
    fn test_two_part_id_asks_for_value() {
        let mut prompt = Scripted {
            pick: Some(0),
            input: Some("login".to_string()),
            ..Default::default()
        };

        let id = resolve_injector_id(&catalog(), &mut prompt).unwrap();

        assert_eq!(id, "auth-login");
        assert_eq!(
            prompt.requests,
            vec![InputRequest {
                placeholder: "Enter name".to_string(),
                prompt: "Enter name".to_string(),
            }]
        );
    }

    #[test]
    fn test_other_ids_are_verbatim() {
        for (index, expected) in [(1, "metrics"), (2, "a-b-c")] {
            let mut prompt = Scripted {
                pick: Some(index),
                ..Default::default()
            };
            assert_eq!(resolve_injector_id(&catalog(), &mut prompt).unwrap(), expected);
            assert!(prompt.requests.is_empty());
        }
    }

    #[test]
    fn test_dismissal_cancels() {
        let mut prompt = Scripted::default();
        assert!(matches!(
            resolve_injector_id(&catalog(), &mut prompt),
            Err(AnnotateError::PromptCancelled)
        ));

        let mut prompt = Scripted {
            pick: Some(0),
            input: None,
            ..Default::default()
        };
        assert!(matches!(
            resolve_injector_id(&catalog(), &mut prompt),
            Err(AnnotateError::PromptCancelled)
        ));
    }
}
