//! Text-triggered completion over the reflected model module.
//!
//! The current line is checked against three fixed patterns, in this order:
//!
//! 1. line ends with `self.pydantic_module.` → list the module's classes
//! 2. `self.pydantic_module.<Class>.` → list the class's fields
//! 3. `self.pydantic_module.<Class>.<field>.` → report the field's type
//!
//! Patterns 2 and 3 are anchored to the start of the (trimmed) line.

use std::sync::LazyLock;

use regex::Regex;
use tower_lsp::lsp_types::{CompletionItem, CompletionItemKind};

use crate::error::ServerError;

use super::module::{ModelModule, unwrap_annotation};

const CLASS_LIST_SUFFIX: &str = "self.pydantic_module.";

static MODEL_ATTRIBUTES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^self\.pydantic_module\.([^.]*)\.$").expect("valid attribute pattern")
});

static ATTRIBUTE_FIELD_INFO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^self\.pydantic_module\.([^.]*)\.([^.]*)\.$").expect("valid field-info pattern")
});

/// What the current line is asking for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionQuery {
    /// The classes defined in the model module.
    Classes,
    /// The annotated fields of one class.
    ClassAttributes { class: String },
    /// The underlying type of one field.
    AttributeType { class: String, attribute: String },
}

/// Match the trimmed current line against the fixed pattern sequence.
pub fn parse_completion_query(line: &str) -> Option<CompletionQuery> {
    if line.ends_with(CLASS_LIST_SUFFIX) {
        return Some(CompletionQuery::Classes);
    }
    if let Some(caps) = MODEL_ATTRIBUTES.captures(line) {
        return Some(CompletionQuery::ClassAttributes {
            class: caps[1].to_string(),
        });
    }
    if let Some(caps) = ATTRIBUTE_FIELD_INFO.captures(line) {
        return Some(CompletionQuery::AttributeType {
            class: caps[1].to_string(),
            attribute: caps[2].to_string(),
        });
    }
    None
}

fn item(label: String, kind: CompletionItemKind) -> CompletionItem {
    CompletionItem {
        label,
        kind: Some(kind),
        ..Default::default()
    }
}

/// Build the completion items for a query against the reflected module.
///
/// Unknown classes and attributes in the type query become sentinel items
/// rather than errors; an unknown class in the attribute listing yields an
/// empty list.
pub fn completion_items(query: &CompletionQuery, module: &ModelModule) -> Vec<CompletionItem> {
    match query {
        CompletionQuery::Classes => module
            .class_names()
            .map(|name| item(name.to_string(), CompletionItemKind::CLASS))
            .collect(),

        CompletionQuery::ClassAttributes { class } => match module.class(class) {
            Some(class) => class
                .fields
                .iter()
                .map(|field| item(field.name.clone(), CompletionItemKind::FIELD))
                .collect(),
            None => Vec::new(),
        },

        CompletionQuery::AttributeType { class, attribute } => {
            let Some(model_class) = module.class(class) else {
                let sentinel = ServerError::class_not_found(class.clone()).to_string();
                return vec![item(sentinel, CompletionItemKind::TEXT)];
            };
            match model_class.field(attribute) {
                Some(field) => {
                    let label =
                        format!("attribute type : {}", unwrap_annotation(&field.annotation));
                    vec![item(label, CompletionItemKind::TEXT)]
                }
                None => {
                    let sentinel = ServerError::attribute_not_found(class.clone()).to_string();
                    vec![item(sentinel, CompletionItemKind::TEXT)]
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample_module() -> ModelModule {
        ModelModule::parse(
            "class Person:\n    name: str\n    age: Optional[int] = None\n\nclass Address:\n    street: str\n",
        )
    }

    #[rstest]
    #[case::bare_trigger("self.pydantic_module.", Some(CompletionQuery::Classes))]
    #[case::trigger_mid_statement(
        "value = self.pydantic_module.",
        Some(CompletionQuery::Classes)
    )]
    #[case::class_attributes(
        "self.pydantic_module.Person.",
        Some(CompletionQuery::ClassAttributes { class: "Person".to_string() })
    )]
    #[case::attribute_type(
        "self.pydantic_module.Person.age.",
        Some(CompletionQuery::AttributeType {
            class: "Person".to_string(),
            attribute: "age".to_string(),
        })
    )]
    #[case::no_trailing_dot("self.pydantic_module.Person", None)]
    #[case::unrelated_line("import os", None)]
    // Patterns 2 and 3 are start-anchored, unlike the suffix check
    #[case::prefixed_class_access("x = self.pydantic_module.Person.", None)]
    fn test_parse_completion_query(
        #[case] line: &str,
        #[case] expected: Option<CompletionQuery>,
    ) {
        assert_eq!(parse_completion_query(line), expected);
    }

    #[test]
    fn test_class_listing() {
        let items = completion_items(&CompletionQuery::Classes, &sample_module());
        let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["Person", "Address"]);
        assert!(
            items
                .iter()
                .all(|i| i.kind == Some(CompletionItemKind::CLASS))
        );
    }

    #[test]
    fn test_attribute_listing() {
        let query = CompletionQuery::ClassAttributes {
            class: "Person".to_string(),
        };
        let items = completion_items(&query, &sample_module());
        let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["name", "age"]);
    }

    #[test]
    fn test_attribute_listing_unknown_class_is_empty() {
        let query = CompletionQuery::ClassAttributes {
            class: "Ghost".to_string(),
        };
        assert!(completion_items(&query, &sample_module()).is_empty());
    }

    #[test]
    fn test_attribute_type_unwraps_generics() {
        let query = CompletionQuery::AttributeType {
            class: "Person".to_string(),
            attribute: "age".to_string(),
        };
        let items = completion_items(&query, &sample_module());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].label, "attribute type : int");
    }

    #[test]
    fn test_attribute_type_unknown_class_sentinel() {
        let query = CompletionQuery::AttributeType {
            class: "Ghost".to_string(),
            attribute: "age".to_string(),
        };
        let items = completion_items(&query, &sample_module());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].label, "No such class exist Ghost");
    }

    #[test]
    fn test_attribute_type_unknown_attribute_sentinel() {
        let query = CompletionQuery::AttributeType {
            class: "Person".to_string(),
            attribute: "ghost".to_string(),
        };
        let items = completion_items(&query, &sample_module());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].label, "No such attribute exist for Person");
    }
}
