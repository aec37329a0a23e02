pub mod completion;
pub mod module;

pub use completion::{CompletionQuery, completion_items, parse_completion_query};
pub use module::{
    ModelClass, ModelField, ModelModule, expand_user, load_model_module, resolve_module_path,
    unwrap_annotation,
};
