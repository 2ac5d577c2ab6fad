pub mod assemble;
pub mod category;
pub mod encode;
pub mod error;
pub mod normalize;
pub mod rules;

pub use assemble::ItemAssembler;
pub use category::split_category_path;
pub use error::PipelineError;
pub use normalize::{normalize_field, title_case};
pub use rules::{FieldRule, RuleTable};
