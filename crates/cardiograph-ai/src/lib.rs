pub mod factory;
pub mod gemini_provider;
pub mod prompt;
pub mod report_provider;
pub mod template_provider;

pub use factory::*;
pub use gemini_provider::{GeminiConfig, GeminiProvider};
pub use prompt::*;
pub use report_provider::*;
pub use template_provider::TemplateProvider;
