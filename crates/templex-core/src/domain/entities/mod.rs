pub mod answers;
pub mod question;
pub mod render_context;
pub mod subproject;
pub mod task;
pub mod template;
pub mod template_ref;

pub use answers::AnswersMap;
pub use question::{Choice, Question, QuestionType};
pub use render_context::RenderContext;
pub use subproject::Subproject;
pub use task::{Migration, MigrationStage, Task, TaskCommand};
pub use template::{EnvOps, Template};
pub use template_ref::TemplateRef;
