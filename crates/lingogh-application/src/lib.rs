//! Feature managers and the tutor session shell.

pub mod bootstrap;
pub mod chat_manager;
pub mod creative_session;
pub mod plan_manager;
pub mod shell;

pub use chat_manager::ChatTranscriptManager;
pub use creative_session::CreativeImageSession;
pub use plan_manager::DailyPlanManager;
pub use shell::{TutorServices, TutorShell};
