pub mod field;
pub mod form;
pub mod pointer;
pub mod task;
pub mod text;

pub use field::TextField;
pub use pointer::{ListenerId, PointerListeners, PointerSubscription};
pub use task::{TaskCompleted, TaskId, TaskKind, TaskSeq, TaskStarted, TaskState, Tasks};
pub use text::{mask, truncate_start_with_ellipsis, truncate_with_ellipsis};
