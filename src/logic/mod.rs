pub mod catalog;
pub mod confirm;
pub mod console;
pub mod driver;
pub mod effects;
pub mod pagination;
pub mod session_gate;
pub mod table;

pub use confirm::{ConfirmState, ConfirmationWorkflow, PendingAction};
pub use console::{Console, Event};
pub use driver::Driver;
pub use effects::{execute, Completion, Reply, Request, Slot, Ticket};
pub use pagination::{format_count, pager_view};
