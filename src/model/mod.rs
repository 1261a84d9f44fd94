pub mod action;
pub mod browse_state;
pub mod catalog;
pub mod document;
pub mod session;
pub mod view;

pub use action::*;
pub use browse_state::*;
pub use catalog::*;
pub use document::*;
pub use session::*;
pub use view::*;
