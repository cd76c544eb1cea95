//! Editor model - documents, their lines and views, and the session
//!
//! All state lives here; `update` mutates it in response to messages.

pub mod document;
pub mod line;
pub mod line_store;
pub mod mark;
pub mod session;
pub mod view;

pub use document::{Document, DocumentSettings, SCRATCH_NAME};
pub use line::{Highlight, HighlightTone, Lifetime, Line};
pub use line_store::{LineId, LineStore};
pub use mark::{compare_points, Mark};
pub use session::{DocumentId, OpenOutcome, Session};
pub use view::{Point, Scroll, View, ViewSlot, ViewportMetrics, LINE_SPACING};
