// Headless UI controllers.
//
// The page is modeled as a small tree of shared `Node`s. Each controller is
// an explicit object bound to the nodes it needs; `bind` returns `None` when
// a required node is missing, so a page without a signup form simply has no
// signup controller.

pub mod dashboard;
pub mod element;
pub mod forms;
pub mod page;
pub mod platform;

pub use element::Node;
pub use page::Page;
