//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the host (CLI, UI shell) and the domain, remote and
//! notification layers. It follows a unidirectional data flow:
//!
//! ```text
//! User Input → Events → Event Handler → Store / Form / Criteria → View Model
//!                            │                   │
//!                            ▼                   ▼
//!                         Actions          Remote + Notifier
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`form`]: Add/edit form buffer and payload coercion
//! - [`handler`]: Event processing and state transition coordinator
//! - [`modes`]: Form mode type
//! - [`state`]: Central application state and view model computation
//! - [`store`]: Optimistic product cache synchronized with the remote
//! - [`view`]: Filter and sort derivation
//!
//! # Example
//!
//! ```rust
//! use stocktake::app::{App, SortState};
//! use stocktake::notify::Notifier;
//! use stocktake::remote::MemoryRemote;
//!
//! let app = App::new(MemoryRemote::new(), Notifier::default());
//! assert_eq!(app.sort, SortState::default());
//! ```

pub mod actions;
pub mod form;
pub mod handler;
pub mod modes;
pub mod state;
pub mod store;
pub mod view;

pub use actions::Action;
pub use form::{FormController, FormState};
pub use handler::{handle_event, Event};
pub use modes::FormMode;
pub use state::App;
pub use store::{BusyFlag, Confirmation, ProductStore};
pub use view::{derive, SortDirection, SortKind, SortState};
