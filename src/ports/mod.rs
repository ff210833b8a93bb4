//! Ports (trait boundaries) for external collaborators.
//!
//! The match engine owns these traits; persistence, human input and board
//! presentation are supplied by adapters.

pub mod input;
pub mod presenter;
pub mod repository;

pub use input::MoveInput;
pub use presenter::Presenter;
pub use repository::SessionRepository;
