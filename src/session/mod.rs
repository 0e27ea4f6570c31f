//! Session layer: screens, the mismatch timer contract, and the
//! presentation adapter.
//!
//! ## Key Types
//!
//! - `SessionController`: Start / Playing / Results routing around one `MatchEngine`
//! - `ClearTicket`: Generation-tagged permission to clear a pending mismatch
//! - `BoardView`: Render-ready board state
//! - `SessionObserver`: Callback seam for re-rendering on change

pub mod controller;
pub mod view;

pub use controller::{ClearTicket, RevealResponse, Screen, SessionController};
pub use view::{BoardView, CardFace, CardView, SessionEvent, SessionObserver};
