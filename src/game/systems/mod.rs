//! Game systems - Functions that advance the session
//!
//! Each system takes `&mut SessionContext` and runs to completion; side
//! effects are queued on the context for the driver.
//!
//! - [`coordinator`] - Accepts, validates, applies and broadcasts moves
//! - [`input`] - Pointer gesture state machine
//! - [`network_move`] - Transport events and inbound frames

pub mod coordinator;
pub mod input;
pub mod network_move;

pub use coordinator::{
    abandon_promotion, apply_remote_move, attempt_local_move, handle_provider_reply, phase,
    reconcile, request_provider_turn, resolve_promotion, CoordinatorPhase, MoveOrigin,
    MoveOutcome, RejectReason,
};
pub use input::{handle_pointer, interaction_state, revalidate_selection, InteractionState};
pub use network_move::{handle_frame, handle_transport_event};
