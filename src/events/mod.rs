//! Event types exchanged between systems and observers.
//!
//! Gimmicks never call each other directly. The overlap detector, the timer
//! system and the gimmicks themselves trigger events; observers react.
//!
//! Submodules:
//! - [`button`] – press/release edges reported to a sequence manager
//! - [`overlap`] – a body entering or leaving a trigger volume
//! - [`sequence`] – a sequence solved or a wrong button pressed
//! - [`timer`] – a one-shot deferred callback firing
pub mod button;
pub mod overlap;
pub mod sequence;
pub mod timer;
