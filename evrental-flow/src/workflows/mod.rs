//! The workflows of the rental client, each declared once and interpreted by [`Flow`](crate::Flow).
//!
//! Each module exposes its state, trigger and field names under `names`, e.g.
//! [`booking::names::STATION_ID`].

pub mod booking;
pub use booking::booking;

pub mod check_in;
pub use check_in::check_in;

pub mod registration;
pub use registration::registration;

pub const NEXT: &str = "next";
pub const BACK: &str = "back";
pub const REJECT: &str = "reject";
