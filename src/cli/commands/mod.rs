//! Command implementations

mod batch;
mod inspect;
mod record;
#[cfg(feature = "ui")]
mod serve;
mod status;

pub use batch::batch;
pub use inspect::{map, qr, report, scan, timeline, verify};
pub use record::record;
#[cfg(feature = "ui")]
pub use serve::{ServeOptions, serve};
pub use status::{demo, herbs, roles, status};
