//! Identifier generation

use rand::Rng;

use super::event::EventKind;

/// Prefix of every generated batch ID
pub const BATCH_ID_PREFIX: &str = "ASH";

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a batch ID of the form `ASH-{unix_millis}-{9 base36 chars}`
#[must_use]
pub fn generate_batch_id() -> String {
    let ts = chrono::Utc::now().timestamp_millis();
    format!("{BATCH_ID_PREFIX}-{ts}-{}", random_base36(9))
}

/// Generate an event ID of the form `{kind}-{unix_millis}-{4 base36 chars}`
#[must_use]
pub fn generate_event_id(kind: EventKind) -> String {
    let ts = chrono::Utc::now().timestamp_millis();
    format!("{}-{ts}-{}", kind.id_prefix(), random_base36(4))
}

/// Random lowercase base36 string of the given length
#[must_use]
pub fn random_base36(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len).map(|_| char::from(BASE36[rng.gen_range(0..BASE36.len())])).collect()
}
