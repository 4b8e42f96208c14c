//! Read-only batch views - verification, report, timeline, map, QR

use herbtrace::api::{self, ScanRequest};
use herbtrace::core::services::Ledger;
use herbtrace::output::{OutputMode, render};

/// Verify a batch; with `strict`, an invalid batch exits with status 1
pub fn verify(ledger: &Ledger, id: &str, strict: bool, mode: OutputMode) -> anyhow::Result<()> {
    let data = api::verify_batch(ledger, id)?;
    render(&data, mode);

    if strict && !data.verification.valid {
        std::process::exit(1);
    }
    Ok(())
}

/// Print the compliance report
pub fn report(ledger: &Ledger, id: &str, mode: OutputMode) -> anyhow::Result<()> {
    render(&api::get_report(ledger, id)?, mode);
    Ok(())
}

/// Print the provenance timeline
pub fn timeline(ledger: &Ledger, id: &str, mode: OutputMode) -> anyhow::Result<()> {
    render(&api::get_timeline(ledger, id)?, mode);
    Ok(())
}

/// Print harvest locations
pub fn map(ledger: &Ledger, id: &str, mode: OutputMode) -> anyhow::Result<()> {
    render(&api::get_map(ledger, id)?, mode);
    Ok(())
}

/// Print the QR payload
pub fn qr(ledger: &Ledger, id: &str, mode: OutputMode) -> anyhow::Result<()> {
    render(&api::get_qr(ledger, id)?, mode);
    Ok(())
}

/// Resolve a scanned payload and verify the batch
pub fn scan(ledger: &Ledger, payload: &str, mode: OutputMode) -> anyhow::Result<()> {
    let req = ScanRequest {
        payload: payload.to_string(),
    };
    render(&api::scan(ledger, &req)?, mode);
    Ok(())
}
