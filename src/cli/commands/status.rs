//! Ledger overview, catalogs and demo data

use herbtrace::api;
use herbtrace::core::services::Ledger;
use herbtrace::output::{OutputMode, render};

/// Summarize all batches
pub fn status(ledger: &Ledger, mode: OutputMode) -> anyhow::Result<()> {
    render(&api::get_status(ledger)?, mode);
    Ok(())
}

/// List known species
pub fn herbs(mode: OutputMode) -> anyhow::Result<()> {
    render(&api::list_herbs(), mode);
    Ok(())
}

/// List roles and their permissions
pub fn roles(mode: OutputMode) -> anyhow::Result<()> {
    render(&api::list_roles(), mode);
    Ok(())
}

/// Add the demo batch
pub fn demo(ledger: &Ledger, mode: OutputMode) -> anyhow::Result<()> {
    let detail = api::seed_demo(ledger)?;

    if mode == OutputMode::Human {
        println!("Added demo batch {}\n", detail.batch.id);
    }
    render(&detail, mode);
    Ok(())
}
