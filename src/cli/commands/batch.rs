//! Batch management command - create, list, show

use chrono::NaiveDate;

use crate::cli::app::BatchAction;
use herbtrace::api::{self, CollectionInput, CreateBatchRequest};
use herbtrace::core::models::{BatchStatus, UserRole};
use herbtrace::core::services::Ledger;
use herbtrace::output::{OutputMode, render};

/// Handle batch subcommands
pub fn batch(ledger: &Ledger, action: BatchAction, mode: OutputMode) -> anyhow::Result<()> {
    match action {
        BatchAction::Create {
            species,
            quantity,
            harvest_date,
            role,
            collector,
            lat,
            lng,
            location,
        } => {
            let collection = collector.map(|collector_name| CollectionInput {
                collector_name,
                species: species.clone(),
                latitude: lat,
                longitude: lng,
                location_name: location,
                ..CollectionInput::default()
            });
            create(ledger, species, quantity, harvest_date, role, collection, mode)
        },
        BatchAction::List { status } => list(ledger, status, mode),
        BatchAction::Show { id } => show(ledger, &id, mode),
    }
}

fn create(
    ledger: &Ledger,
    species: String,
    quantity: f64,
    harvest_date: Option<NaiveDate>,
    role: UserRole,
    collection: Option<CollectionInput>,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let req = CreateBatchRequest {
        role,
        species,
        harvest_date,
        quantity,
        collection,
    };
    let detail = api::create_batch(ledger, &req)?;

    if mode == OutputMode::Human {
        println!("Created batch {}\n", detail.batch.id);
    }
    render(&detail, mode);
    Ok(())
}

fn list(ledger: &Ledger, status: Option<BatchStatus>, mode: OutputMode) -> anyhow::Result<()> {
    let data = api::list_batches_with_status(ledger, status)?;

    render(&data, mode);
    if mode == OutputMode::Human && !data.batches.is_empty() {
        println!("{} batch(es) found.", data.batches.len());
    }
    Ok(())
}

fn show(ledger: &Ledger, id: &str, mode: OutputMode) -> anyhow::Result<()> {
    let detail = api::get_batch(ledger, id)?;
    render(&detail, mode);
    Ok(())
}
