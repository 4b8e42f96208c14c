//! Record supply-chain events on a batch

use crate::cli::app::RecordAction;
use herbtrace::api::{
    self, CollectionInput, EventInput, ProcessingInput, QualityTestInput, RecordEventRequest,
    TransferInput,
};
use herbtrace::core::models::UserRole;
use herbtrace::core::services::Ledger;
use herbtrace::output::{OutputMode, render};

/// Record one event
pub fn record(ledger: &Ledger, action: RecordAction, mode: OutputMode) -> anyhow::Result<()> {
    let (batch_id, role, event) = match action {
        RecordAction::Collection {
            batch,
            collector,
            species,
            lat,
            lng,
            location,
            moisture,
            role,
        } => {
            let species = match species {
                Some(s) => s,
                None => ledger.require_batch(&batch)?.species,
            };
            let input = CollectionInput {
                collector_name: collector,
                species,
                latitude: lat,
                longitude: lng,
                location_name: location,
                moisture,
                ..CollectionInput::default()
            };
            (batch, role, EventInput::Collection(input))
        },
        RecordAction::Processing {
            batch,
            processor,
            step,
            temperature,
            duration,
            notes,
            role,
        } => {
            let input = ProcessingInput {
                processor_name: processor,
                step_type: step,
                temperature,
                duration,
                notes,
                ..ProcessingInput::default()
            };
            (batch, role, EventInput::Processing(input))
        },
        RecordAction::Test {
            batch,
            lab,
            test_type,
            value,
            unit,
            standard,
            failed,
            certificate,
            role,
        } => {
            let input = QualityTestInput {
                id: None,
                timestamp: None,
                lab_id: None,
                lab_name: lab,
                test_type,
                passed: !failed,
                value,
                unit,
                standard,
                certificate_url: certificate,
            };
            (batch, role, EventInput::QualityTest(input))
        },
        RecordAction::Transfer {
            batch,
            from,
            to,
            entity_type,
            quantity,
            signature,
            role,
        } => {
            let input = TransferInput {
                id: None,
                timestamp: None,
                from_entity: from,
                to_entity: to,
                entity_type,
                quantity,
                unit: None,
                signature,
            };
            (batch, role, EventInput::Transfer(input))
        },
    };

    submit(ledger, &batch_id, role, event, mode)
}

fn submit(
    ledger: &Ledger,
    batch_id: &str,
    role: UserRole,
    event: EventInput,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let req = RecordEventRequest { role, event };
    let recorded = api::record_event(ledger, batch_id, &req)?;
    render(&recorded, mode);
    Ok(())
}
