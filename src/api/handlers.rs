//! Pure API handlers
//!
//! These handlers contain business logic and are HTTP-agnostic.
//! They take a ledger plus typed input and return `Result<T, ApiError>`.

use chrono::Utc;

use crate::core::models::{Batch, BatchStatus, Event, UserRole, herb};
use crate::core::services::{Ledger, Verification};

use super::error::ApiError;
use super::types::{
    BatchDetailData, BatchSummary, BatchesData, CreateBatchRequest, EventInput, EventRecordedData,
    HerbsData, MapData, QrData, RecordEventRequest, ReportData, RoleInfo, RolesData, ScanRequest,
    StatusCounts, StatusData, TimelineData, VerifyData,
};

// =============================================================================
// STATUS
// =============================================================================

/// Get overall ledger status
pub fn get_status(ledger: &Ledger) -> Result<StatusData, ApiError> {
    let batches = ledger.list_batches()?;

    let mut counts = StatusCounts::default();
    let mut verified = 0;
    for batch in &batches {
        counts.add(batch.status);
        if ledger.score(batch).valid {
            verified += 1;
        }
    }

    Ok(StatusData {
        batches: counts,
        verified,
        zones: ledger.settings().zones.len(),
    })
}

// =============================================================================
// BATCHES
// =============================================================================

/// List all batches with their scores
pub fn list_batches(ledger: &Ledger) -> Result<BatchesData, ApiError> {
    list_batches_with_status(ledger, None)
}

/// List batches in one lifecycle status, or all of them
pub fn list_batches_with_status(
    ledger: &Ledger,
    status: Option<BatchStatus>,
) -> Result<BatchesData, ApiError> {
    let batches: Vec<_> = ledger
        .list_batches_by_status(status)?
        .into_iter()
        .map(|batch| summarize(ledger, batch))
        .collect();

    Ok(BatchesData { batches })
}

/// Get a single batch by ID
pub fn get_batch(ledger: &Ledger, id: &str) -> Result<BatchDetailData, ApiError> {
    let batch = ledger.require_batch(id)?;
    let verification = ledger.score(&batch);
    let herb = herb::lookup(&batch.species).copied();

    Ok(BatchDetailData {
        batch,
        verification,
        herb,
    })
}

/// Create a new batch, optionally with its harvest record
pub fn create_batch(ledger: &Ledger, req: &CreateBatchRequest) -> Result<BatchDetailData, ApiError> {
    if req.species.trim().is_empty() {
        return Err(ApiError::bad_request("Species cannot be empty"));
    }
    // Validate the harvest record up front so a bad one leaves no empty batch behind
    let collection = match &req.collection {
        Some(input) if input.collector_name.trim().is_empty() => {
            return Err(ApiError::bad_request("Collector name cannot be empty"));
        },
        Some(input) => {
            let event = EventInput::Collection(input.clone()).into_event();
            event.validate()?;
            Some(event)
        },
        None => None,
    };

    let harvest_date = req.harvest_date.unwrap_or_else(|| Utc::now().date_naive());
    let batch = ledger.create_batch_as(req.role, &req.species, harvest_date, req.quantity)?;

    if let Some(event) = collection {
        ledger.add_event(&batch.id, req.role, event)?;
    }

    get_batch(ledger, &batch.id)
}

/// Record an event on a batch
pub fn record_event(
    ledger: &Ledger,
    batch_id: &str,
    req: &RecordEventRequest,
) -> Result<EventRecordedData, ApiError> {
    let event: Event = req.event.clone().into_event();
    let event_id = event.id().to_string();
    let kind = event.kind();

    let batch = ledger.add_event(batch_id, req.role, event)?;

    Ok(EventRecordedData {
        batch_id: batch.id,
        event_id,
        kind,
        status: batch.status,
    })
}

// =============================================================================
// VERIFICATION
// =============================================================================

/// Verify a batch. Unknown batches are not an error; they verify as invalid.
pub fn verify_batch(ledger: &Ledger, id: &str) -> Result<VerifyData, ApiError> {
    let batch = ledger.get_batch(id)?;
    let verification = batch
        .as_ref()
        .map_or_else(Verification::not_found, |b| ledger.score(b));
    Ok(verify_data(id, batch, verification))
}

/// Compliance report for a batch
pub fn get_report(ledger: &Ledger, id: &str) -> Result<ReportData, ApiError> {
    Ok(ReportData {
        report: ledger.generate_report(id)?,
    })
}

/// Resolve a scanned QR payload and verify the batch it names
pub fn scan(ledger: &Ledger, req: &ScanRequest) -> Result<VerifyData, ApiError> {
    let (batch_id, verification) = ledger.scan(&req.payload)?;
    let batch = ledger.get_batch(&batch_id)?;
    Ok(verify_data(&batch_id, batch, verification))
}

// =============================================================================
// TIMELINE, MAP, QR
// =============================================================================

/// Chronological timeline of a batch
pub fn get_timeline(ledger: &Ledger, id: &str) -> Result<TimelineData, ApiError> {
    Ok(TimelineData {
        batch_id: id.to_string(),
        entries: ledger.timeline(id)?,
    })
}

/// Harvest points of a batch
pub fn get_map(ledger: &Ledger, id: &str) -> Result<MapData, ApiError> {
    Ok(MapData {
        batch_id: id.to_string(),
        map: ledger.map_view(id)?,
    })
}

/// QR payload of a batch
pub fn get_qr(ledger: &Ledger, id: &str) -> Result<QrData, ApiError> {
    let batch = ledger.require_batch(id)?;
    Ok(QrData {
        batch_id: batch.id,
        payload: batch.qr_code,
    })
}

// =============================================================================
// CATALOG & DEMO
// =============================================================================

/// Known species
#[must_use]
pub fn list_herbs() -> HerbsData {
    HerbsData {
        herbs: herb::CATALOG.to_vec(),
    }
}

/// Supply-chain roles and their write permissions
#[must_use]
pub fn list_roles() -> RolesData {
    RolesData {
        roles: UserRole::ALL.into_iter().map(RoleInfo::from).collect(),
    }
}

/// Seed the demo batch
pub fn seed_demo(ledger: &Ledger) -> Result<BatchDetailData, ApiError> {
    let batch = ledger.seed_demo_data()?;
    get_batch(ledger, &batch.id)
}

// =============================================================================
// HELPERS
// =============================================================================

fn summarize(ledger: &Ledger, batch: Batch) -> BatchSummary {
    let verification = ledger.score(&batch);
    BatchSummary {
        common_name: herb::lookup(&batch.species).map(|h| h.common_name.to_string()),
        events: batch.events.len(),
        compliance_score: verification.compliance_score,
        valid: verification.valid,
        id: batch.id,
        species: batch.species,
        status: batch.status,
        harvest_date: batch.harvest_date,
        total_quantity: batch.total_quantity,
        unit: batch.unit,
    }
}

fn verify_data(id: &str, batch: Option<Batch>, verification: Verification) -> VerifyData {
    VerifyData {
        batch_id: id.to_string(),
        found: batch.is_some(),
        status: batch.as_ref().map(|b| b.status),
        species: batch.map(|b| b.species),
        verification,
    }
}
