//! Tests for API module
//!
//! Tests error types, request/response types, and handler functions.

use crate::common::memory_ledger;

// =============================================================================
// ERROR TYPES
// =============================================================================

mod error_tests {
    use herbtrace::api::{ApiError, ErrorCode};
    use herbtrace::core::LedgerError;
    use herbtrace::core::models::{EventKind, UserRole};

    #[test]
    fn test_error_code_not_found() {
        let err = ApiError::new(ErrorCode::NotFound, "Batch not found");
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.message, "Batch not found");
    }

    #[test]
    fn test_error_code_forbidden() {
        let err = ApiError::new(ErrorCode::Forbidden, "nope");
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.code.as_str(), "FORBIDDEN");
    }

    #[test]
    fn test_ledger_error_mapping() {
        let err: ApiError = LedgerError::BatchNotFound("X".to_string()).into();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err: ApiError = LedgerError::RoleNotPermitted {
            role: UserRole::Consumer,
            kind: EventKind::Collection,
        }
        .into();
        assert_eq!(err.code, ErrorCode::Forbidden);

        let err: ApiError = LedgerError::InvalidQuantity(-1.0).into();
        assert_eq!(err.code, ErrorCode::BadRequest);

        let err: ApiError = LedgerError::Store(anyhow::anyhow!("disk full")).into();
        assert_eq!(err.code, ErrorCode::Internal);
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::bad_request("Invalid input");
        assert_eq!(err.to_string(), "BAD_REQUEST: Invalid input");
    }
}

// =============================================================================
// RESPONSE ENVELOPE
// =============================================================================

mod envelope_tests {
    use herbtrace::api::{ApiError, ApiResponse, ErrorCode};

    #[test]
    fn test_success_envelope_omits_error() {
        let json = serde_json::to_value(ApiResponse::success(42)).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], 42);
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_error_envelope_omits_data() {
        let err = ApiError::new(ErrorCode::NotFound, "gone");
        let json = serde_json::to_value(ApiResponse::<()>::error(&err)).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], "NOT_FOUND");
        assert_eq!(json["error"]["message"], "gone");
        assert!(json.get("data").is_none());
    }
}

// =============================================================================
// REQUEST PARSING
// =============================================================================

mod request_tests {
    use herbtrace::api::{CreateBatchRequest, EventInput, RecordEventRequest};
    use herbtrace::core::models::{Event, EventKind, UserRole};

    #[test]
    fn test_create_request_defaults() {
        let req: CreateBatchRequest =
            serde_json::from_str(r#"{"species": "Tulsi", "quantity": 3.5}"#).unwrap();
        assert_eq!(req.role, UserRole::Farmer);
        assert!(req.harvest_date.is_none());
        assert!(req.collection.is_none());
    }

    #[test]
    fn test_collection_input_fills_defaults() {
        let req: RecordEventRequest = serde_json::from_str(
            r#"{"role": "farmer", "event": {"kind": "collection", "collector_name": "Ravi", "species": "Tulsi"}}"#,
        )
        .unwrap();
        assert_eq!(req.event.kind(), EventKind::Collection);

        let Event::Collection(c) = req.event.into_event() else {
            panic!("expected a collection event");
        };
        assert!(c.id.starts_with("collection-"));
        assert!((c.gps_location.latitude - 10.8505).abs() < 1e-9);
        assert_eq!(c.location_name, "Kerala, India");
        assert!((c.quality_metrics.moisture - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_quality_test_input_parses_test_type() {
        let input: EventInput = serde_json::from_str(
            r#"{"kind": "quality_test", "lab_name": "Lab", "test_type": "heavy_metals", "passed": false}"#,
        )
        .unwrap();
        let Event::QualityTest(t) = input.into_event() else {
            panic!("expected a quality test");
        };
        assert!(!t.results.passed);
        assert_eq!(t.results.standard, "AYUSH Guidelines ≤10%");
        assert!(t.id.starts_with("quality-"));
    }

    #[test]
    fn test_unknown_role_rejected() {
        let parsed: Result<RecordEventRequest, _> = serde_json::from_str(
            r#"{"role": "wizard", "event": {"kind": "processing", "processor_name": "P"}}"#,
        );
        assert!(parsed.is_err());
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

mod handler_tests {
    use herbtrace::api::{
        self, CollectionInput, CreateBatchRequest, ErrorCode, EventInput, ProcessingInput,
        RecordEventRequest, ScanRequest,
    };
    use herbtrace::core::models::{BatchStatus, StepType, UserRole};

    use super::memory_ledger;
    use crate::common::harvest_date;

    fn create_request(collector: Option<&str>) -> CreateBatchRequest {
        CreateBatchRequest {
            role: UserRole::Farmer,
            species: "Withania somnifera (Ashwagandha)".to_string(),
            harvest_date: Some(harvest_date()),
            quantity: 20.0,
            collection: collector.map(|name| CollectionInput {
                collector_name: name.to_string(),
                species: "Withania somnifera".to_string(),
                ..CollectionInput::default()
            }),
        }
    }

    #[test]
    fn test_create_batch_with_harvest() {
        let ledger = memory_ledger();
        let detail = api::create_batch(&ledger, &create_request(Some("Ravi"))).unwrap();

        assert_eq!(detail.batch.events.len(), 1);
        assert_eq!(detail.verification.compliance_score, 85);
        assert_eq!(detail.herb.map(|h| h.common_name), Some("Ashwagandha"));
    }

    #[test]
    fn test_create_batch_with_blank_collector_leaves_nothing() {
        let ledger = memory_ledger();
        let err = api::create_batch(&ledger, &create_request(Some("  "))).unwrap_err();
        assert_eq!(err.code, ErrorCode::BadRequest);
        assert!(ledger.list_batches().unwrap().is_empty());
    }

    #[test]
    fn test_create_batch_forbidden_role() {
        let ledger = memory_ledger();
        let mut req = create_request(None);
        req.role = UserRole::Consumer;
        let err = api::create_batch(&ledger, &req).unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }

    #[test]
    fn test_record_event_reports_status() {
        let ledger = memory_ledger();
        let id = api::create_batch(&ledger, &create_request(None)).unwrap().batch.id;

        let req = RecordEventRequest {
            role: UserRole::Processor,
            event: EventInput::Processing(ProcessingInput {
                processor_name: "Mill".to_string(),
                step_type: StepType::Grinding,
                ..ProcessingInput::default()
            }),
        };
        let recorded = api::record_event(&ledger, &id, &req).unwrap();
        assert_eq!(recorded.status, BatchStatus::Processing);
        assert!(recorded.event_id.starts_with("processing-"));
    }

    #[test]
    fn test_get_missing_batch_is_404() {
        let ledger = memory_ledger();
        let err = api::get_batch(&ledger, "ASH-0-missing").unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[test]
    fn test_verify_missing_batch_is_not_an_error() {
        let ledger = memory_ledger();
        let data = api::verify_batch(&ledger, "ASH-0-missing").unwrap();
        assert!(!data.found);
        assert_eq!(data.verification.violations, vec!["Batch not found"]);
    }

    #[test]
    fn test_status_counts() {
        let ledger = memory_ledger();
        api::seed_demo(&ledger).unwrap();
        api::create_batch(&ledger, &create_request(None)).unwrap();

        let status = api::get_status(&ledger).unwrap();
        assert_eq!(status.batches.total, 2);
        assert_eq!(status.batches.tested, 1);
        assert_eq!(status.batches.harvested, 1);
        assert_eq!(status.batches.active(), 2);
        assert_eq!(status.verified, 1);
        assert_eq!(status.zones, 2);
    }

    #[test]
    fn test_batch_list_scores_match_verification() {
        let ledger = memory_ledger();
        api::seed_demo(&ledger).unwrap();
        api::create_batch(&ledger, &create_request(Some("Ravi"))).unwrap();
        api::create_batch(&ledger, &create_request(None)).unwrap();

        let batches = api::list_batches(&ledger).unwrap().batches;
        assert_eq!(batches.len(), 3);
        for summary in &batches {
            let verified = api::verify_batch(&ledger, &summary.id).unwrap().verification;
            assert_eq!(summary.compliance_score, verified.compliance_score);
            assert_eq!(summary.valid, verified.valid);
        }
        let mut scores: Vec<u8> = batches.iter().map(|b| b.compliance_score).collect();
        scores.sort_unstable();
        assert_eq!(scores, vec![65, 85, 100]);
    }

    #[test]
    fn test_scan_handler() {
        let ledger = memory_ledger();
        let demo = api::seed_demo(&ledger).unwrap();
        let req = ScanRequest {
            payload: demo.batch.qr_code.clone(),
        };
        let data = api::scan(&ledger, &req).unwrap();
        assert!(data.found);
        assert!(data.verification.valid);
        assert_eq!(data.batch_id, demo.batch.id);
    }

    #[test]
    fn test_map_serializes_flat() {
        let ledger = memory_ledger();
        let demo = api::seed_demo(&ledger).unwrap();
        let json = serde_json::to_value(api::get_map(&ledger, &demo.batch.id).unwrap()).unwrap();
        assert!(json.get("center").is_some());
        assert_eq!(json["points"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_list_herbs() {
        let herbs = api::list_herbs();
        assert_eq!(herbs.herbs.len(), 3);
    }

    #[test]
    fn test_list_roles() {
        let roles = api::list_roles().roles;
        assert_eq!(roles.len(), 6);
        assert_eq!(roles[0].title, "Farmer/Collector");
        assert!(roles[0].can_create_batch);
        assert_eq!(roles[3].records, ["processing (packaging)", "transfer"]);
        for info in roles.iter().filter(|r| r.read_only) {
            assert!(info.records.is_empty());
            assert!(!info.can_create_batch);
        }
        assert_eq!(roles.iter().filter(|r| r.read_only).count(), 2);
    }
}
