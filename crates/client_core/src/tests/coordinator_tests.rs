use super::*;

use std::{collections::VecDeque, sync::Mutex};

use async_trait::async_trait;
use serde_json::json;
use shared::domain::{AIRWAY_BILL_NUMBER, BILL_OF_ENTRY_ID, PACKAGE_ID, STORING_ORDER_ID};

struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<Value, ClientError>>>,
    seen: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    fn new(responses: Vec<Result<Value, ClientError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            seen: Mutex::new(Vec::new()),
        }
    }

    fn seen(&self) -> Vec<ApiRequest> {
        self.seen.lock().expect("seen lock").clone()
    }
}

#[async_trait]
impl WmsTransport for ScriptedTransport {
    async fn execute(&self, request: &ApiRequest) -> Result<Value, ClientError> {
        self.seen.lock().expect("seen lock").push(request.clone());
        self.responses
            .lock()
            .expect("responses lock")
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::Backend("no scripted response".to_string())))
    }
}

fn filled_storing_order(coordinator: &mut Coordinator) {
    coordinator.select_view(ViewId::StoringOrderCheck);
    coordinator.set_field(STORING_ORDER_ID, "SO-1");
    coordinator.set_field(AIRWAY_BILL_NUMBER, "AWB-2");
    coordinator.set_field(BILL_OF_ENTRY_ID, "BOE-3");
}

#[test]
fn starts_idle_on_package_lookup() {
    let coordinator = Coordinator::new();
    assert_eq!(coordinator.active_view(), ViewId::PackageLookup);
    assert_eq!(coordinator.outcome(), &RequestOutcome::Idle);
    assert_eq!(coordinator.in_flight(), 0);
}

#[test]
fn selecting_the_same_view_twice_changes_nothing() {
    for view in ViewId::ALL {
        let mut coordinator = Coordinator::new();
        coordinator.set_field(PACKAGE_ID, "PKG123");
        let pending = coordinator.submit(Endpoint::Package).expect("submit");
        coordinator.settle(pending.ticket, Ok(json!({"id": "PKG123"})));

        coordinator.select_view(view);
        let fields_before = coordinator.fields(ViewId::PackageLookup).cloned();
        let outcome_before = coordinator.outcome().clone();

        coordinator.select_view(view);
        assert_eq!(coordinator.active_view(), view);
        assert_eq!(coordinator.fields(ViewId::PackageLookup).cloned(), fields_before);
        assert_eq!(coordinator.outcome(), &outcome_before);
    }
}

#[test]
fn package_id_survives_a_round_trip_through_another_view() {
    let mut coordinator = Coordinator::new();
    coordinator.set_field(PACKAGE_ID, "PKG123");

    coordinator.select_view(ViewId::StoringOrderCheck);
    assert_eq!(coordinator.field(PACKAGE_ID), "");
    coordinator.set_field(STORING_ORDER_ID, "SO-1");

    coordinator.select_view(ViewId::PackageLookup);
    assert_eq!(coordinator.field(PACKAGE_ID), "PKG123");

    coordinator.select_view(ViewId::StoringOrderCheck);
    assert_eq!(coordinator.field(STORING_ORDER_ID), "SO-1");
}

#[test]
fn empty_required_field_gates_submit_without_touching_state() {
    let mut coordinator = Coordinator::new();
    coordinator.select_view(ViewId::StoringOrderCheck);
    coordinator.set_field(STORING_ORDER_ID, "SO-1");
    coordinator.set_field(AIRWAY_BILL_NUMBER, "AWB-2");

    assert!(!coordinator.can_submit(Endpoint::StoringOrderCheck));
    let err = coordinator
        .submit(Endpoint::StoringOrderCheck)
        .expect_err("should be gated");
    assert!(matches!(err, SubmitError::MissingFields(ref missing) if missing == &[BILL_OF_ENTRY_ID]));
    assert_eq!(coordinator.outcome(), &RequestOutcome::Idle);
    assert_eq!(coordinator.in_flight(), 0);
}

#[test]
fn untouched_view_reports_every_required_field_missing() {
    let coordinator = Coordinator::new();
    assert_eq!(
        coordinator.missing_fields(Endpoint::StoringOrderCheck),
        vec![STORING_ORDER_ID, AIRWAY_BILL_NUMBER, BILL_OF_ENTRY_ID]
    );
    assert!(coordinator.can_submit(Endpoint::Packages));
}

#[test]
fn submit_discards_previous_result_until_settled() {
    let mut coordinator = Coordinator::new();
    let first = coordinator.submit(Endpoint::Packages).expect("submit");
    coordinator.settle(first.ticket, Ok(json!([1, 2, 3])));
    assert!(matches!(coordinator.outcome(), RequestOutcome::Settled(_)));

    let second = coordinator.submit(Endpoint::PickSlips).expect("submit");
    assert_eq!(coordinator.outcome(), &RequestOutcome::Pending);
    assert!(second.ticket > first.ticket);
}

#[test]
fn last_settlement_wins_regardless_of_issue_order() {
    let mut coordinator = Coordinator::new();
    let first = coordinator.submit(Endpoint::Packages).expect("submit");
    let second = coordinator.submit(Endpoint::StoringOrders).expect("submit");
    assert_eq!(coordinator.in_flight(), 2);

    assert!(coordinator.settle(second.ticket, Ok(json!({"from": "second"}))));
    assert!(coordinator.settle(first.ticket, Ok(json!({"from": "first"}))));

    assert_eq!(
        coordinator.outcome(),
        &RequestOutcome::Settled(Settlement::Success(json!({"from": "first"})))
    );
    assert_eq!(coordinator.in_flight(), 0);
}

#[test]
fn duplicate_or_unknown_settlements_are_ignored() {
    let mut coordinator = Coordinator::new();
    let pending = coordinator.submit(Endpoint::Packages).expect("submit");
    assert!(coordinator.settle(pending.ticket, Ok(json!("ok"))));

    assert!(!coordinator.settle(pending.ticket, Ok(json!("again"))));
    assert!(!coordinator.settle(RequestTicket(99), Ok(json!("stranger"))));
    assert_eq!(
        coordinator.outcome(),
        &RequestOutcome::Settled(Settlement::Success(json!("ok")))
    );
}

#[test]
fn success_display_text_is_pretty_printed() {
    let settlement = Settlement::Success(json!({"id": "PKG123"}));
    assert_eq!(settlement.display_text(), "{\n  \"id\": \"PKG123\"\n}");
}

#[tokio::test]
async fn run_settles_success_with_payload() {
    let transport = ScriptedTransport::new(vec![Ok(json!({"id": "PKG123"}))]);
    let mut coordinator = Coordinator::new();
    coordinator.set_field(PACKAGE_ID, "PKG123");

    let outcome = coordinator
        .run(Endpoint::Package, &transport)
        .await
        .expect("run")
        .clone();

    assert_eq!(
        outcome,
        RequestOutcome::Settled(Settlement::Success(json!({"id": "PKG123"})))
    );
    let seen = transport.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].target, "package?packageId=PKG123");
}

#[tokio::test]
async fn rejected_call_settles_failure_with_reason() {
    let transport = ScriptedTransport::new(vec![Err(ClientError::Backend(
        "connection refused".to_string(),
    ))]);
    let mut coordinator = Coordinator::new();

    coordinator
        .run(Endpoint::Packages, &transport)
        .await
        .expect("run");

    match coordinator.outcome() {
        RequestOutcome::Settled(Settlement::Failure(reason)) => {
            assert!(!reason.is_empty());
            assert!(reason.contains("connection refused"));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert!(!coordinator.is_pending());
}

#[tokio::test]
async fn gated_run_never_reaches_transport() {
    let transport = ScriptedTransport::new(Vec::new());
    let mut coordinator = Coordinator::new();
    coordinator.select_view(ViewId::StoringOrderCheck);
    coordinator.set_field(STORING_ORDER_ID, "SO-1");

    let result = coordinator.run(Endpoint::StoringOrderCheck, &transport).await;
    assert!(result.is_err());
    assert!(transport.seen().is_empty());
}

#[tokio::test]
async fn storing_order_run_posts_form_body() {
    let transport = ScriptedTransport::new(vec![Ok(json!({"valid": true}))]);
    let mut coordinator = Coordinator::new();
    filled_storing_order(&mut coordinator);

    coordinator
        .run(Endpoint::StoringOrderCheck, &transport)
        .await
        .expect("run");

    let seen = transport.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].method, shared::protocol::HttpMethod::Post);
    assert_eq!(
        seen[0].body,
        Some(json!({
            "storingOrderId": "SO-1",
            "airwayBillNumber": "AWB-2",
            "billOfEntryId": "BOE-3",
        }))
    );
}
