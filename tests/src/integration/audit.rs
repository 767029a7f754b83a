//! # Invariant and Event-Log Audits
//!
//! Drives randomized and adversarial operation sequences through the
//! service, then audits three externally observable guarantees:
//!
//! 1. The domain invariants hold between every pair of snapshots
//! 2. The event log matches the mutations that actually happened
//! 3. The reference ledger conserves supply (held = issued - consumed)

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use registry_core::prelude::*;

    const ADMIN: Principal = Principal([0xad; 20]);
    const ALICE: Principal = Principal([0x0a; 20]);

    fn registry() -> TokenRegistryService<
        RoleTableGate,
        InMemoryLedger,
        InMemoryEventLog,
        FixedTimeSource,
    > {
        create_test_service(
            ADMIN,
            RegistryConfig {
                base_uri: "ipfs://audit/".to_string(),
                audit_invariants: true,
            },
        )
    }

    #[test]
    fn randomized_operation_soak() {
        let mut rng = StdRng::seed_from_u64(0xC0FFEE);
        let mut registry = registry();
        let mut snapshot = registry.state().clone();

        for _ in 0..500 {
            match rng.gen_range(0..5) {
                0 => {
                    let quantity = rng.gen_range(0..5u64);
                    let _ = registry.issue(ADMIN, ALICE, quantity, "", rng.gen());
                }
                1 => {
                    let token = TokenId::new(rng.gen_range(0..10));
                    let _ = registry.consume(ADMIN, ALICE, token, rng.gen_range(0..3));
                }
                2 => {
                    let token = TokenId::new(rng.gen_range(0..10));
                    let text = if rng.gen_bool(0.2) { "" } else { "step" };
                    let _ = registry.update_status(ADMIN, token, text);
                }
                3 => {
                    let token = TokenId::new(rng.gen_range(0..10));
                    let _ = registry.set_metadata_uri(ADMIN, token, "ipfs://r");
                }
                _ => {
                    let count = rng.gen_range(0..4);
                    let quantities: Vec<u64> =
                        (0..count).map(|_| rng.gen_range(0..4)).collect();
                    let uris: Vec<String> =
                        (0..count).map(|i| format!("ipfs://{i}")).collect();
                    let flags: Vec<bool> = (0..count).map(|_| rng.gen()).collect();
                    let _ = registry.issue_batch(ADMIN, ALICE, &quantities, &uris, &flags);
                }
            }

            let result = check_all_invariants(&snapshot, registry.state());
            assert!(
                result.is_valid(),
                "invariants violated after random op: {result:?}"
            );
            assert!(registry.ledger().conserves_supply());
            snapshot = registry.state().clone();
        }
    }

    #[test]
    fn event_log_mirrors_successful_mutations() {
        let mut registry = registry();

        let token = registry.issue(ADMIN, ALICE, 10, "ipfs://x", true).unwrap();
        registry
            .issue_batch(ADMIN, ALICE, &[1, 2], &["a".into(), "b".into()], &[true, true])
            .unwrap();
        registry.consume(ADMIN, ALICE, token, 3).unwrap();
        registry.update_status(ADMIN, token, "shipped").unwrap();
        registry.set_metadata_uri(ADMIN, token, "ipfs://y").unwrap();

        // Failures emit nothing.
        let _ = registry.issue(ADMIN, ALICE, 0, "", true);
        let _ = registry.update_status(ADMIN, token, "");
        let _ = registry.consume(ADMIN, ALICE, token, 1_000);

        let log = registry.events();
        assert_eq!(log.len(), 5);
        assert_eq!(log.on_topic(topics::ISSUED).count(), 1);
        assert_eq!(log.on_topic(topics::BATCH_ISSUED).count(), 1);
        assert_eq!(log.on_topic(topics::CONSUMED).count(), 1);
        assert_eq!(log.on_topic(topics::STATUS_UPDATED).count(), 1);
        assert_eq!(log.on_topic(topics::METADATA_UPDATED).count(), 1);

        // The consumption record carries the exact mutation.
        let consumed = log.on_topic(topics::CONSUMED).next().unwrap();
        match &consumed.payload {
            EventPayload::Consumed(payload) => {
                assert_eq!(payload.token, token);
                assert_eq!(payload.holder, ALICE);
                assert_eq!(payload.quantity, 3);
            }
            other => panic!("expected consumed payload, got {other:?}"),
        }
    }

    #[test]
    fn batch_record_uses_parallel_arrays_in_input_order() {
        let mut registry = registry();
        registry
            .issue_batch(
                ADMIN,
                ALICE,
                &[5, 6, 7],
                &["a".into(), "b".into(), "c".into()],
                &[true, false, true],
            )
            .unwrap();

        let record = registry.events().on_topic(topics::BATCH_ISSUED).next().unwrap();
        match &record.payload {
            EventPayload::BatchIssued(payload) => {
                assert_eq!(
                    payload.tokens,
                    vec![TokenId::new(1), TokenId::new(2), TokenId::new(3)]
                );
                assert_eq!(payload.quantities, vec![5, 6, 7]);
                assert_eq!(payload.consumable, vec![true, false, true]);
                assert_eq!(payload.recipient, ALICE);
            }
            other => panic!("expected batch payload, got {other:?}"),
        }
    }

    #[test]
    fn event_records_survive_serialization() {
        let mut registry = registry();
        let token = registry.issue(ADMIN, ALICE, 2, "ipfs://x", true).unwrap();
        registry.update_status(ADMIN, token, "minted").unwrap();

        for record in registry.events().records() {
            let json = serde_json::to_string(record).unwrap();
            let back: EventRecord = serde_json::from_str(&json).unwrap();
            assert_eq!(&back, record);
        }
    }

    #[test]
    fn state_snapshot_round_trips_and_agrees() {
        let mut registry = registry();
        let token = registry.issue(ADMIN, ALICE, 4, "ipfs://x", true).unwrap();
        registry.update_status(ADMIN, token, "minted").unwrap();
        registry.update_status(ADMIN, token, "stored").unwrap();

        let json = serde_json::to_string(registry.state()).unwrap();
        let restored: RegistryState = serde_json::from_str(&json).unwrap();

        assert_eq!(&restored, registry.state());
        assert!(restored.exists(token));
        assert_eq!(restored.consumable(token), Some(true));
        assert_eq!(restored.status_history(token).unwrap().len(), 2);
    }

    #[test]
    fn timestamps_never_decrease_even_if_the_clock_does() {
        let owner = Principal::new([0x01; 20]);
        let clock = FixedTimeSource::at(Timestamp::from_secs(1_000));
        let mut registry = TokenRegistryService::new(
            SingleOwnerGate::new(owner),
            InMemoryLedger::new(),
            InMemoryEventLog::new(),
            clock,
            RegistryConfig::default(),
        );

        let token = registry.issue(owner, ALICE, 1, "", true).unwrap();
        registry.update_status(owner, token, "late").unwrap();

        // The host clock jumps backwards; the next entry clamps to the
        // previous timestamp instead of decreasing.
        registry.clock_mut().set(Timestamp::from_secs(500));
        registry.update_status(owner, token, "later").unwrap();

        let history = registry.get_status_history(token).unwrap();
        assert_eq!(history[0].timestamp, Timestamp::from_secs(1_000));
        assert_eq!(history[1].timestamp, Timestamp::from_secs(1_000));
        assert!(check_all_invariants(registry.state(), registry.state()).is_valid());
    }
}
