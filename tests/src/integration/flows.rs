//! # Integration Test Flows
//!
//! End-to-end lifecycle scenarios driven through `TokenRegistryApi`
//! with all reference adapters wired in:
//!
//! 1. **Issue → consume → status → metadata**: the full happy path
//! 2. **Authorization matrix**: every capability against every caller
//! 3. **Batch atomicity**: all-or-nothing under each failure kind

#[cfg(test)]
mod tests {
    use registry_core::prelude::*;

    const ADMIN: Principal = Principal([0xad; 20]);
    const OPERATOR: Principal = Principal([0x09; 20]);
    const ALICE: Principal = Principal([0x0a; 20]);
    const BOB: Principal = Principal([0x0b; 20]);

    fn registry() -> TokenRegistryService<
        RoleTableGate,
        InMemoryLedger,
        InMemoryEventLog,
        FixedTimeSource,
    > {
        create_test_service(
            ADMIN,
            RegistryConfig {
                base_uri: "ipfs://registry/".to_string(),
                audit_invariants: true,
            },
        )
    }

    #[test]
    fn end_to_end_lifecycle() {
        let mut registry = registry();

        // issue(recipient=A, quantity=10, uri="ipfs://x", consumable=true)
        let token = registry.issue(ADMIN, ALICE, 10, "ipfs://x", true).unwrap();
        assert_eq!(token, TokenId::new(1));
        assert_eq!(registry.is_consumable(token), Ok(true));
        assert_eq!(registry.get_metadata_uri(token).unwrap(), "ipfs://x");

        // consume(A, 1, 4) leaves 6 held by A
        registry.consume(ADMIN, ALICE, token, 4).unwrap();
        assert_eq!(registry.ledger().balance_of(token, ALICE), 6);

        // update_status then read back
        registry.update_status(ADMIN, token, "shipped").unwrap();
        assert_eq!(registry.get_current_status(token).unwrap().text, "shipped");

        // zero-quantity issuance fails and leaves the allocator alone
        assert_eq!(
            registry.issue(ADMIN, ALICE, 0, "", true),
            Err(RegistryError::ZeroMintAmount)
        );
        assert_eq!(registry.highest_allocated(), 1);

        // identifier 2 was never allocated
        assert_eq!(
            registry.get_status_history(TokenId::new(2)),
            Err(RegistryError::TokenNotExists(TokenId::new(2)))
        );
        assert!(!registry.exists(TokenId::new(2)));
    }

    #[test]
    fn existence_is_forever() {
        let mut registry = registry();
        let token = registry.issue(ADMIN, ALICE, 1, "", true).unwrap();
        assert!(registry.exists(token));

        // Full consumption and a pile of history later, it still exists.
        registry.consume(ADMIN, ALICE, token, 1).unwrap();
        for i in 0..5 {
            registry
                .update_status(ADMIN, token, &format!("step {i}"))
                .unwrap();
        }
        assert!(registry.exists(token));
        assert_eq!(registry.get_status_history(token).unwrap().len(), 5);

        // Unissued neighbors never exist.
        assert!(!registry.exists(TokenId::NONE));
        assert!(!registry.exists(TokenId::new(2)));
    }

    #[test]
    fn authorization_matrix() {
        let mut registry = registry();
        registry
            .gate_mut()
            .grant(ADMIN, OPERATOR, Capability::UpdateStatus)
            .unwrap();
        let token = registry.issue(ADMIN, ALICE, 5, "", true).unwrap();

        // OPERATOR holds UPDATE_STATUS only.
        registry.update_status(OPERATOR, token, "checked").unwrap();
        assert_eq!(
            registry.issue(OPERATOR, ALICE, 1, "", true),
            Err(RegistryError::Unauthorized(Capability::Issue))
        );
        assert_eq!(
            registry.consume(OPERATOR, ALICE, token, 1),
            Err(RegistryError::Unauthorized(Capability::Consume))
        );
        assert_eq!(
            registry.set_metadata_uri(OPERATOR, token, "ipfs://no"),
            Err(RegistryError::Unauthorized(Capability::Administer))
        );

        // Reads require nothing: a principal with no roles at all can
        // project state.
        assert_eq!(registry.is_consumable(token), Ok(true));
        assert!(registry.get_current_status(token).is_ok());
        assert!(registry.get_metadata_uri(token).is_ok());
    }

    #[test]
    fn revoked_capability_stops_working() {
        let mut registry = registry();
        registry
            .gate_mut()
            .grant(ADMIN, OPERATOR, Capability::Issue)
            .unwrap();
        registry.issue(OPERATOR, ALICE, 1, "", true).unwrap();

        registry
            .gate_mut()
            .revoke(ADMIN, OPERATOR, Capability::Issue)
            .unwrap();
        assert_eq!(
            registry.issue(OPERATOR, ALICE, 1, "", true),
            Err(RegistryError::Unauthorized(Capability::Issue))
        );
    }

    #[test]
    fn batch_is_all_or_nothing() {
        let mut registry = registry();

        // Length mismatch: nothing allocated, nothing credited.
        assert!(matches!(
            registry.issue_batch(ADMIN, ALICE, &[1, 2, 3], &["a".into(), "b".into()], &[true, true, true]),
            Err(RegistryError::InvalidBatchInput { .. })
        ));
        assert_eq!(registry.highest_allocated(), 0);

        // A zero in the middle: same outcome.
        assert_eq!(
            registry.issue_batch(
                ADMIN,
                ALICE,
                &[1, 0],
                &["a".into(), "b".into()],
                &[true, true]
            ),
            Err(RegistryError::ZeroMintAmount)
        );
        assert_eq!(registry.highest_allocated(), 0);
        assert_eq!(registry.ledger().balance_of(TokenId::new(1), ALICE), 0);
        assert!(registry.events().is_empty());

        // The valid batch then starts from identifier 1.
        let tokens = registry
            .issue_batch(
                ADMIN,
                ALICE,
                &[2, 4],
                &["a".into(), "b".into()],
                &[true, false],
            )
            .unwrap();
        assert_eq!(tokens, vec![TokenId::new(1), TokenId::new(2)]);
    }

    #[test]
    fn batch_and_single_issue_interleave_contiguously() {
        let mut registry = registry();
        let first = registry.issue(ADMIN, ALICE, 1, "", true).unwrap();
        let batch = registry
            .issue_batch(
                ADMIN,
                BOB,
                &[1, 1],
                &["x".into(), "y".into()],
                &[false, true],
            )
            .unwrap();
        let last = registry.issue(ADMIN, BOB, 1, "", false).unwrap();

        assert_eq!(first, TokenId::new(1));
        assert_eq!(batch, vec![TokenId::new(2), TokenId::new(3)]);
        assert_eq!(last, TokenId::new(4));
    }

    #[test]
    fn consume_gate_is_independent_of_balance() {
        let mut registry = registry();
        let sealed = registry.issue(ADMIN, ALICE, 10, "", false).unwrap();

        // Plenty of balance, but the flag says no - for any quantity.
        assert_eq!(
            registry.consume(ADMIN, ALICE, sealed, 0),
            Err(RegistryError::TokenNotConsumable(sealed))
        );
        assert_eq!(
            registry.consume(ADMIN, ALICE, sealed, 10),
            Err(RegistryError::TokenNotConsumable(sealed))
        );

        // Consumable token, wrong holder: the ledger refuses instead.
        let open = registry.issue(ADMIN, ALICE, 10, "", true).unwrap();
        assert!(matches!(
            registry.consume(ADMIN, BOB, open, 1),
            Err(RegistryError::Ledger(LedgerError::InsufficientBalance { .. }))
        ));
    }

    #[test]
    fn status_history_accumulates_in_order() {
        let mut registry = registry();
        let token = registry.issue(ADMIN, ALICE, 1, "", true).unwrap();

        let stages = ["created", "packed", "shipped", "delivered"];
        for stage in stages {
            registry.update_status(ADMIN, token, stage).unwrap();
        }

        let history = registry.get_status_history(token).unwrap();
        assert_eq!(history.len(), stages.len());
        for (entry, stage) in history.iter().zip(stages) {
            assert_eq!(entry.text, stage);
        }
        assert_eq!(registry.get_current_status(token).unwrap().text, "delivered");
    }

    #[test]
    fn metadata_defaults_and_overwrites() {
        let mut registry = registry();
        let defaulted = registry.issue(ADMIN, ALICE, 1, "", true).unwrap();
        let explicit = registry.issue(ADMIN, ALICE, 1, "ipfs://mine", true).unwrap();

        assert_eq!(
            registry.get_metadata_uri(defaulted).unwrap(),
            "ipfs://registry/"
        );
        assert_eq!(registry.get_metadata_uri(explicit).unwrap(), "ipfs://mine");

        registry
            .set_metadata_uri(ADMIN, defaulted, "ipfs://patched")
            .unwrap();
        assert_eq!(
            registry.get_metadata_uri(defaulted).unwrap(),
            "ipfs://patched"
        );
        // The overwrite touched only its own token.
        assert_eq!(registry.get_metadata_uri(explicit).unwrap(), "ipfs://mine");
    }

    #[test]
    fn single_owner_variant_runs_the_same_flows() {
        let owner = Principal::new([0x01; 20]);
        let mut registry = TokenRegistryService::new(
            SingleOwnerGate::new(owner),
            InMemoryLedger::new(),
            InMemoryEventLog::new(),
            FixedTimeSource::at(Timestamp::from_secs(42)),
            RegistryConfig::default(),
        );

        let token = registry.issue(owner, ALICE, 10, "ipfs://x", true).unwrap();
        registry.consume(owner, ALICE, token, 4).unwrap();
        registry.update_status(owner, token, "shipped").unwrap();

        assert_eq!(registry.ledger().balance_of(token, ALICE), 6);
        assert_eq!(registry.get_current_status(token).unwrap().text, "shipped");
        assert_eq!(
            registry.consume(ALICE, ALICE, token, 1),
            Err(RegistryError::Unauthorized(Capability::Consume))
        );
    }
}
