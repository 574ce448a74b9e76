//! Anchor verifier tests against a mocked ledger

use dfts::anchor::{VerificationStage, verify_file};
use dfts::{
    sha256, AnchorStatus, AnchorVerifier, Digest, LedgerError, LedgerQuery, MerkleTree, Network,
    PendingProof, ProofRecord, RootMatch, TransactionInfo, VerificationFailure,
};
use mockall::mock;
use mockall::predicate::eq;

mock! {
    Ledger {}

    impl LedgerQuery for Ledger {
        fn fetch_transaction(
            &self,
            network: Network,
            txid: &str,
        ) -> Result<TransactionInfo, LedgerError>;
    }
}

const TXID: &str = "0e3e2357e806b6cdb1f70b54c3a3a17b6714ee1f0e68bebb44a74b1efd512098";

struct Fixture {
    leaves: Vec<Digest>,
    record: ProofRecord,
}

fn fixture(network: Network) -> Fixture {
    let leaves = vec![sha256(b"a"), sha256(b"b"), sha256(b"c")];
    let tree = MerkleTree::from_hashes(&leaves);
    let root = tree.root().unwrap();
    let path = tree.generate_proof(&leaves[0]).unwrap();
    let record = PendingProof::new(leaves[0], root, path)
        .finalize(network, TXID, None)
        .unwrap();
    Fixture { leaves, record }
}

fn op_return_script(root: &Digest) -> String {
    format!("6a20{}", root.to_hex())
}

fn tx_with(scripts: Vec<String>, status: AnchorStatus) -> TransactionInfo {
    TransactionInfo {
        output_scripts: scripts,
        status,
    }
}

#[test]
fn test_confirmed_anchor_succeeds() {
    let fx = fixture(Network::Testnet);
    let script = op_return_script(&fx.record.merkle_root);

    let mut ledger = MockLedger::new();
    ledger
        .expect_fetch_transaction()
        .with(eq(Network::Testnet), eq(TXID))
        .times(1)
        .returning(move |_, _| {
            Ok(tx_with(
                vec!["0014abcdef".to_string(), script.clone()],
                AnchorStatus::Confirmed {
                    block_height: 2_800_000,
                },
            ))
        });

    let report = verify_file(&fx.leaves[0], &fx.record, &ledger).unwrap();
    assert_eq!(report.output_index, 1);
    assert_eq!(
        report.status,
        AnchorStatus::Confirmed {
            block_height: 2_800_000
        }
    );
    assert_eq!(report.transaction_id, TXID);
}

#[test]
fn test_unconfirmed_anchor_succeeds_with_status() {
    let fx = fixture(Network::Signet);
    let script = op_return_script(&fx.record.merkle_root);

    let mut ledger = MockLedger::new();
    ledger
        .expect_fetch_transaction()
        .with(eq(Network::Signet), eq(TXID))
        .returning(move |_, _| Ok(tx_with(vec![script.clone()], AnchorStatus::Unconfirmed)));

    let report = AnchorVerifier::new(&ledger)
        .verify_file(&fx.leaves[0], &fx.record)
        .unwrap();
    assert!(!report.status.is_confirmed());
    assert_eq!(report.status.block_height(), None);
}

#[test]
fn test_integrity_mismatch_short_circuits() {
    let fx = fixture(Network::Testnet);
    let mut ledger = MockLedger::new();
    ledger.expect_fetch_transaction().never();

    let other = fx.leaves[1];
    let failure = verify_file(&other, &fx.record, &ledger).unwrap_err();
    assert_eq!(failure.stage(), VerificationStage::Integrity);
    match failure {
        VerificationFailure::IntegrityMismatch { expected, actual } => {
            assert_eq!(expected, fx.leaves[0]);
            assert_eq!(actual, other);
        },
        other => panic!("unexpected failure {:?}", other),
    }
}

#[test]
fn test_invalid_path_short_circuits() {
    let mut fx = fixture(Network::Testnet);
    fx.record.merkle_path[0].hash = sha256(b"forged sibling");

    let mut ledger = MockLedger::new();
    ledger.expect_fetch_transaction().never();

    let failure = verify_file(&fx.leaves[0], &fx.record, &ledger).unwrap_err();
    assert!(matches!(
        failure,
        VerificationFailure::InvalidMerkleProof { .. }
    ));
    assert_eq!(failure.stage(), VerificationStage::Membership);
}

#[test]
fn test_missing_transaction() {
    let fx = fixture(Network::Testnet);
    let mut ledger = MockLedger::new();
    ledger
        .expect_fetch_transaction()
        .returning(|_, _| Err(LedgerError::NotFound));

    let failure = verify_file(&fx.leaves[0], &fx.record, &ledger).unwrap_err();
    assert!(matches!(
        failure,
        VerificationFailure::TransactionNotFound {
            source: LedgerError::NotFound,
            ..
        }
    ));
    assert!(!failure.is_retryable());
}

#[test]
fn test_timeout_is_retryable_transaction_not_found() {
    let fx = fixture(Network::Mainnet);
    let mut ledger = MockLedger::new();
    ledger
        .expect_fetch_transaction()
        .returning(|_, _| Err(LedgerError::Timeout));

    let failure = verify_file(&fx.leaves[0], &fx.record, &ledger).unwrap_err();
    assert_eq!(failure.kind(), "transaction_not_found");
    assert!(failure.is_retryable());
}

#[test]
fn test_root_absent_from_outputs() {
    let fx = fixture(Network::Testnet);
    let mut ledger = MockLedger::new();
    ledger.expect_fetch_transaction().returning(|_, _| {
        Ok(tx_with(
            vec!["0014abcdef".to_string(), format!("6a20{}", sha256(b"other root"))],
            AnchorStatus::Confirmed { block_height: 1 },
        ))
    });

    let failure = verify_file(&fx.leaves[0], &fx.record, &ledger).unwrap_err();
    match failure {
        VerificationFailure::RootNotAnchored { txid, root } => {
            assert_eq!(txid, TXID);
            assert_eq!(root, fx.record.merkle_root);
        },
        other => panic!("unexpected failure {:?}", other),
    }
}

#[test]
fn test_strict_matching_rejects_non_op_return_output() {
    let fx = fixture(Network::Testnet);
    // Root hidden inside a taproot-looking output rather than an OP_RETURN
    let script = format!("5120{}", fx.record.merkle_root);

    let mut ledger = MockLedger::new();
    let loose_script = script.clone();
    ledger
        .expect_fetch_transaction()
        .times(2)
        .returning(move |_, _| Ok(tx_with(vec![loose_script.clone()], AnchorStatus::Unconfirmed)));

    let loose = AnchorVerifier::new(&ledger).verify_file(&fx.leaves[0], &fx.record);
    assert!(loose.is_ok());

    let strict = AnchorVerifier::new(&ledger)
        .with_root_match(RootMatch::OpReturn)
        .verify_file(&fx.leaves[0], &fx.record);
    assert!(matches!(
        strict,
        Err(VerificationFailure::RootNotAnchored { .. })
    ));
}

#[test]
fn test_failure_messages_are_distinct() {
    let digest = sha256(b"x");
    let messages = [
        VerificationFailure::IntegrityMismatch {
            expected: digest,
            actual: digest,
        }
        .to_string(),
        VerificationFailure::InvalidMerkleProof {
            computed: digest,
            expected: digest,
        }
        .to_string(),
        VerificationFailure::TransactionNotFound {
            txid: TXID.to_string(),
            network: Network::Testnet,
            source: LedgerError::NotFound,
        }
        .to_string(),
        VerificationFailure::RootNotAnchored {
            txid: TXID.to_string(),
            root: digest,
        }
        .to_string(),
    ];
    for (i, a) in messages.iter().enumerate() {
        for b in &messages[i + 1..] {
            assert_ne!(a, b);
        }
    }
}
