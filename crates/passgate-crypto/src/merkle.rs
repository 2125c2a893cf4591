//! # Sorted-Pair Merkle Proofs
//!
//! Verifies that a leaf is a member of the tree committed to by a trusted
//! root, given the leaf's ordered list of sibling digests.
//!
//! ## Algorithm
//!
//! - Node: `H(min(a, b) || max(a, b))`, where `min`/`max` compare the raw
//!   32 bytes lexicographically. No domain separation byte is used, so the
//!   rule matches `sortPairs` allow-list tooling and on-chain verifiers.
//! - Verification folds the path from the leaf upward and compares the
//!   result with the trusted root.
//!
//! Because each pair is sorted before hashing, a proof carries no left/right
//! direction bits, and the same path verifies whichever side the leaf was on.
//!
//! ## Security Invariant
//!
//! - The final root comparison is constant-time (`subtle::ConstantTimeEq`).
//! - Every sibling in the path is folded even when a prefix of the path
//!   already looks wrong; no early exit on intermediate values.
//! - Paths longer than [`MAX_PROOF_DEPTH`] are rejected outright. A tree of
//!   2^64 leaves cannot exist, so such a path is never legitimate.

use passgate_core::{Digest, DigestAlgorithm, Identity};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

use crate::error::CryptoError;
use crate::leaf::AllowListFormat;

/// Longest sibling path accepted by [`verify_proof`].
pub const MAX_PROOF_DEPTH: usize = 64;

/// Combine two sibling digests with the sorted-pair rule.
pub fn node_hash(algorithm: DigestAlgorithm, a: &Digest, b: &Digest) -> Digest {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    algorithm.digest_parts(&[lo.as_bytes(), hi.as_bytes()])
}

/// Fold `proof` onto `leaf`, returning the implied root.
pub fn compute_root(algorithm: DigestAlgorithm, leaf: &Digest, proof: &[Digest]) -> Digest {
    proof
        .iter()
        .fold(*leaf, |acc, sibling| node_hash(algorithm, &acc, sibling))
}

/// Check that `leaf` is committed to by `root` via `proof`.
///
/// An empty proof is valid only when the leaf is the root itself, which is
/// the single-entry allow-list case.
pub fn verify_proof(algorithm: DigestAlgorithm, root: &Digest, leaf: &Digest, proof: &[Digest]) -> bool {
    if proof.len() > MAX_PROOF_DEPTH {
        return false;
    }
    let computed = compute_root(algorithm, leaf, proof);
    computed.as_bytes().ct_eq(root.as_bytes()).into()
}

/// An ordered sibling path, leaf level first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProofPath(Vec<Digest>);

impl ProofPath {
    /// Wrap a sibling list.
    pub fn new(siblings: Vec<Digest>) -> Self {
        Self(siblings)
    }

    /// Parse hex siblings (with or without `0x`), as supplied by clients.
    pub fn from_hex_strings<S: AsRef<str>>(items: &[S]) -> Result<Self, CryptoError> {
        items
            .iter()
            .enumerate()
            .map(|(position, s)| {
                Digest::from_hex(s.as_ref()).map_err(|e| CryptoError::MalformedProof {
                    position,
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    /// The siblings, leaf level first.
    pub fn siblings(&self) -> &[Digest] {
        &self.0
    }

    /// Number of siblings.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the path is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Digest>> for ProofPath {
    fn from(siblings: Vec<Digest>) -> Self {
        Self(siblings)
    }
}

/// What a claimant presents for an allow-list claim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimTicket {
    /// Sibling path from the claimant's leaf to the root.
    #[serde(default)]
    pub proof: ProofPath,
    /// Position in the list. Required only by indexed leaf encodings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u64>,
}

impl ClaimTicket {
    /// A ticket for an identity-only leaf.
    pub fn new(proof: ProofPath) -> Self {
        Self { proof, index: None }
    }

    /// A ticket for an indexed leaf.
    pub fn indexed(proof: ProofPath, index: u64) -> Self {
        Self {
            proof,
            index: Some(index),
        }
    }
}

/// A trusted allow-list commitment: the root plus the format its leaves use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowList {
    /// Trusted root, fixed at deployment.
    pub root: Digest,
    /// Hash and leaf rule the root was built with.
    #[serde(flatten)]
    pub format: AllowListFormat,
}

impl AllowList {
    /// Construct an allow-list commitment.
    pub fn new(root: Digest, format: AllowListFormat) -> Self {
        Self { root, format }
    }

    /// Whether `identity` is proven a member by `ticket`.
    ///
    /// A ticket that cannot even form a leaf (indexed encoding, no index)
    /// is simply not a valid proof.
    pub fn verify(&self, identity: &Identity, ticket: &ClaimTicket) -> bool {
        match self.format.leaf_hash(identity, ticket.index) {
            Ok(leaf) => verify_proof(self.format.algorithm, &self.root, &leaf, ticket.proof.siblings()),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaf::LeafEncoding;

    fn d(hex: &str) -> Digest {
        Digest::from_hex(hex).unwrap()
    }

    fn hardhat_root() -> Digest {
        d("310aeb9a1979284d9124f81d2d128e2d08b3441c7eef588f3514dd878551f9fb")
    }

    fn leaf0() -> Digest {
        d("00314e565e0574cb412563df634608d76f5c59d9f817e85966100ec1d48005c0")
    }

    fn leaf0_proof() -> Vec<Digest> {
        vec![
            d("8a3552d60a98e0ade765adddad0a2e420ca9b1eef5f326ba7ab860bb4ea72c94"),
            d("28ee50ccca7572e60f382e915d3cc323c3cb713b263673ba830ab179d0e5d57f"),
            d("23f0b355151c3d61c31a1a21dc2f4f88deaf007514968fe3f22e016366ec7657"),
        ]
    }

    #[test]
    fn test_node_hash_is_order_independent() {
        let a = Identity::from_index(1);
        let b = Identity::from_index(2);
        let alg = DigestAlgorithm::Keccak256;
        let la = alg.digest(a.as_bytes());
        let lb = alg.digest(b.as_bytes());
        assert_eq!(node_hash(alg, &la, &lb), node_hash(alg, &lb, &la));
        assert_eq!(
            node_hash(alg, &la, &lb).to_hex(),
            "f95c14e6953c95195639e8266ab1a6850864d59a829da9f9b13602ee522f672b"
        );
    }

    #[test]
    fn test_sha256_two_leaf_root() {
        let alg = DigestAlgorithm::Sha256;
        let la = alg.digest(Identity::from_index(1).as_bytes());
        let lb = alg.digest(Identity::from_index(2).as_bytes());
        assert_eq!(
            node_hash(alg, &la, &lb).to_hex(),
            "2b1875304a9f47df053eb1b6513b66f5716198cecdc2d9e2163b6d34cd704378"
        );
    }

    #[test]
    fn test_known_proof_verifies() {
        assert!(verify_proof(
            DigestAlgorithm::Keccak256,
            &hardhat_root(),
            &leaf0(),
            &leaf0_proof()
        ));
    }

    #[test]
    fn test_carried_odd_leaf_verifies_with_short_proof() {
        let leaf6 = d("b6711c87f5d70aa0ec9dcbff648cab4ede7aec7218e4e2fef065f83253fc9108");
        let proof = vec![
            d("0452b2cdd88420d4e8354b0b7f1c4b4241f00ca154b901a155c2c3deef83b41a"),
            d("5c0965c65dfb1547d128efb3e61004f43995418da2d36870318fd1d53a6ec3ab"),
        ];
        assert!(verify_proof(DigestAlgorithm::Keccak256, &hardhat_root(), &leaf6, &proof));
    }

    #[test]
    fn test_every_single_bit_flip_in_proof_fails() {
        let proof = leaf0_proof();
        for i in 0..proof.len() {
            for byte in 0..32 {
                for bit in 0..8 {
                    let mut tampered = proof.clone();
                    let mut raw = *tampered[i].as_bytes();
                    raw[byte] ^= 1 << bit;
                    tampered[i] = Digest::new(raw);
                    assert!(!verify_proof(
                        DigestAlgorithm::Keccak256,
                        &hardhat_root(),
                        &leaf0(),
                        &tampered
                    ));
                }
            }
        }
    }

    #[test]
    fn test_wrong_leaf_fails() {
        let other = DigestAlgorithm::Keccak256.digest(Identity::from_index(42).as_bytes());
        assert!(!verify_proof(
            DigestAlgorithm::Keccak256,
            &hardhat_root(),
            &other,
            &leaf0_proof()
        ));
    }

    #[test]
    fn test_wrong_algorithm_fails() {
        assert!(!verify_proof(
            DigestAlgorithm::Sha256,
            &hardhat_root(),
            &leaf0(),
            &leaf0_proof()
        ));
    }

    #[test]
    fn test_truncated_and_extended_proofs_fail() {
        let mut proof = leaf0_proof();
        proof.pop();
        assert!(!verify_proof(DigestAlgorithm::Keccak256, &hardhat_root(), &leaf0(), &proof));

        let mut proof = leaf0_proof();
        proof.push(Digest::ZERO);
        assert!(!verify_proof(DigestAlgorithm::Keccak256, &hardhat_root(), &leaf0(), &proof));
    }

    #[test]
    fn test_empty_proof_only_for_single_leaf_root() {
        let leaf = leaf0();
        assert!(verify_proof(DigestAlgorithm::Keccak256, &leaf, &leaf, &[]));
        assert!(!verify_proof(DigestAlgorithm::Keccak256, &hardhat_root(), &leaf, &[]));
    }

    #[test]
    fn test_over_depth_rejected_even_if_it_would_fold() {
        let leaf = leaf0();
        let proof = vec![Digest::ZERO; MAX_PROOF_DEPTH + 1];
        let root = compute_root(DigestAlgorithm::Keccak256, &leaf, &proof);
        assert!(!verify_proof(DigestAlgorithm::Keccak256, &root, &leaf, &proof));

        let at_limit = vec![Digest::ZERO; MAX_PROOF_DEPTH];
        let root = compute_root(DigestAlgorithm::Keccak256, &leaf, &at_limit);
        assert!(verify_proof(DigestAlgorithm::Keccak256, &root, &leaf, &at_limit));
    }

    #[test]
    fn test_proof_path_from_hex_reports_position() {
        let err = ProofPath::from_hex_strings(&[
            "0x8a3552d60a98e0ade765adddad0a2e420ca9b1eef5f326ba7ab860bb4ea72c94",
            "0xnothex",
        ])
        .unwrap_err();
        assert!(matches!(err, CryptoError::MalformedProof { position: 1, .. }));
    }

    #[test]
    fn test_allow_list_verify_identity() {
        let list = AllowList::new(hardhat_root(), AllowListFormat::default());
        let member = Identity::from_hex("0x70997970C51812dc3A010C7d01b50e0d17dc79C8").unwrap();
        let ticket = ClaimTicket::new(ProofPath::new(leaf0_proof()));
        assert!(list.verify(&member, &ticket));

        let outsider = Identity::from_index(77);
        assert!(!list.verify(&outsider, &ticket));
    }

    #[test]
    fn test_allow_list_indexed_missing_index_is_invalid() {
        let fmt = AllowListFormat::new(DigestAlgorithm::Keccak256, LeafEncoding::IndexedIdentity);
        let id = Identity::from_index(9);
        let leaf = fmt.leaf_hash(&id, Some(5)).unwrap();
        let list = AllowList::new(leaf, fmt);
        assert!(list.verify(&id, &ClaimTicket::indexed(ProofPath::default(), 5)));
        assert!(!list.verify(&id, &ClaimTicket::indexed(ProofPath::default(), 4)));
        assert!(!list.verify(&id, &ClaimTicket::new(ProofPath::default())));
    }

    #[test]
    fn test_claim_ticket_json_shape() {
        let ticket: ClaimTicket = serde_json::from_str(
            r#"{"proof":["0x8a3552d60a98e0ade765adddad0a2e420ca9b1eef5f326ba7ab860bb4ea72c94"]}"#,
        )
        .unwrap();
        assert_eq!(ticket.proof.len(), 1);
        assert_eq!(ticket.index, None);
    }

    // -----------------------------------------------------------------------
    // Property-based tests
    // -----------------------------------------------------------------------

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn digest_strategy() -> impl Strategy<Value = Digest> {
            any::<[u8; 32]>().prop_map(Digest::new)
        }

        proptest! {
            #[test]
            fn folding_a_path_always_verifies(
                leaf in digest_strategy(),
                path in proptest::collection::vec(digest_strategy(), 0..16),
            ) {
                let root = compute_root(DigestAlgorithm::Keccak256, &leaf, &path);
                prop_assert!(verify_proof(DigestAlgorithm::Keccak256, &root, &leaf, &path));
            }

            #[test]
            fn substituted_sibling_fails(
                leaf in digest_strategy(),
                path in proptest::collection::vec(digest_strategy(), 1..12),
                replacement in digest_strategy(),
                pick in any::<prop::sample::Index>(),
            ) {
                let i = pick.index(path.len());
                prop_assume!(path[i] != replacement);
                let root = compute_root(DigestAlgorithm::Sha256, &leaf, &path);
                let mut tampered = path.clone();
                tampered[i] = replacement;
                prop_assert!(!verify_proof(DigestAlgorithm::Sha256, &root, &leaf, &tampered));
            }
        }
    }
}
