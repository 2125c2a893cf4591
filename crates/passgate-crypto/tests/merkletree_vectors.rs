//! Cross-tool vectors: roots and proofs produced by sorted-pair allow-list
//! tooling (Keccak-256 leaves over raw 20-byte identities) must verify here
//! unchanged.

use passgate_core::{Digest, DigestAlgorithm, Identity};
use passgate_crypto::{AllowList, AllowListFormat, AllowListTree, ClaimTicket, ProofPath};

const ROOT: &str = "0x310aeb9a1979284d9124f81d2d128e2d08b3441c7eef588f3514dd878551f9fb";

const MEMBERS: [&str; 7] = [
    "0x70997970C51812dc3A010C7d01b50e0d17dc79C8",
    "0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC",
    "0x90F79bf6EB2c4F870365E785982E1f101E93b906",
    "0x15d34AAf54267DB7D7c367839AAf71A00a2C6A65",
    "0x9965507D1a55bcC2695C58ba16FB37d819B0A4dc",
    "0x976EA74026E726554dB657fA54763abd0C3a0aa9",
    "0x14dC79964da2C08b23698B3D3cc7Ca32193d9955",
];

fn list() -> AllowList {
    AllowList::new(ROOT.parse().unwrap(), AllowListFormat::default())
}

#[test]
fn tooling_proof_for_first_member_verifies() {
    let proof = ProofPath::from_hex_strings(&[
        "0x8a3552d60a98e0ade765adddad0a2e420ca9b1eef5f326ba7ab860bb4ea72c94",
        "0x28ee50ccca7572e60f382e915d3cc323c3cb713b263673ba830ab179d0e5d57f",
        "0x23f0b355151c3d61c31a1a21dc2f4f88deaf007514968fe3f22e016366ec7657",
    ])
    .unwrap();
    let member = Identity::from_hex(MEMBERS[0]).unwrap();
    assert!(list().verify(&member, &ClaimTicket::new(proof)));
}

#[test]
fn tooling_proof_for_carried_member_verifies() {
    let proof = ProofPath::from_hex_strings(&[
        "0x0452b2cdd88420d4e8354b0b7f1c4b4241f00ca154b901a155c2c3deef83b41a",
        "0x5c0965c65dfb1547d128efb3e61004f43995418da2d36870318fd1d53a6ec3ab",
    ])
    .unwrap();
    let member = Identity::from_hex(MEMBERS[6]).unwrap();
    assert!(list().verify(&member, &ClaimTicket::new(proof)));
}

#[test]
fn proof_is_bound_to_its_member() {
    let ids: Vec<Identity> = MEMBERS.iter().map(|m| Identity::from_hex(m).unwrap()).collect();
    let tree = AllowListTree::from_identities(AllowListFormat::default(), &ids).unwrap();
    assert_eq!(tree.root(), ROOT.parse::<Digest>().unwrap());

    let list = list();
    for (i, owner) in ids.iter().enumerate() {
        let ticket = ClaimTicket::new(tree.proof(i).unwrap());
        for (j, other) in ids.iter().enumerate() {
            assert_eq!(list.verify(other, &ticket), i == j, "proof {i} presented by {j}");
        }
        assert!(list.verify(owner, &ticket));
    }
}

#[test]
fn sha256_lists_do_not_accept_keccak_proofs() {
    let ids: Vec<Identity> = MEMBERS.iter().map(|m| Identity::from_hex(m).unwrap()).collect();
    let keccak = AllowListTree::from_identities(AllowListFormat::default(), &ids).unwrap();
    let sha_format = AllowListFormat {
        algorithm: DigestAlgorithm::Sha256,
        ..AllowListFormat::default()
    };
    let sha = AllowListTree::from_identities(sha_format, &ids).unwrap();
    assert_ne!(keccak.root(), sha.root());

    let sha_list = AllowList::new(sha.root(), sha_format);
    let ticket = ClaimTicket::new(keccak.proof(2).unwrap());
    assert!(!sha_list.verify(&ids[2], &ticket));
    let ticket = ClaimTicket::new(sha.proof(2).unwrap());
    assert!(sha_list.verify(&ids[2], &ticket));
}
