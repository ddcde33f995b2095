use proptest::prelude::*;

use proofmesh_types::{Fingerprint, ProofId, Timestamp};

proptest! {
    /// ProofId hex roundtrip: to_hex -> from_hex produces the identical id.
    #[test]
    fn proof_id_hex_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let id = ProofId::new(bytes);
        prop_assert_eq!(ProofId::from_hex(&id.to_hex()).unwrap(), id);
    }

    /// Fingerprint::is_zero is true only for all-zero bytes.
    #[test]
    fn fingerprint_is_zero_correct(bytes in prop::array::uniform32(0u8..)) {
        let fp = Fingerprint::new(bytes);
        prop_assert_eq!(fp.is_zero(), bytes == [0u8; 32]);
    }

    /// ProofId bincode serialization roundtrip.
    #[test]
    fn proof_id_bincode_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let id = ProofId::new(bytes);
        let encoded = bincode::serialize(&id).unwrap();
        let decoded: ProofId = bincode::deserialize(&encoded).unwrap();
        prop_assert_eq!(decoded, id);
    }

    /// Timestamp ordering: new(a) <= new(b) iff a <= b.
    #[test]
    fn timestamp_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ta = Timestamp::new(a);
        let tb = Timestamp::new(b);
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta == tb, a == b);
    }

    /// has_passed is strict: a deadline passes only once now is beyond it.
    #[test]
    fn timestamp_has_passed_is_strict(deadline in 0u64..1_000_000, now in 0u64..1_000_000) {
        prop_assert_eq!(Timestamp::new(deadline).has_passed(Timestamp::new(now)), now > deadline);
    }

    /// remaining_until saturates to 0 once the deadline is behind us.
    #[test]
    fn timestamp_remaining_until(base in 0u64..1_000_000, offset in 0u64..1_000_000) {
        let t = Timestamp::new(base);
        prop_assert_eq!(t.remaining_until(Timestamp::new(base + offset)), offset);
        prop_assert_eq!(Timestamp::new(base + offset).remaining_until(t), 0);
    }
}
