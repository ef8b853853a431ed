//! Signature bundle encoding for `execTransaction`

use alloy::primitives::Bytes;

use crate::types::{SafeSignature, SIGNATURE_LENGTH};

/// Concatenates owner signatures into the bundle `execTransaction` expects
///
/// Signatures are ordered by ascending signer. Static parts come first, one
/// 65-byte slot per signature; contract signatures point into the dynamic
/// section appended after them.
pub fn build_signature_bytes(signatures: &[SafeSignature]) -> Bytes {
    let mut sorted: Vec<&SafeSignature> = signatures.iter().collect();
    sorted.sort_by_key(|sig| sig.signer);

    let mut static_parts = Vec::with_capacity(sorted.len() * SIGNATURE_LENGTH);
    let mut dynamic_parts = Vec::new();
    let dynamic_start = sorted.len() * SIGNATURE_LENGTH;

    for sig in sorted {
        static_parts.extend_from_slice(&sig.static_part(dynamic_start + dynamic_parts.len()));
        dynamic_parts.extend_from_slice(&sig.dynamic_part());
    }

    static_parts.extend_from_slice(&dynamic_parts);
    static_parts.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signing::generate_pre_validated_signature;
    use alloy::primitives::{address, U256};

    #[test]
    fn test_empty_bundle() {
        assert!(build_signature_bytes(&[]).is_empty());
    }

    #[test]
    fn test_contract_signature_offsets() {
        let eoa = address!("0x3333333333333333333333333333333333333333");
        let first = address!("0x1111111111111111111111111111111111111111");
        let second = address!("0x2222222222222222222222222222222222222222");

        let bundle = build_signature_bytes(&[
            generate_pre_validated_signature(eoa),
            SafeSignature::contract(second, vec![0xbb; 3]),
            SafeSignature::contract(first, vec![0xaa; 2]),
        ]);

        // 3 static parts, then 32 + 2 and 32 + 3 dynamic bytes
        assert_eq!(bundle.len(), 3 * 65 + 34 + 35);

        let offset_of = |slot: usize| U256::from_be_slice(&bundle[slot * 65 + 32..slot * 65 + 64]);
        assert_eq!(&bundle[12..32], first.as_slice());
        assert_eq!(offset_of(0), U256::from(195));
        assert_eq!(&bundle[65 + 12..65 + 32], second.as_slice());
        assert_eq!(offset_of(1), U256::from(195 + 34));
        assert_eq!(bundle[2 * 65 + 64], 1);

        assert_eq!(bundle[195 + 31], 2);
        assert_eq!(&bundle[195 + 32..195 + 34], &[0xaa, 0xaa]);
        assert_eq!(bundle[229 + 31], 3);
    }
}
