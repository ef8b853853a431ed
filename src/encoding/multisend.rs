//! MultiSend transaction encoding
//!
//! The MultiSend contract expects transactions to be encoded in a packed format:
//! - operation: 1 byte (0 = Call, 1 = DelegateCall)
//! - to: 20 bytes
//! - value: 32 bytes
//! - data length: 32 bytes
//! - data: variable length

use alloy::primitives::{Bytes, U256};

use crate::error::{Error, Result};
use crate::types::{Operation, SafeCall};

/// Encodes a single transaction for MultiSend packed format
///
/// Format: operation (1 byte) | to (20 bytes) | value (32 bytes) | data length (32 bytes) | data
pub fn encode_transaction(call: &impl SafeCall) -> Vec<u8> {
    let data = call.data();

    let mut encoded = Vec::with_capacity(85 + data.len());
    encoded.push(call.operation().as_u8());
    encoded.extend_from_slice(call.to().as_slice());
    encoded.extend_from_slice(&call.value().to_be_bytes::<32>());
    encoded.extend_from_slice(&U256::from(data.len()).to_be_bytes::<32>());
    encoded.extend_from_slice(&data);

    encoded
}

/// Encodes multiple transactions for MultiSend
pub fn encode_multisend_data(calls: &[impl SafeCall]) -> Bytes {
    calls
        .iter()
        .flat_map(encode_transaction)
        .collect::<Vec<u8>>()
        .into()
}

/// Encodes transactions for MultiSendCallOnly, rejecting delegate calls
pub fn encode_call_only_data(calls: &[impl SafeCall]) -> Result<Bytes> {
    if let Some(index) = calls
        .iter()
        .position(|call| call.operation() == Operation::DelegateCall)
    {
        return Err(Error::DelegateCallNotAllowed { index });
    }
    Ok(encode_multisend_data(calls))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Call;
    use alloy::primitives::address;

    #[test]
    fn test_encode_single_transaction() {
        let call = Call::new(
            address!("0x1234567890123456789012345678901234567890"),
            U256::from(1000),
            vec![0xa9, 0x05, 0x9c, 0xbb], // transfer selector
        );

        let encoded = encode_transaction(&call);

        assert_eq!(encoded[0], 0);
        assert_eq!(
            &encoded[1..21],
            address!("0x1234567890123456789012345678901234567890").as_slice()
        );

        // 1000 = 0x3e8
        let value_bytes = &encoded[21..53];
        assert_eq!(value_bytes[31], 0xe8);
        assert_eq!(value_bytes[30], 0x03);

        let len_bytes = &encoded[53..85];
        assert_eq!(len_bytes[31], 4);

        assert_eq!(&encoded[85..], &[0xa9, 0x05, 0x9c, 0xbb]);
    }

    #[test]
    fn test_encode_multisend_data() {
        let calls = vec![
            Call::call(
                address!("0x1111111111111111111111111111111111111111"),
                vec![0x01],
            ),
            Call::delegate_call(
                address!("0x2222222222222222222222222222222222222222"),
                vec![0x02],
            ),
        ];

        let encoded = encode_multisend_data(&calls);

        // two entries of 1 + 20 + 32 + 32 + 1 bytes
        assert_eq!(encoded.len(), 172);
        assert_eq!(encoded[86], 1);
    }

    #[test]
    fn test_encode_empty_data() {
        let call = Call::call(
            address!("0x1234567890123456789012345678901234567890"),
            vec![],
        );

        let encoded = encode_transaction(&call);

        assert_eq!(encoded.len(), 85);
        assert!(encoded[53..85].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_call_only_rejects_delegate_call() {
        let calls = vec![
            Call::call(
                address!("0x1111111111111111111111111111111111111111"),
                vec![],
            ),
            Call::delegate_call(
                address!("0x2222222222222222222222222222222222222222"),
                vec![],
            ),
        ];

        let err = encode_call_only_data(&calls).unwrap_err();
        assert!(matches!(err, Error::DelegateCallNotAllowed { index: 1 }));

        let ok = encode_call_only_data(&calls[..1]).unwrap();
        assert_eq!(ok.len(), 85);
    }
}
