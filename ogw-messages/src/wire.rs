//! ABI surface shared with the on-chain side: the batch gateway call and the
//! standard string-carrying error result.

use alloy_sol_types::sol;
use alloy_sol_types::Revert;
use alloy_sol_types::SolError;

/// Reason used when a failure carries no message of its own.
pub const FALLBACK_ERROR_REASON: &str = "Gateway error";

sol! {
    /// One forwarded lookup inside a batch gateway call. `sender` and `urls`
    /// are carried for the aggregator's bookkeeping and are not verified
    /// here; `data` is an ordinary single-request payload.
    #[derive(Debug)]
    struct BatchQuery {
        address sender;
        string[] urls;
        bytes data;
    }

    /// Batch gateway entry point used by aggregating resolvers,
    /// `query((address,string[],bytes)[]) -> (bool[], bytes[])`.
    function query(BatchQuery[] queries) external returns (bool[] failures, bytes[] responses);
}

/// Encodes a failure message as the standard `Error(string)` revert payload.
///
/// An empty message encodes [`FALLBACK_ERROR_REASON`] so a failure slot is
/// never silent.
pub fn encode_error_reason(reason: &str) -> Vec<u8> {
    let reason = if reason.is_empty() {
        FALLBACK_ERROR_REASON
    } else {
        reason
    };

    Revert {
        reason: reason.to_owned(),
    }
    .abi_encode()
}

/// Decodes an `Error(string)` payload back to its message.
pub fn decode_error_reason(payload: &[u8]) -> Option<String> {
    Revert::abi_decode(payload, true)
        .ok()
        .map(|revert| revert.reason)
}

#[cfg(test)]
mod test {
    use alloy_primitives::Address;
    use alloy_primitives::Bytes;
    use alloy_sol_types::SolCall;

    use super::*;

    #[test]
    fn error_reason_roundtrip() {
        let encoded = encode_error_reason("boom");
        assert_eq!(decode_error_reason(&encoded).unwrap(), "boom");
    }

    #[test]
    fn empty_reason_falls_back() {
        let encoded = encode_error_reason("");
        assert_eq!(
            decode_error_reason(&encoded).unwrap(),
            FALLBACK_ERROR_REASON
        );
    }

    #[test]
    fn error_payload_carries_the_standard_selector() {
        let encoded = encode_error_reason("boom");
        assert_eq!(encoded[..4], [0x08, 0xc3, 0x79, 0xa0]);
    }

    #[test]
    fn batch_call_roundtrip() {
        let call = queryCall {
            queries: vec![BatchQuery {
                sender: Address::repeat_byte(0x11),
                urls: vec!["https://gateway.example/".to_owned()],
                data: Bytes::from(vec![0xde, 0xad]),
            }],
        };

        let decoded = queryCall::abi_decode(&call.abi_encode(), true).unwrap();
        assert_eq!(decoded.queries.len(), 1);
        assert_eq!(decoded.queries[0].data, Bytes::from(vec![0xde, 0xad]));
        assert_eq!(decoded.queries[0].urls, vec!["https://gateway.example/"]);
    }
}
