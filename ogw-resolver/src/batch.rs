use alloy_primitives::Bytes;
use alloy_sol_types::SolCall;
use futures_util::future::join_all;
use ogw_messages::wire::encode_error_reason;
use ogw_messages::wire::queryCall;
use tracing::debug;
use tracing::warn;

use crate::reader::RecordReader;
use crate::single;

/// Probes `payload` for the batch gateway call
/// `query((address,string[],bytes)[])` and, on a hit, dispatches every
/// embedded query.
///
/// A decode miss returns `None` so the caller falls back to the
/// single-request path; it is a routing signal, not an error. On a hit the
/// queries run concurrently, each failure is captured into its own slot, and
/// the aggregate `(bool[] failures, bytes[] responses)` keeps the input
/// order regardless of completion order.
pub async fn try_dispatch_batch<R>(
    reader: &R,
    payload: &[u8],
) -> Option<Vec<u8>>
where
    R: RecordReader + ?Sized,
{
    let call = queryCall::abi_decode(payload, true).ok()?;

    let total = call.queries.len();
    debug!("Dispatching batch. queries: {}", total);

    let outcomes = join_all(
        call.queries
            .iter()
            .map(|query| single::resolve(reader, &query.data)),
    )
    .await;

    let mut failures = Vec::with_capacity(total);
    let mut responses = Vec::with_capacity(total);
    for (index, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            Ok(encoded) => {
                failures.push(false);
                responses.push(Bytes::from(encoded));
            },
            Err(err) => {
                warn!("Batch item failed. index: {} err: {}", index, err);
                failures.push(true);
                responses.push(Bytes::from(encode_error_reason(&err.to_string())));
            },
        }
    }

    Some(queryCall::abi_encode_returns(&(failures, responses)))
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use alloy_primitives::Address;
    use alloy_primitives::Bytes;
    use alloy_primitives::B256;
    use alloy_sol_types::SolValue;
    use ogw_messages::types::LookupKind;
    use ogw_messages::types::LookupRequest;
    use ogw_messages::wire::decode_error_reason;
    use ogw_messages::wire::queryReturn;
    use ogw_messages::wire::BatchQuery;

    use super::*;
    use crate::reader::DummyReader;

    fn query(
        kind: LookupKind,
        key: &str,
    ) -> BatchQuery {
        BatchQuery {
            sender: Address::repeat_byte(0x11),
            urls: vec!["https://gateway.example/".to_owned()],
            data: Bytes::from(
                LookupRequest {
                    kind,
                    node: B256::repeat_byte(0xaa),
                    key: key.to_owned(),
                }
                .encode(),
            ),
        }
    }

    async fn dispatch(
        reader: &DummyReader,
        queries: Vec<BatchQuery>,
    ) -> queryReturn {
        let payload = queryCall { queries }.abi_encode();
        let encoded = try_dispatch_batch(reader, &payload)
            .await
            .expect("payload is a batch call");
        queryCall::abi_decode_returns(&encoded, true).unwrap()
    }

    #[tokio::test]
    async fn non_batch_payloads_are_passed_over() {
        let reader = DummyReader::new();
        let single = LookupRequest {
            kind: LookupKind::Text,
            node: B256::repeat_byte(0xaa),
            key: "avatar".to_owned(),
        }
        .encode();

        assert!(try_dispatch_batch(&reader, &single).await.is_none());
        assert!(try_dispatch_batch(&reader, &[]).await.is_none());
        assert_eq!(reader.call_count(), 0);
    }

    #[tokio::test]
    async fn item_failures_stay_isolated() {
        let reader = DummyReader::new()
            .with_text("avatar", "ipfs://QmSomeHash")
            .with_text("url", "https://example.org");

        let result = dispatch(
            &reader,
            vec![
                query(LookupKind::Text, "avatar"),
                query(LookupKind::Text, "missing"),
                query(LookupKind::Text, "url"),
            ],
        )
        .await;

        assert_eq!(result.failures, vec![false, true, false]);
        assert_eq!(result.responses.len(), 3);
        assert_eq!(
            String::abi_decode(&result.responses[0], true).unwrap(),
            "ipfs://QmSomeHash"
        );
        assert!(decode_error_reason(&result.responses[1])
            .unwrap()
            .contains("missing"));
        assert_eq!(
            String::abi_decode(&result.responses[2], true).unwrap(),
            "https://example.org"
        );
    }

    #[tokio::test]
    async fn slot_order_is_independent_of_completion_order() {
        let reader = DummyReader::new()
            .with_text("slow", "first")
            .with_text("fast", "second")
            .with_delay("slow", Duration::from_millis(50));

        let result = dispatch(
            &reader,
            vec![
                query(LookupKind::Text, "slow"),
                query(LookupKind::Text, "fast"),
            ],
        )
        .await;

        assert_eq!(result.failures, vec![false, false]);
        assert_eq!(
            String::abi_decode(&result.responses[0], true).unwrap(),
            "first"
        );
        assert_eq!(
            String::abi_decode(&result.responses[1], true).unwrap(),
            "second"
        );
    }

    #[tokio::test]
    async fn malformed_inner_payloads_become_failure_slots() {
        let reader = DummyReader::new();
        let mut bad = query(LookupKind::Text, "avatar");
        bad.data = Bytes::from(vec![0xde, 0xad]);

        let result = dispatch(&reader, vec![bad]).await;

        assert_eq!(result.failures, vec![true]);
        assert!(decode_error_reason(&result.responses[0]).is_some());
    }

    #[tokio::test]
    async fn mixed_kinds_resolve_in_one_batch() {
        let reader = DummyReader::new()
            .with_text("avatar", "ipfs://QmSomeHash")
            .with_data("content", vec![0xca, 0xfe]);

        let result = dispatch(
            &reader,
            vec![
                query(LookupKind::Text, "avatar"),
                query(LookupKind::Data, "content"),
            ],
        )
        .await;

        assert_eq!(result.failures, vec![false, false]);
        assert_eq!(
            Bytes::abi_decode(&result.responses[1], true).unwrap(),
            Bytes::from(vec![0xca, 0xfe])
        );
    }
}
