use ogw_messages::types::LookupKind;
use ogw_messages::types::LookupRequest;
use ogw_messages::types::ResolvedValue;
use ogw_messages::GatewayError;
use tracing::debug;

use crate::reader::RecordReader;

/// Resolves one lookup payload: decode, read, re-encode.
///
/// The result is exactly the encoded value tuple the resolver callback
/// expects; batching wraps it separately.
pub async fn resolve<R>(
    reader: &R,
    payload: &[u8],
) -> Result<Vec<u8>, GatewayError>
where
    R: RecordReader + ?Sized,
{
    let request = LookupRequest::decode(payload)?;
    debug!(
        "Resolving lookup. kind: {} node: {} key: {}",
        request.kind, request.node, request.key
    );

    let value = match request.kind {
        LookupKind::Text => {
            let text = reader
                .text(request.node, &request.key)
                .await
                .map_err(|err| GatewayError::ChainRead(format!("{err:#}")))?;
            ResolvedValue::Text(text)
        },
        LookupKind::Data => {
            let data = reader
                .data(request.node, &request.key)
                .await
                .map_err(|err| GatewayError::ChainRead(format!("{err:#}")))?;
            ResolvedValue::Data(data)
        },
    };

    Ok(value.encode())
}
