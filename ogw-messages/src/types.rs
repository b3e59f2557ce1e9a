use std::fmt::Display;
use std::fmt::Formatter;

use alloy_primitives::Bytes;
use alloy_primitives::B256;
use alloy_sol_types::sol_data;
use alloy_sol_types::SolType;
use alloy_sol_types::SolValue;

use crate::error::GatewayError;

/// Lookup kinds understood by the gateway.
///
/// The tag values are fixed by the resolver contract's calldata layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LookupKind {
    /// UTF-8 text record, answered by `text(bytes32,string) -> string`.
    Text = 0,

    /// Arbitrary byte record, answered by `data(bytes32,string) -> bytes`.
    Data = 1,
}

impl LookupKind {
    pub fn from_tag(tag: u8) -> Result<Self, GatewayError> {
        match tag {
            0 => Ok(LookupKind::Text),
            1 => Ok(LookupKind::Data),
            other => Err(GatewayError::UnsupportedKind(other)),
        }
    }

    pub fn tag(&self) -> u8 {
        *self as u8
    }
}

impl Display for LookupKind {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            LookupKind::Text => write!(f, "text"),
            LookupKind::Data => write!(f, "data"),
        }
    }
}

/// A decoded single-item lookup request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LookupRequest {
    pub kind: LookupKind,
    pub node: B256,
    pub key: String,
}

impl LookupRequest {
    /// Decodes the `(uint8 kind, bytes32 node, string key)` parameter tuple.
    ///
    /// The kind tag is checked before anything else is done with the
    /// request; an unknown tag never reaches a chain read.
    pub fn decode(payload: &[u8]) -> Result<Self, GatewayError> {
        let (tag, node, key) =
            <(sol_data::Uint<8>, sol_data::FixedBytes<32>, sol_data::String)>::abi_decode_params(
                payload, true,
            )
            .map_err(|err| GatewayError::Decode(err.to_string()))?;

        Ok(Self {
            kind: LookupKind::from_tag(tag)?,
            node,
            key,
        })
    }

    /// Inverse of [`LookupRequest::decode`].
    pub fn encode(&self) -> Vec<u8> {
        <(sol_data::Uint<8>, sol_data::FixedBytes<32>, sol_data::String)>::abi_encode_params(&(
            self.kind.tag(),
            self.node,
            self.key.clone(),
        ))
    }
}

/// The authoritative answer to a [`LookupRequest`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolvedValue {
    Text(String),
    Data(Bytes),
}

impl ResolvedValue {
    /// Encodes the value in the exact layout the resolver callback expects:
    /// a single-element parameter tuple, no outer envelope.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            ResolvedValue::Text(value) => value.abi_encode(),
            ResolvedValue::Data(value) => value.abi_encode(),
        }
    }
}
