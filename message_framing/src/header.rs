//! `MessageHeader`: the fixed 68-byte prologue every message carries.

use chrono::{DateTime, Utc};
use node_id::NodeId;
use uuid::Uuid;

use crate::errors::DecodeError;
use crate::field_type::FieldType;

/// Current protocol version emitted by this implementation.
pub const PROTOCOL_VERSION: u32 = 1;

/// Wire size of [`MessageHeader`], per the layout table: message_type_id
/// (4) + guid (16) + request_guid (16) + version (4) + created_on (8) +
/// sender_node_id (20).
pub const HEADER_SIZE: usize = 4 + 16 + 16 + 4 + 8 + 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageHeader {
    pub message_type_id: u32,
    pub guid: Uuid,
    /// `None` on the request leg; set to the originating request's `guid`
    /// on a response produced via [`MessageHeader::new_response`].
    pub request_guid: Option<Uuid>,
    pub version: u32,
    pub created_on: DateTime<Utc>,
    /// `None` when the sender's node id is not yet known.
    pub sender_node_id: Option<NodeId>,
}

impl MessageHeader {
    /// Builds a fresh request header: new guid, `request_guid = None`,
    /// `version = 1`, `created_on = now`, `sender_node_id = None`.
    pub fn new_request(message_type_id: u32) -> MessageHeader {
        MessageHeader {
            message_type_id,
            guid: Uuid::new_v4(),
            request_guid: None,
            version: PROTOCOL_VERSION,
            created_on: Utc::now(),
            sender_node_id: None,
        }
    }

    /// Builds a fresh response header correlated to `request` via
    /// `request_guid`. No other header field is inherited.
    pub fn new_response(message_type_id: u32, request: &MessageHeader) -> MessageHeader {
        MessageHeader {
            message_type_id,
            guid: Uuid::new_v4(),
            request_guid: Some(request.guid),
            version: PROTOCOL_VERSION,
            created_on: Utc::now(),
            sender_node_id: None,
        }
    }

    pub fn encode(&self, out: &mut Vec<u8>) {
        self.message_type_id.encode(out);
        self.guid.encode(out);
        self.request_guid.unwrap_or(Uuid::nil()).encode(out);
        self.version.encode(out);
        self.created_on.encode(out);
        self.sender_node_id
            .unwrap_or(NodeId::ZERO)
            .encode(out);
    }

    pub fn decode(bytes: &[u8]) -> Result<(MessageHeader, usize), DecodeError> {
        if bytes.len() < HEADER_SIZE {
            return Err(DecodeError::Truncated {
                needed: HEADER_SIZE,
                got: bytes.len(),
            });
        }

        let mut offset = 0;
        let (message_type_id, n) = u32::decode(&bytes[offset..])?;
        offset += n;
        let (guid, n) = Uuid::decode(&bytes[offset..])?;
        offset += n;
        let (request_guid, n) = Uuid::decode(&bytes[offset..])?;
        offset += n;
        let (version, n) = u32::decode(&bytes[offset..])?;
        offset += n;
        let (created_on, n) = <DateTime<Utc> as FieldType>::decode(&bytes[offset..])?;
        offset += n;
        let (sender_node_id, n) = NodeId::decode(&bytes[offset..])?;
        offset += n;

        Ok((
            MessageHeader {
                message_type_id,
                guid,
                request_guid: if request_guid.is_nil() {
                    None
                } else {
                    Some(request_guid)
                },
                version,
                created_on,
                sender_node_id: if sender_node_id == NodeId::ZERO {
                    None
                } else {
                    Some(sender_node_id)
                },
            },
            offset,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_marshal_round_trips() {
        let header = MessageHeader::new_request(100);

        let mut buf = Vec::new();
        header.encode(&mut buf);
        assert_eq!(buf.len(), HEADER_SIZE);

        let (decoded, consumed) = MessageHeader::decode(&buf).unwrap();
        assert_eq!(consumed, HEADER_SIZE);
        assert_eq!(decoded.message_type_id, header.message_type_id);
        assert_eq!(decoded.guid, header.guid);
    }

    #[test]
    fn response_header_correlates_request_guid() {
        let request = MessageHeader::new_request(100);
        let response = MessageHeader::new_response(101, &request);
        assert_eq!(response.request_guid, Some(request.guid));
    }
}
