//! The three reference message types: `PingRequest` (100), `PongResponse`
//! (101), and `FindClosestRequest` (200).

use node_id::NodeId;

use crate::errors::DecodeError;
use crate::field_type::FieldType;
use crate::header::MessageHeader;
use crate::message::{Decodable, Message};

fn value_or_default<F: FieldType>(field: Option<F>) -> F {
    field.unwrap_or_else(F::default_value)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PingRequest {
    pub header: MessageHeader,
    pub value: u32,
}

impl PingRequest {
    pub fn new(value: u32) -> PingRequest {
        PingRequest {
            header: MessageHeader::new_request(Self::TYPE_TAG),
            value,
        }
    }
}

impl Message for PingRequest {
    fn type_tag(&self) -> u32 {
        Self::TYPE_TAG
    }

    fn header(&self) -> &MessageHeader {
        &self.header
    }

    fn encode_body(&self, out: &mut Vec<u8>) {
        self.value.encode(out);
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

impl Decodable for PingRequest {
    const TYPE_TAG: u32 = 100;
    type Fields = u32;

    fn decode_body(header: MessageHeader, body: &[u8]) -> Result<PingRequest, DecodeError> {
        let (value, _) = u32::decode(body)?;
        Ok(PingRequest { header, value })
    }

    fn from_fields(header: MessageHeader, fields: Option<u32>) -> PingRequest {
        PingRequest {
            header,
            value: value_or_default(fields),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PongResponse {
    pub header: MessageHeader,
    pub value: u32,
}

impl Message for PongResponse {
    fn type_tag(&self) -> u32 {
        Self::TYPE_TAG
    }

    fn header(&self) -> &MessageHeader {
        &self.header
    }

    fn encode_body(&self, out: &mut Vec<u8>) {
        self.value.encode(out);
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

impl Decodable for PongResponse {
    const TYPE_TAG: u32 = 101;
    type Fields = u32;

    fn decode_body(header: MessageHeader, body: &[u8]) -> Result<PongResponse, DecodeError> {
        let (value, _) = u32::decode(body)?;
        Ok(PongResponse { header, value })
    }

    fn from_fields(header: MessageHeader, fields: Option<u32>) -> PongResponse {
        PongResponse {
            header,
            value: value_or_default(fields),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindClosestRequest {
    pub header: MessageHeader,
    pub node_id: NodeId,
}

impl FindClosestRequest {
    pub fn new(node_id: NodeId) -> FindClosestRequest {
        FindClosestRequest {
            header: MessageHeader::new_request(Self::TYPE_TAG),
            node_id,
        }
    }
}

impl Message for FindClosestRequest {
    fn type_tag(&self) -> u32 {
        Self::TYPE_TAG
    }

    fn header(&self) -> &MessageHeader {
        &self.header
    }

    fn encode_body(&self, out: &mut Vec<u8>) {
        self.node_id.encode(out);
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

impl Decodable for FindClosestRequest {
    const TYPE_TAG: u32 = 200;
    type Fields = NodeId;

    fn decode_body(header: MessageHeader, body: &[u8]) -> Result<FindClosestRequest, DecodeError> {
        let (node_id, _) = NodeId::decode(body)?;
        Ok(FindClosestRequest { header, node_id })
    }

    fn from_fields(header: MessageHeader, fields: Option<NodeId>) -> FindClosestRequest {
        FindClosestRequest {
            header,
            node_id: value_or_default(fields),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{decode, encode, Respond};
    use crate::registry::reference_registry;
    use crate::errors::CreateError;

    #[test]
    fn ping_round_trips() {
        let ping = PingRequest::new(42);
        let bytes = encode(&ping);

        let registry = reference_registry();
        let decoded = decode(&bytes, &registry).unwrap();

        assert_eq!(decoded.type_tag(), PingRequest::TYPE_TAG);
        assert_eq!(decoded.header().guid, ping.header.guid);
    }

    #[test]
    fn ping_respond_correlates_and_echoes_value() {
        let registry = reference_registry();
        let ping = PingRequest::new(42);
        let pong: PongResponse = ping.respond(&registry, Some(42)).unwrap();

        assert_eq!(pong.header.request_guid, Some(ping.header.guid));
        assert_eq!(pong.value, 42);
    }

    #[test]
    fn respond_with_omitted_fields_uses_field_default() {
        let registry = reference_registry();
        let ping = PingRequest::new(42);
        let pong: PongResponse = ping.respond(&registry, None).unwrap();

        assert_eq!(pong.value, 0);
    }

    #[test]
    fn find_closest_can_respond_with_a_pong() {
        let registry = reference_registry();
        let request = FindClosestRequest::new(NodeId::parse("0x7").unwrap());
        let pong: PongResponse = request.respond(&registry, Some(7)).unwrap();

        assert_eq!(pong.header.request_guid, Some(request.header.guid));
        assert_eq!(pong.value, 7);
    }

    #[test]
    fn respond_with_unregistered_type_is_not_a_message() {
        let registry = crate::registry::Registry::new();
        let ping = PingRequest::new(42);
        let err = ping.respond::<PongResponse>(&registry, Some(1)).unwrap_err();

        assert!(matches!(err, CreateError::NotAMessage));
    }
}
