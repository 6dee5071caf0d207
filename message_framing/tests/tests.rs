use message_framing::message::{decode, encode};
use message_framing::messages::{FindClosestRequest, PingRequest, PongResponse};
use message_framing::registry::reference_registry;
use message_framing::{Decodable, Message, Respond};
use node_id::NodeId;

#[test]
fn ping_encode_decode_round_trips_value_and_tag() {
    let ping = PingRequest::new(42);
    let bytes = encode(&ping);

    let registry = reference_registry();
    let decoded = decode(&bytes, &registry).unwrap();

    assert_eq!(decoded.type_tag(), 100);
    assert_eq!(decoded.header().guid, ping.header.guid);
}

#[test]
fn ping_respond_produces_correlated_pong() {
    let registry = reference_registry();
    let ping = PingRequest::new(42);
    let pong: PongResponse = ping.respond(&registry, Some(42)).unwrap();

    assert_eq!(pong.header.request_guid, Some(ping.header.guid));
    assert_eq!(pong.value, 42);

    let bytes = encode(&pong);
    let decoded = decode(&bytes, &registry).unwrap();
    assert_eq!(decoded.type_tag(), PongResponse::TYPE_TAG);
}

#[test]
fn respond_to_an_unregistered_type_is_create_error() {
    let empty_registry = message_framing::Registry::new();
    let ping = PingRequest::new(1);

    let err = ping.respond::<PongResponse>(&empty_registry, None).unwrap_err();
    assert!(matches!(err, message_framing::CreateError::NotAMessage));
}

#[test]
fn find_closest_round_trips_node_id() {
    let target = NodeId::parse("0x3").unwrap();
    let request = FindClosestRequest::new(target);
    let bytes = encode(&request);

    let registry = reference_registry();
    let decoded = decode(&bytes, &registry).unwrap();
    assert_eq!(decoded.type_tag(), 200);
    assert_eq!(decoded.header().guid, request.header.guid);
}

#[test]
fn unknown_type_tag_is_an_error() {
    let ping = PingRequest::new(1);
    let bytes = encode(&ping);

    let empty_registry = message_framing::Registry::new();
    assert!(decode(&bytes, &empty_registry).is_err());
}

#[test]
fn truncated_buffer_is_a_decode_error() {
    let registry = reference_registry();
    let short = [0u8, 0, 0, 100];
    assert!(decode(&short, &registry).is_err());
}
