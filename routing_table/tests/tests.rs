use node_id::NodeId;
use routing_table::RoutingTable;

fn id(n: u8) -> NodeId {
    let mut bytes = [0u8; 20];
    bytes[19] = n;
    NodeId::from_bytes(bytes)
}

#[test]
fn routing_table_first_split_scenario() {
    let mut table = RoutingTable::new(id(0x3));

    table.insert(Some("127.0.0.1".into()), Some(9001), id(0x2));
    table.insert(Some("127.0.0.1".into()), Some(9002), id(0x4));

    assert_eq!(table.find(&id(0x2)).unwrap().port, Some(9001));
    assert_eq!(table.find(&id(0x4)).unwrap().port, Some(9002));
    assert!(table.find(&id(0x3)).is_some());
}

#[test]
fn owner_contact_is_present_at_construction() {
    let owner = id(0x42);
    let table = RoutingTable::new(owner);
    assert!(table.find(&owner).is_some());
}

#[test]
fn many_inserts_keep_table_queryable() {
    let mut table = RoutingTable::new(id(0x1));
    for i in 2..=250u8 {
        table.insert(None, Some(i as u16), id(i));
    }

    for i in 2..=250u8 {
        assert_eq!(table.find(&id(i)).unwrap().port, Some(i as u16));
    }
}
