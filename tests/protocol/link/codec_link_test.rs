//! Link handle driving the reference LongFi codec: every packet the radio
//! sees decodes on its own and the fragments rebuild the payload.
mod helpers {
    include!("../../helpers/mod.rs");
}

use helpers::{test_auth, test_config, MockRadio, TEST_DEVICE_ID, TEST_OUI};
use korri_longfi::infra::codec::frame::{DecodedPacket, LongFiCodec};
use korri_longfi::protocol::link::events::{ClientEvent, RfEvent};
use korri_longfi::protocol::link::handle::Handle;
use korri_longfi::protocol::link::state::LinkState;
use korri_longfi::protocol::plans::US915;

fn run_transmission(payload: &[u8]) -> (Vec<Vec<u8>>, usize) {
    let link = LinkState::new();
    let mut handle = Handle::new(
        MockRadio::new(),
        LongFiCodec::new(),
        test_config(),
        test_auth(),
        &link,
    )
    .with_channel_plan(&US915);
    handle.init().unwrap();

    handle.send(payload).unwrap();
    let mut pumps = 0;
    loop {
        pumps += 1;
        match handle.handle_event(RfEvent::Dio0).unwrap() {
            ClientEvent::TxDone => break,
            ClientEvent::None => {}
            other => panic!("unexpected client event {:?}", other),
        }
    }
    (handle.radio().sent_packets(), pumps)
}

#[test]
/// A payload within one packet goes out as a single-packet frame.
fn short_payload_is_single_packet() {
    let (packets, pumps) = run_transmission(b"temperature=21.5");
    assert_eq!(packets.len(), 1);
    assert_eq!(pumps, 1);

    match LongFiCodec::decode(&packets[0]).unwrap() {
        DecodedPacket::Single { header, payload } => {
            assert_eq!(header.oui, TEST_OUI);
            assert_eq!(header.device_id, TEST_DEVICE_ID);
            assert_eq!(header.sequence, 0);
            assert_eq!(payload, b"temperature=21.5");
        }
        other => panic!("expected a single-packet frame, got {:?}", other),
    }
}

#[test]
/// 150 bytes at SF9 (61-byte packets) travel as three self-describing packets.
fn long_payload_is_fragmented_on_packet_boundaries() {
    let payload: Vec<u8> = (0..150).map(|i| (i * 7) as u8).collect();
    let (packets, pumps) = run_transmission(&payload);

    let lengths: Vec<usize> = packets.iter().map(Vec::len).collect();
    assert_eq!(lengths, vec![61, 61, 43]);
    assert_eq!(pumps, 3);

    let mut rebuilt = Vec::new();
    for (index, packet) in packets.iter().enumerate() {
        let decoded = LongFiCodec::decode(packet).unwrap();
        match (index, &decoded) {
            (0, DecodedPacket::FirstOfMany { header, .. }) => {
                assert_eq!(header.fragment_count, 3);
                assert_eq!(header.oui, TEST_OUI);
            }
            (i, DecodedPacket::Fragment { header, .. }) => {
                assert_eq!(header.index as usize, i);
            }
            other => panic!("unexpected packet layout {:?}", other),
        }
        assert_eq!(decoded.sequence(), 0);
        rebuilt.extend_from_slice(decoded.payload());
    }
    assert_eq!(rebuilt, payload);
}

#[test]
/// A payload needing more wire bytes than the staging buffer is refused.
fn oversized_payload_is_refused() {
    let link = LinkState::new();
    let mut handle = Handle::new(
        MockRadio::new(),
        LongFiCodec::new(),
        test_config(),
        test_auth(),
        &link,
    );
    handle.init().unwrap();
    handle.radio_mut().calls.clear();

    assert!(handle.send(&[0u8; 600]).is_err());
    assert!(handle.radio().calls.is_empty());
}
