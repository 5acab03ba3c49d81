//! Receive path and event translation: capture into the client buffer,
//! exactly-once delivery, and DIO dispatch.
mod helpers {
    include!("../../helpers/mod.rs");
}

use helpers::{test_handle, CodecMode, Completion, MockCodec, MockRadio, RadioCall};
use korri_longfi::protocol::link::events::{ClientEvent, RfEvent, UnhandledEvent};
use korri_longfi::protocol::link::state::LinkState;
use korri_longfi::protocol::transport::RX_CONTINUOUS;

fn rx_done(payload: &[u8], rssi: i16, snr: i8) -> Completion {
    Completion::RxDone {
        payload: payload.to_vec(),
        rssi,
        snr,
    }
}

#[test]
/// A 16-byte frame into a 10-byte buffer yields the first 10 bytes once.
fn receive_truncates_to_buffer_and_delivers_once() {
    let mut buffer = [0u8; 10];
    let link = LinkState::new();
    let mut handle = test_handle(MockRadio::new(), MockCodec::new(CodecMode::Identity), &link);

    handle.set_receive_buffer(&mut buffer);
    handle.start_receive().unwrap();
    assert_eq!(handle.radio().calls, vec![RadioCall::Rx(RX_CONTINUOUS)]);

    let frame: Vec<u8> = (1..=16).collect();
    handle.radio_mut().completions.push_back(rx_done(&frame, -112, -3));
    assert_eq!(handle.handle_event(RfEvent::Dio0), Ok(ClientEvent::Rx));

    let packet = handle.get_received_packet().expect("frame must be delivered");
    assert_eq!(packet.len, 10);
    assert_eq!(packet.payload(), &frame[..10]);
    assert!(packet.is_truncated());
    assert_eq!(packet.reported_len, 16);
    assert_eq!((packet.rssi, packet.snr), (-112, -3));

    assert!(handle.get_received_packet().is_none());
}

#[test]
/// A frame that fits is delivered whole; the buffer can be lent again.
fn receive_cycle_reuses_buffer() {
    let mut buffer = [0u8; 64];
    let link = LinkState::new();
    let mut handle = test_handle(MockRadio::new(), MockCodec::new(CodecMode::Identity), &link);

    handle.set_receive_buffer(&mut buffer);
    handle
        .radio_mut()
        .completions
        .push_back(rx_done(b"first frame", -80, 9));
    assert_eq!(handle.handle_event(RfEvent::Dio0), Ok(ClientEvent::Rx));
    let packet = handle.get_received_packet().unwrap();
    assert_eq!(packet.payload(), b"first frame");
    assert!(!packet.is_truncated());

    handle.set_receive_buffer(packet.into_buffer());
    handle
        .radio_mut()
        .completions
        .push_back(rx_done(b"second", -81, 8));
    assert_eq!(handle.handle_event(RfEvent::Dio0), Ok(ClientEvent::Rx));
    let packet = handle.get_received_packet().unwrap();
    assert_eq!(packet.payload(), b"second");
    assert_eq!(link.link_quality(), (-81, 8));
}

#[test]
/// Receive timeouts and errors reach the client as unhandled events.
fn receive_failures_are_surfaced() {
    let link = LinkState::new();
    let mut handle = test_handle(MockRadio::new(), MockCodec::new(CodecMode::Identity), &link);

    handle.radio_mut().completions.push_back(Completion::RxTimeout);
    assert_eq!(
        handle.handle_event(RfEvent::Dio1),
        Ok(ClientEvent::Unhandled(UnhandledEvent::RxTimeout))
    );

    handle.radio_mut().completions.push_back(Completion::RxError);
    assert_eq!(
        handle.handle_event(RfEvent::Dio0),
        Ok(ClientEvent::Unhandled(UnhandledEvent::RxError))
    );
}

#[test]
/// Pumping with nothing reported yields `None`.
fn no_pending_event_yields_none() {
    let link = LinkState::new();
    let mut handle = test_handle(MockRadio::new(), MockCodec::new(CodecMode::Identity), &link);

    assert_eq!(handle.handle_event(RfEvent::Dio0), Ok(ClientEvent::None));
    assert_eq!(handle.radio().fired, vec![0]);
    assert!(handle.radio().calls.is_empty());
}

#[test]
/// Each DIO event fires its own line; unwired lines are skipped.
fn dio_events_fire_matching_handler() {
    let link = LinkState::new();
    let mut handle = test_handle(MockRadio::new(), MockCodec::new(CodecMode::Identity), &link);

    for event in [
        RfEvent::Dio0,
        RfEvent::Dio1,
        RfEvent::Dio2,
        RfEvent::Dio3,
        RfEvent::Dio4,
        RfEvent::Dio5,
    ] {
        assert_eq!(handle.handle_event(event), Ok(ClientEvent::None));
    }
    // The mock wires lines 0 and 1 only.
    assert_eq!(handle.radio().fired, vec![0, 1]);
}

#[test]
/// With a single handler, DIO1 falls back to the first one.
fn dio1_falls_back_to_first_handler() {
    let link = LinkState::new();
    let mut handle = test_handle(
        MockRadio::single_handler(),
        MockCodec::new(CodecMode::Identity),
        &link,
    );

    handle.radio_mut().completions.push_back(Completion::RxTimeout);
    assert_eq!(
        handle.handle_event(RfEvent::Dio1),
        Ok(ClientEvent::Unhandled(UnhandledEvent::RxTimeout))
    );
    assert_eq!(handle.radio().fired, vec![0]);

    assert_eq!(handle.handle_event(RfEvent::Dio2), Ok(ClientEvent::None));
    assert_eq!(handle.radio().fired, vec![0]);
}

#[test]
/// Timer events dispatch nothing but still drain an outcome reported
/// directly by the driver's interrupt routine.
fn timer_events_only_drain_pending_outcome() {
    let mut buffer = [0u8; 8];
    let link = LinkState::new();
    let mut handle = test_handle(MockRadio::new(), MockCodec::new(CodecMode::Identity), &link);
    handle.set_receive_buffer(&mut buffer);

    for timer in [RfEvent::Timer1, RfEvent::Timer2, RfEvent::Timer3] {
        assert_eq!(handle.handle_event(timer), Ok(ClientEvent::None));
    }
    assert!(handle.radio().fired.is_empty());

    link.events().on_rx_done(&[0xC0, 0xFF, 0xEE], -60, 10);
    assert_eq!(handle.handle_event(RfEvent::Timer2), Ok(ClientEvent::Rx));
    let packet = handle.get_received_packet().unwrap();
    assert_eq!(packet.payload(), &[0xC0, 0xFF, 0xEE]);
}

#[test]
/// Two outcomes before a pump: the latest wins and the loss is counted.
fn undrained_outcome_is_overwritten() {
    let mut buffer = [0u8; 8];
    let link = LinkState::new();
    let mut handle = test_handle(MockRadio::new(), MockCodec::new(CodecMode::Identity), &link);
    handle.set_receive_buffer(&mut buffer);

    let events = link.events();
    events.on_rx_done(&[1, 2], -70, 5);
    events.on_rx_timeout();
    assert_eq!(link.overwritten_events(), 1);

    assert_eq!(
        handle.handle_event(RfEvent::Timer1),
        Ok(ClientEvent::Unhandled(UnhandledEvent::RxTimeout))
    );
    assert_eq!(handle.handle_event(RfEvent::Timer1), Ok(ClientEvent::None));
}
