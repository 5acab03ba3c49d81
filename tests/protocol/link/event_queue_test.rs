//! Hardware event queue: interrupt glue posts events, a task pumps them into
//! the handle until the client has something to act upon.
mod helpers {
    include!("../../helpers/mod.rs");
}

use helpers::{test_handle, CodecMode, Completion, MockCodec, MockRadio};
use korri_longfi::protocol::link::events::{ClientEvent, RfEvent};
use korri_longfi::protocol::link::queue::HardwareEventQueue;
use korri_longfi::protocol::link::state::LinkState;
use static_cell::StaticCell;
use tokio::time::{sleep, Duration};

static LINK: StaticCell<LinkState<'static>> = StaticCell::new();
static QUEUE: StaticCell<HardwareEventQueue<4>> = StaticCell::new();
static RX_BUFFER: StaticCell<[u8; 32]> = StaticCell::new();

static SMALL_QUEUE: HardwareEventQueue<2> = HardwareEventQueue::new();

#[tokio::test]
/// Intermediate fragments are absorbed; the pump returns on completion.
async fn next_client_event_skips_intermediate_fragments() {
    let link = LinkState::new();
    let queue: HardwareEventQueue<4> = HardwareEventQueue::new();
    let mut handle = test_handle(MockRadio::new(), MockCodec::new(CodecMode::Fixed(120)), &link);

    handle.send(b"queued").unwrap();
    for _ in 0..3 {
        assert!(queue.notify(RfEvent::Dio0));
    }

    let event = handle.next_client_event(&queue).await;
    assert_eq!(event, Ok(ClientEvent::TxDone));
    assert_eq!(handle.radio().sent_packets().len(), 3);
    assert!(queue.try_receive().is_none());
}

#[tokio::test]
/// Events posted later by another task wake the pump.
async fn next_client_event_waits_for_interrupts() {
    let link: &'static LinkState<'static> = LINK.init(LinkState::new());
    let queue: &'static HardwareEventQueue<4> = QUEUE.init(HardwareEventQueue::new());
    let buffer = RX_BUFFER.init([0; 32]);

    let mut handle = test_handle(MockRadio::new(), MockCodec::new(CodecMode::Identity), link);
    handle.set_receive_buffer(buffer);
    handle.start_receive().unwrap();
    handle.radio_mut().completions.push_back(Completion::RxDone {
        payload: b"uplink ack".to_vec(),
        rssi: -90,
        snr: 6,
    });

    let isr = tokio::spawn(async move {
        sleep(Duration::from_millis(10)).await;
        // A spurious DIO2 first; the mock does not wire it.
        queue.notify(RfEvent::Dio2);
        queue.notify(RfEvent::Dio0);
    });

    let event = tokio::time::timeout(Duration::from_secs(1), handle.next_client_event(queue))
        .await
        .expect("pump must wake up");
    assert_eq!(event, Ok(ClientEvent::Rx));
    isr.await.unwrap();

    let packet = handle.get_received_packet().unwrap();
    assert_eq!(packet.payload(), b"uplink ack");
}

#[test]
/// A full queue drops and counts further events.
fn full_queue_drops_events() {
    assert!(SMALL_QUEUE.notify(RfEvent::Dio0));
    assert!(SMALL_QUEUE.notify(RfEvent::Dio1));
    assert!(!SMALL_QUEUE.notify(RfEvent::Dio2));
    assert_eq!(SMALL_QUEUE.dropped_events(), 1);

    assert_eq!(SMALL_QUEUE.try_receive(), Some(RfEvent::Dio0));
    assert!(SMALL_QUEUE.notify(RfEvent::Dio3));
    assert_eq!(SMALL_QUEUE.try_receive(), Some(RfEvent::Dio1));
    assert_eq!(SMALL_QUEUE.try_receive(), Some(RfEvent::Dio3));
    assert_eq!(SMALL_QUEUE.try_receive(), None);
}
