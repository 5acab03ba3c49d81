//! # Quickstart Example
//!
//! Minimal example demonstrating the basics of korri-longfi:
//! - Plug a radio driver into a link handle
//! - Send a payload that needs several radio packets
//! - Receive a frame into a caller-supplied buffer
//!
//! The radio is simulated in memory so the example runs on the host.
//!
//! ```bash
//! cargo run --example quickstart
//! ```

use korri_longfi::infra::codec::frame::{DecodedPacket, LongFiCodec};
use korri_longfi::infra::codec::traits::AuthCallbacks;
use korri_longfi::protocol::link::config::LongFiConfig;
use korri_longfi::protocol::link::events::{ClientEvent, RfEvent};
use korri_longfi::protocol::link::handle::Handle;
use korri_longfi::protocol::link::state::{LinkState, RadioEvents};
use korri_longfi::protocol::transport::traits::{
    dio_handler::DioHandler,
    lora_radio::{LoRaRadio, RadioConfig},
};
use korri_longfi::protocol::transport::NUM_DIO_LINES;

/// Shared with the (simulated) interrupt context for the whole program.
static LINK: LinkState<'static> = LinkState::new();

/// What the simulated chip will report on its next interrupt.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum ChipStatus {
    #[default]
    Idle,
    Transmitting,
    Receiving,
}

/// Host stand-in for an SX1276: prints what it is asked to do.
#[derive(Default)]
struct SimulatedRadio {
    status: ChipStatus,
    seed: u32,
    on_air: Vec<Vec<u8>>,
}

impl LoRaRadio for SimulatedRadio {
    type Error = core::convert::Infallible;
    type Irq = SimulatedIrq;

    fn init(&mut self) -> Result<[Option<SimulatedIrq>; NUM_DIO_LINES], Self::Error> {
        println!("   radio: init");
        Ok([Some(SimulatedIrq), None, None, None, None, None])
    }

    fn set_tx_config(&mut self, config: &RadioConfig) -> Result<(), Self::Error> {
        println!(
            "   radio: SF{} {} Hz bandwidth, {} dBm",
            config.spreading_factor,
            config.bandwidth.hz(),
            config.power
        );
        Ok(())
    }

    fn set_channel(&mut self, frequency_hz: u32) -> Result<(), Self::Error> {
        println!("   radio: channel {:.1} MHz", frequency_hz as f64 / 1e6);
        Ok(())
    }

    fn send(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        println!("   radio: send {} bytes", data.len());
        self.on_air.push(data.to_vec());
        self.status = ChipStatus::Transmitting;
        Ok(())
    }

    fn rx(&mut self, timeout_ms: u32) -> Result<(), Self::Error> {
        println!("   radio: rx (timeout {} ms)", timeout_ms);
        self.status = ChipStatus::Receiving;
        Ok(())
    }

    fn sleep(&mut self) -> Result<(), Self::Error> {
        println!("   radio: sleep");
        self.status = ChipStatus::Idle;
        Ok(())
    }

    fn random(&mut self) -> u32 {
        // xorshift32
        self.seed ^= self.seed << 13;
        self.seed ^= self.seed >> 17;
        self.seed ^= self.seed << 5;
        self.seed
    }
}

/// DIO0 service routine of the simulated chip.
struct SimulatedIrq;

impl DioHandler<SimulatedRadio> for SimulatedIrq {
    fn fire(&self, radio: &mut SimulatedRadio, events: &RadioEvents<'_, '_>) {
        match radio.status {
            ChipStatus::Transmitting => events.on_tx_done(),
            ChipStatus::Receiving => events.on_rx_done(b"downlink: set interval 600s", -98, 7),
            ChipStatus::Idle => {}
        }
    }
}

fn main() {
    println!("=== korri-longfi Quickstart ===\n");

    // ======================================================================
    // 1. Bring the link up
    // ======================================================================
    println!("1. Initializing the link");

    let radio = SimulatedRadio {
        seed: 0x1234_5678,
        ..Default::default()
    };
    let config = LongFiConfig::new(0x0000_0002, 0x0042)
        .with_radio(RadioConfig::default().with_spreading_factor(9));
    let auth = AuthCallbacks::PresharedKey([0x2B; 16]);

    let mut handle = Handle::new(radio, LongFiCodec::new(), config, auth, &LINK);
    if let Err(e) = handle.init() {
        eprintln!("   init failed: {:?}", e);
        return;
    }
    if let Some(sizing) = handle.fragment_sizing() {
        println!(
            "   plan {}: {} bytes per packet\n",
            handle.channel_plan().name,
            sizing.packet_capacity()
        );
    }

    // ======================================================================
    // 2. Send a payload larger than one packet
    // ======================================================================
    println!("2. Sending 120 bytes");

    let payload: Vec<u8> = (0..120u8).collect();
    if let Err(e) = handle.send(&payload) {
        eprintln!("   send failed: {:?}", e);
        return;
    }
    loop {
        // Board glue would post this from the DIO0 interrupt.
        match handle.handle_event(RfEvent::Dio0) {
            Ok(ClientEvent::TxDone) => {
                println!("   -> TxDone\n");
                break;
            }
            Ok(ClientEvent::None) => println!("   -> next fragment"),
            Ok(other) => {
                println!("   -> {:?}\n", other);
                break;
            }
            Err(e) => {
                eprintln!("   transmit failed: {:?}", e);
                return;
            }
        }
    }

    for packet in &handle.radio().on_air {
        match LongFiCodec::decode(packet) {
            Ok(DecodedPacket::FirstOfMany { header, payload }) => println!(
                "   first of {} packets, {} payload bytes",
                header.fragment_count,
                payload.len()
            ),
            Ok(decoded) => println!("   fragment, {} payload bytes", decoded.payload().len()),
            Err(e) => println!("   undecodable packet: {}", e),
        }
    }
    println!();

    // ======================================================================
    // 3. Receive a frame
    // ======================================================================
    println!("3. Receiving");

    // The static link holds the buffer between calls, so it must live as long.
    let buffer: &'static mut [u8] = Box::leak(Box::new([0u8; 64]));

    handle.set_receive_buffer(buffer);
    if let Err(e) = handle.start_receive() {
        eprintln!("   rx failed: {:?}", e);
        return;
    }
    if let Ok(ClientEvent::Rx) = handle.handle_event(RfEvent::Dio0) {
        if let Some(packet) = handle.get_received_packet() {
            println!(
                "   {:?} (rssi {} dBm, snr {} dB)",
                String::from_utf8_lossy(packet.payload()),
                packet.rssi,
                packet.snr
            );
        }
    }
}
