//! LongFi link handle: one radio session.
//!
//! The handle owns the radio driver and the frame codec. It encodes outbound
//! payloads, cuts the wire bytes into radio packets, hops channels, and turns
//! the radio's completion reports into [`ClientEvent`]s.
//!
//! Everything here runs in the main context. Interrupt context only touches
//! the shared [`LinkState`] through [`RadioEvents`](crate::protocol::link::state::RadioEvents),
//! either from the DIO handlers fired by [`Handle::handle_event`] or from the
//! driver's own interrupt routine.
use crate::core::{ChannelPlan, LARGEST_HEADER_LEN, TX_BUFFER_SIZE};
use crate::error::{CodecError, LongFiError};
use crate::infra::codec::traits::{AuthCallbacks, FrameContext, LinkFrameCodec, SessionConfig};
use crate::protocol::link::config::LongFiConfig;
use crate::protocol::link::events::{ClientEvent, InternalEvent, RfEvent};
use crate::protocol::link::queue::HardwareEventQueue;
use crate::protocol::link::state::{LinkState, RxPacket};
use crate::protocol::plans::DEFAULT_PLAN;
use crate::protocol::transport::fragmentation::{FragmentSizing, TxCursor};
use crate::protocol::transport::traits::dio_handler::DioHandler;
use crate::protocol::transport::traits::lora_radio::{LoRaRadio, RadioConfig};
use crate::protocol::transport::{NUM_DIO_LINES, RF_TEST_BYTE, RX_CONTINUOUS};

/// Radio session bound to a driver, a codec, and a shared [`LinkState`].
pub struct Handle<'a, 'buf, R: LoRaRadio, C: LinkFrameCodec> {
    radio: R,
    codec: C,
    config: LongFiConfig,
    session: SessionConfig,
    sequence: u32,
    plan: &'static ChannelPlan,
    /// Sizing row selected at `init`; `None` until then.
    row: Option<usize>,
    sizing: Option<FragmentSizing>,
    tx: TxCursor,
    irq_handlers: [Option<R::Irq>; NUM_DIO_LINES],
    link: &'a LinkState<'buf>,
}

impl<'a, 'buf, R, C> Handle<'a, 'buf, R, C>
where
    R: LoRaRadio,
    C: LinkFrameCodec,
{
    /// Bind a radio and a codec to a session. Nothing touches the radio until
    /// [`Handle::init`].
    pub fn new(
        radio: R,
        codec: C,
        config: LongFiConfig,
        auth: AuthCallbacks,
        link: &'a LinkState<'buf>,
    ) -> Self {
        Self {
            radio,
            codec,
            config,
            session: SessionConfig::new(config.oui, config.device_id, auth),
            sequence: 0,
            plan: DEFAULT_PLAN,
            row: None,
            sizing: None,
            tx: TxCursor::new(),
            irq_handlers: core::array::from_fn(|_| None),
            link,
        }
    }

    /// Use another channel plan than the generated default.
    ///
    /// The plan and its sizing row are fixed by [`Handle::init`]; on an
    /// initialized handle the current plan is kept.
    pub fn with_channel_plan(mut self, plan: &'static ChannelPlan) -> Self {
        if self.sizing.is_some() {
            #[cfg(feature = "defmt")]
            defmt::warn!("Link already initialized, keeping plan {}", self.plan.name);
            return self;
        }
        self.plan = plan;
        self
    }

    //==================================================================================Lifecycle
    /// Select the sizing row, bring the radio up, collect its DIO handlers, and
    /// put it to sleep until the first send or receive.
    pub fn init(&mut self) -> Result<(), LongFiError<R::Error>> {
        if self.plan.uplink_channels.is_empty() {
            return Err(LongFiError::InvalidChannelPlan("no uplink channel"));
        }
        let row = self.plan.row_for(self.config.radio.spreading_factor);
        if self.plan.packet_capacity(row) <= LARGEST_HEADER_LEN {
            return Err(LongFiError::InvalidChannelPlan("no usable sizing row"));
        }
        let sizing = FragmentSizing::for_plan(self.plan, row);

        self.irq_handlers = self.radio.init().map_err(LongFiError::Radio)?;
        self.radio.sleep().map_err(LongFiError::Radio)?;

        self.row = Some(row);
        self.sizing = Some(sizing);
        #[cfg(feature = "defmt")]
        defmt::info!(
            "LongFi link up: plan {}, SF{} (row {}), {} bytes per packet",
            self.plan.name,
            self.config.radio.spreading_factor,
            row,
            sizing.packet_capacity()
        );
        Ok(())
    }

    //==================================================================================Transmit
    /// Encode `payload` and start transmitting it.
    ///
    /// Only the first radio packet leaves here; the following ones are sent as
    /// the radio reports each packet done (see [`Handle::handle_event`]).
    pub fn send(&mut self, payload: &[u8]) -> Result<(), LongFiError<R::Error>> {
        let sizing = self.sizing.ok_or(LongFiError::NotInitialized)?;
        if self.tx.is_in_flight() {
            return Err(LongFiError::TransmitInProgress);
        }

        let frame = FrameContext {
            session: &self.session,
            sequence: self.sequence,
            sizing,
        };
        let len = self
            .codec
            .encode(&frame, payload, self.tx.staging_mut())?;
        if len == 0 {
            return Err(LongFiError::Codec(CodecError::EmptyFrame));
        }
        if len > TX_BUFFER_SIZE {
            return Err(LongFiError::PayloadTooLarge);
        }

        self.sequence = self.sequence.wrapping_add(1);
        self.tx.load(len);
        #[cfg(feature = "defmt")]
        defmt::info!(
            "Sending {} payload bytes as {} wire bytes in {} packet(s)",
            payload.len(),
            len,
            sizing.packets_for(len)
        );
        self.transmit_next(sizing)?;
        Ok(())
    }

    /// Hand the next slice of the staged frame to the radio.
    ///
    /// Returns `false` when nothing was left to send. A radio failure drops the
    /// transmission.
    fn transmit_next(&mut self, sizing: FragmentSizing) -> Result<bool, LongFiError<R::Error>> {
        let Some(slice) = self.tx.next_slice(sizing.packet_capacity()) else {
            return Ok(false);
        };
        match transmit_random(&mut self.radio, self.plan, &self.config.radio, slice) {
            Ok(_frequency) => {
                #[cfg(feature = "defmt")]
                defmt::debug!(
                    "Packet on {} Hz, {}/{} wire bytes handed over",
                    _frequency,
                    self.tx.sent(),
                    self.tx.total()
                );
                Ok(true)
            }
            Err(err) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Radio rejected packet, dropping transmission");
                self.tx.abandon();
                Err(err)
            }
        }
    }

    /// Transmit the single RF test byte on the plan's test frequency.
    pub fn rf_test(&mut self) -> Result<(), LongFiError<R::Error>> {
        if self.sizing.is_none() {
            return Err(LongFiError::NotInitialized);
        }
        if self.tx.is_in_flight() {
            return Err(LongFiError::TransmitInProgress);
        }
        // Nothing staged: the cursor only holds the in-flight flag until the
        // test byte's TxDone.
        self.tx.load(0);
        let result = self
            .radio
            .set_tx_config(&self.config.radio)
            .and_then(|()| self.radio.set_channel(self.plan.rf_test_frequency))
            .and_then(|()| self.radio.send(&[RF_TEST_BYTE]));
        if result.is_err() {
            self.tx.abandon();
        }
        result.map_err(LongFiError::Radio)
    }

    //==================================================================================Receive
    /// Lend a buffer for the next received frame. Any buffer still held is dropped.
    pub fn set_receive_buffer(&self, buffer: &'buf mut [u8]) {
        self.link.set_rx_buffer(buffer);
    }

    /// Open the receiver until a frame, a timeout, or an error is reported.
    pub fn start_receive(&mut self) -> Result<(), LongFiError<R::Error>> {
        if self.sizing.is_none() {
            return Err(LongFiError::NotInitialized);
        }
        self.radio.rx(RX_CONTINUOUS).map_err(LongFiError::Radio)
    }

    /// Take the receive buffer back with the captured frame.
    ///
    /// Returns `None` when no buffer is lent; a frame is therefore delivered at
    /// most once.
    pub fn get_received_packet(&self) -> Option<RxPacket<'buf>> {
        self.link.take_rx()
    }

    //==================================================================================Events
    /// Service one hardware event and translate the radio's outcome.
    pub fn handle_event(&mut self, event: RfEvent) -> Result<ClientEvent, LongFiError<R::Error>> {
        match event.dio_line() {
            Some(line) => {
                let handler = match line {
                    // SX126x drivers wire every interrupt to the first handler.
                    1 => self.irq_handlers[1]
                        .as_ref()
                        .or(self.irq_handlers[0].as_ref()),
                    line => self.irq_handlers[line].as_ref(),
                };
                match handler {
                    Some(handler) => handler.fire(&mut self.radio, &self.link.events()),
                    None => {
                        #[cfg(feature = "defmt")]
                        defmt::trace!("No handler registered for {}", event);
                    }
                }
            }
            None => {
                // Timer callbacks are not dispatched yet.
                #[cfg(feature = "defmt")]
                defmt::debug!("Ignoring {}", event);
            }
        }

        self.handle_internal_event()
    }

    fn handle_internal_event(&mut self) -> Result<ClientEvent, LongFiError<R::Error>> {
        let Some(event) = self.link.take_event() else {
            return Ok(ClientEvent::None);
        };
        #[cfg(feature = "defmt")]
        defmt::trace!("Radio reported {}", event);

        match event {
            InternalEvent::TxDone => {
                // Also reached with nothing in flight (late report after a
                // timeout dropped the frame): the TxDone then confirms no
                // delivery, the radio is only put back to sleep.
                if self.tx.is_complete() {
                    self.tx.finish();
                    self.radio.sleep().map_err(LongFiError::Radio)?;
                    return Ok(ClientEvent::TxDone);
                }
                let Some(sizing) = self.sizing else {
                    self.tx.abandon();
                    return Err(LongFiError::NotInitialized);
                };
                self.transmit_next(sizing)?;
                Ok(ClientEvent::None)
            }
            InternalEvent::RxDone => Ok(ClientEvent::Rx),
            other => {
                if other == InternalEvent::TxTimeout {
                    #[cfg(feature = "defmt")]
                    defmt::warn!(
                        "Transmit timeout after {}/{} wire bytes, dropping transmission",
                        self.tx.sent(),
                        self.tx.total()
                    );
                    self.tx.abandon();
                }
                Ok(other
                    .unhandled()
                    .map_or(ClientEvent::None, ClientEvent::Unhandled))
            }
        }
    }

    /// Pump hardware events from `queue` until one means something to the client.
    pub async fn next_client_event<const N: usize>(
        &mut self,
        queue: &HardwareEventQueue<N>,
    ) -> Result<ClientEvent, LongFiError<R::Error>> {
        loop {
            let event = queue.receive().await;
            let client_event = self.handle_event(event)?;
            if client_event.is_some() {
                return Ok(client_event);
            }
        }
    }

    //==================================================================================Accessors
    /// 32 random bits from the radio.
    pub fn get_random(&mut self) -> u32 {
        self.radio.random()
    }

    /// Sequence number the next frame will carry.
    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    /// Packet budget of the active spreading factor, once initialized.
    pub fn fragment_sizing(&self) -> Option<FragmentSizing> {
        self.sizing
    }

    /// Sizing row selected at `init`.
    pub fn spreading_factor_row(&self) -> Option<usize> {
        self.row
    }

    /// A transmission was started and its last packet is not acknowledged yet.
    pub fn is_transmitting(&self) -> bool {
        self.tx.is_in_flight()
    }

    pub fn channel_plan(&self) -> &'static ChannelPlan {
        self.plan
    }

    pub fn config(&self) -> &LongFiConfig {
        &self.config
    }

    pub fn link(&self) -> &'a LinkState<'buf> {
        self.link
    }

    pub fn radio(&self) -> &R {
        &self.radio
    }

    pub fn radio_mut(&mut self) -> &mut R {
        &mut self.radio
    }

    /// Give the driver and the codec back.
    pub fn release(self) -> (R, C) {
        (self.radio, self.codec)
    }
}

/// Configure the radio and send `data` on a randomly drawn uplink channel.
///
/// Returns the frequency used.
fn transmit_random<R: LoRaRadio>(
    radio: &mut R,
    plan: &ChannelPlan,
    config: &RadioConfig,
    data: &[u8],
) -> Result<u32, LongFiError<R::Error>> {
    let random = radio.random();
    let frequency = random
        .checked_rem(plan.uplink_channels.len() as u32)
        .and_then(|index| plan.uplink_channels.get(index as usize))
        .copied()
        .ok_or(LongFiError::InvalidChannelPlan("no uplink channel"))?;

    radio.set_tx_config(config).map_err(LongFiError::Radio)?;
    radio.set_channel(frequency).map_err(LongFiError::Radio)?;
    radio.send(data).map_err(LongFiError::Radio)?;
    Ok(frequency)
}
