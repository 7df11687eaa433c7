//! Command bus over a buffered UARTE.
//!
//! Reception runs through timer and PPI into a ring buffer, so bytes keep
//! arriving while the control loop blocks on the display or the player.
//! Two tasks own the UART halves: the reader assembles request lines and
//! queues parsed calls, the writer drains response and event lines.  The
//! control loop only touches the queues through [`ChannelBus`].

use crate::bus::{
    encode_event, encode_response, BusCall, BusEvent, CommandBus, LineBuffer, OUT_LINE_CAPACITY,
};
use crate::error::Error;
use embassy_nrf::buffered_uarte::{BufferedUarteRx, BufferedUarteTx};
use embassy_nrf::{timer, uarte};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Receiver, Sender};
use heapless::String;

/// Receive ring buffer.  Holds well over the ~300 bytes that arrive at
/// 115200 baud during the longest display flush.
pub const RX_BUFFER: usize = 512;
pub const TX_BUFFER: usize = 128;

/// Calls waiting for the control loop.
pub const CALL_QUEUE: usize = 4;
/// Outgoing lines waiting for the writer.
pub const OUT_QUEUE: usize = 8;

pub type OutLine = String<OUT_LINE_CAPACITY>;
pub type BusResult = Result<BusCall, Error>;
pub type CallSender = Sender<'static, CriticalSectionRawMutex, BusResult, CALL_QUEUE>;
pub type CallReceiver = Receiver<'static, CriticalSectionRawMutex, BusResult, CALL_QUEUE>;
pub type OutSender = Sender<'static, CriticalSectionRawMutex, OutLine, OUT_QUEUE>;
pub type OutReceiver = Receiver<'static, CriticalSectionRawMutex, OutLine, OUT_QUEUE>;

/// Read request lines forever.
pub async fn reader_task<U, T>(mut rx: BufferedUarteRx<'static, U, T>, calls: CallSender) -> !
where
    U: uarte::Instance,
    T: timer::Instance,
{
    let mut line = LineBuffer::new();

    loop {
        let (used, call) = match rx.fill_buf().await {
            Ok(chunk) => line.take_call(chunk),
            Err(_) => {
                warn!("bus: UART read error");
                continue;
            }
        };
        rx.consume(used);

        let Some(call) = call else {
            continue;
        };
        if let Err(e) = &call {
            debug!("bus: bad request line ({})", e);
        }
        calls.send(call).await;
    }
}

/// Write queued lines forever.
pub async fn writer_task<U>(mut tx: BufferedUarteTx<'static, U>, out: OutReceiver) -> !
where
    U: uarte::Instance,
{
    loop {
        let line = out.receive().await;
        let mut bytes = line.as_bytes();
        while !bytes.is_empty() {
            match tx.write(bytes).await {
                Ok(n) => bytes = &bytes[n..],
                Err(_) => {
                    warn!("bus: UART write error");
                    break;
                }
            }
        }
    }
}

/// Loop-side end of the bus queues.
pub struct ChannelBus {
    calls: CallReceiver,
    out: OutSender,
}

impl ChannelBus {
    pub fn new(calls: CallReceiver, out: OutSender) -> Self {
        Self { calls, out }
    }

    fn send(&mut self, line: OutLine) {
        if self.out.try_send(line).is_err() {
            warn!("bus: output queue full, line dropped");
        }
    }
}

impl CommandBus for ChannelBus {
    fn poll_call(&mut self) -> Option<Result<BusCall, Error>> {
        self.calls.try_receive().ok()
    }

    fn respond(&mut self, result: i32) {
        self.send(encode_response(result));
    }

    fn publish(&mut self, event: BusEvent) {
        debug!("bus: event {}", event);
        self.send(encode_event(event));
    }
}
