//! Async serial I/O task — reactor-driven transport bridge.
//!
//! Runs in a dedicated thread using `edge-executor` for cooperative
//! multi-task scheduling and `async-io-mini` for reactor-driven timers
//! (no busy-spinning). Two concurrent futures:
//!
//! 1. **Read** — polls the transport every 10ms via reactor timer and
//!    pushes complete lines into `LINE_CHANNEL`
//! 2. **Write** — truly async via `REPLY_CHANNEL.receive().await`
//!    (wakes instantly when the control loop pushes a reply)

use super::channels::{Inbound, LINE_CHANNEL, REPLY_CHANNEL, ReplyMsg};
use super::codec::{Frame, LineDecoder, to_owned_line};
use super::transport::Transport;

use core::cell::RefCell;
use core::time::Duration;
use log::{info, warn};
use std::rc::Rc;

const READ_BUF_SIZE: usize = 64;

/// Read poll period.
const READ_POLL: Duration = Duration::from_millis(10);

// ── Line dispatch ────────────────────────────────────────────

/// Decode `data` and queue every terminated line for the control loop.
///
/// Blank lines are queued too: the interpreter decides that they get no
/// reply. Undecodable lines are queued as [`Inbound::Invalid`] so the
/// sender still hears back.
pub fn feed_bytes(decoder: &mut LineDecoder, data: &[u8]) {
    decoder.feed(data, |frame| {
        let msg = match frame {
            Frame::Line(line) => to_owned_line(line).map_or(Inbound::Invalid, Inbound::Line),
            Frame::Invalid => Inbound::Invalid,
        };
        if LINE_CHANNEL.try_send(msg).is_err() {
            warn!("IO: line channel full, dropping line");
        }
    });
}

// ── Async I/O loop ───────────────────────────────────────────

type Shared<T> = Rc<RefCell<T>>;

/// Read task — polls the transport at `READ_POLL` intervals. The reactor
/// timer is wake-based (not thread::sleep), so the executor can service
/// the write task between polls.
async fn read_loop<T: Transport>(transport: Shared<T>) {
    let mut decoder = LineDecoder::new();
    let mut read_buf = [0u8; READ_BUF_SIZE];
    loop {
        {
            let mut t = transport.borrow_mut();
            match t.read(&mut read_buf) {
                Ok(0) => {}
                Ok(n) => feed_bytes(&mut decoder, &read_buf[..n]),
                Err(e) => {
                    warn!("IO: read error {:?}, resetting decoder", e);
                    decoder.reset();
                }
            }
        }
        async_io_mini::Timer::after(READ_POLL).await;
    }
}

/// Write task — wakes instantly when the control loop pushes a reply.
async fn write_loop<T: Transport>(transport: Shared<T>) {
    loop {
        let reply = REPLY_CHANNEL.receive().await;
        let mut t = transport.borrow_mut();
        if let Err(e) = write_all(&mut *t, reply.as_bytes()) {
            warn!("IO: write failed: {:?}", e);
        } else {
            let _ = t.flush();
        }
    }
}

/// Write the whole buffer, retrying on short writes. A transport that
/// accepts nothing drops the remainder.
pub fn write_all<T: Transport + ?Sized>(transport: &mut T, mut data: &[u8]) -> Result<(), T::Error> {
    while !data.is_empty() {
        let n = transport.write(data)?;
        if n == 0 {
            warn!("IO: transport accepted no bytes, dropping {} bytes", data.len());
            break;
        }
        data = &data[n..];
    }
    Ok(())
}

/// Entry point for the I/O thread. Sets up the executor, spawns the two
/// async tasks, and drives them via the `async-io-mini` reactor.
fn run_io_loop<T: Transport + 'static>(transport: T) {
    let executor: edge_executor::LocalExecutor<'_, 4> = edge_executor::LocalExecutor::new();
    let transport: Shared<T> = Rc::new(RefCell::new(transport));

    executor.spawn(read_loop(transport.clone())).detach();
    executor.spawn(write_loop(transport)).detach();

    info!("IO task started (async, reactor-driven)");

    futures_lite::future::block_on(executor.run(core::future::pending::<()>()));
}

// ── Thread spawn ─────────────────────────────────────────────

/// Spawn the serial I/O thread. Takes ownership of the transport.
pub fn spawn<T: Transport + Send + 'static>(
    transport: T,
) -> std::io::Result<std::thread::JoinHandle<()>> {
    std::thread::Builder::new()
        .name("serial-io".into())
        .stack_size(8 * 1024)
        .spawn(move || run_io_loop(transport))
}

// ── Channel accessors for the control loop ───────────────────

/// Try to receive a command line from the I/O thread.
pub fn try_recv_line() -> Option<Inbound> {
    LINE_CHANNEL.try_receive().ok()
}

/// Queue a rendered reply for transmission.
///
/// When the control loop calls this, the I/O thread's write future wakes
/// instantly via `REPLY_CHANNEL.receive().await`.
pub fn send_reply(reply: ReplyMsg) {
    if REPLY_CHANNEL.try_send(reply).is_err() {
        warn!("IO: reply channel full, dropping reply");
    }
}

// ── Tests ────────────────────────────────────────────────────
