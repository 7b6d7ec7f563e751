//! One build / send / receive / echo exchange over a loopback UART
//!
//! Output lines:
//!
//! ```text
//! Built packet: AA 05 48 65 6C 6C 6F F9
//! Packet parsed successfully! Data: Hello
//! Echoed packet: AA 05 48 65 6C 6C 6F F9
//! ```

use std::io::Write;

use tracing::{debug, info, warn};
use uartlink_hal::LoopbackUart;
use uartlink_protocol::{HexBytes, Packet, MAX_FRAME_SIZE, MAX_PAYLOAD_SIZE};

use crate::config::HostConfig;
use crate::error::{LinkError, Result};
use crate::link::PacketLink;

/// Room for a frame and its echo
pub const LOOPBACK_CAPACITY: usize = 2 * MAX_FRAME_SIZE;

/// Simulated wire
pub type WireUart = LoopbackUart<LOOPBACK_CAPACITY>;

/// How an exchange ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The receiver accepted the frame
    Accepted(Packet),
    /// The receiver rejected the frame
    Rejected(String),
}

/// Result of one exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub outcome: Outcome,
    /// Line time of every frame sent, at the configured UART settings
    pub wire_time_us: u64,
}

/// Run one exchange, writing the report to `out`
///
/// Input longer than the maximum payload is cut to fit.
pub fn run<W: Write>(input: &[u8], config: &HostConfig, out: &mut W) -> Result<Exchange> {
    let payload = if input.len() > MAX_PAYLOAD_SIZE {
        warn!(
            len = input.len(),
            max = MAX_PAYLOAD_SIZE,
            "input too long, truncating"
        );
        &input[..MAX_PAYLOAD_SIZE]
    } else {
        input
    };

    let packet = Packet::new(payload)?;
    let mut link =
        PacketLink::new(WireUart::new(), config.decode_config()).with_line(config.uart);

    let frame = packet.to_frame();
    writeln!(out, "Built packet: {}", HexBytes(&frame))?;
    link.send(&packet)?;

    let received = match link.receive() {
        Ok(packet) => packet,
        Err(LinkError::Decode(e)) => {
            writeln!(out, "Invalid packet received! ({})", e)?;
            return Ok(finish(&link, Outcome::Rejected(e.to_string())));
        }
        Err(e) => return Err(e.into()),
    };

    writeln!(
        out,
        "Packet parsed successfully! Data: {}",
        String::from_utf8_lossy(received.data())
    )?;
    info!(len = received.len(), checksum = received.checksum(), "packet accepted");

    if config.link.echo {
        link.echo(&received)?;
        let echoed = link.receive()?;
        writeln!(out, "Echoed packet: {}", echoed.hex())?;
    }

    Ok(finish(&link, Outcome::Accepted(received)))
}

fn finish(link: &PacketLink<WireUart>, outcome: Outcome) -> Exchange {
    let wire_time_us = link.wire_time_us();
    debug!(
        bytes = link.bytes_sent(),
        wire_time_us, "simulated line time"
    );
    Exchange {
        outcome,
        wire_time_us,
    }
}

/// Strip a trailing line ending from a line read from stdin
pub fn trim_line(line: &str) -> &str {
    line.strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(line)
}
