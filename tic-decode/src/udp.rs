//! UDP dispatch sink: forwards each line the JSON sink would otherwise
//! print to stdout as a single datagram instead. A supplemental output
//! target, not part of the decoder's own sink contract.

use std::io::{self, Write};
use std::net::UdpSocket;

/// A `Write` implementation that batches bytes between `write` calls into
/// UDP datagrams, flushing on every newline so each frame's JSON line
/// becomes its own packet.
pub struct UdpWriter {
    socket: UdpSocket,
    buf: Vec<u8>,
}

impl UdpWriter {
    pub fn connect(target: &str) -> io::Result<Self> {
        let socket = UdpSocket::bind("0.0.0.0:0")?;
        socket.connect(target)?;
        Ok(UdpWriter { socket, buf: Vec::new() })
    }
}

impl Write for UdpWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        while let Some(pos) = self.buf.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buf.drain(..=pos).collect();
            self.socket.send(&line)?;
        }
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.buf.is_empty() {
            self.socket.send(&self.buf)?;
            self.buf.clear();
        }
        Ok(())
    }
}
