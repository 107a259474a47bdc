//! switch on the outputs of the first slaves by writing the logical memory, then read it back
//!
//! usage: `cargo run --example led -- [destination address]`
//! the slaves must already be mapped to logical address 0 (see the `sync_manager` example)

use std::net::Ipv4Addr;
use etherframe::{Frame, Datagram, SlaveAddress, Field, UdpSocket, EthercatResult};

fn main() -> EthercatResult<()> {
    env_logger::init();
    let destination = std::env::args().nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(Ipv4Addr::BROADCAST);
    let socket = UdpSocket::new(destination)?;

    let outputs = Field::<[u8; 64]>::new(0x0000, 64);
    let mut index: u8 = 0;
    for step in 0 .. 8u8 {
        let mut frame = Frame::new();
        let mut leds = [0u8; 64];
        leds[0] = 1 << step;

        frame.append(Datagram::write(SlaveAddress::Logical, outputs, index, leds)?.with_more(true))?;
        index = index.wrapping_add(1);
        frame.append(Datagram::read(SlaveAddress::Logical, outputs, index)?.with_more(true))?;
        index = index.wrapping_add(1);
        // count the slaves on the segment
        frame.append(Datagram::read(SlaveAddress::Broadcast, Field::<u8>::simple(0x0000), index)?)?;
        index = index.wrapping_add(1);

        frame.send(&socket)?;
        std::thread::sleep(std::time::Duration::from_millis(200));
    }
    Ok(())
}
