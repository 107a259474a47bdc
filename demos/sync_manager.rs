//! configure the first slave of the segment to exchange one byte of outputs through logical memory
//!
//! usage: `cargo run --example sync_manager -- [destination address]`

use std::net::Ipv4Addr;
use bilge::prelude::*;
use etherframe::{
    Frame, Datagram, SlaveAddress, UdpSocket, EthercatResult,
    registers::{self, SyncManager, CtrlStatus, SyncManagerEnable, SyncMode, SyncDirection, Fmmu, FmmuEntry, AlControlRequest, AlState},
    };

/// send one datagram alone in a frame, and return the next datagram index
fn send(socket: &UdpSocket, datagram: Datagram) -> EthercatResult<u8> {
    let index = datagram.index.wrapping_add(1);
    let mut frame = Frame::new();
    frame.append(datagram)?;
    frame.send(socket)?;
    std::thread::sleep(std::time::Duration::from_millis(3));
    Ok(index)
}

/// request a state to the first slave
fn request(socket: &UdpSocket, index: u8, state: AlState) -> EthercatResult<u8> {
    let slave = SlaveAddress::AutoIncremented(0);
    send(socket, Datagram::write(slave, registers::al::control, index, AlControlRequest::new(state, false, false))?)
}

fn main() -> EthercatResult<()> {
    env_logger::init();
    let destination = std::env::args().nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(Ipv4Addr::BROADCAST);
    let socket = UdpSocket::new(destination)?;
    let slave = SlaveAddress::AutoIncremented(0);

    // clear all sync managers
    let mut index = 0;
    index = request(&socket, index, AlState::Init)?;
    index = send(&socket, Datagram::write(SlaveAddress::Broadcast, registers::sync_manager::interface.all(), index, [0u8; 128])?)?;

    // outputs buffer written by the master, and inputs buffer read by the master
    for (channel, start, access) in [(0, 0x1000, SyncDirection::Write), (1, 0x1100, SyncDirection::Read)] {
        let sm = SyncManager {
            start,
            length: 0x0020,
            control: CtrlStatus::new(SyncMode::Buffered, access, false, true, true, false, false, false, u2::new(0)),
            enable: SyncManagerEnable::new(true, false, false, false, false, false),
        };
        index = send(&socket, Datagram::write(slave, registers::sync_manager::interface.mappable(channel), index, sm)?)?;
    }
    index = request(&socket, index, AlState::PreOperational)?;

    let fmmu = Fmmu {
        logical_start: 0,
        logical_length: 0x0020,
        logical_start_bit: 0,
        logical_end_bit: 7,
        physical_start: 0x1000,
        physical_start_bit: 0,
        read: false,
        write: true,
        active: true,
    };
    index = send(&socket, Datagram::write(slave, registers::fmmu.entry(0), index, FmmuEntry(fmmu))?)?;
    index = request(&socket, index, AlState::SafeOperational)?;
    request(&socket, index, AlState::Operational)?;
    Ok(())
}
