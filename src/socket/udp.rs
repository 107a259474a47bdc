use std::io;
use std::net::{SocketAddr, IpAddr, Ipv4Addr};
use log::debug;
use super::EthercatSocket;

/// UDP port reserved for ethercat, ETG 1000.4
pub const ETHERCAT_PORT: u16 = 0x88a4;

/// UDP payload size in a standard 1500 bytes ethernet MTU, minus IPv4 and UDP headers
const MAX_UDP_FRAME: usize = 1500 - 20 - 8;

/**
    UDP socket with fixed port, allowing ethercat com through a regular switch
*/
#[derive(Debug)]
pub struct UdpSocket {
    socket: std::net::UdpSocket,
    address: SocketAddr,
}

impl UdpSocket {
    /// according to ETG.1000.4 only IPv4 is supported, and port is fixed, hence this function only requires the destination host address, which can be a broadcast address
    pub fn new(segment: Ipv4Addr) -> io::Result<Self> {
        let address = SocketAddr::new(IpAddr::V4(segment), ETHERCAT_PORT);
        let socket = std::net::UdpSocket::bind(SocketAddr::new(
                IpAddr::V4(Ipv4Addr::UNSPECIFIED),
                ETHERCAT_PORT,
                ))?;
        socket.set_broadcast(true)?;
        debug!("ethercat udp socket bound to {}, sending to {}", socket.local_addr()?, address);
        Ok(Self {socket, address})
    }
    /// destination of the frames sent
    pub fn destination(&self) -> SocketAddr  {self.address}

    /// broadcast address of the network with the given host address and netmask
    pub fn broadcast(address: Ipv4Addr, netmask: Ipv4Addr) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(address) | !u32::from(netmask))
    }
}

impl EthercatSocket for UdpSocket {
    fn send(&self, data: &[u8]) -> io::Result<()> {
        let size = self.socket.send_to(data, self.address)?;
        if size != data.len() {
            return Err(io::Error::new(io::ErrorKind::WriteZero, "ethercat frame partially sent"));
        }
        Ok(())
    }
    fn max_frame(&self) -> usize  {MAX_UDP_FRAME}
}
