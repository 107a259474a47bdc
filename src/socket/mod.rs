/*!
    This module provide the trait [EthercatSocket], and implementors allowing to send rendered frames on different physical layers.

    Only the UDP encapsulation is provided yet: it allows to run multiple masters, one ethercat segment each, on the same ethernet network, through a regular switch. The OS takes care of the ethernet, IP and UDP headers.
*/

mod udp;

pub use udp::{UdpSocket, ETHERCAT_PORT};

use std::io;

/**
    trait implementing the ethercat frame encapsulation into some medium

    This allows to send ethercat frames over any network, but according to ETG 1000.4, only Ethernet and UDP are officially supported
*/
pub trait EthercatSocket {
    /**
        send an ethercat frame contained in the given buffer.

        The whole buffer will be sent, the user has to tail it to the exact data size to send.

        the buffer passed must contain the data with the ethercat header.
        The implentor of this trait is responsible of encapsulating the data into the specific socket by adding the necessary specific headers, footers, checks, fragmentation ...
    */
    fn send(&self, data: &[u8]) -> io::Result<()>;

    /// maximum frame size tolerated for sending by this socket
    fn max_frame(&self) -> usize;
}
