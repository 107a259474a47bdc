/*!
    Encoder for EtherCAT frames, as sent by a master on the ethercat segment.

    - [Frame] gathers [Datagram]s and keeps its header length up to date
    - [Datagram] is one read or write command on the slaves memory, its data being anything implementing [PduData]
    - [registers] provides the register payloads used to configure slaves (sync managers, FMMU) and their addresses
    - [socket] hands rendered frames to the network
*/

pub mod data;
pub mod error;
pub mod frame;
pub mod pdu;
pub mod registers;
pub mod socket;

pub use crate::data::{PduData, Field};
pub use crate::error::{EthercatError, EthercatResult};
pub use crate::frame::{Frame, EthercatHeader, EthercatType};
pub use crate::pdu::{Datagram, Lrcm, PduCommand, SlaveAddress};
pub use crate::socket::*;
