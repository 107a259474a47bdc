/*!
	ethercat frames, the payload of an ethernet or UDP packet carrying datagrams to the slaves.

	A frame is a 2 bytes [EthercatHeader] followed by any number of [Datagram]. The header holds the byte length of all the datagrams, so [Frame] only grows through [Frame::append] which keeps it in sync.
*/

use bilge::prelude::*;
use log::{debug, trace, warn};
use crate::{
	data::{self, PduData},
	pdu::Datagram,
	socket::EthercatSocket,
	error::{EthercatError, EthercatResult},
	};


/// maximum frame content size, currently limited to the size tolerated by its header (content size coded with 11 bits)
pub const MAX_ETHERCAT_FRAME: u16 = 0x7ff;


/// ethercat frame header (common to ethernet or UDP mediums) as described in ETG 1000.4 table 11
#[bitsize(16)]
#[derive(TryFromBits, DebugBits, Copy, Clone, Eq, PartialEq)]
pub struct EthercatHeader {
	/// length of the ethercat frame (minus 2 bytes, which is the header)
	pub len: u11,
	reserved: u1,
	/// frame type
	pub ty: EthercatType,
}
data::bilge_pdudata!(EthercatHeader, u16);

impl EthercatHeader {
	/// header of a PDU frame with the given content length
	pub fn with_length(len: u16) -> EthercatResult<Self> {
		if len > MAX_ETHERCAT_FRAME
			{return Err(EthercatError::OutOfRange("frame length must be coded on 11 bits"))}
		Ok(Self::new(u11::new(len), EthercatType::PDU))
	}
}
impl Default for EthercatHeader {
	/// header of an empty PDU frame
	fn default() -> Self {
		Self::new(u11::new(0), EthercatType::PDU)
	}
}

/// type of ethercat frame
#[bitsize(4)]
#[derive(TryFromBits, Debug, Copy, Clone, Eq, PartialEq)]
pub enum EthercatType {
	/// process data unit, use to exchange with physical and logical memory in realtime or not
	/// the mailbox content sent to slaves shall be written to the physical memory through these
	///
	/// See ETG.1000.4
	PDU = 0x1,

	NetworkVariable = 0x4,

	/// mailbox gateway communication, between the master and non-slave devices, allowing non-slave devices to mailbox with the slaves
	///
	/// See ETG.8200
	Mailbox = 0x5,
}


/**
	a PDU frame under construction

	Datagrams are kept in insertion order, which is the order slaves will process them.
*/
#[derive(Debug, Default)]
pub struct Frame {
	header: EthercatHeader,
	datagrams: Vec<Datagram>,
}

impl Frame {
	/// empty frame, with a PDU header of length 0
	pub fn new() -> Self {
		Self {
			header: EthercatHeader::default(),
			datagrams: Vec::new(),
		}
	}
	/// current header, its length is the size of all the datagrams
	pub fn header(&self) -> EthercatHeader  {self.header}
	/// datagrams in the order they will be sent
	pub fn datagrams(&self) -> &[Datagram]  {&self.datagrams}
	/// number of datagrams in the frame
	pub fn len(&self) -> usize  {self.datagrams.len()}
	pub fn is_empty(&self) -> bool  {self.datagrams.is_empty()}

	/**
		add a datagram at the end of the frame and update the header length

		If the frame content would not fit in the header length field, the datagram is rejected and the frame is left untouched.
	*/
	pub fn append(&mut self, datagram: Datagram) -> EthercatResult<()> {
		// the rendered bytes are what will be sent, whatever the payload claims its size is
		let len = usize::from(self.header.len().value()) + datagram.render().len();
		let header = u16::try_from(len).ok()
			.and_then(|len| EthercatHeader::with_length(len).ok());
		let Some(header) = header else {
			warn!("datagram {:?} rejected, frame would be {} bytes long", datagram.command, len);
			return Err(EthercatError::OutOfRange("frame length must be coded on 11 bits"));
		};
		debug!("append {:?} index {} to frame, now {} bytes", datagram.command, datagram.index, len);
		self.header = header;
		self.datagrams.push(datagram);
		Ok(())
	}

	/// render the frame and send it through the given socket
	pub fn send<S: EthercatSocket + ?Sized>(&self, socket: &S) -> EthercatResult<()> {
		let data = self.render();
		if data.len() > socket.max_frame() {
			warn!("frame of {} bytes exceeds socket capacity of {} bytes", data.len(), socket.max_frame());
			return Err(EthercatError::OutOfRange("frame is too big for the socket"));
		}
		socket.send(&data)?;
		debug!("sent frame with {} datagrams, {} bytes", self.datagrams.len(), data.len());
		Ok(())
	}
}

impl PduData for Frame {
	fn pack(&self, dst: &mut Vec<u8>) {
		self.header.pack(dst);
		for datagram in &self.datagrams {
			datagram.pack(dst);
		}
		trace!("packed frame header {:?}", self.header);
	}
	fn packed_size(&self) -> usize {
		self.header.packed_size() + usize::from(self.header.len().value())
	}
}
