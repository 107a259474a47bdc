/*!
	ethercat datagrams (aka. PDU), the read/write commands a master packs in a frame.

	A datagram is made of a 10 bytes header, the data read or written, and a 2 bytes footer holding the working counter:

	| command | index | address | [Lrcm] | irq | data | working counter |
	|---------|-------|---------|--------|-----|------|-----------------|
	| 1       | 1     | 4       | 2      | 2   | N    | 2               |
*/

use bilge::prelude::*;
use crate::{
	data::{self, PduData, Field},
	error::{EthercatError, EthercatResult},
	};


/// byte size of the datagram header, before the data
pub const PDU_HEADER_SIZE: usize = 10;
/// byte size of the datagram footer, after the data
pub const PDU_FOOTER_SIZE: usize = 2;
/// maximum data length in one datagram, as coded on 11 bits in [Lrcm]
pub const MAX_PDU_DATA: u16 = 0x7ff;


/// the possible PDU commands
#[bitsize(8)]
#[derive(TryFromBits, Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum PduCommand {
	/// no operation
	#[default]
	NOP = 0x0,

	/// auto-incremented slave read
	APRD = 0x01,
	/// auto-incremented slave write
	APWR = 0x02,
	/// auto-incremented slave read & write
	APRW = 0x03,

	/// fixed slave read
	FPRD = 0x04,
	/// fixed slave write
	FPWR = 0x05,
	/// fixed slave read & write
	FPRW = 0x06,

	/// broadcast read
	BRD = 0x07,
	/// broadcast write
	BWR = 0x08,
	/// broadcast read & write
	BRW = 0x09,

	/// logical memory read
	LRD = 0x0A,
	/// logical memory write
	LWR = 0x0B,
	/// logical memory read & write
	LRW = 0x0C,

	/// auto-incremented slave read multiple write
	ARMW = 0x0D,
	/// fixed slave read multiple write
	FRMW = 0x0E,
}

/**
	length and flags sub-header of a datagram, as described in ETG 1000.4 table 14

	The bit layout is, from the most significant bit: more (1 bit), circulating (1 bit), reserved (3 bits), len (11 bits)
*/
#[bitsize(16)]
#[derive(FromBits, DebugBits, Copy, Clone, Eq, PartialEq)]
pub struct Lrcm {
	/// data length following the header, excluding the footer
	pub len: u11,
	reserved: u3,
	/// true if the frame has already circulated in the segment
	pub circulating: bool,
	/// true if there is an other datagram after this one in the same frame
	pub more: bool,
}
data::bilge_pdudata!(Lrcm, u16);

impl Lrcm {
	/// build the sub-header, rejecting a length that cannot be coded on 11 bits
	pub fn try_new(more: bool, circulating: bool, len: u16) -> EthercatResult<Self> {
		if len > MAX_PDU_DATA
			{return Err(EthercatError::OutOfRange("datagram length must be coded on 11 bits"))}
		Ok(Self::new(u11::new(len), circulating, more))
	}
}

/// dynamically specifies a destination address on the ethercat loop
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SlaveAddress {
	/// every slave will receive and execute
	Broadcast,
	/// address will be determined by the topology (index of the slave in the ethernet loop)
	AutoIncremented(u16),
	/// address has been set by the master previously
	Fixed(u16),
	/// the logical memory is the destination, all slaves are concerned
	Logical,
}

impl SlaveAddress {
	/// 32 bit datagram address of the given memory location for this destination
	fn address(&self, memory: usize) -> EthercatResult<u32> {
		let slave = match self {
			SlaveAddress::Logical => return u32::try_from(memory)
				.map_err(|_| EthercatError::OutOfRange("logical address must fit in 32 bits")),
			SlaveAddress::Broadcast => 0,
			SlaveAddress::AutoIncremented(position) => 0u16.wrapping_sub(*position),
			SlaveAddress::Fixed(station) => *station,
		};
		let register = u16::try_from(memory)
			.map_err(|_| EthercatError::OutOfRange("physical address must fit in 16 bits"))?;
		Ok(u32::from(slave) << 16 | u32::from(register))
	}
}

/**
	one read/write operation on the slaves memory, to be appended to a [Frame](crate::Frame)

	The data can be any [PduData], its wire length is what it packs to. The length in [Self::lrcm] is not checked against it, [Self::new] and the read/write shorthands set it properly.
*/
#[derive(Debug)]
pub struct Datagram {
	/// PDU command, specifying whether logical or physical memory is accessed, addressing type, and what read/write operation
	pub command: PduCommand,
	/// PDU task identifier, slaves shall not change it
	pub index: u8,
	/// slave address in the 16 upper bits and memory address in the lower ones, or logical address
	pub address: u32,
	/// length and flags
	pub lrcm: Lrcm,
	/// event request registers of all slaves combined with a logical OR
	pub irq: u16,
	/// data read or written
	pub data: Box<dyn PduData>,
	/// working counter, incremented by each slave processing the command
	pub wkc: u16,
}

impl Datagram {
	/// build a datagram whose [Lrcm] length matches the given data, with no flag set
	pub fn new<T: PduData + 'static>(command: PduCommand, index: u8, address: u32, data: T) -> EthercatResult<Self> {
		let len = u16::try_from(data.render().len())
			.map_err(|_| EthercatError::OutOfRange("datagram length must be coded on 11 bits"))?;
		Ok(Self {
			command,
			index,
			address,
			lrcm: Lrcm::try_new(false, false, len)?,
			irq: 0,
			data: Box::new(data),
			wkc: 0,
		})
	}
	/// set whether an other datagram follows this one in the frame
	pub fn with_more(mut self, more: bool) -> Self {
		self.lrcm.set_more(more);
		self
	}

	/// maps to a *RD command, the data is zeroed and will be filled by slaves
	pub fn read<T>(slave: SlaveAddress, memory: Field<T>, index: u8) -> EthercatResult<Self> {
		let command = match slave {
			SlaveAddress::Broadcast => PduCommand::BRD,
			SlaveAddress::AutoIncremented(_) => PduCommand::APRD,
			SlaveAddress::Fixed(_) => PduCommand::FPRD,
			SlaveAddress::Logical => PduCommand::LRD,
		};
		Self::new(command, index, slave.address(memory.byte)?, vec![0u8; memory.len])
	}
	/// maps to a *WR command
	pub fn write<T: PduData + 'static>(slave: SlaveAddress, memory: Field<T>, index: u8, data: T) -> EthercatResult<Self> {
		let command = match slave {
			SlaveAddress::Broadcast => PduCommand::BWR,
			SlaveAddress::AutoIncremented(_) => PduCommand::APWR,
			SlaveAddress::Fixed(_) => PduCommand::FPWR,
			SlaveAddress::Logical => PduCommand::LWR,
		};
		Self::new(command, index, slave.address(memory.byte)?, data)
	}
	/// maps to a *RW command
	pub fn exchange<T: PduData + 'static>(slave: SlaveAddress, memory: Field<T>, index: u8, data: T) -> EthercatResult<Self> {
		let command = match slave {
			SlaveAddress::Broadcast => PduCommand::BRW,
			SlaveAddress::AutoIncremented(_) => PduCommand::APRW,
			SlaveAddress::Fixed(_) => PduCommand::FPRW,
			SlaveAddress::Logical => PduCommand::LRW,
		};
		Self::new(command, index, slave.address(memory.byte)?, data)
	}
}

impl PduData for Datagram {
	fn pack(&self, dst: &mut Vec<u8>) {
		dst.push(u8::from(self.command));
		dst.push(self.index);
		// the upper half of the address comes first, each half in little endian
		((self.address >> 16) as u16).pack(dst);
		(self.address as u16).pack(dst);
		self.lrcm.pack(dst);
		// only big endian field of the datagram
		dst.extend_from_slice(&self.irq.to_be_bytes());
		self.data.pack(dst);
		self.wkc.pack(dst);
	}
	fn packed_size(&self) -> usize {
		PDU_HEADER_SIZE + self.data.render().len() + PDU_FOOTER_SIZE
	}
}
