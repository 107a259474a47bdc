/*!
    structs and consts for the registers of a standard slave's RAM that a master writes while configuring it. This should be used instead of any hardcoded register value.

    Register structs implement [PduData] so they can directly be the content of a [Datagram](crate::Datagram).
*/

#![allow(non_upper_case_globals)]

use bilge::prelude::*;
use crate::data::{self, Field, PduData};

pub mod address {
    use super::*;

    /// register of the station address, aka the fixed slave address
    /// ETG.1000.4 table 32
    pub const fixed: Field<u16> = Field::simple(0x0010);
    /// slave address alias
    /// ETG.1000.4 table 32
    pub const alias: Field<u16> = Field::simple(0x0012);
}

/**
    SM (Sync Managers) are used for configuring and controling two distinct things:
    - mailbox exchanges (CoE, FoE, ...)
    - pdo exchanges (copying PDO data to slave's physical memory)
*/
pub mod sync_manager {
    use super::*;

    /// ETG.1000.6 table 45
    pub const watchdog: Field<u16> = Field::simple(0x0420);
	pub const interface: SyncManagerInterface = SyncManagerInterface {address: 0x0800, num: 16};
}

/// FMMU (Fieldbus Memory Management Unit) is controling the mapping (copy) for a slave's physical memory from/to logical memory
pub const fmmu: FmmuTable = FmmuTable {address: 0x0600, num: 16};

/// AL (Application Layer) registers are controling the communication state of a slave
pub mod al {
    use super::*;

    pub const control: Field<AlControlRequest> = Field::simple(0x0120);
    pub const status: Field<u16> = Field::simple(0x0130);
}


/// ETG.1000.6 table 9
#[bitsize(8)]
#[derive(TryFromBits, DebugBits, Copy, Clone, Eq, PartialEq)]
pub struct AlControlRequest {
    /// requested state of communication
    pub state: AlState,
    /// if true, parameter change of the AL status will be reset
    pub ack: bool,
    /// request of id instead of error code in AL status code register
    pub request_id: bool,
    reserved: u2,
}
data::bilge_pdudata!(AlControlRequest, u8);

/**
    the operation state of one device.

    Except [Self::Bootstrap], changing to any mode can be requested from any upper mode or from the preceding one.

    ETG.1000.6 table 9
*/
#[bitsize(4)]
#[derive(TryFromBits, Debug, Copy, Clone, Eq, PartialEq)]
pub enum AlState {
    /// transitional state, the slave is booting up
    Bootstrap = 3,
    /// registers only, used to set communication registers like sync managers and FMMU
    Init = 1,
    /// mailbox communication enabled, but no process data
    PreOperational = 2,
    /// process data inputs are exchanged, outputs ignored
    SafeOperational = 4,
    /// realtime operations running
    Operational = 8,
}


/// this is not a PduData but a convenience struct transporting the addresses of a sync manager
/// ETG.1000.4 table 59
pub struct SyncManagerInterface {
    /// start address of the sync manager (address of the first channel)
    pub address: u16,
    /// number of channels
    pub num: u8,
}

impl SyncManagerInterface {
    pub fn channel(&self, index: u8) -> Field<SyncManager> {
        assert!(index < self.num, "index out of range");
        Field::new(usize::from(self.address) + usize::from(index) * SyncManager::PACKED_SIZE, SyncManager::PACKED_SIZE)
    }
    /// return the sync manager channel reserved for mailbox in
    pub fn mailbox_write(&self) -> Field<SyncManager>   {self.channel(0)}
    /// return the sync manager channel reserved for mailbox out
    pub fn mailbox_read(&self) -> Field<SyncManager>   {self.channel(1)}
    /// return one of the sync manager channels reserved for mapping
    pub fn mappable(&self, index: u8) -> Field<SyncManager>   {self.channel(index.saturating_add(2))}
    /// all channels at once, for clearing them in one datagram
    pub fn all(&self) -> Field<[u8; 128]> {
        Field::new(usize::from(self.address), usize::from(self.num) * SyncManager::PACKED_SIZE)
    }
}

/**
    The Sync manager controls the access to the DL-user memory. Each channel defines a consistent area of the DL-user memory.

    There is two ways of data exchange between master and PDI:
    - Handshake mode (mailbox): one entity fills data in and cannot access the area until the other entity reads out the data.
    - Buffered mode: the interaction between both producer of data and consumer of data is uncorrelated – each entity expects access at any time, always providing the consumer with the newest data.

    ETG.1000.4 table 58
*/
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SyncManager {
    /// start address in octets in the physical memory of the consistent DL-user memory area.
    pub start: u16,
    /// size in octets of the consistent DL-user memory area.
    pub length: u16,
    pub control: CtrlStatus,
    pub enable: SyncManagerEnable,
}
impl SyncManager {
    pub const PACKED_SIZE: usize = 8;
}
impl PduData for SyncManager {
    fn pack(&self, dst: &mut Vec<u8>) {
        self.start.pack(dst);
        self.length.pack(dst);
        self.control.pack(dst);
        self.enable.pack(dst);
    }
    fn packed_size(&self) -> usize  {Self::PACKED_SIZE}
}

/// control (low byte) and status (high byte) of a sync manager channel
#[bitsize(16)]
#[derive(FromBits, DebugBits, Copy, Clone, Eq, PartialEq)]
pub struct CtrlStatus {
    /// whether the buffer is used for mailbox or exchange through mapping to the logical memory
    pub op_mode: SyncMode,
    /// whether the consistent DL-user memory area is read or written by the master.
    pub access: SyncDirection,
    /// an event is generated if there is new data available in the consistent DL-user memory area which was written by the master (direction write) or if the new data from the DL-user was read by the master (direction read).
    pub ecat_irq: bool,
    /// an event is generated if there is new data available in the consistent DL-user memory area which was written by DLS-user or if the new data from the Master was read by the DLS-user.
    pub pdi_irq: bool,
    /// if the monitoring of an access to the consistent DL-user memory area is enabled.
    pub watchdog: bool,
    reserved: u1,

    /// if the consistent DL-user memory (direction write) has been written by the master and the event enable parameter is set.
    pub write_irq: bool,
    /// if the consistent DL-user memory (direction read) has been read by the master and the event enable parameter is set.
    pub read_irq: bool,
    reserved: u1,
    /// true if there is data waiting to be read in the mailbox buffer
    pub visible_buffer: bool,
    /// state (buffer number, locked) of the consistent DL-user memory if it is of buffered access type.
    pub buffer_state: u2,
    reserved: u2,
}
data::bilge_pdudata!(CtrlStatus, u16);

/// activation of a sync manager channel
#[bitsize(16)]
#[derive(FromBits, DebugBits, Copy, Clone, Eq, PartialEq)]
pub struct SyncManagerEnable {
    /// activate this channel
    pub enable: bool,
    /// A change in this parameter indicates a repeat request. This is primarily used to repeat the last mailbox interactions.
    pub repeat_request: bool,
    reserved: u4,
    /// if the DC 0 Event shall be invoked in case of a EtherCAT write
    pub latch_change_ecat: bool,
    /// if the DC 0 Event shall be invoked in case of a local write
    pub latch_change_pdi: bool,

    /// disable this channel for PDI access
    pub deactivate: bool,
    /// indicates a repeat request acknowledge. After setting the value of Repeat in the parameter repeat acknowledge.
    pub repeat_ack: bool,
    reserved: u6,
}
data::bilge_pdudata!(SyncManagerEnable, u16);

/// ETG.1000.4 table 58
#[bitsize(2)]
#[derive(FromBits, Debug, Copy, Clone, Eq, PartialEq)]
pub enum SyncMode {
    Buffered = 0,
    Reserved1 = 1,
    Mailbox = 2,
    Reserved3 = 3,
}
/// ETG.1000.4 table 58
#[bitsize(2)]
#[derive(FromBits, Debug, Copy, Clone, Eq, PartialEq)]
pub enum SyncDirection {
    /// sync manager buffer is read by the master
    Read = 0,
    /// sync manager buffer is written by the master
    Write = 1,
    Reserved2 = 2,
    Reserved3 = 3,
}


/// this is not a PduData but a struct transporting the address and number of FMMU registers
/// ETG.1000.4 table 57
pub struct FmmuTable {
    /// address of the first entry
	pub address: u16,
	/// number of entries
	pub num: u8,
}

impl FmmuTable {
    /// return an entry of the FMMU
    pub fn entry(&self, index: u8) -> Field<FmmuEntry>  {
        assert!(index < self.num, "index out of range");
        Field::new(usize::from(self.address) + usize::from(index) * FmmuEntry::PACKED_SIZE, FmmuEntry::PACKED_SIZE)
    }
}

/**
	The fieldbus memory management unit (FMMU) converts logical addresses into physical addresses by the means of internal address. Thus, FMMUs allow one to use logical addressing for data segments that span several slave devices: one DLPDU addresses data within several arbitrarily distributed devices. The FMMUs optionally support bit wise mapping.

	Each FMMU entity describes one memory translation between the logical memory of the EtherCAT communication network and the physical memory of the slave.

	It packs to the 13 significant bytes of an FMMU register, [FmmuEntry] adds the trailing reserved bytes.

	ETG.1000.4 table 56
*/
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Fmmu {
	/// start byte in the logical memory
	pub logical_start: u32,
	/// byte size of the data
	pub logical_length: u16,
	/// offset of the start bit in the logical start byte
	pub logical_start_bit: u8,
	/// offset of the end bit in the logical end byte
	pub logical_end_bit: u8,
	/// start byte in the physical memory (set by the sync manager)
	pub physical_start: u16,
	/// start bit in the physical start byte
	pub physical_start_bit: u8,
	/// entity will be used for read service
	pub read: bool,
	/// entity will be used for write service
	pub write: bool,
	/// enable this FMMU entry, so physical memory will be copied from/to logical memory on read/write
	pub active: bool,
}
impl Fmmu {
    pub const PACKED_SIZE: usize = 13;
}
impl PduData for Fmmu {
    fn pack(&self, dst: &mut Vec<u8>) {
        self.logical_start.pack(dst);
        self.logical_length.pack(dst);
        self.logical_start_bit.pack(dst);
        self.logical_end_bit.pack(dst);
        self.physical_start.pack(dst);
        self.physical_start_bit.pack(dst);
        dst.push(u8::from(self.read) | u8::from(self.write) << 1);
        self.active.pack(dst);
    }
    fn packed_size(&self) -> usize  {Self::PACKED_SIZE}
}

/// a whole FMMU register entry, as written to the slave memory
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct FmmuEntry(pub Fmmu);
impl FmmuEntry {
    pub const PACKED_SIZE: usize = 16;
}
impl PduData for FmmuEntry {
    fn pack(&self, dst: &mut Vec<u8>) {
        self.0.pack(dst);
        dst.extend_from_slice(&[0; Self::PACKED_SIZE - Fmmu::PACKED_SIZE]);
    }
    fn packed_size(&self) -> usize  {Self::PACKED_SIZE}
}
