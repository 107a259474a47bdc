//! Traits and impls used to write data to the wire.

use core::{
	marker::PhantomData,
	fmt,
	};

/**
	trait for data types than can be packed into a PDU

	Anything implementing it can be the content of a [Datagram](crate::Datagram): raw bytes, integers, or structured register payloads like [SyncManager](crate::registers::SyncManager) and [Fmmu](crate::registers::Fmmu). New payload kinds only need to implement [Self::pack].
*/
pub trait PduData: fmt::Debug {
	/// append the wire representation of `self` at the end of `dst`
	fn pack(&self, dst: &mut Vec<u8>);

	/// byte size of the wire representation
	fn packed_size(&self) -> usize {
		let mut dst = Vec::new();
		self.pack(&mut dst);
		dst.len()
	}
	/// wire representation of `self` in a new buffer
	fn render(&self) -> Vec<u8> {
		let mut dst = Vec::with_capacity(self.packed_size());
		self.pack(&mut dst);
		dst
	}
}

impl<const N: usize> PduData for [u8; N] {
	fn pack(&self, dst: &mut Vec<u8>)  {dst.extend_from_slice(self)}
	fn packed_size(&self) -> usize  {N}
}

impl PduData for Vec<u8> {
	fn pack(&self, dst: &mut Vec<u8>)  {dst.extend_from_slice(self)}
	fn packed_size(&self) -> usize  {self.len()}
}

impl PduData for &'static [u8] {
	fn pack(&self, dst: &mut Vec<u8>)  {dst.extend_from_slice(self)}
	fn packed_size(&self) -> usize  {self.len()}
}

impl PduData for () {
	fn pack(&self, _dst: &mut Vec<u8>)  {}
	fn packed_size(&self) -> usize  {0}
}

impl PduData for bool {
	fn pack(&self, dst: &mut Vec<u8>)  {
		dst.push(if *self {0b1} else {0b0});
	}
	fn packed_size(&self) -> usize  {1}
}

/// macro implementing [PduData] for a given struct generated with `bilge`, the struct is packed as its underlying integer in little endian
macro_rules! bilge_pdudata {
	($t: ty, $id: ty) => { impl crate::data::PduData for $t {
		fn pack(&self, dst: &mut Vec<u8>) {
			dst.extend_from_slice(&<$id>::from(*self).to_le_bytes());
		}
		fn packed_size(&self) -> usize {
			core::mem::size_of::<$id>()
		}
	}};
}
pub(crate) use bilge_pdudata;

/// macro implementing [PduData] for numeric types, packed in little endian
macro_rules! num_pdudata {
	($t: ty) => { impl crate::data::PduData for $t {
		fn pack(&self, dst: &mut Vec<u8>) {
			dst.extend_from_slice(&self.to_le_bytes());
		}
		fn packed_size(&self) -> usize {
			core::mem::size_of::<$t>()
		}
	}};
}

num_pdudata!(u8);
num_pdudata!(u16);
num_pdudata!(u32);
num_pdudata!(u64);
num_pdudata!(i8);
num_pdudata!(i16);
num_pdudata!(i32);
num_pdudata!(i64);
num_pdudata!(f32);
num_pdudata!(f64);



/**
	locate some data in a slave memory by its byte position and length, the data being of type `T` in rust

	It does not point the data but only its offset in the memory, and its length so the datagrams reading it know how many bytes to request.
*/
#[derive(Default, Eq, Hash)]
pub struct Field<T> {
	/// this is only here to mark that T is actually used
	extracted: PhantomData<T>,
	/// start byte index of the object
	pub byte: usize,
	/// byte length of the object
	pub len: usize,
}
impl<T> Field<T> {
	/// build a Field from its byte offset and byte length
	pub const fn new(byte: usize, len: usize) -> Self {
		Self{extracted: PhantomData, byte, len}
	}
	/// build a Field from its byte offset, its length being the size of `T` in memory
	pub const fn simple(byte: usize) -> Self {
		Self{extracted: PhantomData, byte, len: core::mem::size_of::<T>()}
	}
}
impl<T> fmt::Debug for Field<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Field{{0x{:x}, {}}}", self.byte, self.len)
	}
}
// [Clone] and [Copy] must be implemented manually to allow copying a field pointing to a type which does not implement this operation
impl<T> Clone for Field<T> {
	fn clone(&self) -> Self   {Self::new(self.byte, self.len)}
}
impl<T> Copy for Field<T> {}
impl<T> PartialEq for Field<T> {
	fn eq(&self, other: &Self) -> bool {
		self.byte == other.byte && self.len == other.len
	}
}
