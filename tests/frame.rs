#[cfg(test)]
mod tests {
    use std::{cell::RefCell, io};
    use bilge::prelude::*;
    use etherframe::{
        Frame, Datagram, EthercatHeader, EthercatType, EthercatSocket, Lrcm, PduCommand, PduData, EthercatError, UdpSocket,
        };

    /// socket keeping every frame sent
    struct RecordSocket {
        sent: RefCell<Vec<Vec<u8>>>,
        max: usize,
    }
    impl RecordSocket {
        fn new(max: usize) -> Self  {Self{sent: RefCell::new(Vec::new()), max}}
    }
    impl EthercatSocket for RecordSocket {
        fn send(&self, data: &[u8]) -> io::Result<()> {
            self.sent.borrow_mut().push(data.to_vec());
            Ok(())
        }
        fn max_frame(&self) -> usize  {self.max}
    }

    /// payload claiming a smaller size than what it packs
    #[derive(Debug)]
    struct Undersized;
    impl PduData for Undersized {
        fn pack(&self, dst: &mut Vec<u8>)  {dst.extend_from_slice(&[1, 2, 3, 4])}
        fn packed_size(&self) -> usize  {1}
    }

    fn aprd() -> Datagram {
        Datagram {
            command: PduCommand::APRD,
            index: 0x29,
            address: 0xffff0008,
            lrcm: Lrcm::try_new(false, false, 8).unwrap(),
            irq: 0x0000,
            data: Box::new(vec![0x00u8, 0x18, 0x30, 0x00, 0x26, 0x00, 0x01, 0x00]),
            wkc: 0x0000,
        }
    }

    #[test]
    fn header_default() {
        let header = EthercatHeader::default();
        assert_eq!(header.len().value(), 0);
        assert_eq!(header.ty(), EthercatType::PDU);
        assert_eq!(u16::from(header), 0x1000);
        assert_eq!(header.render(), [0x00, 0x10]);
    }

    #[test]
    fn header_length() {
        let header = EthercatHeader::with_length(0x014).unwrap();
        assert_eq!(header.len().value(), 0x014);
        assert_eq!(u16::from(header), 0x1014);

        assert_eq!(EthercatHeader::with_length(2047).unwrap().len().value(), 2047);
        assert!(matches!(EthercatHeader::with_length(2048), Err(EthercatError::OutOfRange(_))));
        assert!(matches!(EthercatHeader::with_length(u16::MAX), Err(EthercatError::OutOfRange(_))));
    }

    #[test]
    fn empty_frame() {
        let frame = Frame::new();
        assert!(frame.is_empty());
        assert_eq!(frame.len(), 0);
        assert_eq!(frame.header(), EthercatHeader::default());
        assert_eq!(frame.render(), [0x00, 0x10]);
    }

    #[test]
    fn frame_bytes() {
        let mut frame = Frame::new();
        frame.append(aprd()).unwrap();

        assert_eq!(frame.render(), [
            0x14, 0x10,
            0x01,
            0x29,
            0xff, 0xff, 0x08, 0x00,
            0x08, 0x00,
            0x00, 0x00,
            0x00, 0x18, 0x30, 0x00, 0x26, 0x00, 0x01, 0x00,
            0x00, 0x00,
            ]);
        assert_eq!(frame.header().len().value(), 20);
    }

    #[test]
    fn apwr_frame_bytes() {
        let datagram = Datagram {
            command: PduCommand::APWR,
            index: 0x5f,
            address: 0xffff0800,
            lrcm: Lrcm::try_new(false, false, 8).unwrap(),
            irq: 0,
            data: Box::new([0x00u8, 0x18, 0x30, 0x00, 0x26, 0x00, 0x01, 0x00]),
            wkc: 0,
        };
        let mut frame = Frame::default();
        frame.append(datagram).unwrap();
        let bytes = frame.render();
        assert_eq!(bytes[.. 2], [0x14, 0x10]);
        assert_eq!(bytes[2 ..], [2, 0x5f, 0xff, 0xff, 0, 8, 8, 0, 0, 0, 0, 0x18, 0x30, 0, 0x26, 0, 1, 0, 0, 0]);
    }

    #[test]
    fn frame_keeps_order() {
        let mut frame = Frame::new();
        for index in 0 .. 5u8 {
            frame.append(Datagram::new(PduCommand::BRD, index, 0, [index]).unwrap()).unwrap();
        }
        assert_eq!(frame.len(), 5);
        let bytes = frame.render();
        assert_eq!(bytes.len(), 2 + 5 * 13);
        assert_eq!(frame.packed_size(), bytes.len());
        for index in 0 .. 5 {
            let datagram = &bytes[2 + index*13 ..][.. 13];
            assert_eq!(datagram[1], index as u8);
            assert_eq!(datagram[10], index as u8);
            assert_eq!(frame.datagrams()[index].index, index as u8);
        }
    }

    #[test]
    fn frame_full() {
        let mut frame = Frame::new();
        // exactly fills the 11 bits header length
        frame.append(Datagram::new(PduCommand::LWR, 0, 0, vec![0u8; 2047 - 12]).unwrap()).unwrap();
        assert_eq!(frame.header().len().value(), 2047);

        let rendered = frame.render();
        let err = frame.append(Datagram::new(PduCommand::NOP, 1, 0, ()).unwrap());
        assert!(matches!(err, Err(EthercatError::OutOfRange(_))));
        assert_eq!(frame.len(), 1);
        assert_eq!(frame.header().len().value(), 2047);
        assert_eq!(frame.render(), rendered);
    }

    #[test]
    fn frame_overflow_on_first() {
        let mut frame = Frame::new();
        let err = frame.append(Datagram::new(PduCommand::LWR, 0, 0, vec![0u8; 2047 - 11]).unwrap());
        assert!(matches!(err, Err(EthercatError::OutOfRange(_))));
        assert!(frame.is_empty());
        assert_eq!(frame.header(), EthercatHeader::default());
    }

    #[test]
    fn frame_with_more_flags() {
        let mut frame = Frame::new();
        frame.append(Datagram::new(PduCommand::LWR, 0, 0, [0u8; 4]).unwrap().with_more(true)).unwrap();
        frame.append(Datagram::new(PduCommand::BRD, 1, 0, [0u8; 1]).unwrap()).unwrap();
        let bytes = frame.render();
        assert_eq!(bytes[2 + 6 .. 2 + 8], [4, 0x80]);
        assert_eq!(bytes[2 + 16 + 6 .. 2 + 16 + 8], [1, 0x00]);
        assert_eq!(u16::from(frame.header().len()), 16 + 13);
    }

    #[test]
    fn send_frame() {
        let socket = RecordSocket::new(1472);
        let mut frame = Frame::new();
        frame.append(aprd()).unwrap();
        frame.send(&socket).unwrap();

        let sent = socket.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0], frame.render());
    }

    #[test]
    fn send_too_big() {
        let socket = RecordSocket::new(16);
        let mut frame = Frame::new();
        frame.append(aprd()).unwrap();
        assert!(matches!(frame.send(&socket), Err(EthercatError::OutOfRange(_))));
        assert!(socket.sent.borrow().is_empty());

        let dynamic: &dyn EthercatSocket = &socket;
        assert!(frame.send(dynamic).is_err());
    }

    #[test]
    fn broadcast_address() {
        use std::net::Ipv4Addr;
        assert_eq!(
            UdpSocket::broadcast(Ipv4Addr::new(192, 168, 1, 10), Ipv4Addr::new(255, 255, 255, 0)),
            Ipv4Addr::new(192, 168, 1, 255));
        assert_eq!(
            UdpSocket::broadcast(Ipv4Addr::new(10, 2, 3, 4), Ipv4Addr::new(255, 0, 0, 0)),
            Ipv4Addr::new(10, 255, 255, 255));
    }

    #[test]
    fn header_bits_are_u11() {
        assert_eq!(EthercatHeader::new(u11::new(0x7ff), EthercatType::PDU).render(), [0xff, 0x17]);
    }

    #[test]
    fn frame_length_follows_rendered_bytes() {
        let datagram = Datagram::new(PduCommand::LWR, 0, 0x10000, Undersized).unwrap();
        assert_eq!(datagram.lrcm.len().value(), 4);
        assert_eq!(datagram.render().len(), 10 + 4 + 2);

        let mut frame = Frame::new();
        frame.append(datagram).unwrap();
        assert_eq!(frame.header().len().value(), 16);
        assert_eq!(frame.render().len(), 2 + 16);
        assert_eq!(frame.packed_size(), frame.render().len());
    }
}
