#[cfg(test)]
mod tests {
    use std::{io::{Error, ErrorKind}, sync::Arc};
    use etherframe::{EthercatError, EthercatResult, Frame, Datagram, PduCommand, PduData};

    #[test]
    fn display_ethercaterr_fmt() {
        let err_io = EthercatError::Io(Arc::new(Error::new(ErrorKind::InvalidInput, "interface not found")));
        let err_range = EthercatError::OutOfRange("frame length must be coded on 11 bits");

        assert!(err_io.to_string().contains("Io"));
        assert!(err_io.to_string().contains("interface not found"));
        assert!(err_range.to_string().contains("OutOfRange"));
        assert!(err_range.to_string().contains("11 bits"));
    }

    #[test]
    fn io_error_conversion() {
        fn failing() -> EthercatResult<()> {
            Err::<(), Error>(Error::new(ErrorKind::AddrInUse, "port taken"))?;
            Ok(())
        }
        let err = failing().unwrap_err();
        assert!(matches!(err, EthercatError::Io(_)));
        assert_eq!(err, EthercatError::Io(Arc::new(Error::from(ErrorKind::AddrInUse))));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn errors_propagate_from_frame() {
        let mut frame = Frame::new();
        let big = Datagram::new(PduCommand::LWR, 0, 0, vec![0u8; 2000]).unwrap();
        frame.append(big).unwrap();
        let err = frame.append(Datagram::new(PduCommand::LWR, 1, 0, vec![0u8; 100]).unwrap()).unwrap_err();
        assert!(matches!(err, EthercatError::OutOfRange(_)));
        assert_eq!(frame.render().len(), 2 + 2012);
    }
}
