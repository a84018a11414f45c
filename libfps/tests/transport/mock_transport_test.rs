use libfps::transport::Transport;
use libfps::transport::mock::MockTransport;

#[test]
fn boxed_transport_delegates() {
    let mut mock = MockTransport::new();
    mock.push_reply(vec![0x30]);
    let mut boxed: Box<dyn Transport> = Box::new(mock);

    boxed.write(&[0x55, 0xAA]).unwrap();
    assert_eq!(boxed.try_read_byte().unwrap(), Some(0x30));
    assert_eq!(boxed.try_read_byte().unwrap(), None);

    boxed.set_baud(38400).unwrap();
    assert_eq!(boxed.baud(), 38400);
}

#[test]
fn noise_only_at_mismatched_rate() {
    let mut m = MockTransport::new();
    m.set_responsive_baud(115200);
    m.mismatch_noise = vec![0xE0, 0x00];
    m.push_reply(vec![0x01]);

    m.write(&[0x00]).unwrap();
    assert_eq!(m.pending_rx(), 2);
    m.rx.clear();

    m.set_baud(115200).unwrap();
    m.write(&[0x00]).unwrap();
    assert_eq!(m.pending_rx(), 1);
}
