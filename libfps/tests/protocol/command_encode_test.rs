use libfps::protocol::codec::encode_command;
use libfps::protocol::{Command, DataPhase, EnrollStep, TimeoutClass};
use libfps::types::{CaptureQuality, FingerId};

fn param_of(frame: &[u8; 12]) -> u32 {
    u32::from_le_bytes([frame[4], frame[5], frame[6], frame[7]])
}

fn opcode_of(frame: &[u8; 12]) -> u16 {
    u16::from_le_bytes([frame[8], frame[9]])
}

#[test]
fn parameters_are_little_endian() {
    let frame = encode_command(&Command::ChangeBaud { rate: 115200 });
    assert_eq!(&frame[4..8], &[0x00, 0xC2, 0x01, 0x00]);
    assert_eq!(opcode_of(&frame), 0x04);
}

#[test]
fn id_commands_carry_the_id() {
    let id = FingerId::new(150);
    for cmd in [
        Command::CheckEnrolled { id },
        Command::EnrollStart { id },
        Command::DeleteId { id },
        Command::Verify { id },
        Command::GetTemplate { id },
        Command::SetTemplate { id },
    ] {
        assert_eq!(param_of(&encode_command(&cmd)), 150, "{:?}", cmd);
    }
}

#[test]
fn enroll_steps_have_distinct_opcodes() {
    let ops: Vec<u16> = [EnrollStep::First, EnrollStep::Second, EnrollStep::Third]
        .into_iter()
        .map(|s| opcode_of(&encode_command(&Command::Enroll(s))))
        .collect();
    assert_eq!(ops, vec![0x23, 0x24, 0x25]);
}

#[test]
fn flags_encode_as_zero_or_one() {
    assert_eq!(param_of(&encode_command(&Command::CmosLed { on: true })), 1);
    assert_eq!(param_of(&encode_command(&Command::CmosLed { on: false })), 0);
    assert_eq!(
        param_of(&encode_command(&Command::CaptureFinger {
            quality: CaptureQuality::Best
        })),
        1
    );
    assert_eq!(param_of(&encode_command(&Command::Open { info: true })), 1);
}

#[test]
fn classes_and_data_phases() {
    let id = FingerId::new(1);
    assert_eq!(Command::DeleteId { id }.timeout_class(), TimeoutClass::Control);
    assert_eq!(Command::DeleteAll.timeout_class(), TimeoutClass::Processing);
    assert_eq!(
        Command::IdentifyTemplate.timeout_class(),
        TimeoutClass::Search
    );
    assert_eq!(Command::GetImage.timeout_class(), TimeoutClass::Transfer);

    assert_eq!(Command::GetImage.data_phase(), DataPhase::Receive(51840));
    assert_eq!(Command::GetRawImage.data_phase(), DataPhase::Receive(19200));
    assert_eq!(Command::MakeTemplate.data_phase(), DataPhase::Receive(506));
    assert_eq!(Command::Open { info: true }.data_phase(), DataPhase::Receive(24));
    assert_eq!(Command::Open { info: false }.data_phase(), DataPhase::None);
    assert_eq!(Command::VerifyTemplate { id }.data_phase(), DataPhase::Send(506));
    assert_eq!(Command::Identify.data_phase(), DataPhase::None);
}
