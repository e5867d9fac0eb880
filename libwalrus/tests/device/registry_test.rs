use libwalrus::card::operations::WriteMode;
use libwalrus::card::{CardKind, ReadAttemptKind};
use libwalrus::device::CardDevice;
use libwalrus::device::registry::{self, DeviceKind};
use libwalrus::transport::MockTransport;

#[test]
fn usb_ids_resolve_to_families() {
    let cm = registry::find_by_usb_id(0x16D0, 0x04B2).unwrap();
    assert_eq!(cm.kind, DeviceKind::ChameleonMini);

    let pm3 = registry::find_by_usb_id(0x9AC4, 0x4B8F).unwrap();
    assert_eq!(pm3.kind, DeviceKind::Proxmark3);
    assert_eq!(pm3.usb_ids.len(), 3);

    assert!(registry::find_by_usb_id(0, 0).is_none());
}

#[test]
fn capabilities() {
    let cm = registry::descriptor(DeviceKind::ChameleonMini);
    assert!(cm.supports_read(CardKind::Mifare));
    assert!(cm.supports(WriteMode::Emulate, CardKind::Mifare));
    assert!(!cm.supports(WriteMode::Write, CardKind::Hid));

    let pm3 = registry::descriptor(DeviceKind::Proxmark3);
    assert!(pm3.supports_read(CardKind::Hid));
    assert!(pm3.supports(WriteMode::Write, CardKind::Hid));
    assert!(!pm3.supports(WriteMode::Emulate, CardKind::Mifare));
}

#[test]
fn labels() {
    assert_eq!(registry::card_kind_descriptor(CardKind::Hid).name, "HID Prox");
    assert_eq!(
        registry::read_attempt_descriptor(ReadAttemptKind::StaticKey).label,
        "Static key"
    );
}

#[test]
fn descriptor_opens_driver() {
    let device = registry::CHAMELEON_MINI
        .open(Box::new(MockTransport::new()))
        .unwrap();
    assert_eq!(device.kind(), DeviceKind::ChameleonMini);
    assert_eq!(device.descriptor().name, "Chameleon Mini");
}
