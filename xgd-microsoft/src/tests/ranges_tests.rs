use super::*;
use crate::security_sector::SS_SIZE;

// -- Test helpers --

const XGD2_THRESHOLD: i64 = 1_913_760 + 0x030000;
const XGD1_THRESHOLD: i64 = 1_913_776 + 0x030000;

fn make_sector(marker: u32) -> [u8; SS_SIZE] {
    let mut data = [0u8; SS_SIZE];
    data[13] = (marker >> 16) as u8;
    data[14] = (marker >> 8) as u8;
    data[15] = marker as u8;
    data
}

fn write_psn(data: &mut [u8; SS_SIZE], offset: usize, psn: u32) {
    data[offset..offset + 3].copy_from_slice(&psn.to_be_bytes()[1..]);
}

/// Write range table entry `index` as a pair of PSNs.
fn write_entry(data: &mut [u8; SS_SIZE], index: usize, start: u32, end: u32) {
    let entry = 1636 + index * 9;
    write_psn(data, entry, start);
    write_psn(data, entry + 3, end);
}

/// PSN of a layer-0 logical address.
fn layer0_psn(lba: i64) -> u32 {
    (lba + 0x030000) as u32
}

/// PSN of a layer-1 logical address, for the given threshold.
fn layer1_psn(lba: i64, threshold: i64) -> u32 {
    ((2 * threshold - 0x030000 - 1 - lba) ^ 0xFF_FFFF) as u32
}

// -- PSN conversion --

#[test]
fn test_psn_to_lba_layer0() {
    let generation = XgdGeneration::Xgd2;
    assert_eq!(generation.psn_to_lba(0x030000), 0);
    assert_eq!(generation.psn_to_lba(0x030000 + 4096), 4096);
    assert_eq!(generation.psn_to_lba((XGD2_THRESHOLD - 1) as u32), 1_913_759);
}

#[test]
fn test_psn_to_lba_layer1_continues_layer0() {
    let generation = XgdGeneration::Xgd2;
    let first_layer1 = ((XGD2_THRESHOLD - 1) ^ 0xFF_FFFF) as u32;
    assert_eq!(generation.psn_to_lba(first_layer1), 1_913_760);
    assert_eq!(
        generation.psn_to_lba(layer1_psn(3_000_000, XGD2_THRESHOLD)),
        3_000_000
    );
}

#[test]
fn test_psn_threshold_differs_for_xgd1() {
    assert_eq!(XgdGeneration::Xgd1.layer_one_threshold(), XGD1_THRESHOLD);
    assert_eq!(XgdGeneration::Xgd3Ssv2.layer_one_threshold(), XGD2_THRESHOLD);
    // Below the XGD1 threshold but above the XGD2 one
    let psn = (XGD2_THRESHOLD + 5) as u32;
    assert_eq!(XgdGeneration::Xgd1.psn_to_lba(psn), XGD2_THRESHOLD + 5 - 0x030000);
    assert_ne!(
        XgdGeneration::Xgd2.psn_to_lba(psn),
        XGD2_THRESHOLD + 5 - 0x030000
    );
}

// -- Range extraction --

#[test]
fn test_xgd2_reports_slots_zero_and_three() {
    let mut data = make_sector(0x20339F);
    write_entry(&mut data, 0, layer0_psn(1000), layer0_psn(1999));
    write_entry(&mut data, 1, layer0_psn(5000), layer0_psn(5001));
    write_entry(&mut data, 2, layer0_psn(6000), layer0_psn(6001));
    write_entry(
        &mut data,
        3,
        layer1_psn(3_000_000, XGD2_THRESHOLD),
        layer1_psn(3_000_999, XGD2_THRESHOLD),
    );

    let ranges = SecuritySector::new(data).ranges().unwrap();
    assert_eq!(ranges.generation, XgdGeneration::Xgd2);
    assert_eq!(ranges.ranges.len(), 4);
    assert_eq!(
        ranges.reported(),
        vec![
            SectorRange {
                start: 1000,
                end: 1999
            },
            SectorRange {
                start: 3_000_000,
                end: 3_000_999
            },
        ]
    );
    assert_eq!(ranges.to_string(), "1000-1999\n3000000-3000999");
}

#[test]
fn test_xgd3_ranges_keep_table_order() {
    let mut data = make_sector(0x238E0F);
    write_entry(&mut data, 0, layer0_psn(9000), layer0_psn(9100));
    write_entry(&mut data, 3, layer0_psn(100), layer0_psn(200));
    let ranges = SecuritySector::new(data).ranges().unwrap();
    assert_eq!(ranges.to_string(), "9000-9100\n100-200");
}

#[test]
fn test_xgd1_reports_all_sorted() {
    let mut data = make_sector(0x2033AF);
    for index in 0..16 {
        // Stored in descending order
        let start = 100_000 - index as i64 * 1000;
        write_entry(&mut data, index, layer0_psn(start), layer0_psn(start + 99));
    }

    let ranges = SecuritySector::new(data).ranges().unwrap();
    let reported = ranges.reported();
    assert_eq!(reported.len(), 16);
    assert!(reported.windows(2).all(|w| w[0].start <= w[1].start));
    assert_eq!(reported[0].start, 85_000);
    assert_eq!(reported[15].end, 100_099);
    assert_eq!(ranges.to_string().lines().count(), 16);
    assert_eq!(ranges.to_string().lines().next(), Some("85000-85099"));
}

#[test]
fn test_xgd1_layer1_ranges() {
    let mut data = make_sector(0x2033AF);
    write_entry(
        &mut data,
        0,
        layer1_psn(2_500_000, XGD1_THRESHOLD),
        layer1_psn(2_500_099, XGD1_THRESHOLD),
    );
    let ranges = SecuritySector::new(data).ranges().unwrap();
    assert!(ranges.reported().contains(&SectorRange {
        start: 2_500_000,
        end: 2_500_099
    }));
}

#[test]
fn test_ranges_are_deterministic() {
    let mut data = make_sector(0x20339F);
    write_entry(&mut data, 0, layer0_psn(42), layer0_psn(84));
    let sector = SecuritySector::new(data);
    assert_eq!(sector.ranges().unwrap(), sector.ranges().unwrap());
}

#[test]
fn test_ranges_unrecognized_fails() {
    let sector = SecuritySector::new(make_sector(0xABCDEF));
    assert!(matches!(
        sector.ranges(),
        Err(XgdError::Classification { marker: 0xABCDEF })
    ));
}

#[test]
fn test_ranges_unaffected_by_clean() {
    let mut data = make_sector(0x20339F);
    write_entry(&mut data, 0, layer0_psn(1), layer0_psn(2));
    let sector = SecuritySector::new(data);
    let cleaned = sector.cleaned().unwrap();
    assert_eq!(sector.ranges().unwrap(), cleaned.ranges().unwrap());
}
