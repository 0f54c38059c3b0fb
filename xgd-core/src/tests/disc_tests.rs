use super::*;

// -- Test helpers --

/// Build a unit whose region holds `offset` at 0x0C and `end` at 0x10.
fn make_unit(sequence: u8, offset: u32, end: u32) -> DiscInformationUnit {
    let mut region = vec![0u8; 52];
    region[0x0C..0x10].copy_from_slice(&offset.to_be_bytes());
    region[0x10..0x14].copy_from_slice(&end.to_be_bytes());
    DiscInformationUnit {
        sequence_number: sequence,
        disc_type: "BDO".to_string(),
        format_dependent: region,
    }
}

// -- from_units --

#[test]
fn test_two_units_yield_single_layerbreak() {
    let units = [make_unit(0, 100, 2_000_000), make_unit(1, 0, 0)];
    let breaks = Layerbreaks::from_units(&units).unwrap();
    assert_eq!(breaks.layerbreak1, Some(1_999_902));
    assert_eq!(breaks.layerbreak2, None);
    assert_eq!(breaks.layerbreak3, None);
    assert_eq!(breaks.layer_count(), 2);
}

#[test]
fn test_single_unit_has_no_layerbreak() {
    let breaks = Layerbreaks::from_units(&[make_unit(0, 100, 2_000_000)]).unwrap();
    assert!(breaks.is_empty());
    assert_eq!(breaks.layer_count(), 1);

    let breaks = Layerbreaks::from_units(&[]).unwrap();
    assert!(breaks.is_empty());
}

#[test]
fn test_four_units_accumulate() {
    let units = [
        make_unit(0, 0x0010_0000, 0x0050_0000),
        make_unit(1, 0x0010_0000, 0x0040_0000),
        make_unit(2, 0x0010_0000, 0x0030_0000),
        make_unit(3, 0, 0),
    ];
    let breaks = Layerbreaks::from_units(&units).unwrap();
    let lb1 = 0x0040_0000 + 2;
    let lb2 = lb1 + 0x0030_0000 + 2;
    let lb3 = lb2 + 0x0020_0000 + 2;
    assert_eq!(breaks.as_array(), [Some(lb1), Some(lb2), Some(lb3)]);
    assert!(lb1 < lb2 && lb2 < lb3);
    assert_eq!(breaks.layer_count(), 4);
}

#[test]
fn test_extra_units_beyond_four_layers_ignored() {
    let units: Vec<_> = (0..6).map(|i| make_unit(i, 0, 1000)).collect();
    let breaks = Layerbreaks::from_units(&units).unwrap();
    assert_eq!(breaks.as_array(), [Some(1002), Some(2004), Some(3006)]);
}

#[test]
fn test_short_region_is_malformed() {
    let short = DiscInformationUnit::new(vec![0u8; 0x12]);
    let result = Layerbreaks::from_units(&[short, make_unit(1, 0, 0)]);
    assert!(matches!(result, Err(XgdError::MalformedInput(_))));
}

#[test]
fn test_last_unit_region_not_read() {
    // The final unit only marks the last layer; its region is never interpreted.
    let units = [make_unit(0, 0, 500), DiscInformationUnit::new(Vec::new())];
    let breaks = Layerbreaks::from_units(&units).unwrap();
    assert_eq!(breaks.layerbreak1, Some(502));
}

// -- validated --

#[test]
fn test_validated_keeps_values_inside_disc() {
    let units = [make_unit(0, 100, 2_000_000), make_unit(1, 0, 0)];
    let breaks = Layerbreaks::from_units(&units).unwrap();
    let total = 4_000_000 * SECTOR_SIZE;
    assert_eq!(breaks.validated(total), breaks);
}

#[test]
fn test_validated_rejects_values_past_end() {
    let breaks = Layerbreaks {
        layerbreak1: Some(1000),
        layerbreak2: Some(2000),
        layerbreak3: None,
    };
    let validated = breaks.validated(1500 * SECTOR_SIZE);
    assert_eq!(validated.layerbreak1, Some(1000));
    assert_eq!(validated.layerbreak2, None);

    // Exactly at the end is outside the disc
    let validated = breaks.validated(1000 * SECTOR_SIZE);
    assert!(validated.is_empty());
}

#[test]
fn test_validated_rejects_non_increasing() {
    let breaks = Layerbreaks {
        layerbreak1: Some(1000),
        layerbreak2: Some(900),
        layerbreak3: Some(1200),
    };
    let validated = breaks.validated(u64::MAX);
    assert_eq!(validated.as_array(), [Some(1000), None, Some(1200)]);
}

#[test]
fn test_validated_compares_against_last_accepted() {
    // Spans of 1000, -100 and +50 compute to 1000, 900, 950
    let units = vec![
        make_unit(0, 0, 998),
        make_unit(1, 102, 0),
        make_unit(2, 0, 48),
        make_unit(3, 0, 0),
    ];
    let breaks = Layerbreaks::from_units(&units).unwrap();
    assert_eq!(breaks.as_array(), [Some(1000), Some(900), Some(950)]);

    let validated = breaks.validated(u64::MAX);
    assert_eq!(validated.as_array(), [Some(1000), None, None]);

    let present: Vec<i64> = validated.as_array().into_iter().flatten().collect();
    assert!(present.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_validated_rejects_negative_and_zero() {
    let breaks = Layerbreaks {
        layerbreak1: Some(-4),
        layerbreak2: Some(0),
        layerbreak3: None,
    };
    assert!(breaks.validated(u64::MAX).is_empty());
}

#[test]
fn test_span_handles_end_before_offset() {
    let unit = make_unit(0, 5000, 10);
    assert_eq!(unit.layer_span().unwrap(), -4988);
}
