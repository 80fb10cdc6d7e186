//! End-to-end scenarios driven through [`qtff_atoms::read_file`]/[`qtff_atoms::write_file`].

use std::io::Cursor;

use qtff_atoms::{read_file, write_file, ErrorKind, Fourcc, ReadConfig};

fn scenario_2_bytes() -> Vec<u8> {
    let mut bytes = vec![
        0x00, 0x00, 0x00, 0x14, b'f', b't', b'y', b'p', b'q', b't', b' ', b' ', 0x00, 0x00, 0x02,
        0x00, b'q', b't', b' ', b' ',
    ];
    // moov, declared size 0x74 (116: 8 header bytes + its one mvhd child of declared size
    // 0x6C/108), containing one mvhd with every field zero except time_scale and
    // next_track_id.
    bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x74, b'm', b'o', b'o', b'v']);
    bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x6C, b'm', b'v', b'h', b'd']);
    bytes.extend_from_slice(&[0; 4]); // version/flags
    bytes.extend_from_slice(&[0; 4]); // creation_time
    bytes.extend_from_slice(&[0; 4]); // modification_time
    bytes.extend_from_slice(&600u32.to_be_bytes()); // time_scale
    bytes.extend_from_slice(&[0; 4]); // duration
    bytes.extend_from_slice(&[0; 4]); // preferred_rate
    bytes.extend_from_slice(&[0; 2]); // preferred_volume
    bytes.extend_from_slice(&[0; 10]); // reserved
    bytes.extend_from_slice(&[0; 36]); // matrix, all zero per scenario 2
    bytes.extend_from_slice(&[0; 4]); // preview_time
    bytes.extend_from_slice(&[0; 4]); // preview_duration
    bytes.extend_from_slice(&[0; 4]); // poster_time
    bytes.extend_from_slice(&[0; 4]); // selection_time
    bytes.extend_from_slice(&[0; 4]); // selection_duration
    bytes.extend_from_slice(&[0; 4]); // current_time
    bytes.extend_from_slice(&1u32.to_be_bytes()); // next_track_id
    assert_eq!(bytes.len(), 20 + 8 + 108);
    bytes
}

#[test]
fn scenario_1_empty_movie_rejected() {
    let bytes: Vec<u8> = vec![0x00, 0x00, 0x00, 0x08, b'f', b't', b'y', b'p'];
    let mut cursor = Cursor::new(bytes);
    let cfg = ReadConfig::default();
    let err = read_file(&mut cursor, &cfg).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::BadFormat { .. }));
}

#[test]
fn scenario_2_minimal_file_roundtrips() {
    let bytes = scenario_2_bytes();
    let mut cursor = Cursor::new(bytes.clone());
    let cfg = ReadConfig::default();
    let file = read_file(&mut cursor, &cfg).unwrap();

    assert_eq!(file.file_type.as_ref().unwrap().major_brand, Fourcc(*b"qt  "));
    assert_eq!(file.movie.movie_header.time_scale, 600);

    let mut out = Vec::new();
    write_file(&file, &mut out).unwrap();
    assert_eq!(out, bytes);
}

#[test]
fn scenario_3_size_mismatch_detected() {
    let mut bytes = scenario_2_bytes();
    // Change moov's declared size from 0x74 to 0x80 (past the actual child content).
    bytes[20] = 0x00;
    bytes[21] = 0x00;
    bytes[22] = 0x00;
    bytes[23] = 0x80;
    let mut cursor = Cursor::new(bytes);
    let cfg = ReadConfig::default();
    let err = read_file(&mut cursor, &cfg).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::BadFormat { .. } | ErrorKind::EndOfStream));
}

#[test]
fn scenario_4_extended_size_mdat_roundtrips() {
    let mut bytes = scenario_2_bytes();
    bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x01, b'm', b'd', b'a', b't']);
    bytes.extend_from_slice(&32u64.to_be_bytes());
    bytes.extend_from_slice(&[0u8; 16]);

    let mut cursor = Cursor::new(bytes.clone());
    let cfg = ReadConfig::default();
    let file = read_file(&mut cursor, &cfg).unwrap();
    assert_eq!(file.movie_data.len(), 1);
    assert_eq!(file.movie_data[0].data.len(), 16);

    let mut out = Vec::new();
    write_file(&file, &mut out).unwrap();
    assert_eq!(out, bytes);
}

#[test]
fn scenario_5_twos_complement_i32() {
    use qtff_atoms::primitive::{ReadExt, WriteExt};
    use std::io::Cursor;

    let mut buf = Vec::new();
    buf.write_i32(-1).unwrap();
    assert_eq!(buf, vec![0xFF, 0xFF, 0xFF, 0xFF]);

    let mut cursor = Cursor::new(buf.clone());
    assert_eq!(cursor.read_i32().unwrap(), -1);

    let mut out = Vec::new();
    out.write_i32(-1).unwrap();
    assert_eq!(out, buf);
}

#[test]
fn scenario_6_stsz_compact_form() {
    use qtff_atoms::atom::sample_tables::SampleSize;
    use qtff_atoms::atom::ParseAtom;
    use qtff_atoms::head::Size;
    use qtff_atoms::types::VersionFlags;

    let stsz = SampleSize {
        version_flags: VersionFlags::default(),
        sample_size: 1234,
        number_of_entries: 1000,
        entry_sizes: None,
    };
    let mut buf = Vec::new();
    qtff_atoms::atom::WriteAtom::write_body(&stsz, &mut buf).unwrap();
    assert_eq!(buf.len(), 12);
    assert_eq!(qtff_atoms::atom::WriteAtom::len(&stsz), 20);

    let mut cursor = Cursor::new(buf.clone());
    let cfg = ReadConfig::default();
    let parsed = SampleSize::parse(&mut cursor, &cfg, Size::from_content_len(12)).unwrap();
    assert_eq!(parsed, stsz);

    let mut out = Vec::new();
    qtff_atoms::atom::WriteAtom::write_body(&parsed, &mut out).unwrap();
    assert_eq!(out, buf);
}
