//! Minimal EXIF fixtures for tests.

/// Little-endian TIFF stream: IFD0 holds only the Exif IFD pointer,
/// the Exif IFD holds `DateTimeOriginal`.
pub fn exif_tiff(date_time_original: &str) -> Vec<u8> {
    let mut ascii = date_time_original.as_bytes().to_vec();
    ascii.push(0);

    let exif_ifd_offset: u32 = 8 + 2 + 12 + 4;
    let data_offset: u32 = exif_ifd_offset + 2 + 12 + 4;

    let mut out = Vec::new();
    out.extend_from_slice(b"II");
    out.extend_from_slice(&42u16.to_le_bytes());
    out.extend_from_slice(&8u32.to_le_bytes());

    // IFD0
    out.extend_from_slice(&1u16.to_le_bytes());
    push_entry(&mut out, 0x8769, 4, 1, exif_ifd_offset);
    out.extend_from_slice(&0u32.to_le_bytes());

    // Exif IFD
    out.extend_from_slice(&1u16.to_le_bytes());
    push_entry(&mut out, 0x9003, 2, ascii.len() as u32, data_offset);
    out.extend_from_slice(&0u32.to_le_bytes());

    out.extend_from_slice(&ascii);
    out
}

/// Little-endian TIFF stream with `DateTimeOriginal` stored directly in IFD0,
/// as Nikon NEF files do.
pub fn ifd0_date_tiff(date_time_original: &str) -> Vec<u8> {
    let mut ascii = date_time_original.as_bytes().to_vec();
    ascii.push(0);

    let data_offset: u32 = 8 + 2 + 12 + 4;

    let mut out = Vec::new();
    out.extend_from_slice(b"II");
    out.extend_from_slice(&42u16.to_le_bytes());
    out.extend_from_slice(&8u32.to_le_bytes());

    out.extend_from_slice(&1u16.to_le_bytes());
    push_entry(&mut out, 0x9003, 2, ascii.len() as u32, data_offset);
    out.extend_from_slice(&0u32.to_le_bytes());

    out.extend_from_slice(&ascii);
    out
}

/// JPEG with a single APP1 Exif segment wrapping [`exif_tiff`].
pub fn exif_jpeg(date_time_original: &str) -> Vec<u8> {
    let tiff = exif_tiff(date_time_original);
    let mut app1 = b"Exif\0\0".to_vec();
    app1.extend_from_slice(&tiff);

    let mut out = vec![0xFF, 0xD8, 0xFF, 0xE1];
    out.extend_from_slice(&((app1.len() + 2) as u16).to_be_bytes());
    out.extend_from_slice(&app1);
    out.extend_from_slice(&[0xFF, 0xD9]);
    out
}

/// JPEG markers with no metadata at all.
pub fn bare_jpeg() -> Vec<u8> {
    vec![0xFF, 0xD8, 0xFF, 0xD9]
}

fn push_entry(out: &mut Vec<u8>, tag: u16, typ: u16, count: u32, value: u32) {
    out.extend_from_slice(&tag.to_le_bytes());
    out.extend_from_slice(&typ.to_le_bytes());
    out.extend_from_slice(&count.to_le_bytes());
    out.extend_from_slice(&value.to_le_bytes());
}
