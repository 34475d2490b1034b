use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use exif::{Context, Field, In, Reader, Tag, Value};

/// Raw decoded tags in file order: `("EXIF DateTimeOriginal", "2019:12:14 15:04:33")`.
pub type Tags = Vec<(String, String)>;

/// Build a raw tag key from its namespace and field name.
pub fn tag_key(namespace: &str, field: &str) -> String {
    format!("{} {}", namespace, field)
}

/// Decode the embedded EXIF tags of an image file.
///
/// Any failure (missing file, unsupported container, no EXIF block) yields an
/// empty list. A photo without tags is a normal outcome, not an error.
pub fn extract_tags(path: &Path) -> Tags {
    let Ok(file) = File::open(path) else {
        log::debug!("Cannot open {} for EXIF decoding", path.display());
        return Vec::new();
    };
    let exif = match Reader::new().read_from_container(&mut BufReader::new(file)) {
        Ok(exif) => exif,
        Err(e) => {
            log::debug!("No EXIF data in {}: {}", path.display(), e);
            return Vec::new();
        }
    };

    exif.fields()
        .map(|field| (tag_key(namespace(field), &field_name(field)), field_text(field)))
        .collect()
}

fn namespace(field: &Field) -> &'static str {
    if field.ifd_num == In::THUMBNAIL {
        return "Thumbnail";
    }
    match field.tag.context() {
        Context::Tiff => "Image",
        Context::Exif => "EXIF",
        Context::Gps => "GPS",
        _ => "Interoperability",
    }
}

/// Local tag name. Exif tags written into IFD0 (Nikon stores `DateTimeOriginal`
/// there) are unknown in the TIFF context, so they are named by their Exif number.
fn field_name(field: &Field) -> String {
    let tag = field.tag;
    if tag.context() == Context::Tiff && tag.description().is_none() {
        let exif_tag = Tag(Context::Exif, tag.number());
        if exif_tag.description().is_some() {
            return exif_tag.to_string();
        }
    }
    tag.to_string()
}

/// ASCII values are kept verbatim; `display_value` would rewrite
/// `2019:12:14 15:04:33` as `2019-12-14 15:04:33`.
fn field_text(field: &Field) -> String {
    match field.value {
        Value::Ascii(ref parts) => parts
            .iter()
            .map(|p| String::from_utf8_lossy(p).trim_end_matches('\0').trim().to_string())
            .collect::<Vec<_>>()
            .join(" "),
        _ => field.display_value().to_string(),
    }
}
