use news_digest::builder::{DigestBuilder, FontChoice};
use news_digest::fonts;
use news_digest::sample::sample_articles;
use sha2::{Digest, Sha256};

fn render_sample_pdf(font: FontChoice) -> Vec<u8> {
    DigestBuilder::new()
        .with_title("Sample Digest")
        .with_font(font)
        .build()
        .expect("build digest")
        .render(&sample_articles())
        .expect("render sample pdf")
        .bytes
}

fn scrub_pdf(bytes: &[u8]) -> Vec<u8> {
    fn scrub_segment(data: &mut [u8], tag: &[u8], terminator: u8) {
        let mut index = 0;
        while index + tag.len() < data.len() {
            if data[index..].starts_with(tag) {
                let mut cursor = index + tag.len();
                while cursor < data.len() {
                    let byte = data[cursor];
                    if byte == terminator {
                        break;
                    }
                    if terminator == b')' {
                        data[cursor] = b'0';
                    } else if !matches!(byte, b'<' | b'>' | b' ' | b'\n' | b'\r' | b'\t') {
                        data[cursor] = b'0';
                    }
                    cursor += 1;
                }
                index = cursor;
            } else {
                index += 1;
            }
        }
    }

    fn scrub_xml(data: &mut [u8], start: &[u8], end: &[u8]) {
        let mut offset = 0;
        while offset + start.len() < data.len() {
            let Some(start_pos) = data[offset..]
                .windows(start.len())
                .position(|window| window == start)
            else {
                break;
            };
            let start_index = offset + start_pos + start.len();
            let Some(end_pos) = data[start_index..]
                .windows(end.len())
                .position(|window| window == end)
            else {
                break;
            };
            for byte in &mut data[start_index..start_index + end_pos] {
                if !matches!(*byte, b'<' | b'>' | b'/' | b' ' | b'\n' | b'\r' | b'\t') {
                    *byte = b'0';
                }
            }
            offset = start_index + end_pos + end.len();
        }
    }

    const INFO_ENTRIES: [(&[u8], u8); 4] = [
        (b"/CreationDate(", b')'),
        (b"/ModDate(", b')'),
        (b"/ID[", b']'),
        (b"/Producer(", b')'),
    ];
    const XMP_TAGS: [&str; 6] = [
        "xmp:CreateDate",
        "xmp:ModifyDate",
        "xmp:MetadataDate",
        "xmpMM:DocumentID",
        "xmpMM:InstanceID",
        "xmpMM:VersionID",
    ];

    let mut normalized = bytes.to_vec();
    for (tag, terminator) in INFO_ENTRIES {
        scrub_segment(&mut normalized, tag, terminator);
    }
    for tag in XMP_TAGS {
        let open = format!("<{tag}>");
        let close = format!("</{tag}>");
        scrub_xml(&mut normalized, open.as_bytes(), close.as_bytes());
    }
    normalized
}

fn normalized_hash(bytes: &[u8]) -> [u8; 32] {
    let normalized = scrub_pdf(bytes);
    let digest = Sha256::digest(&normalized);
    digest.into()
}

#[test]
fn renders_non_empty_output() {
    let bytes = render_sample_pdf(FontChoice::Builtin);
    assert!(
        bytes.starts_with(b"%PDF"),
        "rendered PDF should start with a header"
    );
}

#[test]
fn sample_digest_spans_multiple_pages() {
    let pdf = DigestBuilder::new()
        .with_font(FontChoice::Builtin)
        .build()
        .expect("build digest")
        .render(&sample_articles())
        .expect("render sample pdf");
    assert!(pdf.document.page_count() > 1);
    assert_eq!(pdf.document.article_pages()[0], 1);
}

#[test]
fn rendering_is_deterministic() {
    let bytes_a = render_sample_pdf(FontChoice::Builtin);
    let bytes_b = render_sample_pdf(FontChoice::Builtin);

    assert_eq!(bytes_a.len(), bytes_b.len(), "PDF sizes should match");

    let hash_a = normalized_hash(&bytes_a);
    let hash_b = normalized_hash(&bytes_b);

    assert_eq!(
        hash_a, hash_b,
        "PDF renders must be deterministic after metadata normalization"
    );
}

#[test]
fn embedded_font_renders_when_available() {
    let Ok(path) = fonts::resolve_font_file() else {
        eprintln!(
            "Skipping embedded_font_renders_when_available: font missing. Set NEWS_DIGEST_FONTS_DIR or copy assets/fonts next to the binary."
        );
        return;
    };
    let bytes = render_sample_pdf(FontChoice::File(path));
    assert!(bytes.starts_with(b"%PDF"));
}
