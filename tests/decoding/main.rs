use halfblock_png::{ColorType, DecodeOptions, FormatError, Pixel, PNG};

const RGBA: &[u8] = include_bytes!("rgba.png");
const INDEXED_2BIT: &[u8] = include_bytes!("indexed_2bit.png");
const RGB_SPLIT: &[u8] = include_bytes!("rgb_split.png");

#[test]
fn decodes_rgba_with_mixed_filters() {
    let png = PNG::decode_with(RGBA, DecodeOptions { verify_crc: true }).unwrap();
    insta::assert_debug_snapshot!(png.header(), @r###"
    ImageHeader {
        width: 4,
        height: 3,
        bit_depth: 8,
        color_type: TruecolorWithAlpha,
    }
    "###);
    assert_eq!(png.pixels().len(), 12);
    assert_eq!(png.pixels()[3], Pixel::new(10, 20, 30, 200));
    assert_eq!(png.pixels()[10], Pixel::new(250, 128, 0, 128));
}

#[test]
fn renders_rgba() {
    let png = PNG::decode(RGBA).unwrap();
    insta::assert_debug_snapshot!(
        png.half_blocks().to_string(),
        @r###""\u{1b}[38;2;255;0;0;48;2;0;0;255m▀\u{1b}[0m\u{1b}[38;2;0;255;0m▀\u{1b}[0m\u{1b}[38;2;40;50;60m▄\u{1b}[0m\u{1b}[38;2;10;20;30m▀\u{1b}[0m\n\u{1b}[38;2;1;2;3m▀\u{1b}[0m \u{1b}[38;2;250;128;0m▀\u{1b}[0m \n""###
    );
}

#[test]
fn decodes_two_bit_palette_with_transparency() {
    let png = PNG::decode(INDEXED_2BIT).unwrap();
    assert_eq!(png.header().color_type, ColorType::IndexedColor);
    assert_eq!(png.header().bit_depth, 2);
    assert_eq!(
        &png.pixels()[..5],
        [
            Pixel::new(0, 0, 0, 0),
            Pixel::new(255, 255, 255, 255),
            Pixel::new(200, 30, 40, 255),
            Pixel::new(10, 120, 250, 255),
            Pixel::new(255, 255, 255, 255),
        ]
    );
}

#[test]
fn renders_odd_height_palette_image() {
    let png = PNG::decode(INDEXED_2BIT).unwrap();
    insta::assert_debug_snapshot!(
        png.half_blocks().to_string(),
        @r###""\u{1b}[38;2;10;120;250m▄\u{1b}[0m\u{1b}[38;2;255;255;255;48;2;200;30;40m▀\u{1b}[0m\u{1b}[38;2;200;30;40;48;2;255;255;255m▀\u{1b}[0m\u{1b}[38;2;10;120;250m▀\u{1b}[0m\u{1b}[38;2;255;255;255m▀\u{1b}[0m\n\u{1b}[38;2;255;255;255m▀\u{1b}[0m\u{1b}[38;2;255;255;255m▀\u{1b}[0m\u{1b}[38;2;10;120;250m▀\u{1b}[0m\u{1b}[38;2;10;120;250m▀\u{1b}[0m\u{1b}[38;2;200;30;40m▀\u{1b}[0m\n""###
    );
}

#[test]
fn joins_image_data_split_over_several_chunks() {
    let png = PNG::decode(RGB_SPLIT).unwrap();
    assert_eq!(
        png.pixels(),
        [
            Pixel::new(10, 20, 30, 255),
            Pixel::new(40, 50, 60, 255),
            Pixel::new(70, 80, 90, 255),
            Pixel::new(100, 110, 120, 255),
        ]
    );
}

#[test]
fn altered_signature_produces_no_image() {
    let mut data = RGBA.to_vec();
    data[3] = b'g';
    assert_eq!(PNG::decode(&data), Err(FormatError::Signature));
}

#[test]
fn missing_final_crc_bytes_are_tolerated() {
    let data = &RGBA[..RGBA.len() - 2];
    assert_eq!(PNG::decode(data).unwrap(), PNG::decode(RGBA).unwrap());
    assert_eq!(
        PNG::decode_with(data, DecodeOptions { verify_crc: true }),
        Err(FormatError::MissingCrc("IEND".to_owned()))
    );
}

#[test]
fn truncated_file_produces_no_image() {
    let data = &RGBA[..RGBA.len() - 20];
    assert!(matches!(
        PNG::decode(data),
        Err(FormatError::Truncated { .. })
    ));
}
