#[cfg(test)]
mod tests {
    use fastcrypt_core::compression::{
        codec_ids, compress, create_compressor, create_decompressor, decompress, registered_codecs,
        resolve, CompressionCodec,
    };
    use fastcrypt_core::types::ErrorKind;

    #[test]
    fn test_registered_codecs() {
        let names: Vec<&str> = registered_codecs().iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["rle", "lz"]);
        assert_eq!(resolve(codec_ids::LZ).unwrap().id, CompressionCodec::Lz as u16);
    }

    #[test]
    fn test_unknown_codec_rejected() {
        assert_eq!(resolve(0x42).unwrap_err().kind(), ErrorKind::InvalidArgument);
        assert!(create_compressor(0).is_err());
        assert!(create_decompressor(0x42).is_err());
    }

    #[test]
    fn test_roundtrip_through_registry() {
        let data = b"registry registry registry \xff\xff\xff".to_vec();
        for info in registered_codecs() {
            let packed = compress(info.id, &data).unwrap();
            assert_eq!(decompress(info.id, &packed).unwrap(), data, "codec {}", info.name);
        }
    }

    #[test]
    fn test_chunks_append_to_output() {
        let mut c = create_compressor(codec_ids::RLE).unwrap();
        assert_eq!(c.codec(), CompressionCodec::Rle);
        let mut out = vec![0xAA];
        c.compress_chunk(&[1u8; 10], &mut out).unwrap();
        assert_eq!(out, vec![0xAA, 0xFF, 10, 1]);
    }

    #[test]
    fn test_decode_error_kind() {
        let err = decompress(codec_ids::LZ, &[0xFF, 0, 9]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }
}
