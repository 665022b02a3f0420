/// 根据魔术字节嗅探图片格式
///
/// 考勤照片与学生照片上传只接受常见位图格式，扩展名不可信，
/// 一律按文件头判断。
///
/// # Returns
/// * `Some(mime)` - 识别出的 MIME 类型
/// * `None` - 不是支持的图片格式
pub fn sniff_image_format(data: &[u8]) -> Option<&'static str> {
    if data.is_empty() {
        return None;
    }

    if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
        Some("image/png")
    } else if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        Some("image/gif")
    } else if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
        Some("image/webp")
    } else if data.starts_with(b"BM") {
        Some("image/bmp")
    } else {
        None
    }
}

/// 验证图片内容是否在允许的 MIME 类型列表中
pub fn validate_image_upload(data: &[u8], allowed_types: &[String]) -> Result<&'static str, String> {
    let mime = sniff_image_format(data)
        .ok_or_else(|| "File content is not a supported image format".to_string())?;

    if allowed_types.iter().any(|t| t == mime) {
        Ok(mime)
    } else {
        Err(format!("Image type {mime} is not allowed"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_magic() {
        let png_header = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert_eq!(sniff_image_format(&png_header), Some("image/png"));
    }

    #[test]
    fn test_jpeg_magic() {
        let jpeg_header = [0xFF, 0xD8, 0xFF, 0xE0];
        assert_eq!(sniff_image_format(&jpeg_header), Some("image/jpeg"));
    }

    #[test]
    fn test_webp_magic() {
        let mut webp_header = Vec::new();
        webp_header.extend_from_slice(b"RIFF");
        webp_header.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
        webp_header.extend_from_slice(b"WEBP");
        assert_eq!(sniff_image_format(&webp_header), Some("image/webp"));
    }

    #[test]
    fn test_empty_data() {
        assert_eq!(sniff_image_format(&[]), None);
    }

    #[test]
    fn test_not_an_image() {
        assert_eq!(sniff_image_format(b"%PDF-1.4"), None);
        assert_eq!(sniff_image_format(b"Hello, World!"), None);
    }

    #[test]
    fn test_validate_image_upload() {
        let jpeg_header = [0xFF, 0xD8, 0xFF, 0xE0];
        let allowed = vec!["image/jpeg".to_string(), "image/png".to_string()];
        assert_eq!(
            validate_image_upload(&jpeg_header, &allowed),
            Ok("image/jpeg")
        );

        let gif_header = b"GIF89a";
        assert!(validate_image_upload(gif_header, &allowed).is_err());
    }
}
