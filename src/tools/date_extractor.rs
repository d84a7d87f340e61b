use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDate};
use exif::{In, Tag, Value};
use log::debug;
use std::fs;
use std::io::{BufRead, BufReader, Seek};
use std::path::Path;

/// 取得照片的拍攝日期
///
/// 優先讀取 EXIF 的拍攝時間（`DateTimeOriginal`），標籤不存在、格式錯誤
/// 或圖片無法解析時改用檔案系統的建立時間。只有檔案本身無法開啟
/// （例如已被移走）才回傳錯誤。
pub fn extract_capture_date(path: &Path) -> Result<NaiveDate> {
    let file =
        fs::File::open(path).with_context(|| format!("無法開啟檔案: {}", path.display()))?;
    let mut reader = BufReader::new(file);

    if let Some(date) = read_exif_date(&mut reader) {
        return Ok(date);
    }

    // 先關閉檔案，避免後續移動檔案時被開啟中的 handle 擋住
    drop(reader);

    debug!("無 EXIF 拍攝時間，改用檔案建立時間: {}", path.display());
    creation_date(path)
}

/// 從圖片容器讀取 EXIF 的 `DateTimeOriginal`（0x9003）欄位
fn read_exif_date<R: BufRead + Seek>(reader: &mut R) -> Option<NaiveDate> {
    let exif = exif::Reader::new().read_from_container(reader).ok()?;
    let field = exif.get_field(Tag::DateTimeOriginal, In::PRIMARY)?;

    // 直接取原始 ASCII 內容，display_value 會額外加上引號導致解析失敗
    let value = match &field.value {
        Value::Ascii(vec) if !vec.is_empty() => String::from_utf8(vec[0].clone()).ok()?,
        _ => return None,
    };

    parse_exif_date(&value)
}

/// 解析 EXIF 日期字串的日期部分（yyyy:MM:dd 開頭）
fn parse_exif_date(value: &str) -> Option<NaiveDate> {
    let date_part = value.trim().get(..10)?;
    NaiveDate::parse_from_str(date_part, "%Y:%m:%d").ok()
}

/// 取得檔案的建立日期，檔案系統不支援建立時間時改用修改時間
fn creation_date(path: &Path) -> Result<NaiveDate> {
    let metadata =
        fs::metadata(path).with_context(|| format!("無法讀取檔案資訊: {}", path.display()))?;

    let timestamp = metadata
        .created()
        .or_else(|_| metadata.modified())
        .with_context(|| format!("無法取得檔案時間: {}", path.display()))?;

    Ok(DateTime::<Local>::from(timestamp).date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    /// 建立只含一個 EXIF `DateTimeOriginal` 欄位的最小 JPEG
    fn make_exif_jpeg(date_time: &str) -> Vec<u8> {
        let mut ascii = date_time.as_bytes().to_vec();
        ascii.push(0);

        // TIFF 結構（little-endian）：
        //   header(8) -> IFD0(18, 指向 Exif IFD) -> Exif IFD(18) -> 字串資料
        let mut tiff = Vec::new();
        tiff.extend_from_slice(b"II\x2a\x00");
        tiff.extend_from_slice(&8u32.to_le_bytes());

        // IFD0：一個指向 Exif IFD 的指標欄位（tag 0x8769, LONG）
        let exif_ifd_offset: u32 = 8 + 18;
        tiff.extend_from_slice(&1u16.to_le_bytes());
        tiff.extend_from_slice(&0x8769u16.to_le_bytes());
        tiff.extend_from_slice(&4u16.to_le_bytes());
        tiff.extend_from_slice(&1u32.to_le_bytes());
        tiff.extend_from_slice(&exif_ifd_offset.to_le_bytes());
        tiff.extend_from_slice(&0u32.to_le_bytes());

        // Exif IFD：DateTimeOriginal（tag 0x9003, ASCII），內容放在 IFD 之後
        let value_offset: u32 = exif_ifd_offset + 18;
        tiff.extend_from_slice(&1u16.to_le_bytes());
        tiff.extend_from_slice(&0x9003u16.to_le_bytes());
        tiff.extend_from_slice(&2u16.to_le_bytes());
        tiff.extend_from_slice(&(ascii.len() as u32).to_le_bytes());
        tiff.extend_from_slice(&value_offset.to_le_bytes());
        tiff.extend_from_slice(&0u32.to_le_bytes());
        tiff.extend_from_slice(&ascii);

        // JPEG：SOI + APP1(Exif) + EOI
        let mut jpeg = Vec::new();
        jpeg.extend_from_slice(&[0xFF, 0xD8]);
        jpeg.extend_from_slice(&[0xFF, 0xE1]);
        let app1_len = (2 + 6 + tiff.len()) as u16;
        jpeg.extend_from_slice(&app1_len.to_be_bytes());
        jpeg.extend_from_slice(b"Exif\x00\x00");
        jpeg.extend_from_slice(&tiff);
        jpeg.extend_from_slice(&[0xFF, 0xD9]);
        jpeg
    }

    #[test]
    fn test_read_exif_date_from_jpeg() {
        let jpeg = make_exif_jpeg("2021:05:03 10:30:00");
        let mut cursor = Cursor::new(jpeg);

        let date = read_exif_date(&mut cursor).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2021, 5, 3).unwrap());
    }

    #[test]
    fn test_parse_exif_date() {
        assert_eq!(
            parse_exif_date("2021:05:03 10:30:00"),
            NaiveDate::from_ymd_opt(2021, 5, 3)
        );
        assert_eq!(
            parse_exif_date("  1999:12:31 00:00:00  "),
            NaiveDate::from_ymd_opt(1999, 12, 31)
        );

        // 格式錯誤或太短的字串不應解析成功
        assert!(parse_exif_date("2021-05-03 10:30:00").is_none());
        assert!(parse_exif_date("2021:13:99 00:00:00").is_none());
        assert!(parse_exif_date("2021:05").is_none());
        assert!(parse_exif_date("").is_none());
    }

    #[test]
    fn test_extract_uses_exif_over_file_time() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tagged.jpg");
        fs::write(&path, make_exif_jpeg("2018:02:14 08:00:00")).unwrap();

        let date = extract_capture_date(&path).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2018, 2, 14).unwrap());
    }

    #[test]
    fn test_extract_falls_back_on_undecodable_image() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.jpg");
        fs::write(&path, b"not actually a jpeg").unwrap();

        let date = extract_capture_date(&path).unwrap();
        let expected = creation_date(&path).unwrap();
        assert_eq!(date, expected);
    }

    #[test]
    fn test_extract_falls_back_on_malformed_tag() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad_tag.jpg");
        fs::write(&path, make_exif_jpeg("not a real datetime!")).unwrap();

        let date = extract_capture_date(&path).unwrap();
        let expected = creation_date(&path).unwrap();
        assert_eq!(date, expected);
    }

    #[test]
    fn test_extract_missing_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("vanished.jpg");

        assert!(extract_capture_date(&path).is_err());
    }
}
