use crate::base::Result;
use crate::types::ScanRecord;
use log::trace;
use std::io::Write;

/// Header line written by [`write_scan_csv`].
pub const SCAN_CSV_HEADER: &str = "start,quality,angle,distance";

/// Writes scan records as CSV, one line per record after the header.
///
/// Angles are in degrees and distances in millimeters, both printed with at
/// least one decimal digit.
///
/// # Example
/// ```ignore
/// let records = driver.scan(1)?;
/// let file = std::fs::File::create("output.csv")?;
/// rplidar_a2::utils::write_scan_csv(file, &records)?;
/// ```
pub fn write_scan_csv<W: Write>(mut writer: W, records: &[ScanRecord]) -> Result<()> {
    trace!("Writing {} scan records as CSV", records.len());
    writeln!(writer, "{}", SCAN_CSV_HEADER)?;
    for record in records {
        writeln!(
            writer,
            "{},{},{:?},{:?}",
            record.is_new_revolution,
            record.quality,
            record.angle(),
            record.distance()
        )?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_and_rows() {
        let records = [
            ScanRecord {
                is_new_revolution: true,
                quality: 47,
                angle_q6: 0,
                distance_q2: 1000,
            },
            ScanRecord {
                is_new_revolution: false,
                quality: 15,
                angle_q6: 333,
                distance_q2: 1136,
            },
        ];
        let mut out = Vec::new();
        write_scan_csv(&mut out, &records).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "start,quality,angle,distance\ntrue,47,0.0,250.0\nfalse,15,5.203125,284.0\n"
        );
    }

    #[test]
    fn empty_scan_writes_header_only() {
        let mut out = Vec::new();
        write_scan_csv(&mut out, &[]).unwrap();
        assert_eq!(out, b"start,quality,angle,distance\n");
    }
}
