use crate::models::CandleTable;
use crate::{Error, Result};
use csv::WriterBuilder;
use std::fs::File;

/// Writes a candle table as comma-separated values with a header row and no
/// index column. Optional columns appear only when the table's layout
/// carries them, keeping the order
/// `time, open, high, low, close, [vwap,] volume, [count]`.
pub fn write_candle_table(path: &str, table: &CandleTable) -> Result<()> {
    let file = File::create(path).map_err(|err| Error::io(format!("csv create failed: {err}")))?;
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);

    let layout = table.layout();
    writer
        .write_record(layout.headers())
        .map_err(|err| Error::io(format!("csv write failed: {err}")))?;

    for candle in table.candles() {
        let mut record = vec![
            candle.time.to_string(),
            candle.open.to_string(),
            candle.high.to_string(),
            candle.low.to_string(),
            candle.close.to_string(),
        ];
        if layout.has_vwap {
            record.push(
                candle
                    .vwap
                    .map(|value| value.to_string())
                    .unwrap_or_default(),
            );
        }
        record.push(candle.volume.to_string());
        if layout.has_count {
            record.push(
                candle
                    .count
                    .map(|value| value.to_string())
                    .unwrap_or_default(),
            );
        }
        writer
            .write_record(&record)
            .map_err(|err| Error::io(format!("csv write failed: {err}")))?;
    }

    writer
        .flush()
        .map_err(|err| Error::io(format!("csv flush failed: {err}")))?;
    Ok(())
}
