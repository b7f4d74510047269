use crate::application::engine::SettlementReport;
use crate::domain::format::format_amount;
use crate::domain::settlement::SettlementResult;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct TransferRecord<'a> {
    from: &'a str,
    to: &'a str,
    from_name: &'a str,
    to_name: &'a str,
    amount: String,
}

impl<'a> From<&'a SettlementResult> for TransferRecord<'a> {
    fn from(transfer: &'a SettlementResult) -> Self {
        Self {
            from: transfer.from.as_str(),
            to: transfer.to.as_str(),
            from_name: &transfer.from_name,
            to_name: &transfer.to_name,
            amount: format!("{:.2}", transfer.amount),
        }
    }
}

/// Writes settlement reports to any `Write` sink.
pub struct SettlementWriter<W: Write> {
    sink: W,
}

impl<W: Write> SettlementWriter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    /// One `from,to,from_name,to_name,amount` row per transfer, amounts with
    /// two decimals. The header is written even when there are no transfers.
    pub fn write_csv(&mut self, report: &SettlementReport) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(&mut self.sink);
        writer.write_record(["from", "to", "from_name", "to_name", "amount"])?;
        for transfer in &report.transfers {
            writer.serialize(TransferRecord::from(transfer))?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Human-readable listing using the display format of the report currency.
    pub fn write_text(&mut self, report: &SettlementReport) -> Result<()> {
        writeln!(self.sink, "Settlement in {}", report.currency)?;
        if report.transfers.is_empty() {
            writeln!(self.sink, "No transfers needed.")?;
            return Ok(());
        }
        for transfer in &report.transfers {
            writeln!(
                self.sink,
                "{} -> {}: {}",
                transfer.from_name,
                transfer.to_name,
                format_amount(transfer.amount, &report.currency)
            )?;
        }
        writeln!(
            self.sink,
            "Total: {}",
            format_amount(report.total, &report.currency)
        )?;
        Ok(())
    }

    pub fn write_json(&mut self, report: &SettlementReport) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.sink, report)?;
        writeln!(self.sink)?;
        Ok(())
    }
}
