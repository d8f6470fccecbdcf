//! CSV statement layout:
//! preamble lines, a blank line, `Date,Transaction Type,Amount,Balance` rows,
//! a blank line, then the totals.

use banklink_config::StatementFormat;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::io::Write;

use crate::document::{StatementDocument, COLUMNS};
use crate::error::StatementResult;
use crate::renderer::StatementRenderer;

pub const CSV_TITLE: &str = "Bank-Link Statement";

#[derive(serde::Serialize)]
struct CsvOutRow<'a> {
    date: &'a str,
    kind: &'a str,
    amount: &'a str,
    balance: &'a str,
}

/// Plain-text renderer used on its own or as the PDF fallback
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvRenderer;

impl StatementRenderer for CsvRenderer {
    fn format(&self) -> StatementFormat {
        StatementFormat::Csv
    }

    fn render(&self, doc: &StatementDocument) -> StatementResult<Vec<u8>> {
        let mut buf = Vec::new();

        write_lines(
            &mut buf,
            [
                CSV_TITLE.to_string(),
                format!("Account: {}", doc.account_label()),
                format!("Account Holder: {}", doc.holder),
                format!("Statement Date: {}", doc.generated_on_text()),
            ],
        )?;
        buf.push(b'\n');

        {
            let mut wrt = writer(&mut buf);
            wrt.write_record(COLUMNS)?;
            for row in &doc.rows {
                wrt.serialize(CsvOutRow {
                    date: &row.date,
                    kind: &row.kind,
                    amount: &row.amount,
                    balance: &row.balance,
                })?;
            }
            wrt.flush()?;
        }
        buf.push(b'\n');

        write_lines(
            &mut buf,
            [
                format!("Total Transactions: {}", doc.total_transactions()),
                format!("Ending Balance: {}", doc.ending_balance),
            ],
        )?;

        log::debug!("Rendered CSV statement for {} ({} bytes)", doc.account_id, buf.len());
        Ok(buf)
    }
}

fn writer<W: Write>(out: W) -> csv::Writer<W> {
    WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(out)
}

/// Single-cell records, quoted when they contain a comma
fn write_lines<I>(buf: &mut Vec<u8>, lines: I) -> StatementResult<()>
where
    I: IntoIterator<Item = String>,
{
    let mut wrt = writer(buf);
    for line in lines {
        wrt.write_record([line])?;
    }
    wrt.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::StatementRow;
    use chrono::NaiveDate;

    fn doc(rows: Vec<StatementRow>) -> StatementDocument {
        StatementDocument {
            title: "BANK-LINK STATEMENT".to_string(),
            account_id: "ACC001".to_string(),
            account_name: "Cheque Account".to_string(),
            holder: "Thandi Nkosi".to_string(),
            generated_on: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            rows,
            ending_balance: "R1250.50".to_string(),
        }
    }

    fn row(date: &str, kind: &str, amount: &str, balance: &str) -> StatementRow {
        StatementRow {
            date: date.to_string(),
            kind: kind.to_string(),
            amount: amount.to_string(),
            balance: balance.to_string(),
        }
    }

    #[test]
    fn test_full_layout() {
        let bytes = CsvRenderer
            .render(&doc(vec![
                row("2024-06-01", "Opening Balance", "R1000.00", "R1000.00"),
                row("2024-06-02", "Deposit", "R250.50", "R1250.50"),
            ]))
            .unwrap();
        let text = String::from_utf8(bytes).unwrap();

        let expected = "Bank-Link Statement\n\
            Account: Cheque Account (ACC001)\n\
            Account Holder: Thandi Nkosi\n\
            Statement Date: 2024-06-03\n\
            \n\
            Date,Transaction Type,Amount,Balance\n\
            2024-06-01,Opening Balance,R1000.00,R1000.00\n\
            2024-06-02,Deposit,R250.50,R1250.50\n\
            \n\
            Total Transactions: 2\n\
            Ending Balance: R1250.50\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_no_transactions_still_has_header_and_totals() {
        let text = String::from_utf8(CsvRenderer.render(&doc(vec![])).unwrap()).unwrap();
        assert!(text.contains("Date,Transaction Type,Amount,Balance\n\n"));
        assert!(text.contains("Total Transactions: 0\n"));
    }

    #[test]
    fn test_blank_lines_separate_sections() {
        let bytes = CsvRenderer
            .render(&doc(vec![row("2024-06-01", "Deposit", "R5.00", "R5.00")]))
            .unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let sections: Vec<&str> = text.trim_end().split("\n\n").collect();
        assert_eq!(sections.len(), 3);
        assert!(sections[0].ends_with("Statement Date: 2024-06-03"));
        assert!(sections[1].starts_with("Date,Transaction Type,Amount,Balance"));
        assert!(sections[2].starts_with("Total Transactions: 1"));
    }

    #[test]
    fn test_commas_in_names_are_quoted() {
        let mut statement = doc(vec![]);
        statement.account_name = "Savings, Joint".to_string();
        let text = String::from_utf8(CsvRenderer.render(&statement).unwrap()).unwrap();
        assert!(text.contains("\"Account: Savings, Joint (ACC001)\"\n"));
    }
}
