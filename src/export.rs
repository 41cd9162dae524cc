//! CSV export of chartable series
//!
//! Every writer emits a header row followed by one row per period or year,
//! with currency amounts rounded to 2 decimal places.

use std::io::Write;

use csv::Writer;
use serde::Serialize;

use crate::amortization::{AmortizationSchedule, YearlyAmortization};
use crate::growth::GrowthSnapshot;
use crate::rent_vs_buy::RentVsBuyPoint;
use crate::request::CalculationResponse;
use crate::retirement::CorpusPoint;

fn write_rows<W, T, I>(writer: W, rows: I) -> csv::Result<()>
where
    W: Write,
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let mut wtr = Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Monthly amortization entries
pub fn write_amortization_csv<W: Write>(writer: W, schedule: &AmortizationSchedule) -> csv::Result<()> {
    write_rows(writer, schedule.entries.iter().map(|e| e.rounded()))
}

pub fn write_yearly_amortization_csv<W: Write>(
    writer: W,
    rows: &[YearlyAmortization],
) -> csv::Result<()> {
    write_rows(writer, rows.iter().map(YearlyAmortization::rounded))
}

pub fn write_growth_csv<W: Write>(writer: W, snapshots: &[GrowthSnapshot]) -> csv::Result<()> {
    write_rows(writer, snapshots.iter().map(GrowthSnapshot::rounded))
}

pub fn write_corpus_csv<W: Write>(writer: W, points: &[CorpusPoint]) -> csv::Result<()> {
    write_rows(writer, points.iter().map(CorpusPoint::rounded))
}

pub fn write_rent_vs_buy_csv<W: Write>(writer: W, points: &[RentVsBuyPoint]) -> csv::Result<()> {
    write_rows(writer, points.iter().map(RentVsBuyPoint::rounded))
}

/// Write the series carried by a response
///
/// Returns `false` without writing when the calculator has no series (tax).
pub fn write_response_csv<W: Write>(writer: W, response: &CalculationResponse) -> csv::Result<bool> {
    match response {
        CalculationResponse::Emi(schedule) => write_amortization_csv(writer, schedule)?,
        CalculationResponse::Sip(projection) => write_growth_csv(writer, &projection.snapshots)?,
        CalculationResponse::Goal(goal) => write_growth_csv(writer, &goal.snapshots)?,
        CalculationResponse::Retirement(plan) => write_corpus_csv(writer, &plan.corpus_path)?,
        CalculationResponse::RentVsBuy(result) => write_rent_vs_buy_csv(writer, &result.points)?,
        CalculationResponse::Tax(_) | CalculationResponse::TaxComparison(_) => return Ok(false),
    }
    Ok(true)
}
