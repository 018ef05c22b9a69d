use super::source::ProductionRow;
use crate::database::entities::NewWellAggregate;
use std::collections::BTreeMap;

#[derive(Default)]
struct Totals {
    oil: f64,
    gas: f64,
    brine: f64,
}

/// Sum oil, gas and brine per well.
///
/// Rows are grouped by the trimmed identifier, so `"A1  "` and `"A1"` land in
/// the same aggregate. Output is ordered by identifier.
pub fn aggregate_by_well(rows: &[ProductionRow]) -> Vec<NewWellAggregate> {
    let mut groups: BTreeMap<&str, Totals> = BTreeMap::new();

    for row in rows {
        let totals = groups.entry(row.well_number.trim()).or_default();
        totals.oil += row.oil;
        totals.gas += row.gas;
        totals.brine += row.brine;
    }

    groups
        .into_iter()
        .map(|(well_identifier, totals)| NewWellAggregate {
            well_identifier: well_identifier.to_string(),
            oil_total: totals.oil,
            gas_total: totals.gas,
            brine_total: totals.brine,
        })
        .collect()
}
