//! Presentation column order.

use census_model::{
    HOUSEHOLD_INCOME_COLUMN, MEDIAN_AGE_COLUMN, OutputColumn, ZIP_POPULATION_COLUMN,
};

const DEMOGRAPHIC_COLUMNS: [(OutputColumn, &str); 3] = [
    (OutputColumn::HouseholdIncome, HOUSEHOLD_INCOME_COLUMN),
    (OutputColumn::MedianAge, MEDIAN_AGE_COLUMN),
    (OutputColumn::ZipPopulation, ZIP_POPULATION_COLUMN),
];

/// Suffix appended to an input header that collides with an output name.
pub const INPUT_COLLISION_SUFFIX: &str = " (input)";

/// Output headers and column sources for an enriched table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentationLayout {
    pub headers: Vec<String>,
    pub columns: Vec<OutputColumn>,
}

/// Orders columns as: the ZIP column, income, age, population, then every
/// other input column in its original relative order.
///
/// An input header that duplicates another output header, such as a column
/// already named `Median age`, gets [`INPUT_COLLISION_SUFFIX`] until unique.
pub fn presentation_layout(input_headers: &[String], zip_index: usize) -> PresentationLayout {
    let mut headers = Vec::with_capacity(input_headers.len() + DEMOGRAPHIC_COLUMNS.len());
    let mut columns = Vec::with_capacity(headers.capacity());

    let source_order = std::iter::once(zip_index)
        .chain((0..input_headers.len()).filter(|&index| index != zip_index));

    for (position, index) in source_order.enumerate() {
        if position == 1 {
            push_demographics(&mut headers, &mut columns);
        }
        headers.push(input_headers[index].clone());
        columns.push(OutputColumn::Source(index));
    }
    if headers.len() == 1 {
        push_demographics(&mut headers, &mut columns);
    }

    dedupe_source_headers(&mut headers, &columns);
    PresentationLayout { headers, columns }
}

fn push_demographics(headers: &mut Vec<String>, columns: &mut Vec<OutputColumn>) {
    for (column, name) in DEMOGRAPHIC_COLUMNS {
        headers.push(name.to_string());
        columns.push(column);
    }
}

fn dedupe_source_headers(headers: &mut [String], columns: &[OutputColumn]) {
    for position in 0..headers.len() {
        if columns[position].is_demographic() {
            continue;
        }
        let mut renamed = false;
        while headers
            .iter()
            .enumerate()
            .any(|(other, name)| other != position && *name == headers[position])
        {
            headers[position].push_str(INPUT_COLLISION_SUFFIX);
            renamed = true;
        }
        if renamed {
            tracing::warn!(
                column = %headers[position],
                "renamed input column that collides with an output column"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| (*name).to_string()).collect()
    }

    #[test]
    fn test_zip_first_then_demographics_then_rest() {
        let layout = presentation_layout(&headers(&["customer_id", "zip", "email"]), 1);
        assert_eq!(
            layout.headers,
            headers(&[
                "zip",
                "Estimated household income",
                "Median age",
                "Zip population",
                "customer_id",
                "email",
            ])
        );
        assert_eq!(
            layout.columns,
            vec![
                OutputColumn::Source(1),
                OutputColumn::HouseholdIncome,
                OutputColumn::MedianAge,
                OutputColumn::ZipPopulation,
                OutputColumn::Source(0),
                OutputColumn::Source(2),
            ]
        );
    }

    #[test]
    fn test_zip_only_input() {
        let layout = presentation_layout(&headers(&["Zip"]), 0);
        assert_eq!(layout.headers.len(), 4);
        assert_eq!(layout.columns[0], OutputColumn::Source(0));
        assert_eq!(layout.columns[3], OutputColumn::ZipPopulation);
    }

    #[test]
    fn test_colliding_input_header_is_suffixed() {
        let layout = presentation_layout(&headers(&["zip", "Median age"]), 0);
        assert_eq!(layout.headers[4], "Median age (input)");
        assert_eq!(layout.headers[2], "Median age");
    }
}
