//! CSV header parsing and normalization.

/// Normalizes a header value by trimming whitespace and a leading BOM.
pub fn normalize_header(value: &str) -> String {
    value.trim_start_matches('\u{feff}').trim().to_string()
}

/// Name given to a blank header cell at zero-based `index`.
pub fn unnamed_header(index: usize) -> String {
    format!("Unnamed: {index}")
}

/// Names blank headers with [`unnamed_header`]. Returns how many were blank.
pub fn fill_blank_headers(headers: &mut [String]) -> usize {
    let mut filled = 0;
    for (index, header) in headers.iter_mut().enumerate() {
        if header.is_empty() {
            *header = unnamed_header(index);
            filled += 1;
        }
    }
    filled
}

/// Parses a CSV line into fields, handling quoted values.
pub fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if !in_quotes => {
                in_quotes = true;
            }
            '"' if in_quotes => {
                // Check for escaped quote ("")
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            ',' if !in_quotes => {
                fields.push(normalize_header(&current));
                current.clear();
            }
            _ => {
                current.push(c);
            }
        }
    }

    fields.push(normalize_header(&current));
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("  Zip Code  "), "Zip Code");
        assert_eq!(normalize_header("\u{feff}zip"), "zip");
    }

    #[test]
    fn test_fill_blank_headers() {
        let mut headers = parse_csv_line("customer_id,,zip,");
        assert_eq!(fill_blank_headers(&mut headers), 2);
        assert_eq!(headers, vec!["customer_id", "Unnamed: 1", "zip", "Unnamed: 3"]);
    }

    #[test]
    fn test_parse_csv_line_simple() {
        let result = parse_csv_line("customer_id,email,zip");
        assert_eq!(result, vec!["customer_id", "email", "zip"]);
    }

    #[test]
    fn test_parse_csv_line_quoted() {
        let result = parse_csv_line("\"Shipping, Postal Code\",email");
        assert_eq!(result, vec!["Shipping, Postal Code", "email"]);
    }

    #[test]
    fn test_parse_csv_line_escaped_quotes() {
        let result = parse_csv_line("\"the \"\"zip\"\"\",b");
        assert_eq!(result, vec!["the \"zip\"", "b"]);
    }

    #[test]
    fn test_parse_csv_line_trimmed() {
        let result = parse_csv_line("  zip  ,  email  ");
        assert_eq!(result, vec!["zip", "email"]);
    }
}
