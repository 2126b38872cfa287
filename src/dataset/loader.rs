//! TSPLIB-style coordinate file parser.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

use super::types::{City, CityList, MAX_COORDINATE};
use crate::error::DatasetError;

/// Reads a coordinate file from disk.
///
/// The file stem becomes the instance name unless the file declares a
/// `NAME` header. See [`parse_cities`] for the accepted format.
pub fn load_cities(path: impl AsRef<Path>) -> Result<CityList, DatasetError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => DatasetError::NotFound(path.to_path_buf()),
        _ => DatasetError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let fallback = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("instance");
    let cities = parse_cities(fallback, &text)?;
    log::debug!("loaded {} cities from {}", cities.len(), path.display());
    Ok(cities)
}

/// Parses coordinate text into a [`CityList`].
///
/// Header lines (`KEY : VALUE`) precede either a `NODE_COORD_SECTION`
/// marker or, for bare lists, the first numeric line. Each coordinate
/// line is `id x y`; ids are one-based as in TSPLIB, or zero-based when
/// the smallest id is `0`. Data ends at `EOF`, `-1`, another `*_SECTION`
/// marker, or the end of the text.
///
/// # Examples
///
/// ```
/// use u_tsp::dataset::parse_cities;
///
/// let text = "NAME : tiny\nTYPE : TSP\nDIMENSION : 3\nEDGE_WEIGHT_TYPE : EUC_2D\n\
///             NODE_COORD_SECTION\n1 0 0\n2 3 0\n3 3 4\nEOF\n";
/// let cities = parse_cities("fallback", text).unwrap();
/// assert_eq!(cities.name(), "tiny");
/// assert_eq!(cities.len(), 3);
/// assert_eq!(cities.get(2).y, 4.0);
/// ```
pub fn parse_cities(fallback_name: &str, text: &str) -> Result<CityList, DatasetError> {
    let mut header = Header::default();
    let mut in_section = false;
    let mut entries: Vec<(i64, f64, f64)> = Vec::new();
    let mut seen: HashSet<i64> = HashSet::new();

    for (offset, raw) in text.lines().enumerate() {
        let line_no = offset + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if line == "EOF" {
            break;
        }

        if !in_section {
            if line.starts_with("NODE_COORD_SECTION") {
                in_section = true;
                continue;
            }
            if line.starts_with('#') {
                continue;
            }
            if line.starts_with(|c: char| c.is_ascii_alphabetic()) {
                header.read(line, line_no)?;
                continue;
            }
            // Bare coordinate list without a section marker.
            in_section = true;
        } else if line == "-1" {
            break;
        } else if line.starts_with(|c: char| c.is_ascii_alphabetic()) {
            if line.ends_with("_SECTION") {
                break;
            }
            return Err(DatasetError::Malformed {
                line: line_no,
                reason: format!("unexpected text '{line}' in coordinate section"),
            });
        }

        let (id, x, y) = parse_coordinate_line(line, line_no)?;
        if !seen.insert(id) {
            return Err(DatasetError::DuplicateIndex { line: line_no, id });
        }
        entries.push((id, x, y));
    }

    if entries.len() < 2 {
        return Err(DatasetError::TooFewCities(entries.len()));
    }
    if let Some(declared) = header.dimension {
        if declared != entries.len() {
            return Err(DatasetError::DimensionMismatch {
                declared,
                found: entries.len(),
            });
        }
    }

    let cities = index_cities(entries)?;
    let name = header.name.unwrap_or_else(|| fallback_name.to_string());
    Ok(CityList::from_cities(name, cities))
}

#[derive(Debug, Default)]
struct Header {
    name: Option<String>,
    dimension: Option<usize>,
}

impl Header {
    fn read(&mut self, line: &str, line_no: usize) -> Result<(), DatasetError> {
        let (key, value) = match line.split_once(':') {
            Some((k, v)) => (k.trim(), v.trim()),
            None => match line.split_once(char::is_whitespace) {
                Some((k, v)) => (k.trim(), v.trim()),
                None => (line, ""),
            },
        };

        match key.to_ascii_uppercase().as_str() {
            "NAME" => self.name = Some(value.to_string()),
            "TYPE" => {
                // Trailing annotations such as "TSP (M.~Hofmeister)" are allowed.
                if value.split_whitespace().next() != Some("TSP") {
                    return Err(DatasetError::UnsupportedType(value.to_string()));
                }
            }
            "EDGE_WEIGHT_TYPE" => {
                if value != "EUC_2D" {
                    return Err(DatasetError::UnsupportedEdgeWeight(value.to_string()));
                }
            }
            "DIMENSION" => {
                if self.dimension.is_some() {
                    return Err(DatasetError::Malformed {
                        line: line_no,
                        reason: "DIMENSION declared twice".into(),
                    });
                }
                let dimension = value
                    .parse::<usize>()
                    .ok()
                    .filter(|&d| d > 0)
                    .ok_or_else(|| DatasetError::Malformed {
                        line: line_no,
                        reason: format!("DIMENSION '{value}' is not a positive integer"),
                    })?;
                self.dimension = Some(dimension);
            }
            _ => {}
        }
        Ok(())
    }
}

fn parse_coordinate_line(line: &str, line_no: usize) -> Result<(i64, f64, f64), DatasetError> {
    let fields: Vec<&str> = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|f| !f.is_empty())
        .collect();
    if fields.len() != 3 {
        return Err(DatasetError::Malformed {
            line: line_no,
            reason: format!("expected 'id x y', got {} fields", fields.len()),
        });
    }

    let id = fields[0]
        .parse::<i64>()
        .ok()
        .filter(|&id| id >= 0)
        .ok_or_else(|| DatasetError::Malformed {
            line: line_no,
            reason: format!("city id '{}' is not a non-negative integer", fields[0]),
        })?;
    let x = parse_coordinate(fields[1], "x", line_no)?;
    let y = parse_coordinate(fields[2], "y", line_no)?;
    Ok((id, x, y))
}

fn parse_coordinate(field: &str, axis: &str, line_no: usize) -> Result<f64, DatasetError> {
    let value = field
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| DatasetError::Malformed {
            line: line_no,
            reason: format!("{axis} coordinate '{field}' is not a number"),
        })?;
    if value.abs() > MAX_COORDINATE {
        return Err(DatasetError::Malformed {
            line: line_no,
            reason: format!("{axis} coordinate {field} exceeds the supported magnitude {MAX_COORDINATE:e}"),
        });
    }
    Ok(value)
}

/// Maps file ids onto contiguous zero-based indices.
fn index_cities(mut entries: Vec<(i64, f64, f64)>) -> Result<Vec<City>, DatasetError> {
    entries.sort_by_key(|&(id, _, _)| id);
    let base = if entries[0].0 == 0 { 0 } else { 1 };

    entries
        .into_iter()
        .enumerate()
        .map(|(index, (id, x, y))| {
            let expected = index as i64 + base;
            if id != expected {
                return Err(DatasetError::MissingIndex(expected));
            }
            Ok(City { index, x, y })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SQUARE: &str = "NAME : square\n\
        COMMENT : four corners and a center\n\
        TYPE : TSP\n\
        DIMENSION : 5\n\
        EDGE_WEIGHT_TYPE : EUC_2D\n\
        NODE_COORD_SECTION\n\
        1 0 0\n\
        2 100 0\n\
        3 100 100\n\
        4 0 100\n\
        5 50 50\n\
        EOF\n";

    #[test]
    fn test_parse_tsplib_header_and_section() {
        let cities = parse_cities("fallback", SQUARE).unwrap();
        assert_eq!(cities.name(), "square");
        assert_eq!(cities.len(), 5);
        assert_eq!(cities.get(0).index, 0);
        assert_eq!(cities.get(4).x, 50.0);
    }

    #[test]
    fn test_parse_bare_list_zero_based() {
        let text = "some title line\n0 1.5 2.5\n1 3 4\n2 5 6\n";
        let cities = parse_cities("bare", text).unwrap();
        assert_eq!(cities.name(), "bare");
        assert_eq!(cities.len(), 3);
        assert_eq!(cities.get(0).x, 1.5);
    }

    #[test]
    fn test_parse_stops_at_eof_marker() {
        let text = "NODE_COORD_SECTION\n1 0 0\n2 1 1\nEOF\n3 not even parsed\n";
        let cities = parse_cities("t", text).unwrap();
        assert_eq!(cities.len(), 2);
    }

    #[test]
    fn test_parse_stops_at_next_section() {
        let text = "NODE_COORD_SECTION\n1 0 0\n2 1 1\nDISPLAY_DATA_SECTION\n1 9 9\n";
        assert_eq!(parse_cities("t", text).unwrap().len(), 2);
    }

    #[test]
    fn test_parse_unordered_ids_and_commas() {
        let text = "NODE_COORD_SECTION\n2, 5, 5\n1, 0, 0\n3, 9, 9\n";
        let cities = parse_cities("t", text).unwrap();
        assert_eq!(cities.get(0).x, 0.0);
        assert_eq!(cities.get(1).x, 5.0);
    }

    #[test]
    fn test_non_numeric_coordinate_reports_line() {
        let text = "NODE_COORD_SECTION\n1 0 0\n2 abc 1\n3 1 1\n";
        match parse_cities("t", text).unwrap_err() {
            DatasetError::Malformed { line, reason } => {
                assert_eq!(line, 3);
                assert!(reason.contains("abc"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_wrong_field_count() {
        let text = "NODE_COORD_SECTION\n1 0 0\n2 1\n";
        assert!(matches!(
            parse_cities("t", text),
            Err(DatasetError::Malformed { line: 3, .. })
        ));
    }

    #[test]
    fn test_duplicate_id() {
        let text = "NODE_COORD_SECTION\n1 0 0\n2 1 1\n2 3 3\n";
        assert!(matches!(
            parse_cities("t", text),
            Err(DatasetError::DuplicateIndex { line: 4, id: 2 })
        ));
    }

    #[test]
    fn test_missing_id() {
        let text = "NODE_COORD_SECTION\n1 0 0\n2 1 1\n4 3 3\n";
        assert!(matches!(
            parse_cities("t", text),
            Err(DatasetError::MissingIndex(3))
        ));
    }

    #[test]
    fn test_too_few_cities() {
        let text = "NODE_COORD_SECTION\n1 0 0\nEOF\n";
        assert!(matches!(
            parse_cities("t", text),
            Err(DatasetError::TooFewCities(1))
        ));
        assert!(matches!(
            parse_cities("t", ""),
            Err(DatasetError::TooFewCities(0))
        ));
    }

    #[test]
    fn test_dimension_mismatch() {
        let text = "DIMENSION : 4\nNODE_COORD_SECTION\n1 0 0\n2 1 1\n3 2 2\n";
        assert!(matches!(
            parse_cities("t", text),
            Err(DatasetError::DimensionMismatch {
                declared: 4,
                found: 3
            })
        ));
    }

    #[test]
    fn test_unsupported_headers() {
        let atsp = "TYPE : ATSP\nNODE_COORD_SECTION\n1 0 0\n2 1 1\n";
        assert!(matches!(
            parse_cities("t", atsp),
            Err(DatasetError::UnsupportedType(_))
        ));
        let geo = "EDGE_WEIGHT_TYPE : GEO\nNODE_COORD_SECTION\n1 0 0\n2 1 1\n";
        assert!(matches!(
            parse_cities("t", geo),
            Err(DatasetError::UnsupportedEdgeWeight(_))
        ));
        let twice = "DIMENSION : 2\nDIMENSION : 2\nNODE_COORD_SECTION\n1 0 0\n2 1 1\n";
        assert!(matches!(
            parse_cities("t", twice),
            Err(DatasetError::Malformed { line: 2, .. })
        ));
    }

    #[test]
    fn test_huge_coordinates_are_rejected() {
        let text = "NODE_COORD_SECTION\n1 -3e18 -3e18\n2 3e18 -3e18\n3 3e18 3e18\n4 -3e18 3e18\n";
        match parse_cities("t", text).unwrap_err() {
            DatasetError::Malformed { line, reason } => {
                assert_eq!(line, 2);
                assert!(reason.contains("x coordinate"));
            }
            other => panic!("unexpected error {other:?}"),
        }

        let edge = format!("NODE_COORD_SECTION\n1 0 0\n2 {MAX_COORDINATE} -{MAX_COORDINATE}\n");
        assert_eq!(parse_cities("t", &edge).unwrap().len(), 2);
    }

    #[test]
    fn test_type_accepts_annotated_tsp() {
        let text = "TYPE : TSP (M.~Hofmeister)\nNODE_COORD_SECTION\n1 0 0\n2 1 1\n";
        assert_eq!(parse_cities("t", text).unwrap().len(), 2);
        let text = "TYPE : TSPTW\nNODE_COORD_SECTION\n1 0 0\n2 1 1\n";
        assert!(matches!(
            parse_cities("t", text),
            Err(DatasetError::UnsupportedType(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.tsp");
        assert!(matches!(load_cities(&path), Err(DatasetError::NotFound(_))));
    }

    #[test]
    fn test_load_uses_file_stem_as_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("berlin3.tsp");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "NODE_COORD_SECTION\n1 0 0\n2 1 0\n3 0 1\nEOF").unwrap();
        drop(file);

        let cities = load_cities(&path).unwrap();
        assert_eq!(cities.name(), "berlin3");
        assert_eq!(cities.len(), 3);
    }

    #[test]
    fn test_tsplib_output_reads_back() {
        let original = CityList::from_coords("rt", &[(0.5, 1.0), (2.0, 3.25), (7.0, 1.0)]).unwrap();
        let parsed = parse_cities("other", &original.to_tsplib()).unwrap();
        assert_eq!(parsed, original);
    }
}
