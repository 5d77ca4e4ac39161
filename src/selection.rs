//! Parsing of user file selections such as `1 3 5`, `1-5` or `1-3 7 9-11`.
//!
//! Numbers are 1-indexed as shown in the menu listing. The result keeps the
//! order the user typed, including duplicates and descending ranges (`5-1`),
//! because that order becomes the page order of the merged PDF.

use thiserror::Error;

/// Why a selection string was rejected. The message is shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("Invalid range format '{0}'. Use: 1-5")]
    BadRange(String),

    #[error("A range must contain numbers: 1-5")]
    RangeNotNumeric,

    #[error("'{0}' is not a number.")]
    NotANumber(String),

    #[error("Number {value} is out of range (1-{max}).")]
    OutOfRange { value: usize, max: usize },

    #[error("Numbers must be between 1 and {max}.")]
    RangeOutOfBounds { max: usize },
}

/// Parse `raw` into 0-indexed positions into a list of `max` items.
///
/// An empty or whitespace-only string yields an empty list; callers decide
/// what that means.
pub fn parse_selection(raw: &str, max: usize) -> Result<Vec<usize>, SelectionError> {
    let mut indices = Vec::new();

    for token in raw.split_whitespace() {
        if token.contains('-') {
            let bounds: Vec<&str> = token.split('-').collect();
            if bounds.len() != 2 {
                return Err(SelectionError::BadRange(token.to_string()));
            }
            let (start, end) = match (bounds[0].parse::<usize>(), bounds[1].parse::<usize>()) {
                (Ok(s), Ok(e)) => (s, e),
                _ => return Err(SelectionError::RangeNotNumeric),
            };
            if start < 1 || end < 1 || start > max || end > max {
                return Err(SelectionError::RangeOutOfBounds { max });
            }
            if start <= end {
                indices.extend(start - 1..end);
            } else {
                indices.extend((end - 1..start).rev());
            }
        } else {
            let value: usize = token
                .parse()
                .map_err(|_| SelectionError::NotANumber(token.to_string()))?;
            if value < 1 || value > max {
                return Err(SelectionError::OutOfRange { value, max });
            }
            indices.push(value - 1);
        }
    }

    Ok(indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_numbers_keep_typed_order() {
        assert_eq!(parse_selection("3 1 2", 5).unwrap(), vec![2, 0, 1]);
    }

    #[test]
    fn ranges_and_mixed() {
        assert_eq!(parse_selection("1-3", 5).unwrap(), vec![0, 1, 2]);
        assert_eq!(
            parse_selection("1-3 7 9-11", 12).unwrap(),
            vec![0, 1, 2, 6, 8, 9, 10]
        );
    }

    #[test]
    fn reverse_range_descends() {
        assert_eq!(parse_selection("4-2", 5).unwrap(), vec![3, 2, 1]);
    }

    #[test]
    fn duplicates_are_kept() {
        assert_eq!(parse_selection("1 1 2-1", 3).unwrap(), vec![0, 0, 1, 0]);
    }

    #[test]
    fn empty_input_is_empty_selection() {
        assert!(parse_selection("   ", 3).unwrap().is_empty());
    }

    #[test]
    fn errors() {
        assert_eq!(
            parse_selection("1-2-3", 5),
            Err(SelectionError::BadRange("1-2-3".into()))
        );
        assert_eq!(parse_selection("a-3", 5), Err(SelectionError::RangeNotNumeric));
        assert_eq!(
            parse_selection("x", 5),
            Err(SelectionError::NotANumber("x".into()))
        );
        assert_eq!(
            parse_selection("6", 5),
            Err(SelectionError::OutOfRange { value: 6, max: 5 })
        );
        assert_eq!(
            parse_selection("0", 5),
            Err(SelectionError::OutOfRange { value: 0, max: 5 })
        );
        assert_eq!(
            parse_selection("2-9", 5),
            Err(SelectionError::RangeOutOfBounds { max: 5 })
        );
    }

    #[test]
    fn error_messages_are_user_facing() {
        let msg = SelectionError::OutOfRange { value: 9, max: 4 }.to_string();
        assert_eq!(msg, "Number 9 is out of range (1-4).");
    }
}
