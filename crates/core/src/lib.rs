pub mod range;
pub mod selection;

pub use range::{Bounds, Coord, Range};
pub use selection::{Selection, SelectionTracker};

/// Convert a zero-based column index to a spreadsheet-style letter label
/// (0 -> "A", 25 -> "Z", 26 -> "AA").
pub fn col_letter(mut index: usize) -> String {
    let mut letter = String::new();
    loop {
        letter.insert(0, (b'A' + (index % 26) as u8) as char);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letter
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_col_letter() {
        assert_eq!(col_letter(0), "A");
        assert_eq!(col_letter(25), "Z");
        assert_eq!(col_letter(26), "AA");
        assert_eq!(col_letter(27), "AB");
        assert_eq!(col_letter(701), "ZZ");
        assert_eq!(col_letter(702), "AAA");
    }
}
