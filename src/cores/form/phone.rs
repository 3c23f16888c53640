/// Reformats typed phone input into `(XXX) XXX-XXXX` as the user types.
///
/// Non-digits are dropped and at most ten digits are kept. Up to three digits only get
/// the opening parenthesis, four to six get the area code closed, seven or more get the
/// full grouping. Formatting an already formatted number returns it unchanged.
pub fn format_phone(input: &str) -> String {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();

    match digits.len() {
        0 => String::new(),
        1..=3 => format!("({}", digits),
        4..=6 => format!("({}) {}", &digits[..3], &digits[3..]),
        _ => {
            let end = digits.len().min(10);
            format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..end])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_number_is_grouped() {
        assert_eq!(format_phone("4045551234"), "(404) 555-1234");
    }

    #[test]
    fn formatting_is_idempotent() {
        let once = format_phone("404.555.1234");
        assert_eq!(once, "(404) 555-1234");
        assert_eq!(format_phone(&once), once);
    }

    #[test]
    fn partial_numbers() {
        assert_eq!(format_phone(""), "");
        assert_eq!(format_phone("4"), "(4");
        assert_eq!(format_phone("404"), "(404");
        assert_eq!(format_phone("4045"), "(404) 5");
        assert_eq!(format_phone("404555"), "(404) 555");
        assert_eq!(format_phone("4045551"), "(404) 555-1");
    }

    #[test]
    fn extra_digits_are_dropped() {
        assert_eq!(format_phone("404555123499"), "(404) 555-1234");
    }

    #[test]
    fn non_digits_are_stripped() {
        assert_eq!(format_phone("abc"), "");
        assert_eq!(format_phone("+1 (404)"), "(140) 4");
    }
}
