/// Live phone mask for form input: keeps digits, wraps the first two in
/// `(DD) `, puts a dash after the next five and caps the result at 15 chars.
pub fn mask_phone(input: &str) -> String {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
    let mut out = if digits.len() > 2 {
        format!("({}) {}", &digits[..2], &digits[2..])
    } else {
        digits
    };
    if let Some(at) = first_digit_run(&out, 6) {
        out.insert(at + 5, '-');
    }
    out.chars().take(15).collect()
}

/// Byte offset of the first run of `len` consecutive ASCII digits.
fn first_digit_run(s: &str, len: usize) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut run = 0;
    for (i, b) in bytes.iter().enumerate() {
        if b.is_ascii_digit() {
            run += 1;
            if run == len {
                return Some(i + 1 - len);
            }
        } else {
            run = 0;
        }
    }
    None
}
