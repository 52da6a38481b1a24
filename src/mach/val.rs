/// ## Tagged values
///
/// What an expression produces. The three domains never mix inside an
/// expression; conversion happens only where a statement or a string
/// expression asks for it.

#[derive(Debug, Clone, PartialEq)]
pub enum Val {
    Integer(i32),
    Float(f64),
    String(Vec<u8>),
}

impl Val {
    /// Text used by `print` and by string concatenation.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Val::Integer(n) => n.to_string().into_bytes(),
            Val::Float(n) => format_float(*n).into_bytes(),
            Val::String(s) => s.clone(),
        }
    }
}

/// Six decimals with trailing zeros removed, one digit is always kept
/// after the point.
fn format_float(n: f64) -> String {
    let mut s = format!("{:.6}", n);
    if !s.contains('.') {
        return s;
    }
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.push('0');
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(1.0), "1.0");
        assert_eq!(format_float(2.5), "2.5");
        assert_eq!(format_float(0.125), "0.125");
        assert_eq!(format_float(-3.0), "-3.0");
        assert_eq!(format_float(1.0 / 3.0), "0.333333");
        assert_eq!(format_float(100.0), "100.0");
    }

    #[test]
    fn test_to_bytes() {
        assert_eq!(Val::Integer(-12).to_bytes(), b"-12");
        assert_eq!(Val::Float(0.5).to_bytes(), b"0.5");
        assert_eq!(Val::String(b"hi".to_vec()).to_bytes(), b"hi");
    }
}
