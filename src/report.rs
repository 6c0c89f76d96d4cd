//! Compact reporting of code point lists in run summaries.

/// Render an ascending list of code points as comma-separated runs, e.g.
/// `"No font support: 65-67, 70, 72-73"`.
pub fn code_point_report(description: &str, code_points: &[u32]) -> String {
    let mut out = String::from(description);
    let mut i = 0;
    let mut first = true;
    while i < code_points.len() {
        let start = code_points[i];
        let mut end = start;
        while i + 1 < code_points.len() && code_points[i + 1] == end + 1 {
            end = code_points[i + 1];
            i += 1;
        }
        if !first {
            out.push_str(", ");
        }
        first = false;
        if start == end {
            out.push_str(&start.to_string());
        } else {
            out.push_str(&format!("{start}-{end}"));
        }
        i += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_is_just_the_description() {
        assert_eq!(code_point_report("No font support: ", &[]), "No font support: ");
    }

    #[test]
    fn singletons_and_runs() {
        assert_eq!(
            code_point_report("x: ", &[65, 66, 67, 70, 72, 73, 80]),
            "x: 65-67, 70, 72-73, 80"
        );
    }

    #[test]
    fn single_value() {
        assert_eq!(code_point_report("x: ", &[7]), "x: 7");
    }
}
