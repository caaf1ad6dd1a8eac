/// Cleans up whitespace in rendered text.
///
/// Trailing spaces and tabs are removed from every line, then runs of three
/// or more newlines are collapsed to two so that at most one blank line
/// separates two lines of content.
///
/// ```
/// assert_eq!(descargo::normalize("a  \n\n \n\t\nb\t"), "a\n\nb");
/// ```
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut newlines = 0;
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            newlines += 1;
            if newlines <= 2 {
                out.push('\n');
            }
        }
        let line = line.trim_end_matches([' ', '\t']);
        if !line.is_empty() {
            out.push_str(line);
            newlines = 0;
        }
    }
    out
}
