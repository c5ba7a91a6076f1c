/// Render a template by substituting successive `{}` slots positionally.
///
/// Surplus slots render empty; surplus arguments are ignored. Post templates
/// take (text, major label, minor label); description templates take the
/// major label only.
pub fn render(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut next = 0;
    while let Some(pos) = rest.find("{}") {
        out.push_str(&rest[..pos]);
        out.push_str(args.get(next).copied().unwrap_or(""));
        next += 1;
        rest = &rest[pos + 2..];
    }
    out.push_str(rest);
    out
}
