//! Config helpers.

/// Replace every `${VAR}` in `input` with the value of the environment
/// variable `VAR`.
///
/// Unset variables expand to nothing. An unterminated `${` is kept as-is.
pub fn expand_env_vars(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let name_and_tail = &rest[start + 2..];
        let Some(end) = name_and_tail.find('}') else {
            out.push_str(&rest[start..]);
            return out;
        };
        if let Ok(value) = std::env::var(&name_and_tail[..end]) {
            out.push_str(&value);
        }
        rest = &name_and_tail[end + 1..];
    }

    out.push_str(rest);
    out
}
