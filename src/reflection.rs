//! Type-name introspection.

/// Full path of `T`, e.g. `alloc::vec::Vec<i32>`.
pub fn type_string<T: ?Sized>() -> &'static str {
    std::any::type_name::<T>()
}

/// Full path of the type behind a reference; `&T` and `T` report the same name.
pub fn type_string_of<T: ?Sized>(_value: &T) -> &'static str {
    std::any::type_name::<T>()
}

/// Drops module paths while keeping the shape of the type:
/// `alloc::vec::Vec<alloc::string::String>` becomes `Vec<String>`.
pub fn short_type_name(full: &str) -> String {
    let mut short = String::with_capacity(full.len());
    let mut segment = String::new();
    for c in full.chars() {
        if c.is_alphanumeric() || c == '_' || c == ':' {
            segment.push(c);
        } else {
            short.push_str(last_segment(&segment));
            segment.clear();
            short.push(c);
        }
    }
    short.push_str(last_segment(&segment));
    short
}

fn last_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}
