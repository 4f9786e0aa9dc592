//! Field annotation parsing.

/// Overrides declared on a field through its `name,help,section` annotation.
///
/// An annotation only applies when it has exactly three comma-separated
/// parts. Anything else behaves as if the field had no annotation at all,
/// so overrides are never partially applied.
///
/// Parts are kept as written, even when empty. An empty name falls back to
/// the lowercased field name in [`FieldDescriptor::new`](crate::core::FieldDescriptor::new).
///
/// # Examples
///
/// ```rust
/// use cfgp::core::Tag;
///
/// let tag = Tag::parse("port, the listening port, server").unwrap();
/// assert_eq!(tag.name, "port");
/// assert_eq!(tag.help, "the listening port");
/// assert_eq!(tag.section, "server");
///
/// assert!(Tag::parse("port,the listening port").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// External name used for file keys, switches and environment variables
    pub name: String,
    /// Help text shown next to the command-line switch
    pub help: String,
    /// File section the key is looked up in
    pub section: String,
}

impl Tag {
    /// Parse a raw annotation, trimming whitespace around each part.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.split(',').map(str::trim);
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(name), Some(help), Some(section), None) => Some(Self {
                name: name.to_string(),
                help: help.to_string(),
                section: section.to_string(),
            }),
            _ => None,
        }
    }
}
