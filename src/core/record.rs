//! Records, their fields and the descriptors derived from them.

use super::field::{Kind, Slot};
use super::tag::Tag;
use crate::error::Result;

/// A flat structure whose fields can be populated by cfgp.
///
/// Most records are declared with the [`record!`](crate::record) macro, which
/// implements this trait. A manual implementation lists every field in
/// declaration order:
///
/// ```rust
/// use cfgp::core::{AsSlot, Field, Record};
///
/// struct Settings {
///     port: u16,
///     verbose: bool,
///     cache: Vec<String>,
/// }
///
/// impl Record for Settings {
///     fn fields(&mut self) -> Vec<Field<'_>> {
///         vec![
///             Field::new("port", self.port.as_slot()).with_annotation("port,listen port,server"),
///             Field::new("verbose", self.verbose.as_slot()),
///             Field::new("cache", self.cache.as_slot()).settable(false),
///         ]
///     }
/// }
/// ```
pub trait Record {
    /// Live views of the record's fields, in declaration order.
    fn fields(&mut self) -> Vec<Field<'_>>;
}

/// A live view of one field of a record.
pub struct Field<'a> {
    name: &'static str,
    annotation: Option<&'static str>,
    settable: bool,
    slot: Slot<'a>,
}

impl<'a> Field<'a> {
    /// Create a settable field without annotation.
    pub fn new(name: &'static str, slot: Slot<'a>) -> Self {
        Self {
            name,
            annotation: None,
            settable: true,
            slot,
        }
    }

    /// Attach a raw `name,help,section` annotation.
    pub fn with_annotation(mut self, annotation: &'static str) -> Self {
        self.annotation = Some(annotation);
        self
    }

    /// Mark whether sources may assign this field.
    pub fn settable(mut self, settable: bool) -> Self {
        self.settable = settable;
        self
    }

    /// The declared field name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether sources may assign this field.
    pub fn is_settable(&self) -> bool {
        self.settable
    }

    /// The coercion kind of this field.
    pub fn kind(&self) -> Kind {
        self.slot.kind()
    }

    /// Derive the descriptor for this field at position `index` of its record.
    pub fn descriptor(&self, index: usize) -> FieldDescriptor {
        let tag = self.annotation.and_then(Tag::parse);
        FieldDescriptor::new(index, self.name, self.kind(), tag)
    }

    /// Coerce `raw` and store it in the field.
    pub fn set(&mut self, raw: &str) -> Result<()> {
        self.slot.set(self.name, raw)
    }
}

/// Resolved metadata of a settable field.
///
/// Built once per field when a parse starts and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Position of the field in [`Record::fields`]
    pub index: usize,
    /// Declared field name
    pub field: &'static str,
    /// Coercion kind
    pub kind: Kind,
    /// External name: tag override, else the lowercased field name
    pub name: String,
    /// Help text for the command-line switch
    pub help: String,
    /// File section: tag override, else the global section `""`
    pub section: String,
}

impl FieldDescriptor {
    /// Resolve a descriptor from a field's declaration and parsed tag.
    ///
    /// An empty name in the tag falls back to the lowercased field name.
    pub fn new(index: usize, field: &'static str, kind: Kind, tag: Option<Tag>) -> Self {
        let fallback = || field.to_lowercase();
        match tag {
            Some(tag) => Self {
                index,
                field,
                kind,
                name: if tag.name.is_empty() {
                    fallback()
                } else {
                    tag.name
                },
                help: kind.help(Some(&tag.help)),
                section: tag.section,
            },
            None => Self {
                index,
                field,
                kind,
                name: fallback(),
                help: kind.help(None),
                section: String::new(),
            },
        }
    }

    /// Name of the command-line switch.
    pub fn switch_name(&self) -> String {
        self.name.to_lowercase()
    }

    /// Name of the environment variable, without prefix.
    pub fn env_key(&self) -> String {
        self.name.to_uppercase()
    }
}

/// Declare a struct and implement [`Record`] for it.
///
/// Visibility decides settability: fields with any `pub` visibility are
/// populated, private fields are left alone. An annotation follows the type
/// after `=>`.
///
/// ```rust
/// cfgp::record! {
///     #[derive(Debug, Default)]
///     pub struct ServerConfig {
///         /// Listening port
///         pub port: u16 => "port,the listening port,server",
///         pub host: String,
///         pub debug: bool,
///         secret: String,
///     }
/// }
///
/// let mut config = ServerConfig::default();
/// let names: Vec<_> = cfgp::core::Record::fields(&mut config)
///     .iter()
///     .filter(|f| f.is_settable())
///     .map(|f| f.name())
///     .collect();
/// assert_eq!(names, ["port", "host", "debug"]);
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $fvis:vis $field:ident : $ty:ty $(=> $tag:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$fmeta])*
                $fvis $field: $ty,
            )*
        }

        impl $crate::core::Record for $name {
            fn fields(&mut self) -> ::std::vec::Vec<$crate::core::Field<'_>> {
                ::std::vec![
                    $(
                        $crate::core::Field::new(
                            ::core::stringify!($field),
                            $crate::core::AsSlot::as_slot(&mut self.$field),
                        )
                        $(.with_annotation($tag))?
                        .settable(!::core::stringify!($fvis).is_empty()),
                    )*
                ]
            }
        }
    };
}
